use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::ServiceCatalog;
use crate::cli::{Cli, Command};
use crate::env_file::{Environment, PROJECT_ID_KEY, REGION_KEY, ZONE_KEY};
use crate::error::GcpIamError;

pub const DEFAULT_REGION: &str = "us-central1";
pub const DEFAULT_ZONE: &str = "us-central1-a";

/// GCP project ids: 6 to 30 lowercase letters, digits or hyphens, starting
/// with a letter and not ending with a hyphen.
static PROJECT_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]{4,28}[a-z0-9]$").expect("project id pattern is valid")
});

/// Defaults read from the environment file and the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcpDefaults {
    pub project_id: Option<String>,
    pub region: String,
    pub zone: String,
}

impl GcpDefaults {
    pub fn from_environment(env: &Environment) -> Self {
        Self {
            project_id: env.get(PROJECT_ID_KEY).map(str::to_string),
            region: env.get(REGION_KEY).unwrap_or(DEFAULT_REGION).to_string(),
            zone: env.get(ZONE_KEY).unwrap_or(DEFAULT_ZONE).to_string(),
        }
    }

    /// Resolves the destination project: an explicit value wins over the
    /// environment default. The result is validated.
    pub fn resolve_project(&self, explicit: Option<&str>) -> Result<String, GcpIamError> {
        let project_id = explicit
            .or(self.project_id.as_deref())
            .ok_or_else(|| {
                GcpIamError::Config(format!(
                    "{} must be set in environment or .env file",
                    PROJECT_ID_KEY
                ))
            })?;

        validate_project_id(project_id)?;
        Ok(project_id.to_string())
    }
}

/// Checks a GCP project id against the naming rules.
pub fn validate_project_id(project_id: &str) -> Result<(), GcpIamError> {
    if PROJECT_ID_PATTERN.is_match(project_id) {
        Ok(())
    } else {
        Err(GcpIamError::InvalidInput(format!(
            "'{}' is not a valid GCP project ID",
            project_id
        )))
    }
}

#[derive(Debug)]
pub struct Config {
    pub env_file: PathBuf,
    pub environment: Environment,
    pub defaults: GcpDefaults,
    pub catalog: ServiceCatalog,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, GcpIamError> {
        let environment = match cli.command {
            // init writes the env file and never reads it
            Command::Init { .. } => Environment::from_process(),
            _ => Environment::load(cli.env_file.as_deref())?,
        };
        let defaults = GcpDefaults::from_environment(&environment);

        let catalog = match &cli.catalog {
            Some(path) => ServiceCatalog::from_path(&Self::resolve_path(path)?)?,
            None => ServiceCatalog::builtin()?,
        };

        let env_file = cli
            .env_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::env_file::DEFAULT_ENV_FILE));

        Ok(Self {
            env_file,
            environment,
            defaults,
            catalog,
        })
    }

    /// Resolves a path to an absolute path.
    /// - Absolute paths are returned as-is
    /// - Relative paths are resolved relative to current directory
    pub fn resolve_path(path: &Path) -> Result<PathBuf, GcpIamError> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().map_err(|e| {
                GcpIamError::Config(format!("Cannot determine current directory: {}", e))
            })?;
            Ok(current_dir.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env_file::EnvFile;
    use std::fs;

    fn environment(content: &str) -> Environment {
        Environment::from_parts(
            EnvFile::parse(content),
            Vec::<(String, String)>::new(),
        )
    }

    fn cli(env_file: Option<PathBuf>, catalog: Option<PathBuf>) -> Cli {
        Cli {
            no_color: true,
            verbose: false,
            env_file,
            catalog,
            command: Command::ListServices,
        }
    }

    #[test]
    fn defaults_fall_back_to_region_and_zone() {
        let defaults = GcpDefaults::from_environment(&environment(""));

        assert_eq!(defaults.project_id, None);
        assert_eq!(defaults.region, "us-central1");
        assert_eq!(defaults.zone, "us-central1-a");
    }

    #[test]
    fn defaults_read_env_file_values() {
        let defaults = GcpDefaults::from_environment(&environment(
            "GCP_PROJECT_ID=demo-project\nGCP_REGION=europe-west4\nGCP_ZONE=europe-west4-b\n",
        ));

        assert_eq!(defaults.project_id.as_deref(), Some("demo-project"));
        assert_eq!(defaults.region, "europe-west4");
        assert_eq!(defaults.zone, "europe-west4-b");
    }

    #[test]
    fn resolve_project_prefers_explicit_value() {
        let defaults = GcpDefaults::from_environment(&environment("GCP_PROJECT_ID=env-project\n"));
        let project = defaults.resolve_project(Some("flag-project")).unwrap();
        assert_eq!(project, "flag-project");
    }

    #[test]
    fn resolve_project_uses_environment_default() {
        let defaults = GcpDefaults::from_environment(&environment("GCP_PROJECT_ID=env-project\n"));
        assert_eq!(defaults.resolve_project(None).unwrap(), "env-project");
    }

    #[test]
    fn resolve_project_missing_fails() {
        let defaults = GcpDefaults::from_environment(&environment(""));
        let err = defaults.resolve_project(None).unwrap_err();

        assert!(matches!(err, GcpIamError::Config(_)));
        assert_eq!(
            err.to_string(),
            "GCP_PROJECT_ID must be set in environment or .env file"
        );
    }

    #[test]
    fn validate_project_id_accepts_valid_ids() {
        for id in ["demo-project", "my-project-123", "abcdef"] {
            assert!(validate_project_id(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn validate_project_id_rejects_invalid_ids() {
        for id in ["", "short", "Demo-Project", "1project", "project-", "has_underscore"] {
            let err = validate_project_id(id).unwrap_err();
            assert!(matches!(err, GcpIamError::InvalidInput(_)), "{id} should be invalid");
        }
    }

    #[test]
    fn from_cli_with_explicit_env_file_and_catalog() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let env_path = temp_dir.path().join("test.env");
        let catalog_path = temp_dir.path().join("catalog.yml");
        fs::write(&env_path, "GCP_PROJECT_ID=demo-project\n").unwrap();
        fs::write(&catalog_path, "services:\n  run:\n    invoker: roles/run.invoker\n").unwrap();

        let config = Config::from_cli(&cli(Some(env_path.clone()), Some(catalog_path))).unwrap();

        assert_eq!(config.env_file, env_path);
        assert_eq!(config.catalog.services(), vec!["run"]);
        assert_eq!(config.defaults.project_id.as_deref(), Some("demo-project"));
    }

    #[test]
    fn from_cli_missing_env_file_fails() {
        let result = Config::from_cli(&cli(Some(PathBuf::from("/nonexistent/test.env")), None));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn from_cli_init_does_not_require_env_file() {
        let mut cli = cli(Some(PathBuf::from("/nonexistent/new.env")), None);
        cli.command = Command::Init {
            project_id: None,
            region: None,
            zone: None,
            force: false,
        };

        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.env_file, PathBuf::from("/nonexistent/new.env"));
        assert!(config.environment.source().is_none());
    }

    #[test]
    fn resolve_absolute_path_unchanged() {
        let absolute_path = PathBuf::from("/absolute/path/to/catalog.yml");
        let result = Config::resolve_path(&absolute_path).expect("Resolution should succeed");
        assert_eq!(result, absolute_path);
    }

    #[test]
    fn resolve_relative_path_becomes_absolute() {
        let relative_path = PathBuf::from("relative/catalog.yml");
        let result = Config::resolve_path(&relative_path).expect("Resolution should succeed");

        assert!(result.is_absolute());
        assert!(result.ends_with("relative/catalog.yml"));
    }
}
