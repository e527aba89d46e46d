//! Local environment file (`.env`) support.
//!
//! The file holds `KEY=VALUE` lines with the default project, region and
//! zone. It is written by `gcp-iam init` and read at startup by both
//! command-line tools. Values from the process environment take precedence
//! over values from the file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default env file name, relative to the current directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

pub const PROJECT_ID_KEY: &str = "GCP_PROJECT_ID";
pub const REGION_KEY: &str = "GCP_REGION";
pub const ZONE_KEY: &str = "GCP_ZONE";

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("Environment file not found: {0}")]
    NotFound(String),

    #[error("Cannot read environment file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write environment file {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parsed `KEY=VALUE` entries of an env file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvFile {
    entries: BTreeMap<String, String>,
}

impl EnvFile {
    /// Parses env file content.
    ///
    /// Blank lines and `#` comments are skipped, an `export ` prefix is
    /// allowed and values may be wrapped in matching single or double quotes.
    /// Lines that are not `KEY=VALUE` are skipped with a warning.
    pub fn parse(content: &str) -> Self {
        let mut entries = BTreeMap::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            let Some((key, value)) = line
                .split_once('=')
                .filter(|(key, _)| is_valid_key(key.trim()))
            else {
                log::warn!(
                    "Skipping invalid line {} in environment file: {}",
                    index + 1,
                    raw_line
                );
                continue;
            };

            entries.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }

        Self { entries }
    }

    pub fn read(path: &Path) -> Result<Self, EnvFileError> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                EnvFileError::NotFound(path.display().to_string())
            } else {
                EnvFileError::Read {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        Ok(Self::parse(&content))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Explicit view of the configuration environment.
///
/// Built once at the command boundary from the env file and a snapshot of
/// the process environment, then passed to whatever needs it.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    file: EnvFile,
    process: BTreeMap<String, String>,
    source: Option<PathBuf>,
}

impl Environment {
    /// Loads the environment.
    ///
    /// With an explicit `env_file`, the file must exist. Without one, the
    /// default `.env` in the current directory is used when present.
    pub fn load(env_file: Option<&Path>) -> Result<Self, EnvFileError> {
        let process = std::env::vars().collect();

        let (file, source) = match env_file {
            Some(path) => (EnvFile::read(path)?, Some(path.to_path_buf())),
            None => {
                let default_path = Path::new(DEFAULT_ENV_FILE);
                match EnvFile::read(default_path) {
                    Ok(file) => (file, Some(default_path.to_path_buf())),
                    Err(EnvFileError::NotFound(_)) => {
                        log::debug!("No environment file found at {}", default_path.display());
                        (EnvFile::default(), None)
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        if let Some(path) = &source {
            if file.is_empty() {
                log::warn!("Environment file {} has no entries", path.display());
            }
            log::debug!(
                "Loaded {} entries from environment file {}",
                file.len(),
                path.display()
            );
        }

        Ok(Self {
            file,
            process,
            source,
        })
    }

    /// The process environment alone, without reading any env file.
    pub fn from_process() -> Self {
        Self::from_parts(EnvFile::default(), std::env::vars())
    }

    /// Builds an environment from explicit parts.
    pub fn from_parts<I, K, V>(file: EnvFile, process: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            file,
            process: process
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: None,
        }
    }

    /// Looks a key up, preferring the process environment over the file.
    /// Empty values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.process
            .get(key)
            .map(String::as_str)
            .or_else(|| self.file.get(key))
            .filter(|value| !value.is_empty())
    }

    /// Path of the env file that was loaded, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Values written by `gcp-iam init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitValues {
    pub project_id: String,
    pub region: String,
    pub zone: String,
}

impl InitValues {
    pub fn render(&self) -> String {
        format!(
            "# GCP Configuration\n{}={}\n{}={}\n{}={}\n",
            PROJECT_ID_KEY, self.project_id, REGION_KEY, self.region, ZONE_KEY, self.zone
        )
    }

    pub fn write(&self, path: &Path) -> Result<(), EnvFileError> {
        fs::write(path, self.render()).map_err(|source| EnvFileError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_key_value_lines() {
        let file = EnvFile::parse("GCP_PROJECT_ID=demo-project\nGCP_REGION=europe-west1\n");

        assert_eq!(file.get("GCP_PROJECT_ID"), Some("demo-project"));
        assert_eq!(file.get("GCP_REGION"), Some("europe-west1"));
        assert_eq!(file.len(), 2);
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let content = "# GCP Configuration\n\n   \nGCP_ZONE=us-east1-b\n# trailing\n";
        let file = EnvFile::parse(content);

        assert_eq!(file.len(), 1);
        assert_eq!(file.get("GCP_ZONE"), Some("us-east1-b"));
    }

    #[test]
    fn parse_handles_export_and_quotes() {
        let content = "export A=\"quoted value\"\nB='single'\nC = spaced \nD=\"\"\n";
        let file = EnvFile::parse(content);

        assert_eq!(file.get("A"), Some("quoted value"));
        assert_eq!(file.get("B"), Some("single"));
        assert_eq!(file.get("C"), Some("spaced"));
        assert_eq!(file.get("D"), Some(""));
    }

    #[test]
    fn parse_keeps_equals_in_value() {
        let file = EnvFile::parse("TOKEN=abc=def");
        assert_eq!(file.get("TOKEN"), Some("abc=def"));
    }

    #[test]
    fn parse_skips_line_without_equals() {
        let file = EnvFile::parse("GCP_PROJECT_ID=x\nnot a pair\nGCP_ZONE=z\n");

        assert_eq!(file.len(), 2);
        assert_eq!(file.get("GCP_PROJECT_ID"), Some("x"));
        assert_eq!(file.get("GCP_ZONE"), Some("z"));
    }

    #[test]
    fn parse_skips_invalid_key() {
        let file = EnvFile::parse("BAD KEY=value");
        assert!(file.is_empty());
    }

    #[test]
    fn environment_load_tolerates_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.env");
        fs::write(&path, "HH_TEST_BROKEN_KEY=kept\nthis line is junk\n").unwrap();

        let env = Environment::load(Some(&path)).unwrap();
        assert_eq!(env.get("HH_TEST_BROKEN_KEY"), Some("kept"));
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let err = EnvFile::read(Path::new("/nonexistent/.env")).unwrap_err();
        assert!(matches!(err, EnvFileError::NotFound(_)));
    }

    #[test]
    fn environment_prefers_process_values() {
        let file = EnvFile::parse("GCP_PROJECT_ID=from-file\nGCP_REGION=file-region");
        let env = Environment::from_parts(file, [("GCP_PROJECT_ID", "from-process")]);

        assert_eq!(env.get("GCP_PROJECT_ID"), Some("from-process"));
        assert_eq!(env.get("GCP_REGION"), Some("file-region"));
        assert_eq!(env.get("GCP_ZONE"), None);
    }

    #[test]
    fn environment_treats_empty_as_unset() {
        let file = EnvFile::parse("GCP_PROJECT_ID=");
        let env = Environment::from_parts(file, Vec::<(String, String)>::new());

        assert_eq!(env.get("GCP_PROJECT_ID"), None);
    }

    #[test]
    fn environment_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.env");
        fs::write(&path, "HH_TEST_ONLY_KEY=loaded\n").unwrap();

        let env = Environment::load(Some(&path)).unwrap();
        assert_eq!(env.get("HH_TEST_ONLY_KEY"), Some("loaded"));
        assert_eq!(env.source(), Some(path.as_path()));
    }

    #[test]
    fn environment_load_missing_explicit_file_fails() {
        let result = Environment::load(Some(Path::new("/nonexistent/custom.env")));
        assert!(matches!(result, Err(EnvFileError::NotFound(_))));
    }

    #[test]
    fn init_values_render_and_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        let values = InitValues {
            project_id: "demo-project".to_string(),
            region: "us-central1".to_string(),
            zone: "us-central1-a".to_string(),
        };

        values.write(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# GCP Configuration\nGCP_PROJECT_ID=demo-project\nGCP_REGION=us-central1\nGCP_ZONE=us-central1-a\n"
        );

        let file = EnvFile::read(&path).unwrap();
        assert_eq!(file.get(PROJECT_ID_KEY), Some("demo-project"));
        assert_eq!(file.get(ZONE_KEY), Some("us-central1-a"));
    }
}
