use std::path::{Path, PathBuf};

use gcp_iam::env_file::{Environment, PROJECT_ID_KEY};

pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Everything the audit needs, resolved at the command boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub project_id: String,
    pub credentials_path: PathBuf,
}

impl AuditConfig {
    /// Resolves the project and credentials.
    ///
    /// The project comes from the flag, then `GOOGLE_CLOUD_PROJECT`, then
    /// `GCP_PROJECT_ID`. The error is the message to show the user.
    pub fn resolve(env: &Environment, project_flag: Option<&str>) -> Result<Self, String> {
        let project_id = project_flag
            .filter(|id| !id.is_empty())
            .or_else(|| env.get(PROJECT_ENV))
            .or_else(|| env.get(PROJECT_ID_KEY))
            .ok_or_else(|| {
                format!(
                    "Project ID is required. Please provide it via --project-id or {} environment variable.",
                    PROJECT_ENV
                )
            })?;

        if !is_project_resource_id(project_id) {
            return Err(format!("'{}' is not a valid GCP project ID", project_id));
        }

        let credentials_path = env.get(CREDENTIALS_ENV).ok_or_else(|| {
            format!(
                "Google Cloud credentials not found. Please set {} environment variable.",
                CREDENTIALS_ENV
            )
        })?;

        Ok(Self {
            project_id: project_id.to_string(),
            credentials_path: PathBuf::from(credentials_path),
        })
    }
}

/// Accepts plain and domain-scoped project ids (`example.com:my-project`).
/// The id ends up in the request path, so nothing else gets through.
fn is_project_resource_id(project_id: &str) -> bool {
    !project_id.is_empty()
        && project_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | ':'))
}

/// Loads the environment for the auditor.
///
/// An env file that is missing or unreadable is only a warning here: the
/// process environment may still hold everything the audit needs.
pub fn load_environment(env_file: Option<&Path>) -> Environment {
    match Environment::load(env_file) {
        Ok(env) => {
            match env.source() {
                Some(path) => log::info!("Loaded environment from {}", path.display()),
                None => log::warn!("No environment file found at .env"),
            }
            env
        }
        Err(err) => {
            log::warn!("{}", err);
            Environment::from_process()
        }
    }
}
