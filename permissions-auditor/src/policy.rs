//! IAM policy retrieval through the Cloud Resource Manager API.
//!
//! The lookup is a single synchronous `getIamPolicy` call. It is never
//! retried; failures are classified into `AuditError` variants by HTTP status.

use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::credentials::{ServiceAccountKey, ServiceAccountTokenSource, TokenSource};
use crate::error::AuditError;

pub const RESOURCE_MANAGER_BASE: &str = "https://cloudresourcemanager.googleapis.com";
const HTTP_TIMEOUT_SECONDS: u64 = 30;

/// A role granted to a set of members, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyBinding {
    pub role: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IamPolicy {
    #[serde(default)]
    bindings: Vec<PolicyBinding>,
}

/// Anything that can fetch the current IAM policy of a project.
pub trait PolicySource {
    fn get_iam_policy(&self, project_id: &str) -> Result<Vec<PolicyBinding>, AuditError>;
}

/// Cloud Resource Manager v3 client.
pub struct ResourceManagerClient<T> {
    tokens: T,
    agent: ureq::Agent,
    base_url: String,
}

impl ResourceManagerClient<ServiceAccountTokenSource> {
    /// Creates a client authenticated with a service account key file.
    pub fn from_credentials_file(path: &Path) -> Result<Self, AuditError> {
        let key = ServiceAccountKey::from_file(path)?;
        debug!("Loaded service account key for {}", key.client_email);

        let agent = build_agent();
        let tokens = ServiceAccountTokenSource::new(key, agent.clone());
        Ok(Self::new(tokens, agent, RESOURCE_MANAGER_BASE))
    }
}

impl<T: TokenSource> ResourceManagerClient<T> {
    pub fn new(tokens: T, agent: ureq::Agent, base_url: &str) -> Self {
        Self {
            tokens,
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl<T: TokenSource> PolicySource for ResourceManagerClient<T> {
    fn get_iam_policy(&self, project_id: &str) -> Result<Vec<PolicyBinding>, AuditError> {
        let token = self.tokens.access_token()?;
        let url = format!("{}/v3/projects/{}:getIamPolicy", self.base_url, project_id);

        debug!("Fetching IAM policy from {}", url);

        let mut response = self
            .agent
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .send("{}")
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => classify_status(status, project_id),
                other => AuditError::Operational(format!("request failed: {}", other)),
            })?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| AuditError::Operational(format!("cannot read policy response: {}", e)))?;

        parse_policy(&body)
    }
}

fn build_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_per_call(Some(Duration::from_secs(HTTP_TIMEOUT_SECONDS)))
        .user_agent(format!("hh-permissions/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .new_agent()
}

/// Maps an HTTP error status to an audit error.
pub fn classify_status(status: u16, project_id: &str) -> AuditError {
    match status {
        403 => AuditError::PermissionDenied(format!(
            "HTTP 403 reading the IAM policy of {}",
            project_id
        )),
        // Rejected or expired credentials are not a missing role.
        401 => AuditError::Operational(format!(
            "HTTP 401 reading the IAM policy of {}: credentials were rejected",
            project_id
        )),
        404 => AuditError::NotFound(project_id.to_string()),
        _ => AuditError::Operational(format!("unexpected HTTP status {}", status)),
    }
}

/// Parses a `getIamPolicy` response body. A policy without bindings is empty.
pub fn parse_policy(body: &str) -> Result<Vec<PolicyBinding>, AuditError> {
    let policy: IamPolicy = serde_json::from_str(body)
        .map_err(|e| AuditError::Operational(format!("malformed policy response: {}", e)))?;
    Ok(policy.bindings)
}
