//! Project policy audit.
//!
//! Turns the provider's policy bindings into flat records and classifies
//! failures, so the caller can tell an empty policy apart from a failed
//! lookup while still rendering both as "no permissions found".

use log::error;

use crate::error::AuditError;
use crate::policy::PolicySource;

/// One row of the audit: a role, its members and the resource it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRecord {
    pub role: String,
    pub members: Vec<String>,
    pub resource: String,
}

/// Result of auditing a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The policy was read; it may legitimately be empty.
    Bindings(Vec<PolicyRecord>),
    /// The credentials are not allowed to read the policy.
    Denied(String),
    /// The project does not exist.
    ProjectNotFound(String),
    /// The client could not be set up from the service account key.
    ClientUnavailable(String),
    /// Network failure, malformed response or rejected credentials.
    Failed(String),
}

impl AuditOutcome {
    /// The audited records; empty for every failure.
    pub fn records(&self) -> &[PolicyRecord] {
        match self {
            AuditOutcome::Bindings(records) => records,
            _ => &[],
        }
    }

    /// User-facing message for a failed audit.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            AuditOutcome::Bindings(_) => None,
            AuditOutcome::Denied(_) => Some(
                "Insufficient permissions. Please ensure your service account has the 'roles/viewer' role."
                    .to_string(),
            ),
            AuditOutcome::ProjectNotFound(project_id) => {
                Some(format!("Project {} not found.", project_id))
            }
            AuditOutcome::ClientUnavailable(_) => Some(
                "Failed to initialize Google Cloud client. Check your service account credentials."
                    .to_string(),
            ),
            AuditOutcome::Failed(_) => Some(
                "Failed to analyze permissions. Check if required APIs are enabled.".to_string(),
            ),
        }
    }
}

impl From<AuditError> for AuditOutcome {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::PermissionDenied(detail) => {
                error!("Permission denied: {}", detail);
                AuditOutcome::Denied(detail)
            }
            AuditError::NotFound(project_id) => {
                error!("Project not found: {}", project_id);
                AuditOutcome::ProjectNotFound(project_id)
            }
            AuditError::Credentials(detail) => {
                error!("Failed to initialize client: {}", detail);
                AuditOutcome::ClientUnavailable(detail)
            }
            AuditError::Operational(detail) => {
                error!("Error analyzing permissions: {}", detail);
                AuditOutcome::Failed(detail)
            }
        }
    }
}

/// Resource path of a project.
pub fn project_resource(project_id: &str) -> String {
    format!("projects/{}", project_id)
}

/// Fetches the policy of a project once and flattens its bindings.
pub fn audit_project(source: &dyn PolicySource, project_id: &str) -> AuditOutcome {
    let resource = project_resource(project_id);

    match source.get_iam_policy(project_id) {
        Ok(bindings) => {
            log::debug!("Project {} has {} bindings", project_id, bindings.len());
            AuditOutcome::Bindings(
                bindings
                    .into_iter()
                    .map(|binding| PolicyRecord {
                        role: binding.role,
                        members: binding.members,
                        resource: resource.clone(),
                    })
                    .collect(),
            )
        }
        Err(err) => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyBinding;
    use std::cell::Cell;

    struct MockSource {
        result: Result<Vec<PolicyBinding>, AuditError>,
        calls: Cell<usize>,
    }

    impl MockSource {
        fn new(result: Result<Vec<PolicyBinding>, AuditError>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl PolicySource for MockSource {
        fn get_iam_policy(&self, _project_id: &str) -> Result<Vec<PolicyBinding>, AuditError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn binding(role: &str, members: &[&str]) -> PolicyBinding {
        PolicyBinding {
            role: role.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn audit_flattens_bindings_into_records() {
        let source = MockSource::new(Ok(vec![
            binding("roles/owner", &["user:owner@example.com"]),
            binding("roles/viewer", &["user:a@example.com", "group:ops@example.com"]),
        ]));

        let outcome = audit_project(&source, "demo-project");

        assert_eq!(
            outcome.records(),
            &[
                PolicyRecord {
                    role: "roles/owner".to_string(),
                    members: vec!["user:owner@example.com".to_string()],
                    resource: "projects/demo-project".to_string(),
                },
                PolicyRecord {
                    role: "roles/viewer".to_string(),
                    members: vec![
                        "user:a@example.com".to_string(),
                        "group:ops@example.com".to_string()
                    ],
                    resource: "projects/demo-project".to_string(),
                },
            ]
        );
        assert!(outcome.diagnostic().is_none());
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn audit_empty_policy_is_success_without_diagnostic() {
        let source = MockSource::new(Ok(Vec::new()));
        let outcome = audit_project(&source, "demo-project");

        assert_eq!(outcome, AuditOutcome::Bindings(Vec::new()));
        assert!(outcome.records().is_empty());
        assert_eq!(outcome.diagnostic(), None);
        assert!(outcome.diagnostic().is_none());
    }

    #[test]
    fn audit_permission_denied_yields_empty_records_and_distinct_diagnostic() {
        let source = MockSource::new(Err(AuditError::PermissionDenied("HTTP 403".to_string())));
        let outcome = audit_project(&source, "demo-project");

        assert!(outcome.records().is_empty());
        assert!(outcome.diagnostic().is_some());
        let diagnostic = outcome.diagnostic().unwrap();
        assert!(diagnostic.contains("Insufficient permissions"));
        assert!(diagnostic.contains("roles/viewer"));
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn audit_not_found_names_project() {
        let source = MockSource::new(Err(AuditError::NotFound("ghost-project".to_string())));
        let outcome = audit_project(&source, "ghost-project");

        assert!(outcome.records().is_empty());
        assert_eq!(
            outcome.diagnostic().unwrap(),
            "Project ghost-project not found."
        );
    }

    #[test]
    fn audit_operational_failure_is_generic() {
        let source = MockSource::new(Err(AuditError::Operational("connection reset".to_string())));
        let outcome = audit_project(&source, "demo-project");

        assert!(outcome.records().is_empty());
        assert_eq!(
            outcome.diagnostic().unwrap(),
            "Failed to analyze permissions. Check if required APIs are enabled."
        );
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn failure_diagnostics_are_distinct() {
        let diagnostics: Vec<String> = [
            AuditError::PermissionDenied("x".to_string()),
            AuditError::NotFound("demo-project".to_string()),
            AuditError::Operational("x".to_string()),
            AuditError::Credentials("x".to_string()),
        ]
        .into_iter()
        .map(|err| AuditOutcome::from(err).diagnostic().unwrap())
        .collect();

        for (i, a) in diagnostics.iter().enumerate() {
            for b in diagnostics.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn project_resource_format() {
        assert_eq!(project_resource("demo-project"), "projects/demo-project");
    }
}
