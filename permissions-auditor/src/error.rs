use thiserror::Error;

/// Failures of the remote policy lookup, classified by how they are
/// reported to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// The caller's credentials lack the permission to read the policy.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The project does not exist (or is not visible).
    #[error("Project not found: {0}")]
    NotFound(String),

    /// Network failures, malformed responses, rejected credentials.
    #[error("{0}")]
    Operational(String),

    /// The service account key could not be loaded.
    #[error("Failed to initialize client: {0}")]
    Credentials(String),
}
