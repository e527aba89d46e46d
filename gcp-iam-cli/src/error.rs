use thiserror::Error;

use crate::catalog::CatalogError;
use crate::env_file::EnvFileError;
use crate::output::OutputError;
use crate::roles::RoleError;

#[derive(Error, Debug)]
pub enum GcpIamError {
    #[error("{0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error(transparent)]
    EnvFile(#[from] EnvFileError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Prompt failed")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, GcpIamError>;
