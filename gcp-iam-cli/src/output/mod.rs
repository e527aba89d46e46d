//! Output generation for the role generator.
//!
//! This module renders custom roles as Terraform configuration in the
//! requested format and writes the result to stdout or to a file.

pub mod formatter;
pub mod hcl;
pub mod json;
pub mod table;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::roles::{role_title, CustomRoles, RoleError};
use formatter::{CustomRoleResource, OutputFormatter};

/// Errors that can occur during output generation.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Cannot write to stdout")]
    Io(#[from] std::io::Error),

    #[error("Cannot write {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Renders a registered custom role for a destination project.
///
/// Fails with `RoleError::NotFound` when the role was never registered, so
/// an unknown role never produces an empty or partial block.
pub fn render_custom_role(
    roles: &CustomRoles,
    project_id: &str,
    role_name: &str,
    formatter: &dyn OutputFormatter,
) -> Result<String, RoleError> {
    let permissions = roles.get(role_name)?;

    let resource = CustomRoleResource {
        project: project_id,
        role_id: role_name,
        title: role_title(role_name),
        description: format!("Custom role for {}", role_name),
        permissions,
    };

    Ok(formatter.format(&resource))
}

/// Writes rendered configuration to stdout or to a file.
pub struct OutputWriter<'a> {
    output: Option<&'a Path>,
}

impl<'a> OutputWriter<'a> {
    /// Creates a writer; `None` writes to stdout.
    pub fn new(output: Option<&'a Path>) -> Self {
        Self { output }
    }

    pub fn write(&self, rendered: &str) -> Result<(), OutputError> {
        match self.output {
            Some(path) => self.write_to_file(path, rendered),
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                write!(handle, "{}", rendered)?;
                handle.flush()?;
                Ok(())
            }
        }
    }

    fn write_to_file(&self, path: &Path, rendered: &str) -> Result<(), OutputError> {
        let write_error = |source| OutputError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        fs::write(path, rendered).map_err(write_error)?;

        log::info!("Configuration written to {}", path.display());
        Ok(())
    }
}
