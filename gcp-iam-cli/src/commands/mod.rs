//! Subcommand implementations of the role generator.

pub mod generate;
pub mod init;
pub mod list;

use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;

/// Dispatches a parsed subcommand.
pub fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::ListServices => list::list_services(&config.catalog),
        Command::ListRoles { service } => list::list_roles(&config.catalog, service),
        Command::Generate {
            service,
            level,
            project_id,
            output,
            format,
        } => generate::generate(
            config,
            &generate::GenerateRequest {
                service,
                level,
                project_id: project_id.as_deref(),
                output: output.as_deref(),
                format: *format,
            },
        ),
        Command::Init {
            project_id,
            region,
            zone,
            force,
        } => init::init(
            config,
            &init::InitOptions {
                project_id: project_id.clone(),
                region: region.clone(),
                zone: zone.clone(),
                force: *force,
            },
        ),
    }
}
