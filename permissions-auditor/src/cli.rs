use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// HH Permissions Tool - Manage and audit permissions effectively.
///
/// Analyzes the IAM policy of a Google Cloud project and displays its role
/// bindings. Authenticates with the service account key named by
/// GOOGLE_APPLICATION_CREDENTIALS.
#[derive(Parser, Debug)]
#[command(name = "hh-permissions")]
#[command(version)]
#[command(about, long_about)]
pub struct Args {
    /// Path to environment file
    #[arg(long = "env-file", global = true)]
    pub env_file: Option<PathBuf>,

    /// Set the logging level
    #[arg(long = "log-level", global = true, ignore_case = true, default_value = "info")]
    pub log_level: LogLevel,

    /// Suppress colored output
    #[arg(short = 'n', long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Audit Google Cloud Platform permissions
    ///
    /// Analyzes IAM permissions in your Google Cloud project and displays them
    /// in a formatted table.
    AuditGcp {
        /// Google Cloud Project ID to audit
        #[arg(long = "project-id")]
        project_id: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Display the current version
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => LevelFilter::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parses_case_insensitively() {
        let args = Args::try_parse_from(["hh-permissions", "--log-level", "DEBUG", "version"]).unwrap();
        assert_eq!(args.log_level, LogLevel::Debug);

        let args = Args::try_parse_from(["hh-permissions", "--log-level", "warning", "version"]).unwrap();
        assert_eq!(args.log_level, LogLevel::Warning);
    }

    #[test]
    fn log_level_defaults_to_info() {
        let args = Args::try_parse_from(["hh-permissions", "version"]).unwrap();
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn log_level_rejects_unknown_value() {
        assert!(Args::try_parse_from(["hh-permissions", "--log-level", "TRACE", "version"]).is_err());
    }

    #[test]
    fn log_level_maps_to_filter() {
        assert_eq!(LogLevel::Warning.filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Critical.filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Debug.filter(), LevelFilter::Debug);
    }

    #[test]
    fn audit_gcp_options() {
        let args = Args::try_parse_from([
            "hh-permissions",
            "audit-gcp",
            "--project-id",
            "demo-project",
            "--yes",
        ])
        .unwrap();

        match args.command {
            Command::AuditGcp { project_id, yes } => {
                assert_eq!(project_id.as_deref(), Some("demo-project"));
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
