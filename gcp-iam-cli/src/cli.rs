use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// GCP IAM role generator
///
/// Maps GCP services and access levels to predefined IAM roles and generates
/// Terraform configuration for project-scoped custom roles.
#[derive(Parser, Debug)]
#[command(name = "gcp-iam")]
#[command(version)]
#[command(about, long_about)]
pub struct Cli {
    /// Suppress colored output (useful for CI/CD pipelines)
    #[arg(short = 'n', long = "no-color", global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long = "verbose", global = true)]
    pub verbose: bool,

    /// Path to the environment file holding the default project, region and zone
    #[arg(long = "env-file", global = true)]
    pub env_file: Option<PathBuf>,

    /// Path to a YAML service catalog replacing the built-in one
    #[arg(long = "catalog", global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all available GCP services
    ListServices,

    /// List available roles for a specific service
    ListRoles {
        /// GCP service name
        service: String,
    },

    /// Generate Terraform configuration for a service role
    Generate {
        /// GCP service name
        service: String,

        /// Access level
        #[arg(long, default_value = "viewer")]
        level: String,

        /// GCP project ID (overrides env)
        #[arg(long = "project-id")]
        project_id: Option<String>,

        /// Output file for Terraform config
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format: hcl, json
        #[arg(short = 'f', long = "format", default_value = "hcl")]
        format: OutputFormat,
    },

    /// Initialize configuration with a new .env file
    Init {
        /// GCP project ID (prompted for when omitted)
        #[arg(long = "project-id")]
        project_id: Option<String>,

        /// GCP region (prompted for when omitted)
        #[arg(long)]
        region: Option<String>,

        /// GCP zone (prompted for when omitted)
        #[arg(long)]
        zone: Option<String>,

        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Hcl,
    Json,
}
