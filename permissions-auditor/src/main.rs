mod audit;
mod cli;
mod config;
mod credentials;
mod error;
mod policy;
#[cfg(test)]
mod test_server;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use colored::control::set_override;
use log::{LevelFilter, debug, info};

use gcp_iam::env_file::Environment;

use audit::{AuditOutcome, audit_project};
use cli::{Args, Command};
use config::{AuditConfig, load_environment};
use policy::ResourceManagerClient;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_level.filter(), args.no_color);

    ui::show_welcome_message(VERSION);

    let environment = load_environment(args.env_file.as_deref());

    info!("HH Permissions Tool started");

    match args.command {
        Command::AuditGcp { project_id, yes } => audit_gcp(&environment, project_id.as_deref(), yes),
        Command::Version => {
            println!("{}", ui::version_line(VERSION));
            Ok(())
        }
    }
}

fn audit_gcp(environment: &Environment, project_flag: Option<&str>, yes: bool) -> Result<()> {
    let config = match AuditConfig::resolve(environment, project_flag) {
        Ok(config) => config,
        Err(message) => {
            ui::print_error(&message);
            return Ok(());
        }
    };

    debug!(
        "Auditing project {} with credentials {}",
        config.project_id,
        config.credentials_path.display()
    );

    if !yes && !ui::confirm_audit(&config.project_id).context("Failed to read confirmation")? {
        println!("Audit cancelled.");
        return Ok(());
    }

    let spinner = ui::start_spinner("Analyzing project permissions...");
    let outcome = match ResourceManagerClient::from_credentials_file(&config.credentials_path) {
        Ok(client) => audit_project(&client, &config.project_id),
        Err(err) => AuditOutcome::from(err),
    };
    spinner.finish_and_clear();

    if let Some(diagnostic) = outcome.diagnostic() {
        ui::print_error(&diagnostic);
    }
    ui::display_permissions(outcome.records());

    Ok(())
}

fn init_logging(level: LevelFilter, no_color: bool) {
    if no_color {
        set_override(false);
    }

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    debug!("Log level set to {}", level);
}
