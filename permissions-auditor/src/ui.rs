use std::time::Duration;

use colored::Colorize;
use dialoguer::Confirm;
use gcp_iam::output::table::Table;
use indicatif::{ProgressBar, ProgressStyle};

use crate::audit::PolicyRecord;

pub const APP_NAME: &str = "HH Permissions Tool";
const TAGLINE: &str = "Your Cloud Permissions Audit Assistant";

pub fn welcome_banner(version: &str) -> String {
    let rule = "=".repeat(50);
    format!(
        "{}\n{}\n{}\n{}\n",
        rule.blue(),
        format!("{} v{}", APP_NAME, version).bold(),
        TAGLINE.italic(),
        rule.blue()
    )
}

pub fn show_welcome_message(version: &str) {
    println!("{}", welcome_banner(version));
}

pub fn version_line(version: &str) -> String {
    format!("{} v{}", APP_NAME, version)
}

pub fn print_error(message: &str) {
    println!("{} {}", "Error:".red().bold(), message.red());
}

pub fn confirm_audit(project_id: &str) -> dialoguer::Result<bool> {
    Confirm::new()
        .with_prompt(format!("Audit IAM permissions for project {}?", project_id))
        .default(true)
        .interact()
}

/// Spinner shown while the policy is fetched.
pub fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn permissions_table(records: &[PolicyRecord]) -> Table {
    let mut table = Table::new("Google Cloud IAM Permissions")
        .add_column("Role", colored::Color::Cyan)
        .add_column("Members", colored::Color::Green)
        .add_column("Resource", colored::Color::Yellow);

    for record in records {
        table.add_row([
            record.role.clone(),
            record.members.join("\n"),
            record.resource.clone(),
        ]);
    }

    table
}

pub fn display_permissions(records: &[PolicyRecord]) {
    if records.is_empty() {
        println!("{}", "No permissions found for this project.".yellow());
        return;
    }

    println!("{}", permissions_table(records).render());
}
