use colored::Colorize;
use dialoguer::{Confirm, Input};

use crate::config::{validate_project_id, Config};
use crate::env_file::{InitValues, REGION_KEY, ZONE_KEY};
use crate::error::{GcpIamError, Result};

#[derive(Debug, Default)]
pub struct InitOptions {
    pub project_id: Option<String>,
    pub region: Option<String>,
    pub zone: Option<String>,
    pub force: bool,
}

/// Writes a new environment file, prompting for anything not given.
pub fn init(config: &Config, options: &InitOptions) -> Result<()> {
    let path = &config.env_file;

    if path.exists() && !options.force {
        let overwrite = Confirm::new()
            .with_prompt(format!(
                "A {} file already exists. Overwrite it?",
                path.display()
            ))
            .default(false)
            .interact()?;

        if !overwrite {
            log::info!("Keeping existing {}", path.display());
            return Ok(());
        }
    }

    let values = collect_values(config, options)?;
    validate_project_id(&values.project_id)?;
    reject_control_characters(REGION_KEY, &values.region)?;
    reject_control_characters(ZONE_KEY, &values.zone)?;

    values.write(path)?;

    println!(
        "{}",
        format!("Configuration file {} created successfully!", path.display()).green()
    );
    Ok(())
}

/// Each value is written on its own line, so it must stay on one line.
fn reject_control_characters(key: &str, value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(GcpIamError::InvalidInput(format!(
            "{} must not contain control characters",
            key
        )));
    }
    Ok(())
}

fn collect_values(config: &Config, options: &InitOptions) -> Result<InitValues> {
    let project_id = match &options.project_id {
        Some(id) => id.clone(),
        None => Input::<String>::new()
            .with_prompt("GCP Project ID")
            .interact_text()?,
    };

    let region = match &options.region {
        Some(region) => region.clone(),
        None => Input::<String>::new()
            .with_prompt("GCP Region")
            .default(config.defaults.region.clone())
            .interact_text()?,
    };

    let zone = match &options.zone {
        Some(zone) => zone.clone(),
        None => Input::<String>::new()
            .with_prompt("GCP Zone")
            .default(config.defaults.zone.clone())
            .interact_text()?,
    };

    Ok(InitValues {
        project_id,
        region,
        zone,
    })
}
