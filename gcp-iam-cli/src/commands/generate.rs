use std::path::Path;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output::formatter::create_formatter;
use crate::output::{render_custom_role, OutputWriter};
use crate::roles::{custom_role_name, CustomRoles};

#[derive(Debug)]
pub struct GenerateRequest<'a> {
    pub service: &'a str,
    pub level: &'a str,
    pub project_id: Option<&'a str>,
    pub output: Option<&'a Path>,
    pub format: OutputFormat,
}

/// Renders the custom role for a service and level without writing it.
pub fn render(config: &Config, request: &GenerateRequest) -> Result<String> {
    let permissions = config.catalog.lookup(request.service, request.level)?;
    let project = config.defaults.resolve_project(request.project_id)?;

    let role_name = custom_role_name(request.service, request.level);
    let mut roles = CustomRoles::new();
    roles.register(role_name.clone(), permissions);

    let formatter = create_formatter(request.format);

    if let Some(output) = request.output {
        let expected = formatter.extension();
        if !output.to_string_lossy().ends_with(&format!(".{}", expected)) {
            log::warn!(
                "Output file {} does not use the .{} extension Terraform expects",
                output.display(),
                expected
            );
        }
    }

    Ok(render_custom_role(&roles, &project, &role_name, &*formatter)?)
}

pub fn generate(config: &Config, request: &GenerateRequest) -> Result<()> {
    let rendered = render(config, request)?;
    OutputWriter::new(request.output).write(&rendered)?;
    Ok(())
}
