//! Output formatter trait and factory.
//!
//! This module defines the `OutputFormatter` trait that all Terraform
//! formatters implement, the resource model they render, and a factory
//! function to create the appropriate formatter based on the output format
//! configuration.

use crate::catalog::PermissionSet;
use crate::cli::OutputFormat;

/// Terraform resource type declared for every generated custom role.
pub const RESOURCE_TYPE: &str = "google_project_iam_custom_role";

/// A project-scoped custom role, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRoleResource<'a> {
    pub project: &'a str,
    pub role_id: &'a str,
    pub title: String,
    pub description: String,
    pub permissions: &'a PermissionSet,
}

/// Trait for rendering a custom role resource as Terraform configuration.
pub trait OutputFormatter {
    /// Renders the resource.
    ///
    /// Implementations must be deterministic: the same resource always
    /// yields byte-identical output.
    fn format(&self, resource: &CustomRoleResource) -> String;

    /// Returns the file extension for this format.
    fn extension(&self) -> &'static str;
}

/// Creates the appropriate formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    use super::hcl::HclFormatter;
    use super::json::JsonFormatter;

    match format {
        OutputFormat::Hcl => Box::new(HclFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Escapes Terraform template sequences so values are taken literally.
pub(crate) fn escape_template(value: &str) -> String {
    value.replace("${", "$${").replace("%{", "%%{")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_formatter_picks_extension() {
        assert_eq!(create_formatter(OutputFormat::Hcl).extension(), "tf");
        assert_eq!(create_formatter(OutputFormat::Json).extension(), "tf.json");
    }

    #[test]
    fn escape_template_doubles_markers() {
        assert_eq!(escape_template("a ${b} %{c}"), "a $${b} %%{c}");
        assert_eq!(escape_template("plain"), "plain");
    }
}
