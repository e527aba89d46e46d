//! HCL output formatter for Terraform custom role resources.
//!
//! This module provides the `HclFormatter` which renders a single
//! `google_project_iam_custom_role` resource block. Attributes are written
//! in a fixed order (project, role_id, title, description, permissions) and
//! permissions are listed in sorted order.

use super::formatter::{escape_template, CustomRoleResource, OutputFormatter, RESOURCE_TYPE};

/// Formatter that outputs a Terraform HCL resource block.
pub struct HclFormatter;

impl OutputFormatter for HclFormatter {
    fn format(&self, resource: &CustomRoleResource) -> String {
        format!(
            r#"resource "{resource_type}" "{label}" {{
  project = {project}
  role_id = {role_id}
  title = {title}
  description = {description}
  permissions = {permissions}
}}
"#,
            resource_type = RESOURCE_TYPE,
            label = quote_literal(resource.role_id),
            project = quote(resource.project),
            role_id = quote(resource.role_id),
            title = quote(&resource.title),
            description = quote(&resource.description),
            permissions = self.format_permission_list(resource),
        )
    }

    fn extension(&self) -> &'static str {
        "tf"
    }
}

impl HclFormatter {
    /// Formats the permissions as an HCL list, one entry per line.
    fn format_permission_list(&self, resource: &CustomRoleResource) -> String {
        if resource.permissions.is_empty() {
            return "[]".to_string();
        }

        // BTreeSet iteration is already sorted.
        let entries: Vec<String> = resource
            .permissions
            .iter()
            .map(|permission| format!("    {}", quote(permission)))
            .collect();

        format!("[\n{}\n  ]", entries.join(",\n"))
    }
}

/// Quotes a value as an HCL string, escaping template sequences.
fn quote(value: &str) -> String {
    quote_literal(&escape_template(value))
}

/// Quotes a value as an HCL string literal. Block labels take this form,
/// since they are never evaluated as templates.
fn quote_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}
