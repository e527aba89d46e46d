//! JSON output formatter for Terraform custom role resources.
//!
//! Renders the resource using Terraform's JSON configuration syntax, which
//! Terraform loads from `*.tf.json` files.

use std::collections::BTreeMap;

use serde::Serialize;

use super::formatter::{escape_template, CustomRoleResource, OutputFormatter, RESOURCE_TYPE};

/// Top-level Terraform JSON document.
#[derive(Serialize)]
struct TerraformDocument<'a> {
    resource: BTreeMap<&'static str, BTreeMap<&'a str, RoleAttributes>>,
}

/// Attribute body of the custom role resource, in declaration order.
#[derive(Serialize)]
struct RoleAttributes {
    project: String,
    role_id: String,
    title: String,
    description: String,
    permissions: Vec<String>,
}

/// Formatter that outputs Terraform JSON configuration.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, resource: &CustomRoleResource) -> String {
        let attributes = RoleAttributes {
            project: escape_template(resource.project),
            role_id: escape_template(resource.role_id),
            title: escape_template(&resource.title),
            description: escape_template(&resource.description),
            permissions: resource
                .permissions
                .iter()
                .map(|permission| escape_template(permission))
                .collect(),
        };

        let document = TerraformDocument {
            resource: BTreeMap::from([(
                RESOURCE_TYPE,
                BTreeMap::from([(resource.role_id, attributes)]),
            )]),
        };

        let mut json =
            serde_json::to_string_pretty(&document).expect("JSON serialization should not fail");
        json.push('\n');
        json
    }

    fn extension(&self) -> &'static str {
        "tf.json"
    }
}
