//! Custom role registry for a single command invocation.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::PermissionSet;

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("Custom role {0} not found")]
    NotFound(String),
}

/// Derives the custom role name for a service and access level.
pub fn custom_role_name(service: &str, level: &str) -> String {
    format!("custom_{}_{}", service, level)
}

/// Builds a human readable title from a role name.
///
/// Underscores become spaces and every word is capitalized with the rest of
/// the word lowercased, e.g. `custom_compute_viewer` -> `Custom Compute Viewer`.
pub fn role_title(role_name: &str) -> String {
    role_name
        .split('_')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Custom roles registered during the current run.
#[derive(Debug, Default)]
pub struct CustomRoles {
    roles: BTreeMap<String, PermissionSet>,
}

impl CustomRoles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the permission set of a custom role.
    pub fn register(&mut self, role_name: impl Into<String>, permissions: PermissionSet) {
        let role_name = role_name.into();
        log::debug!(
            "Registered custom role {} with {} permission(s)",
            role_name,
            permissions.len()
        );
        self.roles.insert(role_name, permissions);
    }

    pub fn get(&self, role_name: &str) -> Result<&PermissionSet, RoleError> {
        self.roles
            .get(role_name)
            .ok_or_else(|| RoleError::NotFound(role_name.to_string()))
    }
}
