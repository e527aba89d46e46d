//! YAML parser for service catalog files.
//!
//! A catalog document has a single `services` mapping. Each service maps
//! access level names to fully-qualified role identifiers:
//!
//! ```yaml
//! services:
//!   compute:
//!     viewer: roles/compute.viewer
//!     admin: roles/compute.admin
//! ```

use std::collections::BTreeMap;

use saphyr::{LoadableYamlNode, Yaml};

use super::CatalogError;

/// Prefix every role identifier in a catalog must carry.
const ROLE_PREFIX: &str = "roles/";

/// Parsed catalog content: service -> (level -> role id).
pub type ServiceTable = BTreeMap<String, BTreeMap<String, String>>;

/// Parses YAML catalog content into a service table.
///
/// Both the service and level keys end up in `BTreeMap`s, so iteration order
/// is alphabetical and duplicate keys collapse to the last definition.
pub fn parse_catalog(content: &str) -> Result<ServiceTable, CatalogError> {
    let docs = Yaml::load_from_str(content).map_err(|e| CatalogError::Yaml(e.to_string()))?;

    let doc = docs.first().ok_or(CatalogError::Empty)?;

    let root = doc.as_mapping().ok_or_else(|| {
        CatalogError::InvalidStructure("Root document must be a mapping".to_string())
    })?;

    let services = root
        .iter()
        .find(|(key, _)| key.as_str() == Some("services"))
        .map(|(_, value)| value)
        .ok_or_else(|| CatalogError::InvalidStructure("Missing 'services' mapping".to_string()))?;

    let services = services.as_mapping().ok_or_else(|| {
        CatalogError::InvalidStructure("'services' must be a mapping".to_string())
    })?;

    let mut table = ServiceTable::new();

    for (key, value) in services {
        let service = key.as_str().ok_or_else(|| {
            CatalogError::InvalidStructure("Service names must be strings".to_string())
        })?;

        let levels = parse_levels(service, value)?;
        table.insert(service.to_string(), levels);
    }

    Ok(table)
}

/// Parses the level -> role mapping of a single service.
fn parse_levels(service: &str, yaml: &Yaml) -> Result<BTreeMap<String, String>, CatalogError> {
    let mapping = yaml.as_mapping().ok_or_else(|| {
        CatalogError::InvalidStructure(format!("Service '{}' must map levels to roles", service))
    })?;

    let mut levels = BTreeMap::new();

    for (key, value) in mapping {
        let level = key.as_str().ok_or_else(|| {
            CatalogError::InvalidStructure(format!(
                "Level names of service '{}' must be strings",
                service
            ))
        })?;

        let role = value.as_str().ok_or_else(|| {
            CatalogError::InvalidStructure(format!(
                "Role for '{}.{}' must be a string",
                service, level
            ))
        })?;

        if !role.starts_with(ROLE_PREFIX) {
            return Err(CatalogError::InvalidRole {
                service: service.to_string(),
                level: level.to_string(),
                role: role.to_string(),
            });
        }

        levels.insert(level.to_string(), role.to_string());
    }

    if levels.is_empty() {
        return Err(CatalogError::InvalidStructure(format!(
            "Service '{}' defines no levels",
            service
        )));
    }

    Ok(levels)
}
