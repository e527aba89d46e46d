//! Service catalog: the static table of GCP services, their access levels
//! and the predefined IAM role each level maps to.
//!
//! The catalog is loaded once at startup, either from the built-in YAML
//! document compiled into the binary or from a user supplied file, and is
//! then passed by reference to whatever needs to look roles up.

pub mod yaml_parser;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use thiserror::Error;

use yaml_parser::{parse_catalog, ServiceTable};

/// Built-in catalog document.
const BUILTIN_CATALOG: &str = include_str!("services.yml");

/// A deterministic set of role identifiers granted by a custom role.
pub type PermissionSet = BTreeSet<String>;

/// Errors that can occur while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Service {0} not found in common services")]
    UnknownService(String),

    #[error("Level {level} not found for service {service}")]
    UnknownLevel { service: String, level: String },

    #[error("Catalog YAML parse error: {0}")]
    Yaml(String),

    #[error("Empty catalog document")]
    Empty,

    #[error("Invalid catalog structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid role '{role}' for {service}.{level}: roles must start with 'roles/'")]
    InvalidRole {
        service: String,
        level: String,
        role: String,
    },

    #[error("Cannot read catalog file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable mapping of service name to access level to role identifier.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: ServiceTable,
}

impl ServiceCatalog {
    /// Loads the catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG)
    }

    /// Loads a catalog from a YAML file on disk.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;

        log::debug!("Loaded catalog from {}", path.display());

        Self::parse(&content)
    }

    /// Parses catalog YAML content.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let services = parse_catalog(content)?;
        Ok(Self { services })
    }

    /// Returns all service names, sorted alphabetically.
    pub fn services(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// Returns the access levels of a service, sorted alphabetically.
    pub fn levels(&self, service: &str) -> Result<Vec<&str>, CatalogError> {
        Ok(self.service(service)?.keys().map(String::as_str).collect())
    }

    /// Returns the fully-qualified role id for a service and level.
    pub fn role(&self, service: &str, level: &str) -> Result<&str, CatalogError> {
        self.service(service)?
            .get(level)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::UnknownLevel {
                service: service.to_string(),
                level: level.to_string(),
            })
    }

    /// Looks up the permission set granted by `level` on `service`.
    ///
    /// The result always holds exactly one role. The error names whichever
    /// key was not found, checking the service before the level.
    pub fn lookup(&self, service: &str, level: &str) -> Result<PermissionSet, CatalogError> {
        let role = self.role(service, level)?;
        Ok(PermissionSet::from([role.to_string()]))
    }

    fn service(&self, service: &str) -> Result<&BTreeMap<String, String>, CatalogError> {
        self.services
            .get(service)
            .ok_or_else(|| CatalogError::UnknownService(service.to_string()))
    }
}
