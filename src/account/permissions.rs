//! Declared permissions and the per-actor capability map.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::profile::UserProfile;

const DEFAULT_PERMISSIONS: &str = include_str!("../../config/permissions.json");

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PermissionDefinition {
    pub name: String,
    #[allow(dead_code)]
    pub display_name: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub description: Option<String>,
}

/// Every permission the application knows about, in declaration order.
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    definitions: Vec<PermissionDefinition>,
}

impl PermissionRegistry {
    pub fn from_json(raw: &str) -> Result<Self> {
        let definitions: Vec<PermissionDefinition> =
            serde_json::from_str(raw).context("Invalid permission declarations")?;
        Ok(Self { definitions })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read permissions file {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Loads `path` when given, the embedded declarations otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let registry = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_json(DEFAULT_PERMISSIONS)?,
        };
        tracing::debug!(count = registry.definitions.len(), "Permissions loaded");
        Ok(registry)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|definition| definition.name.as_str())
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|known| known == name)
    }

    /// Permission name → whether `actor` holds it. Empty without an actor.
    pub fn capabilities_for(&self, actor: Option<&UserProfile>) -> BTreeMap<String, bool> {
        let Some(actor) = actor else {
            return BTreeMap::new();
        };

        self.names()
            .map(|name| (name.to_string(), actor.can(name)))
            .collect()
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::from_json(DEFAULT_PERMISSIONS).unwrap_or(Self {
            definitions: Vec::new(),
        })
    }
}
