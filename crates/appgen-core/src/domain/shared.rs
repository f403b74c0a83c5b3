//! Organization-wide metadata shared by every generated project.
//!
//! Loaded once per run and passed by reference; never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    model::{AppRole, Coordinate, Dependency, PluginRef, Repository},
};

/// How starter and binder artifact identifiers are derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactNaming {
    pub starter_group_id: String,
    /// Starter artifact is `<starter_prefix>-<role>-<function>`.
    pub starter_prefix: String,
    pub binder_group_id: String,
    /// Binder artifact is `<binder_prefix>-<binder>`.
    pub binder_prefix: String,
}

impl ArtifactNaming {
    pub fn starter(&self, role: AppRole, function: &str) -> Dependency {
        Dependency::new(
            self.starter_group_id.as_str(),
            format!("{}-{}-{}", self.starter_prefix, role, function),
        )
    }

    pub fn binder(&self, binder: &str) -> Dependency {
        Dependency::new(
            self.binder_group_id.as_str(),
            format!("{}-{}", self.binder_prefix, binder),
        )
    }

    fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("naming.starter_group_id", &self.starter_group_id),
            ("naming.starter_prefix", &self.starter_prefix),
            ("naming.binder_group_id", &self.binder_group_id),
            ("naming.binder_prefix", &self.binder_prefix),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(DomainError::IncompleteMetadata {
                    field: field.into(),
                });
            }
        }
        Ok(())
    }
}

/// Process-wide generation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedMetadata {
    /// Fixed organization group of every generated project.
    pub group_id: String,
    /// Version applied to every generated project.
    pub version: String,
    /// Label used as the first word of descriptions.
    pub framework: String,
    pub parent: Coordinate,
    /// Imported in dependency management; inherits `version` when unversioned.
    pub bom: Coordinate,
    pub naming: ArtifactNaming,
    /// Packaging-support dependency declared by every project.
    pub support: Dependency,
    pub plugins: Vec<PluginRef>,
    pub repositories: Vec<Repository>,
}

impl SharedMetadata {
    /// Check every required field. Reports the first missing one.
    pub fn validate(&self) -> Result<(), DomainError> {
        let scalars = [
            ("group_id", &self.group_id),
            ("version", &self.version),
            ("framework", &self.framework),
        ];
        for (field, value) in scalars {
            if value.trim().is_empty() {
                return Err(DomainError::IncompleteMetadata {
                    field: field.into(),
                });
            }
        }

        self.parent.require_version("parent")?;
        self.bom.validate("bom")?;
        self.naming.validate()?;
        self.support.validate("support")?;

        if self.plugins.is_empty() {
            return Err(DomainError::IncompleteMetadata {
                field: "plugins".into(),
            });
        }
        for (i, plugin) in self.plugins.iter().enumerate() {
            plugin.validate(&format!("plugins[{i}]"))?;
        }

        if self.repositories.is_empty() {
            return Err(DomainError::IncompleteMetadata {
                field: "repositories".into(),
            });
        }
        for (i, repo) in self.repositories.iter().enumerate() {
            repo.validate(&format!("repositories[{i}]"))?;
        }

        Ok(())
    }

    /// Version at which the BOM is imported.
    pub fn bom_version(&self) -> &str {
        self.bom
            .version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(&self.version)
    }
}
