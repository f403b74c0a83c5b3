//! Coordinate and metadata model: Coordinate, Dependency, PluginRef,
//! Repository, AppRole.
//!
//! # Design
//!
//! These are plain value types with no behaviour beyond validating their
//! required fields. Merging and defaulting live in `resolver.rs`; rendering
//! lives behind the `ManifestRenderer` port.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ── Coordinate ───────────────────────────────────────────────────────────────

/// A `(group, artifact, version)` triple identifying a package.
///
/// The version is optional because some references (a BOM imported at the
/// project version, managed dependencies) inherit it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Coordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Check group and artifact are present. `field` names the owner in the
    /// error, e.g. `"bom"` yields `bom.group_id`.
    pub fn validate(&self, field: &str) -> Result<(), DomainError> {
        if is_blank(&self.group_id) {
            return Err(DomainError::IncompleteMetadata {
                field: format!("{field}.group_id"),
            });
        }
        if is_blank(&self.artifact_id) {
            return Err(DomainError::IncompleteMetadata {
                field: format!("{field}.artifact_id"),
            });
        }
        Ok(())
    }

    /// Like [`Coordinate::validate`] but the version is mandatory too.
    pub fn require_version(&self, field: &str) -> Result<(), DomainError> {
        self.validate(field)?;
        match self.version.as_deref() {
            Some(v) if !is_blank(v) => Ok(()),
            _ => Err(DomainError::IncompleteMetadata {
                field: format!("{field}.version"),
            }),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        Ok(())
    }
}

// ── Dependency ───────────────────────────────────────────────────────────────

/// A dependency reference as it appears in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Maven `<type>`; `None` means the default (`jar`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            kind: None,
            scope: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The dependency-management entry importing a bill of materials.
    pub fn import_bom(bom: &Coordinate, version: impl Into<String>) -> Self {
        Self {
            group_id: bom.group_id.clone(),
            artifact_id: bom.artifact_id.clone(),
            version: Some(version.into()),
            kind: Some("pom".into()),
            scope: Some("import".into()),
        }
    }

    pub fn validate(&self, field: &str) -> Result<(), DomainError> {
        Coordinate::new(self.group_id.as_str(), self.artifact_id.as_str()).validate(field)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

// ── PluginRef ────────────────────────────────────────────────────────────────

/// A build plugin reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginRef {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PluginRef {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn validate(&self, field: &str) -> Result<(), DomainError> {
        Coordinate::new(self.group_id.as_str(), self.artifact_id.as_str()).validate(field)
    }
}

// ── Repository ───────────────────────────────────────────────────────────────

/// An artifact repository declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    /// Renders `<snapshots><enabled>..</enabled></snapshots>` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<bool>,
}

impl Repository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            url: url.into(),
            snapshots: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_snapshots(mut self, enabled: bool) -> Self {
        self.snapshots = Some(enabled);
        self
    }

    pub fn validate(&self, field: &str) -> Result<(), DomainError> {
        if is_blank(&self.id) {
            return Err(DomainError::IncompleteMetadata {
                field: format!("{field}.id"),
            });
        }
        if is_blank(&self.url) {
            return Err(DomainError::IncompleteMetadata {
                field: format!("{field}.url"),
            });
        }
        Ok(())
    }
}

// ── AppRole ──────────────────────────────────────────────────────────────────

/// Functional role of a generated stream application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Source,
    Processor,
    Sink,
}

impl AppRole {
    pub const ALL: [AppRole; 3] = [Self::Source, Self::Processor, Self::Sink];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Processor => "processor",
            Self::Sink => "sink",
        }
    }

    /// Capitalized form used in descriptions.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Processor => "Processor",
            Self::Sink => "Sink",
        }
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "source" => Ok(Self::Source),
            "processor" => Ok(Self::Processor),
            "sink" => Ok(Self::Sink),
            other => Err(DomainError::UnknownRole {
                entry: String::new(),
                role: other.to_string(),
            }),
        }
    }
}
