//! Catalog entries.
//!
//! A catalog is an ordered list rather than a map: entries may come from
//! several files, so the same name can legitimately appear twice and the
//! resolver decides what to do about it (see `DuplicatePolicy`).

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    model::{AppRole, PluginRef},
};

/// Per-entry data as read from the catalog. Immutable once read.
///
/// `role` is kept as the raw catalog string so that an unknown role fails
/// only this entry, at resolve time, instead of the whole catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDescriptor {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub binder: Option<String>,
    /// Overrides the templated description.
    #[serde(default)]
    pub description: Option<String>,
    /// Entry-specific build plugins, appended after the shared ones.
    #[serde(default)]
    pub plugins: Vec<PluginRef>,
}

impl EntryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn binder(mut self, binder: impl Into<String>) -> Self {
        self.binder = Some(binder.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn plugin(mut self, plugin: PluginRef) -> Self {
        self.plugins.push(plugin);
        self
    }
}

/// One named entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub descriptor: EntryDescriptor,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, descriptor: EntryDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }

    /// Check the name is usable as a directory name.
    pub fn validate_name(&self) -> Result<(), DomainError> {
        let name = &self.name;
        let reason = if name.is_empty() {
            Some("name cannot be empty")
        } else if name.starts_with('.') {
            Some("name cannot start with '.'")
        } else if name.contains('/') || name.contains('\\') {
            Some("name cannot contain path separators")
        } else if name.chars().any(char::is_whitespace) {
            Some("name cannot contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidEntryName {
                name: name.clone(),
                reason: reason.into(),
            }),
            None => Ok(()),
        }
    }
}

/// The parts of an entry name following `<function>-<role>-<binder>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub function: String,
    pub role: AppRole,
    pub binder: String,
}

impl NameParts {
    /// Split a name on its last role token.
    ///
    /// Returns `None` when no token is a role or when the function or binder
    /// part would be empty.
    pub fn infer(name: &str) -> Option<Self> {
        let tokens: Vec<&str> = name.split('-').collect();
        let (idx, role) = tokens
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, t)| AppRole::ALL.into_iter().find(|r| r.as_str() == *t).map(|r| (i, r)))?;

        let function = tokens[..idx].join("-");
        let binder = tokens[idx + 1..].join("-");
        if function.is_empty() || binder.is_empty() {
            return None;
        }

        Some(Self {
            function,
            role,
            binder,
        })
    }
}

/// Ordered collection of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicates are kept; the resolver reports them.
    pub fn push(&mut self, name: impl Into<String>, descriptor: EntryDescriptor) {
        self.entries.push(CatalogEntry::new(name, descriptor));
    }

    pub fn with_entry(mut self, name: impl Into<String>, descriptor: EntryDescriptor) -> Self {
        self.push(name, descriptor);
        self
    }

    pub fn extend(&mut self, other: Catalog) {
        self.entries.extend(other.entries);
    }

    /// Keep only entries whose name is in `names`.
    pub fn retain_names(&mut self, names: &[String]) {
        self.entries.retain(|e| names.iter().any(|n| n == &e.name));
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
