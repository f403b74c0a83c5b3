//! Catalog resolver: entry descriptor + shared metadata → generation plan.
//!
//! Pure logic, no I/O. Every plan it returns satisfies
//! [`GenerationPlan::validate`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    common::title_words,
    entry::{Catalog, CatalogEntry, NameParts},
    error::DomainError,
    model::{AppRole, Coordinate, Dependency},
    plan::GenerationPlan,
    shared::SharedMetadata,
};

/// What to do when a catalog declares the same entry name twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first declaration; every later one fails on its own.
    #[default]
    Skip,
    /// Fail the whole run before anything is written.
    Abort,
}

impl DuplicatePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Abort => "abort",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!("unknown duplicate policy: {other}")),
        }
    }
}

/// Resolve a single entry against the shared metadata.
pub fn resolve(entry: &CatalogEntry, shared: &SharedMetadata) -> Result<GenerationPlan, DomainError> {
    shared.validate()?;
    resolve_entry(entry, shared)
}

/// Resolution without re-validating shared metadata.
fn resolve_entry(entry: &CatalogEntry, shared: &SharedMetadata) -> Result<GenerationPlan, DomainError> {
    entry.validate_name()?;

    let descriptor = &entry.descriptor;
    let inferred = NameParts::infer(&entry.name);

    let role = match descriptor.role.as_deref() {
        Some(raw) => AppRole::from_str(raw).map_err(|_| DomainError::UnknownRole {
            entry: entry.name.clone(),
            role: raw.to_string(),
        })?,
        None => inferred
            .as_ref()
            .map(|p| p.role)
            .ok_or_else(|| DomainError::UnresolvableEntry {
                entry: entry.name.clone(),
                field: "role",
            })?,
    };

    let function = pick(&entry.name, "function", descriptor.function.as_deref(), || {
        inferred.as_ref().map(|p| p.function.clone())
    })?;
    let binder = pick(&entry.name, "binder", descriptor.binder.as_deref(), || {
        inferred.as_ref().map(|p| p.binder.clone())
    })?;

    let description = match descriptor.description.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => format!(
            "{} {} {} {} Binder Application",
            shared.framework,
            title_words(&function),
            role.title(),
            title_words(&binder),
        ),
    };

    let dependencies = vec![
        shared.naming.starter(role, &function),
        shared.naming.binder(&binder),
        shared.support.clone(),
    ];

    let mut plugins = shared.plugins.clone();
    plugins.extend(descriptor.plugins.iter().cloned());

    debug!(entry = %entry.name, %role, %function, %binder, "Entry resolved");

    Ok(GenerationPlan {
        entry: entry.name.clone(),
        role,
        function,
        binder,
        parent: shared.parent.clone(),
        coordinates: Coordinate::new(shared.group_id.as_str(), entry.name.as_str())
            .with_version(shared.version.as_str()),
        name: entry.name.clone(),
        description,
        dependency_management: vec![Dependency::import_bom(&shared.bom, shared.bom_version())],
        dependencies,
        plugins,
        repositories: shared.repositories.clone(),
    })
}

/// Explicit value wins over the inferred one; either must be well formed.
fn pick(
    entry: &str,
    field: &'static str,
    explicit: Option<&str>,
    inferred: impl FnOnce() -> Option<String>,
) -> Result<String, DomainError> {
    let value = match explicit {
        Some(v) => v.trim().to_string(),
        None => inferred().ok_or_else(|| DomainError::UnresolvableEntry {
            entry: entry.to_string(),
            field,
        })?,
    };

    let invalid = |reason: &str| DomainError::InvalidEntry {
        entry: entry.to_string(),
        field,
        value: value.clone(),
        reason: reason.into(),
    };

    if value.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.starts_with('-') || value.ends_with('-') {
        return Err(invalid("must not start or end with '-'"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid("only lowercase letters, digits and '-' are allowed"));
    }
    Ok(value)
}

/// Resolves a whole catalog, applying a [`DuplicatePolicy`].
pub struct CatalogResolver<'a> {
    shared: &'a SharedMetadata,
    policy: DuplicatePolicy,
}

impl<'a> CatalogResolver<'a> {
    pub fn new(shared: &'a SharedMetadata, policy: DuplicatePolicy) -> Self {
        Self { shared, policy }
    }

    /// Resolve every entry in catalog order.
    ///
    /// The outer `Err` is fatal (incomplete shared metadata, or a duplicate
    /// under [`DuplicatePolicy::Abort`]); inner results are per entry.
    pub fn resolve_all(
        &self,
        catalog: &Catalog,
    ) -> Result<Vec<(String, Result<GenerationPlan, DomainError>)>, DomainError> {
        self.shared.validate()?;

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(catalog.len());

        for entry in catalog.entries() {
            if !seen.insert(entry.name.as_str()) {
                let err = DomainError::DuplicateEntry {
                    entry: entry.name.clone(),
                };
                match self.policy {
                    DuplicatePolicy::Abort => return Err(err),
                    DuplicatePolicy::Skip => {
                        resolved.push((entry.name.clone(), Err(err)));
                        continue;
                    }
                }
            }
            resolved.push((entry.name.clone(), resolve_entry(entry, self.shared)));
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entry::EntryDescriptor, model::PluginRef, shared::fixtures::shared,
    };

    fn entry(name: &str, descriptor: EntryDescriptor) -> CatalogEntry {
        CatalogEntry::new(name, descriptor)
    }

    #[test]
    fn resolves_reference_entry() {
        let d = EntryDescriptor::new().role("source").function("foo").binder("kafka");
        let plan = resolve(&entry("foo-source-kafka", d), &shared()).unwrap();

        assert_eq!(plan.artifact_id(), "foo-source-kafka");
        assert_eq!(plan.group_id(), "org.example.stream.app");
        assert_eq!(plan.name, "foo-source-kafka");
        assert_eq!(plan.version(), "1.0.0.BUILD-SNAPSHOT");
        assert_eq!(plan.description, "Example Foo Source Kafka Binder Application");
    }

    #[test]
    fn infers_role_function_binder_from_name() {
        let plan = resolve(&entry("foo-source-kafka", EntryDescriptor::new()), &shared()).unwrap();
        assert_eq!(plan.role, AppRole::Source);
        assert_eq!(plan.function, "foo");
        assert_eq!(plan.binder, "kafka");
    }

    #[test]
    fn dependencies_are_exactly_three_in_order() {
        let plan = resolve(&entry("foo-source-kafka", EntryDescriptor::new()), &shared()).unwrap();
        let ids: Vec<_> = plan.dependencies.iter().map(|d| d.artifact_id.as_str()).collect();

        assert_eq!(
            ids,
            [
                "example-starter-stream-source-foo",
                "example-stream-binder-kafka",
                "app-starters-packaging-support",
            ]
        );
        assert!(plan.dependencies.iter().all(|d| d.version.is_none()));
    }

    #[test]
    fn dependency_management_is_the_bom_at_project_version() {
        let plan = resolve(&entry("foo-source-kafka", EntryDescriptor::new()), &shared()).unwrap();

        assert_eq!(plan.dependency_management.len(), 1);
        let bom = &plan.dependency_management[0];
        assert_eq!(bom.artifact_id, "example-stream-app-dependencies");
        assert_eq!(bom.version.as_deref(), Some("1.0.0.BUILD-SNAPSHOT"));
        assert_eq!(bom.scope.as_deref(), Some("import"));
    }

    #[test]
    fn explicit_fields_override_inference() {
        let d = EntryDescriptor::new().binder("rabbit");
        let plan = resolve(&entry("foo-source-kafka", d), &shared()).unwrap();
        assert_eq!(plan.binder, "rabbit");
        assert_eq!(plan.function, "foo");
    }

    #[test]
    fn padded_explicit_fields_are_trimmed() {
        let d = EntryDescriptor::new()
            .role(" sink ")
            .function(" count")
            .binder("rabbit ");
        let plan = resolve(&entry("foo-source-kafka", d), &shared()).unwrap();
        assert_eq!(plan.role, AppRole::Sink);
        assert_eq!(plan.function, "count");
        assert_eq!(plan.binder, "rabbit");
    }

    #[test]
    fn description_override_is_used_verbatim() {
        let d = EntryDescriptor::new().description("Counts <things> & more");
        let plan = resolve(&entry("count-sink-kafka", d), &shared()).unwrap();
        assert_eq!(plan.description, "Counts <things> & more");
    }

    #[test]
    fn entry_plugins_are_appended_after_shared() {
        let d = EntryDescriptor::new().plugin(PluginRef::new("org.example", "extra-plugin"));
        let plan = resolve(&entry("foo-sink-kafka", d), &shared()).unwrap();
        let ids: Vec<_> = plan.plugins.iter().map(|p| p.artifact_id.as_str()).collect();
        assert_eq!(ids, ["spring-boot-maven-plugin", "docker-maven-plugin", "extra-plugin"]);
    }

    #[test]
    fn repositories_are_shared_verbatim() {
        let s = shared();
        let plan = resolve(&entry("foo-sink-kafka", EntryDescriptor::new()), &s).unwrap();
        assert_eq!(plan.repositories, s.repositories);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let d = EntryDescriptor::new().role("task");
        let err = resolve(&entry("foo-source-kafka", d), &shared()).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownRole {
                entry: "foo-source-kafka".into(),
                role: "task".into()
            }
        );
    }

    #[test]
    fn missing_role_without_inference_is_rejected() {
        let err = resolve(&entry("standalone", EntryDescriptor::new()), &shared()).unwrap_err();
        assert!(matches!(err, DomainError::UnresolvableEntry { field: "role", .. }));
    }

    #[test]
    fn malformed_binder_is_rejected() {
        let d = EntryDescriptor::new().binder("Kafka!");
        let err = resolve(&entry("foo-source-kafka", d), &shared()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidEntry { field: "binder", .. }));
    }

    #[test]
    fn incomplete_shared_metadata_is_rejected() {
        let mut s = shared();
        s.group_id.clear();
        let err = resolve(&entry("foo-source-kafka", EntryDescriptor::new()), &s).unwrap_err();
        assert!(matches!(err, DomainError::IncompleteMetadata { .. }));
    }

    #[test]
    fn duplicates_skip_later_entry() {
        let s = shared();
        let catalog = Catalog::new()
            .with_entry("foo-source-kafka", EntryDescriptor::new())
            .with_entry("bar-sink-kafka", EntryDescriptor::new())
            .with_entry("foo-source-kafka", EntryDescriptor::new());

        let resolved = CatalogResolver::new(&s, DuplicatePolicy::Skip)
            .resolve_all(&catalog)
            .unwrap();

        assert_eq!(resolved.len(), 3);
        assert!(resolved[0].1.is_ok());
        assert!(resolved[1].1.is_ok());
        assert!(matches!(resolved[2].1, Err(DomainError::DuplicateEntry { .. })));
    }

    #[test]
    fn duplicates_are_case_sensitive() {
        let s = shared();
        let catalog = Catalog::new()
            .with_entry("foo-source-kafka", EntryDescriptor::new())
            .with_entry("Foo-source-kafka", EntryDescriptor::new().function("foo"));

        let resolved = CatalogResolver::new(&s, DuplicatePolicy::Abort)
            .resolve_all(&catalog)
            .unwrap();
        assert!(resolved.iter().all(|(_, r)| r.is_ok()));
    }

    #[test]
    fn duplicates_abort_whole_catalog() {
        let s = shared();
        let catalog = Catalog::new()
            .with_entry("foo-source-kafka", EntryDescriptor::new())
            .with_entry("foo-source-kafka", EntryDescriptor::new());

        let err = CatalogResolver::new(&s, DuplicatePolicy::Abort)
            .resolve_all(&catalog)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateEntry {
                entry: "foo-source-kafka".into()
            }
        );
    }

    #[test]
    fn duplicate_policy_parses() {
        assert_eq!("skip".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Skip);
        assert_eq!("ABORT".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Abort);
        assert!("merge".parse::<DuplicatePolicy>().is_err());
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Skip);
    }
}
