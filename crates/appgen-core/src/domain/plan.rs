use crate::domain::model::{AppRole, Coordinate, Dependency, PluginRef, Repository};

/// Fully resolved content of one generated project.
///
/// Output of the resolver and the only input of a `ManifestRenderer`. It
/// contains no business logic: everything a renderer emits is spelled out
/// here, already merged and ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Catalog key; also the output directory name.
    pub entry: String,
    pub role: AppRole,
    pub function: String,
    pub binder: String,

    pub parent: Coordinate,
    /// group = shared group, artifact = entry name, version = shared version.
    pub coordinates: Coordinate,
    pub name: String,
    pub description: String,
    pub dependency_management: Vec<Dependency>,
    pub dependencies: Vec<Dependency>,
    pub plugins: Vec<PluginRef>,
    pub repositories: Vec<Repository>,
}

impl GenerationPlan {
    pub fn group_id(&self) -> &str {
        &self.coordinates.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.coordinates.artifact_id
    }

    pub fn version(&self) -> &str {
        self.coordinates.version.as_deref().unwrap_or_default()
    }
}
