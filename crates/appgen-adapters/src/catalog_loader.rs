//! TOML catalog loader.
//!
//! Reads a catalog file, or a directory of catalog files, into the domain
//! [`Catalog`] plus the [`SharedMetadata`] every entry is resolved against.
//!
//! # Directory layout accepted
//!
//! ```text
//! catalog/
//! ├── shared.toml       ← the one file carrying [shared]
//! ├── sources.toml      ← [[apps]] only
//! └── sinks/
//!     └── sinks.toml    ← nested directories are walked too
//! ```
//!
//! Files are read in sorted path order and their `[[apps]]` arrays are
//! concatenated, so the same name may appear twice across files. That is
//! left to the resolver's duplicate policy.
//!
//! # Catalog format
//!
//! ```toml
//! [shared]
//! group_id  = "org.example.stream.app"
//! version   = "1.0.0.BUILD-SNAPSHOT"
//! framework = "Example"
//!
//! [shared.parent]
//! group_id    = "org.springframework.boot"
//! artifact_id = "spring-boot-starter-parent"
//! version     = "1.3.5.RELEASE"
//!
//! [[apps]]
//! name = "time-source-kafka"   # role, function and binder inferred
//!
//! [[apps]]
//! name   = "log-sink-rabbit"
//! role   = "sink"
//! binder = "rabbit"
//! ```
//!
//! Missing `[shared]` fields load as blank and are reported later by
//! [`SharedMetadata::validate`], so every gap surfaces as a configuration
//! error naming the field rather than a parse error.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use appgen_core::domain::{
    ArtifactNaming, Catalog, CatalogEntry, Coordinate, Dependency, EntryDescriptor, PluginRef,
    Repository, SharedMetadata,
};

/// Environment variable naming the catalog when none is given explicitly.
pub const CATALOG_ENV: &str = "APPGEN_CATALOG";

/// File name looked up in the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "appgen.toml";

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures while locating or reading catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("no catalog given and none found (tried: {})", tried.join(", "))]
    NotDiscovered { tried: Vec<String> },

    #[error("failed to read '{}': {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("no [shared] section found under '{}'", path.display())]
    MissingShared { path: PathBuf },

    #[error("[shared] declared twice: '{}' and '{}'", first.display(), second.display())]
    DuplicateShared { first: PathBuf, second: PathBuf },
}

impl CatalogError {
    /// Path the error is about, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::MissingShared { path } => Some(path),
            Self::DuplicateShared { second, .. } => Some(second),
            Self::NotDiscovered { .. } => None,
        }
    }

    /// `true` when the catalog could not be located at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotDiscovered { .. })
    }
}

// ── File format ───────────────────────────────────────────────────────────────

/// One catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    shared: Option<SharedSection>,
    #[serde(default)]
    apps: Vec<AppSection>,
}

/// `[shared]` section. Every field is optional at parse time.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SharedSection {
    group_id: String,
    version: String,
    framework: String,
    parent: Option<Coordinate>,
    bom: Option<Coordinate>,
    naming: ArtifactNaming,
    support: Option<Dependency>,
    plugins: Vec<PluginRef>,
    repositories: Vec<Repository>,
}

impl From<SharedSection> for SharedMetadata {
    fn from(section: SharedSection) -> Self {
        let blank = || Coordinate::new("", "");
        SharedMetadata {
            group_id: section.group_id,
            version: section.version,
            framework: section.framework,
            parent: section.parent.unwrap_or_else(blank),
            bom: section.bom.unwrap_or_else(blank),
            naming: section.naming,
            support: section.support.unwrap_or_else(|| Dependency::new("", "")),
            plugins: section.plugins,
            repositories: section.repositories,
        }
    }
}

/// One `[[apps]]` element.
#[derive(Debug, Deserialize)]
struct AppSection {
    name: String,
    role: Option<String>,
    function: Option<String>,
    binder: Option<String>,
    description: Option<String>,
    #[serde(default)]
    plugins: Vec<PluginRef>,
}

impl From<AppSection> for CatalogEntry {
    fn from(app: AppSection) -> Self {
        CatalogEntry::new(
            app.name,
            EntryDescriptor {
                role: app.role,
                function: app.function,
                binder: app.binder,
                description: app.description,
                plugins: app.plugins,
            },
        )
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Result of loading a catalog.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub shared: SharedMetadata,
    pub catalog: Catalog,
    /// Files read, in read order.
    pub sources: Vec<PathBuf>,
}

/// Loads a catalog from a TOML file or a directory of TOML files.
///
/// # Example
///
/// ```no_run
/// use appgen_adapters::catalog_loader::CatalogLoader;
///
/// let loaded = CatalogLoader::new("./appgen.toml").load()?;
/// println!("{} entries", loaded.catalog.len());
/// # Ok::<(), appgen_adapters::catalog_loader::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pick the catalog location.
    ///
    /// Resolution order, first hit wins:
    /// 1. `explicit` (flag or configuration), used even if it does not exist
    /// 2. `$APPGEN_CATALOG`
    /// 3. `./appgen.toml`
    /// 4. `./catalog/`
    pub fn discover(explicit: Option<PathBuf>) -> Result<Self, CatalogError> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }

        let candidates = candidate_paths();
        for candidate in &candidates {
            if candidate.exists() {
                debug!(path = %candidate.display(), "Catalog discovered");
                return Ok(Self::new(candidate.clone()));
            }
        }

        Err(CatalogError::NotDiscovered {
            tried: candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        })
    }

    /// Read and merge every catalog file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::NotFound {
                path: self.path.clone(),
            });
        }

        let files = if self.path.is_dir() {
            self.collect_files()?
        } else {
            vec![self.path.clone()]
        };

        let mut shared: Option<(PathBuf, SharedSection)> = None;
        let mut catalog = Catalog::new();

        for file in &files {
            let raw = fs::read_to_string(file).map_err(|e| CatalogError::Read {
                path: file.clone(),
                reason: e.to_string(),
            })?;
            let parsed = parse_file(&raw, file)?;

            if let Some(section) = parsed.shared {
                if let Some((first, _)) = &shared {
                    return Err(CatalogError::DuplicateShared {
                        first: first.clone(),
                        second: file.clone(),
                    });
                }
                shared = Some((file.clone(), section));
            }

            debug!(file = %file.display(), apps = parsed.apps.len(), "Catalog file read");
            catalog.extend(parsed.apps.into_iter().map(CatalogEntry::from).collect());
        }

        let (_, shared) = shared.ok_or_else(|| CatalogError::MissingShared {
            path: self.path.clone(),
        })?;

        debug!(entries = catalog.len(), files = files.len(), "Catalog loaded");
        Ok(LoadedCatalog {
            shared: shared.into(),
            catalog,
            sources: files,
        })
    }

    /// Every `*.toml` below the catalog directory, sorted.
    fn collect_files(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.path).sort_by_file_name() {
            let entry = entry.map_err(|e| CatalogError::Read {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.path.clone()),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().is_some_and(|ext| ext == "toml") {
                files.push(entry.into_path());
            } else {
                warn!(file = %entry.path().display(), "Ignoring non-TOML file in catalog directory");
            }
        }

        if files.is_empty() {
            return Err(CatalogError::MissingShared {
                path: self.path.clone(),
            });
        }
        Ok(files)
    }
}

/// Parse one catalog document held in memory.
///
/// `origin` is only used in error messages.
pub fn parse_catalog(raw: &str, origin: &Path) -> Result<LoadedCatalog, CatalogError> {
    let parsed = parse_file(raw, origin)?;
    let shared = parsed.shared.ok_or_else(|| CatalogError::MissingShared {
        path: origin.to_path_buf(),
    })?;
    Ok(LoadedCatalog {
        shared: shared.into(),
        catalog: parsed.apps.into_iter().map(CatalogEntry::from).collect(),
        sources: vec![origin.to_path_buf()],
    })
}

fn parse_file(raw: &str, path: &Path) -> Result<CatalogFile, CatalogError> {
    toml::from_str(raw).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(dir) = env::var(CATALOG_ENV) {
        if !dir.trim().is_empty() {
            candidates.push(PathBuf::from(dir));
        }
    }
    candidates.push(PathBuf::from(DEFAULT_CATALOG_FILE));
    candidates.push(PathBuf::from("catalog"));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SHARED: &str = r#"
[shared]
group_id = "org.example.stream.app"
version = "1.0.0.BUILD-SNAPSHOT"
framework = "Example"

[shared.parent]
group_id = "org.springframework.boot"
artifact_id = "spring-boot-starter-parent"
version = "1.3.5.RELEASE"

[shared.bom]
group_id = "org.example.stream.app"
artifact_id = "example-stream-app-dependencies"

[shared.naming]
starter_group_id = "org.example.stream.app"
starter_prefix = "example-starter-stream"
binder_group_id = "org.example.stream"
binder_prefix = "example-stream-binder"

[shared.support]
group_id = "org.example.stream.app"
artifact_id = "app-starters-packaging-support"

[[shared.plugins]]
group_id = "org.springframework.boot"
artifact_id = "spring-boot-maven-plugin"

[[shared.repositories]]
id = "spring-snapshots"
url = "https://repo.spring.io/libs-snapshot"
snapshots = true
"#;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_single_file() {
        let temp = TempDir::new().unwrap();
        let content = format!(
            "{SHARED}\n[[apps]]\nname = \"foo-source-kafka\"\n\n[[apps]]\nname = \"log-sink-rabbit\"\nrole = \"sink\"\ndescription = \"Logs things\"\n"
        );
        let path = write(temp.path(), "appgen.toml", &content);

        let loaded = CatalogLoader::new(&path).load().unwrap();

        assert!(loaded.shared.validate().is_ok());
        assert_eq!(loaded.catalog.len(), 2);
        let log = loaded.catalog.get("log-sink-rabbit").unwrap();
        assert_eq!(log.descriptor.role.as_deref(), Some("sink"));
        assert_eq!(log.descriptor.description.as_deref(), Some("Logs things"));
        assert_eq!(loaded.sources, vec![path]);
    }

    #[test]
    fn directory_is_merged_in_sorted_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "00-shared.toml", SHARED);
        write(temp.path(), "b/sinks.toml", "[[apps]]\nname = \"log-sink-kafka\"\n");
        write(temp.path(), "a.toml", "[[apps]]\nname = \"time-source-kafka\"\n");
        write(temp.path(), "README.md", "ignored");

        let loaded = CatalogLoader::new(temp.path()).load().unwrap();

        let names: Vec<_> = loaded
            .catalog
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["time-source-kafka", "log-sink-kafka"]);
        assert_eq!(loaded.sources.len(), 3);
    }

    #[test]
    fn duplicates_across_files_are_kept() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.toml", &format!("{SHARED}\n[[apps]]\nname = \"x-source-kafka\"\n"));
        write(temp.path(), "b.toml", "[[apps]]\nname = \"x-source-kafka\"\n");

        let loaded = CatalogLoader::new(temp.path()).load().unwrap();
        assert_eq!(loaded.catalog.len(), 2);
    }

    #[test]
    fn shared_must_appear_exactly_once() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "apps.toml", "[[apps]]\nname = \"x-source-kafka\"\n");
        assert!(matches!(
            CatalogLoader::new(temp.path()).load(),
            Err(CatalogError::MissingShared { .. })
        ));

        write(temp.path(), "one.toml", SHARED);
        write(temp.path(), "two.toml", SHARED);
        assert!(matches!(
            CatalogLoader::new(temp.path()).load(),
            Err(CatalogError::DuplicateShared { .. })
        ));
    }

    #[test]
    fn missing_shared_fields_load_as_blank() {
        let loaded = parse_catalog(
            "[shared]\ngroup_id = \"g\"\nversion = \"1\"\nframework = \"F\"\n",
            Path::new("inline.toml"),
        )
        .unwrap();

        let err = loaded.shared.validate().unwrap_err();
        assert!(err.to_string().contains("parent"));
    }

    #[test]
    fn parse_error_names_the_file() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "broken.toml", "[shared\n");

        let err = CatalogLoader::new(&path).load().unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = CatalogLoader::new("/absolutely/does/not/exist.toml")
            .load()
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn explicit_path_wins_discovery() {
        let loader = CatalogLoader::discover(Some(PathBuf::from("custom.toml"))).unwrap();
        assert_eq!(loader.path(), Path::new("custom.toml"));
    }
}
