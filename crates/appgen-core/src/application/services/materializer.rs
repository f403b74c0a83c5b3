//! Filesystem materializer - the only component that writes to disk.
//!
//! Overwrite policy: the entry directory is created if absent and reused if
//! present. Generated files replace same-named files; anything else already
//! in the directory is left untouched (overwrite-by-name, never
//! clean-then-write). Nothing is ever deleted here.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{CompanionFile, RenderedManifest},
    error::{AppgenError, AppgenResult},
};

/// What was written for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedEntry {
    pub root: PathBuf,
    /// Written files in write order, manifest first.
    pub files: Vec<PathBuf>,
}

/// Writes rendered manifests and companions below a base directory.
pub struct Materializer {
    filesystem: Box<dyn Filesystem>,
    base_dir: PathBuf,
}

impl Materializer {
    /// `base_dir = None` falls back to the process temp directory.
    pub fn new(filesystem: Box<dyn Filesystem>, base_dir: Option<PathBuf>) -> Self {
        Self {
            filesystem,
            base_dir: base_dir.unwrap_or_else(std::env::temp_dir),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Output directory of an entry: `<base>/<entry>`.
    pub fn target_dir(&self, entry_name: &str) -> PathBuf {
        self.base_dir.join(entry_name)
    }

    /// Paths [`Materializer::materialize`] would write, without touching the
    /// filesystem.
    pub fn layout(
        &self,
        entry_name: &str,
        manifest: &RenderedManifest,
        companions: &[CompanionFile],
    ) -> MaterializedEntry {
        let root = self.target_dir(entry_name);
        let files = std::iter::once(root.join(&manifest.file_name))
            .chain(companions.iter().map(|c| root.join(c.path.as_path())))
            .collect();
        MaterializedEntry { root, files }
    }

    /// Write one entry. Stops at the first failure; earlier files stay.
    #[instrument(skip_all, fields(entry = %entry_name))]
    pub fn materialize(
        &self,
        entry_name: &str,
        manifest: &RenderedManifest,
        companions: &[CompanionFile],
    ) -> AppgenResult<MaterializedEntry> {
        let root = self.target_dir(entry_name);
        if self.filesystem.exists(&root) {
            debug!(path = %root.display(), "Output directory exists, overwriting by name");
        }

        self.filesystem
            .create_dir_all(&root)
            .map_err(|e| with_entry(entry_name, e))?;

        let mut files = Vec::with_capacity(companions.len() + 1);

        let manifest_path = root.join(&manifest.file_name);
        self.filesystem
            .write_file(&manifest_path, &manifest.bytes)
            .map_err(|e| with_entry(entry_name, e))?;
        files.push(manifest_path);

        for companion in companions {
            let path = root.join(companion.path.as_path());
            if let Some(parent) = path.parent() {
                self.filesystem
                    .create_dir_all(parent)
                    .map_err(|e| with_entry(entry_name, e))?;
            }
            self.filesystem
                .write_file(&path, companion.content.as_bytes())
                .map_err(|e| with_entry(entry_name, e))?;
            if companion.executable {
                self.filesystem
                    .set_executable(&path)
                    .map_err(|e| with_entry(entry_name, e))?;
            }
            files.push(path);
        }

        debug!(files = files.len(), path = %root.display(), "Entry materialized");
        Ok(MaterializedEntry { root, files })
    }
}

/// Prefix filesystem failures with the entry they belong to.
fn with_entry(entry_name: &str, err: AppgenError) -> AppgenError {
    warn!(entry = %entry_name, error = %err, "Materialization failed");
    match err {
        AppgenError::Application(ApplicationError::FilesystemError { path, reason }) => {
            ApplicationError::FilesystemError {
                path,
                reason: format!("entry '{entry_name}': {reason}"),
            }
            .into()
        }
        other => other,
    }
}
