//! Test doubles shared by the service tests.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    error::AppgenResult,
};

#[derive(Debug, Default)]
struct Inner {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
}

/// Minimal in-memory filesystem with the same failure rules as the real one.
#[derive(Debug, Clone, Default)]
pub struct FakeFilesystem {
    inner: Arc<Mutex<Inner>>,
}

impl FakeFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a regular file (and its parent directories).
    pub fn put_file(&self, path: &str) {
        let path = PathBuf::from(path);
        let mut inner = self.inner.lock().unwrap();
        for ancestor in path.ancestors().skip(1) {
            inner.dirs.insert(ancestor.to_path_buf());
        }
        inner.files.insert(path, Vec::new());
    }

    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.inner.lock().unwrap().files.get(path).cloned()
    }

    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner.lock().unwrap().executables.contains(path)
    }

    pub fn file_count(&self) -> usize {
        self.inner.lock().unwrap().files.len()
    }
}

fn fs_error(path: &Path, reason: &str) -> crate::error::AppgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> AppgenResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(fs_error(&current, "not a directory"));
            }
            inner.dirs.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> AppgenResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.dirs.contains(path) {
            return Err(fs_error(path, "is a directory"));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.dirs.contains(parent) {
                return Err(fs_error(path, "parent directory does not exist"));
            }
        }
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> AppgenResult<()> {
        self.inner
            .lock()
            .unwrap()
            .executables
            .insert(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.files.contains_key(path) || inner.dirs.contains(path)
    }
}
