//! The real disk.

use std::fs;
use std::io;
use std::path::Path;

use appgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::AppgenResult,
};

/// Writes straight through `std::fs`; existing files are replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

/// Tag an I/O failure with the path and the step that hit it.
fn at<'a>(path: &'a Path, step: &'static str) -> impl FnOnce(io::Error) -> ApplicationError + 'a {
    move |err| ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{step}: {err}"),
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> AppgenResult<()> {
        fs::create_dir_all(path).map_err(at(path, "mkdir"))?;
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> AppgenResult<()> {
        fs::write(path, content).map_err(at(path, "write"))?;
        Ok(())
    }

    /// Adds the execute bits for owner, group and others. No-op off Unix.
    #[cfg(unix)]
    fn set_executable(&self, path: &Path) -> AppgenResult<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut mode = fs::metadata(path).map_err(at(path, "stat"))?.permissions();
        mode.set_mode(mode.mode() | 0o111);
        fs::set_permissions(path, mode).map_err(at(path, "chmod"))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn set_executable(&self, _path: &Path) -> AppgenResult<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
