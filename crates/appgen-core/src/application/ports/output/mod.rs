//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `appgen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{CompanionFile, GenerationPlan};
use crate::error::AppgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `appgen_adapters::filesystem::LocalFilesystem` (production)
/// - `appgen_adapters::filesystem::MemoryFilesystem` (in memory)
///
/// There is deliberately no delete operation: generation only creates and
/// overwrites.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    ///
    /// Must fail if any component exists and is not a directory.
    fn create_dir_all(&self, path: &Path) -> AppgenResult<()>;

    /// Write content to a file, replacing it if it exists.
    fn write_file(&self, path: &Path, content: &[u8]) -> AppgenResult<()>;

    /// Mark a file executable.
    fn set_executable(&self, path: &Path) -> AppgenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for manifest rendering.
///
/// Implemented by:
/// - `appgen_adapters::renderer::PomRenderer` (Maven `pom.xml`)
///
/// Implementations must be pure: same plan in, same bytes out, and no
/// defaulting or merging of their own.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestRenderer: Send + Sync {
    /// File name the manifest is written under, e.g. `pom.xml`.
    fn file_name(&self) -> &'static str;

    /// Serialize a plan.
    ///
    /// Fails with `ApplicationError::RenderingFailed` only when the plan
    /// violates its own contract (a required field is empty).
    fn render(&self, plan: &GenerationPlan) -> AppgenResult<Vec<u8>>;
}

/// Port for companion files written next to the manifest.
///
/// Implemented by:
/// - `appgen_adapters::companions::EntryPointStub` (application main class)
pub trait CompanionProvider: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Files to write for one entry, in order.
    fn companions(&self, plan: &GenerationPlan) -> AppgenResult<Vec<CompanionFile>>;
}
