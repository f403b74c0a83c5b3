//! Infrastructure adapters for appgen.
//!
//! This crate implements the ports defined in `appgen-core::application::ports`
//! and reads catalogs from disk. It contains all external dependencies and
//! I/O operations.

pub mod catalog_loader;
pub mod companions;
pub mod filesystem;
pub mod renderer;
pub mod sample_catalog;

// Re-export commonly used adapters
pub use catalog_loader::{CatalogError, CatalogLoader, LoadedCatalog};
pub use companions::EntryPointStub;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::PomRenderer;
