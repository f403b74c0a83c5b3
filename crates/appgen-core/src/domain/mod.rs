// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for appgen.
//!
//! This module contains the pure generation logic: the coordinate model,
//! catalog entries, shared metadata and the resolver that merges them into
//! generation plans. All I/O and rendering concerns are handled via ports
//! (traits) defined in the application layer.
//!
//! - **No I/O**: no filesystem or network access
//! - **No ambient state**: shared metadata is passed in explicitly
//! - **Deterministic**: the same catalog yields the same plans, in order
pub mod common;
pub mod companion;
pub mod entry;
pub mod error;
pub mod model;
pub mod plan;
pub mod resolver;
pub mod shared;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use common::{RelativePath, pascal_case, title_words};
pub use companion::{CompanionFile, RenderedManifest};
pub use entry::{Catalog, CatalogEntry, EntryDescriptor, NameParts};
pub use error::{DomainError, ErrorCategory};
pub use model::{AppRole, Coordinate, Dependency, PluginRef, Repository};
pub use plan::GenerationPlan;
pub use resolver::{CatalogResolver, DuplicatePolicy, resolve};
pub use shared::{ArtifactNaming, SharedMetadata};
pub use validation::DomainValidator;
