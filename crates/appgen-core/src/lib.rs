//! appgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the appgen
//! stream application generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           appgen-cli (CLI)              │
//! │   (loads catalog, wires adapters)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerationService, Materializer)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ManifestRenderer,          │
//! │  CompanionProvider)                     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    appgen-adapters (Infrastructure)     │
//! │ (PomRenderer, LocalFilesystem, TOML     │
//! │  catalog loader, EntryPointStub)        │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Catalog, SharedMetadata, resolver,     │
//! │  GenerationPlan)                        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use appgen_core::prelude::*;
//!
//! // 1. Describe the catalog
//! let catalog = Catalog::new()
//!     .with_entry("time-source-kafka", EntryDescriptor::new())
//!     .with_entry("log-sink-rabbit", EntryDescriptor::new());
//!
//! // 2. Run the service (with injected adapters)
//! let service = GenerationService::builder()
//!     .catalog(catalog)
//!     .shared(shared)
//!     .base_dir("./apps")
//!     .renderer(Box::new(renderer))
//!     .filesystem(Box::new(filesystem))
//!     .build()?;
//! let report = service.run()?;
//! assert!(report.is_success());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        EntryOutcome, EntryStatus, GenerationService, RunReport,
        ports::{CompanionProvider, Filesystem, ManifestRenderer},
    };
    pub use crate::domain::{
        AppRole, Catalog, CatalogEntry, CompanionFile, Coordinate, Dependency, DuplicatePolicy,
        EntryDescriptor, GenerationPlan, PluginRef, Repository, SharedMetadata,
    };
    pub use crate::error::{AppgenError, AppgenResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
