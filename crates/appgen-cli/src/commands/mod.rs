//! Subcommand handlers.
//!
//! Each handler translates CLI arguments into core calls and displays the
//! result. No generation logic lives here.

use std::path::PathBuf;

use appgen_adapters::{CatalogLoader, EntryPointStub, LoadedCatalog, LocalFilesystem, PomRenderer};
use appgen_core::{application::GenerationService, domain::DuplicatePolicy};
use tracing::debug;

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
pub mod show;

/// Locate and read the catalog: flag, then config, then discovery.
pub(crate) fn load_catalog(
    explicit: Option<PathBuf>,
    config: &AppConfig,
) -> CliResult<LoadedCatalog> {
    let loader = CatalogLoader::discover(explicit.or_else(|| config.generation.catalog.clone()))?;
    let loaded = loader.load()?;
    debug!(
        path = %loader.path().display(),
        entries = loaded.catalog.len(),
        "Catalog ready"
    );
    Ok(loaded)
}

/// Service options resolved from flags and configuration.
#[derive(Debug, Clone)]
pub(crate) struct ServiceOptions {
    pub base_dir: Option<PathBuf>,
    pub duplicate_policy: DuplicatePolicy,
    pub entry_point_stub: bool,
}

impl ServiceOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_dir: config.generation.output_dir.clone(),
            duplicate_policy: config.generation.on_duplicate,
            entry_point_stub: config.generation.entry_point_stub,
        }
    }
}

/// Wire the production adapters into a [`GenerationService`].
pub(crate) fn build_service(
    loaded: LoadedCatalog,
    options: ServiceOptions,
) -> CliResult<GenerationService> {
    let mut builder = GenerationService::builder()
        .catalog(loaded.catalog)
        .shared(loaded.shared)
        .maybe_base_dir(options.base_dir)
        .duplicate_policy(options.duplicate_policy)
        .renderer(Box::new(PomRenderer::new()))
        .filesystem(Box::new(LocalFilesystem::new()));

    if options.entry_point_stub {
        builder = builder.companion(Box::new(EntryPointStub::new()));
    }

    Ok(builder.build()?)
}
