//! `appgen show`: print one rendered manifest to stdout.

use tracing::instrument;

use crate::{
    cli::ShowArgs,
    commands::{ServiceOptions, build_service, load_catalog},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(entry = %args.name))]
pub fn execute(args: ShowArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let loaded = load_catalog(args.catalog, &config)?;
    if loaded.catalog.get(&args.name).is_none() {
        return Err(CliError::EntryNotFound { name: args.name });
    }

    let service = build_service(loaded, ServiceOptions::from_config(&config))?;
    let manifest = service.preview(&args.name)?;
    output.raw(&manifest.as_text())?;
    Ok(())
}
