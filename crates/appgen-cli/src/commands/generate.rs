//! Implementation of the `appgen generate` command.
//!
//! Responsibility: resolve flags against configuration, run the core
//! generation service and display the report.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, instrument};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    commands::{ServiceOptions, build_service, load_catalog},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `appgen generate` command.
///
/// 1. Load the catalog
/// 2. Narrow it to `--only` names, rejecting unknown ones
/// 3. Run (or dry-run) the generation service
/// 4. Print the report; any failed entry turns into exit code 5
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut loaded = load_catalog(args.catalog.clone(), &config)?;

    if !args.only.is_empty() {
        if let Some(missing) = args
            .only
            .iter()
            .find(|name| loaded.catalog.get(name).is_none())
        {
            return Err(CliError::EntryNotFound {
                name: missing.clone(),
            });
        }
        loaded.catalog.retain_names(&args.only);
    }

    let options = resolve_options(&args, &config);
    let service = build_service(loaded, options)?;

    info!(
        entries = service.catalog().len(),
        base_dir = %service.base_dir().display(),
        "Generation started"
    );

    let spinner = spinner(&output, service.catalog().len());
    let result = if args.dry_run {
        service.dry_run()
    } else {
        service.run()
    };
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    output.report(&report, args.dry_run)?;

    let failed = report.failed().count();
    if failed > 0 {
        return Err(CliError::GenerationFailed {
            failed,
            total: report.len(),
        });
    }
    Ok(())
}

/// Flags win over configuration.
fn resolve_options(args: &GenerateArgs, config: &AppConfig) -> ServiceOptions {
    let mut options = ServiceOptions::from_config(config);
    if let Some(dir) = &args.output {
        options.base_dir = Some(dir.clone());
    }
    if let Some(policy) = args.on_duplicate {
        options.duplicate_policy = policy.into();
    }
    if args.no_stub {
        options.entry_point_stub = false;
    }
    options
}

/// Spinner on an interactive, human-facing terminal only.
fn spinner(output: &OutputManager, entries: usize) -> Option<ProgressBar> {
    if output.is_quiet() || output.format() != OutputFormat::Human {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(format!("Generating {entries} entries..."));
    bar.enable_steady_tick(Duration::from_millis(80));
    Some(bar)
}
