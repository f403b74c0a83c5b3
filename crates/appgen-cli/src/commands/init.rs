//! `appgen init`: write the sample catalog.

use std::path::{Path, PathBuf};

use appgen_adapters::sample_catalog::{SAMPLE_CATALOG, SAMPLE_FILE_NAME};
use tracing::{debug, instrument};

use crate::{
    cli::InitArgs,
    error::{CliContext, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let target = target_path(args.path.as_deref());
    debug!(path = %target.display(), "Writing sample catalog");

    if target.exists() && !args.force && !confirm_overwrite(&target)? {
        output.warning(&format!(
            "Catalog already exists at {}  (use --force to overwrite)",
            target.display(),
        ))?;
        return Ok(());
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .cli_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }

    std::fs::write(&target, SAMPLE_CATALOG)
        .cli_context(|| format!("Failed to write catalog to '{}'", target.display()))?;

    output.success(&format!("Sample catalog written to {}", target.display()))?;
    output.print(&format!(
        "  Next: appgen generate --catalog {} -o ./apps",
        target.display()
    ))?;
    Ok(())
}

/// `None` → `./appgen.toml`; a directory (existing or spelled with a
/// trailing separator) gets `appgen.toml` appended.
fn target_path(path: Option<&Path>) -> PathBuf {
    let Some(path) = path else {
        return PathBuf::from(SAMPLE_FILE_NAME);
    };
    let spelled_as_dir = path
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator);
    if path.is_dir() || spelled_as_dir {
        path.join(SAMPLE_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

#[cfg(feature = "interactive")]
fn confirm_overwrite(target: &Path) -> CliResult<bool> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    dialoguer::Confirm::new()
        .with_prompt(format!("Overwrite {}?", target.display()))
        .default(false)
        .interact()
        .map_err(|e| crate::error::CliError::InvalidInput {
            message: format!("Failed to get user input: {e}"),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(_target: &Path) -> CliResult<bool> {
    Ok(false)
}
