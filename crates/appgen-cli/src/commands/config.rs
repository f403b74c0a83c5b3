//! `appgen config`: inspect the effective settings.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dotted keys understood by `appgen config get`.
const KEYS: &[&str] = &[
    "generation.catalog",
    "generation.output_dir",
    "generation.on_duplicate",
    "generation.entry_point_stub",
    "output.no_color",
    "output.format",
];

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let text = match cmd {
        ConfigCommands::Get { key } => lookup(&config, &key)?,
        ConfigCommands::List => {
            output.header("Effective settings")?;
            toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                message: format!("settings cannot be rendered as TOML: {e}"),
                source: Some(Box::new(e)),
            })?
        }
        ConfigCommands::Path => AppConfig::config_path().display().to_string(),
    };
    output.raw(&text)?;
    Ok(())
}

fn lookup(config: &AppConfig, key: &str) -> CliResult<String> {
    let generation = &config.generation;
    let value = match key {
        "generation.catalog" => display_path(generation.catalog.as_ref()),
        "generation.output_dir" => display_path(generation.output_dir.as_ref()),
        "generation.on_duplicate" => generation.on_duplicate.to_string(),
        "generation.entry_point_stub" => generation.entry_point_stub.to_string(),
        "output.no_color" => config.output.no_color.to_string(),
        "output.format" => config.output.format.clone(),
        other => {
            return Err(CliError::ConfigError {
                message: format!("'{other}' is not a setting (known: {})", KEYS.join(", ")),
                source: None,
            });
        }
    };
    Ok(value)
}

/// Unset paths print as an empty line.
fn display_path(path: Option<&PathBuf>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}
