//! Implementation of the `appgen list` command.

use appgen_core::{domain::GenerationPlan, error::AppgenResult};
use serde::Serialize;

use crate::{
    cli::{ListArgs, ListFormat},
    commands::{ServiceOptions, build_service, load_catalog},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One catalog entry as it resolves.
#[derive(Debug, Serialize)]
struct EntryRow {
    name: String,
    role: Option<String>,
    function: Option<String>,
    binder: Option<String>,
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl EntryRow {
    fn new(name: String, plan: &AppgenResult<GenerationPlan>) -> Self {
        match plan {
            Ok(plan) => Self {
                name,
                role: Some(plan.role.to_string()),
                function: Some(plan.function.clone()),
                binder: Some(plan.binder.clone()),
                description: Some(plan.description.clone()),
                error: None,
            },
            Err(e) => Self {
                name,
                role: None,
                function: None,
                binder: None,
                description: None,
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let loaded = load_catalog(args.catalog, &config)?;
    let service = build_service(loaded, ServiceOptions::from_config(&config))?;
    let rows: Vec<EntryRow> = service
        .plans()?
        .into_iter()
        .map(|(name, plan)| EntryRow::new(name, &plan))
        .collect();

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Catalog entries ({}):", rows.len()))?;
            for row in &rows {
                match &row.error {
                    None => output.print(&format!(
                        "  {:<40} {:<10} {:<20} {}",
                        row.name,
                        row.role.as_deref().unwrap_or_default(),
                        row.function.as_deref().unwrap_or_default(),
                        row.binder.as_deref().unwrap_or_default()
                    ))?,
                    Some(error) => output.error(&format!("{:<40} {}", row.name, error))?,
                }
            }
        }

        ListFormat::Json => output.json(&rows)?,

        ListFormat::List => {
            for row in &rows {
                output.raw(&row.name)?;
            }
        }

        ListFormat::Csv => output.raw(&to_csv(&rows))?,
    }

    Ok(())
}

fn to_csv(rows: &[EntryRow]) -> String {
    let mut out = String::from("name,role,function,binder,status\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            row.name,
            row.role.as_deref().unwrap_or_default(),
            row.function.as_deref().unwrap_or_default(),
            row.binder.as_deref().unwrap_or_default(),
            if row.error.is_some() { "invalid" } else { "ok" }
        ));
    }
    out
}
