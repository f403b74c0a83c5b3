//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use appgen_core::prelude::{EntryOutcome, EntryStatus, RunReport};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;
use uuid::Uuid;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // flag, then config, then Auto → Human (TTY) or Plain (piped)
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or(OutputFormat::Auto)
            }
            explicit => explicit,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Payload output (manifests, JSON, CSV). Never suppressed.
    pub fn raw(&self, data: &str) -> io::Result<()> {
        self.term.write_str(data)?;
        if !data.ends_with('\n') {
            self.term.write_line("")?;
        }
        Ok(())
    }

    /// Pretty JSON on stdout. Never suppressed.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&rendered)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`. Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Print a run report in the resolved format.
    pub fn report(&self, report: &RunReport, dry_run: bool) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(&ReportView::new(report, dry_run));
        }

        if dry_run {
            self.header(&format!(
                "Dry run: nothing written under {}",
                report.base_dir.display()
            ))?;
        } else {
            self.header(&format!("Output: {}", report.base_dir.display()))?;
        }

        for outcome in &report.outcomes {
            match &outcome.status {
                EntryStatus::Generated(m) | EntryStatus::Planned(m) => {
                    self.success(&format!(
                        "{:<40} {} ({} file{})",
                        outcome.entry,
                        m.root.display(),
                        m.files.len(),
                        if m.files.len() == 1 { "" } else { "s" }
                    ))?;
                }
                EntryStatus::Failed(err) => {
                    self.error(&format!("{:<40} [{}] {}", outcome.entry, err.category(), err))?;
                }
            }
        }

        let failed = report.failed().count();
        let summary = format!(
            "{} {}, {} failed",
            report.succeeded().count(),
            if dry_run { "planned" } else { "generated" },
            failed
        );
        if failed == 0 {
            self.info(&summary)
        } else {
            self.warning(&summary)
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── JSON views ────────────────────────────────────────────────────────────────

/// Serialisable run report.
#[derive(Debug, Serialize)]
pub struct ReportView {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub base_dir: PathBuf,
    pub dry_run: bool,
    pub succeeded: usize,
    pub failed: usize,
    pub entries: Vec<OutcomeView>,
}

impl ReportView {
    pub fn new(report: &RunReport, dry_run: bool) -> Self {
        Self {
            run_id: report.run_id,
            generated_at: Utc::now(),
            base_dir: report.base_dir.clone(),
            dry_run,
            succeeded: report.succeeded().count(),
            failed: report.failed().count(),
            entries: report.outcomes.iter().map(OutcomeView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutcomeView {
    pub entry: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
}

impl From<&EntryOutcome> for OutcomeView {
    fn from(outcome: &EntryOutcome) -> Self {
        let files = match &outcome.status {
            EntryStatus::Generated(m) | EntryStatus::Planned(m) => m.files.clone(),
            EntryStatus::Failed(_) => Vec::new(),
        };
        Self {
            entry: outcome.entry.clone(),
            status: outcome.status_label(),
            category: outcome.category().map(|c| c.to_string()),
            message: outcome.error().map(ToString::to_string),
            path: outcome.root().cloned(),
            files,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
