//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No generation logic lives here.

use std::path::PathBuf;

use appgen_core::domain::DuplicatePolicy;
use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "appgen",
    bin_name = "appgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate stream application projects from a catalog",
    long_about = "appgen turns a catalog of stream applications (source, processor, \
                  sink) into one buildable Maven project per entry.",
    after_help = "EXAMPLES:\n\
        \x20 appgen init\n\
        \x20 appgen generate -o ./apps\n\
        \x20 appgen generate --only time-source-kafka --dry-run\n\
        \x20 appgen list --format json\n\
        \x20 appgen show log-sink-kafka",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate one project per catalog entry.
    #[command(
        visible_alias = "gen",
        about = "Generate projects from the catalog",
        after_help = "EXAMPLES:\n\
            \x20 appgen generate\n\
            \x20 appgen generate --catalog ./catalog -o /tmp/apps\n\
            \x20 appgen generate --only foo-source-kafka --only bar-sink-rabbit\n\
            \x20 appgen generate --on-duplicate abort --dry-run"
    )]
    Generate(GenerateArgs),

    /// List catalog entries as they resolve.
    #[command(
        visible_alias = "ls",
        about = "List catalog entries",
        after_help = "EXAMPLES:\n\
            \x20 appgen list\n\
            \x20 appgen list --format csv > entries.csv"
    )]
    List(ListArgs),

    /// Print the rendered manifest of one entry.
    #[command(
        about = "Show the manifest of one entry",
        after_help = "EXAMPLES:\n\
            \x20 appgen show time-source-kafka\n\
            \x20 appgen show time-source-kafka > pom.xml"
    )]
    Show(ShowArgs),

    /// Write the sample catalog.
    #[command(
        about = "Write a sample catalog",
        after_help = "EXAMPLES:\n\
            \x20 appgen init                 # ./appgen.toml\n\
            \x20 appgen init --path catalog/ # ./catalog/appgen.toml\n\
            \x20 appgen init --force         # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 appgen completions bash > ~/.local/share/bash-completion/completions/appgen\n\
            \x20 appgen completions zsh  > ~/.zfunc/_appgen\n\
            \x20 appgen completions fish > ~/.config/fish/completions/appgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the appgen configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 appgen config get generation.output_dir\n\
            \x20 appgen config list\n\
            \x20 appgen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `appgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Catalog file or directory.
    #[arg(long = "catalog", value_name = "PATH", help = "Catalog file or directory")]
    pub catalog: Option<PathBuf>,

    /// Base directory; every entry lands in `<DIR>/<entry>`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output base directory (default: system temp directory)"
    )]
    pub output: Option<PathBuf>,

    /// Restrict generation to these entries.
    #[arg(
        long = "only",
        value_name = "NAME",
        help = "Generate only the named entry (repeatable)"
    )]
    pub only: Vec<String>,

    /// Duplicate entry handling.
    #[arg(
        long = "on-duplicate",
        value_enum,
        value_name = "POLICY",
        help = "What to do with duplicate entry names"
    )]
    pub on_duplicate: Option<DuplicateArg>,

    /// Skip the application main class.
    #[arg(long = "no-stub", help = "Do not write the application main class")]
    pub no_stub: bool,

    /// Preview what would be written without writing any files.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,
}

/// CLI spelling of [`DuplicatePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicateArg {
    /// Keep the first declaration, fail later ones.
    Skip,
    /// Abort the whole run before writing anything.
    Abort,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::Skip => DuplicatePolicy::Skip,
            DuplicateArg::Abort => DuplicatePolicy::Abort,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `appgen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Catalog file or directory.
    #[arg(long = "catalog", value_name = "PATH", help = "Catalog file or directory")]
    pub catalog: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `appgen show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Entry name as declared in the catalog.
    #[arg(value_name = "NAME", help = "Catalog entry name")]
    pub name: String,

    /// Catalog file or directory.
    #[arg(long = "catalog", value_name = "PATH", help = "Catalog file or directory")]
    pub catalog: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `appgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// File or directory to write the sample catalog to.
    #[arg(
        long = "path",
        value_name = "PATH",
        help = "Where to write the catalog (default: ./appgen.toml)"
    )]
    pub path: Option<PathBuf>,

    /// Overwrite an existing catalog file.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing catalog")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `appgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `appgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.output_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
