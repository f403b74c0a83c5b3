//! The CLI-level error type: what went wrong, what to try next, and which
//! exit code the process ends with.

use std::error::Error;
use std::fmt::Write as _;

use appgen_adapters::CatalogError;
use appgen_core::error::AppgenError;
use owo_colors::OwoColorize;
use thiserror::Error;

pub use appgen_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An argument was accepted by clap but rejected afterwards.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// A name given on the command line is not in the catalog.
    #[error("No catalog entry named '{name}'")]
    EntryNotFound { name: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Bad settings file, or an unknown key asked for.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("Generation failed: {0}")]
    Core(#[from] AppgenError),

    /// The run finished but not every entry made it.
    #[error("{failed} of {total} entries failed")]
    GenerationFailed { failed: usize, total: usize },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        let message = source.to_string();
        CliError::IoError { message, source }
    }
}

impl CliError {
    /// Next steps shown under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["See `appgen <command> --help`".into()],
            Self::EntryNotFound { name } => vec![
                format!("'{name}' is not declared in the catalog"),
                "List available entries: appgen list".into(),
            ],
            Self::Catalog(err) => catalog_suggestions(err),
            Self::ConfigError { .. } => vec![
                "Show the config file location: appgen config path".into(),
                "Settings can also come from APPGEN__<SECTION>__<KEY>".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::GenerationFailed { .. } => vec![
                "Every other entry was generated".into(),
                "Failed entries are listed above with their reason".into(),
            ],
            Self::IoError { .. } => vec![
                "Check that the target directory is writable".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::EntryNotFound { .. } => ErrorCategory::NotFound,
            Self::Catalog(err) if err.is_not_found() => ErrorCategory::NotFound,
            Self::Catalog(_) | Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => ErrorCategory::from(core.category()),
            Self::GenerationFailed { .. } => ErrorCategory::PartialFailure,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit status; see [`ErrorCategory`] for the table.
    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// Multi-line report for stderr. `color` turns on ANSI styling;
    /// `verbose` walks the source chain instead of hinting at `-v`.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_string() }
        };

        let mut out = String::new();
        let _ = writeln!(out, "\n{} {self}", paint("error:", |s| s.red().bold().to_string()));

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(out, "  caused by: {}", paint(&err.to_string(), |s| s.dimmed().to_string()));
                cause = err.source();
            }
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            let _ = writeln!(out, "\n{}", paint("hint:", |s| s.yellow().bold().to_string()));
            for hint in hints {
                let _ = writeln!(out, "  - {hint}");
            }
        }

        if !verbose {
            let _ = writeln!(out, "\n{}", paint("Run again with -v for details.", |s| s.dimmed().to_string()));
        }
        out
    }

    /// Record the failure in the log before it is printed.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, "Command failed");
            }
            _ => tracing::warn!(?category, error = %self, "Command failed"),
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "Underlying cause");
        }
    }
}

fn catalog_suggestions(err: &CatalogError) -> Vec<String> {
    match err {
        CatalogError::NotFound { path } => vec![
            format!("Nothing exists at '{}'", path.display()),
            "Create a sample catalog: appgen init".into(),
        ],
        CatalogError::NotDiscovered { .. } => vec![
            "Pass --catalog <PATH> or set APPGEN_CATALOG".into(),
            "Create a sample catalog: appgen init".into(),
        ],
        CatalogError::Read { .. } => vec!["Check that the catalog file is readable".into()],
        CatalogError::Parse { .. } => vec![
            "Check the TOML syntax of the catalog".into(),
            "Compare with the sample: appgen init --path /tmp/sample.toml".into(),
        ],
        CatalogError::MissingShared { .. } => {
            vec!["Exactly one catalog file must declare a [shared] section".into()]
        }
        CatalogError::DuplicateShared { .. } => {
            vec!["Keep [shared] in one file and remove it from the other".into()]
        }
    }
}

/// How a failure is classified, and therefore how the process exits.
///
/// | Category        | Code |
/// |-----------------|------|
/// | Internal        |  1   |
/// | User error      |  2   |
/// | Not found       |  3   |
/// | Configuration   |  4   |
/// | Partial failure |  5   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    /// Some catalog entries failed, the rest were generated.
    PartialFailure,
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
            Self::PartialFailure => 5,
        }
    }
}

impl From<CoreCategory> for ErrorCategory {
    fn from(core: CoreCategory) -> Self {
        match core {
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Validation | CoreCategory::DuplicateEntry => Self::UserError,
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::Serialization | CoreCategory::Io | CoreCategory::Internal => {
                Self::Internal
            }
        }
    }
}

/// Attach a message to an I/O or core failure while turning it into a
/// [`CliError`].
pub trait CliContext<T> {
    fn cli_context<F, S>(self, describe: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> CliContext<T> for Result<T, std::io::Error> {
    fn cli_context<F, S>(self, describe: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: describe().into(),
            source,
        })
    }
}

impl<T> CliContext<T> for Result<T, AppgenError> {
    /// Core errors name their own subject; the message is not needed.
    fn cli_context<F, S>(self, _describe: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}
