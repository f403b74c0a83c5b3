//! Unified error handling for appgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, and maps every failure onto the generation error taxonomy used in
//! run reports.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

/// Root error type for appgen core operations.
#[derive(Debug, Error, Clone)]
pub enum AppgenError {
    /// Errors from the domain layer (resolution and validation).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (rendering, I/O, wiring).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl AppgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your catalog and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in appgen".into()],
        }
    }

    /// Where this error sits in the generation error taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::Conflict => ErrorCategory::DuplicateEntry,
                domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error aborts a whole run rather than a single entry.
    pub fn is_fatal(&self) -> bool {
        matches!(self.category(), ErrorCategory::Configuration)
    }
}

/// Generation error taxonomy, as shown in run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    /// Shared metadata incomplete/invalid, adapters missing. Fatal.
    Configuration,
    /// One entry's role, function, binder or name is missing or malformed.
    Validation,
    /// Two catalog entries share a name.
    DuplicateEntry,
    /// Render-time contract violation.
    Serialization,
    /// Materialization failed.
    Io,
    /// A requested entry does not exist.
    NotFound,
    /// Bugs.
    Internal,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::DuplicateEntry => "duplicate-entry",
            Self::Serialization => "serialization",
            Self::Io => "io",
            Self::NotFound => "not-found",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenient result type alias.
pub type AppgenResult<T> = Result<T, AppgenError>;
