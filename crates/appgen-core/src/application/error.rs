//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not generation
//! logic. Logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Manifest rendering failed (render-time contract violation).
    #[error("Rendering '{entry}' failed: {reason}")]
    RenderingFailed { entry: String, reason: String },

    /// Filesystem operation failed while materializing an entry.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared in-memory state could not be locked (poisoned lock).
    #[error("Internal lock poisoned")]
    StoreLockError,

    /// Requested entry is not in the catalog.
    #[error("No catalog entry named '{entry}'")]
    EntryNotFound { entry: String },

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },

    /// A companion provider failed to produce its files.
    #[error("Companion '{provider}' failed for '{entry}': {reason}")]
    CompanionFailed {
        provider: String,
        entry: String,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { .. } => vec![
                "The manifest renderer rejected a resolved plan".into(),
                "This is a bug; please report it with the catalog entry".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check that no regular file is in the way of the output directory".into(),
            ],
            Self::StoreLockError => vec!["An internal lock was poisoned; try again".into()],
            Self::EntryNotFound { entry } => vec![
                format!("'{}' is not declared in the catalog", entry),
                "Try: appgen list".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {}", name),
                "Pass it to GenerationService::builder() before build()".into(),
            ],
            Self::CompanionFailed { provider, .. } => vec![
                format!("Disable the '{}' companion or fix its input", provider),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderingFailed { .. } => ErrorCategory::Serialization,
            Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::EntryNotFound { .. } => ErrorCategory::NotFound,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
            Self::CompanionFailed { .. } => ErrorCategory::Internal,
        }
    }
}
