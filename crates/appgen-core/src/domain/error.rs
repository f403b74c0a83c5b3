// ============================================================================
// domain/error.rs - GENERATION DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they are stored per entry in the run report)
/// - Categorizable (for CLI display and the run status table)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Shared metadata (fatal for the whole run)
    // ========================================================================
    #[error("Shared metadata is incomplete: '{field}' is missing or empty")]
    IncompleteMetadata { field: String },

    // ========================================================================
    // Entry validation (isolated to one entry)
    // ========================================================================
    #[error("Invalid entry name '{name}': {reason}")]
    InvalidEntryName { name: String, reason: String },

    #[error("Entry '{entry}' has unknown role '{role}'")]
    UnknownRole { entry: String, role: String },

    #[error("Entry '{entry}' does not declare a {field} and none could be inferred from its name")]
    UnresolvableEntry { entry: String, field: &'static str },

    #[error("Entry '{entry}' has an invalid {field} '{value}': {reason}")]
    InvalidEntry {
        entry: String,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Duplicate catalog entry '{entry}'")]
    DuplicateEntry { entry: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::IncompleteMetadata { field } => vec![
                format!("Set '{}' in the [shared] section of the catalog", field),
                "Run 'appgen init' to see a complete sample catalog".into(),
            ],
            Self::InvalidEntryName { .. } => vec![
                "Entry names become directory names".into(),
                "Use lowercase letters, digits and hyphens, e.g. time-source-kafka".into(),
            ],
            Self::UnknownRole { role, .. } => vec![
                format!("'{}' is not a role", role),
                "Supported roles: source, processor, sink".into(),
            ],
            Self::UnresolvableEntry { entry, field } => vec![
                format!("Add '{}' to the [[apps]] entry '{}'", field, entry),
                "Or name the entry <function>-<role>-<binder>, e.g. foo-source-kafka".into(),
            ],
            Self::DuplicateEntry { entry } => vec![
                format!("'{}' is declared more than once", entry),
                "Remove or rename one of the declarations".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IncompleteMetadata { .. } => ErrorCategory::Configuration,
            Self::DuplicateEntry { .. } => ErrorCategory::Conflict,
            Self::InvalidEntryName { .. }
            | Self::UnknownRole { .. }
            | Self::UnresolvableEntry { .. }
            | Self::InvalidEntry { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Configuration,
    Internal,
}
