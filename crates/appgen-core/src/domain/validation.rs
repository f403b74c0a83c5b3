use crate::domain::{entry::CatalogEntry, error::DomainError, shared::SharedMetadata};

/// Centralized domain validation.
///
/// All validation entry points used by services and adapters live here, not
/// scattered across call sites.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_shared(shared: &SharedMetadata) -> Result<(), DomainError> {
        shared.validate()
    }

    pub fn validate_entry_name(entry: &CatalogEntry) -> Result<(), DomainError> {
        entry.validate_name()
    }
}
