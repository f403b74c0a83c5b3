//! Run reports: one outcome per catalog entry, plus the aggregate verdict.

use std::path::PathBuf;

use uuid::Uuid;

use crate::{
    application::services::materializer::MaterializedEntry,
    error::{AppgenError, ErrorCategory},
};

/// Result of generating one entry.
#[derive(Debug, Clone)]
pub enum EntryStatus {
    /// Files were written.
    Generated(MaterializedEntry),
    /// Dry run: files that would have been written.
    Planned(MaterializedEntry),
    /// The entry failed; siblings were still processed.
    Failed(AppgenError),
}

#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub entry: String,
    pub status: EntryStatus,
}

impl EntryOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self.status, EntryStatus::Failed(_))
    }

    pub fn error(&self) -> Option<&AppgenError> {
        match &self.status {
            EntryStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<ErrorCategory> {
        self.error().map(AppgenError::category)
    }

    /// Output directory for successful outcomes.
    pub fn root(&self) -> Option<&PathBuf> {
        match &self.status {
            EntryStatus::Generated(m) | EntryStatus::Planned(m) => Some(&m.root),
            EntryStatus::Failed(_) => None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self.status {
            EntryStatus::Generated(_) => "generated",
            EntryStatus::Planned(_) => "planned",
            EntryStatus::Failed(_) => "failed",
        }
    }
}

/// Aggregate result of one generation run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub base_dir: PathBuf,
    pub outcomes: Vec<EntryOutcome>,
}

impl RunReport {
    pub fn new(run_id: Uuid, base_dir: PathBuf) -> Self {
        Self {
            run_id,
            base_dir,
            outcomes: Vec::new(),
        }
    }

    /// `true` when every entry succeeded (an empty catalog succeeds).
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(EntryOutcome::is_success)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// First outcome recorded for `entry`.
    pub fn outcome(&self, entry: &str) -> Option<&EntryOutcome> {
        self.outcomes.iter().find(|o| o.entry == entry)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
