//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate the catalog" or "preview one entry".

pub mod generation_service;
pub mod materializer;
pub mod report;

#[cfg(test)]
mod test_support;

pub use generation_service::{GenerationService, GenerationServiceBuilder};
pub use materializer::{MaterializedEntry, Materializer};
pub use report::{EntryOutcome, EntryStatus, RunReport};
