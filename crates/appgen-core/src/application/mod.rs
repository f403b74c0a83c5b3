//! Use cases built on the domain model.
//!
//! [`GenerationService`] walks a catalog and asks the ports in [`ports`] to
//! render, write and extend each entry; [`Materializer`] turns one entry into
//! the files that land on disk. Naming and inference rules stay in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{CompanionProvider, Filesystem, ManifestRenderer};
pub use services::{
    EntryOutcome, EntryStatus, GenerationService, GenerationServiceBuilder, MaterializedEntry,
    Materializer, RunReport,
};
