//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `appgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ManifestRenderer`: plan → manifest bytes
//!   - `CompanionProvider`: plan → extra files
//!   - `Filesystem`: directory and file creation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CompanionProvider, Filesystem, ManifestRenderer};

#[cfg(test)]
pub use output::MockManifestRenderer;
