//! Manifest renderers.

mod pom;

pub use pom::PomRenderer;
