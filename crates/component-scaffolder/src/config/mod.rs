//! Generated configuration files for new components

pub mod generator;

pub use generator::{render_readme, PackageManifest, SOURCE_STUB};
