//! Component Scaffolder - Shared library for component scaffolding CLIs
//!
//! This library creates the boilerplate directory of a standalone UI component
//! package from a static template, then installs its dependencies with an
//! external package manager.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name validation, directory provisioning,
//!   template copying, file generation, package manager calls
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `Scaffolder`
//!   pipeline with rollback on failure
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based reporting (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based reporter
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use component_scaffolder::{PackageManager, Scaffolder, Template};
//!
//! let template = Template::load("my-templates/react-component".as_ref())?;
//! let component = Scaffolder::new(template)
//!     .with_package_manager(PackageManager::new("npm"))
//!     .create("my-component", &std::env::current_dir()?)
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod naming;
pub mod product;
pub mod provision;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use naming::{validate, ComponentName, NameValidation};
pub use product::ProductConfig;
pub use provision::ComponentDir;
pub use runtime::{InstallStep, PackageManager};
pub use scaffold::{Component, Progress, Scaffolder};
pub use templates::{Template, TemplateFile, TemplateManifest, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
