//! Product configuration trait for CLI binaries
//!
//! Each binary implements this trait to configure the scaffolding behavior
//! for the kind of component it creates.

use include_dir::Dir;
use std::path::Path;

/// Configuration trait for component scaffolding products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Template location
/// - Package manager and the runtimes it needs
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template tree embedded in the binary, used when nothing else is configured
    fn bundled_template(&self) -> &'static Dir<'static>;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Package manager executable looked up on PATH
    fn package_manager(&self) -> &'static str {
        "npm"
    }

    /// Oldest package manager version accepted, `None` to skip the check
    fn min_package_manager_version(&self) -> Option<&'static str>;

    /// Oldest Node.js major version accepted, `None` to skip the check
    fn min_node_major(&self) -> Option<u64>;

    /// Generate the "next steps" instructions after the component is created
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
