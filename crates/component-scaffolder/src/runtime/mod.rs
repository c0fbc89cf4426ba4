//! Runtime detection and package manager handling
//!
//! This module provides:
//! - Node.js detection
//! - The package manager version gate and install steps

pub mod check;
pub mod package_manager;

pub use check::{check_node, require_node, RuntimeInfo};
pub use package_manager::{install_plan, InstallStep, PackageManager};
