//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// File name of the manifest at the root of a template directory
pub const MANIFEST_FILE: &str = "template.yaml";

/// Default location of the generated source stub
pub const DEFAULT_ENTRY: &str = "src/index.jsx";

/// Per-template manifest (`<template>/template.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version of the template
    pub version: String,

    /// Packages installed with `--save`
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Packages installed with `--save-dev`
    #[serde(default)]
    pub dev_dependencies: Vec<String>,

    /// Where the source stub is written, relative to the component root
    #[serde(default = "default_entry")]
    pub entry: String,
}

fn default_entry() -> String {
    DEFAULT_ENTRY.to_string()
}

impl TemplateManifest {
    /// True when the template relies on a bare `install` of its seeded manifest
    pub fn uses_bare_install(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }
}
