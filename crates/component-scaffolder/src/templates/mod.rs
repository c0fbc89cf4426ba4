//! Template loading and copying
//!
//! This module provides:
//! - The template manifest type (`template.yaml`)
//! - Template source resolution (flag, environment, bundled default)
//! - Loading a template tree from disk or from the copy embedded in the binary
//! - Copying the loaded tree into a component

pub mod copier;
pub mod manifest;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use include_dir::{Dir, DirEntry};
use std::fmt;
use std::path::{Component, Path, PathBuf};

pub use copier::copy_template;
pub use manifest::TemplateManifest;

/// Where the template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Passed explicitly (`--template-dir`)
    Explicit(PathBuf),
    /// Read from the product's environment variable
    Env(PathBuf),
    /// The template embedded in the product binary
    Bundled,
}

impl TemplateSource {
    /// Resolve the template: explicit path, then environment, then bundled
    pub fn resolve<C: ProductConfig>(config: &C, explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path);
        }
        match std::env::var_os(config.template_dir_env()) {
            Some(value) if !value.is_empty() => Self::Env(PathBuf::from(value)),
            _ => Self::Bundled,
        }
    }

    /// The template directory on disk, `None` for the bundled template
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Env(path) => Some(path),
            Self::Bundled => None,
        }
    }

    /// Load the template this source points at
    pub fn load<C: ProductConfig>(&self, config: &C) -> Result<Template> {
        match self {
            Self::Explicit(path) | Self::Env(path) => Template::load(path),
            Self::Bundled => Template::from_embedded(config.bundled_template()),
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "template at {}", path.display()),
            Self::Env(path) => write!(f, "configured template at {}", path.display()),
            Self::Bundled => f.write_str("bundled template"),
        }
    }
}

/// One file of a template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the template root
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl TemplateFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// A template tree held in memory together with its parsed manifest
#[derive(Debug, Clone)]
pub struct Template {
    manifest: TemplateManifest,
    files: Vec<TemplateFile>,
}

impl Template {
    /// Read `template.yaml` and every other file below `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("Template directory not found: {}", dir.display());
        }

        let manifest_path = dir.join(manifest::MANIFEST_FILE);
        let content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;

        let mut files = Vec::new();
        for relative in copier::list_template_files(dir)? {
            let path = dir.join(&relative);
            let contents = std::fs::read(&path)
                .with_context(|| format!("Failed to read template file {}", path.display()))?;
            files.push(TemplateFile {
                path: relative,
                contents,
            });
        }

        Self::from_files(&content, files)
            .with_context(|| format!("Invalid template in {}", dir.display()))
    }

    /// Load a template tree embedded with `include_dir!`
    pub fn from_embedded(dir: &Dir<'_>) -> Result<Self> {
        let content = dir
            .get_file(manifest::MANIFEST_FILE)
            .context("Bundled template has no template.yaml")?
            .contents_utf8()
            .context("Bundled template.yaml is not valid UTF-8")?;

        let mut files = Vec::new();
        collect_embedded(dir, &mut files);
        files.sort_by(|a, b| a.path.cmp(&b.path));

        Self::from_files(content, files).context("Invalid bundled template")
    }

    /// Build a template from manifest text and its files.
    ///
    /// Every file path and the manifest's entry must be relative paths made
    /// of normal segments. A `template.yaml` among `files` is ignored.
    pub fn from_files(manifest_source: &str, files: Vec<TemplateFile>) -> Result<Self> {
        let manifest: TemplateManifest = serde_yaml::from_str(manifest_source)
            .with_context(|| format!("Failed to parse {}", manifest::MANIFEST_FILE))?;

        if !is_contained(Path::new(&manifest.entry)) {
            anyhow::bail!(
                "Template entry must be a relative path inside the component, got {}",
                manifest.entry
            );
        }
        if let Some(file) = files.iter().find(|file| !is_contained(&file.path)) {
            anyhow::bail!(
                "Template file must be a relative path, got {}",
                file.path.display()
            );
        }

        let files = files
            .into_iter()
            .filter(|file| file.path != Path::new(manifest::MANIFEST_FILE))
            .collect();
        Ok(Self { manifest, files })
    }

    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }

    /// Files copied into every component, sorted by path
    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }

    /// Contents of the file at `path`, relative to the template root
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        let path = path.as_ref();
        self.files
            .iter()
            .find(|file| file.path == path)
            .map(|file| file.contents.as_slice())
    }
}

fn collect_embedded(dir: &Dir<'_>, files: &mut Vec<TemplateFile>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_embedded(sub, files),
            DirEntry::File(file) => {
                files.push(TemplateFile::new(file.path(), file.contents()));
            }
        }
    }
}

/// Non-empty and made only of normal components, so it cannot climb out
fn is_contained(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}
