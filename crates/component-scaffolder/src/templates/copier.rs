//! Template tree listing and copying

use crate::templates::manifest::MANIFEST_FILE;
use crate::templates::Template;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// List template files relative to `template_dir`, skipping the manifest.
///
/// Symbolic links are followed, so a linked file is listed like a regular
/// one and a dangling link is an error.
pub fn list_template_files(template_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(template_dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| {
            format!(
                "Failed to read template directory {}",
                template_dir.display()
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .context("Template entry outside template directory")?;
        if relative == Path::new(MANIFEST_FILE) {
            continue;
        }
        files.push(relative.to_path_buf());
    }

    Ok(files)
}

/// Write every template file into `target_dir`, returning the relative paths written
pub async fn copy_template(template: &Template, target_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(template.files().len());

    for file in template.files() {
        let target_path = target_dir.join(&file.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, &file.contents)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        written.push(file.path.clone());
    }

    Ok(written)
}
