//! Component directory creation with rollback

use crate::error::ScaffoldError;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// A freshly created component directory.
///
/// While armed, dropping the guard deletes everything it created. Call
/// [`ComponentDir::commit`] once the component is complete, or
/// [`ComponentDir::rollback`] to remove it and observe the outcome.
#[derive(Debug)]
pub struct ComponentDir {
    root: PathBuf,
    /// Topmost directory that did not exist before `create`
    created: PathBuf,
    armed: bool,
}

impl ComponentDir {
    /// Create `base/relative` and every missing parent.
    ///
    /// `relative` must be a plain relative path of normal segments, so the
    /// directory always lands below `base`. Fails if it already exists.
    pub fn create(base: &Path, relative: &str) -> Result<Self, ScaffoldError> {
        if !stays_inside(relative) {
            return Err(ScaffoldError::UnsafePath {
                name: relative.to_string(),
                base: base.to_path_buf(),
            });
        }

        let root = base.join(relative);
        if root.exists() || root.is_symlink() {
            return Err(ScaffoldError::DirectoryExists { path: root });
        }

        let created = topmost_missing(&root);
        if let Err(source) = fs::create_dir_all(&root) {
            return Err(ScaffoldError::CreateDirectory { path: root, source });
        }

        Ok(Self {
            root,
            created,
            armed: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Keep the directory and return its path
    pub fn commit(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.root)
    }

    /// Remove everything `create` made. Returns the removed path.
    pub fn rollback(mut self) -> io::Result<PathBuf> {
        self.armed = false;
        remove(&self.created)?;
        Ok(std::mem::take(&mut self.created))
    }
}

impl Drop for ComponentDir {
    fn drop(&mut self) {
        if self.armed {
            let _ = remove(&self.created);
        }
    }
}

/// True when every segment of `relative` is a normal path component
fn stays_inside(relative: &str) -> bool {
    let segments_ok = relative
        .split(['/', '\\'])
        .all(|segment| !matches!(segment, "" | "." | ".."));
    segments_ok
        && Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn remove(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Walk up from `path` to the highest ancestor that does not exist yet
fn topmost_missing(path: &Path) -> PathBuf {
    let mut top = path;
    while let Some(parent) = top.parent() {
        if parent.as_os_str().is_empty() || parent.exists() {
            break;
        }
        top = parent;
    }
    top.to_path_buf()
}
