//! The component creation pipeline
//!
//! `validate → provision → materialize → install`, stopping at the first
//! failure. Once the component directory exists, any failure rolls it back
//! before the error is returned, so a directory is either complete or absent.

use crate::config::generator;
use crate::error::ScaffoldError;
use crate::naming::ComponentName;
use crate::provision::ComponentDir;
use crate::runtime::package_manager::{install_plan, InstallStep, PackageManager};
use crate::templates::{copier, Template};
use semver::Version;
use std::io;
use std::path::{Path, PathBuf};

/// Pipeline milestones, reported as they happen
#[derive(Debug)]
pub enum Progress<'a> {
    /// The component directory was created
    DirectoryCreated(&'a Path),
    /// Template tree copied and generated files written
    Materialized { root: &'a Path, files: usize },
    /// The package manager passed the version gate
    VersionChecked {
        program: &'a str,
        version: &'a Version,
    },
    /// An install step is about to run
    Installing {
        step: &'a InstallStep,
        command: &'a str,
    },
    /// An install step exited successfully
    Installed(&'a InstallStep),
    /// Installation was disabled for this run
    InstallSkipped,
    /// The component directory was removed after a failure
    RolledBack(&'a Path),
    /// Removing the component directory failed
    RollbackFailed(&'a Path, &'a io::Error),
}

/// A successfully created component
#[derive(Debug, Clone)]
pub struct Component {
    pub name: ComponentName,
    pub root: PathBuf,
    /// Files written, relative to `root`
    pub files: Vec<PathBuf>,
}

/// Creates components from one template
#[derive(Debug, Clone)]
pub struct Scaffolder {
    template: Template,
    package_manager: Option<PackageManager>,
}

impl Scaffolder {
    /// A scaffolder that copies `template` and installs nothing
    pub fn new(template: Template) -> Self {
        Self {
            template,
            package_manager: None,
        }
    }

    /// Install dependencies with `package_manager` after materializing
    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = Some(package_manager);
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Create component `name` under `base_dir`
    pub async fn create(&self, name: &str, base_dir: &Path) -> Result<Component, ScaffoldError> {
        self.create_with(name, base_dir, |_| {}).await
    }

    /// Like [`Scaffolder::create`], calling `on_progress` at each milestone
    pub async fn create_with<F>(
        &self,
        name: &str,
        base_dir: &Path,
        mut on_progress: F,
    ) -> Result<Component, ScaffoldError>
    where
        F: FnMut(Progress<'_>),
    {
        let name = ComponentName::parse(name).map_err(|validation| ScaffoldError::InvalidName {
            name: name.to_string(),
            validation,
        })?;

        let dir = ComponentDir::create(base_dir, name.as_str())?;
        on_progress(Progress::DirectoryCreated(dir.path()));

        let outcome = self.populate(&name, dir.path(), &mut on_progress).await;
        match outcome {
            Ok(files) => Ok(Component {
                name,
                root: dir.commit(),
                files,
            }),
            Err(err) => {
                let path = dir.path().to_path_buf();
                match dir.rollback() {
                    Ok(removed) => on_progress(Progress::RolledBack(&removed)),
                    Err(io_err) => on_progress(Progress::RollbackFailed(&path, &io_err)),
                }
                Err(err)
            }
        }
    }

    async fn populate<F>(
        &self,
        name: &ComponentName,
        root: &Path,
        on_progress: &mut F,
    ) -> Result<Vec<PathBuf>, ScaffoldError>
    where
        F: FnMut(Progress<'_>),
    {
        let files = self
            .materialize(name, root)
            .await
            .map_err(ScaffoldError::Materialize)?;
        on_progress(Progress::Materialized {
            root,
            files: files.len(),
        });

        match &self.package_manager {
            Some(pm) => self.install(pm, root, on_progress).await?,
            None => on_progress(Progress::InstallSkipped),
        }

        Ok(files)
    }

    /// Copy the template tree, then overwrite it with the generated files
    async fn materialize(
        &self,
        name: &ComponentName,
        root: &Path,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let entry = &self.template.manifest().entry;

        let mut files = copier::copy_template(&self.template, root).await?;
        generator::write_manifest(root, &self.template, name).await?;
        generator::write_readme(root, name).await?;
        generator::write_source_stub(root, entry).await?;

        for generated in [generator::PACKAGE_JSON, generator::README, entry.as_str()] {
            let generated = PathBuf::from(generated);
            if !files.contains(&generated) {
                files.push(generated);
            }
        }
        Ok(files)
    }

    async fn install<F>(
        &self,
        pm: &PackageManager,
        root: &Path,
        on_progress: &mut F,
    ) -> Result<(), ScaffoldError>
    where
        F: FnMut(Progress<'_>),
    {
        if let Some(version) = pm.check_version().await? {
            on_progress(Progress::VersionChecked {
                program: pm.program(),
                version: &version,
            });
        }

        for step in install_plan(self.template.manifest()) {
            let command = pm.command_line(&step);
            on_progress(Progress::Installing {
                step: &step,
                command: &command,
            });
            pm.install(&step, root).await?;
            on_progress(Progress::Installed(&step));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn template_with(deps: &str) -> (TempDir, Template) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(
            root.join("template.yaml"),
            format!("name: react\ndescription: test template\nversion: 0.1.0\n{deps}"),
        )
        .unwrap();
        fs::write(
            root.join("package.json"),
            r#"{"name": "seed", "scripts": {"dev": "webpack serve"}}"#,
        )
        .unwrap();
        fs::create_dir_all(root.join("demo")).unwrap();
        fs::write(root.join("demo/index.jsx"), "demo").unwrap();
        fs::write(root.join(".gitignore"), "node_modules\n").unwrap();

        let template = Template::load(root).unwrap();
        (tmp, template)
    }

    fn read_manifest(root: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_creates_complete_component() {
        let (_template_dir, template) = template_with("dependencies: [react]\n");
        let base = TempDir::new().unwrap();

        let component = Scaffolder::new(template)
            .with_package_manager(PackageManager::new("true"))
            .create("my-component", base.path())
            .await
            .unwrap();

        let root = base.path().join("my-component");
        assert_eq!(component.root, root);
        assert_eq!(read_manifest(&root)["name"], "my-component");
        assert_eq!(read_manifest(&root)["scripts"]["dev"], "webpack serve");
        assert!(fs::read_to_string(root.join("README.md"))
            .unwrap()
            .starts_with("# My-component"));
        assert!(root.join("src/index.jsx").is_file());
        assert!(root.join("demo/index.jsx").is_file());
        assert!(root.join(".gitignore").is_file());
        assert!(!root.join("template.yaml").exists());
        assert!(component.files.contains(&PathBuf::from("README.md")));
    }

    #[tokio::test]
    async fn test_invalid_name_creates_nothing() {
        let (_template_dir, template) = template_with("");
        let base = TempDir::new().unwrap();

        let err = Scaffolder::new(template)
            .create("Invalid/Name", base.path())
            .await
            .unwrap_err();

        assert!(err
            .naming_messages()
            .contains(&"name can only contain URL-friendly characters"));
        assert_eq!(fs::read_dir(base.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_dot_scoped_name_stays_inside_base() {
        let (_template_dir, template) = template_with("");
        let workspace = TempDir::new().unwrap();
        let base = workspace.path().join("work");
        fs::create_dir(&base).unwrap();

        for name in ["@scope/..", "@scope/."] {
            let err = Scaffolder::new(template.clone())
                .create(name, &base)
                .await
                .unwrap_err();
            assert!(matches!(err, ScaffoldError::InvalidName { .. }), "{name}");
        }
        assert_eq!(fs::read_dir(&base).unwrap().count(), 0);
        assert_eq!(fs::read_dir(workspace.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_existing_directory_is_left_alone() {
        let (_template_dir, template) = template_with("");
        let base = TempDir::new().unwrap();
        let existing = base.path().join("my-component");
        fs::create_dir(&existing).unwrap();
        fs::write(existing.join("notes.txt"), "keep").unwrap();

        let err = Scaffolder::new(template)
            .with_package_manager(PackageManager::new("true"))
            .create("my-component", base.path())
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::DirectoryExists { .. }));
        assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
        assert_eq!(fs::read_to_string(existing.join("notes.txt")).unwrap(), "keep");
    }

    #[tokio::test]
    async fn test_failed_install_rolls_back() {
        let (_template_dir, template) = template_with("dependencies: [react]\n");
        let base = TempDir::new().unwrap();
        let mut rolled_back = None;

        let err = Scaffolder::new(template)
            .with_package_manager(PackageManager::new("false"))
            .create_with("my-component", base.path(), |event| {
                if let Progress::RolledBack(path) = event {
                    rolled_back = Some(path.to_path_buf());
                }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::InstallFailed { .. }));
        assert!(!base.path().join("my-component").exists());
        assert_eq!(rolled_back, Some(base.path().join("my-component")));
    }

    #[tokio::test]
    async fn test_missing_package_manager_rolls_back() {
        let (_template_dir, template) = template_with("");
        let base = TempDir::new().unwrap();

        let pm = PackageManager::new("definitely-not-a-package-manager")
            .with_min_version(Version::new(3, 0, 0));
        let err = Scaffolder::new(template)
            .with_package_manager(pm)
            .create("my-component", base.path())
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::PackageManagerMissing { .. }));
        assert!(!base.path().join("my-component").exists());
    }

    #[tokio::test]
    async fn test_bare_install_runs_single_step() {
        let (_template_dir, template) = template_with("");
        let base = TempDir::new().unwrap();
        let mut commands = Vec::new();

        Scaffolder::new(template)
            .with_package_manager(PackageManager::new("true"))
            .create_with("bare", base.path(), |event| {
                if let Progress::Installing { command, .. } = event {
                    commands.push(command.to_string());
                }
            })
            .await
            .unwrap();

        assert_eq!(commands, vec!["true install"]);
    }

    #[tokio::test]
    async fn test_without_package_manager_install_is_skipped() {
        let (_template_dir, template) = template_with("dependencies: [react]\n");
        let base = TempDir::new().unwrap();
        let mut skipped = false;

        Scaffolder::new(template)
            .create_with("offline", base.path(), |event| {
                if matches!(event, Progress::InstallSkipped) {
                    skipped = true;
                }
            })
            .await
            .unwrap();

        assert!(skipped);
        assert!(base.path().join("offline/package.json").is_file());
    }

    #[tokio::test]
    async fn test_manifest_is_identical_across_runs() {
        let (_template_dir, template) = template_with("");
        let scaffolder = Scaffolder::new(template);
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();

        scaffolder.create("twice", first.path()).await.unwrap();
        scaffolder.create("twice", second.path()).await.unwrap();

        assert_eq!(
            fs::read_to_string(first.path().join("twice/package.json")).unwrap(),
            fs::read_to_string(second.path().join("twice/package.json")).unwrap()
        );
    }

    #[tokio::test]
    async fn test_scoped_name_nests_directory() {
        let (_template_dir, template) = template_with("");
        let base = TempDir::new().unwrap();

        let component = Scaffolder::new(template)
            .create("@scrc/button", base.path())
            .await
            .unwrap();

        assert_eq!(component.root, base.path().join("@scrc/button"));
        assert_eq!(read_manifest(&component.root)["name"], "@scrc/button");
    }
}
