//! Package manager version gate and dependency installation

use crate::error::ScaffoldError;
use crate::templates::TemplateManifest;
use anyhow::Context;
use semver::Version;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// One `install` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStep {
    /// `install --save <packages>`
    Save(Vec<String>),
    /// `install --save-dev <packages>`
    SaveDev(Vec<String>),
    /// `install` of whatever the manifest already declares
    Bare,
}

impl InstallStep {
    pub fn args(&self) -> Vec<&str> {
        let mut args = vec!["install"];
        match self {
            InstallStep::Save(packages) => {
                args.push("--save");
                args.extend(packages.iter().map(String::as_str));
            }
            InstallStep::SaveDev(packages) => {
                args.push("--save-dev");
                args.extend(packages.iter().map(String::as_str));
            }
            InstallStep::Bare => {}
        }
        args
    }

    /// Which manifest section the step fills
    pub fn kind(&self) -> &'static str {
        match self {
            InstallStep::Save(_) | InstallStep::Bare => "dependencies",
            InstallStep::SaveDev(_) => "devDependencies",
        }
    }
}

/// Install steps for a template: explicit lists when it declares any, a bare install otherwise
pub fn install_plan(manifest: &TemplateManifest) -> Vec<InstallStep> {
    if manifest.uses_bare_install() {
        return vec![InstallStep::Bare];
    }

    let mut steps = Vec::new();
    if !manifest.dependencies.is_empty() {
        steps.push(InstallStep::Save(manifest.dependencies.clone()));
    }
    if !manifest.dev_dependencies.is_empty() {
        steps.push(InstallStep::SaveDev(manifest.dev_dependencies.clone()));
    }
    steps
}

/// Parse version output such as `10.2.4` or `v8.1.0`
pub fn parse_version(output: &str) -> Option<Version> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;
    let cleaned = line.strip_prefix('v').unwrap_or(line);
    Version::parse(cleaned).ok()
}

/// An external package manager found on PATH
#[derive(Debug, Clone)]
pub struct PackageManager {
    program: String,
    min_version: Option<Version>,
}

impl PackageManager {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            min_version: None,
        }
    }

    /// Require at least `version` before installing
    pub fn with_min_version(mut self, version: Version) -> Self {
        self.min_version = Some(version);
        self
    }

    /// Build from a product's program name and minimum version string
    pub fn from_parts(program: &str, min_version: Option<&str>) -> anyhow::Result<Self> {
        let mut pm = Self::new(program);
        if let Some(min) = min_version {
            let version = Version::parse(min)
                .with_context(|| format!("Invalid minimum {} version '{}'", program, min))?;
            pm = pm.with_min_version(version);
        }
        Ok(pm)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn min_version(&self) -> Option<&Version> {
        self.min_version.as_ref()
    }

    /// Run `<program> --version` and parse the answer
    pub async fn version(&self) -> Result<Version, ScaffoldError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ScaffoldError::PackageManagerMissing {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            return Err(ScaffoldError::PackageManagerUnreadable {
                program: self.program.clone(),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_version(&stdout).ok_or_else(|| ScaffoldError::PackageManagerUnreadable {
            program: self.program.clone(),
            output: stdout.trim().to_string(),
        })
    }

    /// Enforce the minimum version. Returns the detected version, or `None` when no minimum is set.
    pub async fn check_version(&self) -> Result<Option<Version>, ScaffoldError> {
        let Some(required) = &self.min_version else {
            return Ok(None);
        };

        let found = self.version().await?;
        if &found < required {
            return Err(ScaffoldError::PackageManagerTooOld {
                program: self.program.clone(),
                found,
                required: required.clone(),
            });
        }
        Ok(Some(found))
    }

    /// Command line for a step, as shown to the user
    pub fn command_line(&self, step: &InstallStep) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(step.args());
        parts.join(" ")
    }

    /// Run one install step in `dir`, inheriting stdio, and wait for it to exit
    pub async fn install(&self, step: &InstallStep, dir: &Path) -> Result<(), ScaffoldError> {
        let status = Command::new(&self.program)
            .args(step.args())
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ScaffoldError::InstallSpawn {
                command: self.command_line(step),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::InstallFailed {
                command: self.command_line(step),
                code: status.code(),
            })
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest(deps: &[&str], dev: &[&str]) -> TemplateManifest {
        TemplateManifest {
            name: "t".to_string(),
            description: "d".to_string(),
            version: "0.1.0".to_string(),
            dependencies: deps.iter().map(|s| s.to_string()).collect(),
            dev_dependencies: dev.iter().map(|s| s.to_string()).collect(),
            entry: "src/index.jsx".to_string(),
        }
    }

    #[test]
    fn test_explicit_plan() {
        let plan = install_plan(&manifest(&["react", "react-dom"], &["webpack"]));
        assert_eq!(
            plan,
            vec![
                InstallStep::Save(vec!["react".to_string(), "react-dom".to_string()]),
                InstallStep::SaveDev(vec!["webpack".to_string()]),
            ]
        );
    }

    #[test]
    fn test_empty_set_is_skipped() {
        let plan = install_plan(&manifest(&[], &["webpack"]));
        assert_eq!(plan, vec![InstallStep::SaveDev(vec!["webpack".to_string()])]);
    }

    #[test]
    fn test_bare_plan() {
        assert_eq!(install_plan(&manifest(&[], &[])), vec![InstallStep::Bare]);
    }

    #[test]
    fn test_command_line() {
        let npm = PackageManager::new("npm");
        let step = InstallStep::Save(vec!["react".to_string(), "react-dom".to_string()]);
        assert_eq!(npm.command_line(&step), "npm install --save react react-dom");
        assert_eq!(npm.command_line(&InstallStep::Bare), "npm install");
        assert_eq!(InstallStep::Bare.kind(), "dependencies");
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("10.2.4\n"), Some(Version::new(10, 2, 4)));
        assert_eq!(parse_version("v8.1.0"), Some(Version::new(8, 1, 0)));
        assert_eq!(parse_version("\n  3.0.0  \n"), Some(Version::new(3, 0, 0)));
        assert_eq!(parse_version("not a version"), None);
        assert_eq!(parse_version(""), None);
    }

    #[test]
    fn test_from_parts_rejects_bad_minimum() {
        assert!(PackageManager::from_parts("npm", Some("three")).is_err());
        let pm = PackageManager::from_parts("npm", Some("3.0.0")).unwrap();
        assert_eq!(pm.min_version(), Some(&Version::new(3, 0, 0)));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let pm = PackageManager::new("definitely-not-a-package-manager")
            .with_min_version(Version::new(3, 0, 0));
        let err = pm.check_version().await.unwrap_err();
        assert!(matches!(err, ScaffoldError::PackageManagerMissing { .. }));
    }

    #[tokio::test]
    async fn test_no_minimum_skips_version_check() {
        let pm = PackageManager::new("definitely-not-a-package-manager");
        assert!(pm.check_version().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_install_exit_status() {
        let tmp = TempDir::new().unwrap();
        let step = InstallStep::Save(vec!["react".to_string()]);

        PackageManager::new("true")
            .install(&step, tmp.path())
            .await
            .unwrap();

        let err = PackageManager::new("false")
            .install(&step, tmp.path())
            .await
            .unwrap_err();
        match err {
            ScaffoldError::InstallFailed { command, code } => {
                assert_eq!(command, "false install --save react");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
