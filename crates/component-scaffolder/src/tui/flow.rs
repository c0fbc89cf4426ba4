//! The interactive create flow

use super::report;
use crate::error::ScaffoldError;
use crate::naming;
use crate::product::ProductConfig;
use crate::runtime::{check, PackageManager};
use crate::scaffold::{Progress, Scaffolder};
use crate::templates::TemplateSource;
use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Component name, also the directory created in the working directory
    pub name: String,

    /// Local directory to use for the template instead of the bundled one
    pub template_dir: Option<PathBuf>,

    /// Create the files without running the package manager
    pub skip_install: bool,

    /// Directory to create the component in, defaults to the working directory
    pub base_dir: Option<PathBuf>,
}

/// Forwards pipeline events to a printer and keeps the first output error
struct ProgressReporter<P> {
    print: P,
    error: Option<io::Error>,
}

impl<P> ProgressReporter<P>
where
    P: FnMut(&Progress<'_>) -> io::Result<()>,
{
    fn new(print: P) -> Self {
        Self { print, error: None }
    }

    fn observe(&mut self, event: Progress<'_>) {
        if let Err(e) = (self.print)(&event) {
            self.error.get_or_insert(e);
        }
    }

    fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Create one component, reporting as it goes.
///
/// Scaffolding failures are reported here and turned into a failing exit
/// code. Only terminal I/O errors come back as `Err`, including one raised
/// while printing progress.
pub async fn run<C: ProductConfig>(
    config: &C,
    args: CreateArgs,
    cli_version: &str,
) -> Result<ExitCode> {
    cliclack::intro(format!("{} v{}", config.display_name(), cli_version))?;

    let validation = naming::validate(&args.name);
    if !validation.valid_for_new_packages() {
        report::failure(&ScaffoldError::InvalidName {
            name: args.name,
            validation,
        })?;
        return Ok(ExitCode::FAILURE);
    }

    let source = TemplateSource::resolve(config, args.template_dir.clone());
    let template = match source.load(config) {
        Ok(template) => template,
        Err(e) => {
            report::failure(&ScaffoldError::Template(e))?;
            return Ok(ExitCode::FAILURE);
        }
    };
    report::template(&source, &template)?;

    let mut scaffolder = Scaffolder::new(template);
    if args.skip_install {
        cliclack::log::info("Skipping runtime check")?;
    } else {
        if let Some(min_major) = config.min_node_major() {
            match check::require_node(min_major) {
                Ok(node) => cliclack::log::success(format!(
                    "{} installed ({})",
                    node.name,
                    node.version.as_deref().unwrap_or("unknown")
                ))?,
                Err(e) => {
                    cliclack::log::error(format!("{}", e))?;
                    cliclack::outro_cancel("The component was not created")?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        let pm = PackageManager::from_parts(
            config.package_manager(),
            config.min_package_manager_version(),
        )?;
        scaffolder = scaffolder.with_package_manager(pm);
    }

    let base_dir = match args.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let mut reporter = ProgressReporter::new(report::progress);
    let result = scaffolder
        .create_with(&args.name, &base_dir, |event| reporter.observe(event))
        .await;
    reporter.finish()?;

    match result {
        Ok(component) => {
            report::success(config, &component)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report::failure(&e)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
