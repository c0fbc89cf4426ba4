//! Status output for the create flow

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::scaffold::{Component, Progress};
use crate::templates::{Template, TemplateSource};
use colored::Colorize;
use std::error::Error as _;
use std::io;

const RULE: &str = "-----------------------------------------------------------";

/// Usage block printed when no component name was given
pub fn print_usage<C: ProductConfig>(config: &C) {
    let program = config.name();
    println!("{}", RULE.cyan());
    eprintln!("Please specify the component name:");
    println!("  {} {}", program.cyan(), "<component-name>".green());
    println!();
    println!("For example:");
    println!("  {} {}", program.cyan(), "my-component".green());
    println!();
    println!(
        "Run {} to get help information.",
        format!("{} --help", program).cyan()
    );
    println!("{}", RULE.cyan());
}

pub fn template(source: &TemplateSource, template: &Template) -> io::Result<()> {
    let manifest = template.manifest();
    cliclack::log::info(format!(
        "Using {}: {} - {}",
        source, manifest.name, manifest.description
    ))
}

/// Print one pipeline milestone
pub fn progress(event: &Progress<'_>) -> io::Result<()> {
    match event {
        Progress::DirectoryCreated(path) => cliclack::log::info(format!(
            "Creating a new component in {}",
            path.display().to_string().green()
        )),
        Progress::Materialized { files, .. } => {
            cliclack::log::success(format!("Wrote {} files", files))
        }
        Progress::VersionChecked { program, version } => {
            cliclack::log::success(format!("{} {} detected", program, version))
        }
        Progress::Installing { step, command } => {
            cliclack::log::step(format!("Installing {}. Wait a while.", step.kind()))?;
            println!("{} {}", "Running:".dimmed(), command.yellow());
            Ok(())
        }
        Progress::Installed(step) => {
            cliclack::log::success(format!("{} installed successfully", step.kind()))
        }
        Progress::InstallSkipped => cliclack::log::info("Skipping dependency installation"),
        Progress::RolledBack(path) => {
            cliclack::log::warning(format!("Removed {}", path.display()))
        }
        Progress::RollbackFailed(path, err) => cliclack::log::error(format!(
            "Failed to remove {}: {}\nPlease delete it manually.",
            path.display(),
            err
        )),
    }
}

/// Print the error, every naming violation and the underlying causes
pub fn failure(err: &ScaffoldError) -> io::Result<()> {
    let mut message = err.to_string();

    for violation in err.naming_messages() {
        message.push_str(&format!("\n      {}", violation.red()));
    }

    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }

    cliclack::log::error(message)?;
    cliclack::outro_cancel("The component was not created")
}

/// Print where the component lives and what to run next
pub fn success<C: ProductConfig>(config: &C, component: &Component) -> io::Result<()> {
    cliclack::log::success(format!(
        "Created {} in {}",
        component.name.as_str().green(),
        component.root.display()
    ))?;

    let steps = config.next_steps(&component.root);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step.cyan());
    }

    cliclack::outro("Happy coding!")
}
