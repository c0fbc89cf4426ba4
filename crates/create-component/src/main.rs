//! create-component CLI - Scaffolding for standalone React components

use anyhow::Result;
use clap::Parser;
use component_scaffolder::tui::{print_usage, CreateArgs};
use component_scaffolder::ProductConfig;
use include_dir::{include_dir, Dir};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The React component template, compiled into the binary
static BUNDLED_TEMPLATE: Dir<'static> =
    include_dir!("$CARGO_MANIFEST_DIR/templates/react-component");

/// React component product configuration
#[derive(Clone)]
pub struct ComponentConfig;

impl ProductConfig for ComponentConfig {
    fn name(&self) -> &'static str {
        "create-component"
    }

    fn display_name(&self) -> &'static str {
        "create-component"
    }

    fn bundled_template(&self) -> &'static Dir<'static> {
        &BUNDLED_TEMPLATE
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_COMPONENT_TEMPLATE_DIR"
    }

    fn min_package_manager_version(&self) -> Option<&'static str> {
        Some("3.0.0")
    }

    fn min_node_major(&self) -> Option<u64> {
        Some(8)
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        steps.push("npm run dev      start the demo server".to_string());
        steps.push("npm test         run the component tests".to_string());
        steps.push("npm publish      publish the component".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-component")]
#[command(about = "CLI for scaffolding standalone React component packages")]
#[command(version)]
#[command(override_usage = "create-component <component-name> [options]")]
pub struct Args {
    /// Name of the component; also the directory created for it
    #[arg(value_name = "component-name")]
    pub name: Option<String>,

    /// Local directory to use for the template instead of the bundled one (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Create the files without installing dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let result = run_cli(Args::parse()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

/// Create the requested component, or print usage when no name was given
async fn run_cli(args: Args) -> Result<ExitCode> {
    let config = ComponentConfig;

    let Some(name) = args.name else {
        print_usage(&config);
        return Ok(ExitCode::FAILURE);
    };

    let create_args = CreateArgs {
        name,
        template_dir: args.template_dir,
        skip_install: args.skip_install,
        ..CreateArgs::default()
    };
    component_scaffolder::run(&config, create_args, CLI_VERSION).await
}
