//! Error type for the scaffolding pipeline

use crate::naming::NameValidation;
use semver::Version;
use std::path::PathBuf;
use thiserror::Error;

/// Every way creating a component can fail.
///
/// All of them are terminal. Variants raised after the component directory
/// exists are only returned once that directory has been rolled back.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("could not create a component called {name} because of npm naming restrictions")]
    InvalidName {
        name: String,
        validation: NameValidation,
    },

    #[error(
        "the directory {} already exists, use a new component name or remove the existing directory",
        path.display()
    )]
    DirectoryExists { path: PathBuf },

    #[error("{name} does not name a new directory inside {}", base.display())]
    UnsafePath { name: String, base: PathBuf },

    #[error("failed to create directory {}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Template(anyhow::Error),

    #[error("failed to write component files: {0:#}")]
    Materialize(anyhow::Error),

    #[error("{program} was not found in your environment")]
    PackageManagerMissing {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read the {program} version from {output:?}")]
    PackageManagerUnreadable { program: String, output: String },

    #[error("{program} {found} is too old, version {required} or newer is required")]
    PackageManagerTooOld {
        program: String,
        found: Version,
        required: Version,
    },

    #[error("failed to run `{command}`")]
    InstallSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("the command `{command}` has failed ({})", exit_description(*code))]
    InstallFailed { command: String, code: Option<i32> },
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl ScaffoldError {
    /// Naming violations to list under the error message, if any
    pub fn naming_messages(&self) -> Vec<&str> {
        match self {
            ScaffoldError::InvalidName { validation, .. } => validation.messages().collect(),
            _ => Vec::new(),
        }
    }
}
