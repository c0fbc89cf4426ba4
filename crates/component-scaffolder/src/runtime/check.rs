//! Runtime detection for Node.js

use anyhow::Result;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    let output = Command::new("node").arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name: "Node.js",
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: "Node.js",
            version: None,
            available: false,
        },
    }
}

/// Major version from `node --version` output such as `v18.17.1`
pub fn node_major(version: &str) -> Option<u64> {
    let trimmed = version.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    cleaned.split('.').next()?.parse().ok()
}

/// Fail unless Node.js is installed with at least `min_major`
pub fn require_node(min_major: u64) -> Result<RuntimeInfo> {
    let node = check_node();
    ensure_node(&node, min_major)?;
    Ok(node)
}

fn ensure_node(node: &RuntimeInfo, min_major: u64) -> Result<()> {
    let Some(version) = node.version.as_deref().filter(|_| node.available) else {
        anyhow::bail!(
            "Missing required runtime:\n  - Node.js {} or higher (install from https://nodejs.org)",
            min_major
        );
    };

    match node_major(version) {
        Some(major) if major >= min_major => Ok(()),
        Some(_) => anyhow::bail!(
            "You are running Node {}.\n\
             Components require Node {} or higher. Please update your version of Node.",
            version,
            min_major
        ),
        None => anyhow::bail!("Could not read the Node.js version from '{}'", version),
    }
}
