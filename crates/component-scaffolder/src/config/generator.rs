//! Generated component files: package manifest, README and source stub

use crate::naming::ComponentName;
use crate::templates::Template;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

pub const PACKAGE_JSON: &str = "package.json";
pub const README: &str = "README.md";

const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_DESCRIPTION: &str = "add some description about this component";
const DEFAULT_LICENSE: &str = "MIT";

/// Boilerplate written to the template's entry path
pub const SOURCE_STUB: &str = r#"import React from 'react';

export default class Component extends React.Component {
  render() {
    const { className, children } = this.props;
    return <div className={className}>{children}</div>;
  }
}
"#;

/// The `package.json` written into every component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "empty_object")]
    pub repository: Value,

    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    #[serde(default = "default_license")]
    pub license: String,

    /// Anything else the seed carries, such as `scripts`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn default_keywords() -> Vec<String> {
    vec!["react".to_string()]
}

fn default_license() -> String {
    DEFAULT_LICENSE.to_string()
}

impl Default for PackageManifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: default_version(),
            description: default_description(),
            repository: empty_object(),
            keywords: default_keywords(),
            license: default_license(),
            extra: Map::new(),
        }
    }
}

impl PackageManifest {
    /// Seed from the template's `package.json`, or the built-in default when it has none
    pub fn seed(template: &Template) -> Result<Self> {
        match template.file(PACKAGE_JSON) {
            Some(content) => serde_json::from_slice(content)
                .with_context(|| format!("Failed to parse the template's {}", PACKAGE_JSON)),
            None => Ok(Self::default()),
        }
    }

    /// The seed with its name replaced by the component name
    pub fn for_component(mut self, name: &ComponentName) -> Self {
        self.name = name.as_str().to_string();
        self
    }

    /// Pretty JSON with a trailing newline
    pub fn render(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("Failed to serialize package.json")?;
        json.push('\n');
        Ok(json)
    }
}

/// README with the component title and placeholder sections
pub fn render_readme(name: &ComponentName) -> String {
    format!(
        "# {}\n\
         \n\
         ## When to use\n\
         \n\
         Describe the scenarios this component is designed for.\n\
         \n\
         ## Demo\n\
         \n\
         The example in `demo/index.jsx` is rendered here.\n\
         \n\
         ## API\n\
         \n\
         | Property | Description | Type | Default |\n\
         | -------- | ----------- | ---- | ------- |\n",
        name.title()
    )
}

/// Write `package.json` into `root`
pub async fn write_manifest(
    root: &Path,
    template: &Template,
    name: &ComponentName,
) -> Result<PackageManifest> {
    let manifest = PackageManifest::seed(template)?.for_component(name);
    let path = root.join(PACKAGE_JSON);
    fs::write(&path, manifest.render()?)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(manifest)
}

/// Write `README.md` into `root`
pub async fn write_readme(root: &Path, name: &ComponentName) -> Result<()> {
    let path = root.join(README);
    fs::write(&path, render_readme(name))
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Write the source stub at `entry` below `root`
pub async fn write_source_stub(root: &Path, entry: &str) -> Result<()> {
    let path = root.join(entry);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&path, SOURCE_STUB)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateFile;
    use tempfile::TempDir;

    const MANIFEST: &str = "name: t\ndescription: d\nversion: 0.1.0\n";

    fn name(s: &str) -> ComponentName {
        ComponentName::parse(s).unwrap()
    }

    fn template_with_seed(seed: &str) -> Template {
        Template::from_files(MANIFEST, vec![TemplateFile::new(PACKAGE_JSON, seed)]).unwrap()
    }

    #[test]
    fn test_default_seed() {
        let template = Template::from_files(MANIFEST, Vec::new()).unwrap();
        let manifest = PackageManifest::seed(&template).unwrap();
        assert_eq!(manifest, PackageManifest::default());
    }

    #[test]
    fn test_seed_overrides_name_and_keeps_extra_keys() {
        let template = template_with_seed(
            r#"{"name": "template", "description": "seeded", "scripts": {"dev": "webpack"}}"#,
        );

        let manifest = PackageManifest::seed(&template)
            .unwrap()
            .for_component(&name("my-component"));

        assert_eq!(manifest.name, "my-component");
        assert_eq!(manifest.description, "seeded");
        assert_eq!(manifest.version, "1.0.0");
        assert_eq!(manifest.extra["scripts"]["dev"], "webpack");
    }

    #[test]
    fn test_invalid_seed_is_an_error() {
        let template = template_with_seed("{ not json");
        assert!(PackageManifest::seed(&template).is_err());
    }

    #[tokio::test]
    async fn test_write_manifest() {
        let tmp = TempDir::new().unwrap();
        let template = template_with_seed(r#"{"name": "seed"}"#);

        write_manifest(tmp.path(), &template, &name("my-component"))
            .await
            .unwrap();

        let written = std::fs::read_to_string(tmp.path().join(PACKAGE_JSON)).unwrap();
        let value: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["name"], "my-component");
        assert_eq!(value["license"], "MIT");
    }

    #[test]
    fn test_render_fields() {
        let rendered = PackageManifest::default()
            .for_component(&name("my-component"))
            .render()
            .unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["name"], "my-component");
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["repository"], serde_json::json!({}));
        assert_eq!(value["keywords"], serde_json::json!(["react"]));
        assert_eq!(value["license"], "MIT");
        assert!(rendered.starts_with("{\n  \"name\": \"my-component\""));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_readme_heading() {
        let readme = render_readme(&name("my-component"));
        assert!(readme.starts_with("# My-component\n"));
        assert!(readme.contains("## Demo"));
        assert!(readme.contains("## API"));
    }

    #[tokio::test]
    async fn test_source_stub_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        write_source_stub(tmp.path(), "src/index.jsx").await.unwrap();
        let written = std::fs::read_to_string(tmp.path().join("src/index.jsx")).unwrap();
        assert_eq!(written, SOURCE_STUB);
    }
}
