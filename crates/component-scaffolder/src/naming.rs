//! Package-name validation following the npm naming rules
//!
//! Mirrors the checks npm applies when publishing: a name is usable for a new
//! package only when it produces neither errors nor warnings.

use std::fmt;

/// Names npm refuses outright
const BLACKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Node core modules; shadowing one is only a warning
const CORE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

const MAX_LENGTH: usize = 214;

/// Result of checking a candidate name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameValidation {
    /// Violations that make the name unusable for any package
    pub errors: Vec<String>,
    /// Violations tolerated for old packages but not for new ones
    pub warnings: Vec<String>,
}

impl NameValidation {
    pub fn valid_for_new_packages(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn valid_for_old_packages(&self) -> bool {
        self.errors.is_empty()
    }

    /// All messages, errors first
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .map(String::as_str)
    }
}

/// Check a name against the npm package naming rules
pub fn validate(name: &str) -> NameValidation {
    let mut result = NameValidation::default();
    let lower = name.to_lowercase();

    if name.is_empty() {
        result
            .errors
            .push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        result
            .errors
            .push("name cannot start with a period".to_string());
    }
    if scoped_parts(name).is_some_and(|(_, pkg)| pkg.starts_with('.')) {
        result
            .errors
            .push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        result
            .errors
            .push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        result
            .errors
            .push("name cannot contain leading or trailing spaces".to_string());
    }
    if let Some(blocked) = BLACKLIST.iter().find(|b| **b == lower) {
        result.errors.push(format!("{} is a blacklisted name", blocked));
    }

    if let Some(core) = CORE_MODULES.iter().find(|m| **m == lower) {
        result.warnings.push(format!("{} is a core module name", core));
    }
    if name.chars().count() > MAX_LENGTH {
        result.warnings.push(format!(
            "name can no longer contain more than {} characters",
            MAX_LENGTH
        ));
    }
    if lower != name {
        result
            .warnings
            .push("name can no longer contain capital letters".to_string());
    }
    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.contains(|c: char| matches!(c, '~' | '\'' | '!' | '(' | ')' | '*')) {
        result.warnings.push(
            "name can no longer contain special characters (\"~'!()*\")".to_string(),
        );
    }

    if !is_url_friendly(name) {
        let scoped_ok = scoped_parts(name)
            .is_some_and(|(scope, pkg)| is_url_friendly(scope) && is_url_friendly(pkg));
        if !scoped_ok {
            result
                .errors
                .push("name can only contain URL-friendly characters".to_string());
        }
    }

    result
}

/// True when percent-encoding the string as a URI component leaves it unchanged
fn is_url_friendly(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
    })
}

/// Split `@scope/name` into its parts
fn scoped_parts(name: &str) -> Option<(&str, &str)> {
    let rest = name.strip_prefix('@')?;
    let (scope, pkg) = rest.split_once('/')?;
    if scope.is_empty() || pkg.is_empty() || pkg.contains('/') {
        return None;
    }
    Some((scope, pkg))
}

/// A name accepted for a new package. Cannot be changed once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName(String);

impl ComponentName {
    /// Accept `name` only if it is valid for new packages
    pub fn parse(name: &str) -> Result<Self, NameValidation> {
        let validation = validate(name);
        if validation.valid_for_new_packages() {
            Ok(Self(name.to_string()))
        } else {
            Err(validation)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with its first character upper-cased, used as the README heading
    pub fn title(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
