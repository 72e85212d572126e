//! Built-in package metadata names.
//!
//! `PACKAGE_NAME`, `PACKAGE_VERSION`, `PACKAGE_STRING`, `PACKAGE_BUGREPORT`,
//! `PACKAGE_URL` and `PACKAGE_TARNAME` are filled from configured defaults
//! unless an explicit result already provides them.

use std::collections::HashSet;

use crate::checks::CheckResult;

pub const PACKAGE_NAME: &str = "PACKAGE_NAME";
pub const PACKAGE_VERSION: &str = "PACKAGE_VERSION";
pub const PACKAGE_STRING: &str = "PACKAGE_STRING";
pub const PACKAGE_BUGREPORT: &str = "PACKAGE_BUGREPORT";
pub const PACKAGE_URL: &str = "PACKAGE_URL";
pub const PACKAGE_TARNAME: &str = "PACKAGE_TARNAME";

/// Configured package metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub bugreport: Option<String>,
    pub url: Option<String>,
    pub tarname: Option<String>,
}

impl PackageInfo {
    /// Default text for every builtin, in a fixed order.
    pub fn defaults(&self) -> Vec<(&'static str, String)> {
        let name = self.name.clone().unwrap_or_default();
        let version = self.version.clone().unwrap_or_default();
        let string = match (name.is_empty(), version.is_empty()) {
            (false, false) => format!("{} {}", name, version),
            (false, true) => name.clone(),
            (true, _) => version.clone(),
        };
        let tarname = self
            .tarname
            .clone()
            .unwrap_or_else(|| derive_tarname(&name));

        vec![
            (PACKAGE_NAME, name),
            (PACKAGE_VERSION, version),
            (PACKAGE_STRING, string),
            (PACKAGE_BUGREPORT, self.bugreport.clone().unwrap_or_default()),
            (PACKAGE_URL, self.url.clone().unwrap_or_default()),
            (PACKAGE_TARNAME, tarname),
        ]
    }

    /// Builtins not provided by any of `explicit`, by define or subst name.
    pub fn undrained<'a>(
        &self,
        explicit: impl IntoIterator<Item = &'a CheckResult>,
    ) -> Vec<(&'static str, String)> {
        let provided: HashSet<&str> = explicit
            .into_iter()
            .flat_map(|result| [result.define_name(), result.subst_name()])
            .collect();

        self.defaults()
            .into_iter()
            .filter(|(name, _)| !provided.contains(name))
            .collect()
    }
}

/// Lowercased name with every non-alphanumeric character mapped to `-`.
pub fn derive_tarname(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Quote text as a C string literal.
pub fn c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
