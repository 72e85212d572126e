//! Check descriptions.
//!
//! A [`Check`] is parsed once from JSON and never changes afterwards.
//! Parsing validates the kind-specific required fields so that a malformed
//! description fails loudly instead of producing a silent "not found".

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value as Json;

use crate::condition::Expression;
use crate::error::{ProbeError, Result};

use super::{CheckKind, Value};

/// Source language of a test program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    C,
    Cpp,
}

impl Language {
    /// File extension used for test sources.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::C => f.write_str("c"),
            Self::Cpp => f.write_str("cpp"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "c" => Ok(Self::C),
            "cpp" | "c++" => Ok(Self::Cpp),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

/// Wire form of a check, before validation.
#[derive(Debug, Deserialize)]
struct CheckSpec {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    define: Option<String>,
    subst: Option<String>,
    language: Option<String>,
    code: Option<String>,
    file_path: Option<PathBuf>,
    library: Option<String>,
    define_value: Option<Json>,
    define_value_fail: Option<Json>,
    #[serde(default)]
    requires: Vec<String>,
    condition: Option<String>,
    #[serde(default)]
    compile_defines: Vec<String>,
    #[serde(default)]
    unquote: bool,
}

/// A single declarative configuration probe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Check {
    pub kind: CheckKind,
    /// Probe subject or cache-variable identifier. Keys the result file.
    pub name: String,
    /// Output macro name. Falls back to `name`.
    pub define: Option<String>,
    /// Output template variable name.
    pub subst: Option<String>,
    pub language: Language,
    pub code: Option<String>,
    pub file_path: Option<PathBuf>,
    pub library: Option<String>,
    pub define_value: Option<Value>,
    pub define_value_fail: Option<Value>,
    pub requires: Vec<String>,
    pub condition: Option<String>,
    pub compile_defines: Vec<String>,
    pub unquote: bool,
}

impl Check {
    /// Parse and validate a check from its JSON description.
    pub fn from_json(json: Json) -> Result<Self> {
        let label = json
            .get("name")
            .and_then(Json::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        let spec: CheckSpec =
            serde_json::from_value(json).map_err(|e| ProbeError::InvalidCheck {
                check: label.clone(),
                message: e.to_string(),
            })?;

        let invalid = |message: String| ProbeError::InvalidCheck {
            check: spec.name.clone(),
            message,
        };

        let kind: CheckKind = spec.kind.parse()?;
        let language = match &spec.language {
            Some(language) => language.parse().map_err(invalid)?,
            None => Language::default(),
        };
        let define_value = spec
            .define_value
            .as_ref()
            .map(literal_value)
            .transpose()
            .map_err(invalid)?;
        let define_value_fail = spec
            .define_value_fail
            .as_ref()
            .map(literal_value)
            .transpose()
            .map_err(invalid)?;

        let check = Check {
            kind,
            name: spec.name,
            define: spec.define,
            subst: spec.subst,
            language,
            code: spec.code,
            file_path: spec.file_path,
            library: spec.library,
            define_value,
            define_value_fail,
            requires: spec.requires,
            condition: spec.condition,
            compile_defines: spec.compile_defines,
            unquote: spec.unquote,
        };
        check.validate()?;
        Ok(check)
    }

    /// Load a check description from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_json_file(path)?;
        Self::from_json(content)
    }

    /// Enforce the kind-specific required fields.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| ProbeError::InvalidCheck {
            check: self.name.clone(),
            message: message.to_string(),
        };

        if self.name.is_empty() {
            return Err(invalid("'name' must not be empty"));
        }
        if self.kind.requires_code() && self.code.is_none() {
            return Err(invalid(&format!(
                "'code' is required for {} checks",
                self.kind
            )));
        }
        if self.kind.requires_source() && self.code.is_none() && self.file_path.is_none() {
            return Err(invalid(&format!(
                "'code' or 'file_path' is required for {} checks",
                self.kind
            )));
        }
        if self.kind == CheckKind::Lib && self.library.is_none() {
            return Err(invalid("'library' is required for lib checks"));
        }

        for expression in self.requires.iter().chain(self.condition.iter()) {
            Expression::parse(expression)?;
        }
        Ok(())
    }

    /// Macro name this check defines.
    pub fn define_name(&self) -> &str {
        self.define.as_deref().unwrap_or(&self.name)
    }

    /// Whether the result feeds the define bucket.
    pub fn is_define(&self) -> bool {
        self.kind.is_define()
    }

    /// Whether the result feeds the subst bucket.
    pub fn is_subst(&self) -> bool {
        self.subst.is_some()
    }
}

/// Convert a `define_value` field to a [`Value`].
fn literal_value(json: &Json) -> std::result::Result<Value, String> {
    match json {
        Json::String(text) => Ok(Value::from_literal(text)),
        Json::Number(_) | Json::Bool(_) => Ok(Value::Present(json.clone())),
        Json::Null => Ok(Value::Absent),
        _ => Err(format!("unsupported define value: {}", json)),
    }
}

/// Read and parse a JSON file, mapping failures to config errors.
pub(crate) fn read_json_file(path: &Path) -> Result<Json> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProbeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProbeError::ReadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
    })?;
    serde_json::from_str(&content).map_err(|e| ProbeError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
