//! Toolchain configuration.
//!
//! Loaded from a JSON file that names the compilers, their flags, and
//! optionally a batch of checks to run:
//!
//! ```json
//! {
//!     "c_compiler": "/usr/bin/cc",
//!     "cpp_compiler": "/usr/bin/c++",
//!     "c_flags": ["-O2", "-Werror"],
//!     "c_link_flags": ["-lm"],
//!     "compiler_type": "gcc",
//!     "checks": []
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value as Json;

use crate::checks::check::read_json_file;
use crate::checks::{Check, Language};
use crate::error::{ProbeError, Result};

use super::flags::filter_error_flags;

fn default_compiler_type() -> String {
    "gcc".to_string()
}

/// Compiler paths, flags and batch checks.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainConfig {
    pub c_compiler: String,
    pub cpp_compiler: String,
    #[serde(default)]
    pub c_flags: Vec<String>,
    #[serde(default)]
    pub cpp_flags: Vec<String>,
    #[serde(default)]
    pub c_link_flags: Vec<String>,
    #[serde(default)]
    pub cpp_link_flags: Vec<String>,
    /// Separate link tool. Required for MSVC, optional otherwise.
    #[serde(default)]
    pub linker: Option<String>,
    /// `gcc`, `clang`, or anything starting with `msvc`.
    #[serde(default = "default_compiler_type")]
    pub compiler_type: String,
    /// Per-command timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub checks: Vec<Json>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            c_compiler: "cc".to_string(),
            cpp_compiler: "c++".to_string(),
            c_flags: Vec::new(),
            cpp_flags: Vec::new(),
            c_link_flags: Vec::new(),
            cpp_link_flags: Vec::new(),
            linker: None,
            compiler_type: default_compiler_type(),
            timeout_secs: None,
            checks: Vec::new(),
        }
    }
}

impl ToolchainConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = read_json_file(path)?;
        serde_json::from_value(json).map_err(|e| ProbeError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Whether command lines use MSVC syntax.
    pub fn is_msvc(&self) -> bool {
        self.compiler_type.starts_with("msvc")
    }

    pub fn compiler(&self, language: Language) -> &str {
        match language {
            Language::C => &self.c_compiler,
            Language::Cpp => &self.cpp_compiler,
        }
    }

    /// Compile flags for `language`, without warning-escalating flags.
    pub fn compile_flags(&self, language: Language) -> Vec<String> {
        match language {
            Language::C => filter_error_flags(&self.c_flags),
            Language::Cpp => filter_error_flags(&self.cpp_flags),
        }
    }

    /// Link flags for `language`, without warning-escalating flags.
    pub fn link_flags(&self, language: Language) -> Vec<String> {
        match language {
            Language::C => filter_error_flags(&self.c_link_flags),
            Language::Cpp => filter_error_flags(&self.cpp_link_flags),
        }
    }

    /// Tool used for the link step.
    pub fn link_tool(&self, language: Language) -> &str {
        match self.linker.as_deref() {
            Some(linker) if !linker.is_empty() => linker,
            _ => self.compiler(language),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parse the batch `checks` array.
    pub fn checks(&self) -> Result<Vec<Check>> {
        self.checks.iter().cloned().map(Check::from_json).collect()
    }
}
