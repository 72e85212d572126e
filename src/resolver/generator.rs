//! Template rendering.
//!
//! [`SourceGenerator`] runs, in order: direct substitutions, inline file
//! substitutions, the `#undef` pass, the `@VAR@` pass and the final
//! whitespace cleanup.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::checks::CheckResult;
use crate::error::{ProbeError, Result};
use crate::ui::UserInterface;

use super::cleanup::{match_trailing_newline, strip_trailing_whitespace};
use super::inline::{apply_direct, apply_inline};
use super::merge::ResultBuckets;
use super::package::{c_string, PackageInfo};
use super::subst::substitute_vars;
use super::undef::{rewrite_undefs, Replacement, Unknown};

/// Which buckets are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Only `#undef` lines.
    Defines,
    /// Only `@VAR@` placeholders; `#undef`s of define results are commented.
    Subst,
    #[default]
    All,
}

impl Mode {
    fn renders_defines(self) -> bool {
        matches!(self, Self::Defines | Self::All)
    }

    fn renders_subst(self) -> bool {
        matches!(self, Self::Subst | Self::All)
    }
}

impl FromStr for Mode {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "defines" | "define" | "defines_only" => Ok(Self::Defines),
            "subst" | "subst_only" => Ok(Self::Subst),
            "all" => Ok(Self::All),
            other => Err(ProbeError::InvalidArguments {
                message: format!("unknown mode '{}' (expected defines, subst or all)", other),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Defines => "defines",
            Self::Subst => "subst",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

/// Renders a template from merged results.
#[derive(Debug, Clone, Default)]
pub struct SourceGenerator {
    buckets: ResultBuckets,
    mode: Mode,
    package: PackageInfo,
    direct: Vec<(String, String)>,
    inline: Vec<(String, PathBuf)>,
}

impl SourceGenerator {
    pub fn new(buckets: ResultBuckets, mode: Mode) -> Self {
        Self {
            buckets,
            mode,
            ..Default::default()
        }
    }

    pub fn with_package(mut self, package: PackageInfo) -> Self {
        self.package = package;
        self
    }

    /// Replace `search` with `value` before any other pass.
    pub fn with_direct(mut self, search: impl Into<String>, value: impl Into<String>) -> Self {
        self.direct.push((search.into(), value.into()));
        self
    }

    /// Replace `search` with the contents of `path` before the `#undef` pass.
    pub fn with_inline(mut self, search: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.inline.push((search.into(), path.into()));
        self
    }

    /// Render `template`.
    pub fn generate(&self, template: &str, ui: &mut dyn UserInterface) -> Result<String> {
        let mut content = apply_direct(template, &self.direct);
        content = apply_inline(&content, &self.inline)?;

        self.report(ui);
        let builtins = self.package.undrained(self.buckets.explicit());

        if self.mode.renders_defines() {
            let mut replacements = self.define_replacements();
            for (name, default) in &builtins {
                replacements
                    .entry(name.to_string())
                    .or_insert_with(|| Replacement::Define {
                        value: c_string(default),
                        unquote: false,
                    });
            }
            content = rewrite_undefs(&content, &replacements, Unknown::Comment);
        } else {
            let commented: HashMap<String, Replacement> = self
                .define_results()
                .map(|result| (result.define_name().to_string(), Replacement::Comment))
                .collect();
            content = rewrite_undefs(&content, &commented, Unknown::Keep);
        }

        if self.mode.renders_subst() {
            let mut values = self.subst_values();
            for (name, default) in builtins {
                values.entry(name.to_string()).or_insert(default);
            }
            content = substitute_vars(&content, &values);
        }

        Ok(match_trailing_newline(
            template,
            strip_trailing_whitespace(&content),
        ))
    }

    /// Render the template at `template` into `output`.
    pub fn write(&self, template: &Path, output: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        let source = fs::read_to_string(template).map_err(|e| ProbeError::ReadFailed {
            path: template.to_path_buf(),
            message: e.to_string(),
        })?;
        let rendered = self.generate(&source, ui)?;
        fs::write(output, rendered).map_err(|e| ProbeError::WriteFailed {
            path: output.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("Wrote {} ({} mode)", output.display(), self.mode);
        Ok(())
    }

    fn define_results(&self) -> impl Iterator<Item = &CheckResult> {
        self.buckets.define.iter()
    }

    fn define_replacements(&self) -> HashMap<String, Replacement> {
        let mut replacements = HashMap::new();
        for result in self.define_results() {
            replacements
                .entry(result.define_name().to_string())
                .or_insert_with(|| Replacement::for_result(result));
        }
        replacements
    }

    fn subst_values(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();
        for result in &self.buckets.subst {
            values
                .entry(result.subst_name().to_string())
                .or_insert_with(|| result.value.render_subst());
        }
        values
    }

    /// One status line per define result, sorted by define name.
    fn report(&self, ui: &mut dyn UserInterface) {
        if !self.mode.renders_defines() {
            return;
        }
        let mut results: Vec<&CheckResult> = self.define_results().collect();
        results.sort_by(|a, b| a.define_name().cmp(b.define_name()));
        for result in results {
            ui.check_status(result.define_name(), result.should_emit_define());
        }
    }
}
