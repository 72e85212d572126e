//! Dependency result files.
//!
//! Dependencies are given as `NAME=PATH` (the file's result is also found
//! under the lookup key `NAME`) or as a bare `PATH` (each result is found
//! by its own name, define and subst).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::checks::read_results;
use crate::condition::ResultIndex;
use crate::error::{ProbeError, Result};

/// One `--dep` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySpec {
    Named { key: String, path: PathBuf },
    File(PathBuf),
}

impl DependencySpec {
    pub fn path(&self) -> &Path {
        match self {
            Self::Named { path, .. } | Self::File(path) => path,
        }
    }
}

impl FromStr for DependencySpec {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: &str| ProbeError::InvalidArguments {
            message: format!("dependency '{}': {}", s, message),
        };

        match s.split_once('=') {
            Some((key, path)) => {
                let key = key.trim();
                if key.is_empty() {
                    return Err(invalid("missing name before '='"));
                }
                if path.is_empty() {
                    return Err(invalid("missing path after '='"));
                }
                Ok(Self::Named {
                    key: key.to_string(),
                    path: PathBuf::from(path),
                })
            }
            None if s.is_empty() => Err(invalid("empty path")),
            None => Ok(Self::File(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { key, path } => write!(f, "{}={}", key, path.display()),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads dependency files into a [`ResultIndex`].
///
/// Loading the same file twice is a no-op; mapping one key to two files is
/// an error.
#[derive(Debug, Default)]
pub struct Dependencies {
    index: ResultIndex,
    keys: HashMap<String, PathBuf>,
    files: HashMap<PathBuf, Vec<usize>>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every dependency in order.
    pub fn load(specs: &[DependencySpec]) -> Result<ResultIndex> {
        let mut dependencies = Self::new();
        for spec in specs {
            dependencies.add(spec)?;
        }
        Ok(dependencies.into_index())
    }

    pub fn add(&mut self, spec: &DependencySpec) -> Result<()> {
        match spec {
            DependencySpec::Named { key, path } => {
                if let Some(existing) = self.keys.get(key) {
                    if existing == path {
                        return Ok(());
                    }
                    return Err(ProbeError::DuplicateDependency {
                        name: key.clone(),
                        existing: existing.clone(),
                        attempted: path.clone(),
                    });
                }
                let slot = self.load_file(path)?[0];
                self.index.add_key(key, slot);
                self.keys.insert(key.clone(), path.clone());
                debug!("Dependency {} -> {}", key, path.display());
            }
            DependencySpec::File(path) => {
                self.load_file(path)?;
                debug!("Dependency file {}", path.display());
            }
        }
        Ok(())
    }

    /// Slots of the file's results, loading it on first use.
    fn load_file(&mut self, path: &Path) -> Result<&[usize]> {
        if !self.files.contains_key(path) {
            let results = read_results(path)?;
            if results.is_empty() {
                return Err(ProbeError::InvalidResultFile {
                    path: path.to_path_buf(),
                    message: "no results".to_string(),
                });
            }
            let slots = results
                .into_iter()
                .map(|result| self.index.insert(result))
                .collect();
            self.files.insert(path.to_path_buf(), slots);
        }
        Ok(self.files.get(path).map(Vec::as_slice).unwrap_or_default())
    }

    pub fn into_index(self) -> ResultIndex {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{write_results, CheckResult, Value};
    use tempfile::TempDir;

    fn result_file(dir: &TempDir, file: &str, results: &[CheckResult]) -> PathBuf {
        let path = dir.path().join(file);
        write_results(&path, results).unwrap();
        path
    }

    #[test]
    fn parses_named_and_bare_specs() {
        assert_eq!(
            "HAVE_FOO=out/foo.json".parse::<DependencySpec>().unwrap(),
            DependencySpec::Named {
                key: "HAVE_FOO".into(),
                path: "out/foo.json".into()
            }
        );
        assert_eq!(
            "out/foo.json".parse::<DependencySpec>().unwrap(),
            DependencySpec::File("out/foo.json".into())
        );
        assert!("=foo.json".parse::<DependencySpec>().is_err());
        assert!("FOO=".parse::<DependencySpec>().is_err());
        assert!("".parse::<DependencySpec>().is_err());
    }

    #[test]
    fn named_dependency_registers_key() {
        let dir = TempDir::new().unwrap();
        let mut result = CheckResult::new("ac_cv_header_foo_h", Value::integer(1), true);
        result.define = Some("HAVE_FOO_H".into());
        let path = result_file(&dir, "foo.json", &[result]);

        let index = Dependencies::load(&[DependencySpec::Named {
            key: "foo".into(),
            path,
        }])
        .unwrap();

        assert!(index.get("foo").is_some());
        assert!(index.get("HAVE_FOO_H").is_some());
        assert!(index.get("ac_cv_header_foo_h").is_some());
    }

    #[test]
    fn bare_dependency_registers_every_result() {
        let dir = TempDir::new().unwrap();
        let path = result_file(
            &dir,
            "all.json",
            &[
                CheckResult::new("HAVE_A", Value::integer(1), true),
                CheckResult::new("HAVE_B", Value::integer(0), false),
            ],
        );

        let index = Dependencies::load(&[DependencySpec::File(path)]).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.get("HAVE_B").is_some());
    }

    #[test]
    fn same_file_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = result_file(&dir, "a.json", &[CheckResult::new("HAVE_A", Value::integer(1), true)]);

        let index = Dependencies::load(&[
            DependencySpec::Named {
                key: "a".into(),
                path: path.clone(),
            },
            DependencySpec::Named {
                key: "a".into(),
                path: path.clone(),
            },
            DependencySpec::File(path),
        ])
        .unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn remapping_key_is_fatal() {
        let dir = TempDir::new().unwrap();
        let a = result_file(&dir, "a.json", &[CheckResult::new("HAVE_A", Value::integer(1), true)]);
        let b = result_file(&dir, "b.json", &[CheckResult::new("HAVE_B", Value::integer(1), true)]);

        let err = Dependencies::load(&[
            DependencySpec::Named {
                key: "x".into(),
                path: a,
            },
            DependencySpec::Named {
                key: "x".into(),
                path: b,
            },
        ])
        .unwrap_err();
        assert!(matches!(err, ProbeError::DuplicateDependency { name, .. } if name == "x"));
    }

    #[test]
    fn empty_result_file_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "{}").unwrap();

        let err = Dependencies::load(&[DependencySpec::File(path)]).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidResultFile { .. }));
    }
}
