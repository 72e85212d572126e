//! Result merging and template generation.
//!
//! This module provides:
//! - [`merge_results`] / [`ResultBuckets`]: conflict-checked merging of
//!   result files into cache, define and subst buckets
//! - the single-pass `#undef` and `@VAR@` scanners
//! - direct and inline text substitution
//! - package metadata builtins
//! - [`SourceGenerator`], which runs every pass over a template
//!
//! # Example
//!
//! ```
//! use probeconf::checks::{CheckResult, Value};
//! use probeconf::resolver::{Mode, ResultBuckets, SourceGenerator};
//! use probeconf::ui::MockUI;
//!
//! let buckets = ResultBuckets {
//!     define: vec![CheckResult::new("HAVE_STDIO_H", Value::integer(1), true)],
//!     ..Default::default()
//! };
//! let header = SourceGenerator::new(buckets, Mode::Defines)
//!     .generate("#undef HAVE_STDIO_H\n", &mut MockUI::new())
//!     .unwrap();
//! assert_eq!(header, "#define HAVE_STDIO_H 1\n");
//! ```

pub mod cleanup;
pub mod generator;
pub mod inline;
pub mod merge;
pub mod package;
pub mod subst;
pub mod undef;

pub use generator::{Mode, SourceGenerator};
pub use merge::{load_bucket, merge_results, ResultBuckets};
pub use package::PackageInfo;
