//! probeconf - Autoconf-style configuration probing.
//!
//! probeconf runs small compile/link/run probes against a C or C++
//! toolchain, records each outcome as a typed result file, and renders
//! `config.h`-style headers and `@VAR@` templates from those results.
//!
//! # Modules
//!
//! - [`checks`] - Check descriptions, values and result files
//! - [`cli`] - Command-line interface and argument parsing
//! - [`condition`] - Requirement/condition expressions and result lookup
//! - [`error`] - Error types and result aliases
//! - [`resolver`] - Result merging and template generation
//! - [`runner`] - Check execution and kind policies
//! - [`toolchain`] - Compiler invocation behind the [`toolchain::Toolchain`] trait
//! - [`ui`] - Status lines and terminal output
//!
//! # Example
//!
//! ```
//! use probeconf::checks::{CheckResult, Value};
//! use probeconf::resolver::{Mode, ResultBuckets, SourceGenerator};
//! use probeconf::ui::MockUI;
//!
//! let buckets = ResultBuckets {
//!     define: vec![
//!         CheckResult::new("HAVE_FOO", Value::integer(1), true),
//!         CheckResult::new("HAVE_FOO_BAR", Value::Absent, false),
//!     ],
//!     ..Default::default()
//! };
//! let header = SourceGenerator::new(buckets, Mode::Defines)
//!     .generate("#undef HAVE_FOO\n#undef HAVE_FOO_BAR\n", &mut MockUI::new())
//!     .unwrap();
//! assert_eq!(header, "#define HAVE_FOO 1\n/* #undef HAVE_FOO_BAR */\n");
//! ```
//!
//! For driving real compilers, see the integration tests.

pub mod checks;
pub mod cli;
pub mod condition;
pub mod error;
pub mod resolver;
pub mod runner;
pub mod toolchain;
pub mod ui;

pub use error::{ProbeError, Result};
