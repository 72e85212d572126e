//! Check execution.
//!
//! This module provides:
//! - [`CheckRunner`], the per-check gate / condition / policy state machine
//! - [`Policy`] and the kind-specific [`ProbePolicy`] implementations
//! - default test programs and the `#define` preamble
//! - dependency loading ([`Dependencies`]) and the `check` entry point
//!
//! # Example
//!
//! ```
//! use probeconf::checks::{Check, CheckKind};
//! use probeconf::condition::ResultIndex;
//! use probeconf::runner::CheckRunner;
//! use probeconf::toolchain::ScriptedToolchain;
//! use probeconf::ui::MockUI;
//!
//! let toolchain = ScriptedToolchain::new().accept("<stdio.h>");
//! let mut ui = MockUI::new();
//! let mut runner = CheckRunner::new(&toolchain, ResultIndex::new(), &mut ui);
//!
//! let check = Check {
//!     kind: CheckKind::Header,
//!     name: "stdio.h".to_string(),
//!     define: Some("HAVE_STDIO_H".to_string()),
//!     ..Default::default()
//! };
//! let result = runner.run(&check).unwrap();
//! assert!(result.success);
//! ```

pub mod check_runner;
pub mod checker;
pub mod dependencies;
pub mod policy;
pub mod preamble;
pub mod programs;

pub use check_runner::CheckRunner;
pub use checker::{run_checks, CheckRequest};
pub use dependencies::{Dependencies, DependencySpec};
pub use policy::{Policy, Probe, ProbePolicy};
