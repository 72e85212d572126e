//! The check model.
//!
//! This module provides:
//! - [`Value`] - three-state, type-preserving values
//! - [`CheckKind`] - the closed set of probe kinds
//! - [`Check`] - a validated probe description
//! - [`CheckResult`] - the typed outcome of a probe, and the result-file format

pub mod check;
pub mod kind;
pub mod result;
pub mod value;

pub use check::{Check, Language};
pub use kind::CheckKind;
pub use result::{parse_results, read_results, results_to_json, write_results, CheckResult};
pub use value::Value;
