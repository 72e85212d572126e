//! Command-line interface for probeconf.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`response_file`] - `@FILE` argument expansion

pub mod args;
pub mod commands;
pub mod response_file;

pub use args::{CheckArgs, Cli, Commands, ResolveArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use response_file::expand_response_file;
