//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// probeconf - Autoconf-style configuration probing.
#[derive(Debug, Parser)]
#[command(name = "probeconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show one "checking X... yes|no" line per check
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide status output; errors are still shown
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run checks and write a result file
    Check(CheckArgs),

    /// Render a header or text template from result files
    Resolve(ResolveArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Toolchain configuration (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// Check description (JSON); runs the config's `checks` when omitted
    #[arg(long, value_name = "FILE")]
    pub check: Option<PathBuf>,

    /// Result file to write
    #[arg(long, value_name = "FILE")]
    pub results: PathBuf,

    /// Dependency result file, as NAME=PATH or PATH (repeatable)
    #[arg(long = "dep", value_name = "[NAME=]PATH")]
    pub deps: Vec<String>,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Template containing `#undef NAME` and `@NAME@` markers
    #[arg(long, value_name = "FILE")]
    pub template: PathBuf,

    /// Rendered output file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Lookup-only result file (repeatable)
    #[arg(long, value_name = "FILE")]
    pub cache_result: Vec<PathBuf>,

    /// Result file rendered through `#undef` lines (repeatable)
    #[arg(long, value_name = "FILE")]
    pub define_result: Vec<PathBuf>,

    /// Result file rendered through `@NAME@` placeholders (repeatable)
    #[arg(long, value_name = "FILE")]
    pub subst_result: Vec<PathBuf>,

    /// Replace SEARCH with the contents of FILE (repeatable)
    #[arg(long, num_args = 2, value_names = ["SEARCH", "FILE"])]
    pub inline: Vec<String>,

    /// Replace SEARCH with VALUE (repeatable)
    #[arg(long, num_args = 2, value_names = ["SEARCH", "VALUE"])]
    pub subst: Vec<String>,

    /// Buckets to render: defines, subst or all
    #[arg(long, default_value = "all")]
    pub mode: String,

    /// Default for PACKAGE_NAME
    #[arg(long)]
    pub package_name: Option<String>,

    /// Default for PACKAGE_VERSION
    #[arg(long)]
    pub package_version: Option<String>,

    /// Default for PACKAGE_BUGREPORT
    #[arg(long)]
    pub package_bugreport: Option<String>,

    /// Default for PACKAGE_URL
    #[arg(long)]
    pub package_url: Option<String>,

    /// Default for PACKAGE_TARNAME (derived from the name when omitted)
    #[arg(long)]
    pub package_tarname: Option<String>,
}

impl ResolveArgs {
    /// `--inline` values as `(search, file)` pairs.
    pub fn inline_pairs(&self) -> Vec<(String, PathBuf)> {
        self.inline
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), PathBuf::from(&pair[1])))
            .collect()
    }

    /// `--subst` values as `(search, value)` pairs.
    pub fn subst_pairs(&self) -> Vec<(String, String)> {
        self.subst
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check() {
        let cli = Cli::parse_from([
            "probeconf",
            "check",
            "--config",
            "tc.json",
            "--check",
            "c.json",
            "--results",
            "out.json",
            "--dep",
            "HAVE_A=a.json",
            "--dep",
            "b.json",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.deps, ["HAVE_A=a.json", "b.json"]);
        assert_eq!(args.check, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn parses_resolve_pairs() {
        let cli = Cli::parse_from([
            "probeconf",
            "-v",
            "resolve",
            "--template",
            "config.h.in",
            "-o",
            "config.h",
            "--inline",
            "/* BODY */",
            "body.h",
            "--subst",
            "@X@",
            "1",
            "--subst",
            "@Y@",
            "2",
        ]);
        assert!(cli.verbose);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.mode, "all");
        assert_eq!(
            args.inline_pairs(),
            vec![("/* BODY */".to_string(), PathBuf::from("body.h"))]
        );
        assert_eq!(
            args.subst_pairs(),
            vec![
                ("@X@".to_string(), "1".to_string()),
                ("@Y@".to_string(), "2".to_string())
            ]
        );
    }
}
