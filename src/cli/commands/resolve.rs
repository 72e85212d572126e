//! Resolve command implementation.
//!
//! The `probeconf resolve` command merges result files and renders a
//! template through [`SourceGenerator`].

use crate::cli::args::ResolveArgs;
use crate::error::Result;
use crate::resolver::{Mode, PackageInfo, ResultBuckets, SourceGenerator};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The resolve command implementation.
pub struct ResolveCommand {
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(args: ResolveArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ResolveArgs {
        &self.args
    }

    fn package(&self) -> PackageInfo {
        PackageInfo {
            name: self.args.package_name.clone(),
            version: self.args.package_version.clone(),
            bugreport: self.args.package_bugreport.clone(),
            url: self.args.package_url.clone(),
            tarname: self.args.package_tarname.clone(),
        }
    }

    fn generator(&self) -> Result<SourceGenerator> {
        let mode: Mode = self.args.mode.parse()?;
        let buckets = ResultBuckets::load(
            &self.args.cache_result,
            &self.args.define_result,
            &self.args.subst_result,
        )?;

        let mut generator = SourceGenerator::new(buckets, mode).with_package(self.package());
        for (search, value) in self.args.subst_pairs() {
            generator = generator.with_direct(search, value);
        }
        for (search, path) in self.args.inline_pairs() {
            generator = generator.with_inline(search, path);
        }
        Ok(generator)
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let generator = self.generator()?;
        generator.write(&self.args.template, &self.args.output, ui)?;

        if ui.output_mode().shows_check_status() {
            ui.success(&format!("Wrote {}", self.args.output.display()));
        }
        Ok(CommandResult::success())
    }
}
