//! probeconf CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use probeconf::cli::{expand_response_file, Cli, CommandDispatcher};
use probeconf::ui::{OutputMode, TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("probeconf=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("probeconf=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = match expand_response_file(std::env::args().collect()) {
        Ok(args) => args,
        Err(e) => {
            TerminalUI::new(OutputMode::Normal).error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let cli = Cli::parse_from(args);
    init_tracing(cli.debug);

    tracing::debug!("probeconf starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);
    let mut ui = TerminalUI::new(output_mode);

    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
