//! docify-ci entry point.

use std::process::ExitCode;

use clap::Parser;
use docify_ci::cli::{Cli, CommandDispatcher};
use docify_ci::ui::{ConsoleUI, DocifyTheme, OutputMode, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("docify_ci=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docify_ci=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("docify-ci starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    let mut ui = if cli.no_color {
        console::set_colors_enabled(false);
        ConsoleUI::with_theme(output_mode, DocifyTheme::plain())
    } else {
        ConsoleUI::new(output_mode)
    };

    let project_root = cli
        .root
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let dispatcher = CommandDispatcher::new(project_root).with_config_path(cli.config.clone());

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
