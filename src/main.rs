//! liftlog CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use liftlog::cli::{Cli, CommandDispatcher};
use liftlog::config::load_config;
use liftlog::error::EXIT_USER_ERROR;
use liftlog::ui::{create_ui, OutputMode, UserInterface};
use liftlog::{LiftlogError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so command output stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("liftlog=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("liftlog=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn run(cli: &Cli, ui: &mut dyn UserInterface) -> Result<i32> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let config = load_config(&data_dir, cli.config.as_deref())?;
    tracing::debug!("Using data directory {:?}", config.data_dir);

    let dispatcher = CommandDispatcher::new(config);
    Ok(dispatcher.dispatch(cli, ui)?.exit_code)
}

fn report(ui: &mut dyn UserInterface, e: &LiftlogError) {
    ui.error(&format!("Error: {}", e));
    if let Some(hint) = e.hint() {
        ui.warning(hint);
    }
}

fn main() -> ExitCode {
    // Usage errors exit 1 like other user errors; help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USER_ERROR as u8)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.debug);

    tracing::debug!("liftlog starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);
    let mut ui = create_ui(!cli.non_interactive, output_mode, !cli.no_color);

    match run(&cli, ui.as_mut()) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            report(ui.as_mut(), &e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
