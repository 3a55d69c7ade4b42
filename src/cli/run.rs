//! CLI entry point and execution
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Initializes tracing and discovers configuration
//! - Executes the provisioning workflow
//! - Handles all error output and exit-code mapping

use clap::Parser;
use std::io::{IsTerminal, Write};

use super::args::Cli;
use crate::config::{CliOverrides, Config};
use crate::error::ChartPrepError;
use crate::exit_codes::ExitCode;
use crate::logging;
use crate::naming::SystemClock;
use crate::runner::NativeRunner;
use crate::workflow::Workflow;

/// Main CLI execution function.
///
/// This function handles ALL output including errors. It returns
/// `Result<(), ExitCode>`:
/// - On success: returns `Ok(())` after printing the completion report
/// - On error: prints the user-facing error report, returns `Err(ExitCode)`
///
/// main.rs only calls `std::process::exit(code.as_i32())` on error - it does
/// NOT print.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("Warning: could not initialize logging: {e}");
    }

    match execute(&cli) {
        Ok(()) => {
            pause_for_ack(&cli);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.display_for_user());
            if matches!(err, ChartPrepError::MissingInput { .. }) {
                pause_for_ack(&cli);
            }
            Err(err.to_exit_code())
        }
    }
}

fn execute(cli: &Cli) -> Result<(), ChartPrepError> {
    let base_dir = match &cli.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let overrides = CliOverrides {
        config: cli.config.clone(),
        input_file: cli.input.clone(),
        folder_prefix: cli.prefix.clone(),
        charts_dir: cli.charts_dir.clone(),
        collaborator_program: cli.collaborator.clone(),
        timeout_seconds: cli.timeout,
        keep_original: cli.keep_original,
    };
    let config = Config::discover_from(&base_dir, &overrides)?;

    let clock = SystemClock;
    let runner = NativeRunner;
    let workflow = Workflow::new(&config, &base_dir, &clock, &runner);

    if cli.dry_run {
        let paths = workflow.plan()?;
        println!(
            "Dry run; nothing was created.\n\n  \
             Would create: {}\n  \
             Would stage:  {} -> {}\n  \
             Would run:    {} (working directory: the new folder)\n  \
             Charts would land in: {}",
            paths.project_dir.display(),
            paths.input.display(),
            paths.staged_input.display(),
            config.collaborator_program,
            paths.charts_dir.display(),
        );
        return Ok(());
    }

    let report = workflow.run()?;
    if cli.json {
        let json = report
            .to_json()
            .map_err(|e| ChartPrepError::Io(std::io::Error::other(e)))?;
        println!("{json}");
    } else {
        println!("{}", report.render_human());
    }
    Ok(())
}

// Interactive sessions get a chance to read the output before the window
// closes; scripted runs (non-TTY stdin or --no-pause) never block.
fn pause_for_ack(cli: &Cli) {
    if cli.no_pause || !std::io::stdin().is_terminal() {
        return;
    }
    eprint!("Press Enter to continue...");
    let _ = std::io::stderr().flush();
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}
