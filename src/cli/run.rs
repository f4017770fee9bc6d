//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Builds CliArgs and discovers Config
//! - Initializes logging and the tokio runtime
//! - Dispatches to command handlers
//! - Handles all error output

use anyhow::Result;
use clap::Parser;
use std::io;
use std::sync::Arc;

use launchkit_archive::FileKitArchive;
use launchkit_gateway::{HttpPreviewRenderer, HttpStageGateway};
use launchkit_utils::error::LaunchKitError;
use launchkit_utils::logging::init_tracing;

use super::args::{Cli, Commands, KitsCommands};
use super::commands::{self, RunOptions};
use crate::{CliArgs, Config, ExitCode};

/// Main CLI execution function.
///
/// Prints everything, errors included, and returns the exit code to use on
/// failure. main.rs only calls `std::process::exit(code.as_i32())`.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        gateway_url: cli.gateway_url.clone(),
        gateway_timeout_secs: cli.gateway_timeout,
        preview_url: cli.preview_url.clone(),
        state_dir: cli.state_dir.clone(),
        archive_latency_ms: cli.archive_latency_ms,
        // An absent flag must not override `logging.verbose` from the file
        verbose: cli.verbose.then_some(true),
    };

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            let err = LaunchKitError::from(err);
            eprintln!("{}", err.display_for_user());
            return Err(err.to_exit_code());
        }
    };

    if let Err(e) = init_tracing(config.verbose()) {
        eprintln!("✗ Failed to initialize logging: {e}");
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("✗ Failed to create async runtime: {e}");
            return Err(ExitCode::INTERNAL);
        }
    };

    let operation = cli.command.name();
    let result = rt.block_on(dispatch(cli.command, &config));

    match result {
        Ok(()) => Ok(()),
        Err(error) => Err(report_error(&error, operation)),
    }
}

async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Run {
            brief,
            user,
            persona,
            variant,
            picks,
            email,
            save,
            out,
        } => {
            let options = RunOptions {
                brief,
                user,
                persona,
                variant,
                picks,
                email,
                save,
                export: out,
            };
            let gateway = HttpStageGateway::from_config(config).map_err(LaunchKitError::from)?;
            let archive = FileKitArchive::from_config(config).map_err(LaunchKitError::from)?;
            commands::execute_run_command(
                &options,
                Arc::new(gateway),
                Arc::new(archive),
                &mut stdout,
            )
            .await
        }
        Commands::Kits(KitsCommands::List { user, json }) => {
            let archive = FileKitArchive::from_config(config).map_err(LaunchKitError::from)?;
            commands::execute_kits_list_command(&user, json, &archive, &mut stdout).await
        }
        Commands::Kits(KitsCommands::Show { user, kit_id }) => {
            let archive = FileKitArchive::from_config(config).map_err(LaunchKitError::from)?;
            commands::execute_kits_show_command(&user, &kit_id, &archive, &mut stdout).await
        }
        Commands::Preview { description, out } => {
            let renderer = HttpPreviewRenderer::from_config(config).map_err(LaunchKitError::from)?;
            commands::execute_preview_command(&description, &out, &renderer, &mut stdout).await
        }
        Commands::Config => commands::execute_config_command(config, &mut stdout),
    }
}

/// Print `error` for the user and pick the exit code.
///
/// Library errors keep their own message, context and suggestions; anything
/// else is reported as an internal failure of `operation`.
pub(crate) fn report_error(error: &anyhow::Error, operation: &str) -> ExitCode {
    if let Some(err) = error.downcast_ref::<LaunchKitError>() {
        eprintln!("{}", err.display_for_user());
        return err.to_exit_code();
    }

    eprintln!("✗ {operation} failed: {error:#}");
    eprintln!("\n  Run with --verbose for more detailed output");
    ExitCode::INTERNAL
}
