// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;
use std::process::ExitCode;

use blob_store::{FixtureConfig, FixtureConfigFile};

use crate::cli::Cli;
use crate::cli_commands;
use crate::error::*;
use crate::output::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "local-blob-store";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Runs the parsed command line to completion and picks the process exit code
pub fn entry_point(args: Cli) -> ExitCode {
    let output_config = OutputConfig::from_args(&args);

    if let Err(err) = observability::logging::configure_logging(&output_config.logging_config()) {
        eprintln!("Failed to initialize logging: {err}");
    }
    observability::panic_handler::set_hook_trace_panics(true);

    let result = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(run(args)),
        Err(err) => Err(CLIError::failure(err)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.pretty(output_config.verbosity_level > 0));
            exit_code_for(&err)
        }
    }
}

pub async fn run(args: Cli) -> Result<(), CLIError> {
    tracing::info!(
        version = VERSION,
        args = ?std::env::args_os().collect::<Vec<_>>(),
        "Initializing {BINARY_NAME}"
    );

    let working_dir = std::env::current_dir().map_err(CLIError::failure)?;

    let result = match cli_commands::get_command(args, &working_dir) {
        Ok(command) => command.run().await,
        Err(e) => Err(e),
    };

    match &result {
        Ok(()) => {
            tracing::info!("Command successful");
        }
        Err(err) => {
            tracing::error!(
                error_dbg = ?err,
                error = %err.pretty(true),
                "Command failed",
            );
        }
    }

    result
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Layers `overrides` over the config file and the defaults
pub fn load_config(
    overrides: FixtureConfigFile,
    config_path: Option<&Path>,
    working_dir: &Path,
) -> Result<FixtureConfig, CLIError> {
    let config = FixtureConfig::load(overrides, config_path, working_dir)
        .map_err(CLIError::usage_error_from)?;

    tracing::debug!(?config, "Resolved configuration");
    Ok(config)
}

fn exit_code_for(err: &CLIError) -> ExitCode {
    // Codes outside of the portable range collapse into a generic failure
    u8::try_from(err.exit_code())
        .ok()
        .filter(|code| *code != 0)
        .map_or(ExitCode::FAILURE, ExitCode::from)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
