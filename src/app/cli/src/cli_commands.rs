// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use blob_store::{
    BlobStoreFixture,
    Credentials,
    FixtureConfig,
    FixtureConfigFile,
    ServerConfigFile,
};
use process_runtime::{HandoverMode, PathLocator, ProcessLauncher};

use crate::cli;
use crate::commands::*;
use crate::error::CLIError;
use crate::load_config;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn get_command(args: cli::Cli, working_dir: &Path) -> Result<Box<dyn Command>, CLIError> {
    let cli::Cli {
        quiet,
        config: config_path,
        root_dir,
        command,
        ..
    } = args;

    // Flags form the top configuration layer, over the config file and defaults
    let mut overrides = FixtureConfigFile {
        root_dir,
        ..Default::default()
    };
    let load = |overrides| load_config(overrides, config_path.as_deref(), working_dir);

    let command: Box<dyn Command> =
        match command.unwrap_or_else(|| cli::Command::Serve(cli::Serve::default())) {
            cli::Command::Serve(c) => {
                overrides.server = ServerConfigFile {
                    binary: c.server_binary,
                    address: c.address,
                    console_address: c.console_address,
                    handover: c.supervise.then_some(HandoverMode::Supervise),
                    ..Default::default()
                };
                Box::new(ServeCommand::new(build_fixture(load(overrides)?)))
            }

            cli::Command::Provision(c) => {
                overrides.server.binary = c.server_binary;
                Box::new(ProvisionCommand::new(build_fixture(load(overrides)?), quiet))
            }

            cli::Command::Check(c) => {
                let config = load(overrides)?;
                config.validate().map_err(CLIError::usage_error_from)?;
                Box::new(CheckCommand::new(
                    c.endpoint.unwrap_or_else(|| config.server.endpoint_url()),
                    config.credentials.clone(),
                    config.bucket_names(),
                    (c.wait > 0).then_some(Duration::from_secs(c.wait)),
                    quiet,
                ))
            }

            // Credentials are fixed, so the config file is not consulted
            cli::Command::Env(c) => Box::new(EnvCommand::new(Credentials::default(), c.export)),

            cli::Command::Completions(c) => Box::new(CompletionsCommand::new(c.shell)),
        };

    Ok(command)
}

fn build_fixture(config: FixtureConfig) -> BlobStoreFixture {
    let launcher = ProcessLauncher::new(config.server.handover);
    BlobStoreFixture::new(config, Arc::new(PathLocator::from_env()), Arc::new(launcher))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
