// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use process_runtime::ProcessSpec;

use crate::{FixtureConfig, ROOT_PASSWORD_ENV_VAR, ROOT_USER_ENV_VAR, StoreLayout};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Everything needed to start the storage server over a provisioned layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub layout: StoreLayout,
    pub process: ProcessSpec,
}

impl LaunchPlan {
    pub fn new(config: &FixtureConfig, binary: impl Into<PathBuf>) -> Self {
        let server = &config.server;

        let mut process = ProcessSpec::new(binary).arg("server");
        if server.quiet {
            process = process.arg("--quiet");
        }
        if let Some(address) = &server.address {
            process = process.args(["--address", address.as_str()]);
        }
        if let Some(console_address) = &server.console_address {
            process = process.args(["--console-address", console_address.as_str()]);
        }

        let process = process
            .arg(config.root_dir.as_os_str())
            .env(ROOT_USER_ENV_VAR, config.credentials.access_key.as_str())
            .env(ROOT_PASSWORD_ENV_VAR, config.credentials.secret_key.as_str());

        Self {
            layout: StoreLayout::for_config(config),
            process,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
