// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;
use std::sync::Arc;

use process_runtime::{BinaryLocator, HandoverError, ServerExit, ServerLauncher};
use thiserror::Error;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct PreparedFixture {
    pub plan: LaunchPlan,
    pub report: ProvisionReport,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Brings up the local blob store in two phases: the precondition check with
/// provisioning, then the handover to the server process.
pub struct BlobStoreFixture {
    config: FixtureConfig,
    locator: Arc<dyn BinaryLocator>,
    launcher: Arc<dyn ServerLauncher>,
}

impl BlobStoreFixture {
    pub fn new(
        config: FixtureConfig,
        locator: Arc<dyn BinaryLocator>,
        launcher: Arc<dyn ServerLauncher>,
    ) -> Self {
        Self {
            config,
            locator,
            launcher,
        }
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    pub fn locate_server(&self) -> Result<PathBuf, FixtureError> {
        let binary = &self.config.server.binary;
        match self.locator.locate(binary) {
            Some(path) => {
                tracing::debug!(binary, path = %path.display(), "Located server binary");
                Ok(path)
            }
            None => Err(FixtureError::BinaryNotFound {
                binary: binary.clone(),
            }),
        }
    }

    /// Fails before touching the filesystem if the server binary is missing
    pub fn prepare(&self) -> Result<PreparedFixture, FixtureError> {
        let binary = self.locate_server()?;
        self.config.validate()?;

        let layout = StoreLayout::for_config(&self.config);
        let report = provision(&layout)?;

        Ok(PreparedFixture {
            plan: LaunchPlan::new(&self.config, binary),
            report,
        })
    }

    /// With the exec handover this only returns on failure
    pub async fn run(&self) -> Result<ServerExit, FixtureError> {
        let PreparedFixture { plan, .. } = self.prepare()?;

        let exit = self.launcher.launch(&plan.process).await?;
        Ok(exit)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("{binary} not found. Run {hint}", hint = BOOTSTRAP_HINT)]
    BinaryNotFound { binary: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    #[error(transparent)]
    Handover(#[from] HandoverError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
