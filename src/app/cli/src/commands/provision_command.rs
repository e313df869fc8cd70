// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use blob_store::BlobStoreFixture;
use console::style;

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ProvisionCommand {
    fixture: BlobStoreFixture,
    quiet: bool,
}

impl ProvisionCommand {
    pub fn new(fixture: BlobStoreFixture, quiet: bool) -> Self {
        Self { fixture, quiet }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for ProvisionCommand {
    async fn run(&self) -> Result<(), CLIError> {
        let prepared = self.fixture.prepare()?;

        if self.quiet {
            return Ok(());
        }

        let report = &prepared.report;
        for dir in report.layout.all_dirs() {
            let status = if report.was_created(&dir) {
                style("created").green()
            } else {
                style("exists").dim()
            };
            println!("{} ({status})", dir.display());
        }

        Ok(())
    }
}
