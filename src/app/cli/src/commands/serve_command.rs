// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use blob_store::BlobStoreFixture;

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ServeCommand {
    fixture: BlobStoreFixture,
}

impl ServeCommand {
    pub fn new(fixture: BlobStoreFixture) -> Self {
        Self { fixture }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for ServeCommand {
    async fn run(&self) -> Result<(), CLIError> {
        let exit = self.fixture.run().await?;

        if exit.success() {
            Ok(())
        } else {
            Err(CLIError::ServerExited { code: exit.code })
        }
    }
}
