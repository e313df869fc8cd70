// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use blob_store::{Credentials, ROOT_PASSWORD_ENV_VAR, ROOT_USER_ENV_VAR};

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const AWS_ACCESS_KEY_ID_ENV_VAR: &str = "AWS_ACCESS_KEY_ID";
const AWS_SECRET_ACCESS_KEY_ENV_VAR: &str = "AWS_SECRET_ACCESS_KEY";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct EnvCommand {
    credentials: Credentials,
    export: bool,
}

impl EnvCommand {
    pub fn new(credentials: Credentials, export: bool) -> Self {
        Self {
            credentials,
            export,
        }
    }

    /// The server pair followed by the same values under the names S3 clients
    /// read
    pub fn variables(&self) -> [(&'static str, &str); 4] {
        [
            (ROOT_USER_ENV_VAR, self.credentials.access_key.as_str()),
            (ROOT_PASSWORD_ENV_VAR, self.credentials.secret_key.as_str()),
            (AWS_ACCESS_KEY_ID_ENV_VAR, self.credentials.access_key.as_str()),
            (AWS_SECRET_ACCESS_KEY_ENV_VAR, self.credentials.secret_key.as_str()),
        ]
    }
}

#[async_trait::async_trait(?Send)]
impl Command for EnvCommand {
    async fn run(&self) -> Result<(), CLIError> {
        let prefix = if self.export { "export " } else { "" };
        for (name, value) in self.variables() {
            println!("{prefix}{name}={value}");
        }
        Ok(())
    }
}
