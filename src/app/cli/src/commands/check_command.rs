// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use blob_store::Credentials;
use console::style;
use process_runtime::TimeoutError;
use s3_utils::{S3Endpoint, S3Probe};
use thiserror::Error;

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct CheckCommand {
    endpoint: S3Endpoint,
    buckets: Vec<String>,
    wait: Option<Duration>,
    quiet: bool,
}

impl CheckCommand {
    pub fn new(
        endpoint_url: String,
        credentials: Credentials,
        buckets: Vec<String>,
        wait: Option<Duration>,
        quiet: bool,
    ) -> Self {
        Self {
            endpoint: S3Endpoint::new(endpoint_url, credentials.access_key, credentials.secret_key),
            buckets,
            wait,
            quiet,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for CheckCommand {
    async fn run(&self) -> Result<(), CLIError> {
        let addr = self
            .endpoint
            .socket_addr()
            .map_err(CLIError::usage_error_from)?;

        if let Some(timeout) = self.wait {
            tracing::info!(%addr, ?timeout, "Waiting for the server to accept connections");
            process_runtime::wait_for_socket(&addr, timeout)
                .await
                .map_err(|source| {
                    CLIError::failure(ServerUnreachableError {
                        endpoint: self.endpoint.url.clone(),
                        source,
                    })
                })?;
        }

        let probe = S3Probe::new(self.endpoint.clone()).await;
        let report = probe
            .check_buckets(&self.buckets)
            .await
            .map_err(CLIError::failure)?;

        if !self.quiet {
            for bucket in &self.buckets {
                let status = if report.missing.contains(bucket) {
                    style("missing").red()
                } else {
                    style("ok").green()
                };
                println!("{bucket} ({status})");
            }
        }

        if !report.is_complete() {
            return Err(CLIError::failure(MissingBucketsError {
                endpoint: report.endpoint,
                missing: report.missing,
            }));
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
#[error("Server at {endpoint} did not accept connections")]
pub struct ServerUnreachableError {
    pub endpoint: String,
    pub source: TimeoutError,
}

#[derive(Error, Debug)]
#[error("Server at {endpoint} is missing buckets: {}", .missing.join(", "))]
pub struct MissingBucketsError {
    pub endpoint: String,
    pub missing: Vec<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
