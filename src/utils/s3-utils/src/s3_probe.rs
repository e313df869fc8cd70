// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;
use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;

use crate::S3Endpoint;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const CREDENTIALS_PROVIDER_NAME: &str = "local-blob-store";
const OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Talks to an S3-compatible server with static credentials and answers
/// whether it is up and serving the expected buckets
#[derive(Clone)]
pub struct S3Probe {
    client: Client,
    endpoint: S3Endpoint,
}

impl S3Probe {
    #[tracing::instrument(level = "debug", name = "init_s3_probe", skip_all, fields(url = %endpoint.url))]
    pub async fn new(endpoint: S3Endpoint) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(endpoint.region.clone()))
            .credentials_provider(Credentials::new(
                &endpoint.access_key,
                &endpoint.secret_key,
                None,
                None,
                CREDENTIALS_PROVIDER_NAME,
            ))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(OPERATION_TIMEOUT)
                    .build(),
            )
            .load()
            .await;

        // Local servers only understand path-style addressing
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .endpoint_url(&endpoint.url)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &S3Endpoint {
        &self.endpoint
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn list_buckets(&self) -> Result<Vec<String>, ProbeError> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| ProbeError::request(&self.endpoint.url, &DisplayErrorContext(e)))?;

        let mut names: Vec<String> = output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(ToOwned::to_owned))
            .collect();
        names.sort();

        Ok(names)
    }

    pub async fn check_buckets<S: AsRef<str>>(
        &self,
        expected: &[S],
    ) -> Result<ProbeReport, ProbeError> {
        let found = self.list_buckets().await?;

        let present: BTreeSet<&str> = found.iter().map(String::as_str).collect();
        let missing = expected
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !present.contains(name))
            .map(ToOwned::to_owned)
            .collect();

        let report = ProbeReport {
            endpoint: self.endpoint.url.clone(),
            found,
            missing,
        };

        tracing::debug!(?report, "Probed storage server");
        Ok(report)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub endpoint: String,
    /// Every bucket the server reported, sorted by name
    pub found: Vec<String>,
    /// Expected buckets the server did not report, in the order they were
    /// asked for
    pub missing: Vec<String>,
}

impl ProbeReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },
}

impl ProbeError {
    pub fn invalid_endpoint(endpoint: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: reason.to_string(),
        }
    }

    pub fn request(endpoint: &str, err: &impl std::fmt::Display) -> Self {
        Self::Request {
            endpoint: endpoint.to_owned(),
            message: err.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
