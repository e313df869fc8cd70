// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use url::Url;

use crate::ProbeError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Region is irrelevant to a local server but the SDK refuses to sign requests
/// without one
pub const DEFAULT_REGION: &str = "us-east-1";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Endpoint {
    pub url: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
}

impl S3Endpoint {
    pub fn new(
        url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            region: DEFAULT_REGION.to_owned(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// `host:port` of the endpoint, suitable for a TCP readiness check
    pub fn socket_addr(&self) -> Result<String, ProbeError> {
        let url = Url::parse(&self.url).map_err(|e| ProbeError::invalid_endpoint(&self.url, e))?;

        match (url.scheme(), url.host_str(), url.port_or_known_default()) {
            ("http" | "https", Some(host), Some(port)) => Ok(format!("{host}:{port}")),
            _ => Err(ProbeError::invalid_endpoint(
                &self.url,
                "expected an http(s) URL with a host",
            )),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
