// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};
use std::sync::Arc;
use std::time::Duration;

use blob_store::{BlobStoreFixture, Credentials, DEFAULT_SERVER_BINARY, FixtureConfig, ServerConfig};
use process_runtime::{BinaryLocator, HandoverMode, PathLocator, ProcessLauncher};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Real storage server provisioned through [`BlobStoreFixture`] and running
/// as a child of the test process on loopback ports. Killed on drop.
pub struct LocalMinioServer {
    pub root_dir: PathBuf,
    pub address: String,
    pub endpoint: String,
    pub credentials: Credentials,
    process: Child,
}

impl LocalMinioServer {
    pub const BINARY: &str = DEFAULT_SERVER_BINARY;
    const STARTUP_TIMEOUT: Duration = Duration::from_secs(20);

    /// Tests that need a real server skip themselves when this is false
    pub fn is_available() -> bool {
        PathLocator::from_env().locate(Self::BINARY).is_some()
    }

    pub async fn new(root_dir: &Path) -> Self {
        let (port, console_port) = free_port_pair();
        let address = format!("127.0.0.1:{port}");

        let config = FixtureConfig {
            root_dir: root_dir.to_path_buf(),
            server: ServerConfig {
                address: Some(address.clone()),
                console_address: Some(format!("127.0.0.1:{console_port}")),
                handover: HandoverMode::Supervise,
                ..Default::default()
            },
            ..Default::default()
        };
        let endpoint = config.server.endpoint_url();
        let credentials = config.credentials.clone();

        let fixture = BlobStoreFixture::new(
            config,
            Arc::new(PathLocator::from_env()),
            Arc::new(ProcessLauncher::new(HandoverMode::Supervise)),
        );
        let prepared = fixture.prepare().unwrap();

        let process = prepared
            .plan
            .process
            .to_command()
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let server = Self {
            root_dir: root_dir.to_path_buf(),
            address,
            endpoint,
            credentials,
            process,
        };

        process_runtime::wait_for_socket(&server.address, Self::STARTUP_TIMEOUT)
            .await
            .unwrap();

        tracing::info!(address = %server.address, "Local storage server is up");
        server
    }
}

impl Drop for LocalMinioServer {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Both listeners are held at once so the two ports differ
pub fn free_port_pair() -> (u16, u16) {
    let a = TcpListener::bind("127.0.0.1:0").unwrap();
    let b = TcpListener::bind("127.0.0.1:0").unwrap();
    (
        a.local_addr().unwrap().port(),
        b.local_addr().unwrap().port(),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
