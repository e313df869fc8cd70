// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::process::{Child, Stdio};
use std::time::Duration;

use test_utils::{LocalMinioServer, free_port_pair};

use super::harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct KillOnDrop(Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_group::group(minio)]
#[test_log::test(tokio::test)]
async fn test_fresh_store_is_served_with_fixed_credentials() {
    if !LocalMinioServer::is_available() {
        tracing::warn!("Storage server binary is not installed, skipping");
        return;
    }

    let harness = CliHarness::new();
    let (port, console_port) = free_port_pair();
    let address = format!("127.0.0.1:{port}");

    // The server replaces the CLI process, so this handle ends up owning it
    let server = std::process::Command::new(assert_cmd::cargo::cargo_bin("local-blob-store"))
        .current_dir(&harness.work_dir)
        .args(["serve", "--address", &address])
        .arg("--console-address")
        .arg(format!("127.0.0.1:{console_port}"))
        .env("MINIO_ROOT_USER", "host-user")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let _server = KillOnDrop(server);

    process_runtime::wait_for_socket(&address, Duration::from_secs(20))
        .await
        .unwrap();

    pretty_assertions::assert_eq!(
        list_dir(&harness.root_dir()),
        vec!["the-extensions-bucket", "zed-crash-reports"]
    );

    let endpoint = format!("http://{address}");
    let assert = assert_cmd::Command::cargo_bin("local-blob-store")
        .unwrap()
        .current_dir(&harness.work_dir)
        .args(["check", "--endpoint", &endpoint, "--wait", "10"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(
        stdout_of(assert.get_output()),
        "the-extensions-bucket (ok)\nzed-crash-reports (ok)\n"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
