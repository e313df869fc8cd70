// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::TcpListener;

use blob_store::{CRASH_REPORTS_BUCKET, EXTENSIONS_BUCKET, FIXTURE_ACCESS_KEY, FIXTURE_SECRET_KEY};
use s3_utils::{ProbeError, S3Endpoint, S3Probe};
use test_utils::LocalMinioServer;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_probe_unreachable_endpoint() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}");

    let probe = S3Probe::new(S3Endpoint::new(&url, FIXTURE_ACCESS_KEY, FIXTURE_SECRET_KEY)).await;
    let res = probe.check_buckets(&[EXTENSIONS_BUCKET]).await;

    assert!(
        matches!(res, Err(ProbeError::Request { ref endpoint, .. }) if *endpoint == url),
        "{res:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_group::group(minio)]
#[test_log::test(tokio::test)]
async fn test_probe_provisioned_server() {
    if !LocalMinioServer::is_available() {
        tracing::warn!("Storage server binary is not installed, skipping");
        return;
    }

    let temp_dir = tempfile::tempdir().unwrap();
    let server = LocalMinioServer::new(&temp_dir.path().join(".blob_store")).await;

    let probe = S3Probe::new(S3Endpoint::new(
        &server.endpoint,
        &server.credentials.access_key,
        &server.credentials.secret_key,
    ))
    .await;

    let report = probe
        .check_buckets(&[EXTENSIONS_BUCKET, CRASH_REPORTS_BUCKET])
        .await
        .unwrap();
    assert!(report.is_complete(), "{report:?}");
    assert_eq!(
        report.found,
        vec![EXTENSIONS_BUCKET.to_owned(), CRASH_REPORTS_BUCKET.to_owned()]
    );

    let report = probe
        .check_buckets(&[EXTENSIONS_BUCKET, "not-provisioned"])
        .await
        .unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.missing, vec!["not-provisioned".to_owned()]);
}

#[test_group::group(minio)]
#[test_log::test(tokio::test)]
async fn test_probe_rejects_wrong_credentials() {
    if !LocalMinioServer::is_available() {
        tracing::warn!("Storage server binary is not installed, skipping");
        return;
    }

    let temp_dir = tempfile::tempdir().unwrap();
    let server = LocalMinioServer::new(&temp_dir.path().join(".blob_store")).await;

    let probe = S3Probe::new(S3Endpoint::new(&server.endpoint, "intruder", "wrong-password")).await;

    assert!(matches!(
        probe.list_buckets().await,
        Err(ProbeError::Request { .. })
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
