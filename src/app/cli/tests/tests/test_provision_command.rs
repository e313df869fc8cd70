// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use pretty_assertions::assert_eq;

use super::harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_provision_reports_layout() {
    let harness = CliHarness::with_fake_server(0);

    let assert = harness.command().arg("provision").assert().success();
    assert_eq!(
        stdout_of(assert.get_output()),
        lines_of(&[
            ".blob_store (created)",
            ".blob_store/the-extensions-bucket (created)",
            ".blob_store/zed-crash-reports (created)",
        ])
    );

    let assert = harness.command().arg("provision").assert().success();
    assert_eq!(
        stdout_of(assert.get_output()),
        lines_of(&[
            ".blob_store (exists)",
            ".blob_store/the-extensions-bucket (exists)",
            ".blob_store/zed-crash-reports (exists)",
        ])
    );

    assert_eq!(
        list_dir(&harness.root_dir()),
        vec!["the-extensions-bucket", "zed-crash-reports"]
    );
    // Server is never started
    assert_eq!(test_utils::read_fake_server_record(&harness.work_dir), None);
}

#[test_log::test]
fn test_provision_keeps_existing_content() {
    let harness = CliHarness::with_fake_server(0);
    let bucket_dir = harness.root_dir().join("the-extensions-bucket");
    std::fs::create_dir_all(&bucket_dir).unwrap();
    std::fs::write(bucket_dir.join("object"), b"payload").unwrap();
    std::fs::create_dir(harness.root_dir().join("other-bucket")).unwrap();

    harness.command().args(["provision", "-q"]).assert().success().stdout("");

    assert_eq!(std::fs::read(bucket_dir.join("object")).unwrap(), b"payload");
    assert_eq!(
        list_dir(&harness.root_dir()),
        vec!["other-bucket", "the-extensions-bucket", "zed-crash-reports"]
    );
}

#[test_log::test]
fn test_provision_requires_binary() {
    let harness = CliHarness::new();

    let assert = harness.command().arg("provision").assert().code(1);

    assert!(stderr_of(assert.get_output()).contains("minio not found. Run script/bootstrap"));
    assert!(!harness.root_dir().exists());
}

#[cfg(unix)]
#[test_log::test]
fn test_verbose_with_non_utf8_root_dir() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt as _;

    let harness = CliHarness::with_fake_server(0);
    let root_dir = OsStr::from_bytes(b"store-\xff");

    harness
        .command()
        .args(["-v", "provision", "-q", "--root-dir"])
        .arg(root_dir)
        .assert()
        .success();

    assert_eq!(
        list_dir(&harness.work_dir.join(root_dir)),
        vec!["the-extensions-bucket", "zed-crash-reports"]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn lines_of(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{l}\n")).collect()
}
