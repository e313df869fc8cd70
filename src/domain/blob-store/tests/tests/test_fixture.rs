// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use blob_store::*;
use pretty_assertions::assert_eq;
use process_runtime::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct StaticLocator(Option<PathBuf>);

impl BinaryLocator for StaticLocator {
    fn locate(&self, _name: &str) -> Option<PathBuf> {
        self.0.clone()
    }
}

#[derive(Default)]
struct RecordingLauncher {
    launched: Mutex<Vec<ProcessSpec>>,
}

impl RecordingLauncher {
    fn launched(&self) -> Vec<ProcessSpec> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ServerLauncher for RecordingLauncher {
    async fn launch(&self, spec: &ProcessSpec) -> Result<ServerExit, HandoverError> {
        self.launched.lock().unwrap().push(spec.clone());
        Ok(ServerExit { code: 0 })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct FixtureHarness {
    _tmp_dir: tempfile::TempDir,
    root_dir: PathBuf,
    launcher: Arc<RecordingLauncher>,
    fixture: BlobStoreFixture,
}

impl FixtureHarness {
    fn new(binary: Option<&str>) -> Self {
        let tmp_dir = tempfile::tempdir().unwrap();
        let root_dir = tmp_dir.path().join(".blob_store");
        let launcher = Arc::new(RecordingLauncher::default());

        let config = FixtureConfig {
            root_dir: root_dir.clone(),
            ..FixtureConfig::default()
        };

        let fixture = BlobStoreFixture::new(
            config,
            Arc::new(StaticLocator(binary.map(PathBuf::from))),
            launcher.clone(),
        );

        Self {
            _tmp_dir: tmp_dir,
            root_dir,
            launcher,
            fixture,
        }
    }

    fn bucket_dirs(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.root_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_run_provisions_then_hands_over() {
    let harness = FixtureHarness::new(Some("/opt/bin/minio"));

    let exit = harness.fixture.run().await.unwrap();

    assert!(exit.success());
    assert_eq!(
        harness.bucket_dirs(),
        vec!["the-extensions-bucket", "zed-crash-reports"]
    );

    let launched = harness.launcher.launched();
    assert_eq!(launched.len(), 1);

    let spec = &launched[0];
    assert_eq!(spec.program, Path::new("/opt/bin/minio"));
    assert_eq!(
        spec.args,
        vec![
            "server".into(),
            "--quiet".into(),
            harness.root_dir.clone().into_os_string()
        ]
    );
    assert_eq!(spec.get_env(ROOT_USER_ENV_VAR), Some("the-extensions-admin"));
    assert_eq!(
        spec.get_env(ROOT_PASSWORD_ENV_VAR),
        Some("the-extensions-admin-password")
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_binary_fails_without_side_effects() {
    let harness = FixtureHarness::new(None);

    let err = harness.fixture.run().await.unwrap_err();

    assert!(
        matches!(&err, FixtureError::BinaryNotFound { binary } if binary == "minio"),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.to_string(), "minio not found. Run script/bootstrap");
    assert!(!harness.root_dir.exists());
    assert!(harness.launcher.launched().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_run_twice_over_same_root() {
    let harness = FixtureHarness::new(Some("minio"));

    harness.fixture.run().await.unwrap();
    let first = harness.bucket_dirs();

    harness.fixture.run().await.unwrap();

    assert_eq!(harness.bucket_dirs(), first);
    assert_eq!(harness.launcher.launched().len(), 2);
}

#[test_log::test]
fn test_prepare_reports_layout() {
    let harness = FixtureHarness::new(Some("minio"));

    let prepared = harness.fixture.prepare().unwrap();

    assert_eq!(prepared.report.created.len(), 3);
    assert_eq!(prepared.plan.layout.root_dir, harness.root_dir);
    assert!(harness.launcher.launched().is_empty());

    let prepared = harness.fixture.prepare().unwrap();
    assert!(prepared.report.created.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_provisioning_failure_prevents_handover() {
    let harness = FixtureHarness::new(Some("minio"));
    std::fs::write(&harness.root_dir, b"occupied").unwrap();

    let err = harness.fixture.run().await.unwrap_err();

    assert!(
        matches!(err, FixtureError::Provision(ProvisionError::NotADirectory { .. })),
        "unexpected error: {err:?}"
    );
    assert!(harness.launcher.launched().is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
