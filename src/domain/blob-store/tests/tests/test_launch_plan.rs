// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::ffi::OsString;
use std::path::PathBuf;

use blob_store::*;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_default_launch_plan() {
    let plan = LaunchPlan::new(&FixtureConfig::default(), "/usr/local/bin/minio");

    assert_eq!(plan.process.program, PathBuf::from("/usr/local/bin/minio"));
    assert_eq!(plan.process.args, vec!["server", "--quiet", ".blob_store"]);
    assert_eq!(
        plan.process.environment_vars,
        vec![
            (
                "MINIO_ROOT_USER".to_owned(),
                "the-extensions-admin".to_owned()
            ),
            (
                "MINIO_ROOT_PASSWORD".to_owned(),
                "the-extensions-admin-password".to_owned()
            ),
        ]
    );
    assert_eq!(plan.layout, StoreLayout::new(".blob_store", REQUIRED_BUCKETS));
}

#[test]
fn test_launch_plan_with_server_overrides() {
    let config = FixtureConfig {
        root_dir: PathBuf::from("/data/store"),
        server: ServerConfig {
            quiet: false,
            address: Some("127.0.0.1:9100".to_owned()),
            console_address: Some(":9101".to_owned()),
            ..ServerConfig::default()
        },
        ..FixtureConfig::default()
    };

    let plan = LaunchPlan::new(&config, "minio");

    assert_eq!(
        plan.process.args,
        vec![
            "server",
            "--address",
            "127.0.0.1:9100",
            "--console-address",
            ":9101",
            "/data/store"
        ]
    );
}

#[test]
fn test_command_carries_fixed_credentials() {
    let plan = LaunchPlan::new(&FixtureConfig::default(), "minio");
    let cmd = plan.process.to_command();

    let envs: Vec<(OsString, Option<OsString>)> = cmd
        .get_envs()
        .map(|(k, v)| (k.to_owned(), v.map(ToOwned::to_owned)))
        .collect();

    assert!(envs.contains(&(
        OsString::from(ROOT_USER_ENV_VAR),
        Some(OsString::from(FIXTURE_ACCESS_KEY))
    )));
    assert!(envs.contains(&(
        OsString::from(ROOT_PASSWORD_ENV_VAR),
        Some(OsString::from(FIXTURE_SECRET_KEY))
    )));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
