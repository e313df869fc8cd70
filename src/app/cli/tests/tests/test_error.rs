// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use blob_store::{ConfigError, FixtureConfigFile, FixtureError, ProvisionError};
use blob_store_cli::CLIError;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_fixture_errors_map_to_exit_codes() {
    let err: CLIError = FixtureError::BinaryNotFound {
        binary: "minio".to_owned(),
    }
    .into();
    assert!(matches!(err, CLIError::PreconditionFailed { .. }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(err.to_string(), "minio not found. Run script/bootstrap");

    let err: CLIError = FixtureError::from(ConfigError::invalid("bad bucket")).into();
    assert!(matches!(err, CLIError::UsageError { .. }));
    assert_eq!(err.exit_code(), 2);

    let err: CLIError =
        FixtureError::from(ProvisionError::not_a_directory(std::path::Path::new("x"))).into();
    assert!(matches!(err, CLIError::Failure { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_server_exit_code() {
    assert_eq!(CLIError::ServerExited { code: 7 }.exit_code(), 7);
    assert_eq!(CLIError::ServerExited { code: 143 }.exit_code(), 143);
}

#[test]
fn test_pretty_includes_causes_when_detailed() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
    let err: CLIError =
        FixtureError::from(ProvisionError::create_dir(std::path::Path::new("root"), io_err)).into();

    let short = console::strip_ansi_codes(&err.pretty(false)).into_owned();
    assert_eq!(short, "Error: Failed to create directory root");

    let detailed = console::strip_ansi_codes(&err.pretty(true)).into_owned();
    assert!(detailed.contains("Caused by: access denied"), "{detailed}");
    assert_eq!(detailed.matches("access denied").count(), 1, "{detailed}");
}

#[test]
fn test_pretty_prints_config_parse_error_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".blobstore.yaml");
    std::fs::write(&path, "rootDir: [unclosed\n").unwrap();

    let err = CLIError::usage_error_from(FixtureConfigFile::read(&path).unwrap_err());

    let short = console::strip_ansi_codes(&err.pretty(false)).into_owned();
    assert!(short.starts_with("Error: Failed to parse config file "), "{short}");

    let detailed = console::strip_ansi_codes(&err.pretty(true)).into_owned();
    assert!(!detailed.contains("Caused by:"), "{detailed}");
    assert_eq!(detailed.lines().next(), short.lines().next());
}

#[test]
fn test_usage_error_message() {
    let err = CLIError::usage_error("Specify an endpoint");
    assert_eq!(err.to_string(), "Specify an endpoint");
    assert_eq!(err.exit_code(), 2);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
