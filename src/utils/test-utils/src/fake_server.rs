// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Name of the file a fake server writes its invocation to, relative to its
/// working directory
pub const FAKE_SERVER_RECORD: &str = "server-invocation.txt";

/// Created by a long-running fake server once its signal traps are installed
pub const FAKE_SERVER_READY: &str = "server-ready.txt";

/// Holds the name of the signal a long-running fake server was stopped by
pub const FAKE_SERVER_SIGNAL: &str = "server-signal.txt";

/// Writes an executable shell script named `name` into `dir` that records
/// its arguments and credential variables, then exits with `exit_code`.
///
/// The record has one argument per line, then a `--` line, then the user and
/// password values.
#[cfg(unix)]
pub fn write_fake_server(dir: &Path, name: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt as _;

    let script = indoc::formatdoc!(
        r#"
        #!/bin/sh
        {{
          for arg in "$@"; do
            printf '%s\n' "$arg"
          done
          printf -- '--\n'
          printf '%s\n' "$MINIO_ROOT_USER" "$MINIO_ROOT_PASSWORD"
        }} > "{record}"
        exit {exit_code}
        "#,
        record = FAKE_SERVER_RECORD,
    );

    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Writes an executable shell script named `name` into `dir` that runs until
/// it receives `TERM` or `INT`. It then records the signal as `term` or `int`
/// in [`FAKE_SERVER_SIGNAL`] and exits with `exit_code`.
#[cfg(unix)]
pub fn write_long_running_fake_server(dir: &Path, name: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt as _;

    let script = indoc::formatdoc!(
        r#"
        #!/bin/sh
        PATH="$PATH:/bin:/usr/bin"
        trap 'printf "term\n" > "{signal}"; exit {exit_code}' TERM
        trap 'printf "int\n" > "{signal}"; exit {exit_code}' INT
        : > "{ready}"
        while :; do
          sleep 0.1
        done
        "#,
        signal = FAKE_SERVER_SIGNAL,
        ready = FAKE_SERVER_READY,
    );

    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeServerRecord {
    pub args: Vec<String>,
    pub root_user: String,
    pub root_password: String,
}

/// Reads what a fake server recorded when it ran in `working_dir`
pub fn read_fake_server_record(working_dir: &Path) -> Option<FakeServerRecord> {
    let data = std::fs::read_to_string(working_dir.join(FAKE_SERVER_RECORD)).ok()?;
    let mut lines = data.lines();

    let args = lines
        .by_ref()
        .take_while(|l| *l != "--")
        .map(ToOwned::to_owned)
        .collect();
    let root_user = lines.next()?.to_owned();
    let root_password = lines.next()?.to_owned();

    Some(FakeServerRecord {
        args,
        root_user,
        root_password,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
