// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// How control is passed to the server process once it is ready to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandoverMode {
    /// Replace the current process image with the server (Unix only)
    Exec,
    /// Spawn the server as a child, forward termination signals to it and exit
    /// with its status
    Supervise,
}

impl HandoverMode {
    pub fn is_supported(self) -> bool {
        match self {
            HandoverMode::Exec => cfg!(unix),
            HandoverMode::Supervise => true,
        }
    }
}

impl Default for HandoverMode {
    fn default() -> Self {
        if cfg!(unix) {
            HandoverMode::Exec
        } else {
            HandoverMode::Supervise
        }
    }
}

impl std::fmt::Display for HandoverMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandoverMode::Exec => "exec",
            HandoverMode::Supervise => "supervise",
        };
        write!(f, "{s}")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
