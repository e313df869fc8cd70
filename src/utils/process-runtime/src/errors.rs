// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::backtrace::Backtrace;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::HandoverMode;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum HandoverError {
    #[error("Failed to replace the current process with {}", program.display())]
    Exec {
        program: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[error("Failed to spawn {}", program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[error("Failed while waiting for {} to exit", program.display())]
    Wait {
        program: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[error("Failed to install termination signal handlers")]
    Signal {
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[error("Handover mode '{mode}' is not supported on this platform")]
    Unsupported { mode: HandoverMode },
}

impl HandoverError {
    pub fn exec(program: &Path, source: std::io::Error) -> Self {
        Self::Exec {
            program: program.to_path_buf(),
            source,
            backtrace: Backtrace::capture(),
        }
    }

    pub fn spawn(program: &Path, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.to_path_buf(),
            source,
            backtrace: Backtrace::capture(),
        }
    }

    pub fn wait(program: &Path, source: std::io::Error) -> Self {
        Self::Wait {
            program: program.to_path_buf(),
            source,
            backtrace: Backtrace::capture(),
        }
    }

    pub fn signal(source: std::io::Error) -> Self {
        Self::Signal {
            source,
            backtrace: Backtrace::capture(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
#[error("Timed out after {duration:?}")]
pub struct TimeoutError {
    duration: Duration,
    backtrace: Backtrace,
}

impl TimeoutError {
    pub fn new(d: Duration) -> Self {
        Self {
            duration: d,
            backtrace: Backtrace::capture(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
