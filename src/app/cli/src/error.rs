// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::Write as _;

use blob_store::FixtureError;
use console::style;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CLIError {
    /// The environment is not ready to run the store
    #[error("{source}")]
    PreconditionFailed {
        source: BoxedError,
        backtrace: Backtrace,
    },
    #[error("{source}")]
    UsageError {
        source: BoxedError,
        backtrace: Backtrace,
    },
    /// A supervised server stopped with a non-zero status
    #[error("Server exited with code {code}")]
    ServerExited { code: i32 },
    #[error("{source}")]
    Failure {
        source: BoxedError,
        backtrace: Backtrace,
    },
}

impl CLIError {
    pub fn precondition_failed(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::PreconditionFailed {
            source: e.into(),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn usage_error(msg: impl Into<String>) -> Self {
        Self::UsageError {
            source: msg.into().into(),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn usage_error_from(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UsageError {
            source: e.into(),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn failure(e: impl Into<BoxedError>) -> Self {
        Self::Failure {
            source: e.into(),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PreconditionFailed { .. } | Self::Failure { .. } => 1,
            Self::UsageError { .. } => 2,
            Self::ServerExited { code } => *code,
        }
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        match self {
            Self::PreconditionFailed { backtrace, .. }
            | Self::UsageError { backtrace, .. }
            | Self::Failure { backtrace, .. } => Some(backtrace),
            Self::ServerExited { .. } => None,
        }
    }

    /// Single line for the user, or the full cause chain with a backtrace
    /// when `detailed`
    pub fn pretty(&self, detailed: bool) -> String {
        let mut s = format!("{} {}", style("Error:").red().bold(), self);

        if detailed {
            // Top-level variants display their source, so skip straight to its causes
            let mut cause = std::error::Error::source(self).and_then(std::error::Error::source);
            while let Some(err) = cause {
                let _ = write!(s, "\n  {} {err}", style("Caused by:").dim());
                cause = err.source();
            }

            if let Some(bt) = self.backtrace().filter(|bt| bt.status() == BacktraceStatus::Captured) {
                let _ = write!(s, "\n\n{bt}");
            }
        }

        s
    }
}

impl From<FixtureError> for CLIError {
    fn from(e: FixtureError) -> Self {
        match e {
            FixtureError::BinaryNotFound { .. } => Self::precondition_failed(e),
            FixtureError::Config(_) => Self::usage_error_from(e),
            FixtureError::Provision(_) | FixtureError::Handover(_) => Self::failure(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
