// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use observability::logging::{LogFormat, LoggingConfig};

use crate::cli::{Cli, LogFormatArg};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Suppresses everything but errors and requested data
    pub quiet: bool,
    pub verbosity_level: u8,
    pub log_format: LogFormat,
}

impl OutputConfig {
    pub fn from_args(args: &Cli) -> Self {
        Self {
            quiet: args.quiet,
            verbosity_level: args.verbose,
            log_format: match args.log_format {
                LogFormatArg::Text => LogFormat::Text,
                LogFormatArg::Json => LogFormat::Json,
            },
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            verbosity_level: self.verbosity_level,
            quiet: self.quiet,
            format: self.log_format,
        }
    }
}
