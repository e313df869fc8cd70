// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type InitError = Box<dyn std::error::Error + Send + Sync>;

const QUIET_LOGGING_CONFIG: &str = "error";
const DEFAULT_LOGGING_CONFIG: &str = "warn";
const INFO_LOGGING_CONFIG: &str = "info";
const VERBOSE_LOGGING_CONFIG: &str = "debug";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Clone)]
pub struct LoggingConfig {
    pub verbosity_level: u8,
    pub quiet: bool,
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &'static str {
        if self.quiet {
            return QUIET_LOGGING_CONFIG;
        }
        match self.verbosity_level {
            0 => DEFAULT_LOGGING_CONFIG,
            1 => INFO_LOGGING_CONFIG,
            _ => VERBOSE_LOGGING_CONFIG,
        }
    }

    pub fn env_filter(&self) -> EnvFilter {
        // Use configuration from RUST_LOG env var if provided
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Installs a global subscriber writing to STDERR. STDOUT stays reserved for
/// command output.
pub fn configure_logging(config: &LoggingConfig) -> Result<(), InitError> {
    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text if config.verbosity_level > 1 => builder.pretty().try_init(),
        LogFormat::Text => builder.with_target(false).try_init(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
