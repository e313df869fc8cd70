// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::backtrace::Backtrace;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use merge::Merge;
use process_runtime::HandoverMode;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_ROOT_DIR: &str = ".blob_store";

pub const EXTENSIONS_BUCKET: &str = "the-extensions-bucket";
pub const CRASH_REPORTS_BUCKET: &str = "zed-crash-reports";

/// Buckets the test suite expects. The server does not create buckets on
/// demand, so these must exist as directories before it starts.
pub const REQUIRED_BUCKETS: [&str; 2] = [EXTENSIONS_BUCKET, CRASH_REPORTS_BUCKET];

pub const DEFAULT_SERVER_BINARY: &str = "minio";
/// Port the server listens on when no address is configured
pub const DEFAULT_SERVER_PORT: u16 = 9000;
pub const BOOTSTRAP_HINT: &str = "script/bootstrap";

pub const ROOT_USER_ENV_VAR: &str = "MINIO_ROOT_USER";
pub const ROOT_PASSWORD_ENV_VAR: &str = "MINIO_ROOT_PASSWORD";

pub const FIXTURE_ACCESS_KEY: &str = "the-extensions-admin";
pub const FIXTURE_SECRET_KEY: &str = "the-extensions-admin-password";

pub const CONFIG_FILENAME: &str = ".blobstore.yaml";
pub const CONFIG_PATH_ENV_VAR: &str = "BLOB_STORE_CONFIG";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Well-known credential pair of the local fixture. These are not secrets and
/// never come from the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(FIXTURE_ACCESS_KEY, FIXTURE_SECRET_KEY)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Program name searched on `PATH`, or a path to the binary
    pub binary: String,
    pub quiet: bool,
    pub address: Option<String>,
    pub console_address: Option<String>,
    pub handover: HandoverMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_SERVER_BINARY.to_owned(),
            quiet: true,
            address: None,
            console_address: None,
            handover: HandoverMode::default(),
        }
    }
}

impl ServerConfig {
    /// URL clients on this host use to reach the server. Wildcard listen
    /// addresses map to loopback.
    pub fn endpoint_url(&self) -> String {
        let Some(address) = self.address.as_deref() else {
            return format!("http://127.0.0.1:{DEFAULT_SERVER_PORT}");
        };

        let (host, port) = match address.rsplit_once(':') {
            Some((host, port)) => (host, port),
            None => (address, ""),
        };
        let host = match host {
            "" | "0.0.0.0" | "[::]" => "127.0.0.1",
            host => host,
        };

        if port.is_empty() {
            format!("http://{host}:{DEFAULT_SERVER_PORT}")
        } else {
            format!("http://{host}:{port}")
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    pub root_dir: PathBuf,
    /// Created in addition to [`REQUIRED_BUCKETS`]
    pub extra_buckets: Vec<String>,
    pub credentials: Credentials,
    pub server: ServerConfig,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            extra_buckets: Vec::new(),
            credentials: Credentials::default(),
            server: ServerConfig::default(),
        }
    }
}

impl FixtureConfig {
    /// Required buckets first, then extra ones, without duplicates
    pub fn bucket_names(&self) -> Vec<String> {
        let mut ret: Vec<String> = Vec::with_capacity(REQUIRED_BUCKETS.len() + self.extra_buckets.len());
        for name in REQUIRED_BUCKETS
            .iter()
            .copied()
            .chain(self.extra_buckets.iter().map(String::as_str))
        {
            if !ret.iter().any(|n| n == name) {
                ret.push(name.to_owned());
            }
        }
        ret
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("root directory must not be empty"));
        }

        if self.server.binary.is_empty() {
            return Err(ConfigError::invalid("server binary must not be empty"));
        }

        if !self.server.handover.is_supported() {
            return Err(ConfigError::invalid(format!(
                "handover mode '{}' is not supported on this platform",
                self.server.handover
            )));
        }

        for bucket in self.bucket_names() {
            validate_bucket_name(&bucket)?;
        }

        Ok(())
    }

    /// Layers `overrides` over the configuration file, if one is found, and
    /// the file over the defaults. File lookup order: explicit path,
    /// `BLOB_STORE_CONFIG`, then `.blobstore.yaml` in the working directory.
    pub fn load(
        overrides: FixtureConfigFile,
        explicit_path: Option<&Path>,
        working_dir: &Path,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![overrides];

        if let Some(path) = Self::resolve_config_path(
            explicit_path,
            std::env::var_os(CONFIG_PATH_ENV_VAR),
            working_dir,
        ) {
            let file = FixtureConfigFile::read(&path)?;
            tracing::debug!(path = %path.display(), ?file, "Loaded config file");
            layers.push(file);
        }

        Ok(Self::from_layers(layers))
    }

    pub fn resolve_config_path(
        explicit_path: Option<&Path>,
        env_path: Option<OsString>,
        working_dir: &Path,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit_path {
            return Some(path.to_path_buf());
        }

        if let Some(path) = env_path.filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }

        let default_path = working_dir.join(CONFIG_FILENAME);
        default_path.is_file().then_some(default_path)
    }

    /// Layers are ordered from the highest precedence to the lowest, values
    /// unset in all of them come from [`FixtureConfig::default`]
    pub fn from_layers(layers: impl IntoIterator<Item = FixtureConfigFile>) -> Self {
        let mut merged = FixtureConfigFile::default();
        for layer in layers {
            merged.merge(layer);
        }
        merged.merge(FixtureConfigFile::from(Self::default()));

        // Every field is set once the defaults layer is merged in
        let FixtureConfigFile {
            root_dir,
            extra_buckets,
            server,
        } = merged;

        Self {
            root_dir: root_dir.unwrap_or_default(),
            extra_buckets: extra_buckets.unwrap_or_default(),
            credentials: Credentials::default(),
            server: ServerConfig {
                binary: server.binary.unwrap_or_default(),
                quiet: server.quiet.unwrap_or_default(),
                address: server.address,
                console_address: server.console_address,
                handover: server.handover.unwrap_or_default(),
            },
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Follows S3 bucket naming rules and additionally requires the name to be a
/// single path component, since every bucket is a directory under the root.
pub fn validate_bucket_name(name: &str) -> Result<(), ConfigError> {
    let mut components = Path::new(name).components();
    let is_single_component = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    let is_valid = is_single_component
        && (3..=63).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        && name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric());

    if is_valid {
        Ok(())
    } else {
        Err(ConfigError::invalid(format!("invalid bucket name '{name}'")))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// File model
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One layer of configuration, unset values fall through to the layers below
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, Merge)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FixtureConfigFile {
    pub root_dir: Option<PathBuf>,
    pub extra_buckets: Option<Vec<String>>,
    #[serde(default)]
    pub server: ServerConfigFile,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, Merge)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServerConfigFile {
    pub binary: Option<String>,
    pub quiet: Option<bool>,
    pub address: Option<String>,
    pub console_address: Option<String>,
    pub handover: Option<HandoverMode>,
}

impl From<FixtureConfig> for FixtureConfigFile {
    fn from(config: FixtureConfig) -> Self {
        Self {
            root_dir: Some(config.root_dir),
            extra_buckets: Some(config.extra_buckets),
            server: ServerConfigFile {
                binary: Some(config.server.binary),
                quiet: Some(config.server.quiet),
                address: config.server.address,
                console_address: config.server.console_address,
                handover: Some(config.server.handover),
            },
        }
    }
}

impl FixtureConfigFile {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
            backtrace: Backtrace::capture(),
        })?;
        Self::parse(&data).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    pub fn parse(data: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is a valid, empty config
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(data)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
    /// Carries the parser message inline rather than as a source
    #[error("Failed to parse config file {}: {error}", path.display())]
    Parse {
        path: PathBuf,
        error: serde_yaml::Error,
    },
    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

impl ConfigError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
