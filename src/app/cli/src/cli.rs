// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use blob_store::CONFIG_PATH_ENV_VAR;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Disposable local S3-compatible blob store for test suites.
///
/// Without a subcommand the store is provisioned and the process is handed
/// over to the storage server, same as `serve`.
#[derive(Debug, clap::Parser)]
#[command(name = crate::BINARY_NAME)]
#[command(version = crate::VERSION)]
#[command(after_help = r#"
The store keeps its data under `.blob_store` in the current directory unless
`--root-dir` or a config file says otherwise. Credentials are fixed, run
`local-blob-store env` to see them.
"#)]
pub struct Cli {
    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Format of the log records written to STDERR
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text, global = true)]
    pub log_format: LogFormatArg,

    /// Path to the YAML configuration file (defaults to `.blobstore.yaml` in
    /// the current directory when present)
    #[arg(long, value_name = "PATH", env = CONFIG_PATH_ENV_VAR, global = true)]
    pub config: Option<PathBuf>,

    /// Directory served by the storage server
    #[arg(long, value_name = "PATH", global = true)]
    pub root_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    Serve(Serve),
    Provision(Provision),
    Check(Check),
    Env(Env),
    Completions(Completions),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Provision the store and hand the process over to the storage server
#[derive(Debug, Default, clap::Args)]
pub struct Serve {
    /// Keep running as a supervisor of the server instead of replacing this
    /// process
    #[arg(long)]
    pub supervise: bool,

    /// Address the server listens on, e.g. `:9000` or `127.0.0.1:9100`
    #[arg(long, value_name = "ADDR")]
    pub address: Option<String>,

    /// Address of the web console
    #[arg(long, value_name = "ADDR")]
    pub console_address: Option<String>,

    /// Name or path of the storage server binary
    #[arg(long, value_name = "BIN")]
    pub server_binary: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Create the store directories and exit without starting the server
#[derive(Debug, clap::Args)]
pub struct Provision {
    /// Name or path of the storage server binary
    #[arg(long, value_name = "BIN")]
    pub server_binary: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Check that a running server is reachable and serves the required buckets
#[derive(Debug, clap::Args)]
pub struct Check {
    /// Server URL (defaults to the configured server address)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Wait up to this many seconds for the server to accept connections
    #[arg(long, value_name = "SECS", default_value_t = 0)]
    pub wait: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Print the credential environment variables for clients of the store
#[derive(Debug, clap::Args)]
pub struct Env {
    /// Prefix every line with `export` for use with `eval`
    #[arg(long)]
    pub export: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Generate tab-completion scripts for your shell
#[derive(Debug, clap::Args)]
#[command(after_help = r#"
The command outputs to STDOUT, allowing you to re-direct the output to the file of your choosing. Where you place the file will depend on which shell and which operating system you are using. Your particular configuration may also determine where these scripts need to be placed.

Here are some common set ups:

**Bash**

Append the following to your `~/.bashrc`:

    source <(local-blob-store completions bash)

**Zsh**

Write the script into a directory on your `fpath`:

    local-blob-store completions zsh > ~/.zfunc/_local-blob-store
"#)]
pub struct Completions {
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
