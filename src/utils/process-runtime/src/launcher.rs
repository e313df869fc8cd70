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
use std::process::ExitStatus;

use crate::signal::{self, TerminationListener};
use crate::{HandoverError, HandoverMode};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Set on the child explicitly, overriding values inherited from the
    /// current environment
    pub environment_vars: Vec<(String, String)>,
}

impl ProcessSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            environment_vars: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment_vars.push((key.into(), value.into()));
        self
    }

    pub fn get_env(&self, key: &str) -> Option<&str> {
        self.environment_vars
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_command(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.environment_vars {
            cmd.env(key, value);
        }
        cmd
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerExit {
    pub code: i32,
}

impl ServerExit {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self { code };
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt as _;

            if let Some(signo) = status.signal() {
                return Self { code: 128 + signo };
            }
        }

        Self { code: 1 }
    }

    pub fn success(self) -> bool {
        self.code == 0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait ServerLauncher: Send + Sync {
    /// Passes control to the server described by `spec`. When the process
    /// image is replaced this never returns on success.
    async fn launch(&self, spec: &ProcessSpec) -> Result<ServerExit, HandoverError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    mode: HandoverMode,
}

impl ProcessLauncher {
    pub fn new(mode: HandoverMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> HandoverMode {
        self.mode
    }

    fn exec(spec: &ProcessSpec) -> Result<ServerExit, HandoverError> {
        cfg_if::cfg_if! {
            if #[cfg(unix)] {
                use std::os::unix::process::CommandExt as _;

                // Only returns if the exec call itself failed
                let err = spec.to_command().exec();
                Err(HandoverError::exec(&spec.program, err))
            } else {
                let _ = spec;
                Err(HandoverError::Unsupported {
                    mode: HandoverMode::Exec,
                })
            }
        }
    }

    async fn supervise(spec: &ProcessSpec) -> Result<ServerExit, HandoverError> {
        let mut listener = TerminationListener::new().map_err(HandoverError::signal)?;

        let mut command = spec.to_command();
        // Terminal-generated signals reach only this process, which relays them once
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt as _;
            command.process_group(0);
        }

        let mut child = tokio::process::Command::from(command)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| HandoverError::spawn(&spec.program, e))?;

        let pid = child.id();
        tracing::info!(?pid, program = ?spec.program, "Server started as a child process");

        let wait = child.wait();
        tokio::pin!(wait);

        let status = loop {
            tokio::select! {
                status = &mut wait => break status,
                signal = listener.recv() => {
                    tracing::info!(?signal, ?pid, "Forwarding signal to server");
                    let Some(pid) = pid else {
                        continue;
                    };
                    if let Err(err) = signal::forward_to(pid, signal) {
                        tracing::warn!(error = %err, pid, "Failed to forward signal");
                    }
                }
            }
        }
        .map_err(|e| HandoverError::wait(&spec.program, e))?;

        let exit = ServerExit::from_status(status);
        tracing::info!(code = exit.code, "Server exited");
        Ok(exit)
    }
}

#[async_trait::async_trait]
impl ServerLauncher for ProcessLauncher {
    async fn launch(&self, spec: &ProcessSpec) -> Result<ServerExit, HandoverError> {
        tracing::info!(
            mode = %self.mode,
            program = ?spec.program,
            args = ?spec.args,
            env = ?spec.environment_vars.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            "Handing over to server",
        );

        match self.mode {
            HandoverMode::Exec => Self::exec(spec),
            HandoverMode::Supervise => Self::supervise(spec).await,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
