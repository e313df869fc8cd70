// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Termination signals received while a server runs as a supervised child

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl TerminationSignal {
    #[cfg(unix)]
    pub fn as_raw(self) -> libc::c_int {
        match self {
            TerminationSignal::Interrupt => libc::SIGINT,
            TerminationSignal::Terminate => libc::SIGTERM,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Listens for the signals that should be relayed to the child. Must be
/// created before the child is spawned so that no signal is lost in between.
pub struct TerminationListener {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl TerminationListener {
    pub fn new() -> std::io::Result<Self> {
        cfg_if::cfg_if! {
            if #[cfg(unix)] {
                use tokio::signal::unix::{SignalKind, signal};

                Ok(Self {
                    interrupt: signal(SignalKind::interrupt())?,
                    terminate: signal(SignalKind::terminate())?,
                })
            } else {
                Ok(Self {})
            }
        }
    }

    pub async fn recv(&mut self) -> TerminationSignal {
        cfg_if::cfg_if! {
            if #[cfg(unix)] {
                tokio::select! {
                    _ = self.interrupt.recv() => TerminationSignal::Interrupt,
                    _ = self.terminate.recv() => TerminationSignal::Terminate,
                }
            } else {
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
                TerminationSignal::Interrupt
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn forward_to(pid: u32, signal: TerminationSignal) -> std::io::Result<()> {
    cfg_if::cfg_if! {
        if #[cfg(unix)] {
            let pid = libc::pid_t::try_from(pid).map_err(|_| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "pid is out of range")
            })?;

            // SAFETY: `kill` has no memory-safety preconditions
            let ret = unsafe { libc::kill(pid, signal.as_raw()) };
            if ret == 0 {
                Ok(())
            } else {
                Err(std::io::Error::last_os_error())
            }
        } else {
            // Console control events already reach every process attached to the console
            let _ = (pid, signal);
            Ok(())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
