// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::{Duration, Instant};

use tokio::net::TcpStream;

use crate::TimeoutError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const CONNECT_TIMEOUT: Duration = Duration::from_millis(100);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn check_socket(addr: &str) -> bool {
    matches!(
        tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}

pub async fn wait_for_socket(addr: &str, timeout: Duration) -> Result<(), TimeoutError> {
    let start = Instant::now();
    loop {
        if check_socket(addr).await {
            tracing::debug!(addr, elapsed = ?start.elapsed(), "Socket is accepting connections");
            break Ok(());
        } else if start.elapsed() >= timeout {
            break Err(TimeoutError::new(timeout));
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
