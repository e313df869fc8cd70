// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod check_command;
mod completions_command;
mod env_command;
mod provision_command;
mod serve_command;

pub use check_command::*;
pub use completions_command::*;
pub use env_command::*;
pub use provision_command::*;
pub use serve_command::*;

pub use crate::error::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait(?Send)]
pub trait Command {
    async fn run(&self) -> Result<(), CLIError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
