// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![feature(error_generic_member_access)]

mod config;
mod errors;
mod launcher;
mod locate;
pub mod signal;
mod socket;

pub use config::*;
pub use errors::{HandoverError, TimeoutError};
pub use launcher::*;
pub use locate::*;
pub use socket::*;
