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
mod fixture;
mod launch_plan;
mod layout;
mod provision;

pub use config::*;
pub use fixture::*;
pub use launch_plan::*;
pub use layout::*;
pub use provision::*;
