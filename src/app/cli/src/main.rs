// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::process::ExitCode;

use clap::Parser as _;

fn main() -> ExitCode {
    let args = blob_store_cli::cli::Cli::parse();
    blob_store_cli::entry_point(args)
}
