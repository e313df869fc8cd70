// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use observability::logging::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_default_directive_follows_verbosity() {
    let directive = |verbosity_level, quiet| {
        LoggingConfig {
            verbosity_level,
            quiet,
            format: LogFormat::Text,
        }
        .default_directive()
    };

    assert_eq!(directive(0, false), "warn");
    assert_eq!(directive(1, false), "info");
    assert_eq!(directive(2, false), "debug");
    assert_eq!(directive(5, false), "debug");
    assert_eq!(directive(3, true), "error");
}

#[test]
fn test_log_format_deserializes_lowercase() {
    let format: LogFormat = parse_format("json");
    assert_eq!(format, LogFormat::Json);
    assert_eq!(LogFormat::default(), LogFormat::Text);
}

fn parse_format(value: &str) -> LogFormat {
    use serde::Deserialize as _;
    use serde::de::IntoDeserializer as _;
    use serde::de::value::{Error, StrDeserializer};

    let de: StrDeserializer<'_, Error> = value.into_deserializer();
    LogFormat::deserialize(de).unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
