// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    simple = { "KEY=value", "KEY", "value" },
    empty_value = { "KEY=", "KEY", "" },
    equals_in_value = { "URL=a=b", "URL", "a=b" },
)]
fn parses_key_value(input: &str, key: &str, value: &str) {
    assert_eq!(parse_key_value(input), Ok((key.to_string(), value.to_string())));
}

#[yare::parameterized(
    missing_equals = { "KEY" },
    empty_key = { "=value" },
)]
fn rejects_malformed_key_value(input: &str) {
    assert!(parse_key_value(input).is_err());
}
