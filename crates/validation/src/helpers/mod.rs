// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checks shared by several filing validators.
//!
//! Each helper appends what it finds to a message list instead of
//! returning early, so one pass reports every problem in a document.

pub mod address;
pub mod court_order;
pub mod dates;
pub mod name_request;
pub mod parties;
pub mod shares;

use bizreg::ErrorMessage;
use serde_json::Value;

/// Reads a non-empty string at a JSON pointer.
pub fn str_at<'a>(filing: &'a Value, pointer: &str) -> Option<&'a str> {
    filing
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Reads a boolean at a JSON pointer, treating absence as `false`.
pub fn flag_at(filing: &Value, pointer: &str) -> bool {
    filing
        .pointer(pointer)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Reads an integer at a JSON pointer, accepting numeric strings.
pub fn int_at(filing: &Value, pointer: &str) -> Option<i64> {
    match filing.pointer(pointer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads the array at a JSON pointer; absent or non-array reads as empty.
pub fn array_at<'a>(filing: &'a Value, pointer: &str) -> &'a [Value] {
    filing
        .pointer(pointer)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Reads a required string, recording a message when it is missing.
pub fn require_str<'a>(
    filing: &'a Value,
    pointer: &str,
    label: &str,
    messages: &mut Vec<ErrorMessage>,
) -> Option<&'a str> {
    let value: Option<&str> = str_at(filing, pointer);
    if value.is_none() {
        messages.push(ErrorMessage::at(format!("{label} is required."), pointer));
    }
    value
}

/// Records a message when the object at `pointer` is absent.
pub fn require_present<'a>(
    filing: &'a Value,
    pointer: &str,
    label: &str,
    messages: &mut Vec<ErrorMessage>,
) -> Option<&'a Value> {
    let value: Option<&Value> = filing.pointer(pointer).filter(|v| !v.is_null());
    if value.is_none() {
        messages.push(ErrorMessage::at(format!("{label} is required."), pointer));
    }
    value
}
