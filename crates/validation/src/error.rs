// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{ErrorMessage, ErrorStatus};
use thiserror::Error;

/// A rejected filing document.
///
/// Every problem found is reported, not just the first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Filing rejected ({status}): {}", joined(.messages))]
pub struct ValidationError {
    pub status: ErrorStatus,
    pub messages: Vec<ErrorMessage>,
}

fn joined(messages: &[ErrorMessage]) -> String {
    messages
        .iter()
        .map(|m| m.error.as_str())
        .collect::<Vec<&str>>()
        .join("; ")
}

impl ValidationError {
    #[must_use]
    pub const fn new(status: ErrorStatus, messages: Vec<ErrorMessage>) -> Self {
        Self { status, messages }
    }

    /// A 400 carrying a single message.
    #[must_use]
    pub fn bad_request(error: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(ErrorStatus::BadRequest, vec![ErrorMessage::at(error, path)])
    }

    #[must_use]
    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(ErrorStatus::NotFound, vec![ErrorMessage::new(error)])
    }
}
