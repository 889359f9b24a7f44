// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::filing_status::FilingStatus;
use bizreg_domain::DomainError;
use serde::{Deserialize, Serialize};

/// HTTP-style status attached to every error surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorStatus {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    UnprocessableEntity,
    InternalServerError,
}

impl ErrorStatus {
    /// Returns the numeric status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::UnprocessableEntity => 422,
            Self::InternalServerError => 500,
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One structured error about a filing document.
///
/// `path` is a JSON pointer into the filing (`/filing/header/name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorMessage {
    /// A message that is not tied to a location in the document.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            path: None,
        }
    }

    /// A message pointing at `path` in the document.
    #[must_use]
    pub fn at(error: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            path: Some(path.into()),
        }
    }
}

/// Errors raised by the filing model and the registry services built on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The operation is not permitted on the current state.
    Forbidden(String),
    /// The filing document is unusable.
    InvalidFiling(Vec<ErrorMessage>),
    /// A filing status change is not permitted.
    InvalidTransition {
        /// Current status.
        from: FilingStatus,
        /// Requested status.
        to: FilingStatus,
    },
    /// A filing source other than LEAR or COLIN.
    InvalidSource(String),
    /// The requested record does not exist.
    NotFound(String),
    /// Anything else.
    Internal(String),
}

/// Message raised by every setter on a locked filing.
pub const LOCKED_FILING_MESSAGE: &str = "Filings cannot be changed after the invoice is created.";

impl CoreError {
    /// Forbidden error for writes to a locked filing.
    #[must_use]
    pub fn locked() -> Self {
        Self::Forbidden(LOCKED_FILING_MESSAGE.to_string())
    }

    /// The status reported to callers.
    #[must_use]
    pub const fn status(&self) -> ErrorStatus {
        match self {
            Self::DomainViolation(_) | Self::InvalidTransition { .. } | Self::InvalidSource(_) => {
                ErrorStatus::BadRequest
            }
            Self::Forbidden(_) => ErrorStatus::Forbidden,
            Self::InvalidFiling(_) => ErrorStatus::UnprocessableEntity,
            Self::NotFound(_) => ErrorStatus::NotFound,
            Self::Internal(_) => ErrorStatus::InternalServerError,
        }
    }

    /// The error as a list of structured messages.
    #[must_use]
    pub fn messages(&self) -> Vec<ErrorMessage> {
        match self {
            Self::InvalidFiling(messages) => messages.clone(),
            other => vec![ErrorMessage::new(other.to_string())],
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::Forbidden(msg) | Self::NotFound(msg) | Self::Internal(msg) => write!(f, "{msg}"),
            Self::InvalidFiling(messages) => {
                let joined: Vec<&str> = messages.iter().map(|m| m.error.as_str()).collect();
                write!(f, "{}", joined.join("; "))
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot change filing status from {from} to {to}")
            }
            Self::InvalidSource(source) => write!(f, "Invalid filing source: {source}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
