// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The stored or derived status of a filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilingStatus {
    Draft,
    Pending,
    Paid,
    Completed,
    /// Derived: a completed filing whose correction has completed.
    Corrected,
    Epoch,
    Error,
    Withdrawn,
    Tombstone,
    Approved,
    AwaitingReview,
    ChangeRequested,
    Rejected,
}

impl FilingStatus {
    pub const ALL: [Self; 13] = [
        Self::Draft,
        Self::Pending,
        Self::Paid,
        Self::Completed,
        Self::Corrected,
        Self::Epoch,
        Self::Error,
        Self::Withdrawn,
        Self::Tombstone,
        Self::Approved,
        Self::AwaitingReview,
        Self::ChangeRequested,
        Self::Rejected,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Completed => "COMPLETED",
            Self::Corrected => "CORRECTED",
            Self::Epoch => "EPOCH",
            Self::Error => "ERROR",
            Self::Withdrawn => "WITHDRAWN",
            Self::Tombstone => "TOMBSTONE",
            Self::Approved => "APPROVED",
            Self::AwaitingReview => "AWAITING_REVIEW",
            Self::ChangeRequested => "CHANGE_REQUESTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Statuses owned by the staff review workflow.
    #[must_use]
    pub const fn is_review_state(&self) -> bool {
        matches!(
            self,
            Self::Approved | Self::AwaitingReview | Self::ChangeRequested | Self::Rejected
        )
    }

    /// Statuses that processing may force onto a filing.
    #[must_use]
    pub const fn is_override(&self) -> bool {
        matches!(self, Self::Error | Self::Withdrawn | Self::Tombstone)
    }
}

impl FromStr for FilingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Internal(format!("Unknown filing status: {s}")))
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The system a filing originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilingSource {
    Lear,
    Colin,
}

impl FilingSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lear => "LEAR",
            Self::Colin => "COLIN",
        }
    }
}

impl FromStr for FilingSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEAR" => Ok(Self::Lear),
            "COLIN" => Ok(Self::Colin),
            _ => Err(CoreError::InvalidSource(s.to_string())),
        }
    }
}
