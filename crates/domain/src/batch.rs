// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Involuntary dissolution tracking.
//!
//! A batch groups businesses moving through the dissolution steps. Each
//! business in a batch has a processing entry whose status moves through a
//! fixed lifecycle; notices sent along the way are recorded as furnishings.
//!
//! ## Invariants
//!
//! - `WITHDRAWN` and `COMPLETED` processing entries are terminal
//! - A business is in dissolution only while an open batch holds a live entry

use crate::address::Address;
use crate::error::DomainError;
use crate::legislation::format_datetime;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

fn unknown(kind: &'static str, value: &str) -> DomainError {
    DomainError::UnknownCode {
        kind,
        value: value.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchType {
    InvoluntaryDissolution,
}

impl BatchType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvoluntaryDissolution => "INVOLUNTARY_DISSOLUTION",
        }
    }
}

impl FromStr for BatchType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INVOLUNTARY_DISSOLUTION" => Ok(Self::InvoluntaryDissolution),
            _ => Err(unknown("batch type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Hold,
    Processing,
    Completed,
    Cancelled,
}

impl BatchStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hold => "HOLD",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether the batch is still working through its entries.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl FromStr for BatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOLD" => Ok(Self::Hold),
            "PROCESSING" => Ok(Self::Processing),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(unknown("batch status", s)),
        }
    }
}

/// Status of one business within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchProcessingStatus {
    Hold,
    Queued,
    Processing,
    Withdrawn,
    Completed,
    Error,
}

impl BatchProcessingStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hold => "HOLD",
            Self::Queued => "QUEUED",
            Self::Processing => "PROCESSING",
            Self::Withdrawn => "WITHDRAWN",
            Self::Completed => "COMPLETED",
            Self::Error => "ERROR",
        }
    }

    /// Returns true if no further transitions are allowed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Withdrawn | Self::Completed)
    }

    /// Whether `next` is a permitted successor of this status.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        match self {
            Self::Hold => matches!(next, Self::Queued | Self::Processing | Self::Withdrawn),
            Self::Queued => matches!(next, Self::Processing | Self::Withdrawn | Self::Error),
            Self::Processing => matches!(
                next,
                Self::Completed | Self::Withdrawn | Self::Error | Self::Hold
            ),
            Self::Error => matches!(next, Self::Queued | Self::Processing | Self::Withdrawn),
            Self::Withdrawn | Self::Completed => false,
        }
    }

    /// Validates a transition from this status to `next`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBatchTransition` if the lifecycle forbids it.
    pub fn validate_transition(&self, next: Self) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidBatchTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl FromStr for BatchProcessingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOLD" => Ok(Self::Hold),
            "QUEUED" => Ok(Self::Queued),
            "PROCESSING" => Ok(Self::Processing),
            "WITHDRAWN" => Ok(Self::Withdrawn),
            "COMPLETED" => Ok(Self::Completed),
            "ERROR" => Ok(Self::Error),
            _ => Err(unknown("batch processing status", s)),
        }
    }
}

impl fmt::Display for BatchProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchProcessingStep {
    WarningLevel1,
    WarningLevel2,
    Dissolution,
}

impl BatchProcessingStep {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WarningLevel1 => "WARNING_LEVEL_1",
            Self::WarningLevel2 => "WARNING_LEVEL_2",
            Self::Dissolution => "DISSOLUTION",
        }
    }
}

impl FromStr for BatchProcessingStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WARNING_LEVEL_1" => Ok(Self::WarningLevel1),
            "WARNING_LEVEL_2" => Ok(Self::WarningLevel2),
            "DISSOLUTION" => Ok(Self::Dissolution),
            _ => Err(unknown("batch processing step", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: Option<i64>,
    pub batch_type: BatchType,
    pub status: BatchStatus,
    pub size: Option<i32>,
    pub max_size: Option<i32>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    pub notes: Option<String>,
}

impl Batch {
    #[must_use]
    pub const fn new(batch_type: BatchType) -> Self {
        Self {
            id: None,
            batch_type,
            status: BatchStatus::Hold,
            size: None,
            max_size: None,
            start_date: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProcessing {
    pub id: Option<i64>,
    pub batch_id: i64,
    pub business_id: i64,
    pub business_identifier: String,
    pub step: BatchProcessingStep,
    pub status: BatchProcessingStatus,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_modified: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub trigger_date: Option<OffsetDateTime>,
    pub meta_data: Option<Value>,
}

impl BatchProcessing {
    /// Creates a `QUEUED` first-warning entry for a business.
    #[must_use]
    pub fn new(
        batch_id: i64,
        business_id: i64,
        business_identifier: &str,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: None,
            batch_id,
            business_id,
            business_identifier: business_identifier.to_string(),
            step: BatchProcessingStep::WarningLevel1,
            status: BatchProcessingStatus::Queued,
            notes: None,
            created_date: now,
            last_modified: now,
            trigger_date: None,
            meta_data: None,
        }
    }

    /// Moves the entry to `next`, stamping `last_modified`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBatchTransition` if the lifecycle forbids it.
    pub fn transition(
        &mut self,
        next: BatchProcessingStatus,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.status.validate_transition(next)?;
        self.status = next;
        self.last_modified = now;
        Ok(())
    }

    /// Whether this entry still counts towards dissolution.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !matches!(
            self.status,
            BatchProcessingStatus::Withdrawn | BatchProcessingStatus::Completed
        )
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "batchId": self.batch_id,
            "businessIdentifier": self.business_identifier,
            "step": self.step.as_str(),
            "status": self.status.as_str(),
            "notes": self.notes,
            "createdDate": format_datetime(self.created_date),
            "lastModified": format_datetime(self.last_modified),
            "triggerDate": self.trigger_date.map(format_datetime),
            "metaData": self.meta_data,
        })
    }
}

/// Whether the business has a live entry in an open involuntary dissolution batch.
#[must_use]
pub fn in_dissolution(business_id: i64, entries: &[(Batch, BatchProcessing)]) -> bool {
    entries.iter().any(|(batch, processing)| {
        batch.batch_type == BatchType::InvoluntaryDissolution
            && batch.status.is_open()
            && processing.business_id == business_id
            && processing.is_live()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FurnishingType {
    Email,
    Mail,
    Gazette,
}

impl FurnishingType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Mail => "MAIL",
            Self::Gazette => "GAZETTE",
        }
    }
}

impl FromStr for FurnishingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMAIL" => Ok(Self::Email),
            "MAIL" => Ok(Self::Mail),
            "GAZETTE" => Ok(Self::Gazette),
            _ => Err(unknown("furnishing type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FurnishingName {
    DissolutionCommencementNoAr,
    DissolutionCommencementNoTr,
    DissolutionCommencementNoArXpro,
    IntentToDissolve,
    IntentToDissolveXpro,
    CorpDissolved,
    CorpDissolvedXpro,
}

impl FurnishingName {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DissolutionCommencementNoAr => "DISSOLUTION_COMMENCEMENT_NO_AR",
            Self::DissolutionCommencementNoTr => "DISSOLUTION_COMMENCEMENT_NO_TR",
            Self::DissolutionCommencementNoArXpro => "DISSOLUTION_COMMENCEMENT_NO_AR_XPRO",
            Self::IntentToDissolve => "INTENT_TO_DISSOLVE",
            Self::IntentToDissolveXpro => "INTENT_TO_DISSOLVE_XPRO",
            Self::CorpDissolved => "CORP_DISSOLVED",
            Self::CorpDissolvedXpro => "CORP_DISSOLVED_XPRO",
        }
    }
}

impl FromStr for FurnishingName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::DissolutionCommencementNoAr,
            Self::DissolutionCommencementNoTr,
            Self::DissolutionCommencementNoArXpro,
            Self::IntentToDissolve,
            Self::IntentToDissolveXpro,
            Self::CorpDissolved,
            Self::CorpDissolvedXpro,
        ]
        .into_iter()
        .find(|name| name.as_str() == s)
        .ok_or_else(|| unknown("furnishing name", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FurnishingStatus {
    Queued,
    Processed,
    Failed,
}

impl FurnishingStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Processed => "PROCESSED",
            Self::Failed => "FAILED",
        }
    }
}

impl FromStr for FurnishingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUEUED" => Ok(Self::Queued),
            "PROCESSED" => Ok(Self::Processed),
            "FAILED" => Ok(Self::Failed),
            _ => Err(unknown("furnishing status", s)),
        }
    }
}

/// A notice sent to a business during dissolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Furnishing {
    pub id: Option<i64>,
    pub furnishing_type: FurnishingType,
    pub furnishing_name: FurnishingName,
    pub status: FurnishingStatus,
    pub batch_id: i64,
    pub business_id: i64,
    pub business_identifier: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub processed_date: Option<OffsetDateTime>,
    pub email: Option<String>,
    pub mailing_address: Option<Address>,
}
