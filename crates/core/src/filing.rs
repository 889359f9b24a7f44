// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The filing model.
//!
//! A filing is a legal document submitted against a business. Once an
//! invoice exists for it (a payment token has been saved) or it has been
//! synchronized with COLIN, it is locked and every guarded setter refuses to
//! change it.
//!
//! ## Invariants
//!
//! - A locked filing cannot be modified or deleted
//! - The stored status is derived by `prepare_for_save` on every write
//! - `CORRECTED` is never stored; it is reported through `effective_status`

use crate::error::{CoreError, ErrorMessage};
use crate::filing_status::{FilingSource, FilingStatus};
use bizreg_domain::format_datetime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// Filing type of the placeholder filing that anchors migrated history.
pub const EPOCH_FILING_TYPE: &str = "lear_epoch";

/// Fields whose unsaved changes are tracked between saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilingField {
    FilingJson,
    PaymentToken,
    PaymentCompletionDate,
    FilingDate,
    EffectiveDate,
    Submitter,
    BusinessId,
    Source,
}

/// The persisted shape of a filing.
///
/// Storage reads and writes this record; the guarded [`Filing`] wraps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFiling {
    pub id: Option<i64>,
    pub business_id: Option<i64>,
    pub filing_type: Option<String>,
    pub filing_sub_type: Option<String>,
    pub filing_json: Option<Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub filing_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub effective_date: OffsetDateTime,
    pub payment_token: Option<String>,
    pub payment_status_code: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub payment_completion_date: Option<OffsetDateTime>,
    pub transaction_id: Option<i64>,
    pub status: FilingStatus,
    pub source: FilingSource,
    pub submitter_id: Option<String>,
    pub parent_filing_id: Option<i64>,
    pub colin_event_ids: Vec<i64>,
    pub deletion_locked: bool,
    pub meta_data: Option<Value>,
}

/// A filing with change tracking and lock enforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filing {
    record: StoredFiling,
    pending: BTreeSet<FilingField>,
    status_override: Option<FilingStatus>,
}

impl Filing {
    /// Creates a new draft filing dated `now`.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self {
            record: StoredFiling {
                id: None,
                business_id: None,
                filing_type: None,
                filing_sub_type: None,
                filing_json: None,
                filing_date: now,
                effective_date: now,
                payment_token: None,
                payment_status_code: None,
                payment_completion_date: None,
                transaction_id: None,
                status: FilingStatus::Draft,
                source: FilingSource::Lear,
                submitter_id: None,
                parent_filing_id: None,
                colin_event_ids: Vec::new(),
                deletion_locked: false,
                meta_data: None,
            },
            pending: BTreeSet::new(),
            status_override: None,
        }
    }

    /// Wraps a record loaded from storage. No changes are pending.
    #[must_use]
    pub const fn from_stored(record: StoredFiling) -> Self {
        Self {
            record,
            pending: BTreeSet::new(),
            status_override: None,
        }
    }

    /// The record to persist.
    #[must_use]
    pub const fn stored(&self) -> &StoredFiling {
        &self.record
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.record.id
    }

    #[must_use]
    pub const fn business_id(&self) -> Option<i64> {
        self.record.business_id
    }

    #[must_use]
    pub fn filing_type(&self) -> Option<&str> {
        self.record.filing_type.as_deref()
    }

    #[must_use]
    pub fn filing_sub_type(&self) -> Option<&str> {
        self.record.filing_sub_type.as_deref()
    }

    #[must_use]
    pub const fn filing_json(&self) -> Option<&Value> {
        self.record.filing_json.as_ref()
    }

    #[must_use]
    pub const fn filing_date(&self) -> OffsetDateTime {
        self.record.filing_date
    }

    #[must_use]
    pub const fn effective_date(&self) -> OffsetDateTime {
        self.record.effective_date
    }

    #[must_use]
    pub fn payment_token(&self) -> Option<&str> {
        self.record.payment_token.as_deref()
    }

    #[must_use]
    pub const fn payment_completion_date(&self) -> Option<OffsetDateTime> {
        self.record.payment_completion_date
    }

    #[must_use]
    pub const fn transaction_id(&self) -> Option<i64> {
        self.record.transaction_id
    }

    /// The stored status, never `CORRECTED`.
    #[must_use]
    pub const fn status(&self) -> FilingStatus {
        self.record.status
    }

    #[must_use]
    pub const fn source(&self) -> FilingSource {
        self.record.source
    }

    #[must_use]
    pub const fn parent_filing_id(&self) -> Option<i64> {
        self.record.parent_filing_id
    }

    #[must_use]
    pub fn colin_event_ids(&self) -> &[i64] {
        &self.record.colin_event_ids
    }

    /// Whether `field` has been changed since the last save.
    #[must_use]
    pub fn is_pending(&self, field: FilingField) -> bool {
        self.pending.contains(&field)
    }

    /// Whether the filing refuses modification.
    ///
    /// Locked once deletion-locked, once a saved payment token exists, or
    /// once any COLIN event is attached.
    #[must_use]
    pub fn locked(&self) -> bool {
        self.record.deletion_locked
            || (self.record.payment_token.is_some() && !self.is_pending(FilingField::PaymentToken))
            || !self.record.colin_event_ids.is_empty()
    }

    fn guard(&self) -> Result<(), CoreError> {
        if self.locked() {
            return Err(CoreError::locked());
        }
        Ok(())
    }

    /// Replaces the filing document and derives the filing type and sub-type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The filing is locked (403)
    /// - The document has no `filing.header.name` (422)
    pub fn set_filing_json(&mut self, json_data: Value) -> Result<(), CoreError> {
        self.guard()?;

        let filing_type: String = json_data
            .pointer("/filing/header/name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::InvalidFiling(vec![ErrorMessage::at(
                    "No filings found.",
                    "/filing/header/name",
                )])
            })?;

        self.record.filing_sub_type = filing_sub_type(&filing_type, &json_data);
        self.record.filing_type = Some(filing_type);
        self.record.filing_json = Some(json_data);
        if self.record.payment_token.is_some() {
            self.record.status = FilingStatus::Pending;
        }
        self.pending.insert(FilingField::FilingJson);
        Ok(())
    }

    /// Attaches the invoice token. A token can only be set once.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` if the filing is locked or already has a token.
    pub fn set_payment_token(&mut self, token: &str) -> Result<(), CoreError> {
        self.guard()?;
        if self.record.payment_token.is_some() {
            return Err(CoreError::locked());
        }
        self.record.payment_token = Some(token.to_string());
        self.pending.insert(FilingField::PaymentToken);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` if the filing is locked.
    pub fn set_filing_date(&mut self, filing_date: OffsetDateTime) -> Result<(), CoreError> {
        self.guard()?;
        self.record.filing_date = filing_date;
        self.pending.insert(FilingField::FilingDate);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` if the filing is locked.
    pub fn set_submitter(&mut self, submitter_id: &str) -> Result<(), CoreError> {
        self.guard()?;
        self.record.submitter_id = Some(submitter_id.to_string());
        self.pending.insert(FilingField::Submitter);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` if the filing is locked.
    pub fn set_business_id(&mut self, business_id: i64) -> Result<(), CoreError> {
        self.guard()?;
        self.record.business_id = Some(business_id);
        self.pending.insert(FilingField::BusinessId);
        Ok(())
    }

    /// Records when payment completed.
    ///
    /// Allowed on locked filings, or on unsaved filings that already carry
    /// both a token and a document. The effective date moves forward to the
    /// completion date if it was not later already.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` otherwise.
    pub fn set_payment_completion_date(
        &mut self,
        completed_at: OffsetDateTime,
    ) -> Result<(), CoreError> {
        let ready: bool =
            self.record.payment_token.is_some() && self.record.filing_json.is_some();
        if !(self.locked() || ready) {
            return Err(CoreError::Forbidden(String::from(
                "Payment Dates cannot set for unlocked filings unless the filing hasn't been saved yet.",
            )));
        }

        self.record.payment_completion_date = Some(completed_at);
        if self.record.effective_date <= completed_at {
            self.record.effective_date = completed_at;
            self.pending.insert(FilingField::EffectiveDate);
        }
        self.pending.insert(FilingField::PaymentCompletionDate);
        Ok(())
    }

    pub fn set_effective_date(&mut self, effective_date: OffsetDateTime) {
        self.record.effective_date = effective_date;
        self.pending.insert(FilingField::EffectiveDate);
    }

    /// # Errors
    ///
    /// Returns `CoreError::InvalidSource` for anything but `LEAR` or `COLIN`.
    pub fn set_source(&mut self, source: &str) -> Result<(), CoreError> {
        self.record.source = source.parse()?;
        self.pending.insert(FilingField::Source);
        Ok(())
    }

    pub fn set_payment_status_code(&mut self, code: Option<String>) {
        self.record.payment_status_code = code;
    }

    /// Marks the filing as applied by the given transaction.
    pub const fn set_transaction_id(&mut self, transaction_id: i64) {
        self.record.transaction_id = Some(transaction_id);
    }

    pub const fn set_parent_filing_id(&mut self, parent_filing_id: Option<i64>) {
        self.record.parent_filing_id = parent_filing_id;
    }

    pub fn add_colin_event_id(&mut self, colin_event_id: i64) {
        if !self.record.colin_event_ids.contains(&colin_event_id) {
            self.record.colin_event_ids.push(colin_event_id);
        }
    }

    pub const fn set_deletion_locked(&mut self, deletion_locked: bool) {
        self.record.deletion_locked = deletion_locked;
    }

    pub fn set_meta_data(&mut self, meta_data: Option<Value>) {
        self.record.meta_data = meta_data;
    }

    /// Forces `ERROR`, `WITHDRAWN` or `TOMBSTONE` for the next save.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` for any other status.
    pub fn override_status(&mut self, status: FilingStatus) -> Result<(), CoreError> {
        if !status.is_override() {
            return Err(CoreError::InvalidTransition {
                from: self.record.status,
                to: status,
            });
        }
        self.status_override = Some(status);
        Ok(())
    }

    /// Applies a staff review decision.
    ///
    /// `AWAITING_REVIEW` may move to `CHANGE_REQUESTED`, `APPROVED` or
    /// `REJECTED`; `CHANGE_REQUESTED` returns to `AWAITING_REVIEW`. A draft
    /// may be submitted for review.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` for any other move.
    pub fn apply_review_decision(&mut self, next: FilingStatus) -> Result<(), CoreError> {
        let allowed: bool = match self.record.status {
            FilingStatus::AwaitingReview => matches!(
                next,
                FilingStatus::ChangeRequested | FilingStatus::Approved | FilingStatus::Rejected
            ),
            FilingStatus::ChangeRequested | FilingStatus::Draft => {
                next == FilingStatus::AwaitingReview
            }
            _ => false,
        };
        if !allowed {
            return Err(CoreError::InvalidTransition {
                from: self.record.status,
                to: next,
            });
        }
        self.record.status = next;
        Ok(())
    }

    /// Derives the status to store. Run before every insert and update.
    ///
    /// Priority: review states (approval holds until an invoice exists), a
    /// one-shot override, epoch filings, applied filings, paid or COLIN
    /// filings, invoiced filings, then draft.
    pub fn prepare_for_save(&mut self) -> FilingStatus {
        let current: FilingStatus = self.record.status;
        let in_review: bool = current.is_review_state()
            && !(current == FilingStatus::Approved && self.record.payment_token.is_some());

        let derived: FilingStatus = if in_review {
            current
        } else if let Some(forced) = self.status_override.take() {
            forced
        } else if self.record.filing_type.as_deref() == Some(EPOCH_FILING_TYPE) {
            FilingStatus::Epoch
        } else if self.record.transaction_id.is_some() {
            FilingStatus::Completed
        } else if self.record.payment_completion_date.is_some()
            || self.record.source == FilingSource::Colin
        {
            FilingStatus::Paid
        } else if self.record.payment_token.is_some() {
            FilingStatus::Pending
        } else {
            FilingStatus::Draft
        };

        self.record.status = derived;
        derived
    }

    /// Records a successful save, clearing pending changes.
    pub fn mark_saved(&mut self, id: i64) {
        self.record.id = Some(id);
        self.pending.clear();
    }

    /// Checks that the filing may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` if the filing is locked.
    pub fn ensure_deletable(&self) -> Result<(), CoreError> {
        self.guard()
    }

    /// The status reported to callers, deriving `CORRECTED`.
    ///
    /// # Arguments
    ///
    /// * `parent` - The filing that corrected this one, if any
    #[must_use]
    pub fn effective_status(&self, parent: Option<&Self>) -> FilingStatus {
        let corrected: bool = self.record.status == FilingStatus::Completed
            && self.record.parent_filing_id.is_some()
            && parent.is_some_and(|p| p.status() == FilingStatus::Completed);
        if corrected {
            FilingStatus::Corrected
        } else {
            self.record.status
        }
    }

    /// Whether the filing takes effect after it was paid for.
    #[must_use]
    pub fn is_future_effective(&self) -> bool {
        self.record
            .payment_completion_date
            .is_some_and(|paid| self.record.effective_date > paid)
    }

    /// Renders the filing document with the header overlay.
    #[must_use]
    pub fn to_json(&self, parent: Option<&Self>) -> Value {
        let mut document: Value = self
            .record
            .filing_json
            .clone()
            .unwrap_or_else(|| json!({ "filing": { "header": {} } }));

        let mut header: Map<String, Value> = document
            .pointer("/filing/header")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        header.insert("filingId".into(), json!(self.record.id));
        header.insert("name".into(), json!(self.record.filing_type));
        header.insert(
            "status".into(),
            json!(self.effective_status(parent).as_str()),
        );
        header.insert(
            "date".into(),
            json!(format_datetime(self.record.filing_date)),
        );
        header.insert(
            "effectiveDate".into(),
            json!(format_datetime(self.record.effective_date)),
        );
        header.insert("isFutureEffective".into(), json!(self.is_future_effective()));
        header.insert("deletionLocked".into(), json!(self.record.deletion_locked));
        header.insert("source".into(), json!(self.record.source.as_str()));
        if let Some(token) = &self.record.payment_token {
            header.insert("paymentToken".into(), json!(token));
        }
        if let Some(code) = &self.record.payment_status_code {
            header.insert("paymentStatusCode".into(), json!(code));
        }
        if let Some(submitter) = &self.record.submitter_id {
            header.insert("submitter".into(), json!(submitter));
        }
        if !self.record.colin_event_ids.is_empty() {
            header.insert("colinIds".into(), json!(self.record.colin_event_ids));
        }

        if let Some(filing) = document.get_mut("filing").and_then(Value::as_object_mut) {
            filing.insert("header".into(), Value::Object(header));
        }
        document
    }
}

/// Derives the sub-type that selects a fee code within a filing type.
#[must_use]
pub fn filing_sub_type(filing_type: &str, json_data: &Value) -> Option<String> {
    let pointer: &str = match filing_type {
        "dissolution" => "/filing/dissolution/dissolutionType",
        "restoration" => "/filing/restoration/type",
        "amalgamationApplication" => "/filing/amalgamationApplication/type",
        _ => return None,
    };
    json_data
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}
