// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Version history primitives.
//!
//! Every write to a versioned table inside a unit of work is recorded as a
//! [`RowChange`]. At commit the active versioning engine turns the
//! accumulated [`ChangeSet`] into [`VersionRecord`]s bound to a
//! [`Transaction`]. A version is valid from its transaction up to (not
//! including) the transaction that superseded it, which is what makes
//! as-of reads possible.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Errors raised when decoding stored history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// Stored operation code is not 0, 1 or 2.
    UnknownOperation(i32),
    /// Stored table name is not a versioned table.
    UnknownTable(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperation(code) => write!(f, "Unknown version operation code: {code}"),
            Self::UnknownTable(name) => write!(f, "Table '{name}' is not versioned"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// A committed unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Monotonically increasing identifier.
    pub id: i64,
    /// When the transaction was issued.
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    /// Client address that caused the write, if known.
    pub remote_addr: Option<String>,
}

impl Transaction {
    /// Creates a new Transaction.
    ///
    /// # Arguments
    ///
    /// * `id` - The transaction identifier
    /// * `issued_at` - When the transaction was issued
    /// * `remote_addr` - Optional client address
    #[must_use]
    pub const fn new(id: i64, issued_at: OffsetDateTime, remote_addr: Option<String>) -> Self {
        Self {
            id,
            issued_at,
            remote_addr,
        }
    }
}

/// The kind of write a version records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    Insert = 0,
    Update = 1,
    Delete = 2,
}

impl OperationType {
    /// Returns the stored integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for OperationType {
    type Error = HistoryError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Insert),
            1 => Ok(Self::Update),
            2 => Ok(Self::Delete),
            other => Err(HistoryError::UnknownOperation(other)),
        }
    }
}

/// Tables whose rows carry version history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionedTable {
    Businesses,
    Offices,
    Addresses,
    Parties,
    PartyRoles,
    ShareClasses,
    ShareSeries,
}

impl VersionedTable {
    pub const ALL: [Self; 7] = [
        Self::Businesses,
        Self::Offices,
        Self::Addresses,
        Self::Parties,
        Self::PartyRoles,
        Self::ShareClasses,
        Self::ShareSeries,
    ];

    /// Returns the table name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Businesses => "businesses",
            Self::Offices => "offices",
            Self::Addresses => "addresses",
            Self::Parties => "parties",
            Self::PartyRoles => "party_roles",
            Self::ShareClasses => "share_classes",
            Self::ShareSeries => "share_series",
        }
    }
}

impl FromStr for VersionedTable {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| HistoryError::UnknownTable(s.to_string()))
    }
}

impl fmt::Display for VersionedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One write to a versioned row, captured before commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowChange {
    pub table: VersionedTable,
    pub row_id: i64,
    pub operation: OperationType,
    /// Full row state after the write (before it, for deletes).
    pub snapshot: Value,
}

impl RowChange {
    #[must_use]
    pub const fn new(
        table: VersionedTable,
        row_id: i64,
        operation: OperationType,
        snapshot: Value,
    ) -> Self {
        Self {
            table,
            row_id,
            operation,
            snapshot,
        }
    }
}

/// The ordered writes of one unit of work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<RowChange>,
}

impl ChangeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Appends a change in write order.
    pub fn record(&mut self, change: RowChange) {
        self.changes.push(change);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The changes in the order they were recorded.
    #[must_use]
    pub fn changes(&self) -> &[RowChange] {
        &self.changes
    }

    /// Removes and returns every recorded change.
    pub fn take(&mut self) -> Vec<RowChange> {
        std::mem::take(&mut self.changes)
    }
}

/// A stored version of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub id: Option<i64>,
    pub table: VersionedTable,
    pub row_id: i64,
    /// Transaction that produced this version.
    pub transaction_id: i64,
    /// Transaction that superseded it, `None` while current.
    pub end_transaction_id: Option<i64>,
    pub operation: OperationType,
    pub snapshot: Value,
}

impl VersionRecord {
    /// Creates a current (not yet superseded) version from a change.
    #[must_use]
    pub fn from_change(change: &RowChange, transaction_id: i64) -> Self {
        Self {
            id: None,
            table: change.table,
            row_id: change.row_id,
            transaction_id,
            end_transaction_id: None,
            operation: change.operation,
            snapshot: change.snapshot.clone(),
        }
    }

    /// Whether this version was the row's state at transaction `tx`.
    #[must_use]
    pub fn is_valid_at(&self, tx: i64) -> bool {
        self.transaction_id <= tx && self.end_transaction_id.is_none_or(|end| end > tx)
    }
}

/// Reconstructs row snapshots as of transaction `tx`.
///
/// Rows whose valid version at `tx` is a delete, or that had no version yet,
/// are absent from the result. When several versions of one row claim
/// validity (several writes in the same transaction), the last one wins.
#[must_use]
pub fn reconstruct_as_of(records: &[VersionRecord], tx: i64) -> BTreeMap<i64, Value> {
    let mut latest: BTreeMap<i64, &VersionRecord> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_valid_at(tx)) {
        let replace: bool = latest.get(&record.row_id).is_none_or(|current| {
            (record.transaction_id, record.id) >= (current.transaction_id, current.id)
        });
        if replace {
            latest.insert(record.row_id, record);
        }
    }

    latest
        .into_iter()
        .filter(|(_, record)| record.operation != OperationType::Delete)
        .map(|(row_id, record)| (row_id, record.snapshot.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn version(
        row_id: i64,
        transaction_id: i64,
        end: Option<i64>,
        operation: OperationType,
        name: &str,
    ) -> VersionRecord {
        VersionRecord {
            id: None,
            table: VersionedTable::Businesses,
            row_id,
            transaction_id,
            end_transaction_id: end,
            operation,
            snapshot: json!({ "legal_name": name }),
        }
    }

    #[test]
    fn test_operation_codes_round_trip() {
        for op in [
            OperationType::Insert,
            OperationType::Update,
            OperationType::Delete,
        ] {
            assert_eq!(OperationType::try_from(op.code()), Ok(op));
        }
        assert_eq!(
            OperationType::try_from(7),
            Err(HistoryError::UnknownOperation(7))
        );
    }

    #[test]
    fn test_versioned_table_names() {
        assert_eq!(
            "party_roles".parse::<VersionedTable>(),
            Ok(VersionedTable::PartyRoles)
        );
        assert!("filings".parse::<VersionedTable>().is_err());
    }

    #[test]
    fn test_validity_window_is_half_open() {
        let record: VersionRecord = version(1, 5, Some(9), OperationType::Insert, "A");

        assert!(!record.is_valid_at(4));
        assert!(record.is_valid_at(5));
        assert!(record.is_valid_at(8));
        assert!(!record.is_valid_at(9));
    }

    #[test]
    fn test_open_version_valid_forever() {
        let record: VersionRecord = version(1, 5, None, OperationType::Update, "A");

        assert!(record.is_valid_at(5));
        assert!(record.is_valid_at(i64::MAX));
    }

    #[test]
    fn test_reconstruct_picks_version_valid_at_tx() {
        let records: Vec<VersionRecord> = vec![
            version(1, 1, Some(3), OperationType::Insert, "Original"),
            version(1, 3, None, OperationType::Update, "Renamed"),
            version(2, 2, None, OperationType::Insert, "Other"),
        ];

        let at_one: BTreeMap<i64, Value> = reconstruct_as_of(&records, 1);
        assert_eq!(at_one.len(), 1);
        assert_eq!(at_one[&1]["legal_name"], "Original");

        let at_three: BTreeMap<i64, Value> = reconstruct_as_of(&records, 3);
        assert_eq!(at_three[&1]["legal_name"], "Renamed");
        assert_eq!(at_three[&2]["legal_name"], "Other");
    }

    #[test]
    fn test_reconstruct_omits_deleted_rows() {
        let records: Vec<VersionRecord> = vec![
            version(1, 1, Some(4), OperationType::Insert, "Gone"),
            version(1, 4, None, OperationType::Delete, "Gone"),
        ];

        assert_eq!(reconstruct_as_of(&records, 3).len(), 1);
        assert!(reconstruct_as_of(&records, 4).is_empty());
    }

    #[test]
    fn test_change_set_preserves_order() {
        let mut changes: ChangeSet = ChangeSet::new();
        changes.record(RowChange::new(
            VersionedTable::Businesses,
            1,
            OperationType::Insert,
            json!({}),
        ));
        changes.record(RowChange::new(
            VersionedTable::Offices,
            7,
            OperationType::Insert,
            json!({}),
        ));

        assert_eq!(changes.len(), 2);
        assert_eq!(changes.changes()[1].table, VersionedTable::Offices);

        let taken: Vec<RowChange> = changes.take();
        assert_eq!(taken.len(), 2);
        assert!(changes.is_empty());
    }
}
