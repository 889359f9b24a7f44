// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Version history queries and as-of reconstruction.
//!
//! A profile as of transaction `tx` is rebuilt purely from version records:
//! for each versioned table the version valid at `tx` is taken per row, rows
//! whose valid version is a delete are dropped, and the surviving snapshots
//! are joined the same way the current profile is.

use bizreg_domain::{
    Address, Business, BusinessProfile, Office, Party, PartyRole, ShareClass, ShareSeries,
};
use bizreg_history::{Transaction, VersionRecord, VersionedTable, reconstruct_as_of};
use diesel::SqliteConnection;
use diesel::prelude::*;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use tracing::debug;

use crate::data_models::{TransactionRow, VersionRecordRow};
use crate::diesel_schema::{transactions, version_records};
use crate::error::PersistenceError;
use crate::queries::business::{ProfileParts, assemble_profile};

/// Loads a transaction by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the transaction does not exist.
pub fn get_transaction(
    conn: &mut SqliteConnection,
    transaction_id: i64,
) -> Result<Transaction, PersistenceError> {
    transactions::table
        .find(transaction_id)
        .select(TransactionRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Transaction {transaction_id} not found"))
        })?
        .into_domain()
}

/// Lists every version of one row, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a record cannot be decoded.
pub fn list_versions_for_row(
    conn: &mut SqliteConnection,
    table: VersionedTable,
    row_id: i64,
) -> Result<Vec<VersionRecord>, PersistenceError> {
    version_records::table
        .filter(version_records::table_name.eq(table.as_str()))
        .filter(version_records::row_id.eq(row_id))
        .order(version_records::id.asc())
        .select(VersionRecordRow::as_select())
        .load(conn)?
        .into_iter()
        .map(VersionRecordRow::into_domain)
        .collect()
}

/// Lists the versions of `table` written at or before transaction `tx`.
///
/// # Errors
///
/// Returns an error if the query fails or a record cannot be decoded.
pub fn list_versions_up_to(
    conn: &mut SqliteConnection,
    table: VersionedTable,
    tx: i64,
) -> Result<Vec<VersionRecord>, PersistenceError> {
    version_records::table
        .filter(version_records::table_name.eq(table.as_str()))
        .filter(version_records::transaction_id.le(tx))
        .order(version_records::id.asc())
        .select(VersionRecordRow::as_select())
        .load(conn)?
        .into_iter()
        .map(VersionRecordRow::into_domain)
        .collect()
}

fn rows_as_of<T: DeserializeOwned>(
    conn: &mut SqliteConnection,
    table: VersionedTable,
    tx: i64,
) -> Result<Vec<T>, PersistenceError> {
    let records: Vec<VersionRecord> = list_versions_up_to(conn, table, tx)?;
    reconstruct_as_of(&records, tx)
        .into_values()
        .map(|snapshot| serde_json::from_value::<T>(snapshot).map_err(PersistenceError::from))
        .collect()
}

/// Rebuilds a business profile as it stood at transaction `tx`.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the business had no live version
/// at `tx`, or an error if a query fails or a snapshot cannot be decoded.
pub fn load_profile_as_of(
    conn: &mut SqliteConnection,
    business_id: i64,
    tx: i64,
) -> Result<BusinessProfile, PersistenceError> {
    debug!(business_id, tx, "Reconstructing business profile");

    let business_versions: Vec<VersionRecord> =
        list_versions_for_row(conn, VersionedTable::Businesses, business_id)?;
    let business: Business = reconstruct_as_of(&business_versions, tx)
        .remove(&business_id)
        .map(serde_json::from_value::<Business>)
        .transpose()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!(
                "Business {business_id} did not exist at transaction {tx}"
            ))
        })?;

    let offices: Vec<Office> = rows_as_of::<Office>(conn, VersionedTable::Offices, tx)?
        .into_iter()
        .filter(|o| o.business_id == Some(business_id))
        .collect();
    let office_ids: BTreeSet<i64> = offices.iter().filter_map(|o| o.id).collect();

    let party_roles: Vec<PartyRole> = rows_as_of::<PartyRole>(conn, VersionedTable::PartyRoles, tx)?
        .into_iter()
        .filter(|r| r.business_id == Some(business_id))
        .collect();
    let party_ids: BTreeSet<i64> = party_roles.iter().filter_map(|r| r.party.id).collect();

    let parties: Vec<Party> = rows_as_of::<Party>(conn, VersionedTable::Parties, tx)?
        .into_iter()
        .filter(|p| p.id.is_some_and(|id| party_ids.contains(&id)))
        .collect();

    let addresses: Vec<Address> = rows_as_of::<Address>(conn, VersionedTable::Addresses, tx)?
        .into_iter()
        .filter(|a| {
            a.office_id.is_some_and(|id| office_ids.contains(&id))
                || a.party_id.is_some_and(|id| party_ids.contains(&id))
        })
        .collect();

    let share_classes: Vec<ShareClass> =
        rows_as_of::<ShareClass>(conn, VersionedTable::ShareClasses, tx)?
            .into_iter()
            .filter(|c| c.business_id == Some(business_id))
            .collect();
    let class_ids: BTreeSet<i64> = share_classes.iter().filter_map(|c| c.id).collect();

    let share_series: Vec<ShareSeries> =
        rows_as_of::<ShareSeries>(conn, VersionedTable::ShareSeries, tx)?
            .into_iter()
            .filter(|s| s.share_class_id.is_some_and(|id| class_ids.contains(&id)))
            .collect();

    Ok(assemble_profile(
        business,
        ProfileParts {
            offices,
            addresses,
            party_roles,
            parties,
            share_classes,
            share_series,
        },
    ))
}
