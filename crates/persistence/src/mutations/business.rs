// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business record mutations.
//!
//! These write rows only. Recording the writes in version history is the
//! job of the unit of work that calls them.

use bizreg_domain::{Address, Business, Office, Party, PartyRole, ShareClass, ShareSeries};
use bizreg_history::OperationType;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{
    AddressRecord, BusinessRecord, OfficeRecord, PartyRecord, PartyRoleRecord, ShareClassRecord,
    ShareSeriesRecord,
};
use crate::diesel_schema::{addresses, businesses, offices, parties, party_roles, share_classes, share_series};
use crate::error::PersistenceError;

/// Inserts or updates a business row.
///
/// # Errors
///
/// Returns an error if the write fails, including a duplicate identifier.
pub fn save_business(
    conn: &mut SqliteConnection,
    business: &Business,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: BusinessRecord = BusinessRecord::from(business);
    let saved: (i64, OperationType) = upsert_row!(conn, businesses, business.id, &record, "Business")?;
    debug!(
        business_id = saved.0,
        identifier = %business.identifier,
        "Saved business"
    );
    Ok(saved)
}

/// Inserts or updates an office row for `business_id`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_office(
    conn: &mut SqliteConnection,
    office: &Office,
    business_id: i64,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: OfficeRecord = OfficeRecord::new(office, business_id);
    upsert_row!(conn, offices, office.id, &record, "Office")
}

/// Inserts or updates an address row.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_address(
    conn: &mut SqliteConnection,
    address: &Address,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: AddressRecord = AddressRecord::from(address);
    upsert_row!(conn, addresses, address.id, &record, "Address")
}

/// Deletes an address row.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was deleted.
pub fn delete_address(conn: &mut SqliteConnection, address_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(addresses::table.find(address_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Address {address_id} not found"
        )));
    }
    debug!(address_id, "Deleted address");
    Ok(())
}

/// Inserts or updates a party row.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_party(
    conn: &mut SqliteConnection,
    party: &Party,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: PartyRecord = PartyRecord::from(party);
    upsert_row!(conn, parties, party.id, &record, "Party")
}

/// Inserts or updates a party role row pointing at `party_id`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_party_role(
    conn: &mut SqliteConnection,
    role: &PartyRole,
    party_id: i64,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: PartyRoleRecord = PartyRoleRecord::new(role, party_id);
    upsert_row!(conn, party_roles, role.id, &record, "Party role")
}

/// Deletes a party role row. The party itself is kept.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was deleted.
pub fn delete_party_role(conn: &mut SqliteConnection, role_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(party_roles::table.find(role_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Party role {role_id} not found"
        )));
    }
    debug!(role_id, "Deleted party role");
    Ok(())
}

/// Inserts or updates a share class row. Series are written separately.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_share_class(
    conn: &mut SqliteConnection,
    class: &ShareClass,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: ShareClassRecord = ShareClassRecord::from(class);
    upsert_row!(conn, share_classes, class.id, &record, "Share class")
}

/// Inserts or updates a share series row under `share_class_id`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_share_series(
    conn: &mut SqliteConnection,
    series: &ShareSeries,
    share_class_id: i64,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: ShareSeriesRecord = ShareSeriesRecord::new(series, share_class_id);
    upsert_row!(conn, share_series, series.id, &record, "Share series")
}
