// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dissolution batch queries.

use bizreg_domain::{Batch, BatchProcessing, Furnishing};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{AddressRow, BatchProcessingRow, BatchRow, FurnishingRow};
use crate::diesel_schema::{addresses, batch_processing, batches, furnishings};
use crate::error::PersistenceError;

/// Lists every batch entry for a business together with its batch.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_batch_entries_for_business(
    conn: &mut SqliteConnection,
    business_id: i64,
) -> Result<Vec<(Batch, BatchProcessing)>, PersistenceError> {
    let rows: Vec<(BatchRow, BatchProcessingRow)> = batches::table
        .inner_join(batch_processing::table)
        .filter(batch_processing::business_id.eq(business_id))
        .order(batch_processing::id.asc())
        .select((BatchRow::as_select(), BatchProcessingRow::as_select()))
        .load(conn)?;

    rows.into_iter()
        .map(|(batch, processing)| Ok((batch.into_domain()?, processing.into_domain()?)))
        .collect()
}

/// Loads a batch processing entry by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the entry does not exist.
pub fn get_batch_processing(
    conn: &mut SqliteConnection,
    processing_id: i64,
) -> Result<BatchProcessing, PersistenceError> {
    batch_processing::table
        .find(processing_id)
        .select(BatchProcessingRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Batch processing {processing_id} not found"))
        })?
        .into_domain()
}

/// Lists the furnishings sent to a business, with their mailing addresses.
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be decoded.
pub fn list_furnishings_for_business(
    conn: &mut SqliteConnection,
    business_id: i64,
) -> Result<Vec<Furnishing>, PersistenceError> {
    let rows: Vec<FurnishingRow> = furnishings::table
        .filter(furnishings::business_id.eq(business_id))
        .order(furnishings::id.asc())
        .select(FurnishingRow::as_select())
        .load(conn)?;

    let mut result: Vec<Furnishing> = Vec::with_capacity(rows.len());
    for row in rows {
        let mut furnishing: Furnishing = row.into_domain()?;
        furnishing.mailing_address = addresses::table
            .filter(addresses::furnishing_id.eq(furnishing.id))
            .select(AddressRow::as_select())
            .first(conn)
            .optional()?
            .map(AddressRow::into_domain)
            .transpose()?;
        result.push(furnishing);
    }
    Ok(result)
}
