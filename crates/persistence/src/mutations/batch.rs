// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Involuntary dissolution batch mutations.

use bizreg_domain::{AddressType, Batch, BatchProcessing, Furnishing};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{AddressRecord, BatchProcessingRecord, BatchRecord, FurnishingRecord};
use crate::diesel_schema::{addresses, batch_processing, batches, furnishings};
use crate::error::PersistenceError;

/// Inserts a batch and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_batch(conn: &mut SqliteConnection, batch: &Batch) -> Result<i64, PersistenceError> {
    diesel::insert_into(batches::table)
        .values(&BatchRecord::from(batch))
        .execute(conn)?;
    let batch_id: i64 = conn.get_last_insert_rowid()?;
    info!(batch_id, batch_type = batch.batch_type.as_str(), "Created batch");
    Ok(batch_id)
}

/// Inserts a batch processing entry and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails, including an unknown batch or
/// business.
pub fn create_batch_processing(
    conn: &mut SqliteConnection,
    processing: &BatchProcessing,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(batch_processing::table)
        .values(&BatchProcessingRecord::from_domain(processing)?)
        .execute(conn)?;
    let processing_id: i64 = conn.get_last_insert_rowid()?;
    debug!(
        processing_id,
        batch_id = processing.batch_id,
        business_id = processing.business_id,
        "Added business to batch"
    );
    Ok(processing_id)
}

/// Overwrites a batch processing entry.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the entry does not exist.
pub fn update_batch_processing(
    conn: &mut SqliteConnection,
    processing_id: i64,
    processing: &BatchProcessing,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(batch_processing::table.find(processing_id))
        .set(&BatchProcessingRecord::from_domain(processing)?)
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Batch processing {processing_id} not found"
        )));
    }
    debug!(processing_id, status = processing.status.as_str(), "Updated batch processing");
    Ok(())
}

/// Inserts a furnishing and its mailing address, returning the furnishing ID.
///
/// # Errors
///
/// Returns an error if either insert fails.
pub fn create_furnishing(
    conn: &mut SqliteConnection,
    furnishing: &Furnishing,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(furnishings::table)
        .values(&FurnishingRecord::from(furnishing))
        .execute(conn)?;
    let furnishing_id: i64 = conn.get_last_insert_rowid()?;

    if let Some(address) = &furnishing.mailing_address {
        let mut record: AddressRecord = AddressRecord::from(address);
        record.address_type = AddressType::Furnishing.as_str().to_string();
        record.furnishing_id = Some(furnishing_id);
        record.business_id = Some(furnishing.business_id);
        diesel::insert_into(addresses::table)
            .values(&record)
            .execute(conn)?;
    }

    debug!(
        furnishing_id,
        furnishing_name = furnishing.furnishing_name.as_str(),
        "Recorded furnishing"
    );
    Ok(furnishing_id)
}
