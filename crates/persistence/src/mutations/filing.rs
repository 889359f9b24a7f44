// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filing and document mutations.

use bizreg::StoredFiling;
use bizreg_domain::Document;
use bizreg_history::OperationType;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{DocumentRecord, FilingRecord};
use crate::diesel_schema::{documents, filings};
use crate::error::PersistenceError;

/// Inserts or updates a filing row.
///
/// The caller derives the status before saving.
///
/// # Errors
///
/// Returns an error if encoding or the write fails.
pub fn save_filing(
    conn: &mut SqliteConnection,
    filing: &StoredFiling,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: FilingRecord = FilingRecord::from_stored(filing)?;
    let saved: (i64, OperationType) = upsert_row!(conn, filings, filing.id, &record, "Filing")?;
    debug!(
        filing_id = saved.0,
        status = filing.status.as_str(),
        "Saved filing"
    );
    Ok(saved)
}

/// Deletes a filing row. Documents and corrections pointing at it are
/// detached by the schema.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was deleted.
pub fn delete_filing(conn: &mut SqliteConnection, filing_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(filings::table.find(filing_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Filing {filing_id} not found"
        )));
    }
    info!(filing_id, "Deleted filing");
    Ok(())
}

/// Inserts or updates a document row.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_document(
    conn: &mut SqliteConnection,
    document: &Document,
) -> Result<(i64, OperationType), PersistenceError> {
    let record: DocumentRecord = DocumentRecord::from(document);
    upsert_row!(conn, documents, document.id, &record, "Document")
}
