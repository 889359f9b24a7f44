// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filing and document queries.

use bizreg::{FilingStatus, StoredFiling};
use bizreg_domain::Document;
use diesel::SqliteConnection;
use diesel::dsl::exists;
use diesel::prelude::*;

use crate::data_models::{DocumentRow, FilingRow};
use crate::diesel_schema::{documents, filings};
use crate::error::PersistenceError;

/// Loads a filing by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the filing does not exist.
pub fn get_filing(conn: &mut SqliteConnection, filing_id: i64) -> Result<StoredFiling, PersistenceError> {
    filings::table
        .find(filing_id)
        .select(FilingRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Filing {filing_id} not found")))?
        .into_stored()
}

/// Lists the filings of a business in filing date order, optionally only
/// those with a given stored status.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_filings_for_business(
    conn: &mut SqliteConnection,
    business_id: i64,
    status: Option<FilingStatus>,
) -> Result<Vec<StoredFiling>, PersistenceError> {
    let query = filings::table
        .filter(filings::business_id.eq(business_id))
        .order((filings::filing_date.asc(), filings::id.asc()))
        .select(FilingRow::as_select());

    let rows: Vec<FilingRow> = match status {
        Some(status) => query
            .filter(filings::status.eq(status.as_str()))
            .load(conn)?,
        None => query.load(conn)?,
    };

    rows.into_iter().map(FilingRow::into_stored).collect()
}

/// Whether the business has a completed filing of `filing_type`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn has_completed_filing(
    conn: &mut SqliteConnection,
    business_id: i64,
    filing_type: &str,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(exists(
        filings::table
            .filter(filings::business_id.eq(business_id))
            .filter(filings::filing_type.eq(filing_type))
            .filter(filings::status.eq(FilingStatus::Completed.as_str())),
    ))
    .get_result(conn)?)
}

/// Lists the documents attached to a filing.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_documents_for_filing(
    conn: &mut SqliteConnection,
    filing_id: i64,
) -> Result<Vec<Document>, PersistenceError> {
    documents::table
        .filter(documents::filing_id.eq(filing_id))
        .order(documents::id.asc())
        .select(DocumentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(DocumentRow::into_domain)
        .collect()
}
