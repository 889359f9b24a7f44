// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `business` — Businesses and their offices, addresses, parties and shares
//! - `filing` — Filings and documents
//! - `versioning` — Transactions and version records
//! - `batch` — Involuntary dissolution batches and furnishings
//!
//! Row writes return the row ID together with the operation performed so the
//! unit of work can record it for version history.

/// Inserts a record when `id` is `None`, otherwise updates the row.
///
/// Evaluates to `Result<(i64, OperationType), PersistenceError>`. An update
/// that touches no row returns `PersistenceError::NotFound` from the
/// enclosing function.
macro_rules! upsert_row {
    ($conn:expr, $table:ident, $id:expr, $record:expr, $label:literal) => {{
        match $id {
            Some(id) => {
                let updated: usize = diesel::update($table::table.find(id))
                    .set($record)
                    .execute($conn)?;
                if updated == 0 {
                    return Err(PersistenceError::NotFound(format!(
                        concat!($label, " {} not found"),
                        id
                    )));
                }
                Ok::<(i64, OperationType), PersistenceError>((id, OperationType::Update))
            }
            None => {
                diesel::insert_into($table::table)
                    .values($record)
                    .execute($conn)?;
                Ok::<(i64, OperationType), PersistenceError>((
                    $conn.get_last_insert_rowid()?,
                    OperationType::Insert,
                ))
            }
        }
    }};
}

pub mod batch;
pub mod business;
pub mod filing;
pub mod versioning;
