// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transaction and version record mutations.

use bizreg::{VersionPlan, VersionStep};
use bizreg_domain::format_datetime;
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewTransaction, NewVersionRecord};
use crate::diesel_schema::{transactions, version_records};
use crate::error::PersistenceError;

/// Allocates a transaction row and returns its ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `issued_at` - When the unit of work started
/// * `remote_addr` - Address of the client that caused the change, if known
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_transaction(
    conn: &mut SqliteConnection,
    issued_at: OffsetDateTime,
    remote_addr: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(transactions::table)
        .values(&NewTransaction {
            issued_at: format_datetime(issued_at),
            remote_addr,
        })
        .execute(conn)?;
    let transaction_id: i64 = conn.get_last_insert_rowid()?;
    debug!(transaction_id, "Allocated transaction");
    Ok(transaction_id)
}

/// Writes a version plan in step order.
///
/// A close step ends every open version of the row at the plan's
/// transaction, including one inserted earlier in the same plan.
///
/// # Returns
///
/// The number of version records inserted.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn apply_version_plan(
    conn: &mut SqliteConnection,
    plan: &VersionPlan,
) -> Result<usize, PersistenceError> {
    let mut inserted: usize = 0;
    for step in &plan.steps {
        match step {
            VersionStep::Close { table, row_id } => {
                diesel::update(version_records::table)
                    .filter(version_records::table_name.eq(table.as_str()))
                    .filter(version_records::row_id.eq(*row_id))
                    .filter(version_records::end_transaction_id.is_null())
                    .set(version_records::end_transaction_id.eq(Some(plan.transaction_id)))
                    .execute(conn)?;
            }
            VersionStep::Insert(record) => {
                diesel::insert_into(version_records::table)
                    .values(&NewVersionRecord::from_domain(record)?)
                    .execute(conn)?;
                inserted += 1;
            }
        }
    }
    Ok(inserted)
}
