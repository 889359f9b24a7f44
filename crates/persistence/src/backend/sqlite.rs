// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening, tuning and migrating `SQLite` registry databases.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits on a locked file before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Where the database lives. File databases get WAL journaling and a busy
/// timeout; shared in-memory ones only need foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Memory,
    File,
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when the
/// PRAGMA reports enforcement is off.
pub fn check_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma =
        diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    debug!("foreign keys enforced");
    Ok(())
}

fn pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    diesel::sql_query(statement)
        .execute(conn)
        .map(|_| ())
        .map_err(|e| PersistenceError::QueryFailed(format!("{statement}: {e}")))
}

/// Opens `database_url`, applies the connection PRAGMAs for `storage`,
/// runs pending migrations and confirms foreign keys are enforced.
///
/// # Arguments
///
/// * `database_url` - A file path, or a `file:` URI for a shared in-memory
///   database
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA, or a migration fails.
pub fn open(database_url: &str, storage: Storage) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    pragma(&mut conn, "PRAGMA foreign_keys = ON")?;
    if storage == Storage::File {
        pragma(&mut conn, "PRAGMA journal_mode = WAL")?;
        pragma(&mut conn, &format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    info!(database_url, ?storage, applied, "Registry database ready");

    check_foreign_keys(&mut conn)?;
    Ok(conn)
}
