// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw-SQL corner of the storage layer.
//!
//! Registry reads and writes are Diesel DSL in `queries/` and `mutations/`.
//! What the DSL cannot say (PRAGMAs, `last_insert_rowid()`, opening and
//! migrating a database) lives here, behind [`PersistenceBackend`] so the
//! mutation helpers stay generic over the connection.

pub mod sqlite;

use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

pub trait PersistenceBackend: Connection {
    /// Id of the row the last `INSERT` on this connection created.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Fails unless the connection enforces foreign keys.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when it
    /// does not.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::check_foreign_keys(self)
    }
}
