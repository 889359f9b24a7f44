// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens an in-memory database, so connection
//! setup and migrations are exercised implicitly. These cover isolation and
//! the file-backed path.

use crate::Persistence;
use crate::error::PersistenceError;

use super::helpers::{create_persistence, seed_business};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = create_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_persistence();
    let mut db2: Persistence = create_persistence();

    seed_business(&mut db1, "BC1234567");

    assert!(db1.find_business("BC1234567").unwrap().is_some());
    assert!(
        db2.find_business("BC1234567").unwrap().is_none(),
        "db2 must not see db1's business"
    );
}

#[test]
fn test_file_database_survives_reopen() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "bizreg-persistence-test-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        seed_business(&mut persistence, "BC7654321");
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let business = reopened.find_business("BC7654321").unwrap();
    assert!(business.is_some());

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
