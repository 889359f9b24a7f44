// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    NEW_VERSIONING_FLAG, SessionInfo, StaticFlags, VersionPlan, VersionStep, VersioningEngine,
    VersioningKind, VersioningProxy,
};
use bizreg_history::{
    OperationType, RowChange, VersionRecord, VersionedTable, reconstruct_as_of,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;

fn change(row_id: i64, operation: OperationType, name: &str) -> RowChange {
    RowChange::new(
        VersionedTable::Businesses,
        row_id,
        operation,
        json!({ "legal_name": name }),
    )
}

/// Applies a plan to an in-memory version table the way storage does.
fn apply(records: &mut Vec<VersionRecord>, plan: &VersionPlan) {
    for step in &plan.steps {
        match step {
            VersionStep::Close { table, row_id } => {
                for record in records.iter_mut() {
                    if record.table == *table
                        && record.row_id == *row_id
                        && record.end_transaction_id.is_none()
                    {
                        record.end_transaction_id = Some(plan.transaction_id);
                    }
                }
            }
            VersionStep::Insert(record) => {
                let mut record: VersionRecord = record.clone();
                record.id = Some(i64::try_from(records.len()).unwrap() + 1);
                records.push(record);
            }
        }
    }
}

#[test]
fn test_flag_selects_engine() {
    assert_eq!(
        VersioningKind::from_flags(&StaticFlags::default()),
        VersioningKind::Continuum
    );
    assert_eq!(
        VersioningKind::from_flags(&StaticFlags::from_csv(" other, enable-new-versioning ,")),
        VersioningKind::Custom
    );
}

#[test]
fn test_session_caches_first_selection() {
    let mut proxy: VersioningProxy = VersioningProxy::default();
    let mut session: SessionInfo = SessionInfo::new();
    let mut flags: StaticFlags = StaticFlags::default();

    assert_eq!(proxy.ensure(&mut session, &flags), VersioningKind::Continuum);

    flags.enable(NEW_VERSIONING_FLAG);
    assert_eq!(proxy.ensure(&mut session, &flags), VersioningKind::Continuum);
    assert_eq!(session.versioning(), Some(VersioningKind::Continuum));
    assert_eq!(proxy.switches(), 0);
}

#[test]
fn test_mismatched_session_switches_engine() {
    let mut proxy: VersioningProxy = VersioningProxy::new(VersioningKind::Continuum);
    let flags: StaticFlags = StaticFlags::new([NEW_VERSIONING_FLAG]);

    let mut new_session: SessionInfo = SessionInfo::new();
    assert_eq!(proxy.ensure(&mut new_session, &flags), VersioningKind::Custom);
    assert_eq!(proxy.active(), VersioningKind::Custom);
    assert_eq!(proxy.switches(), 1);

    let mut old_session: SessionInfo = SessionInfo::new();
    assert_eq!(
        proxy.ensure(&mut old_session, &StaticFlags::default()),
        VersioningKind::Continuum
    );
    assert_eq!(proxy.active(), VersioningKind::Continuum);
    assert_eq!(proxy.switches(), 2);
}

#[test]
fn test_continuum_writes_every_change() {
    let changes = vec![
        change(1, OperationType::Insert, "A"),
        change(1, OperationType::Update, "B"),
    ];
    let plan: VersionPlan = VersioningKind::Continuum.engine().plan(&changes, 4);
    assert_eq!(plan.inserts().count(), 2);
}

#[test]
fn test_custom_collapses_changes_per_row() {
    let engine: &dyn VersioningEngine = VersioningKind::Custom.engine();

    let plan: VersionPlan = engine.plan(
        &[
            change(1, OperationType::Insert, "A"),
            change(1, OperationType::Update, "B"),
        ],
        4,
    );
    let inserts: Vec<&VersionRecord> = plan.inserts().collect();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].operation, OperationType::Insert);
    assert_eq!(inserts[0].snapshot["legal_name"], "B");

    let plan: VersionPlan = engine.plan(
        &[
            change(2, OperationType::Insert, "A"),
            change(2, OperationType::Delete, "A"),
        ],
        4,
    );
    assert_eq!(plan.inserts().count(), 0);

    let plan: VersionPlan = engine.plan(
        &[
            change(3, OperationType::Update, "A"),
            change(3, OperationType::Delete, "A"),
        ],
        4,
    );
    let inserts: Vec<&VersionRecord> = plan.inserts().collect();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].operation, OperationType::Delete);
}

#[test]
fn test_engines_agree_on_as_of_results() {
    let units: Vec<Vec<RowChange>> = vec![
        vec![
            change(1, OperationType::Insert, "Original"),
            change(1, OperationType::Update, "Original Ltd"),
            change(2, OperationType::Insert, "Temp"),
        ],
        vec![
            change(1, OperationType::Update, "Renamed"),
            change(2, OperationType::Delete, "Temp"),
            change(3, OperationType::Insert, "Third"),
            change(3, OperationType::Delete, "Third"),
        ],
    ];

    let mut continuum: Vec<VersionRecord> = Vec::new();
    let mut custom: Vec<VersionRecord> = Vec::new();
    for (offset, unit) in units.iter().enumerate() {
        let tx: i64 = i64::try_from(offset).unwrap() + 1;
        apply(
            &mut continuum,
            &VersioningKind::Continuum.engine().plan(unit, tx),
        );
        apply(&mut custom, &VersioningKind::Custom.engine().plan(unit, tx));
    }

    for tx in 0..=3 {
        let old: BTreeMap<i64, Value> = reconstruct_as_of(&continuum, tx);
        let new: BTreeMap<i64, Value> = reconstruct_as_of(&custom, tx);
        assert_eq!(old, new, "engines disagree at transaction {tx}");
    }

    let at_one: BTreeMap<i64, Value> = reconstruct_as_of(&custom, 1);
    assert_eq!(at_one[&1]["legal_name"], "Original Ltd");
    assert!(at_one.contains_key(&2));

    let at_two: BTreeMap<i64, Value> = reconstruct_as_of(&custom, 2);
    assert_eq!(at_two[&1]["legal_name"], "Renamed");
    assert!(!at_two.contains_key(&2));
    assert!(!at_two.contains_key(&3));
}
