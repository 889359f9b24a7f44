// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Versioning engine selection and version planning.
//!
//! Two history engines exist while the registry migrates between them. The
//! `Continuum` engine writes one version per recorded change; the `Custom`
//! engine collapses the changes a unit of work made to each row into a
//! single version. Both produce the same as-of results.
//!
//! The engine is picked from the `enable-new-versioning` flag the first time
//! a session opens a transaction, and that choice sticks for the session.
//! If the process-wide active engine disagrees with the session's choice it
//! is switched over.

use bizreg_history::{OperationType, RowChange, VersionRecord, VersionedTable};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Flag that selects the custom versioning engine.
pub const NEW_VERSIONING_FLAG: &str = "enable-new-versioning";

/// Source of feature flag values.
pub trait FeatureFlags {
    /// Whether `flag` is enabled.
    fn is_enabled(&self, flag: &str) -> bool;
}

/// A fixed set of enabled flags, typically read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticFlags {
    enabled: BTreeSet<String>,
}

impl StaticFlags {
    #[must_use]
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: flags.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a comma-separated flag list, ignoring blanks.
    #[must_use]
    pub fn from_csv(value: &str) -> Self {
        Self::new(
            value
                .split(',')
                .map(str::trim)
                .filter(|flag| !flag.is_empty()),
        )
    }

    pub fn enable(&mut self, flag: &str) {
        self.enabled.insert(flag.to_string());
    }
}

impl FeatureFlags for StaticFlags {
    fn is_enabled(&self, flag: &str) -> bool {
        self.enabled.contains(flag)
    }
}

/// The two history engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersioningKind {
    /// The original engine ("old").
    Continuum,
    /// The replacement engine ("new").
    Custom,
}

impl VersioningKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Continuum => "old",
            Self::Custom => "new",
        }
    }

    /// The engine the flags currently select.
    #[must_use]
    pub fn from_flags(flags: &dyn FeatureFlags) -> Self {
        if flags.is_enabled(NEW_VERSIONING_FLAG) {
            Self::Custom
        } else {
            Self::Continuum
        }
    }

    /// The planner for this engine.
    #[must_use]
    pub const fn engine(self) -> &'static dyn VersioningEngine {
        match self {
            Self::Continuum => &ContinuumEngine,
            Self::Custom => &CustomEngine,
        }
    }
}

/// Per-session state carried across its transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionInfo {
    versioning: Option<VersioningKind>,
}

impl SessionInfo {
    #[must_use]
    pub const fn new() -> Self {
        Self { versioning: None }
    }

    /// The engine chosen for this session, once one has been.
    #[must_use]
    pub const fn versioning(&self) -> Option<VersioningKind> {
        self.versioning
    }
}

/// Tracks the process-wide active engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersioningProxy {
    active: VersioningKind,
    switches: u64,
}

impl Default for VersioningProxy {
    fn default() -> Self {
        Self::new(VersioningKind::Continuum)
    }
}

impl VersioningProxy {
    #[must_use]
    pub const fn new(active: VersioningKind) -> Self {
        Self {
            active,
            switches: 0,
        }
    }

    #[must_use]
    pub const fn active(&self) -> VersioningKind {
        self.active
    }

    /// How many times the active engine has been switched.
    #[must_use]
    pub const fn switches(&self) -> u64 {
        self.switches
    }

    /// Resolves the engine for a session, switching the active engine when
    /// the session's cached choice differs from it.
    ///
    /// # Arguments
    ///
    /// * `session` - The session; its choice is cached on first use
    /// * `flags` - Flag source consulted when the session has no choice yet
    pub fn ensure(&mut self, session: &mut SessionInfo, flags: &dyn FeatureFlags) -> VersioningKind {
        let kind: VersioningKind = *session
            .versioning
            .get_or_insert_with(|| VersioningKind::from_flags(flags));

        if self.active != kind {
            info!(
                from = self.active.as_str(),
                to = kind.as_str(),
                "Switching versioning engine"
            );
            self.active = kind;
            self.switches += 1;
        }
        kind
    }
}

/// One step of applying a version plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStep {
    /// Close the row's open version at the plan's transaction.
    Close {
        table: VersionedTable,
        row_id: i64,
    },
    /// Insert a new open version.
    Insert(VersionRecord),
}

/// Ordered steps that record a unit of work in history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPlan {
    pub transaction_id: i64,
    pub steps: Vec<VersionStep>,
}

impl VersionPlan {
    /// The version records the plan inserts.
    pub fn inserts(&self) -> impl Iterator<Item = &VersionRecord> {
        self.steps.iter().filter_map(|step| match step {
            VersionStep::Insert(record) => Some(record),
            VersionStep::Close { .. } => None,
        })
    }

    fn push_version(&mut self, change: &RowChange) {
        self.steps.push(VersionStep::Close {
            table: change.table,
            row_id: change.row_id,
        });
        self.steps.push(VersionStep::Insert(VersionRecord::from_change(
            change,
            self.transaction_id,
        )));
    }
}

/// Turns the changes of a unit of work into a version plan.
pub trait VersioningEngine: Sync {
    fn kind(&self) -> VersioningKind;

    /// Plans the history writes for `changes` under transaction `tx`.
    fn plan(&self, changes: &[RowChange], tx: i64) -> VersionPlan;
}

/// Writes one version per change, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuumEngine;

impl VersioningEngine for ContinuumEngine {
    fn kind(&self) -> VersioningKind {
        VersioningKind::Continuum
    }

    fn plan(&self, changes: &[RowChange], tx: i64) -> VersionPlan {
        let mut plan: VersionPlan = VersionPlan {
            transaction_id: tx,
            steps: Vec::with_capacity(changes.len() * 2),
        };
        for change in changes {
            plan.push_version(change);
        }
        plan
    }
}

/// Writes one version per touched row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomEngine;

/// Combines two successive operations on the same row.
///
/// `None` means the row was created and removed within the unit of work.
const fn collapse(previous: Option<OperationType>, next: OperationType) -> Option<OperationType> {
    match (previous, next) {
        (None, op) => Some(op),
        (Some(OperationType::Insert), OperationType::Update) => Some(OperationType::Insert),
        (Some(OperationType::Insert), OperationType::Delete) => None,
        (Some(OperationType::Delete), _) | (Some(OperationType::Update), OperationType::Insert) => {
            Some(OperationType::Update)
        }
        (Some(OperationType::Update | OperationType::Insert), op) => Some(op),
    }
}

impl VersioningEngine for CustomEngine {
    fn kind(&self) -> VersioningKind {
        VersioningKind::Custom
    }

    fn plan(&self, changes: &[RowChange], tx: i64) -> VersionPlan {
        // (collapsed operation, last snapshot) per row, plus first-touch order
        let mut collapsed: BTreeMap<(VersionedTable, i64), (Option<OperationType>, &RowChange)> =
            BTreeMap::new();
        let mut order: Vec<(VersionedTable, i64)> = Vec::new();

        for change in changes {
            let key: (VersionedTable, i64) = (change.table, change.row_id);
            let entry = collapsed.entry(key).or_insert_with(|| {
                order.push(key);
                (None, change)
            });
            entry.0 = collapse(entry.0, change.operation);
            entry.1 = change;
        }

        let mut plan: VersionPlan = VersionPlan {
            transaction_id: tx,
            steps: Vec::with_capacity(order.len() * 2),
        };
        for key in order {
            if let Some((Some(operation), last)) = collapsed.get(&key) {
                let change: RowChange =
                    RowChange::new(key.0, key.1, *operation, last.snapshot.clone());
                plan.push_version(&change);
            }
        }
        plan
    }
}
