// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the business registry.
//!
//! Storage is `SQLite` through Diesel, with migrations embedded in the
//! binary. Foreign key enforcement is verified when a database is opened.
//!
//! ## Units of work
//!
//! All writes go through [`Persistence::transaction`], which runs a closure
//! against a [`Session`] inside one database transaction. Changes to the
//! versioned tables (businesses, offices, addresses, parties, party roles,
//! share classes and share series) are recorded in `version_records` under a
//! transaction row that is allocated on the first versioned change.
//!
//! ## Versioning engines
//!
//! The engine that writes history is chosen per session from the
//! `enable-new-versioning` flag. Both engines answer as-of queries the same
//! way; they differ only in how many version rows a unit of work produces.
//!
//! ## Testing
//!
//! Tests run against in-memory databases. Every call to
//! [`Persistence::new_in_memory`] gets its own shared-cache database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod session;

#[cfg(test)]
mod tests;

use bizreg::{
    FeatureFlags, Filing, FilingStatus, SessionInfo, StaticFlags, VersioningKind, VersioningProxy,
};
use bizreg_domain::{
    Batch, BatchProcessing, BatchProcessingStatus, Business, BusinessProfile, Document,
    Furnishing, StandingFacts, in_dissolution,
};
use bizreg_history::{Transaction, VersionRecord, VersionedTable};
use diesel::SqliteConnection;
use diesel::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, OffsetDateTime};
use tracing::info;

pub use error::PersistenceError;
pub use session::Session;

use backend::PersistenceBackend;
use backend::sqlite::Storage;

/// Filing type whose completion clears the transition requirement.
const TRANSITION_FILING_TYPE: &str = "transition";

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Registry storage with version history.
pub struct Persistence {
    conn: SqliteConnection,
    proxy: VersioningProxy,
    session_info: SessionInfo,
    flags: Box<dyn FeatureFlags + Send>,
}

impl Persistence {
    fn from_connection(conn: SqliteConnection) -> Self {
        Self {
            conn,
            proxy: VersioningProxy::default(),
            session_info: SessionInfo::new(),
            flags: Box::new(StaticFlags::default()),
        }
    }

    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::open(&shared_memory_url, Storage::Memory)?;
        Ok(Self::from_connection(conn))
    }

    /// Creates a persistence adapter over a database file, creating and
    /// migrating it as needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open(path_str, Storage::File)?;
        info!(path = path_str, "Opened registry database");
        Ok(Self::from_connection(conn))
    }

    /// Replaces the feature flag source.
    #[must_use]
    pub fn with_flags(mut self, flags: impl FeatureFlags + Send + 'static) -> Self {
        self.set_flags(flags);
        self
    }

    /// Replaces the feature flag source. The current session keeps the
    /// engine it already chose; call [`Self::start_session`] to re-read it.
    pub fn set_flags(&mut self, flags: impl FeatureFlags + Send + 'static) {
        self.flags = Box::new(flags);
    }

    /// Starts a new session, forgetting the engine the previous one chose.
    pub const fn start_session(&mut self) {
        self.session_info = SessionInfo::new();
    }

    /// The engine currently writing history.
    #[must_use]
    pub const fn active_versioning(&self) -> VersioningKind {
        self.proxy.active()
    }

    /// How many times the active engine has been switched.
    #[must_use]
    pub const fn versioning_switches(&self) -> u64 {
        self.proxy.switches()
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Units of work
    // ========================================================================

    /// Runs `work` as one unit of work.
    ///
    /// The closure's writes and their history are committed together, or
    /// not at all if it returns an error.
    ///
    /// # Arguments
    ///
    /// * `remote_addr` - Address of the client causing the change, if known
    /// * `work` - The writes to perform
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or an error if history cannot be written.
    pub fn transaction<T, F>(
        &mut self,
        remote_addr: Option<&str>,
        work: F,
    ) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Session<'_>) -> Result<T, PersistenceError>,
    {
        let versioning: VersioningKind = self
            .proxy
            .ensure(&mut self.session_info, self.flags.as_ref());
        let issued_at: OffsetDateTime = OffsetDateTime::now_utc();

        self.conn.transaction::<T, PersistenceError, _>(|conn| {
            let mut session: Session<'_> = Session::new(conn, versioning, remote_addr, issued_at);
            let value: T = work(&mut session)?;
            session.commit()?;
            Ok(value)
        })
    }

    // ========================================================================
    // Businesses
    // ========================================================================

    /// Looks up a business by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_business(&mut self, identifier: &str) -> Result<Option<Business>, PersistenceError> {
        queries::business::find_business_by_identifier(&mut self.conn, identifier)
    }

    /// Loads a business by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the business does not exist.
    pub fn get_business(&mut self, business_id: i64) -> Result<Business, PersistenceError> {
        queries::business::get_business(&mut self.conn, business_id)
    }

    /// Loads the current profile of a business.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the business does not exist.
    pub fn business_profile(&mut self, business_id: i64) -> Result<BusinessProfile, PersistenceError> {
        queries::business::load_current_profile(&mut self.conn, business_id)
    }

    /// Rebuilds a business profile as it stood at transaction `tx`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the business did not exist at `tx`.
    pub fn business_profile_as_of(
        &mut self,
        business_id: i64,
        tx: i64,
    ) -> Result<BusinessProfile, PersistenceError> {
        queries::history::load_profile_as_of(&mut self.conn, business_id, tx)
    }

    /// Rebuilds the profile of the filing's business as of the transaction
    /// that applied the filing.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the filing does not exist, has
    /// no business, or has not been applied.
    pub fn business_profile_for_filing(
        &mut self,
        filing_id: i64,
    ) -> Result<BusinessProfile, PersistenceError> {
        let filing: Filing = self.get_filing(filing_id)?;
        let business_id: i64 = filing.business_id().ok_or_else(|| {
            PersistenceError::NotFound(format!("Filing {filing_id} has no business"))
        })?;
        let tx: i64 = filing.transaction_id().ok_or_else(|| {
            PersistenceError::NotFound(format!("Filing {filing_id} has not been applied"))
        })?;
        self.business_profile_as_of(business_id, tx)
    }

    /// Whether the business has completed a transition application.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn has_transition_filing(&mut self, business_id: i64) -> Result<bool, PersistenceError> {
        queries::filing::has_completed_filing(&mut self.conn, business_id, TRANSITION_FILING_TYPE)
    }

    /// Whether the business has a live entry in an open involuntary
    /// dissolution batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn in_dissolution(&mut self, business_id: i64) -> Result<bool, PersistenceError> {
        let entries: Vec<(Batch, BatchProcessing)> =
            queries::batch::list_batch_entries_for_business(&mut self.conn, business_id)?;
        Ok(in_dissolution(business_id, &entries))
    }

    /// Whether the business is in good standing on `today`, a date in the
    /// legislation timezone.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the business does not exist.
    pub fn good_standing(&mut self, business_id: i64, today: Date) -> Result<bool, PersistenceError> {
        let business: Business = self.get_business(business_id)?;
        let transition_filed: bool = self.has_transition_filing(business_id)?;
        Ok(business.good_standing(today, transition_filed))
    }

    /// Derives the standing facts shown with a business.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn standing_facts(
        &mut self,
        business: &Business,
        today: Date,
    ) -> Result<StandingFacts, PersistenceError> {
        let Some(business_id) = business.id else {
            return Ok(StandingFacts {
                good_standing: business.good_standing(today, false),
                in_dissolution: false,
            });
        };
        let transition_filed: bool = self.has_transition_filing(business_id)?;
        Ok(StandingFacts {
            good_standing: business.good_standing(today, transition_filed),
            in_dissolution: self.in_dissolution(business_id)?,
        })
    }

    // ========================================================================
    // Filings
    // ========================================================================

    /// Loads a filing by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the filing does not exist.
    pub fn get_filing(&mut self, filing_id: i64) -> Result<Filing, PersistenceError> {
        queries::filing::get_filing(&mut self.conn, filing_id).map(Filing::from_stored)
    }

    /// Lists a business's filings, optionally only those with `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn filings_for_business(
        &mut self,
        business_id: i64,
        status: Option<FilingStatus>,
    ) -> Result<Vec<Filing>, PersistenceError> {
        Ok(
            queries::filing::list_filings_for_business(&mut self.conn, business_id, status)?
                .into_iter()
                .map(Filing::from_stored)
                .collect(),
        )
    }

    fn load_with_parent(&mut self, filing_id: i64) -> Result<(Filing, Option<Filing>), PersistenceError> {
        let filing: Filing = self.get_filing(filing_id)?;
        let parent: Option<Filing> = filing
            .parent_filing_id()
            .map(|parent_id| self.get_filing(parent_id))
            .transpose()?;
        Ok((filing, parent))
    }

    /// The status reported for a filing, deriving `CORRECTED` from its
    /// correcting filing.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the filing does not exist.
    pub fn effective_filing_status(&mut self, filing_id: i64) -> Result<FilingStatus, PersistenceError> {
        let (filing, parent) = self.load_with_parent(filing_id)?;
        Ok(filing.effective_status(parent.as_ref()))
    }

    /// Renders a filing document with its header overlay.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the filing does not exist.
    pub fn filing_json(&mut self, filing_id: i64) -> Result<Value, PersistenceError> {
        let (filing, parent) = self.load_with_parent(filing_id)?;
        Ok(filing.to_json(parent.as_ref()))
    }

    /// Lists the documents attached to a filing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn documents_for_filing(&mut self, filing_id: i64) -> Result<Vec<Document>, PersistenceError> {
        queries::filing::list_documents_for_filing(&mut self.conn, filing_id)
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Loads a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the transaction does not exist.
    pub fn get_transaction(&mut self, transaction_id: i64) -> Result<Transaction, PersistenceError> {
        queries::history::get_transaction(&mut self.conn, transaction_id)
    }

    /// Lists every version of one row, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn version_records(
        &mut self,
        table: VersionedTable,
        row_id: i64,
    ) -> Result<Vec<VersionRecord>, PersistenceError> {
        queries::history::list_versions_for_row(&mut self.conn, table, row_id)
    }

    // ========================================================================
    // Dissolution batches
    // ========================================================================

    /// Creates a batch, writing its ID back.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_batch(&mut self, batch: &mut Batch) -> Result<i64, PersistenceError> {
        let batch_id: i64 = mutations::batch::create_batch(&mut self.conn, batch)?;
        batch.id = Some(batch_id);
        Ok(batch_id)
    }

    /// Adds a business to a batch, writing the entry ID back.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch or business does not exist.
    pub fn add_batch_processing(
        &mut self,
        processing: &mut BatchProcessing,
    ) -> Result<i64, PersistenceError> {
        let processing_id: i64 =
            mutations::batch::create_batch_processing(&mut self.conn, processing)?;
        processing.id = Some(processing_id);
        Ok(processing_id)
    }

    /// Moves a batch entry to `next`.
    ///
    /// # Errors
    ///
    /// Returns a rejection if the lifecycle forbids the move, or
    /// `PersistenceError::NotFound` if the entry does not exist.
    pub fn transition_batch_processing(
        &mut self,
        processing_id: i64,
        next: BatchProcessingStatus,
        now: OffsetDateTime,
    ) -> Result<BatchProcessing, PersistenceError> {
        self.conn.transaction::<BatchProcessing, PersistenceError, _>(|conn| {
            let mut processing: BatchProcessing =
                queries::batch::get_batch_processing(conn, processing_id)?;
            processing.transition(next, now)?;
            mutations::batch::update_batch_processing(conn, processing_id, &processing)?;
            Ok(processing)
        })
    }

    /// Records a furnishing sent to a business, writing its ID back.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_furnishing(&mut self, furnishing: &mut Furnishing) -> Result<i64, PersistenceError> {
        let furnishing_id: i64 = self
            .conn
            .transaction::<i64, PersistenceError, _>(|conn| {
                mutations::batch::create_furnishing(conn, furnishing)
            })?;
        furnishing.id = Some(furnishing_id);
        Ok(furnishing_id)
    }

    /// Lists a business's batch entries with their batches.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn batch_entries_for_business(
        &mut self,
        business_id: i64,
    ) -> Result<Vec<(Batch, BatchProcessing)>, PersistenceError> {
        queries::batch::list_batch_entries_for_business(&mut self.conn, business_id)
    }

    /// Lists the furnishings sent to a business.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn furnishings_for_business(
        &mut self,
        business_id: i64,
    ) -> Result<Vec<Furnishing>, PersistenceError> {
        queries::batch::list_furnishings_for_business(&mut self.conn, business_id)
    }
}
