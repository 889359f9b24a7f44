// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unit of work.
//!
//! A `Session` lives inside one database transaction. Every write to a
//! versioned table is recorded as a row change; the first such change
//! allocates the transaction row. On commit the changes are planned by the
//! session's versioning engine and the plan is written to `version_records`.
//!
//! Filings and documents are stored but not versioned.

use bizreg::{Filing, VersionPlan, VersioningKind};
use bizreg_domain::{
    Address, AddressType, Business, BusinessProfile, Document, Office, Party, PartyRole,
    ShareClass,
};
use bizreg_history::{ChangeSet, OperationType, RowChange, VersionedTable};
use diesel::SqliteConnection;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::error::PersistenceError;
use crate::mutations;
use crate::queries;

fn snapshot<T: Serialize>(value: &T) -> Result<Value, PersistenceError> {
    Ok(serde_json::to_value(value)?)
}

/// Party state as stored in history: addresses are versioned on their own.
fn bare_party(party: &Party) -> Party {
    Party {
        mailing_address: None,
        delivery_address: None,
        ..party.clone()
    }
}

/// Writes made within one database transaction.
pub struct Session<'a> {
    conn: &'a mut SqliteConnection,
    versioning: VersioningKind,
    remote_addr: Option<&'a str>,
    issued_at: OffsetDateTime,
    transaction_id: Option<i64>,
    changes: ChangeSet,
}

impl<'a> Session<'a> {
    pub(crate) const fn new(
        conn: &'a mut SqliteConnection,
        versioning: VersioningKind,
        remote_addr: Option<&'a str>,
        issued_at: OffsetDateTime,
    ) -> Self {
        Self {
            conn,
            versioning,
            remote_addr,
            issued_at,
            transaction_id: None,
            changes: ChangeSet::new(),
        }
    }

    /// The engine recording this unit of work.
    #[must_use]
    pub const fn versioning(&self) -> VersioningKind {
        self.versioning
    }

    /// Returns the transaction ID of this unit of work, allocating the
    /// transaction row if nothing has been recorded yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction row cannot be written.
    pub fn current_transaction_id(&mut self) -> Result<i64, PersistenceError> {
        if let Some(transaction_id) = self.transaction_id {
            return Ok(transaction_id);
        }
        let transaction_id: i64 =
            mutations::versioning::create_transaction(self.conn, self.issued_at, self.remote_addr)?;
        self.transaction_id = Some(transaction_id);
        Ok(transaction_id)
    }

    fn record(
        &mut self,
        table: VersionedTable,
        row_id: i64,
        operation: OperationType,
        snapshot: Value,
    ) -> Result<(), PersistenceError> {
        self.current_transaction_id()?;
        self.changes
            .record(RowChange::new(table, row_id, operation, snapshot));
        Ok(())
    }

    // ========================================================================
    // Versioned writes
    // ========================================================================

    /// Validates and saves a business, writing its ID back.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails (bad identifier, missing name)
    /// or the write fails.
    pub fn save_business(&mut self, business: &mut Business) -> Result<i64, PersistenceError> {
        business.validate()?;
        let (business_id, operation) = mutations::business::save_business(self.conn, business)?;
        business.id = Some(business_id);
        self.record(
            VersionedTable::Businesses,
            business_id,
            operation,
            snapshot(business)?,
        )?;
        Ok(business_id)
    }

    /// Saves an office of `business_id` together with its addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    pub fn save_office(
        &mut self,
        business_id: i64,
        office: &mut Office,
    ) -> Result<i64, PersistenceError> {
        office.business_id = Some(business_id);
        let (office_id, operation) = mutations::business::save_office(self.conn, office, business_id)?;
        office.id = Some(office_id);

        let stored: Office = Office {
            addresses: Vec::new(),
            ..office.clone()
        };
        self.record(
            VersionedTable::Offices,
            office_id,
            operation,
            snapshot(&stored)?,
        )?;

        for address in &mut office.addresses {
            address.office_id = Some(office_id);
            address.business_id = Some(business_id);
            self.save_address(address)?;
        }
        Ok(office_id)
    }

    /// Saves a single address, writing its ID back.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_address(&mut self, address: &mut Address) -> Result<i64, PersistenceError> {
        let (address_id, operation) = mutations::business::save_address(self.conn, address)?;
        address.id = Some(address_id);
        self.record(
            VersionedTable::Addresses,
            address_id,
            operation,
            snapshot(address)?,
        )?;
        Ok(address_id)
    }

    /// Saves a party and its mailing and delivery addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    pub fn save_party(&mut self, party: &mut Party) -> Result<i64, PersistenceError> {
        let (party_id, operation) = mutations::business::save_party(self.conn, party)?;
        party.id = Some(party_id);
        self.record(
            VersionedTable::Parties,
            party_id,
            operation,
            snapshot(&bare_party(party))?,
        )?;

        if let Some(address) = party.mailing_address.as_mut() {
            address.party_id = Some(party_id);
            address.address_type = AddressType::Mailing;
            self.save_address(address)?;
        }
        if let Some(address) = party.delivery_address.as_mut() {
            address.party_id = Some(party_id);
            address.address_type = AddressType::Delivery;
            self.save_address(address)?;
        }
        Ok(party_id)
    }

    /// Saves a role of `business_id`, saving its party first.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    pub fn save_party_role(
        &mut self,
        business_id: i64,
        role: &mut PartyRole,
    ) -> Result<i64, PersistenceError> {
        role.business_id = Some(business_id);
        let party_id: i64 = self.save_party(&mut role.party)?;
        let (role_id, operation) = mutations::business::save_party_role(self.conn, role, party_id)?;
        role.id = Some(role_id);

        let stored: PartyRole = PartyRole {
            party: bare_party(&role.party),
            ..role.clone()
        };
        self.record(
            VersionedTable::PartyRoles,
            role_id,
            operation,
            snapshot(&stored)?,
        )?;
        Ok(role_id)
    }

    /// Validates and saves a share class of `business_id` with its series.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Rejected` if the class or a series breaks
    /// the share structure rules, or an error if a write fails.
    pub fn save_share_class(
        &mut self,
        business_id: i64,
        class: &mut ShareClass,
    ) -> Result<i64, PersistenceError> {
        class.business_id = Some(business_id);
        class.validate()?;

        let (class_id, operation) = mutations::business::save_share_class(self.conn, class)?;
        class.id = Some(class_id);

        let stored: ShareClass = ShareClass {
            series: Vec::new(),
            ..class.clone()
        };
        self.record(
            VersionedTable::ShareClasses,
            class_id,
            operation,
            snapshot(&stored)?,
        )?;

        for series in &mut class.series {
            series.share_class_id = Some(class_id);
            let (series_id, operation) = mutations::business::save_share_series(self.conn, series, class_id)?;
            series.id = Some(series_id);
            self.record(
                VersionedTable::ShareSeries,
                series_id,
                operation,
                snapshot(series)?,
            )?;
        }
        Ok(class_id)
    }

    // ========================================================================
    // Unversioned writes
    // ========================================================================

    /// Derives the filing's status and saves it, clearing its pending changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_filing(&mut self, filing: &mut Filing) -> Result<i64, PersistenceError> {
        filing.prepare_for_save();
        let (filing_id, _) = mutations::filing::save_filing(self.conn, filing.stored())?;
        filing.mark_saved(filing_id);
        Ok(filing_id)
    }

    /// Saves a document, writing its ID back.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_document(&mut self, document: &mut Document) -> Result<i64, PersistenceError> {
        let (document_id, _) = mutations::filing::save_document(self.conn, document)?;
        document.id = Some(document_id);
        Ok(document_id)
    }

    // ========================================================================
    // Deletes
    // ========================================================================

    /// Businesses are never deleted.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` for an unknown business and a
    /// forbidden rejection otherwise.
    pub fn delete_business(&mut self, business_id: i64) -> Result<(), PersistenceError> {
        let business: Business = queries::business::get_business(self.conn, business_id)?;
        warn!(identifier = %business.identifier, "Refused business deletion");
        Err(PersistenceError::deletion_not_allowed())
    }

    /// Deletes a filing unless it is locked.
    ///
    /// # Errors
    ///
    /// Returns a forbidden rejection if the filing is locked, or
    /// `PersistenceError::NotFound` if it does not exist.
    pub fn delete_filing(&mut self, filing_id: i64) -> Result<(), PersistenceError> {
        let stored: Filing = Filing::from_stored(queries::filing::get_filing(self.conn, filing_id)?);
        stored.ensure_deletable()?;
        mutations::filing::delete_filing(self.conn, filing_id)
    }

    /// Deletes a party role, recording the removal in history.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the role does not exist.
    pub fn delete_party_role(&mut self, role_id: i64) -> Result<(), PersistenceError> {
        let role: PartyRole = queries::business::get_party_role(self.conn, role_id)?;
        mutations::business::delete_party_role(self.conn, role_id)?;
        self.record(
            VersionedTable::PartyRoles,
            role_id,
            OperationType::Delete,
            snapshot(&role)?,
        )
    }

    /// Deletes an address, recording the removal in history.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the address does not exist.
    pub fn delete_address(&mut self, address_id: i64) -> Result<(), PersistenceError> {
        let address: Address = queries::business::get_address(self.conn, address_id)?;
        mutations::business::delete_address(self.conn, address_id)?;
        self.record(
            VersionedTable::Addresses,
            address_id,
            OperationType::Delete,
            snapshot(&address)?,
        )
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Loads a business as seen by this unit of work.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the business does not exist.
    pub fn business(&mut self, business_id: i64) -> Result<Business, PersistenceError> {
        queries::business::get_business(self.conn, business_id)
    }

    /// Loads the current profile as seen by this unit of work.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the business does not exist.
    pub fn profile(&mut self, business_id: i64) -> Result<BusinessProfile, PersistenceError> {
        queries::business::load_current_profile(self.conn, business_id)
    }

    /// Loads a filing as seen by this unit of work.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the filing does not exist.
    pub fn filing(&mut self, filing_id: i64) -> Result<Filing, PersistenceError> {
        queries::filing::get_filing(self.conn, filing_id).map(Filing::from_stored)
    }

    /// Writes the recorded changes to history.
    ///
    /// Returns the transaction ID, or `None` when nothing versioned changed.
    pub(crate) fn commit(mut self) -> Result<Option<i64>, PersistenceError> {
        let Some(transaction_id) = self.transaction_id else {
            debug!("Unit of work made no versioned changes");
            return Ok(None);
        };

        let changes: Vec<RowChange> = self.changes.take();
        let plan: VersionPlan = self.versioning.engine().plan(&changes, transaction_id);
        let written: usize = mutations::versioning::apply_version_plan(self.conn, &plan)?;

        info!(
            transaction_id,
            engine = self.versioning.as_str(),
            changes = changes.len(),
            versions = written,
            "Committed unit of work"
        );
        Ok(Some(transaction_id))
    }
}
