// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row and record types for each registry table.
//!
//! `*Row` types are read from the database; `*Record` types are written to
//! it. Dates are stored as ISO 8601 text, instants as RFC 3339 text and
//! flags as `0`/`1` integers.

use bizreg::{FilingSource, FilingStatus, StoredFiling};
use bizreg_domain::{
    Address, Batch, BatchProcessing, Business, Document, Furnishing, Office, Party, PartyRole,
    ShareClass, ShareSeries, format_date, format_datetime, parse_date, parse_datetime,
};
use bizreg_history::{OperationType, Transaction, VersionRecord};
use diesel::prelude::*;
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;
use time::{Date, OffsetDateTime};

use crate::diesel_schema::{
    addresses, batch_processing, batches, businesses, documents, filings, furnishings, offices,
    parties, party_roles, share_classes, share_series, transactions, version_records,
};
use crate::error::PersistenceError;

fn decode<T>(column: &str, value: &str) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid {column}: {e}")))
}

fn decode_datetime(column: &str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    parse_datetime(value)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid {column}: {e}")))
}

fn decode_optional_datetime(
    column: &str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(|v| decode_datetime(column, v)).transpose()
}

fn decode_optional_date(column: &str, value: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    value
        .map(|v| {
            parse_date(v)
                .map_err(|e| PersistenceError::SerializationError(format!("Invalid {column}: {e}")))
        })
        .transpose()
}

fn decode_json(column: &str, value: Option<&str>) -> Result<Option<Value>, PersistenceError> {
    value
        .map(|v| {
            serde_json::from_str::<Value>(v)
                .map_err(|e| PersistenceError::SerializationError(format!("Invalid {column}: {e}")))
        })
        .transpose()
}

fn encode_json(value: Option<&Value>) -> Result<Option<String>, PersistenceError> {
    value.map(serde_json::to_string).transpose().map_err(Into::into)
}

const fn flag(value: i32) -> bool {
    value != 0
}

fn flag_value(value: bool) -> i32 {
    i32::from(value)
}

// ============================================================================
// Businesses
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = businesses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BusinessRow {
    pub id: i64,
    pub identifier: String,
    pub legal_name: Option<String>,
    pub legal_type: String,
    pub state: String,
    pub state_filing_id: Option<i64>,
    pub founding_date: String,
    pub dissolution_date: Option<String>,
    pub restoration_expiry_date: Option<String>,
    pub last_ar_date: Option<String>,
    pub last_ar_year: Option<i32>,
    pub last_agm_date: Option<String>,
    pub last_coa_date: Option<String>,
    pub last_cod_date: Option<String>,
    pub tax_id: Option<String>,
    pub naics_code: Option<String>,
    pub naics_description: Option<String>,
    pub fiscal_year_end_date: Option<String>,
    pub restriction_ind: i32,
    pub admin_freeze: i32,
    pub no_dissolution: i32,
    pub association_type: Option<String>,
    pub send_ar_ind: i32,
}

impl BusinessRow {
    /// Decodes the row into a business.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SerializationError` if a stored code or
    /// date cannot be decoded.
    pub fn into_domain(self) -> Result<Business, PersistenceError> {
        Ok(Business {
            id: Some(self.id),
            legal_type: decode("legal_type", &self.legal_type)?,
            state: decode("state", &self.state)?,
            founding_date: decode_datetime("founding_date", &self.founding_date)?,
            dissolution_date: decode_optional_datetime(
                "dissolution_date",
                self.dissolution_date.as_deref(),
            )?,
            restoration_expiry_date: decode_optional_datetime(
                "restoration_expiry_date",
                self.restoration_expiry_date.as_deref(),
            )?,
            last_ar_date: decode_optional_date("last_ar_date", self.last_ar_date.as_deref())?,
            last_agm_date: decode_optional_date("last_agm_date", self.last_agm_date.as_deref())?,
            last_coa_date: decode_optional_date("last_coa_date", self.last_coa_date.as_deref())?,
            last_cod_date: decode_optional_date("last_cod_date", self.last_cod_date.as_deref())?,
            fiscal_year_end_date: decode_optional_date(
                "fiscal_year_end_date",
                self.fiscal_year_end_date.as_deref(),
            )?,
            identifier: self.identifier,
            legal_name: self.legal_name,
            state_filing_id: self.state_filing_id,
            last_ar_year: self.last_ar_year,
            tax_id: self.tax_id,
            naics_code: self.naics_code,
            naics_description: self.naics_description,
            restriction_ind: flag(self.restriction_ind),
            admin_freeze: flag(self.admin_freeze),
            no_dissolution: flag(self.no_dissolution),
            association_type: self.association_type,
            send_ar_ind: flag(self.send_ar_ind),
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = businesses, treat_none_as_null = true)]
pub struct BusinessRecord {
    pub identifier: String,
    pub legal_name: Option<String>,
    pub legal_type: String,
    pub state: String,
    pub state_filing_id: Option<i64>,
    pub founding_date: String,
    pub dissolution_date: Option<String>,
    pub restoration_expiry_date: Option<String>,
    pub last_ar_date: Option<String>,
    pub last_ar_year: Option<i32>,
    pub last_agm_date: Option<String>,
    pub last_coa_date: Option<String>,
    pub last_cod_date: Option<String>,
    pub tax_id: Option<String>,
    pub naics_code: Option<String>,
    pub naics_description: Option<String>,
    pub fiscal_year_end_date: Option<String>,
    pub restriction_ind: i32,
    pub admin_freeze: i32,
    pub no_dissolution: i32,
    pub association_type: Option<String>,
    pub send_ar_ind: i32,
}

impl From<&Business> for BusinessRecord {
    fn from(business: &Business) -> Self {
        Self {
            identifier: business.identifier.clone(),
            legal_name: business.legal_name.clone(),
            legal_type: business.legal_type.as_str().to_string(),
            state: business.state.as_str().to_string(),
            state_filing_id: business.state_filing_id,
            founding_date: format_datetime(business.founding_date),
            dissolution_date: business.dissolution_date.map(format_datetime),
            restoration_expiry_date: business.restoration_expiry_date.map(format_datetime),
            last_ar_date: business.last_ar_date.map(format_date),
            last_ar_year: business.last_ar_year,
            last_agm_date: business.last_agm_date.map(format_date),
            last_coa_date: business.last_coa_date.map(format_date),
            last_cod_date: business.last_cod_date.map(format_date),
            tax_id: business.tax_id.clone(),
            naics_code: business.naics_code.clone(),
            naics_description: business.naics_description.clone(),
            fiscal_year_end_date: business.fiscal_year_end_date.map(format_date),
            restriction_ind: flag_value(business.restriction_ind),
            admin_freeze: flag_value(business.admin_freeze),
            no_dissolution: flag_value(business.no_dissolution),
            association_type: business.association_type.clone(),
            send_ar_ind: flag_value(business.send_ar_ind),
        }
    }
}

// ============================================================================
// Offices and addresses
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = offices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OfficeRow {
    pub id: i64,
    pub business_id: i64,
    pub office_type: String,
    pub deactivated: i32,
}

impl OfficeRow {
    /// Decodes the row into an office without addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the office type is unknown.
    pub fn into_domain(self) -> Result<Office, PersistenceError> {
        Ok(Office {
            id: Some(self.id),
            business_id: Some(self.business_id),
            office_type: decode("office_type", &self.office_type)?,
            deactivated: flag(self.deactivated),
            addresses: Vec::new(),
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = offices)]
pub struct OfficeRecord {
    pub business_id: i64,
    pub office_type: String,
    pub deactivated: i32,
}

impl OfficeRecord {
    #[must_use]
    pub fn new(office: &Office, business_id: i64) -> Self {
        Self {
            business_id,
            office_type: office.office_type.as_str().to_string(),
            deactivated: flag_value(office.deactivated),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AddressRow {
    pub id: i64,
    pub address_type: String,
    pub street_address: String,
    pub street_address_additional: Option<String>,
    pub address_city: String,
    pub address_region: Option<String>,
    pub address_country: String,
    pub postal_code: Option<String>,
    pub delivery_instructions: Option<String>,
    pub business_id: Option<i64>,
    pub office_id: Option<i64>,
    pub party_id: Option<i64>,
    pub furnishing_id: Option<i64>,
}

impl AddressRow {
    /// # Errors
    ///
    /// Returns an error if the address type is unknown.
    pub fn into_domain(self) -> Result<Address, PersistenceError> {
        Ok(Address {
            id: Some(self.id),
            address_type: decode("address_type", &self.address_type)?,
            street_address: self.street_address,
            street_address_additional: self.street_address_additional,
            address_city: self.address_city,
            address_region: self.address_region,
            address_country: self.address_country,
            postal_code: self.postal_code,
            delivery_instructions: self.delivery_instructions,
            business_id: self.business_id,
            office_id: self.office_id,
            party_id: self.party_id,
            furnishing_id: self.furnishing_id,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = addresses, treat_none_as_null = true)]
pub struct AddressRecord {
    pub address_type: String,
    pub street_address: String,
    pub street_address_additional: Option<String>,
    pub address_city: String,
    pub address_region: Option<String>,
    pub address_country: String,
    pub postal_code: Option<String>,
    pub delivery_instructions: Option<String>,
    pub business_id: Option<i64>,
    pub office_id: Option<i64>,
    pub party_id: Option<i64>,
    pub furnishing_id: Option<i64>,
}

impl From<&Address> for AddressRecord {
    fn from(address: &Address) -> Self {
        Self {
            address_type: address.address_type.as_str().to_string(),
            street_address: address.street_address.clone(),
            street_address_additional: address.street_address_additional.clone(),
            address_city: address.address_city.clone(),
            address_region: address.address_region.clone(),
            address_country: address.address_country.clone(),
            postal_code: address.postal_code.clone(),
            delivery_instructions: address.delivery_instructions.clone(),
            business_id: address.business_id,
            office_id: address.office_id,
            party_id: address.party_id,
            furnishing_id: address.furnishing_id,
        }
    }
}

// ============================================================================
// Parties and roles
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = parties)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PartyRow {
    pub id: i64,
    pub party_type: String,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub organization_name: Option<String>,
    pub identifier: Option<String>,
    pub email: Option<String>,
}

impl PartyRow {
    /// Decodes the row into a party without addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the party type is unknown.
    pub fn into_domain(self) -> Result<Party, PersistenceError> {
        Ok(Party {
            id: Some(self.id),
            party_type: decode("party_type", &self.party_type)?,
            first_name: self.first_name,
            middle_initial: self.middle_initial,
            last_name: self.last_name,
            title: self.title,
            organization_name: self.organization_name,
            identifier: self.identifier,
            email: self.email,
            mailing_address: None,
            delivery_address: None,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = parties, treat_none_as_null = true)]
pub struct PartyRecord {
    pub party_type: String,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub organization_name: Option<String>,
    pub identifier: Option<String>,
    pub email: Option<String>,
}

impl From<&Party> for PartyRecord {
    fn from(party: &Party) -> Self {
        Self {
            party_type: party.party_type.as_str().to_string(),
            first_name: party.first_name.clone(),
            middle_initial: party.middle_initial.clone(),
            last_name: party.last_name.clone(),
            title: party.title.clone(),
            organization_name: party.organization_name.clone(),
            identifier: party.identifier.clone(),
            email: party.email.clone(),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = party_roles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PartyRoleRow {
    pub id: i64,
    pub business_id: Option<i64>,
    pub filing_id: Option<i64>,
    pub role: String,
    pub appointment_date: Option<String>,
    pub cessation_date: Option<String>,
    pub party_id: i64,
}

impl PartyRoleRow {
    /// Decodes the row, attaching the already loaded `party`.
    ///
    /// # Errors
    ///
    /// Returns an error if the role or a date cannot be decoded.
    pub fn into_domain(self, party: Party) -> Result<PartyRole, PersistenceError> {
        Ok(PartyRole {
            id: Some(self.id),
            business_id: self.business_id,
            filing_id: self.filing_id,
            role: decode("role", &self.role)?,
            appointment_date: decode_optional_date(
                "appointment_date",
                self.appointment_date.as_deref(),
            )?,
            cessation_date: decode_optional_date("cessation_date", self.cessation_date.as_deref())?,
            party,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = party_roles, treat_none_as_null = true)]
pub struct PartyRoleRecord {
    pub business_id: Option<i64>,
    pub filing_id: Option<i64>,
    pub role: String,
    pub appointment_date: Option<String>,
    pub cessation_date: Option<String>,
    pub party_id: i64,
}

impl PartyRoleRecord {
    #[must_use]
    pub fn new(role: &PartyRole, party_id: i64) -> Self {
        Self {
            business_id: role.business_id,
            filing_id: role.filing_id,
            role: role.role.as_str().to_string(),
            appointment_date: role.appointment_date.map(format_date),
            cessation_date: role.cessation_date.map(format_date),
            party_id,
        }
    }
}

// ============================================================================
// Share structure
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = share_classes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShareClassRow {
    pub id: i64,
    pub business_id: Option<i64>,
    pub name: String,
    pub priority: Option<i32>,
    pub max_share_flag: i32,
    pub max_shares: Option<i64>,
    pub par_value_flag: i32,
    pub par_value: Option<f64>,
    pub currency: Option<String>,
    pub special_rights_flag: i32,
}

impl ShareClassRow {
    /// Decodes the row into a class without series.
    #[must_use]
    pub fn into_domain(self) -> ShareClass {
        ShareClass {
            id: Some(self.id),
            business_id: self.business_id,
            name: self.name,
            priority: self.priority,
            max_share_flag: flag(self.max_share_flag),
            max_shares: self.max_shares,
            par_value_flag: flag(self.par_value_flag),
            par_value: self.par_value,
            currency: self.currency,
            special_rights_flag: flag(self.special_rights_flag),
            series: Vec::new(),
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = share_classes, treat_none_as_null = true)]
pub struct ShareClassRecord {
    pub business_id: Option<i64>,
    pub name: String,
    pub priority: Option<i32>,
    pub max_share_flag: i32,
    pub max_shares: Option<i64>,
    pub par_value_flag: i32,
    pub par_value: Option<f64>,
    pub currency: Option<String>,
    pub special_rights_flag: i32,
}

impl From<&ShareClass> for ShareClassRecord {
    fn from(class: &ShareClass) -> Self {
        Self {
            business_id: class.business_id,
            name: class.name.clone(),
            priority: class.priority,
            max_share_flag: flag_value(class.max_share_flag),
            max_shares: class.max_shares,
            par_value_flag: flag_value(class.par_value_flag),
            par_value: class.par_value,
            currency: class.currency.clone(),
            special_rights_flag: flag_value(class.special_rights_flag),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = share_series)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShareSeriesRow {
    pub id: i64,
    pub share_class_id: i64,
    pub name: String,
    pub priority: Option<i32>,
    pub max_share_flag: i32,
    pub max_shares: Option<i64>,
    pub special_rights_flag: i32,
}

impl ShareSeriesRow {
    #[must_use]
    pub fn into_domain(self) -> ShareSeries {
        ShareSeries {
            id: Some(self.id),
            share_class_id: Some(self.share_class_id),
            name: self.name,
            priority: self.priority,
            max_share_flag: flag(self.max_share_flag),
            max_shares: self.max_shares,
            special_rights_flag: flag(self.special_rights_flag),
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = share_series, treat_none_as_null = true)]
pub struct ShareSeriesRecord {
    pub share_class_id: i64,
    pub name: String,
    pub priority: Option<i32>,
    pub max_share_flag: i32,
    pub max_shares: Option<i64>,
    pub special_rights_flag: i32,
}

impl ShareSeriesRecord {
    #[must_use]
    pub fn new(series: &ShareSeries, share_class_id: i64) -> Self {
        Self {
            share_class_id,
            name: series.name.clone(),
            priority: series.priority,
            max_share_flag: flag_value(series.max_share_flag),
            max_shares: series.max_shares,
            special_rights_flag: flag_value(series.special_rights_flag),
        }
    }
}

// ============================================================================
// Filings and documents
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = filings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilingRow {
    pub id: i64,
    pub business_id: Option<i64>,
    pub filing_type: Option<String>,
    pub filing_sub_type: Option<String>,
    pub filing_json: Option<String>,
    pub filing_date: String,
    pub effective_date: String,
    pub payment_token: Option<String>,
    pub payment_status_code: Option<String>,
    pub payment_completion_date: Option<String>,
    pub transaction_id: Option<i64>,
    pub status: String,
    pub source: String,
    pub submitter_id: Option<String>,
    pub parent_filing_id: Option<i64>,
    pub colin_event_ids: String,
    pub deletion_locked: i32,
    pub meta_data: Option<String>,
}

impl FilingRow {
    /// Decodes the row into the stored filing shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the status, source, a date or a JSON column
    /// cannot be decoded.
    pub fn into_stored(self) -> Result<StoredFiling, PersistenceError> {
        Ok(StoredFiling {
            id: Some(self.id),
            business_id: self.business_id,
            filing_type: self.filing_type,
            filing_sub_type: self.filing_sub_type,
            filing_json: decode_json("filing_json", self.filing_json.as_deref())?,
            filing_date: decode_datetime("filing_date", &self.filing_date)?,
            effective_date: decode_datetime("effective_date", &self.effective_date)?,
            payment_token: self.payment_token,
            payment_status_code: self.payment_status_code,
            payment_completion_date: decode_optional_datetime(
                "payment_completion_date",
                self.payment_completion_date.as_deref(),
            )?,
            transaction_id: self.transaction_id,
            status: decode::<FilingStatus>("status", &self.status)?,
            source: decode::<FilingSource>("source", &self.source)?,
            submitter_id: self.submitter_id,
            parent_filing_id: self.parent_filing_id,
            colin_event_ids: serde_json::from_str(&self.colin_event_ids)?,
            deletion_locked: flag(self.deletion_locked),
            meta_data: decode_json("meta_data", self.meta_data.as_deref())?,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = filings, treat_none_as_null = true)]
pub struct FilingRecord {
    pub business_id: Option<i64>,
    pub filing_type: Option<String>,
    pub filing_sub_type: Option<String>,
    pub filing_json: Option<String>,
    pub filing_date: String,
    pub effective_date: String,
    pub payment_token: Option<String>,
    pub payment_status_code: Option<String>,
    pub payment_completion_date: Option<String>,
    pub transaction_id: Option<i64>,
    pub status: String,
    pub source: String,
    pub submitter_id: Option<String>,
    pub parent_filing_id: Option<i64>,
    pub colin_event_ids: String,
    pub deletion_locked: i32,
    pub meta_data: Option<String>,
}

impl FilingRecord {
    /// Encodes a stored filing for writing.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON column cannot be serialized.
    pub fn from_stored(filing: &StoredFiling) -> Result<Self, PersistenceError> {
        Ok(Self {
            business_id: filing.business_id,
            filing_type: filing.filing_type.clone(),
            filing_sub_type: filing.filing_sub_type.clone(),
            filing_json: encode_json(filing.filing_json.as_ref())?,
            filing_date: format_datetime(filing.filing_date),
            effective_date: format_datetime(filing.effective_date),
            payment_token: filing.payment_token.clone(),
            payment_status_code: filing.payment_status_code.clone(),
            payment_completion_date: filing.payment_completion_date.map(format_datetime),
            transaction_id: filing.transaction_id,
            status: filing.status.as_str().to_string(),
            source: filing.source.as_str().to_string(),
            submitter_id: filing.submitter_id.clone(),
            parent_filing_id: filing.parent_filing_id,
            colin_event_ids: serde_json::to_string(&filing.colin_event_ids)?,
            deletion_locked: flag_value(filing.deletion_locked),
            meta_data: encode_json(filing.meta_data.as_ref())?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentRow {
    pub id: i64,
    pub document_type: String,
    pub file_key: String,
    pub business_id: i64,
    pub filing_id: Option<i64>,
}

impl DocumentRow {
    /// # Errors
    ///
    /// Returns an error if the document type is unknown.
    pub fn into_domain(self) -> Result<Document, PersistenceError> {
        Ok(Document {
            id: Some(self.id),
            document_type: decode("document_type", &self.document_type)?,
            file_key: self.file_key,
            business_id: self.business_id,
            filing_id: self.filing_id,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = documents, treat_none_as_null = true)]
pub struct DocumentRecord {
    pub document_type: String,
    pub file_key: String,
    pub business_id: i64,
    pub filing_id: Option<i64>,
}

impl From<&Document> for DocumentRecord {
    fn from(document: &Document) -> Self {
        Self {
            document_type: document.document_type.as_str().to_string(),
            file_key: document.file_key.clone(),
            business_id: document.business_id,
            filing_id: document.filing_id,
        }
    }
}

// ============================================================================
// Version history
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRow {
    pub id: i64,
    pub issued_at: String,
    pub remote_addr: Option<String>,
}

impl TransactionRow {
    /// # Errors
    ///
    /// Returns an error if the issue time cannot be decoded.
    pub fn into_domain(self) -> Result<Transaction, PersistenceError> {
        Ok(Transaction::new(
            self.id,
            decode_datetime("issued_at", &self.issued_at)?,
            self.remote_addr,
        ))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransaction<'a> {
    pub issued_at: String,
    pub remote_addr: Option<&'a str>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = version_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VersionRecordRow {
    pub id: i64,
    pub table_name: String,
    pub row_id: i64,
    pub transaction_id: i64,
    pub end_transaction_id: Option<i64>,
    pub operation_type: i32,
    pub snapshot: String,
}

impl VersionRecordRow {
    /// # Errors
    ///
    /// Returns an error if the table, operation or snapshot cannot be decoded.
    pub fn into_domain(self) -> Result<VersionRecord, PersistenceError> {
        Ok(VersionRecord {
            id: Some(self.id),
            table: self.table_name.parse()?,
            row_id: self.row_id,
            transaction_id: self.transaction_id,
            end_transaction_id: self.end_transaction_id,
            operation: OperationType::try_from(self.operation_type)?,
            snapshot: serde_json::from_str(&self.snapshot)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = version_records)]
pub struct NewVersionRecord {
    pub table_name: String,
    pub row_id: i64,
    pub transaction_id: i64,
    pub end_transaction_id: Option<i64>,
    pub operation_type: i32,
    pub snapshot: String,
}

impl NewVersionRecord {
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized.
    pub fn from_domain(record: &VersionRecord) -> Result<Self, PersistenceError> {
        Ok(Self {
            table_name: record.table.as_str().to_string(),
            row_id: record.row_id,
            transaction_id: record.transaction_id,
            end_transaction_id: record.end_transaction_id,
            operation_type: record.operation.code(),
            snapshot: serde_json::to_string(&record.snapshot)?,
        })
    }
}

// ============================================================================
// Dissolution batches
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = batches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BatchRow {
    pub id: i64,
    pub batch_type: String,
    pub status: String,
    pub size: Option<i32>,
    pub max_size: Option<i32>,
    pub start_date: Option<String>,
    pub notes: Option<String>,
}

impl BatchRow {
    /// # Errors
    ///
    /// Returns an error if a code or the start date cannot be decoded.
    pub fn into_domain(self) -> Result<Batch, PersistenceError> {
        Ok(Batch {
            id: Some(self.id),
            batch_type: decode("batch_type", &self.batch_type)?,
            status: decode("status", &self.status)?,
            size: self.size,
            max_size: self.max_size,
            start_date: decode_optional_datetime("start_date", self.start_date.as_deref())?,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = batches, treat_none_as_null = true)]
pub struct BatchRecord {
    pub batch_type: String,
    pub status: String,
    pub size: Option<i32>,
    pub max_size: Option<i32>,
    pub start_date: Option<String>,
    pub notes: Option<String>,
}

impl From<&Batch> for BatchRecord {
    fn from(batch: &Batch) -> Self {
        Self {
            batch_type: batch.batch_type.as_str().to_string(),
            status: batch.status.as_str().to_string(),
            size: batch.size,
            max_size: batch.max_size,
            start_date: batch.start_date.map(format_datetime),
            notes: batch.notes.clone(),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = batch_processing)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BatchProcessingRow {
    pub id: i64,
    pub batch_id: i64,
    pub business_id: i64,
    pub business_identifier: String,
    pub step: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_date: String,
    pub last_modified: String,
    pub trigger_date: Option<String>,
    pub meta_data: Option<String>,
}

impl BatchProcessingRow {
    /// # Errors
    ///
    /// Returns an error if a code, date or the metadata cannot be decoded.
    pub fn into_domain(self) -> Result<BatchProcessing, PersistenceError> {
        Ok(BatchProcessing {
            id: Some(self.id),
            batch_id: self.batch_id,
            business_id: self.business_id,
            business_identifier: self.business_identifier,
            step: decode("step", &self.step)?,
            status: decode("status", &self.status)?,
            notes: self.notes,
            created_date: decode_datetime("created_date", &self.created_date)?,
            last_modified: decode_datetime("last_modified", &self.last_modified)?,
            trigger_date: decode_optional_datetime("trigger_date", self.trigger_date.as_deref())?,
            meta_data: decode_json("meta_data", self.meta_data.as_deref())?,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = batch_processing, treat_none_as_null = true)]
pub struct BatchProcessingRecord {
    pub batch_id: i64,
    pub business_id: i64,
    pub business_identifier: String,
    pub step: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_date: String,
    pub last_modified: String,
    pub trigger_date: Option<String>,
    pub meta_data: Option<String>,
}

impl BatchProcessingRecord {
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be serialized.
    pub fn from_domain(processing: &BatchProcessing) -> Result<Self, PersistenceError> {
        Ok(Self {
            batch_id: processing.batch_id,
            business_id: processing.business_id,
            business_identifier: processing.business_identifier.clone(),
            step: processing.step.as_str().to_string(),
            status: processing.status.as_str().to_string(),
            notes: processing.notes.clone(),
            created_date: format_datetime(processing.created_date),
            last_modified: format_datetime(processing.last_modified),
            trigger_date: processing.trigger_date.map(format_datetime),
            meta_data: encode_json(processing.meta_data.as_ref())?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = furnishings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FurnishingRow {
    pub id: i64,
    pub furnishing_type: String,
    pub furnishing_name: String,
    pub status: String,
    pub batch_id: i64,
    pub business_id: i64,
    pub business_identifier: String,
    pub created_date: String,
    pub processed_date: Option<String>,
    pub email: Option<String>,
}

impl FurnishingRow {
    /// Decodes the row; the mailing address is attached separately.
    ///
    /// # Errors
    ///
    /// Returns an error if a code or date cannot be decoded.
    pub fn into_domain(self) -> Result<Furnishing, PersistenceError> {
        Ok(Furnishing {
            id: Some(self.id),
            furnishing_type: decode("furnishing_type", &self.furnishing_type)?,
            furnishing_name: decode("furnishing_name", &self.furnishing_name)?,
            status: decode("status", &self.status)?,
            batch_id: self.batch_id,
            business_id: self.business_id,
            business_identifier: self.business_identifier,
            created_date: decode_datetime("created_date", &self.created_date)?,
            processed_date: decode_optional_datetime(
                "processed_date",
                self.processed_date.as_deref(),
            )?,
            email: self.email,
            mailing_address: None,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = furnishings)]
pub struct FurnishingRecord {
    pub furnishing_type: String,
    pub furnishing_name: String,
    pub status: String,
    pub batch_id: i64,
    pub business_id: i64,
    pub business_identifier: String,
    pub created_date: String,
    pub processed_date: Option<String>,
    pub email: Option<String>,
}

impl From<&Furnishing> for FurnishingRecord {
    fn from(furnishing: &Furnishing) -> Self {
        Self {
            furnishing_type: furnishing.furnishing_type.as_str().to_string(),
            furnishing_name: furnishing.furnishing_name.as_str().to_string(),
            status: furnishing.status.as_str().to_string(),
            batch_id: furnishing.batch_id,
            business_id: furnishing.business_id,
            business_identifier: furnishing.business_identifier.clone(),
            created_date: format_datetime(furnishing.created_date),
            processed_date: furnishing.processed_date.map(format_datetime),
            email: furnishing.email.clone(),
        }
    }
}
