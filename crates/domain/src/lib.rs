// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod address;
mod batch;
mod business;
mod document;
mod error;
mod legal_type;
mod legislation;
mod office;
mod party;
mod profile;
mod share;
mod validation;

#[cfg(test)]
mod tests;

pub use address::{Address, AddressType};
pub use batch::{
    Batch, BatchProcessing, BatchProcessingStatus, BatchProcessingStep, BatchStatus, BatchType,
    Furnishing, FurnishingName, FurnishingStatus, FurnishingType, in_dissolution,
};
pub use business::{Business, EntityState, StandingFacts, TRANSITION_CUTOFF};
pub use document::{Document, DocumentType};
pub use error::DomainError;
pub use legal_type::LegalType;
pub use legislation::{
    DEFAULT_LEGISLATION_TIMEZONE, add_years_months_days, format_date, format_datetime, iso_date,
    legislation_date, parse_date, parse_datetime, parse_timezone,
};
pub use office::{Office, OfficeType, offices_to_json};
pub use party::{Party, PartyRole, PartyType, RoleType};
pub use profile::BusinessProfile;
pub use share::{ShareClass, ShareSeries};
pub use validation::{validate_business, validate_identifier};
