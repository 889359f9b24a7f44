// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! What a validator may consult besides the filing document.
//!
//! Name requests, NAICS codes and jurisdictions live in services outside
//! the registry. They are reached through the traits here so validators
//! stay pure and tests can substitute fixed answers.

use bizreg::Filing;
use bizreg_domain::{BusinessProfile, LegalType};
use time::Date;

/// States in which a name request may be used in a filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRequestState {
    Approved,
    Conditional,
    Draft,
    Expired,
    Consumed,
    Rejected,
}

impl NameRequestState {
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        matches!(self, Self::Approved | Self::Conditional)
    }
}

/// A reserved name as the name request service reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRequest {
    pub nr_number: String,
    pub state: NameRequestState,
    pub legal_type: LegalType,
    pub name: String,
    pub expiration_date: Option<Date>,
}

pub trait NameRequestService {
    fn find(&self, nr_number: &str) -> Option<NameRequest>;
}

pub trait NaicsService {
    /// Whether `code` is a known NAICS code described by `description`.
    fn is_valid(&self, code: &str, description: &str) -> bool;
}

pub trait JurisdictionService {
    /// Whether the country (ISO 3166-1 alpha-2) and optional subdivision exist.
    fn is_known(&self, country: &str, region: Option<&str>) -> bool;
}

/// Access to a business's earlier filings.
pub trait FilingLookup {
    fn find_filing(&self, filing_id: i64) -> Option<&Filing>;

    fn filings_of_type(&self, business_id: i64, filing_type: &str) -> Vec<&Filing>;
}

/// A fixed set of filings, usually loaded from storage before validating.
#[derive(Debug, Clone, Default)]
pub struct FilingList {
    filings: Vec<Filing>,
}

impl FilingList {
    #[must_use]
    pub const fn new(filings: Vec<Filing>) -> Self {
        Self { filings }
    }
}

impl FilingLookup for FilingList {
    fn find_filing(&self, filing_id: i64) -> Option<&Filing> {
        self.filings.iter().find(|f| f.id() == Some(filing_id))
    }

    fn filings_of_type(&self, business_id: i64, filing_type: &str) -> Vec<&Filing> {
        self.filings
            .iter()
            .filter(|f| f.business_id() == Some(business_id) && f.filing_type() == Some(filing_type))
            .collect()
    }
}

/// Stand-in for the external services when none are reachable.
///
/// Knows no name requests and no earlier filings. NAICS codes and
/// jurisdictions are checked for shape only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineServices;

static OFFLINE: OfflineServices = OfflineServices;

impl NameRequestService for OfflineServices {
    fn find(&self, _nr_number: &str) -> Option<NameRequest> {
        None
    }
}

impl NaicsService for OfflineServices {
    fn is_valid(&self, code: &str, description: &str) -> bool {
        (2..=6).contains(&code.len())
            && code.bytes().all(|b| b.is_ascii_digit())
            && !description.trim().is_empty()
    }
}

impl JurisdictionService for OfflineServices {
    fn is_known(&self, country: &str, region: Option<&str>) -> bool {
        let country_ok: bool = country.len() == 2 && country.bytes().all(|b| b.is_ascii_uppercase());
        country_ok && region.is_none_or(|r| !r.trim().is_empty())
    }
}

impl FilingLookup for OfflineServices {
    fn find_filing(&self, _filing_id: i64) -> Option<&Filing> {
        None
    }

    fn filings_of_type(&self, _business_id: i64, _filing_type: &str) -> Vec<&Filing> {
        Vec::new()
    }
}

/// Everything a validator reads.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Today in the legislation timezone.
    pub today: Date,
    /// The business the filing is for; `None` for filings that create one.
    pub profile: Option<&'a BusinessProfile>,
    pub name_requests: &'a dyn NameRequestService,
    pub naics: &'a dyn NaicsService,
    pub jurisdictions: &'a dyn JurisdictionService,
    pub filings: &'a dyn FilingLookup,
}

impl<'a> ValidationContext<'a> {
    /// A context with no business and offline services.
    #[must_use]
    pub fn new(today: Date) -> Self {
        Self {
            today,
            profile: None,
            name_requests: &OFFLINE,
            naics: &OFFLINE,
            jurisdictions: &OFFLINE,
            filings: &OFFLINE,
        }
    }

    #[must_use]
    pub const fn with_profile(mut self, profile: &'a BusinessProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    #[must_use]
    pub const fn with_name_requests(mut self, service: &'a dyn NameRequestService) -> Self {
        self.name_requests = service;
        self
    }

    #[must_use]
    pub const fn with_naics(mut self, service: &'a dyn NaicsService) -> Self {
        self.naics = service;
        self
    }

    #[must_use]
    pub const fn with_jurisdictions(mut self, service: &'a dyn JurisdictionService) -> Self {
        self.jurisdictions = service;
        self
    }

    #[must_use]
    pub const fn with_filings(mut self, lookup: &'a dyn FilingLookup) -> Self {
        self.filings = lookup;
        self
    }

    /// The business's id, when a stored business is being filed against.
    #[must_use]
    pub fn business_id(&self) -> Option<i64> {
        self.profile.and_then(|p| p.business.id)
    }
}
