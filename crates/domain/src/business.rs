// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::legal_type::LegalType;
use crate::legislation::{add_years_months_days, format_date, format_datetime};
use crate::validation::validate_business;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;
use time::macros::date;
use time::{Date, OffsetDateTime};

/// Companies founded before this date must file a transition application.
pub const TRANSITION_CUTOFF: Date = date!(2004 - 03 - 29);

/// The lifecycle state of a registered entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityState {
    /// Operating normally.
    Active,
    /// Dissolved, cancelled or otherwise closed.
    Historical,
    /// Under liquidation.
    Liquidation,
}

impl EntityState {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Historical => "HISTORICAL",
            Self::Liquidation => "LIQUIDATION",
        }
    }
}

impl FromStr for EntityState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "HISTORICAL" => Ok(Self::Historical),
            "LIQUIDATION" => Ok(Self::Liquidation),
            _ => Err(DomainError::UnknownCode {
                kind: "entity state",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered legal entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    /// Database identifier, `None` until persisted.
    pub id: Option<i64>,
    /// Registry identifier, e.g. `BC1234567`.
    pub identifier: String,
    /// Registered name. Numbered companies have none.
    pub legal_name: Option<String>,
    /// Corporate form.
    pub legal_type: LegalType,
    /// Lifecycle state.
    pub state: EntityState,
    /// The filing that last changed the state.
    pub state_filing_id: Option<i64>,
    /// When the entity came into existence.
    #[serde(with = "time::serde::rfc3339")]
    pub founding_date: OffsetDateTime,
    /// When the entity was dissolved, if it was.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub dissolution_date: Option<OffsetDateTime>,
    /// End of a limited restoration.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub restoration_expiry_date: Option<OffsetDateTime>,
    /// Date of the last annual report.
    #[serde(default, with = "crate::legislation::iso_date::option")]
    pub last_ar_date: Option<Date>,
    /// Year covered by the last annual report.
    pub last_ar_year: Option<i32>,
    /// Date of the last annual general meeting.
    #[serde(default, with = "crate::legislation::iso_date::option")]
    pub last_agm_date: Option<Date>,
    /// Date of the last change of address.
    #[serde(default, with = "crate::legislation::iso_date::option")]
    pub last_coa_date: Option<Date>,
    /// Date of the last change of directors.
    #[serde(default, with = "crate::legislation::iso_date::option")]
    pub last_cod_date: Option<Date>,
    pub tax_id: Option<String>,
    pub naics_code: Option<String>,
    pub naics_description: Option<String>,
    #[serde(default, with = "crate::legislation::iso_date::option")]
    pub fiscal_year_end_date: Option<Date>,
    /// Restrictions on the articles.
    pub restriction_ind: bool,
    /// Administrative freeze: only registrar and court filings accepted.
    pub admin_freeze: bool,
    /// Excluded from involuntary dissolution.
    pub no_dissolution: bool,
    /// Cooperative association type (`CP`, `HC`, `OC`).
    pub association_type: Option<String>,
    /// Whether annual report reminders are sent.
    pub send_ar_ind: bool,
}

/// Derived facts about a business that are not stored on the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandingFacts {
    /// Result of `Business::good_standing`.
    pub good_standing: bool,
    /// Whether an involuntary dissolution is in progress.
    pub in_dissolution: bool,
}

impl Business {
    /// Creates a new active business that has not been persisted.
    #[must_use]
    pub fn new(
        identifier: &str,
        legal_name: Option<String>,
        legal_type: LegalType,
        founding_date: OffsetDateTime,
    ) -> Self {
        Self {
            id: None,
            identifier: identifier.to_string(),
            legal_name,
            legal_type,
            state: EntityState::Active,
            state_filing_id: None,
            founding_date,
            dissolution_date: None,
            restoration_expiry_date: None,
            last_ar_date: None,
            last_ar_year: None,
            last_agm_date: None,
            last_coa_date: None,
            last_cod_date: None,
            tax_id: None,
            naics_code: None,
            naics_description: None,
            fiscal_year_end_date: None,
            restriction_ind: false,
            admin_freeze: false,
            no_dissolution: false,
            association_type: None,
            send_ar_ind: true,
        }
    }

    /// Validates the record. Callers run this before every insert and update.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed or the name is missing.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_business(self)
    }

    /// The name to display, deriving one for numbered companies.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.legal_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let digits: &str = self.identifier.trim_start_matches(char::is_alphabetic);
        let suffix: &str = match self.legal_type {
            LegalType::UnlimitedLiabilityCompany | LegalType::UnlimitedLiabilityContinueIn => {
                "B.C. UNLIMITED LIABILITY COMPANY"
            }
            LegalType::CommunityContributionCompany
            | LegalType::CommunityContributionContinueIn => {
                "B.C. COMMUNITY CONTRIBUTION COMPANY LTD."
            }
            _ => "B.C. LTD.",
        };
        format!("{digits} {suffix}")
    }

    /// Whether a pre-2004 company still owes a transition application.
    ///
    /// # Arguments
    ///
    /// * `transition_filed` - Whether a completed transition filing exists
    #[must_use]
    pub fn transition_needed(&self, transition_filed: bool) -> bool {
        matches!(
            self.legal_type,
            LegalType::LimitedCompany
                | LegalType::UnlimitedLiabilityCompany
                | LegalType::CommunityContributionCompany
        ) && self.founding_date.date() < TRANSITION_CUTOFF
            && !transition_filed
    }

    /// Whether the business is in good standing on `today`.
    ///
    /// Only active non-firm entities can fall out of good standing. A limited
    /// restoration or an outstanding transition breaks standing outright;
    /// otherwise the last annual report (or the founding date) must be within
    /// one year, two months and one day.
    ///
    /// # Arguments
    ///
    /// * `today` - Calendar date in the legislation timezone, the same date
    ///   filing validation uses (see [`crate::legislation_date`])
    /// * `transition_filed` - Whether a completed transition filing exists
    #[must_use]
    pub fn good_standing(&self, today: Date, transition_filed: bool) -> bool {
        if self.state != EntityState::Active || self.legal_type.is_firm() {
            return true;
        }
        if self.restoration_expiry_date.is_some() || self.transition_needed(transition_filed) {
            return false;
        }

        let base: Date = self
            .last_ar_date
            .unwrap_or_else(|| self.founding_date.date());
        add_years_months_days(base, 1, 2, 1).is_ok_and(|threshold| threshold > today)
    }

    /// Renders the public JSON view of the business.
    #[must_use]
    pub fn to_json(&self, facts: StandingFacts) -> Value {
        let mut view: Map<String, Value> = Map::new();
        view.insert("identifier".into(), json!(self.identifier));
        view.insert("legalName".into(), json!(self.display_name()));
        view.insert("legalType".into(), json!(self.legal_type.as_str()));
        view.insert("state".into(), json!(self.state.as_str()));
        view.insert(
            "foundingDate".into(),
            json!(format_datetime(self.founding_date)),
        );
        view.insert("goodStanding".into(), json!(facts.good_standing));
        view.insert("inDissolution".into(), json!(facts.in_dissolution));
        view.insert("hasRestrictions".into(), json!(self.restriction_ind));
        view.insert("adminFreeze".into(), json!(self.admin_freeze));
        view.insert(
            "lastAnnualReportDate".into(),
            json!(self.last_ar_date.map(format_date)),
        );
        view.insert(
            "lastAnnualGeneralMeetingDate".into(),
            json!(self.last_agm_date.map(format_date)),
        );
        view.insert(
            "lastAddressChangeDate".into(),
            json!(self.last_coa_date.map(format_date)),
        );
        view.insert(
            "lastDirectorChangeDate".into(),
            json!(self.last_cod_date.map(format_date)),
        );

        if let Some(dissolved) = self.dissolution_date {
            view.insert("dissolutionDate".into(), json!(format_datetime(dissolved)));
        }
        if let Some(expiry) = self.restoration_expiry_date {
            view.insert(
                "restorationExpiryDate".into(),
                json!(format_datetime(expiry)),
            );
        }
        if let Some(fye) = self.fiscal_year_end_date {
            view.insert("fiscalYearEndDate".into(), json!(format_date(fye)));
        }
        if let Some(tax_id) = &self.tax_id {
            view.insert("taxId".into(), json!(tax_id));
        }
        if let Some(code) = &self.naics_code {
            view.insert("naicsCode".into(), json!(code));
            view.insert("naicsDescription".into(), json!(self.naics_description));
        }
        if let Some(association) = &self.association_type {
            view.insert("associationType".into(), json!(association));
        }
        if let Some(year) = self.last_ar_year {
            view.insert("lastArYear".into(), json!(year));
        }

        Value::Object(view)
    }
}
