// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::address::Address;
use crate::error::DomainError;
use crate::legislation::format_date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;
use time::Date;

/// Whether a party is a natural person or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    Person,
    Organization,
}

impl PartyType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Organization => "organization",
        }
    }
}

impl FromStr for PartyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person" => Ok(Self::Person),
            "organization" => Ok(Self::Organization),
            _ => Err(DomainError::UnknownCode {
                kind: "party type",
                value: s.to_string(),
            }),
        }
    }
}

/// A person or organization that can hold roles in businesses.
///
/// An organization party with an `identifier` is itself a registered entity
/// (an entity-role holder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: Option<i64>,
    pub party_type: PartyType,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub organization_name: Option<String>,
    pub identifier: Option<String>,
    pub email: Option<String>,
    pub mailing_address: Option<Address>,
    pub delivery_address: Option<Address>,
}

impl Party {
    /// Creates a person party.
    #[must_use]
    pub fn person(first_name: &str, last_name: &str) -> Self {
        Self {
            id: None,
            party_type: PartyType::Person,
            first_name: Some(first_name.to_string()),
            middle_initial: None,
            last_name: Some(last_name.to_string()),
            title: None,
            organization_name: None,
            identifier: None,
            email: None,
            mailing_address: None,
            delivery_address: None,
        }
    }

    /// Creates an organization party.
    #[must_use]
    pub fn organization(name: &str, identifier: Option<String>) -> Self {
        Self {
            id: None,
            party_type: PartyType::Organization,
            first_name: None,
            middle_initial: None,
            last_name: None,
            title: None,
            organization_name: Some(name.to_string()),
            identifier,
            email: None,
            mailing_address: None,
            delivery_address: None,
        }
    }

    /// The party's display name, upper-cased for persons.
    #[must_use]
    pub fn name(&self) -> String {
        match self.party_type {
            PartyType::Person => [&self.first_name, &self.middle_initial, &self.last_name]
                .into_iter()
                .filter_map(|part| part.as_deref())
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<&str>>()
                .join(" ")
                .to_uppercase(),
            PartyType::Organization => self.organization_name.clone().unwrap_or_default(),
        }
    }

    /// Renders the `officer` object used in filings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut officer: Map<String, Value> = Map::new();
        officer.insert("id".into(), json!(self.id));
        officer.insert("partyType".into(), json!(self.party_type.as_str()));
        match self.party_type {
            PartyType::Person => {
                officer.insert("firstName".into(), json!(self.first_name));
                officer.insert("lastName".into(), json!(self.last_name));
                if let Some(middle) = &self.middle_initial {
                    officer.insert("middleInitial".into(), json!(middle));
                }
            }
            PartyType::Organization => {
                officer.insert("organizationName".into(), json!(self.organization_name));
                if let Some(identifier) = &self.identifier {
                    officer.insert("identifier".into(), json!(identifier));
                }
            }
        }
        if let Some(email) = &self.email {
            officer.insert("email".into(), json!(email));
        }
        Value::Object(officer)
    }
}

/// A role a party holds in a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Applicant,
    CompletingParty,
    Custodian,
    Director,
    Incorporator,
    Liquidator,
    Proprietor,
    Partner,
    Receiver,
}

impl RoleType {
    pub const ALL: [Self; 9] = [
        Self::Applicant,
        Self::CompletingParty,
        Self::Custodian,
        Self::Director,
        Self::Incorporator,
        Self::Liquidator,
        Self::Proprietor,
        Self::Partner,
        Self::Receiver,
    ];

    /// The stored form (`completing_party`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applicant => "applicant",
            Self::CompletingParty => "completing_party",
            Self::Custodian => "custodian",
            Self::Director => "director",
            Self::Incorporator => "incorporator",
            Self::Liquidator => "liquidator",
            Self::Proprietor => "proprietor",
            Self::Partner => "partner",
            Self::Receiver => "receiver",
        }
    }

    /// The form used in filing documents (`Completing Party`).
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Applicant => "Applicant",
            Self::CompletingParty => "Completing Party",
            Self::Custodian => "Custodian",
            Self::Director => "Director",
            Self::Incorporator => "Incorporator",
            Self::Liquidator => "Liquidator",
            Self::Proprietor => "Proprietor",
            Self::Partner => "Partner",
            Self::Receiver => "Receiver",
        }
    }

    /// Parses either the stored or the display form, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCode` for unrecognized roles.
    pub fn from_filing_role(value: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| {
                r.as_str().eq_ignore_ascii_case(value) || r.display_name().eq_ignore_ascii_case(value)
            })
            .ok_or_else(|| DomainError::UnknownCode {
                kind: "role type",
                value: value.to_string(),
            })
    }
}

impl FromStr for RoleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_filing_role(s)
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A party's role in a business over a span of dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRole {
    pub id: Option<i64>,
    pub business_id: Option<i64>,
    pub filing_id: Option<i64>,
    pub role: RoleType,
    #[serde(default, with = "crate::legislation::iso_date::option")]
    pub appointment_date: Option<Date>,
    #[serde(default, with = "crate::legislation::iso_date::option")]
    pub cessation_date: Option<Date>,
    pub party: Party,
}

impl PartyRole {
    #[must_use]
    pub const fn new(role: RoleType, party: Party, appointment_date: Option<Date>) -> Self {
        Self {
            id: None,
            business_id: None,
            filing_id: None,
            role,
            appointment_date,
            cessation_date: None,
            party,
        }
    }

    /// Whether the role was held on `date`.
    ///
    /// The appointment day counts; the cessation day does not.
    #[must_use]
    pub fn is_active_on(&self, date: Date) -> bool {
        self.appointment_date.is_none_or(|start| start <= date)
            && self.cessation_date.is_none_or(|end| end > date)
    }

    /// Renders the role with its officer and addresses.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut view: Map<String, Value> = Map::new();
        view.insert("roleType".into(), json!(self.role.display_name()));
        view.insert("officer".into(), self.party.to_json());
        view.insert(
            "appointmentDate".into(),
            json!(self.appointment_date.map(format_date)),
        );
        view.insert(
            "cessationDate".into(),
            json!(self.cessation_date.map(format_date)),
        );
        if let Some(mailing) = &self.party.mailing_address {
            view.insert("mailingAddress".into(), mailing.to_json());
        }
        if let Some(delivery) = &self.party.delivery_address {
            view.insert("deliveryAddress".into(), delivery.to_json());
        }
        Value::Object(view)
    }
}
