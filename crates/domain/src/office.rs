// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::address::{Address, AddressType};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OfficeType {
    RegisteredOffice,
    RecordsOffice,
    BusinessOffice,
    CustodialOffice,
}

impl OfficeType {
    pub const ALL: [Self; 4] = [
        Self::RegisteredOffice,
        Self::RecordsOffice,
        Self::BusinessOffice,
        Self::CustodialOffice,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RegisteredOffice => "registeredOffice",
            Self::RecordsOffice => "recordsOffice",
            Self::BusinessOffice => "businessOffice",
            Self::CustodialOffice => "custodialOffice",
        }
    }
}

impl FromStr for OfficeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCode {
                kind: "office type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for OfficeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An office of a business and its addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub id: Option<i64>,
    pub business_id: Option<i64>,
    pub office_type: OfficeType,
    pub deactivated: bool,
    pub addresses: Vec<Address>,
}

impl Office {
    #[must_use]
    pub const fn new(office_type: OfficeType) -> Self {
        Self {
            id: None,
            business_id: None,
            office_type,
            deactivated: false,
            addresses: Vec::new(),
        }
    }

    /// Returns the address of the given type, if the office has one.
    #[must_use]
    pub fn address(&self, address_type: AddressType) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.address_type == address_type)
    }

    /// Renders `{ "mailingAddress": {...}, "deliveryAddress": {...} }`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut view: Map<String, Value> = Map::new();
        for address in &self.addresses {
            view.insert(
                address.address_type.json_key().to_string(),
                address.to_json(),
            );
        }
        Value::Object(view)
    }
}

/// Renders a set of offices keyed by office type.
#[must_use]
pub fn offices_to_json(offices: &[Office]) -> Value {
    let mut view: Map<String, Value> = Map::new();
    for office in offices.iter().filter(|o| !o.deactivated) {
        view.insert(office.office_type.as_str().to_string(), office.to_json());
    }
    Value::Object(view)
}
