// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// What an address is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Mailing,
    Delivery,
    /// Address a furnishing (notice) was sent to.
    Furnishing,
}

impl AddressType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mailing => "mailing",
            Self::Delivery => "delivery",
            Self::Furnishing => "furnishing",
        }
    }

    /// The key under which filings carry this address (`mailingAddress`, ...).
    #[must_use]
    pub const fn json_key(&self) -> &'static str {
        match self {
            Self::Mailing => "mailingAddress",
            Self::Delivery => "deliveryAddress",
            Self::Furnishing => "furnishingAddress",
        }
    }
}

impl FromStr for AddressType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mailing" => Ok(Self::Mailing),
            "delivery" => Ok(Self::Delivery),
            "furnishing" => Ok(Self::Furnishing),
            _ => Err(DomainError::UnknownCode {
                kind: "address type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A postal address owned by a business, office, party or furnishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: Option<i64>,
    pub address_type: AddressType,
    pub street_address: String,
    pub street_address_additional: Option<String>,
    pub address_city: String,
    pub address_region: Option<String>,
    /// ISO 3166-1 alpha-2 code.
    pub address_country: String,
    pub postal_code: Option<String>,
    pub delivery_instructions: Option<String>,
    pub business_id: Option<i64>,
    pub office_id: Option<i64>,
    pub party_id: Option<i64>,
    pub furnishing_id: Option<i64>,
}

fn optional_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl Address {
    /// Creates an unowned address with the required fields.
    #[must_use]
    pub fn new(
        address_type: AddressType,
        street_address: &str,
        address_city: &str,
        address_country: &str,
    ) -> Self {
        Self {
            id: None,
            address_type,
            street_address: street_address.to_string(),
            street_address_additional: None,
            address_city: address_city.to_string(),
            address_region: None,
            address_country: address_country.to_uppercase(),
            postal_code: None,
            delivery_instructions: None,
            business_id: None,
            office_id: None,
            party_id: None,
            furnishing_id: None,
        }
    }

    /// Reads an address from its filing JSON representation.
    ///
    /// # Arguments
    ///
    /// * `value` - The address object (`streetAddress`, `addressCity`, ...)
    /// * `address_type` - Which kind of address this is
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidJson` if a required field is missing.
    pub fn from_json(value: &Value, address_type: AddressType) -> Result<Self, DomainError> {
        let required = |key: &str| {
            optional_str(value, key).ok_or_else(|| DomainError::InvalidJson {
                path: format!("/{}/{key}", address_type.json_key()),
                reason: format!("{key} is required"),
            })
        };

        let mut address = Self::new(
            address_type,
            &required("streetAddress")?,
            &required("addressCity")?,
            &required("addressCountry")?,
        );
        address.street_address_additional = optional_str(value, "streetAddressAdditional");
        address.address_region = optional_str(value, "addressRegion");
        address.postal_code = optional_str(value, "postalCode");
        address.delivery_instructions = optional_str(value, "deliveryInstructions");
        Ok(address)
    }

    /// Renders the address in filing JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "addressType": self.address_type.as_str(),
            "streetAddress": self.street_address,
            "streetAddressAdditional": self.street_address_additional.clone().unwrap_or_default(),
            "addressCity": self.address_city,
            "addressRegion": self.address_region.clone().unwrap_or_default(),
            "addressCountry": self.address_country,
            "postalCode": self.postal_code.clone().unwrap_or_default(),
            "deliveryInstructions": self.delivery_instructions.clone().unwrap_or_default(),
        })
    }
}
