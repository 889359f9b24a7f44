// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::AddressType;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::str_at;

#[allow(clippy::expect_used)]
static CANADIAN_POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]\d[A-Za-z][ -]?\d[A-Za-z]\d$").expect("postal code pattern is a valid literal")
});

#[allow(clippy::expect_used)]
static PO_BOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(p\.?\s*o\.?\s*box|post\s+office\s+box)\b").expect("PO box pattern is a valid literal")
});

const PROVINCES: [&str; 13] = [
    "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
];

/// Where an address must be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locality {
    Anywhere,
    Canada,
    BritishColumbia,
}

/// Checks one address object at `pointer`.
///
/// # Arguments
///
/// * `filing` - The whole filing document
/// * `pointer` - JSON pointer to the address object
/// * `address_type` - Delivery addresses may not be PO boxes
/// * `locality` - Required location of the address
/// * `messages` - Collected messages
pub fn validate_address(
    filing: &Value,
    pointer: &str,
    address_type: AddressType,
    locality: Locality,
    messages: &mut Vec<ErrorMessage>,
) {
    let Some(address) = filing.pointer(pointer).filter(|v| v.is_object()) else {
        messages.push(ErrorMessage::at(
            format!("{} is required.", address_type.json_key()),
            pointer,
        ));
        return;
    };

    for field in ["streetAddress", "addressCity", "addressCountry"] {
        if str_at(address, &format!("/{field}")).is_none() {
            messages.push(ErrorMessage::at(
                format!("{field} is required."),
                format!("{pointer}/{field}"),
            ));
        }
    }

    if address_type == AddressType::Delivery
        && str_at(address, "/streetAddress").is_some_and(|street| PO_BOX.is_match(street))
    {
        messages.push(ErrorMessage::at(
            "Delivery address cannot be a PO Box.",
            format!("{pointer}/streetAddress"),
        ));
    }

    let country: Option<String> = str_at(address, "/addressCountry").map(str::to_uppercase);
    let region: Option<String> = str_at(address, "/addressRegion").map(str::to_uppercase);

    if let Some(country) = country.as_deref() {
        if country.len() != 2 {
            messages.push(ErrorMessage::at(
                "Address country must be an ISO 3166-1 alpha-2 code.",
                format!("{pointer}/addressCountry"),
            ));
        }
        if country == "CA" {
            validate_canadian(address, pointer, region.as_deref(), messages);
        }
    }

    match locality {
        Locality::Anywhere => {}
        Locality::Canada => {
            if country.as_deref() != Some("CA") {
                messages.push(ErrorMessage::at(
                    "Address must be in Canada.",
                    format!("{pointer}/addressCountry"),
                ));
            }
        }
        Locality::BritishColumbia => {
            if country.as_deref() != Some("CA") || region.as_deref() != Some("BC") {
                messages.push(ErrorMessage::at(
                    "Address must be in BC.",
                    format!("{pointer}/addressRegion"),
                ));
            }
        }
    }
}

fn validate_canadian(
    address: &Value,
    pointer: &str,
    region: Option<&str>,
    messages: &mut Vec<ErrorMessage>,
) {
    match region {
        None => messages.push(ErrorMessage::at(
            "addressRegion is required for Canadian addresses.",
            format!("{pointer}/addressRegion"),
        )),
        Some(region) if !PROVINCES.contains(&region) => messages.push(ErrorMessage::at(
            format!("{region} is not a Canadian province or territory."),
            format!("{pointer}/addressRegion"),
        )),
        Some(_) => {}
    }

    match str_at(address, "/postalCode") {
        None => messages.push(ErrorMessage::at(
            "postalCode is required for Canadian addresses.",
            format!("{pointer}/postalCode"),
        )),
        Some(code) if !CANADIAN_POSTAL_CODE.is_match(code.trim()) => {
            messages.push(ErrorMessage::at(
                format!("Invalid postal code: {code}."),
                format!("{pointer}/postalCode"),
            ));
        }
        Some(_) => {}
    }
}

/// Checks the mailing and delivery addresses of one office.
///
/// Both must be present. The delivery address must satisfy `locality`.
pub fn validate_office(
    filing: &Value,
    office_pointer: &str,
    locality: Locality,
    messages: &mut Vec<ErrorMessage>,
) {
    if filing.pointer(office_pointer).is_none() {
        messages.push(ErrorMessage::at(
            format!("{} is required.", office_label(office_pointer)),
            office_pointer,
        ));
        return;
    }
    validate_address(
        filing,
        &format!("{office_pointer}/mailingAddress"),
        AddressType::Mailing,
        Locality::Anywhere,
        messages,
    );
    validate_address(
        filing,
        &format!("{office_pointer}/deliveryAddress"),
        AddressType::Delivery,
        locality,
        messages,
    );
}

fn office_label(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}
