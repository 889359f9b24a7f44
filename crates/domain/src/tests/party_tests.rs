// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Address, AddressType, DomainError, Office, OfficeType, Party, PartyRole, RoleType,
    offices_to_json,
};
use serde_json::{Value, json};
use time::macros::date;

#[test]
fn test_person_name_joins_parts_in_upper_case() {
    let mut party: Party = Party::person("Joe", "Swanson");
    party.middle_initial = Some(String::from("P"));
    assert_eq!(party.name(), "JOE P SWANSON");
}

#[test]
fn test_organization_name() {
    let party: Party = Party::organization("Acme Holdings", Some(String::from("BC7654321")));
    assert_eq!(party.name(), "Acme Holdings");
    assert_eq!(party.to_json()["identifier"], "BC7654321");
}

#[test]
fn test_role_active_between_appointment_and_cessation() {
    let mut role: PartyRole = PartyRole::new(
        RoleType::Director,
        Party::person("Jane", "Doe"),
        Some(date!(2020 - 01 - 01)),
    );
    role.cessation_date = Some(date!(2023 - 06 - 30));

    assert!(!role.is_active_on(date!(2019 - 12 - 31)));
    assert!(role.is_active_on(date!(2020 - 01 - 01)));
    assert!(role.is_active_on(date!(2023 - 06 - 29)));
    assert!(!role.is_active_on(date!(2023 - 06 - 30)));
}

#[test]
fn test_role_type_parses_filing_and_stored_forms() {
    assert_eq!(
        RoleType::from_filing_role("Completing Party").unwrap(),
        RoleType::CompletingParty
    );
    assert_eq!(
        RoleType::from_filing_role("completing_party").unwrap(),
        RoleType::CompletingParty
    );
    assert!(matches!(
        RoleType::from_filing_role("Janitor"),
        Err(DomainError::UnknownCode { .. })
    ));
}

#[test]
fn test_address_from_json_requires_street_city_country() {
    let value: Value = json!({
        "streetAddress": "123 Main St",
        "addressCity": "Victoria",
        "addressCountry": "ca",
        "addressRegion": "BC",
        "postalCode": "V8W 1A1"
    });
    let address: Address = Address::from_json(&value, AddressType::Delivery).unwrap();
    assert_eq!(address.address_country, "CA");
    assert_eq!(address.postal_code.as_deref(), Some("V8W 1A1"));

    let missing: Value = json!({ "streetAddress": "123 Main St" });
    let err: DomainError = Address::from_json(&missing, AddressType::Mailing).unwrap_err();
    assert!(matches!(err, DomainError::InvalidJson { ref path, .. } if path == "/mailingAddress/addressCity"));
}

#[test]
fn test_offices_json_keyed_by_type() {
    let mut office: Office = Office::new(OfficeType::RegisteredOffice);
    office.addresses.push(Address::new(
        AddressType::Mailing,
        "PO Box 1",
        "Victoria",
        "CA",
    ));
    let mut closed: Office = Office::new(OfficeType::RecordsOffice);
    closed.deactivated = true;

    let view: Value = offices_to_json(&[office, closed]);
    assert_eq!(
        view["registeredOffice"]["mailingAddress"]["streetAddress"],
        "PO Box 1"
    );
    assert!(view.get("recordsOffice").is_none());
}
