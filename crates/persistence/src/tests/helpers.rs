// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{Filing, NEW_VERSIONING_FLAG, StaticFlags};
use bizreg_domain::{
    Address, AddressType, Business, LegalType, Office, OfficeType, Party, PartyRole, RoleType,
    ShareClass,
};
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::macros::{date, datetime};

use crate::Persistence;

pub const FOUNDED: OffsetDateTime = datetime!(2019-03-15 10:00 UTC);
pub const NOW: OffsetDateTime = datetime!(2024-05-01 17:00 UTC);

pub fn create_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_persistence_with_new_versioning() -> Persistence {
    create_persistence().with_flags(StaticFlags::new([NEW_VERSIONING_FLAG]))
}

pub fn create_test_business(identifier: &str) -> Business {
    Business::new(
        identifier,
        Some(String::from("Test Holdings Ltd.")),
        LegalType::BenefitCompany,
        FOUNDED,
    )
}

pub fn create_test_address(address_type: AddressType, street: &str) -> Address {
    let mut address: Address = Address::new(address_type, street, "Victoria", "ca");
    address.address_region = Some(String::from("BC"));
    address.postal_code = Some(String::from("V8W 1A1"));
    address
}

pub fn create_registered_office(street: &str) -> Office {
    let mut office: Office = Office::new(OfficeType::RegisteredOffice);
    office
        .addresses
        .push(create_test_address(AddressType::Mailing, street));
    office
        .addresses
        .push(create_test_address(AddressType::Delivery, street));
    office
}

pub fn create_director(first_name: &str, last_name: &str) -> PartyRole {
    let mut party: Party = Party::person(first_name, last_name);
    party.mailing_address = Some(create_test_address(AddressType::Mailing, "1 Main St"));
    PartyRole::new(RoleType::Director, party, Some(date!(2020 - 01 - 01)))
}

pub fn create_share_class(name: &str) -> ShareClass {
    let mut class: ShareClass = ShareClass::new(name, Some(1));
    class.max_share_flag = true;
    class.max_shares = Some(10_000);
    class
}

pub fn create_filing_json(name: &str, identifier: &str) -> Value {
    let mut document: Value = json!({
        "filing": {
            "header": { "name": name, "date": "2024-05-01" },
            "business": { "identifier": identifier, "legalType": "BEN" }
        }
    });
    document["filing"][name] = json!({});
    document
}

/// A draft filing of `name` for a saved business.
pub fn create_filing(name: &str, business: &Business) -> Filing {
    let mut filing: Filing = Filing::new(NOW);
    filing
        .set_filing_json(create_filing_json(name, &business.identifier))
        .unwrap();
    filing.set_business_id(business.id.unwrap()).unwrap();
    filing
}

/// Saves a business with one office, one director and one share class.
pub fn seed_business(persistence: &mut Persistence, identifier: &str) -> Business {
    persistence
        .transaction(Some("127.0.0.1"), |session| {
            let mut business: Business = create_test_business(identifier);
            let business_id: i64 = session.save_business(&mut business)?;

            let mut office: Office = create_registered_office("100 Douglas St");
            session.save_office(business_id, &mut office)?;

            let mut director: PartyRole = create_director("Jane", "Doe");
            session.save_party_role(business_id, &mut director)?;

            let mut class: ShareClass = create_share_class("Common");
            session.save_share_class(business_id, &mut class)?;

            Ok(business)
        })
        .expect("seed business")
}
