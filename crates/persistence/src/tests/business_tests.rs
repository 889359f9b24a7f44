// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorStatus;
use bizreg_domain::{
    AddressType, Business, BusinessProfile, OfficeType, PartyRole, RoleType, ShareClass,
    ShareSeries,
};
use time::macros::date;

use crate::Persistence;
use crate::error::PersistenceError;

use super::helpers::{
    NOW, create_director, create_persistence, create_share_class, create_test_business,
    seed_business,
};

#[test]
fn test_save_business_assigns_id() {
    let mut persistence: Persistence = create_persistence();

    let business: Business = seed_business(&mut persistence, "BC1234567");

    let business_id: i64 = business.id.expect("saved business has an ID");
    let found: Business = persistence.find_business("BC1234567").unwrap().unwrap();
    assert_eq!(found.id, Some(business_id));
    assert_eq!(found.legal_name.as_deref(), Some("Test Holdings Ltd."));
    assert_eq!(found.founding_date, business.founding_date);
}

#[test]
fn test_unknown_business_is_not_found() {
    let mut persistence: Persistence = create_persistence();

    assert!(persistence.find_business("BC0000001").unwrap().is_none());

    let err: PersistenceError = persistence.get_business(99).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::NotFound);
}

#[test]
fn test_invalid_identifier_rejected_and_rolled_back() {
    let mut persistence: Persistence = create_persistence();

    let result: Result<i64, PersistenceError> = persistence.transaction(None, |session| {
        let mut business: Business = create_test_business("BC0000000");
        session.save_business(&mut business)
    });

    let err: PersistenceError = result.unwrap_err();
    assert_eq!(err.status(), ErrorStatus::BadRequest);
    assert!(persistence.find_business("BC0000000").unwrap().is_none());
}

#[test]
fn test_failed_unit_of_work_writes_nothing() {
    let mut persistence: Persistence = create_persistence();

    let result: Result<(), PersistenceError> = persistence.transaction(None, |session| {
        let mut business: Business = create_test_business("BC1111111");
        session.save_business(&mut business)?;
        Err(PersistenceError::NotFound(String::from("abort")))
    });

    assert!(result.is_err());
    assert!(persistence.find_business("BC1111111").unwrap().is_none());
    assert!(persistence.get_transaction(1).is_err());
}

#[test]
fn test_profile_joins_offices_parties_and_shares() {
    let mut persistence: Persistence = create_persistence();
    let business: Business = seed_business(&mut persistence, "BC1234567");

    let profile: BusinessProfile = persistence
        .business_profile(business.id.unwrap())
        .unwrap();

    let office = profile
        .office(OfficeType::RegisteredOffice)
        .expect("registered office");
    assert_eq!(office.addresses.len(), 2);
    assert_eq!(
        office.address(AddressType::Delivery).unwrap().street_address,
        "100 Douglas St"
    );

    let directors: Vec<&PartyRole> = profile.active_roles(RoleType::Director, date!(2024 - 05 - 01));
    assert_eq!(directors.len(), 1);
    let mailing = directors[0].party.mailing_address.as_ref().unwrap();
    assert_eq!(mailing.street_address, "1 Main St");
    assert_eq!(mailing.address_country, "CA");

    assert!(profile.share_class("Common").is_some());
}

#[test]
fn test_update_business_keeps_id() {
    let mut persistence: Persistence = create_persistence();
    let mut business: Business = seed_business(&mut persistence, "BC1234567");

    let updated_id: i64 = persistence
        .transaction(None, |session| {
            business.legal_name = Some(String::from("Renamed Holdings Ltd."));
            session.save_business(&mut business)
        })
        .unwrap();

    assert_eq!(Some(updated_id), business.id);
    let found: Business = persistence.get_business(updated_id).unwrap();
    assert_eq!(found.legal_name.as_deref(), Some("Renamed Holdings Ltd."));
}

#[test]
fn test_duplicate_identifier_rejected() {
    let mut persistence: Persistence = create_persistence();
    seed_business(&mut persistence, "BC1234567");

    let result: Result<i64, PersistenceError> = persistence.transaction(None, |session| {
        let mut duplicate: Business = create_test_business("BC1234567");
        session.save_business(&mut duplicate)
    });

    assert!(result.is_err());
}

#[test]
fn test_business_deletion_forbidden() {
    let mut persistence: Persistence = create_persistence();
    let business: Business = seed_business(&mut persistence, "BC1234567");
    let business_id: i64 = business.id.unwrap();

    let err: PersistenceError = persistence
        .transaction(None, |session| session.delete_business(business_id))
        .unwrap_err();

    assert_eq!(err.status(), ErrorStatus::Forbidden);
    assert_eq!(err.to_string(), "Deletion not allowed.");
    assert!(persistence.get_business(business_id).is_ok());
}

#[test]
fn test_series_without_special_rights_rejected() {
    let mut persistence: Persistence = create_persistence();
    let business: Business = seed_business(&mut persistence, "BC1234567");
    let business_id: i64 = business.id.unwrap();

    let err: PersistenceError = persistence
        .transaction(None, |session| {
            let mut class: ShareClass = create_share_class("Preferred");
            class.series.push(ShareSeries::new("Series A", Some(1)));
            session.save_share_class(business_id, &mut class)
        })
        .unwrap_err();

    assert_eq!(err.status(), ErrorStatus::BadRequest);
    let profile: BusinessProfile = persistence.business_profile(business_id).unwrap();
    assert!(profile.share_class("Preferred").is_none());
}

#[test]
fn test_share_series_saved_with_class() {
    let mut persistence: Persistence = create_persistence();
    let business: Business = seed_business(&mut persistence, "BC1234567");
    let business_id: i64 = business.id.unwrap();

    persistence
        .transaction(None, |session| {
            let mut class: ShareClass = create_share_class("Preferred");
            class.special_rights_flag = true;
            class.series.push(ShareSeries::new("Series B", Some(2)));
            class.series.push(ShareSeries::new("Series A", Some(1)));
            session.save_share_class(business_id, &mut class)
        })
        .unwrap();

    let profile: BusinessProfile = persistence.business_profile(business_id).unwrap();
    let class: &ShareClass = profile.share_class("Preferred").unwrap();
    let names: Vec<&str> = class.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Series A", "Series B"]);
}

#[test]
fn test_delete_party_role_keeps_party() {
    let mut persistence: Persistence = create_persistence();
    let business: Business = seed_business(&mut persistence, "BC1234567");
    let business_id: i64 = business.id.unwrap();

    let role_id: i64 = persistence
        .transaction(None, |session| {
            let mut director: PartyRole = create_director("John", "Smith");
            session.save_party_role(business_id, &mut director)
        })
        .unwrap();
    assert_eq!(persistence.business_profile(business_id).unwrap().party_roles.len(), 2);

    persistence
        .transaction(None, |session| session.delete_party_role(role_id))
        .unwrap();

    let profile: BusinessProfile = persistence.business_profile(business_id).unwrap();
    assert_eq!(profile.party_roles.len(), 1);
    assert_eq!(profile.party_roles[0].party.last_name.as_deref(), Some("Doe"));
}

#[test]
fn test_delete_missing_address_not_found() {
    let mut persistence: Persistence = create_persistence();

    let err: PersistenceError = persistence
        .transaction(None, |session| session.delete_address(42))
        .unwrap_err();

    assert_eq!(err.status(), ErrorStatus::NotFound);
}

#[test]
fn test_good_standing_follows_annual_reports() {
    let mut persistence: Persistence = create_persistence();
    let mut business: Business = seed_business(&mut persistence, "BC1234567");
    let business_id: i64 = business.id.unwrap();

    assert!(!persistence.good_standing(business_id, NOW.date()).unwrap());

    persistence
        .transaction(None, |session| {
            business.last_ar_date = Some(date!(2024 - 01 - 15));
            session.save_business(&mut business)
        })
        .unwrap();

    assert!(persistence.good_standing(business_id, NOW.date()).unwrap());
    let facts = persistence.standing_facts(&business, NOW.date()).unwrap();
    assert!(facts.good_standing);
    assert!(!facts.in_dissolution);
}
