// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_business, create_test_company};
use crate::{Business, EntityState, LegalType, StandingFacts};
use serde_json::Value;
use time::macros::{date, datetime};

#[test]
fn test_recent_annual_report_is_in_good_standing() {
    let mut business: Business = create_test_company();
    business.last_ar_date = Some(date!(2024 - 03 - 01));

    assert!(business.good_standing(date!(2024 - 12 - 01), false));
}

#[test]
fn test_stale_annual_report_is_not_in_good_standing() {
    let mut business: Business = create_test_company();
    business.last_ar_date = Some(date!(2022 - 03 - 01));

    assert!(!business.good_standing(date!(2024 - 12 - 01), false));
}

#[test]
fn test_good_standing_threshold_is_one_year_two_months_one_day() {
    let mut business: Business = create_test_company();
    business.last_ar_date = Some(date!(2023 - 01 - 15));

    // threshold is 2024-03-16
    assert!(business.good_standing(date!(2024 - 03 - 15), false));
    assert!(!business.good_standing(date!(2024 - 03 - 16), false));
}

#[test]
fn test_founding_date_used_without_annual_report() {
    let business: Business = create_test_company();

    assert!(business.good_standing(date!(2021 - 01 - 01), false));
    assert!(!business.good_standing(date!(2022 - 01 - 01), false));
}

#[test]
fn test_non_active_business_is_in_good_standing() {
    let mut business: Business = create_test_company();
    business.state = EntityState::Historical;

    assert!(business.good_standing(date!(2030 - 01 - 01), false));
}

#[test]
fn test_firm_is_always_in_good_standing() {
    let business: Business =
        create_test_business(LegalType::SoleProprietorship, datetime!(2000-01-01 0:00 UTC));

    assert!(business.good_standing(date!(2030 - 01 - 01), false));
}

#[test]
fn test_limited_restoration_breaks_good_standing() {
    let mut business: Business = create_test_company();
    business.last_ar_date = Some(date!(2024 - 06 - 01));
    business.restoration_expiry_date = Some(datetime!(2025-06-01 0:00 UTC));

    assert!(!business.good_standing(date!(2024 - 07 - 01), false));
}

#[test]
fn test_pre_2004_company_needs_transition() {
    let mut business: Business =
        create_test_business(LegalType::LimitedCompany, datetime!(1999-05-01 0:00 UTC));
    business.last_ar_date = Some(date!(2024 - 06 - 01));

    assert!(business.transition_needed(false));
    assert!(!business.transition_needed(true));
    assert!(!business.good_standing(date!(2024 - 07 - 01), false));
    assert!(business.good_standing(date!(2024 - 07 - 01), true));
}

#[test]
fn test_benefit_company_never_needs_transition() {
    let business: Business =
        create_test_business(LegalType::BenefitCompany, datetime!(1999-05-01 0:00 UTC));

    assert!(!business.transition_needed(false));
}

#[test]
fn test_json_view_carries_standing_facts() {
    let mut business: Business = create_test_company();
    business.last_ar_date = Some(date!(2024 - 03 - 01));
    business.tax_id = Some(String::from("123456789"));

    let view: Value = business.to_json(StandingFacts {
        good_standing: true,
        in_dissolution: false,
    });

    assert_eq!(view["identifier"], "BC1234567");
    assert_eq!(view["legalType"], "BEN");
    assert_eq!(view["state"], "ACTIVE");
    assert_eq!(view["goodStanding"], true);
    assert_eq!(view["inDissolution"], false);
    assert_eq!(view["lastAnnualReportDate"], "2024-03-01");
    assert_eq!(view["taxId"], "123456789");
    assert!(view.get("dissolutionDate").is_none());
}

#[test]
fn test_business_serde_uses_codes() {
    let business: Business = create_test_company();
    let value: Value = serde_json::to_value(&business).unwrap();

    assert_eq!(value["legal_type"], "BEN");
    assert_eq!(value["state"], "ACTIVE");

    let back: Business = serde_json::from_value(value).unwrap();
    assert_eq!(back, business);
}
