// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{ErrorMessage, ErrorStatus};
use bizreg_domain::{BusinessProfile, LegalType};
use serde_json::{Value, json};

use super::helpers::{
    FakeNameRequests, TODAY, assert_rejected_at, bc_office, create_context, create_filing,
    create_profile, errors, person,
};
use crate::{NaicsService, NameRequestState, ValidationContext, validate_filing};

/// Knows a single NAICS code.
struct OneNaicsCode;

impl NaicsService for OneNaicsCode {
    fn is_valid(&self, code: &str, description: &str) -> bool {
        code == "311911" && description == "Roasted nut and peanut butter manufacturing"
    }
}

fn name_requests() -> FakeNameRequests {
    FakeNameRequests::default()
        .with("NR 1111111", LegalType::SoleProprietorship, NameRequestState::Approved)
        .with("NR 2222222", LegalType::GeneralPartnership, NameRequestState::Approved)
}

fn registration(legal_type: &str, nr_number: &str, parties: Vec<Value>) -> Value {
    json!({
        "filing": {
            "header": { "name": "registration" },
            "registration": {
                "nameRequest": { "nrNumber": nr_number, "legalType": legal_type },
                "business": {
                    "naics": {
                        "naicsCode": "311911",
                        "naicsDescription": "Roasted nut and peanut butter manufacturing"
                    }
                },
                "startDate": "2024-04-15",
                "offices": { "businessOffice": bc_office() },
                "parties": parties
            }
        }
    })
}

#[test]
fn test_sole_proprietorship_registration_passes() {
    let requests: FakeNameRequests = name_requests();
    let ctx: ValidationContext<'_> = ValidationContext::new(TODAY)
        .with_name_requests(&requests)
        .with_naics(&OneNaicsCode);
    let filing: Value = registration(
        "SP",
        "NR 1111111",
        vec![
            person("Cal", "Completer", &["Completing Party"]),
            person("Pat", "Owner", &["Proprietor"]),
        ],
    );

    assert_eq!(validate_filing(&ctx, &filing), Ok(()));
}

#[test]
fn test_partnership_needs_two_partners() {
    let requests: FakeNameRequests = name_requests();
    let ctx: ValidationContext<'_> = ValidationContext::new(TODAY)
        .with_name_requests(&requests)
        .with_naics(&OneNaicsCode);
    let filing: Value = registration(
        "GP",
        "NR 2222222",
        vec![person("Pat", "Partner", &["Completing Party", "Partner"])],
    );

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].error, "A minimum of 2 Partner is required.");
}

#[test]
fn test_registration_checks_naics_start_date_and_tax_id() {
    let requests: FakeNameRequests = name_requests();
    let ctx: ValidationContext<'_> = ValidationContext::new(TODAY)
        .with_name_requests(&requests)
        .with_naics(&OneNaicsCode);
    let mut filing: Value = registration(
        "SP",
        "NR 1111111",
        vec![person("Pat", "Owner", &["Completing Party", "Proprietor"])],
    );
    let section: &mut Value = &mut filing["filing"]["registration"];
    section["business"]["naics"]["naicsCode"] = json!("999999");
    section["business"]["taxId"] = json!("12345");
    section["startDate"] = json!("2024-09-01");

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    let found: Vec<&str> = messages.iter().filter_map(|m| m.path.as_deref()).collect();
    assert_eq!(
        found,
        vec![
            "/filing/registration/business/naics/naicsCode",
            "/filing/registration/startDate",
            "/filing/registration/business/taxId",
        ]
    );
}

#[test]
fn test_registration_without_name_request_is_rejected() {
    let ctx: ValidationContext<'_> = ValidationContext::new(TODAY);
    let filing: Value = registration(
        "SP",
        "",
        vec![person("Pat", "Owner", &["Completing Party", "Proprietor"])],
    );

    assert_rejected_at(
        validate_filing(&ctx, &filing),
        ErrorStatus::BadRequest,
        "/filing/registration/nameRequest/nrNumber",
    );
}

#[test]
fn test_company_cannot_register_as_firm() {
    let ctx: ValidationContext<'_> = ValidationContext::new(TODAY);
    let filing: Value = registration("BC", "NR 1111111", Vec::new());

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    assert_eq!(
        messages[0].error,
        "Registration is not available for a BC Limited Company."
    );
}

#[test]
fn test_change_of_registration_checks_sections_present() {
    let profile: BusinessProfile = create_profile("FM1234567", LegalType::SoleProprietorship);
    let ctx: ValidationContext<'_> = create_context(&profile);

    let address_only: Value = create_filing(
        "changeOfRegistration",
        "FM1234567",
        json!({ "offices": { "businessOffice": bc_office() } }),
    );
    assert_eq!(validate_filing(&ctx, &address_only), Ok(()));

    let two_owners: Value = create_filing(
        "changeOfRegistration",
        "FM1234567",
        json!({ "parties": [
            person("Pat", "Owner", &["Proprietor"]),
            person("Sam", "Owner", &["Proprietor"]),
        ] }),
    );
    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &two_owners));
    assert_eq!(messages[0].error, "A maximum of 1 Proprietor is allowed.");
}

#[test]
fn test_change_of_registration_is_firm_only() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing("changeOfRegistration", "BC1234567", json!({}));

    assert_rejected_at(
        validate_filing(&ctx, &filing),
        ErrorStatus::BadRequest,
        "/filing/header/name",
    );
}
