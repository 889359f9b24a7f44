// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{ErrorMessage, ErrorStatus, Filing};
use bizreg_domain::{BusinessProfile, EntityState, LegalType};
use serde_json::{Value, json};
use time::macros::datetime;

use super::helpers::{
    assert_rejected_at, bc_office, completed_filing, create_context, create_filing,
    create_profile, errors, person,
};
use crate::{FilingList, ValidationContext, validate_filing};

fn historical_company() -> BusinessProfile {
    let mut profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    profile.business.state = EntityState::Historical;
    profile
}

fn paths(messages: &[ErrorMessage]) -> Vec<&str> {
    messages.iter().filter_map(|m| m.path.as_deref()).collect()
}

// ============================================================================
// Court orders and registrar filings
// ============================================================================

#[test]
fn test_court_order_passes() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing(
        "courtOrder",
        "BC1234567",
        json!({
            "fileNumber": "S-123456",
            "effectOfOrder": "planOfArrangement",
            "orderDate": "2024-04-01",
            "orderDetails": "Plan of arrangement approved."
        }),
    );

    assert_eq!(validate_filing(&ctx, &filing), Ok(()));
}

#[test]
fn test_court_order_reports_every_problem() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing(
        "courtOrder",
        "BC1234567",
        json!({
            "fileNumber": "S-1",
            "effectOfOrder": "dissolution",
            "orderDate": "2024-06-01"
        }),
    );

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    assert_eq!(
        paths(&messages),
        vec![
            "/filing/courtOrder/fileNumber",
            "/filing/courtOrder/effectOfOrder",
            "/filing/courtOrder/orderDate",
            "/filing/courtOrder/orderDetails",
        ]
    );
    assert_eq!(messages[1].error, "Invalid effectOfOrder.");
    assert_eq!(messages[2].error, "Court order date cannot be in the future.");
}

#[test]
fn test_court_order_accepts_uploaded_document_instead_of_details() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing(
        "courtOrder",
        "BC1234567",
        json!({ "fileNumber": "S-123456", "fileKey": "orders/S-123456.pdf" }),
    );

    assert_eq!(validate_filing(&ctx, &filing), Ok(()));
}

#[test]
fn test_registrars_order_needs_details() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing("registrarsOrder", "BC1234567", json!({}));

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].error, "Order details is required.");
}

#[test]
fn test_put_back_on_needs_historical_business() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing(
        "putBackOn",
        "BC1234567",
        json!({ "orderDetails": "Dissolved in error." }),
    );

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    assert_eq!(messages[0].error, "Only a historical business can be put back on.");
}

// ============================================================================
// Corrections
// ============================================================================

fn annual_report_on_file(id: i64) -> Filing {
    completed_filing(
        id,
        create_filing(
            "annualReport",
            "BC1234567",
            json!({ "annualReportDate": "2023-03-15" }),
        ),
    )
}

fn draft_on_file(id: i64, business_id: i64) -> Filing {
    let mut filing: Filing = Filing::new(datetime!(2024-02-01 12:00 UTC));
    filing
        .set_filing_json(create_filing(
            "annualReport",
            "BC1234567",
            json!({ "annualReportDate": "2024-01-15" }),
        ))
        .expect("filing json");
    filing.set_business_id(business_id).expect("business id");
    filing.prepare_for_save();
    filing.mark_saved(id);
    filing
}

fn correction(filing_id: i64) -> Value {
    create_filing(
        "correction",
        "BC1234567",
        json!({
            "comment": "Annual report date was entered incorrectly.",
            "correctedFilingId": filing_id,
            "correctedFilingType": "annualReport"
        }),
    )
}

#[test]
fn test_correction_of_completed_filing_passes() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let history: FilingList = FilingList::new(vec![annual_report_on_file(7)]);
    let ctx: ValidationContext<'_> = create_context(&profile).with_filings(&history);

    assert_eq!(validate_filing(&ctx, &correction(7)), Ok(()));
}

#[test]
fn test_correction_of_unknown_filing_is_rejected() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let history: FilingList = FilingList::new(vec![annual_report_on_file(7), draft_on_file(8, 2)]);
    let ctx: ValidationContext<'_> = create_context(&profile).with_filings(&history);

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &correction(99)));
    assert_eq!(messages[0].error, "Corrected filing 99 not found.");

    // Filing 8 belongs to another business.
    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &correction(8)));
    assert_eq!(messages[0].error, "Corrected filing 8 not found.");
}

#[test]
fn test_correction_of_draft_is_rejected() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let history: FilingList = FilingList::new(vec![draft_on_file(9, 1)]);
    let ctx: ValidationContext<'_> = create_context(&profile).with_filings(&history);

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &correction(9)));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].error, "Only completed filings can be corrected.");
}

#[test]
fn test_correction_type_must_match() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let history: FilingList = FilingList::new(vec![annual_report_on_file(7)]);
    let ctx: ValidationContext<'_> = create_context(&profile).with_filings(&history);
    let mut filing: Value = correction(7);
    filing["filing"]["correction"]["correctedFilingType"] = json!("changeOfAddress");

    assert_rejected_at(
        validate_filing(&ctx, &filing),
        ErrorStatus::BadRequest,
        "/filing/correction/correctedFilingType",
    );
}

// ============================================================================
// Restoration
// ============================================================================

fn restoration(restoration_type: &str, expiry: Option<&str>) -> Value {
    let mut body: Value = json!({
        "type": restoration_type,
        "approvalType": "registrar",
        "applicationDate": "2024-04-01",
        "noticeDate": "2024-04-02",
        "offices": { "registeredOffice": bc_office() },
        "parties": [person("Ann", "Applicant", &["Applicant"])]
    });
    if let Some(expiry) = expiry {
        body["expiry"] = json!(expiry);
    }
    create_filing("restoration", "BC1234567", body)
}

#[test]
fn test_full_restoration_of_historical_company_passes() {
    let profile: BusinessProfile = historical_company();
    let ctx: ValidationContext<'_> = create_context(&profile);

    assert_eq!(
        validate_filing(&ctx, &restoration("fullRestoration", None)),
        Ok(())
    );
}

#[test]
fn test_limited_restoration_expiry_range() {
    let profile: BusinessProfile = historical_company();
    let ctx: ValidationContext<'_> = create_context(&profile);

    assert_eq!(
        validate_filing(&ctx, &restoration("limitedRestoration", Some("2025-05-01"))),
        Ok(())
    );

    for expiry in ["2024-05-15", "2026-05-02"] {
        let messages: Vec<ErrorMessage> =
            errors(validate_filing(&ctx, &restoration("limitedRestoration", Some(expiry))));
        assert_eq!(messages.len(), 1, "{expiry}");
        assert_eq!(messages[0].path.as_deref(), Some("/filing/restoration/expiry"));
    }
}

#[test]
fn test_extension_needs_limited_restoration() {
    let profile: BusinessProfile = historical_company();
    let ctx: ValidationContext<'_> = create_context(&profile);

    let messages: Vec<ErrorMessage> = errors(validate_filing(
        &ctx,
        &restoration("limitedRestorationExtension", Some("2025-01-01")),
    ));
    assert_eq!(messages[0].error, "Business is not in limited restoration.");

    let mut limited: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    limited.business.restoration_expiry_date = Some(datetime!(2024-06-30 07:00 UTC));
    let ctx: ValidationContext<'_> = create_context(&limited);
    assert_eq!(
        validate_filing(
            &ctx,
            &restoration("limitedRestorationExtension", Some("2025-01-01"))
        ),
        Ok(())
    );
}

#[test]
fn test_full_restoration_of_active_company_is_rejected() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);

    let messages: Vec<ErrorMessage> =
        errors(validate_filing(&ctx, &restoration("fullRestoration", None)));
    assert_eq!(messages[0].error, "Only a historical business can be restored.");
}

// ============================================================================
// Dissolution
// ============================================================================

#[test]
fn test_voluntary_dissolution_of_company() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let mut filing: Value = create_filing(
        "dissolution",
        "BC1234567",
        json!({
            "dissolutionType": "voluntary",
            "dissolutionDate": "2024-04-30",
            "custodialOffice": bc_office(),
            "parties": [person("Cary", "Keeper", &["Custodian"])]
        }),
    );
    assert_eq!(validate_filing(&ctx, &filing), Ok(()));

    filing["filing"]["dissolution"]
        .as_object_mut()
        .expect("dissolution body")
        .remove("custodialOffice");
    assert_rejected_at(
        validate_filing(&ctx, &filing),
        ErrorStatus::BadRequest,
        "/filing/dissolution/custodialOffice",
    );
}

#[test]
fn test_dissolution_type_must_be_known() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing(
        "dissolution",
        "BC1234567",
        json!({ "dissolutionType": "sudden" }),
    );

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].error, "sudden is not a valid dissolution type.");
}

#[test]
fn test_business_marked_no_dissolution_cannot_dissolve() {
    let mut profile: BusinessProfile = create_profile("FM1234567", LegalType::SoleProprietorship);
    profile.business.no_dissolution = true;
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing(
        "dissolution",
        "FM1234567",
        json!({ "dissolutionType": "voluntary", "dissolutionDate": "2024-04-30" }),
    );

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].error, "This business cannot be dissolved.");
}

// ============================================================================
// Special resolution and continuation out
// ============================================================================

#[test]
fn test_special_resolution_signed_before_it_passed() {
    let profile: BusinessProfile = create_profile("CP1234567", LegalType::Cooperative);
    let ctx: ValidationContext<'_> = create_context(&profile);
    let filing: Value = create_filing(
        "specialResolution",
        "CP1234567",
        json!({
            "resolution": "Amend the rules of the association.",
            "resolutionDate": "2024-04-10",
            "signingDate": "2024-04-01",
            "signatory": { "givenName": "Jane", "familyName": "Doe" }
        }),
    );

    let messages: Vec<ErrorMessage> = errors(validate_filing(&ctx, &filing));
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0].error,
        "Signing date cannot be earlier than the resolution date."
    );
}

fn continuation_out(jurisdiction: &Value) -> Value {
    create_filing(
        "consentContinuationOut",
        "BC1234567",
        json!({ "foreignJurisdiction": jurisdiction, "orderDetails": "Consent granted." }),
    )
}

#[test]
fn test_consent_continuation_out_jurisdiction() {
    let profile: BusinessProfile = create_profile("BC1234567", LegalType::BenefitCompany);
    let ctx: ValidationContext<'_> = create_context(&profile);

    assert_eq!(
        validate_filing(&ctx, &continuation_out(&json!({ "country": "US", "region": "NY" }))),
        Ok(())
    );

    let messages: Vec<ErrorMessage> = errors(validate_filing(
        &ctx,
        &continuation_out(&json!({ "country": "CA", "region": "BC" })),
    ));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].error, "Jurisdiction cannot be BC.");

    let messages: Vec<ErrorMessage> =
        errors(validate_filing(&ctx, &continuation_out(&json!({ "country": "US" }))));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].error, "Jurisdiction region is required.");
}
