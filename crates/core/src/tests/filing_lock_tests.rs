// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{NOW, create_filing_json, create_invoiced_filing, create_locked_filing};
use crate::{CoreError, ErrorStatus, Filing, FilingField, LOCKED_FILING_MESSAGE};
use serde_json::json;
use time::macros::datetime;

#[test]
fn test_new_filing_is_unlocked() {
    let filing: Filing = Filing::new(NOW);
    assert!(!filing.locked());
}

#[test]
fn test_unsaved_payment_token_does_not_lock() {
    let filing: Filing = create_invoiced_filing();
    assert!(filing.is_pending(FilingField::PaymentToken));
    assert!(!filing.locked());
}

#[test]
fn test_saved_payment_token_locks() {
    let filing: Filing = create_locked_filing();
    assert!(filing.locked());
}

#[test]
fn test_locked_filing_rejects_guarded_setters() {
    let mut filing: Filing = create_locked_filing();

    let err: CoreError = filing
        .set_filing_json(create_filing_json("changeOfAddress"))
        .unwrap_err();
    assert_eq!(err, CoreError::Forbidden(LOCKED_FILING_MESSAGE.to_string()));
    assert_eq!(err.status(), ErrorStatus::Forbidden);

    assert!(filing.set_filing_date(NOW).is_err());
    assert!(filing.set_submitter("someone").is_err());
    assert!(filing.set_business_id(42).is_err());
    assert!(filing.set_payment_token("99999").is_err());
    assert!(filing.ensure_deletable().is_err());
}

#[test]
fn test_payment_token_cannot_be_replaced() {
    let mut filing: Filing = create_invoiced_filing();
    assert!(matches!(
        filing.set_payment_token("67890"),
        Err(CoreError::Forbidden(_))
    ));
}

#[test]
fn test_colin_event_locks() {
    let mut filing: Filing = Filing::new(NOW);
    filing.add_colin_event_id(1001);
    assert!(filing.locked());
    assert!(filing.set_submitter("someone").is_err());
}

#[test]
fn test_deletion_locked_locks() {
    let mut filing: Filing = Filing::new(NOW);
    filing.set_deletion_locked(true);
    assert!(filing.locked());
    assert!(matches!(
        filing.ensure_deletable(),
        Err(CoreError::Forbidden(_))
    ));
}

#[test]
fn test_filing_json_derives_type() {
    let mut filing: Filing = Filing::new(NOW);
    filing
        .set_filing_json(create_filing_json("annualReport"))
        .unwrap();
    assert_eq!(filing.filing_type(), Some("annualReport"));
    assert_eq!(filing.filing_sub_type(), None);
}

#[test]
fn test_filing_json_derives_sub_type() {
    let mut filing: Filing = Filing::new(NOW);
    filing
        .set_filing_json(json!({
            "filing": {
                "header": { "name": "dissolution" },
                "dissolution": { "dissolutionType": "voluntary" }
            }
        }))
        .unwrap();
    assert_eq!(filing.filing_sub_type(), Some("voluntary"));

    filing
        .set_filing_json(json!({
            "filing": {
                "header": { "name": "restoration" },
                "restoration": { "type": "limitedRestoration" }
            }
        }))
        .unwrap();
    assert_eq!(filing.filing_type(), Some("restoration"));
    assert_eq!(filing.filing_sub_type(), Some("limitedRestoration"));
}

#[test]
fn test_filing_json_without_name_is_unprocessable() {
    let mut filing: Filing = Filing::new(NOW);
    let err: CoreError = filing
        .set_filing_json(json!({ "filing": { "header": {} } }))
        .unwrap_err();

    assert_eq!(err.status(), ErrorStatus::UnprocessableEntity);
    assert_eq!(err.messages()[0].error, "No filings found.");
    assert_eq!(err.messages()[0].path.as_deref(), Some("/filing/header/name"));
}

#[test]
fn test_payment_completion_requires_token_and_json() {
    let mut filing: Filing = Filing::new(NOW);
    assert!(matches!(
        filing.set_payment_completion_date(NOW),
        Err(CoreError::Forbidden(_))
    ));
}

#[test]
fn test_payment_completion_pushes_effective_date_forward() {
    let mut filing: Filing = create_invoiced_filing();
    let paid = datetime!(2024-05-02 09:00 UTC);

    filing.set_payment_completion_date(paid).unwrap();
    assert_eq!(filing.effective_date(), paid);
    assert!(!filing.is_future_effective());
}

#[test]
fn test_payment_completion_keeps_later_effective_date() {
    let mut filing: Filing = create_locked_filing();
    let future = datetime!(2024-06-01 09:00 UTC);
    filing.set_effective_date(future);

    filing
        .set_payment_completion_date(datetime!(2024-05-02 09:00 UTC))
        .unwrap();
    assert_eq!(filing.effective_date(), future);
    assert!(filing.is_future_effective());
}

#[test]
fn test_source_must_be_known() {
    let mut filing: Filing = Filing::new(NOW);
    assert!(filing.set_source("COLIN").is_ok());
    let err: CoreError = filing.set_source("PAPER").unwrap_err();
    assert_eq!(err.status(), ErrorStatus::BadRequest);
}
