// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{NOW, create_filing_json, create_invoiced_filing, create_locked_filing};
use crate::{CoreError, Filing, FilingStatus};
use serde_json::Value;
use time::macros::datetime;

#[test]
fn test_new_filing_saves_as_draft() {
    let mut filing: Filing = Filing::new(NOW);
    assert_eq!(filing.prepare_for_save(), FilingStatus::Draft);
}

#[test]
fn test_payment_token_derives_pending() {
    let mut filing: Filing = create_invoiced_filing();
    assert_eq!(filing.prepare_for_save(), FilingStatus::Pending);
}

#[test]
fn test_payment_completion_derives_paid() {
    let mut filing: Filing = create_locked_filing();
    filing.set_payment_completion_date(NOW).unwrap();
    assert_eq!(filing.prepare_for_save(), FilingStatus::Paid);
}

#[test]
fn test_colin_source_derives_paid() {
    let mut filing: Filing = Filing::new(NOW);
    filing.set_source("COLIN").unwrap();
    assert_eq!(filing.prepare_for_save(), FilingStatus::Paid);
}

#[test]
fn test_transaction_id_derives_completed() {
    let mut filing: Filing = create_locked_filing();
    filing.set_payment_completion_date(NOW).unwrap();
    filing.set_transaction_id(7);
    assert_eq!(filing.prepare_for_save(), FilingStatus::Completed);
}

#[test]
fn test_epoch_filing_type_wins_over_transaction() {
    let mut filing: Filing = Filing::new(NOW);
    filing
        .set_filing_json(create_filing_json("lear_epoch"))
        .unwrap();
    filing.set_transaction_id(1);
    assert_eq!(filing.prepare_for_save(), FilingStatus::Epoch);
}

#[test]
fn test_review_states_are_sticky() {
    let mut filing: Filing = Filing::new(NOW);
    filing
        .apply_review_decision(FilingStatus::AwaitingReview)
        .unwrap();
    filing.set_transaction_id(3);
    assert_eq!(filing.prepare_for_save(), FilingStatus::AwaitingReview);

    filing
        .apply_review_decision(FilingStatus::ChangeRequested)
        .unwrap();
    assert_eq!(filing.prepare_for_save(), FilingStatus::ChangeRequested);
}

#[test]
fn test_approval_holds_until_invoiced() {
    let mut filing: Filing = Filing::new(NOW);
    filing
        .set_filing_json(create_filing_json("continuationIn"))
        .unwrap();
    filing
        .apply_review_decision(FilingStatus::AwaitingReview)
        .unwrap();
    filing.apply_review_decision(FilingStatus::Approved).unwrap();
    assert_eq!(filing.prepare_for_save(), FilingStatus::Approved);

    filing.set_payment_token("555").unwrap();
    assert_eq!(filing.prepare_for_save(), FilingStatus::Pending);
}

#[test]
fn test_invalid_review_decision() {
    let mut filing: Filing = Filing::new(NOW);
    let err: CoreError = filing
        .apply_review_decision(FilingStatus::Approved)
        .unwrap_err();
    assert_eq!(
        err,
        CoreError::InvalidTransition {
            from: FilingStatus::Draft,
            to: FilingStatus::Approved,
        }
    );
}

#[test]
fn test_override_applies_once() {
    let mut filing: Filing = create_locked_filing();
    filing.override_status(FilingStatus::Error).unwrap();
    assert_eq!(filing.prepare_for_save(), FilingStatus::Error);
    assert_eq!(filing.prepare_for_save(), FilingStatus::Pending);

    assert!(filing.override_status(FilingStatus::Completed).is_err());
}

#[test]
fn test_corrected_derived_through_parent() {
    let mut original: Filing = create_locked_filing();
    original.set_payment_completion_date(NOW).unwrap();
    original.set_transaction_id(2);
    original.set_parent_filing_id(Some(99));
    original.prepare_for_save();

    let mut correction: Filing = Filing::new(NOW);
    correction.set_transaction_id(5);
    correction.prepare_for_save();

    assert_eq!(original.effective_status(None), FilingStatus::Completed);
    assert_eq!(
        original.effective_status(Some(&correction)),
        FilingStatus::Corrected
    );

    let mut pending_correction: Filing = Filing::new(NOW);
    pending_correction.prepare_for_save();
    assert_eq!(
        original.effective_status(Some(&pending_correction)),
        FilingStatus::Completed
    );
}

#[test]
fn test_json_header_overlay() {
    let mut filing: Filing = create_locked_filing();
    filing
        .set_payment_completion_date(datetime!(2024-05-01 16:00 UTC))
        .unwrap();
    filing.add_colin_event_id(77);
    filing.prepare_for_save();

    let view: Value = filing.to_json(None);
    let header: &Value = &view["filing"]["header"];
    assert_eq!(header["name"], "annualReport");
    assert_eq!(header["status"], "PAID");
    assert_eq!(header["filingId"], 1);
    assert_eq!(header["paymentToken"], "12345");
    assert_eq!(header["isFutureEffective"], true);
    assert_eq!(header["colinIds"][0], 77);
    assert_eq!(view["filing"]["business"]["identifier"], "BC1234567");
}

#[test]
fn test_status_string_round_trip() {
    for status in FilingStatus::ALL {
        let parsed: FilingStatus = status.as_str().parse().unwrap();
        assert_eq!(parsed, status);
    }
}
