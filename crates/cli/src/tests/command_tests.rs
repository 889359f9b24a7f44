// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg_domain::Business;
use bizreg_persistence::Persistence;
use serde_json::{Value, json};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::macros::{date, datetime};

use super::helpers::{NOW, annual_report, config_from, create_persistence, seed_business};
use crate::commands::{self, Report};
use crate::config::AppConfig;
use crate::error::CliError;

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_reports_in_memory_database_and_engine() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);

    let report: Report = commands::init(&mut persistence, &config).unwrap();

    assert!(report.success);
    assert_eq!(report.body["database"], ":memory:");
    assert_eq!(report.body["versioning"], "old");
}

#[test]
fn test_init_follows_versioning_flag() {
    let config: AppConfig = config_from(&[("BIZREG_FLAGS", "enable-new-versioning")]);
    let mut persistence: Persistence = create_persistence(&config);

    let report: Report = commands::init(&mut persistence, &config).unwrap();

    assert_eq!(report.body["versioning"], "new");
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_accepts_valid_filing() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);
    seed_business(&mut persistence, "BC1234567");

    let report: Report = commands::validate(
        &mut persistence,
        &config,
        &annual_report("BC1234567", "2024-04-10"),
        None,
        NOW,
    )
    .unwrap();

    assert!(report.success);
    assert_eq!(report.body, json!({ "valid": true }));
}

#[test]
fn test_validate_reports_messages_for_rejected_filing() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);
    seed_business(&mut persistence, "BC1234567");

    let report: Report = commands::validate(
        &mut persistence,
        &config,
        &annual_report("BC1234567", "2024-06-10"),
        None,
        NOW,
    )
    .unwrap();

    assert!(!report.success);
    assert_eq!(report.body["valid"], false);
    assert_eq!(report.body["status"], 400);
    assert_eq!(
        report.body["errors"][0]["path"],
        "/filing/annualReport/annualReportDate"
    );
}

#[test]
fn test_validate_unknown_business_is_not_found() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);

    let report: Report = commands::validate(
        &mut persistence,
        &config,
        &annual_report("BC7654321", "2024-04-10"),
        None,
        NOW,
    )
    .unwrap();

    assert!(!report.success);
    assert_eq!(report.body["status"], 404);
}

#[test]
fn test_validate_identifier_argument_overrides_document() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);
    seed_business(&mut persistence, "BC1234567");

    let report: Report = commands::validate(
        &mut persistence,
        &config,
        &annual_report("BC7654321", "2024-04-10"),
        Some("BC1234567"),
        NOW,
    )
    .unwrap();

    assert_eq!(report.body["status"], 400);
    assert_eq!(report.body["errors"][0]["path"], "/filing/business/identifier");
}

#[test]
fn test_read_filing_reports_missing_and_malformed_files() {
    let missing: PathBuf = std::env::temp_dir().join("bizreg-cli-missing-filing.json");
    assert!(matches!(
        commands::read_filing(&missing),
        Err(CliError::Read { .. })
    ));

    let malformed: PathBuf =
        std::env::temp_dir().join(format!("bizreg-cli-{}-malformed.json", std::process::id()));
    std::fs::write(&malformed, "{ not json").unwrap();
    let result: Result<Value, CliError> = commands::read_filing(&malformed);
    std::fs::remove_file(&malformed).unwrap();
    assert!(matches!(result, Err(CliError::InvalidJson { .. })));
}

// ============================================================================
// business and history
// ============================================================================

#[test]
fn test_business_renders_profile_with_standing() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);
    seed_business(&mut persistence, "BC1234567");

    let report: Report =
        commands::business(&mut persistence, &config, "BC1234567", NOW).unwrap();

    let business: &Value = &report.body["business"];
    assert_eq!(business["identifier"], "BC1234567");
    assert_eq!(business["legalType"], "BEN");
    assert!(business["goodStanding"].is_boolean());
    assert_eq!(business["inDissolution"], false);
}

/// Last annual report 2024-05-10, so standing lapses on 2025-07-11.
fn seed_reporting_business(persistence: &mut Persistence) {
    let (business_id, _) = seed_business(persistence, "BC1234567");
    persistence
        .transaction(None, |session| {
            let mut business: Business = session.business(business_id)?;
            business.last_ar_date = Some(date!(2024 - 05 - 10));
            session.save_business(&mut business)
        })
        .unwrap();
}

#[test]
fn test_business_standing_uses_legislation_date() {
    // 2025-07-10 20:00 in Vancouver
    let late_evening: OffsetDateTime = datetime!(2025-07-11 03:00 UTC);

    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);
    seed_reporting_business(&mut persistence);
    let report: Report =
        commands::business(&mut persistence, &config, "BC1234567", late_evening).unwrap();
    assert_eq!(report.body["business"]["goodStanding"], true);

    let utc: AppConfig = config_from(&[("BIZREG_TIMEZONE", "UTC")]);
    let mut persistence: Persistence = create_persistence(&utc);
    seed_reporting_business(&mut persistence);
    let report: Report =
        commands::business(&mut persistence, &utc, "BC1234567", late_evening).unwrap();
    assert_eq!(report.body["business"]["goodStanding"], false);
}

#[test]
fn test_business_unknown_identifier() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);

    let err: CliError =
        commands::business(&mut persistence, &config, "BC7654321", NOW).unwrap_err();

    assert_eq!(err.to_string(), "Business BC7654321 not found.");
}

#[test]
fn test_history_renders_profile_as_of_filing() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);
    let (_, filing_id) = seed_business(&mut persistence, "BC1234567");

    let report: Report =
        commands::history(&mut persistence, &config, "BC1234567", filing_id, NOW).unwrap();

    assert_eq!(report.body["filing"]["name"], "annualReport");
    assert_eq!(report.body["filing"]["status"], "COMPLETED");
    assert_eq!(
        report.body["profile"]["business"]["legalName"],
        "Harbour Freight Ltd."
    );
}

#[test]
fn test_history_rejects_filing_of_another_business() {
    let config: AppConfig = config_from(&[]);
    let mut persistence: Persistence = create_persistence(&config);
    let (_, filing_id) = seed_business(&mut persistence, "BC1234567");
    seed_business(&mut persistence, "BC7654321");

    let err: CliError =
        commands::history(&mut persistence, &config, "BC7654321", filing_id, NOW).unwrap_err();

    assert!(matches!(err, CliError::FilingMismatch { .. }));
}

// ============================================================================
// fee-code
// ============================================================================

#[test]
fn test_fee_code_by_legal_type() {
    let company: Report = commands::fee_code("annualReport", None, "BEN").unwrap();
    assert_eq!(company.body["feeCode"], "BCANN");
    assert_eq!(company.body["displayName"], "Annual Report");

    let coop: Report = commands::fee_code("annualReport", None, "CP").unwrap();
    assert_eq!(coop.body["feeCode"], "OTANN");
}

#[test]
fn test_fee_code_by_sub_type() {
    let report: Report = commands::fee_code("dissolution", Some("voluntary"), "SP").unwrap();

    assert_eq!(report.body["feeCode"], "DIS_VOL");
    assert_eq!(report.body["filingSubType"], "voluntary");
}

#[test]
fn test_fee_code_errors() {
    assert!(matches!(
        commands::fee_code("annualReport", None, "XX"),
        Err(CliError::Domain(_))
    ));

    let err: CliError = commands::fee_code("specialResolution", None, "BEN").unwrap_err();
    assert_eq!(
        err.to_string(),
        "No fee code for specialResolution filed by a BEN business."
    );
}
