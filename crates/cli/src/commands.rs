// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command handlers.
//!
//! Each handler returns a [`Report`] holding the JSON printed to stdout.
//! A rejected filing is a successful run of `validate` whose report is
//! marked as failed, so the binary can still print the messages.

use bizreg::{Filing, FilingStatus, VersioningKind, fee_code as lookup_fee_code, lookup};
use bizreg_domain::{Business, BusinessProfile, LegalType, StandingFacts, legislation_date};
use bizreg_persistence::Persistence;
use bizreg_validation::{FilingList, ValidationContext, ValidationError, validate_filing};
use serde_json::{Value, json};
use std::path::Path;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::CliError;

/// Output of a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub body: Value,
    pub success: bool,
}

impl Report {
    const fn ok(body: Value) -> Self {
        Self {
            body,
            success: true,
        }
    }

    const fn failed(body: Value) -> Self {
        Self {
            body,
            success: false,
        }
    }
}

/// Opens the configured database, or an in-memory one when none is set.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
pub fn open_persistence(config: &AppConfig) -> Result<Persistence, CliError> {
    let persistence: Persistence = if let Some(path) = &config.database {
        info!(path = %path.display(), "Opening database");
        Persistence::new_with_file(path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence.with_flags(config.flags.clone()))
}

/// Confirms the database is migrated and enforcing foreign keys.
///
/// # Errors
///
/// Returns an error if foreign key enforcement is off.
pub fn init(persistence: &mut Persistence, config: &AppConfig) -> Result<Report, CliError> {
    persistence.verify_foreign_key_enforcement()?;
    let versioning: VersioningKind = VersioningKind::from_flags(&config.flags);
    info!(versioning = versioning.as_str(), "Database ready");

    Ok(Report::ok(json!({
        "database": config
            .database
            .as_ref()
            .map_or_else(|| String::from(":memory:"), |p| p.display().to_string()),
        "versioning": versioning.as_str(),
    })))
}

/// Reads a filing document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON.
pub fn read_filing(path: &Path) -> Result<Value, CliError> {
    let raw: String = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Validates a filing against the stored business it names.
///
/// # Arguments
///
/// * `identifier` - Business to validate against. Defaults to the one in
///   `filing.business.identifier`.
/// * `now` - Current instant; its date in the legislation timezone is
///   "today" for the rules.
///
/// # Errors
///
/// Returns an error if storage fails or the timezone is unusable. A
/// rejected filing is reported, not returned as an error.
pub fn validate(
    persistence: &mut Persistence,
    config: &AppConfig,
    filing: &Value,
    identifier: Option<&str>,
    now: OffsetDateTime,
) -> Result<Report, CliError> {
    let today: Date = legislation_date(now, &config.timezone)?;
    let identifier: Option<&str> = identifier.or_else(|| {
        filing
            .pointer("/filing/business/identifier")
            .and_then(Value::as_str)
    });

    let stored: Option<Business> = match identifier {
        Some(identifier) => persistence.find_business(identifier)?,
        None => None,
    };
    let (profile, history): (Option<BusinessProfile>, FilingList) =
        match stored.and_then(|business| business.id) {
            Some(business_id) => (
                Some(persistence.business_profile(business_id)?),
                FilingList::new(persistence.filings_for_business(business_id, None)?),
            ),
            None => (None, FilingList::default()),
        };
    debug!(?identifier, found = profile.is_some(), %today, "Validating filing");

    let mut ctx: ValidationContext<'_> = ValidationContext::new(today).with_filings(&history);
    if let Some(profile) = profile.as_ref() {
        ctx = ctx.with_profile(profile);
    }

    match validate_filing(&ctx, filing) {
        Ok(()) => {
            info!("Filing is valid");
            Ok(Report::ok(json!({ "valid": true })))
        }
        Err(ValidationError { status, messages }) => {
            warn!(status = status.code(), count = messages.len(), "Filing rejected");
            Ok(Report::failed(json!({
                "valid": false,
                "status": status.code(),
                "errors": messages,
            })))
        }
    }
}

fn stored_business_id(persistence: &mut Persistence, identifier: &str) -> Result<i64, CliError> {
    persistence
        .find_business(identifier)?
        .and_then(|business| business.id)
        .ok_or_else(|| CliError::BusinessNotFound(identifier.to_string()))
}

/// Renders the current profile of a business with its standing.
///
/// Standing is judged on the same legislation date `validate` uses.
///
/// # Errors
///
/// Returns `CliError::BusinessNotFound` for an unknown identifier.
pub fn business(
    persistence: &mut Persistence,
    config: &AppConfig,
    identifier: &str,
    now: OffsetDateTime,
) -> Result<Report, CliError> {
    let today: Date = legislation_date(now, &config.timezone)?;
    let business_id: i64 = stored_business_id(persistence, identifier)?;
    let profile: BusinessProfile = persistence.business_profile(business_id)?;
    let facts: StandingFacts = persistence.standing_facts(&profile.business, today)?;
    Ok(Report::ok(profile.to_json(facts)))
}

/// Renders the business as it stood when a filing was applied.
///
/// # Errors
///
/// Returns an error if the business is unknown, the filing belongs to a
/// different business, or the filing was never applied.
pub fn history(
    persistence: &mut Persistence,
    config: &AppConfig,
    identifier: &str,
    filing_id: i64,
    now: OffsetDateTime,
) -> Result<Report, CliError> {
    let today: Date = legislation_date(now, &config.timezone)?;
    let business_id: i64 = stored_business_id(persistence, identifier)?;
    let filing: Filing = persistence.get_filing(filing_id)?;
    if filing.business_id() != Some(business_id) {
        return Err(CliError::FilingMismatch {
            filing_id,
            identifier: identifier.to_string(),
        });
    }

    let status: FilingStatus = persistence.effective_filing_status(filing_id)?;
    let profile: BusinessProfile = persistence.business_profile_for_filing(filing_id)?;
    let facts: StandingFacts = persistence.standing_facts(&profile.business, today)?;
    info!(identifier, filing_id, transaction_id = ?filing.transaction_id(), "Rebuilt profile");

    Ok(Report::ok(json!({
        "filing": {
            "id": filing_id,
            "name": filing.filing_type(),
            "status": status.as_str(),
            "transactionId": filing.transaction_id(),
        },
        "profile": profile.to_json(facts),
    })))
}

/// Looks up the fee code for a filing type and legal type.
///
/// # Errors
///
/// Returns an error if the legal type is unknown or no fee applies.
pub fn fee_code(
    filing_type: &str,
    sub_type: Option<&str>,
    legal_type: &str,
) -> Result<Report, CliError> {
    let parsed: LegalType = legal_type.parse()?;
    let code: &str = lookup_fee_code(filing_type, sub_type, parsed).ok_or_else(|| {
        CliError::NoFeeCode {
            filing_type: sub_type.map_or_else(
                || filing_type.to_string(),
                |sub| format!("{filing_type} ({sub})"),
            ),
            legal_type: parsed.as_str().to_string(),
        }
    })?;

    Ok(Report::ok(json!({
        "filingType": filing_type,
        "filingSubType": sub_type,
        "legalType": parsed.as_str(),
        "displayName": lookup(filing_type).map(|info| info.display_name),
        "feeCode": code,
    })))
}
