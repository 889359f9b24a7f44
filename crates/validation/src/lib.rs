// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filing document validation.
//!
//! [`validate_filing`] checks a filing in four stages and stops at the
//! first stage that fails:
//!
//! 1. the document envelope (header name, business identifier);
//! 2. the filing type exists and is available to the legal type;
//! 3. the business's state admits the filing;
//! 4. the rule set for the filing type, which reports every problem.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod context;
mod envelope;
mod error;
mod filings;
mod helpers;

#[cfg(test)]
mod tests;

pub use context::{
    FilingList, FilingLookup, JurisdictionService, NaicsService, NameRequest, NameRequestService,
    NameRequestState, OfflineServices, ValidationContext,
};
pub use error::ValidationError;
pub use helpers::name_request::is_nr_number;

use bizreg::{ErrorMessage, ErrorStatus, FilingTypeInfo, is_allowed, lookup};
use bizreg_domain::{Business, EntityState, LegalType};
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

/// Filings a historical business may still receive.
const HISTORICAL_FILINGS: [&str; 2] = ["restoration", "putBackOn"];

/// Filings an administratively frozen business may still receive.
const FROZEN_FILINGS: [&str; 3] = ["courtOrder", "registrarsNotation", "registrarsOrder"];

/// Validates a filing document.
///
/// # Arguments
///
/// * `ctx` - Today's date, the business filed against and the external services
/// * `filing` - The full filing document (`{"filing": {"header": ...}}`)
///
/// # Errors
///
/// Returns a `ValidationError` when:
/// - The envelope is malformed (422)
/// - The filing type is unknown or unavailable to the legal type (400)
/// - The business named by the filing is not the one supplied (404 or 400)
/// - The business's state does not admit the filing (400, or 403 when frozen)
/// - The rule set for the filing type finds problems (400)
pub fn validate_filing(ctx: &ValidationContext<'_>, filing: &Value) -> Result<(), ValidationError> {
    let name: &str = envelope::filing_name(filing)?;
    let info: &FilingTypeInfo = lookup(name).ok_or_else(|| {
        ValidationError::bad_request(
            format!("{name} is not a recognized filing type."),
            "/filing/header/name",
        )
    })?;

    let legal_type: LegalType = if info.creates_business {
        requested_legal_type(filing, name)?
    } else {
        let business: &Business = filed_business(ctx, filing)?;
        check_state(business, name)?;
        business.legal_type
    };

    if !is_allowed(name, legal_type) {
        return Err(ValidationError::bad_request(
            format!(
                "{} is not available for a {}.",
                info.display_name,
                legal_type.description()
            ),
            "/filing/header/name",
        ));
    }

    let Some(rules) = filings::rules_for(name) else {
        debug!(filing_type = name, "No rule set for filing type");
        return Ok(());
    };

    debug!(filing_type = name, legal_type = legal_type.as_str(), "Running filing rules");
    let messages: Vec<ErrorMessage> = rules(ctx, filing);
    if messages.is_empty() {
        Ok(())
    } else {
        debug!(
            filing_type = name,
            errors = messages.len(),
            "Filing failed validation"
        );
        Err(ValidationError::new(ErrorStatus::BadRequest, messages))
    }
}

/// The legal type a creating filing asks for.
fn requested_legal_type(filing: &Value, name: &str) -> Result<LegalType, ValidationError> {
    let pointer: String = format!("/filing/{name}/nameRequest/legalType");
    let code: &str = helpers::str_at(filing, &pointer)
        .or_else(|| helpers::str_at(filing, "/filing/business/legalType"))
        .ok_or_else(|| ValidationError::bad_request("Legal type is required.", pointer.clone()))?;
    LegalType::from_str(code).map_err(|err| ValidationError::bad_request(err.to_string(), pointer))
}

/// The business the filing names, which must be the one in the context.
fn filed_business<'a>(
    ctx: &ValidationContext<'a>,
    filing: &Value,
) -> Result<&'a Business, ValidationError> {
    let identifier: &str = envelope::business_identifier(filing)?;
    let business: &Business = ctx
        .profile
        .map(|p| &p.business)
        .ok_or_else(|| ValidationError::not_found(format!("Business {identifier} not found.")))?;

    if business.identifier != identifier {
        return Err(ValidationError::bad_request(
            format!(
                "Filing is for {identifier}, not {}.",
                business.identifier
            ),
            "/filing/business/identifier",
        ));
    }
    Ok(business)
}

fn check_state(business: &Business, name: &str) -> Result<(), ValidationError> {
    if business.state == EntityState::Historical && !HISTORICAL_FILINGS.contains(&name) {
        return Err(ValidationError::bad_request(
            format!("Business {} is not active.", business.identifier),
            "/filing/business/identifier",
        ));
    }

    if business.admin_freeze && !FROZEN_FILINGS.contains(&name) {
        return Err(ValidationError::new(
            ErrorStatus::Forbidden,
            vec![ErrorMessage::at(
                format!("Business {} is frozen.", business.identifier),
                "/filing/business/identifier",
            )],
        ));
    }

    Ok(())
}
