// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One rule set per filing type.

mod agm_extension;
mod agm_location_change;
mod alteration;
mod annual_report;
mod change_of_address;
mod change_of_directors;
mod change_of_registration;
mod consent_continuation_out;
mod correction;
mod court_order;
mod dissolution;
mod incorporation_application;
mod registrars;
mod registration;
mod restoration;
mod special_resolution;

use bizreg::ErrorMessage;
use bizreg_domain::Business;
use serde_json::Value;

use crate::context::ValidationContext;

/// A filing rule set. Returns every problem found.
pub type RuleSet = fn(&ValidationContext<'_>, &Value) -> Vec<ErrorMessage>;

/// The rule set for a filing type, when it has one.
#[must_use]
pub fn rules_for(filing_type: &str) -> Option<RuleSet> {
    let rules: RuleSet = match filing_type {
        "agmExtension" => agm_extension::validate,
        "agmLocationChange" => agm_location_change::validate,
        "alteration" => alteration::validate,
        "annualReport" => annual_report::validate,
        "changeOfAddress" => change_of_address::validate,
        "changeOfDirectors" => change_of_directors::validate,
        "changeOfRegistration" => change_of_registration::validate,
        "consentContinuationOut" => consent_continuation_out::validate,
        "correction" => correction::validate,
        "courtOrder" => court_order::validate,
        "dissolution" => dissolution::validate,
        "incorporationApplication" => incorporation_application::validate,
        "putBackOn" => registrars::validate_put_back_on,
        "registrarsNotation" => registrars::validate_notation,
        "registrarsOrder" => registrars::validate_order,
        "registration" => registration::validate,
        "restoration" => restoration::validate,
        "specialResolution" => special_resolution::validate,
        _ => return None,
    };
    Some(rules)
}

/// The business being filed against.
///
/// The dispatcher only runs rule sets for non-creating filings once a
/// business was found, so rule sets report its absence as a message.
fn business<'a>(
    ctx: &ValidationContext<'a>,
    messages: &mut Vec<ErrorMessage>,
) -> Option<&'a Business> {
    let business: Option<&Business> = ctx.profile.map(|p| &p.business);
    if business.is_none() {
        messages.push(ErrorMessage::at(
            "A business is required for this filing.",
            "/filing/business/identifier",
        ));
    }
    business
}
