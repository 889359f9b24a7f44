// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use serde_json::Value;

use super::business;
use super::court_order::check_order_details;
use crate::context::ValidationContext;
use crate::helpers::court_order::validate_court_order;
use crate::helpers::{require_str, str_at};

const CONSENT: &str = "/filing/consentContinuationOut";

/// Consent for a company to continue into another jurisdiction.
///
/// The jurisdiction must exist and cannot be BC itself. Canadian and US
/// jurisdictions name a province or state.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    if business(ctx, &mut messages).is_none() {
        return messages;
    }

    let jurisdiction: String = format!("{CONSENT}/foreignJurisdiction");
    let country_pointer: String = format!("{jurisdiction}/country");
    let region_pointer: String = format!("{jurisdiction}/region");
    if let Some(country) = require_str(filing, &country_pointer, "Jurisdiction country", &mut messages) {
        let country: String = country.to_uppercase();
        let region: Option<String> = str_at(filing, &region_pointer).map(str::to_uppercase);

        if matches!(country.as_str(), "CA" | "US") && region.is_none() {
            messages.push(ErrorMessage::at(
                "Jurisdiction region is required.",
                region_pointer.clone(),
            ));
        } else if !ctx.jurisdictions.is_known(&country, region.as_deref()) {
            messages.push(ErrorMessage::at("Invalid jurisdiction.", jurisdiction));
        }

        if country == "CA" && region.as_deref() == Some("BC") {
            messages.push(ErrorMessage::at(
                "Jurisdiction cannot be BC.",
                region_pointer,
            ));
        }
    }

    check_order_details(filing, &format!("{CONSENT}/orderDetails"), &mut messages);

    let court_order: String = format!("{CONSENT}/courtOrder");
    if filing.pointer(&court_order).is_some() {
        validate_court_order(filing, &court_order, ctx.today, &mut messages);
    }

    messages
}
