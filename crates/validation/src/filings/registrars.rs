// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff filings that record a decision of the registrar.

use bizreg::ErrorMessage;
use bizreg_domain::EntityState;
use serde_json::Value;

use super::business;
use super::court_order::check_order_details;
use crate::context::ValidationContext;
use crate::helpers::court_order::validate_court_order;
use crate::helpers::{require_str, str_at};

/// Order details are required. A court file number, when given, is
/// checked like a court order.
fn validate_registrar_filing(
    ctx: &ValidationContext<'_>,
    filing: &Value,
    section: &str,
) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    if business(ctx, &mut messages).is_none() {
        return messages;
    }

    let details: String = format!("{section}/orderDetails");
    require_str(filing, &details, "Order details", &mut messages);
    check_order_details(filing, &details, &mut messages);

    if str_at(filing, &format!("{section}/fileNumber")).is_some() {
        validate_court_order(filing, section, ctx.today, &mut messages);
    }

    messages
}

pub fn validate_notation(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    validate_registrar_filing(ctx, filing, "/filing/registrarsNotation")
}

pub fn validate_order(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    validate_registrar_filing(ctx, filing, "/filing/registrarsOrder")
}

/// Put back on: reverses a dissolution made in error, so only a historical
/// business qualifies.
pub fn validate_put_back_on(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = validate_registrar_filing(ctx, filing, "/filing/putBackOn");
    if ctx
        .profile
        .is_some_and(|p| p.business.state != EntityState::Historical)
    {
        messages.push(ErrorMessage::at(
            "Only a historical business can be put back on.",
            "/filing/business/identifier",
        ));
    }
    messages
}
