// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use serde_json::Value;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::court_order::validate_court_order;
use crate::helpers::str_at;

const COURT_ORDER: &str = "/filing/courtOrder";
const MAX_ORDER_DETAILS_LENGTH: usize = 2000;

/// Records a message when order details are longer than allowed.
pub fn check_order_details(filing: &Value, pointer: &str, messages: &mut Vec<ErrorMessage>) {
    if str_at(filing, pointer).is_some_and(|details| details.chars().count() > MAX_ORDER_DETAILS_LENGTH) {
        messages.push(ErrorMessage::at(
            format!("Order details cannot be longer than {MAX_ORDER_DETAILS_LENGTH} characters."),
            pointer,
        ));
    }
}

/// A court order recorded against a business. Either order details or an
/// uploaded order document must be supplied.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    if business(ctx, &mut messages).is_none() {
        return messages;
    }

    validate_court_order(filing, COURT_ORDER, ctx.today, &mut messages);

    let details: String = format!("{COURT_ORDER}/orderDetails");
    if str_at(filing, &details).is_none() && str_at(filing, &format!("{COURT_ORDER}/fileKey")).is_none() {
        messages.push(ErrorMessage::at(
            "Court order details or a court order document is required.",
            details.clone(),
        ));
    }
    check_order_details(filing, &details, &mut messages);

    messages
}
