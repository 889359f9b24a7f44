// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::{OfficeType, RoleType};
use serde_json::Value;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::address::{Locality, validate_office};
use crate::helpers::dates::{not_before_founding, not_in_future, require_date};
use crate::helpers::parties::{require_role_count, validate_parties};
use crate::helpers::require_str;

const DISSOLUTION: &str = "/filing/dissolution";
const DISSOLUTION_TYPES: [&str; 3] = ["voluntary", "administrative", "involuntary"];

/// Dissolution of a business.
///
/// A voluntary dissolution of a company names a custodian of records and
/// a custodial office in Canada.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    if business.no_dissolution {
        messages.push(ErrorMessage::at(
            "This business cannot be dissolved.",
            "/filing/business/identifier",
        ));
    }

    let type_pointer: String = format!("{DISSOLUTION}/dissolutionType");
    let Some(dissolution_type) = require_str(filing, &type_pointer, "Dissolution type", &mut messages)
    else {
        return messages;
    };
    if !DISSOLUTION_TYPES.contains(&dissolution_type) {
        messages.push(ErrorMessage::at(
            format!("{dissolution_type} is not a valid dissolution type."),
            type_pointer,
        ));
        return messages;
    }

    if dissolution_type != "voluntary" {
        return messages;
    }

    let date_pointer: String = format!("{DISSOLUTION}/dissolutionDate");
    if let Some(date) = require_date(filing, &date_pointer, "Dissolution date", &mut messages) {
        not_in_future(date, ctx.today, "Dissolution date", &date_pointer, &mut messages);
        not_before_founding(date, business, "Dissolution date", &date_pointer, &mut messages);
    }

    if business.legal_type.is_corporation() {
        validate_office(
            filing,
            &format!(
                "{DISSOLUTION}/{}",
                OfficeType::CustodialOffice.as_str()
            ),
            Locality::Canada,
            &mut messages,
        );
        let parties: String = format!("{DISSOLUTION}/parties");
        validate_parties(filing, &parties, &mut messages);
        require_role_count(filing, &parties, RoleType::Custodian, 1, None, &mut messages);
    }

    messages
}
