// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::OfficeType;
use serde_json::Value;

use super::business;
use super::registration::{validate_firm_parties, validate_naics};
use crate::context::ValidationContext;
use crate::helpers::address::{Locality, validate_office};
use crate::helpers::name_request::validate_name_request;
use crate::helpers::parties::validate_parties;

const CHANGE: &str = "/filing/changeOfRegistration";

/// Change of registration for a firm. Every section is optional; the ones
/// present are checked as in a registration.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };
    if !business.legal_type.is_firm() {
        messages.push(ErrorMessage::at(
            "Change of registration is only available to firms.",
            "/filing/business/legalType",
        ));
        return messages;
    }

    let name_request: String = format!("{CHANGE}/nameRequest");
    if filing.pointer(&name_request).is_some() {
        validate_name_request(ctx, filing, &name_request, business.legal_type, true, &mut messages);
    }

    validate_naics(ctx, filing, CHANGE, &mut messages);

    let office: String = format!("{CHANGE}/offices/{}", OfficeType::BusinessOffice.as_str());
    if filing.pointer(&office).is_some() {
        validate_office(filing, &office, Locality::BritishColumbia, &mut messages);
    }

    let parties: String = format!("{CHANGE}/parties");
    if filing.pointer(&parties).is_some() {
        validate_parties(filing, &parties, &mut messages);
        validate_firm_parties(filing, &parties, business.legal_type, &mut messages);
    }

    messages
}
