// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::OfficeType;
use serde_json::Value;
use std::str::FromStr;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::address::{Locality, validate_office};

const OFFICES: &str = "/filing/changeOfAddress/offices";

pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    let Some(offices) = filing.pointer(OFFICES).and_then(Value::as_object) else {
        messages.push(ErrorMessage::at("offices is required.", OFFICES));
        return messages;
    };

    for key in offices.keys() {
        if OfficeType::from_str(key).is_err() {
            messages.push(ErrorMessage::at(
                format!("{key} is not a valid office."),
                format!("{OFFICES}/{key}"),
            ));
        }
    }

    validate_office(
        filing,
        &format!("{OFFICES}/{}", OfficeType::RegisteredOffice.as_str()),
        Locality::BritishColumbia,
        &mut messages,
    );

    let records: String = format!("{OFFICES}/{}", OfficeType::RecordsOffice.as_str());
    if business.legal_type.is_corporation() || filing.pointer(&records).is_some() {
        validate_office(filing, &records, Locality::BritishColumbia, &mut messages);
    }

    messages
}
