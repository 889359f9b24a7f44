// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{ErrorMessage, is_allowed};
use bizreg_domain::LegalType;
use serde_json::Value;
use std::str::FromStr;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::court_order::validate_court_order;
use crate::helpers::dates::{not_before_founding, not_in_future};
use crate::helpers::name_request::validate_name_request;
use crate::helpers::shares::validate_share_structure;
use crate::helpers::{array_at, str_at};

const ALTERATION: &str = "/filing/alteration";

/// Alteration of a company's legal type, name or share structure.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    let type_pointer: String = format!("{ALTERATION}/business/legalType");
    let new_type: LegalType = match str_at(filing, &type_pointer) {
        None => business.legal_type,
        Some(code) => match LegalType::from_str(code) {
            Ok(legal_type) => legal_type,
            Err(err) => {
                messages.push(ErrorMessage::at(err.to_string(), type_pointer));
                return messages;
            }
        },
    };
    if new_type != business.legal_type
        && !(new_type.is_corporation() && is_allowed("alteration", new_type))
    {
        messages.push(ErrorMessage::at(
            format!(
                "A {} cannot be altered to a {}.",
                business.legal_type.description(),
                new_type.description()
            ),
            type_pointer,
        ));
    }

    let name_pointer: String = format!("{ALTERATION}/nameRequest");
    if filing.pointer(&name_pointer).is_some() {
        validate_name_request(ctx, filing, &name_pointer, new_type, false, &mut messages);
    }

    let structure: String = format!("{ALTERATION}/shareStructure");
    if filing.pointer(&structure).is_some() {
        validate_share_structure(filing, &format!("{structure}/shareClasses"), &mut messages);

        for (index, value) in array_at(filing, &format!("{structure}/resolutionDates"))
            .iter()
            .enumerate()
        {
            let pointer: String = format!("{structure}/resolutionDates/{index}");
            match value.as_str().map(bizreg_domain::parse_date) {
                Some(Ok(date)) => {
                    not_in_future(date, ctx.today, "Resolution date", &pointer, &mut messages);
                    not_before_founding(date, business, "Resolution date", &pointer, &mut messages);
                }
                _ => messages.push(ErrorMessage::at("Invalid resolution date.", pointer)),
            }
        }
    }

    let court_order: String = format!("{ALTERATION}/courtOrder");
    if filing.pointer(&court_order).is_some() {
        validate_court_order(filing, &court_order, ctx.today, &mut messages);
    }

    messages
}
