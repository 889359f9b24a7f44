// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::LegalType;
use regex::Regex;
use serde_json::Value;
use std::str::FromStr;
use std::sync::LazyLock;

use super::{require_str, str_at};
use crate::context::{NameRequest, ValidationContext};

#[allow(clippy::expect_used)]
static NR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^NR ?\d{7}$").expect("NR number pattern is a valid literal"));

/// Whether `nr_number` looks like a name request number (`NR 1234567`).
#[must_use]
pub fn is_nr_number(nr_number: &str) -> bool {
    NR_NUMBER.is_match(nr_number)
}

/// The legal type a creating filing asks for, read from
/// `{section}/nameRequest/legalType`.
pub fn requested_legal_type(
    filing: &Value,
    section: &str,
    messages: &mut Vec<ErrorMessage>,
) -> Option<LegalType> {
    let pointer: String = format!("{section}/nameRequest/legalType");
    let code: &str = require_str(filing, &pointer, "Legal type", messages)?;
    match LegalType::from_str(code) {
        Ok(legal_type) => Some(legal_type),
        Err(err) => {
            messages.push(ErrorMessage::at(err.to_string(), pointer));
            None
        }
    }
}

/// Checks the name request object at `pointer`.
///
/// A missing `nrNumber` is accepted when `required` is false (numbered
/// companies). Returns the name request when it could be used.
pub fn validate_name_request(
    ctx: &ValidationContext<'_>,
    filing: &Value,
    pointer: &str,
    legal_type: LegalType,
    required: bool,
    messages: &mut Vec<ErrorMessage>,
) -> Option<NameRequest> {
    let number_pointer: String = format!("{pointer}/nrNumber");
    let Some(nr_number) = str_at(filing, &number_pointer) else {
        if required {
            messages.push(ErrorMessage::at("A name request is required.", number_pointer));
        }
        return None;
    };

    if !is_nr_number(nr_number) {
        messages.push(ErrorMessage::at(
            format!("{nr_number} is not a valid name request number."),
            number_pointer,
        ));
        return None;
    }

    let Some(name_request) = ctx.name_requests.find(nr_number) else {
        messages.push(ErrorMessage::at(
            format!("Name request {nr_number} not found."),
            number_pointer,
        ));
        return None;
    };

    let before: usize = messages.len();

    if !name_request.state.is_usable() {
        messages.push(ErrorMessage::at(
            "Name request is not approved.",
            number_pointer.clone(),
        ));
    }

    if name_request.legal_type != legal_type {
        messages.push(ErrorMessage::at(
            format!(
                "Name request is for a {}, not a {}.",
                name_request.legal_type.description(),
                legal_type.description()
            ),
            format!("{pointer}/legalType"),
        ));
    }

    if name_request
        .expiration_date
        .is_some_and(|expires| expires < ctx.today)
    {
        messages.push(ErrorMessage::at("Name request has expired.", number_pointer));
    }

    let legal_name_pointer: String = format!("{pointer}/legalName");
    if str_at(filing, &legal_name_pointer)
        .is_some_and(|legal_name| !legal_name.eq_ignore_ascii_case(&name_request.name))
    {
        messages.push(ErrorMessage::at(
            "Legal name does not match the name request.",
            legal_name_pointer,
        ));
    }

    (messages.len() == before).then_some(name_request)
}
