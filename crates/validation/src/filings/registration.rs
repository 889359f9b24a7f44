// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration of a sole proprietorship or general partnership, and the
//! firm checks shared with change of registration.

use bizreg::ErrorMessage;
use bizreg_domain::{LegalType, OfficeType, RoleType, add_years_months_days};
use serde_json::Value;
use time::Date;

use crate::context::ValidationContext;
use crate::helpers::address::{Locality, validate_office};
use crate::helpers::dates::require_date;
use crate::helpers::name_request::{requested_legal_type, validate_name_request};
use crate::helpers::parties::{require_role_count, validate_parties};
use crate::helpers::str_at;

const REGISTRATION: &str = "/filing/registration";

/// Furthest a start date may lie in the future.
const MAX_FUTURE_DAYS: i64 = 90;
/// Furthest a start date may lie in the past.
const MAX_PAST_YEARS: i32 = 10;

/// Checks the NAICS code and description under `{section}/business/naics`.
pub fn validate_naics(
    ctx: &ValidationContext<'_>,
    filing: &Value,
    section: &str,
    messages: &mut Vec<ErrorMessage>,
) {
    let code_pointer: String = format!("{section}/business/naics/naicsCode");
    let description_pointer: String = format!("{section}/business/naics/naicsDescription");
    let code: Option<&str> = str_at(filing, &code_pointer);
    let description: Option<&str> = str_at(filing, &description_pointer);

    match (code, description) {
        (None, _) => {}
        (Some(_), None) => messages.push(ErrorMessage::at(
            "NAICS description is required with a NAICS code.",
            description_pointer,
        )),
        (Some(code), Some(description)) => {
            if !ctx.naics.is_valid(code, description) {
                messages.push(ErrorMessage::at(
                    format!("Invalid NAICS code {code} or description."),
                    code_pointer,
                ));
            }
        }
    }
}

/// Checks the proprietor or partner counts for a firm.
pub fn validate_firm_parties(
    filing: &Value,
    parties: &str,
    legal_type: LegalType,
    messages: &mut Vec<ErrorMessage>,
) {
    match legal_type {
        LegalType::SoleProprietorship => {
            require_role_count(filing, parties, RoleType::Proprietor, 1, Some(1), messages);
        }
        LegalType::GeneralPartnership => {
            require_role_count(filing, parties, RoleType::Partner, 2, None, messages);
        }
        _ => {}
    }
}

fn validate_start_date(today: Date, filing: &Value, messages: &mut Vec<ErrorMessage>) {
    let pointer: String = format!("{REGISTRATION}/startDate");
    let Some(start) = require_date(filing, &pointer, "Start date", messages) else {
        return;
    };

    let latest: Option<Date> = add_years_months_days(today, 0, 0, MAX_FUTURE_DAYS).ok();
    let earliest: Option<Date> = add_years_months_days(today, -MAX_PAST_YEARS, 0, 0).ok();
    if latest.is_some_and(|latest| start > latest) {
        messages.push(ErrorMessage::at(
            format!("Start date must be less than or equal to {MAX_FUTURE_DAYS} days in the future."),
            pointer.clone(),
        ));
    }
    if earliest.is_some_and(|earliest| start < earliest) {
        messages.push(ErrorMessage::at(
            format!("Start date must be within the last {MAX_PAST_YEARS} years."),
            pointer,
        ));
    }
}

pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(legal_type) = requested_legal_type(filing, REGISTRATION, &mut messages) else {
        return messages;
    };
    if !legal_type.is_firm() {
        messages.push(ErrorMessage::at(
            format!("A {} cannot be registered.", legal_type.description()),
            format!("{REGISTRATION}/nameRequest/legalType"),
        ));
        return messages;
    }

    validate_name_request(
        ctx,
        filing,
        &format!("{REGISTRATION}/nameRequest"),
        legal_type,
        true,
        &mut messages,
    );
    validate_naics(ctx, filing, REGISTRATION, &mut messages);
    validate_start_date(ctx.today, filing, &mut messages);

    let tax_pointer: String = format!("{REGISTRATION}/business/taxId");
    if str_at(filing, &tax_pointer)
        .is_some_and(|tax_id| tax_id.len() != 9 || !tax_id.bytes().all(|b| b.is_ascii_digit()))
    {
        messages.push(ErrorMessage::at(
            "Business number must be 9 digits.",
            tax_pointer,
        ));
    }

    validate_office(
        filing,
        &format!("{REGISTRATION}/offices/{}", OfficeType::BusinessOffice.as_str()),
        Locality::BritishColumbia,
        &mut messages,
    );

    let parties: String = format!("{REGISTRATION}/parties");
    validate_parties(filing, &parties, &mut messages);
    require_role_count(filing, &parties, RoleType::CompletingParty, 1, Some(1), &mut messages);
    validate_firm_parties(filing, &parties, legal_type, &mut messages);

    messages
}
