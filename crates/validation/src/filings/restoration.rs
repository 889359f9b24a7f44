// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Restoration of a dissolved company.
//!
//! Full and limited restorations start from a historical company. An
//! extension of a limited restoration, or its conversion to a full one,
//! applies to a company currently in limited restoration. Limited
//! restorations carry an expiry date between one month and two years out.

use bizreg::ErrorMessage;
use bizreg_domain::{Business, EntityState, OfficeType, RoleType, add_years_months_days};
use serde_json::Value;
use time::Date;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::address::{Locality, validate_office};
use crate::helpers::court_order::validate_court_order;
use crate::helpers::dates::{not_in_future, require_date};
use crate::helpers::name_request::validate_name_request;
use crate::helpers::parties::{require_role_count, validate_parties};
use crate::helpers::require_str;

const RESTORATION: &str = "/filing/restoration";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RestorationType {
    Full,
    Limited,
    LimitedExtension,
    LimitedToFull,
}

impl RestorationType {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "fullRestoration" => Some(Self::Full),
            "limitedRestoration" => Some(Self::Limited),
            "limitedRestorationExtension" => Some(Self::LimitedExtension),
            "limitedRestorationToFull" => Some(Self::LimitedToFull),
            _ => None,
        }
    }

    const fn continues_limited(self) -> bool {
        matches!(self, Self::LimitedExtension | Self::LimitedToFull)
    }

    const fn has_expiry(self) -> bool {
        matches!(self, Self::Limited | Self::LimitedExtension)
    }
}

fn check_business_state(
    business: &Business,
    restoration: RestorationType,
    messages: &mut Vec<ErrorMessage>,
) {
    let in_limited_restoration: bool =
        business.state == EntityState::Active && business.restoration_expiry_date.is_some();

    if restoration.continues_limited() && !in_limited_restoration {
        messages.push(ErrorMessage::at(
            "Business is not in limited restoration.",
            "/filing/business/identifier",
        ));
    } else if !restoration.continues_limited() && business.state != EntityState::Historical {
        messages.push(ErrorMessage::at(
            "Only a historical business can be restored.",
            "/filing/business/identifier",
        ));
    }
}

fn validate_expiry(today: Date, filing: &Value, messages: &mut Vec<ErrorMessage>) {
    let pointer: String = format!("{RESTORATION}/expiry");
    let Some(expiry) = require_date(filing, &pointer, "Expiry date", messages) else {
        return;
    };
    let earliest: Option<Date> = add_years_months_days(today, 0, 1, 0).ok();
    let latest: Option<Date> = add_years_months_days(today, 2, 0, 0).ok();
    let in_range: bool = earliest.is_some_and(|e| expiry >= e) && latest.is_some_and(|l| expiry <= l);
    if !in_range {
        messages.push(ErrorMessage::at(
            "Expiry date must be between 1 month and 2 years from today.",
            pointer,
        ));
    }
}

fn validate_approval(today: Date, filing: &Value, messages: &mut Vec<ErrorMessage>) {
    let pointer: String = format!("{RESTORATION}/approvalType");
    match require_str(filing, &pointer, "Approval type", messages) {
        Some("courtOrder") => {
            validate_court_order(filing, &format!("{RESTORATION}/courtOrder"), today, messages);
        }
        Some("registrar") => {
            for field in ["applicationDate", "noticeDate"] {
                let date_pointer: String = format!("{RESTORATION}/{field}");
                if let Some(date) = require_date(filing, &date_pointer, field, messages) {
                    not_in_future(date, today, field, &date_pointer, messages);
                }
            }
        }
        Some(other) => messages.push(ErrorMessage::at(
            format!("{other} is not a valid approval type."),
            pointer,
        )),
        None => {}
    }
}

pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    let type_pointer: String = format!("{RESTORATION}/type");
    let Some(raw_type) = require_str(filing, &type_pointer, "Restoration type", &mut messages) else {
        return messages;
    };
    let Some(restoration) = RestorationType::parse(raw_type) else {
        messages.push(ErrorMessage::at(
            format!("{raw_type} is not a valid restoration type."),
            type_pointer,
        ));
        return messages;
    };

    check_business_state(business, restoration, &mut messages);
    if restoration.has_expiry() {
        validate_expiry(ctx.today, filing, &mut messages);
    }
    validate_approval(ctx.today, filing, &mut messages);

    if restoration.continues_limited() {
        return messages;
    }

    let name_request: String = format!("{RESTORATION}/nameRequest");
    if filing.pointer(&name_request).is_some() {
        validate_name_request(ctx, filing, &name_request, business.legal_type, false, &mut messages);
    }

    validate_office(
        filing,
        &format!("{RESTORATION}/offices/{}", OfficeType::RegisteredOffice.as_str()),
        Locality::BritishColumbia,
        &mut messages,
    );

    let parties: String = format!("{RESTORATION}/parties");
    validate_parties(filing, &parties, &mut messages);
    require_role_count(filing, &parties, RoleType::Applicant, 1, None, &mut messages);

    messages
}
