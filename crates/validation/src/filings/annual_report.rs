// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::{Business, LegalType};
use serde_json::Value;
use time::Date;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::dates::{not_before_founding, not_in_future, require_date};
use crate::helpers::flag_at;

const AR_DATE: &str = "/filing/annualReport/annualReportDate";
const AGM_DATE: &str = "/filing/annualReport/annualGeneralMeetingDate";
const NO_AGM: &str = "/filing/annualReport/didNotHoldAgm";

/// Annual report: one per year, dated between founding and today.
///
/// Cooperatives also report their AGM date unless they declare that no
/// meeting was held.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    if let Some(ar_date) = require_date(filing, AR_DATE, "Annual report date", &mut messages) {
        not_in_future(ar_date, ctx.today, "Annual report date", AR_DATE, &mut messages);
        not_before_founding(ar_date, business, "Annual report date", AR_DATE, &mut messages);
        check_not_already_filed(business, ar_date, &mut messages);
    }

    if business.legal_type == LegalType::Cooperative {
        validate_agm(ctx.today, business, filing, &mut messages);
    }

    messages
}

fn check_not_already_filed(business: &Business, ar_date: Date, messages: &mut Vec<ErrorMessage>) {
    if business
        .last_ar_year
        .is_some_and(|year| ar_date.year() <= year)
    {
        messages.push(ErrorMessage::at(
            format!(
                "Annual report for {} has already been filed.",
                ar_date.year()
            ),
            AR_DATE,
        ));
    }
}

fn validate_agm(today: Date, business: &Business, filing: &Value, messages: &mut Vec<ErrorMessage>) {
    if flag_at(filing, NO_AGM) {
        return;
    }

    let Some(agm_date) = require_date(filing, AGM_DATE, "Annual General Meeting date", messages)
    else {
        return;
    };

    not_in_future(agm_date, today, "Annual General Meeting date", AGM_DATE, messages);
    if business.last_agm_date.is_some_and(|last| agm_date < last) {
        messages.push(ErrorMessage::at(
            "Annual General Meeting date cannot be earlier than the last one.",
            AGM_DATE,
        ));
    }
}
