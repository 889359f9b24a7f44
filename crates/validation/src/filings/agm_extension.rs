// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Requests to hold an annual general meeting late.
//!
//! A company may extend the deadline for a given AGM year by 1 to 6 months
//! per request and by at most 12 months in total. The request must arrive
//! before the current deadline: 18 months after founding for the first
//! AGM, 15 months after the previous AGM otherwise, pushed back by every
//! extension already granted for that year.

use bizreg::{ErrorMessage, Filing, FilingStatus};
use bizreg_domain::{Business, add_years_months_days};
use serde_json::Value;
use time::Date;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::dates::{founding_date, require_date};
use crate::helpers::{flag_at, int_at};

const EXTENSION: &str = "/filing/agmExtension";
const MAX_TOTAL_MONTHS: i64 = 12;
const MAX_MONTHS_PER_REQUEST: i64 = 6;
const FIRST_AGM_MONTHS: i32 = 18;
const NEXT_AGM_MONTHS: i32 = 15;

/// Months already granted for `year` by completed extension filings.
fn granted_months(ctx: &ValidationContext<'_>, business: &Business, year: i64) -> i64 {
    let Some(business_id) = business.id else {
        return 0;
    };
    ctx.filings
        .filings_of_type(business_id, "agmExtension")
        .into_iter()
        .filter(|f: &&Filing| f.status() == FilingStatus::Completed)
        .filter_map(Filing::filing_json)
        .filter(|json| int_at(json, "/filing/agmExtension/year") == Some(year))
        .filter_map(|json| int_at(json, "/filing/agmExtension/extensionDuration"))
        .fold(0, i64::saturating_add)
}

pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    let year_pointer: String = format!("{EXTENSION}/year");
    let Some(year) = int_at(filing, &year_pointer) else {
        messages.push(ErrorMessage::at("AGM year is required.", year_pointer));
        return messages;
    };

    let duration_pointer: String = format!("{EXTENSION}/extensionDuration");
    // Only an in-range request counts towards the yearly total.
    let requested: Option<i64> = match int_at(filing, &duration_pointer) {
        None => {
            messages.push(ErrorMessage::at(
                "Extension duration is required.",
                duration_pointer.clone(),
            ));
            None
        }
        Some(months) if !(1..=MAX_MONTHS_PER_REQUEST).contains(&months) => {
            messages.push(ErrorMessage::at(
                format!("Extension duration must be between 1 and {MAX_MONTHS_PER_REQUEST} months."),
                duration_pointer.clone(),
            ));
            None
        }
        Some(months) => Some(months),
    };

    let granted: i64 = granted_months(ctx, business, year);
    if requested.is_some_and(|months| granted.saturating_add(months) > MAX_TOTAL_MONTHS) {
        messages.push(ErrorMessage::at(
            format!("Company has received the maximum {MAX_TOTAL_MONTHS} months of allowable extensions."),
            duration_pointer,
        ));
    }

    let base: Option<(Date, i32)> = if flag_at(filing, &format!("{EXTENSION}/isFirstAgm")) {
        Some((founding_date(business), FIRST_AGM_MONTHS))
    } else {
        require_date(
            filing,
            &format!("{EXTENSION}/prevAgmRefDate"),
            "Previous AGM date",
            &mut messages,
        )
        .map(|previous| (previous, NEXT_AGM_MONTHS))
    };

    if let Some((from, months)) = base {
        let granted_delta: i32 = i32::try_from(granted).unwrap_or(i32::MAX);
        let deadline: Option<Date> =
            add_years_months_days(from, 0, months.saturating_add(granted_delta), 0).ok();
        if deadline.is_some_and(|deadline| ctx.today > deadline) {
            messages.push(ErrorMessage::at(
                "Allotted period to request extension has expired.",
                EXTENSION,
            ));
        }
    }

    messages
}
