// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::{Business, DEFAULT_LEGISLATION_TIMEZONE, legislation_date, parse_date};
use serde_json::Value;
use time::Date;

use super::str_at;

/// Reads an optional `YYYY-MM-DD` date, recording a message when malformed.
pub fn date_at(filing: &Value, pointer: &str, messages: &mut Vec<ErrorMessage>) -> Option<Date> {
    let raw: &str = str_at(filing, pointer)?;
    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(_) => {
            messages.push(ErrorMessage::at(
                format!("Invalid date format: {raw}. Expected YYYY-MM-DD."),
                pointer,
            ));
            None
        }
    }
}

/// Reads a required date.
pub fn require_date(
    filing: &Value,
    pointer: &str,
    label: &str,
    messages: &mut Vec<ErrorMessage>,
) -> Option<Date> {
    if str_at(filing, pointer).is_none() {
        messages.push(ErrorMessage::at(format!("{label} is required."), pointer));
        return None;
    }
    date_at(filing, pointer, messages)
}

/// Records a message when `date` is after `today`.
pub fn not_in_future(
    date: Date,
    today: Date,
    label: &str,
    pointer: &str,
    messages: &mut Vec<ErrorMessage>,
) {
    if date > today {
        messages.push(ErrorMessage::at(
            format!("{label} cannot be in the future."),
            pointer,
        ));
    }
}

/// The business's founding date in the legislation timezone.
#[must_use]
pub fn founding_date(business: &Business) -> Date {
    legislation_date(business.founding_date, DEFAULT_LEGISLATION_TIMEZONE)
        .unwrap_or_else(|_| business.founding_date.date())
}

/// Records a message when `date` is before the business was founded.
pub fn not_before_founding(
    date: Date,
    business: &Business,
    label: &str,
    pointer: &str,
    messages: &mut Vec<ErrorMessage>,
) {
    if date < founding_date(business) {
        messages.push(ErrorMessage::at(
            format!("{label} cannot be earlier than the founding date."),
            pointer,
        ));
    }
}
