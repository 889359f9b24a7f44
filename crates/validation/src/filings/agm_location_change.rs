// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use serde_json::Value;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::{int_at, require_str};

const LOCATION_CHANGE: &str = "/filing/agmLocationChange";
const MAX_LOCATION_LENGTH: usize = 400;

pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    if business(ctx, &mut messages).is_none() {
        return messages;
    }

    let year_pointer: String = format!("{LOCATION_CHANGE}/year");
    let current: i64 = i64::from(ctx.today.year());
    match int_at(filing, &year_pointer) {
        None => messages.push(ErrorMessage::at("AGM year is required.", year_pointer)),
        Some(year) if year < current - 2 || year > current + 1 => {
            messages.push(ErrorMessage::at(
                format!("AGM year must be between {} and {}.", current - 2, current + 1),
                year_pointer,
            ));
        }
        Some(_) => {}
    }

    let location_pointer: String = format!("{LOCATION_CHANGE}/agmLocation");
    let too_long: bool = require_str(filing, &location_pointer, "AGM location", &mut messages)
        .is_some_and(|location| location.chars().count() > MAX_LOCATION_LENGTH);
    if too_long {
        messages.push(ErrorMessage::at(
            format!("AGM location cannot be longer than {MAX_LOCATION_LENGTH} characters."),
            location_pointer,
        ));
    }

    messages
}
