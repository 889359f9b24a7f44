// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use serde_json::Value;
use time::Date;

use super::dates::{date_at, not_in_future};
use super::str_at;

const FILE_NUMBER_LENGTH: std::ops::RangeInclusive<usize> = 5..=20;
const EFFECT_OF_ORDER: &str = "planOfArrangement";

/// Checks a court order object at `pointer`.
///
/// The file number is 5 to 20 characters. The effect of order, when
/// given, may only be a plan of arrangement. The order date may not be in
/// the future.
pub fn validate_court_order(
    filing: &Value,
    pointer: &str,
    today: Date,
    messages: &mut Vec<ErrorMessage>,
) {
    let file_number_pointer: String = format!("{pointer}/fileNumber");
    match str_at(filing, &file_number_pointer) {
        None => messages.push(ErrorMessage::at(
            "Court order file number is required.",
            file_number_pointer,
        )),
        Some(number) if !FILE_NUMBER_LENGTH.contains(&number.chars().count()) => {
            messages.push(ErrorMessage::at(
                "Court order file number must be between 5 and 20 characters.",
                file_number_pointer,
            ));
        }
        Some(_) => {}
    }

    let effect_pointer: String = format!("{pointer}/effectOfOrder");
    if str_at(filing, &effect_pointer).is_some_and(|effect| effect != EFFECT_OF_ORDER) {
        messages.push(ErrorMessage::at("Invalid effectOfOrder.", effect_pointer));
    }

    let date_pointer: String = format!("{pointer}/orderDate");
    if let Some(order_date) = date_at(filing, &date_pointer, messages) {
        not_in_future(order_date, today, "Court order date", &date_pointer, messages);
    }
}
