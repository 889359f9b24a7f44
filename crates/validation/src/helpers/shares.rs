// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::{ShareClass, ShareSeries};
use serde_json::Value;
use std::collections::BTreeSet;

use super::{array_at, flag_at, int_at, str_at};

fn priority(value: &Value) -> Option<i32> {
    int_at(value, "/priority").and_then(|p| i32::try_from(p).ok())
}

fn series_from_json(value: &Value) -> ShareSeries {
    let mut series: ShareSeries =
        ShareSeries::new(str_at(value, "/name").unwrap_or_default(), priority(value));
    series.max_share_flag = flag_at(value, "/hasMaximumShares");
    series.max_shares = int_at(value, "/maxNumberOfShares");
    series.special_rights_flag = flag_at(value, "/hasRightsOrRestrictions");
    series
}

/// Builds a share class from its filing form (`hasMaximumShares`, ...).
#[must_use]
pub fn class_from_json(value: &Value) -> ShareClass {
    let mut class: ShareClass =
        ShareClass::new(str_at(value, "/name").unwrap_or_default(), priority(value));
    class.max_share_flag = flag_at(value, "/hasMaximumShares");
    class.max_shares = int_at(value, "/maxNumberOfShares");
    class.par_value_flag = flag_at(value, "/hasParValue");
    class.par_value = value.pointer("/parValue").and_then(Value::as_f64);
    class.currency = str_at(value, "/currency").map(str::to_string);
    class.special_rights_flag = flag_at(value, "/hasRightsOrRestrictions");
    class.series = array_at(value, "/series").iter().map(series_from_json).collect();
    class
}

/// Checks the share classes in the array at `pointer`.
///
/// Class names are unique ignoring case, as are series names within a
/// class. Each class must then satisfy the share structure rules of the
/// domain model.
pub fn validate_share_structure(filing: &Value, pointer: &str, messages: &mut Vec<ErrorMessage>) {
    let mut class_names: BTreeSet<String> = BTreeSet::new();

    for (index, value) in array_at(filing, pointer).iter().enumerate() {
        let class_pointer: String = format!("{pointer}/{index}");
        let class: ShareClass = class_from_json(value);

        if class.name.is_empty() {
            messages.push(ErrorMessage::at(
                "Share class name is required.",
                format!("{class_pointer}/name"),
            ));
            continue;
        }
        if !class_names.insert(class.name.to_lowercase()) {
            messages.push(ErrorMessage::at(
                format!("Share class {} name already used in a share class or series.", class.name),
                format!("{class_pointer}/name"),
            ));
        }

        let mut series_names: BTreeSet<String> = BTreeSet::new();
        for (series_index, series) in class.series.iter().enumerate() {
            if !series_names.insert(series.name.to_lowercase()) {
                messages.push(ErrorMessage::at(
                    format!(
                        "Share series {} name already used in a share class or series.",
                        series.name
                    ),
                    format!("{class_pointer}/series/{series_index}/name"),
                ));
            }
        }

        if let Err(err) = class.validate() {
            messages.push(ErrorMessage::at(err.to_string(), class_pointer));
        }
    }
}
