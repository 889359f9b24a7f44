// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_series_with_max, create_share_class_with_max};
use crate::{DomainError, ShareClass, ShareSeries};

#[test]
fn test_max_share_flag_requires_max_shares() {
    let mut class: ShareClass = ShareClass::new("Common", Some(1));
    class.max_share_flag = true;

    let err: DomainError = class.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "The maximum number of shares for Common must be specified."
    );
}

#[test]
fn test_zero_max_shares_counts_as_missing() {
    let class: ShareClass = create_share_class_with_max("Common", 0);
    assert!(matches!(
        class.validate(),
        Err(DomainError::ShareClassMaxSharesRequired { .. })
    ));
}

#[test]
fn test_par_value_flag_requires_value_and_currency() {
    let mut class: ShareClass = ShareClass::new("Preferred", Some(2));
    class.par_value_flag = true;
    assert!(matches!(
        class.validate(),
        Err(DomainError::ShareClassParValueRequired { .. })
    ));

    class.par_value = Some(1.5);
    assert!(matches!(
        class.validate(),
        Err(DomainError::ShareClassCurrencyRequired { .. })
    ));

    class.currency = Some(String::from("CAD"));
    assert!(class.validate().is_ok());
}

#[test]
fn test_series_max_cannot_exceed_class_max() {
    let mut class: ShareClass = create_share_class_with_max("Common", 1000);
    class.series.push(create_series_with_max("Series A", 1500));

    assert!(matches!(
        class.validate(),
        Err(DomainError::ShareSeriesExceedsClass { .. })
    ));

    class.series[0].max_shares = Some(1000);
    assert!(class.validate().is_ok());
}

#[test]
fn test_series_requires_max_when_flagged() {
    let mut class: ShareClass = create_share_class_with_max("Common", 1000);
    let mut series: ShareSeries = ShareSeries::new("Series A", Some(1));
    series.max_share_flag = true;
    class.series.push(series);

    assert!(matches!(
        class.validate(),
        Err(DomainError::ShareSeriesMaxSharesRequired { .. })
    ));
}

#[test]
fn test_series_requires_class_special_rights() {
    let mut class: ShareClass = create_share_class_with_max("Common", 1000);
    class.special_rights_flag = false;
    class.series.push(create_series_with_max("Series A", 10));

    assert!(matches!(
        class.validate(),
        Err(DomainError::ShareSeriesWithoutSpecialRights { .. })
    ));
}

#[test]
fn test_share_class_json_includes_series() {
    let mut class: ShareClass = create_share_class_with_max("Common", 1000);
    class.series.push(create_series_with_max("Series A", 10));

    let view = class.to_json();
    assert_eq!(view["name"], "Common");
    assert_eq!(view["maxNumberOfShares"], 1000);
    assert_eq!(view["series"][0]["name"], "Series A");
}
