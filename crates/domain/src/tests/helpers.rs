// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Business, LegalType, ShareClass, ShareSeries};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_business(legal_type: LegalType, founding: OffsetDateTime) -> Business {
    let identifier: &str = match legal_type {
        LegalType::Cooperative => "CP1234567",
        LegalType::SoleProprietorship | LegalType::GeneralPartnership => "FM1234567",
        _ => "BC1234567",
    };
    Business::new(
        identifier,
        Some(String::from("TEST BUSINESS LTD.")),
        legal_type,
        founding,
    )
}

pub fn create_test_company() -> Business {
    create_test_business(LegalType::BenefitCompany, datetime!(2020-06-15 10:00 UTC))
}

pub fn create_share_class_with_max(name: &str, max: i64) -> ShareClass {
    let mut class: ShareClass = ShareClass::new(name, Some(1));
    class.max_share_flag = true;
    class.max_shares = Some(max);
    class.special_rights_flag = true;
    class
}

pub fn create_series_with_max(name: &str, max: i64) -> ShareSeries {
    let mut series: ShareSeries = ShareSeries::new(name, Some(1));
    series.max_share_flag = true;
    series.max_shares = Some(max);
    series
}
