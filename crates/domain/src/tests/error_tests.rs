// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidIdentifier {
        identifier: String::from("ZZ1"),
    };
    assert_eq!(format!("{err}"), "Invalid business identifier: 'ZZ1'");

    let err: DomainError = DomainError::UnknownCode {
        kind: "legal type",
        value: String::from("XX"),
    };
    assert_eq!(format!("{err}"), "Unknown legal type: 'XX'");

    let err: DomainError = DomainError::ShareClassCurrencyRequired {
        name: String::from("Common"),
    };
    assert_eq!(format!("{err}"), "The currency for Common must be specified.");

    let err: DomainError = DomainError::InvalidTimezone(String::from("Nowhere"));
    assert_eq!(format!("{err}"), "Invalid timezone: Nowhere");
}
