// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Filing;
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2024-05-01 17:00 UTC);

pub fn create_filing_json(name: &str) -> Value {
    let mut document: Value = json!({
        "filing": {
            "header": { "name": name, "date": "2024-05-01" },
            "business": { "identifier": "BC1234567", "legalType": "BC" }
        }
    });
    document["filing"][name] = json!({});
    document
}

/// A filing with a document and an unsaved payment token.
pub fn create_invoiced_filing() -> Filing {
    let mut filing: Filing = Filing::new(NOW);
    filing
        .set_filing_json(create_filing_json("annualReport"))
        .unwrap();
    filing.set_payment_token("12345").unwrap();
    filing
}

/// A filing whose payment token has been saved.
pub fn create_locked_filing() -> Filing {
    let mut filing: Filing = create_invoiced_filing();
    filing.prepare_for_save();
    filing.mark_saved(1);
    filing
}
