// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::Filing;
use bizreg_domain::{Business, LegalType};
use bizreg_persistence::Persistence;
use serde_json::{Value, json};
use std::collections::HashMap;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::commands::open_persistence;
use crate::config::AppConfig;

pub const NOW: OffsetDateTime = datetime!(2024-05-01 17:00 UTC);

/// Configuration read from the given variables only.
pub fn config_from(vars: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid config")
}

pub fn create_persistence(config: &AppConfig) -> Persistence {
    open_persistence(config).expect("in-memory database")
}

pub fn annual_report(identifier: &str, date: &str) -> Value {
    json!({
        "filing": {
            "header": { "name": "annualReport", "date": "2024-05-01" },
            "business": { "identifier": identifier },
            "annualReport": { "annualReportDate": date }
        }
    })
}

/// Saves a benefit company with one completed annual report.
///
/// Returns the business ID and the filing ID.
pub fn seed_business(persistence: &mut Persistence, identifier: &str) -> (i64, i64) {
    persistence
        .transaction(Some("127.0.0.1"), |session| {
            let mut business: Business = Business::new(
                identifier,
                Some(String::from("Harbour Freight Ltd.")),
                LegalType::BenefitCompany,
                datetime!(2019-03-15 18:00 UTC),
            );
            let business_id: i64 = session.save_business(&mut business)?;

            let mut filing: Filing = Filing::new(NOW);
            filing
                .set_filing_json(annual_report(identifier, "2024-03-15"))
                .expect("filing json");
            filing.set_business_id(business_id).expect("business id");
            filing.set_transaction_id(session.current_transaction_id()?);
            let filing_id: i64 = session.save_filing(&mut filing)?;
            Ok((business_id, filing_id))
        })
        .expect("seed business")
}
