// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{ErrorMessage, ErrorStatus, Filing};
use bizreg_domain::{Business, BusinessProfile, LegalType};
use serde_json::{Value, json};
use std::collections::HashMap;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{NameRequest, NameRequestService, NameRequestState, ValidationContext, ValidationError};

pub const TODAY: Date = date!(2024 - 05 - 01);
pub const FOUNDED: OffsetDateTime = datetime!(2019-03-15 18:00 UTC);

/// Name requests keyed by number.
#[derive(Default)]
pub struct FakeNameRequests {
    requests: HashMap<String, NameRequest>,
}

impl FakeNameRequests {
    pub fn with(mut self, nr_number: &str, legal_type: LegalType, state: NameRequestState) -> Self {
        self.requests.insert(
            nr_number.to_string(),
            NameRequest {
                nr_number: nr_number.to_string(),
                state,
                legal_type,
                name: String::from("Rainforest Foods Ltd."),
                expiration_date: Some(date!(2024 - 06 - 30)),
            },
        );
        self
    }
}

impl NameRequestService for FakeNameRequests {
    fn find(&self, nr_number: &str) -> Option<NameRequest> {
        self.requests.get(nr_number).cloned()
    }
}

pub fn create_business(identifier: &str, legal_type: LegalType) -> Business {
    let mut business: Business = Business::new(
        identifier,
        Some(String::from("Rainforest Foods Ltd.")),
        legal_type,
        FOUNDED,
    );
    business.id = Some(1);
    business
}

pub fn create_profile(identifier: &str, legal_type: LegalType) -> BusinessProfile {
    BusinessProfile::new(create_business(identifier, legal_type))
}

pub fn create_context(profile: &BusinessProfile) -> ValidationContext<'_> {
    ValidationContext::new(TODAY).with_profile(profile)
}

/// A filing document for `identifier` with `body` under the filing type key.
pub fn create_filing(name: &str, identifier: &str, body: Value) -> Value {
    let mut filing: Value = json!({
        "filing": {
            "header": { "name": name, "date": "2024-05-01", "certifiedBy": "Jane Doe" },
            "business": { "identifier": identifier },
        }
    });
    filing["filing"][name] = body;
    filing
}

pub fn bc_address(street: &str) -> Value {
    json!({
        "streetAddress": street,
        "addressCity": "Victoria",
        "addressRegion": "BC",
        "addressCountry": "CA",
        "postalCode": "V8W 1A1",
    })
}

pub fn bc_office() -> Value {
    json!({
        "mailingAddress": bc_address("PO Box 100"),
        "deliveryAddress": bc_address("1 Government St"),
    })
}

pub fn person(first: &str, last: &str, roles: &[&str]) -> Value {
    json!({
        "officer": { "partyType": "person", "firstName": first, "lastName": last },
        "roles": roles
            .iter()
            .map(|role| json!({ "roleType": role, "appointmentDate": "2024-04-01" }))
            .collect::<Vec<Value>>(),
        "mailingAddress": bc_address("2 Main St"),
    })
}

/// A completed filing stored for business 1.
pub fn completed_filing(id: i64, json_data: Value) -> Filing {
    let mut filing: Filing = Filing::new(datetime!(2023-01-10 12:00 UTC));
    filing.set_filing_json(json_data).expect("filing json");
    filing.set_business_id(1).expect("business id");
    filing.set_transaction_id(id * 10);
    filing.prepare_for_save();
    filing.mark_saved(id);
    filing
}

pub fn errors(result: Result<(), ValidationError>) -> Vec<ErrorMessage> {
    result.expect_err("filing should be rejected").messages
}

pub fn assert_rejected_at(result: Result<(), ValidationError>, status: ErrorStatus, path: &str) {
    let err: ValidationError = result.expect_err("filing should be rejected");
    assert_eq!(err.status, status);
    assert!(
        err.messages.iter().any(|m| m.path.as_deref() == Some(path)),
        "no message at {path}: {:?}",
        err.messages
    );
}
