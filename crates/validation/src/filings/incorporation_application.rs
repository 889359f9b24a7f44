// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::{LegalType, OfficeType, RoleType};
use serde_json::Value;

use crate::context::ValidationContext;
use crate::helpers::address::{Locality, validate_office};
use crate::helpers::name_request::{requested_legal_type, validate_name_request};
use crate::helpers::parties::{require_role_count, validate_parties};
use crate::helpers::shares::validate_share_structure;
use crate::helpers::{array_at, str_at};

const APPLICATION: &str = "/filing/incorporationApplication";

/// Incorporation of a company or cooperative.
///
/// Companies may incorporate without a name request (numbered companies);
/// cooperatives may not. Offices must be in BC and a company needs at least
/// one share class.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(legal_type) = requested_legal_type(filing, APPLICATION, &mut messages) else {
        return messages;
    };
    let cooperative: bool = legal_type == LegalType::Cooperative;

    validate_name_request(
        ctx,
        filing,
        &format!("{APPLICATION}/nameRequest"),
        legal_type,
        cooperative,
        &mut messages,
    );

    let offices: String = format!("{APPLICATION}/offices");
    validate_office(
        filing,
        &format!("{offices}/{}", OfficeType::RegisteredOffice.as_str()),
        Locality::BritishColumbia,
        &mut messages,
    );
    if legal_type.is_corporation() {
        validate_office(
            filing,
            &format!("{offices}/{}", OfficeType::RecordsOffice.as_str()),
            Locality::BritishColumbia,
            &mut messages,
        );
    }

    let parties: String = format!("{APPLICATION}/parties");
    validate_parties(filing, &parties, &mut messages);
    require_role_count(filing, &parties, RoleType::CompletingParty, 1, Some(1), &mut messages);
    require_role_count(
        filing,
        &parties,
        RoleType::Director,
        if cooperative { 3 } else { 1 },
        None,
        &mut messages,
    );
    if !cooperative {
        require_role_count(filing, &parties, RoleType::Incorporator, 1, None, &mut messages);
    }

    if legal_type.is_corporation() {
        let classes: String = format!("{APPLICATION}/shareStructure/shareClasses");
        if array_at(filing, &classes).is_empty() {
            messages.push(ErrorMessage::at(
                "A company must have a minimum of one share class.",
                classes.clone(),
            ));
        }
        validate_share_structure(filing, &classes, &mut messages);
    }

    if str_at(filing, &format!("{APPLICATION}/contactPoint/email")).is_none() {
        messages.push(ErrorMessage::at(
            "Email address is required.",
            format!("{APPLICATION}/contactPoint/email"),
        ));
    }

    messages
}
