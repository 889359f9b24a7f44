// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::{AddressType, RoleType};
use serde_json::Value;

use super::address::{Locality, validate_address};
use super::{array_at, str_at};

/// Roles named by one party entry, ignoring unknown ones.
fn roles_of(party: &Value) -> impl Iterator<Item = RoleType> + '_ {
    array_at(party, "/roles")
        .iter()
        .filter_map(|role| str_at(role, "/roleType"))
        .filter_map(|name| RoleType::from_filing_role(name).ok())
}

/// How many parties in the array at `pointer` hold `role`.
#[must_use]
pub fn count_role(filing: &Value, pointer: &str, role: RoleType) -> usize {
    array_at(filing, pointer)
        .iter()
        .filter(|party| roles_of(party).any(|r| r == role))
        .count()
}

/// Records a message when the number of parties holding `role` is out of range.
pub fn require_role_count(
    filing: &Value,
    pointer: &str,
    role: RoleType,
    min: usize,
    max: Option<usize>,
    messages: &mut Vec<ErrorMessage>,
) {
    let count: usize = count_role(filing, pointer, role);
    if count < min {
        messages.push(ErrorMessage::at(
            format!("A minimum of {min} {} is required.", role.display_name()),
            pointer,
        ));
    }
    if let Some(max) = max.filter(|max| count > *max) {
        messages.push(ErrorMessage::at(
            format!("A maximum of {max} {} is allowed.", role.display_name()),
            pointer,
        ));
    }
}

/// Checks names, roles and addresses of every party in the array at `pointer`.
pub fn validate_parties(filing: &Value, pointer: &str, messages: &mut Vec<ErrorMessage>) {
    for (index, party) in array_at(filing, pointer).iter().enumerate() {
        let party_pointer: String = format!("{pointer}/{index}");
        validate_officer(party, &party_pointer, messages);

        let roles: &[Value] = array_at(party, "/roles");
        if roles.is_empty() {
            messages.push(ErrorMessage::at(
                "At least one role is required.",
                format!("{party_pointer}/roles"),
            ));
        }
        for (role_index, role) in roles.iter().enumerate() {
            let role_pointer: String = format!("{party_pointer}/roles/{role_index}/roleType");
            match str_at(role, "/roleType") {
                None => messages.push(ErrorMessage::at("roleType is required.", role_pointer)),
                Some(name) if RoleType::from_filing_role(name).is_err() => {
                    messages.push(ErrorMessage::at(
                        format!("{name} is not a valid role."),
                        role_pointer,
                    ));
                }
                Some(_) => {}
            }
        }

        validate_address(
            filing,
            &format!("{party_pointer}/mailingAddress"),
            AddressType::Mailing,
            Locality::Anywhere,
            messages,
        );
        if filing
            .pointer(&format!("{party_pointer}/deliveryAddress"))
            .is_some()
        {
            validate_address(
                filing,
                &format!("{party_pointer}/deliveryAddress"),
                AddressType::Delivery,
                Locality::Anywhere,
                messages,
            );
        }
    }
}

fn validate_officer(party: &Value, party_pointer: &str, messages: &mut Vec<ErrorMessage>) {
    let officer_pointer: String = format!("{party_pointer}/officer");
    let Some(officer) = party.get("officer") else {
        messages.push(ErrorMessage::at("officer is required.", officer_pointer));
        return;
    };

    match str_at(officer, "/partyType").unwrap_or("person") {
        "organization" => {
            if str_at(officer, "/organizationName").is_none() {
                messages.push(ErrorMessage::at(
                    "organizationName is required.",
                    format!("{officer_pointer}/organizationName"),
                ));
            }
        }
        "person" => {
            for field in ["firstName", "lastName"] {
                if str_at(officer, &format!("/{field}")).is_none() {
                    messages.push(ErrorMessage::at(
                        format!("{field} is required."),
                        format!("{officer_pointer}/{field}"),
                    ));
                }
            }
        }
        other => messages.push(ErrorMessage::at(
            format!("{other} is not a valid party type."),
            format!("{officer_pointer}/partyType"),
        )),
    }
}
