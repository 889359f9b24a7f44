// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use bizreg_domain::{AddressType, LegalType};
use serde_json::Value;
use time::Date;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::address::{Locality, validate_address};
use crate::helpers::dates::{date_at, not_in_future};
use crate::helpers::{array_at, str_at};

const DIRECTORS: &str = "/filing/changeOfDirectors/directors";
const CEASED: &str = "ceased";

/// Directors remaining once the filing takes effect.
fn remaining(directors: &[Value]) -> usize {
    directors
        .iter()
        .filter(|d| {
            !array_at(d, "/actions")
                .iter()
                .any(|action| action.as_str() == Some(CEASED))
                && str_at(d, "/cessationDate").is_none()
        })
        .count()
}

/// Change of directors: the full director list after the change.
///
/// Every director needs a name and a delivery address, appointment and
/// cessation dates are ordered and not in the future, and enough
/// directors must remain (three for a cooperative, one otherwise).
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    let directors: &[Value] = array_at(filing, DIRECTORS);
    let minimum: usize = if business.legal_type == LegalType::Cooperative {
        3
    } else {
        1
    };
    if remaining(directors) < minimum {
        messages.push(ErrorMessage::at(
            format!("A minimum of {minimum} directors is required."),
            DIRECTORS,
        ));
    }

    for (index, director) in directors.iter().enumerate() {
        let pointer: String = format!("{DIRECTORS}/{index}");
        for field in ["firstName", "lastName"] {
            if str_at(director, &format!("/officer/{field}")).is_none() {
                messages.push(ErrorMessage::at(
                    format!("{field} is required."),
                    format!("{pointer}/officer/{field}"),
                ));
            }
        }

        validate_address(
            filing,
            &format!("{pointer}/deliveryAddress"),
            AddressType::Delivery,
            Locality::Anywhere,
            &mut messages,
        );

        let appointed_pointer: String = format!("{pointer}/appointmentDate");
        let appointed: Option<Date> = date_at(filing, &appointed_pointer, &mut messages);
        if let Some(appointed) = appointed {
            not_in_future(appointed, ctx.today, "Appointment date", &appointed_pointer, &mut messages);
        }

        let ceased_pointer: String = format!("{pointer}/cessationDate");
        if let Some(ceased) = date_at(filing, &ceased_pointer, &mut messages) {
            not_in_future(ceased, ctx.today, "Cessation date", &ceased_pointer, &mut messages);
            if appointed.is_some_and(|appointed| ceased < appointed) {
                messages.push(ErrorMessage::at(
                    "Cessation date cannot be earlier than the appointment date.",
                    ceased_pointer,
                ));
            }
        }
    }

    messages
}
