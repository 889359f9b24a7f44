// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::ErrorMessage;
use serde_json::Value;
use time::Date;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::dates::{not_before_founding, not_in_future, require_date};
use crate::helpers::require_str;

const RESOLUTION: &str = "/filing/specialResolution";

/// Special resolution of a cooperative: the resolution text, when it was
/// passed, and who signed it and when.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    require_str(filing, &format!("{RESOLUTION}/resolution"), "Resolution text", &mut messages);

    let resolved_pointer: String = format!("{RESOLUTION}/resolutionDate");
    let resolved: Option<Date> = require_date(filing, &resolved_pointer, "Resolution date", &mut messages);
    if let Some(resolved) = resolved {
        not_in_future(resolved, ctx.today, "Resolution date", &resolved_pointer, &mut messages);
        not_before_founding(resolved, business, "Resolution date", &resolved_pointer, &mut messages);
    }

    let signed_pointer: String = format!("{RESOLUTION}/signingDate");
    if let Some(signed) = require_date(filing, &signed_pointer, "Signing date", &mut messages) {
        not_in_future(signed, ctx.today, "Signing date", &signed_pointer, &mut messages);
        if resolved.is_some_and(|resolved| signed < resolved) {
            messages.push(ErrorMessage::at(
                "Signing date cannot be earlier than the resolution date.",
                signed_pointer,
            ));
        }
    }

    require_str(
        filing,
        &format!("{RESOLUTION}/signatory/givenName"),
        "Signatory given name",
        &mut messages,
    );
    require_str(
        filing,
        &format!("{RESOLUTION}/signatory/familyName"),
        "Signatory family name",
        &mut messages,
    );

    messages
}
