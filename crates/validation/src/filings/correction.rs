// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{ErrorMessage, Filing, FilingStatus};
use serde_json::Value;

use super::business;
use crate::context::ValidationContext;
use crate::helpers::{int_at, require_str, str_at};

const CORRECTION: &str = "/filing/correction";
const MAX_COMMENT_LENGTH: usize = 4096;

/// Correction of an earlier completed filing of the same business.
pub fn validate(ctx: &ValidationContext<'_>, filing: &Value) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = Vec::new();
    let Some(business) = business(ctx, &mut messages) else {
        return messages;
    };

    let comment_pointer: String = format!("{CORRECTION}/comment");
    let comment_too_long: bool = require_str(filing, &comment_pointer, "Comment", &mut messages)
        .is_some_and(|comment| comment.chars().count() > MAX_COMMENT_LENGTH);
    if comment_too_long {
        messages.push(ErrorMessage::at(
            format!("Comment cannot be longer than {MAX_COMMENT_LENGTH} characters."),
            comment_pointer,
        ));
    }

    let id_pointer: String = format!("{CORRECTION}/correctedFilingId");
    let Some(corrected_id) = int_at(filing, &id_pointer) else {
        messages.push(ErrorMessage::at("Corrected filing id is required.", id_pointer));
        return messages;
    };

    let Some(corrected) = ctx
        .filings
        .find_filing(corrected_id)
        .filter(|f: &&Filing| f.business_id().is_some() && f.business_id() == business.id)
    else {
        messages.push(ErrorMessage::at(
            format!("Corrected filing {corrected_id} not found."),
            id_pointer,
        ));
        return messages;
    };

    if !matches!(
        corrected.status(),
        FilingStatus::Completed | FilingStatus::Corrected
    ) {
        messages.push(ErrorMessage::at(
            "Only completed filings can be corrected.",
            id_pointer,
        ));
    }

    let type_pointer: String = format!("{CORRECTION}/correctedFilingType");
    if str_at(filing, &type_pointer).is_some_and(|named| corrected.filing_type() != Some(named)) {
        messages.push(ErrorMessage::at(
            "Corrected filing type does not match the corrected filing.",
            type_pointer,
        ));
    }

    messages
}
