// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::business::Business;
use crate::error::DomainError;
use crate::legal_type::LegalType;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(CP|XCP|BC|C|FM)([0-9]{7})$").expect("identifier pattern is a valid literal")
});

/// Checks whether `identifier` is a well-formed registry identifier.
///
/// Name request numbers (`NR ...`) are always accepted. Otherwise the
/// identifier is a known prefix followed by seven digits that are not all
/// zero. Firms must carry the `FM` prefix.
///
/// # Arguments
///
/// * `legal_type` - The legal type of the owning business, when known
/// * `identifier` - The identifier to check
#[must_use]
pub fn validate_identifier(legal_type: Option<LegalType>, identifier: &str) -> bool {
    if identifier.starts_with("NR") {
        return true;
    }

    let Some(captures) = IDENTIFIER_PATTERN.captures(identifier) else {
        return false;
    };

    if captures.get(2).is_some_and(|digits| digits.as_str() == "0000000") {
        return false;
    }

    if legal_type.is_some_and(|lt| lt.is_firm()) {
        return captures.get(1).is_some_and(|prefix| prefix.as_str() == "FM");
    }

    true
}

/// Validates a business record before it is written.
///
/// # Errors
///
/// Returns an error if:
/// - The identifier does not match the registry format
/// - A non-corporation has no legal name (companies may be numbered)
pub fn validate_business(business: &Business) -> Result<(), DomainError> {
    if !validate_identifier(Some(business.legal_type), &business.identifier) {
        return Err(DomainError::InvalidIdentifier {
            identifier: business.identifier.clone(),
        });
    }

    if !business.legal_type.is_corporation()
        && business.legal_name.as_deref().is_none_or(str::is_empty)
    {
        return Err(DomainError::MissingLegalName {
            identifier: business.identifier.clone(),
        });
    }

    Ok(())
}
