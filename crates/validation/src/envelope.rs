// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shape checks every filing document passes before any rule runs.

use bizreg::{ErrorMessage, ErrorStatus};
use jsonschema::Validator;
use serde_json::{Value, json};
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Header checks shared by every filing.
static HEADER_SCHEMA: LazyLock<Result<Validator, String>> = LazyLock::new(|| {
    compile(&json!({
        "type": "object",
        "required": ["filing"],
        "properties": {
            "filing": {
                "type": "object",
                "required": ["header"],
                "properties": {
                    "header": {
                        "type": "object",
                        "required": ["name"],
                        "properties": {
                            "name": { "type": "string", "minLength": 1 },
                            "date": { "type": "string" },
                            "certifiedBy": { "type": "string" },
                            "email": { "type": "string" },
                            "effectiveDate": { "type": "string" }
                        }
                    }
                }
            }
        }
    }))
});

/// Filings against an existing business must say which one.
static BUSINESS_SCHEMA: LazyLock<Result<Validator, String>> = LazyLock::new(|| {
    compile(&json!({
        "type": "object",
        "properties": {
            "filing": {
                "type": "object",
                "required": ["business"],
                "properties": {
                    "business": {
                        "type": "object",
                        "required": ["identifier"],
                        "properties": {
                            "identifier": { "type": "string", "minLength": 1 },
                            "legalType": { "type": "string" }
                        }
                    }
                }
            }
        }
    }))
});

fn compile(schema: &Value) -> Result<Validator, String> {
    jsonschema::validator_for(schema).map_err(|e| e.to_string())
}

fn run(schema: &LazyLock<Result<Validator, String>>, filing: &Value) -> Result<(), ValidationError> {
    let validator: &Validator = schema.as_ref().map_err(|reason| {
        ValidationError::new(
            ErrorStatus::InternalServerError,
            vec![ErrorMessage::new(format!("Filing schema is unusable: {reason}"))],
        )
    })?;

    let messages: Vec<ErrorMessage> = validator
        .iter_errors(filing)
        .map(|e| ErrorMessage::at(e.to_string(), e.instance_path.to_string()))
        .collect();

    if messages.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(ErrorStatus::UnprocessableEntity, messages))
    }
}

/// Checks the envelope and returns the filing type named in the header.
///
/// # Errors
///
/// Returns a 422 `ValidationError` listing every schema violation.
pub fn filing_name(filing: &Value) -> Result<&str, ValidationError> {
    run(&HEADER_SCHEMA, filing)?;
    filing
        .pointer("/filing/header/name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ValidationError::new(
                ErrorStatus::UnprocessableEntity,
                vec![ErrorMessage::at("No filings found.", "/filing/header/name")],
            )
        })
}

/// Checks that the filing names the business it is for.
///
/// # Errors
///
/// Returns a 422 `ValidationError` when `filing.business.identifier` is missing.
pub fn business_identifier(filing: &Value) -> Result<&str, ValidationError> {
    run(&BUSINESS_SCHEMA, filing)?;
    filing
        .pointer("/filing/business/identifier")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ValidationError::new(
                ErrorStatus::UnprocessableEntity,
                vec![ErrorMessage::at(
                    "A business identifier is required.",
                    "/filing/business/identifier",
                )],
            )
        })
}
