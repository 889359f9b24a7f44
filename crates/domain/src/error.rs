// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Business identifier does not match the registry format.
    InvalidIdentifier {
        /// The rejected identifier.
        identifier: String,
    },
    /// Business legal name is missing.
    MissingLegalName {
        /// The identifier of the business without a name.
        identifier: String,
    },
    /// A coded value (legal type, state, office type, ...) was not recognized.
    UnknownCode {
        /// What kind of code was being parsed.
        kind: &'static str,
        /// The unrecognized value.
        value: String,
    },
    /// A share class flagged with a maximum has none.
    ShareClassMaxSharesRequired {
        /// The share class name.
        name: String,
    },
    /// A share class flagged with a par value has none.
    ShareClassParValueRequired {
        /// The share class name.
        name: String,
    },
    /// A share class flagged with a par value has no currency.
    ShareClassCurrencyRequired {
        /// The share class name.
        name: String,
    },
    /// A share series flagged with a maximum has none.
    ShareSeriesMaxSharesRequired {
        /// The share series name.
        name: String,
    },
    /// Series maximum exceeds the owning class maximum.
    ShareSeriesExceedsClass {
        /// The share series name.
        series: String,
        /// The share class name.
        class: String,
    },
    /// Series declared on a class without special rights.
    ShareSeriesWithoutSpecialRights {
        /// The share series name.
        series: String,
        /// The share class name.
        class: String,
    },
    /// Batch processing status transition is not permitted.
    InvalidBatchTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },
    /// Timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A JSON document did not carry the expected shape.
    InvalidJson {
        /// Where in the document the problem was found.
        path: String,
        /// Description of the problem.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { identifier } => {
                write!(f, "Invalid business identifier: '{identifier}'")
            }
            Self::MissingLegalName { identifier } => {
                write!(f, "Business {identifier} must have a legal name")
            }
            Self::UnknownCode { kind, value } => write!(f, "Unknown {kind}: '{value}'"),
            Self::ShareClassMaxSharesRequired { name } => {
                write!(f, "The maximum number of shares for {name} must be specified.")
            }
            Self::ShareClassParValueRequired { name } => {
                write!(f, "The par value for {name} must be specified.")
            }
            Self::ShareClassCurrencyRequired { name } => {
                write!(f, "The currency for {name} must be specified.")
            }
            Self::ShareSeriesMaxSharesRequired { name } => {
                write!(f, "The maximum number of shares for {name} must be specified.")
            }
            Self::ShareSeriesExceedsClass { series, class } => {
                write!(
                    f,
                    "The maximum number of shares for {series} cannot exceed the maximum number of shares for {class}."
                )
            }
            Self::ShareSeriesWithoutSpecialRights { series, class } => {
                write!(
                    f,
                    "Share series {series} requires {class} to have special rights or restrictions."
                )
            }
            Self::InvalidBatchTransition { from, to } => {
                write!(f, "Cannot transition batch processing from {from} to {to}")
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidJson { path, reason } => write!(f, "Invalid document at {path}: {reason}"),
        }
    }
}

impl std::error::Error for DomainError {}
