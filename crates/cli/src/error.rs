// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg_domain::DomainError;
use bizreg_persistence::PersistenceError;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures that stop a command before it can produce output.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Business {0} not found.")]
    BusinessNotFound(String),
    #[error("Filing {filing_id} does not belong to {identifier}.")]
    FilingMismatch { filing_id: i64, identifier: String },
    #[error("No fee code for {filing_type} filed by a {legal_type} business.")]
    NoFeeCode {
        filing_type: String,
        legal_type: String,
    },
    #[error("cannot render output: {0}")]
    Output(#[from] serde_json::Error),
}
