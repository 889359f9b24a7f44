// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    CoopMemorandum,
    CoopRules,
    Affidavit,
    CourtOrder,
}

impl DocumentType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CoopMemorandum => "coop_memorandum",
            Self::CoopRules => "coop_rules",
            Self::Affidavit => "affidavit",
            Self::CourtOrder => "court_order",
        }
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coop_memorandum" => Ok(Self::CoopMemorandum),
            "coop_rules" => Ok(Self::CoopRules),
            "affidavit" => Ok(Self::Affidavit),
            "court_order" => Ok(Self::CourtOrder),
            _ => Err(DomainError::UnknownCode {
                kind: "document type",
                value: s.to_string(),
            }),
        }
    }
}

/// A stored document attached to a business, and optionally to the filing
/// that supplied it. `file_key` names the object in document storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<i64>,
    pub document_type: DocumentType,
    pub file_key: String,
    pub business_id: i64,
    pub filing_id: Option<i64>,
}
