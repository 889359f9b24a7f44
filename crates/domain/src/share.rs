// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A class of shares in a company's authorized share structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareClass {
    pub id: Option<i64>,
    pub business_id: Option<i64>,
    pub name: String,
    pub priority: Option<i32>,
    pub max_share_flag: bool,
    pub max_shares: Option<i64>,
    pub par_value_flag: bool,
    pub par_value: Option<f64>,
    pub currency: Option<String>,
    pub special_rights_flag: bool,
    #[serde(default)]
    pub series: Vec<ShareSeries>,
}

/// A series within a share class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSeries {
    pub id: Option<i64>,
    pub share_class_id: Option<i64>,
    pub name: String,
    pub priority: Option<i32>,
    pub max_share_flag: bool,
    pub max_shares: Option<i64>,
    pub special_rights_flag: bool,
}

impl ShareClass {
    /// Creates a class with no maximum, no par value and no series.
    #[must_use]
    pub fn new(name: &str, priority: Option<i32>) -> Self {
        Self {
            id: None,
            business_id: None,
            name: name.to_string(),
            priority,
            max_share_flag: false,
            max_shares: None,
            par_value_flag: false,
            par_value: None,
            currency: None,
            special_rights_flag: false,
            series: Vec::new(),
        }
    }

    /// Checks the class and its series. Run before every insert and update.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The max-share flag is set without a positive maximum
    /// - The par-value flag is set without a par value or currency
    /// - Any series is invalid against this class
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_share_flag && self.max_shares.is_none_or(|max| max == 0) {
            return Err(DomainError::ShareClassMaxSharesRequired {
                name: self.name.clone(),
            });
        }

        if self.par_value_flag {
            if self.par_value.is_none() {
                return Err(DomainError::ShareClassParValueRequired {
                    name: self.name.clone(),
                });
            }
            if self.currency.as_deref().is_none_or(str::is_empty) {
                return Err(DomainError::ShareClassCurrencyRequired {
                    name: self.name.clone(),
                });
            }
        }

        for series in &self.series {
            series.validate(self)?;
        }

        Ok(())
    }

    /// Renders the class with its series.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "priority": self.priority,
            "hasMaximumShares": self.max_share_flag,
            "maxNumberOfShares": self.max_shares,
            "hasParValue": self.par_value_flag,
            "parValue": self.par_value,
            "currency": self.currency,
            "hasRightsOrRestrictions": self.special_rights_flag,
            "series": self.series.iter().map(ShareSeries::to_json).collect::<Vec<Value>>(),
        })
    }
}

impl ShareSeries {
    #[must_use]
    pub fn new(name: &str, priority: Option<i32>) -> Self {
        Self {
            id: None,
            share_class_id: None,
            name: name.to_string(),
            priority,
            max_share_flag: false,
            max_shares: None,
            special_rights_flag: false,
        }
    }

    /// Checks the series against its owning class.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The max-share flag is set without a positive maximum
    /// - The series maximum exceeds the class maximum
    /// - The series exists on a class without special rights
    pub fn validate(&self, class: &ShareClass) -> Result<(), DomainError> {
        if self.max_share_flag && self.max_shares.is_none_or(|max| max == 0) {
            return Err(DomainError::ShareSeriesMaxSharesRequired {
                name: self.name.clone(),
            });
        }

        let exceeds_class: bool = match (self.max_shares, class.max_shares) {
            (Some(series_max), Some(class_max)) => class.max_share_flag && series_max > class_max,
            _ => false,
        };
        if exceeds_class {
            return Err(DomainError::ShareSeriesExceedsClass {
                series: self.name.clone(),
                class: class.name.clone(),
            });
        }

        if !class.special_rights_flag {
            return Err(DomainError::ShareSeriesWithoutSpecialRights {
                series: self.name.clone(),
                class: class.name.clone(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "priority": self.priority,
            "hasMaximumShares": self.max_share_flag,
            "maxNumberOfShares": self.max_shares,
            "hasRightsOrRestrictions": self.special_rights_flag,
        })
    }
}
