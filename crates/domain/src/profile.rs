// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::business::{Business, StandingFacts};
use crate::office::{Office, OfficeType, offices_to_json};
use crate::party::{PartyRole, RoleType};
use crate::share::ShareClass;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::Date;

/// A business together with its offices, roles and share structure.
///
/// Used both for the current state and for a state reconstructed as of a
/// past transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub business: Business,
    pub offices: Vec<Office>,
    pub party_roles: Vec<PartyRole>,
    pub share_classes: Vec<ShareClass>,
}

impl BusinessProfile {
    #[must_use]
    pub const fn new(business: Business) -> Self {
        Self {
            business,
            offices: Vec::new(),
            party_roles: Vec::new(),
            share_classes: Vec::new(),
        }
    }

    #[must_use]
    pub fn office(&self, office_type: OfficeType) -> Option<&Office> {
        self.offices.iter().find(|o| o.office_type == office_type)
    }

    /// Roles of the given type active on `date`.
    #[must_use]
    pub fn active_roles(&self, role: RoleType, date: Date) -> Vec<&PartyRole> {
        self.party_roles
            .iter()
            .filter(|r| r.role == role && r.is_active_on(date))
            .collect()
    }

    #[must_use]
    pub fn share_class(&self, name: &str) -> Option<&ShareClass> {
        self.share_classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Renders the full profile: business view, offices, parties, shares.
    #[must_use]
    pub fn to_json(&self, facts: StandingFacts) -> Value {
        let mut share_classes: Vec<&ShareClass> = self.share_classes.iter().collect();
        share_classes.sort_by_key(|c| c.priority);

        json!({
            "business": self.business.to_json(facts),
            "offices": offices_to_json(&self.offices),
            "parties": self.party_roles.iter().map(PartyRole::to_json).collect::<Vec<Value>>(),
            "shareClasses": share_classes.into_iter().map(ShareClass::to_json).collect::<Vec<Value>>(),
        })
    }
}
