// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The corporate form of a registered entity.
///
/// Each variant serializes as its registry code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalType {
    /// Cooperative Association
    #[serde(rename = "CP")]
    Cooperative,
    /// BC Benefit Company
    #[serde(rename = "BEN")]
    BenefitCompany,
    /// BC Limited Company
    #[serde(rename = "BC")]
    LimitedCompany,
    /// BC Unlimited Liability Company
    #[serde(rename = "ULC")]
    UnlimitedLiabilityCompany,
    /// BC Community Contribution Company
    #[serde(rename = "CC")]
    CommunityContributionCompany,
    /// Continued-in limited company
    #[serde(rename = "C")]
    ContinueIn,
    /// Continued-in benefit company
    #[serde(rename = "CBEN")]
    BenefitCompanyContinueIn,
    /// Continued-in unlimited liability company
    #[serde(rename = "CUL")]
    UnlimitedLiabilityContinueIn,
    /// Continued-in community contribution company
    #[serde(rename = "CCC")]
    CommunityContributionContinueIn,
    /// Sole Proprietorship
    #[serde(rename = "SP")]
    SoleProprietorship,
    /// General Partnership
    #[serde(rename = "GP")]
    GeneralPartnership,
    /// Limited Partnership
    #[serde(rename = "LP")]
    LimitedPartnership,
    /// Limited Liability Partnership
    #[serde(rename = "LL")]
    LimitedLiabilityPartnership,
    /// Extraprovincial Limited Liability Partnership
    #[serde(rename = "XL")]
    ExtraProvincialLimitedLiabilityPartnership,
    /// Extraprovincial Limited Partnership
    #[serde(rename = "XP")]
    ExtraProvincialLimitedPartnership,
    /// Extraprovincial Cooperative Association
    #[serde(rename = "XCP")]
    ExtraProvincialCooperative,
    /// Extraprovincial Company
    #[serde(rename = "A")]
    ExtraProvincialCompanyA,
    /// Extraprovincial Company (non-share)
    #[serde(rename = "B")]
    ExtraProvincialCompanyB,
    /// Extraprovincial Registration
    #[serde(rename = "EPR")]
    ExtraProvincialRegistration,
    /// Limited Liability Company
    #[serde(rename = "LLC")]
    LimitedLiabilityCompany,
    /// Society
    #[serde(rename = "S")]
    Society,
    /// Extraprovincial Society
    #[serde(rename = "XS")]
    ExtraProvincialSociety,
    /// Financial Institution
    #[serde(rename = "FI")]
    FinancialInstitution,
    /// Private Act
    #[serde(rename = "PA")]
    PrivateAct,
    /// Parish
    #[serde(rename = "PAR")]
    Parish,
    /// Cemetery
    #[serde(rename = "CEM")]
    Cemetery,
    /// Foreign registration
    #[serde(rename = "FOR")]
    Foreign,
    /// Trust
    #[serde(rename = "T")]
    Trust,
    /// Registration
    #[serde(rename = "REG")]
    Registration,
    /// Library
    #[serde(rename = "LIB")]
    Library,
    /// Licensed (extraprovincial)
    #[serde(rename = "LIC")]
    Licensed,
    /// Railway
    #[serde(rename = "RLY")]
    Railway,
    /// Miscellaneous firm
    #[serde(rename = "MF")]
    MiscellaneousFirm,
    /// Company incorporated under the 1860 act
    #[serde(rename = "QA")]
    Company1860,
    /// Company incorporated under the 1862 act
    #[serde(rename = "QB")]
    Company1862,
    /// Company incorporated under the 1878 act
    #[serde(rename = "QC")]
    Company1878,
    /// Company incorporated under the 1890 act
    #[serde(rename = "QD")]
    Company1890,
    /// Company incorporated under the 1897 act
    #[serde(rename = "QE")]
    Company1897,
    /// Continued-in society
    #[serde(rename = "CS")]
    SocietyContinueIn,
    /// Credit union
    #[serde(rename = "CU")]
    CreditUnion,
}

impl LegalType {
    /// Every legal type known to the registry.
    pub const ALL: [Self; 40] = [
        Self::Cooperative,
        Self::BenefitCompany,
        Self::LimitedCompany,
        Self::UnlimitedLiabilityCompany,
        Self::CommunityContributionCompany,
        Self::ContinueIn,
        Self::BenefitCompanyContinueIn,
        Self::UnlimitedLiabilityContinueIn,
        Self::CommunityContributionContinueIn,
        Self::SoleProprietorship,
        Self::GeneralPartnership,
        Self::LimitedPartnership,
        Self::LimitedLiabilityPartnership,
        Self::ExtraProvincialLimitedLiabilityPartnership,
        Self::ExtraProvincialLimitedPartnership,
        Self::ExtraProvincialCooperative,
        Self::ExtraProvincialCompanyA,
        Self::ExtraProvincialCompanyB,
        Self::ExtraProvincialRegistration,
        Self::LimitedLiabilityCompany,
        Self::Society,
        Self::ExtraProvincialSociety,
        Self::FinancialInstitution,
        Self::PrivateAct,
        Self::Parish,
        Self::Cemetery,
        Self::Foreign,
        Self::Trust,
        Self::Registration,
        Self::Library,
        Self::Licensed,
        Self::Railway,
        Self::MiscellaneousFirm,
        Self::Company1860,
        Self::Company1862,
        Self::Company1878,
        Self::Company1890,
        Self::Company1897,
        Self::SocietyContinueIn,
        Self::CreditUnion,
    ];

    /// Returns the registry code for this legal type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cooperative => "CP",
            Self::BenefitCompany => "BEN",
            Self::LimitedCompany => "BC",
            Self::UnlimitedLiabilityCompany => "ULC",
            Self::CommunityContributionCompany => "CC",
            Self::ContinueIn => "C",
            Self::BenefitCompanyContinueIn => "CBEN",
            Self::UnlimitedLiabilityContinueIn => "CUL",
            Self::CommunityContributionContinueIn => "CCC",
            Self::SoleProprietorship => "SP",
            Self::GeneralPartnership => "GP",
            Self::LimitedPartnership => "LP",
            Self::LimitedLiabilityPartnership => "LL",
            Self::ExtraProvincialLimitedLiabilityPartnership => "XL",
            Self::ExtraProvincialLimitedPartnership => "XP",
            Self::ExtraProvincialCooperative => "XCP",
            Self::ExtraProvincialCompanyA => "A",
            Self::ExtraProvincialCompanyB => "B",
            Self::ExtraProvincialRegistration => "EPR",
            Self::LimitedLiabilityCompany => "LLC",
            Self::Society => "S",
            Self::ExtraProvincialSociety => "XS",
            Self::FinancialInstitution => "FI",
            Self::PrivateAct => "PA",
            Self::Parish => "PAR",
            Self::Cemetery => "CEM",
            Self::Foreign => "FOR",
            Self::Trust => "T",
            Self::Registration => "REG",
            Self::Library => "LIB",
            Self::Licensed => "LIC",
            Self::Railway => "RLY",
            Self::MiscellaneousFirm => "MF",
            Self::Company1860 => "QA",
            Self::Company1862 => "QB",
            Self::Company1878 => "QC",
            Self::Company1890 => "QD",
            Self::Company1897 => "QE",
            Self::SocietyContinueIn => "CS",
            Self::CreditUnion => "CU",
        }
    }

    /// Returns the human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Cooperative => "BC Cooperative Association",
            Self::BenefitCompany => "BC Benefit Company",
            Self::LimitedCompany => "BC Limited Company",
            Self::UnlimitedLiabilityCompany => "BC Unlimited Liability Company",
            Self::CommunityContributionCompany => "BC Community Contribution Company",
            Self::ContinueIn => "Limited Company (Continued In)",
            Self::BenefitCompanyContinueIn => "Benefit Company (Continued In)",
            Self::UnlimitedLiabilityContinueIn => "Unlimited Liability Company (Continued In)",
            Self::CommunityContributionContinueIn => {
                "Community Contribution Company (Continued In)"
            }
            Self::SoleProprietorship => "BC Sole Proprietorship",
            Self::GeneralPartnership => "BC General Partnership",
            Self::LimitedPartnership => "BC Limited Partnership",
            Self::LimitedLiabilityPartnership => "BC Limited Liability Partnership",
            Self::ExtraProvincialLimitedLiabilityPartnership => {
                "Extraprovincial Limited Liability Partnership"
            }
            Self::ExtraProvincialLimitedPartnership => "Extraprovincial Limited Partnership",
            Self::ExtraProvincialCooperative => "Extraprovincial Cooperative Association",
            Self::ExtraProvincialCompanyA => "Extraprovincial Company",
            Self::ExtraProvincialCompanyB => "Extraprovincial Non-Share Company",
            Self::ExtraProvincialRegistration => "Extraprovincial Registration",
            Self::LimitedLiabilityCompany => "Limited Liability Company",
            Self::Society => "Society",
            Self::ExtraProvincialSociety => "Extraprovincial Society",
            Self::FinancialInstitution => "Financial Institution",
            Self::PrivateAct => "Private Act",
            Self::Parish => "Parish",
            Self::Cemetery => "Cemetery",
            Self::Foreign => "Foreign Registration",
            Self::Trust => "Trust",
            Self::Registration => "Registration",
            Self::Library => "Library",
            Self::Licensed => "Licensed (Extraprovincial)",
            Self::Railway => "Railway",
            Self::MiscellaneousFirm => "Miscellaneous Firm",
            Self::Company1860 => "Company (1860 Act)",
            Self::Company1862 => "Company (1862 Act)",
            Self::Company1878 => "Company (1878 Act)",
            Self::Company1890 => "Company (1890 Act)",
            Self::Company1897 => "Company (1897 Act)",
            Self::SocietyContinueIn => "Society (Continued In)",
            Self::CreditUnion => "Credit Union",
        }
    }

    /// Sole proprietorships and general partnerships.
    #[must_use]
    pub const fn is_firm(&self) -> bool {
        matches!(self, Self::SoleProprietorship | Self::GeneralPartnership)
    }

    /// The BC company family, including continued-in companies.
    #[must_use]
    pub const fn is_corporation(&self) -> bool {
        matches!(
            self,
            Self::LimitedCompany
                | Self::BenefitCompany
                | Self::UnlimitedLiabilityCompany
                | Self::CommunityContributionCompany
                | Self::ContinueIn
                | Self::BenefitCompanyContinueIn
                | Self::UnlimitedLiabilityContinueIn
                | Self::CommunityContributionContinueIn
        )
    }

    /// Companies that entered the registry by continuation.
    #[must_use]
    pub const fn is_continued_in(&self) -> bool {
        matches!(
            self,
            Self::ContinueIn
                | Self::BenefitCompanyContinueIn
                | Self::UnlimitedLiabilityContinueIn
                | Self::CommunityContributionContinueIn
        )
    }

    /// Cooperative associations.
    #[must_use]
    pub const fn is_cooperative(&self) -> bool {
        matches!(self, Self::Cooperative)
    }

    /// Entities registered from outside the jurisdiction.
    #[must_use]
    pub const fn is_extraprovincial(&self) -> bool {
        matches!(
            self,
            Self::ExtraProvincialCompanyA
                | Self::ExtraProvincialCompanyB
                | Self::ExtraProvincialCooperative
                | Self::ExtraProvincialLimitedLiabilityPartnership
                | Self::ExtraProvincialLimitedPartnership
                | Self::ExtraProvincialSociety
                | Self::ExtraProvincialRegistration
        )
    }
}

impl FromStr for LegalType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|lt| lt.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCode {
                kind: "legal type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for LegalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
