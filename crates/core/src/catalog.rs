// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static catalog of filing types and their fee codes.
//!
//! A filing type is allowed for a legal type when at least one of its fee
//! rules applies to it. Rules with an empty legal-type list apply to every
//! legal type. Sub-typed filings (dissolution, restoration, amalgamation)
//! select their rule by sub-type; change of directors uses the `free`
//! sub-type for its no-fee variant.

use bizreg_domain::LegalType;
use bizreg_domain::LegalType::{
    BenefitCompany, BenefitCompanyContinueIn, CommunityContributionCompany,
    CommunityContributionContinueIn, ContinueIn, Cooperative, GeneralPartnership, LimitedCompany,
    SoleProprietorship, UnlimitedLiabilityCompany, UnlimitedLiabilityContinueIn,
};

const COOP: &[LegalType] = &[Cooperative];
const CORPS: &[LegalType] = &[
    LimitedCompany,
    BenefitCompany,
    UnlimitedLiabilityCompany,
    CommunityContributionCompany,
    ContinueIn,
    BenefitCompanyContinueIn,
    UnlimitedLiabilityContinueIn,
    CommunityContributionContinueIn,
];
const DOMESTIC_CORPS: &[LegalType] = &[
    LimitedCompany,
    BenefitCompany,
    UnlimitedLiabilityCompany,
    CommunityContributionCompany,
];
const CONTINUED_IN: &[LegalType] = &[
    ContinueIn,
    BenefitCompanyContinueIn,
    UnlimitedLiabilityContinueIn,
    CommunityContributionContinueIn,
];
const FIRMS: &[LegalType] = &[SoleProprietorship, GeneralPartnership];
const ANY: &[LegalType] = &[];

/// Which fee code applies to which legal types and sub-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRule {
    /// Legal types the rule applies to; empty means all.
    pub legal_types: &'static [LegalType],
    /// Sub-type the rule applies to; `None` for the plain filing.
    pub sub_type: Option<&'static str>,
    pub code: &'static str,
}

impl FeeRule {
    const fn new(legal_types: &'static [LegalType], code: &'static str) -> Self {
        Self {
            legal_types,
            sub_type: None,
            code,
        }
    }

    const fn sub(
        legal_types: &'static [LegalType],
        sub_type: &'static str,
        code: &'static str,
    ) -> Self {
        Self {
            legal_types,
            sub_type: Some(sub_type),
            code,
        }
    }

    /// Whether the rule covers `legal_type`.
    #[must_use]
    pub fn applies_to(&self, legal_type: LegalType) -> bool {
        self.legal_types.is_empty() || self.legal_types.contains(&legal_type)
    }
}

/// One entry in the filing catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilingTypeInfo {
    /// Name used in `filing.header.name`.
    pub name: &'static str,
    pub title: &'static str,
    pub display_name: &'static str,
    /// Whether completing the filing creates a business.
    pub creates_business: bool,
    /// Whether the filing may be made by registry staff only.
    pub staff_only: bool,
    pub fees: &'static [FeeRule],
}

const fn entry(
    name: &'static str,
    title: &'static str,
    display_name: &'static str,
    fees: &'static [FeeRule],
) -> FilingTypeInfo {
    FilingTypeInfo {
        name,
        title,
        display_name,
        creates_business: false,
        staff_only: false,
        fees,
    }
}

const fn creating(mut info: FilingTypeInfo) -> FilingTypeInfo {
    info.creates_business = true;
    info
}

const fn staff(mut info: FilingTypeInfo) -> FilingTypeInfo {
    info.staff_only = true;
    info
}

/// Every filing type known to the registry.
pub static FILING_TYPES: &[FilingTypeInfo] = &[
    entry(
        "annualReport",
        "Annual Report Filing",
        "Annual Report",
        &[FeeRule::new(COOP, "OTANN"), FeeRule::new(CORPS, "BCANN")],
    ),
    entry(
        "changeOfAddress",
        "Change of Address Filing",
        "Address Change",
        &[FeeRule::new(COOP, "OTADD"), FeeRule::new(CORPS, "BCADD")],
    ),
    entry(
        "changeOfDirectors",
        "Change of Directors Filing",
        "Director Change",
        &[
            FeeRule::new(COOP, "OTCDR"),
            FeeRule::sub(COOP, "free", "OTFDR"),
            FeeRule::new(CORPS, "BCCDR"),
            FeeRule::sub(CORPS, "free", "BCFDR"),
        ],
    ),
    entry(
        "alteration",
        "Notice of Alteration Filing",
        "Alteration",
        &[FeeRule::new(CORPS, "ALTER")],
    ),
    creating(entry(
        "incorporationApplication",
        "Incorporation Application",
        "Incorporation Application",
        &[
            FeeRule::new(COOP, "OTINC"),
            FeeRule::new(DOMESTIC_CORPS, "BCINC"),
        ],
    )),
    creating(entry(
        "registration",
        "Registration",
        "Registration",
        &[FeeRule::new(FIRMS, "FRREG")],
    )),
    entry(
        "changeOfRegistration",
        "Change of Registration",
        "Change of Registration Application",
        &[FeeRule::new(FIRMS, "FMCHANGE")],
    ),
    staff(entry(
        "conversion",
        "Record Conversion",
        "Record Conversion",
        &[FeeRule::new(FIRMS, "FMCONV")],
    )),
    entry(
        "dissolution",
        "Dissolution",
        "Dissolution",
        &[
            FeeRule::sub(ANY, "voluntary", "DIS_VOL"),
            FeeRule::sub(ANY, "administrative", "DIS_ADM"),
            FeeRule::sub(ANY, "involuntary", "NOFEE"),
        ],
    ),
    entry(
        "agmExtension",
        "AGM Extension",
        "Request for AGM Extension",
        &[FeeRule::new(CORPS, "AGMDT")],
    ),
    entry(
        "agmLocationChange",
        "AGM Location Change",
        "AGM Location Change",
        &[FeeRule::new(CORPS, "AGMLC")],
    ),
    staff(entry(
        "courtOrder",
        "Court Order",
        "Court Order",
        &[FeeRule::new(ANY, "COURT")],
    )),
    staff(entry(
        "registrarsNotation",
        "Registrar's Notation",
        "Registrar's Notation",
        &[FeeRule::new(ANY, "REGSN")],
    )),
    staff(entry(
        "registrarsOrder",
        "Registrar's Order",
        "Registrar's Order",
        &[FeeRule::new(ANY, "REGSO")],
    )),
    staff(entry(
        "correction",
        "Correction",
        "Register Correction Application",
        &[
            FeeRule::new(COOP, "CRCTN"),
            FeeRule::new(CORPS, "CRCTN"),
            FeeRule::new(FIRMS, "FMCORR"),
        ],
    )),
    entry(
        "specialResolution",
        "Special Resolution",
        "Special Resolution",
        &[FeeRule::new(COOP, "SPRLN")],
    ),
    staff(entry(
        "putBackOn",
        "Put Back On",
        "Correction - Put Back On",
        &[FeeRule::new(ANY, "NOFEE")],
    )),
    entry(
        "consentContinuationOut",
        "Consent Continuation Out",
        "6-Month Consent to Continue Out",
        &[FeeRule::new(CORPS, "CONTO")],
    ),
    creating(entry(
        "continuationIn",
        "Continuation In",
        "Continuation Application",
        &[FeeRule::new(CONTINUED_IN, "CONTI")],
    )),
    staff(entry(
        "restoration",
        "Restoration",
        "Restoration Application",
        &[
            FeeRule::sub(CORPS, "fullRestoration", "RESTF"),
            FeeRule::sub(CORPS, "limitedRestoration", "RESTL"),
            FeeRule::sub(CORPS, "limitedRestorationExtension", "RESXL"),
            FeeRule::sub(CORPS, "limitedRestorationToFull", "RESXF"),
        ],
    )),
    creating(entry(
        "amalgamationApplication",
        "Amalgamation Application",
        "Amalgamation Application",
        &[
            FeeRule::sub(DOMESTIC_CORPS, "regular", "AMALR"),
            FeeRule::sub(DOMESTIC_CORPS, "vertical", "AMALV"),
            FeeRule::sub(DOMESTIC_CORPS, "horizontal", "AMALH"),
        ],
    )),
    entry(
        "transition",
        "Transition",
        "Transition Application",
        &[FeeRule::new(DOMESTIC_CORPS, "TRANS")],
    ),
    staff(entry(
        "noticeOfWithdrawal",
        "Notice of Withdrawal",
        "Notice of Withdrawal",
        &[FeeRule::new(ANY, "NWITH")],
    )),
    entry("lear_epoch", "Epoch Filing", "Epoch Filing", &[]),
];

/// Looks up a filing type by its header name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static FilingTypeInfo> {
    FILING_TYPES.iter().find(|info| info.name == name)
}

/// Returns the fee code for a filing, or `None` if the filing type does not
/// apply to the legal type or sub-type.
#[must_use]
pub fn fee_code(name: &str, sub_type: Option<&str>, legal_type: LegalType) -> Option<&'static str> {
    lookup(name)?
        .fees
        .iter()
        .find(|rule| rule.sub_type == sub_type && rule.applies_to(legal_type))
        .map(|rule| rule.code)
}

/// Whether a business of `legal_type` may make this filing at all.
#[must_use]
pub fn is_allowed(name: &str, legal_type: LegalType) -> bool {
    lookup(name).is_some_and(|info| info.fees.iter().any(|rule| rule.applies_to(legal_type)))
}
