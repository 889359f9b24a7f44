// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filing records and the registry's write rules.
//!
//! [`Filing`] owns the lock and status rules for a single filing, the
//! [`catalog`] knows which filing types exist and what they cost, and
//! [`versioning`](VersioningProxy) picks the engine that records history
//! for each unit of work.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

pub mod catalog;
mod error;
mod filing;
mod filing_status;
mod versioning;

#[cfg(test)]
mod tests;

pub use catalog::{FeeRule, FilingTypeInfo, fee_code, is_allowed, lookup};
pub use error::{CoreError, ErrorMessage, ErrorStatus, LOCKED_FILING_MESSAGE};
pub use filing::{EPOCH_FILING_TYPE, Filing, FilingField, StoredFiling, filing_sub_type};
pub use filing_status::{FilingSource, FilingStatus};
pub use versioning::{
    ContinuumEngine, CustomEngine, FeatureFlags, NEW_VERSIONING_FLAG, SessionInfo, StaticFlags,
    VersionPlan, VersionStep, VersioningEngine, VersioningKind, VersioningProxy,
};
