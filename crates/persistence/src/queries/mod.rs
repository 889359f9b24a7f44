// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `business` — Businesses and current business profiles
//! - `filing` — Filings and filing-derived facts
//! - `history` — Transactions, version records and as-of profiles
//! - `batch` — Dissolution batches and furnishings

pub mod batch;
pub mod business;
pub mod filing;
pub mod history;
