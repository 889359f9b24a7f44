// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod batch_tests;
mod business_tests;
mod error_tests;
mod helpers;
mod party_tests;
mod share_tests;
