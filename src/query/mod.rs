// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the catalog.
//!
//! The search session turns search-box input into an order-preserving view for display.

pub mod search;

pub use search::{SearchSession, SearchView, DEFAULT_DEBOUNCE};
