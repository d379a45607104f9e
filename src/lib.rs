// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Qlvt: a personal materials catalog.
//!
//! Items imported from a spreadsheet are kept in a user-defined order, searched through an
//! in-memory inverted index, and bookmarked into a separately ordered list.

pub mod import;
pub mod index;
pub mod model;
pub mod ops;
pub mod query;
pub mod store;
pub mod ui;
