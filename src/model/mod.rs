// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A workspace holds the ordered catalog (which owns its search index) and the bookmark overlay.

pub mod bookmarks;
pub mod catalog;
pub mod error;
pub mod item;
pub mod workspace;

pub use bookmarks::{BookmarkOverlay, SyncReport, Toggle};
pub use catalog::{Catalog, ItemKey, ReplaceReport};
pub use error::{CatalogError, RangeError, ValidationError};
pub use item::Item;
pub use workspace::Workspace;
