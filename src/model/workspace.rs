// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::bookmarks::{BookmarkOverlay, SyncReport, Toggle};
use super::catalog::{Catalog, ReplaceReport};
use super::error::{CatalogError, RangeError};
use super::item::Item;

/// The catalog together with its bookmark overlay; the unit that gets persisted.
///
/// Every content change on the catalog goes through here so the overlay is synced right after.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    catalog: Catalog,
    bookmarks: BookmarkOverlay,
    rev: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a workspace from persisted parts. Bookmark codes missing from `items` are skipped
    /// and returned.
    pub fn restore<S: AsRef<str>>(
        items: Vec<Item>,
        bookmark_codes: impl IntoIterator<Item = S>,
    ) -> (Self, ReplaceReport, Vec<String>) {
        let mut catalog = Catalog::new();
        let report = catalog.replace_all(items);
        let (bookmarks, skipped) = BookmarkOverlay::from_codes(&catalog, bookmark_codes);
        let workspace = Self {
            catalog,
            bookmarks,
            rev: 0,
        };
        (workspace, report, skipped)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn bookmarks(&self) -> &BookmarkOverlay {
        &self.bookmarks
    }

    /// Bumps once per applied op batch.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn bump_rev(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn replace_all(
        &mut self,
        items: impl IntoIterator<Item = Item>,
    ) -> (ReplaceReport, SyncReport) {
        let report = self.catalog.replace_all(items);
        let sync = self.bookmarks.sync_after_catalog_change(&self.catalog);
        (report, sync)
    }

    pub fn insert(&mut self, code: &str, name: &str) -> Result<usize, CatalogError> {
        self.catalog.insert(code, name)
    }

    pub fn edit(
        &mut self,
        position: usize,
        code: &str,
        name: &str,
    ) -> Result<SyncReport, CatalogError> {
        self.catalog.edit(position, code, name)?;
        Ok(self.bookmarks.sync_after_catalog_change(&self.catalog))
    }

    pub fn remove(&mut self, position: usize) -> Result<(Item, SyncReport), RangeError> {
        let item = self.catalog.remove(position)?;
        let sync = self.bookmarks.sync_after_catalog_change(&self.catalog);
        Ok((item, sync))
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), RangeError> {
        self.catalog.move_to(from, to)
    }

    pub fn toggle_bookmark(&mut self, code: &str) -> Toggle {
        self.bookmarks.toggle(&self.catalog, code)
    }

    pub fn move_bookmark(&mut self, from: usize, to: usize) -> Result<(), RangeError> {
        self.bookmarks.move_to(from, to)
    }

    pub fn is_bookmarked(&self, code: &str) -> bool {
        self.bookmarks.contains(code)
    }
}

impl PartialEq for Workspace {
    fn eq(&self, other: &Self) -> bool {
        self.catalog == other.catalog && self.bookmarks == other.bookmarks
    }
}

impl Eq for Workspace {}
