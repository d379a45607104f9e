// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use super::catalog::{Catalog, ItemKey};
use super::error::RangeError;
use super::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The code is not in the catalog; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Codes of bookmarks whose catalog item no longer exists.
    pub dropped: Vec<String>,
    /// Bookmarks whose stored code or name changed.
    pub refreshed: usize,
}

/// An ordered subset of catalog items, reorderable independently of the catalog.
///
/// Entries store a copy of the item for display plus the catalog key they follow, so a code
/// rename in the catalog carries over on the next sync.
#[derive(Debug, Clone, Default)]
pub struct BookmarkOverlay {
    entries: Vec<Item>,
    keys: Vec<ItemKey>,
}

impl BookmarkOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookmarks `codes` in order, skipping codes the catalog does not hold (or repeats).
    ///
    /// Returns the overlay and the skipped codes.
    pub fn from_codes<I, S>(catalog: &Catalog, codes: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overlay = Self::new();
        let mut skipped = Vec::new();
        for code in codes {
            let code = code.as_ref();
            if overlay.contains(code) || overlay.add(catalog, code).is_none() {
                skipped.push(code.to_owned());
            }
        }
        (overlay, skipped)
    }

    pub fn entries(&self) -> &[Item] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|entry| entry.code() == code)
    }

    pub fn toggle(&mut self, catalog: &Catalog, code: &str) -> Toggle {
        if let Some(slot) = self.entries.iter().position(|entry| entry.code() == code) {
            self.entries.remove(slot);
            self.keys.remove(slot);
            return Toggle::Removed;
        }

        match self.add(catalog, code) {
            Some(()) => Toggle::Added,
            None => Toggle::Ignored,
        }
    }

    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), RangeError> {
        RangeError::check(from, to, self.entries.len())?;
        if from == to {
            return Ok(());
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        let key = self.keys.remove(from);
        self.keys.insert(to, key);
        Ok(())
    }

    /// Reconciles entries with the catalog after its content changed.
    ///
    /// Each entry follows its catalog key first and falls back to its stored code (keys do not
    /// survive `replace_all`). Unresolvable entries are dropped; the rest take the catalog's
    /// current code and name.
    pub fn sync_after_catalog_change(&mut self, catalog: &Catalog) -> SyncReport {
        let by_key = catalog.positions_by_key();
        let by_code = catalog.positions_by_code();

        let mut report = SyncReport::default();
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.entries.len());
        let mut keys = Vec::with_capacity(self.keys.len());

        for (entry, key) in self.entries.drain(..).zip(self.keys.drain(..)) {
            let position = by_key
                .get(&key)
                .or_else(|| by_code.get(entry.code()))
                .copied()
                .filter(|position| seen.insert(*position));

            let Some(position) = position else {
                report.dropped.push(entry.code().to_owned());
                continue;
            };

            let (Some(current), Some(current_key)) =
                (catalog.get(position), catalog.key_at(position))
            else {
                report.dropped.push(entry.code().to_owned());
                continue;
            };

            if current != &entry {
                report.refreshed += 1;
            }
            entries.push(current.clone());
            keys.push(current_key);
        }

        self.entries = entries;
        self.keys = keys;

        if !report.dropped.is_empty() {
            tracing::info!(dropped = ?report.dropped, "removed bookmarks of deleted items");
        }
        report
    }

    fn add(&mut self, catalog: &Catalog, code: &str) -> Option<()> {
        let position = catalog.position_of(code)?;
        let item = catalog.get(position)?.clone();
        let key = catalog.key_at(position)?;
        self.entries.push(item);
        self.keys.push(key);
        Some(())
    }
}

impl PartialEq for BookmarkOverlay {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for BookmarkOverlay {}
