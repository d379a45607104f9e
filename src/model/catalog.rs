// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::{CatalogError, RangeError, ValidationError};
use super::item::Item;
use crate::index::{InvertedIndex, PositionSet};

/// Identity of a catalog entry that survives edits and moves.
///
/// Keys are never reused within one catalog; `replace_all` hands out fresh keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceReport {
    pub kept: usize,
    /// Later rows whose code was already taken by an earlier row.
    pub duplicates: Vec<Item>,
}

/// Revisions are drawn from one counter shared by every catalog in the process.
static NEXT_REV: AtomicU64 = AtomicU64::new(1);

fn next_rev() -> u64 {
    NEXT_REV.fetch_add(1, Ordering::Relaxed)
}

/// The ordered item list plus the search index derived from it.
///
/// Order is the only ordering authority. Content changes rebuild the index; moves only remap
/// the positions it stores.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    keys: Vec<ItemKey>,
    index: InvertedIndex,
    next_key: u64,
    rev: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Changes on every content or order change.
    ///
    /// Values are unique across all catalogs in the process, so two catalogs share a rev only
    /// when one is an unchanged clone of the other (or both are still empty).
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn snapshot(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn key_at(&self, position: usize) -> Option<ItemKey> {
        self.keys.get(position).copied()
    }

    pub fn position_of(&self, code: &str) -> Option<usize> {
        self.items.iter().position(|item| item.code() == code)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.position_of(code).is_some()
    }

    pub(crate) fn positions_by_key(&self) -> HashMap<ItemKey, usize> {
        self.keys
            .iter()
            .enumerate()
            .map(|(position, key)| (*key, position))
            .collect()
    }

    pub(crate) fn positions_by_code(&self) -> HashMap<&str, usize> {
        self.items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.code(), position))
            .collect()
    }

    pub fn search(&self, query: &str) -> PositionSet {
        self.index.search(&self.items, query)
    }

    /// Replaces every item, keeping input order. The first item with a given code wins.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = Item>) -> ReplaceReport {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut duplicates = Vec::new();
        for item in items {
            if seen.insert(item.code().to_owned()) {
                kept.push(item);
            } else {
                duplicates.push(item);
            }
        }

        let keys = (0..kept.len())
            .map(|_| self.allocate_key())
            .collect::<Vec<_>>();
        self.items = kept;
        self.keys = keys;
        self.content_changed();

        if !duplicates.is_empty() {
            tracing::warn!(
                duplicates = duplicates.len(),
                "dropped items with duplicate codes"
            );
        }

        ReplaceReport {
            kept: self.items.len(),
            duplicates,
        }
    }

    /// Appends a new item and returns its position.
    pub fn insert(&mut self, code: &str, name: &str) -> Result<usize, CatalogError> {
        let item = Item::new(code, name)?;
        self.ensure_code_free(item.code(), None)?;

        let key = self.allocate_key();
        self.items.push(item);
        self.keys.push(key);
        self.content_changed();
        Ok(self.items.len() - 1)
    }

    /// Updates the item at `position` in place. Fails without effect on empty fields or a code
    /// held by another item.
    pub fn edit(&mut self, position: usize, code: &str, name: &str) -> Result<(), CatalogError> {
        RangeError::check_one(position, self.items.len())?;
        let item = Item::new(code, name)?;
        self.ensure_code_free(item.code(), Some(position))?;

        if self.items[position] == item {
            return Ok(());
        }
        self.items[position] = item;
        self.content_changed();
        Ok(())
    }

    pub fn remove(&mut self, position: usize) -> Result<Item, RangeError> {
        RangeError::check_one(position, self.items.len())?;
        self.keys.remove(position);
        let item = self.items.remove(position);
        self.content_changed();
        Ok(item)
    }

    /// Moves the item at `from` so it ends up at `to`, shifting the items in between.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), RangeError> {
        RangeError::check(from, to, self.items.len())?;
        if from == to {
            return Ok(());
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);
        let key = self.keys.remove(from);
        self.keys.insert(to, key);
        self.index.apply_move(from, to);
        self.rev = next_rev();
        Ok(())
    }

    fn ensure_code_free(&self, code: &str, except: Option<usize>) -> Result<(), ValidationError> {
        let taken = self
            .items
            .iter()
            .enumerate()
            .any(|(position, item)| Some(position) != except && item.code() == code);
        if taken {
            return Err(ValidationError::DuplicateCode {
                code: code.to_owned(),
            });
        }
        Ok(())
    }

    fn allocate_key(&mut self) -> ItemKey {
        let key = ItemKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        key
    }

    fn content_changed(&mut self) {
        self.index.rebuild(&self.items);
        self.rev = next_rev();
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Catalog {}
