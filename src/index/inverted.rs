// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::num::NonZeroUsize;
use std::rc::Rc;

use lru::LruCache;
use memchr::memmem;
use smallvec::SmallVec;
use smol_str::SmolStr;

use super::tokenize::{code_terms_lower, name_terms_lower};
use crate::model::Item;

/// Distinct substrings remembered by `matching_terms` per index generation.
pub const DEFAULT_MATCH_CACHE_CAPACITY: usize = 128;

/// Queries shorter than this (in chars) bypass the term index entirely.
pub const MIN_INDEXED_QUERY_CHARS: usize = 2;

pub type Postings = SmallVec<[usize; 4]>;

/// Catalog positions matched by a lookup. Carries no order; callers walk the catalog.
pub type PositionSet = HashSet<usize>;

/// Term → catalog positions, rebuilt from scratch whenever catalog content changes.
///
/// `matching_terms` memoizes per substring. The memo lives behind a `RefCell` so lookups stay
/// `&self`; the index is single-writer and not meant to be shared across threads.
pub struct InvertedIndex {
    postings: HashMap<SmolStr, Postings>,
    generation: u64,
    match_cache: RefCell<LruCache<SmolStr, Rc<[SmolStr]>>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_MATCH_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            postings: HashMap::new(),
            generation: 0,
            match_cache: RefCell::new(LruCache::new(capacity)),
        }
    }

    pub fn build(items: &[Item]) -> Self {
        let mut index = Self::new();
        index.rebuild(items);
        index
    }

    /// Increments on every rebuild; memoized matches never outlive their generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn cached_substrings(&self) -> usize {
        self.match_cache.borrow().len()
    }

    pub fn rebuild(&mut self, items: &[Item]) {
        self.postings.clear();
        self.match_cache.get_mut().clear();
        self.generation = self.generation.wrapping_add(1);

        for (position, item) in items.iter().enumerate() {
            let terms = code_terms_lower(item.code_lower())
                .into_iter()
                .chain(name_terms_lower(item.name_lower()));
            for term in terms {
                let postings = self.postings.entry(term).or_default();
                // Positions arrive in ascending order, so a repeat can only be the last entry.
                if postings.last() != Some(&position) {
                    postings.push(position);
                }
            }
        }

        tracing::debug!(
            generation = self.generation,
            items = items.len(),
            terms = self.postings.len(),
            "rebuilt inverted index"
        );
    }

    /// Follows a catalog move of one item from `from` to `to` without re-tokenizing.
    ///
    /// Terms are unchanged, so the generation and the memoized matches stay valid.
    pub fn apply_move(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        for postings in self.postings.values_mut() {
            for position in postings.iter_mut() {
                *position = moved_position(*position, from, to);
            }
        }
    }

    /// Exact term lookup.
    pub fn query(&self, term: &str) -> PositionSet {
        self.postings
            .get(term.to_lowercase().as_str())
            .map(|postings| postings.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every indexed term containing `substring`, sorted.
    pub fn matching_terms(&self, substring: &str) -> Rc<[SmolStr]> {
        let substring = substring.to_lowercase();

        let mut cache = self.match_cache.borrow_mut();
        if let Some(terms) = cache.get(substring.as_str()) {
            return Rc::clone(terms);
        }

        let finder = memmem::Finder::new(substring.as_bytes());
        let mut terms = self
            .postings
            .keys()
            .filter(|term| finder.find(term.as_bytes()).is_some())
            .cloned()
            .collect::<Vec<_>>();
        terms.sort_unstable();

        let terms: Rc<[SmolStr]> = terms.into();
        cache.put(SmolStr::new(&substring), Rc::clone(&terms));
        terms
    }

    /// Positions whose code or name contains `query`, case-insensitively.
    ///
    /// `items` must be the slice this index was last rebuilt from.
    pub fn search(&self, items: &[Item], query: &str) -> PositionSet {
        let query = query.to_lowercase();
        let finder = memmem::Finder::new(query.as_bytes());
        let contains = |item: &Item| {
            finder.find(item.code_lower().as_bytes()).is_some()
                || finder.find(item.name_lower().as_bytes()).is_some()
        };
        let direct_hits = items
            .iter()
            .enumerate()
            .filter(|(_, item)| contains(item))
            .map(|(position, _)| position);

        if query.chars().count() < MIN_INDEXED_QUERY_CHARS {
            return direct_hits.collect();
        }

        let mut hits = PositionSet::new();
        for term in self.matching_terms(&query).iter() {
            if let Some(postings) = self.postings.get(term) {
                hits.extend(postings.iter().copied());
            }
        }
        // Terms drop separators, so a query spanning a token boundary only matches raw text.
        hits.extend(direct_hits);
        hits
    }
}

fn moved_position(position: usize, from: usize, to: usize) -> usize {
    if position == from {
        to
    } else if from < to && (from..=to).contains(&position) {
        position - 1
    } else if to < from && (to..from).contains(&position) {
        position + 1
    } else {
        position
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InvertedIndex {
    fn clone(&self) -> Self {
        Self {
            postings: self.postings.clone(),
            generation: self.generation,
            match_cache: RefCell::new(LruCache::new(self.match_cache.borrow().cap())),
        }
    }
}

impl fmt::Debug for InvertedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvertedIndex")
            .field("generation", &self.generation)
            .field("terms", &self.postings.len())
            .field("cached_substrings", &self.cached_substrings())
            .finish()
    }
}
