// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory search index over catalog items.
//!
//! The tokenizer turns codes and names into lowercase terms; the inverted index maps those terms
//! to catalog positions and answers substring queries, patched by a direct scan for queries the
//! terms cannot express.

pub mod inverted;
pub mod tokenize;

pub use inverted::{
    InvertedIndex, PositionSet, Postings, DEFAULT_MATCH_CACHE_CAPACITY, MIN_INDEXED_QUERY_CHARS,
};
pub use tokenize::{code_terms, name_terms, tokenize, Field, Terms};
