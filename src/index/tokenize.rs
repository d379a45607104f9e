// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Term extraction for item codes and names.

use std::sync::OnceLock;

use regex::Regex;
use smallvec::SmallVec;
use smol_str::SmolStr;

/// Terms produced for a single field. Most codes and names yield a handful of terms.
pub type Terms = SmallVec<[SmolStr; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Code,
    Name,
}

pub fn tokenize(field: Field, text: &str) -> Terms {
    let lower = text.to_lowercase();
    match field {
        Field::Code => code_terms_lower(&lower),
        Field::Name => name_terms_lower(&lower),
    }
}

/// Whole code followed by its maximal `[a-z]+` / `[0-9]+` runs.
///
/// `"VT-001"` yields `["vt-001", "vt", "001"]`; any other character only separates runs.
pub fn code_terms(code: &str) -> Terms {
    tokenize(Field::Code, code)
}

/// Maximal runs of Unicode word characters.
pub fn name_terms(name: &str) -> Terms {
    tokenize(Field::Name, name)
}

pub(crate) fn code_terms_lower(code_lower: &str) -> Terms {
    let mut terms = Terms::new();
    if code_lower.is_empty() {
        return terms;
    }

    terms.push(SmolStr::new(code_lower));
    terms.extend(
        code_run_regex()
            .find_iter(code_lower)
            .map(|m| SmolStr::new(m.as_str())),
    );
    terms
}

pub(crate) fn name_terms_lower(name_lower: &str) -> Terms {
    word_regex()
        .find_iter(name_lower)
        .map(|m| SmolStr::new(m.as_str()))
        .collect()
}

fn code_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z]+|[0-9]+").expect("code run pattern is valid"))
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}
