// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use qlvt::model::{Item, Workspace};

const NAME_WORDS: &[&str] = &[
    "bearing", "bolt", "nut", "washer", "gasket", "seal", "pipe", "valve", "flange", "spring",
    "bu lông", "đai ốc", "vòng đệm", "ống", "van",
];

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn len(self) -> usize {
        match self {
            Self::Small => 200,
            Self::Medium => 5_000,
            Self::Large => 50_000,
        }
    }
}

/// `VT00001`-style codes with two to four name words, cycling deterministically.
pub fn items(case: Case) -> Vec<Item> {
    (0..case.len())
        .map(|idx| {
            let prefix = ["VT", "KT", "DX"][idx % 3];
            let code = format!("{prefix}{idx:05}");
            let words = 2 + idx % 3;
            let name = (0..words)
                .map(|w| NAME_WORDS[(idx * 7 + w * 3) % NAME_WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ");
            Item::new(code, format!("{name} M{}", 4 + idx % 20)).expect("fixture item")
        })
        .collect()
}

/// Every tenth item bookmarked.
pub fn workspace(case: Case) -> Workspace {
    let items = items(case);
    let bookmarks = items
        .iter()
        .step_by(10)
        .map(|item| item.code().to_owned())
        .collect::<Vec<_>>();
    let (workspace, _, _) = Workspace::restore(items, bookmarks);
    workspace
}
