// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation helpers shared by front ends.
//!
//! Nothing here draws; it shapes catalog state into rows and hands codes to a clipboard.

use std::io::Write;

use crate::model::{Item, Workspace};
use crate::query::SearchView;

/// Names longer than this many chars are cut and suffixed with `...`.
pub const NAME_DISPLAY_LIMIT: usize = 60;

/// `"{code} - {name}"`, with long names truncated.
pub fn display_label(item: &Item) -> String {
    let name = item.name();
    match name.char_indices().nth(NAME_DISPLAY_LIMIT) {
        Some((cut, _)) => format!("{} - {}...", item.code(), &name[..cut]),
        None => format!("{} - {}", item.code(), name),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Catalog position of the item.
    pub position: usize,
    pub label: String,
    pub bookmarked: bool,
}

/// Rows of `view` in display order.
pub fn visible_rows(workspace: &Workspace, view: &SearchView) -> Vec<Row> {
    let catalog = workspace.catalog();
    view.positions(catalog.len())
        .filter_map(|position| {
            let item = catalog.get(position)?;
            Some(Row {
                position,
                label: display_label(item),
                bookmarked: workspace.is_bookmarked(item.code()),
            })
        })
        .collect()
}

/// Where copied codes go. Copying is fire-and-forget; implementations log their own failures.
pub trait Clipboard {
    fn copy_text(&mut self, text: &str);
}

/// Writes copied text to a stream, one entry per line, for terminals piping into a clipboard tool.
#[derive(Debug)]
pub struct StreamClipboard<W> {
    out: W,
}

impl<W: Write> StreamClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for StreamClipboard<W> {
    fn copy_text(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %err, "failed to write copied text");
        }
    }
}

pub fn copy_item_code(clipboard: &mut dyn Clipboard, item: &Item) {
    clipboard.copy_text(item.code());
    tracing::debug!(code = item.code(), "copied item code");
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use rstest::rstest;

    use super::{copy_item_code, display_label, visible_rows, Clipboard, StreamClipboard};
    use crate::model::{Item, Workspace};
    use crate::query::{SearchSession, SearchView};

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn copy_text(&mut self, text: &str) {
            self.copied.push(text.to_owned());
        }
    }

    #[rstest]
    #[case("Bolt", "A1 - Bolt")]
    #[case(&"x".repeat(60), &format!("A1 - {}", "x".repeat(60)))]
    #[case(&"x".repeat(61), &format!("A1 - {}...", "x".repeat(60)))]
    #[case(&"ố".repeat(70), &format!("A1 - {}...", "ố".repeat(60)))]
    fn display_label_truncates_long_names(#[case] name: &str, #[case] expected: &str) {
        let item = Item::new("A1", name).expect("item");
        assert_eq!(display_label(&item), expected);
    }

    #[test]
    fn visible_rows_follow_view_and_mark_bookmarks() {
        let (workspace, _, _) = Workspace::restore(
            vec![
                Item::new("A1", "Bolt").unwrap(),
                Item::new("B2", "Nut").unwrap(),
                Item::new("C3", "Bolt cap").unwrap(),
            ],
            ["C3"],
        );

        let all = visible_rows(&workspace, &SearchView::all());
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].label, "B2 - Nut");

        let mut session = SearchSession::new();
        session.on_query_changed("bolt", Instant::now());
        let rows = visible_rows(&workspace, session.evaluate(workspace.catalog()));
        assert_eq!(
            rows.iter()
                .map(|row| (row.position, row.bookmarked))
                .collect::<Vec<_>>(),
            [(0, false), (2, true)]
        );
    }

    #[test]
    fn copy_item_code_copies_code_only() {
        let mut clipboard = RecordingClipboard::default();
        copy_item_code(&mut clipboard, &Item::new("VT001", "Bearing").unwrap());
        assert_eq!(clipboard.copied, ["VT001"]);
    }

    #[test]
    fn stream_clipboard_writes_one_line_per_copy() {
        let mut clipboard = StreamClipboard::new(Vec::new());
        clipboard.copy_text("A1");
        clipboard.copy_text("B2");
        assert_eq!(clipboard.into_inner(), b"A1\nB2\n");
    }
}
