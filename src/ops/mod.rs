// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for a workspace.
//!
//! Ops are applied in batches with optimistic concurrency (revision checks). A batch either
//! applies completely or not at all, and produces a coarse delta the front end can use to
//! refresh derived state.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{CatalogError, Item, SyncReport, Toggle, Workspace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Replaces the whole catalog with already-cleaned items.
    Import { items: Vec<Item> },
    Add { code: String, name: String },
    Edit { position: usize, code: String, name: String },
    Remove { position: usize },
    Move { from: usize, to: usize },
    ToggleBookmark { code: String },
    MoveBookmark { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Which items a batch touched, by code.
///
/// A code rename shows up as the old code removed and the new one added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub updated: Vec<String>,
    /// Catalog order changed.
    pub reordered: bool,
    /// Bookmark membership, order or display fields changed.
    pub bookmarks_changed: bool,
    /// Bookmarks dropped because their item left the catalog.
    pub bookmarks_dropped: Vec<String>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<String>,
    removed: HashSet<String>,
    updated: HashSet<String>,
    reordered: bool,
    bookmarks_changed: bool,
    bookmarks_dropped: Vec<String>,
}

impl DeltaBuilder {
    fn record_added(&mut self, code: &str) {
        self.removed.remove(code);
        self.updated.remove(code);
        self.added.insert(code.to_owned());
    }

    fn record_removed(&mut self, code: &str) {
        self.added.remove(code);
        self.updated.remove(code);
        self.removed.insert(code.to_owned());
    }

    fn record_updated(&mut self, code: &str) {
        if self.added.contains(code) || self.removed.contains(code) {
            return;
        }
        self.updated.insert(code.to_owned());
    }

    fn record_sync(&mut self, sync: SyncReport) {
        if sync.refreshed > 0 || !sync.dropped.is_empty() {
            self.bookmarks_changed = true;
        }
        for code in sync.dropped {
            if !self.bookmarks_dropped.contains(&code) {
                self.bookmarks_dropped.push(code);
            }
        }
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort_unstable();
        removed.sort_unstable();
        updated.sort_unstable();

        Delta {
            added,
            removed,
            updated,
            reordered: self.reordered,
            bookmarks_changed: self.bookmarks_changed,
            bookmarks_dropped: self.bookmarks_dropped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("stale base_rev (base_rev={base_rev}, current_rev={current_rev})")]
    Conflict { base_rev: u64, current_rev: u64 },
    #[error("op #{op_index} failed: {source}")]
    Op {
        op_index: usize,
        #[source]
        source: CatalogError,
    },
}

/// Applies `ops` to a copy of the workspace and commits the copy only if every op succeeded.
///
/// The revision is bumped once per committed, non-empty batch.
pub fn apply_ops(
    workspace: &mut Workspace,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = workspace.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict {
            base_rev,
            current_rev,
        });
    }

    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: current_rev,
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut next = workspace.clone();
    let mut delta = DeltaBuilder::default();
    for (op_index, op) in ops.iter().enumerate() {
        apply_op(&mut next, op, &mut delta).map_err(|source| {
            tracing::debug!(op_index, error = %source, "op batch rejected");
            ApplyError::Op { op_index, source }
        })?;
    }

    next.bump_rev();
    *workspace = next;
    let new_rev = workspace.rev();
    let delta = delta.finish();
    tracing::debug!(
        new_rev,
        applied = ops.len(),
        added = delta.added.len(),
        removed = delta.removed.len(),
        updated = delta.updated.len(),
        reordered = delta.reordered,
        "applied op batch"
    );

    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta,
    })
}

fn apply_op(
    workspace: &mut Workspace,
    op: &Op,
    delta: &mut DeltaBuilder,
) -> Result<(), CatalogError> {
    match op {
        Op::Import { items } => {
            let before = workspace
                .catalog()
                .snapshot()
                .iter()
                .map(|item| (item.code().to_owned(), item.name().to_owned()))
                .collect::<Vec<_>>();

            let (_, sync) = workspace.replace_all(items.iter().cloned());
            record_import(&before, workspace.catalog().snapshot(), delta);
            delta.record_sync(sync);
        }
        Op::Add { code, name } => {
            let position = workspace.insert(code, name)?;
            if let Some(item) = workspace.catalog().get(position) {
                delta.record_added(item.code());
            }
        }
        Op::Edit {
            position,
            code,
            name,
        } => {
            let before = workspace.catalog().get(*position).cloned();
            let sync = workspace.edit(*position, code, name)?;
            if let (Some(before), Some(after)) = (before, workspace.catalog().get(*position)) {
                if before.code() != after.code() {
                    delta.record_removed(before.code());
                    delta.record_added(after.code());
                } else if before.name() != after.name() {
                    delta.record_updated(after.code());
                }
            }
            delta.record_sync(sync);
        }
        Op::Remove { position } => {
            let (item, sync) = workspace.remove(*position)?;
            delta.record_removed(item.code());
            delta.record_sync(sync);
        }
        Op::Move { from, to } => {
            workspace.move_item(*from, *to)?;
            if from != to {
                delta.reordered = true;
            }
        }
        Op::ToggleBookmark { code } => match workspace.toggle_bookmark(code) {
            Toggle::Added | Toggle::Removed => delta.bookmarks_changed = true,
            Toggle::Ignored => {
                tracing::debug!(code = %code, "ignored bookmark toggle for unknown code");
            }
        },
        Op::MoveBookmark { from, to } => {
            workspace.move_bookmark(*from, *to)?;
            if from != to {
                delta.bookmarks_changed = true;
            }
        }
    }
    Ok(())
}

fn record_import(before: &[(String, String)], after: &[Item], delta: &mut DeltaBuilder) {
    let old_names = before
        .iter()
        .map(|(code, name)| (code.as_str(), name.as_str()))
        .collect::<std::collections::HashMap<_, _>>();
    let new_codes = after.iter().map(Item::code).collect::<HashSet<_>>();

    for (code, _) in before {
        if !new_codes.contains(code.as_str()) {
            delta.record_removed(code);
        }
    }
    for item in after {
        match old_names.get(item.code()) {
            None => delta.record_added(item.code()),
            Some(name) if *name != item.name() => delta.record_updated(item.code()),
            Some(_) => {}
        }
    }

    let surviving_before = before
        .iter()
        .map(|(code, _)| code.as_str())
        .filter(|code| new_codes.contains(code));
    let surviving_after = after
        .iter()
        .map(Item::code)
        .filter(|code| old_names.contains_key(code));
    if !surviving_before.eq(surviving_after) {
        delta.reordered = true;
    }
}
