// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Item, ValidationError, Workspace};

/// Default data file name, resolved against the working directory.
pub const DEFAULT_DATA_FILENAME: &str = "data.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid data file {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Stored items are never merged or dropped for sharing a code; the file has to be fixed or
    /// replaced by an import.
    #[error("items[{index}]: code {code:?} is already used by items[{first}]")]
    DuplicateCode {
        index: usize,
        first: usize,
        code: String,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames it into place, without fsync.
    #[default]
    BestEffort,

    /// Additionally flushes the file contents and, on unix, the parent directory entry.
    /// Exact guarantees are platform/filesystem-dependent.
    Durable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `{ "items": [...], "bookmarks": [...] }`
    Wrapped,
    /// A bare item array written by older versions; carries no bookmarks.
    Legacy,
}

/// A stored item that could not become a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub index: usize,
    pub code: String,
    pub reason: ValidationError,
}

/// A decoded document plus what had to be reconciled while restoring it.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub workspace: Workspace,
    pub format: DocumentFormat,
    /// Items with a blank code or name, left out like blank import rows.
    pub skipped_items: Vec<SkippedItem>,
    /// Bookmark codes with no matching item.
    pub dropped_bookmarks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ItemJson {
    code: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DocumentJson {
    items: Vec<ItemJson>,
    #[serde(default)]
    bookmarks: Vec<ItemJson>,
}

impl From<&Item> for ItemJson {
    fn from(item: &Item) -> Self {
        Self {
            code: item.code().to_owned(),
            name: item.name().to_owned(),
        }
    }
}

/// Serializes the workspace as pretty-printed JSON with a trailing newline.
pub fn encode_document(workspace: &Workspace) -> Result<String, serde_json::Error> {
    let document = DocumentJson {
        items: workspace
            .catalog()
            .snapshot()
            .iter()
            .map(ItemJson::from)
            .collect(),
        bookmarks: workspace
            .bookmarks()
            .entries()
            .iter()
            .map(ItemJson::from)
            .collect(),
    };
    let mut text = serde_json::to_string_pretty(&document)?;
    text.push('\n');
    Ok(text)
}

/// Parses either document format and restores a workspace from it.
///
/// Items with a blank code or name are skipped and reported. Two items sharing a code fail the
/// whole document. Bookmarks resolve by code against the loaded items and take their display
/// fields from there.
pub fn decode_document(text: &str) -> Result<Decoded, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let (document, format) = if value.is_array() {
        let items: Vec<ItemJson> = serde_json::from_value(value)?;
        let document = DocumentJson {
            items,
            bookmarks: Vec::new(),
        };
        (document, DocumentFormat::Legacy)
    } else {
        (serde_json::from_value(value)?, DocumentFormat::Wrapped)
    };

    let (items, skipped_items) = items_from_json(document.items)?;
    let bookmark_codes = document
        .bookmarks
        .into_iter()
        .map(|bookmark| bookmark.code.trim().to_owned())
        .filter(|code| !code.is_empty())
        .collect::<Vec<_>>();

    let (workspace, _, dropped_bookmarks) = Workspace::restore(items, bookmark_codes);
    Ok(Decoded {
        workspace,
        format,
        skipped_items,
        dropped_bookmarks,
    })
}

fn items_from_json(rows: Vec<ItemJson>) -> Result<(Vec<Item>, Vec<SkippedItem>), DocumentError> {
    let mut items = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();
    let mut first_index = HashMap::<String, usize>::new();

    for (index, row) in rows.into_iter().enumerate() {
        let item = match Item::new(&row.code, &row.name) {
            Ok(item) => item,
            Err(reason) => {
                skipped.push(SkippedItem {
                    index,
                    code: row.code,
                    reason,
                });
                continue;
            }
        };
        if let Some(&first) = first_index.get(item.code()) {
            return Err(DocumentError::DuplicateCode {
                index,
                first,
                code: item.code().to_owned(),
            });
        }
        first_index.insert(item.code().to_owned(), index);
        items.push(item);
    }
    Ok((items, skipped))
}

/// The JSON file holding one workspace.
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Workspace, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let decoded = decode_document(&text).map_err(|source| StoreError::Document {
            path: self.path.clone(),
            source,
        })?;

        if decoded.format == DocumentFormat::Legacy {
            tracing::info!(path = %self.path.display(), "loaded legacy item array");
        }
        for skipped in &decoded.skipped_items {
            tracing::warn!(
                path = %self.path.display(),
                index = skipped.index,
                code = %skipped.code,
                reason = %skipped.reason,
                "skipped stored item"
            );
        }
        if !decoded.dropped_bookmarks.is_empty() {
            tracing::info!(
                path = %self.path.display(),
                codes = ?decoded.dropped_bookmarks,
                "dropped bookmarks without a matching item"
            );
        }
        tracing::debug!(
            path = %self.path.display(),
            items = decoded.workspace.catalog().len(),
            bookmarks = decoded.workspace.bookmarks().len(),
            "loaded data file"
        );
        Ok(decoded.workspace)
    }

    /// Like [`DataFile::load`], but a missing file yields an empty workspace.
    pub fn load_or_default(&self) -> Result<Workspace, StoreError> {
        match self.load() {
            Err(StoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file yet");
                Ok(Workspace::new())
            }
            other => other,
        }
    }

    pub fn save(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let text = encode_document(workspace).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, text.as_bytes(), self.durability)?;
        tracing::debug!(
            path = %self.path.display(),
            items = workspace.catalog().len(),
            bookmarks = workspace.bookmarks().len(),
            "saved data file"
        );
        Ok(())
    }
}

include!("data_file/helpers.rs");
