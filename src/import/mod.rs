// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Turning exported spreadsheet rows into catalog items.
//!
//! Reading the spreadsheet itself happens elsewhere; this module takes rows that were already
//! exported as JSON objects, one per sheet row.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::model::Item;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rows file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One spreadsheet row. Either cell may be missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    #[serde(default, alias = "Mã VT", deserialize_with = "cell_text")]
    pub code: Option<String>,
    #[serde(default, alias = "Tên VT", deserialize_with = "cell_text")]
    pub name: Option<String>,
}

impl RawRow {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedRows {
    pub items: Vec<Item>,
    /// Rows missing a code or a name.
    pub dropped: usize,
}

/// Keeps rows with a non-blank code and name, in input order.
///
/// Duplicate codes are left in place; the catalog decides which one wins.
pub fn clean_rows(rows: impl IntoIterator<Item = RawRow>) -> CleanedRows {
    let mut cleaned = CleanedRows::default();
    for row in rows {
        let item = match (row.code, row.name) {
            (Some(code), Some(name)) => Item::new(code, name).ok(),
            _ => None,
        };
        match item {
            Some(item) => cleaned.items.push(item),
            None => cleaned.dropped += 1,
        }
    }

    tracing::info!(
        kept = cleaned.items.len(),
        dropped = cleaned.dropped,
        "cleaned import rows"
    );
    cleaned
}

/// Reads a JSON array of row objects.
pub fn read_rows_json(path: &Path) -> Result<Vec<RawRow>, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ImportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Spreadsheet cells arrive as strings, numbers or booleans; anything else counts as empty.
fn cell_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}
