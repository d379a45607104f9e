// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for a workspace on disk.
//!
//! The store reads and writes one JSON data file holding the catalog and its bookmarks. Older
//! files holding a bare item array are still accepted.

pub mod data_file;

pub use data_file::{
    decode_document, encode_document, DataFile, Decoded, DocumentError, DocumentFormat,
    SkippedItem, StoreError, WriteDurability, DEFAULT_DATA_FILENAME,
};
