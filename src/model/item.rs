// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::error::ValidationError;

/// One catalog record: a user-visible code plus a free-text name.
///
/// Both fields are trimmed and non-empty. The lowercase forms used by search are computed once
/// when the item is built or edited and are never exposed for mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    code: String,
    name: String,
    code_lower: String,
    name_lower: String,
}

impl Item {
    pub fn new(code: impl AsRef<str>, name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let (code, name) = validate_fields(code.as_ref(), name.as_ref())?;
        let code_lower = code.to_lowercase();
        let name_lower = name.to_lowercase();
        Ok(Self {
            code,
            name,
            code_lower,
            name_lower,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code_lower(&self) -> &str {
        &self.code_lower
    }

    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

fn validate_fields(code: &str, name: &str) -> Result<(String, String), ValidationError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::EmptyCode);
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok((code.to_owned(), name.to_owned()))
}
