// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

/// Rejected item content on a direct edit or insert.
///
/// Batch imports never surface this; invalid rows are dropped instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("item code must not be empty")]
    EmptyCode,
    #[error("item name must not be empty")]
    EmptyName,
    #[error("item code {code:?} is already used by another item")]
    DuplicateCode { code: String },
}

/// An index outside the sequence it was applied to.
///
/// Single-position lookups report the same value for `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position out of range (from={from}, to={to}, len={len})")]
pub struct RangeError {
    pub from: usize,
    pub to: usize,
    pub len: usize,
}

impl RangeError {
    pub(crate) fn check(from: usize, to: usize, len: usize) -> Result<(), Self> {
        if from >= len || to >= len {
            return Err(Self { from, to, len });
        }
        Ok(())
    }

    pub(crate) fn check_one(position: usize, len: usize) -> Result<(), Self> {
        Self::check(position, position, len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

#[cfg(test)]
mod tests {
    use super::RangeError;

    #[test]
    fn range_check_rejects_either_end() {
        assert!(RangeError::check(0, 2, 3).is_ok());
        assert_eq!(RangeError::check(5, 0, 3), Err(RangeError { from: 5, to: 0, len: 3 }));
        assert_eq!(RangeError::check(0, 3, 3), Err(RangeError { from: 0, to: 3, len: 3 }));
    }

    #[test]
    fn range_check_on_empty_sequence_always_fails() {
        RangeError::check_one(0, 0).unwrap_err();
    }
}
