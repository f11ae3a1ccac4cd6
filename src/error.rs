// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while building a search index.
//!
//! Querying never fails. What can go wrong is handing the index a corpus that
//! breaks its structural rules: ids are unique and text weights are positive.

use thiserror::Error;

/// Result type alias for index construction.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Error type for index construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// Two corpus entries share the same id.
    #[error("Duplicate id {id}")]
    DuplicateId {
        /// Debug rendering of the offending id.
        id: String,
    },

    /// A text weight is zero, negative, or not a number.
    #[error("Invalid weight {weight} on entry {id}")]
    InvalidWeight {
        /// Debug rendering of the entry's id.
        id: String,
        weight: f64,
    },
}
