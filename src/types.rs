// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a searchable corpus.
//!
//! A corpus entry is three things: an id, a set of tags, and a handful of
//! weighted text fields. Tags feed the inverted index and boolean filtering;
//! texts feed fuzzy scoring. Nothing here knows where entries come from.
//!
//! # Invariants
//!
//! - **WeightedText**: `text` is lowercase and `weight > 0`. Queries are
//!   lowercased by the tokenizer, so matching is a plain substring search.
//!   A deserialized `WeightedText` bypasses `new`; `SearchIndex::new` rejects
//!   any weight that isn't finite and positive.
//! - **CorpusEntry**: `id` is unique within one `SearchIndex`. The index
//!   refuses to build otherwise.
//! - **SearchResult**: `score > 0`. Entries that score zero are not results.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// One searchable field of an entry, with its relative importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedText {
    pub text: String,
    pub weight: f64,
}

impl WeightedText {
    /// Lowercases `text` so it lines up with tokenized queries.
    pub fn new(text: impl AsRef<str>, weight: f64) -> Self {
        debug_assert!(weight > 0.0, "WeightedText weight must be positive, got {weight}");
        Self {
            text: text.as_ref().to_lowercase(),
            weight,
        }
    }
}

/// A searchable unit: id, tag set, and weighted texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "Id: Serialize, Tag: Serialize + Eq + Hash",
    deserialize = "Id: Deserialize<'de>, Tag: Deserialize<'de> + Eq + Hash"
))]
pub struct CorpusEntry<Id, Tag> {
    pub id: Id,
    pub tags: HashSet<Tag>,
    pub texts: Vec<WeightedText>,
}

impl<Id, Tag: Eq + Hash> CorpusEntry<Id, Tag> {
    pub fn new(
        id: Id,
        tags: impl IntoIterator<Item = Tag>,
        texts: impl IntoIterator<Item = WeightedText>,
    ) -> Self {
        Self {
            id,
            tags: tags.into_iter().collect(),
            texts: texts.into_iter().collect(),
        }
    }
}

impl<Id: PartialEq, Tag: Eq + Hash> PartialEq for CorpusEntry<Id, Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tags == other.tags && self.texts == other.texts
    }
}

/// A ranked hit. The score is always strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<Id> {
    pub id: Id,
    pub score: f64,
}
