// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::condition::CompiledCondition;
use crate::index::SearchIndex;
use crate::types::{CorpusEntry, WeightedText};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Create an entry with string tags and a single text of weight 1.
///
/// This is the canonical implementation used across all tests.
pub fn entry(id: &str, tags: &[&str], text: &str) -> CorpusEntry<String, String> {
    CorpusEntry::new(
        id.to_string(),
        tags.iter().map(|t| t.to_string()),
        [WeightedText::new(text, 1.0)],
    )
}

/// The ids of a set, sorted, for order-independent comparisons.
pub fn sorted_ids<Id: Ord + Clone>(ids: &HashSet<Id>) -> Vec<Id> {
    let mut ids: Vec<Id> = ids.iter().cloned().collect();
    ids.sort();
    ids
}

/// Brute-force tag filter: test every entry against `condition` one by one.
///
/// This is what `SearchIndex::with_tags` must agree with.
pub fn filter_by_evaluation<Id, Tag>(
    index: &SearchIndex<Id, Tag>,
    condition: &CompiledCondition<Tag>,
) -> HashSet<Id>
where
    Id: Eq + Hash + Clone + Debug,
    Tag: Eq + Hash + Clone,
{
    index
        .entries()
        .filter(|entry| condition.test(&|tag: &Tag| entry.tags.contains(tag)))
        .map(|entry| entry.id.clone())
        .collect()
}

/// A small model-like corpus: a handful of upscalers with scale, author and
/// color tags, texts weighted like a real catalogue would weight them.
pub fn model_corpus() -> Vec<CorpusEntry<String, String>> {
    let model = |id: &str, tags: &[&str], name: &str, author: &str, description: &str| {
        CorpusEntry::new(
            id.to_string(),
            tags.iter().map(|t| t.to_string()),
            [
                WeightedText::new(format!("{id}\n{name}"), 8.0),
                WeightedText::new(author, 4.0),
                WeightedText::new(description, 1.0),
            ],
        )
    };

    vec![
        model(
            "4x-animesharp",
            &["scale:4", "by:kim2091", "color:3", "anime", "general-upscaler"],
            "4x-AnimeSharp",
            "Kim2091",
            "Interpolation between 4x-UltraSharp and 4x-TextSharp-v0.5",
        ),
        model(
            "4x-ultrasharp",
            &["scale:4", "by:kim2091", "color:3", "photo", "general-upscaler"],
            "4x-UltraSharp",
            "Kim2091",
            "The best realistic upscaler for photos",
        ),
        model(
            "2x-anifilm-compact",
            &["scale:2", "by:kim2091", "color:3", "anime", "compression-removal"],
            "2x-AniFilm-Compact",
            "Kim2091",
            "Restores old anime film scans",
        ),
        model(
            "1x-mangajpeglq",
            &["scale:1", "by:joey", "color:1", "manga", "jpeg", "compression-removal"],
            "1x-MangaJPEGLQ",
            "Joey",
            "Removes heavy jpeg artifacts from grayscale manga",
        ),
        model(
            "1x-baldrickvhsfixv0-2",
            &["scale:1", "by:baldrick", "color:3", "video", "restoration"],
            "1x-BaldrickVHSFixV0-2",
            "Baldrick",
            "Cleans up VHS tape captures",
        ),
        model(
            "2x-dejpg-colorize",
            &["scale:2", "by:joey", "by:kim2091", "color:1-3", "colorize", "jpeg"],
            "2x-DeJPG-Colorize",
            "Joey, Kim2091",
            "Colorizes and de-jpegs grayscale images at 2x",
        ),
    ]
}
