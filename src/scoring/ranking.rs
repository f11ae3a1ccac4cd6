// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! `SearchIndex::retrieve` hands back results in no particular order. For
//! display they are sorted by score, highest first, with the id as a
//! tiebreaker so equal scores always come out in the same order.

use crate::types::SearchResult;
use std::cmp::Ordering;

/// Compare two search results for ranking.
///
/// Sort order:
/// 1. **Score** - descending (higher wins)
/// 2. **Id** - ascending, for determinism
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use tagsieve::{scoring::ranking::compare_results, SearchResult};
///
/// let high = SearchResult { id: "b", score: 10.0 };
/// let low = SearchResult { id: "a", score: 2.0 };
/// assert_eq!(compare_results(&high, &low), Ordering::Less);
/// ```
pub fn compare_results<Id: Ord>(a: &SearchResult<Id>, b: &SearchResult<Id>) -> Ordering {
    match b.score.partial_cmp(&a.score) {
        Some(ord) if ord != Ordering::Equal => ord,
        // Final tie-breaker: id for absolute determinism
        _ => a.id.cmp(&b.id),
    }
}

/// Sort `results` best first. See [`compare_results`].
pub fn sort_results<Id: Ord>(results: &mut [SearchResult<Id>]) {
    results.sort_by(compare_results);
}
