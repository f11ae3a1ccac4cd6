//! Shared test utilities and fixtures.

#![allow(dead_code)]

use proptest::prelude::*;
use std::collections::HashSet;
use tagsieve::{Condition, CorpusEntry, SearchIndex, SearchResult, WeightedText};
use tracing_subscriber::EnvFilter;

// Re-export canonical test utilities from tagsieve::testing
#[allow(unused_imports)]
pub use tagsieve::testing::{entry, filter_by_evaluation, model_corpus, sorted_ids};

/// Number of distinct tags in generated corpora and conditions.
pub const TAG_COUNT: u8 = 8;

/// Install a test-friendly subscriber once. `RUST_LOG=tagsieve=trace` shows
/// the index's dispatch decisions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The model fixture corpus as an index.
pub fn model_index() -> SearchIndex<String, String> {
    SearchIndex::new(model_corpus()).expect("fixture ids are unique")
}

pub fn var(tag: &str) -> Condition<String> {
    Condition::var(tag.to_string())
}

/// Result ids in their current order.
pub fn result_ids(results: &[SearchResult<String>]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Random nested conditions over `TAG_COUNT` tags, constants included.
pub fn condition_strategy() -> impl Strategy<Value = Condition<u8>> {
    let leaf = prop_oneof![
        1 => any::<bool>().prop_map(Condition::Const),
        6 => (0..TAG_COUNT).prop_map(Condition::Var),
    ];
    leaf.prop_recursive(5, 64, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Condition::And),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Condition::Or),
            inner.prop_map(Condition::not),
        ]
    })
}

/// A truth assignment for the `TAG_COUNT` variables, as a bitmask.
pub fn assignment_strategy() -> impl Strategy<Value = u8> {
    any::<u8>()
}

pub fn assigned(mask: u8) -> impl Fn(&u8) -> bool {
    move |tag: &u8| mask & (1 << tag) != 0
}

/// Corpora of up to 24 entries with random tag sets. Every entry carries one
/// text so an empty query keeps it.
pub fn corpus_strategy() -> impl Strategy<Value = Vec<CorpusEntry<u32, u8>>> {
    prop::collection::vec(prop::collection::hash_set(0..TAG_COUNT, 0..5), 0..24).prop_map(
        |tag_sets| {
            tag_sets
                .into_iter()
                .enumerate()
                .map(|(id, tags)| {
                    CorpusEntry::new(id as u32, tags, [WeightedText::new("entry", 1.0)])
                })
                .collect()
        },
    )
}

/// Brute force over the input condition, without compiling it.
pub fn evaluate_naively(
    index: &SearchIndex<u32, u8>,
    condition: &Condition<u8>,
) -> HashSet<u32> {
    index
        .entries()
        .filter(|entry| condition.evaluate(&|tag: &u8| entry.tags.contains(tag)))
        .map(|entry| entry.id)
        .collect()
}
