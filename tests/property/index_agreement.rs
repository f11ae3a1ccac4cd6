//! Differential tests: set-algebra tag filtering vs. per-entry evaluation.
//!
//! `SearchIndex::with_tags` only falls back to per-entry testing for the
//! nested junctions it can't express as set operations. These properties
//! generate arbitrarily nested conditions to check that the set algebra and
//! the fallback always agree with evaluating every entry one by one.

use super::common::{condition_strategy, corpus_strategy, evaluate_naively, filter_by_evaluation};
use proptest::prelude::*;
use std::collections::HashSet;
use tagsieve::{compile_condition, SearchIndex};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: with_tags(C) = { id : test_condition(C, entry(id).tags) }.
    #[test]
    fn prop_with_tags_matches_evaluation(
        corpus in corpus_strategy(),
        condition in condition_strategy(),
    ) {
        let index = SearchIndex::new(corpus).unwrap();
        let compiled = compile_condition(&condition);

        let fast: HashSet<u32> = index.with_tags(&compiled).into_owned();
        prop_assert_eq!(&fast, &filter_by_evaluation(&index, &compiled), "condition {}", compiled);
        prop_assert_eq!(&fast, &evaluate_naively(&index, &condition), "condition {}", condition);
    }

    /// Property: the result is always a subset of the corpus.
    #[test]
    fn prop_with_tags_within_corpus(
        corpus in corpus_strategy(),
        condition in condition_strategy(),
    ) {
        let index = SearchIndex::new(corpus).unwrap();
        let ids = index.with_tags(&compile_condition(&condition));
        prop_assert!(ids.is_subset(index.all_ids()));
    }

    /// Property: a condition and its negation partition the corpus.
    #[test]
    fn prop_negation_is_complement(
        corpus in corpus_strategy(),
        condition in condition_strategy(),
    ) {
        let index = SearchIndex::new(corpus).unwrap();
        let compiled = compile_condition(&condition);
        let yes = index.with_tags(&compiled).into_owned();
        let no = index.with_tags(&!compiled).into_owned();

        prop_assert!(yes.is_disjoint(&no));
        prop_assert_eq!(yes.len() + no.len(), index.len());
    }

    /// Property: with an empty query, retrieve keeps exactly the selection.
    #[test]
    fn prop_empty_query_retrieves_selection(
        corpus in corpus_strategy(),
        condition in condition_strategy(),
    ) {
        let index = SearchIndex::new(corpus).unwrap();
        let compiled = compile_condition(&condition);
        let selection = index.with_tags(&compiled).into_owned();

        let results = index.retrieve(&compiled, &[]);
        let retrieved: HashSet<u32> = results.iter().map(|r| r.id).collect();
        prop_assert_eq!(retrieved, selection);
        prop_assert!(results.iter().all(|r| r.score > 0.0));
    }
}
