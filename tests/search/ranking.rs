//! Ranking determinism and ordering.

use super::common::{model_index, result_ids};
use std::cmp::Ordering;
use tagsieve::{compare_results, compile_condition, sort_results, tokenize, Condition, SearchResult};

#[test]
fn test_sorted_results_are_descending() {
    let index = model_index();
    let mut results = index.retrieve(&compile_condition(&Condition::Const(true)), &tokenize("x"));
    sort_results(&mut results);

    assert!(!results.is_empty());
    for pair in results.windows(2) {
        assert_ne!(compare_results(&pair[0], &pair[1]), Ordering::Greater);
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_ranking_is_deterministic() {
    let index = model_index();
    let everything = compile_condition(&Condition::Const(true));

    let run = || {
        let mut results = index.retrieve(&everything, &tokenize("kim2091 sharp"));
        sort_results(&mut results);
        results
    };
    let first = run();
    for _ in 0..5 {
        assert_eq!(run(), first);
    }
}

#[test]
fn test_name_match_outranks_description_match() {
    let index = model_index();
    let mut results = index.retrieve(&compile_condition(&Condition::Const(true)), &tokenize("ultrasharp"));
    sort_results(&mut results);

    // the model's own name beats a mention in another model's description
    assert_eq!(result_ids(&results), vec!["4x-ultrasharp", "4x-animesharp"]);
}

#[test]
fn test_equal_scores_tie_break_on_id() {
    let mut results = vec![
        SearchResult { id: "b".to_string(), score: 2.0 },
        SearchResult { id: "a".to_string(), score: 2.0 },
        SearchResult { id: "c".to_string(), score: 3.0 },
    ];
    sort_results(&mut results);
    assert_eq!(result_ids(&results), vec!["c", "a", "b"]);
}
