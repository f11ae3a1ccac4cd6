//! End-to-end: build an index, filter by tags, score by query.

use super::common::{init_tracing, model_index, result_ids, var};
use tagsieve::{
    compile_condition, sort_results, tokenize, Condition, CorpusEntry, IndexError, SearchIndex,
    WeightedText,
};

fn two_models() -> SearchIndex<&'static str, &'static str> {
    SearchIndex::new([
        CorpusEntry::new("e1", ["scale:4"], [WeightedText::new("a 4x realistic model", 8.0)]),
        CorpusEntry::new("e2", ["scale:2"], [WeightedText::new("a 2x anime model", 8.0)]),
    ])
    .unwrap()
}

#[test]
fn test_filter_then_score() {
    init_tracing();
    let index = two_models();
    let condition = compile_condition(&Condition::var("scale:4"));

    let results = index.retrieve(&condition, &tokenize("realistic"));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "e1");
    assert!(results[0].score > 0.0);
}

#[test]
fn test_absent_tag_retrieves_nothing() {
    let index = two_models();
    let condition = compile_condition(&Condition::var("scale:8"));
    assert!(index.retrieve(&condition, &tokenize("model")).is_empty());
    assert!(index.retrieve(&condition, &[]).is_empty());
}

#[test]
fn test_query_without_condition() {
    let index = two_models();
    let everything = compile_condition(&Condition::Const(true));

    let mut results = index.retrieve(&everything, &tokenize("model"));
    sort_results(&mut results);
    let ids: Vec<&str> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["e1", "e2"]);
    // same text shape, same score
    assert_eq!(results[0].score, results[1].score);
}

#[test]
fn test_duplicate_ids_fail_construction() {
    let result = SearchIndex::new([
        CorpusEntry::new("same", ["a"], [WeightedText::new("x", 1.0)]),
        CorpusEntry::new("same", ["b"], [WeightedText::new("y", 1.0)]),
    ]);
    assert!(matches!(result, Err(IndexError::DuplicateId { .. })));
}

#[test]
fn test_deserialized_zero_weight_fails_construction() {
    let corpus: Vec<CorpusEntry<String, String>> = serde_json::from_str(
        r#"[
            { "id": "e1", "tags": ["scale:4"], "texts": [{ "text": "a 4x model", "weight": 8.0 }] },
            { "id": "e2", "tags": ["scale:2"], "texts": [{ "text": "a 2x model", "weight": 0.0 }] }
        ]"#,
    )
    .unwrap();
    let result = SearchIndex::new(corpus);
    assert_eq!(
        result.err(),
        Some(IndexError::InvalidWeight {
            id: "\"e2\"".to_string(),
            weight: 0.0
        })
    );
}

#[test]
fn test_model_corpus_query() {
    init_tracing();
    let index = model_index();
    let mut results = index.retrieve(&compile_condition(&Condition::Const(true)), &tokenize("anime"));
    sort_results(&mut results);

    let ids = result_ids(&results);
    assert_eq!(ids, vec!["4x-animesharp", "2x-anifilm-compact"]);
}

#[test]
fn test_model_corpus_nested_condition() {
    let index = model_index();
    // kim2091's models that are either anime or for photos, excluding 4x
    let condition = compile_condition(&Condition::and([
        var("by:kim2091"),
        Condition::or([var("anime"), var("photo")]),
        Condition::not(var("scale:4")),
    ]));

    let mut results = index.retrieve(&condition, &[]);
    sort_results(&mut results);
    assert_eq!(result_ids(&results), vec!["2x-anifilm-compact"]);
}

#[test]
fn test_camel_case_query_finds_model() {
    let index = model_index();
    let everything = compile_condition(&Condition::Const(true));

    let mut results = index.retrieve(&everything, &tokenize("BaldrickVHS"));
    sort_results(&mut results);
    assert_eq!(result_ids(&results).first(), Some(&"1x-baldrickvhsfixv0-2"));
}
