// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tag filtering and fuzzy ranking over an in-memory corpus.
//!
//! A user narrows a catalogue with an arbitrary boolean combination of tags,
//! then ranks what's left by a free-text query. Tag conditions are compiled
//! into a flat normal form and answered with set algebra over an inverted
//! index; the query is tokenized once and scored against every survivor's
//! weighted texts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌──────────────┐
//! │ selection.rs │────▶│  condition/    │────▶│   index.rs   │
//! │ (tag picker  │     │ (compile, test,│     │ (with_tags,  │
//! │  → Condition)│     │  De Morgan)    │     │  retrieve)   │
//! └──────────────┘     └────────────────┘     └──────────────┘
//!                                                │       │
//! ┌──────────────┐     ┌────────────────┐        │       ▼
//! │ tokenizer.rs │────▶│   scoring/     │◀───────┘  ┌──────────┐
//! │ (tokenize,   │     │ (ScoreFn,      │           │ sets.rs  │
//! │  is_boundary)│     │  ranking)      │           │ (∩ ∪ \)  │
//! └──────────────┘     └────────────────┘           └──────────┘
//! ```
//!
//! `corpus/` turns model records into [`CorpusEntry`] values; `contracts.rs`
//! re-checks the compiled-condition and index invariants in debug builds.
//!
//! # Usage
//!
//! ```
//! use tagsieve::{compile_condition, sort_results, tokenize, Condition, CorpusEntry, SearchIndex, WeightedText};
//!
//! let index = SearchIndex::new([
//!     CorpusEntry::new("e1", ["scale:4"], [WeightedText::new("a 4x realistic model", 8.0)]),
//!     CorpusEntry::new("e2", ["scale:2"], [WeightedText::new("a 2x anime model", 8.0)]),
//! ])?;
//!
//! let condition = compile_condition(&Condition::var("scale:4"));
//! let mut results = index.retrieve(&condition, &tokenize("realistic"));
//! sort_results(&mut results);
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, "e1");
//! # Ok::<(), tagsieve::IndexError>(())
//! ```

// Module declarations
pub mod condition;
pub mod contracts;
pub mod corpus;
pub mod error;
pub mod index;
pub mod scoring;
pub mod selection;
pub mod sets;
pub mod testing;
pub mod tokenizer;
pub mod types;

pub use condition::{
    compile_condition, test_condition, CompiledCondition, Condition, Junction, Literal, Operand,
    Operator,
};
pub use corpus::{
    derive_tags, license_tags, model_entry, model_search_index, platform_tags, ModelRecord,
    OneOrMany, Platform, Resource, ResourceKind,
};
pub use error::{IndexError, Result};
pub use index::SearchIndex;
pub use scoring::ranking::{compare_results, sort_results};
pub use scoring::{create_score_fn, BaseScore, Combine, ScoreFn, ScoringOptions, DEFAULT_OPTIONS};
pub use selection::{tag_condition, SelectionState, TagCategory, TagSelection};
pub use tokenizer::{is_boundary, tokenize};
pub use types::{CorpusEntry, SearchResult, WeightedText};
