// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search index: an inverted tag index plus the corpus it was built from.
//!
//! Tag conditions are answered with set algebra over posting sets wherever
//! the compiled shape allows it:
//!
//! ```text
//! Const(b)       b ? allIds : ∅
//! Var(t)         byTag[t]
//! Var(¬t)        allIds \ byTag[t]
//! And(..)        (∩ positive  or allIds) \ (∪ negative)   then filter by nested Or
//! Or(..)         (∪ positive) ∪ (allIds \ ∩ negative) ∪ (∪ nested And)
//! ```
//!
//! A nested `Or` inside an `And` can't be distributed over the conjunction
//! without blowing up, so those entries are narrowed by the set algebra first
//! and then checked one by one against the nested junctions.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **UNIQUE_IDS**: no two entries share an id. `SearchIndex::new` fails otherwise.
//!    It also fails on a text weight that isn't finite and positive, so every
//!    result keeps a positive score.
//! 2. **POSTINGS_SOUND**: every id in `by_tag` is in `all_ids`.
//! 3. **POSTINGS_COMPLETE**: every tag of every entry lists that entry.
//! 4. **IMMUTABLE**: nothing mutates the index after construction, so any
//!    number of queries may share one instance across threads.
//! 5. **AGREEMENT**: `with_tags(c)` is exactly the set of ids whose tags
//!    satisfy `c` under `test_condition`.

use crate::condition::{CompiledCondition, Junction, Literal, Operator};
use crate::contracts::check_index_consistent;
use crate::error::{IndexError, Result};
use crate::scoring::{create_score_fn, ScoringOptions, DEFAULT_OPTIONS};
use crate::sets::{intersect, union, without, IdSet};
use crate::types::{CorpusEntry, SearchResult};
use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An immutable, queryable snapshot of a corpus.
#[derive(Debug, Clone)]
pub struct SearchIndex<Id, Tag> {
    entries: HashMap<Id, CorpusEntry<Id, Tag>>,
    all_ids: HashSet<Id>,
    by_tag: HashMap<Tag, HashSet<Id>>,
}

impl<Id, Tag> SearchIndex<Id, Tag>
where
    Id: Eq + Hash + Clone + Debug,
    Tag: Eq + Hash + Clone,
{
    /// Build the index from a corpus snapshot.
    ///
    /// # Errors
    ///
    /// [`IndexError::DuplicateId`] if two entries share an id, and
    /// [`IndexError::InvalidWeight`] if a text weight isn't finite and
    /// positive. Entries are never dropped silently.
    pub fn new(corpus: impl IntoIterator<Item = CorpusEntry<Id, Tag>>) -> Result<Self> {
        let mut entries: HashMap<Id, CorpusEntry<Id, Tag>> = HashMap::new();
        let mut by_tag: HashMap<Tag, HashSet<Id>> = HashMap::new();

        for entry in corpus {
            if let Some(text) = entry
                .texts
                .iter()
                .find(|text| !(text.weight.is_finite() && text.weight > 0.0))
            {
                return Err(IndexError::InvalidWeight {
                    id: format!("{:?}", entry.id),
                    weight: text.weight,
                });
            }
            match entries.entry(entry.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(IndexError::DuplicateId {
                        id: format!("{:?}", entry.id),
                    });
                }
                Entry::Vacant(slot) => {
                    for tag in &entry.tags {
                        by_tag.entry(tag.clone()).or_default().insert(entry.id.clone());
                    }
                    slot.insert(entry);
                }
            }
        }

        let all_ids: HashSet<Id> = entries.keys().cloned().collect();
        check_index_consistent(
            &all_ids,
            &by_tag,
            entries.iter().map(|(id, entry)| (id, &entry.tags)),
        );

        debug!(
            target: "tagsieve::index",
            entries = entries.len(),
            tags = by_tag.len(),
            "built search index"
        );

        Ok(Self {
            entries,
            all_ids,
            by_tag,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &Id) -> Option<&CorpusEntry<Id, Tag>> {
        self.entries.get(id)
    }

    /// All entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &CorpusEntry<Id, Tag>> {
        self.entries.values()
    }

    pub fn all_ids(&self) -> &HashSet<Id> {
        &self.all_ids
    }

    /// The posting set for `tag`, or `None` if no entry carries it.
    pub fn ids_with_tag(&self, tag: &Tag) -> Option<&HashSet<Id>> {
        self.by_tag.get(tag)
    }

    // =========================================================================
    // TAG FILTERING
    // =========================================================================

    /// Ids of all entries whose tags satisfy `condition`.
    ///
    /// Iteration order of the returned set is unspecified. The set may borrow
    /// from the index (a bare positive tag, `true`) or be freshly built.
    pub fn with_tags(&self, condition: &CompiledCondition<Tag>) -> IdSet<'_, Id> {
        match condition {
            CompiledCondition::Const(true) => Cow::Borrowed(&self.all_ids),
            CompiledCondition::Const(false) => Cow::Owned(HashSet::new()),
            CompiledCondition::Var(literal) => self.with_literal(literal),
            CompiledCondition::And(junction) => self.with_junction(Operator::And, junction),
            CompiledCondition::Or(junction) => self.with_junction(Operator::Or, junction),
        }
    }

    fn posting(&self, tag: &Tag) -> IdSet<'_, Id> {
        match self.by_tag.get(tag) {
            Some(ids) => Cow::Borrowed(ids),
            None => Cow::Owned(HashSet::new()),
        }
    }

    fn with_literal(&self, literal: &Literal<Tag>) -> IdSet<'_, Id> {
        let ids = self.posting(&literal.value);
        if literal.negated {
            without(Cow::Borrowed(&self.all_ids), &ids)
        } else {
            ids
        }
    }

    fn with_junction(&self, op: Operator, junction: &Junction<Tag>) -> IdSet<'_, Id> {
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for literal in junction.literals() {
            let ids = self.posting(&literal.value);
            if literal.negated {
                negative.push(ids);
            } else {
                positive.push(ids);
            }
        }

        match op {
            Operator::And => {
                let required = intersect(positive).unwrap_or(Cow::Borrowed(&self.all_ids));
                let selection = without(required, &union(negative));

                let nested: Vec<&Junction<Tag>> = junction.nested().collect();
                if nested.is_empty() || selection.is_empty() {
                    return selection;
                }

                trace!(
                    target: "tagsieve::index",
                    candidates = selection.len(),
                    nested = nested.len(),
                    "filtering and-junction per entry"
                );
                let filtered = selection
                    .iter()
                    .filter(|id| {
                        self.entries.get(*id).is_some_and(|entry| {
                            let has_tag = |tag: &Tag| entry.tags.contains(tag);
                            nested.iter().all(|or| or.test(Operator::Or, &has_tag))
                        })
                    })
                    .cloned()
                    .collect();
                Cow::Owned(filtered)
            }
            Operator::Or => {
                // ¬a ∨ ¬b ∨ … = allIds \ (a ∩ b ∩ …)
                if let Some(common) = intersect(negative) {
                    if common.is_empty() {
                        trace!(target: "tagsieve::index", "negated or-literals cover every entry");
                        return Cow::Borrowed(&self.all_ids);
                    }
                    positive.push(without(Cow::Borrowed(&self.all_ids), &common));
                }

                for and in junction.nested() {
                    positive.push(self.with_junction(Operator::And, and));
                }
                union(positive)
            }
        }
    }

    // =========================================================================
    // RETRIEVAL
    // =========================================================================

    /// Filter by `condition`, then score every survivor against `query_tokens`
    /// with the default scoring options.
    ///
    /// Only entries with a strictly positive score are returned, in no
    /// particular order. Use [`crate::scoring::ranking::sort_results`] to rank them.
    pub fn retrieve(
        &self,
        condition: &CompiledCondition<Tag>,
        query_tokens: &[String],
    ) -> Vec<SearchResult<Id>>
    where
        Id: Send + Sync,
        Tag: Sync,
    {
        self.retrieve_with(condition, query_tokens, &DEFAULT_OPTIONS)
    }

    /// [`retrieve`](Self::retrieve) with explicit scoring options.
    pub fn retrieve_with(
        &self,
        condition: &CompiledCondition<Tag>,
        query_tokens: &[String],
        options: &ScoringOptions,
    ) -> Vec<SearchResult<Id>>
    where
        Id: Send + Sync,
        Tag: Sync,
    {
        let selection = self.with_tags(condition);
        let candidates: &HashSet<Id> = &selection;
        let score_fn = create_score_fn(query_tokens, options);

        let score_entry = |id: &Id| -> Option<SearchResult<Id>> {
            let entry = self.entries.get(id)?;
            let score: f64 = entry
                .texts
                .iter()
                .map(|text| score_fn.score(&text.text) * text.weight)
                .sum();
            (score > 0.0).then(|| SearchResult {
                id: id.clone(),
                score,
            })
        };

        #[cfg(feature = "parallel")]
        let results: Vec<SearchResult<Id>> = candidates.par_iter().filter_map(score_entry).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<SearchResult<Id>> = candidates.iter().filter_map(score_entry).collect();

        debug!(
            target: "tagsieve::index",
            tokens = query_tokens.len(),
            candidates = candidates.len(),
            results = results.len(),
            "retrieved"
        );
        results
    }
}
