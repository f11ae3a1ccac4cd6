// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind text relevance.
//!
//! For a text `t` and query tokens `q₁ … qₙ`:
//!
//! ```text
//! match(qᵢ, at)  = base(qᵢ) + (is_boundary(t, at) ? boundary_bonus : 0)
//! token(qᵢ)      = combine_match_scores(match(qᵢ, at) for each occurrence)
//! score(t)       = combine_token_scores(token(q₁) … token(qₙ)) × |{ i : token(qᵢ) > 0 }|
//! ```
//!
//! Occurrences are literal, non-overlapping, found left to right. Both sides
//! are expected to be lowercase already (`WeightedText` and `tokenize` see to
//! that).
//!
//! # Invariants
//!
//! 1. **EMPTY_QUERY_NEUTRAL**: no tokens means every text scores exactly `1.0`.
//! 2. **NO_MATCH_ZERO**: a text containing none of the tokens scores `0.0`.
//! 3. **BREADTH**: with default options, matching both of two tokens scores
//!    strictly higher than matching one of them, positions otherwise equal.

use crate::tokenizer::is_boundary;
use serde::{Deserialize, Serialize};

// =============================================================================
// OPTIONS
// =============================================================================

/// Bonus for an occurrence that starts at a word boundary.
pub const DEFAULT_BOUNDARY_BONUS: f64 = 4.0;

/// The per-occurrence base score of a token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseScore {
    /// `sqrt(chars in token)`: longer tokens are more specific, sub-linearly.
    SqrtLength,
    /// The same score for every token.
    Fixed(f64),
    /// A caller-supplied curve, evaluated once per token. Has no serialized
    /// form: serializing it fails and configs can't name it.
    #[serde(skip)]
    Custom(fn(&str) -> f64),
}

impl BaseScore {
    pub fn for_token(self, token: &str) -> f64 {
        match self {
            BaseScore::SqrtLength => (token.chars().count() as f64).sqrt(),
            BaseScore::Fixed(score) => score,
            BaseScore::Custom(curve) => curve(token),
        }
    }
}

impl PartialEq for BaseScore {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BaseScore::SqrtLength, BaseScore::SqrtLength) => true,
            (BaseScore::Fixed(a), BaseScore::Fixed(b)) => a == b,
            // Same function item, same address.
            (BaseScore::Custom(a), BaseScore::Custom(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

/// How a list of scores is folded into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combine {
    Sum,
    Max,
}

impl Combine {
    /// Fold `scores`. Both combiners give `0.0` for no scores.
    pub fn apply(self, scores: impl IntoIterator<Item = f64>) -> f64 {
        match self {
            Combine::Sum => scores.into_iter().sum(),
            Combine::Max => scores.into_iter().fold(0.0, f64::max),
        }
    }
}

/// Tuning knobs for [`create_score_fn`].
///
/// Deserializes from a partial object; missing fields take their defaults:
///
/// ```
/// use tagsieve::{BaseScore, ScoringOptions};
///
/// let options: ScoringOptions = serde_json::from_str(r#"{ "boundary_bonus": 2.0 }"#).unwrap();
/// assert_eq!(options.boundary_bonus, 2.0);
/// assert_eq!(options.base_score, BaseScore::SqrtLength);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    pub base_score: BaseScore,
    pub boundary_bonus: f64,
    /// Folds the scores of one token's occurrences.
    pub combine_match_scores: Combine,
    /// Folds the per-token scores.
    pub combine_token_scores: Combine,
}

pub const DEFAULT_OPTIONS: ScoringOptions = ScoringOptions {
    base_score: BaseScore::SqrtLength,
    boundary_bonus: DEFAULT_BOUNDARY_BONUS,
    combine_match_scores: Combine::Sum,
    combine_token_scores: Combine::Sum,
};

impl Default for ScoringOptions {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}

// =============================================================================
// SCORE FUNCTION
// =============================================================================

/// A scorer built once per query and applied to many texts.
#[derive(Debug, Clone)]
pub struct ScoreFn {
    /// Each token with its precomputed base score.
    tokens: Vec<(String, f64)>,
    options: ScoringOptions,
}

/// Build a scorer for `tokens`.
pub fn create_score_fn(tokens: &[String], options: &ScoringOptions) -> ScoreFn {
    let tokens = tokens
        .iter()
        .map(|token| (token.clone(), options.base_score.for_token(token)))
        .collect();
    ScoreFn {
        tokens,
        options: *options,
    }
}

impl ScoreFn {
    /// Relevance of `text`. Zero means no match; an empty query scores `1.0`.
    pub fn score(&self, text: &str) -> f64 {
        if self.tokens.is_empty() {
            return 1.0;
        }

        let options = &self.options;
        let mut matched = 0usize;
        let token_scores: Vec<f64> = self
            .tokens
            .iter()
            .map(|(token, base)| {
                let score = options.combine_match_scores.apply(
                    find_matches(text, token).map(|at| {
                        if is_boundary(text, at) {
                            base + options.boundary_bonus
                        } else {
                            *base
                        }
                    }),
                );
                if score > 0.0 {
                    matched += 1;
                }
                score
            })
            .collect();

        options.combine_token_scores.apply(token_scores) * matched as f64
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|(token, _)| token.as_str())
    }
}

/// Byte offsets of the non-overlapping occurrences of `needle`, left to right.
/// An empty needle occurs nowhere.
fn find_matches<'a>(text: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    let needle = (!needle.is_empty()).then_some(needle);
    needle
        .into_iter()
        .flat_map(move |needle| text.match_indices(needle).map(|(at, _)| at))
}
