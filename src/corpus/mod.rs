// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Model records as corpus entries.
//!
//! The catalogue this engine was built for holds upscaling models. Each model
//! becomes one [`CorpusEntry`]: derived tags for filtering, and four weighted
//! texts for the query. Name and id matter most, then authors, then the
//! technical bits and the description.
//!
//! | Text                              | Weight |
//! |-----------------------------------|--------|
//! | id, name                          | 8      |
//! | authors                           | 4      |
//! | architecture, `<scale>x`, dataset | 1      |
//! | description                       | 1      |

mod license;
mod platform;

pub use license::{
    known_license, license_tags, parse_license, LicenseProperties, Permission, Requirement,
};
pub use platform::{compatible_platforms, platform_tags, Platform, Resource, ResourceKind};

use crate::error::Result;
use crate::index::SearchIndex;
use crate::types::{CorpusEntry, WeightedText};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const NAME_WEIGHT: f64 = 8.0;
pub const AUTHOR_WEIGHT: f64 = 4.0;
pub const TECHNICAL_WEIGHT: f64 = 1.0;
pub const DESCRIPTION_WEIGHT: f64 = 1.0;

/// A value that may be given as one item or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

/// The fields of a model record that feed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub name: String,
    #[serde(default)]
    pub author: OneOrMany<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub architecture: String,
    pub scale: u32,
    pub input_channels: u32,
    pub output_channels: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// SPDX license expression.
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl ModelRecord {
    pub fn authors(&self) -> &[String] {
        self.author.as_slice()
    }
}

/// Tags a model is filterable by, sorted.
///
/// The record's own tags, plus:
/// - `by:<author>` for each author
/// - `scale:<n>`
/// - `color:<in>` when input and output channels agree, `color:<in>-<out>` otherwise
/// - `license:*`, see [`license_tags`]
/// - `platform:*`, see [`platform_tags`]
pub fn derive_tags(model: &ModelRecord) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = model.tags.iter().cloned().collect();
    tags.extend(model.authors().iter().map(|author| format!("by:{author}")));
    tags.insert(format!("scale:{}", model.scale));
    if model.input_channels == model.output_channels {
        tags.insert(format!("color:{}", model.input_channels));
    } else {
        tags.insert(format!("color:{}-{}", model.input_channels, model.output_channels));
    }
    tags.extend(license_tags(model.license.as_deref()).into_iter().map(String::from));
    tags.extend(platform_tags(&model.architecture, &model.resources));
    tags
}

/// Join the non-empty parts with newlines. `WeightedText::new` lowercases.
fn joined<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The corpus entry for model `id`.
pub fn model_entry(id: &str, model: &ModelRecord) -> CorpusEntry<String, String> {
    let scale = format!("{}x", model.scale);
    let technical = joined([
        model.architecture.as_str(),
        scale.as_str(),
        model.dataset.as_deref().unwrap_or_default(),
    ]);

    CorpusEntry::new(
        id.to_string(),
        derive_tags(model),
        [
            WeightedText::new(joined([id, model.name.as_str()]), NAME_WEIGHT),
            WeightedText::new(joined(model.authors().iter().map(String::as_str)), AUTHOR_WEIGHT),
            WeightedText::new(technical, TECHNICAL_WEIGHT),
            WeightedText::new(&model.description, DESCRIPTION_WEIGHT),
        ],
    )
}

/// Build a search index over `(id, model)` pairs.
///
/// # Errors
///
/// [`crate::IndexError::DuplicateId`] if an id repeats.
pub fn model_search_index<'a, I, S>(models: I) -> Result<SearchIndex<String, String>>
where
    I: IntoIterator<Item = (S, &'a ModelRecord)>,
    S: AsRef<str>,
{
    SearchIndex::new(
        models
            .into_iter()
            .map(|(id, model)| model_entry(id.as_ref(), model)),
    )
}
