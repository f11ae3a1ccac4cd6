// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning a tag picker's state into a [`Condition`].
//!
//! Tags are grouped into categories (scale, color, author, …). Within one
//! category the required tags are alternatives: picking `scale:2` and
//! `scale:4` means "either". Across categories everything must hold. A
//! forbidden tag excludes its entries no matter what else is picked.

use crate::condition::Condition;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// What the user asked for about one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    Required,
    Forbidden,
}

/// Tags the user has picked. Tags that aren't in the map are unconstrained.
pub type TagSelection<Tag> = HashMap<Tag, SelectionState>;

/// A named group of tags, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCategory<Tag> {
    pub id: String,
    pub tags: Vec<Tag>,
}

/// Build the condition a selection stands for.
///
/// Per category with at least one picked tag:
///
/// ```text
/// (required₁ ∨ required₂ ∨ …  or true if none) ∧ ¬(forbidden₁ ∨ forbidden₂ ∨ …)
/// ```
///
/// The parts are joined with `∧`. An empty selection, or one that touches no
/// listed category, is `true`. Picked tags outside every category are ignored.
pub fn tag_condition<'a, Tag>(
    selection: &TagSelection<Tag>,
    categories: impl IntoIterator<Item = &'a TagCategory<Tag>>,
) -> Condition<Tag>
where
    Tag: Clone + Eq + Hash + 'a,
{
    if selection.is_empty() {
        return Condition::Const(true);
    }

    let mut parts = Vec::new();
    for category in categories {
        let mut required = Vec::new();
        let mut forbidden = Vec::new();
        for tag in &category.tags {
            match selection.get(tag) {
                Some(SelectionState::Required) => required.push(Condition::var(tag.clone())),
                Some(SelectionState::Forbidden) => forbidden.push(Condition::var(tag.clone())),
                None => {}
            }
        }

        if required.is_empty() && forbidden.is_empty() {
            continue;
        }
        let any_required = if required.is_empty() {
            Condition::Const(true)
        } else {
            Condition::or(required)
        };
        parts.push(Condition::and([any_required, Condition::not(Condition::or(forbidden))]));
    }

    if parts.is_empty() {
        Condition::Const(true)
    } else {
        Condition::and(parts)
    }
}
