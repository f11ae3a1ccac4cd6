// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for compiled conditions and the search index.
//!
//! These are debug-mode assertions of the invariants the compiler and index
//! promise. They:
//!
//! 1. Are **zero-cost in release builds** (the walks only run under `debug_assertions`)
//! 2. Provide **early failure detection** during development
//! 3. Mirror the invariants listed in `condition` and `index` exactly
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function            | Invariant                                   |
//! |------------------------------|---------------------------------------------|
//! | `check_compiled_well_formed` | AT_LEAST_TWO, NO_DUPLICATES, NO_COMPLEMENTS |
//! | `check_index_consistent`     | byTag ⊆ allIds, every entry's tags indexed  |
//!
//! NEGATION_AT_LEAVES and flattening are guaranteed by the types and need no check.

use crate::condition::{CompiledCondition, Junction, Operand};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

// ============================================================================
// COMPILED CONDITION CONTRACTS
// ============================================================================

/// Check that a compiled condition satisfies the normal-form invariants.
///
/// # Panics (debug builds only)
/// Panics if a junction has fewer than two operands, repeats a literal, or
/// holds a literal together with its complement.
#[inline]
pub fn check_compiled_well_formed<T: Eq + Hash>(condition: &CompiledCondition<T>) {
    if !cfg!(debug_assertions) {
        return;
    }
    match condition {
        CompiledCondition::Const(_) | CompiledCondition::Var(_) => {}
        CompiledCondition::And(junction) | CompiledCondition::Or(junction) => {
            check_junction_well_formed(junction);
        }
    }
}

fn check_junction_well_formed<T: Eq + Hash>(junction: &Junction<T>) {
    debug_assert!(
        junction.operands().len() >= 2,
        "Contract violation: AT_LEAST_TWO - junction has {} operands",
        junction.operands().len()
    );

    let mut positive = HashSet::new();
    let mut negative = HashSet::new();
    for operand in junction.operands() {
        match operand {
            Operand::Var(literal) => {
                let (target, opposite) = if literal.negated {
                    (&mut negative, &positive)
                } else {
                    (&mut positive, &negative)
                };
                debug_assert!(
                    !opposite.contains(&literal.value),
                    "Contract violation: NO_COMPLEMENTS - variable appears with both polarities"
                );
                let inserted = target.insert(&literal.value);
                debug_assert!(
                    inserted,
                    "Contract violation: NO_DUPLICATES - literal appears twice in one junction"
                );
            }
            Operand::Nested(nested) => check_junction_well_formed(nested),
        }
    }
}

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

/// Check that the inverted tag index agrees with the entries it was built from.
///
/// # Panics (debug builds only)
/// Panics if a posting set references an unknown id, or an entry's tag is
/// missing from the posting set for that tag.
#[inline]
pub fn check_index_consistent<'a, Id, Tag, I>(
    all_ids: &HashSet<Id>,
    by_tag: &HashMap<Tag, HashSet<Id>>,
    entries: I,
) where
    Id: Eq + Hash + 'a,
    Tag: Eq + Hash + 'a,
    I: IntoIterator<Item = (&'a Id, &'a HashSet<Tag>)>,
{
    if !cfg!(debug_assertions) {
        return;
    }
    for ids in by_tag.values() {
        debug_assert!(
            ids.iter().all(|id| all_ids.contains(id)),
            "Contract violation: posting set references an id outside allIds"
        );
    }
    for (id, tags) in entries {
        for tag in tags {
            debug_assert!(
                by_tag.get(tag).is_some_and(|ids| ids.contains(id)),
                "Contract violation: entry tag missing from the inverted index"
            );
        }
    }
}
