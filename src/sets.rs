// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Set algebra over id sets.
//!
//! Every operation takes its operands as `Cow` and never mutates them. When
//! the answer is one of the inputs unchanged (intersecting a single set,
//! subtracting an empty set) the input is handed back as-is, so borrowed
//! posting sets flow through without being copied.
//!
//! # Cost model
//!
//! - `intersect`: iterate the smallest operand, probe the rest. `O(min · k)`.
//! - `union`: clone the largest operand, insert the rest. `O(Σ others)`.
//! - `without`: iterate `a`, probe `b`. `O(|a|)`.

use std::borrow::Cow;
use std::collections::HashSet;
use std::hash::Hash;

/// A set of ids that may still be borrowed from the index.
pub type IdSet<'a, T> = Cow<'a, HashSet<T>>;

/// Intersection of all `sets`, or `None` when there are no sets to intersect.
///
/// Operands are sorted by ascending size; the smallest is iterated and each
/// element is tested against the rest. Two and three extra operands get
/// unrolled loops, beyond that a generic `all`.
pub fn intersect<'a, T: Eq + Hash + Clone>(mut sets: Vec<IdSet<'a, T>>) -> Option<IdSet<'a, T>> {
    if sets.len() <= 1 {
        return sets.pop();
    }

    sets.sort_by_key(|s| s.len());
    let rest = sets.split_off(1);
    let smallest = sets.pop()?;
    if smallest.is_empty() {
        return Some(smallest);
    }

    let mut result = HashSet::with_capacity(smallest.len());
    match rest.as_slice() {
        [a] => {
            for i in smallest.iter() {
                if a.contains(i) {
                    result.insert(i.clone());
                }
            }
        }
        [a, b] => {
            for i in smallest.iter() {
                if a.contains(i) && b.contains(i) {
                    result.insert(i.clone());
                }
            }
        }
        [a, b, c] => {
            for i in smallest.iter() {
                if a.contains(i) && b.contains(i) && c.contains(i) {
                    result.insert(i.clone());
                }
            }
        }
        _ => {
            for i in smallest.iter() {
                if rest.iter().all(|s| s.contains(i)) {
                    result.insert(i.clone());
                }
            }
        }
    }

    Some(Cow::Owned(result))
}

/// Union of all `sets`. Empty operands are skipped; the largest one is cloned
/// and the others are added to it.
pub fn union<'a, T: Eq + Hash + Clone>(sets: Vec<IdSet<'a, T>>) -> IdSet<'a, T> {
    let mut sets: Vec<IdSet<'a, T>> = sets.into_iter().filter(|s| !s.is_empty()).collect();
    if sets.len() <= 1 {
        return sets.pop().unwrap_or_default();
    }

    sets.sort_by_key(|s| std::cmp::Reverse(s.len()));
    let mut rest = sets.into_iter();
    let mut result = rest.next().map(Cow::into_owned).unwrap_or_default();
    for set in rest {
        result.extend(set.iter().cloned());
    }

    Cow::Owned(result)
}

/// Everything in `a` that is not in `b`.
pub fn without<'a, T: Eq + Hash + Clone>(a: IdSet<'a, T>, b: &HashSet<T>) -> IdSet<'a, T> {
    if a.is_empty() || b.is_empty() {
        return a;
    }

    Cow::Owned(a.iter().filter(|i| !b.contains(i)).cloned().collect())
}
