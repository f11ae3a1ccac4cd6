// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The condition compiler.
//!
//! Selection formulas are rebuilt on every UI interaction and evaluated against
//! every corpus entry, so simplification happens once, up front. The output
//! shape (flat, de-duplicated, negation at the leaves) is what lets the index
//! answer most conditions with set algebra instead of per-entry evaluation.

use super::{CompiledCondition, Condition, Junction, Literal, Operand, Operator};
use crate::contracts::check_compiled_well_formed;
use std::collections::HashSet;
use std::hash::Hash;

/// Optimize a condition into its normalized compiled form.
///
/// Total over all inputs. Rules, applied bottom-up:
///
/// - `Not(c)` compiles `c` and negates it by De Morgan.
/// - An empty `And`/`Or` is its neutral element (`true`/`false`); a single
///   item compiles to that item.
/// - Neutral constants among the items are dropped; an absorbing constant
///   collapses the whole junction.
/// - Items with the same operator are spliced in (flattening).
/// - Duplicate literals are dropped; a literal next to its complement
///   collapses the junction to the absorbing element.
/// - A junction left with zero or one operand collapses accordingly.
pub fn compile_condition<T: Clone + Eq + Hash>(condition: &Condition<T>) -> CompiledCondition<T> {
    let compiled = compile(condition);
    check_compiled_well_formed(&compiled);
    compiled
}

/// Evaluate a compiled condition, resolving each variable with `resolve`.
pub fn test_condition<T, F: Fn(&T) -> bool>(condition: &CompiledCondition<T>, resolve: F) -> bool {
    condition.test(&resolve)
}

fn compile<T: Clone + Eq + Hash>(condition: &Condition<T>) -> CompiledCondition<T> {
    match condition {
        Condition::Const(value) => CompiledCondition::Const(*value),
        Condition::Var(value) => CompiledCondition::Var(Literal::positive(value.clone())),
        Condition::Not(item) => compile(item).negate(),
        Condition::And(items) => compile_junction(Operator::And, items),
        Condition::Or(items) => compile_junction(Operator::Or, items),
    }
}

fn compile_junction<T: Clone + Eq + Hash>(op: Operator, items: &[Condition<T>]) -> CompiledCondition<T> {
    let neutral = op.neutral();
    match items {
        [] => return CompiledCondition::Const(neutral),
        [single] => return compile(single),
        _ => {}
    }

    let mut operands = match collect_operands(op, items) {
        Ok(operands) => operands,
        Err(Collapse(value)) => return CompiledCondition::Const(value),
    };

    match operands.len() {
        0 => CompiledCondition::Const(neutral),
        1 => match operands.pop() {
            Some(Operand::Var(literal)) => CompiledCondition::Var(literal),
            Some(Operand::Nested(junction)) => op.other().wrap(junction),
            None => CompiledCondition::Const(neutral),
        },
        _ => op.wrap(Junction::new(operands)),
    }
}

/// The whole junction reduces to this constant.
struct Collapse(bool);

/// Compile the items of an `op` junction and gather its operands.
fn collect_operands<T: Clone + Eq + Hash>(
    op: Operator,
    items: &[Condition<T>],
) -> Result<Vec<Operand<T>>, Collapse> {
    let neutral = op.neutral();
    let mut operands = Vec::with_capacity(items.len());
    let mut seen = SeenLiterals::default();

    for item in items {
        match (op, compile(item)) {
            (_, CompiledCondition::Const(value)) => {
                // a neutral constant contributes nothing, anything else absorbs
                if value != neutral {
                    return Err(Collapse(value));
                }
            }
            (_, CompiledCondition::Var(literal)) => {
                seen.push(literal, &mut operands, !neutral)?;
            }
            (Operator::And, CompiledCondition::And(junction))
            | (Operator::Or, CompiledCondition::Or(junction)) => {
                for operand in junction.into_operands() {
                    match operand {
                        Operand::Var(literal) => seen.push(literal, &mut operands, !neutral)?,
                        nested => operands.push(nested),
                    }
                }
            }
            (_, CompiledCondition::And(junction) | CompiledCondition::Or(junction)) => {
                operands.push(Operand::Nested(junction));
            }
        }
    }

    Ok(operands)
}

/// Variables already present in the junction being built, by polarity.
struct SeenLiterals<T> {
    positive: HashSet<T>,
    negative: HashSet<T>,
}

impl<T> Default for SeenLiterals<T> {
    fn default() -> Self {
        Self {
            positive: HashSet::new(),
            negative: HashSet::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> SeenLiterals<T> {
    /// Add `literal` unless it's a duplicate. `a ∧ ¬a` and `a ∨ ¬a` collapse to `absorbing`.
    fn push(
        &mut self,
        literal: Literal<T>,
        operands: &mut Vec<Operand<T>>,
        absorbing: bool,
    ) -> Result<(), Collapse> {
        let (target, opposite) = if literal.negated {
            (&mut self.negative, &self.positive)
        } else {
            (&mut self.positive, &self.negative)
        };
        if opposite.contains(&literal.value) {
            return Err(Collapse(absorbing));
        }
        if target.insert(literal.value.clone()) {
            operands.push(Operand::Var(literal));
        }
        Ok(())
    }
}
