// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean formulas over tag variables, and their normalized compiled form.
//!
//! A [`Condition`] is what callers build: arbitrary nesting, double negation,
//! empty conjunctions, whatever the UI happened to produce. A
//! [`CompiledCondition`] is what the index evaluates: negation only on
//! variables, same-operator nesting flattened, constants folded, and
//! contradictions/tautologies collapsed.
//!
//! # Shape of a compiled condition
//!
//! ```text
//! CompiledCondition ::= Const(bool)
//!                     | Var(Literal)
//!                     | And(Junction)          // operands: Literal | Or-junction
//!                     | Or(Junction)           // operands: Literal | And-junction
//! ```
//!
//! Junctions alternate: an operand nested inside an `And` junction is always
//! an `Or` junction and vice versa. The nested junction therefore carries no
//! operator of its own, which makes "an `And` never directly contains an
//! `And`" true by construction rather than by convention.
//!
//! # Invariants
//!
//! 1. **NEGATION_AT_LEAVES**: only [`Literal`] carries negation.
//! 2. **AT_LEAST_TWO**: every junction has at least two operands.
//! 3. **NO_DUPLICATES**: no literal (same value, same polarity) appears twice
//!    among the operands of one junction.
//! 4. **NO_COMPLEMENTS**: a variable and its negation never share a junction.
//!
//! Junctions are only created by [`compile_condition`], and the fields are
//! private, so these hold for every value a caller can get hold of.
//! `contracts::check_compiled_well_formed` re-checks them in debug builds.

mod compile;

pub use compile::{compile_condition, test_condition};

use std::fmt;
use std::ops::Not;

// =============================================================================
// INPUT CONDITIONS
// =============================================================================

/// A user-facing boolean formula over variables of type `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition<T> {
    /// Literal `true` or `false`.
    Const(bool),
    Var(T),
    And(Vec<Condition<T>>),
    Or(Vec<Condition<T>>),
    Not(Box<Condition<T>>),
}

impl<T> Condition<T> {
    pub fn var(value: T) -> Self {
        Condition::Var(value)
    }

    pub fn and(items: impl IntoIterator<Item = Condition<T>>) -> Self {
        Condition::And(items.into_iter().collect())
    }

    pub fn or(items: impl IntoIterator<Item = Condition<T>>) -> Self {
        Condition::Or(items.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(item: Condition<T>) -> Self {
        Condition::Not(Box::new(item))
    }

    /// Naive recursive evaluation, no simplification.
    ///
    /// This is the semantic reference for the compiler: for every condition
    /// `c` and assignment `f`, `compile_condition(&c).test(&f) == c.evaluate(&f)`.
    pub fn evaluate<F: Fn(&T) -> bool>(&self, resolve: &F) -> bool {
        match self {
            Condition::Const(value) => *value,
            Condition::Var(value) => resolve(value),
            Condition::And(items) => items.iter().all(|c| c.evaluate(resolve)),
            Condition::Or(items) => items.iter().any(|c| c.evaluate(resolve)),
            Condition::Not(item) => !item.evaluate(resolve),
        }
    }
}

impl<T> From<bool> for Condition<T> {
    fn from(value: bool) -> Self {
        Condition::Const(value)
    }
}

// =============================================================================
// COMPILED CONDITIONS
// =============================================================================

/// The two junction operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    /// `true` for `And`, `false` for `Or`. The negation is the absorbing element.
    pub fn neutral(self) -> bool {
        self == Operator::And
    }

    /// The operator of junctions nested directly inside this one.
    pub fn other(self) -> Operator {
        match self {
            Operator::And => Operator::Or,
            Operator::Or => Operator::And,
        }
    }

    pub(crate) fn wrap<T>(self, junction: Junction<T>) -> CompiledCondition<T> {
        match self {
            Operator::And => CompiledCondition::And(junction),
            Operator::Or => CompiledCondition::Or(junction),
        }
    }
}

/// A variable, possibly negated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal<T> {
    pub value: T,
    pub negated: bool,
}

impl<T> Literal<T> {
    pub fn positive(value: T) -> Self {
        Self {
            value,
            negated: false,
        }
    }

    pub fn test<F: Fn(&T) -> bool>(&self, resolve: &F) -> bool {
        resolve(&self.value) != self.negated
    }
}

impl<T> Not for Literal<T> {
    type Output = Literal<T>;

    fn not(self) -> Literal<T> {
        Literal {
            value: self.value,
            negated: !self.negated,
        }
    }
}

/// One operand of a junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand<T> {
    Var(Literal<T>),
    /// A junction of the opposite operator.
    Nested(Junction<T>),
}

/// Two or more operands joined by the enclosing operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Junction<T> {
    operands: Vec<Operand<T>>,
}

impl<T> Junction<T> {
    pub(crate) fn new(operands: Vec<Operand<T>>) -> Self {
        debug_assert!(
            operands.len() >= 2,
            "Contract violation: junction with {} operands",
            operands.len()
        );
        Self { operands }
    }

    pub fn operands(&self) -> &[Operand<T>] {
        &self.operands
    }

    pub(crate) fn into_operands(self) -> Vec<Operand<T>> {
        self.operands
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal<T>> {
        self.operands.iter().filter_map(|operand| match operand {
            Operand::Var(literal) => Some(literal),
            Operand::Nested(_) => None,
        })
    }

    pub fn nested(&self) -> impl Iterator<Item = &Junction<T>> {
        self.operands.iter().filter_map(|operand| match operand {
            Operand::Var(_) => None,
            Operand::Nested(junction) => Some(junction),
        })
    }

    /// Evaluate this junction as if joined by `op`.
    pub fn test<F: Fn(&T) -> bool>(&self, op: Operator, resolve: &F) -> bool {
        let test_operand = |operand: &Operand<T>| match operand {
            Operand::Var(literal) => literal.test(resolve),
            Operand::Nested(junction) => junction.test(op.other(), resolve),
        };
        match op {
            Operator::And => self.operands.iter().all(test_operand),
            Operator::Or => self.operands.iter().any(test_operand),
        }
    }

    /// De Morgan: negate every literal. The caller flips the operator, and
    /// since nesting alternates, every nested operator flips with it.
    fn negated(self) -> Junction<T> {
        let operands = self
            .operands
            .into_iter()
            .map(|operand| match operand {
                Operand::Var(literal) => Operand::Var(!literal),
                Operand::Nested(junction) => Operand::Nested(junction.negated()),
            })
            .collect();
        Junction { operands }
    }

    fn to_condition(&self, op: Operator) -> Condition<T>
    where
        T: Clone,
    {
        let items = self.operands.iter().map(|operand| match operand {
            Operand::Var(literal) => literal_to_condition(literal),
            Operand::Nested(junction) => junction.to_condition(op.other()),
        });
        match op {
            Operator::And => Condition::and(items),
            Operator::Or => Condition::or(items),
        }
    }

    fn fmt_as(&self, op: Operator, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: fmt::Display,
    {
        f.write_str(match op {
            Operator::And => "∀(",
            Operator::Or => "∃(",
        })?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match operand {
                Operand::Var(literal) => fmt_literal(literal, f)?,
                Operand::Nested(junction) => junction.fmt_as(op.other(), f)?,
            }
        }
        f.write_str(")")
    }
}

/// A normalized condition. See the module docs for the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompiledCondition<T> {
    Const(bool),
    Var(Literal<T>),
    And(Junction<T>),
    Or(Junction<T>),
}

impl<T> CompiledCondition<T> {
    pub fn test<F: Fn(&T) -> bool>(&self, resolve: &F) -> bool {
        match self {
            CompiledCondition::Const(value) => *value,
            CompiledCondition::Var(literal) => literal.test(resolve),
            CompiledCondition::And(junction) => junction.test(Operator::And, resolve),
            CompiledCondition::Or(junction) => junction.test(Operator::Or, resolve),
        }
    }

    /// Negate by De Morgan. The result is still normalized.
    pub fn negate(self) -> CompiledCondition<T> {
        match self {
            CompiledCondition::Const(value) => CompiledCondition::Const(!value),
            CompiledCondition::Var(literal) => CompiledCondition::Var(!literal),
            CompiledCondition::And(junction) => CompiledCondition::Or(junction.negated()),
            CompiledCondition::Or(junction) => CompiledCondition::And(junction.negated()),
        }
    }

    /// Reinterpret as an input condition. Compiling the result gives back `self`.
    pub fn to_condition(&self) -> Condition<T>
    where
        T: Clone,
    {
        match self {
            CompiledCondition::Const(value) => Condition::Const(*value),
            CompiledCondition::Var(literal) => literal_to_condition(literal),
            CompiledCondition::And(junction) => junction.to_condition(Operator::And),
            CompiledCondition::Or(junction) => junction.to_condition(Operator::Or),
        }
    }
}

impl<T> Not for CompiledCondition<T> {
    type Output = CompiledCondition<T>;

    fn not(self) -> CompiledCondition<T> {
        self.negate()
    }
}

fn literal_to_condition<T: Clone>(literal: &Literal<T>) -> Condition<T> {
    let var = Condition::Var(literal.value.clone());
    if literal.negated {
        Condition::not(var)
    } else {
        var
    }
}

// =============================================================================
// DISPLAY
// =============================================================================
// T/F for constants, ¬ for negation, ∀(..) for and, ∃(..) for or.

fn fmt_const(value: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(if value { "T" } else { "F" })
}

fn fmt_literal<T: fmt::Display>(literal: &Literal<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if literal.negated {
        write!(f, "¬{}", literal.value)
    } else {
        write!(f, "{}", literal.value)
    }
}

fn fmt_items<T: fmt::Display>(
    prefix: &str,
    items: &[Condition<T>],
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.write_str(prefix)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(")")
}

impl<T: fmt::Display> fmt::Display for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Const(value) => fmt_const(*value, f),
            Condition::Var(value) => write!(f, "{value}"),
            Condition::Not(item) => write!(f, "¬{item}"),
            Condition::And(items) => fmt_items("∀(", items, f),
            Condition::Or(items) => fmt_items("∃(", items, f),
        }
    }
}

impl<T: fmt::Display> fmt::Display for CompiledCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompiledCondition::Const(value) => fmt_const(*value, f),
            CompiledCondition::Var(literal) => fmt_literal(literal, f),
            CompiledCondition::And(junction) => junction.fmt_as(Operator::And, f),
            CompiledCondition::Or(junction) => junction.fmt_as(Operator::Or, f),
        }
    }
}
