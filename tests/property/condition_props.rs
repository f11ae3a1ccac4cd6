//! Property tests for the condition compiler.
//!
//! 1. **Soundness**: compiling never changes the truth value under any assignment
//! 2. **Idempotence**: compiling a compiled condition again changes nothing
//! 3. **Normal form**: junctions have ≥2 operands, nested junctions alternate,
//!    no literal repeats and no literal meets its complement
//! 4. **Negation**: De Morgan negation flips the truth value everywhere

use super::common::{assigned, assignment_strategy, condition_strategy};
use proptest::prelude::*;
use std::collections::HashSet;
use tagsieve::{compile_condition, test_condition, CompiledCondition, Condition, Junction, Operand};

/// Walk a junction and check the normal-form invariants by hand.
fn assert_junction_normal(junction: &Junction<u8>) -> Result<(), TestCaseError> {
    prop_assert!(junction.operands().len() >= 2, "junction with {} operands", junction.operands().len());

    let mut seen = HashSet::new();
    for literal in junction.literals() {
        prop_assert!(seen.insert((literal.value, literal.negated)), "duplicate literal {:?}", literal);
        prop_assert!(
            !seen.contains(&(literal.value, !literal.negated)),
            "complementary literals on {}",
            literal.value
        );
    }
    for nested in junction.nested() {
        assert_junction_normal(nested)?;
    }
    Ok(())
}

fn assert_normal(compiled: &CompiledCondition<u8>) -> Result<(), TestCaseError> {
    match compiled {
        CompiledCondition::Const(_) | CompiledCondition::Var(_) => Ok(()),
        CompiledCondition::And(junction) | CompiledCondition::Or(junction) => {
            assert_junction_normal(junction)
        }
    }
}

/// How deep the compiled tree goes. Used to check flattening never deepens.
fn depth(condition: &Condition<u8>) -> usize {
    match condition {
        Condition::Const(_) | Condition::Var(_) => 0,
        Condition::Not(item) => depth(item),
        Condition::And(items) | Condition::Or(items) => {
            1 + items.iter().map(depth).max().unwrap_or(0)
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: compiled and naive evaluation agree on every assignment.
    #[test]
    fn prop_compile_is_sound(condition in condition_strategy(), mask in assignment_strategy()) {
        let compiled = compile_condition(&condition);
        let resolve = assigned(mask);
        prop_assert_eq!(
            test_condition(&compiled, &resolve),
            condition.evaluate(&resolve),
            "condition {} compiled to {}", condition, compiled
        );
    }

    /// Property: re-compiling a compiled condition is the identity.
    #[test]
    fn prop_compile_is_idempotent(condition in condition_strategy()) {
        let compiled = compile_condition(&condition);
        let again = compile_condition(&compiled.to_condition());
        prop_assert_eq!(&again, &compiled, "condition {}", condition);
    }

    /// Property: compiled output is always in normal form.
    #[test]
    fn prop_compiled_is_normal(condition in condition_strategy()) {
        assert_normal(&compile_condition(&condition))?;
    }

    /// Property: compiling never makes the tree deeper.
    #[test]
    fn prop_compile_never_deepens(condition in condition_strategy()) {
        let compiled = compile_condition(&condition).to_condition();
        prop_assert!(depth(&compiled) <= depth(&condition));
    }

    /// Property: negating a compiled condition negates its value.
    #[test]
    fn prop_negate_flips_value(condition in condition_strategy(), mask in assignment_strategy()) {
        let compiled = compile_condition(&condition);
        let resolve = assigned(mask);
        let expected = !compiled.test(&resolve);
        let negated = !compiled;
        assert_normal(&negated)?;
        prop_assert_eq!(negated.test(&resolve), expected);
    }

    /// Property: compiling `Not(c)` is the De Morgan negation of compiling `c`.
    #[test]
    fn prop_compile_not_is_negate(condition in condition_strategy()) {
        let direct = compile_condition(&Condition::not(condition.clone()));
        prop_assert_eq!(direct, compile_condition(&condition).negate());
    }
}

#[test]
fn test_contradiction_and_tautology() {
    let a = || Condition::var(0u8);
    assert_eq!(
        compile_condition(&Condition::and([a(), Condition::not(a())])),
        CompiledCondition::Const(false)
    );
    assert_eq!(
        compile_condition(&Condition::or([a(), Condition::not(a())])),
        CompiledCondition::Const(true)
    );
}

#[test]
fn test_nested_operands_alternate() {
    let c = compile_condition(&Condition::and([
        Condition::var(0u8),
        Condition::or([Condition::var(1), Condition::and([Condition::var(2), Condition::var(3)])]),
    ]));
    let CompiledCondition::And(junction) = &c else {
        panic!("expected an and, got {c}");
    };
    let nested: Vec<&Junction<u8>> = junction.nested().collect();
    assert_eq!(nested.len(), 1);
    assert!(matches!(nested[0].operands()[1], Operand::Nested(_)));
    assert_eq!(c.to_string(), "∀(0 ∃(1 ∀(2 3)))");
}
