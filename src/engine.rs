//! Generational rewriting of symbol sequences.
//!
//! One pass resolves each symbol's production (identity when nothing is registered),
//! substitutes it and concatenates the results in their original left-to-right order.
//! There is no context sensitivity and no memoization. Output grows multiplicatively per
//! generation; bounding the iteration count is the caller's job.

use crate::error::{LSystemError, Result};
use crate::random::RandomSource;
use crate::rules::RuleSet;
use crate::symbol::{SymbolSequence, tokenize};

/// Applies one generation of `rule_set` to `current`.
///
/// For plain rule sets the result depends only on the inputs. Parametric rules may draw
/// from `rng`; replaying the same draws reproduces the same output.
pub fn rewrite(
    rule_set: &RuleSet,
    current: &SymbolSequence,
    rng: &mut dyn RandomSource,
) -> SymbolSequence {
    let mut next = SymbolSequence::new();
    for symbol in current {
        rule_set
            .rule_for(symbol.id())
            .expand_into(symbol, rng, &mut next);
    }
    next
}

/// Single-generation step on the serialized form, for incremental callers.
pub fn apply_once(rule_set: &RuleSet, current: &str, rng: &mut dyn RandomSource) -> Result<String> {
    let symbols = tokenize(current)?;
    Ok(rewrite(rule_set, &symbols, rng).to_string())
}

/// Rewrites the axiom `iterations` times and returns the resulting symbols.
pub fn generate_sequence(
    rule_set: &RuleSet,
    iterations: i64,
    rng: &mut dyn RandomSource,
) -> Result<SymbolSequence> {
    if iterations < 0 {
        return Err(LSystemError::InvalidArgument { iterations });
    }

    let mut current = rule_set.axiom().clone();
    for generation in 1..=iterations {
        current = rewrite(rule_set, &current, rng);
        tracing::debug!(
            rule_set = rule_set.name(),
            generation,
            symbols = current.len(),
            "rewrite pass complete"
        );
    }
    Ok(current)
}

/// Rewrites the axiom `iterations` times and returns the serialized string.
///
/// `generate(r, 0, rng)` is the axiom, and
/// `generate(r, n + 1, rng) == apply_once(r, &generate(r, n, rng), rng)`.
pub fn generate(rule_set: &RuleSet, iterations: i64, rng: &mut dyn RandomSource) -> Result<String> {
    generate_sequence(rule_set, iterations, rng).map(|seq| seq.to_string())
}

/// Lazily yields generation 0 (the axiom), 1, 2, ... of a rule set.
///
/// Each generation is computed only when requested, so `take(n + 1).last()` performs
/// exactly `n` rewrite passes.
pub struct Generations<'a> {
    rule_set: &'a RuleSet,
    rng: &'a mut dyn RandomSource,
    current: SymbolSequence,
    started: bool,
}

impl<'a> Generations<'a> {
    pub fn new(rule_set: &'a RuleSet, rng: &'a mut dyn RandomSource) -> Self {
        Self {
            rule_set,
            rng,
            current: rule_set.axiom().clone(),
            started: false,
        }
    }
}

impl Iterator for Generations<'_> {
    type Item = SymbolSequence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.current = rewrite(self.rule_set, &self.current, &mut *self.rng);
        } else {
            self.started = true;
        }
        Some(self.current.clone())
    }
}
