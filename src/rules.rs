//! Rule-set model: an axiom plus a per-character production table.
//!
//! A [`RuleSet`] is either *plain* (character → fixed replacement) or *parametric*
//! (character → function of the symbol's parameters). The variant is fixed at
//! construction and the engine dispatches on it exhaustively; a parametric rule set has
//! no plain table to fall back on.
//!
//! | Symbol lookup                 | Resolved [`ProductionRule`]             |
//! |-------------------------------|-----------------------------------------|
//! | no entry for the character    | `Identity`: symbol passes through as-is |
//! | entry in a plain table        | `Constant`: parameters are discarded    |
//! | entry in a parametric table   | `Parametric`: called with the params    |

use crate::random::RandomSource;
use crate::symbol::{Symbol, SymbolSequence};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a parametric production body.
///
/// Receives the symbol's parameter list verbatim and may draw from the randomness source.
/// Must not fail: malformed parameters are replaced by a default inside the body.
pub type RuleFn = dyn Fn(&[String], &mut dyn RandomSource) -> SymbolSequence + Send + Sync;

/// A parametric production, cheap to clone.
#[derive(Clone)]
pub struct ParametricRule {
    func: Arc<RuleFn>,
}

impl ParametricRule {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[String], &mut dyn RandomSource) -> SymbolSequence + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    pub fn apply(&self, params: &[String], rng: &mut dyn RandomSource) -> SymbolSequence {
        (self.func)(params, rng)
    }
}

impl fmt::Debug for ParametricRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParametricRule").finish_non_exhaustive()
    }
}

/// The rule that applies to one symbol during a rewrite pass.
#[derive(Clone, Copy, Debug)]
pub enum ProductionRule<'a> {
    /// Nothing registered: the symbol is copied through with its parameters.
    Identity,
    /// Fixed replacement; the input symbol's parameters are dropped.
    Constant(&'a SymbolSequence),
    /// Replacement computed from the input symbol's parameters.
    Parametric(&'a ParametricRule),
}

impl ProductionRule<'_> {
    /// Appends the replacement for `symbol` to `out`.
    pub fn expand_into(
        &self,
        symbol: &Symbol,
        rng: &mut dyn RandomSource,
        out: &mut SymbolSequence,
    ) {
        match self {
            ProductionRule::Identity => out.push(symbol.clone()),
            ProductionRule::Constant(replacement) => out.extend_from(replacement),
            ProductionRule::Parametric(rule) => out.extend(rule.apply(symbol.params(), rng)),
        }
    }

    /// The replacement for `symbol` as a fresh sequence.
    pub fn apply(&self, symbol: &Symbol, rng: &mut dyn RandomSource) -> SymbolSequence {
        let mut out = SymbolSequence::new();
        self.expand_into(symbol, rng, &mut out);
        out
    }
}

/// Production table of a rule set, tagged by kind.
#[derive(Clone, Debug)]
pub enum Productions {
    Plain(HashMap<char, SymbolSequence>),
    Parametric(HashMap<char, ParametricRule>),
}

/// An immutable L-System definition: axiom, productions and a presentation description.
#[derive(Clone, Debug)]
pub struct RuleSet {
    name: String,
    description: String,
    axiom: SymbolSequence,
    productions: Productions,
}

impl RuleSet {
    /// Builds a plain rule set from `(character, replacement)` pairs.
    pub fn plain<I>(name: impl Into<String>, axiom: SymbolSequence, rules: I) -> Self
    where
        I: IntoIterator<Item = (char, SymbolSequence)>,
    {
        Self {
            name: name.into(),
            description: String::new(),
            axiom,
            productions: Productions::Plain(rules.into_iter().collect()),
        }
    }

    /// Builds a parametric rule set from `(character, rule)` pairs.
    pub fn parametric<I>(name: impl Into<String>, axiom: SymbolSequence, rules: I) -> Self
    where
        I: IntoIterator<Item = (char, ParametricRule)>,
    {
        Self {
            name: name.into(),
            description: String::new(),
            axiom,
            productions: Productions::Parametric(rules.into_iter().collect()),
        }
    }

    /// Attaches a human-readable description (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn axiom(&self) -> &SymbolSequence {
        &self.axiom
    }

    pub fn productions(&self) -> &Productions {
        &self.productions
    }

    pub fn is_parametric(&self) -> bool {
        matches!(self.productions, Productions::Parametric(_))
    }

    /// The plain table, `None` for parametric rule sets.
    pub fn plain_rules(&self) -> Option<&HashMap<char, SymbolSequence>> {
        match &self.productions {
            Productions::Plain(rules) => Some(rules),
            Productions::Parametric(_) => None,
        }
    }

    /// The parametric table, `None` for plain rule sets.
    pub fn parametric_rules(&self) -> Option<&HashMap<char, ParametricRule>> {
        match &self.productions {
            Productions::Plain(_) => None,
            Productions::Parametric(rules) => Some(rules),
        }
    }

    /// Resolves the production for a symbol character.
    pub fn rule_for(&self, id: char) -> ProductionRule<'_> {
        let resolved = match &self.productions {
            Productions::Plain(rules) => rules.get(&id).map(ProductionRule::Constant),
            Productions::Parametric(rules) => rules.get(&id).map(ProductionRule::Parametric),
        };
        resolved.unwrap_or(ProductionRule::Identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use crate::symbol::SymbolBuilder;

    fn doubling() -> ParametricRule {
        ParametricRule::new(|params, _rng| {
            let x = params
                .first()
                .and_then(|p| p.parse::<f64>().ok())
                .unwrap_or(1.0);
            SymbolBuilder::new().forward((x * 2.0).to_string()).build()
        })
    }

    #[test]
    fn unregistered_symbol_is_identity_with_params() {
        let rules = RuleSet::plain("t", SymbolSequence::from_chars("X").unwrap(), []);
        let mut rng = SeededRandom::new(0);
        let sym = Symbol::with_params('Q', ["1", "2"]).unwrap();
        let out = rules.rule_for('Q').apply(&sym, &mut rng);
        assert_eq!(out.as_slice(), [sym]);
    }

    #[test]
    fn constant_rule_discards_params() {
        let rules = RuleSet::plain(
            "t",
            SymbolSequence::from_chars("F").unwrap(),
            [('F', SymbolSequence::from_chars("FF").unwrap())],
        );
        let mut rng = SeededRandom::new(0);
        let out = rules
            .rule_for('F')
            .apply(&Symbol::with_params('F', ["9"]).unwrap(), &mut rng);
        assert_eq!(out.to_string(), "FF");
    }

    #[test]
    fn parametric_rule_receives_params() {
        let axiom = SymbolSequence::from_chars("F").unwrap();
        let rules = RuleSet::parametric("t", axiom, [('F', doubling())]);
        let mut rng = SeededRandom::new(0);
        let out = rules
            .rule_for('F')
            .apply(&Symbol::with_params('F', ["4"]).unwrap(), &mut rng);
        assert_eq!(out.to_string(), "F(8)");
    }

    #[test]
    fn variant_tables_are_exclusive() {
        let plain = RuleSet::plain("p", SymbolSequence::from_chars("F").unwrap(), []);
        assert!(!plain.is_parametric());
        assert!(plain.plain_rules().is_some());
        assert!(plain.parametric_rules().is_none());

        let axiom = SymbolSequence::from_chars("F").unwrap();
        let para =
            RuleSet::parametric("q", axiom, [('F', doubling())]).with_description("doubles");
        assert!(para.is_parametric());
        assert!(para.plain_rules().is_none());
        assert_eq!(para.parametric_rules().map(HashMap::len), Some(1));
        assert_eq!(para.description(), "doubles");
    }

    #[test]
    fn productions_expose_the_variant() {
        let plain = RuleSet::plain(
            "p",
            SymbolSequence::from_chars("F").unwrap(),
            [('F', SymbolSequence::from_chars("F+F").unwrap())],
        );
        match plain.productions() {
            Productions::Plain(rules) => assert_eq!(rules[&'F'].to_string(), "F+F"),
            Productions::Parametric(_) => panic!("expected a plain table"),
        }

        let para = RuleSet::parametric("q", SymbolSequence::new(), [('F', doubling())]);
        assert!(matches!(
            para.productions(),
            Productions::Parametric(rules) if rules.contains_key(&'F')
        ));
    }
}
