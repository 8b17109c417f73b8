//! Built-in rule sets and the catalog that cycles through them.
//!
//! | Name                     | Kind       | Axiom                              |
//! |--------------------------|------------|------------------------------------|
//! | `binary-tree`            | plain      | `0`                                |
//! | `parametric-binary-tree` | parametric | `F(12)0`                           |
//! | `simple-plant`           | plain      | `X`                                |
//! | `koch-snowflake`         | parametric | `F(100)A(-120)F(100)A(-120)F(100)` |
//! | `stochastic-binary-tree` | parametric | `0`                                |

use crate::random::RandomSource;
use crate::rules::{ParametricRule, RuleSet};
use crate::symbol::{Symbol, SymbolBuilder, SymbolSequence, parse_numeric};

/// Scale of the exponential growth increment `A·e^(−k·x)`.
pub const DECAY_INITIAL_QUANTITY: f64 = 25.0;
/// Decay constant `k` of the growth increment.
pub const DECAY_CONSTANT: f64 = 0.1;
/// Step emitted by the growth rule when `F` carries no usable length.
pub const DEFAULT_GROWTH_STEP: &str = "10";

pub const MIN_TRUNK_LENGTH: i32 = 1;
pub const MAX_TRUNK_LENGTH: i32 = 20;
pub const MIN_BRANCH_LENGTH: i32 = 1;
pub const MAX_BRANCH_LENGTH: i32 = 20;
/// Branch angles in degrees, upper bound exclusive. Wider angles look unnatural.
pub const MIN_BRANCH_ANGLE: i32 = 1;
pub const MAX_BRANCH_ANGLE: i32 = 25;

const KOCH_SIDE: &str = "100";

/// Module-free literal such as `"F[+F0]-F0"`.
fn literal(text: &str) -> SymbolSequence {
    text.chars().map(Symbol::bare).collect()
}

/// Next segment length under exponential decay: `x + 25·e^(−0.1·x)`.
pub fn decay_step(x: f64) -> f64 {
    x + DECAY_INITIAL_QUANTITY * (-DECAY_CONSTANT * x).exp()
}

/// Formats a generated numeric parameter with exactly two decimals.
pub fn format_param(value: f64) -> String {
    format!("{value:.2}")
}

/// `F(x) → F(decay_step(x))`, falling back to `F(10)` when `x` is absent or not a number.
pub fn growth_rule() -> ParametricRule {
    ParametricRule::new(|params, _rng| {
        let step = match params.first().and_then(|p| parse_numeric(p)) {
            Some(last) => format_param(decay_step(last)),
            None => {
                tracing::trace!(?params, "growth rule fell back to default step");
                DEFAULT_GROWTH_STEP.to_string()
            }
        };
        SymbolBuilder::new().forward(step).build()
    })
}

/// Plain binary tree: `0 → F[+F0]-F0`, `F → FF`.
pub fn binary_tree() -> RuleSet {
    RuleSet::plain(
        "binary-tree",
        literal("0"),
        [
            ('0', literal("F[+F0]-F0")),
            ('F', literal("FF")),
        ],
    )
    .with_description(
        "Binary tree. 0 is a leaf, F draws forward, [ ] save and restore the turtle.",
    )
}

/// Binary tree whose trunk segments grow with exponential decay.
pub fn parametric_binary_tree() -> RuleSet {
    let leaf = ParametricRule::new(|_params, _rng| {
        SymbolBuilder::new()
            .forward("10")
            .open_branch()
            .turn_left()
            .forward("5")
            .leaf()
            .close_branch()
            .turn_right()
            .forward("5")
            .leaf()
            .build()
    });

    RuleSet::parametric(
        "parametric-binary-tree",
        SymbolBuilder::new().forward("12").leaf().build(),
        [('F', growth_rule()), ('0', leaf)],
    )
    .with_description(
        "Parametric binary tree. F(x) grows to x + 25e^(-0.1x); 0 sprouts two branches.",
    )
}

/// Bracketed plant: `X → F+[[X]-X]-F[-FX]+X`, `F → FF`.
pub fn simple_plant() -> RuleSet {
    RuleSet::plain(
        "simple-plant",
        literal("X"),
        [
            ('X', literal("F+[[X]-X]-F[-FX]+X")),
            ('F', literal("FF")),
        ],
    )
    .with_description(
        "Plant growth. X marks growth points, F is a stem segment, [ ] branch off.",
    )
}

/// Koch snowflake driven by explicit `A(angle)` turns instead of the fixed increment.
pub fn koch_snowflake() -> RuleSet {
    let axiom = SymbolBuilder::new()
        .forward(KOCH_SIDE)
        .turn("-120")
        .forward(KOCH_SIDE)
        .turn("-120")
        .forward(KOCH_SIDE)
        .build();

    let side = ParametricRule::new(|_params, _rng| {
        SymbolBuilder::new()
            .forward(KOCH_SIDE)
            .turn("60")
            .forward(KOCH_SIDE)
            .turn("-120")
            .forward(KOCH_SIDE)
            .turn("60")
            .forward(KOCH_SIDE)
            .build()
    });

    RuleSet::parametric("koch-snowflake", axiom, [('F', side)])
        .with_description("Koch snowflake. Every side is replaced by four with 60 degree bends.")
}

/// Binary tree whose leaves sprout branches of random length and angle.
///
/// Leaf expansion: `0 → F(t)[A(l)F(lb)0]A(-r)F(rb)0`, with `t`, `lb`, `rb` in `[1, 20]`
/// and `l`, `r` in `[1, 25)` degrees. Reproducible only by replaying the same stream
/// from the [`RandomSource`].
pub fn stochastic_binary_tree() -> RuleSet {
    RuleSet::parametric(
        "stochastic-binary-tree",
        SymbolBuilder::new().leaf().build(),
        [
            ('F', growth_rule()),
            ('0', ParametricRule::new(|_params, rng| random_branches(rng))),
        ],
    )
    .with_description(
        "Stochastic binary tree. Leaves split into two branches of random length and angle.",
    )
}

fn random_branches(rng: &mut dyn RandomSource) -> SymbolSequence {
    let trunk = rng.next_int(MIN_TRUNK_LENGTH, MAX_TRUNK_LENGTH + 1);
    let left_len = rng.next_int(MIN_BRANCH_LENGTH, MAX_BRANCH_LENGTH + 1);
    let right_len = rng.next_int(MIN_BRANCH_LENGTH, MAX_BRANCH_LENGTH + 1);
    let left_angle = rng.next_int(MIN_BRANCH_ANGLE, MAX_BRANCH_ANGLE);
    let right_angle = rng.next_int(MIN_BRANCH_ANGLE, MAX_BRANCH_ANGLE);

    SymbolBuilder::new()
        .forward(trunk.to_string())
        .open_branch()
        .turn(left_angle.to_string())
        .forward(left_len.to_string())
        .leaf()
        .close_branch()
        .turn(format!("-{right_angle}"))
        .forward(right_len.to_string())
        .leaf()
        .build()
}

/// Ordered collection of rule sets with a wrapping cursor.
///
/// [`new`](Self::new) and [`Default`] both start empty; use [`builtin`](Self::builtin)
/// for the stock rule sets.
#[derive(Clone, Debug, Default)]
pub struct RuleCatalog {
    rules: Vec<RuleSet>,
    current: usize,
}

impl RuleCatalog {
    /// An empty catalog; register rule sets before calling [`current`](Self::current).
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in rule sets, cursor on `binary-tree`.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(binary_tree());
        catalog.register(parametric_binary_tree());
        catalog.register(simple_plant());
        catalog.register(koch_snowflake());
        catalog.register(stochastic_binary_tree());
        catalog
    }

    pub fn register(&mut self, rule_set: RuleSet) {
        self.rules.push(rule_set);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The selected rule set, `None` only when the catalog is empty.
    pub fn current(&self) -> Option<&RuleSet> {
        self.rules.get(self.current)
    }

    /// Moves the cursor forward, wrapping past the last entry.
    pub fn shift_right(&mut self) -> &mut Self {
        if !self.rules.is_empty() {
            self.current = (self.current + 1) % self.rules.len();
        }
        self
    }

    /// Moves the cursor backward, wrapping past the first entry.
    pub fn shift_left(&mut self) -> &mut Self {
        if !self.rules.is_empty() {
            self.current = (self.current + self.rules.len() - 1) % self.rules.len();
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use crate::symbol::Symbol;

    #[test]
    fn decay_step_matches_known_values() {
        assert_eq!(format_param(decay_step(12.0)), "19.53");
        assert_eq!(format_param(decay_step(10.0)), "19.20");
        assert_eq!(format_param(decay_step(5.0)), "20.16");
        assert_eq!(format_param(decay_step(19.53)), "23.08");
    }

    #[test]
    fn growth_rule_falls_back_on_bad_parameter() {
        let rule = growth_rule();
        let mut rng = SeededRandom::new(0);
        let bad = rule.apply(&["abc".to_string()], &mut rng);
        assert_eq!(bad.to_string(), "F(10)");
        let missing = rule.apply(&[], &mut rng);
        assert_eq!(missing.to_string(), "F(10)");
    }

    #[test]
    fn random_branches_respect_ranges() {
        let mut rng = SeededRandom::new(3);
        for _ in 0..200 {
            let seq = random_branches(&mut rng);
            assert_eq!(seq.len(), 9);
            let trunk = seq[0].numeric_param(0).unwrap();
            let left_angle = seq[2].numeric_param(0).unwrap();
            let left_len = seq[3].numeric_param(0).unwrap();
            let right_angle = seq[6].numeric_param(0).unwrap();
            let right_len = seq[7].numeric_param(0).unwrap();
            assert!((1.0..=20.0).contains(&trunk));
            assert!((1.0..=20.0).contains(&left_len));
            assert!((1.0..=20.0).contains(&right_len));
            assert!((1.0..25.0).contains(&left_angle));
            assert!((-24.0..=-1.0).contains(&right_angle));
            assert_eq!(seq[4], Symbol::new('0').unwrap());
            assert_eq!(seq[8], Symbol::new('0').unwrap());
        }
    }

    #[test]
    fn catalog_cycles_in_both_directions() {
        let mut catalog = RuleCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.current_index(), 0);
        assert_eq!(catalog.current().map(RuleSet::name), Some("binary-tree"));

        catalog.shift_left();
        assert_eq!(catalog.current_index(), 4);
        assert_eq!(
            catalog.current().map(RuleSet::name),
            Some("stochastic-binary-tree")
        );

        catalog.shift_right().shift_right();
        assert_eq!(catalog.current_index(), 1);
        assert_eq!(
            catalog.current().map(RuleSet::name),
            Some("parametric-binary-tree")
        );
    }

    #[test]
    fn empty_catalog_has_no_current() {
        let mut catalog = RuleCatalog::new();
        catalog.shift_right().shift_left();
        assert!(catalog.current().is_none());
        assert!(catalog.is_empty());
        assert_eq!(catalog.current_index(), 0);
    }

    #[test]
    fn default_catalog_matches_new() {
        let mut catalog = RuleCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.current().is_none());

        catalog.register(koch_snowflake());
        assert_eq!(catalog.len(), 1);
        catalog.shift_right();
        assert_eq!(catalog.current_index(), 0);
        assert_eq!(catalog.current().map(RuleSet::name), Some("koch-snowflake"));
    }

    #[test]
    fn catalog_lookup_by_name() {
        let catalog = RuleCatalog::builtin();
        let koch = catalog.get("koch-snowflake").unwrap();
        assert!(koch.is_parametric());
        assert_eq!(
            koch.axiom().to_string(),
            "F(100)A(-120)F(100)A(-120)F(100)"
        );
        assert!(catalog.get("dragon-curve").is_none());
    }
}
