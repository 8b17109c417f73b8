//! Interpreter that converts an L-System symbol stream into a [`Path`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`] with a rewritten string.

use crate::error::Result;
use crate::path::Path;
use crate::symbol::{Symbol, tokenize};
use crate::turtle::{TurtleOp, TurtleState};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every pass starts facing up the screen.
const INITIAL_HEADING_DEGREES: f64 = 90.0;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Turn applied by `+`/`-`, in radians. Default: 25°.
    pub angle_increment: f64,
    /// Step length for `F`/`f` when no parameter is provided.
    pub default_step: f64,
    /// Maximum stack depth for push/pop operations.
    ///
    /// A `[` at the limit is dropped and its matching `]` is skipped, so the turtle keeps
    /// the state it reached inside that branch instead of returning to the branch point.
    /// Enclosing brackets still pair up correctly.
    pub max_stack_depth: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            angle_increment: 25.0f64.to_radians(),
            default_step: 8.0,
            max_stack_depth: 1024,
        }
    }
}

/// Interprets L-System output as turtle motion.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`interpret`](Self::interpret).
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Creates an interpreter with the standard symbols already registered.
    pub fn standard(config: TurtleConfig) -> Self {
        let mut interpreter = Self::new(config);
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Replaces every symbol binding with `map`; symbols missing from it are ignored.
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol character.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// The operation bound to `symbol`; unmapped symbols are [`TurtleOp::Ignore`].
    pub fn op_for(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Registers the conventional mappings:
    ///
    /// | Symbol | Operation              |
    /// |--------|------------------------|
    /// | `F`    | [`TurtleOp::Draw`]     |
    /// | `f`    | [`TurtleOp::Move`]     |
    /// | `+`    | [`TurtleOp::Turn`]`(1)`  |
    /// | `-`    | [`TurtleOp::Turn`]`(-1)` |
    /// | `A`    | [`TurtleOp::TurnBy`]   |
    /// | `[`    | [`TurtleOp::Push`]     |
    /// | `]`    | [`TurtleOp::Pop`]      |
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            ('F', TurtleOp::Draw),
            ('f', TurtleOp::Move),
            ('+', TurtleOp::Turn(1.0)),
            ('-', TurtleOp::Turn(-1.0)),
            ('A', TurtleOp::TurnBy),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    /// Tokenizes `instructions` and interprets them starting at `start`.
    ///
    /// Fails only when the string itself is malformed.
    pub fn interpret(&self, instructions: &str, start: DVec2) -> Result<Path> {
        let symbols = tokenize(instructions)?;
        Ok(self.interpret_symbols(&symbols, start))
    }

    /// Walks every symbol in order and returns the recorded segments.
    ///
    /// The turtle starts at `start` facing up (90°).
    ///
    /// # Push / Pop
    ///
    /// `[` saves a copy of position and heading; `]` restores the most recent copy.
    /// An unmatched `]` leaves the turtle untouched. Pushes beyond `max_stack_depth`
    /// are dropped together with their matching `]`.
    pub fn interpret_symbols(&self, symbols: &[Symbol], start: DVec2) -> Path {
        let mut path = Path::new();
        let mut turtle = TurtleState::new(start, INITIAL_HEADING_DEGREES.to_radians());
        let mut stack: Vec<TurtleState> = Vec::new();
        // Pushes dropped by the depth guard that still await their `]`.
        let mut dropped = 0usize;

        for symbol in symbols {
            match self.op_for(symbol.id()) {
                TurtleOp::Draw => {
                    let step = symbol.numeric_param(0).unwrap_or(self.config.default_step);
                    let from = turtle.advance(step);
                    path.add_line(from, turtle.position);
                }
                TurtleOp::Move => {
                    let step = symbol.numeric_param(0).unwrap_or(self.config.default_step);
                    turtle.advance(step);
                }
                TurtleOp::Turn(sign) => turtle.turn(self.config.angle_increment * sign),
                TurtleOp::TurnBy => {
                    if let Some(degrees) = symbol.numeric_param(0) {
                        turtle.turn(degrees.to_radians());
                    }
                }
                TurtleOp::Push => {
                    if stack.len() < self.config.max_stack_depth {
                        stack.push(turtle);
                    } else {
                        dropped += 1;
                        tracing::warn!(
                            max_stack_depth = self.config.max_stack_depth,
                            "turtle stack full, dropping push"
                        );
                    }
                }
                TurtleOp::Pop => {
                    if dropped > 0 {
                        dropped -= 1;
                    } else if let Some(saved) = stack.pop() {
                        turtle = saved;
                    }
                }
                TurtleOp::Ignore => {}
            }
        }

        path
    }
}

impl Default for TurtleInterpreter {
    fn default() -> Self {
        Self::standard(TurtleConfig::default())
    }
}
