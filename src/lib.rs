//! # lsys-turtle
//!
//! Parametric L-System rewriting paired with a 2D turtle interpreter.
//!
//! A [`RuleSet`] (axiom plus plain or parametric productions) is rewritten for a number of
//! generations by [`generate`]; the resulting string is walked by a [`TurtleInterpreter`],
//! which produces a [`Path`] of line segments for an external renderer.
//!
//! ```rust,ignore
//! use lsys_turtle::{binary_tree, generate, SeededRandom, TurtleInterpreter};
//!
//! let mut rng = SeededRandom::new(7);
//! let instructions = generate(&binary_tree(), 5, &mut rng)?;
//! let path = TurtleInterpreter::default().interpret(&instructions, glam::DVec2::new(400.0, 600.0))?;
//! println!("{path}");
//! ```

pub mod builtin;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod path;
pub mod random;
pub mod rules;
pub mod symbol;
pub mod turtle;

pub use builtin::*;
pub use engine::*;
pub use error::*;
pub use interpreter::*;
pub use path::*;
pub use random::*;
pub use rules::*;
pub use symbol::*;
pub use turtle::*;
