//! Turtle state and operations for 2D interpretation.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The state of the drawing turtle.
///
/// Screen convention: `y` grows downward, so moving along heading `θ` advances
/// `x += step·cos θ` and `y -= step·sin θ`. A heading of 90° points up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position of the pen.
    pub position: DVec2,

    /// Current heading in radians.
    pub heading: f64,
}

impl TurtleState {
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self { position, heading }
    }

    /// Unit vector of the current heading in screen coordinates.
    pub fn direction(&self) -> DVec2 {
        DVec2::new(self.heading.cos(), -self.heading.sin())
    }

    /// Moves `step` units along the heading and returns the position left behind.
    pub fn advance(&mut self, step: f64) -> DVec2 {
        let from = self.position;
        self.position = from + self.direction() * step;
        from
    }

    /// Turns by `delta` radians; positive is counter-clockwise on screen.
    pub fn turn(&mut self, delta: f64) {
        self.heading += delta;
    }
}

impl fmt::Display for TurtleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TurtleState{{x={:.2}, y={:.2}, angle={:.2}}}",
            self.position.x,
            self.position.y,
            self.heading.to_degrees()
        )
    }
}

/// Operations that can be performed by the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move forward and record a segment (`F`). Step from the first parameter,
    /// else the configured default.
    Draw,
    /// Move forward without recording (`f`).
    Move,
    /// Turn by the configured increment times the sign (`+` is `1.0`, `-` is `-1.0`).
    Turn(f64),
    /// Turn by the first parameter, in degrees (`A`). No parameter, no turn.
    TurnBy,
    /// Save the turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed state (`]`). Empty stack is a no-op.
    Pop,
    /// No-op: symbol has no geometric meaning (leaves, growth points).
    Ignore,
}
