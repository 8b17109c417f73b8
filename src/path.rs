//! Line segments produced by one interpretation pass.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A straight segment from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Ordered, append-only list of segments.
///
/// Only the interpreter appends; once handed to the caller a path is read-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_line(&mut self, start: DVec2, end: DVec2) {
        self.segments.push(Segment::new(start, end));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of all segment lengths.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Axis-aligned `(min, max)` corners over every endpoint, `None` when empty.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let first = self.segments.first()?.start;
        Some(
            self.segments
                .iter()
                .flat_map(|s| [s.start, s.end])
                .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TurtlePath{{lines={}, totalLength={:.2}}}",
            self.len(),
            self.total_length()
        )
    }
}
