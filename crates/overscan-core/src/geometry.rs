//! Geometric primitives for laser cut programs
//!
//! All coordinates are in the program's own units (usually millimeters).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the XY plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

/// One straight laser-on cut
///
/// Produced by replaying a cutting move while the laser is enabled.
/// `power` holds the `S` word of the source line when it had one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub power: Option<f64>,
}

impl Segment {
    /// Create a segment without a power value
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            power: None,
        }
    }

    /// Attach a power value
    pub fn with_power(mut self, power: Option<f64>) -> Self {
        self.power = power;
        self
    }

    /// Start point
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// End point
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Absolute X extent
    pub fn dx(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    /// Absolute Y extent
    pub fn dy(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    /// Whether the source line carried a power value
    pub fn has_power(&self) -> bool {
        self.power.is_some()
    }

    /// Same segment with Y endpoints in ascending order; X values untouched
    pub fn normalized_y(&self) -> Self {
        let mut seg = *self;
        if seg.y1 > seg.y2 {
            std::mem::swap(&mut seg.y1, &mut seg.y2);
        }
        seg
    }

    /// Same segment with X endpoints in ascending order; Y values untouched
    pub fn normalized_x(&self) -> Self {
        let mut seg = *self;
        if seg.x1 > seg.x2 {
            std::mem::swap(&mut seg.x1, &mut seg.x2);
        }
        seg
    }
}
