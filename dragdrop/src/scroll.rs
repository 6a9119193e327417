// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge auto-scrolling while a drag is active.

use kurbo::{Point, Rect, Vec2};

use crate::error::{Error, Result};

/// Scroll the document when the pointer nears a viewport edge.
///
/// Every move of an active drag whose client position lies within `margin`
/// of an edge scrolls the host by `step` toward that edge. Both axes are
/// handled independently, so a corner scrolls diagonally.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoScroll {
    /// Distance from an edge, in client pixels, that triggers scrolling.
    pub margin: f64,
    /// Scroll distance per move.
    pub step: f64,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self {
            margin: 20.0,
            step: 10.0,
        }
    }
}

impl AutoScroll {
    /// Scroll by `step` when within `margin` of an edge.
    pub fn new(margin: f64, step: f64) -> Self {
        Self { margin, step }
    }

    /// Both values must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.margin) && ok(self.step) {
            Ok(())
        } else {
            Err(Error::InvalidAutoScroll)
        }
    }

    /// Scroll delta for a pointer at `client` inside `viewport`.
    ///
    /// Zero when the pointer is away from every edge.
    pub fn delta(&self, viewport: Rect, client: Point) -> Vec2 {
        let axis = |pos: f64, min: f64, max: f64| {
            if pos < min + self.margin {
                -self.step
            } else if pos > max - self.margin {
                self.step
            } else {
                0.0
            }
        };
        Vec2::new(
            axis(client.x, viewport.x0, viewport.x1),
            axis(client.y, viewport.y0, viewport.y1),
        )
    }
}
