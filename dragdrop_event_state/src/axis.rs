// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis constraints for drag movement.
//!
//! A draggable may be free ([`Axis::Both`]) or restricted to one direction.
//! The constraint is applied when a position is written into a
//! [`DragSession`](crate::session::DragSession): the locked coordinate is
//! pinned to the start position.
//!
//! ```
//! use kurbo::Point;
//! use dragdrop_event_state::axis::Axis;
//!
//! let start = Point::new(0.0, 0.0);
//! assert_eq!(Axis::Horizontal.constrain(start, Point::new(5.0, 50.0)), Point::new(5.0, 0.0));
//! assert_eq!(Axis::Vertical.constrain(start, Point::new(5.0, 50.0)), Point::new(0.0, 50.0));
//! assert_eq!(Axis::Both.constrain(start, Point::new(5.0, 50.0)), Point::new(5.0, 50.0));
//! ```

use kurbo::Point;

/// Direction(s) in which a draggable may move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Unconstrained movement.
    #[default]
    Both,
    /// Only the x coordinate follows the pointer.
    Horizontal,
    /// Only the y coordinate follows the pointer.
    Vertical,
}

impl Axis {
    /// Constrain `position` relative to `start`.
    ///
    /// Idempotent: constraining an already constrained position returns it unchanged.
    pub fn constrain(self, start: Point, position: Point) -> Point {
        match self {
            Self::Both => position,
            Self::Horizontal => Point::new(position.x, start.y),
            Self::Vertical => Point::new(start.x, position.y),
        }
    }

    /// Returns `true` if the motion from `start` to `current` runs mostly across
    /// the allowed axis, which on touch devices means the user is scrolling.
    ///
    /// [`Axis::Both`] never reports scrolling. Ties are not scrolling.
    pub fn is_scroll_gesture(self, start: Point, current: Point) -> bool {
        let delta = current - start;
        match self {
            Self::Both => false,
            Self::Horizontal => delta.y.abs() > delta.x.abs(),
            Self::Vertical => delta.x.abs() > delta.y.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_pins_y_to_start() {
        let start = Point::new(3.0, 7.0);
        let p = Axis::Horizontal.constrain(start, Point::new(10.0, -40.0));
        assert_eq!(p, Point::new(10.0, 7.0));
        assert_eq!(Axis::Horizontal.constrain(start, p), p);
    }

    #[test]
    fn vertical_pins_x_to_start() {
        let start = Point::new(3.0, 7.0);
        let p = Axis::Vertical.constrain(start, Point::new(10.0, -40.0));
        assert_eq!(p, Point::new(3.0, -40.0));
    }

    #[test]
    fn unconstrained_axis_never_scrolls() {
        let start = Point::ZERO;
        assert!(!Axis::Both.is_scroll_gesture(start, Point::new(0.0, 100.0)));
        assert!(!Axis::Both.is_scroll_gesture(start, Point::new(100.0, 0.0)));
    }

    #[test]
    fn horizontal_axis_treats_vertical_motion_as_scroll() {
        let start = Point::new(10.0, 10.0);
        assert!(Axis::Horizontal.is_scroll_gesture(start, Point::new(11.0, 15.0)));
        assert!(!Axis::Horizontal.is_scroll_gesture(start, Point::new(15.0, 11.0)));
        // Diagonal tie keeps the drag.
        assert!(!Axis::Horizontal.is_scroll_gesture(start, Point::new(13.0, 13.0)));
    }

    #[test]
    fn vertical_axis_treats_horizontal_motion_as_scroll() {
        let start = Point::ZERO;
        assert!(Axis::Vertical.is_scroll_gesture(start, Point::new(-6.0, 2.0)));
        assert!(!Axis::Vertical.is_scroll_gesture(start, Point::new(2.0, -6.0)));
    }
}
