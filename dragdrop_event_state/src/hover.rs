// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover dispatch: turn a stream of "element under the pointer" values into
//! enter/over/leave/drop signals.
//!
//! ## Usage
//!
//! While a drag is active, feed every resolved target to [`HoverDispatch::update`].
//! On a successful drop call [`HoverDispatch::drop_on`]. When the drag ends for
//! any reason call [`HoverDispatch::reset`] so the last hovered element gets its
//! final leave.
//!
//! ## Transitions
//!
//! - Same target as last time: `Over(target)`.
//! - New target: `Enter(new, related = old)`, then `Leave(old, related = new)` if
//!   there was an old target, then `Over(new)`.
//! - Drop: `Drop(target)` followed by the reset leave.
//! - Reset: `Leave(previous)` if there is one; nothing otherwise.
//!
//! ```
//! use dragdrop_event_state::hover::{HoverDispatch, HoverKind, HoverSignal};
//!
//! fn kinds(signals: &[HoverSignal<u32>]) -> Vec<(HoverKind, u32)> {
//!     signals.iter().map(|s| (s.kind, s.target)).collect()
//! }
//!
//! let mut hover = HoverDispatch::new();
//!
//! assert_eq!(kinds(&hover.update(1)), vec![(HoverKind::Enter, 1), (HoverKind::Over, 1)]);
//! assert_eq!(kinds(&hover.update(1)), vec![(HoverKind::Over, 1)]);
//! assert_eq!(
//!     kinds(&hover.update(2)),
//!     vec![(HoverKind::Enter, 2), (HoverKind::Leave, 1), (HoverKind::Over, 2)]
//! );
//! assert_eq!(hover.reset().map(|s| (s.kind, s.target)), Some((HoverKind::Leave, 2)));
//! assert!(hover.reset().is_none());
//! ```

use smallvec::SmallVec;

/// Kind of a hover signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverKind {
    /// The pointer moved onto `target`.
    Enter,
    /// The pointer is over `target`.
    Over,
    /// The pointer moved off `target`, or the drag ended while over it.
    Leave,
    /// The dragged element was released over `target`.
    Drop,
}

/// A single hover notification addressed to `target`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HoverSignal<K> {
    /// What happened.
    pub kind: HoverKind,
    /// Element the signal is dispatched at.
    pub target: K,
    /// The other side of the transition: the element left for an enter, the
    /// element entered for a leave. `None` for over, drop and the final leave.
    pub related: Option<K>,
}

impl<K> HoverSignal<K> {
    fn new(kind: HoverKind, target: K, related: Option<K>) -> Self {
        Self {
            kind,
            target,
            related,
        }
    }
}

/// Signals produced by one update: at most enter, leave and over.
pub type HoverSignals<K> = SmallVec<[HoverSignal<K>; 3]>;

/// Tracks the previously hovered element of the active drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverDispatch<K> {
    previous: Option<K>,
}

impl<K> Default for HoverDispatch<K> {
    fn default() -> Self {
        Self { previous: None }
    }
}

impl<K: Copy + PartialEq> HoverDispatch<K> {
    /// Create a dispatcher with no hovered element.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last element signals were produced for.
    pub fn previous(&self) -> Option<K> {
        self.previous
    }

    /// Produce the signals for the pointer now being over `target`.
    pub fn update(&mut self, target: K) -> HoverSignals<K> {
        let mut out = HoverSignals::new();
        match self.previous {
            Some(previous) if previous == target => {
                out.push(HoverSignal::new(HoverKind::Over, target, None));
            }
            previous => {
                out.push(HoverSignal::new(HoverKind::Enter, target, previous));
                if let Some(previous) = previous {
                    out.push(HoverSignal::new(HoverKind::Leave, previous, Some(target)));
                }
                out.push(HoverSignal::new(HoverKind::Over, target, None));
                self.previous = Some(target);
            }
        }
        out
    }

    /// Produce the drop signal on `target` followed by the reset leave.
    pub fn drop_on(&mut self, target: K) -> SmallVec<[HoverSignal<K>; 2]> {
        let mut out = SmallVec::new();
        out.push(HoverSignal::new(HoverKind::Drop, target, None));
        out.extend(self.reset());
        out
    }

    /// Forget the hovered element, producing its final leave if there was one.
    pub fn reset(&mut self) -> Option<HoverSignal<K>> {
        self.previous
            .take()
            .map(|previous| HoverSignal::new(HoverKind::Leave, previous, None))
    }
}
