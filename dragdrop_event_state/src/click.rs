// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click suppression after a drag.
//!
//! Releasing a mouse or pen over the dragged element makes the platform emit a
//! `click` right after the pointer-up. That click is not something the user
//! meant, so after a drag ends the dragged element is *armed*: every click on
//! it or inside it is reported as [`ClickResult::Suppressed`] until the next
//! animation frame calls [`ClickSuppression::release`].
//!
//! ## Usage
//!
//! ```
//! use dragdrop_event_state::click::{ClickResult, ClickSuppression};
//!
//! // Element 2 is a child of element 1.
//! let contains = |outer: &u32, inner: &u32| outer == inner || (*outer == 1 && *inner == 2);
//!
//! let mut clicks = ClickSuppression::new();
//! clicks.arm(1_u32);
//!
//! assert_eq!(clicks.on_click(&2, contains), ClickResult::Suppressed(1));
//! assert_eq!(clicks.on_click(&7, contains), ClickResult::Click(7));
//!
//! // Next frame.
//! assert_eq!(clicks.release(), Some(1));
//! assert_eq!(clicks.on_click(&2, contains), ClickResult::Click(2));
//! ```
//!
//! Arming again before the frame replaces the previous element; only one drag
//! can end per frame that matters.

/// Outcome of a click seen while suppression may be armed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickResult<K> {
    /// Let the click through to its target.
    Click(K),
    /// Swallow the click. Carries the armed element that caught it.
    Suppressed(K),
}

impl<K> ClickResult<K> {
    /// Returns `true` if the click must be swallowed.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed(_))
    }
}

/// Post-drag click guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickSuppression<K> {
    armed: Option<K>,
}

impl<K> Default for ClickSuppression<K> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<K: Clone> ClickSuppression<K> {
    /// A guard that lets every click through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start swallowing clicks on `element` and its descendants.
    pub fn arm(&mut self, element: K) {
        self.armed = Some(element);
    }

    /// The element currently catching clicks.
    pub fn armed(&self) -> Option<&K> {
        self.armed.as_ref()
    }

    /// Returns `true` while clicks may be swallowed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Classify a click on `target`.
    ///
    /// `contains(outer, inner)` must return `true` when `inner` is `outer` or one
    /// of its descendants.
    pub fn on_click(&self, target: &K, contains: impl Fn(&K, &K) -> bool) -> ClickResult<K> {
        match &self.armed {
            Some(armed) if contains(armed, target) => ClickResult::Suppressed(armed.clone()),
            _ => ClickResult::Click(target.clone()),
        }
    }

    /// Stop swallowing clicks, returning the element that was armed.
    pub fn release(&mut self) -> Option<K> {
        self.armed.take()
    }
}
