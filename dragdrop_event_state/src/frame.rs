// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation-frame batching.
//!
//! Pointer moves arrive faster than the screen refreshes. Visual updates are
//! therefore queued with [`FrameBatch::request`] and applied once per frame
//! with [`FrameBatch::run_frame`]. Only the most recent request survives: a
//! later request in the same frame replaces the earlier one.
//!
//! ```
//! use dragdrop_event_state::frame::FrameBatch;
//!
//! let mut batch = FrameBatch::new();
//! assert!(batch.request(1));   // schedule a frame
//! assert!(!batch.request(2));  // already scheduled, replaces the payload
//! assert_eq!(batch.run_frame(), Some(2));
//! assert_eq!(batch.run_frame(), None);
//! ```

/// Last-wins queue drained once per animation frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBatch<T> {
    pending: Option<T>,
}

impl<T> Default for FrameBatch<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameBatch<T> {
    /// An empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `update` for the next frame.
    ///
    /// Returns `true` when nothing was pending, meaning the caller has to
    /// schedule a frame.
    pub fn request(&mut self, update: T) -> bool {
        self.pending.replace(update).is_none()
    }

    /// Returns `true` while an update waits for a frame.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the queued update without applying it.
    pub fn stop(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Take the update to apply in this frame.
    pub fn run_frame(&mut self) -> Option<T> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_request_wins() {
        let mut batch = FrameBatch::new();
        assert!(batch.request("a"));
        assert!(!batch.request("b"));
        assert!(!batch.request("c"));
        assert!(batch.is_pending());
        assert_eq!(batch.run_frame(), Some("c"));
        assert!(!batch.is_pending());
    }

    #[test]
    fn stop_discards_pending_update() {
        let mut batch = FrameBatch::new();
        batch.request(5_u8);
        assert_eq!(batch.stop(), Some(5));
        assert_eq!(batch.run_frame(), None);
        assert!(batch.request(6));
    }
}
