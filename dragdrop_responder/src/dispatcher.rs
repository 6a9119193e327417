// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a dispatch sequence and honor stop outcomes.
//!
//! The dispatcher executes handlers for each step of a propagation sequence:
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - The return value from [`run`] reports where propagation stopped (if at all).
//! - Anything richer, such as "default prevented" or the public events a
//!   listener produced, lives on the event value you pass to [`run`].
//!
//! ## Minimal example
//!
//! A drag notification bubbling from a list item up to two nested drop areas,
//! where the inner area is "exact" and keeps the notification to itself:
//!
//! ```
//! use dragdrop_responder::dispatcher;
//! use dragdrop_responder::types::{Dispatch, Outcome};
//! #[derive(Copy, Clone, Debug, PartialEq)] struct Node(u32);
//!
//! let seq: Vec<Dispatch<Node>> = vec![
//!     Dispatch::target(Node(3)),
//!     Dispatch::bubble(Node(2)),
//!     Dispatch::bubble(Node(1)),
//! ];
//!
//! let mut received: Vec<u32> = Vec::new();
//! let stop_at = dispatcher::run(&seq, &mut received, |d, received| {
//!     received.push(d.node.0);
//!     if d.node.0 == 2 { Outcome::Stop } else { Outcome::Continue }
//! });
//!
//! assert_eq!(stop_at.map(|d| d.node), Some(Node(2)));
//! assert_eq!(received, vec![3, 2]);
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a dispatch sequence and honor stop outcomes.
///
/// - `seq`: a sequence produced by [`Router`](crate::router::Router), or built by hand
///   in the same capture → target → bubble order.
/// - `event`: a mutable value carried across handler calls; you own its shape.
/// - `handler`: per-step callback; [`Outcome::Stop`] aborts the remaining steps.
///
/// Returns `None` if the full sequence was visited, or the step at which a
/// handler stopped propagation.
pub fn run<'a, K, M, E>(
    seq: &'a [Dispatch<K, M>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K, M>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K, M>> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}
