// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragdrop Responder: a deterministic, `no_std` router for drag and drop notifications.
//!
//! ## Overview
//!
//! Draggables and dropzones communicate through notifications that behave like
//! bubbling DOM events: a notification is dispatched at the element under the
//! pointer and travels up through its ancestors, where dropzones listen. This
//! crate builds those propagation sequences and walks them.
//! It does not perform hit testing and knows nothing about drag state.
//!
//! ## Paths
//!
//! Provide a [`ParentLookup`](crate::types::ParentLookup) for your element tree.
//! [`Router`](crate::router::Router) reconstructs the root→target path and emits
//! [`Dispatch`](crate::types::Dispatch) steps:
//!
//! - [`Router::dispatch_for`](crate::router::Router::dispatch_for): capture → target → bubble.
//! - [`Router::bubble_for`](crate::router::Router::bubble_for): target → bubble only.
//!
//! Path reconstruction is bounded by [`MAX_PATH_DEPTH`](crate::router::MAX_PATH_DEPTH),
//! so a cyclic parent lookup cannot hang the caller.
//!
//! ## Dispatcher
//!
//! Execute handlers over the sequence and honor stop outcomes with [`dispatcher::run`].
//!
//! ```
//! use dragdrop_responder::dispatcher;
//! use dragdrop_responder::router::Router;
//! use dragdrop_responder::types::{Outcome, ParentLookup};
//!
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node > 1).then(|| node - 1)
//!     }
//! }
//!
//! let router = Router::with_parent(Parents);
//! let seq = router.bubble_for(3_u32, Some("drop"));
//!
//! let mut reached = Vec::new();
//! let stopped = dispatcher::run(&seq, &mut reached, |d, reached| {
//!     reached.push(d.node);
//!     Outcome::Continue
//! });
//! assert!(stopped.is_none());
//! assert_eq!(reached, vec![3, 2, 1]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod router;
pub mod types;
