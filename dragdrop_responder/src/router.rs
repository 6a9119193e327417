// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs root→target paths through a [`ParentLookup`] and emits dispatch steps.
//!
//! - [`Router::dispatch_for`] produces the full capture → target → bubble sequence.
//! - [`Router::bubble_for`] produces only target → bubble, which is what listeners
//!   registered without capture observe (draggable roots receiving pointer-down,
//!   dropzones receiving internal drag notifications).
//!
//! ## Termination
//!
//! Paths are capped at [`MAX_PATH_DEPTH`] nodes. A parent lookup that loops back
//! onto itself yields a truncated path instead of hanging the caller.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase};

/// Upper bound on the number of nodes in a reconstructed path.
pub const MAX_PATH_DEPTH: usize = 4096;

/// Deterministic propagation router.
///
/// ## Usage
///
/// - Construct with [`Router::new`] for a default parent lookup, or with
///   [`Router::with_parent`] to walk an application tree.
/// - Call [`Router::dispatch_for`] or [`Router::bubble_for`] for the node an
///   event is targeted at, then run the sequence with
///   [`dispatcher::run`](crate::dispatcher::run).
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    pub(crate) parent: P,
    pub(crate) _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self::with_parent(P::default())
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Root→target path for `target`.
    ///
    /// The walk stops at the root, at [`MAX_PATH_DEPTH`] nodes, or when a node
    /// repeats the target (a trivially cyclic lookup).
    pub fn path_to(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        loop {
            out.push(cur);
            if out.len() >= MAX_PATH_DEPTH {
                break;
            }
            match self.parent.parent_of(&cur) {
                Some(p) if p != target => cur = p,
                _ => break,
            }
        }
        out.reverse();
        out
    }

    /// Emit a capture → target → bubble sequence for `target`.
    pub fn dispatch_for<M: Clone>(&self, target: K, meta: Option<M>) -> Vec<Dispatch<K, M>> {
        let path = self.path_to(target);
        Self::emit_path(&path, meta, true)
    }

    /// Emit a target → bubble sequence for `target`, skipping capture.
    pub fn bubble_for<M: Clone>(&self, target: K, meta: Option<M>) -> Vec<Dispatch<K, M>> {
        let path = self.path_to(target);
        Self::emit_path(&path, meta, false)
    }

    fn emit_path<M: Clone>(path: &[K], meta: Option<M>, with_capture: bool) -> Vec<Dispatch<K, M>> {
        let mut out = Vec::new();
        let Some((target, ancestors)) = path.split_last() else {
            return out;
        };

        if with_capture {
            for &n in ancestors {
                out.push(Dispatch {
                    phase: Phase::Capture,
                    node: n,
                    meta: meta.clone(),
                });
            }
        }

        out.push(Dispatch {
            phase: Phase::Target,
            node: *target,
            meta: meta.clone(),
        });

        for &n in ancestors.iter().rev() {
            out.push(Dispatch {
                phase: Phase::Bubble,
                node: n,
                meta: meta.clone(),
            });
        }
        out
    }
}
