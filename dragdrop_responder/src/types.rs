// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types shared by the router and the dispatcher.

/// Propagation phase of a single dispatch step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root → target, excluding the target.
    Capture,
    /// The target itself.
    Target,
    /// Target → root, excluding the target.
    Bubble,
}

/// Handler decision for a dispatch step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Keep propagating.
    #[default]
    Continue,
    /// Abort propagation after this step.
    Stop,
}

/// One step of a propagation sequence.
///
/// `meta` carries whatever the emitter wants every listener on the path to see,
/// for example the notification being delivered.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch<K, M = ()> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node visited by this step.
    pub node: K,
    /// Optional payload shared by the sequence.
    pub meta: Option<M>,
}

impl<K, M> Dispatch<K, M> {
    /// A capture step without payload.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
            meta: None,
        }
    }

    /// A target step without payload.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
            meta: None,
        }
    }

    /// A bubble step without payload.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
            meta: None,
        }
    }

    /// Attach a payload to this step.
    pub fn with_meta(mut self, meta: M) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Returns `true` for target and bubble steps, the ones non-capturing listeners see.
    pub fn is_bubbling(&self) -> bool {
        matches!(self.phase, Phase::Target | Phase::Bubble)
    }
}

/// Parent relationship provider used to reconstruct root→target paths.
pub trait ParentLookup<K> {
    /// Parent of `node`, or `None` at the root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// Parent lookup for flat trees: every node is a root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _: &K) -> Option<K> {
        None
    }
}
