// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session record and the slot that keeps it exclusive.
//!
//! ## Lifecycle
//!
//! 1) A qualifying pointer-down creates a [`DragSession`] and places it in the
//!    [`SessionSlot`] with [`SessionSlot::begin`]. The session is *pending*:
//!    [`DragSession::is_started`] is `false`.
//! 2) Each move writes the position with [`DragSession::set_position`], which
//!    applies the session's [`Axis`]. Once [`DragSession::reached_threshold`]
//!    holds, the owner calls [`DragSession::mark_started`].
//! 3) End or cancel removes the session with [`SessionSlot::end`].
//!
//! ## Exclusivity
//!
//! The slot holds at most one session. [`SessionSlot::begin`] refuses a new
//! session while one exists, so a second draggable cannot start until the
//! first one ends.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use dragdrop_event_state::axis::Axis;
//! use dragdrop_event_state::session::{DragSession, DraggableId, SessionSlot};
//!
//! let mut slot: SessionSlot<u32, ()> = SessionSlot::new();
//! let first = DragSession::new(DraggableId::new(1), 10, None, Point::ZERO, Axis::Both, Vec2::ZERO);
//! let second = DragSession::new(DraggableId::new(2), 20, None, Point::ZERO, Axis::Both, Vec2::ZERO);
//!
//! assert!(slot.begin(first).is_ok());
//! assert!(slot.begin(second).is_err());
//! assert_eq!(slot.owner(), Some(DraggableId::new(1)));
//!
//! slot.end();
//! assert!(slot.is_empty());
//! ```

use core::fmt;

use kurbo::{Point, Vec2};

use crate::axis::Axis;

/// Identity of a draggable instance.
///
/// Ids are assigned in increasing order as draggables are attached and are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DraggableId(u64);

impl DraggableId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DraggableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draggable#{}", self.0)
    }
}

/// State of an in-progress drag.
///
/// `E` is the element handle and `D` the user payload attached to the draggable.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<E, D> {
    draggable: DraggableId,
    element: E,
    data: Option<D>,
    start_position: Point,
    position: Point,
    axis: Axis,
    shift: Vec2,
    started: bool,
    avatar_element: Option<E>,
}

impl<E, D> DragSession<E, D> {
    /// Create a pending session.
    ///
    /// `start_position` is the page position of the pointer-down and `shift` the
    /// pointer offset from the element origin at that moment.
    pub fn new(
        draggable: DraggableId,
        element: E,
        data: Option<D>,
        start_position: Point,
        axis: Axis,
        shift: Vec2,
    ) -> Self {
        Self {
            draggable,
            element,
            data,
            start_position,
            position: start_position,
            axis,
            shift,
            started: false,
            avatar_element: None,
        }
    }

    /// The draggable that owns this session.
    pub fn draggable(&self) -> DraggableId {
        self.draggable
    }

    /// The dragged element.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// User payload snapshotted from the draggable at start.
    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    /// Page position of the pointer-down.
    pub fn start_position(&self) -> Point {
        self.start_position
    }

    /// Current position, constrained by [`DragSession::axis`].
    pub fn position(&self) -> Point {
        self.position
    }

    /// Write the current position, applying the axis constraint.
    pub fn set_position(&mut self, position: Point) {
        self.position = self.axis.constrain(self.start_position, position);
    }

    /// Axis constraint for this session.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Pointer offset from the element origin at start.
    pub fn shift(&self) -> Vec2 {
        self.shift
    }

    /// Where the element origin would be if it followed the pointer.
    pub fn element_origin(&self) -> Point {
        self.position - self.shift
    }

    /// Distance between the start position and the current position.
    pub fn travelled(&self) -> f64 {
        self.start_position.distance(self.position)
    }

    /// Returns `true` once the current position is at least `min_distance` away from the start.
    pub fn reached_threshold(&self, min_distance: f64) -> bool {
        self.travelled() >= min_distance
    }

    /// `false` while the gesture may still turn out to be a click.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Record that the drag threshold has been crossed.
    ///
    /// Returns `true` the first time it is called for this session.
    pub fn mark_started(&mut self) -> bool {
        !core::mem::replace(&mut self.started, true)
    }

    /// The element rendering the drag, once an avatar has started.
    pub fn avatar_element(&self) -> Option<&E> {
        self.avatar_element.as_ref()
    }

    /// Record the element an avatar renders for this session.
    pub fn set_avatar_element(&mut self, element: Option<E>) {
        self.avatar_element = element;
    }
}

/// The single slot holding the current drag session, if any.
#[derive(Clone, Debug)]
pub struct SessionSlot<E, D> {
    current: Option<DragSession<E, D>>,
}

impl<E, D> Default for SessionSlot<E, D> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<E, D> SessionSlot<E, D> {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `session` in the slot.
    ///
    /// Fails, handing the session back, while another session exists.
    pub fn begin(&mut self, session: DragSession<E, D>) -> Result<&mut DragSession<E, D>, DragSession<E, D>> {
        if self.current.is_some() {
            return Err(session);
        }
        Ok(self.current.insert(session))
    }

    /// The current session.
    pub fn current(&self) -> Option<&DragSession<E, D>> {
        self.current.as_ref()
    }

    /// The current session, mutably.
    pub fn current_mut(&mut self) -> Option<&mut DragSession<E, D>> {
        self.current.as_mut()
    }

    /// The current session if it belongs to `draggable`.
    pub fn owned_by(&mut self, draggable: DraggableId) -> Option<&mut DragSession<E, D>> {
        self.current
            .as_mut()
            .filter(|session| session.draggable == draggable)
    }

    /// Owner of the current session.
    pub fn owner(&self) -> Option<DraggableId> {
        self.current.as_ref().map(|session| session.draggable)
    }

    /// Returns `true` when no session exists.
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Remove and return the current session.
    pub fn end(&mut self) -> Option<DragSession<E, D>> {
        self.current.take()
    }
}
