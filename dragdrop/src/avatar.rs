// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag avatars: what the user sees moving during a drag.
//!
//! An [`Avatar`] strategy is told when a drag starts, moves and ends, and
//! reports the element it renders so hit testing can look underneath it.
//! Two strategies ship with the crate:
//!
//! - [`OriginalAvatar`] moves the draggable itself and leaves it at the drop
//!   position.
//! - [`CloneAvatar`] moves a copy and removes it at the end.
//!
//! Position updates go through the runtime's [`FrameBatch`]: only the last
//! translate requested before [`DragDrop::on_animation_frame`] is written.
//!
//! While a drag is active the avatar element has `pointer-events: none`, so
//! the element beneath it receives hit tests. The previous value is restored
//! when the drag ends.
//!
//! [`DragDrop::on_animation_frame`]: crate::DragDrop::on_animation_frame

use core::fmt;

use dragdrop_event_state::frame::FrameBatch;
use kurbo::{Point, Vec2};

use crate::host::Host;

/// A translate waiting for the next animation frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AvatarFrame<E> {
    /// Element to move.
    pub element: E,
    /// Offset from the element's laid out position.
    pub translate: Vec2,
}

impl<E: Copy> AvatarFrame<E> {
    /// The `transform` style value for this frame.
    pub fn transform(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0)",
            self.translate.x, self.translate.y
        )
    }

    pub(crate) fn apply<H: Host<Element = E>>(&self, host: &mut H) {
        host.set_style(self.element, "transform", Some(&self.transform()));
    }
}

/// Services available to an avatar strategy.
pub struct AvatarContext<'a, H: Host> {
    /// The document.
    pub host: &'a mut H,
    /// Pending translate, applied at the next animation frame.
    pub frames: &'a mut FrameBatch<AvatarFrame<H::Element>>,
}

impl<H: Host> fmt::Debug for AvatarContext<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvatarContext")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl<H: Host> AvatarContext<'_, H> {
    /// Move `element` by `translate` at the next animation frame.
    pub fn set_translate(&mut self, element: H::Element, translate: Vec2) {
        self.frames.request(AvatarFrame { element, translate });
    }

    /// Drop any pending translate and clear the transform of `element`.
    pub fn remove_translate(&mut self, element: H::Element) {
        self.frames.stop();
        self.host.set_style(element, "transform", None);
    }

    /// Write `left`/`top` so the border box of `element` lands on `position`.
    pub fn set_left_top(&mut self, element: H::Element, position: Point, margins: Vec2) {
        let left = format!("{}px", position.x - margins.x);
        let top = format!("{}px", position.y - margins.y);
        self.host.set_style(element, "left", Some(&left));
        self.host.set_style(element, "top", Some(&top));
    }
}

/// A strategy rendering the dragged element.
///
/// Positions are page coordinates. `start_position` is where the drag began
/// and `position` the current, axis constrained, pointer position.
pub trait Avatar<H: Host> {
    /// The drag crossed its threshold. Create or pick the avatar element.
    fn start(&mut self, cx: &mut AvatarContext<'_, H>, draggable: H::Element, start_position: Point);

    /// The pointer moved.
    fn update(&mut self, cx: &mut AvatarContext<'_, H>, start_position: Point, position: Point);

    /// The drag ended or was cancelled.
    fn end(&mut self, cx: &mut AvatarContext<'_, H>, start_position: Point, position: Point);

    /// The element currently rendered, if a drag is in progress.
    fn element(&self) -> Option<H::Element>;
}

/// Moves the draggable element itself.
///
/// At the end the translate is replaced by `left`/`top`, clamped so the
/// element stays at least one pixel inside the page.
pub struct OriginalAvatar<H: Host> {
    element: Option<H::Element>,
    start_offset: Point,
    margins: Vec2,
}

impl<H: Host> OriginalAvatar<H> {
    /// A new strategy.
    pub fn new() -> Self {
        Self {
            element: None,
            start_offset: Point::ZERO,
            margins: Vec2::ZERO,
        }
    }
}

impl<H: Host> Default for OriginalAvatar<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> fmt::Debug for OriginalAvatar<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginalAvatar")
            .field("element", &self.element)
            .field("start_offset", &self.start_offset)
            .field("margins", &self.margins)
            .finish()
    }
}

impl<H: Host> Avatar<H> for OriginalAvatar<H> {
    fn start(&mut self, cx: &mut AvatarContext<'_, H>, draggable: H::Element, _start_position: Point) {
        self.element = Some(draggable);
        self.start_offset = cx.host.offset_of(draggable);
        self.margins = cx.host.margins(draggable);
        cx.host.set_style(draggable, "position", Some("absolute"));
        cx.set_left_top(draggable, self.start_offset, self.margins);
    }

    fn update(&mut self, cx: &mut AvatarContext<'_, H>, start_position: Point, position: Point) {
        if let Some(element) = self.element {
            cx.set_translate(element, position - start_position);
        }
    }

    fn end(&mut self, cx: &mut AvatarContext<'_, H>, start_position: Point, position: Point) {
        let Some(element) = self.element.take() else {
            return;
        };
        cx.remove_translate(element);
        let clamped = Point::new(position.x.max(1.0), position.y.max(1.0));
        cx.set_left_top(element, self.start_offset + (clamped - start_position), self.margins);
    }

    fn element(&self) -> Option<H::Element> {
        self.element
    }
}

/// Moves a copy of the draggable, appended next to it and removed at the end.
pub struct CloneAvatar<H: Host> {
    element: Option<H::Element>,
}

impl<H: Host> CloneAvatar<H> {
    /// A new strategy.
    pub fn new() -> Self {
        Self { element: None }
    }
}

impl<H: Host> Default for CloneAvatar<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> fmt::Debug for CloneAvatar<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloneAvatar")
            .field("element", &self.element)
            .finish()
    }
}

impl<H: Host> Avatar<H> for CloneAvatar<H> {
    fn start(&mut self, cx: &mut AvatarContext<'_, H>, draggable: H::Element, _start_position: Point) {
        let clone = cx.host.clone_element(draggable);
        cx.host.remove_attribute(clone, "id");
        cx.host.set_style(clone, "cursor", Some("inherit"));
        cx.host.set_style(clone, "position", Some("absolute"));
        cx.host.set_style(clone, "z-index", Some("100"));
        let parent = cx.host.parent(draggable).unwrap_or_else(|| cx.host.body());
        cx.host.append_child(parent, clone);

        let margins = cx.host.margins(clone);
        let offset = cx.host.offset_of(draggable);
        cx.set_left_top(clone, offset, margins);
        self.element = Some(clone);
    }

    fn update(&mut self, cx: &mut AvatarContext<'_, H>, start_position: Point, position: Point) {
        if let Some(element) = self.element {
            cx.set_translate(element, position - start_position);
        }
    }

    fn end(&mut self, cx: &mut AvatarContext<'_, H>, _start_position: Point, _position: Point) {
        if let Some(element) = self.element.take() {
            cx.frames.stop();
            cx.host.remove_element(element);
        }
    }

    fn element(&self) -> Option<H::Element> {
        self.element
    }
}

/// Per-draggable bookkeeping around a strategy: the dragging flag and the
/// saved `pointer-events` value.
#[derive(Clone, Debug, Default)]
pub(crate) struct AvatarState {
    dragging: bool,
    pointer_events_before: Option<String>,
}

impl AvatarState {
    pub(crate) fn start<H: Host>(
        &mut self,
        avatar: &mut dyn Avatar<H>,
        cx: &mut AvatarContext<'_, H>,
        draggable: H::Element,
        start_position: Point,
    ) {
        self.dragging = true;
        avatar.start(cx, draggable, start_position);
        if let Some(element) = avatar.element() {
            self.pointer_events_before = cx.host.style(element, "pointer-events");
            cx.host.set_style(element, "pointer-events", Some("none"));
        }
    }

    pub(crate) fn update<H: Host>(
        &self,
        avatar: &mut dyn Avatar<H>,
        cx: &mut AvatarContext<'_, H>,
        start_position: Point,
        position: Point,
    ) {
        if self.dragging {
            avatar.update(cx, start_position, position);
        }
    }

    pub(crate) fn end<H: Host>(
        &mut self,
        avatar: &mut dyn Avatar<H>,
        cx: &mut AvatarContext<'_, H>,
        start_position: Point,
        position: Point,
    ) {
        if !core::mem::take(&mut self.dragging) {
            return;
        }
        let element = avatar.element();
        avatar.end(cx, start_position, position);
        if let Some(element) = element {
            let before = self.pointer_events_before.take();
            cx.host.set_style(element, "pointer-events", before.as_deref());
        }
    }
}
