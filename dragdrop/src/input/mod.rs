// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input normalization: raw device events in, drag signals out.
//!
//! ## Raw input
//!
//! An [`InputEvent`] wraps one [`InputKind`]: a mouse, touch or pointer event,
//! a key press, a window blur or a click. It also carries the two flags a
//! browser event has, "default prevented" and "propagation stopped", which
//! adapters and the runtime set while handling it.
//!
//! ## Adapters
//!
//! Each draggable owns one or two [`InputAdapter`]s, chosen once from the
//! host's [`Capabilities`](crate::host::Capabilities) by [`select_adapters`]:
//!
//! - pointer events available: [`PointerAdapter`](pointer::PointerAdapter) alone;
//! - otherwise touch events available: [`TouchAdapter`](touch::TouchAdapter)
//!   and [`MouseAdapter`](mouse::MouseAdapter);
//! - otherwise: [`MouseAdapter`](mouse::MouseAdapter) alone.
//!
//! An adapter turns the raw events it listens to into a [`Signal`]:
//! `Start`, `Move`, `End` or `Cancel`. Which raw events it listens to is
//! explicit [`Listeners`] bookkeeping in a [`ListenerSet`]. Start listeners
//! live from attach to detach. Drag listeners (move, end, cancel, Escape and
//! blur) are installed by [`InputAdapter::begin_drag`] when a session starts
//! and released by [`InputAdapter::reset`] when it ends.

use core::fmt;

use bitflags::bitflags;
use dragdrop_event_state::axis::Axis;
use kurbo::Point;
use smallvec::SmallVec;
use tracing::trace;

use crate::host::{Capabilities, Host, matches_with_ancestors};

pub mod mouse;
pub mod pointer;
pub mod touch;

/// A raw input event and its handling flags.
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent<E> {
    /// What happened.
    pub kind: InputKind<E>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<E> InputEvent<E> {
    /// Wrap a raw event kind.
    pub fn new(kind: InputKind<E>) -> Self {
        Self {
            kind,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Suppress the platform's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` once [`InputEvent::prevent_default`] has been called.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Keep the event from reaching listeners further up the tree.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Returns `true` once [`InputEvent::stop_propagation`] has been called.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl<E> From<InputKind<E>> for InputEvent<E> {
    fn from(kind: InputKind<E>) -> Self {
        Self::new(kind)
    }
}

/// Keys the runtime distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Escape key, which cancels an active drag.
    Escape,
    /// Any other key.
    Other,
}

/// A mouse or pointer event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseInput<E> {
    /// Element the event was dispatched at.
    pub target: E,
    /// Button code; `0` is the primary button.
    pub button: i16,
    /// Position in page coordinates.
    pub page: Point,
    /// Position in client (viewport) coordinates.
    pub client: Point,
}

impl<E> MouseInput<E> {
    /// Primary button event at `page`, with the client position equal to the page position.
    pub fn new(target: E, page: Point) -> Self {
        Self {
            target,
            button: 0,
            page,
            client: page,
        }
    }

    /// Replace the button code.
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    /// Replace the client position.
    pub fn with_client(mut self, client: Point) -> Self {
        self.client = client;
        self
    }
}

/// One touch point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint<E> {
    /// Element the touch started on.
    pub target: E,
    /// Position in page coordinates.
    pub page: Point,
    /// Position in client (viewport) coordinates.
    pub client: Point,
}

impl<E> TouchPoint<E> {
    /// Touch at `page`, with the client position equal to the page position.
    pub fn new(target: E, page: Point) -> Self {
        Self {
            target,
            page,
            client: page,
        }
    }

    /// Replace the client position.
    pub fn with_client(mut self, client: Point) -> Self {
        self.client = client;
        self
    }
}

/// A touch event.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchInput<E> {
    /// Every touch currently on the surface.
    pub touches: SmallVec<[TouchPoint<E>; 2]>,
    /// Touches that changed in this event.
    pub changed: SmallVec<[TouchPoint<E>; 2]>,
}

impl<E: Copy> TouchInput<E> {
    /// A single finger on the surface that just changed.
    pub fn single(point: TouchPoint<E>) -> Self {
        Self {
            touches: smallvec::smallvec![point],
            changed: smallvec::smallvec![point],
        }
    }

    /// A finger lifted off the surface, leaving no other touches.
    pub fn released(point: TouchPoint<E>) -> Self {
        Self {
            touches: SmallVec::new(),
            changed: smallvec::smallvec![point],
        }
    }

    /// Several fingers on the surface; the first one changed.
    pub fn multi(points: &[TouchPoint<E>]) -> Self {
        Self {
            touches: points.iter().copied().collect(),
            changed: points.iter().take(1).copied().collect(),
        }
    }
}

/// Raw input event kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind<E> {
    /// Mouse button pressed on an element.
    MouseDown(MouseInput<E>),
    /// Mouse moved anywhere in the document.
    MouseMove(MouseInput<E>),
    /// Mouse button released anywhere in the document.
    MouseUp(MouseInput<E>),
    /// Touch began on an element.
    TouchStart(TouchInput<E>),
    /// Touch moved anywhere in the document.
    TouchMove(TouchInput<E>),
    /// Touch ended anywhere in the document.
    TouchEnd(TouchInput<E>),
    /// The platform took over the touch.
    TouchCancel(TouchInput<E>),
    /// Pointer pressed on an element.
    PointerDown(MouseInput<E>),
    /// Pointer moved anywhere in the document.
    PointerMove(MouseInput<E>),
    /// Pointer released anywhere in the document.
    PointerUp(MouseInput<E>),
    /// The platform took over the pointer.
    PointerCancel(MouseInput<E>),
    /// Key pressed.
    KeyDown(Key),
    /// The window lost focus.
    Blur,
    /// Click on an element.
    Click {
        /// Element the click was dispatched at.
        target: E,
    },
}

impl<E: Copy> InputKind<E> {
    /// Element the event is dispatched at, if it has one.
    pub fn target(&self) -> Option<E> {
        match self {
            Self::MouseDown(m)
            | Self::MouseMove(m)
            | Self::MouseUp(m)
            | Self::PointerDown(m)
            | Self::PointerMove(m)
            | Self::PointerUp(m)
            | Self::PointerCancel(m) => Some(m.target),
            Self::TouchStart(t) | Self::TouchMove(t) | Self::TouchEnd(t) | Self::TouchCancel(t) => {
                t.changed.first().or(t.touches.first()).map(|p| p.target)
            }
            Self::Click { target } => Some(*target),
            Self::KeyDown(_) | Self::Blur => None,
        }
    }

    /// Returns `true` for events that may begin a drag on the element they hit.
    pub fn is_start(&self) -> bool {
        matches!(
            self,
            Self::MouseDown(_) | Self::TouchStart(_) | Self::PointerDown(_)
        )
    }

    /// Returns `true` for touch events.
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            Self::TouchStart(_) | Self::TouchMove(_) | Self::TouchEnd(_) | Self::TouchCancel(_)
        )
    }

    /// Returns `true` for mouse and pointer events, the ones followed by a click.
    pub fn is_mouse_like(&self) -> bool {
        matches!(
            self,
            Self::MouseDown(_)
                | Self::MouseMove(_)
                | Self::MouseUp(_)
                | Self::PointerDown(_)
                | Self::PointerMove(_)
                | Self::PointerUp(_)
                | Self::PointerCancel(_)
        )
    }
}

bitflags! {
    /// Raw event listeners an adapter can have installed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Listeners: u16 {
        /// `mousedown` on the draggable root.
        const MOUSE_DOWN     = 1 << 0;
        /// `mousemove` on the document.
        const MOUSE_MOVE     = 1 << 1;
        /// `mouseup` on the document.
        const MOUSE_UP       = 1 << 2;
        /// `touchstart` on the draggable root.
        const TOUCH_START    = 1 << 3;
        /// `touchmove` on the document.
        const TOUCH_MOVE     = 1 << 4;
        /// `touchend` on the document.
        const TOUCH_END      = 1 << 5;
        /// `touchcancel` on the document.
        const TOUCH_CANCEL   = 1 << 6;
        /// `pointerdown` on the draggable root.
        const POINTER_DOWN   = 1 << 7;
        /// `pointermove` on the document.
        const POINTER_MOVE   = 1 << 8;
        /// `pointerup` on the document.
        const POINTER_UP     = 1 << 9;
        /// `pointercancel` on the document.
        const POINTER_CANCEL = 1 << 10;
        /// `keydown` on the document.
        const KEY_DOWN       = 1 << 11;
        /// `blur` on the window.
        const BLUR           = 1 << 12;
    }
}

impl Listeners {
    /// The listener that receives `kind`, or `None` for events no adapter handles.
    pub fn of<E>(kind: &InputKind<E>) -> Option<Self> {
        Some(match kind {
            InputKind::MouseDown(_) => Self::MOUSE_DOWN,
            InputKind::MouseMove(_) => Self::MOUSE_MOVE,
            InputKind::MouseUp(_) => Self::MOUSE_UP,
            InputKind::TouchStart(_) => Self::TOUCH_START,
            InputKind::TouchMove(_) => Self::TOUCH_MOVE,
            InputKind::TouchEnd(_) => Self::TOUCH_END,
            InputKind::TouchCancel(_) => Self::TOUCH_CANCEL,
            InputKind::PointerDown(_) => Self::POINTER_DOWN,
            InputKind::PointerMove(_) => Self::POINTER_MOVE,
            InputKind::PointerUp(_) => Self::POINTER_UP,
            InputKind::PointerCancel(_) => Self::POINTER_CANCEL,
            InputKind::KeyDown(_) => Self::KEY_DOWN,
            InputKind::Blur => Self::BLUR,
            InputKind::Click { .. } => return None,
        })
    }
}

/// Installed listeners of one adapter, split by lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerSet {
    start: Listeners,
    drag: Listeners,
}

impl ListenerSet {
    /// Install start listeners.
    pub fn install_start(&mut self, listeners: Listeners) {
        self.start |= listeners;
    }

    /// Install drag listeners.
    pub fn install_drag(&mut self, listeners: Listeners) {
        self.drag |= listeners;
    }

    /// Release every drag listener.
    pub fn release_drag(&mut self) {
        self.drag = Listeners::empty();
    }

    /// Release every listener.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Start listeners currently installed.
    pub fn start(&self) -> Listeners {
        self.start
    }

    /// Drag listeners currently installed.
    pub fn drag(&self) -> Listeners {
        self.drag
    }

    /// Every listener currently installed.
    pub fn installed(&self) -> Listeners {
        self.start | self.drag
    }
}

/// Abstract drag signal produced by an adapter.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal<E> {
    /// A qualifying press at a page position.
    Start {
        /// Page position of the press.
        position: Point,
    },
    /// The pointer moved.
    Move {
        /// Page position.
        position: Point,
        /// Client position, used for hit testing.
        client: Point,
    },
    /// The pointer was released.
    End {
        /// Page position.
        position: Point,
        /// Client position, used for hit testing.
        client: Point,
        /// Element the release was dispatched at, when the device reports a
        /// meaningful one. `None` means "hit test the client position".
        target: Option<E>,
    },
    /// The gesture was abandoned.
    Cancel,
}

/// What an adapter needs to know about its draggable while translating.
#[derive(Debug)]
pub struct InputContext<'a, H: Host> {
    /// The document.
    pub host: &'a H,
    /// Root element of the draggable.
    pub root: H::Element,
    /// Whether the draggable currently allows starting a drag.
    pub enabled: bool,
    /// Axis constraint of the draggable.
    pub axis: Axis,
    /// Handle selector, if any.
    pub handle: Option<&'a str>,
    /// Cancel selector, if any.
    pub cancel: Option<&'a str>,
    /// A drag session exists, owned by any draggable.
    pub busy: bool,
    /// Start position of this draggable's session while it is pending.
    pub pending_start: Option<Point>,
}

impl<H: Host> InputContext<'_, H> {
    /// Returns `true` if a drag may start on `target`.
    ///
    /// The target must not be inside a cancel match. With a handle selector, it
    /// must also be inside a handle match that is inside the root.
    pub fn is_valid_start_target(&self, target: H::Element) -> bool {
        if let Some(cancel) = self.cancel
            && matches_with_ancestors(self.host, target, cancel)
        {
            return false;
        }
        let Some(handle) = self.handle else {
            return true;
        };
        let mut current = Some(target);
        while let Some(element) = current {
            if self.host.matches(element, handle) {
                return self.host.contains(self.root, element);
            }
            if element == self.root {
                return false;
            }
            current = self.host.parent(element);
        }
        false
    }

    /// Common start checks, in order: enabled, no session, valid target.
    pub fn accepts_start(&self, target: H::Element) -> bool {
        if !self.enabled {
            trace!(target: "dragdrop::input", element = ?target, "start ignored: draggable disabled");
            return false;
        }
        if self.busy {
            trace!(target: "dragdrop::input", element = ?target, "start ignored: a drag is in progress");
            return false;
        }
        if !self.is_valid_start_target(target) {
            trace!(target: "dragdrop::input", element = ?target, "start ignored: handle or cancel rejected target");
            return false;
        }
        true
    }

    /// Mouse and pointer presses: the primary button only, and no default
    /// prevention on form controls so they keep focus and dropdowns.
    pub(crate) fn press(
        &self,
        event: &mut InputEvent<H::Element>,
        input: MouseInput<H::Element>,
    ) -> Option<Signal<H::Element>> {
        if input.button != 0 {
            trace!(target: "dragdrop::input", button = input.button, "start ignored: not the primary button");
            return None;
        }
        if !self.accepts_start(input.target) {
            return None;
        }
        if !self.host.is_form_control(input.target) {
            event.prevent_default();
        }
        Some(Signal::Start {
            position: input.page,
        })
    }
}

/// Escape and blur cancel every drag, whatever the device.
pub(crate) fn escape_or_blur<E>(kind: &InputKind<E>) -> Option<Signal<E>> {
    match kind {
        InputKind::KeyDown(Key::Escape) | InputKind::Blur => Some(Signal::Cancel),
        _ => None,
    }
}

/// One device family's translation from raw events to [`Signal`]s.
pub trait InputAdapter<H: Host>: fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Installed listeners.
    fn listeners(&self) -> &ListenerSet;

    /// Installed listeners, mutably.
    fn listeners_mut(&mut self) -> &mut ListenerSet;

    /// Install the press listener on the draggable root.
    fn install_start(&mut self);

    /// Install the document move listener.
    fn install_move(&mut self);

    /// Install the document release listener.
    fn install_end(&mut self);

    /// Install the device's cancel listener, if it has one.
    fn install_cancel(&mut self);

    /// Translate a raw event this adapter listens to.
    ///
    /// May mark the event default-prevented. Returns `None` when the event
    /// does not concern the drag.
    fn translate(
        &self,
        event: &mut InputEvent<H::Element>,
        cx: &InputContext<'_, H>,
    ) -> Option<Signal<H::Element>>;

    /// Install the Escape and blur listeners.
    fn install_esc_and_blur(&mut self) {
        self.listeners_mut()
            .install_drag(Listeners::KEY_DOWN | Listeners::BLUR);
    }

    /// Install every drag listener after a session began.
    fn begin_drag(&mut self) {
        self.install_move();
        self.install_end();
        self.install_cancel();
        self.install_esc_and_blur();
    }

    /// Returns `true` if a listener for `kind` is installed.
    fn listens_to(&self, kind: &InputKind<H::Element>) -> bool {
        Listeners::of(kind).is_some_and(|l| self.listeners().installed().contains(l))
    }

    /// Release the drag listeners, keeping the start listener.
    fn reset(&mut self) {
        self.listeners_mut().release_drag();
    }

    /// Release every listener.
    fn destroy(&mut self) {
        self.listeners_mut().release_all();
    }
}

/// Adapters for a platform, with their start listeners installed.
pub fn select_adapters<H: Host>(capabilities: Capabilities) -> SmallVec<[Box<dyn InputAdapter<H>>; 2]> {
    let mut adapters: SmallVec<[Box<dyn InputAdapter<H>>; 2]> = SmallVec::new();
    if capabilities.pointer_events {
        adapters.push(Box::new(pointer::PointerAdapter::default()));
    } else {
        if capabilities.touch_events {
            adapters.push(Box::new(touch::TouchAdapter::default()));
        }
        adapters.push(Box::new(mouse::MouseAdapter::default()));
    }
    for adapter in &mut adapters {
        adapter.install_start();
    }
    adapters
}

/// `touch-action` value for a draggable: the override, or what the axis allows.
pub fn touch_action_for(axis: Axis, custom: Option<&str>) -> &str {
    if let Some(custom) = custom {
        return custom;
    }
    match axis {
        Axis::Horizontal => "pan-y",
        Axis::Vertical => "pan-x",
        Axis::Both => "none",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementId, MemoryDocument};
    use kurbo::Rect;

    struct Fixture {
        doc: MemoryDocument,
        root: ElementId,
        grip: ElementId,
        field: ElementId,
        outside: ElementId,
    }

    fn fixture() -> Fixture {
        let mut doc = MemoryDocument::new();
        let root = doc.append(doc.body(), "div", Rect::new(0.0, 0.0, 100.0, 100.0));
        let grip = doc.append(root, "span", Rect::new(0.0, 0.0, 10.0, 10.0));
        doc.add_class(grip, "grip");
        let field = doc.append(root, "input", Rect::new(20.0, 20.0, 60.0, 30.0));
        let outside = doc.append(doc.body(), "span", Rect::new(200.0, 0.0, 210.0, 10.0));
        doc.add_class(outside, "grip");
        Fixture {
            doc,
            root,
            grip,
            field,
            outside,
        }
    }

    fn cx<'a>(f: &'a Fixture, handle: Option<&'a str>) -> InputContext<'a, MemoryDocument> {
        InputContext {
            host: &f.doc,
            root: f.root,
            enabled: true,
            axis: Axis::Both,
            handle,
            cancel: Some("input, textarea, button, select, option"),
            busy: false,
            pending_start: None,
        }
    }

    #[test]
    fn cancel_selector_rejects_before_handle() {
        let f = fixture();
        let cx = cx(&f, None);
        assert!(cx.is_valid_start_target(f.root));
        assert!(cx.is_valid_start_target(f.grip));
        assert!(!cx.is_valid_start_target(f.field));
    }

    #[test]
    fn handle_must_match_inside_root() {
        let f = fixture();
        let cx = cx(&f, Some(".grip"));
        assert!(cx.is_valid_start_target(f.grip));
        assert!(!cx.is_valid_start_target(f.root));
        assert!(!cx.is_valid_start_target(f.outside));
    }

    #[test]
    fn busy_or_disabled_context_refuses_start() {
        let f = fixture();
        let mut cx = cx(&f, None);
        cx.busy = true;
        assert!(!cx.accepts_start(f.root));
        cx.busy = false;
        cx.enabled = false;
        assert!(!cx.accepts_start(f.root));
    }

    #[test]
    fn press_prevents_default_except_on_form_controls() {
        let f = fixture();
        let mut cx = cx(&f, None);
        let down = MouseInput::new(f.grip, Point::new(1.0, 1.0));
        let mut event = InputEvent::new(InputKind::MouseDown(down));
        assert_eq!(
            cx.press(&mut event, down),
            Some(Signal::Start {
                position: Point::new(1.0, 1.0)
            })
        );
        assert!(event.is_default_prevented());

        cx.cancel = None;
        let down = MouseInput::new(f.field, Point::new(25.0, 25.0));
        let mut event = InputEvent::new(InputKind::MouseDown(down));
        assert!(cx.press(&mut event, down).is_some());
        assert!(!event.is_default_prevented());

        let right = MouseInput::new(f.grip, Point::ZERO).with_button(2);
        let mut event = InputEvent::new(InputKind::MouseDown(right));
        assert!(cx.press(&mut event, right).is_none());
    }

    #[test]
    fn adapter_selection_follows_capabilities() {
        let names = |caps| {
            select_adapters::<MemoryDocument>(caps)
                .iter()
                .map(|a| a.name())
                .collect::<Vec<_>>()
        };
        assert_eq!(
            names(Capabilities {
                pointer_events: true,
                touch_events: true
            }),
            vec!["pointer"]
        );
        assert_eq!(
            names(Capabilities {
                pointer_events: false,
                touch_events: true
            }),
            vec!["touch", "mouse"]
        );
        assert_eq!(names(Capabilities::default()), vec!["mouse"]);
    }

    #[test]
    fn touch_action_defaults_follow_axis() {
        assert_eq!(touch_action_for(Axis::Horizontal, None), "pan-y");
        assert_eq!(touch_action_for(Axis::Vertical, None), "pan-x");
        assert_eq!(touch_action_for(Axis::Both, None), "none");
        assert_eq!(touch_action_for(Axis::Both, Some("manipulation")), "manipulation");
    }

    #[test]
    fn listener_set_lifetimes() {
        let mut set = ListenerSet::default();
        set.install_start(Listeners::MOUSE_DOWN);
        set.install_drag(Listeners::MOUSE_MOVE | Listeners::KEY_DOWN);
        assert!(set.installed().contains(Listeners::MOUSE_DOWN | Listeners::KEY_DOWN));
        set.release_drag();
        assert_eq!(set.installed(), Listeners::MOUSE_DOWN);
        set.release_all();
        assert!(set.installed().is_empty());
        assert_eq!(Listeners::of(&InputKind::Click { target: 1_u8 }), None);
    }
}
