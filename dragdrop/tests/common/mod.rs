// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Documents, raw events and log setup shared by the scenario tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use dragdrop::input::{InputEvent, InputKind, Key, MouseInput, TouchInput, TouchPoint};
use dragdrop::memory::{ElementId, MemoryDocument};
use dragdrop::{Capabilities, DragDrop, Host, Notification};
use kurbo::{Point, Rect};

/// The runtime under test; payloads are plain numbers.
pub type Runtime = DragDrop<MemoryDocument, u32>;

/// Route `tracing` output to the test harness, once per binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// A page with a draggable card on the left and a drop area on the right.
///
/// ```text
/// source  (0,0)-(100,40)      contains grip (0,0)-(20,40) and field (60,5)-(90,35)
/// other   (0,300)-(100,340)
/// target  (200,0)-(400,200)   contains inner (250,50)-(350,150)
/// ```
#[derive(Debug)]
pub struct Board {
    pub doc: MemoryDocument,
    pub source: ElementId,
    pub grip: ElementId,
    pub field: ElementId,
    pub other: ElementId,
    pub target: ElementId,
    pub inner: ElementId,
}

pub fn board() -> Board {
    board_with(Capabilities::default())
}

pub fn board_with(capabilities: Capabilities) -> Board {
    init_tracing();
    let mut doc = MemoryDocument::new().with_capabilities(capabilities);
    let body = doc.body();
    let source = doc.append(body, "div", Rect::new(0.0, 0.0, 100.0, 40.0));
    let grip = doc.append(source, "span", Rect::new(0.0, 0.0, 20.0, 40.0));
    doc.add_class(grip, "grip");
    let field = doc.append(source, "input", Rect::new(60.0, 5.0, 90.0, 35.0));
    let other = doc.append(body, "div", Rect::new(0.0, 300.0, 100.0, 340.0));
    let target = doc.append(body, "div", Rect::new(200.0, 0.0, 400.0, 200.0));
    let inner = doc.append(target, "div", Rect::new(250.0, 50.0, 350.0, 150.0));
    Board {
        doc,
        source,
        grip,
        field,
        other,
        target,
        inner,
    }
}

pub fn touch_only() -> Capabilities {
    Capabilities {
        pointer_events: false,
        touch_events: true,
    }
}

pub fn pointer_only() -> Capabilities {
    Capabilities {
        pointer_events: true,
        touch_events: false,
    }
}

/// Hand one raw event to the runtime and return it with its flags.
pub fn send(dd: &mut Runtime, kind: InputKind<ElementId>) -> InputEvent<ElementId> {
    let mut event = InputEvent::new(kind);
    dd.handle_event(&mut event);
    event
}

/// Drain notifications as event names.
pub fn names(dd: &mut Runtime) -> Vec<&'static str> {
    dd.take_notifications().iter().map(Notification::name).collect()
}

pub fn mouse_down(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::MouseDown(MouseInput::new(target, Point::new(x, y)))
}

pub fn mouse_move(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::MouseMove(MouseInput::new(target, Point::new(x, y)))
}

pub fn mouse_up(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::MouseUp(MouseInput::new(target, Point::new(x, y)))
}

pub fn pointer_down(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::PointerDown(MouseInput::new(target, Point::new(x, y)))
}

pub fn pointer_move(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::PointerMove(MouseInput::new(target, Point::new(x, y)))
}

pub fn pointer_up(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::PointerUp(MouseInput::new(target, Point::new(x, y)))
}

pub fn touch_start(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::TouchStart(TouchInput::single(TouchPoint::new(target, Point::new(x, y))))
}

pub fn touch_move(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::TouchMove(TouchInput::single(TouchPoint::new(target, Point::new(x, y))))
}

pub fn touch_end(target: ElementId, x: f64, y: f64) -> InputKind<ElementId> {
    InputKind::TouchEnd(TouchInput::released(TouchPoint::new(target, Point::new(x, y))))
}

pub fn two_fingers(target: ElementId, a: Point, b: Point) -> TouchInput<ElementId> {
    TouchInput::multi(&[TouchPoint::new(target, a), TouchPoint::new(target, b)])
}

pub fn escape() -> InputKind<ElementId> {
    InputKind::KeyDown(Key::Escape)
}

pub fn click(target: ElementId) -> InputKind<ElementId> {
    InputKind::Click { target }
}

/// Press on `element` at `from`, then move far enough along x to start the drag.
pub fn start_drag(dd: &mut Runtime, element: ElementId, from: Point) {
    send(dd, mouse_down(element, from.x, from.y));
    send(dd, mouse_move(element, from.x + 10.0, from.y));
    assert!(dd.is_dragging(), "drag did not start");
}
