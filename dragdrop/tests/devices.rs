// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch and pointer input driving full drags.

mod common;

use common::*;
use dragdrop::input::{InputKind, Listeners, MouseInput};
use dragdrop::{Axis, DragDrop, DraggableConfig, DropzoneConfig, Notification, Point};

#[test]
fn touch_scroll_across_the_axis_abandons_the_press() {
    let b = board_with(touch_only());
    let mut dd: Runtime = DragDrop::new(b.doc);
    dd.attach_draggable(b.source, DraggableConfig::default().axis(Axis::Horizontal))
        .unwrap();

    let start = send(&mut dd, touch_start(b.source, 10.0, 10.0));
    assert!(!start.is_default_prevented());
    assert!(dd.current_drag().is_some());

    let scroll = send(&mut dd, touch_move(b.source, 11.0, 20.0));
    assert!(!scroll.is_default_prevented());
    assert!(dd.current_drag().is_none());
    assert!(names(&mut dd).is_empty());
}

#[test]
fn touch_drag_drops_on_the_element_under_the_finger() {
    let b = board_with(touch_only());
    let mut dd: Runtime = DragDrop::new(b.doc);
    let id = dd.attach_draggable(b.source, DraggableConfig::default()).unwrap();
    dd.attach_dropzone(b.target, DropzoneConfig::default()).unwrap();

    send(&mut dd, touch_start(b.source, 10.0, 10.0));
    assert!(dd.listeners(id).unwrap().contains(Listeners::TOUCH_MOVE | Listeners::TOUCH_END));
    assert!(!dd.listeners(id).unwrap().contains(Listeners::MOUSE_MOVE));

    let moved = send(&mut dd, touch_move(b.source, 20.0, 10.0));
    assert!(moved.is_default_prevented());
    send(&mut dd, touch_move(b.source, 300.0, 20.0));
    assert_eq!(names(&mut dd), ["dragstart", "dragenter", "dragover", "drag"]);

    // Touch events keep reporting the start element; the release is hit tested.
    let end = send(&mut dd, touch_end(b.source, 300.0, 20.0));
    assert!(end.is_default_prevented());
    let notifications = dd.take_notifications();
    let seen: Vec<_> = notifications.iter().map(Notification::name).collect();
    assert_eq!(seen, ["drop", "dragleave", "dragend"]);
    assert_eq!(
        notifications[0].as_dropzone().map(|e| e.dropzone_element),
        Some(b.target)
    );

    // No click follows a touch drag, so none is suppressed.
    let click = send(&mut dd, click(b.source));
    assert!(!click.is_default_prevented());
    assert_eq!(dd.listeners(id), Ok(Listeners::TOUCH_START | Listeners::MOUSE_DOWN));
}

#[test]
fn second_finger_cancels_and_never_starts() {
    let b = board_with(touch_only());
    let mut dd: Runtime = DragDrop::new(b.doc);
    dd.attach_draggable(b.source, DraggableConfig::default()).unwrap();

    let a = Point::new(10.0, 10.0);
    let c = Point::new(30.0, 10.0);
    send(&mut dd, InputKind::TouchStart(two_fingers(b.source, a, c)));
    assert!(dd.current_drag().is_none());

    send(&mut dd, touch_start(b.source, 10.0, 10.0));
    send(&mut dd, touch_move(b.source, 20.0, 10.0));
    names(&mut dd);

    let pinch = send(&mut dd, InputKind::TouchMove(two_fingers(b.source, a, c)));
    assert!(pinch.is_default_prevented());
    let notifications = dd.take_notifications();
    let [Notification::DragEnd(end)] = notifications.as_slice() else {
        panic!("expected a single dragend, got {notifications:?}");
    };
    assert!(end.cancelled);
    assert!(dd.current_drag().is_none());
}

#[test]
fn emulated_mouse_events_do_not_disturb_a_touch_drag() {
    let b = board_with(touch_only());
    let mut dd: Runtime = DragDrop::new(b.doc);
    let id = dd.attach_draggable(b.source, DraggableConfig::default()).unwrap();

    send(&mut dd, touch_start(b.source, 10.0, 10.0));
    send(&mut dd, touch_move(b.source, 20.0, 10.0));
    names(&mut dd);

    send(&mut dd, mouse_down(b.source, 10.0, 10.0));
    send(&mut dd, mouse_move(b.source, 80.0, 30.0));
    send(&mut dd, mouse_up(b.source, 80.0, 30.0));
    assert!(names(&mut dd).is_empty());
    assert_eq!(dd.current_drag().map(|s| s.draggable()), Some(id));
    assert_eq!(dd.current_drag().map(|s| s.position()), Some(Point::new(20.0, 10.0)));

    send(&mut dd, touch_end(b.source, 20.0, 10.0));
    assert_eq!(names(&mut dd), ["dragend"]);
}

#[test]
fn pointer_release_is_hit_tested_and_followed_by_click_suppression() {
    let b = board_with(pointer_only());
    let mut dd: Runtime = DragDrop::new(b.doc);
    let id = dd.attach_draggable(b.source, DraggableConfig::default()).unwrap();
    dd.attach_dropzone(b.target, DropzoneConfig::default()).unwrap();
    assert_eq!(dd.listeners(id), Ok(Listeners::POINTER_DOWN));

    let down = send(&mut dd, pointer_down(b.source, 10.0, 10.0));
    assert!(down.is_default_prevented());
    send(&mut dd, pointer_move(b.source, 20.0, 10.0));
    send(&mut dd, pointer_move(b.source, 300.0, 20.0));
    names(&mut dd);

    // Pointer capture reports the source; the drop still lands on the target.
    send(&mut dd, pointer_up(b.source, 300.0, 20.0));
    assert_eq!(names(&mut dd), ["drop", "dragleave", "dragend"]);

    let inside = send(&mut dd, click(b.grip));
    assert!(inside.is_default_prevented());
    assert!(inside.is_propagation_stopped());
    let elsewhere = send(&mut dd, click(b.other));
    assert!(!elsewhere.is_default_prevented());

    dd.on_animation_frame();
    let later = send(&mut dd, click(b.source));
    assert!(!later.is_default_prevented());
    assert!(!later.is_propagation_stopped());
}

#[test]
fn pointercancel_ends_the_drag_without_a_drop() {
    let b = board_with(pointer_only());
    let mut dd: Runtime = DragDrop::new(b.doc);
    dd.attach_draggable(b.source, DraggableConfig::default()).unwrap();
    dd.attach_dropzone(b.target, DropzoneConfig::default()).unwrap();

    send(&mut dd, pointer_down(b.source, 10.0, 10.0));
    send(&mut dd, pointer_move(b.source, 20.0, 10.0));
    send(&mut dd, pointer_move(b.target, 300.0, 20.0));
    names(&mut dd);

    send(
        &mut dd,
        InputKind::PointerCancel(MouseInput::new(b.target, Point::new(300.0, 20.0))),
    );
    assert_eq!(names(&mut dd), ["dragend", "dragleave"]);
    assert!(dd.current_drag().is_none());
}

#[test]
fn secondary_button_is_ignored() {
    let b = board();
    let mut dd: Runtime = DragDrop::new(b.doc);
    dd.attach_draggable(b.source, DraggableConfig::default()).unwrap();

    let right = send(
        &mut dd,
        InputKind::MouseDown(MouseInput::new(b.source, Point::new(10.0, 10.0)).with_button(2)),
    );
    assert!(!right.is_default_prevented());
    assert!(dd.current_drag().is_none());
}

#[test]
fn presses_on_form_controls_keep_their_default_action() {
    let b = board();
    let mut dd: Runtime = DragDrop::new(b.doc);
    dd.attach_draggable(b.source, DraggableConfig::default().cancel(None))
        .unwrap();

    let down = send(&mut dd, mouse_down(b.field, 70.0, 10.0));
    assert!(dd.current_drag().is_some());
    assert!(!down.is_default_prevented());

    send(&mut dd, mouse_move(b.field, 80.0, 10.0));
    assert!(dd.is_dragging());
}
