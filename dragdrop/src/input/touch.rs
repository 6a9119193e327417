// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch events.
//!
//! - A second finger never starts a drag, and cancels one in progress.
//! - Before the drag threshold is crossed, a move that runs mostly across an
//!   axis-constrained draggable's axis is a page scroll: the attempt is
//!   cancelled so the page keeps scrolling.
//! - Forwarded moves prevent the default action, which stops the page from
//!   scrolling under the drag.
//! - The release target is the element the touch started on, so ends are hit
//!   tested instead.

use tracing::trace;

use crate::host::Host;

use super::{InputAdapter, InputContext, InputEvent, InputKind, ListenerSet, Listeners, Signal, escape_or_blur};

/// Adapter for touch input.
#[derive(Clone, Debug, Default)]
pub struct TouchAdapter {
    listeners: ListenerSet,
}

impl<H: Host> InputAdapter<H> for TouchAdapter {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ListenerSet {
        &mut self.listeners
    }

    fn install_start(&mut self) {
        self.listeners.install_start(Listeners::TOUCH_START);
    }

    fn install_move(&mut self) {
        self.listeners.install_drag(Listeners::TOUCH_MOVE);
    }

    fn install_end(&mut self) {
        self.listeners.install_drag(Listeners::TOUCH_END);
    }

    fn install_cancel(&mut self) {
        self.listeners.install_drag(Listeners::TOUCH_CANCEL);
    }

    fn translate(
        &self,
        event: &mut InputEvent<H::Element>,
        cx: &InputContext<'_, H>,
    ) -> Option<Signal<H::Element>> {
        match &event.kind {
            InputKind::TouchStart(input) => {
                if input.touches.len() > 1 {
                    trace!(target: "dragdrop::input", touches = input.touches.len(), "start ignored: multi-touch");
                    return None;
                }
                let first = input.touches.first().or(input.changed.first())?;
                cx.accepts_start(first.target).then_some(Signal::Start {
                    position: first.page,
                })
            }
            InputKind::TouchMove(input) => {
                if input.touches.len() > 1 {
                    trace!(target: "dragdrop::input", touches = input.touches.len(), "multi-touch cancels the drag");
                    return Some(Signal::Cancel);
                }
                let point = *input.changed.first()?;
                if let Some(start) = cx.pending_start
                    && cx.axis.is_scroll_gesture(start, point.page)
                {
                    trace!(target: "dragdrop::input", axis = ?cx.axis, "scroll gesture cancels the drag");
                    return Some(Signal::Cancel);
                }
                event.prevent_default();
                Some(Signal::Move {
                    position: point.page,
                    client: point.client,
                })
            }
            InputKind::TouchEnd(input) => {
                let point = input.changed.first()?;
                Some(Signal::End {
                    position: point.page,
                    client: point.client,
                    target: None,
                })
            }
            InputKind::TouchCancel(_) => Some(Signal::Cancel),
            other => escape_or_blur(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{TouchInput, TouchPoint};
    use crate::memory::{ElementId, MemoryDocument};
    use dragdrop_event_state::axis::Axis;
    use kurbo::{Point, Rect};

    fn doc() -> (MemoryDocument, ElementId) {
        let mut doc = MemoryDocument::new();
        let root = doc.append(doc.body(), "div", Rect::new(0.0, 0.0, 50.0, 50.0));
        (doc, root)
    }

    fn translate(
        cx: &InputContext<'_, MemoryDocument>,
        kind: InputKind<ElementId>,
    ) -> (Option<Signal<ElementId>>, bool) {
        let mut event = InputEvent::new(kind);
        let signal = InputAdapter::<MemoryDocument>::translate(&TouchAdapter::default(), &mut event, cx);
        (signal, event.is_default_prevented())
    }

    fn cx(doc: &MemoryDocument, root: ElementId, axis: Axis, pending: Option<Point>) -> InputContext<'_, MemoryDocument> {
        InputContext {
            host: doc,
            root,
            enabled: true,
            axis,
            handle: None,
            cancel: None,
            busy: pending.is_some(),
            pending_start: pending,
        }
    }

    #[test]
    fn single_touch_starts_multi_touch_does_not() {
        let (doc, root) = doc();
        let cx = cx(&doc, root, Axis::Both, None);
        let p = TouchPoint::new(root, Point::new(2.0, 3.0));

        let (signal, prevented) = translate(&cx, InputKind::TouchStart(TouchInput::single(p)));
        assert_eq!(signal, Some(Signal::Start { position: Point::new(2.0, 3.0) }));
        assert!(!prevented);

        let (signal, _) = translate(&cx, InputKind::TouchStart(TouchInput::multi(&[p, p])));
        assert_eq!(signal, None);
    }

    #[test]
    fn second_finger_during_drag_cancels() {
        let (doc, root) = doc();
        let cx = cx(&doc, root, Axis::Both, None);
        let p = TouchPoint::new(root, Point::new(2.0, 3.0));
        let (signal, _) = translate(&cx, InputKind::TouchMove(TouchInput::multi(&[p, p])));
        assert_eq!(signal, Some(Signal::Cancel));
    }

    #[test]
    fn perpendicular_motion_while_pending_is_a_scroll() {
        let (doc, root) = doc();
        let start = Point::new(10.0, 10.0);
        let cx_pending = cx(&doc, root, Axis::Horizontal, Some(start));
        let down = TouchPoint::new(root, Point::new(11.0, 20.0));
        let (signal, prevented) = translate(&cx_pending, InputKind::TouchMove(TouchInput::single(down)));
        assert_eq!(signal, Some(Signal::Cancel));
        assert!(!prevented);

        let along = TouchPoint::new(root, Point::new(20.0, 11.0));
        let (signal, prevented) = translate(&cx_pending, InputKind::TouchMove(TouchInput::single(along)));
        assert!(matches!(signal, Some(Signal::Move { .. })));
        assert!(prevented);

        // Once started the heuristic no longer applies.
        let cx_started = cx(&doc, root, Axis::Horizontal, None);
        let (signal, _) = translate(&cx_started, InputKind::TouchMove(TouchInput::single(down)));
        assert!(matches!(signal, Some(Signal::Move { .. })));
    }

    #[test]
    fn release_is_hit_tested() {
        let (doc, root) = doc();
        let cx = cx(&doc, root, Axis::Both, Some(Point::ZERO));
        let p = TouchPoint::new(root, Point::new(7.0, 8.0)).with_client(Point::new(7.0, 1.0));
        let (signal, _) = translate(&cx, InputKind::TouchEnd(TouchInput::released(p)));
        assert_eq!(
            signal,
            Some(Signal::End {
                position: Point::new(7.0, 8.0),
                client: Point::new(7.0, 1.0),
                target: None,
            })
        );
        let (signal, _) = translate(&cx, InputKind::TouchCancel(TouchInput::released(p)));
        assert_eq!(signal, Some(Signal::Cancel));
    }
}
