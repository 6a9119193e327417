// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events.
//!
//! Same shape as mouse input, with two differences: the release target is not
//! trusted (pointer capture may retarget it), so the end is hit tested; and
//! `pointercancel` cancels the drag.

use crate::host::Host;

use super::{InputAdapter, InputContext, InputEvent, InputKind, ListenerSet, Listeners, Signal, escape_or_blur};

/// Adapter for unified pointer input.
#[derive(Clone, Debug, Default)]
pub struct PointerAdapter {
    listeners: ListenerSet,
}

impl<H: Host> InputAdapter<H> for PointerAdapter {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ListenerSet {
        &mut self.listeners
    }

    fn install_start(&mut self) {
        self.listeners.install_start(Listeners::POINTER_DOWN);
    }

    fn install_move(&mut self) {
        self.listeners.install_drag(Listeners::POINTER_MOVE);
    }

    fn install_end(&mut self) {
        self.listeners.install_drag(Listeners::POINTER_UP);
    }

    fn install_cancel(&mut self) {
        self.listeners.install_drag(Listeners::POINTER_CANCEL);
    }

    fn translate(
        &self,
        event: &mut InputEvent<H::Element>,
        cx: &InputContext<'_, H>,
    ) -> Option<Signal<H::Element>> {
        match event.kind {
            InputKind::PointerDown(input) => cx.press(event, input),
            InputKind::PointerMove(input) => Some(Signal::Move {
                position: input.page,
                client: input.client,
            }),
            InputKind::PointerUp(input) => Some(Signal::End {
                position: input.page,
                client: input.client,
                target: None,
            }),
            InputKind::PointerCancel(_) => Some(Signal::Cancel),
            ref other => escape_or_blur(other),
        }
    }
}
