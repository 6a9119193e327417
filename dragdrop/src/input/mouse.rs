// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse events.
//!
//! Press on the root starts, moves and releases on the document follow. The
//! release reports the element under the mouse as its target. Mice have no
//! cancel event; Escape and blur still apply.

use crate::host::Host;

use super::{InputAdapter, InputContext, InputEvent, InputKind, ListenerSet, Listeners, Signal, escape_or_blur};

/// Adapter for mouse input.
#[derive(Clone, Debug, Default)]
pub struct MouseAdapter {
    listeners: ListenerSet,
}

impl<H: Host> InputAdapter<H> for MouseAdapter {
    fn name(&self) -> &'static str {
        "mouse"
    }

    fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ListenerSet {
        &mut self.listeners
    }

    fn install_start(&mut self) {
        self.listeners.install_start(Listeners::MOUSE_DOWN);
    }

    fn install_move(&mut self) {
        self.listeners.install_drag(Listeners::MOUSE_MOVE);
    }

    fn install_end(&mut self) {
        self.listeners.install_drag(Listeners::MOUSE_UP);
    }

    fn install_cancel(&mut self) {}

    fn translate(
        &self,
        event: &mut InputEvent<H::Element>,
        cx: &InputContext<'_, H>,
    ) -> Option<Signal<H::Element>> {
        match event.kind {
            InputKind::MouseDown(input) => cx.press(event, input),
            InputKind::MouseMove(input) => Some(Signal::Move {
                position: input.page,
                client: input.client,
            }),
            InputKind::MouseUp(input) => Some(Signal::End {
                position: input.page,
                client: input.client,
                target: Some(input.target),
            }),
            ref other => escape_or_blur(other),
        }
    }
}
