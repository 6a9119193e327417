// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public notifications produced by the runtime.
//!
//! The runtime queues notifications while it handles input. Collect them with
//! [`DragDrop::take_notifications`](crate::DragDrop::take_notifications) after
//! each call.

use dragdrop_event_state::hover::HoverSignal;
use dragdrop_event_state::session::{DragSession, DraggableId};

use crate::dropzone::DropzoneId;
use crate::input::InputKind;

/// Snapshot of the drag session carried by every notification.
pub type DragInfo<E, D> = DragSession<E, D>;

/// Payload of the notifications emitted on a draggable.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggableEvent<E, D> {
    /// The draggable the drag belongs to.
    pub draggable: DraggableId,
    /// Root element of the draggable.
    pub element: E,
    /// The session at the time of the notification.
    pub drag_info: DragInfo<E, D>,
    /// The raw input that caused it; `None` for a programmatic abort or detach.
    pub original_event: Option<InputKind<E>>,
    /// `true` for a `DragEnd` caused by a cancel.
    pub cancelled: bool,
}

/// Payload of the notifications emitted on a dropzone.
#[derive(Clone, Debug, PartialEq)]
pub struct DropzoneEvent<E, D> {
    /// The dropzone that accepted the signal.
    pub dropzone: DropzoneId,
    /// Root element of the dropzone.
    pub dropzone_element: E,
    /// The session at the time of the notification.
    pub drag_info: DragInfo<E, D>,
    /// The hover signal the dropzone received.
    pub original_event: HoverSignal<E>,
}

/// A public drag and drop notification.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification<E, D> {
    /// The drag crossed its start threshold.
    DragStart(DraggableEvent<E, D>),
    /// The pointer moved during an active drag.
    Drag(DraggableEvent<E, D>),
    /// An active drag ended or was cancelled.
    DragEnd(DraggableEvent<E, D>),
    /// The drag entered an accepting dropzone.
    DragEnter(DropzoneEvent<E, D>),
    /// The drag is over an accepting dropzone.
    DragOver(DropzoneEvent<E, D>),
    /// The drag left an accepting dropzone.
    DragLeave(DropzoneEvent<E, D>),
    /// The drag was released over an accepting dropzone.
    Drop(DropzoneEvent<E, D>),
}

impl<E, D> Notification<E, D> {
    /// Lowercase event name, as a browser would spell it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DragStart(_) => "dragstart",
            Self::Drag(_) => "drag",
            Self::DragEnd(_) => "dragend",
            Self::DragEnter(_) => "dragenter",
            Self::DragOver(_) => "dragover",
            Self::DragLeave(_) => "dragleave",
            Self::Drop(_) => "drop",
        }
    }

    /// The session snapshot carried by the notification.
    pub fn drag_info(&self) -> &DragInfo<E, D> {
        match self {
            Self::DragStart(e) | Self::Drag(e) | Self::DragEnd(e) => &e.drag_info,
            Self::DragEnter(e) | Self::DragOver(e) | Self::DragLeave(e) | Self::Drop(e) => {
                &e.drag_info
            }
        }
    }

    /// The draggable payload, for draggable notifications.
    pub fn as_draggable(&self) -> Option<&DraggableEvent<E, D>> {
        match self {
            Self::DragStart(e) | Self::Drag(e) | Self::DragEnd(e) => Some(e),
            _ => None,
        }
    }

    /// The dropzone payload, for dropzone notifications.
    pub fn as_dropzone(&self) -> Option<&DropzoneEvent<E, D>> {
        match self {
            Self::DragEnter(e) | Self::DragOver(e) | Self::DragLeave(e) | Self::Drop(e) => Some(e),
            _ => None,
        }
    }
}
