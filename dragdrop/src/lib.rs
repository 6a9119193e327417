// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragdrop: headless draggables and dropzones.
//!
//! ## Overview
//!
//! A [`DragDrop`] runtime owns a [`Host`] document, the registered draggables
//! and dropzones, and the single drag session. Feed it raw input and it emits
//! [`Notification`]s:
//!
//! - raw mouse, touch and pointer events are normalized per draggable by
//!   [`input`] adapters into start, move, end and cancel signals;
//! - a press becomes a drag once the pointer travels
//!   [`DraggableConfig::min_drag_start_distance`];
//! - while dragging, the element under the pointer is resolved past the
//!   [`avatar`] and through shadow roots ([`target`]);
//! - hover transitions bubble to [`dropzone`]s, which filter them with an
//!   [`Acceptor`] and report `DragEnter`, `DragOver`, `DragLeave` and `Drop`.
//!
//! Only one drag exists at a time. A press on a second draggable while a drag
//! is pending or active is ignored.
//!
//! ## Driving the runtime
//!
//! - Pass every input event to [`DragDrop::handle_event`]. The event's
//!   default-prevented and propagation-stopped flags tell the embedder what to
//!   do with the native event.
//! - Call [`DragDrop::on_animation_frame`] once per frame. Avatar movement is
//!   applied there, and post-drag click suppression ends there.
//! - Drain [`DragDrop::take_notifications`].
//!
//! ```
//! use dragdrop::{DragDrop, DraggableConfig, DropzoneConfig, Host, Notification};
//! use dragdrop::input::{InputEvent, InputKind, MouseInput};
//! use dragdrop::memory::MemoryDocument;
//! use kurbo::{Point, Rect};
//!
//! let mut doc = MemoryDocument::new();
//! let card = doc.append(doc.body(), "div", Rect::new(0.0, 0.0, 100.0, 40.0));
//! let bin = doc.append(doc.body(), "div", Rect::new(200.0, 0.0, 300.0, 100.0));
//!
//! let mut dd: DragDrop<MemoryDocument, &str> = DragDrop::new(doc);
//! dd.attach_draggable(card, DraggableConfig::default().data("card"))?;
//! dd.attach_dropzone(bin, DropzoneConfig::default())?;
//!
//! for kind in [
//!     InputKind::MouseDown(MouseInput::new(card, Point::new(10.0, 10.0))),
//!     InputKind::MouseMove(MouseInput::new(card, Point::new(30.0, 10.0))),
//!     InputKind::MouseMove(MouseInput::new(bin, Point::new(250.0, 10.0))),
//!     InputKind::MouseUp(MouseInput::new(bin, Point::new(250.0, 10.0))),
//! ] {
//!     dd.handle_event(&mut InputEvent::new(kind));
//! }
//!
//! let dropped = dd.take_notifications().into_iter().find_map(|n| match n {
//!     Notification::Drop(e) => e.drag_info.data().copied(),
//!     _ => None,
//! });
//! assert_eq!(dropped, Some("card"));
//! # Ok::<(), dragdrop::Error>(())
//! ```
//!
//! ## Hosts
//!
//! [`memory::MemoryDocument`] is a complete in-memory document for tests and
//! headless use. Bridging a real toolkit means implementing [`Host`] over its
//! node handles.

pub mod avatar;
pub mod draggable;
pub mod dropzone;
pub mod error;
pub mod event;
pub mod host;
pub mod input;
pub mod memory;
pub mod scroll;
pub mod target;

mod runtime;

pub use avatar::{Avatar, CloneAvatar, OriginalAvatar};
pub use draggable::DraggableConfig;
pub use dropzone::{Acceptor, DraggablesAcceptor, DropzoneConfig, DropzoneId};
pub use error::{Error, Result, SelectionError};
pub use event::{DragInfo, DraggableEvent, DropzoneEvent, Notification};
pub use host::{Capabilities, Host};
pub use runtime::DragDrop;
pub use scroll::AutoScroll;

pub use dragdrop_event_state::axis::Axis;
pub use dragdrop_event_state::hover::{HoverKind, HoverSignal};
pub use dragdrop_event_state::session::{DragSession, DraggableId};
pub use kurbo::{Point, Vec2};
