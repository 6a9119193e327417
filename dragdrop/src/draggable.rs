// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggables: configuration and the drag gesture state machine.
//!
//! ## States
//!
//! - **Idle**: no session exists.
//! - **Pending**: a qualifying press created a session. Moves update its
//!   position; the drag has not started and the gesture may still be a click.
//! - **Active**: the pointer travelled at least
//!   [`DraggableConfig::min_drag_start_distance`] from the press. The avatar
//!   follows, hover signals flow to dropzones and `Drag` is emitted per move.
//!
//! End and cancel return to Idle from either Pending or Active. Only an
//! Active drag produces `DragEnd`, a drop, click suppression and class
//! cleanup; a Pending one just releases its session.

use core::fmt;

use dragdrop_event_state::axis::Axis;
use dragdrop_event_state::session::{DragSession, DraggableId};
use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::avatar::{Avatar, AvatarContext, AvatarState};
use crate::error::{Error, Result, check_class, check_selector};
use crate::event::Notification;
use crate::host::Host;
use crate::input::{InputAdapter, InputContext, InputEvent, InputKind, Listeners, Signal, touch_action_for};
use crate::runtime::Shared;
use crate::scroll::AutoScroll;
use crate::target::real_target;

/// Default selector of elements a drag never starts on.
pub const DEFAULT_CANCEL: &str = "input, textarea, button, select, option";

/// Default class of the dragged element during a drag.
pub const DEFAULT_DRAGGING_CLASS: &str = "draggable--dragging";

/// Default class of the document root during a drag.
pub const DEFAULT_DRAGGING_CLASS_BODY: &str = "draggable--occurring";

/// Default minimum travel, in pixels, before a press becomes a drag.
pub const DEFAULT_MIN_DRAG_START_DISTANCE: f64 = 4.0;

/// Configuration of a draggable.
///
/// Build one with the consuming setters, then pass it to
/// [`DragDrop::attach_draggable`](crate::DragDrop::attach_draggable):
///
/// ```
/// use dragdrop::{Axis, DraggableConfig};
/// use dragdrop::memory::MemoryDocument;
///
/// let config: DraggableConfig<MemoryDocument, &str> = DraggableConfig::default()
///     .data("card-12")
///     .axis(Axis::Horizontal)
///     .handle(".grip")
///     .min_drag_start_distance(8.0);
/// assert!(config.validate().is_ok());
/// ```
pub struct DraggableConfig<H: Host, D> {
    /// Payload copied into every session of this draggable.
    pub data: Option<D>,
    /// Whether a press may start a drag.
    pub enabled: bool,
    /// Movement constraint.
    pub axis: Axis,
    /// Drags only start inside an element matching this selector.
    pub handle: Option<String>,
    /// Drags never start inside an element matching this selector.
    pub cancel: Option<String>,
    /// Class of the draggable root during a drag.
    pub dragging_class: Option<String>,
    /// Class of the document root during a drag.
    pub dragging_class_body: Option<String>,
    /// Travel required before a press becomes a drag.
    pub min_drag_start_distance: f64,
    /// Rendering strategy. `None` leaves the element in place.
    ///
    /// A started drag holds its strategy apart from the config until it
    /// ends, so this reads `None` meanwhile. A strategy assigned during a
    /// drag is used from the next drag on.
    pub avatar: Option<Box<dyn Avatar<H>>>,
    /// `touch-action` override for the root. `None` derives it from the axis.
    pub touch_action: Option<String>,
    /// Edge scrolling while the drag is active.
    pub custom_scroll: Option<AutoScroll>,
}

impl<H: Host, D> Default for DraggableConfig<H, D> {
    fn default() -> Self {
        Self {
            data: None,
            enabled: true,
            axis: Axis::Both,
            handle: None,
            cancel: Some(DEFAULT_CANCEL.into()),
            dragging_class: Some(DEFAULT_DRAGGING_CLASS.into()),
            dragging_class_body: Some(DEFAULT_DRAGGING_CLASS_BODY.into()),
            min_drag_start_distance: DEFAULT_MIN_DRAG_START_DISTANCE,
            avatar: None,
            touch_action: None,
            custom_scroll: None,
        }
    }
}

impl<H: Host, D: fmt::Debug> fmt::Debug for DraggableConfig<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableConfig")
            .field("data", &self.data)
            .field("enabled", &self.enabled)
            .field("axis", &self.axis)
            .field("handle", &self.handle)
            .field("cancel", &self.cancel)
            .field("dragging_class", &self.dragging_class)
            .field("dragging_class_body", &self.dragging_class_body)
            .field("min_drag_start_distance", &self.min_drag_start_distance)
            .field("avatar", &self.avatar.as_ref().map(|_| "dyn Avatar"))
            .field("touch_action", &self.touch_action)
            .field("custom_scroll", &self.custom_scroll)
            .finish()
    }
}

impl<H: Host, D> DraggableConfig<H, D> {
    /// Set the payload.
    pub fn data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    /// Enable or disable starting drags.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the movement constraint.
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Restrict drag starts to elements matching `selector`.
    pub fn handle(mut self, selector: &str) -> Self {
        self.handle = Some(selector.into());
        self
    }

    /// Set or clear the cancel selector.
    pub fn cancel(mut self, selector: Option<&str>) -> Self {
        self.cancel = selector.map(str::to_owned);
        self
    }

    /// Set or clear the class of the dragged element.
    pub fn dragging_class(mut self, class: Option<&str>) -> Self {
        self.dragging_class = class.map(str::to_owned);
        self
    }

    /// Set or clear the class of the document root.
    pub fn dragging_class_body(mut self, class: Option<&str>) -> Self {
        self.dragging_class_body = class.map(str::to_owned);
        self
    }

    /// Set the start threshold.
    pub fn min_drag_start_distance(mut self, distance: f64) -> Self {
        self.min_drag_start_distance = distance;
        self
    }

    /// Set the avatar strategy.
    pub fn avatar(mut self, avatar: impl Avatar<H> + 'static) -> Self {
        self.avatar = Some(Box::new(avatar));
        self
    }

    /// Override the `touch-action` style.
    pub fn touch_action(mut self, value: &str) -> Self {
        self.touch_action = Some(value.into());
        self
    }

    /// Scroll near viewport edges while dragging.
    pub fn custom_scroll(mut self, scroll: AutoScroll) -> Self {
        self.custom_scroll = Some(scroll);
        self
    }

    /// Check selectors, class names, the threshold and auto-scroll.
    pub fn validate(&self) -> Result<()> {
        let min = self.min_drag_start_distance;
        if !min.is_finite() || min < 0.0 {
            return Err(Error::InvalidMinDragStartDistance(min));
        }
        check_selector("handle", self.handle.as_deref())?;
        check_selector("cancel", self.cancel.as_deref())?;
        check_class("dragging_class", self.dragging_class.as_deref())?;
        check_class("dragging_class_body", self.dragging_class_body.as_deref())?;
        if let Some(scroll) = &self.custom_scroll {
            scroll.validate()?;
        }
        Ok(())
    }

    fn touch_action_value(&self) -> &str {
        touch_action_for(self.axis, self.touch_action.as_deref())
    }
}

/// The validated fields of a config, kept to roll back a failed update.
#[derive(Clone)]
struct Checkpoint {
    handle: Option<String>,
    cancel: Option<String>,
    dragging_class: Option<String>,
    dragging_class_body: Option<String>,
    min_drag_start_distance: f64,
    custom_scroll: Option<AutoScroll>,
}

impl Checkpoint {
    fn take<H: Host, D>(config: &DraggableConfig<H, D>) -> Self {
        Self {
            handle: config.handle.clone(),
            cancel: config.cancel.clone(),
            dragging_class: config.dragging_class.clone(),
            dragging_class_body: config.dragging_class_body.clone(),
            min_drag_start_distance: config.min_drag_start_distance,
            custom_scroll: config.custom_scroll,
        }
    }

    fn restore<H: Host, D>(self, config: &mut DraggableConfig<H, D>) {
        config.handle = self.handle;
        config.cancel = self.cancel;
        config.dragging_class = self.dragging_class;
        config.dragging_class_body = self.dragging_class_body;
        config.min_drag_start_distance = self.min_drag_start_distance;
        config.custom_scroll = self.custom_scroll;
    }
}

/// What a started drag put in place, undone when it ends.
///
/// Config updates during the drag do not touch this record.
struct Applied<H: Host> {
    avatar: Option<Box<dyn Avatar<H>>>,
    dragging_class: Option<String>,
    dragging_class_body: Option<String>,
}

impl<H: Host> Applied<H> {
    fn none() -> Self {
        Self {
            avatar: None,
            dragging_class: None,
            dragging_class_body: None,
        }
    }
}

impl<H: Host> fmt::Debug for Applied<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Applied")
            .field("avatar", &self.avatar.as_ref().map(|_| "dyn Avatar"))
            .field("dragging_class", &self.dragging_class)
            .field("dragging_class_body", &self.dragging_class_body)
            .finish()
    }
}

/// A registered draggable.
pub(crate) struct Draggable<H: Host, D> {
    pub(crate) id: DraggableId,
    pub(crate) root: H::Element,
    config: DraggableConfig<H, D>,
    adapters: SmallVec<[Box<dyn InputAdapter<H>>; 2]>,
    avatar_state: AvatarState,
    applied: Option<Applied<H>>,
}

impl<H: Host, D: fmt::Debug> fmt::Debug for Draggable<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draggable")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("config", &self.config)
            .field("adapters", &self.adapters)
            .field("avatar_state", &self.avatar_state)
            .field("applied", &self.applied)
            .finish()
    }
}

impl<H: Host, D: Clone> Draggable<H, D> {
    /// Validate `config`, install start listeners and style the root.
    pub(crate) fn attach(
        host: &mut H,
        id: DraggableId,
        root: H::Element,
        config: DraggableConfig<H, D>,
    ) -> Result<Self> {
        config.validate()?;
        let adapters = crate::input::select_adapters::<H>(host.capabilities());
        host.set_style(root, "touch-action", Some(config.touch_action_value()));
        let names: SmallVec<[&str; 2]> = adapters.iter().map(|a| a.name()).collect();
        debug!(
            target: "dragdrop::gesture",
            draggable = %id,
            element = ?root,
            adapters = ?names,
            "draggable attached"
        );
        Ok(Self {
            id,
            root,
            config,
            adapters,
            avatar_state: AvatarState::default(),
            applied: None,
        })
    }

    /// Abort any own session, release every listener and unstyle the root.
    pub(crate) fn detach(&mut self, shared: &mut Shared<H, D>) {
        self.drag_end(shared, None, None, true);
        for adapter in &mut self.adapters {
            adapter.destroy();
        }
        shared.host.set_style(self.root, "touch-action", None);
        if let Some(element) = self.config.avatar.as_ref().and_then(|a| a.element()) {
            shared.host.remove_element(element);
        }
        debug!(target: "dragdrop::gesture", draggable = %self.id, "draggable detached");
    }

    /// Apply `update` to the config, rolling back if it no longer validates.
    pub(crate) fn reconfigure(
        &mut self,
        host: &mut H,
        update: impl FnOnce(&mut DraggableConfig<H, D>),
    ) -> Result<()> {
        let checkpoint = Checkpoint::take(&self.config);
        let touch_action = self.config.touch_action_value().to_owned();
        update(&mut self.config);
        if let Err(err) = self.config.validate() {
            checkpoint.restore(&mut self.config);
            return Err(err);
        }
        let next = self.config.touch_action_value();
        if next != touch_action {
            host.set_style(self.root, "touch-action", Some(next));
        }
        Ok(())
    }

    pub(crate) fn config(&self) -> &DraggableConfig<H, D> {
        &self.config
    }

    fn running_avatar_element(&self) -> Option<H::Element> {
        self.applied
            .as_ref()
            .and_then(|a| a.avatar.as_ref())
            .and_then(|a| a.element())
    }

    /// Union of the listeners installed by every adapter.
    pub(crate) fn listeners(&self) -> Listeners {
        self.adapters
            .iter()
            .fold(Listeners::empty(), |acc, a| acc | a.listeners().installed())
    }

    /// Returns `true` if one of the adapters has a listener for `kind`.
    pub(crate) fn listens_to(&self, kind: &InputKind<H::Element>) -> bool {
        self.adapters.iter().any(|a| a.listens_to(kind))
    }

    /// Offer a raw event to every adapter listening for it.
    pub(crate) fn handle(&mut self, shared: &mut Shared<H, D>, event: &mut InputEvent<H::Element>) {
        for index in 0..self.adapters.len() {
            if !self.adapters[index].listens_to(&event.kind) {
                continue;
            }
            let pending_start = shared
                .slot
                .current()
                .filter(|s| s.draggable() == self.id && !s.is_started())
                .map(DragSession::start_position);
            let cx = InputContext {
                host: &shared.host,
                root: self.root,
                enabled: self.config.enabled,
                axis: self.config.axis,
                handle: self.config.handle.as_deref(),
                cancel: self.config.cancel.as_deref(),
                busy: !shared.slot.is_empty(),
                pending_start,
            };
            let Some(signal) = self.adapters[index].translate(event, &cx) else {
                continue;
            };
            match signal {
                Signal::Start { position } => self.begin(shared, index, position),
                Signal::Move { position, client } => self.drag_move(shared, event, position, client),
                Signal::End {
                    position,
                    client,
                    target,
                } => self.release(shared, event, position, client, target),
                Signal::Cancel => self.drag_end(shared, Some(&mut *event), None, true),
            }
        }
    }

    /// Cancel the session if this draggable owns it.
    pub(crate) fn abort(&mut self, shared: &mut Shared<H, D>) {
        if shared.slot.owner() == Some(self.id) {
            debug!(target: "dragdrop::gesture", draggable = %self.id, "drag aborted");
            self.drag_end(shared, None, None, true);
        }
    }

    /// Idle → Pending.
    fn begin(&mut self, shared: &mut Shared<H, D>, adapter: usize, position: Point) {
        let shift = position - shared.host.offset_of(self.root);
        let session = DragSession::new(
            self.id,
            self.root,
            self.config.data.clone(),
            position,
            self.config.axis,
            shift,
        );
        if shared.slot.begin(session).is_err() {
            trace!(target: "dragdrop::gesture", draggable = %self.id, "start ignored: a drag is in progress");
            return;
        }
        self.adapters[adapter].begin_drag();
        debug!(
            target: "dragdrop::gesture",
            draggable = %self.id,
            ?position,
            adapter = self.adapters[adapter].name(),
            "session pending"
        );
    }

    fn drag_move(
        &mut self,
        shared: &mut Shared<H, D>,
        event: &InputEvent<H::Element>,
        position: Point,
        client: Point,
    ) {
        let Some(session) = shared.slot.owned_by(self.id) else {
            return;
        };
        session.set_position(position);
        let (start, current) = (session.start_position(), session.position());

        if !session.is_started() {
            if self.config.enabled && session.reached_threshold(self.config.min_drag_start_distance) {
                self.drag_start(shared, &event.kind);
            }
            return;
        }

        let avatar_element = self.running_avatar_element();
        let target = real_target(&mut shared.host, client, None, avatar_element);

        if let Some(avatar) = self.applied.as_mut().and_then(|a| a.avatar.as_deref_mut()) {
            let mut cx = AvatarContext {
                host: &mut shared.host,
                frames: &mut shared.frames,
            };
            self.avatar_state.update(avatar, &mut cx, start, current);
        }

        for signal in shared.hover.update(target) {
            shared.deliver(signal);
        }

        shared.notify_draggable(Notification::Drag, self.id, self.root, Some(event.kind.clone()), false);

        if let Some(scroll) = self.config.custom_scroll {
            let delta = scroll.delta(shared.host.viewport(), client);
            if delta != Vec2::ZERO {
                trace!(target: "dragdrop::gesture", ?delta, "auto-scroll");
                shared.host.scroll_by(delta);
            }
        }
    }

    /// Pending → Active.
    fn drag_start(&mut self, shared: &mut Shared<H, D>, original: &InputKind<H::Element>) {
        let Some(session) = shared.slot.owned_by(self.id) else {
            return;
        };
        if !session.mark_started() {
            return;
        }
        let start = session.start_position();
        debug!(
            target: "dragdrop::gesture",
            draggable = %self.id,
            position = ?session.position(),
            "drag started"
        );

        let mut applied = Applied {
            avatar: self.config.avatar.take(),
            dragging_class: self.config.dragging_class.clone(),
            dragging_class_body: self.config.dragging_class_body.clone(),
        };
        if let Some(avatar) = applied.avatar.as_deref_mut() {
            let mut cx = AvatarContext {
                host: &mut shared.host,
                frames: &mut shared.frames,
            };
            self.avatar_state.start(avatar, &mut cx, self.root, start);
            let element = avatar.element();
            if let Some(session) = shared.slot.owned_by(self.id) {
                session.set_avatar_element(element);
            }
        }

        shared.notify_draggable(Notification::DragStart, self.id, self.root, Some(original.clone()), false);

        if let Some(class) = &applied.dragging_class {
            shared.host.add_class(self.root, class);
        }
        if let Some(class) = &applied.dragging_class_body {
            shared.host.add_document_class(class);
        }
        self.applied = Some(applied);
        if let Err(err) = shared.host.clear_text_selection() {
            trace!(target: "dragdrop::gesture", error = %err, "text selection not cleared");
        }
    }

    fn release(
        &mut self,
        shared: &mut Shared<H, D>,
        event: &mut InputEvent<H::Element>,
        position: Point,
        client: Point,
        reported: Option<H::Element>,
    ) {
        let Some(session) = shared.slot.owned_by(self.id) else {
            return;
        };
        session.set_position(position);
        let avatar_element = self.running_avatar_element();
        let target = real_target(&mut shared.host, client, reported, avatar_element);
        self.drag_end(shared, Some(event), Some(target), false);
    }

    /// Active → Idle, or Pending → Idle for a plain click.
    fn drag_end(
        &mut self,
        shared: &mut Shared<H, D>,
        event: Option<&mut InputEvent<H::Element>>,
        target: Option<H::Element>,
        cancelled: bool,
    ) {
        let Some(session) = shared.slot.owned_by(self.id) else {
            return;
        };
        let (started, start, current) = (session.is_started(), session.start_position(), session.position());

        if started {
            let Applied {
                mut avatar,
                dragging_class,
                dragging_class_body,
            } = self.applied.take().unwrap_or_else(Applied::none);

            if let Some(avatar) = avatar.as_deref_mut() {
                let mut cx = AvatarContext {
                    host: &mut shared.host,
                    frames: &mut shared.frames,
                };
                self.avatar_state.end(avatar, &mut cx, start, current);
            }
            if self.config.avatar.is_none() {
                self.config.avatar = avatar;
            }

            if !cancelled && let Some(target) = target {
                for signal in shared.hover.drop_on(target) {
                    shared.deliver(signal);
                }
            }

            let original = event.as_ref().map(|e| e.kind.clone());
            shared.notify_draggable(Notification::DragEnd, self.id, self.root, original, cancelled);

            if let Some(event) = event {
                if event.kind.is_touch() {
                    event.prevent_default();
                } else if event.kind.is_mouse_like() {
                    shared.clicks.arm(self.root);
                }
            }

            if let Some(class) = &dragging_class {
                shared.host.remove_class(self.root, class);
            }
            if let Some(class) = &dragging_class_body {
                shared.host.remove_document_class(class);
            }
            debug!(target: "dragdrop::gesture", draggable = %self.id, cancelled, "drag ended");
        } else {
            trace!(target: "dragdrop::gesture", draggable = %self.id, cancelled, "session released before start");
        }

        self.reset(shared);
    }

    /// Release drag listeners, flush the final leave and clear the session.
    fn reset(&mut self, shared: &mut Shared<H, D>) {
        for adapter in &mut self.adapters {
            adapter.reset();
        }
        if let Some(signal) = shared.hover.reset() {
            shared.deliver(signal);
        }
        shared.slot.end();
    }
}
