// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag and drop runtime.

use core::fmt;

use dragdrop_event_state::click::ClickSuppression;
use dragdrop_event_state::frame::FrameBatch;
use dragdrop_event_state::hover::{HoverDispatch, HoverSignal};
use dragdrop_event_state::session::{DraggableId, SessionSlot};
use dragdrop_responder::dispatcher;
use dragdrop_responder::router::Router;
use dragdrop_responder::types::Outcome;
use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::avatar::AvatarFrame;
use crate::draggable::{Draggable, DraggableConfig};
use crate::dropzone::{Dropzone, DropzoneConfig, DropzoneId};
use crate::error::{Error, Result};
use crate::event::{DragInfo, DraggableEvent, Notification};
use crate::host::{Host, HostParents};
use crate::input::{InputEvent, InputKind, Listeners};

/// State every draggable reads and writes while handling input.
pub(crate) struct Shared<H: Host, D> {
    pub(crate) host: H,
    pub(crate) slot: SessionSlot<H::Element, D>,
    pub(crate) hover: HoverDispatch<H::Element>,
    pub(crate) clicks: ClickSuppression<H::Element>,
    pub(crate) frames: FrameBatch<AvatarFrame<H::Element>>,
    pub(crate) dropzones: HashMap<DropzoneId, Dropzone<H::Element, D>>,
    pub(crate) zones_by_root: HashMap<H::Element, SmallVec<[DropzoneId; 1]>>,
    pub(crate) outbox: Vec<Notification<H::Element, D>>,
}

impl<H: Host, D: Clone> Shared<H, D> {
    fn new(host: H) -> Self {
        Self {
            host,
            slot: SessionSlot::new(),
            hover: HoverDispatch::new(),
            clicks: ClickSuppression::new(),
            frames: FrameBatch::new(),
            dropzones: HashMap::new(),
            zones_by_root: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    /// Bubble a hover signal from its target to the root, through every
    /// dropzone on the way, until one of them is exact.
    pub(crate) fn deliver(&mut self, signal: HoverSignal<H::Element>) {
        let Self {
            host,
            slot,
            dropzones,
            zones_by_root,
            outbox,
            ..
        } = self;
        let Some(session) = slot.current() else {
            return;
        };
        trace!(
            target: "dragdrop::dropzone",
            kind = ?signal.kind,
            element = ?signal.target,
            related = ?signal.related,
            "deliver"
        );
        let seq = Router::with_parent(HostParents(&*host)).bubble_for(signal.target, Some(signal));
        dispatcher::run(&seq, outbox, |step, outbox| {
            let (Some(signal), Some(ids)) = (&step.meta, zones_by_root.get(&step.node)) else {
                return Outcome::Continue;
            };
            let mut outcome = Outcome::Continue;
            for id in ids {
                if let Some(zone) = dropzones.get(id)
                    && zone.receive(host, session, signal, outbox) == Outcome::Stop
                {
                    outcome = Outcome::Stop;
                }
            }
            outcome
        });
    }

    /// Queue a draggable notification carrying the current session.
    pub(crate) fn notify_draggable(
        &mut self,
        wrap: fn(DraggableEvent<H::Element, D>) -> Notification<H::Element, D>,
        draggable: DraggableId,
        element: H::Element,
        original_event: Option<InputKind<H::Element>>,
        cancelled: bool,
    ) {
        let Some(session) = self.slot.current() else {
            return;
        };
        self.outbox.push(wrap(DraggableEvent {
            draggable,
            element,
            drag_info: session.clone(),
            original_event,
            cancelled,
        }));
    }
}

/// Draggables and dropzones over a [`Host`] document.
///
/// `D` is the payload type attached to draggables with
/// [`DraggableConfig::data`].
///
/// Feed every raw input event to [`DragDrop::handle_event`], call
/// [`DragDrop::on_animation_frame`] once per frame, and collect public
/// notifications with [`DragDrop::take_notifications`].
pub struct DragDrop<H: Host, D = ()> {
    shared: Shared<H, D>,
    draggables: HashMap<DraggableId, Draggable<H, D>>,
    roots: HashMap<H::Element, SmallVec<[DraggableId; 1]>>,
    next_draggable: u64,
    next_dropzone: u64,
}

impl<H: Host + fmt::Debug, D: fmt::Debug> fmt::Debug for DragDrop<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragDrop")
            .field("host", &self.shared.host)
            .field("session", &self.shared.slot.current())
            .field("draggables", &self.draggables)
            .field("dropzones", &self.shared.dropzones)
            .field("pending_notifications", &self.shared.outbox.len())
            .finish_non_exhaustive()
    }
}

impl<H: Host, D: Clone> DragDrop<H, D> {
    /// A runtime over `host` with nothing attached.
    pub fn new(host: H) -> Self {
        Self {
            shared: Shared::new(host),
            draggables: HashMap::new(),
            roots: HashMap::new(),
            next_draggable: 0,
            next_dropzone: 0,
        }
    }

    /// The document.
    pub fn host(&self) -> &H {
        &self.shared.host
    }

    /// The document, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.shared.host
    }

    /// Give the document back.
    pub fn into_host(self) -> H {
        self.shared.host
    }

    /// Make `root` draggable.
    ///
    /// Ids increase with every call and are never reused.
    pub fn attach_draggable(&mut self, root: H::Element, config: DraggableConfig<H, D>) -> Result<DraggableId> {
        let id = DraggableId::new(self.next_draggable);
        let draggable = Draggable::attach(&mut self.shared.host, id, root, config)?;
        self.next_draggable += 1;
        self.draggables.insert(id, draggable);
        self.roots.entry(root).or_default().push(id);
        Ok(id)
    }

    /// Remove a draggable, cancelling its drag if it has one.
    pub fn detach_draggable(&mut self, id: DraggableId) -> Result<()> {
        let mut draggable = self.draggables.remove(&id).ok_or(Error::UnknownDraggable(id))?;
        draggable.detach(&mut self.shared);
        if let Some(ids) = self.roots.get_mut(&draggable.root) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.roots.remove(&draggable.root);
            }
        }
        Ok(())
    }

    /// Change a draggable's configuration.
    ///
    /// If the result does not validate, the selectors, classes, threshold and
    /// auto-scroll settings are restored and the error is returned.
    pub fn update_draggable(
        &mut self,
        id: DraggableId,
        update: impl FnOnce(&mut DraggableConfig<H, D>),
    ) -> Result<()> {
        let draggable = self.draggables.get_mut(&id).ok_or(Error::UnknownDraggable(id))?;
        draggable.reconfigure(&mut self.shared.host, update)
    }

    /// A draggable's configuration.
    pub fn draggable_config(&self, id: DraggableId) -> Result<&DraggableConfig<H, D>> {
        self.draggables
            .get(&id)
            .map(Draggable::config)
            .ok_or(Error::UnknownDraggable(id))
    }

    /// Raw event listeners a draggable currently has installed.
    pub fn listeners(&self, id: DraggableId) -> Result<Listeners> {
        self.draggables
            .get(&id)
            .map(Draggable::listeners)
            .ok_or(Error::UnknownDraggable(id))
    }

    /// Cancel the current drag if `id` owns it. Does nothing otherwise.
    pub fn abort(&mut self, id: DraggableId) -> Result<()> {
        let draggable = self.draggables.get_mut(&id).ok_or(Error::UnknownDraggable(id))?;
        draggable.abort(&mut self.shared);
        Ok(())
    }

    /// Make `root` a dropzone.
    pub fn attach_dropzone(&mut self, root: H::Element, config: DropzoneConfig<H::Element, D>) -> Result<DropzoneId> {
        config.validate()?;
        let id = DropzoneId::new(self.next_dropzone);
        self.next_dropzone += 1;
        debug!(target: "dragdrop::dropzone", dropzone = %id, element = ?root, "dropzone attached");
        self.shared.dropzones.insert(id, Dropzone { id, root, config });
        self.shared.zones_by_root.entry(root).or_default().push(id);
        Ok(id)
    }

    /// Remove a dropzone.
    pub fn detach_dropzone(&mut self, id: DropzoneId) -> Result<()> {
        let zone = self.shared.dropzones.remove(&id).ok_or(Error::UnknownDropzone(id))?;
        if let Some(ids) = self.shared.zones_by_root.get_mut(&zone.root) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.shared.zones_by_root.remove(&zone.root);
            }
        }
        debug!(target: "dragdrop::dropzone", dropzone = %id, "dropzone detached");
        Ok(())
    }

    /// Change a dropzone's configuration, keeping the old class names if the
    /// new ones do not validate.
    pub fn update_dropzone(
        &mut self,
        id: DropzoneId,
        update: impl FnOnce(&mut DropzoneConfig<H::Element, D>),
    ) -> Result<()> {
        let zone = self.shared.dropzones.get_mut(&id).ok_or(Error::UnknownDropzone(id))?;
        let classes = (zone.config.over_class.clone(), zone.config.invalid_class.clone());
        update(&mut zone.config);
        if let Err(err) = zone.config.validate() {
            (zone.config.over_class, zone.config.invalid_class) = classes;
            return Err(err);
        }
        Ok(())
    }

    /// Handle one raw input event.
    ///
    /// Presses are routed from their target up to the root and offered to every
    /// draggable rooted on that path, innermost first. Other events go to the
    /// draggables with a matching listener installed, in attach order. Clicks
    /// are checked against click suppression.
    pub fn handle_event(&mut self, event: &mut InputEvent<H::Element>) {
        if let InputKind::Click { target } = event.kind {
            self.filter_click(event, target);
        } else if event.kind.is_start() {
            self.route_start(event);
        } else {
            self.broadcast(event);
        }
    }

    /// Apply the pending avatar translate and stop suppressing clicks.
    pub fn on_animation_frame(&mut self) {
        if let Some(frame) = self.shared.frames.run_frame() {
            frame.apply(&mut self.shared.host);
        }
        if let Some(element) = self.shared.clicks.release() {
            trace!(target: "dragdrop::runtime", ?element, "click suppression released");
        }
    }

    /// The current session, pending or active.
    pub fn current_drag(&self) -> Option<&DragInfo<H::Element, D>> {
        self.shared.slot.current()
    }

    /// Returns `true` while a drag is active, past its start threshold.
    pub fn is_dragging(&self) -> bool {
        self.shared.slot.current().is_some_and(|s| s.is_started())
    }

    /// Drain the queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification<H::Element, D>> {
        core::mem::take(&mut self.shared.outbox)
    }

    fn filter_click(&mut self, event: &mut InputEvent<H::Element>, target: H::Element) {
        let host = &self.shared.host;
        let result = self
            .shared
            .clicks
            .on_click(&target, |outer, inner| host.contains(*outer, *inner));
        if result.is_suppressed() {
            trace!(target: "dragdrop::runtime", element = ?target, "click suppressed");
            event.prevent_default();
            event.stop_propagation();
        }
    }

    fn route_start(&mut self, event: &mut InputEvent<H::Element>) {
        let Some(target) = event.kind.target() else {
            return;
        };
        let seq = Router::with_parent(HostParents(&self.shared.host)).bubble_for(target, None::<()>);
        let Self {
            shared,
            draggables,
            roots,
            ..
        } = self;
        dispatcher::run(&seq, event, |step, event| {
            if let Some(ids) = roots.get(&step.node) {
                for id in ids {
                    if let Some(draggable) = draggables.get_mut(id) {
                        draggable.handle(shared, event);
                    }
                }
            }
            if event.is_propagation_stopped() {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
    }

    fn broadcast(&mut self, event: &mut InputEvent<H::Element>) {
        let mut ids: SmallVec<[DraggableId; 4]> = self
            .draggables
            .iter()
            .filter(|(_, d)| d.listens_to(&event.kind))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        for id in ids {
            if let Some(draggable) = self.draggables.get_mut(&id) {
                draggable.handle(&mut self.shared, event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseInput;
    use crate::memory::{ElementId, MemoryDocument};
    use kurbo::{Point, Rect};

    fn doc() -> (MemoryDocument, ElementId, ElementId) {
        let mut doc = MemoryDocument::new();
        let item = doc.append(doc.body(), "div", Rect::new(0.0, 0.0, 50.0, 50.0));
        let zone = doc.append(doc.body(), "div", Rect::new(100.0, 0.0, 200.0, 100.0));
        (doc, item, zone)
    }

    fn send(dd: &mut DragDrop<MemoryDocument>, kind: InputKind<ElementId>) -> InputEvent<ElementId> {
        let mut event = InputEvent::new(kind);
        dd.handle_event(&mut event);
        event
    }

    #[test]
    fn ids_are_monotonic_and_registry_errors_name_the_id() {
        let (doc, item, zone) = doc();
        let mut dd: DragDrop<MemoryDocument> = DragDrop::new(doc);
        let a = dd.attach_draggable(item, DraggableConfig::default()).unwrap();
        let b = dd.attach_draggable(zone, DraggableConfig::default()).unwrap();
        assert!(a < b);
        dd.detach_draggable(a).unwrap();
        assert_eq!(dd.detach_draggable(a), Err(Error::UnknownDraggable(a)));
        let c = dd.attach_draggable(item, DraggableConfig::default()).unwrap();
        assert!(c > b);

        let z = dd.attach_dropzone(zone, DropzoneConfig::default()).unwrap();
        dd.detach_dropzone(z).unwrap();
        assert_eq!(dd.detach_dropzone(z), Err(Error::UnknownDropzone(z)));
    }

    #[test]
    fn plain_click_creates_and_releases_a_session() {
        let (doc, item, _) = doc();
        let mut dd: DragDrop<MemoryDocument> = DragDrop::new(doc);
        let id = dd.attach_draggable(item, DraggableConfig::default()).unwrap();

        send(&mut dd, InputKind::MouseDown(MouseInput::new(item, Point::new(10.0, 10.0))));
        assert_eq!(dd.current_drag().map(|s| s.draggable()), Some(id));
        assert!(!dd.is_dragging());

        send(&mut dd, InputKind::MouseUp(MouseInput::new(item, Point::new(11.0, 10.0))));
        assert!(dd.current_drag().is_none());
        assert!(dd.take_notifications().is_empty());

        let click = send(&mut dd, InputKind::Click { target: item });
        assert!(!click.is_default_prevented());
    }

    #[test]
    fn drop_reaches_dropzone_and_click_is_suppressed_until_next_frame() {
        let (doc, item, zone) = doc();
        let mut dd: DragDrop<MemoryDocument> = DragDrop::new(doc);
        dd.attach_draggable(item, DraggableConfig::default()).unwrap();
        dd.attach_dropzone(zone, DropzoneConfig::default()).unwrap();

        send(&mut dd, InputKind::MouseDown(MouseInput::new(item, Point::new(10.0, 10.0))));
        send(&mut dd, InputKind::MouseMove(MouseInput::new(item, Point::new(20.0, 10.0))));
        send(&mut dd, InputKind::MouseMove(MouseInput::new(zone, Point::new(150.0, 10.0))));
        assert!(dd.host().has_class(zone, "dragging--over"));
        send(&mut dd, InputKind::MouseUp(MouseInput::new(zone, Point::new(150.0, 10.0))));

        let names: Vec<_> = dd.take_notifications().iter().map(Notification::name).collect();
        assert_eq!(
            names,
            ["dragstart", "dragenter", "dragover", "drag", "drop", "dragleave", "dragend"]
        );
        assert!(!dd.host().has_class(zone, "dragging--over"));

        let click = send(&mut dd, InputKind::Click { target: item });
        assert!(click.is_default_prevented());
        assert!(click.is_propagation_stopped());

        dd.on_animation_frame();
        let click = send(&mut dd, InputKind::Click { target: item });
        assert!(!click.is_default_prevented());
    }

    #[test]
    fn update_dropzone_keeps_classes_on_error() {
        let (doc, _, zone) = doc();
        let mut dd: DragDrop<MemoryDocument> = DragDrop::new(doc);
        let id = dd.attach_dropzone(zone, DropzoneConfig::default()).unwrap();
        let err = dd.update_dropzone(id, |config| config.over_class = Some(String::new()));
        assert!(err.is_err());
        dd.update_dropzone(id, |config| config.exact = true).unwrap();
        assert_eq!(
            dd.update_dropzone(DropzoneId::new(99), |_| {}),
            Err(Error::UnknownDropzone(DropzoneId::new(99)))
        );
    }
}
