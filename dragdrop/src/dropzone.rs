// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropzones: elements that accept drops.
//!
//! A dropzone listens on its root element for the hover signals of the active
//! drag. Signals bubble from the element under the pointer through its
//! ancestors, so a dropzone also hears signals addressed to its descendants.
//! For every signal that reaches it, a dropzone:
//!
//! 1. stops further bubbling if it is `exact`;
//! 2. for enter and leave, ignores transitions whose other side is still
//!    inside its root, unless `allow_on_child` is set;
//! 3. asks its [`Acceptor`] whether the drag is welcome. Accepted signals become
//!    public [`Notification`]s and toggle the over class; rejected enters and
//!    leaves toggle the invalid class instead.

use core::fmt;

use dragdrop_event_state::hover::{HoverKind, HoverSignal};
use dragdrop_event_state::session::DraggableId;
use dragdrop_responder::types::Outcome;
use hashbrown::HashSet;
use tracing::trace;

use crate::error::{Result, check_class};
use crate::event::{DragInfo, DropzoneEvent, Notification};
use crate::host::Host;

/// Identity of a dropzone instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DropzoneId(u64);

impl DropzoneId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DropzoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropzone#{}", self.0)
    }
}

/// Decides whether a dropzone welcomes the current drag.
///
/// Implemented for every `Fn(&DragInfo<E, D>, E, &HoverSignal<E>) -> bool`.
pub trait Acceptor<E, D> {
    /// Returns `true` if the drag described by `drag_info` may interact with
    /// the dropzone rooted at `dropzone_element`.
    fn accepts(&self, drag_info: &DragInfo<E, D>, dropzone_element: E, event: &HoverSignal<E>) -> bool;
}

impl<E, D, F> Acceptor<E, D> for F
where
    F: Fn(&DragInfo<E, D>, E, &HoverSignal<E>) -> bool,
{
    fn accepts(&self, drag_info: &DragInfo<E, D>, dropzone_element: E, event: &HoverSignal<E>) -> bool {
        self(drag_info, dropzone_element, event)
    }
}

/// Accepts drags of a fixed set of draggables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraggablesAcceptor {
    ids: HashSet<DraggableId>,
}

impl DraggablesAcceptor {
    /// Accept the given draggables.
    pub fn new(ids: impl IntoIterator<Item = DraggableId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Accept `id` as well.
    pub fn insert(&mut self, id: DraggableId) -> bool {
        self.ids.insert(id)
    }
}

impl FromIterator<DraggableId> for DraggablesAcceptor {
    fn from_iter<T: IntoIterator<Item = DraggableId>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<E, D> Acceptor<E, D> for DraggablesAcceptor {
    fn accepts(&self, drag_info: &DragInfo<E, D>, _: E, _: &HoverSignal<E>) -> bool {
        self.ids.contains(&drag_info.draggable())
    }
}

/// Configuration of a dropzone.
pub struct DropzoneConfig<E, D> {
    /// Predicate deciding which drags are welcome. `None` accepts everything.
    pub acceptor: Option<Box<dyn Acceptor<E, D>>>,
    /// Keep signals from reaching dropzones further up the tree.
    pub exact: bool,
    /// Class added to the root while an accepted drag is over it.
    pub over_class: Option<String>,
    /// Class added to the root while a rejected drag is over it.
    pub invalid_class: Option<String>,
    /// Report enter and leave for every child boundary crossed.
    pub allow_on_child: bool,
}

impl<E, D> Default for DropzoneConfig<E, D> {
    fn default() -> Self {
        Self {
            acceptor: None,
            exact: false,
            over_class: Some("dragging--over".into()),
            invalid_class: Some("dragging--invalid".into()),
            allow_on_child: false,
        }
    }
}

impl<E, D> fmt::Debug for DropzoneConfig<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropzoneConfig")
            .field("acceptor", &self.acceptor.as_ref().map(|_| "..."))
            .field("exact", &self.exact)
            .field("over_class", &self.over_class)
            .field("invalid_class", &self.invalid_class)
            .field("allow_on_child", &self.allow_on_child)
            .finish()
    }
}

impl<E, D> DropzoneConfig<E, D> {
    /// Set the acceptance predicate.
    pub fn acceptor(mut self, acceptor: impl Acceptor<E, D> + 'static) -> Self {
        self.acceptor = Some(Box::new(acceptor));
        self
    }

    /// Set [`DropzoneConfig::exact`].
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Set or disable the over class.
    pub fn over_class(mut self, class: Option<&str>) -> Self {
        self.over_class = class.map(str::to_owned);
        self
    }

    /// Set or disable the invalid class.
    pub fn invalid_class(mut self, class: Option<&str>) -> Self {
        self.invalid_class = class.map(str::to_owned);
        self
    }

    /// Set [`DropzoneConfig::allow_on_child`].
    pub fn allow_on_child(mut self, allow: bool) -> Self {
        self.allow_on_child = allow;
        self
    }

    /// Check the class names.
    pub fn validate(&self) -> Result<()> {
        check_class("over_class", self.over_class.as_deref())?;
        check_class("invalid_class", self.invalid_class.as_deref())
    }
}

/// A registered dropzone.
pub(crate) struct Dropzone<E, D> {
    pub(crate) id: DropzoneId,
    pub(crate) root: E,
    pub(crate) config: DropzoneConfig<E, D>,
}

impl<E: fmt::Debug, D> fmt::Debug for Dropzone<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropzone")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("config", &self.config)
            .finish()
    }
}

impl<E: Copy, D: Clone> Dropzone<E, D> {
    /// Handle a hover signal that bubbled to this dropzone's root.
    pub(crate) fn receive<H: Host<Element = E>>(
        &self,
        host: &mut H,
        drag_info: &DragInfo<E, D>,
        signal: &HoverSignal<E>,
        outbox: &mut Vec<Notification<E, D>>,
    ) -> Outcome {
        let outcome = if self.config.exact {
            Outcome::Stop
        } else {
            Outcome::Continue
        };

        let transition = matches!(signal.kind, HoverKind::Enter | HoverKind::Leave);
        if transition
            && !self.config.allow_on_child
            && let Some(related) = signal.related
            && host.contains(self.root, related)
        {
            trace!(
                target: "dragdrop::dropzone",
                dropzone = %self.id,
                kind = ?signal.kind,
                "transition stayed inside the dropzone"
            );
            return outcome;
        }

        let accepted = self
            .config
            .acceptor
            .as_ref()
            .is_none_or(|acceptor| acceptor.accepts(drag_info, self.root, signal));
        trace!(
            target: "dragdrop::dropzone",
            dropzone = %self.id,
            kind = ?signal.kind,
            accepted,
            "hover signal"
        );

        if !accepted {
            let class = self.config.invalid_class.as_deref();
            match (signal.kind, class) {
                (HoverKind::Enter, Some(class)) => host.add_class(self.root, class),
                (HoverKind::Leave, Some(class)) => host.remove_class(self.root, class),
                _ => {}
            }
            return outcome;
        }

        let over = self.config.over_class.as_deref();
        match (signal.kind, over) {
            (HoverKind::Enter, Some(class)) => host.add_class(self.root, class),
            (HoverKind::Leave, Some(class)) => host.remove_class(self.root, class),
            _ => {}
        }
        let event = DropzoneEvent {
            dropzone: self.id,
            dropzone_element: self.root,
            drag_info: drag_info.clone(),
            original_event: *signal,
        };
        outbox.push(match signal.kind {
            HoverKind::Enter => Notification::DragEnter(event),
            HoverKind::Over => Notification::DragOver(event),
            HoverKind::Leave => Notification::DragLeave(event),
            HoverKind::Drop => Notification::Drop(event),
        });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementId, MemoryDocument};
    use dragdrop_event_state::axis::Axis;
    use dragdrop_event_state::session::DragSession;
    use kurbo::{Point, Rect, Vec2};

    struct Fixture {
        doc: MemoryDocument,
        zone: ElementId,
        child: ElementId,
        outside: ElementId,
    }

    fn fixture() -> Fixture {
        let mut doc = MemoryDocument::new();
        let zone = doc.append(doc.body(), "div", Rect::new(0.0, 0.0, 100.0, 100.0));
        let child = doc.append(zone, "p", Rect::new(10.0, 10.0, 50.0, 50.0));
        let outside = doc.append(doc.body(), "div", Rect::new(200.0, 0.0, 300.0, 100.0));
        Fixture {
            doc,
            zone,
            child,
            outside,
        }
    }

    fn info(id: u64, element: ElementId) -> DragInfo<ElementId, ()> {
        DragSession::new(DraggableId::new(id), element, None, Point::ZERO, Axis::Both, Vec2::ZERO)
    }

    fn signal(kind: HoverKind, target: ElementId, related: Option<ElementId>) -> HoverSignal<ElementId> {
        HoverSignal {
            kind,
            target,
            related,
        }
    }

    fn zone(root: ElementId, config: DropzoneConfig<ElementId, ()>) -> Dropzone<ElementId, ()> {
        Dropzone {
            id: DropzoneId::new(1),
            root,
            config,
        }
    }

    #[test]
    fn accepted_enter_and_leave_toggle_over_class() {
        let mut f = fixture();
        let dz = zone(f.zone, DropzoneConfig::default());
        let drag = info(3, f.outside);
        let mut out = Vec::new();

        dz.receive(&mut f.doc, &drag, &signal(HoverKind::Enter, f.zone, Some(f.outside)), &mut out);
        assert!(f.doc.has_class(f.zone, "dragging--over"));
        dz.receive(&mut f.doc, &drag, &signal(HoverKind::Leave, f.zone, Some(f.outside)), &mut out);
        assert!(!f.doc.has_class(f.zone, "dragging--over"));

        let names: Vec<_> = out.iter().map(Notification::name).collect();
        assert_eq!(names, ["dragenter", "dragleave"]);
        let event = out[0].as_dropzone().unwrap();
        assert_eq!(event.dropzone_element, f.zone);
        assert_eq!(event.original_event.related, Some(f.outside));
    }

    #[test]
    fn rejected_signals_only_toggle_invalid_class() {
        let mut f = fixture();
        let dz = zone(
            f.zone,
            DropzoneConfig::default().acceptor(DraggablesAcceptor::new([DraggableId::new(3)])),
        );
        let drag = info(7, f.outside);
        let mut out = Vec::new();

        dz.receive(&mut f.doc, &drag, &signal(HoverKind::Enter, f.zone, None), &mut out);
        assert!(f.doc.has_class(f.zone, "dragging--invalid"));
        assert!(!f.doc.has_class(f.zone, "dragging--over"));
        dz.receive(&mut f.doc, &drag, &signal(HoverKind::Over, f.zone, None), &mut out);
        dz.receive(&mut f.doc, &drag, &signal(HoverKind::Drop, f.zone, None), &mut out);
        dz.receive(&mut f.doc, &drag, &signal(HoverKind::Leave, f.zone, None), &mut out);
        assert!(!f.doc.has_class(f.zone, "dragging--invalid"));
        assert!(out.is_empty());
    }

    #[test]
    fn child_crossings_are_ignored_unless_allowed() {
        let mut f = fixture();
        let drag = info(1, f.outside);
        let enter_child = signal(HoverKind::Enter, f.child, Some(f.zone));

        let mut out = Vec::new();
        let dz = zone(f.zone, DropzoneConfig::default());
        dz.receive(&mut f.doc, &drag, &enter_child, &mut out);
        assert!(out.is_empty());

        let dz = zone(f.zone, DropzoneConfig::default().allow_on_child(true));
        dz.receive(&mut f.doc, &drag, &enter_child, &mut out);
        assert_eq!(out.len(), 1);

        // Over is never filtered by containment.
        let dz = zone(f.zone, DropzoneConfig::default());
        dz.receive(&mut f.doc, &drag, &signal(HoverKind::Over, f.child, None), &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn exact_stops_even_when_ignoring() {
        let mut f = fixture();
        let drag = info(1, f.outside);
        let mut out = Vec::new();
        let dz = zone(f.zone, DropzoneConfig::default().exact(true));
        let inner = signal(HoverKind::Leave, f.child, Some(f.zone));
        assert_eq!(dz.receive(&mut f.doc, &drag, &inner, &mut out), Outcome::Stop);
        assert!(out.is_empty());

        let dz = zone(f.zone, DropzoneConfig::default());
        assert_eq!(dz.receive(&mut f.doc, &drag, &inner, &mut out), Outcome::Continue);
    }

    #[test]
    fn closures_are_acceptors() {
        let mut f = fixture();
        let dz = zone(
            f.zone,
            DropzoneConfig::default()
                .acceptor(|info: &DragInfo<ElementId, ()>, _: ElementId, _: &HoverSignal<ElementId>| {
                    info.draggable().get() % 2 == 0
                })
                .over_class(None),
        );
        let mut out = Vec::new();
        dz.receive(&mut f.doc, &info(2, f.outside), &signal(HoverKind::Over, f.zone, None), &mut out);
        dz.receive(&mut f.doc, &info(5, f.outside), &signal(HoverKind::Over, f.zone, None), &mut out);
        assert_eq!(out.len(), 1);
        assert!(!f.doc.has_class(f.zone, "dragging--over"));
    }

    #[test]
    fn class_names_are_validated() {
        let config: DropzoneConfig<ElementId, ()> = DropzoneConfig::default().over_class(Some("two words"));
        assert!(config.validate().is_err());
        assert_eq!(DropzoneId::new(4).to_string(), "dropzone#4");
    }
}
