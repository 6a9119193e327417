// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document a runtime operates on.
//!
//! [`Host`] is everything the drag and drop core needs from a document: the
//! element tree, selector matching, hit testing, class and style mutation,
//! and a few platform services. Element handles are small copyable values
//! owned by the host.
//!
//! [`MemoryDocument`](crate::memory::MemoryDocument) is a complete in-memory
//! implementation. Embedders bridging a real UI toolkit implement the trait
//! over their own node ids.

use core::fmt::Debug;
use core::hash::Hash;

use dragdrop_responder::router::MAX_PATH_DEPTH;
use dragdrop_responder::types::ParentLookup;
use kurbo::{Point, Rect, Vec2};

use crate::error::SelectionError;

/// Input APIs the platform exposes.
///
/// Decides which input adapters a draggable installs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Unified pointer events are available.
    pub pointer_events: bool,
    /// Touch events are available.
    pub touch_events: bool,
}

/// A document hosting draggables and dropzones.
pub trait Host {
    /// Handle to an element of this document.
    type Element: Copy + Eq + Hash + Debug;

    /// Input APIs this platform exposes.
    fn capabilities(&self) -> Capabilities;

    /// Parent of `element`, or `None` for the root and detached elements.
    ///
    /// Elements inside a shadow tree report the shadow host as an ancestor so
    /// notifications cross shadow boundaries.
    fn parent(&self, element: Self::Element) -> Option<Self::Element>;

    /// Returns `true` if `inner` is `outer` or one of its descendants.
    fn contains(&self, outer: Self::Element, inner: Self::Element) -> bool {
        let mut current = Some(inner);
        for _ in 0..MAX_PATH_DEPTH {
            match current {
                Some(element) if element == outer => return true,
                Some(element) => current = self.parent(element),
                None => return false,
            }
        }
        false
    }

    /// The document body, used when hit testing finds nothing.
    fn body(&self) -> Self::Element;

    /// Returns `true` if `element` matches the comma separated `selector` list.
    fn matches(&self, element: Self::Element, selector: &str) -> bool;

    /// Returns `true` for native form controls (select, input, textarea, button, option).
    fn is_form_control(&self, element: Self::Element) -> bool;

    /// Topmost element at a client (viewport) position.
    fn element_from_point(&self, client: Point) -> Option<Self::Element>;

    /// Topmost element of the shadow tree hosted by `host` at a client position.
    ///
    /// `None` when `host` has no shadow root or nothing in it is hit.
    fn shadow_element_from_point(&self, host: Self::Element, client: Point) -> Option<Self::Element>;

    /// Add a class to `element`.
    fn add_class(&mut self, element: Self::Element, class: &str);

    /// Remove a class from `element`.
    fn remove_class(&mut self, element: Self::Element, class: &str);

    /// Returns `true` if `element` carries `class`.
    fn has_class(&self, element: Self::Element, class: &str) -> bool;

    /// Add a class to the document root element.
    fn add_document_class(&mut self, class: &str);

    /// Remove a class from the document root element.
    fn remove_document_class(&mut self, class: &str);

    /// Show or hide `element` without affecting layout.
    fn set_visibility(&mut self, element: Self::Element, visible: bool);

    /// Inline style `property` of `element`.
    fn style(&self, element: Self::Element, property: &str) -> Option<String>;

    /// Set (`Some`) or clear (`None`) inline style `property` of `element`.
    fn set_style(&mut self, element: Self::Element, property: &str, value: Option<&str>);

    /// Remove attribute `name` from `element`.
    fn remove_attribute(&mut self, element: Self::Element, name: &str);

    /// Drop the document text selection and collapse the selection of the
    /// focused text control.
    fn clear_text_selection(&mut self) -> Result<(), SelectionError>;

    /// Deep copy of `element`, not yet attached to the document.
    fn clone_element(&mut self, element: Self::Element) -> Self::Element;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Element, child: Self::Element);

    /// Detach `element` from the document.
    fn remove_element(&mut self, element: Self::Element);

    /// Layout offset of `element`: the origin avatars position against.
    fn offset_of(&self, element: Self::Element) -> Point;

    /// Left and top margins of `element`.
    fn margins(&self, element: Self::Element) -> Vec2;

    /// The visible viewport in client coordinates.
    fn viewport(&self) -> Rect;

    /// Scroll the document by `delta`.
    fn scroll_by(&mut self, delta: Vec2);
}

/// Walk a host's element tree from the responder router.
#[derive(Debug)]
pub struct HostParents<'a, H>(pub &'a H);

impl<H: Host> ParentLookup<H::Element> for HostParents<'_, H> {
    fn parent_of(&self, node: &H::Element) -> Option<H::Element> {
        self.0.parent(*node)
    }
}

/// Returns `true` if `element` or one of its ancestors matches `selector`.
pub(crate) fn matches_with_ancestors<H: Host>(host: &H, element: H::Element, selector: &str) -> bool {
    let mut current = Some(element);
    for _ in 0..MAX_PATH_DEPTH {
        let Some(el) = current else {
            return false;
        };
        if host.matches(el, selector) {
            return true;
        }
        current = host.parent(el);
    }
    false
}
