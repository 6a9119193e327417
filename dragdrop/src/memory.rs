// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory document.
//!
//! [`MemoryDocument`] implements [`Host`] over a plain element tree. Layout is
//! explicit: every element has a page-space rectangle set with
//! [`MemoryDocument::set_rect`]. Hit testing picks the topmost hittable
//! element, where "topmost" means highest effective `z-index`, then latest in
//! document order.
//!
//! Hit testing honors inherited `visibility: hidden` and `pointer-events: none`
//! inline styles. Elements may host a shadow root; shadow content is skipped
//! by document-level hit testing and reached through
//! [`Host::shadow_element_from_point`].
//!
//! Selectors support `tag`, `*`, `.class`, `#id`, compounds of those
//! (`li.item#first`) and comma separated lists. Anything else never matches.
//!
//! ```
//! use dragdrop::memory::MemoryDocument;
//! use dragdrop::Host;
//! use kurbo::{Point, Rect};
//!
//! let mut doc = MemoryDocument::new();
//! let list = doc.append(doc.body(), "ul", Rect::new(0.0, 0.0, 200.0, 200.0));
//! let item = doc.append(list, "li", Rect::new(0.0, 0.0, 200.0, 20.0));
//! doc.add_class(item, "item");
//!
//! assert_eq!(doc.element_from_point(Point::new(10.0, 10.0)), Some(item));
//! assert_eq!(doc.element_from_point(Point::new(10.0, 50.0)), Some(list));
//! assert!(doc.matches(item, "ul, li.item"));
//! assert!(doc.contains(list, item));
//! ```

use std::collections::BTreeMap;

use kurbo::{Point, Rect, Size, Vec2};

use crate::error::SelectionError;
use crate::host::{Capabilities, Host};

/// Handle to an element of a [`MemoryDocument`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

const SHADOW_ROOT_TAG: &str = "#shadow-root";
const FORM_CONTROLS: [&str; 5] = ["select", "input", "textarea", "button", "option"];

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    shadow_root: Option<ElementId>,
    rect: Rect,
    selection: (usize, usize),
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            shadow_root: None,
            rect: Rect::ZERO,
            selection: (0, 0),
        }
    }

    fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }
}

/// Effective hit-testing state inherited down the tree.
#[derive(Copy, Clone)]
struct Inherited {
    hidden: bool,
    inert: bool,
    z: i32,
}

impl Inherited {
    const ROOT: Self = Self {
        hidden: false,
        inert: false,
        z: 0,
    };

    fn apply(self, node: &Node) -> Self {
        let hidden = match node.style("visibility") {
            Some("hidden") => true,
            Some("visible") => false,
            _ => self.hidden,
        };
        let inert = match node.style("pointer-events") {
            Some("none") => true,
            Some("auto") => false,
            _ => self.inert,
        };
        let z = node
            .style("z-index")
            .and_then(|z| z.trim().parse().ok())
            .unwrap_or(self.z);
        Self { hidden, inert, z }
    }
}

/// A complete in-memory [`Host`].
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: ElementId,
    body: ElementId,
    capabilities: Capabilities,
    viewport: Size,
    scroll: Vec2,
    focused: Option<ElementId>,
    text_selected: bool,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A document with an `html` root, a `body`, a 1024×768 viewport and mouse input only.
    pub fn new() -> Self {
        let viewport = Size::new(1024.0, 768.0);
        let mut doc = Self {
            nodes: Vec::new(),
            root: ElementId(0),
            body: ElementId(0),
            capabilities: Capabilities::default(),
            viewport,
            scroll: Vec2::ZERO,
            focused: None,
            text_selected: false,
        };
        doc.root = doc.create_element("html");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.body);
        let page = viewport.to_rect();
        doc.set_rect(doc.root, page);
        doc.set_rect(doc.body, page);
        doc
    }

    /// Replace the platform capabilities.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replace the viewport size.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// The `html` element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node::new(tag));
        id
    }

    /// Create an element with `rect` and append it to `parent`.
    pub fn append(&mut self, parent: ElementId, tag: &str, rect: Rect) -> ElementId {
        let id = self.create_element(tag);
        self.set_rect(id, rect);
        self.append_child(parent, id);
        id
    }

    /// Attach a fresh shadow root to `host` and return it.
    pub fn attach_shadow(&mut self, host: ElementId) -> ElementId {
        let root = self.create_element(SHADOW_ROOT_TAG);
        self.set_shadow_root(host, root);
        root
    }

    /// Make `root` the shadow root of `host`.
    ///
    /// `root` may already be in use elsewhere, which allows building the
    /// malformed shadow structures hit testing has to survive.
    pub fn set_shadow_root(&mut self, host: ElementId, root: ElementId) {
        if let Some(node) = self.node_mut(root)
            && node.parent.is_none()
        {
            node.parent = Some(host);
        }
        if let Some(node) = self.node_mut(host) {
            node.shadow_root = Some(root);
        }
    }

    /// Page-space rectangle of `element`.
    pub fn rect(&self, element: ElementId) -> Rect {
        self.node(element).map_or(Rect::ZERO, |n| n.rect)
    }

    /// Set the page-space rectangle of `element`.
    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.node_mut(element) {
            node.rect = rect;
        }
    }

    /// Lowercase tag name of `element`.
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|n| n.tag.as_str())
    }

    /// Attribute `name` of `element`.
    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.node(element)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Set attribute `name` of `element`.
    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Children of `element`, in document order.
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.node(element).map_or(&[], |n| n.children.as_slice())
    }

    /// Classes of `element`, in insertion order.
    pub fn classes(&self, element: ElementId) -> impl Iterator<Item = &str> + '_ {
        self.node(element)
            .into_iter()
            .flat_map(|n| n.classes.iter().map(String::as_str))
    }

    /// Returns `true` if `element` is reachable from the document root.
    pub fn is_connected(&self, element: ElementId) -> bool {
        self.contains(self.root, element)
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    /// Focus `element`.
    pub fn focus(&mut self, element: ElementId) {
        self.focused = Some(element);
    }

    /// The focused element.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Mark the document as having (or not having) a text selection.
    pub fn set_text_selected(&mut self, selected: bool) {
        self.text_selected = selected;
    }

    /// Returns `true` while the document has a text selection.
    pub fn has_text_selection(&self) -> bool {
        self.text_selected
    }

    /// Selection range of a text control.
    pub fn selection_range(&self, element: ElementId) -> (usize, usize) {
        self.node(element).map_or((0, 0), |n| n.selection)
    }

    /// Set the selection range of a text control.
    pub fn set_selection_range(&mut self, element: ElementId, start: usize, end: usize) {
        if let Some(node) = self.node_mut(element) {
            node.selection = (start, end);
        }
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.0 as usize)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.0 as usize)
    }

    fn detach(&mut self, element: ElementId) {
        let Some(parent) = self.node(element).and_then(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != element);
        }
        if let Some(node) = self.node_mut(element) {
            node.parent = None;
        }
    }

    /// Topmost hittable element below `start` (exclusive) at page position `point`.
    fn hit_below(&self, start: ElementId, point: Point) -> Option<ElementId> {
        let mut best: Option<(i32, usize, ElementId)> = None;
        let mut order = 0_usize;
        let mut stack: Vec<(ElementId, Inherited)> = Vec::new();
        let base = self.node(start).map_or(Inherited::ROOT, |n| Inherited::ROOT.apply(n));
        for &child in self.children(start).iter().rev() {
            stack.push((child, base));
        }
        while let Some((id, inherited)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            let state = inherited.apply(node);
            order += 1;
            if !state.hidden && !state.inert && node.rect.contains(point) {
                let key = (state.z, order);
                if best.is_none_or(|(z, o, _)| key >= (z, o)) {
                    best = Some((state.z, order, id));
                }
            }
            for &child in node.children.iter().rev() {
                stack.push((child, state));
            }
        }
        best.map(|(_, _, id)| id)
    }

    fn matches_compound(node: &Node, selector: &str) -> bool {
        if selector.is_empty()
            || selector
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '>' | '+' | '~' | '[' | ':'))
        {
            return false;
        }
        let tag_end = selector.find(['.', '#']).unwrap_or(selector.len());
        let tag = &selector[..tag_end];
        if !tag.is_empty() && tag != "*" && !tag.eq_ignore_ascii_case(&node.tag) {
            return false;
        }
        let mut rest = &selector[tag_end..];
        while let Some(kind) = rest.chars().next() {
            rest = &rest[kind.len_utf8()..];
            let end = rest.find(['.', '#']).unwrap_or(rest.len());
            let name = &rest[..end];
            if name.is_empty() {
                return false;
            }
            let ok = match kind {
                '.' => node.classes.iter().any(|c| c == name),
                _ => node.attributes.get("id").is_some_and(|id| id == name),
            };
            if !ok {
                return false;
            }
            rest = &rest[end..];
        }
        true
    }

    fn clone_subtree(&mut self, element: ElementId) -> ElementId {
        let Some(source) = self.node(element).cloned() else {
            return self.create_element("div");
        };
        let copy = self.create_element(&source.tag);
        if let Some(node) = self.node_mut(copy) {
            node.classes = source.classes;
            node.attributes = source.attributes;
            node.styles = source.styles;
            node.rect = source.rect;
        }
        for child in source.children {
            let child_copy = self.clone_subtree(child);
            self.append_child(copy, child_copy);
        }
        copy
    }
}

impl Host for MemoryDocument {
    type Element = ElementId;

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|n| n.parent)
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn matches(&self, element: ElementId, selector: &str) -> bool {
        let Some(node) = self.node(element) else {
            return false;
        };
        selector
            .split(',')
            .any(|part| Self::matches_compound(node, part.trim()))
    }

    fn is_form_control(&self, element: ElementId) -> bool {
        self.node(element)
            .is_some_and(|n| FORM_CONTROLS.contains(&n.tag.as_str()))
    }

    fn element_from_point(&self, client: Point) -> Option<ElementId> {
        let page = client + self.scroll;
        let root = self.node(self.root)?;
        let state = Inherited::ROOT.apply(root);
        if let Some(hit) = self.hit_below(self.root, page) {
            return Some(hit);
        }
        (!state.hidden && !state.inert && root.rect.contains(page)).then_some(self.root)
    }

    fn shadow_element_from_point(&self, host: ElementId, client: Point) -> Option<ElementId> {
        let shadow = self.node(host)?.shadow_root?;
        self.hit_below(shadow, client + self.scroll)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element)
            && !node.classes.iter().any(|c| c == class)
        {
            node.classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_document_class(&mut self, class: &str) {
        self.add_class(self.root, class);
    }

    fn remove_document_class(&mut self, class: &str) {
        self.remove_class(self.root, class);
    }

    fn set_visibility(&mut self, element: ElementId, visible: bool) {
        let value = if visible { "visible" } else { "hidden" };
        self.set_style(element, "visibility", Some(value));
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.node(element)
            .and_then(|n| n.style(property))
            .map(str::to_owned)
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: Option<&str>) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        match value {
            Some(value) => {
                node.styles.insert(property.to_owned(), value.to_owned());
            }
            None => {
                node.styles.remove(property);
            }
        }
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.remove(name);
        }
    }

    fn clear_text_selection(&mut self) -> Result<(), SelectionError> {
        self.text_selected = false;
        let Some(focused) = self.focused else {
            return Ok(());
        };
        match self.tag(focused) {
            Some("input") if self.attribute(focused, "type") == Some("file") => {
                Err(SelectionError::Unsupported)
            }
            Some("input" | "textarea") => {
                self.set_selection_range(focused, 0, 0);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn clone_element(&mut self, element: ElementId) -> ElementId {
        self.clone_subtree(element)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn remove_element(&mut self, element: ElementId) {
        self.detach(element);
        if self.focused.is_some_and(|f| self.contains(element, f)) {
            self.focused = None;
        }
    }

    fn offset_of(&self, element: ElementId) -> Point {
        self.rect(element).origin()
    }

    fn margins(&self, element: ElementId) -> Vec2 {
        let px = |property: &str| {
            self.node(element)
                .and_then(|n| n.style(property))
                .and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        Vec2::new(px("margin-left"), px("margin-top"))
    }

    fn viewport(&self) -> Rect {
        self.viewport.to_rect()
    }

    fn scroll_by(&mut self, delta: Vec2) {
        let next = self.scroll + delta;
        self.scroll = Vec2::new(next.x.max(0.0), next.y.max(0.0));
    }
}
