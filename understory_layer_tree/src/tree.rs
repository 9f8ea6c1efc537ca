// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, attributes, queries.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{AttachOptions, ElementFlags, ElementId, HorizontalEdge, VerticalEdge};

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A retained tree of elements rooted at a single `body`.
///
/// Elements are created detached. They become part of the document (and visible
/// to [`get_element_by_id`](Self::get_element_by_id) and
/// [`hit_test_point`](Self::hit_test_point)) once their root ancestor is the body.
pub struct Document {
    nodes: Vec<Option<Element>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    body: ElementId,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Result of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub element: ElementId,
    /// Path from the body to the element (inclusive).
    pub path: Vec<ElementId>,
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    tag: String,
    id_attr: Option<String>,
    classes: Vec<String>,
    text: String,
    bounds: Rect,
    flags: ElementFlags,
}

impl Element {
    fn new(generation: u32, tag: &str) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            tag: tag.to_owned(),
            id_attr: None,
            classes: Vec::new(),
            text: String::new(),
            bounds: Rect::ZERO,
            flags: ElementFlags::default(),
        }
    }
}

impl Document {
    /// Create a document holding only its body.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            body: ElementId::new(0, 1),
        };
        doc.body = doc.create_element("body");
        doc
    }

    /// The document body; the root of everything attached.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Element::new(generation, tag));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Element::new(generation, tag)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        ElementId::new(idx, generation)
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    ///
    /// Ignored if either id is stale, or if it would make an element its own ancestor.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.body {
            return;
        }
        if self.path_to_root(parent).contains(&child) {
            return;
        }
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Unlink `id` from its parent. The element and its subtree stay alive.
    pub fn detach(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Remove an element (and its subtree) from the document, freeing the ids.
    ///
    /// The body cannot be removed.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) || id == self.body {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// An `ElementId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns true if `id` is live and its root ancestor is the body.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.is_alive(id) && self.path_to_root(id).first() == Some(&self.body)
    }

    /// Parent of `id`, if any.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id)?.parent
    }

    /// Children of `id` in order; empty for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Tag name of `id`.
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|n| n.tag.as_str())
    }

    /// Set the `id` attribute.
    pub fn set_id_attr(&mut self, id: ElementId, value: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.id_attr = Some(value.to_owned());
        }
    }

    /// The `id` attribute, if set.
    pub fn id_attr(&self, id: ElementId) -> Option<&str> {
        self.get(id)?.id_attr.as_deref()
    }

    /// Find an attached element by its `id` attribute.
    ///
    /// Detached elements never match. When several attached elements share an
    /// id, the first in document order wins.
    pub fn get_element_by_id(&self, value: &str) -> Option<ElementId> {
        let mut stack = alloc::vec![self.body];
        while let Some(id) = stack.pop() {
            let n = self.node(id);
            if n.id_attr.as_deref() == Some(value) {
                return Some(id);
            }
            stack.extend(n.children.iter().rev().copied());
        }
        None
    }

    /// Replace the class list.
    pub fn set_class_name<S: AsRef<str>>(&mut self, id: ElementId, classes: &[S]) {
        if let Some(n) = self.node_opt_mut(id) {
            n.classes.clear();
            for c in classes {
                let c = c.as_ref();
                if !c.is_empty() && !n.classes.iter().any(|e| e == c) {
                    n.classes.push(c.to_owned());
                }
            }
        }
    }

    /// Add a class; no-op if already present.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            if !class.is_empty() && !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        }
    }

    /// Remove a class; no-op if absent.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.classes.retain(|c| c != class);
        }
    }

    /// Returns true if `id` carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// The class list in insertion order.
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.get(id).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    /// The class list joined by spaces, like a `className` attribute.
    pub fn class_name(&self, id: ElementId) -> String {
        self.classes(id).join(" ")
    }

    /// Replace the text content.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            text.clone_into(&mut n.text);
        }
    }

    /// Text content of `id`.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|n| n.text.as_str())
    }

    /// Set document-space bounds.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.bounds = bounds;
        }
    }

    /// Document-space bounds of `id`.
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(|n| n.bounds)
    }

    /// Update element flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// Flags of `id`.
    pub fn flags(&self, id: ElementId) -> Option<ElementFlags> {
        self.get(id).map(|n| n.flags)
    }

    /// Move `layer` next to `anchor` according to `options`, keeping its size.
    ///
    /// This only computes the origin. It does not keep the layer inside any
    /// viewport; callers wanting collision handling adjust the bounds afterwards.
    pub fn attach_to(&mut self, layer: ElementId, anchor: ElementId, options: AttachOptions) {
        let Some(a) = self.bounds(anchor) else {
            return;
        };
        let Some(size) = self.bounds(layer).map(|b| b.size()) else {
            return;
        };
        let x = match options.left {
            HorizontalEdge::Left => a.x0,
            HorizontalEdge::Right => a.x1,
        };
        let y = match options.top {
            VerticalEdge::Top => a.y0,
            VerticalEdge::Bottom => a.y1,
        };
        self.set_bounds(layer, Rect::from_origin_size(Point::new(x, y), size));
    }

    /// Hit test a document-space point. Returns the topmost attached element.
    ///
    /// Later elements in document order are on top. Invisible elements hide
    /// their whole subtree; non-pickable ones are skipped but their children
    /// can still be hit. The body itself is never the target.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let mut best = None;
        let mut stack = alloc::vec![self.body];
        while let Some(id) = stack.pop() {
            let n = self.node(id);
            if !n.flags.contains(ElementFlags::VISIBLE) {
                continue;
            }
            if id != self.body
                && n.flags.contains(ElementFlags::PICKABLE)
                && n.bounds.contains(pt)
            {
                best = Some(id);
            }
            stack.extend(n.children.iter().rev().copied());
        }
        best.map(|element| Hit {
            element,
            path: self.path_to_root(element),
        })
    }

    // --- internals ---

    fn get(&self, id: ElementId) -> Option<&Element> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Access an element; panics if `id` is stale.
    fn node(&self, id: ElementId) -> &Element {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    /// Access an element mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: ElementId) -> &mut Element {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn free_subtree(&mut self, id: ElementId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn path_to_root(&self, mut id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }
}
