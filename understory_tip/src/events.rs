// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor event bindings and pointer enter/leave tracking.
//!
//! Handlers are data: a binding maps `(element, event kind)` to an [`Action`]
//! on its owning control, and the host (see [`Ui`](crate::ui::Ui)) runs it.
//! Bindings are grouped by owner so disposal can drop them all at once.
//!
//! [`PointerTracker`] turns successive hit-test paths into per-element
//! [`EventKind::MouseOut`] / [`EventKind::MouseOver`] events, leaving inner→outer
//! and entering outer→inner. Moving between an element's descendants produces no
//! events for the element itself.
//!
//! ```
//! use understory_layer_tree::Document;
//! use understory_tip::events::{EventKind, PointerTracker};
//!
//! let mut doc = Document::new();
//! let a = doc.create_element("div");
//! let b = doc.create_element("div");
//! let mut pointer = PointerTracker::new();
//! assert_eq!(pointer.update_path(&[a]), [(a, EventKind::MouseOver)]);
//! assert_eq!(
//!     pointer.update_path(&[b]),
//!     [(a, EventKind::MouseOut), (b, EventKind::MouseOver)]
//! );
//! ```

use alloc::vec::Vec;

use understory_layer_tree::ElementId;

use crate::naming::ControlId;

/// Anchor events a control can bind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary button click.
    Click,
    /// Pointer entered the element.
    MouseOver,
    /// Pointer left the element.
    MouseOut,
}

/// What a bound event (or a fired timer) asks its control to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Request showing.
    Show,
    /// Request hiding.
    Hide,
}

/// A single binding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EventBinding {
    /// Control the handler belongs to.
    pub owner: ControlId,
    /// Element listened on.
    pub element: ElementId,
    /// Event listened for.
    pub kind: EventKind,
    /// What to do when it happens.
    pub action: Action,
}

/// Registry of event bindings for every control in a host.
#[derive(Clone, Debug, Default)]
pub struct EventBindings {
    bindings: Vec<EventBinding>,
}

impl EventBindings {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` of `owner` to `kind` events on `element`.
    pub fn add_event(
        &mut self,
        owner: ControlId,
        element: ElementId,
        kind: EventKind,
        action: Action,
    ) {
        self.bindings.push(EventBinding {
            owner,
            element,
            kind,
            action,
        });
    }

    /// Handlers for `kind` on `element`, in binding order.
    pub fn handlers(
        &self,
        element: ElementId,
        kind: EventKind,
    ) -> impl Iterator<Item = (ControlId, Action)> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.element == element && b.kind == kind)
            .map(|b| (b.owner, b.action))
    }

    /// Bindings owned by `owner`.
    pub fn owned_by(&self, owner: ControlId) -> impl Iterator<Item = &EventBinding> + '_ {
        self.bindings.iter().filter(move |b| b.owner == owner)
    }

    /// Drop every binding of `owner`; returns how many were removed.
    pub fn remove_owner(&mut self, owner: ControlId) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.owner != owner);
        before - self.bindings.len()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Tracks the hovered body→target path and reports enter/leave per element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerTracker {
    current: Vec<ElementId>,
}

impl PointerTracker {
    /// Nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently hovered path.
    pub fn current_path(&self) -> &[ElementId] {
        &self.current
    }

    /// Pointer left everything: `MouseOut` for the whole path, inner→outer.
    pub fn clear(&mut self) -> Vec<(ElementId, EventKind)> {
        let out = self
            .current
            .iter()
            .rev()
            .map(|&e| (e, EventKind::MouseOut))
            .collect();
        self.current.clear();
        out
    }

    /// Move to `new_path` and return the minimal `MouseOut`s then `MouseOver`s.
    pub fn update_path(&mut self, new_path: &[ElementId]) -> Vec<(ElementId, EventKind)> {
        // Shared ancestry stays hovered.
        let common = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = Vec::new();
        for &e in self.current[common..].iter().rev() {
            out.push((e, EventKind::MouseOut));
        }
        for &e in &new_path[common..] {
            out.push((e, EventKind::MouseOver));
        }

        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_layer_tree::Document;

    fn elements(n: usize) -> Vec<ElementId> {
        let mut doc = Document::new();
        (0..n).map(|_| doc.create_element("div")).collect()
    }

    #[test]
    fn handlers_filter_by_element_and_kind() {
        let e = elements(2);
        let mut events = EventBindings::new();
        events.add_event(ControlId(1), e[0], EventKind::MouseOver, Action::Show);
        events.add_event(ControlId(1), e[0], EventKind::MouseOut, Action::Hide);
        events.add_event(ControlId(2), e[1], EventKind::Click, Action::Show);

        let over: Vec<_> = events.handlers(e[0], EventKind::MouseOver).collect();
        assert_eq!(over, [(ControlId(1), Action::Show)]);
        assert_eq!(events.handlers(e[0], EventKind::Click).count(), 0);
        assert_eq!(events.owned_by(ControlId(1)).count(), 2);
    }

    #[test]
    fn remove_owner_unbinds_only_that_owner() {
        let e = elements(1);
        let mut events = EventBindings::new();
        events.add_event(ControlId(1), e[0], EventKind::MouseOver, Action::Show);
        events.add_event(ControlId(2), e[0], EventKind::MouseOver, Action::Show);
        assert_eq!(events.remove_owner(ControlId(1)), 1);
        assert_eq!(events.len(), 1);
        assert_eq!(events.remove_owner(ControlId(1)), 0);
    }

    // Deep common prefix: only the differing tails transition.
    #[test]
    fn pointer_moves_between_branches() {
        let e = elements(5);
        let mut pointer = PointerTracker::new();
        let _ = pointer.update_path(&[e[0], e[1], e[2]]);
        let events = pointer.update_path(&[e[0], e[3], e[4]]);
        assert_eq!(
            events,
            [
                (e[2], EventKind::MouseOut),
                (e[1], EventKind::MouseOut),
                (e[3], EventKind::MouseOver),
                (e[4], EventKind::MouseOver),
            ]
        );
        assert_eq!(pointer.current_path(), &[e[0], e[3], e[4]]);
    }

    #[test]
    fn same_path_is_silent_and_clear_leaves_all() {
        let e = elements(2);
        let mut pointer = PointerTracker::new();
        let _ = pointer.update_path(&[e[0], e[1]]);
        assert!(pointer.update_path(&[e[0], e[1]]).is_empty());
        assert_eq!(
            pointer.clear(),
            [(e[1], EventKind::MouseOut), (e[0], EventKind::MouseOut)]
        );
        assert!(pointer.current_path().is_empty());
    }
}
