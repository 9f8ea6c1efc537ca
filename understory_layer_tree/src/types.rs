// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the layer tree: element identifiers, flags, and placement options.

/// Identifier for an element in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On create, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Detaching an element from its parent does not free it; only
/// [`Document::remove`](crate::Document::remove) does.
///
/// ### Liveness
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether an `ElementId` still refers to a live element.
/// Stale `ElementId`s never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is visible (it and its subtree participate in hit testing).
        const VISIBLE  = 0b0000_0001;
        /// Element is pickable (can be the target of a hit test).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Which horizontal edge of the anchor the layer's left edge is placed on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HorizontalEdge {
    /// The anchor's left edge.
    #[default]
    Left,
    /// The anchor's right edge.
    Right,
}

/// Which vertical edge of the anchor the layer's top edge is placed on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VerticalEdge {
    /// The anchor's top edge.
    Top,
    /// The anchor's bottom edge.
    #[default]
    Bottom,
}

/// Placement used by [`Document::attach_to`](crate::Document::attach_to).
///
/// The default puts the layer's top-left corner on the anchor's bottom-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachOptions {
    /// Anchor edge the layer's top edge sits on.
    pub top: VerticalEdge,
    /// Anchor edge the layer's left edge sits on.
    pub left: HorizontalEdge,
}
