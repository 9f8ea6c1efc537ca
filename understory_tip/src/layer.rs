// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay layer ownership: lazy creation, arrow classes, visibility, teardown.
//!
//! A tip owns at most one overlay layer for its whole life. The layer is built on
//! first use, cached, and only destroyed by [`LayerManager::teardown`].
//!
//! ```text
//! <div id="ctrl-{id}-layer" class="ui-tip-layer">      (appended to body)
//!   <h3  id="ctrl-{id}-title" class="ui-tip-title">
//!   <div id="ctrl-{id}-body"  class="ui-tip-body">
//!   <div id="ctrl-{id}-arrow" class="ui-tip-arrow ui-tip-arrow-tl">
//! ```

use alloc::format;

use understory_layer_tree::{AttachOptions, Document, ElementId, HorizontalEdge, VerticalEdge};

use crate::naming::ControlIdentity;
use crate::props::ArrowPosition;

/// Part name of the layer root.
pub const LAYER_PART: &str = "layer";
/// Part name of the title region.
pub const TITLE_PART: &str = "title";
/// Part name of the body region.
pub const BODY_PART: &str = "body";
/// Part name of the arrow region.
pub const ARROW_PART: &str = "arrow";
/// Part whose classes mark the layer as hidden.
pub const HIDDEN_PART: &str = "layer-hidden";

/// Where the layer goes relative to its anchor: top-left on the anchor's bottom-left.
pub const LAYER_PLACEMENT: AttachOptions = AttachOptions {
    top: VerticalEdge::Bottom,
    left: HorizontalEdge::Left,
};

/// Element handles of a built overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OverlayLayer {
    /// Container appended to the document body.
    pub root: ElementId,
    /// Title region.
    pub title: ElementId,
    /// Body region.
    pub body: ElementId,
    /// Arrow region.
    pub arrow: ElementId,
}

/// Single owner of a control's overlay layer.
#[derive(Debug, Default)]
pub struct LayerManager {
    layer: Option<OverlayLayer>,
    visible: bool,
}

impl LayerManager {
    /// A manager with no layer yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The layer, if built.
    pub fn get(&self) -> Option<OverlayLayer> {
        self.layer
    }

    /// Returns true once the layer has been built (and until torn down).
    pub fn exists(&self) -> bool {
        self.layer.is_some()
    }

    /// Returns true if the layer exists and does not carry the hidden classes.
    pub fn is_visible(&self) -> bool {
        self.layer.is_some() && self.visible
    }

    /// Return the layer, building it first if needed.
    ///
    /// The second value is `true` when the layer was built by this call; the
    /// caller must then run a full repaint so the new regions show current
    /// property values. A freshly built layer is visible.
    pub fn ensure_layer(
        &mut self,
        document: &mut Document,
        identity: &ControlIdentity,
        anchor: Option<ElementId>,
    ) -> (OverlayLayer, bool) {
        if let Some(layer) = self.layer.filter(|l| document.is_alive(l.root)) {
            return (layer, false);
        }

        let root = create_part(document, identity, "div", LAYER_PART);
        let title = create_part(document, identity, "h3", TITLE_PART);
        let body = create_part(document, identity, "div", BODY_PART);
        let arrow = create_part(document, identity, "div", ARROW_PART);
        for region in [title, body, arrow] {
            document.append_child(root, region);
        }
        document.append_child(document.body(), root);
        if let Some(anchor) = anchor {
            document.attach_to(root, anchor, LAYER_PLACEMENT);
        }

        let layer = OverlayLayer {
            root,
            title,
            body,
            arrow,
        };
        self.layer = Some(layer);
        self.visible = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(control = %identity.id(), "overlay layer created");
        (layer, true)
    }

    /// Add or remove the hidden classes. No-op without a layer.
    pub fn set_hidden(&mut self, document: &mut Document, identity: &ControlIdentity, hidden: bool) {
        let Some(layer) = self.layer else {
            return;
        };
        if hidden {
            identity.add_part_classes(document, HIDDEN_PART, layer.root);
        } else {
            identity.remove_part_classes(document, HIDDEN_PART, layer.root);
        }
        self.visible = !hidden;
    }

    /// Remove the layer from the document and forget it. No-op without a layer.
    pub fn teardown(&mut self, document: &mut Document) {
        if let Some(layer) = self.layer.take() {
            document.remove(layer.root);
            self.visible = false;
            #[cfg(feature = "tracing")]
            tracing::debug!(root = ?layer.root, "overlay layer removed");
        }
    }
}

/// Reset the arrow's classes to the base arrow class plus `arrow-<position>`.
///
/// `None` leaves only the base class. No-op if the arrow element is not in the document.
pub fn position_arrow(
    document: &mut Document,
    identity: &ControlIdentity,
    position: Option<ArrowPosition>,
) {
    let Some(arrow) = document.get_element_by_id(&identity.get_id(ARROW_PART)) else {
        return;
    };
    let mut classes = identity.part_classes(ARROW_PART);
    if let Some(position) = position {
        classes.extend(identity.part_classes(&format!("{ARROW_PART}-{}", position.as_str())));
    }
    document.set_class_name(arrow, &classes);
}

fn create_part(
    document: &mut Document,
    identity: &ControlIdentity,
    tag: &str,
    part: &str,
) -> ElementId {
    let el = document.create_element(tag);
    document.set_id_attr(el, &identity.get_id(part));
    document.set_class_name(el, &identity.part_classes(part));
    el
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::ControlId;
    use kurbo::Rect;

    fn identity() -> ControlIdentity {
        ControlIdentity::new(ControlId(4), "tip")
    }

    #[test]
    fn builds_once_in_region_order() {
        let mut doc = Document::new();
        let id = identity();
        let mut layers = LayerManager::new();
        assert!(!layers.exists());

        let (layer, created) = layers.ensure_layer(&mut doc, &id, None);
        assert!(created);
        assert_eq!(doc.children(layer.root), [layer.title, layer.body, layer.arrow]);
        assert_eq!(doc.tag(layer.title), Some("h3"));
        assert_eq!(doc.get_element_by_id("ctrl-4-layer"), Some(layer.root));
        assert_eq!(doc.class_name(layer.body), "ui-tip-body");
        assert!(layers.is_visible());

        let (again, created) = layers.ensure_layer(&mut doc, &id, None);
        assert!(!created);
        assert_eq!(again, layer);
        assert_eq!(doc.children(doc.body()).len(), 1);
    }

    #[test]
    fn placed_under_anchor() {
        let mut doc = Document::new();
        let anchor = doc.create_element("aside");
        doc.set_bounds(anchor, Rect::new(5.0, 5.0, 55.0, 25.0));
        doc.append_child(doc.body(), anchor);
        let mut layers = LayerManager::new();
        let (layer, _) = layers.ensure_layer(&mut doc, &identity(), Some(anchor));
        let origin = doc.bounds(layer.root).unwrap().origin();
        assert_eq!((origin.x, origin.y), (5.0, 25.0));
    }

    #[test]
    fn arrow_classes_and_fallback() {
        let mut doc = Document::new();
        let id = identity();
        let mut layers = LayerManager::new();
        let (layer, _) = layers.ensure_layer(&mut doc, &id, None);
        let before = doc.class_name(layer.arrow);

        position_arrow(&mut doc, &id, Some(ArrowPosition::Tl));
        assert_eq!(doc.class_name(layer.arrow), "ui-tip-arrow ui-tip-arrow-tl");
        position_arrow(&mut doc, &id, Some(ArrowPosition::Rb));
        assert_eq!(doc.class_name(layer.arrow), "ui-tip-arrow ui-tip-arrow-rb");
        position_arrow(&mut doc, &id, None);
        assert_eq!(doc.class_name(layer.arrow), before);
    }

    #[test]
    fn hidden_toggle_and_teardown() {
        let mut doc = Document::new();
        let id = identity();
        let mut layers = LayerManager::new();
        layers.set_hidden(&mut doc, &id, true);
        assert!(!layers.exists(), "hiding without a layer does nothing");

        let (layer, _) = layers.ensure_layer(&mut doc, &id, None);
        layers.set_hidden(&mut doc, &id, true);
        assert!(doc.has_class(layer.root, "ui-tip-layer-hidden"));
        assert!(!layers.is_visible());
        layers.set_hidden(&mut doc, &id, false);
        assert!(!doc.has_class(layer.root, "ui-tip-layer-hidden"));

        layers.teardown(&mut doc);
        assert!(!layers.exists());
        assert!(!doc.is_alive(layer.arrow));
        assert_eq!(doc.get_element_by_id("ctrl-4-layer"), None);
        layers.teardown(&mut doc);
    }
}
