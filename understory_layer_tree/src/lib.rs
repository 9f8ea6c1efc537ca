// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_layer_tree --heading-base-level=0

//! Understory Layer Tree: a retained element tree for detached UI layers.
//!
//! Popovers, tooltips, and menus live outside normal layout: they are built once,
//! appended to the document body, placed next to an anchor, and toggled with
//! classes. This crate provides the element tree those controls mutate.
//!
//! - Elements carry a tag, an optional `id` attribute, an ordered class list, text content,
//!   document-space bounds, and [`ElementFlags`].
//! - Elements are created detached and become part of the document when appended under
//!   [`Document::body`]. Lookups by id only see attached elements.
//! - [`Document::attach_to`] places a layer relative to an anchor's edges.
//! - [`Document::hit_test_point`] resolves a pointer position to a body→target path,
//!   which feeds hover tracking.
//!
//! ## Not a layout engine
//!
//! Bounds are supplied by the caller. The tree never measures text or arranges
//! children, and [`Document::attach_to`] does no viewport collision handling.
//!
//! ## API overview
//!
//! - [`Document`]: container owning every element.
//! - [`ElementId`]: generational handle of an element.
//! - [`ElementFlags`]: visibility and picking controls.
//! - [`AttachOptions`]: which anchor edges a layer is placed against.
//!
//! ### Minimal usage
//!
//! ```
//! use understory_layer_tree::{AttachOptions, Document};
//! use kurbo::Rect;
//!
//! let mut doc = Document::new();
//! let anchor = doc.create_element("aside");
//! doc.set_bounds(anchor, Rect::new(10.0, 10.0, 110.0, 30.0));
//! doc.append_child(doc.body(), anchor);
//!
//! let layer = doc.create_element("div");
//! doc.set_id_attr(layer, "ctrl-1-layer");
//! doc.set_bounds(layer, Rect::new(0.0, 0.0, 200.0, 80.0));
//! doc.append_child(doc.body(), layer);
//! doc.attach_to(layer, anchor, AttachOptions::default());
//!
//! assert_eq!(doc.get_element_by_id("ctrl-1-layer"), Some(layer));
//! assert_eq!(doc.bounds(layer), Some(Rect::new(10.0, 30.0, 210.0, 110.0)));
//!
//! doc.add_class(layer, "ui-tip-layer-hidden");
//! assert!(doc.has_class(layer, "ui-tip-layer-hidden"));
//!
//! doc.remove(layer);
//! assert_eq!(doc.get_element_by_id("ctrl-1-layer"), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Document, Hit};
pub use types::{AttachOptions, ElementFlags, ElementId, HorizontalEdge, VerticalEdge};
