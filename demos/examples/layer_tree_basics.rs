// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a small document, look elements up by id, and hit test it.
//!
//! Run:
//! - `cargo run -p understory_demos --example layer_tree_basics`

use kurbo::{Point, Rect};
use understory_layer_tree::{AttachOptions, Document, ElementFlags, HorizontalEdge, VerticalEdge};

fn main() {
    let mut doc = Document::new();
    let body = doc.body();

    let toolbar = doc.create_element("nav");
    doc.set_id_attr(toolbar, "toolbar");
    doc.set_bounds(toolbar, Rect::new(0.0, 0.0, 200.0, 40.0));
    doc.append_child(body, toolbar);

    let button = doc.create_element("button");
    doc.set_class_name(button, &["btn", "btn-primary"]);
    doc.set_bounds(button, Rect::new(10.0, 5.0, 60.0, 35.0));
    doc.append_child(toolbar, button);

    let popup = doc.create_element("div");
    doc.set_bounds(popup, Rect::new(0.0, 0.0, 80.0, 30.0));
    doc.append_child(body, popup);
    doc.attach_to(
        popup,
        button,
        AttachOptions {
            top: VerticalEdge::Bottom,
            left: HorizontalEdge::Left,
        },
    );

    println!("== Lookup ==");
    println!("  #toolbar -> {:?}", doc.get_element_by_id("toolbar"));
    println!("  button classes: {}", doc.class_name(button));
    println!("  popup bounds: {:?}", doc.bounds(popup));

    println!("== Hit test ==");
    for pt in [Point::new(20.0, 20.0), Point::new(20.0, 50.0), Point::new(150.0, 20.0)] {
        let hit = doc.hit_test_point(pt);
        println!("  {pt:?} -> {:?}", hit.map(|h| h.path));
    }
    assert_eq!(doc.hit_test_point(Point::new(20.0, 50.0)).map(|h| h.element), Some(popup));

    doc.set_flags(popup, ElementFlags::PICKABLE);
    println!("== Popup hidden ==");
    println!("  (20, 50) -> {:?}", doc.hit_test_point(Point::new(20.0, 50.0)));
    assert!(doc.hit_test_point(Point::new(20.0, 50.0)).is_none());
}
