// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A click-mode tip configured from string pairs, then updated in place.
//!
//! Only the properties that actually changed are repainted.
//!
//! Run:
//! - `cargo run -p understory_demos --example tip_click`

use std::time::Duration;

use understory_tip::events::EventKind;
use understory_tip::props::{ArrowPosition, TipOptions};
use understory_tip::ui::Ui;

fn main() {
    let options = TipOptions::from_pairs([
        ("title", "Share"),
        ("content", "Copy a link to this page"),
        ("mode", "click"),
        ("arrow", "BR"),
        ("showDelay", "20ms"),
    ])
    .expect("valid tip options");

    let mut ui = Ui::new();
    let id = ui.create_tip(options);
    let anchor = ui.tip(id).unwrap().main().unwrap();

    println!("== Hover does nothing in click mode ==");
    println!("  handlers run: {}", ui.dispatch(anchor, EventKind::MouseOver));

    println!("== Click ==");
    ui.dispatch(anchor, EventKind::Click);
    ui.advance(Duration::from_millis(20));
    let layer = ui.tip(id).unwrap().layer().unwrap();
    println!("  state: {:?}", ui.tip(id).unwrap().state());
    println!("  arrow: {}", ui.document().class_name(layer.arrow));

    println!("== Update ==");
    let changes = ui.set_properties(
        id,
        TipOptions::new()
            .title("Share")
            .content("Link copied")
            .arrow(Some(ArrowPosition::Lt)),
    );
    for change in &changes {
        println!("  {}: {:?} -> {:?}", change.property.name(), change.old, change.new);
    }
    assert_eq!(changes.len(), 2);
    println!("  body:  {:?}", ui.document().text(layer.body));
    println!("  arrow: {}", ui.document().class_name(layer.arrow));

    ui.dispose(id);
    println!("== Disposed ==");
    println!("  layer present: {}", ui.document().get_element_by_id("ctrl-1-layer").is_some());
}
