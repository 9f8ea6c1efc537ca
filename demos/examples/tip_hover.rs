// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A hover tip driven by pointer motion and a virtual clock.
//!
//! The pointer enters the anchor, briefly leaves, and comes back before the
//! hide delay elapses: the pending hide is superseded and the tip stays up.
//!
//! Run:
//! - `cargo run -p understory_demos --example tip_hover`

use std::time::Duration;

use kurbo::{Point, Rect};
use understory_tip::props::{ArrowPosition, TipOptions};
use understory_tip::ui::Ui;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn report(ui: &Ui, label: &str) {
    for id in ui.tip_ids() {
        let tip = ui.tip(id).unwrap();
        println!(
            "  [{:>4?}] {label}: {} {:?}",
            ui.now(),
            tip.identity().main_id(),
            tip.state()
        );
    }
}

fn main() {
    let mut ui = Ui::new();
    let id = ui.create_tip(
        TipOptions::new()
            .title("Bold")
            .content("Ctrl+B")
            .arrow(Some(ArrowPosition::Tl))
            .hide_delay(ms(150)),
    );
    let anchor = ui.tip(id).unwrap().main().unwrap();
    ui.document_mut()
        .set_bounds(anchor, Rect::new(20.0, 20.0, 60.0, 44.0));

    println!("== Enter anchor ==");
    ui.pointer_move(Point::new(30.0, 30.0));
    ui.advance(ms(100));
    report(&ui, "after show delay");

    println!("== Leave and come back ==");
    ui.pointer_move(Point::new(200.0, 200.0));
    ui.advance(ms(80));
    ui.pointer_move(Point::new(30.0, 30.0));
    ui.advance(ms(500));
    report(&ui, "still shown");
    assert!(ui.tip(id).unwrap().is_visible());

    println!("== Leave for good ==");
    ui.pointer_leave();
    ui.advance(ms(150));
    report(&ui, "after hide delay");
    assert!(!ui.tip(id).unwrap().is_visible());

    let layer = ui.tip(id).unwrap().layer().unwrap();
    let doc = ui.document();
    println!("== Layer ==");
    println!("  root:  {}", doc.class_name(layer.root));
    println!("  title: {:?}", doc.text(layer.title));
    println!("  body:  {:?}", doc.text(layer.body));
    println!("  arrow: {}", doc.class_name(layer.arrow));
}
