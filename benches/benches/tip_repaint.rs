// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_tip::props::{ArrowPosition, TipOptions};
use understory_tip::ui::Ui;

fn shown_tips(n: usize) -> Ui {
    let mut ui = Ui::new();
    let ids: Vec<_> = (0..n)
        .map(|i| ui.create_tip(TipOptions::new().title(&format!("tip {i}"))))
        .collect();
    for id in ids {
        ui.show(id);
    }
    ui.advance(Duration::from_millis(100));
    ui
}

fn bench_set_properties(c: &mut Criterion) {
    let mut group = c.benchmark_group("tip_set_properties");
    group.bench_function("content_only", |b| {
        let mut ui = shown_tips(1);
        let id = ui.tip_ids().next().unwrap();
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let text = if flip { "on" } else { "off" };
            black_box(ui.set_properties(id, TipOptions::new().content(text)).len())
        });
    });
    group.bench_function("no_change", |b| {
        let mut ui = shown_tips(1);
        let id = ui.tip_ids().next().unwrap();
        b.iter(|| black_box(ui.set_properties(id, TipOptions::new().title("tip 0")).len()));
    });
    group.bench_function("all_painted", |b| {
        let mut ui = shown_tips(1);
        let id = ui.tip_ids().next().unwrap();
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let (text, arrow) = if flip {
                ("a", ArrowPosition::Br)
            } else {
                ("b", ArrowPosition::Tl)
            };
            let options = TipOptions::new().title(text).content(text).arrow(Some(arrow));
            black_box(ui.set_properties(id, options).len())
        });
    });
    group.finish();
}

fn bench_show_hide_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("tip_show_hide");
    for &n in &[1_usize, 64, 512] {
        group.bench_function(format!("tips={n}"), |b| {
            b.iter_batched(
                || shown_tips(n),
                |mut ui| {
                    let ids: Vec<_> = ui.tip_ids().collect();
                    for &id in &ids {
                        ui.hide(id);
                    }
                    let hidden = ui.advance(Duration::from_millis(100));
                    for &id in &ids {
                        ui.show(id);
                    }
                    black_box(hidden + ui.advance(Duration::from_millis(100)))
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_set_properties, bench_show_hide_cycle);
criterion_main!(benches);
