// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_timer::TimerQueue;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

fn filled_queue(n: usize, seed: u64) -> TimerQueue<u32> {
    let mut rng = Rng::new(seed);
    let mut q = TimerQueue::new();
    for i in 0..n {
        let delay = Duration::from_millis(rng.next_u64() % 1_000);
        q.set_timeout(delay, i as u32);
    }
    q
}

fn bench_schedule_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_schedule_cancel");
    for &n in &[16_usize, 256, 4096] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("n={n}"), |b| {
            b.iter_batched(
                TimerQueue::<u32>::new,
                |mut q| {
                    let mut rng = Rng::new(7);
                    let mut last = None;
                    for i in 0..n {
                        if let Some(id) = last.take() {
                            q.clear_timeout(id);
                        }
                        let delay = Duration::from_millis(rng.next_u64() % 500);
                        last = Some(q.set_timeout(delay, i as u32));
                    }
                    black_box(q.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_drain");
    for &n in &[16_usize, 256, 4096] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("advance/n={n}"), |b| {
            b.iter_batched(
                || filled_queue(n, 42),
                |mut q| black_box(q.advance(Duration::from_secs(1)).len()),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("pop_due/n={n}"), |b| {
            b.iter_batched(
                || filled_queue(n, 42),
                |mut q| {
                    q.advance_clock(Duration::from_secs(1));
                    let mut count = 0;
                    while let Some(fired) = q.pop_due() {
                        count += black_box(fired.payload) as usize & 1;
                    }
                    count
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_schedule_cancel, bench_drain);
criterion_main!(benches);
