// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for firing order and cancellation.

use std::time::Duration;

use proptest::prelude::*;
use understory_timer::TimerQueue;

proptest! {
    // Every non-cleared timer fires exactly once, in (deadline, schedule order).
    #[test]
    fn fires_sorted_and_skips_cleared(
        delays in proptest::collection::vec(0_u64..500, 1..40),
        clear_mask in proptest::collection::vec(any::<bool>(), 40),
    ) {
        let mut q = TimerQueue::new();
        let mut expected = Vec::new();
        for (i, d) in delays.iter().enumerate() {
            let id = q.set_timeout(Duration::from_millis(*d), i);
            if clear_mask[i] {
                prop_assert_eq!(q.clear_timeout(id), Some(i));
            } else {
                expected.push((*d, i));
            }
        }
        expected.sort();

        let fired: Vec<usize> = q
            .advance(Duration::from_millis(500))
            .into_iter()
            .map(|f| f.payload)
            .collect();
        let want: Vec<usize> = expected.into_iter().map(|(_, i)| i).collect();
        prop_assert_eq!(fired, want);
        prop_assert!(q.is_empty());
    }

    // Splitting one advance into many steps fires the same set in the same order.
    #[test]
    fn stepping_matches_single_advance(
        delays in proptest::collection::vec(0_u64..200, 1..20),
        step in 1_u64..50,
    ) {
        let mut a = TimerQueue::new();
        let mut b = TimerQueue::new();
        for (i, d) in delays.iter().enumerate() {
            let _ = a.set_timeout(Duration::from_millis(*d), i);
            let _ = b.set_timeout(Duration::from_millis(*d), i);
        }
        let whole: Vec<usize> = a
            .advance(Duration::from_millis(200))
            .into_iter()
            .map(|f| f.payload)
            .collect();
        let mut stepped = Vec::new();
        while b.now() < Duration::from_millis(200) {
            stepped.extend(b.advance(Duration::from_millis(step)).into_iter().map(|f| f.payload));
        }
        prop_assert_eq!(whole, stepped);
    }
}
