// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timer --heading-base-level=0

//! Understory Timer: a deterministic, host-driven single-shot timer queue.
//!
//! ## Overview
//!
//! UI controls debounce pointer input with delayed actions: show a tooltip after a
//! quiet period, hide it unless the pointer comes back. This crate provides the
//! scheduling half of that pattern without owning a clock or a thread.
//!
//! - [`TimerQueue::set_timeout`] schedules a payload to fire after a delay and
//!   returns a generational [`TimerId`].
//! - [`TimerQueue::clear_timeout`] cancels a pending timer. Clearing a timer that
//!   already fired or was already cleared is a no-op.
//! - The host moves the virtual clock with [`TimerQueue::advance`] (or the
//!   re-entrant [`TimerQueue::advance_clock`] + [`TimerQueue::pop_due`] pair) and
//!   dispatches the returned [`Fired`] payloads itself.
//!
//! Timers are single-shot. There is no retry and no upper bound on delays; a
//! cleared timer simply never fires.
//!
//! ## Ordering
//!
//! Due timers are returned in deadline order. Timers sharing a deadline are
//! returned in the order they were scheduled.
//!
//! ## Re-entrancy
//!
//! Callbacks often cancel or schedule other timers. Hosts that need those changes
//! to take effect within the same tick should drain with [`TimerQueue::pop_due`]
//! instead of [`TimerQueue::advance`]:
//!
//! ```
//! use core::time::Duration;
//! use understory_timer::TimerQueue;
//!
//! let mut timers: TimerQueue<&str> = TimerQueue::new();
//! let _a = timers.set_timeout(Duration::from_millis(10), "a");
//! let b = timers.set_timeout(Duration::from_millis(10), "b");
//!
//! timers.advance_clock(Duration::from_millis(10));
//! let mut seen = Vec::new();
//! while let Some(fired) = timers.pop_due() {
//!     // Firing `a` supersedes `b`, even though both were due.
//!     if fired.payload == "a" {
//!         timers.clear_timeout(b);
//!     }
//!     seen.push(fired.payload);
//! }
//! assert_eq!(seen, ["a"]);
//! ```
//!
//! ## Minimal usage
//!
//! ```
//! use core::time::Duration;
//! use understory_timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let show = timers.set_timeout(Duration::from_millis(100), 1_u32);
//! assert!(timers.advance(Duration::from_millis(50)).is_empty());
//!
//! let fired = timers.advance(Duration::from_millis(50));
//! assert_eq!(fired.len(), 1);
//! assert_eq!(fired[0].id, show);
//! assert!(!timers.is_pending(show));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;

pub use queue::{Fired, TimerId, TimerQueue};
