// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer queue storage and the virtual clock.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;
use core::time::Duration;

/// Identifier for a scheduled timer.
///
/// Like the node handles elsewhere in Understory this is a slot index plus a
/// generation. Once a timer fires or is cleared its slot may be reused, and the
/// reused slot carries a higher generation, so a stale `TimerId` never cancels
/// or observes somebody else's timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimerId(u32, u32);

impl TimerId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Timer ids use 32-bit slots by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A timer that came due, as returned by [`TimerQueue::pop_due`] and [`TimerQueue::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<P> {
    /// Handle the timer was scheduled under. It is no longer pending.
    pub id: TimerId,
    /// Clock value the timer was due at.
    pub deadline: Duration,
    /// Payload given to [`TimerQueue::set_timeout`].
    pub payload: P,
}

#[derive(Clone, Debug)]
struct Entry<P> {
    generation: u32,
    deadline: Duration,
    payload: P,
}

// Heap key. Field order gives `(deadline, seq)` ordering; `seq` is unique.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    deadline: Duration,
    seq: u64,
    idx: usize,
    generation: u32,
}

// Heap entries of cleared timers stay until they surface or the heap is compacted.
const COMPACT_SLACK: usize = 32;

/// Single-shot timers over a virtual clock.
///
/// The clock starts at zero and only moves when the host advances it.
///
/// Pending timers are ordered by a min-heap, so scheduling and firing are
/// logarithmic. The heap's top is always a pending timer.
pub struct TimerQueue<P> {
    entries: Vec<Option<Entry<P>>>,
    heap: BinaryHeap<Reverse<Scheduled>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    now: Duration,
    next_seq: u64,
    live: usize,
}

impl<P> core::fmt::Debug for TimerQueue<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.live)
            .field("slots", &self.entries.len())
            .field("heap", &self.heap.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<P> Default for TimerQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TimerQueue<P> {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            heap: BinaryHeap::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            now: Duration::ZERO,
            next_seq: 0,
            live: 0,
        }
    }

    /// Current value of the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no timer is pending.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Schedule `payload` to fire once `delay` has elapsed on the clock.
    ///
    /// A zero delay makes the timer due immediately; it still only fires when
    /// the host drains the queue.
    pub fn set_timeout(&mut self, delay: Duration, payload: P) -> TimerId {
        let deadline = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        let idx = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.entries[idx] = Some(Entry {
                generation,
                deadline,
                payload,
            });
            idx
        } else {
            self.entries.push(Some(Entry {
                generation: 1,
                deadline,
                payload,
            }));
            self.generations.push(1);
            self.entries.len() - 1
        };
        self.live += 1;
        let generation = self.generations[idx];
        self.heap.push(Reverse(Scheduled {
            deadline,
            seq,
            idx,
            generation,
        }));
        let id = TimerId::new(idx, generation);
        #[cfg(feature = "tracing")]
        tracing::trace!(?id, ?delay, ?deadline, "timer scheduled");
        id
    }

    /// Cancel a pending timer and hand back its payload.
    ///
    /// Returns `None` if `id` already fired, was already cleared, or is stale.
    pub fn clear_timeout(&mut self, id: TimerId) -> Option<P> {
        if !self.is_pending(id) {
            return None;
        }
        let entry = self.release(id.idx());
        if self.heap.len() > 2 * self.live + COMPACT_SLACK {
            let entries = &self.entries;
            self.heap.retain(|Reverse(s)| is_live(entries, s));
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(?id, "timer cleared");
        Some(entry.payload)
    }

    /// Returns true if `id` is scheduled and has not fired yet.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries
            .get(id.idx())
            .and_then(|e| e.as_ref())
            .is_some_and(|e| e.generation == id.1)
    }

    /// Deadline of the pending timer `id`, if any.
    pub fn deadline(&self, id: TimerId) -> Option<Duration> {
        if !self.is_pending(id) {
            return None;
        }
        self.entries[id.idx()].as_ref().map(|e| e.deadline)
    }

    /// Earliest deadline among pending timers.
    ///
    /// Hosts with a real clock can sleep until this instant.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(s)| s.deadline)
    }

    /// Move the clock forward by `dt` without firing anything.
    ///
    /// Pair with [`pop_due`](Self::pop_due) to drain re-entrantly.
    pub fn advance_clock(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Remove and return the next due timer, if any.
    pub fn pop_due(&mut self) -> Option<Fired<P>> {
        let &Reverse(top) = self.heap.peek()?;
        if top.deadline > self.now {
            return None;
        }
        let _ = self.heap.pop();
        let id = TimerId::new(top.idx, top.generation);
        let entry = self.release(top.idx);
        #[cfg(feature = "tracing")]
        tracing::trace!(?id, deadline = ?entry.deadline, "timer fired");
        Some(Fired {
            id,
            deadline: entry.deadline,
            payload: entry.payload,
        })
    }

    /// Move the clock forward by `dt` and return every timer that came due.
    pub fn advance(&mut self, dt: Duration) -> Vec<Fired<P>> {
        self.advance_clock(dt);
        self.drain_due()
    }

    /// Move the clock to `instant` and return every timer that came due.
    ///
    /// The clock never moves backwards; an earlier `instant` only drains what
    /// is already due.
    pub fn advance_to(&mut self, instant: Duration) -> Vec<Fired<P>> {
        if instant > self.now {
            self.now = instant;
        }
        self.drain_due()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        for idx in 0..self.entries.len() {
            if self.entries[idx].is_some() {
                let _ = self.release(idx);
            }
        }
        self.heap.clear();
    }

    fn drain_due(&mut self) -> Vec<Fired<P>> {
        let mut out = Vec::new();
        while let Some(fired) = self.pop_due() {
            out.push(fired);
        }
        out
    }

    fn release(&mut self, idx: usize) -> Entry<P> {
        let entry = self.entries[idx].take().expect("release of an empty slot");
        self.free_list.push(idx);
        self.live -= 1;
        self.prune();
        entry
    }

    // Restore the invariant that the heap's top is pending.
    fn prune(&mut self) {
        while let Some(&Reverse(top)) = self.heap.peek() {
            if is_live(&self.entries, &top) {
                break;
            }
            let _ = self.heap.pop();
        }
    }
}

fn is_live<P>(entries: &[Option<Entry<P>>], s: &Scheduled) -> bool {
    entries
        .get(s.idx)
        .and_then(Option::as_ref)
        .is_some_and(|e| e.generation == s.generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_at_deadline_not_before() {
        let mut q = TimerQueue::new();
        let id = q.set_timeout(ms(100), 'a');
        assert!(q.advance(ms(99)).is_empty());
        assert!(q.is_pending(id));
        let fired = q.advance(ms(1));
        assert_eq!(
            fired,
            vec![Fired {
                id,
                deadline: ms(100),
                payload: 'a'
            }]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn clear_prevents_firing() {
        let mut q = TimerQueue::new();
        let id = q.set_timeout(ms(10), 1);
        assert_eq!(q.clear_timeout(id), Some(1));
        assert_eq!(q.clear_timeout(id), None, "second clear is a no-op");
        assert!(q.advance(ms(50)).is_empty());
    }

    // Same deadline: scheduling order decides.
    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        let _ = q.set_timeout(ms(20), "late");
        let _ = q.set_timeout(ms(10), "first");
        let _ = q.set_timeout(ms(10), "second");
        let order: Vec<_> = q.advance(ms(30)).into_iter().map(|f| f.payload).collect();
        assert_eq!(order, vec!["first", "second", "late"]);
    }

    #[test]
    fn stale_id_does_not_touch_reused_slot() {
        let mut q = TimerQueue::new();
        let old = q.set_timeout(ms(5), 'x');
        let _ = q.advance(ms(5));
        let new = q.set_timeout(ms(5), 'y');
        assert_eq!(old.idx(), new.idx(), "slot should be reused");
        assert_ne!(old, new);
        assert_eq!(q.clear_timeout(old), None);
        assert!(q.is_pending(new));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut q: TimerQueue<()> = TimerQueue::new();
        let _ = q.advance_to(ms(40));
        let _ = q.advance_to(ms(10));
        assert_eq!(q.now(), ms(40));
    }

    #[test]
    fn next_deadline_tracks_earliest() {
        let mut q = TimerQueue::new();
        assert_eq!(q.next_deadline(), None);
        let a = q.set_timeout(ms(30), ());
        let _b = q.set_timeout(ms(70), ());
        assert_eq!(q.next_deadline(), Some(ms(30)));
        q.clear_timeout(a);
        assert_eq!(q.next_deadline(), Some(ms(70)));
        assert_eq!(q.deadline(a), None);
    }

    // A zero-delay timer scheduled while draining still fires in the same tick.
    #[test]
    fn zero_delay_scheduled_while_draining_fires_same_tick() {
        let mut q = TimerQueue::new();
        let _ = q.set_timeout(ms(10), 0);
        q.advance_clock(ms(10));
        let mut seen = vec![];
        while let Some(f) = q.pop_due() {
            if f.payload == 0 {
                let _ = q.set_timeout(Duration::ZERO, 1);
            }
            seen.push(f.payload);
        }
        assert_eq!(seen, vec![0, 1]);
    }

    #[test]
    fn cancel_churn_keeps_heap_bounded() {
        let mut q = TimerQueue::new();
        let keep = q.set_timeout(ms(500), u32::MAX);
        let mut last = None;
        for i in 0..1_000 {
            if let Some(id) = last.take() {
                let _ = q.clear_timeout(id);
            }
            last = Some(q.set_timeout(ms(1_000 - u64::from(i)), i));
        }
        assert_eq!(q.len(), 2);
        assert!(q.heap.len() <= 2 * q.len() + COMPACT_SLACK + 1);
        assert_eq!(q.next_deadline(), Some(ms(1)));

        let order: Vec<_> = q.advance(ms(1_000)).into_iter().map(|f| f.payload).collect();
        assert_eq!(order, vec![999, u32::MAX]);
        assert!(!q.is_pending(keep));
    }

    // Clearing the earliest timer must not leave its deadline visible.
    #[test]
    fn cleared_head_is_not_reported() {
        let mut q = TimerQueue::new();
        let head = q.set_timeout(ms(5), 'h');
        let _ = q.set_timeout(ms(9), 't');
        let _ = q.clear_timeout(head);
        assert_eq!(q.next_deadline(), Some(ms(9)));
        assert!(q.advance(ms(5)).is_empty());
        assert_eq!(q.advance(ms(4)).len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        let a = q.set_timeout(ms(1), ());
        let _ = q.set_timeout(ms(2), ());
        q.clear();
        assert!(q.is_empty());
        assert!(!q.is_pending(a));
        assert!(q.advance(ms(10)).is_empty());
    }
}
