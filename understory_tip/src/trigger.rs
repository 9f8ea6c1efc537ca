// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced show/hide scheduling.
//!
//! Two optional timer handles, one per direction. Every request first cancels
//! both, then schedules at most one new timer, so only the latest request's
//! delay window counts and a pending hide never survives a new show (or vice
//! versa). There is no queue: at most one show and one hide are ever pending,
//! and in practice only one of them.
//!
//! A fired timer is only honored if it is still the handle this scheduler
//! tracks for that direction (see [`TriggerScheduler::accept`]). That makes
//! late or duplicated firings harmless even if a host forgets to cancel.

use core::time::Duration;

use understory_timer::{TimerId, TimerQueue};

use crate::events::Action;
use crate::naming::ControlId;

/// Payload of every control timer: which control, which action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimerTask {
    /// Control that scheduled the timer.
    pub owner: ControlId,
    /// What to do when it fires.
    pub action: Action,
}

/// Pending show/hide handles of one control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerScheduler {
    show: Option<TimerId>,
    hide: Option<TimerId>,
}

impl TriggerScheduler {
    /// Nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel everything and schedule a show after `delay`.
    pub fn request_show(
        &mut self,
        timers: &mut TimerQueue<TimerTask>,
        owner: ControlId,
        delay: Duration,
    ) -> TimerId {
        self.cancel_all(timers);
        let id = timers.set_timeout(
            delay,
            TimerTask {
                owner,
                action: Action::Show,
            },
        );
        self.show = Some(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(control = %owner, ?delay, "show scheduled");
        id
    }

    /// Cancel everything and, if there is a layer to hide, schedule a hide after `delay`.
    pub fn request_hide(
        &mut self,
        timers: &mut TimerQueue<TimerTask>,
        owner: ControlId,
        delay: Duration,
        layer_exists: bool,
    ) -> Option<TimerId> {
        self.cancel_all(timers);
        if !layer_exists {
            #[cfg(feature = "tracing")]
            tracing::trace!(control = %owner, "hide ignored: no layer");
            return None;
        }
        let id = timers.set_timeout(
            delay,
            TimerTask {
                owner,
                action: Action::Hide,
            },
        );
        self.hide = Some(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(control = %owner, ?delay, "hide scheduled");
        Some(id)
    }

    /// Claim a fired timer. Returns `false` if it is not the tracked handle for `action`.
    pub fn accept(&mut self, id: TimerId, action: Action) -> bool {
        let slot = match action {
            Action::Show => &mut self.show,
            Action::Hide => &mut self.hide,
        };
        if *slot == Some(id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Cancel both pending timers.
    pub fn cancel_all(&mut self, timers: &mut TimerQueue<TimerTask>) {
        for id in [self.show.take(), self.hide.take()].into_iter().flatten() {
            let _ = timers.clear_timeout(id);
        }
    }

    /// Pending show handle.
    pub fn pending_show(&self) -> Option<TimerId> {
        self.show
    }

    /// Pending hide handle.
    pub fn pending_hide(&self) -> Option<TimerId> {
        self.hide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: ControlId = ControlId(1);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn show_supersedes_show() {
        let mut timers = TimerQueue::new();
        let mut trigger = TriggerScheduler::new();
        let first = trigger.request_show(&mut timers, OWNER, ms(100));
        timers.advance_clock(ms(60));
        let second = trigger.request_show(&mut timers, OWNER, ms(100));
        assert!(!timers.is_pending(first));
        assert_eq!(timers.deadline(second), Some(ms(160)), "window restarts");
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn hide_without_layer_is_noop_but_still_cancels_show() {
        let mut timers = TimerQueue::new();
        let mut trigger = TriggerScheduler::new();
        let show = trigger.request_show(&mut timers, OWNER, ms(100));
        assert_eq!(trigger.request_hide(&mut timers, OWNER, ms(100), false), None);
        assert!(!timers.is_pending(show));
        assert!(timers.is_empty());
        assert_eq!(trigger.pending_hide(), None);
    }

    #[test]
    fn show_cancels_pending_hide() {
        let mut timers = TimerQueue::new();
        let mut trigger = TriggerScheduler::new();
        let hide = trigger
            .request_hide(&mut timers, OWNER, ms(50), true)
            .unwrap();
        let _ = trigger.request_show(&mut timers, OWNER, ms(50));
        assert!(!timers.is_pending(hide));
        assert_eq!(trigger.pending_hide(), None);
        assert!(trigger.pending_show().is_some());
    }

    #[test]
    fn accept_only_tracked_handles() {
        let mut timers = TimerQueue::new();
        let mut trigger = TriggerScheduler::new();
        let old = trigger.request_show(&mut timers, OWNER, ms(10));
        let new = trigger.request_show(&mut timers, OWNER, ms(10));
        assert!(!trigger.accept(old, Action::Show));
        assert!(!trigger.accept(new, Action::Hide), "wrong direction");
        assert!(trigger.accept(new, Action::Show));
        assert!(!trigger.accept(new, Action::Show), "claimed once");
    }

    #[test]
    fn cancel_all_clears_both() {
        let mut timers = TimerQueue::new();
        let mut trigger = TriggerScheduler::new();
        let _ = trigger.request_hide(&mut timers, OWNER, ms(10), true);
        trigger.cancel_all(&mut timers);
        assert!(timers.is_empty());
        assert_eq!(trigger, TriggerScheduler::default());
    }
}
