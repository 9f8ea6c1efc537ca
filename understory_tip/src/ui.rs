// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small host owning an [`Env`] and the tips living in it.
//!
//! The host is the event loop's view of the world: it turns pointer motion into
//! anchor events, routes bound events and fired timers to their controls, and
//! drops whatever belongs to controls that no longer exist. Every entry point
//! runs to completion before returning.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_tip::props::TipOptions;
//! use understory_tip::tip::TipState;
//! use understory_tip::ui::Ui;
//!
//! let mut ui = Ui::new();
//! let id = ui.create_tip(TipOptions::new().title("Save").content("Ctrl+S"));
//! let anchor = ui.tip(id).unwrap().main().unwrap();
//! ui.document_mut().set_bounds(anchor, Rect::new(0.0, 0.0, 40.0, 20.0));
//!
//! ui.pointer_move(Point::new(10.0, 10.0));
//! ui.advance(Duration::from_millis(100));
//! assert_eq!(ui.tip(id).unwrap().state(), TipState::LayerVisible);
//!
//! ui.pointer_move(Point::new(300.0, 300.0));
//! ui.advance(Duration::from_millis(100));
//! assert_eq!(ui.tip(id).unwrap().state(), TipState::LayerHidden);
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Point;
use understory_layer_tree::{Document, ElementId};

use crate::control::{Control, Env};
use crate::events::{EventKind, PointerTracker};
use crate::naming::ControlId;
use crate::props::{PropertyChange, TipOptions};
use crate::tip::Tip;

/// Host of a set of tips sharing one document and one timer queue.
#[derive(Debug, Default)]
pub struct Ui {
    env: Env,
    tips: BTreeMap<ControlId, Tip>,
    pointer: PointerTracker,
    next_id: u32,
}

impl Ui {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Shared environment, mutably.
    pub fn env_mut(&mut self) -> &mut Env {
        &mut self.env
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.env.document
    }

    /// The document, mutably (e.g. to set anchor bounds).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.env.document
    }

    /// Current value of the timer clock.
    pub fn now(&self) -> Duration {
        self.env.timers.now()
    }

    /// Create and render a tip in the body.
    pub fn create_tip(&mut self, options: TipOptions) -> ControlId {
        self.create_tip_in(None, options)
    }

    /// Create and render a tip inside `container`.
    pub fn create_tip_in(&mut self, container: Option<ElementId>, options: TipOptions) -> ControlId {
        self.next_id += 1;
        let id = ControlId(self.next_id);
        let mut tip = Tip::new(id, options);
        tip.render(&mut self.env, container);
        self.tips.insert(id, tip);
        id
    }

    /// A live tip.
    pub fn tip(&self, id: ControlId) -> Option<&Tip> {
        self.tips.get(&id)
    }

    /// A live tip, mutably. Pair with [`env_mut`](Self::env_mut) to call tip methods directly.
    pub fn tip_mut(&mut self, id: ControlId) -> Option<&mut Tip> {
        self.tips.get_mut(&id)
    }

    /// Ids of live tips, ascending.
    pub fn tip_ids(&self) -> impl Iterator<Item = ControlId> + '_ {
        self.tips.keys().copied()
    }

    /// Programmatic show.
    pub fn show(&mut self, id: ControlId) {
        if let Some(tip) = self.tips.get_mut(&id) {
            tip.show(&mut self.env);
        }
    }

    /// Programmatic hide.
    pub fn hide(&mut self, id: ControlId) {
        if let Some(tip) = self.tips.get_mut(&id) {
            tip.hide(&mut self.env);
        }
    }

    /// Update a tip's properties; empty if the tip does not exist.
    pub fn set_properties(&mut self, id: ControlId, options: TipOptions) -> Vec<PropertyChange> {
        match self.tips.get_mut(&id) {
            Some(tip) => tip.set_properties(&mut self.env, options),
            None => Vec::new(),
        }
    }

    /// Deliver an event on `element` to every bound handler. Returns how many ran.
    pub fn dispatch(&mut self, element: ElementId, kind: EventKind) -> usize {
        let handlers: Vec<_> = self.env.events.handlers(element, kind).collect();
        let mut ran = 0;
        for (owner, action) in handlers {
            if let Some(tip) = self.tips.get_mut(&owner) {
                tip.handle_action(&mut self.env, action);
                ran += 1;
            }
        }
        ran
    }

    /// Move the pointer to `pt` and deliver the resulting out/over events.
    pub fn pointer_move(&mut self, pt: Point) {
        let path = self
            .env
            .document
            .hit_test_point(pt)
            .map(|hit| hit.path)
            .unwrap_or_default();
        let events = self.pointer.update_path(&path);
        for (element, kind) in events {
            let _ = self.dispatch(element, kind);
        }
    }

    /// The pointer left the document.
    pub fn pointer_leave(&mut self) {
        for (element, kind) in self.pointer.clear() {
            let _ = self.dispatch(element, kind);
        }
    }

    /// Move the clock by `dt`, firing due timers one at a time.
    ///
    /// Each firing runs before the next is taken, so a timer cancelled by an
    /// earlier firing in the same step never runs. Returns how many were applied.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.env.timers.advance_clock(dt);
        let mut applied = 0;
        while let Some(fired) = self.env.timers.pop_due() {
            match self.tips.get_mut(&fired.payload.owner) {
                Some(tip) => {
                    tip.handle_timer(&mut self.env, &fired);
                    applied += 1;
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(control = %fired.payload.owner, "timer for unknown control dropped");
                }
            }
        }
        applied
    }

    /// Dispose a tip and forget it. Returns `false` if it did not exist.
    pub fn dispose(&mut self, id: ControlId) -> bool {
        match self.tips.remove(&id) {
            Some(mut tip) => {
                tip.dispose(&mut self.env);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::TriggerMode;
    use crate::tip::TipState;
    use kurbo::Rect;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn with_anchor(ui: &mut Ui, options: TipOptions, bounds: Rect) -> ControlId {
        let id = ui.create_tip(options);
        let anchor = ui.tip(id).unwrap().main().unwrap();
        ui.document_mut().set_bounds(anchor, bounds);
        id
    }

    #[test]
    fn click_mode_shows_on_click_only() {
        let mut ui = Ui::new();
        let id = with_anchor(
            &mut ui,
            TipOptions::new().mode(TriggerMode::Click),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        ui.pointer_move(Point::new(5.0, 5.0));
        ui.advance(ms(200));
        assert_eq!(ui.tip(id).unwrap().state(), TipState::NoLayer);

        let anchor = ui.tip(id).unwrap().main().unwrap();
        assert_eq!(ui.dispatch(anchor, EventKind::Click), 1);
        ui.advance(ms(100));
        assert!(ui.tip(id).unwrap().is_visible());
    }

    #[test]
    fn tips_do_not_interfere() {
        let mut ui = Ui::new();
        let a = with_anchor(&mut ui, TipOptions::new(), Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = with_anchor(&mut ui, TipOptions::new(), Rect::new(50.0, 0.0, 60.0, 10.0));
        ui.show(a);
        ui.show(b);
        ui.advance(ms(100));
        ui.hide(a);
        ui.advance(ms(100));
        assert_eq!(ui.tip(a).unwrap().state(), TipState::LayerHidden);
        assert_eq!(ui.tip(b).unwrap().state(), TipState::LayerVisible);
    }

    #[test]
    fn moving_off_and_back_within_delay_keeps_tip() {
        let mut ui = Ui::new();
        let id = with_anchor(&mut ui, TipOptions::new(), Rect::new(0.0, 0.0, 10.0, 10.0));
        ui.pointer_move(Point::new(5.0, 5.0));
        ui.advance(ms(100));
        ui.pointer_move(Point::new(50.0, 50.0));
        ui.advance(ms(40));
        ui.pointer_move(Point::new(5.0, 5.0));
        ui.advance(ms(300));
        assert!(ui.tip(id).unwrap().is_visible());
    }

    #[test]
    fn pointer_leave_schedules_hide() {
        let mut ui = Ui::new();
        let id = with_anchor(&mut ui, TipOptions::new(), Rect::new(0.0, 0.0, 10.0, 10.0));
        ui.pointer_move(Point::new(5.0, 5.0));
        ui.advance(ms(100));
        ui.pointer_leave();
        ui.advance(ms(100));
        assert_eq!(ui.tip(id).unwrap().state(), TipState::LayerHidden);
    }

    #[test]
    fn dispose_drops_pending_timers_and_dom() {
        let mut ui = Ui::new();
        let id = with_anchor(&mut ui, TipOptions::new(), Rect::new(0.0, 0.0, 10.0, 10.0));
        ui.show(id);
        assert!(ui.dispose(id));
        assert!(!ui.dispose(id));
        assert_eq!(ui.advance(ms(500)), 0);
        assert!(ui.document().children(ui.document().body()).is_empty());
        assert_eq!(ui.tip_ids().count(), 0);
    }

    #[test]
    fn tips_render_into_container() {
        let mut ui = Ui::new();
        let container = ui.document_mut().create_element("section");
        let body = ui.document().body();
        ui.document_mut().append_child(body, container);
        let id = ui.create_tip_in(Some(container), TipOptions::new());
        let main = ui.tip(id).unwrap().main().unwrap();
        assert_eq!(ui.document().parent(main), Some(container));
    }
}
