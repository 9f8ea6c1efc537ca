// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base control lifecycle and the environment controls run in.
//!
//! A control goes through `Created → Initialized → Rendered → Disposed`.
//! Concrete controls implement the hooks of [`Control`] and inherit the
//! provided [`Control::render`], which creates the main element, names it,
//! inserts it into the document, binds structure, and runs a full repaint.

use understory_layer_tree::{Document, ElementId};
use understory_timer::TimerQueue;

use crate::events::EventBindings;
use crate::naming::ControlIdentity;
use crate::props::PropertySet;
use crate::trigger::TimerTask;

/// Everything shared by the controls of one host: the document, the timer
/// queue, and the event bindings.
#[derive(Debug, Default)]
pub struct Env {
    /// Element tree.
    pub document: Document,
    /// Shared single-shot timers.
    pub timers: TimerQueue<TimerTask>,
    /// Anchor event bindings.
    pub events: EventBindings,
}

impl Env {
    /// Fresh document, empty timer queue, no bindings.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Lifecycle position of a control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifeStage {
    /// Constructed; options not applied yet.
    #[default]
    Created,
    /// Options applied.
    Initialized,
    /// Main element built and inserted.
    Rendered,
    /// Torn down. Terminal.
    Disposed,
}

/// State every control carries.
#[derive(Clone, Debug)]
pub struct ControlBase {
    /// Naming identity.
    pub identity: ControlIdentity,
    /// Main element once rendered.
    pub main: Option<ElementId>,
    /// Lifecycle position.
    pub stage: LifeStage,
}

impl ControlBase {
    /// Base state for a freshly constructed control.
    pub fn new(identity: ControlIdentity) -> Self {
        Self {
            identity,
            main: None,
            stage: LifeStage::Created,
        }
    }

    /// Returns true once disposed.
    pub fn is_disposed(&self) -> bool {
        self.stage == LifeStage::Disposed
    }

    /// Generic teardown: unbind events, remove the main element, mark disposed.
    pub fn dispose(&mut self, env: &mut Env) {
        let _unbound = env.events.remove_owner(self.identity.id());
        if let Some(main) = self.main.take() {
            env.document.remove(main);
        }
        self.stage = LifeStage::Disposed;
        #[cfg(feature = "tracing")]
        tracing::debug!(control = %self.identity.id(), unbound = _unbound, "control disposed");
    }
}

/// Lifecycle hooks of a control.
pub trait Control {
    /// Options accepted by [`init_options`](Self::init_options).
    type Options;

    /// Shared state.
    fn base(&self) -> &ControlBase;

    /// Shared state, mutably.
    fn base_mut(&mut self) -> &mut ControlBase;

    /// Merge `options` over the control's defaults.
    fn init_options(&mut self, options: Self::Options);

    /// Build the (detached) main element.
    fn create_main(&mut self, document: &mut Document) -> ElementId;

    /// Bind events and build any eager structure. Runs once, right after the
    /// main element is inserted.
    fn init_structure(&mut self, env: &mut Env);

    /// Apply the properties in `changed`, or all of them for `None`.
    fn repaint(&mut self, env: &mut Env, changed: Option<PropertySet>);

    /// Release everything the control owns.
    fn dispose(&mut self, env: &mut Env);

    /// Insert the control into `container` (the body if `None` or stale).
    ///
    /// Rendering an already rendered control only repaints it; rendering a
    /// disposed one does nothing.
    fn render(&mut self, env: &mut Env, container: Option<ElementId>) {
        match self.base().stage {
            LifeStage::Disposed => {
                #[cfg(feature = "tracing")]
                tracing::warn!(control = %self.base().identity.id(), "render on disposed control");
                return;
            }
            LifeStage::Rendered => {
                self.repaint(env, None);
                return;
            }
            LifeStage::Created | LifeStage::Initialized => {}
        }

        let main = self.create_main(&mut env.document);
        let identity = &self.base().identity;
        env.document.set_id_attr(main, &identity.main_id());
        env.document.set_class_name(main, &identity.main_classes());
        let parent = container
            .filter(|c| env.document.is_alive(*c))
            .unwrap_or_else(|| env.document.body());
        env.document.append_child(parent, main);

        let base = self.base_mut();
        base.main = Some(main);
        base.stage = LifeStage::Rendered;

        self.init_structure(env);
        self.repaint(env, None);
    }
}
