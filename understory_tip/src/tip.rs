// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tip control: an anchor that reveals a title/body/arrow overlay.
//!
//! ```text
//! NoLayer ──first show fires──▶ LayerVisible ◀──show fires── LayerHidden
//!                                    │                            ▲
//!                                    └────────hide fires──────────┘
//! any state ──dispose──▶ Disposed
//! ```
//!
//! Anchor events only *request* a transition; the transition happens when the
//! matching timer fires and the request has not been superseded.

use alloc::vec::Vec;

use understory_layer_tree::{Document, ElementId};
use understory_timer::Fired;

use crate::control::{Control, ControlBase, Env, LifeStage};
use crate::events::{Action, EventKind};
use crate::layer::{self, BODY_PART, LayerManager, OverlayLayer, TITLE_PART};
use crate::naming::{ControlId, ControlIdentity};
use crate::paint::{self, PaintBinding, PaintContext};
use crate::props::{
    ArrowPosition, Property, PropertyChange, PropertySet, TipConfig, TipOptions, TriggerMode,
};
use crate::trigger::{TimerTask, TriggerScheduler};

/// Type name used for ids and classes.
pub const TIP_TYPE: &str = "tip";

/// Tag of the anchor (main) element.
pub const TIP_MAIN_TAG: &str = "aside";

fn read_title(config: &TipConfig) -> &str {
    &config.title
}

fn read_content(config: &TipConfig) -> &str {
    &config.content
}

fn paint_arrow(ctx: &mut PaintContext<'_>, config: &TipConfig) {
    // Deferred until the layer exists; its creation repaints everything.
    if ctx.layer.is_some() {
        layer::position_arrow(ctx.document, ctx.identity, config.arrow);
    }
}

/// Repaint rules of the tip, in application order.
pub const TIP_PAINTERS: &[PaintBinding<TipConfig>] = &[
    PaintBinding::text(Property::Title, TITLE_PART, read_title),
    PaintBinding::text(Property::Content, BODY_PART, read_content),
    PaintBinding::custom(Property::Arrow, paint_arrow),
];

/// Observable state of a tip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TipState {
    /// No overlay built yet.
    NoLayer,
    /// Overlay built and carrying the hidden classes.
    LayerHidden,
    /// Overlay built and shown.
    LayerVisible,
    /// Disposed; terminal.
    Disposed,
}

/// A tip control.
#[derive(Debug)]
pub struct Tip {
    base: ControlBase,
    config: TipConfig,
    layer: LayerManager,
    trigger: TriggerScheduler,
}

impl Tip {
    /// Construct a tip with `options` merged over [`TipConfig::default`].
    pub fn new(id: ControlId, options: TipOptions) -> Self {
        let mut tip = Self {
            base: ControlBase::new(ControlIdentity::new(id, TIP_TYPE)),
            config: TipConfig::default(),
            layer: LayerManager::new(),
            trigger: TriggerScheduler::new(),
        };
        tip.init_options(options);
        tip
    }

    /// Construct a tip from a full configuration.
    pub fn with_config(id: ControlId, config: TipConfig) -> Self {
        Self::new(id, config.into())
    }

    /// Use a skin for generated classes.
    ///
    /// Ignored once the tip has been rendered, so elements already built and
    /// those built later never disagree on the skin.
    #[must_use]
    pub fn with_skin(mut self, skin: &str) -> Self {
        if self.base.main.is_some() || self.base.is_disposed() {
            #[cfg(feature = "tracing")]
            tracing::warn!(control = %self.id(), skin, "skin change after render ignored");
            return self;
        }
        self.base.identity = self.base.identity.clone().with_skin(skin);
        self
    }

    /// Control id.
    pub fn id(&self) -> ControlId {
        self.base.identity.id()
    }

    /// Naming identity.
    pub fn identity(&self) -> &ControlIdentity {
        &self.base.identity
    }

    /// Current configuration.
    pub fn config(&self) -> &TipConfig {
        &self.config
    }

    /// The anchor element, once rendered.
    pub fn main(&self) -> Option<ElementId> {
        self.base.main
    }

    /// The overlay, once built.
    pub fn layer(&self) -> Option<OverlayLayer> {
        self.layer.get()
    }

    /// Lifecycle position.
    pub fn stage(&self) -> LifeStage {
        self.base.stage
    }

    /// Pending show/hide handles.
    pub fn trigger(&self) -> &TriggerScheduler {
        &self.trigger
    }

    /// Where the tip is in its show/hide state machine.
    pub fn state(&self) -> TipState {
        if self.base.is_disposed() {
            TipState::Disposed
        } else if !self.layer.exists() {
            TipState::NoLayer
        } else if self.layer.is_visible() {
            TipState::LayerVisible
        } else {
            TipState::LayerHidden
        }
    }

    /// Returns true if the overlay exists and is not hidden.
    pub fn is_visible(&self) -> bool {
        self.state() == TipState::LayerVisible
    }

    /// Request showing after `show_delay`, superseding any pending request.
    pub fn show(&mut self, env: &mut Env) {
        if self.ignore_when_disposed("show") {
            return;
        }
        let id = self.id();
        let _ = self
            .trigger
            .request_show(&mut env.timers, id, self.config.show_delay);
    }

    /// Request hiding after `hide_delay`, superseding any pending request.
    ///
    /// Without an overlay there is nothing to hide: pending requests are still
    /// cancelled but nothing new is scheduled.
    pub fn hide(&mut self, env: &mut Env) {
        if self.ignore_when_disposed("hide") {
            return;
        }
        let id = self.id();
        let layer_exists = self.layer.exists();
        let _ = self
            .trigger
            .request_hide(&mut env.timers, id, self.config.hide_delay, layer_exists);
    }

    /// Run a bound action.
    pub fn handle_action(&mut self, env: &mut Env, action: Action) {
        match action {
            Action::Show => self.show(env),
            Action::Hide => self.hide(env),
        }
    }

    /// Apply a fired timer. Timers that are not this tip's current request are dropped.
    pub fn handle_timer(&mut self, env: &mut Env, fired: &Fired<TimerTask>) {
        if self.base.is_disposed() {
            #[cfg(feature = "tracing")]
            tracing::debug!(control = %self.id(), "timer dropped: disposed");
            return;
        }
        let task = fired.payload;
        let id = self.id();
        if task.owner != id || !self.trigger.accept(fired.id, task.action) {
            #[cfg(feature = "tracing")]
            tracing::trace!(control = %self.id(), timer = ?fired.id, "stale timer dropped");
            return;
        }
        match task.action {
            Action::Show => self.fire_show(env),
            Action::Hide => self.fire_hide(env),
        }
    }

    /// Apply `options`, then repaint only what changed.
    ///
    /// `mode` is stored but does not rebind the anchor once rendered. Painters
    /// whose regions do not exist yet are skipped, so this also keeps an overlay
    /// shown on a tip that was never rendered up to date.
    pub fn set_properties(&mut self, env: &mut Env, options: TipOptions) -> Vec<PropertyChange> {
        if self.ignore_when_disposed("set_properties") {
            return Vec::new();
        }
        let changes = self.config.apply(options);
        if !changes.is_empty() {
            self.repaint(env, Some(PropertySet::from_changes(&changes)));
        }
        changes
    }

    /// Set the title.
    pub fn set_title(&mut self, env: &mut Env, title: &str) -> Vec<PropertyChange> {
        self.set_properties(env, TipOptions::new().title(title))
    }

    /// Set the body content.
    pub fn set_content(&mut self, env: &mut Env, content: &str) -> Vec<PropertyChange> {
        self.set_properties(env, TipOptions::new().content(content))
    }

    /// Set or clear the arrow position.
    pub fn set_arrow(
        &mut self,
        env: &mut Env,
        arrow: Option<ArrowPosition>,
    ) -> Vec<PropertyChange> {
        self.set_properties(env, TipOptions::new().arrow(arrow))
    }

    fn fire_show(&mut self, env: &mut Env) {
        let (_, created) =
            self.layer
                .ensure_layer(&mut env.document, &self.base.identity, self.base.main);
        if created {
            self.repaint(env, None);
        }
        self.layer
            .set_hidden(&mut env.document, &self.base.identity, false);
        #[cfg(feature = "tracing")]
        tracing::debug!(control = %self.id(), created, "tip shown");
    }

    fn fire_hide(&mut self, env: &mut Env) {
        self.layer
            .set_hidden(&mut env.document, &self.base.identity, true);
        #[cfg(feature = "tracing")]
        tracing::debug!(control = %self.id(), "tip hidden");
    }

    fn ignore_when_disposed(&self, _op: &str) -> bool {
        if self.base.is_disposed() {
            #[cfg(feature = "tracing")]
            tracing::warn!(control = %self.id(), op = _op, "operation on disposed tip ignored");
            return true;
        }
        false
    }
}

impl Control for Tip {
    type Options = TipOptions;

    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn init_options(&mut self, options: TipOptions) {
        let mut config = TipConfig::default();
        let _ = config.apply(options);
        self.config = config;
        self.base.stage = LifeStage::Initialized;
    }

    fn create_main(&mut self, document: &mut Document) -> ElementId {
        document.create_element(TIP_MAIN_TAG)
    }

    fn init_structure(&mut self, env: &mut Env) {
        let Some(main) = self.base.main else {
            return;
        };
        let show_on = match self.config.mode {
            TriggerMode::Click => EventKind::Click,
            TriggerMode::Over => EventKind::MouseOver,
        };
        let id = self.id();
        env.events.add_event(id, main, show_on, Action::Show);
        env.events.add_event(id, main, EventKind::MouseOut, Action::Hide);
    }

    fn repaint(&mut self, env: &mut Env, changed: Option<PropertySet>) {
        if self.base.is_disposed() {
            return;
        }
        let mut ctx = PaintContext {
            document: &mut env.document,
            identity: &self.base.identity,
            layer: self.layer.get(),
        };
        let _ = paint::repaint(TIP_PAINTERS, &mut ctx, &self.config, changed);
    }

    fn dispose(&mut self, env: &mut Env) {
        if self.base.is_disposed() {
            return;
        }
        self.trigger.cancel_all(&mut env.timers);
        self.layer.teardown(&mut env.document);
        self.base.dispose(env);
    }
}
