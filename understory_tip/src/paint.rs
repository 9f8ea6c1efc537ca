// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative repaint: ordered `(property → painter)` bindings evaluated against a changed set.
//!
//! A control describes its repaint once, as a static list of [`PaintBinding`]s.
//! [`repaint`] walks that list and runs only the painters whose property is in
//! the changed set. Passing `None` as the changed set runs every painter, which is
//! what a control does on first render and right after it builds new elements.
//!
//! Bindings run in list order, so a painter observes whatever earlier painters in
//! the same pass wrote. Painters whose target element does not exist yet are
//! skipped silently; the next full repaint will catch them up.

use understory_layer_tree::{Document, ElementId};

use crate::layer::OverlayLayer;
use crate::naming::ControlIdentity;
use crate::props::{Property, PropertySet};

/// What a painter may touch during a repaint pass.
#[derive(Debug)]
pub struct PaintContext<'a> {
    /// The document holding the control's elements.
    pub document: &'a mut Document,
    /// Naming source for part lookups.
    pub identity: &'a ControlIdentity,
    /// The overlay layer, if it has been built.
    pub layer: Option<OverlayLayer>,
}

impl PaintContext<'_> {
    /// Attached element of `part`, looked up by its generated id.
    pub fn part(&self, part: &str) -> Option<ElementId> {
        self.document.get_element_by_id(&self.identity.get_id(part))
    }
}

/// How a binding applies a property value.
pub enum Painter<C> {
    /// Write a string property as the text content of a part element.
    Text {
        /// Part name, resolved through [`PaintContext::part`].
        part: &'static str,
        /// Reads the value from the configuration.
        read: fn(&C) -> &str,
    },
    /// Arbitrary paint code.
    Custom(fn(&mut PaintContext<'_>, &C)),
}

impl<C> Clone for Painter<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Painter<C> {}

impl<C> core::fmt::Debug for Painter<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text { part, .. } => f.debug_struct("Text").field("part", part).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// One `(property → painter)` rule.
pub struct PaintBinding<C> {
    /// Property that triggers the painter.
    pub property: Property,
    /// Run on every pass regardless of the changed set.
    pub always: bool,
    /// The paint operation.
    pub painter: Painter<C>,
}

impl<C> Clone for PaintBinding<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for PaintBinding<C> {}

impl<C> core::fmt::Debug for PaintBinding<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PaintBinding")
            .field("property", &self.property)
            .field("always", &self.always)
            .field("painter", &self.painter)
            .finish()
    }
}

impl<C> PaintBinding<C> {
    /// Write the string read from the config into `part`'s text when `property` changes.
    pub const fn text(property: Property, part: &'static str, read: fn(&C) -> &str) -> Self {
        Self {
            property,
            always: false,
            painter: Painter::Text { part, read },
        }
    }

    /// Run `apply` when `property` changes.
    pub const fn custom(property: Property, apply: fn(&mut PaintContext<'_>, &C)) -> Self {
        Self {
            property,
            always: false,
            painter: Painter::Custom(apply),
        }
    }

    /// Run this binding on every pass.
    #[must_use]
    pub const fn always(mut self) -> Self {
        self.always = true;
        self
    }

    /// Returns true if this binding should run for `changed`.
    pub fn applies_to(&self, changed: Option<PropertySet>) -> bool {
        self.always || changed.is_none_or(|set| set.has(self.property))
    }

    fn apply(&self, ctx: &mut PaintContext<'_>, config: &C) {
        match self.painter {
            Painter::Text { part, read } => {
                if let Some(el) = ctx.part(part) {
                    ctx.document.set_text(el, read(config));
                }
            }
            Painter::Custom(apply) => apply(ctx, config),
        }
    }
}

/// Run the bindings selected by `changed` (all of them for `None`), in order.
///
/// Returns how many bindings ran.
pub fn repaint<C>(
    bindings: &[PaintBinding<C>],
    ctx: &mut PaintContext<'_>,
    config: &C,
    changed: Option<PropertySet>,
) -> usize {
    let mut applied = 0;
    for binding in bindings.iter().filter(|b| b.applies_to(changed)) {
        binding.apply(ctx, config);
        applied += 1;
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(
        control = %ctx.identity.id(),
        full = changed.is_none(),
        applied,
        "repaint"
    );
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::ControlId;
    use alloc::string::String;

    #[derive(Default)]
    struct Labels {
        a: String,
        b: String,
    }

    // Records into the `log` element so ordering is observable through the document.
    fn log_b(ctx: &mut PaintContext<'_>, config: &Labels) {
        if let Some(log) = ctx.part("log") {
            let seen = alloc::format!("{}|b:{}", ctx.document.text(log).unwrap_or(""), config.b);
            ctx.document.set_text(log, &seen);
        }
    }

    fn stamp(ctx: &mut PaintContext<'_>, _config: &Labels) {
        if let Some(log) = ctx.part("log") {
            let seen = alloc::format!("{}|stamp", ctx.document.text(log).unwrap_or(""));
            ctx.document.set_text(log, &seen);
        }
    }

    const BINDINGS: &[PaintBinding<Labels>] = &[
        PaintBinding::text(Property::Title, "a", |c| c.a.as_str()),
        PaintBinding::custom(Property::Content, log_b),
        PaintBinding::custom(Property::Mode, stamp).always(),
    ];

    fn setup() -> (Document, ControlIdentity) {
        let identity = ControlIdentity::new(ControlId(1), "test");
        let mut doc = Document::new();
        for part in ["a", "log"] {
            let el = doc.create_element("div");
            doc.set_id_attr(el, &identity.get_id(part));
            doc.append_child(doc.body(), el);
        }
        (doc, identity)
    }

    #[test]
    fn full_repaint_runs_everything_in_order() {
        let (mut doc, identity) = setup();
        let config = Labels {
            a: "A".into(),
            b: "B".into(),
        };
        let mut ctx = PaintContext {
            document: &mut doc,
            identity: &identity,
            layer: None,
        };
        assert_eq!(repaint(BINDINGS, &mut ctx, &config, None), 3);
        let a = ctx.part("a").unwrap();
        let log = ctx.part("log").unwrap();
        assert_eq!(ctx.document.text(a), Some("A"));
        assert_eq!(ctx.document.text(log), Some("|b:B|stamp"));
    }

    #[test]
    fn incremental_repaint_only_touches_changed() {
        let (mut doc, identity) = setup();
        let config = Labels {
            a: "A".into(),
            b: "B".into(),
        };
        let mut ctx = PaintContext {
            document: &mut doc,
            identity: &identity,
            layer: None,
        };
        let applied = repaint(BINDINGS, &mut ctx, &config, Some(PropertySet::CONTENT));
        assert_eq!(applied, 2, "changed binding plus the always binding");
        let a = ctx.part("a").unwrap();
        assert_eq!(ctx.document.text(a), Some(""), "title painter did not run");
    }

    #[test]
    fn missing_part_is_skipped() {
        let identity = ControlIdentity::new(ControlId(9), "test");
        let mut doc = Document::new();
        let config = Labels::default();
        let mut ctx = PaintContext {
            document: &mut doc,
            identity: &identity,
            layer: None,
        };
        assert_eq!(repaint(BINDINGS, &mut ctx, &config, None), 3);
    }
}
