// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tip --heading-base-level=0

//! Understory Tip: a debounced tooltip/popover control over a retained layer tree.
//!
//! ## Overview
//!
//! A tip is an anchor element that reveals a detached overlay (title, body, and a
//! directional arrow) when triggered and hides it when the pointer leaves. Two
//! pieces carry the weight:
//!
//! - **Debounced scheduling** ([`trigger`]): show and hide requests go through two
//!   cancelable single-shot timers. Every request cancels both before scheduling,
//!   so the last request wins and moving between the anchor and its overlay does
//!   not flicker.
//! - **Incremental repaint** ([`paint`]): the control declares an ordered list of
//!   `(property → painter)` bindings once. Property updates report exactly what
//!   changed and only the matching painters run.
//!
//! The overlay is built lazily by [`layer::LayerManager`] on the first show that
//! actually fires, cached for the life of the control, and removed on dispose.
//!
//! ## Layering
//!
//! - [`understory_layer_tree`] holds elements (the DOM stand-in).
//! - [`understory_timer`] holds timers over a host-driven clock.
//! - [`control`] provides the lifecycle hooks and the shared [`control::Env`].
//! - [`tip::Tip`] is the control; [`ui::Ui`] is a small host that routes pointer
//!   motion, bound events, and fired timers to tips.
//!
//! ## Workflow
//!
//! 1) Create a tip with [`ui::Ui::create_tip`] (or [`tip::Tip::new`] plus
//!    [`control::Control::render`] against your own [`control::Env`]).
//! 2) Give its anchor bounds, then feed pointer motion or call `show`/`hide`.
//! 3) Advance the clock; due timers are applied in order.
//!
//! ```
//! use core::time::Duration;
//! use understory_tip::control::{Control, Env};
//! use understory_tip::naming::ControlId;
//! use understory_tip::props::{ArrowPosition, TipOptions};
//! use understory_tip::tip::{Tip, TipState};
//!
//! let mut env = Env::new();
//! let mut tip = Tip::new(
//!     ControlId(1),
//!     TipOptions::new()
//!         .title("Heads up")
//!         .show_delay(Duration::from_millis(50)),
//! );
//! tip.render(&mut env, None);
//!
//! tip.show(&mut env);
//! env.timers.advance_clock(Duration::from_millis(50));
//! while let Some(fired) = env.timers.pop_due() {
//!     tip.handle_timer(&mut env, &fired);
//! }
//! assert_eq!(tip.state(), TipState::LayerVisible);
//!
//! let layer = tip.layer().unwrap();
//! assert_eq!(env.document.text(layer.title), Some("Heads up"));
//!
//! // Only the arrow painter runs for this update.
//! let _ = tip.set_arrow(&mut env, Some(ArrowPosition::Br));
//! assert_eq!(
//!     env.document.class_name(layer.arrow),
//!     "ui-tip-arrow ui-tip-arrow-br"
//! );
//!
//! tip.dispose(&mut env);
//! assert_eq!(env.document.get_element_by_id("ctrl-1-layer"), None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): std builds of the geometry stack.
//! - `libm`: `no_std` numeric support.
//! - `tracing`: structured logs for scheduling, layer lifecycle, and repaints.
//! - `serde`: (de)serialize [`props::TipConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod control;
pub mod events;
pub mod layer;
pub mod naming;
pub mod paint;
pub mod props;
pub mod tip;
pub mod trigger;
pub mod ui;
