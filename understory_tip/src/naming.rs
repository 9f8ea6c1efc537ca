// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic element ids and class names for control parts.
//!
//! Every element a control generates gets an id and a class list derived from the
//! control's identity and a part name, so lookups and styling stay stable across
//! repaints:
//!
//! ```
//! use understory_tip::naming::{ControlId, ControlIdentity};
//!
//! let tip = ControlIdentity::new(ControlId(7), "tip").with_skin("dark");
//! assert_eq!(tip.main_id(), "ctrl-7");
//! assert_eq!(tip.get_id("arrow"), "ctrl-7-arrow");
//! assert_eq!(tip.part_classes("arrow"), ["ui-tip-arrow", "skin-dark-tip-arrow"]);
//! ```

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use understory_layer_tree::{Document, ElementId};

/// Prefix of every generated element id.
pub const ID_PREFIX: &str = "ctrl";

/// Prefix of every generated class.
pub const UI_CLASS_PREFIX: &str = "ui";

/// Prefix of skin classes.
pub const SKIN_CLASS_PREFIX: &str = "skin";

/// Numeric identity of a control instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(pub u32);

impl core::fmt::Display for ControlId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything naming needs to know about a control: its id, type, and optional skin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlIdentity {
    id: ControlId,
    type_name: &'static str,
    skin: Option<String>,
}

impl ControlIdentity {
    /// Identity for a control of `type_name` (lowercase, e.g. `"tip"`).
    pub fn new(id: ControlId, type_name: &'static str) -> Self {
        Self {
            id,
            type_name,
            skin: None,
        }
    }

    /// Attach a skin; skin classes are generated next to the base ones.
    #[must_use]
    pub fn with_skin(mut self, skin: &str) -> Self {
        self.skin = (!skin.is_empty()).then(|| skin.to_owned());
        self
    }

    /// The control id.
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// The control type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The skin, if any.
    pub fn skin(&self) -> Option<&str> {
        self.skin.as_deref()
    }

    /// Id of the control's main element: `ctrl-{id}`.
    pub fn main_id(&self) -> String {
        format!("{ID_PREFIX}-{}", self.id)
    }

    /// Id of a part element: `ctrl-{id}-{part}`.
    pub fn get_id(&self, part: &str) -> String {
        format!("{ID_PREFIX}-{}-{part}", self.id)
    }

    /// Classes of the main element: `ui-ctrl ui-{type}` plus skin classes.
    pub fn main_classes(&self) -> Vec<String> {
        let mut classes = vec![
            format!("{UI_CLASS_PREFIX}-{ID_PREFIX}"),
            format!("{UI_CLASS_PREFIX}-{}", self.type_name),
        ];
        if let Some(skin) = &self.skin {
            classes.push(format!("{SKIN_CLASS_PREFIX}-{skin}"));
            classes.push(format!("{SKIN_CLASS_PREFIX}-{skin}-{}", self.type_name));
        }
        classes
    }

    /// Classes of a part: `ui-{type}-{part}` plus `skin-{skin}-{type}-{part}` when skinned.
    pub fn part_classes(&self, part: &str) -> Vec<String> {
        let mut classes = vec![format!("{UI_CLASS_PREFIX}-{}-{part}", self.type_name)];
        if let Some(skin) = &self.skin {
            classes.push(format!("{SKIN_CLASS_PREFIX}-{skin}-{}-{part}", self.type_name));
        }
        classes
    }

    /// Add the classes of `part` to `element`.
    pub fn add_part_classes(&self, document: &mut Document, part: &str, element: ElementId) {
        for class in self.part_classes(part) {
            document.add_class(element, &class);
        }
    }

    /// Remove the classes of `part` from `element`.
    pub fn remove_part_classes(&self, document: &mut Document, part: &str, element: ElementId) {
        for class in self.part_classes(part) {
            document.remove_class(element, &class);
        }
    }

    /// Returns true if `element` carries every class of `part`.
    pub fn has_part_classes(&self, document: &Document, part: &str, element: ElementId) -> bool {
        self.part_classes(part)
            .iter()
            .all(|class| document.has_class(element, class))
    }
}
