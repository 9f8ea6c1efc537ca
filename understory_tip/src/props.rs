// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tip configuration, option patches, and change records.
//!
//! [`TipConfig`] is the property store of a tip. Mutations go through
//! [`TipConfig::apply`] with a [`TipOptions`] patch, which reports one
//! [`PropertyChange`] per value that actually changed. The set of changed
//! properties is what drives the incremental repaint in [`crate::paint`].
//!
//! Options can also come from strings, the way markup attributes configure a control:
//!
//! ```
//! use core::time::Duration;
//! use understory_tip::props::{ArrowPosition, TipConfig, TipOptions, TriggerMode};
//!
//! let options = TipOptions::from_pairs([
//!     ("title", "Hint"),
//!     ("arrow", "br"),
//!     ("mode", "click"),
//!     ("showDelay", "250"),
//! ])
//! .unwrap();
//!
//! let mut config = TipConfig::default();
//! let changes = config.apply(options);
//! assert_eq!(changes.len(), 4);
//! assert_eq!(config.arrow, Some(ArrowPosition::Br));
//! assert_eq!(config.mode, TriggerMode::Click);
//! assert_eq!(config.show_delay, Duration::from_millis(250));
//! ```

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use core::time::Duration;

/// Default delay before showing and before hiding.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Position of the arrow on the overlay; selects an `arrow-<token>` modifier class.
///
/// The first letter names the overlay edge the arrow sits on, the second the end
/// of that edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ArrowPosition {
    /// Top edge, left end.
    Tl,
    /// Top edge, right end.
    Tr,
    /// Bottom edge, left end.
    Bl,
    /// Bottom edge, right end.
    Br,
    /// Left edge, top end.
    Lt,
    /// Left edge, bottom end.
    Lb,
    /// Right edge, top end.
    Rt,
    /// Right edge, bottom end.
    Rb,
}

impl ArrowPosition {
    /// Every position, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Tl,
        Self::Tr,
        Self::Bl,
        Self::Br,
        Self::Lt,
        Self::Lb,
        Self::Rt,
        Self::Rb,
    ];

    /// The token used in class names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tl => "tl",
            Self::Tr => "tr",
            Self::Bl => "bl",
            Self::Br => "br",
            Self::Lt => "lt",
            Self::Lb => "lb",
            Self::Rt => "rt",
            Self::Rb => "rb",
        }
    }

    /// Parse a token; empty or unknown tokens mean "no arrow position".
    pub fn parse_lenient(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl FromStr for ArrowPosition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseError::InvalidArrow(token.to_owned()))
    }
}

impl fmt::Display for ArrowPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which anchor event shows the tip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TriggerMode {
    /// Show when the pointer enters the anchor.
    #[default]
    Over,
    /// Show when the anchor is clicked.
    Click,
}

impl TriggerMode {
    /// Parse a mode token. Anything but `click` means hover.
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("click") {
            Self::Click
        } else {
            Self::Over
        }
    }

    /// The token form of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::Click => "click",
        }
    }
}

/// A named tip option.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// [`TipConfig::title`].
    Title,
    /// [`TipConfig::content`].
    Content,
    /// [`TipConfig::arrow`].
    Arrow,
    /// [`TipConfig::mode`].
    Mode,
    /// [`TipConfig::show_delay`].
    ShowDelay,
    /// [`TipConfig::hide_delay`].
    HideDelay,
}

impl Property {
    /// Every property, in the order changes are reported.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Content,
        Self::Arrow,
        Self::Mode,
        Self::ShowDelay,
        Self::HideDelay,
    ];

    /// Option name as used in string configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Arrow => "arrow",
            Self::Mode => "mode",
            Self::ShowDelay => "showDelay",
            Self::HideDelay => "hideDelay",
        }
    }

    /// The single-bit set for this property.
    pub const fn flag(self) -> PropertySet {
        match self {
            Self::Title => PropertySet::TITLE,
            Self::Content => PropertySet::CONTENT,
            Self::Arrow => PropertySet::ARROW,
            Self::Mode => PropertySet::MODE,
            Self::ShowDelay => PropertySet::SHOW_DELAY,
            Self::HideDelay => PropertySet::HIDE_DELAY,
        }
    }
}

impl FromStr for Property {
    type Err = ParseError;

    /// Accepts the camelCase option names as well as their snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "arrow" => Ok(Self::Arrow),
            "mode" => Ok(Self::Mode),
            "showDelay" | "show_delay" => Ok(Self::ShowDelay),
            "hideDelay" | "hide_delay" => Ok(Self::HideDelay),
            other => Err(ParseError::UnknownProperty(other.to_owned())),
        }
    }
}

bitflags::bitflags! {
    /// A set of [`Property`] values, e.g. the properties changed since the last repaint.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertySet: u8 {
        /// [`Property::Title`].
        const TITLE      = 0b0000_0001;
        /// [`Property::Content`].
        const CONTENT    = 0b0000_0010;
        /// [`Property::Arrow`].
        const ARROW      = 0b0000_0100;
        /// [`Property::Mode`].
        const MODE       = 0b0000_1000;
        /// [`Property::ShowDelay`].
        const SHOW_DELAY = 0b0001_0000;
        /// [`Property::HideDelay`].
        const HIDE_DELAY = 0b0010_0000;
    }
}

impl PropertySet {
    /// Returns true if `property` is in the set.
    pub fn has(self, property: Property) -> bool {
        self.contains(property.flag())
    }

    /// The properties touched by a list of changes.
    pub fn from_changes(changes: &[PropertyChange]) -> Self {
        changes
            .iter()
            .fold(Self::empty(), |set, c| set | c.property.flag())
    }
}

impl From<Property> for PropertySet {
    fn from(property: Property) -> Self {
        property.flag()
    }
}

/// A property value, as carried by change records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// `title` or `content`.
    Text(String),
    /// `arrow`.
    Arrow(Option<ArrowPosition>),
    /// `mode`.
    Mode(TriggerMode),
    /// `showDelay` or `hideDelay`.
    Delay(Duration),
}

/// One property whose value changed: `(name, old, new)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyChange {
    /// Which property changed.
    pub property: Property,
    /// Value before the change.
    pub old: Value,
    /// Value after the change.
    pub new: Value,
}

/// Failure to read string configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The option name is not a tip property.
    UnknownProperty(String),
    /// A delay was not a whole number of milliseconds.
    InvalidDelay {
        /// `showDelay` or `hideDelay`.
        property: Property,
        /// The rejected input.
        value: String,
    },
    /// The token is not an arrow position.
    InvalidArrow(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty(name) => write!(f, "unknown tip property `{name}`"),
            Self::InvalidDelay { property, value } => write!(
                f,
                "invalid `{}` value `{value}`: expected milliseconds",
                property.name()
            ),
            Self::InvalidArrow(token) => write!(f, "invalid arrow position `{token}`"),
        }
    }
}

impl core::error::Error for ParseError {}

/// Configuration of a tip.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TipConfig {
    /// Text of the title region.
    pub title: String,
    /// Text of the body region.
    pub content: String,
    /// Arrow placement; `None` leaves only the base arrow class.
    pub arrow: Option<ArrowPosition>,
    /// Which anchor event shows the tip. Read once when the control is rendered.
    pub mode: TriggerMode,
    /// Quiet period before a requested hide happens.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub hide_delay: Duration,
    /// Quiet period before a requested show happens.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub show_delay: Duration,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            arrow: Some(ArrowPosition::Tl),
            mode: TriggerMode::Over,
            hide_delay: DEFAULT_DELAY,
            show_delay: DEFAULT_DELAY,
        }
    }
}

impl TipConfig {
    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        title.clone_into(&mut self.title);
        self
    }

    /// Set the body content.
    #[must_use]
    pub fn with_content(mut self, content: &str) -> Self {
        content.clone_into(&mut self.content);
        self
    }

    /// Set the arrow position.
    #[must_use]
    pub fn with_arrow(mut self, arrow: Option<ArrowPosition>) -> Self {
        self.arrow = arrow;
        self
    }

    /// Set the trigger mode.
    #[must_use]
    pub fn with_mode(mut self, mode: TriggerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the show delay.
    #[must_use]
    pub fn with_show_delay(mut self, delay: Duration) -> Self {
        self.show_delay = delay;
        self
    }

    /// Set the hide delay.
    #[must_use]
    pub fn with_hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = delay;
        self
    }

    /// Current value of `property`.
    pub fn get(&self, property: Property) -> Value {
        match property {
            Property::Title => Value::Text(self.title.clone()),
            Property::Content => Value::Text(self.content.clone()),
            Property::Arrow => Value::Arrow(self.arrow),
            Property::Mode => Value::Mode(self.mode),
            Property::ShowDelay => Value::Delay(self.show_delay),
            Property::HideDelay => Value::Delay(self.hide_delay),
        }
    }

    /// Apply a patch and report the values that actually changed, in [`Property::ALL`] order.
    pub fn apply(&mut self, options: TipOptions) -> Vec<PropertyChange> {
        let mut changes = Vec::new();
        let TipOptions {
            title,
            content,
            arrow,
            mode,
            show_delay,
            hide_delay,
        } = options;

        if let Some(title) = title {
            set_value(&mut changes, Property::Title, &mut self.title, title, |v| {
                Value::Text(v.clone())
            });
        }
        if let Some(content) = content {
            set_value(
                &mut changes,
                Property::Content,
                &mut self.content,
                content,
                |v| Value::Text(v.clone()),
            );
        }
        if let Some(arrow) = arrow {
            set_value(&mut changes, Property::Arrow, &mut self.arrow, arrow, |v| {
                Value::Arrow(*v)
            });
        }
        if let Some(mode) = mode {
            set_value(&mut changes, Property::Mode, &mut self.mode, mode, |v| {
                Value::Mode(*v)
            });
        }
        if let Some(delay) = show_delay {
            set_value(
                &mut changes,
                Property::ShowDelay,
                &mut self.show_delay,
                delay,
                |v| Value::Delay(*v),
            );
        }
        if let Some(delay) = hide_delay {
            set_value(
                &mut changes,
                Property::HideDelay,
                &mut self.hide_delay,
                delay,
                |v| Value::Delay(*v),
            );
        }
        changes
    }
}

fn set_value<T: PartialEq>(
    changes: &mut Vec<PropertyChange>,
    property: Property,
    slot: &mut T,
    new: T,
    to_value: impl Fn(&T) -> Value,
) {
    if *slot == new {
        return;
    }
    let old = to_value(slot);
    *slot = new;
    changes.push(PropertyChange {
        property,
        old,
        new: to_value(slot),
    });
}

/// A partial update of a [`TipConfig`]; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TipOptions {
    /// New title.
    pub title: Option<String>,
    /// New body content.
    pub content: Option<String>,
    /// New arrow position; `Some(None)` clears it.
    pub arrow: Option<Option<ArrowPosition>>,
    /// New trigger mode.
    pub mode: Option<TriggerMode>,
    /// New show delay.
    pub show_delay: Option<Duration>,
    /// New hide delay.
    pub hide_delay: Option<Duration>,
}

impl TipOptions {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Set the body content.
    #[must_use]
    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_owned());
        self
    }

    /// Set or clear the arrow position.
    #[must_use]
    pub fn arrow(mut self, arrow: Option<ArrowPosition>) -> Self {
        self.arrow = Some(arrow);
        self
    }

    /// Set the trigger mode.
    #[must_use]
    pub fn mode(mut self, mode: TriggerMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the show delay.
    #[must_use]
    pub fn show_delay(mut self, delay: Duration) -> Self {
        self.show_delay = Some(delay);
        self
    }

    /// Set the hide delay.
    #[must_use]
    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = Some(delay);
        self
    }

    /// Build a patch from `(name, value)` string pairs.
    ///
    /// Delays are whole milliseconds, optionally suffixed with `ms`. Arrow tokens
    /// that are empty or unknown clear the arrow position rather than failing.
    /// Later pairs override earlier ones.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (name, value) in pairs {
            match name.parse::<Property>()? {
                Property::Title => options.title = Some(value.to_owned()),
                Property::Content => options.content = Some(value.to_owned()),
                Property::Arrow => options.arrow = Some(ArrowPosition::parse_lenient(value)),
                Property::Mode => options.mode = Some(TriggerMode::parse(value)),
                p @ Property::ShowDelay => options.show_delay = Some(parse_delay(p, value)?),
                p @ Property::HideDelay => options.hide_delay = Some(parse_delay(p, value)?),
            }
        }
        Ok(options)
    }
}

impl From<TipConfig> for TipOptions {
    fn from(config: TipConfig) -> Self {
        Self {
            title: Some(config.title),
            content: Some(config.content),
            arrow: Some(config.arrow),
            mode: Some(config.mode),
            show_delay: Some(config.show_delay),
            hide_delay: Some(config.hide_delay),
        }
    }
}

fn parse_delay(property: Property, value: &str) -> Result<Duration, ParseError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_suffix("ms").unwrap_or(trimmed).trim_end();
    digits
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ParseError::InvalidDelay {
            property,
            value: value.to_owned(),
        })
}

#[cfg(feature = "serde")]
mod duration_ms {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
