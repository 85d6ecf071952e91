//! Attribute intake: the key/value bag a widget is styled from.
//!
//! Values are trusted. The only failure mode is a value of the wrong shape
//! for the key it is read under, reported as [`AttributeError`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use switchview_core::{Color, DisplayMetrics};
use thiserror::Error;

/// Attribute keys understood by the switch.
pub mod keys {
    /// Track color when unchecked
    pub const OFF_COLOR: &str = "switch_off_color";
    /// Track color when checked
    pub const ON_COLOR: &str = "switch_on_color";
    /// Knob color
    pub const CIRCLE_COLOR: &str = "switch_circle_color";
    /// Knob margin from the track edge
    pub const CIRCLE_MARGIN: &str = "switch_circle_margin";
    /// Knob radius
    pub const CIRCLE_RADIUS: &str = "switch_circle_r";
    /// Initial checked state
    pub const CHECKED: &str = "switch_checked";
}

/// Errors from coercing an attribute value.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// Value is not a color.
    #[error("Invalid color for '{key}': {value}")]
    InvalidColor { key: String, value: String },

    /// Value is not a dimension.
    #[error("Invalid dimension for '{key}': {value}")]
    InvalidDimension { key: String, value: String },

    /// Value is not a boolean.
    #[error("Invalid boolean for '{key}': {value}")]
    InvalidBoolean { key: String, value: String },

    /// The style document could not be parsed.
    #[error("YAML error: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Typed access to a styling source.
///
/// Every accessor returns `Ok(None)` when the key is absent so callers can
/// fall back to their built-in default.
pub trait AttributeSet {
    /// Read a color.
    fn color(&self, key: &str) -> Result<Option<Color>, AttributeError>;

    /// Read a dimension as whole device pixels.
    fn dimension_px(
        &self,
        key: &str,
        metrics: DisplayMetrics,
    ) -> Result<Option<i32>, AttributeError>;

    /// Read a boolean.
    fn boolean(&self, key: &str) -> Result<Option<bool>, AttributeError>;
}

/// A raw attribute value as written in a style file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// `true` / `false`
    Bool(bool),
    /// Any numeric literal
    Number(f64),
    /// Everything else
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl AttrValue {
    fn to_color(&self) -> Option<Color> {
        match self {
            Self::Text(s) => Color::from_argb_hex(s.trim()).ok(),
            Self::Number(n) => Self::color_word(*n).map(Color::from_argb),
            Self::Bool(_) => None,
        }
    }

    // Integer color words may be written signed, as packed ARGB usually is.
    fn color_word(n: f64) -> Option<u32> {
        if n.fract() != 0.0 {
            return None;
        }
        if (f64::from(i32::MIN)..0.0).contains(&n) {
            Some(n as i32 as u32)
        } else if (0.0..=f64::from(u32::MAX)).contains(&n) {
            Some(n as u32)
        } else {
            None
        }
    }

    fn to_dimension_px(&self, metrics: DisplayMetrics) -> Option<i32> {
        let px = match self {
            Self::Number(n) => *n as i32,
            Self::Text(s) => {
                let s = s.trim();
                if let Some(dp) = s.strip_suffix("dp") {
                    metrics.dp_to_px(dp.trim().parse::<f32>().ok()?)
                } else {
                    s.strip_suffix("px").unwrap_or(s).trim().parse::<f32>().ok()? as i32
                }
            }
            Self::Bool(_) => return None,
        };
        (px >= 0).then_some(px)
    }

    fn to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(_) => None,
        }
    }
}

/// Attribute bag loaded from a YAML style document.
///
/// ```
/// use switchview_widgets::{AttributeSet, StyleAttributes};
///
/// let style = StyleAttributes::from_yaml_str("switch_checked: true").unwrap();
/// assert_eq!(style.boolean("switch_checked").unwrap(), Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleAttributes {
    values: BTreeMap<String, AttrValue>,
}

impl StyleAttributes {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat YAML mapping. An empty document yields an empty bag.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AttributeError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Add a value, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AttributeSet for StyleAttributes {
    fn color(&self, key: &str) -> Result<Option<Color>, AttributeError> {
        self.get(key)
            .map(|v| {
                v.to_color().ok_or_else(|| AttributeError::InvalidColor {
                    key: key.to_string(),
                    value: v.to_string(),
                })
            })
            .transpose()
    }

    fn dimension_px(
        &self,
        key: &str,
        metrics: DisplayMetrics,
    ) -> Result<Option<i32>, AttributeError> {
        self.get(key)
            .map(|v| {
                v.to_dimension_px(metrics)
                    .ok_or_else(|| AttributeError::InvalidDimension {
                        key: key.to_string(),
                        value: v.to_string(),
                    })
            })
            .transpose()
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, AttributeError> {
        self.get(key)
            .map(|v| {
                v.to_bool().ok_or_else(|| AttributeError::InvalidBoolean {
                    key: key.to_string(),
                    value: v.to_string(),
                })
            })
            .transpose()
    }
}
