//! Widget implementations for the SwitchView toggle.

pub mod attributes;
pub mod switch;

pub use attributes::{keys, AttrValue, AttributeError, AttributeSet, StyleAttributes};
pub use switch::{CheckChangedListener, SwitchView, DEFAULT_DURATION};
