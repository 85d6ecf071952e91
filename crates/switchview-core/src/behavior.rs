//! Default event handling provided by the host.
//!
//! Widgets layer their own reactions on top of this; they always forward
//! the event here as well so that click accounting, pressed state and focus
//! keep working the way the host expects.

use crate::event::{Event, PointerAction};
use crate::geometry::Point;

/// The host's standard handling for an event.
pub trait DefaultHandler {
    /// Process `event`, returning whether it was consumed.
    fn handle_default(&mut self, event: &Event) -> bool;
}

/// Handler that consumes nothing. Useful for hosts without click semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl DefaultHandler for Passthrough {
    fn handle_default(&mut self, _event: &Event) -> bool {
        false
    }
}

/// Standard click behavior: press/release pairing with a tap slop.
///
/// A click is counted when a press is released within `tap_slop` pixels of
/// where it started. Pointer events are consumed only while `clickable`.
#[derive(Debug, Clone)]
pub struct ClickBehavior {
    clickable: bool,
    tap_slop: f32,
    pressed_at: Option<Point>,
    focused: bool,
    clicks: u32,
}

impl Default for ClickBehavior {
    fn default() -> Self {
        Self {
            clickable: true,
            tap_slop: 10.0,
            pressed_at: None,
            focused: false,
            clicks: 0,
        }
    }
}

impl ClickBehavior {
    /// Create a clickable behavior with the default slop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether pointer sequences are consumed.
    #[must_use]
    pub const fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// Set the maximum travel between press and release for a click.
    #[must_use]
    pub fn tap_slop(mut self, slop: f32) -> Self {
        self.tap_slop = slop.max(0.0);
        self
    }

    /// Whether a press is currently held.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Whether the widget holds focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Number of completed clicks.
    #[must_use]
    pub const fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl DefaultHandler for ClickBehavior {
    fn handle_default(&mut self, event: &Event) -> bool {
        match event {
            Event::FocusIn => {
                self.focused = true;
                return false;
            }
            Event::FocusOut => {
                self.focused = false;
                self.pressed_at = None;
                return false;
            }
            _ => {}
        }

        let Some(action) = event.action() else {
            return false;
        };
        if !self.clickable {
            return false;
        }

        match action {
            PointerAction::Down => {
                self.pressed_at = event.position();
            }
            PointerAction::Move => {
                if let (Some(start), Some(now)) = (self.pressed_at, event.position()) {
                    if start.distance(&now) > self.tap_slop {
                        self.pressed_at = None;
                    }
                }
            }
            PointerAction::Up => {
                if let Some(start) = self.pressed_at.take() {
                    let end = event.position().unwrap_or(start);
                    if start.distance(&end) <= self.tap_slop {
                        self.clicks += 1;
                    }
                }
            }
            PointerAction::Cancel => {
                self.pressed_at = None;
            }
        }
        true
    }
}
