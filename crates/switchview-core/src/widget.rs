//! Widget trait and related types.
//!
//! This module defines the capability interface every widget implements:
//! something that can be measured, laid out, painted, fed input events and
//! ticked by the host's frame driver.
//!
//! # Widget Lifecycle
//!
//! 1. **Measure**: resolve a size from the host's constraints. Widgets may
//!    update derived geometry here, so measuring takes `&mut self`.
//! 2. **Layout**: accept the bounds the host allotted.
//! 3. **Paint**: emit draw commands; never mutates.
//! 4. **Event / Frame**: react to input and to animation frames, then ask the
//!    host to paint again.
//!
//! # Examples
//!
//! ```
//! use switchview_core::TypeId;
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::behavior::DefaultHandler;
use crate::constraints::Constraints;
use crate::draw::Transform2D;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait that all UI elements implement.
pub trait Widget: Send {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Resolve a size from the host's layout constraints.
    ///
    /// Called on every layout pass, possibly before the first paint.
    fn measure(&mut self, constraints: Constraints) -> Size;

    /// Accept the bounds allotted by the host.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle an input event.
    ///
    /// `base` is the host's default handling for the event; widgets must
    /// invoke it and return its verdict so outer gesture handling keeps
    /// working.
    fn event(&mut self, event: &Event, base: &mut dyn DefaultHandler) -> bool;

    /// Advance running animations by `dt`.
    ///
    /// Returns `true` while the widget still wants frames.
    fn on_frame(&mut self, _dt: Duration) -> bool {
        false
    }

    /// Check if this widget is interactive (can receive focus/events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a filled rectangle with uniformly rounded corners.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Push a transform.
    fn push_transform(&mut self, transform: Transform2D);

    /// Pop the transform.
    fn pop_transform(&mut self);
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button
    Button,
    /// Checkbox
    Checkbox,
    /// On/off switch
    Switch,
}
