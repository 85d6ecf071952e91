//! Input events delivered to widgets by the host.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Widget gained focus
    FocusIn,
    /// Widget lost focus
    FocusOut,
    // Touch events
    /// Touch started
    TouchStart {
        /// Touch identifier
        id: TouchId,
        /// Touch position
        position: Point,
        /// Touch pressure (0.0 to 1.0)
        pressure: f32,
    },
    /// Touch moved
    TouchMove {
        /// Touch identifier
        id: TouchId,
        /// New position
        position: Point,
        /// Touch pressure
        pressure: f32,
    },
    /// Touch ended
    TouchEnd {
        /// Touch identifier
        id: TouchId,
        /// Final position
        position: Point,
    },
    /// Touch cancelled (e.g., palm rejection)
    TouchCancel {
        /// Touch identifier
        id: TouchId,
    },
    // Pointer events (unified mouse/touch/pen)
    /// Pointer down
    PointerDown {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
        /// Is primary pointer
        is_primary: bool,
    },
    /// Pointer moved
    PointerMove {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
        /// Is primary pointer
        is_primary: bool,
    },
    /// Pointer up
    PointerUp {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
        /// Is primary pointer
        is_primary: bool,
    },
    /// Pointer cancelled
    PointerCancel {
        /// Pointer ID
        pointer_id: PointerId,
    },
}

/// Touch identifier for multi-touch tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TouchId(pub u32);

/// Pointer identifier for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

/// Type of pointer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerType {
    /// Mouse pointer
    #[default]
    Mouse,
    /// Touch pointer
    Touch,
    /// Pen/stylus pointer
    Pen,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

/// The phase of a press-move-release sequence an event belongs to,
/// regardless of the device that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerAction {
    /// Finger, pen or primary button went down
    Down,
    /// Contact moved
    Move,
    /// Finger, pen or primary button was released
    Up,
    /// The sequence was aborted by the system
    Cancel,
}

impl Event {
    /// Classify this event as part of a press-move-release sequence.
    ///
    /// Only the primary mouse button and primary pointers take part;
    /// everything else (secondary buttons, focus changes) yields `None`.
    #[must_use]
    pub const fn action(&self) -> Option<PointerAction> {
        match self {
            Self::MouseDown {
                button: MouseButton::Left,
                ..
            }
            | Self::TouchStart { .. }
            | Self::PointerDown {
                is_primary: true, ..
            } => Some(PointerAction::Down),
            Self::MouseMove { .. }
            | Self::TouchMove { .. }
            | Self::PointerMove {
                is_primary: true, ..
            } => Some(PointerAction::Move),
            Self::MouseUp {
                button: MouseButton::Left,
                ..
            }
            | Self::TouchEnd { .. }
            | Self::PointerUp {
                is_primary: true, ..
            } => Some(PointerAction::Up),
            Self::TouchCancel { .. } | Self::PointerCancel { .. } => Some(PointerAction::Cancel),
            _ => None,
        }
    }

    /// Check if this event releases a press.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.action(), Some(PointerAction::Up))
    }

    /// Get the position if this is a positional event.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseMove { position }
            | Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. }
            | Self::TouchStart { position, .. }
            | Self::TouchMove { position, .. }
            | Self::TouchEnd { position, .. }
            | Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Return a copy with the position shifted by `-origin`, converting
    /// window coordinates into a widget's local coordinates.
    #[must_use]
    pub fn localized(&self, origin: Point) -> Self {
        let mut event = self.clone();
        match &mut event {
            Self::MouseMove { position }
            | Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. }
            | Self::TouchStart { position, .. }
            | Self::TouchMove { position, .. }
            | Self::TouchEnd { position, .. }
            | Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. } => *position = *position - origin,
            _ => {}
        }
        event
    }
}

impl TouchId {
    /// Create a new touch ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl PointerId {
    /// Create a new pointer ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}
