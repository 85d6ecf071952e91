//! Layout constraints for widgets.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Layout constraints that specify minimum and maximum sizes.
///
/// An axis whose minimum equals its (finite) maximum is *exact*: the host
/// demands that size. Any other axis leaves the widget free to pick its
/// intrinsic default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum width
    pub min_width: f32,
    /// Maximum width
    pub max_width: f32,
    /// Minimum height
    pub min_height: f32,
    /// Maximum height
    pub max_height: f32,
}

impl Constraints {
    /// Create new constraints.
    #[must_use]
    pub const fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Create tight constraints that allow only the exact size.
    #[must_use]
    pub fn tight(size: Size) -> Self {
        Self::new(size.width, size.width, size.height, size.height)
    }

    /// Create loose constraints that allow any size up to the given maximum.
    #[must_use]
    pub fn loose(size: Size) -> Self {
        Self::new(0.0, size.width, 0.0, size.height)
    }

    /// Create unbounded constraints.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(0.0, f32::INFINITY, 0.0, f32::INFINITY)
    }

    /// The demanded width, if the width axis is exact.
    #[must_use]
    pub fn exact_width(&self) -> Option<f32> {
        Self::exact(self.min_width, self.max_width)
    }

    /// The demanded height, if the height axis is exact.
    #[must_use]
    pub fn exact_height(&self) -> Option<f32> {
        Self::exact(self.min_height, self.max_height)
    }

    /// Create constraints with an exact width, keeping the height axis.
    #[must_use]
    pub fn with_exact_width(&self, width: f32) -> Self {
        Self::new(width, width, self.min_height, self.max_height)
    }

    /// Create constraints with an exact height, keeping the width axis.
    #[must_use]
    pub fn with_exact_height(&self, height: f32) -> Self {
        Self::new(self.min_width, self.max_width, height, height)
    }

    fn exact(min: f32, max: f32) -> Option<f32> {
        (max.is_finite() && min == max).then_some(max)
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}
