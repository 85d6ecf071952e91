//! Display density and density-independent units.

use serde::{Deserialize, Serialize};

/// Properties of the display a widget renders to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Device pixels per density-independent pixel
    pub density: f32,
}

impl DisplayMetrics {
    /// Baseline display (one device pixel per dp).
    pub const BASELINE: Self = Self { density: 1.0 };

    /// Create metrics for the given density. Non-positive or non-finite
    /// densities fall back to the baseline.
    #[must_use]
    pub fn new(density: f32) -> Self {
        if density.is_finite() && density > 0.0 {
            Self { density }
        } else {
            Self::BASELINE
        }
    }

    /// Convert density-independent pixels to device pixels, rounding to
    /// the nearest pixel.
    #[must_use]
    pub fn dp_to_px(&self, dp: f32) -> i32 {
        dp.mul_add(self.density, 0.5) as i32
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::BASELINE
    }
}
