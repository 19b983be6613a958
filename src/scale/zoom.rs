use serde::{Deserialize, Serialize};

use super::LinearScale;

/// Smallest allowed zoom factor; panels never zoom out past 1:1.
pub const SCALE_EXTENT_MIN: f64 = 1.0;

/// Horizontal pan/zoom transform `px ↦ px * k + x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    /// Scale factor.
    pub k: f64,
    /// Horizontal translation in pixels.
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ZoomTransform {
    /// The 1:1 transform.
    pub fn identity() -> Self {
        Self { k: 1.0, x: 0.0 }
    }

    /// Construct from raw components.
    pub fn new(k: f64, x: f64) -> Self {
        Self { k, x }
    }

    /// Transform that stretches the pixel window `[lo, hi]` across `width`.
    pub fn for_window(width: f64, lo: f64, hi: f64) -> Self {
        let k = width / (hi - lo);
        Self { k, x: -lo * k }
    }

    /// Inverse-map a pixel position.
    pub fn invert_x(&self, px: f64) -> f64 {
        (px - self.x) / self.k
    }

    /// Scale whose domain is what `scale` shows through this transform.
    pub fn rescale_x(&self, scale: &LinearScale) -> LinearScale {
        let (r0, r1) = scale.range();
        let lo = scale.invert(self.invert_x(r0));
        let hi = scale.invert(self.invert_x(r1));
        scale.with_domain((lo, hi))
    }

    /// Enforce the scale extent `[1, ∞)` and keep the visible window inside
    /// `[0, width]`.
    pub fn constrain(&self, width: f64) -> Self {
        let k = if self.k.is_finite() {
            self.k.max(SCALE_EXTENT_MIN)
        } else {
            SCALE_EXTENT_MIN
        };
        let min_x = width - width * k;
        let x = if self.x.is_finite() {
            self.x.clamp(min_x, 0.0)
        } else {
            0.0
        };
        Self { k, x }
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.k.is_finite() && self.x.is_finite()
    }
}
