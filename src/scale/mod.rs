//! Coordinate mapping between genome space and display space
//!
//! Every panel owns two linear scales over the same genomic domain: one onto
//! its global pixel range and one onto `[0, panel_width]`. The master scale
//! spans the whole genome and the whole brush strip.

mod ticks;
mod zoom;

pub use ticks::{format_si, tick_increment, ticks};
pub use zoom::{ZoomTransform, SCALE_EXTENT_MIN};

use crate::EngineError;

/// Invertible linear mapping from a numeric domain onto a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Build a scale, rejecting empty or non-finite endpoints.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, EngineError> {
        let finite = [domain.0, domain.1, range.0, range.1]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(EngineError::NonFinite("scale endpoints".to_string()));
        }
        if domain.0 == domain.1 {
            return Err(EngineError::DegenerateScale {
                lo: domain.0,
                hi: domain.1,
            });
        }
        if range.0 == range.1 {
            return Err(EngineError::DegenerateScale {
                lo: range.0,
                hi: range.1,
            });
        }
        Ok(Self { domain, range })
    }

    /// Build a scale from endpoints already known to be valid.
    ///
    /// Degenerate inputs are not rejected; mapping through a degenerate
    /// domain yields the midpoint of the range.
    pub(crate) fn unchecked(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain endpoints.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Range endpoints.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value onto the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0 + 0.5 * (r1 - r0);
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a range value back onto the domain.
    pub fn invert(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0 + 0.5 * (d1 - d0);
        }
        d0 + (value - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Copy of this scale with a different domain.
    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self {
            domain,
            range: self.range,
        }
    }

    /// Roughly `count` human-friendly values spanning the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Absolute width of the range.
    pub fn range_extent(&self) -> f64 {
        (self.range.1 - self.range.0).abs()
    }
}
