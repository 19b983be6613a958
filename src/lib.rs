//! # Linked multi-range selection for genome browsers
//!
//! A master track maps a whole genome onto a fixed-width brush strip. Users
//! drag any number of non-overlapping brushes on it; every brush opens a
//! zoomable detail panel below the strip. Brushing and zooming are two views
//! of the same state:
//!
//! 1. **Brushing** moves a selection on the strip, which redefines the genomic
//!    domain shown in its panel.
//! 2. **Zooming** a panel redefines its domain, which moves the brush.
//!
//! Both are clamped so that fragments never overlap, and both feed one update
//! pipeline that garbage-collects collapsed brushes, tiles the panels, projects
//! genomic features and publishes render commands.
//!
//! ## Usage Example
//!
//! ```
//! use multibrush::{BrushEngine, EngineConfig, GestureSource};
//! use multibrush::features::FeatureSet;
//! use multibrush::fragment::Selection;
//! use multibrush::render::RecordingAdapter;
//!
//! let config = EngineConfig::with_size(300.0, 400.0);
//! let mut engine = BrushEngine::new(
//!     config,
//!     (0.0, 3_000.0),
//!     FeatureSet::default(),
//!     RecordingAdapter::new(),
//! )?;
//!
//! let brush = engine.newest().expect("an empty brush is always available");
//! engine.drag_start(brush, Some(Selection::new(10.0, 10.0)), GestureSource::User);
//! engine.drag(brush, Some(Selection::new(10.0, 40.0)), GestureSource::User);
//! engine.drag_end(brush, Some(Selection::new(10.0, 40.0)), GestureSource::User);
//!
//! assert_eq!(engine.view().panels().len(), 1);
//! # Ok::<(), multibrush::EngineError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod scale;    // Linear scales, ticks and zoom transforms
pub mod fragment; // Fragments, store, clamp solver and brush lifecycle
pub mod layout;   // Panel tiling and axes
pub mod viewport; // Per-panel zoom state and write-back
pub mod features; // Feature data and projection into panels
pub mod render;   // Render commands, view diffing and adapters
pub mod engine;   // Gesture dispatch and the update pipeline
pub mod config;   // Display configuration

// Re-exports for convenience
pub use config::{EngineConfig, Margins};
pub use engine::{BrushEngine, Gesture, GestureSource};
pub use fragment::{Domain, Fragment, FragmentId, FragmentStore, Selection};
pub use render::{RenderAdapter, RenderCommand};
pub use scale::{LinearScale, ZoomTransform};

use thiserror::Error;

/// Errors raised while setting up an engine.
///
/// Gesture handling never fails; unusable input is ignored and logged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Configuration values that cannot produce a layout
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Scale whose domain or range has zero length
    #[error("Degenerate scale: [{lo}, {hi}] has zero length")]
    DegenerateScale {
        /// Lower end
        lo: f64,
        /// Upper end
        hi: f64,
    },

    /// A value that must be finite was NaN or infinite
    #[error("Non-finite value for {0}")]
    NonFinite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::DegenerateScale { lo: 5.0, hi: 5.0 };
        assert_eq!(err.to_string(), "Degenerate scale: [5, 5] has zero length");
        assert_eq!(
            EngineError::NonFinite("width".into()).to_string(),
            "Non-finite value for width"
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }
}
