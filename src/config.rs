//! Display layout constants and engine tuning

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Pixel margins around and between the drawing areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Offset of the panel area from the top of the frame.
    pub top: f64,
    /// Horizontal gap between neighbouring panels.
    pub panel_gap: f64,
    /// Space reserved above the panels (brush strip and axis labels).
    pub panel_upper_gap: f64,
    /// Height of the brush strip.
    pub brush_height: f64,
    /// Thickness of an interval bar.
    pub interval_bar: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            panel_gap: 8.0,
            panel_upper_gap: 90.0,
            brush_height: 50.0,
            interval_bar: 10.0,
        }
    }
}

/// Configuration of a [`BrushEngine`](crate::BrushEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Total display width; also the width of the brush strip.
    pub width: f64,
    /// Total display height.
    pub height: f64,
    /// Margins and gaps.
    pub margins: Margins,
    /// Requested number of axis ticks per panel.
    pub tick_count: usize,
    /// Smallest width an interval is pushed to when clamped at a neighbour,
    /// in the units being clamped (pixels for brushes, bases for domains).
    pub min_span: f64,
    /// Emit draw commands for connections. Connection geometry is always
    /// derived; drawing is off by default.
    pub draw_connections: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1_000.0,
            height: 400.0,
            margins: Margins::default(),
            tick_count: 10,
            min_span: 1.0,
            draw_connections: false,
        }
    }
}

impl EngineConfig {
    /// Configuration for a display of the given size.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the gap between panels.
    pub fn with_panel_gap(mut self, gap: f64) -> Self {
        self.margins.panel_gap = gap;
        self
    }

    /// Set the requested tick count.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    /// Enable or disable drawing of connections.
    pub fn with_connections(mut self, enabled: bool) -> Self {
        self.draw_connections = enabled;
        self
    }

    /// Height of every panel.
    pub fn panel_height(&self) -> f64 {
        self.height - self.margins.panel_upper_gap + self.margins.top
    }

    /// Check that the layout can produce at least one panel.
    pub fn validate(&self) -> Result<(), EngineError> {
        let numbers = [
            ("width", self.width),
            ("height", self.height),
            ("margins.top", self.margins.top),
            ("margins.panel_gap", self.margins.panel_gap),
            ("margins.panel_upper_gap", self.margins.panel_upper_gap),
            ("margins.brush_height", self.margins.brush_height),
            ("margins.interval_bar", self.margins.interval_bar),
            ("min_span", self.min_span),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EngineError::NonFinite((*name).to_string()));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "display must have positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if self.margins.panel_gap < 0.0 || self.margins.panel_gap >= self.width {
            return Err(EngineError::InvalidConfiguration(format!(
                "panel gap {} must be in [0, {})",
                self.margins.panel_gap, self.width
            )));
        }
        if self.panel_height() <= 0.0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "panel height {} must be positive",
                self.panel_height()
            )));
        }
        if self.min_span <= 0.0 {
            return Err(EngineError::InvalidConfiguration(
                "min span must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
