//! Side-by-side panel tiling for visible fragments
//!
//! Panels are laid out left to right in the order of their brush selections
//! and share the display width equally:
//!
//! ```text
//! panel_width = (width - (n - 1) * gap) / n
//! panel i     = [i * (panel_width + gap), (i + 1) * panel_width + i * gap]
//! ```
//!
//! The layout is rebuilt from scratch on every update.

mod axis;

pub use axis::{AxisSpec, AxisTick};

use serde::Serialize;

use crate::config::EngineConfig;
use crate::fragment::{Domain, FragmentId, FragmentStore, Selection};
use crate::scale::{LinearScale, ZoomTransform};

/// Viewport for one visible fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Fragment shown in this panel.
    pub fragment: FragmentId,
    /// Position from the left, starting at zero.
    pub index: usize,
    /// Brush selection the panel was derived from.
    pub selection: Selection,
    /// Genome interval shown.
    pub domain: Domain,
    /// Horizontal pixel range on the display.
    pub range: (f64, f64),
    /// Domain onto the global pixel range, for placing features.
    pub scale: LinearScale,
    /// Domain onto `[0, panel_width]`, for the panel axis.
    pub inner_scale: LinearScale,
    /// Bottom axis ticks.
    pub axis: AxisSpec,
    /// Zoom transform under which the master scale shows `domain`.
    pub transform: ZoomTransform,
}

impl Panel {
    /// Pixel width.
    pub fn width(&self) -> f64 {
        self.range.1 - self.range.0
    }
}

/// Clip rectangle shared by every panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipRect {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// Result of tiling the visible fragments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelLayout {
    /// Common panel width (zero when nothing is visible).
    pub panel_width: f64,
    /// Common panel height.
    pub panel_height: f64,
    /// Panels, left to right.
    pub panels: Vec<Panel>,
}

impl PanelLayout {
    /// Clip region for the panels, if any are visible.
    pub fn clip(&self) -> Option<ClipRect> {
        (!self.panels.is_empty()).then_some(ClipRect {
            width: self.panel_width,
            height: self.panel_height,
        })
    }

    /// Panel showing `fragment`.
    pub fn panel(&self, fragment: FragmentId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.fragment == fragment)
    }

    /// Sum of panel widths plus the gaps between them.
    pub fn covered_width(&self, gap: f64) -> f64 {
        let n = self.panels.len();
        if n == 0 {
            return 0.0;
        }
        self.panels.iter().map(Panel::width).sum::<f64>() + (n - 1) as f64 * gap
    }
}

/// Pixel ranges of `n` equal panels across `width`.
pub fn tile(width: f64, gap: f64, n: usize) -> Vec<(f64, f64)> {
    if n == 0 {
        return Vec::new();
    }
    let panel_width = (width - (n - 1) as f64 * gap) / n as f64;
    (0..n)
        .map(|i| {
            let i = i as f64;
            (i * (panel_width + gap), (i + 1.0) * panel_width + i * gap)
        })
        .collect()
}

/// Tile the visible fragments of `store` across the display.
pub fn layout_panels(store: &FragmentStore, config: &EngineConfig) -> PanelLayout {
    let visible: Vec<(FragmentId, Selection, Domain)> = store
        .visible()
        .into_iter()
        .filter_map(|f| Some((f.id(), f.selection()?, f.domain()?)))
        .filter(|(_, _, domain)| domain.span() > 0.0)
        .collect();

    let panel_height = config.panel_height();
    let n = visible.len();
    if n == 0 {
        return PanelLayout {
            panel_width: 0.0,
            panel_height,
            panels: Vec::new(),
        };
    }

    let gap = config.margins.panel_gap;
    let panel_width = (config.width - (n - 1) as f64 * gap) / n as f64;
    let panels = visible
        .into_iter()
        .zip(tile(config.width, gap, n))
        .enumerate()
        .map(|(index, ((fragment, selection, domain), range))| {
            let scale = LinearScale::unchecked(domain.as_pair(), range);
            let inner_scale = LinearScale::unchecked(domain.as_pair(), (0.0, panel_width));
            Panel {
                fragment,
                index,
                selection,
                domain,
                range,
                scale,
                inner_scale,
                axis: AxisSpec::for_scale(&inner_scale, config.tick_count),
                transform: ZoomTransform::for_window(config.width, selection.lo, selection.hi),
            }
        })
        .collect();

    PanelLayout {
        panel_width,
        panel_height,
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test_case(1, 300.0, 10.0, 300.0; "single panel fills width")]
    #[test_case(2, 300.0, 10.0, 145.0; "two panels")]
    #[test_case(3, 300.0, 10.0, 280.0 / 3.0; "three panels")]
    #[test_case(4, 1_000.0, 0.0, 250.0; "no gap")]
    fn tile_widths(n: usize, width: f64, gap: f64, expected: f64) {
        let ranges = tile(width, gap, n);
        assert_eq!(ranges.len(), n);
        for (lo, hi) in &ranges {
            assert!(approx(hi - lo, expected));
        }
        let last = ranges.last().expect("at least one panel");
        assert!(approx(last.1, width));
    }

    #[test]
    fn tile_of_nothing_is_empty() {
        assert!(tile(300.0, 10.0, 0).is_empty());
    }

    #[test]
    fn layout_orders_panels_by_selection() {
        let master = LinearScale::new((0.0, 100.0), (0.0, 100.0)).expect("valid scale");
        let mut store = FragmentStore::new();
        let right = store.spawn();
        let left = store.spawn();
        store.spawn();
        store.get_mut(right).expect("present").set_selection(Selection::new(70.0, 90.0), &master);
        store.get_mut(left).expect("present").set_selection(Selection::new(0.0, 20.0), &master);

        let config = EngineConfig::with_size(300.0, 400.0).with_panel_gap(10.0);
        let layout = layout_panels(&store, &config);
        assert_eq!(layout.panels.len(), 2);
        assert_eq!(layout.panels[0].fragment, left);
        assert_eq!(layout.panels[1].fragment, right);
        assert_eq!(layout.panels[1].range, (155.0, 300.0));
        assert!(approx(layout.covered_width(10.0), 300.0));
        assert_eq!(layout.clip().map(|c| c.width), Some(145.0));
    }

    #[test]
    fn panel_scales_share_domain() {
        let master = LinearScale::new((0.0, 1_000.0), (0.0, 100.0)).expect("valid scale");
        let mut store = FragmentStore::new();
        let id = store.spawn();
        store.get_mut(id).expect("present").set_selection(Selection::new(10.0, 20.0), &master);

        let config = EngineConfig::with_size(100.0, 400.0);
        let layout = layout_panels(&store, &config);
        let panel = layout.panel(id).expect("panel exists");
        assert_eq!(panel.scale.apply(150.0), 50.0);
        assert_eq!(panel.inner_scale.apply(200.0), 100.0);
        assert_eq!(panel.transform.k, 10.0);
        assert_eq!(panel.transform.x, -100.0);
    }

    #[test]
    fn tick_count_controls_axis_density() {
        let master = LinearScale::new((0.0, 1_000.0), (0.0, 100.0)).expect("valid scale");
        let mut store = FragmentStore::new();
        let id = store.spawn();
        store.get_mut(id).expect("present").set_selection(Selection::new(10.0, 20.0), &master);

        let dense = layout_panels(&store, &EngineConfig::with_size(100.0, 400.0));
        let sparse = layout_panels(&store, &EngineConfig::with_size(100.0, 400.0).with_tick_count(2));
        let labels = |layout: &PanelLayout| layout.panel(id).expect("panel exists").axis.labels().len();
        assert_eq!(labels(&dense), 11);
        assert_eq!(labels(&sparse), 3);
    }

    #[test]
    fn empty_store_has_no_clip() {
        let layout = layout_panels(&FragmentStore::new(), &EngineConfig::default());
        assert!(layout.panels.is_empty());
        assert!(layout.clip().is_none());
        assert_eq!(layout.covered_width(8.0), 0.0);
    }
}
