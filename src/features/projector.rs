use std::fmt;

use serde::Serialize;

use super::{Connection, FeatureSet, IntervalFeature};
use crate::fragment::FragmentId;
use crate::layout::PanelLayout;
use crate::scale::LinearScale;

/// Key under which the renderer tracks one drawn shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RenderId(pub String);

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplier of unique render identifiers.
pub trait RenderIdSource: fmt::Debug {
    /// A fresh identifier, never returned before.
    fn next_id(&mut self) -> RenderId;
}

/// Counter-backed identifiers such as `shape-17`.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Identifiers `"{prefix}-1"`, `"{prefix}-2"`, …
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("shape")
    }
}

impl RenderIdSource for SequentialIds {
    fn next_id(&mut self) -> RenderId {
        let id = RenderId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// An interval placed inside a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleInterval {
    /// Render key, fresh on every update.
    pub identifier: RenderId,
    /// Panel the interval is drawn in.
    pub panel: FragmentId,
    /// Source feature.
    pub feature: IntervalFeature,
    /// Horizontal pixel extent on the display.
    pub range: (f64, f64),
    /// `range.1 - range.0`.
    pub shape_width: f64,
    /// Top edge of the bar.
    pub top: f64,
}

/// A connection placed inside a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleConnection {
    /// Render key, fresh on every update.
    pub identifier: RenderId,
    /// Panel the connection is drawn in.
    pub panel: FragmentId,
    /// Source connection.
    pub connection: Connection,
    /// Projected source and sink points, both on the source lane.
    pub points: [(f64, f64); 2],
    /// Path through `points`.
    pub path: String,
}

/// Everything visible across all panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectedFeatures {
    /// Visible intervals, grouped by panel from left to right.
    pub intervals: Vec<VisibleInterval>,
    /// Visible connections, grouped by panel from left to right.
    pub connections: Vec<VisibleConnection>,
}

fn line_path(points: &[(f64, f64)]) -> String {
    let mut path = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        path.push_str(&format!("{command}{x},{y}"));
    }
    path
}

/// Filter and project every feature into every panel.
///
/// A feature appears in a panel only when it lies entirely inside that
/// panel's domain. The whole list is rebuilt on each call.
pub fn project(
    layout: &PanelLayout,
    features: &FeatureSet,
    lanes: &LinearScale,
    bar_thickness: f64,
    ids: &mut dyn RenderIdSource,
) -> ProjectedFeatures {
    let mut projected = ProjectedFeatures::default();

    for panel in &layout.panels {
        for feature in features.intervals.iter().filter(|f| f.is_within(&panel.domain)) {
            let range = (
                panel.scale.apply(feature.start_place),
                panel.scale.apply(feature.end_place),
            );
            projected.intervals.push(VisibleInterval {
                identifier: ids.next_id(),
                panel: panel.fragment,
                feature: feature.clone(),
                range,
                shape_width: range.1 - range.0,
                top: lanes.apply(feature.y) - 0.5 * bar_thickness,
            });
        }

        for connection in features.connections.iter().filter(|c| c.is_within(&panel.domain)) {
            let y = lanes.apply(connection.source.y);
            let points = [
                (panel.scale.apply(connection.source.place), y),
                (panel.scale.apply(connection.sink.place), y),
            ];
            projected.connections.push(VisibleConnection {
                identifier: ids.next_id(),
                panel: panel.fragment,
                connection: connection.clone(),
                points,
                path: line_path(&points),
            });
        }
    }

    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::features::{ConnectionKind, Endpoint};
    use crate::fragment::{FragmentStore, Selection};
    use crate::layout::layout_panels;

    fn single_panel() -> PanelLayout {
        let master = LinearScale::new((0.0, 1_000.0), (0.0, 100.0)).expect("valid scale");
        let mut store = FragmentStore::new();
        let id = store.spawn();
        store
            .get_mut(id)
            .expect("present")
            .set_selection(Selection::new(10.0, 20.0), &master);
        layout_panels(&store, &EngineConfig::with_size(100.0, 400.0))
    }

    fn lanes() -> LinearScale {
        LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("valid scale")
    }

    #[test]
    fn projects_contained_intervals_only() {
        let features = FeatureSet::new(
            vec![
                IntervalFeature::new(120.0, 180.0, 5.0),
                IntervalFeature::new(50.0, 150.0, 5.0),
                IntervalFeature::new(100.0, 200.0, 2.0),
            ],
            Vec::new(),
        );
        let mut ids = SequentialIds::default();
        let projected = project(&single_panel(), &features, &lanes(), 10.0, &mut ids);

        assert_eq!(projected.intervals.len(), 2);
        let first = &projected.intervals[0];
        assert_eq!(first.range, (20.0, 80.0));
        assert_eq!(first.shape_width, 60.0);
        assert_eq!(first.top, 45.0);
        assert_eq!(first.identifier, RenderId("shape-1".to_string()));
        assert_eq!(projected.intervals[1].range, (0.0, 100.0));
    }

    #[test]
    fn identifiers_are_fresh_each_projection() {
        let features = FeatureSet::new(vec![IntervalFeature::new(120.0, 180.0, 5.0)], Vec::new());
        let layout = single_panel();
        let mut ids = SequentialIds::default();
        let a = project(&layout, &features, &lanes(), 10.0, &mut ids);
        let b = project(&layout, &features, &lanes(), 10.0, &mut ids);
        assert_ne!(a.intervals[0].identifier, b.intervals[0].identifier);
    }

    #[test]
    fn connections_share_source_lane() {
        let connection = Connection::new(
            Endpoint { place: 150.0, y: 2.0 },
            Endpoint { place: 175.0, y: 8.0 },
            ConnectionKind::Aligned,
        );
        let loose = Connection::new(
            Endpoint { place: 150.0, y: 2.0 },
            Endpoint { place: 175.0, y: 8.0 },
            ConnectionKind::Loose,
        );
        let features = FeatureSet::new(Vec::new(), vec![connection, loose]);
        let mut ids = SequentialIds::new("link");
        let projected = project(&single_panel(), &features, &lanes(), 10.0, &mut ids);

        assert_eq!(projected.connections.len(), 1);
        let visible = &projected.connections[0];
        assert_eq!(visible.points, [(50.0, 80.0), (75.0, 80.0)]);
        assert_eq!(visible.path, "M50,80L75,80");
    }
}
