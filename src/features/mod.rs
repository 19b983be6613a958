//! Genomic features shown inside panels
//!
//! Features are read-only input: intervals drawn as bars on a lane, and
//! connections linking two places. Both are filtered per panel and projected
//! into display pixels by [`project`].

mod projector;

pub use projector::{
    project, ProjectedFeatures, RenderId, RenderIdSource, SequentialIds, VisibleConnection,
    VisibleInterval,
};

use serde::{Deserialize, Serialize};

use crate::fragment::Domain;

/// A genomic interval with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalFeature {
    /// Start coordinate.
    #[serde(alias = "startPlace")]
    pub start_place: f64,
    /// End coordinate.
    #[serde(alias = "endPlace")]
    pub end_place: f64,
    /// Vertical lane.
    pub y: f64,
    /// Fill colour.
    #[serde(default)]
    pub color: String,
    /// Popover heading.
    #[serde(default, alias = "popoverTitle")]
    pub popover_title: String,
    /// Popover body.
    #[serde(default, alias = "popoverContent")]
    pub popover_content: String,
}

impl IntervalFeature {
    /// Interval on a lane without display metadata.
    pub fn new(start_place: f64, end_place: f64, y: f64) -> Self {
        Self {
            start_place,
            end_place,
            y,
            color: String::new(),
            popover_title: String::new(),
            popover_content: String::new(),
        }
    }

    /// Set the fill colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether both ends lie inside `domain` (closed).
    pub fn is_within(&self, domain: &Domain) -> bool {
        domain.contains(self.start_place) && domain.contains(self.end_place)
    }
}

/// One end of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Genome coordinate.
    pub place: f64,
    /// Vertical lane.
    pub y: f64,
}

/// How a connection relates its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionKind {
    /// Both ends are placed intervals.
    Aligned,
    /// One end is not anchored; never shown in panels.
    Loose,
    /// Any other kind reported by the source.
    #[serde(other)]
    Other,
}

/// Link between two places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Origin.
    pub source: Endpoint,
    /// Target.
    pub sink: Endpoint,
    /// Connection kind.
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
    /// Renderer style class.
    #[serde(default, alias = "styleClass")]
    pub style_class: String,
}

impl Connection {
    /// Connection between two endpoints.
    pub fn new(source: Endpoint, sink: Endpoint, kind: ConnectionKind) -> Self {
        Self {
            source,
            sink,
            kind,
            style_class: String::new(),
        }
    }

    /// Shown in a panel only when not loose and both ends are inside.
    pub fn is_within(&self, domain: &Domain) -> bool {
        self.kind != ConnectionKind::Loose
            && domain.contains(self.source.place)
            && domain.contains(self.sink.place)
    }
}

/// Every feature available for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Intervals.
    #[serde(default)]
    pub intervals: Vec<IntervalFeature>,
    /// Connections.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl FeatureSet {
    /// Feature set from its parts.
    pub fn new(intervals: Vec<IntervalFeature>, connections: Vec<Connection>) -> Self {
        Self {
            intervals,
            connections,
        }
    }
}
