#![allow(dead_code)]

use multibrush::features::{FeatureSet, IntervalFeature};
use multibrush::fragment::{FragmentId, Selection};
use multibrush::render::RecordingAdapter;
use multibrush::{BrushEngine, EngineConfig, GestureSource, RenderAdapter};

/// Genome length used by most tests: 100 bases per pixel on a 300px strip.
pub const GENOME: (f64, f64) = (0.0, 30_000.0);

pub fn config(width: f64) -> EngineConfig {
    EngineConfig::with_size(width, 400.0)
}

pub fn engine(width: f64, genome: (f64, f64)) -> BrushEngine<RecordingAdapter> {
    engine_with(config(width), genome, FeatureSet::default())
}

pub fn engine_with(
    config: EngineConfig,
    genome: (f64, f64),
    features: FeatureSet,
) -> BrushEngine<RecordingAdapter> {
    BrushEngine::new(config, genome, features, RecordingAdapter::new()).expect("engine builds")
}

/// Intervals on three lanes every `step` bases across `genome`.
pub fn striped_features(genome: (f64, f64), step: f64) -> FeatureSet {
    let mut intervals = Vec::new();
    let mut place = genome.0;
    let mut lane = 0.0;
    while place + step <= genome.1 {
        intervals.push(IntervalFeature::new(place, place + step * 0.5, lane));
        place += step;
        lane = (lane + 1.0) % 3.0;
    }
    FeatureSet::new(intervals, Vec::new())
}

/// Draw a new brush from `lo` to `hi` on the newest fragment and return its id.
pub fn brush<A: RenderAdapter>(engine: &mut BrushEngine<A>, lo: f64, hi: f64) -> FragmentId {
    let id = engine.newest().expect("an empty brush is available");
    engine.drag_start(id, Some(Selection::new(lo, lo)), GestureSource::User);
    engine.drag(id, Some(Selection::new(lo, hi)), GestureSource::User);
    engine.drag_end(id, Some(Selection::new(lo, hi)), GestureSource::User);
    id
}

/// Drag an existing brush to `target` in one step.
pub fn move_to<A: RenderAdapter>(engine: &mut BrushEngine<A>, id: FragmentId, target: Selection) {
    let current = engine.store().get(id).and_then(|f| f.selection());
    engine.drag_start(id, current, GestureSource::User);
    engine.drag(id, Some(target), GestureSource::User);
    engine.drag_end(id, Some(target), GestureSource::User);
}

pub fn selection_of<A: RenderAdapter>(engine: &BrushEngine<A>, id: FragmentId) -> Option<Selection> {
    engine.store().get(id).and_then(|f| f.selection())
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
