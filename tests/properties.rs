//! Invariants checked over random gesture sequences

mod common;

use common::*;
use multibrush::fragment::Selection;
use multibrush::render::RecordingAdapter;
use multibrush::viewport::ViewportPhase;
use multibrush::{BrushEngine, GestureSource, ZoomTransform};
use proptest::prelude::*;

const WIDTH: f64 = 300.0;
const GAP: f64 = 8.0;

#[derive(Debug, Clone)]
enum Op {
    /// Draw a new brush on the newest fragment.
    Brush { lo: f64, hi: f64 },
    /// Drag the n-th visible brush.
    Move { pick: usize, lo: f64, hi: f64 },
    /// Collapse the n-th visible brush to zero width.
    Collapse { pick: usize },
    /// Zoom the n-th visible panel.
    Zoom { pick: usize, k: f64, x: f64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0.0..WIDTH, 0.0..WIDTH).prop_map(|(lo, hi)| Op::Brush { lo, hi }),
        2 => (0usize..8, -20.0..WIDTH + 20.0, -20.0..WIDTH + 20.0)
            .prop_map(|(pick, lo, hi)| Op::Move { pick, lo, hi }),
        1 => (0usize..8).prop_map(|pick| Op::Collapse { pick }),
        2 => (0usize..8, 0.25..40.0, -6_000.0..500.0)
            .prop_map(|(pick, k, x)| Op::Zoom { pick, k, x }),
    ]
}

fn apply(engine: &mut BrushEngine<RecordingAdapter>, op: &Op) {
    let visible: Vec<_> = engine.store().visible().iter().map(|f| f.id()).collect();
    let pick = |n: usize| (!visible.is_empty()).then(|| visible[n % visible.len()]);
    match *op {
        Op::Brush { lo, hi } => {
            brush(engine, lo, hi);
        }
        Op::Move { pick: n, lo, hi } => {
            if let Some(id) = pick(n) {
                move_to(engine, id, Selection::new(lo, hi));
            }
        }
        Op::Collapse { pick: n } => {
            if let Some(id) = pick(n) {
                let lo = selection_of(engine, id).map_or(0.0, |s| s.lo);
                move_to(engine, id, Selection::new(lo, lo));
            }
        }
        Op::Zoom { pick: n, k, x } => {
            if let Some(id) = pick(n) {
                engine.zoom_start(id, GestureSource::User);
                engine.zoom(id, Some(ZoomTransform::new(k, x)), GestureSource::User);
                engine.zoom_end(id, GestureSource::User);
            }
        }
    }
}

fn check_invariants(engine: &BrushEngine<RecordingAdapter>) -> Result<(), TestCaseError> {
    let visible: Vec<Selection> = engine
        .store()
        .visible()
        .iter()
        .filter_map(|f| f.selection())
        .collect();

    // visible selections never overlap
    for pair in visible.windows(2) {
        prop_assert!(pair[0].hi <= pair[1].lo, "overlap between {:?}", pair);
    }

    // nothing zero-width gets a panel
    for panel in engine.view().panels() {
        prop_assert!(!panel.selection.is_degenerate());
        prop_assert!(panel.domain.span() > 0.0);
    }

    // exactly one brush is ready for a new selection
    prop_assert_eq!(engine.store().empty_count(), 1);
    prop_assert!(engine.store().last().is_some_and(|f| f.is_empty()));

    // panels tile the display
    let layout = &engine.view().layout;
    prop_assert_eq!(layout.panels.len(), visible.len());
    if !layout.panels.is_empty() {
        prop_assert!((layout.covered_width(GAP) - WIDTH).abs() < 1e-6);
        prop_assert!((layout.panels[0].range.0).abs() < 1e-9);
    }

    // features only land inside their panel's domain
    for interval in &engine.view().features.intervals {
        let Some(panel) = layout.panel(interval.panel) else {
            return Err(TestCaseError::fail("interval projected into a missing panel"));
        };
        prop_assert!(panel.domain.contains(interval.feature.start_place));
        prop_assert!(panel.domain.contains(interval.feature.end_place));
    }

    // brushes follow the store
    prop_assert_eq!(engine.view().brushes.len(), engine.store().len());
    for phase in layout.panels.iter().map(|p| engine.viewport_phase(p.fragment)) {
        prop_assert_eq!(phase, ViewportPhase::Idle);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_after_every_gesture(ops in proptest::collection::vec(op(), 1..40)) {
        let mut engine = engine_with(config(WIDTH), GENOME, striped_features(GENOME, 400.0));
        check_invariants(&engine)?;
        for op in &ops {
            apply(&mut engine, op);
            check_invariants(&engine)?;
        }
    }

    #[test]
    fn finished_brush_on_newest_spawns_one_more(
        lo in 0.0..WIDTH,
        hi in 0.0..WIDTH,
    ) {
        let mut engine = engine(WIDTH, GENOME);
        let before = engine.store().len();
        let id = brush(&mut engine, lo, hi);

        let filled = engine.store().get(id).is_some_and(|f| f.is_visible());
        if filled {
            prop_assert_eq!(engine.store().len(), before + 1);
            prop_assert_ne!(engine.newest(), Some(id));
        } else {
            prop_assert_eq!(engine.store().len(), before);
        }
        prop_assert_eq!(engine.store().empty_count(), 1);
    }

    #[test]
    fn zoom_within_free_space_is_not_clamped(
        left in 10.0..100.0f64,
        width in 10.0..60.0f64,
        inset_lo in 0.0..0.4f64,
        inset_hi in 0.0..0.4f64,
    ) {
        let mut engine = engine(WIDTH, GENOME);
        let id = brush(&mut engine, left, left + width);
        brush(&mut engine, left + width + 20.0, WIDTH);

        // a window strictly inside the current brush respects every neighbour
        let lo = left + width * inset_lo;
        let hi = left + width * (1.0 - inset_hi);
        let requested = (lo * 100.0, hi * 100.0);

        prop_assert!(engine.zoom(
            id,
            Some(ZoomTransform::for_window(WIDTH, lo, hi)),
            GestureSource::User,
        ));
        let domain = engine.store().get(id).and_then(|f| f.domain()).expect("domain");
        prop_assert!((domain.lo - requested.0).abs() < 1e-6);
        prop_assert!((domain.hi - requested.1).abs() < 1e-6);
    }
}
