//! Non-overlap constraint solving for brushes and zoomed domains
//!
//! Both the drag path (pixel selections) and the zoom path (genome domains)
//! reduce to the same problem: given the nearest occupied edge on each side,
//! pull a candidate interval back so it ends at that edge and stays at least
//! `min_span` wide.

use super::{Domain, Selection};

/// Nearest occupied coordinates on either side of an interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeighborEdges {
    /// Highest upper edge of a neighbour at or left of the interval.
    pub lower: Option<f64>,
    /// Lowest lower edge of a neighbour at or right of the interval.
    pub upper: Option<f64>,
}

impl NeighborEdges {
    /// No neighbour on either side.
    pub fn unconstrained() -> Self {
        Self::default()
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

fn min_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))))
}

/// Edges a dragged brush may not cross, measured against where the brush
/// was when the drag began.
///
/// A neighbour bounds the lower side when it starts at or before
/// `original.lo` (this includes one straddling `original.lo`), and the upper
/// side when it ends at or after `original.hi`.
pub fn selection_edges(original: Selection, others: &[Selection]) -> NeighborEdges {
    let live = || others.iter().filter(|s| !s.is_degenerate());
    NeighborEdges {
        lower: max_of(live().filter(|s| s.lo <= original.lo).map(|s| s.hi)),
        upper: min_of(live().filter(|s| s.hi >= original.hi).map(|s| s.lo)),
    }
}

/// Edges a zoomed domain may not cross: neighbours lying entirely outside
/// `current` on each side.
pub fn domain_bounds(current: Domain, others: &[Domain]) -> NeighborEdges {
    NeighborEdges {
        lower: max_of(others.iter().filter(|d| d.hi <= current.lo).map(|d| d.hi)),
        upper: min_of(others.iter().filter(|d| d.lo >= current.hi).map(|d| d.lo)),
    }
}

/// Pull `(lo, hi)` inside `edges`.
///
/// Reaching an edge snaps to it; the opposite endpoint is then kept at least
/// `min_span` away so the result does not collapse at the boundary. The
/// upper edge is applied first, so when the two conflict the lower edge wins.
pub fn clamp_within(lo: f64, hi: f64, edges: NeighborEdges, min_span: f64) -> (f64, f64) {
    let (mut lo, mut hi) = (lo, hi);
    if let Some(upper) = edges.upper {
        if hi >= upper {
            hi = upper;
            lo = lo.min(upper - min_span);
        }
    }
    if let Some(lower) = edges.lower {
        if lo <= lower {
            lo = lower;
            hi = hi.max(lower + min_span);
        }
    }
    (lo, hi)
}

/// Clamp a candidate brush selection against the other brushes.
///
/// `others` is a snapshot of every other live selection taken before this
/// step mutates anything. Returns `None` when the clamped selection has zero
/// width, or when the gap it was pushed into is narrower than `min_span` and
/// it would still overlap a neighbour; the step must then not be applied.
pub fn clamp_selection(
    candidate: Selection,
    original: Selection,
    others: &[Selection],
    min_span: f64,
) -> Option<Selection> {
    let edges = selection_edges(original, others);
    let (lo, hi) = clamp_within(candidate.lo, candidate.hi, edges, min_span);
    if hi == lo {
        return None;
    }
    let clamped = Selection { lo, hi };
    if others.iter().any(|other| clamped.overlaps(other)) {
        return None;
    }
    Some(clamped)
}
