//! Fragments: one per brush on the master axis
//!
//! A fragment's [`Selection`] lives in brush-strip pixels; its [`Domain`] is
//! the same interval in genome coordinates, recomputed from the selection
//! through the master scale whenever either changes.

mod lifecycle;
mod solver;
mod store;

pub use lifecycle::{DragOutcome, EndOutcome, LifecycleManager};
pub use solver::{clamp_selection, clamp_within, domain_bounds, selection_edges, NeighborEdges};
pub use store::FragmentStore;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scale::LinearScale;

/// Stable identifier of a fragment for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(pub u64);

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brush-{}", self.0)
    }
}

/// Pixel interval on the brush strip. `lo == hi` is an empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Left edge in pixels.
    pub lo: f64,
    /// Right edge in pixels.
    pub hi: f64,
}

impl Selection {
    /// Construct a selection, ordering the endpoints.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Zero-width selections are degenerate and never become panels.
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    /// Whether both endpoints are finite.
    pub fn is_finite(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }

    /// True when the open interiors intersect; touching edges do not overlap.
    pub fn overlaps(&self, other: &Selection) -> bool {
        self.lo < other.hi && other.lo < self.hi
    }

    /// Restrict to `[min, max]`.
    pub fn confine(&self, min: f64, max: f64) -> Self {
        Self {
            lo: self.lo.clamp(min, max),
            hi: self.hi.clamp(min, max),
        }
    }

    /// Genome interval covered by this selection under the master scale.
    pub fn to_domain(&self, master: &LinearScale) -> Domain {
        Domain::new(master.invert(self.lo), master.invert(self.hi))
    }
}

/// Genome-coordinate interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Lower genome coordinate.
    pub lo: f64,
    /// Upper genome coordinate.
    pub hi: f64,
}

impl Domain {
    /// Construct a domain, ordering the endpoints.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Length in genome units.
    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }

    /// Closed-interval membership.
    pub fn contains(&self, place: f64) -> bool {
        self.lo <= place && place <= self.hi
    }

    /// Pixel selection on the brush strip for this domain.
    pub fn to_selection(&self, master: &LinearScale) -> Selection {
        Selection::new(master.apply(self.lo), master.apply(self.hi))
    }

    /// Endpoints as a tuple, for building scales.
    pub fn as_pair(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }
}

/// State of one brush.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    id: FragmentId,
    selection: Option<Selection>,
    domain: Option<Domain>,
}

impl Fragment {
    /// A fresh fragment without a selection.
    pub fn empty(id: FragmentId) -> Self {
        Self {
            id,
            selection: None,
            domain: None,
        }
    }

    /// Identifier.
    pub fn id(&self) -> FragmentId {
        self.id
    }

    /// Current pixel selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Current genome domain, if any.
    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    /// Has never been brushed (or was cleared).
    pub fn is_empty(&self) -> bool {
        self.selection.is_none()
    }

    /// Holds a non-degenerate selection and therefore gets a panel.
    pub fn is_visible(&self) -> bool {
        self.selection.is_some_and(|s| !s.is_degenerate())
    }

    /// Holds a zero-width selection and is due for removal.
    pub fn is_collapsed(&self) -> bool {
        self.selection.is_some_and(|s| s.is_degenerate())
    }

    /// Replace the selection and re-derive the domain.
    pub fn set_selection(&mut self, selection: Selection, master: &LinearScale) {
        self.domain = Some(selection.to_domain(master));
        self.selection = Some(selection);
    }

    /// Replace the domain and re-derive the selection.
    pub fn set_domain(&mut self, domain: Domain, master: &LinearScale) {
        self.selection = Some(domain.to_selection(master));
        self.domain = Some(domain);
    }

    /// Store a zoomed domain together with the selection already derived
    /// from it.
    pub fn set_zoomed(&mut self, domain: Domain, selection: Selection) {
        self.selection = Some(selection);
        self.domain = Some(domain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master() -> LinearScale {
        LinearScale::new((0.0, 1_000.0), (0.0, 100.0)).expect("valid scale")
    }

    #[test]
    fn selection_orders_endpoints() {
        let selection = Selection::new(40.0, 10.0);
        assert_eq!(selection.lo, 10.0);
        assert_eq!(selection.hi, 40.0);
        assert_eq!(selection.width(), 30.0);
    }

    #[test]
    fn touching_selections_do_not_overlap() {
        let left = Selection::new(0.0, 40.0);
        let right = Selection::new(40.0, 60.0);
        assert!(!left.overlaps(&right));
        assert!(left.overlaps(&Selection::new(39.0, 50.0)));
    }

    #[test]
    fn fragment_derives_domain_from_selection() {
        let mut fragment = Fragment::empty(FragmentId(1));
        assert!(fragment.is_empty());
        assert!(!fragment.is_visible());

        fragment.set_selection(Selection::new(10.0, 20.0), &master());
        assert_eq!(fragment.domain(), Some(Domain::new(100.0, 200.0)));
        assert!(fragment.is_visible());

        fragment.set_domain(Domain::new(500.0, 750.0), &master());
        assert_eq!(fragment.selection(), Some(Selection::new(50.0, 75.0)));
    }

    #[test]
    fn zero_width_fragment_is_collapsed() {
        let mut fragment = Fragment::empty(FragmentId(7));
        fragment.set_selection(Selection::new(10.0, 10.0), &master());
        assert!(fragment.is_collapsed());
        assert!(!fragment.is_visible());
        assert_eq!(fragment.id().to_string(), "brush-7");
    }
}
