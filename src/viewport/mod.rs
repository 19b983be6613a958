//! Per-panel zoom and pan, kept consistent with the brushes
//!
//! A zoom gesture on a panel produces a transform of the master scale. The
//! domain it reveals is clamped so the panel cannot slide into a neighbouring
//! fragment's domain, then written back to the fragment (and so to its
//! brush). Each panel runs a small state machine, `Idle → Zooming → Idle`,
//! which the engine uses to keep drags and zooms on the same panel apart.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::fragment::{clamp_within, domain_bounds, Domain, FragmentId, FragmentStore, Selection};
use crate::layout::PanelLayout;
use crate::scale::{LinearScale, ZoomTransform};

/// Zoom state of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportPhase {
    /// No zoom gesture in progress.
    #[default]
    Idle,
    /// A zoom or pan gesture is in progress.
    Zooming,
}

/// Live zoom state of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Gesture phase.
    pub phase: ViewportPhase,
    /// Transform under which the master scale shows the fragment's domain.
    pub transform: ZoomTransform,
}

/// Why a zoom step changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomRejection {
    /// Transform had non-finite components.
    InvalidTransform,
    /// Fragment is unknown or has no domain.
    NotVisible,
    /// Clamping left no room for the panel.
    NoRoom,
}

/// Result of a zoom step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomOutcome {
    /// The fragment now shows `domain`, and its brush should move to
    /// `selection`.
    Applied {
        /// New genome domain.
        domain: Domain,
        /// Matching brush selection.
        selection: Selection,
        /// Whether neighbour bounds altered the requested domain.
        clamped: bool,
    },
    /// Nothing changed.
    Rejected(ZoomRejection),
}

/// Pixel distance, relative to the strip width, under which a zoomed brush
/// edge counts as touching a neighbour's edge.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Round-tripping a neighbour's edge through the master scale can land a
/// hair past it; pull such edges back onto the neighbour.
fn snap_to_neighbours(selection: Selection, others: &[Selection], width: f64) -> Selection {
    let tolerance = SNAP_TOLERANCE * width.max(1.0);
    let mut snapped = selection;
    for other in others.iter().filter(|o| !o.is_degenerate()) {
        if (snapped.hi - other.lo).abs() <= tolerance {
            snapped.hi = other.lo;
        }
        if (snapped.lo - other.hi).abs() <= tolerance {
            snapped.lo = other.hi;
        }
    }
    snapped
}

/// Owns the zoom state of every visible panel.
#[derive(Debug)]
pub struct ViewportSynchronizer {
    states: HashMap<FragmentId, ViewportState>,
    width: f64,
    min_span: f64,
}

impl ViewportSynchronizer {
    /// Synchronizer for panels zooming over a display `width` pixels wide.
    pub fn new(width: f64, min_span: f64) -> Self {
        Self {
            states: HashMap::new(),
            width,
            min_span,
        }
    }

    /// Forget every panel.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Phase of a panel; unknown panels are idle.
    pub fn phase(&self, id: FragmentId) -> ViewportPhase {
        self.states.get(&id).map(|s| s.phase).unwrap_or_default()
    }

    /// Whether a zoom gesture is running on `id`.
    pub fn is_zooming(&self, id: FragmentId) -> bool {
        self.phase(id) == ViewportPhase::Zooming
    }

    /// Current transform of a panel.
    pub fn transform(&self, id: FragmentId) -> Option<ZoomTransform> {
        self.states.get(&id).map(|s| s.transform)
    }

    /// Enter `Zooming` for a known panel.
    pub fn begin(&mut self, id: FragmentId) -> bool {
        match self.states.get_mut(&id) {
            Some(state) => {
                state.phase = ViewportPhase::Zooming;
                true
            }
            None => false,
        }
    }

    /// Return a panel to `Idle`.
    pub fn end(&mut self, id: FragmentId) {
        if let Some(state) = self.states.get_mut(&id) {
            state.phase = ViewportPhase::Idle;
        }
    }

    /// Apply a zoom transform to a fragment.
    ///
    /// The transform is first held to the zoom extents, then the domain it
    /// shows is clamped against the domains of all other fragments that lie
    /// outside the fragment's current domain.
    pub fn zoom(
        &mut self,
        store: &mut FragmentStore,
        master: &LinearScale,
        id: FragmentId,
        transform: ZoomTransform,
    ) -> ZoomOutcome {
        if !transform.is_finite() || transform.k <= 0.0 {
            return ZoomOutcome::Rejected(ZoomRejection::InvalidTransform);
        }
        let Some(current) = store.get(id).filter(|f| f.is_visible()).and_then(|f| f.domain())
        else {
            return ZoomOutcome::Rejected(ZoomRejection::NotVisible);
        };

        let constrained = transform.constrain(self.width);
        let (lo, hi) = constrained.rescale_x(master).domain();
        let requested = Domain::new(lo, hi);

        let bounds = domain_bounds(current, &store.other_domains(id));
        let (lo, hi) = clamp_within(requested.lo, requested.hi, bounds, self.min_span);
        let domain = Domain::new(lo, hi);
        let others = store.other_selections(id);
        let selection = snap_to_neighbours(domain.to_selection(master), &others, self.width);

        if domain.span() <= 0.0
            || selection.is_degenerate()
            || others.iter().any(|o| !o.is_degenerate() && selection.overlaps(o))
        {
            debug!(%id, ?requested, "zoom leaves no room between neighbours");
            return ZoomOutcome::Rejected(ZoomRejection::NoRoom);
        }

        let clamped = domain != requested;
        if clamped {
            trace!(%id, ?requested, ?domain, "zoom clamped against neighbours");
        }
        if let Some(fragment) = store.get_mut(id) {
            fragment.set_zoomed(domain, selection);
        }
        let state = self.states.entry(id).or_insert(ViewportState {
            phase: ViewportPhase::Idle,
            transform: constrained,
        });
        state.phase = ViewportPhase::Zooming;
        state.transform = ZoomTransform::for_window(self.width, selection.lo, selection.hi);

        ZoomOutcome::Applied {
            domain,
            selection,
            clamped,
        }
    }

    /// Re-seat every panel's transform on its selection and drop state for
    /// panels that are gone. Phases survive.
    pub fn sync(&mut self, layout: &PanelLayout) {
        self.states
            .retain(|id, _| layout.panels.iter().any(|p| p.fragment == *id));
        for panel in &layout.panels {
            self.states
                .entry(panel.fragment)
                .and_modify(|state| state.transform = panel.transform)
                .or_insert(ViewportState {
                    phase: ViewportPhase::Idle,
                    transform: panel.transform,
                });
        }
    }
}
