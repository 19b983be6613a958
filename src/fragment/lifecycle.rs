//! Brush lifecycle: drag sessions, spawning and garbage collection
//!
//! The store always ends an update cycle with an empty fragment ready to
//! receive a new selection. A new one is spawned when the most recent
//! fragment acquires a real selection at the end of a drag, and fragments
//! whose selection collapsed to zero width are dropped.

use tracing::{debug, trace};

use super::{clamp_selection, FragmentId, FragmentStore, Selection};
use crate::scale::LinearScale;

/// A drag in progress on one brush.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    fragment: FragmentId,
    /// Selection when the drag began; `None` for a brand-new brush.
    original: Option<Selection>,
}

/// Result of a single drag step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The clamped selection was stored on the fragment.
    Applied(Selection),
    /// Clamping produced an unusable selection; the fragment keeps
    /// `retained`, which the brush widget should snap back to.
    Rejected {
        /// Selection the fragment still holds.
        retained: Option<Selection>,
    },
    /// Nothing to do (no selection, unknown fragment, non-finite input).
    Ignored,
}

/// Result of finishing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EndOutcome {
    /// Final selection stored on the fragment, possibly zero-width.
    pub selection: Option<Selection>,
    /// Fragment spawned because the most recent brush became non-empty.
    pub spawned: Option<FragmentId>,
}

/// Decides when brushes are created, updated and destroyed.
#[derive(Debug)]
pub struct LifecycleManager {
    session: Option<DragSession>,
    extent: f64,
    min_span: f64,
}

impl LifecycleManager {
    /// Manager for a brush strip `extent` pixels wide.
    pub fn new(extent: f64, min_span: f64) -> Self {
        Self {
            session: None,
            extent,
            min_span,
        }
    }

    /// Brush currently being dragged.
    pub fn dragging(&self) -> Option<FragmentId> {
        self.session.map(|s| s.fragment)
    }

    /// Forget any drag in progress.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Start a drag, remembering where the brush was.
    ///
    /// Returns `false` if the fragment does not exist.
    pub fn begin(
        &mut self,
        store: &FragmentStore,
        id: FragmentId,
        selection: Option<Selection>,
    ) -> bool {
        let Some(fragment) = store.get(id) else {
            debug!(%id, "drag start on unknown brush ignored");
            return false;
        };
        let original = selection.filter(Selection::is_finite).or(fragment.selection());
        self.session = Some(DragSession {
            fragment: id,
            original,
        });
        true
    }

    /// Apply one drag step.
    ///
    /// Other brushes are snapshotted before this brush is touched, so the
    /// outcome does not depend on the order fragments are stored in.
    pub fn step(
        &mut self,
        store: &mut FragmentStore,
        master: &LinearScale,
        id: FragmentId,
        raw: Option<Selection>,
    ) -> DragOutcome {
        let Some(raw) = raw.filter(Selection::is_finite) else {
            trace!(%id, "drag step without selection");
            return DragOutcome::Ignored;
        };
        let Some(current) = store.get(id).map(|f| f.selection()) else {
            debug!(%id, "drag step on unknown brush ignored");
            return DragOutcome::Ignored;
        };

        let candidate = raw.confine(0.0, self.extent);
        let original = self.original_for(id).or(current).unwrap_or(candidate);
        let others = store.other_selections(id);

        match clamp_selection(candidate, original, &others, self.min_span) {
            Some(selection) => {
                if selection != candidate {
                    trace!(%id, ?candidate, ?selection, "drag clamped against neighbours");
                }
                if let Some(fragment) = store.get_mut(id) {
                    fragment.set_selection(selection, master);
                }
                DragOutcome::Applied(selection)
            }
            None => {
                trace!(%id, ?candidate, "drag step rejected");
                DragOutcome::Rejected { retained: current }
            }
        }
    }

    /// Finish a drag with the brush's final selection.
    ///
    /// A zero-width final selection is stored as-is so the next garbage
    /// collection drops the brush. Spawns a fresh brush when the most recent
    /// one now holds a real selection.
    pub fn end(
        &mut self,
        store: &mut FragmentStore,
        master: &LinearScale,
        id: FragmentId,
        raw: Option<Selection>,
    ) -> EndOutcome {
        let original = self.original_for(id);
        self.session = None;

        let Some(raw) = raw.filter(Selection::is_finite) else {
            trace!(%id, "drag end without selection");
            return EndOutcome::default();
        };
        let Some(current) = store.get(id).map(|f| f.selection()) else {
            debug!(%id, "drag end on unknown brush ignored");
            return EndOutcome::default();
        };

        let candidate = raw.confine(0.0, self.extent);
        let selection = if candidate.is_degenerate() {
            Some(candidate)
        } else {
            let original = original.or(current).unwrap_or(candidate);
            let others = store.other_selections(id);
            clamp_selection(candidate, original, &others, self.min_span).or(current)
        };
        if let (Some(selection), Some(fragment)) = (selection, store.get_mut(id)) {
            fragment.set_selection(selection, master);
        }

        let spawned = if store.last().is_some_and(|f| f.is_visible()) {
            let id = store.spawn();
            debug!(%id, "most recent brush filled, spawned a new one");
            Some(id)
        } else {
            None
        };
        EndOutcome { selection, spawned }
    }

    /// Drop brushes whose selection collapsed to zero width.
    pub fn collect_garbage(&self, store: &mut FragmentStore) -> Vec<FragmentId> {
        let removed = store.remove_collapsed();
        for id in &removed {
            debug!(%id, "removed collapsed brush");
        }
        removed
    }

    /// Spawn an empty brush if none is left and no drag is running.
    pub fn ensure_extendable(&self, store: &mut FragmentStore) -> Option<FragmentId> {
        if self.session.is_some() || store.empty_count() > 0 {
            return None;
        }
        let id = store.spawn();
        debug!(%id, "no empty brush left, spawned a new one");
        Some(id)
    }

    fn original_for(&self, id: FragmentId) -> Option<Selection> {
        self.session
            .filter(|s| s.fragment == id)
            .and_then(|s| s.original)
    }
}
