//! Event handling and the update pipeline
//!
//! [`BrushEngine`] owns the fragment store and reacts to drag and zoom
//! gestures. Every accepted gesture applies one mutation and then runs the
//! update pipeline in a fixed order:
//!
//! 1. collect collapsed fragments and keep an empty brush available
//! 2. tile the visible fragments into panels
//! 3. re-seat each panel's zoom transform
//! 4. project features into the panels
//! 5. diff against the previous view and send commands to the adapter
//!
//! Drag events are only honoured when they come from user input, and zoom
//! events are dropped when a brush produced them, so the two subsystems never
//! feed back into each other.

mod gesture;

pub use gesture::{Gesture, GestureSource};

use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::features::{project, FeatureSet, RenderIdSource, SequentialIds};
use crate::fragment::{
    DragOutcome, Fragment, FragmentId, FragmentStore, LifecycleManager, Selection,
};
use crate::layout::layout_panels;
use crate::render::{diff_views, BrushView, EngineView, RenderAdapter, RenderCommand};
use crate::scale::{LinearScale, ZoomTransform};
use crate::viewport::{ViewportPhase, ViewportSynchronizer, ZoomOutcome};
use crate::EngineError;

/// Linked multi-brush selection engine.
#[derive(Debug)]
pub struct BrushEngine<A: RenderAdapter> {
    config: EngineConfig,
    master: LinearScale,
    lanes: LinearScale,
    features: FeatureSet,
    store: FragmentStore,
    lifecycle: LifecycleManager,
    viewports: ViewportSynchronizer,
    ids: Box<dyn RenderIdSource>,
    active: Option<FragmentId>,
    view: EngineView,
    adapter: A,
}

impl<A: RenderAdapter> BrushEngine<A> {
    /// Create an engine over `genome` (start and end coordinate) and publish
    /// the first frame, which holds a single empty brush.
    ///
    /// Feature lanes map from `[0, max lane]` onto the panel height, top
    /// lane at the top; use [`with_lanes`](Self::with_lanes) to override.
    pub fn new(
        config: EngineConfig,
        genome: (f64, f64),
        features: FeatureSet,
        adapter: A,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let master = LinearScale::new(genome, (0.0, config.width))?;
        let max_lane = features
            .intervals
            .iter()
            .map(|i| i.y)
            .chain(features.connections.iter().map(|c| c.source.y))
            .filter(|y| y.is_finite())
            .fold(1.0_f64, f64::max);
        let lanes = LinearScale::new((0.0, max_lane), (config.panel_height(), 0.0))?;

        let mut engine = Self {
            lifecycle: LifecycleManager::new(config.width, config.min_span),
            viewports: ViewportSynchronizer::new(config.width, config.min_span),
            config,
            master,
            lanes,
            features,
            store: FragmentStore::new(),
            ids: Box::new(SequentialIds::default()),
            active: None,
            view: EngineView::default(),
            adapter,
        };
        engine.reset();
        Ok(engine)
    }

    /// Replace the lane scale and redraw.
    pub fn with_lanes(mut self, lanes: LinearScale) -> Self {
        self.lanes = lanes;
        self.recompute();
        self
    }

    /// Replace the render id source used from the next frame on.
    pub fn with_id_source(mut self, ids: Box<dyn RenderIdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Drop every brush and start over with one empty brush.
    pub fn reset(&mut self) {
        self.store.clear();
        self.lifecycle.cancel();
        self.viewports.clear();
        self.active = None;
        let id = self.store.spawn();
        info!(%id, "engine reset");
        self.recompute();
    }

    /// Swap the feature set and re-project.
    pub fn set_features(&mut self, features: FeatureSet) {
        self.features = features;
        self.recompute();
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Genome-to-brush-strip scale.
    pub fn master(&self) -> &LinearScale {
        &self.master
    }

    /// All fragments.
    pub fn store(&self) -> &FragmentStore {
        &self.store
    }

    /// Fragment being dragged or most recently zoomed.
    pub fn active(&self) -> Option<FragmentId> {
        self.active
    }

    /// Frame published by the last update.
    pub fn view(&self) -> &EngineView {
        &self.view
    }

    /// Zoom phase of a panel.
    pub fn viewport_phase(&self, id: FragmentId) -> ViewportPhase {
        self.viewports.phase(id)
    }

    /// Current zoom transform of a panel.
    pub fn viewport_transform(&self, id: FragmentId) -> Option<ZoomTransform> {
        self.viewports.transform(id)
    }

    /// The render adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The render adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Most recently created fragment; the one new selections start on.
    pub fn newest(&self) -> Option<FragmentId> {
        self.store.last().map(Fragment::id)
    }

    /// Dispatch a gesture. Returns whether it changed any state.
    pub fn handle(&mut self, gesture: Gesture) -> bool {
        match gesture {
            Gesture::DragStart {
                fragment,
                selection,
                source,
            } => self.drag_start(fragment, selection, source),
            Gesture::Drag {
                fragment,
                selection,
                source,
            } => self.drag(fragment, selection, source),
            Gesture::DragEnd {
                fragment,
                selection,
                source,
            } => self.drag_end(fragment, selection, source),
            Gesture::ZoomStart { fragment, source } => self.zoom_start(fragment, source),
            Gesture::Zoom {
                fragment,
                transform,
                source,
            } => self.zoom(fragment, transform, source),
            Gesture::ZoomEnd { fragment, source } => self.zoom_end(fragment, source),
        }
    }

    /// Begin dragging a brush and make it the active fragment.
    pub fn drag_start(
        &mut self,
        id: FragmentId,
        selection: Option<Selection>,
        source: GestureSource,
    ) -> bool {
        if !self.accepts_drag(id, source) {
            return false;
        }
        if !self.lifecycle.begin(&self.store, id, selection) {
            return false;
        }
        self.active = Some(id);
        self.recompute();
        true
    }

    /// Move a brush, clamped so it cannot overlap any other brush.
    pub fn drag(&mut self, id: FragmentId, selection: Option<Selection>, source: GestureSource) -> bool {
        if !self.accepts_drag(id, source) {
            return false;
        }
        match self.lifecycle.step(&mut self.store, &self.master, id, selection) {
            DragOutcome::Applied(applied) => {
                if selection != Some(applied) {
                    self.move_brush(id, Some(applied));
                }
                self.recompute();
                true
            }
            DragOutcome::Rejected { retained } => {
                self.move_brush(id, retained);
                false
            }
            DragOutcome::Ignored => false,
        }
    }

    /// Finish a drag; may spawn a new brush or drop a collapsed one.
    pub fn drag_end(
        &mut self,
        id: FragmentId,
        selection: Option<Selection>,
        source: GestureSource,
    ) -> bool {
        if !self.accepts_drag(id, source) {
            return false;
        }
        let outcome = self.lifecycle.end(&mut self.store, &self.master, id, selection);
        if selection.is_some() && outcome.selection != selection {
            self.move_brush(id, outcome.selection);
        }
        self.recompute();
        outcome.selection.is_some() || outcome.spawned.is_some()
    }

    /// Enter the zooming phase on a panel.
    pub fn zoom_start(&mut self, id: FragmentId, source: GestureSource) -> bool {
        if !self.accepts_zoom(id, source) {
            return false;
        }
        self.viewports.begin(id)
    }

    /// Pan or zoom a panel. The revealed domain is clamped against the
    /// neighbouring fragments and pushed back into the brush.
    pub fn zoom(
        &mut self,
        id: FragmentId,
        transform: Option<ZoomTransform>,
        source: GestureSource,
    ) -> bool {
        if !self.accepts_zoom(id, source) {
            return false;
        }
        let Some(transform) = transform else {
            trace!(%id, "zoom without transform");
            return false;
        };
        match self.viewports.zoom(&mut self.store, &self.master, id, transform) {
            ZoomOutcome::Applied { selection, .. } => {
                self.active = Some(id);
                self.move_brush(id, Some(selection));
                self.recompute();
                true
            }
            ZoomOutcome::Rejected(reason) => {
                debug!(%id, ?reason, "zoom step rejected");
                false
            }
        }
    }

    /// Leave the zooming phase on a panel.
    pub fn zoom_end(&mut self, id: FragmentId, source: GestureSource) -> bool {
        if source == GestureSource::Brush {
            return false;
        }
        let was_zooming = self.viewports.is_zooming(id);
        self.viewports.end(id);
        was_zooming
    }

    fn accepts_drag(&self, id: FragmentId, source: GestureSource) -> bool {
        if source != GestureSource::User {
            trace!(%id, ?source, "drag event not from user input");
            return false;
        }
        if self.viewports.is_zooming(id) {
            debug!(%id, "drag ignored while panel is zooming");
            return false;
        }
        true
    }

    fn accepts_zoom(&self, id: FragmentId, source: GestureSource) -> bool {
        if source == GestureSource::Brush {
            trace!(%id, "zoom event produced by a brush");
            return false;
        }
        if self.lifecycle.dragging() == Some(id) {
            debug!(%id, "zoom ignored while brush is dragged");
            return false;
        }
        true
    }

    fn move_brush(&mut self, id: FragmentId, selection: Option<Selection>) {
        self.adapter.apply(RenderCommand::MoveBrush { id, selection });
    }

    fn brush_views(&self) -> Vec<BrushView> {
        let newest = self.newest();
        self.store
            .iter()
            .map(|fragment| BrushView {
                id: fragment.id(),
                selection: fragment.selection(),
                highlighted: self.active == Some(fragment.id()),
                accepts_new_selection: newest == Some(fragment.id()),
            })
            .collect()
    }

    /// Run the update pipeline and publish the new view.
    fn recompute(&mut self) {
        let removed = self.lifecycle.collect_garbage(&mut self.store);
        if self.active.is_some_and(|id| removed.contains(&id)) {
            self.active = None;
        }
        self.lifecycle.ensure_extendable(&mut self.store);

        let layout = layout_panels(&self.store, &self.config);
        self.viewports.sync(&layout);

        let features = project(
            &layout,
            &self.features,
            &self.lanes,
            self.config.margins.interval_bar,
            self.ids.as_mut(),
        );

        let view = EngineView {
            brushes: self.brush_views(),
            clip: layout.clip(),
            layout,
            features,
            active: self.active,
        };
        let commands = diff_views(&self.view, &view, self.config.draw_connections);
        trace!(
            panels = view.layout.panels.len(),
            intervals = view.features.intervals.len(),
            commands = commands.len(),
            "published view"
        );
        self.adapter.apply_all(commands);
        self.view = view;
    }
}
