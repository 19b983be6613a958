use std::collections::BTreeMap;

use tracing::warn;

use super::{BrushView, RenderAdapter, RenderCommand};
use crate::features::{RenderId, VisibleConnection, VisibleInterval};
use crate::fragment::FragmentId;
use crate::layout::{ClipRect, Panel};

/// Retained scene graph mirroring what a real renderer would hold.
///
/// Commands that address missing elements are logged and dropped.
#[derive(Debug, Default, Clone)]
pub struct SceneAdapter {
    /// Brush widgets by fragment.
    pub brushes: BTreeMap<FragmentId, BrushView>,
    /// Panels by fragment.
    pub panels: BTreeMap<FragmentId, Panel>,
    /// Interval bars by render id.
    pub shapes: BTreeMap<RenderId, VisibleInterval>,
    /// Connection paths by render id.
    pub paths: BTreeMap<RenderId, VisibleConnection>,
    /// Current clip region.
    pub clip: Option<ClipRect>,
    /// Number of commands applied.
    pub applied: usize,
}

impl SceneAdapter {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragments whose panels are on screen, left to right.
    pub fn panel_order(&self) -> Vec<FragmentId> {
        let mut panels: Vec<&Panel> = self.panels.values().collect();
        panels.sort_by_key(|p| p.index);
        panels.into_iter().map(|p| p.fragment).collect()
    }
}

impl RenderAdapter for SceneAdapter {
    fn apply(&mut self, command: RenderCommand) {
        self.applied += 1;
        match command {
            RenderCommand::CreateBrush(brush) => {
                self.brushes.insert(brush.id, brush);
            }
            RenderCommand::UpdateBrush(brush) => match self.brushes.get_mut(&brush.id) {
                Some(existing) => *existing = brush,
                None => warn!(id = %brush.id, "update for unknown brush"),
            },
            RenderCommand::DestroyBrush(id) => {
                if self.brushes.remove(&id).is_none() {
                    warn!(%id, "destroy for unknown brush");
                }
            }
            RenderCommand::MoveBrush { id, selection } => match self.brushes.get_mut(&id) {
                Some(existing) => existing.selection = selection,
                None => warn!(%id, "move for unknown brush"),
            },
            RenderCommand::SetClip(clip) => self.clip = clip,
            RenderCommand::CreatePanel(panel) => {
                self.panels.insert(panel.fragment, panel);
            }
            RenderCommand::UpdatePanel(panel) => match self.panels.get_mut(&panel.fragment) {
                Some(existing) => *existing = panel,
                None => warn!(id = %panel.fragment, "update for unknown panel"),
            },
            RenderCommand::RemovePanel(id) => {
                if self.panels.remove(&id).is_none() {
                    warn!(%id, "remove for unknown panel");
                }
            }
            RenderCommand::DrawInterval(interval) => {
                self.shapes.insert(interval.identifier.clone(), interval);
            }
            RenderCommand::EraseInterval(id) => {
                self.shapes.remove(&id);
            }
            RenderCommand::DrawConnection(connection) => {
                self.paths.insert(connection.identifier.clone(), connection);
            }
            RenderCommand::EraseConnection(id) => {
                self.paths.remove(&id);
            }
        }
    }
}
