use serde::Serialize;

use crate::features::ProjectedFeatures;
use crate::fragment::{FragmentId, Selection};
use crate::layout::{ClipRect, Panel, PanelLayout};

/// Presentation state of one brush widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrushView {
    /// Fragment the brush belongs to.
    pub id: FragmentId,
    /// Current selection, if any.
    pub selection: Option<Selection>,
    /// Drawn highlighted because it is the active fragment.
    pub highlighted: bool,
    /// Its overlay captures pointer input for starting a new selection.
    /// Only the most recently created brush does.
    pub accepts_new_selection: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineView {
    /// Brushes in creation order.
    pub brushes: Vec<BrushView>,
    /// Panel tiling.
    pub layout: PanelLayout,
    /// Clip region shared by all panels.
    pub clip: Option<ClipRect>,
    /// Features visible in the panels.
    pub features: ProjectedFeatures,
    /// Fragment being dragged or most recently zoomed.
    pub active: Option<FragmentId>,
}

impl EngineView {
    /// Visible panels, left to right.
    pub fn panels(&self) -> &[Panel] {
        &self.layout.panels
    }

    /// Brush of a fragment.
    pub fn brush(&self, id: FragmentId) -> Option<&BrushView> {
        self.brushes.iter().find(|b| b.id == id)
    }

    /// Number of brushes without a selection.
    pub fn empty_brushes(&self) -> usize {
        self.brushes.iter().filter(|b| b.selection.is_none()).count()
    }
}
