//! Contract between the engine and whatever draws it
//!
//! The engine never draws. After each update it diffs the previous and the
//! new [`EngineView`] and hands the adapter keyed create/update/destroy
//! commands; brush moves requested by the engine itself (clamping, zoom
//! write-back) are sent as [`RenderCommand::MoveBrush`].

mod diff;
mod scene;
mod view;

pub use diff::diff_views;
pub use scene::SceneAdapter;
pub use view::{BrushView, EngineView};

use crate::features::{RenderId, VisibleConnection, VisibleInterval};
use crate::fragment::{FragmentId, Selection};
use crate::layout::{ClipRect, Panel};

/// One instruction for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Create an interactive brush bound to a fragment.
    CreateBrush(BrushView),
    /// Restyle an existing brush.
    UpdateBrush(BrushView),
    /// Remove a brush.
    DestroyBrush(FragmentId),
    /// Move a brush widget programmatically. Widgets must not report this
    /// back as user input.
    MoveBrush {
        /// Brush to move.
        id: FragmentId,
        /// Target selection; `None` clears it.
        selection: Option<Selection>,
    },
    /// Set or clear the clip region.
    SetClip(Option<ClipRect>),
    /// Create a panel with its zoom behaviour and axis.
    CreatePanel(Panel),
    /// Reposition a panel, reset its zoom transform and redraw its axis.
    UpdatePanel(Panel),
    /// Remove a panel.
    RemovePanel(FragmentId),
    /// Draw an interval bar.
    DrawInterval(VisibleInterval),
    /// Remove an interval bar.
    EraseInterval(RenderId),
    /// Draw a connection path.
    DrawConnection(VisibleConnection),
    /// Remove a connection path.
    EraseConnection(RenderId),
}

/// Receiver of render commands.
pub trait RenderAdapter {
    /// Execute one command.
    fn apply(&mut self, command: RenderCommand);

    /// Execute commands in order.
    fn apply_all(&mut self, commands: Vec<RenderCommand>) {
        for command in commands {
            self.apply(command);
        }
    }
}

/// Adapter that keeps every command it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingAdapter {
    commands: Vec<RenderCommand>,
}

impl RecordingAdapter {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Remove and return everything recorded.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Programmatic brush moves received so far.
    pub fn brush_moves(&self) -> Vec<(FragmentId, Option<Selection>)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::MoveBrush { id, selection } => Some((*id, *selection)),
                _ => None,
            })
            .collect()
    }
}

impl RenderAdapter for RecordingAdapter {
    fn apply(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }
}
