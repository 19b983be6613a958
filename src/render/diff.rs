use std::collections::{HashMap, HashSet};

use super::{EngineView, RenderCommand};

/// Commands that turn a renderer showing `previous` into one showing `next`.
///
/// Brushes and panels are keyed by fragment id, interval bars and connection
/// paths by render id. Within each kind, creations and updates come first in
/// `next` order, followed by removals. Connections are only emitted when
/// `draw_connections` is set.
pub fn diff_views(
    previous: &EngineView,
    next: &EngineView,
    draw_connections: bool,
) -> Vec<RenderCommand> {
    let mut commands = Vec::new();

    if previous.clip != next.clip {
        commands.push(RenderCommand::SetClip(next.clip));
    }

    let old_brushes: HashMap<_, _> = previous.brushes.iter().map(|b| (b.id, b)).collect();
    for brush in &next.brushes {
        match old_brushes.get(&brush.id) {
            None => commands.push(RenderCommand::CreateBrush(*brush)),
            Some(old) if *old != brush => commands.push(RenderCommand::UpdateBrush(*brush)),
            Some(_) => {}
        }
    }
    let live_brushes: HashSet<_> = next.brushes.iter().map(|b| b.id).collect();
    for brush in &previous.brushes {
        if !live_brushes.contains(&brush.id) {
            commands.push(RenderCommand::DestroyBrush(brush.id));
        }
    }

    let old_panels: HashMap<_, _> = previous
        .panels()
        .iter()
        .map(|p| (p.fragment, p))
        .collect();
    for panel in next.panels() {
        match old_panels.get(&panel.fragment) {
            None => commands.push(RenderCommand::CreatePanel(panel.clone())),
            Some(old) if *old != panel => commands.push(RenderCommand::UpdatePanel(panel.clone())),
            Some(_) => {}
        }
    }
    let live_panels: HashSet<_> = next.panels().iter().map(|p| p.fragment).collect();
    for panel in previous.panels() {
        if !live_panels.contains(&panel.fragment) {
            commands.push(RenderCommand::RemovePanel(panel.fragment));
        }
    }

    let old_shapes: HashSet<_> = previous
        .features
        .intervals
        .iter()
        .map(|i| &i.identifier)
        .collect();
    for interval in &next.features.intervals {
        if !old_shapes.contains(&interval.identifier) {
            commands.push(RenderCommand::DrawInterval(interval.clone()));
        }
    }
    let live_shapes: HashSet<_> = next.features.intervals.iter().map(|i| &i.identifier).collect();
    for interval in &previous.features.intervals {
        if !live_shapes.contains(&interval.identifier) {
            commands.push(RenderCommand::EraseInterval(interval.identifier.clone()));
        }
    }

    if draw_connections {
        let old_paths: HashSet<_> = previous
            .features
            .connections
            .iter()
            .map(|c| &c.identifier)
            .collect();
        for connection in &next.features.connections {
            if !old_paths.contains(&connection.identifier) {
                commands.push(RenderCommand::DrawConnection(connection.clone()));
            }
        }
        let live_paths: HashSet<_> = next
            .features
            .connections
            .iter()
            .map(|c| &c.identifier)
            .collect();
        for connection in &previous.features.connections {
            if !live_paths.contains(&connection.identifier) {
                commands.push(RenderCommand::EraseConnection(connection.identifier.clone()));
            }
        }
    }

    commands
}
