use serde::{Deserialize, Serialize};

use crate::fragment::{FragmentId, Selection};
use crate::scale::ZoomTransform;

/// What produced a gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureSource {
    /// Direct pointer, touch or wheel input.
    #[default]
    User,
    /// A brush widget reacting to being moved programmatically.
    Brush,
    /// A zoom behaviour reacting to a transform change.
    Zoom,
    /// Host-issued event with no underlying input.
    Synthetic,
}

/// One input event addressed to a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    /// A brush drag begins.
    DragStart {
        /// Brush being dragged.
        fragment: FragmentId,
        /// Brush selection at the start of the drag.
        #[serde(default)]
        selection: Option<Selection>,
        /// Event origin.
        #[serde(default)]
        source: GestureSource,
    },
    /// A brush drag moves.
    Drag {
        /// Brush being dragged.
        fragment: FragmentId,
        /// Selection the widget reports; `None` for a click without drag.
        #[serde(default)]
        selection: Option<Selection>,
        /// Event origin.
        #[serde(default)]
        source: GestureSource,
    },
    /// A brush drag ends.
    DragEnd {
        /// Brush being dragged.
        fragment: FragmentId,
        /// Final selection the widget reports.
        #[serde(default)]
        selection: Option<Selection>,
        /// Event origin.
        #[serde(default)]
        source: GestureSource,
    },
    /// A pan/zoom gesture begins on a panel.
    ZoomStart {
        /// Fragment whose panel is zoomed.
        fragment: FragmentId,
        /// Event origin.
        #[serde(default)]
        source: GestureSource,
    },
    /// A pan/zoom gesture moves.
    Zoom {
        /// Fragment whose panel is zoomed.
        fragment: FragmentId,
        /// New transform of the master scale; `None` cancels the step.
        #[serde(default)]
        transform: Option<ZoomTransform>,
        /// Event origin.
        #[serde(default)]
        source: GestureSource,
    },
    /// A pan/zoom gesture ends.
    ZoomEnd {
        /// Fragment whose panel is zoomed.
        fragment: FragmentId,
        /// Event origin.
        #[serde(default)]
        source: GestureSource,
    },
}

impl Gesture {
    /// Fragment the gesture is addressed to.
    pub fn fragment(&self) -> FragmentId {
        match *self {
            Gesture::DragStart { fragment, .. }
            | Gesture::Drag { fragment, .. }
            | Gesture::DragEnd { fragment, .. }
            | Gesture::ZoomStart { fragment, .. }
            | Gesture::Zoom { fragment, .. }
            | Gesture::ZoomEnd { fragment, .. } => fragment,
        }
    }

    /// Event origin.
    pub fn source(&self) -> GestureSource {
        match *self {
            Gesture::DragStart { source, .. }
            | Gesture::Drag { source, .. }
            | Gesture::DragEnd { source, .. }
            | Gesture::ZoomStart { source, .. }
            | Gesture::Zoom { source, .. }
            | Gesture::ZoomEnd { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_script_entries() {
        let json = r#"[
            {"kind": "drag_start", "fragment": 1, "selection": {"lo": 10, "hi": 10}},
            {"kind": "drag", "fragment": 1, "selection": {"lo": 10, "hi": 40}},
            {"kind": "zoom", "fragment": 1, "transform": {"k": 2, "x": -10}, "source": "brush"}
        ]"#;
        let gestures: Vec<Gesture> = serde_json::from_str(json).expect("script parses");
        assert_eq!(gestures.len(), 3);
        assert!(matches!(gestures[1], Gesture::Drag { selection: Some(_), .. }));
        assert_eq!(gestures[1].source(), GestureSource::User);
        assert_eq!(gestures[2].source(), GestureSource::Brush);
        assert_eq!(gestures[2].fragment(), FragmentId(1));
    }
}
