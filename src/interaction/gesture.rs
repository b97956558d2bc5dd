use serde::Serialize;

use crate::foundation::core::{Bounds, Point};
use crate::layout::resize::ResizeHandle;
use crate::scene::element::ElementId;

/// Pointer position and element rectangle captured when a gesture begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureStart {
    /// Pointer position in screen units.
    pub pointer: Point,
    /// Element rectangle in canvas units.
    pub bounds: Bounds,
}

/// Pointer gesture state. At most one gesture is active at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an element.
    Dragging {
        /// Element being moved.
        element_id: ElementId,
        /// Snapshot taken on pointer down.
        start: GestureStart,
    },
    /// Resizing an element from one handle.
    Resizing {
        /// Element being resized.
        element_id: ElementId,
        /// Handle under the pointer.
        handle: ResizeHandle,
        /// Snapshot taken on pointer down.
        start: GestureStart,
    },
}

impl Gesture {
    /// `true` unless idle.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Element under manipulation.
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { element_id, .. } | Self::Resizing { element_id, .. } => {
                Some(element_id)
            }
        }
    }

    /// Start snapshot of the active gesture.
    pub fn start(&self) -> Option<GestureStart> {
        match self {
            Self::Idle => None,
            Self::Dragging { start, .. } | Self::Resizing { start, .. } => Some(*start),
        }
    }

    /// Kind of the active gesture.
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Dragging { .. } => Some(GestureKind::Drag),
            Self::Resizing { .. } => Some(GestureKind::Resize),
        }
    }
}

/// What a finished gesture did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Position change.
    Drag,
    /// Position and size change.
    Resize,
}

impl GestureKind {
    /// History label for a gesture of this kind.
    pub fn label(self) -> &'static str {
        match self {
            Self::Drag => "move element",
            Self::Resize => "resize element",
        }
    }
}

/// Why a gesture did not begin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    /// The element is locked.
    #[error("element is locked")]
    Locked,
    /// Background and primary elements always cover the canvas.
    #[error("element fills the canvas")]
    FillsCanvas,
    /// Another gesture is still in progress.
    #[error("another gesture is active")]
    GestureActive,
    /// No element with that id is on the stage.
    #[error("unknown element")]
    UnknownElement,
}

/// Keyboard modifiers sampled with each pointer move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Move freely for this event even when snapping is on.
    pub bypass_snap: bool,
    /// Lock the aspect ratio while resizing.
    pub keep_aspect: bool,
}

/// Rounded live geometry shown next to the element while it is manipulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width.
    pub width: i64,
    /// Height.
    pub height: i64,
}

impl From<Bounds> for Readout {
    fn from(b: Bounds) -> Self {
        let r = b.rounded();
        Self {
            x: r.x as i64,
            y: r.y as i64,
            width: r.width as i64,
            height: r.height as i64,
        }
    }
}

/// Outcome of a finished gesture; the caller records exactly one history entry for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    /// Element that was manipulated.
    pub element_id: ElementId,
    /// Gesture kind.
    pub kind: GestureKind,
    /// Rectangle before the gesture.
    pub before: Bounds,
    /// Rectangle after the gesture.
    pub after: Bounds,
}

impl Commit {
    /// `true` when the gesture moved or resized anything.
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}
