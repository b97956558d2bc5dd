//! Canvas composition engine for scene templates.
//!
//! The crate models the editing stage of a video composition: selected scenes, assets and
//! wardrobe items are projected into layered rectangles, dragged and resized with snapping and
//! alignment guides, scoped to time windows on a playback timeline, and versioned by
//! snapshot-based undo/redo.
//!
//! - Load a [`CompositionRecord`] (or start empty)
//! - Open a [`Workspace`] on it
//! - Feed pointer events, property edits and playback time; read back elements, guides and
//!   the updated transform map
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod eval;
pub(crate) mod history;
pub(crate) mod interaction;
pub(crate) mod layout;
pub(crate) mod scene;
pub(crate) mod session;

pub use crate::foundation::core::{
    Bounds, Canvas, DEFAULT_FORMAT_ID, MIN_ELEMENT_SIZE, Point, Rect, Vec2, VideoFormat,
};
pub use crate::foundation::error::{ComposerError, ComposerResult};

pub use crate::eval::playback::Playback;
pub use crate::eval::timeline::{
    DEFAULT_CLIP_SECS, DEFAULT_COMPOSITION_SECS, Placement, TimelineBar, append_placement,
    grown_duration, timeline_bars, trim_end, trim_start,
};
pub use crate::eval::visibility::{MIN_WINDOW_SECS, TimeWindow, visible_at};
pub use crate::history::ledger::{DEFAULT_HISTORY_DEPTH, HistoryEntry, HistoryLedger, Snapshot};
pub use crate::interaction::controller::{InteractionController, Stage};
pub use crate::interaction::gesture::{
    Commit, Gesture, GestureKind, GestureStart, Modifiers, Readout, RejectReason,
};
pub use crate::layout::geometry::{bounding_box, hit_test, percent_to_pixels, pixels_to_percent};
pub use crate::layout::resize::{ResizeHandle, ResizeOpts, apply_resize};
pub use crate::layout::snap::{
    DEFAULT_GRID, DEFAULT_SNAP_THRESHOLD, Guides, Sibling, SnapOpts, SnapResult, snap_rect,
};
pub use crate::scene::element::{Element, ElementId, default_layout, project};
pub use crate::scene::record::{
    AssetRow, CompositionRecord, RecordSettings, SceneRow, WardrobeRow,
};
pub use crate::scene::role::{ElementKind, Role};
pub use crate::scene::selection::{SelectionItem, Selections, SourceRef};
pub use crate::scene::transform::{Transform, TransformPatch, TransformStore};
pub use crate::session::workspace::{Workspace, WorkspaceOpts};
