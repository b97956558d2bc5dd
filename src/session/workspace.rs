use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::eval::playback::Playback;
use crate::eval::timeline::{
    DEFAULT_CLIP_SECS, DEFAULT_COMPOSITION_SECS, TimelineBar, append_placement, grown_duration,
    timeline_bars, trim_end, trim_start,
};
use crate::eval::visibility::{TimeWindow, visible_at};
use crate::foundation::core::{Bounds, Canvas, DEFAULT_FORMAT_ID, Point, VideoFormat};
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::math::sanitize_zoom;
use crate::history::ledger::{DEFAULT_HISTORY_DEPTH, HistoryLedger, Snapshot};
use crate::interaction::controller::{InteractionController, Stage};
use crate::interaction::gesture::{Commit, Modifiers, Readout, RejectReason};
use crate::layout::resize::ResizeHandle;
use crate::layout::snap::{Guides, SnapOpts};
use crate::scene::element::{Element, ElementId, project};
use crate::scene::record::CompositionRecord;
use crate::scene::role::{ElementKind, Role};
use crate::scene::selection::{SelectionItem, Selections, SourceRef};
use crate::scene::transform::{Transform, TransformPatch, TransformStore};

/// Options for a [`Workspace`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceOpts {
    /// Output format preset id.
    pub format: String,
    /// Initial display zoom.
    pub zoom: f64,
    /// Snapping options.
    pub snap: SnapOpts,
    /// Maximum number of undo entries.
    pub history_depth: usize,
    /// Clip length for new elements whose source has no duration, in seconds.
    pub default_clip_secs: f64,
    /// Initial composition length in seconds.
    pub duration: f64,
}

impl Default for WorkspaceOpts {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT_ID.to_owned(),
            zoom: 1.0,
            snap: SnapOpts::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
            default_clip_secs: DEFAULT_CLIP_SECS,
            duration: DEFAULT_COMPOSITION_SECS,
        }
    }
}

impl WorkspaceOpts {
    /// Parse options from a JSON string; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> ComposerResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ComposerError::serde(format!("parse workspace options: {e}")))
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ComposerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ComposerError::validation(format!("open workspace options '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ComposerError::serde(format!("parse workspace options: {e}")))
    }
}

/// Editing session over one composition.
///
/// Owns the transform store, the selection lists and every piece of editor state around them.
/// All mutations go through here so each committed action leaves exactly one history entry and
/// undo restores transforms and selections together.
#[derive(Clone, Debug)]
pub struct Workspace {
    store: TransformStore,
    selections: Selections,
    format: VideoFormat,
    zoom: f64,
    snap: SnapOpts,
    default_clip_secs: f64,
    controller: InteractionController,
    ledger: HistoryLedger,
    playback: Playback,
    record: CompositionRecord,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(WorkspaceOpts::default())
    }
}

impl Workspace {
    /// Empty workspace.
    #[tracing::instrument(skip_all, fields(format = %opts.format))]
    pub fn new(opts: WorkspaceOpts) -> Self {
        let format = VideoFormat::preset_or_default(&opts.format);
        Self::build(
            opts,
            format,
            Selections::new(),
            TransformStore::new(),
            CompositionRecord::default(),
        )
    }

    /// Workspace editing a persisted composition. The record's format wins over `opts.format`.
    #[tracing::instrument(skip_all, fields(
        scenes = record.scenes.len(),
        assets = record.assets.len(),
        wardrobes = record.wardrobes.len(),
    ))]
    pub fn from_record(record: CompositionRecord, opts: WorkspaceOpts) -> Self {
        let format = record.format();
        let selections = record.selections();
        let store = record.layer_transforms.clone();
        Self::build(opts, format, selections, store, record)
    }

    fn build(
        opts: WorkspaceOpts,
        format: VideoFormat,
        selections: Selections,
        store: TransformStore,
        record: CompositionRecord,
    ) -> Self {
        let mut ws = Self {
            store,
            selections,
            format,
            zoom: sanitize_zoom(opts.zoom),
            snap: opts.snap,
            default_clip_secs: opts.default_clip_secs,
            controller: InteractionController::new(),
            ledger: HistoryLedger::new(opts.history_depth),
            playback: Playback::new(opts.duration),
            record,
        };
        let latest_end = ws
            .elements()
            .iter()
            .filter_map(|e| e.window.end)
            .fold(0.0, f64::max);
        ws.playback
            .set_duration(grown_duration(ws.playback.duration, latest_end));
        ws.commit("open composition");
        tracing::debug!(
            elements = ws.selections.len(),
            canvas_w = ws.canvas().width,
            canvas_h = ws.canvas().height,
            "workspace ready"
        );
        ws
    }

    fn commit(&mut self, label: &str) {
        self.ledger.push(
            label,
            Snapshot {
                transforms: self.store.clone(),
                selections: self.selections.clone(),
            },
        );
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.store = snapshot.transforms;
        self.selections = snapshot.selections;
    }

    /// Paint-ordered elements.
    pub fn elements(&self) -> Vec<Element> {
        project(&self.selections, &self.store, self.canvas())
    }

    /// One element of the current projection.
    pub fn element(&self, id: &ElementId) -> Option<Element> {
        self.elements().into_iter().find(|e| &e.id == id)
    }

    /// Selection lists.
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Transform store.
    pub fn store(&self) -> &TransformStore {
        &self.store
    }

    /// Output format.
    pub fn format(&self) -> &VideoFormat {
        &self.format
    }

    /// Canvas derived from the output format.
    pub fn canvas(&self) -> Canvas {
        Canvas::for_format(&self.format)
    }

    /// On-screen canvas size at the current zoom.
    pub fn display_size(&self) -> (f64, f64) {
        self.canvas().display_size(self.zoom)
    }

    /// Switch the output format. Stored geometry is kept as is.
    pub fn set_format(&mut self, format: VideoFormat) {
        tracing::debug!(format = %format.id, w = format.width, h = format.height, "format change");
        self.format = format;
    }

    /// Display zoom.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the display zoom; non-positive or non-finite values reset it to 1.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = sanitize_zoom(zoom);
    }

    /// Snapping options.
    pub fn snap_opts(&self) -> &SnapOpts {
        &self.snap
    }

    /// Turn snapping on or off globally.
    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap.enabled = enabled;
    }

    /// Add a scene; its clip length follows the scene duration when known.
    pub fn add_scene(&mut self, source: SourceRef, role: Role) -> Option<ElementId> {
        self.add(ElementKind::Scene, source, role)
    }

    /// Add an asset.
    pub fn add_asset(&mut self, source: SourceRef, role: Role) -> Option<ElementId> {
        self.add(ElementKind::Asset, source, role)
    }

    /// Add a wardrobe item.
    pub fn add_wardrobe(&mut self, source: SourceRef, role: Role) -> Option<ElementId> {
        self.add(ElementKind::Wardrobe, source, role)
    }

    fn add(&mut self, kind: ElementKind, source: SourceRef, role: Role) -> Option<ElementId> {
        let existing = self.elements();
        let clip_secs = match kind {
            ElementKind::Scene => source.duration_seconds.unwrap_or(self.default_clip_secs),
            ElementKind::Asset | ElementKind::Wardrobe => self.default_clip_secs,
        };
        let placement = append_placement(&existing, clip_secs);

        let id = ElementId::new(kind, &source.id);
        let z = role.default_z(kind);
        if !self.selections.push(kind, SelectionItem::new(source, role)) {
            tracing::debug!(element = %id, "already selected");
            return None;
        }

        let mut t = self
            .element(&id)
            .map(|e| e.materialized_transform())
            .unwrap_or_default();
        t.z_index = Some(z);
        t.track = placement.track;
        t.visible = true;
        t.set_window(placement.window);
        self.store.insert(id.clone(), t);

        let end = placement.window.end_secs();
        self.playback
            .set_duration(grown_duration(self.playback.duration, end));
        tracing::debug!(element = %id, z, track = placement.track, end, "element added");
        self.commit(&format!("add {}", kind.prefix()));
        Some(id)
    }

    /// Remove an element from its list and drop its transform.
    pub fn remove_element(&mut self, id: &ElementId) -> bool {
        let Some((kind, source_id)) = id.parse() else {
            return false;
        };
        if self.selections.remove(kind, source_id).is_none() {
            return false;
        }
        self.store.delete(id);
        tracing::debug!(element = %id, "element removed");
        self.commit("delete element");
        true
    }

    /// Change the role of a selected element. Stored geometry and z-order are kept.
    pub fn change_role(&mut self, id: &ElementId, role: Role) -> bool {
        let Some((kind, source_id)) = id.parse() else {
            return false;
        };
        if !self.selections.set_role(kind, source_id, role) {
            return false;
        }
        self.commit("change role");
        true
    }

    /// Write the element's projected defaults into the store the first time it is touched.
    fn materialize(&mut self, id: &ElementId) -> Option<Element> {
        let element = self.element(id)?;
        if !self.store.contains(id) {
            tracing::debug!(element = %id, "materialize defaults");
            self.store.insert(id.clone(), element.materialized_transform());
        }
        Some(element)
    }

    fn edit(
        &mut self,
        id: &ElementId,
        label: &str,
        f: impl FnOnce(&Element, &mut Transform),
    ) -> bool {
        let Some(element) = self.materialize(id) else {
            return false;
        };
        self.store.update(id, |t| f(&element, t));
        self.commit(label);
        true
    }

    /// Raise the element one z step.
    pub fn bring_forward(&mut self, id: &ElementId) -> bool {
        self.edit(id, "bring forward", |e, t| t.z_index = Some(e.z_index + 1))
    }

    /// Lower the element one z step, never below 0.
    pub fn send_backward(&mut self, id: &ElementId) -> bool {
        self.edit(id, "send backward", |e, t| {
            t.z_index = Some((e.z_index - 1).max(0))
        })
    }

    /// Set opacity, clamped to `[0, 100]`.
    pub fn set_opacity(&mut self, id: &ElementId, opacity: f64) -> bool {
        let opacity = if opacity.is_nan() {
            100.0
        } else {
            opacity.clamp(0.0, 100.0)
        };
        self.edit(id, "opacity", |_, t| t.opacity = opacity)
    }

    /// Set rotation in degrees, clamped to `[-180, 180]`.
    pub fn set_rotation(&mut self, id: &ElementId, degrees: f64) -> bool {
        let degrees = if degrees.is_nan() {
            0.0
        } else {
            degrees.clamp(-180.0, 180.0)
        };
        self.edit(id, "rotation", |_, t| t.rotation = degrees)
    }

    /// Show or hide the element.
    pub fn set_visible(&mut self, id: &ElementId, visible: bool) -> bool {
        self.edit(id, "visibility", |_, t| t.visible = visible)
    }

    /// Lock or unlock the element.
    pub fn set_locked(&mut self, id: &ElementId, locked: bool) -> bool {
        self.edit(id, "lock", |_, t| t.locked = locked)
    }

    /// Set the temporal window. A closed window with `end <= start` is repaired.
    pub fn set_time_window(&mut self, id: &ElementId, window: TimeWindow) -> bool {
        let window = match (window.start, window.end) {
            (Some(start), Some(end)) => TimeWindow::bounded(start, end),
            (Some(start), None) => TimeWindow {
                start: Some(start.max(0.0)),
                end: None,
            },
            _ => window,
        };
        self.edit(id, "time window", |_, t| t.set_window(window))
    }

    /// Drag the start of the element's clip by `delta` seconds.
    pub fn trim_clip_start(&mut self, id: &ElementId, delta: f64) -> bool {
        let duration = self.playback.duration;
        self.edit(id, "trim clip", |e, t| {
            t.set_window(trim_start(e.window, delta, duration))
        })
    }

    /// Drag the end of the element's clip by `delta` seconds.
    pub fn trim_clip_end(&mut self, id: &ElementId, delta: f64) -> bool {
        let duration = self.playback.duration;
        self.edit(id, "trim clip", |e, t| {
            t.set_window(trim_end(e.window, delta, duration))
        })
    }

    /// Apply an arbitrary patch to the element as one undoable edit.
    ///
    /// The patch is sanitized first (see [`TransformPatch::sanitized`]) and a closed window that
    /// ends up inverted is repaired.
    pub fn patch(&mut self, id: &ElementId, patch: &TransformPatch) -> bool {
        let patch = patch.sanitized();
        self.edit(id, "edit element", |_, t| {
            patch.apply(t);
            if let (Some(start), Some(end)) = (t.start_time, t.end_time) {
                t.set_window(TimeWindow::bounded(start, end));
            }
        })
    }

    /// Start dragging an element.
    pub fn begin_drag(&mut self, id: &ElementId, pointer: Point) -> Result<(), RejectReason> {
        let elements = self.elements();
        self.controller.begin_drag(&elements, id, pointer)?;
        self.materialize(id);
        Ok(())
    }

    /// Start resizing an element from `handle`.
    pub fn begin_resize(
        &mut self,
        id: &ElementId,
        handle: ResizeHandle,
        pointer: Point,
    ) -> Result<(), RejectReason> {
        let elements = self.elements();
        self.controller
            .begin_resize(&elements, id, handle, pointer)?;
        self.materialize(id);
        Ok(())
    }

    /// Feed a pointer move to the active gesture.
    pub fn pointer_move(&mut self, pointer: Point, modifiers: Modifiers) -> Option<Bounds> {
        let elements = self.elements();
        let stage = Stage {
            canvas: self.canvas(),
            zoom: self.zoom,
            snap: &self.snap,
            elements: &elements,
        };
        self.controller
            .pointer_move(pointer, modifiers, &stage, &mut self.store)
    }

    /// Release the pointer, committing the gesture to history.
    pub fn pointer_up(&mut self) -> Option<Commit> {
        let commit = self.controller.pointer_up()?;
        self.commit(commit.kind.label());
        Some(commit)
    }

    /// Pointer left the stage; commits like a release.
    pub fn pointer_leave(&mut self) -> Option<Commit> {
        let commit = self.controller.pointer_leave()?;
        self.commit(commit.kind.label());
        Some(commit)
    }

    /// Abort the active gesture, restoring the element. Nothing is recorded.
    pub fn cancel_gesture(&mut self) -> Option<ElementId> {
        self.controller.cancel(&mut self.store)
    }

    /// Guide lines of the active drag.
    pub fn guides(&self) -> &Guides {
        self.controller.guides()
    }

    /// Live numeric readout of the active gesture.
    pub fn readout(&self) -> Option<Readout> {
        self.controller.readout()
    }

    /// `true` while a drag or resize is in progress.
    pub fn gesture_active(&self) -> bool {
        self.controller.gesture().is_active()
    }

    /// Restore the previous committed state. An active gesture is cancelled first.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        match self.ledger.undo() {
            Some(entry) => {
                let snapshot = entry.snapshot.clone();
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply the next committed state.
    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        match self.ledger.redo() {
            Some(entry) => {
                let snapshot = entry.snapshot.clone();
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Position in the history ledger.
    pub fn history_cursor(&self) -> Option<usize> {
        self.ledger.cursor()
    }

    /// History ledger.
    pub fn history(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Elements shown at time `t`, in paint order.
    pub fn visible_at(&self, t: f64) -> Vec<Element> {
        visible_at(t, &self.elements())
    }

    /// Elements shown at the playhead.
    pub fn visible_now(&self) -> Vec<Element> {
        self.visible_at(self.playback.current_time)
    }

    /// One timeline bar per element.
    pub fn timeline_bars(&self) -> Vec<TimelineBar> {
        timeline_bars(&self.elements(), self.playback.duration)
    }

    /// Playback clock.
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Playback clock, mutable.
    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    /// Transform map as persisted JSON.
    pub fn transforms_json(&self) -> ComposerResult<String> {
        self.store.to_json_string()
    }

    /// Composition record carrying the current state, keeping untouched fields of the loaded
    /// record.
    pub fn to_record(&self) -> CompositionRecord {
        self.record
            .with_state(&self.selections, &self.store, &self.format)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/workspace.rs"]
mod tests;
