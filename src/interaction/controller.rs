use crate::foundation::core::{Bounds, Canvas, Point};
use crate::foundation::math::sanitize_zoom;
use crate::interaction::gesture::{Commit, Gesture, GestureStart, Modifiers, Readout, RejectReason};
use crate::layout::resize::{ResizeHandle, ResizeOpts, apply_resize};
use crate::layout::snap::{Guides, Sibling, SnapOpts, snap_rect};
use crate::scene::element::{Element, ElementId};
use crate::scene::transform::{TransformPatch, TransformStore};

/// Stage state a pointer move is resolved against.
#[derive(Clone, Copy, Debug)]
pub struct Stage<'a> {
    /// Canvas size in canvas units.
    pub canvas: Canvas,
    /// Display zoom; pointer deltas are divided by it.
    pub zoom: f64,
    /// Snapping options.
    pub snap: &'a SnapOpts,
    /// Current projection, used for snap siblings.
    pub elements: &'a [Element],
}

/// Pointer state machine: `Idle`, `Dragging` or `Resizing`.
///
/// The controller owns no geometry. Every move is resolved against the caller's [`Stage`] and
/// written straight into the caller's [`TransformStore`], so the store always reflects the
/// live rectangle.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    gesture: Gesture,
    live: Option<Bounds>,
    guides: Guides,
    readout: Option<Readout>,
}

impl InteractionController {
    /// Idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Guide lines of the latest drag move.
    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    /// Rounded live rectangle, while a gesture is active.
    pub fn readout(&self) -> Option<Readout> {
        self.readout
    }

    /// Start moving `id` from pointer position `pointer`.
    pub fn begin_drag(
        &mut self,
        elements: &[Element],
        id: &ElementId,
        pointer: Point,
    ) -> Result<(), RejectReason> {
        let start = self.guard(elements, id, pointer)?;
        tracing::debug!(element = %id, x = start.bounds.x, y = start.bounds.y, "drag begin");
        self.gesture = Gesture::Dragging {
            element_id: id.clone(),
            start,
        };
        self.readout = Some(start.bounds.into());
        Ok(())
    }

    /// Start resizing `id` from `handle`.
    pub fn begin_resize(
        &mut self,
        elements: &[Element],
        id: &ElementId,
        handle: ResizeHandle,
        pointer: Point,
    ) -> Result<(), RejectReason> {
        let start = self.guard(elements, id, pointer)?;
        tracing::debug!(element = %id, %handle, "resize begin");
        self.gesture = Gesture::Resizing {
            element_id: id.clone(),
            handle,
            start,
        };
        self.readout = Some(start.bounds.into());
        Ok(())
    }

    fn guard(
        &self,
        elements: &[Element],
        id: &ElementId,
        pointer: Point,
    ) -> Result<GestureStart, RejectReason> {
        let reject = |reason: RejectReason| {
            tracing::debug!(element = %id, %reason, "gesture rejected");
            Err(reason)
        };
        if self.gesture.is_active() {
            return reject(RejectReason::GestureActive);
        }
        let Some(element) = elements.iter().find(|e| &e.id == id) else {
            return reject(RejectReason::UnknownElement);
        };
        if element.fills_canvas() {
            return reject(RejectReason::FillsCanvas);
        }
        if element.locked {
            return reject(RejectReason::Locked);
        }
        Ok(GestureStart {
            pointer,
            bounds: element.bounds,
        })
    }

    /// Resolve a pointer move and write the result into `store`.
    ///
    /// Returns the live rectangle, or `None` when idle. A non-finite pointer is ignored and
    /// the last live rectangle returned.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        modifiers: Modifiers,
        stage: &Stage<'_>,
        store: &mut TransformStore,
    ) -> Option<Bounds> {
        if !(pointer.x.is_finite() && pointer.y.is_finite()) {
            tracing::debug!(x = pointer.x, y = pointer.y, "non-finite pointer ignored");
            return self.live.or_else(|| self.gesture.start().map(|s| s.bounds));
        }
        let zoom = sanitize_zoom(stage.zoom);
        let next = match &self.gesture {
            Gesture::Idle => return None,
            Gesture::Dragging { element_id, start } => {
                let delta = (pointer - start.pointer) / zoom;
                let candidate = start.bounds.translate(delta);
                let (bounds, guides) = if stage.snap.enabled && !modifiers.bypass_snap {
                    let siblings: Vec<Sibling> = stage
                        .elements
                        .iter()
                        .filter(|e| &e.id != element_id && !e.fills_canvas())
                        .map(|e| Sibling {
                            bounds: e.bounds,
                            visible: e.visible,
                        })
                        .collect();
                    let snapped = snap_rect(candidate, stage.canvas, &siblings, stage.snap);
                    (snapped.bounds, snapped.guides)
                } else {
                    (candidate.clamp_into(stage.canvas), Guides::default())
                };
                store.set(element_id, &TransformPatch::position(bounds.x, bounds.y));
                self.guides = guides;
                tracing::trace!(element = %element_id, x = bounds.x, y = bounds.y, "drag");
                bounds
            }
            Gesture::Resizing {
                element_id,
                handle,
                start,
            } => {
                let delta = (pointer - start.pointer) / zoom;
                let opts = ResizeOpts {
                    keep_aspect: modifiers.keep_aspect,
                    ..ResizeOpts::default()
                };
                let bounds = apply_resize(start.bounds, *handle, delta, stage.canvas, &opts);
                store.set(element_id, &TransformPatch::bounds(bounds));
                self.guides.clear();
                tracing::trace!(
                    element = %element_id,
                    w = bounds.width,
                    h = bounds.height,
                    "resize"
                );
                bounds
            }
        };
        self.live = Some(next);
        self.readout = Some(next.into());
        Some(next)
    }

    /// Finish the gesture (pointer released).
    pub fn pointer_up(&mut self) -> Option<Commit> {
        let commit = self.finish()?;
        tracing::debug!(element = %commit.element_id, kind = ?commit.kind, "gesture commit");
        Some(commit)
    }

    /// Pointer left the stage; treated like a release.
    pub fn pointer_leave(&mut self) -> Option<Commit> {
        self.pointer_up()
    }

    /// Abort the gesture and put the element back where it started. Nothing is committed.
    pub fn cancel(&mut self, store: &mut TransformStore) -> Option<ElementId> {
        let start = self.gesture.start()?;
        let commit = self.finish()?;
        store.set(&commit.element_id, &TransformPatch::bounds(start.bounds));
        tracing::debug!(element = %commit.element_id, "gesture cancelled");
        Some(commit.element_id)
    }

    fn finish(&mut self) -> Option<Commit> {
        let gesture = std::mem::take(&mut self.gesture);
        let live = self.live.take();
        self.guides.clear();
        self.readout = None;

        let kind = gesture.kind()?;
        let start = gesture.start()?;
        let element_id = match gesture {
            Gesture::Dragging { element_id, .. } | Gesture::Resizing { element_id, .. } => {
                element_id
            }
            Gesture::Idle => return None,
        };
        Some(Commit {
            element_id,
            kind,
            before: start.bounds,
            after: live.unwrap_or(start.bounds),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
