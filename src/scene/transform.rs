use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::eval::visibility::TimeWindow;
use crate::foundation::core::{Bounds, MIN_ELEMENT_SIZE};
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::scene::element::ElementId;

/// Persisted geometric, visual and temporal state of one element.
///
/// Field names match the `layer_transforms` JSON column. Missing fields deserialize to the
/// defaults below and unknown fields are carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transform {
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Opacity percentage in `[0, 100]`.
    pub opacity: f64,
    /// Explicit stacking order; `None` means "use the role default".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Hidden elements are skipped by playback and by snapping.
    pub visible: bool,
    /// Locked elements reject drag and resize.
    pub locked: bool,
    /// Window start in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    /// Window end in seconds (exclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    /// Timeline lane; no geometric effect.
    pub track: u32,
    /// Fields written by other tools, preserved on save.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 200.0,
            height: 150.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 100.0,
            z_index: None,
            visible: true,
            locked: false,
            start_time: None,
            end_time: None,
            track: 0,
            extra: serde_json::Map::new(),
        }
    }
}

impl Transform {
    /// Stored rectangle.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Overwrite position and size.
    pub fn set_bounds(&mut self, b: Bounds) {
        self.x = b.x;
        self.y = b.y;
        self.width = b.width;
        self.height = b.height;
    }

    /// Temporal window of this element.
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_time,
            end: self.end_time,
        }
    }

    /// Overwrite the temporal window.
    pub fn set_window(&mut self, w: TimeWindow) {
        self.start_time = w.start;
        self.end_time = w.end;
    }
}

/// Partial update merged into a [`Transform`] by [`TransformStore::set`].
///
/// Only `Some` fields are written; everything else keeps its current value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformPatch {
    /// New left edge.
    pub x: Option<f64>,
    /// New top edge.
    pub y: Option<f64>,
    /// New width.
    pub width: Option<f64>,
    /// New height.
    pub height: Option<f64>,
    /// New scale.
    pub scale: Option<f64>,
    /// New rotation in degrees.
    pub rotation: Option<f64>,
    /// New opacity percentage.
    pub opacity: Option<f64>,
    /// New explicit stacking order.
    pub z_index: Option<i32>,
    /// New visibility flag.
    pub visible: Option<bool>,
    /// New lock flag.
    pub locked: Option<bool>,
    /// New window start.
    pub start_time: Option<f64>,
    /// New window end.
    pub end_time: Option<f64>,
    /// New timeline lane.
    pub track: Option<u32>,
}

impl TransformPatch {
    /// Patch that moves an element.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that moves and resizes an element.
    pub fn bounds(b: Bounds) -> Self {
        Self {
            x: Some(b.x),
            y: Some(b.y),
            width: Some(b.width),
            height: Some(b.height),
            ..Self::default()
        }
    }

    /// Copy safe to merge into a stored transform.
    ///
    /// Non-finite numbers are dropped, sizes are floored at [`MIN_ELEMENT_SIZE`], opacity is
    /// clamped to `[0, 100]`, rotation to `[-180, 180]` and times to `>= 0`.
    pub fn sanitized(&self) -> Self {
        fn finite(v: Option<f64>) -> Option<f64> {
            v.filter(|v| v.is_finite())
        }

        Self {
            x: finite(self.x),
            y: finite(self.y),
            width: finite(self.width).map(|w| w.max(MIN_ELEMENT_SIZE)),
            height: finite(self.height).map(|h| h.max(MIN_ELEMENT_SIZE)),
            scale: finite(self.scale),
            rotation: finite(self.rotation).map(|r| r.clamp(-180.0, 180.0)),
            opacity: finite(self.opacity).map(|o| o.clamp(0.0, 100.0)),
            start_time: finite(self.start_time).map(|t| t.max(0.0)),
            end_time: finite(self.end_time).map(|t| t.max(0.0)),
            ..self.clone()
        }
    }

    /// Shallow-merge into `t`.
    pub fn apply(&self, t: &mut Transform) {
        fn put<T: Copy>(dst: &mut T, src: Option<T>) {
            if let Some(v) = src {
                *dst = v;
            }
        }

        put(&mut t.x, self.x);
        put(&mut t.y, self.y);
        put(&mut t.width, self.width);
        put(&mut t.height, self.height);
        put(&mut t.scale, self.scale);
        put(&mut t.rotation, self.rotation);
        put(&mut t.opacity, self.opacity);
        put(&mut t.visible, self.visible);
        put(&mut t.locked, self.locked);
        put(&mut t.track, self.track);
        if self.z_index.is_some() {
            t.z_index = self.z_index;
        }
        if self.start_time.is_some() {
            t.start_time = self.start_time;
        }
        if self.end_time.is_some() {
            t.end_time = self.end_time;
        }
    }
}

/// The only mutable state the engine owns: element id to [`Transform`].
///
/// The store performs no validation; callers (the interaction controller and the workspace
/// property edits) enforce size floors and ranges before writing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformStore {
    map: BTreeMap<ElementId, Transform>,
}

impl TransformStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted `layer_transforms` object.
    pub fn from_json_str(s: &str) -> ComposerResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ComposerError::serde(format!("parse layer transforms: {e}")))
    }

    /// Serialize for persistence. Keys come out sorted, so equal stores produce equal text.
    pub fn to_json_string(&self) -> ComposerResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ComposerError::serde(format!("serialize layer transforms: {e}")))
    }

    /// Stored record, or the default record when the id has none.
    pub fn get(&self, id: &ElementId) -> Transform {
        self.map.get(id).cloned().unwrap_or_default()
    }

    /// Stored record without default filling.
    pub fn stored(&self, id: &ElementId) -> Option<&Transform> {
        self.map.get(id)
    }

    /// `true` when the id has a stored record.
    pub fn contains(&self, id: &ElementId) -> bool {
        self.map.contains_key(id)
    }

    /// Merge `patch` into the existing (or default) record.
    pub fn set(&mut self, id: &ElementId, patch: &TransformPatch) {
        self.update(id, |t| patch.apply(t));
    }

    /// Mutate the existing (or default) record in place.
    pub fn update(&mut self, id: &ElementId, f: impl FnOnce(&mut Transform)) {
        f(self.map.entry(id.clone()).or_default());
    }

    /// Replace the record wholesale.
    pub fn insert(&mut self, id: ElementId, t: Transform) {
        self.map.insert(id, t);
    }

    /// Remove the record; returns it when one existed.
    pub fn delete(&mut self, id: &ElementId) -> Option<Transform> {
        self.map.remove(id)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Stored records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &Transform)> {
        self.map.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/transform.rs"]
mod tests;
