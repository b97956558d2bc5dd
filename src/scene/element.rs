use serde::{Deserialize, Serialize};

use crate::eval::visibility::TimeWindow;
use crate::foundation::core::{Bounds, Canvas};
use crate::scene::role::{ElementKind, Role};
use crate::scene::selection::{SelectionItem, Selections};
use crate::scene::transform::{Transform, TransformStore};

/// Offset of the first staggered default placement, in canvas units.
pub const DEFAULT_STAGGER_ORIGIN: f64 = 50.0;
/// Per-element diagonal step of staggered default placement.
pub const DEFAULT_STAGGER_STEP: f64 = 20.0;
/// Size of an element that has never been resized.
pub const DEFAULT_ELEMENT_SIZE: (f64, f64) = (200.0, 150.0);

/// Stable element identifier, `{kind}-{sourceId}` (for example `asset-17`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Id of the element projected from `source_id` in the `kind` list.
    pub fn new(kind: ElementKind, source_id: &str) -> Self {
        Self(format!("{}-{}", kind.prefix(), source_id))
    }

    /// Raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split back into kind and source id. `None` for ids with an unknown prefix.
    pub fn parse(&self) -> Option<(ElementKind, &str)> {
        let (prefix, source_id) = self.0.split_once('-')?;
        Some((ElementKind::from_prefix(prefix)?, source_id))
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only, paintable view of one selected item, recomputed on every projection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Element {
    /// Element id.
    pub id: ElementId,
    /// Source list.
    pub kind: ElementKind,
    /// Role in the composition.
    pub role: Role,
    /// Id of the source record.
    pub source_id: String,
    /// Title of the source record, display only.
    pub title_ref: Option<String>,
    /// Thumbnail of the source record, display only.
    pub thumbnail_ref: Option<String>,
    /// Resolved stacking order: stored `zIndex`, else the role default.
    pub z_index: i32,
    /// Rectangle to paint. Canvas-filling roles always cover the whole canvas.
    pub bounds: Bounds,
    /// Stored (or staggered default) rectangle, ignoring canvas filling.
    pub layout_bounds: Bounds,
    /// Opacity percentage.
    pub opacity: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Visibility flag.
    pub visible: bool,
    /// Lock flag.
    pub locked: bool,
    /// Temporal window.
    pub window: TimeWindow,
    /// Timeline lane.
    pub track: u32,
    /// `true` when the element has a stored transform.
    pub stored: bool,
}

impl Element {
    /// Canvas-filling elements take no part in rectangle geometry.
    pub fn fills_canvas(&self) -> bool {
        self.role.fills_canvas()
    }

    /// `true` when drag and resize may start on this element.
    pub fn is_manipulable(&self) -> bool {
        !self.fills_canvas() && !self.locked
    }

    /// Transform to write into the store the first time this element is touched.
    pub fn materialized_transform(&self) -> Transform {
        let mut t = Transform {
            z_index: Some(self.z_index),
            opacity: self.opacity,
            rotation: self.rotation,
            scale: self.scale,
            visible: self.visible,
            locked: self.locked,
            track: self.track,
            ..Transform::default()
        };
        t.set_bounds(self.layout_bounds);
        t.set_window(self.window);
        t
    }
}

/// Diagonal stagger for the element at `index` in the projected list.
pub fn default_layout(index: usize) -> Bounds {
    let offset = DEFAULT_STAGGER_ORIGIN + DEFAULT_STAGGER_STEP * index as f64;
    Bounds::new(
        offset,
        offset,
        DEFAULT_ELEMENT_SIZE.0,
        DEFAULT_ELEMENT_SIZE.1,
    )
}

/// Build the paint-ordered element list from the three selection lists.
///
/// Ordering is a stable ascending sort on resolved z-index, so ties keep append order
/// (scenes, assets, wardrobe). Elements without a stored transform get a staggered default
/// rectangle keyed by their position in the sorted list.
#[tracing::instrument(skip_all, fields(selected = selections.len(), stored = store.len()))]
pub fn project(selections: &Selections, store: &TransformStore, canvas: Canvas) -> Vec<Element> {
    let mut staged: Vec<(i32, ElementKind, ElementId, &SelectionItem)> = selections
        .iter()
        .map(|(kind, item)| {
            let id = ElementId::new(kind, &item.source.id);
            let z = store
                .stored(&id)
                .and_then(|t| t.z_index)
                .unwrap_or_else(|| item.role.default_z(kind));
            (z, kind, id, item)
        })
        .collect();
    staged.sort_by_key(|(z, ..)| *z);

    staged
        .into_iter()
        .enumerate()
        .map(|(index, (z_index, kind, id, item))| {
            let stored = store.stored(&id);
            let (layout_bounds, t) = match stored {
                Some(t) => (t.bounds(), t.clone()),
                None => (default_layout(index), Transform::default()),
            };
            let bounds = if item.role.fills_canvas() {
                canvas.bounds()
            } else {
                layout_bounds
            };
            Element {
                kind,
                role: item.role.clone(),
                source_id: item.source.id.clone(),
                title_ref: item.source.title.clone(),
                thumbnail_ref: item.source.thumbnail.clone(),
                z_index,
                bounds,
                layout_bounds,
                opacity: t.opacity,
                rotation: t.rotation,
                scale: t.scale,
                visible: t.visible,
                locked: t.locked,
                window: t.window(),
                track: t.track,
                stored: stored.is_some(),
                id,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/element.rs"]
mod tests;
