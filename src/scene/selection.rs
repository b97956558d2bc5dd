use serde::{Deserialize, Serialize};

use crate::scene::role::{ElementKind, Role};

/// Display-only reference into a source record (scene, asset or wardrobe item).
///
/// The engine never looks inside `title` or `thumbnail`; `duration_seconds` only seeds the
/// default timeline window of newly added scenes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Source record id.
    pub id: String,
    /// Title shown on the layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Thumbnail URL or storage key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Clip length when the source is time-based.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

impl SourceRef {
    /// Reference carrying only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            thumbnail: None,
            duration_seconds: None,
        }
    }

    /// Attach a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a thumbnail reference.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Attach a clip duration.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_seconds = Some(secs);
        self
    }
}

/// One selected source plus the role it plays in the composition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionItem {
    /// Selected source.
    pub source: SourceRef,
    /// Role in this composition.
    pub role: Role,
}

impl SelectionItem {
    /// Pair a source with a role.
    pub fn new(source: SourceRef, role: Role) -> Self {
        Self { source, role }
    }
}

/// The three independent, ordered selection lists a composition is built from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selections {
    /// Selected scenes.
    pub scenes: Vec<SelectionItem>,
    /// Selected assets.
    pub assets: Vec<SelectionItem>,
    /// Selected wardrobe items.
    pub wardrobe: Vec<SelectionItem>,
}

impl Selections {
    /// Empty selections.
    pub fn new() -> Self {
        Self::default()
    }

    /// List for one kind.
    pub fn list(&self, kind: ElementKind) -> &[SelectionItem] {
        match kind {
            ElementKind::Scene => &self.scenes,
            ElementKind::Asset => &self.assets,
            ElementKind::Wardrobe => &self.wardrobe,
        }
    }

    fn list_mut(&mut self, kind: ElementKind) -> &mut Vec<SelectionItem> {
        match kind {
            ElementKind::Scene => &mut self.scenes,
            ElementKind::Asset => &mut self.assets,
            ElementKind::Wardrobe => &mut self.wardrobe,
        }
    }

    /// Selected item by source id.
    pub fn find(&self, kind: ElementKind, source_id: &str) -> Option<&SelectionItem> {
        self.list(kind).iter().find(|s| s.source.id == source_id)
    }

    /// Append an item. A source can be selected once per list; duplicates are ignored.
    pub fn push(&mut self, kind: ElementKind, item: SelectionItem) -> bool {
        if self.find(kind, &item.source.id).is_some() {
            return false;
        }
        self.list_mut(kind).push(item);
        true
    }

    /// Remove an item by source id.
    pub fn remove(&mut self, kind: ElementKind, source_id: &str) -> Option<SelectionItem> {
        let list = self.list_mut(kind);
        let idx = list.iter().position(|s| s.source.id == source_id)?;
        Some(list.remove(idx))
    }

    /// Change the role of a selected item. Returns `false` when it is not selected.
    pub fn set_role(&mut self, kind: ElementKind, source_id: &str, role: Role) -> bool {
        match self
            .list_mut(kind)
            .iter_mut()
            .find(|s| s.source.id == source_id)
        {
            Some(item) => {
                item.role = role;
                true
            }
            None => false,
        }
    }

    /// All items in append order: scenes, then assets, then wardrobe.
    pub fn iter(&self) -> impl Iterator<Item = (ElementKind, &SelectionItem)> {
        self.scenes
            .iter()
            .map(|s| (ElementKind::Scene, s))
            .chain(self.assets.iter().map(|s| (ElementKind::Asset, s)))
            .chain(self.wardrobe.iter().map(|s| (ElementKind::Wardrobe, s)))
    }

    /// Total number of selected items.
    pub fn len(&self) -> usize {
        self.scenes.len() + self.assets.len() + self.wardrobe.len()
    }

    /// `true` when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/selection.rs"]
mod tests;
