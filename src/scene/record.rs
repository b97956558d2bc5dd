use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::VideoFormat;
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::scene::role::{ElementKind, Role};
use crate::scene::selection::{SelectionItem, Selections, SourceRef};
use crate::scene::transform::TransformStore;

/// Persisted composition as exchanged with the composition API.
///
/// Only the fields the engine reads are typed; everything else (ids, names, timestamps,
/// unrelated settings) is kept in `extra` so a load/save cycle does not drop data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionRecord {
    /// Selected scenes.
    #[serde(default)]
    pub scenes: Vec<SceneRow>,
    /// Selected assets.
    #[serde(default)]
    pub assets: Vec<AssetRow>,
    /// Selected wardrobe items.
    #[serde(default)]
    pub wardrobes: Vec<WardrobeRow>,
    /// Element transforms keyed by element id.
    #[serde(default, deserialize_with = "object_or_json_text")]
    pub layer_transforms: TransformStore,
    /// Output settings.
    #[serde(default, deserialize_with = "object_or_json_text")]
    pub settings: RecordSettings,
    /// Untyped record fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `settings` object of a composition record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSettings {
    /// Output format id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Display name of the output format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Untyped settings.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Scene row: `{scene_id, role, order}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRow {
    /// Scene id.
    #[serde(deserialize_with = "id_string")]
    pub scene_id: String,
    /// Role; missing or empty means primary.
    #[serde(default = "primary_role", deserialize_with = "role_or_primary")]
    pub role: Role,
    /// Position within the list.
    #[serde(default)]
    pub order: u32,
}

/// Asset row: `{asset_id, role, order}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetRow {
    /// Asset id.
    #[serde(deserialize_with = "id_string")]
    pub asset_id: String,
    /// Role; missing or empty means primary.
    #[serde(default = "primary_role", deserialize_with = "role_or_primary")]
    pub role: Role,
    /// Position within the list.
    #[serde(default)]
    pub order: u32,
}

/// Wardrobe row: `{wardrobe_id, role, order}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WardrobeRow {
    /// Wardrobe item id.
    #[serde(deserialize_with = "id_string")]
    pub wardrobe_id: String,
    /// Role; missing or empty means primary.
    #[serde(default = "primary_role", deserialize_with = "role_or_primary")]
    pub role: Role,
    /// Position within the list.
    #[serde(default)]
    pub order: u32,
}

/// Database ids arrive as strings or integers depending on the table; both map to strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(serde_json::Number),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Text(s) => Ok(s),
        Repr::Number(n) => Ok(n.to_string()),
    }
}

fn primary_role() -> Role {
    Role::Primary
}

fn role_or_primary<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let role = Option::<String>::deserialize(deserializer)?;
    Ok(match role.as_deref() {
        None | Some("") => Role::Primary,
        Some(s) => Role::parse(s),
    })
}

/// JSON columns arrive either as objects or as strings holding JSON.
///
/// Unparseable text and `null` fall back to the default; a malformed object is still an error.
fn object_or_json_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(T::default()),
        Value::String(text) => match serde_json::from_str::<Option<T>>(&text) {
            Ok(v) => Ok(v.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(error = %e, "unparseable JSON column, using defaults");
                Ok(T::default())
            }
        },
        other => T::deserialize(other).map_err(serde::de::Error::custom),
    }
}

fn ordered<R>(
    rows: &[R],
    order: impl Fn(&R) -> u32,
    item: impl Fn(&R) -> SelectionItem,
) -> Vec<SelectionItem> {
    let mut sorted: Vec<&R> = rows.iter().collect();
    sorted.sort_by_key(|r| order(*r));
    sorted.into_iter().map(item).collect()
}

impl CompositionRecord {
    /// Parse a record from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ComposerResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ComposerError::serde(format!("parse composition record: {e}")))
    }

    /// Parse a record from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ComposerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ComposerError::validation(format!("open composition record '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a record from a JSON string.
    pub fn from_json_str(s: &str) -> ComposerResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ComposerError::serde(format!("parse composition record: {e}")))
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> ComposerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ComposerError::serde(format!("serialize composition record: {e}")))
    }

    /// Selection lists ordered by each row's `order`.
    ///
    /// Rows only carry ids; titles and thumbnails are left for the caller to hydrate.
    pub fn selections(&self) -> Selections {
        let pick = |id: &str, role: &Role| SelectionItem::new(SourceRef::new(id), role.clone());
        Selections {
            scenes: ordered(&self.scenes, |r| r.order, |r| pick(&r.scene_id, &r.role)),
            assets: ordered(&self.assets, |r| r.order, |r| pick(&r.asset_id, &r.role)),
            wardrobe: ordered(&self.wardrobes, |r| r.order, |r| {
                pick(&r.wardrobe_id, &r.role)
            }),
        }
    }

    /// Output format named in the settings, defaulting when absent or unknown.
    pub fn format(&self) -> VideoFormat {
        match self.settings.format.as_deref() {
            Some(id) => VideoFormat::preset_or_default(id),
            None => VideoFormat::default(),
        }
    }

    /// Copy of this record with the engine-owned fields replaced.
    ///
    /// Rows are renumbered by list position, matching how the lists are displayed.
    pub fn with_state(
        &self,
        selections: &Selections,
        transforms: &TransformStore,
        format: &VideoFormat,
    ) -> Self {
        let rows = |kind: ElementKind| {
            selections
                .list(kind)
                .iter()
                .enumerate()
                .map(|(i, s)| (s.source.id.clone(), s.role.clone(), i as u32))
        };

        let mut out = self.clone();
        out.scenes = rows(ElementKind::Scene)
            .map(|(scene_id, role, order)| SceneRow {
                scene_id,
                role,
                order,
            })
            .collect();
        out.assets = rows(ElementKind::Asset)
            .map(|(asset_id, role, order)| AssetRow {
                asset_id,
                role,
                order,
            })
            .collect();
        out.wardrobes = rows(ElementKind::Wardrobe)
            .map(|(wardrobe_id, role, order)| WardrobeRow {
                wardrobe_id,
                role,
                order,
            })
            .collect();
        out.layer_transforms = transforms.clone();
        out.settings.format = Some(format.id.clone());
        out.settings.platform = Some(format.name.clone());
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/record.rs"]
mod tests;
