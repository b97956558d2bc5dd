use serde::{Deserialize, Serialize};

/// Which selection list an element was projected from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// An episode scene (video clip).
    Scene,
    /// An image or media asset.
    Asset,
    /// A wardrobe item.
    Wardrobe,
}

impl ElementKind {
    /// Prefix used in element ids (`scene-42`).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Asset => "asset",
            Self::Wardrobe => "wardrobe",
        }
    }

    /// Parse an id prefix back into a kind.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "scene" => Some(Self::Scene),
            "asset" => Some(Self::Asset),
            "wardrobe" => Some(Self::Wardrobe),
            _ => None,
        }
    }

    /// Roles offered when adding an element of this kind, in picker order.
    pub fn suggested_roles(self) -> Vec<Role> {
        match self {
            Self::Scene => vec![Role::Primary, Role::BRoll, Role::Transition, Role::Overlay],
            Self::Asset => vec![Role::Primary, Role::Background, Role::Overlay, Role::Effect],
            Self::Wardrobe => vec![Role::Costume, Role::Overlay, Role::Background],
        }
    }
}

/// Semantic tag driving default stacking and whether an element fills the canvas.
///
/// Unknown strings survive as [`Role::Other`] so persisted compositions round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full-canvas backdrop.
    Background,
    /// Full-canvas main content.
    Primary,
    /// Supplementary footage.
    BRoll,
    /// Costume reference.
    Costume,
    /// Transition clip.
    Transition,
    /// Overlay layer.
    Overlay,
    /// Effect/filter layer.
    Effect,
    /// Any role string this engine does not know.
    Other(String),
}

impl Role {
    /// Parse a persisted role string.
    pub fn parse(s: &str) -> Self {
        match s {
            "background" => Self::Background,
            "primary" => Self::Primary,
            "b-roll" => Self::BRoll,
            "costume" => Self::Costume,
            "transition" => Self::Transition,
            "overlay" => Self::Overlay,
            "effect" => Self::Effect,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Persisted role string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Background => "background",
            Self::Primary => "primary",
            Self::BRoll => "b-roll",
            Self::Costume => "costume",
            Self::Transition => "transition",
            Self::Overlay => "overlay",
            Self::Effect => "effect",
            Self::Other(s) => s,
        }
    }

    /// Stacking order used when an element has no stored `zIndex`.
    pub fn default_z(&self, kind: ElementKind) -> i32 {
        match self {
            Self::Background => 0,
            Self::Primary => 1,
            Self::BRoll | Self::Costume => 2,
            Self::Transition => 3,
            Self::Overlay => 4,
            Self::Effect => 5,
            Self::Other(_) => match kind {
                ElementKind::Wardrobe => 2,
                ElementKind::Scene | ElementKind::Asset => 1,
            },
        }
    }

    /// Canvas-filling roles ignore stored geometry and cannot be dragged or resized.
    pub fn fills_canvas(&self) -> bool {
        matches!(self, Self::Background | Self::Primary)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Role> for String {
    fn from(r: Role) -> Self {
        r.as_str().to_owned()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/role.rs"]
mod tests;
