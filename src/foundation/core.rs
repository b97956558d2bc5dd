use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::math::clamp_span;

pub use kurbo::{Point, Rect, Vec2};

/// Smallest width or height any resize may produce, in canvas units.
pub const MIN_ELEMENT_SIZE: f64 = 50.0;

/// Axis-aligned rectangle in canvas-space: top-left corner plus size.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Bounds {
    /// Create bounds from a top-left corner and a size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    pub fn center_y(self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Center point.
    pub fn center(self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same size, moved by `delta`.
    pub fn translate(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..self
        }
    }

    /// Same size, moved so the top-left corner sits at `(x, y)`.
    pub fn with_origin(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }

    /// Convert to a `kurbo` rectangle (`x0,y0` top-left, `x1,y1` bottom-right).
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }

    /// Convert from a `kurbo` rectangle; inverted rectangles are normalized first.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    /// Point-in-rectangle test with inclusive edges.
    pub fn contains_point(self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(self, other: Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest bounds enclosing both rectangles.
    pub fn union(self, other: Bounds) -> Self {
        Self::from_rect(self.to_rect().union(other.to_rect()))
    }

    /// Move (never resize) the rectangle so it lies inside the canvas.
    ///
    /// A rectangle larger than the canvas is pinned to the top-left corner.
    pub fn clamp_into(self, canvas: Canvas) -> Self {
        Self {
            x: clamp_span(self.x, 0.0, canvas.width - self.width),
            y: clamp_span(self.y, 0.0, canvas.height - self.height),
            ..self
        }
    }

    /// `true` when the rectangle lies fully inside the canvas.
    pub fn is_within(self, canvas: Canvas) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= canvas.width + 1e-9
            && self.bottom() <= canvas.height + 1e-9
    }

    /// Component-wise rounding, as shown in numeric readouts.
    pub fn rounded(self) -> Self {
        Self::new(
            self.x.round(),
            self.y.round(),
            self.width.round(),
            self.height.round(),
        )
    }
}

/// Editing stage dimensions in canvas-space units.
///
/// Geometry always runs in these units; display zoom is applied only when painting.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
}

impl Canvas {
    /// Create a canvas of the given size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Stage size for an output format.
    ///
    /// Width is scaled down by format class (`> 1920`: half, `<= 1280`: 80%, otherwise 70%) and
    /// height always follows the format's aspect ratio, so the stage never distorts the output shape.
    pub fn for_format(format: &VideoFormat) -> Self {
        let fw = f64::from(format.width);
        let fh = f64::from(format.height);
        let width = if fw > 1920.0 {
            fw / 2.0
        } else if fw <= 1280.0 {
            fw * 0.8
        } else {
            fw * 0.7
        };
        Self {
            width,
            height: width * fh / fw,
        }
    }

    /// Canvas midpoint.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// The whole canvas as bounds anchored at the origin.
    pub fn bounds(self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    /// On-screen size at a display zoom factor.
    pub fn display_size(self, zoom: f64) -> (f64, f64) {
        let zoom = crate::foundation::math::sanitize_zoom(zoom);
        (self.width * zoom, self.height * zoom)
    }
}

const FORMAT_PRESETS: &[(&str, &str, u32, u32)] = &[
    ("youtube", "YouTube", 1920, 1080),
    ("instagram", "Instagram", 1080, 1080),
    ("instagram-story", "IG Story", 1080, 1920),
    ("tiktok", "TikTok", 1080, 1920),
    ("twitter", "Twitter", 1280, 720),
    ("linkedin", "LinkedIn", 1920, 1080),
    ("facebook", "Facebook", 1280, 720),
];

/// Identifier of the preset used when a composition names no known format.
pub const DEFAULT_FORMAT_ID: &str = "youtube";

/// Named output format (`width x height` in output pixels).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoFormat {
    /// Stable identifier persisted in compositions (`"youtube"`, `"tiktok"`, ...).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl VideoFormat {
    /// Look up a built-in preset by id.
    pub fn preset(id: &str) -> Option<Self> {
        FORMAT_PRESETS
            .iter()
            .find(|(pid, ..)| *pid == id)
            .map(|&(id, name, width, height)| Self {
                id: id.to_owned(),
                name: name.to_owned(),
                width,
                height,
            })
    }

    /// Look up a preset, falling back to [`DEFAULT_FORMAT_ID`] for unknown ids.
    pub fn preset_or_default(id: &str) -> Self {
        if let Some(f) = Self::preset(id) {
            return f;
        }
        tracing::warn!(format = id, "unknown video format, using default");
        Self::default()
    }

    /// All built-in presets in display order.
    pub fn presets() -> Vec<Self> {
        FORMAT_PRESETS
            .iter()
            .filter_map(|(id, ..)| Self::preset(id))
            .collect()
    }

    /// A custom output size. Both dimensions must be non-zero.
    pub fn custom(width: u32, height: u32) -> ComposerResult<Self> {
        if width == 0 || height == 0 {
            return Err(ComposerError::validation(format!(
                "format dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self {
            id: format!("custom-{width}x{height}"),
            name: "Custom".to_owned(),
            width,
            height,
        })
    }

    /// Output aspect ratio (`width / height`).
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for VideoFormat {
    fn default() -> Self {
        Self {
            id: DEFAULT_FORMAT_ID.to_owned(),
            name: "YouTube".to_owned(),
            width: 1920,
            height: 1080,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
