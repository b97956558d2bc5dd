use serde::{Deserialize, Serialize};

use crate::foundation::core::{Bounds, Canvas, MIN_ELEMENT_SIZE, Vec2};
use crate::foundation::math::clamp_span;

/// One of the eight grab points on a selected element's outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top edge.
    N,
    /// Bottom edge.
    S,
    /// Right edge.
    E,
    /// Left edge.
    W,
    /// Top-right corner.
    Ne,
    /// Top-left corner.
    Nw,
    /// Bottom-right corner.
    Se,
    /// Bottom-left corner.
    Sw,
}

impl ResizeHandle {
    /// All handles, clockwise from the top edge.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
        ResizeHandle::Nw,
    ];

    /// Parse a handle name such as `"se"`.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "n" => Self::N,
            "s" => Self::S,
            "e" => Self::E,
            "w" => Self::W,
            "ne" => Self::Ne,
            "nw" => Self::Nw,
            "se" => Self::Se,
            "sw" => Self::Sw,
            _ => return None,
        })
    }

    /// Short name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }

    /// The left edge follows the pointer.
    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// The right edge follows the pointer.
    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// The top edge follows the pointer.
    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// The bottom edge follows the pointer.
    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Corner handles change both dimensions.
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Nw | Self::Se | Self::Sw)
    }

    /// CSS cursor shown while hovering the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resize options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeOpts {
    /// Preserve the starting width/height ratio.
    pub keep_aspect: bool,
    /// Floor for both dimensions.
    pub min_size: f64,
}

impl Default for ResizeOpts {
    fn default() -> Self {
        Self {
            keep_aspect: false,
            min_size: MIN_ELEMENT_SIZE,
        }
    }
}

/// Edge coordinates of a rectangle under resize.
#[derive(Clone, Copy, Debug)]
struct Edges {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Edges {
    fn of(b: Bounds) -> Self {
        Self {
            left: b.x,
            top: b.y,
            right: b.right(),
            bottom: b.bottom(),
        }
    }

    fn width(self) -> f64 {
        self.right - self.left
    }

    fn height(self) -> f64 {
        self.bottom - self.top
    }

    fn set_width(&mut self, w: f64, handle: ResizeHandle) {
        if handle.moves_west() {
            self.left = self.right - w;
        } else {
            self.right = self.left + w;
        }
    }

    fn set_height(&mut self, h: f64, handle: ResizeHandle) {
        if handle.moves_north() {
            self.top = self.bottom - h;
        } else {
            self.bottom = self.top + h;
        }
    }

    fn bounds(self) -> Bounds {
        Bounds::new(self.left, self.top, self.width(), self.height())
    }
}

/// Rectangle produced by dragging `handle` of `start` by `delta` canvas units.
///
/// East/south handles add the delta, west/north handles subtract it while the opposite edge
/// stays put. Both dimensions are floored at `opts.min_size` with the far edge pinned. With
/// `keep_aspect`, corners follow the width and edge handles grow the other axis around the
/// starting center; the leading side is raised until both floors hold. Edges pushed past the
/// canvas are trimmed and the result is finally moved inside the canvas.
pub fn apply_resize(
    start: Bounds,
    handle: ResizeHandle,
    delta: Vec2,
    canvas: Canvas,
    opts: &ResizeOpts,
) -> Bounds {
    let min = opts.min_size;
    let mut e = Edges::of(start);

    if handle.moves_west() {
        e.left += delta.x;
    }
    if handle.moves_east() {
        e.right += delta.x;
    }
    if handle.moves_north() {
        e.top += delta.y;
    }
    if handle.moves_south() {
        e.bottom += delta.y;
    }

    let ratio = start.width / start.height;
    if opts.keep_aspect && ratio.is_finite() && ratio > 0.0 {
        let (w, h) = if handle.is_corner() || handle.moves_east() || handle.moves_west() {
            let w = e.width().max(min).max(min * ratio);
            (w, w / ratio)
        } else {
            let h = e.height().max(min).max(min / ratio);
            (h * ratio, h)
        };
        match handle {
            ResizeHandle::N | ResizeHandle::S => {
                e.left = start.center_x() - w / 2.0;
                e.right = e.left + w;
                e.set_height(h, handle);
            }
            ResizeHandle::E | ResizeHandle::W => {
                e.top = start.center_y() - h / 2.0;
                e.bottom = e.top + h;
                e.set_width(w, handle);
            }
            _ => {
                e.set_width(w, handle);
                e.set_height(h, handle);
            }
        }
    } else {
        if e.width() < min {
            e.set_width(min, handle);
        }
        if e.height() < min {
            e.set_height(min, handle);
        }
    }

    if handle.moves_west() {
        e.left = e.left.max(0.0);
    }
    if handle.moves_east() {
        e.right = e.right.min(canvas.width);
    }
    if handle.moves_north() {
        e.top = e.top.max(0.0);
    }
    if handle.moves_south() {
        e.bottom = e.bottom.min(canvas.height);
    }

    let b = e.bounds();
    Bounds {
        width: clamp_span(b.width, min, canvas.width),
        height: clamp_span(b.height, min, canvas.height),
        ..b
    }
    .clamp_into(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resize.rs"]
mod tests;
