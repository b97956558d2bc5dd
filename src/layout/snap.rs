use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::foundation::core::{Bounds, Canvas};
use crate::foundation::math::{clamp_span, coincides, nearest_multiple, within};

/// Grid spacing used when no options are given.
pub const DEFAULT_GRID: f64 = 20.0;
/// Snap distance used when no options are given.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;

// Each pass either keeps the rule that fired or hands over to a higher-priority one.
const MAX_SNAP_PASSES: usize = 16;

/// Snapping options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapOpts {
    /// Global switch; when off, drags move freely (still clamped by the caller).
    pub enabled: bool,
    /// Grid spacing in canvas units; `0` disables grid snapping.
    pub grid: f64,
    /// Distance below which a snap target captures an edge or center.
    pub threshold: f64,
}

impl Default for SnapOpts {
    fn default() -> Self {
        Self {
            enabled: true,
            grid: DEFAULT_GRID,
            threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

/// Another element's rectangle, as seen by the snap engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sibling {
    /// Effective rectangle.
    pub bounds: Bounds,
    /// Hidden siblings offer no alignment targets.
    pub visible: bool,
}

/// Alignment lines to draw while dragging.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Guides {
    /// X coordinates of vertical lines.
    pub vertical: SmallVec<[f64; 4]>,
    /// Y coordinates of horizontal lines.
    pub horizontal: SmallVec<[f64; 4]>,
}

impl Guides {
    /// `true` when no line is active.
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.vertical.clear();
        self.horizontal.clear();
    }
}

/// Snap output: corrected rectangle (same size as the input) and the lines that fired.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapResult {
    /// Corrected rectangle.
    pub bounds: Bounds,
    /// Active alignment lines.
    pub guides: Guides,
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn span(self, b: Bounds) -> (f64, f64) {
        match self {
            Axis::X => (b.x, b.width),
            Axis::Y => (b.y, b.height),
        }
    }

    fn extent(self, canvas: Canvas) -> f64 {
        match self {
            Axis::X => canvas.width,
            Axis::Y => canvas.height,
        }
    }
}

/// Snap a dragged rectangle to the canvas, the grid and its siblings.
///
/// The rectangle is clamped onto the canvas first. Each axis then takes the first target
/// within `threshold`, in priority order: canvas center, canvas edges, grid, sibling
/// edges/centers. The result is clamped again, and passes repeat until the position is stable,
/// so snapping an already snapped rectangle returns it unchanged.
pub fn snap_rect(
    candidate: Bounds,
    canvas: Canvas,
    siblings: &[Sibling],
    opts: &SnapOpts,
) -> SnapResult {
    if !opts.enabled {
        return SnapResult {
            bounds: candidate,
            guides: Guides::default(),
        };
    }

    let targets: Vec<Bounds> = siblings
        .iter()
        .filter(|s| s.visible)
        .map(|s| s.bounds)
        .collect();

    let mut current = candidate.clamp_into(canvas);
    for _ in 0..MAX_SNAP_PASSES {
        let next = Bounds {
            x: snap_axis(Axis::X, current, canvas, &targets, opts),
            y: snap_axis(Axis::Y, current, canvas, &targets, opts),
            ..current
        }
        .clamp_into(canvas);
        if next == current {
            break;
        }
        current = next;
    }

    SnapResult {
        bounds: current,
        guides: Guides {
            vertical: axis_guides(Axis::X, current, canvas, &targets),
            horizontal: axis_guides(Axis::Y, current, canvas, &targets),
        },
    }
}

fn snap_axis(axis: Axis, b: Bounds, canvas: Canvas, targets: &[Bounds], opts: &SnapOpts) -> f64 {
    let t = opts.threshold;
    let (start, size) = axis.span(b);
    let extent = axis.extent(canvas);
    let center = start + size / 2.0;
    let end = start + size;

    if within(center, extent / 2.0, t) {
        return extent / 2.0 - size / 2.0;
    }
    if within(start, 0.0, t) {
        return 0.0;
    }
    if within(end, extent, t) {
        return extent - size;
    }
    if opts.grid > 0.0 {
        let g = nearest_multiple(start, opts.grid);
        if within(start, g, t) {
            return g;
        }
    }
    for &s in targets {
        let (s_start, s_size) = axis.span(s);
        if within(start, s_start, t) {
            return s_start;
        }
        if within(center, s_start + s_size / 2.0, t) {
            return s_start + s_size / 2.0 - size / 2.0;
        }
        if within(end, s_start + s_size, t) {
            return s_start + s_size - size;
        }
    }
    clamp_span(start, 0.0, extent - size)
}

/// Every canvas or sibling line the rectangle sits exactly on.
fn axis_guides(axis: Axis, b: Bounds, canvas: Canvas, targets: &[Bounds]) -> SmallVec<[f64; 4]> {
    let (start, size) = axis.span(b);
    let extent = axis.extent(canvas);
    let center = start + size / 2.0;
    let end = start + size;

    let mut out = SmallVec::new();
    let mut push = |v: f64| {
        if !out.iter().any(|&g| coincides(g, v)) {
            out.push(v);
        }
    };

    if coincides(center, extent / 2.0) {
        push(extent / 2.0);
    }
    if coincides(start, 0.0) {
        push(0.0);
    }
    if coincides(end, extent) {
        push(extent);
    }
    for &s in targets {
        let (s_start, s_size) = axis.span(s);
        let s_center = s_start + s_size / 2.0;
        let s_end = s_start + s_size;
        if coincides(start, s_start) {
            push(s_start);
        }
        if coincides(center, s_center) {
            push(s_center);
        }
        if coincides(end, s_end) {
            push(s_end);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/snap.rs"]
mod tests;
