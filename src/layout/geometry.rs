//! Rectangle helpers shared by the stage, the selection overlay and import/export code.

use crate::foundation::core::Bounds;

/// Smallest rectangle enclosing every input, or `None` for an empty slice.
pub fn bounding_box(items: &[Bounds]) -> Option<Bounds> {
    let (first, rest) = items.split_first()?;
    Some(rest.iter().fold(*first, |acc, b| acc.union(*b)))
}

/// Map a rectangle given in percent of a container (0..=100) to container units.
pub fn percent_to_pixels(b: Bounds, container_w: f64, container_h: f64) -> Bounds {
    Bounds::new(
        b.x / 100.0 * container_w,
        b.y / 100.0 * container_h,
        b.width / 100.0 * container_w,
        b.height / 100.0 * container_h,
    )
}

/// Inverse of [`percent_to_pixels`]. A zero-sized container maps everything to 0.
pub fn pixels_to_percent(b: Bounds, container_w: f64, container_h: f64) -> Bounds {
    let pct = |v: f64, extent: f64| {
        if extent == 0.0 {
            0.0
        } else {
            v / extent * 100.0
        }
    };
    Bounds::new(
        pct(b.x, container_w),
        pct(b.y, container_h),
        pct(b.width, container_w),
        pct(b.height, container_h),
    )
}

/// Topmost rectangle under `p`, given rectangles in paint order (bottom first).
pub fn hit_test(p: crate::foundation::core::Point, paint_order: &[Bounds]) -> Option<usize> {
    paint_order.iter().rposition(|b| b.contains_point(p))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
