//! Rectangle geometry: snapping with alignment guides, handle resizing, helpers.

pub(crate) mod geometry;
pub(crate) mod resize;
pub(crate) mod snap;
