use crate::scene::element::Element;

/// Shortest window an edit may leave behind, in seconds.
pub const MIN_WINDOW_SECS: f64 = 0.1;

/// Half-open `[start, end)` interval on the playback timeline, in seconds.
///
/// A missing start means 0 and a missing end means "until the end of the composition".
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    /// Inclusive start.
    pub start: Option<f64>,
    /// Exclusive end.
    pub end: Option<f64>,
}

impl TimeWindow {
    /// Visible for the whole timeline.
    pub const ALWAYS: Self = Self {
        start: None,
        end: None,
    };

    /// A closed window, repaired to `end > start` when the caller got it backwards.
    pub fn bounded(start: f64, end: f64) -> Self {
        let start = start.max(0.0);
        let end = if end > start {
            end
        } else {
            start + MIN_WINDOW_SECS
        };
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Start with the implicit default applied.
    pub fn start_secs(self) -> f64 {
        self.start.unwrap_or(0.0)
    }

    /// End with the implicit default applied.
    pub fn end_secs(self) -> f64 {
        self.end.unwrap_or(f64::INFINITY)
    }

    /// `true` when `t` lies in `[start, end)`.
    pub fn contains(self, t: f64) -> bool {
        t >= self.start_secs() && t < self.end_secs()
    }
}

/// Elements eligible for display at playhead time `t`, in paint order.
///
/// Spatial geometry plays no part: an element fully off-canvas is still "visible" here.
pub fn visible_at(t: f64, elements: &[Element]) -> Vec<Element> {
    elements
        .iter()
        .filter(|e| e.visible && e.window.contains(t))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/visibility.rs"]
mod tests;
