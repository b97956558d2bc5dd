use serde::Serialize;

use crate::eval::visibility::{MIN_WINDOW_SECS, TimeWindow};
use crate::scene::element::{Element, ElementId};

/// Clip length given to a newly added element whose source has no known duration.
pub const DEFAULT_CLIP_SECS: f64 = 5.0;
/// Length of a fresh composition.
pub const DEFAULT_COMPOSITION_SECS: f64 = 60.0;
/// Slack added after the last clip when the composition has to grow.
pub const DURATION_HEADROOM_SECS: f64 = 5.0;

/// Where a newly added element lands on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Window directly after the latest ending element.
    pub window: TimeWindow,
    /// One lane per element.
    pub track: u32,
}

/// Place a new clip of `clip_secs` after every existing element.
///
/// Elements without an end count as ending at 0, so open-ended layers do not push new clips
/// out to infinity.
pub fn append_placement(existing: &[Element], clip_secs: f64) -> Placement {
    let start = existing
        .iter()
        .map(|e| e.window.end.unwrap_or(0.0))
        .fold(0.0, f64::max);
    let clip_secs = if clip_secs > 0.0 && clip_secs.is_finite() {
        clip_secs
    } else {
        DEFAULT_CLIP_SECS
    };
    Placement {
        window: TimeWindow::bounded(start, start + clip_secs),
        track: u32::try_from(existing.len()).unwrap_or(u32::MAX),
    }
}

/// Composition length after a clip ending at `clip_end` was added.
pub fn grown_duration(current: f64, clip_end: f64) -> f64 {
    if clip_end > current {
        clip_end + DURATION_HEADROOM_SECS
    } else {
        current
    }
}

/// Window after dragging its start edge by `delta` seconds.
///
/// The start stays in `[0, end - 0.1]`; open-ended windows are measured against `duration`.
pub fn trim_start(window: TimeWindow, delta: f64, duration: f64) -> TimeWindow {
    let end = window.end.unwrap_or(duration);
    let start = (window.start_secs() + delta)
        .min(end - MIN_WINDOW_SECS)
        .max(0.0);
    TimeWindow {
        start: Some(start),
        end: window.end,
    }
}

/// Window after dragging its end edge by `delta` seconds, kept in `[start + 0.1, duration]`.
pub fn trim_end(window: TimeWindow, delta: f64, duration: f64) -> TimeWindow {
    let start = window.start_secs();
    let end = (window.end.unwrap_or(duration) + delta)
        .min(duration)
        .max(start + MIN_WINDOW_SECS);
    TimeWindow {
        start: window.start,
        end: Some(end),
    }
}

/// One row of the timeline strip.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineBar {
    /// Element id.
    pub id: ElementId,
    /// Lane.
    pub track: u32,
    /// Start in seconds.
    pub start: f64,
    /// End in seconds; open-ended windows run to the composition end.
    pub end: f64,
    /// `true` when the element has no explicit end.
    pub open_ended: bool,
}

impl TimelineBar {
    /// Bar length in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Timeline bars in paint order.
pub fn timeline_bars(elements: &[Element], duration: f64) -> Vec<TimelineBar> {
    elements
        .iter()
        .map(|e| TimelineBar {
            id: e.id.clone(),
            track: e.track,
            start: e.window.start_secs(),
            end: e.window.end.unwrap_or(duration),
            open_ended: e.window.end.is_none(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/timeline.rs"]
mod tests;
