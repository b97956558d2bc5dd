use serde::{Deserialize, Serialize};

use crate::eval::timeline::DEFAULT_COMPOSITION_SECS;

/// Playhead of the composition timeline.
///
/// The clock does not tick by itself; the host calls [`Playback::advance`] from its frame
/// loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playback {
    /// Playhead position in seconds.
    pub current_time: f64,
    /// Composition length in seconds.
    pub duration: f64,
    /// Whether [`Playback::advance`] moves the playhead.
    pub playing: bool,
    /// Playback speed multiplier.
    pub rate: f64,
    /// Jump back to 0 instead of stopping at the end.
    pub looping: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: DEFAULT_COMPOSITION_SECS,
            playing: false,
            rate: 1.0,
            looping: false,
        }
    }
}

impl Playback {
    /// Stopped clock at 0 for a composition of `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            ..Self::default()
        }
    }

    /// Start playing.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop playing; the playhead stays where it is.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flip between playing and paused.
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Advance by `dt` wall-clock seconds while playing.
    pub fn advance(&mut self, dt: f64) {
        if !self.playing || dt <= 0.0 {
            return;
        }
        let t = self.current_time + dt * self.rate;
        if t < self.duration {
            self.current_time = t;
        } else if self.looping {
            self.current_time = 0.0;
        } else {
            self.current_time = self.duration;
            self.playing = false;
            tracing::debug!(duration = self.duration, "playback reached end");
        }
    }

    /// Move the playhead, clamped to `[0, duration]`.
    pub fn seek(&mut self, t: f64) {
        self.current_time = if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, self.duration)
        };
    }

    /// Move the playhead by `secs` (negative steps back).
    pub fn step(&mut self, secs: f64) {
        self.seek(self.current_time + secs);
    }

    /// Change the composition length, pulling the playhead in if needed.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
        self.seek(self.current_time);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/playback.rs"]
mod tests;
