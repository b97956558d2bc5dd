//! Time: temporal visibility, timeline placement and the playback clock.

pub(crate) mod playback;
pub(crate) mod timeline;
pub(crate) mod visibility;
