//! Pointer gestures on the stage: drag and resize with snapping, readouts and commits.

pub(crate) mod controller;
pub(crate) mod gesture;
