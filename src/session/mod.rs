//! Editing session façade.

pub(crate) mod workspace;
