//! Snapshot-based undo/redo.

pub(crate) mod ledger;
