use super::*;
use crate::scene::element::ElementId;
use crate::scene::transform::TransformPatch;

fn snap_at(x: f64) -> Snapshot {
    let mut transforms = TransformStore::new();
    transforms.set(&ElementId::from("asset-1"), &TransformPatch::position(x, 0.0));
    Snapshot {
        transforms,
        selections: Selections::new(),
    }
}

fn x_of(e: &HistoryEntry) -> f64 {
    e.snapshot.transforms.get(&ElementId::from("asset-1")).x
}

#[test]
fn empty_ledger_is_inert() {
    let mut h = HistoryLedger::default();
    assert_eq!(h.capacity(), DEFAULT_HISTORY_DEPTH);
    assert!(h.undo().is_none());
    assert!(h.redo().is_none());
    assert_eq!(h.cursor(), None);
    assert!(!h.can_undo() && !h.can_redo());
}

#[test]
fn undo_then_redo_returns_to_the_same_state() {
    let mut h = HistoryLedger::new(10);
    h.push("baseline", snap_at(0.0));
    h.push("move", snap_at(10.0));
    h.push("move", snap_at(20.0));

    assert_eq!(h.undo().map(x_of), Some(10.0));
    assert_eq!(h.undo().map(x_of), Some(0.0));
    assert!(h.undo().is_none());
    assert_eq!(h.cursor(), Some(0));

    assert_eq!(h.redo().map(x_of), Some(10.0));
    assert_eq!(h.redo().map(x_of), Some(20.0));
    assert!(h.redo().is_none());
    assert_eq!(h.current().map(x_of), Some(20.0));
}

#[test]
fn push_after_undo_drops_the_future() {
    let mut h = HistoryLedger::new(10);
    h.push("baseline", snap_at(0.0));
    h.push("a", snap_at(1.0));
    h.push("b", snap_at(2.0));
    h.undo();
    h.push("c", snap_at(3.0));

    assert_eq!(h.labels().collect::<Vec<_>>(), vec!["baseline", "a", "c"]);
    assert!(!h.can_redo());
    assert_eq!(h.undo().map(x_of), Some(1.0));
}

#[test]
fn capacity_drops_oldest_entries() {
    let mut h = HistoryLedger::new(3);
    for i in 0..5 {
        h.push(format!("step {i}"), snap_at(f64::from(i)));
    }
    assert_eq!(h.len(), 3);
    assert_eq!(h.cursor(), Some(2));
    assert_eq!(
        h.labels().collect::<Vec<_>>(),
        vec!["step 2", "step 3", "step 4"]
    );

    let zero = HistoryLedger::new(0);
    assert_eq!(zero.capacity(), 1);
}

#[test]
fn snapshots_are_independent_copies() {
    let mut h = HistoryLedger::new(10);
    let mut live = snap_at(5.0);
    h.push("baseline", live.clone());
    live.transforms
        .set(&ElementId::from("asset-1"), &TransformPatch::position(99.0, 0.0));
    assert_eq!(h.current().map(x_of), Some(5.0));
}
