use super::*;
use crate::eval::visibility::MIN_WINDOW_SECS;
use crate::foundation::core::MIN_ELEMENT_SIZE;
use crate::interaction::gesture::GestureKind;

fn ws() -> Workspace {
    Workspace::new(WorkspaceOpts::default())
}

fn asset(ws: &mut Workspace, src: &str, role: Role) -> ElementId {
    ws.add_asset(SourceRef::new(src), role).unwrap()
}

#[test]
fn fresh_workspace_has_a_baseline_entry() {
    let ws = ws();
    assert_eq!(ws.history_cursor(), Some(0));
    assert_eq!(ws.canvas(), Canvas::new(1344.0, 756.0));
    assert!(ws.elements().is_empty());
    assert_eq!(ws.playback().duration, DEFAULT_COMPOSITION_SECS);
}

#[test]
fn zoom_only_changes_display_size() {
    let mut ws = ws();
    ws.set_zoom(0.5);
    assert_eq!(ws.display_size(), (672.0, 378.0));
    ws.set_zoom(-1.0);
    assert_eq!(ws.zoom(), 1.0);
    assert_eq!(ws.canvas(), Canvas::new(1344.0, 756.0));
}

#[test]
fn added_elements_append_on_the_timeline() {
    let mut ws = ws();
    let first = asset(&mut ws, "a1", Role::Overlay);
    let second = asset(&mut ws, "a2", Role::Overlay);

    let t1 = ws.store().get(&first);
    let t2 = ws.store().get(&second);
    assert_eq!((t1.start_time, t1.end_time, t1.track), (Some(0.0), Some(5.0), 0));
    assert_eq!((t2.start_time, t2.end_time, t2.track), (Some(5.0), Some(10.0), 1));
    assert_eq!(t1.z_index, Some(4));
}

#[test]
fn scene_duration_drives_clip_length_and_composition_grows() {
    let mut ws = ws();
    let id = ws
        .add_scene(SourceRef::new("s1").with_duration(62.0), Role::Primary)
        .unwrap();
    assert_eq!(ws.store().get(&id).end_time, Some(62.0));
    assert_eq!(ws.playback().duration, 67.0);
    assert_eq!(ws.store().get(&id).z_index, Some(1));
}

#[test]
fn duplicate_adds_are_ignored() {
    let mut ws = ws();
    asset(&mut ws, "a1", Role::Overlay);
    let cursor = ws.history_cursor();
    assert_eq!(ws.add_asset(SourceRef::new("a1"), Role::Effect), None);
    assert_eq!(ws.history_cursor(), cursor);
    assert_eq!(ws.selections().len(), 1);
}

#[test]
fn new_elements_keep_staggered_layout() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Overlay);
    let b = asset(&mut ws, "a2", Role::Overlay);
    assert_eq!(ws.store().get(&a).bounds(), Bounds::new(50.0, 50.0, 200.0, 150.0));
    assert_eq!(ws.store().get(&b).bounds(), Bounds::new(70.0, 70.0, 200.0, 150.0));
}

#[test]
fn remove_element_drops_selection_and_transform() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Overlay);
    assert!(ws.remove_element(&a));
    assert!(!ws.store().contains(&a));
    assert!(ws.selections().is_empty());
    assert!(!ws.remove_element(&a));
    assert!(!ws.remove_element(&ElementId::from("bogus")));

    assert!(ws.undo());
    assert!(ws.store().contains(&a));
    assert_eq!(ws.selections().len(), 1);
}

#[test]
fn z_steps_are_undoable_and_floored() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Background);
    assert_eq!(ws.element(&a).unwrap().z_index, 0);
    assert!(ws.send_backward(&a));
    assert_eq!(ws.element(&a).unwrap().z_index, 0);
    assert!(ws.bring_forward(&a));
    assert!(ws.bring_forward(&a));
    assert_eq!(ws.element(&a).unwrap().z_index, 2);
    assert!(ws.undo());
    assert_eq!(ws.element(&a).unwrap().z_index, 1);
}

#[test]
fn property_edits_clamp() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Overlay);
    ws.set_opacity(&a, 140.0);
    ws.set_rotation(&a, -400.0);
    let t = ws.store().get(&a);
    assert_eq!(t.opacity, 100.0);
    assert_eq!(t.rotation, -180.0);

    ws.set_opacity(&a, -3.0);
    assert_eq!(ws.store().get(&a).opacity, 0.0);
    assert!(!ws.set_opacity(&ElementId::from("asset-missing"), 50.0));
}

#[test]
fn edits_materialize_unstored_elements() {
    let mut sel = Selections::new();
    sel.push(
        ElementKind::Asset,
        SelectionItem::new(SourceRef::new("a1"), Role::Effect),
    );
    sel.push(
        ElementKind::Asset,
        SelectionItem::new(SourceRef::new("a2"), Role::Effect),
    );
    let record =
        CompositionRecord::default().with_state(&sel, &TransformStore::new(), &VideoFormat::default());

    let mut ws = Workspace::from_record(record, WorkspaceOpts::default());
    let a2 = ElementId::from("asset-a2");
    assert!(!ws.store().contains(&a2));
    ws.set_visible(&a2, false);

    let t = ws.store().get(&a2);
    assert_eq!(t.bounds(), Bounds::new(70.0, 70.0, 200.0, 150.0));
    assert_eq!(t.z_index, Some(5));
    assert!(!t.visible);
}

#[test]
fn time_window_edits_are_repaired() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Overlay);
    let inverted = TimeWindow {
        start: Some(4.0),
        end: Some(1.0),
    };
    ws.set_time_window(&a, inverted);
    let w = ws.store().get(&a).window();
    assert_eq!(w.start, Some(4.0));
    assert_eq!(w.end, Some(4.0 + MIN_WINDOW_SECS));

    ws.trim_clip_end(&a, 100.0);
    assert_eq!(ws.store().get(&a).end_time, Some(ws.playback().duration));
    ws.trim_clip_start(&a, -10.0);
    assert_eq!(ws.store().get(&a).start_time, Some(0.0));
}

#[test]
fn drag_commits_once_and_undo_restores() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Overlay);
    let before = ws.history_cursor();

    ws.begin_drag(&a, Point::new(0.0, 0.0)).unwrap();
    ws.pointer_move(Point::new(101.0, 0.0), Modifiers::default());
    ws.pointer_move(Point::new(203.0, 17.0), Modifiers::default());
    let commit = ws.pointer_up().unwrap();
    assert_eq!(commit.kind, GestureKind::Drag);
    assert_eq!(ws.history_cursor(), before.map(|c| c + 1));

    let moved = ws.store().get(&a).bounds();
    assert_ne!(moved, Bounds::new(50.0, 50.0, 200.0, 150.0));
    assert!(ws.undo());
    assert_eq!(ws.store().get(&a).bounds(), Bounds::new(50.0, 50.0, 200.0, 150.0));
    assert!(ws.redo());
    assert_eq!(ws.store().get(&a).bounds(), moved);
}

#[test]
fn locked_and_canvas_filling_elements_reject_gestures() {
    let mut ws = ws();
    let bg = ws.add_scene(SourceRef::new("bg"), Role::Background).unwrap();
    let a = asset(&mut ws, "a1", Role::Overlay);
    ws.set_locked(&a, true);
    let snapshot = ws.store().clone();

    assert_eq!(
        ws.begin_drag(&bg, Point::ZERO),
        Err(RejectReason::FillsCanvas)
    );
    assert_eq!(
        ws.begin_resize(&a, ResizeHandle::Se, Point::ZERO),
        Err(RejectReason::Locked)
    );
    assert!(!ws.gesture_active());
    assert_eq!(ws.store(), &snapshot);
}

#[test]
fn cancel_gesture_records_nothing() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Overlay);
    let cursor = ws.history_cursor();
    ws.begin_resize(&a, ResizeHandle::Se, Point::ZERO).unwrap();
    ws.pointer_move(Point::new(300.0, 300.0), Modifiers::default());
    assert!(ws.readout().is_some());
    assert_eq!(ws.cancel_gesture(), Some(a.clone()));
    assert_eq!(ws.store().get(&a).bounds(), Bounds::new(50.0, 50.0, 200.0, 150.0));
    assert_eq!(ws.history_cursor(), cursor);
    assert!(ws.readout().is_none());
}

#[test]
fn visible_now_follows_the_playhead() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Overlay);
    let b = asset(&mut ws, "a2", Role::Overlay);
    ws.playback_mut().seek(5.0);
    let ids: Vec<ElementId> = ws.visible_now().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![b.clone()]);
    ws.playback_mut().seek(4.999);
    let ids: Vec<ElementId> = ws.visible_now().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![a]);

    let bars = ws.timeline_bars();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[1].id, b);
    assert_eq!((bars[1].start, bars[1].end), (5.0, 10.0));
}

#[test]
fn history_depth_is_configurable() {
    let opts = WorkspaceOpts {
        history_depth: 3,
        ..WorkspaceOpts::default()
    };
    let mut ws = Workspace::new(opts);
    for i in 0..6 {
        ws.add_asset(SourceRef::new(format!("a{i}")), Role::Overlay);
    }
    assert_eq!(ws.history().len(), 3);
    assert!(ws.undo());
    assert!(ws.undo());
    assert!(!ws.undo());
    assert_eq!(ws.selections().len(), 4);
}

#[test]
fn options_parse_with_defaults() {
    let opts = WorkspaceOpts::from_json_str(r#"{"format":"tiktok","snap":{"grid":10}}"#).unwrap();
    assert_eq!(opts.format, "tiktok");
    assert_eq!(opts.snap.grid, 10.0);
    assert!(opts.snap.enabled);
    assert_eq!(opts.history_depth, DEFAULT_HISTORY_DEPTH);

    let ws = Workspace::new(opts);
    assert_eq!(ws.canvas(), Canvas::new(864.0, 1536.0));
    assert!(WorkspaceOpts::from_json_str(r#"{"zoom":"big"}"#).is_err());
}

#[test]
fn patches_keep_the_size_floor_and_finite_geometry() {
    let mut ws = ws();
    let a = asset(&mut ws, "a1", Role::Overlay);
    ws.patch(
        &a,
        &TransformPatch {
            width: Some(10.0),
            height: Some(5.0),
            opacity: Some(250.0),
            ..TransformPatch::default()
        },
    );
    let t = ws.store().get(&a);
    assert_eq!((t.width, t.height), (MIN_ELEMENT_SIZE, MIN_ELEMENT_SIZE));
    assert_eq!(t.opacity, 100.0);

    ws.patch(
        &a,
        &TransformPatch {
            x: Some(f64::INFINITY),
            width: Some(f64::NAN),
            start_time: Some(8.0),
            end_time: Some(3.0),
            ..TransformPatch::default()
        },
    );
    let t = ws.store().get(&a);
    assert_eq!((t.x, t.width), (50.0, MIN_ELEMENT_SIZE));
    assert_eq!(t.end_time, Some(8.0 + MIN_WINDOW_SECS));

    ws.begin_drag(&a, Point::ZERO).unwrap();
    let live = ws
        .pointer_move(Point::new(f64::NAN, 4.0), Modifiers::default())
        .unwrap();
    assert!(live.x.is_finite() && live.y.is_finite());
    ws.pointer_move(Point::new(30.0, 30.0), Modifiers::default());
    ws.pointer_up().unwrap();
    let json = ws.transforms_json().unwrap();
    assert!(TransformStore::from_json_str(&json).is_ok());
}
