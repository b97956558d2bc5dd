use super::*;

fn canvas() -> Canvas {
    Canvas::new(1344.0, 756.0)
}

fn resize(start: Bounds, handle: ResizeHandle, dx: f64, dy: f64) -> Bounds {
    apply_resize(start, handle, Vec2::new(dx, dy), canvas(), &ResizeOpts::default())
}

fn resize_keep(start: Bounds, handle: ResizeHandle, dx: f64, dy: f64) -> Bounds {
    let opts = ResizeOpts {
        keep_aspect: true,
        ..ResizeOpts::default()
    };
    apply_resize(start, handle, Vec2::new(dx, dy), canvas(), &opts)
}

#[test]
fn handle_names_round_trip() {
    for h in ResizeHandle::ALL {
        assert_eq!(ResizeHandle::parse(h.as_str()), Some(h));
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{h}\""));
    }
    assert_eq!(ResizeHandle::parse("north"), None);
    assert_eq!(ResizeHandle::Se.cursor(), "nwse-resize");
    assert_eq!(ResizeHandle::W.cursor(), "ew-resize");
}

#[test]
fn west_handle_floors_width_with_right_edge_fixed() {
    let start = Bounds::new(100.0, 100.0, 60.0, 80.0);
    let out = resize(start, ResizeHandle::W, 20.0, 0.0);
    assert_eq!(out, Bounds::new(110.0, 100.0, 50.0, 80.0));
    assert_eq!(out.right(), start.right());
}

#[test]
fn corners_move_their_two_edges() {
    let start = Bounds::new(100.0, 100.0, 200.0, 150.0);
    assert_eq!(
        resize(start, ResizeHandle::Se, 30.0, 20.0),
        Bounds::new(100.0, 100.0, 230.0, 170.0)
    );
    assert_eq!(
        resize(start, ResizeHandle::Nw, -30.0, -20.0),
        Bounds::new(70.0, 80.0, 230.0, 170.0)
    );
    assert_eq!(
        resize(start, ResizeHandle::Ne, 10.0, 10.0),
        Bounds::new(100.0, 110.0, 210.0, 140.0)
    );
    assert_eq!(
        resize(start, ResizeHandle::Sw, 10.0, 10.0),
        Bounds::new(110.0, 100.0, 190.0, 160.0)
    );
}

#[test]
fn edge_handles_ignore_the_other_axis() {
    let start = Bounds::new(100.0, 100.0, 200.0, 150.0);
    assert_eq!(
        resize(start, ResizeHandle::E, 40.0, 99.0),
        Bounds::new(100.0, 100.0, 240.0, 150.0)
    );
    assert_eq!(
        resize(start, ResizeHandle::S, 99.0, -40.0),
        Bounds::new(100.0, 100.0, 200.0, 110.0)
    );
}

#[test]
fn north_handle_floors_height_with_bottom_edge_fixed() {
    let start = Bounds::new(100.0, 100.0, 200.0, 150.0);
    let out = resize(start, ResizeHandle::N, 0.0, 140.0);
    assert_eq!(out, Bounds::new(100.0, 200.0, 200.0, 50.0));
}

#[test]
fn moving_edges_are_trimmed_at_the_canvas() {
    let east = resize(Bounds::new(1200.0, 100.0, 100.0, 100.0), ResizeHandle::E, 100.0, 0.0);
    assert_eq!(east, Bounds::new(1200.0, 100.0, 144.0, 100.0));

    let west = resize(Bounds::new(20.0, 100.0, 100.0, 100.0), ResizeHandle::W, -50.0, 0.0);
    assert_eq!(west, Bounds::new(0.0, 100.0, 120.0, 100.0));

    let south = resize(Bounds::new(10.0, 700.0, 100.0, 50.0), ResizeHandle::S, 0.0, 500.0);
    assert_eq!(south, Bounds::new(10.0, 700.0, 100.0, 56.0));
}

#[test]
fn keep_aspect_corner_follows_width() {
    let start = Bounds::new(100.0, 100.0, 200.0, 100.0);
    assert_eq!(
        resize_keep(start, ResizeHandle::Se, 100.0, -70.0),
        Bounds::new(100.0, 100.0, 300.0, 150.0)
    );
    assert_eq!(
        resize_keep(start, ResizeHandle::Nw, -100.0, 5.0),
        Bounds::new(0.0, 50.0, 300.0, 150.0)
    );
}

#[test]
fn keep_aspect_edge_recenters_other_axis() {
    let start = Bounds::new(100.0, 100.0, 200.0, 100.0);
    assert_eq!(
        resize_keep(start, ResizeHandle::N, 0.0, -50.0),
        Bounds::new(50.0, 50.0, 300.0, 150.0)
    );
    assert_eq!(
        resize_keep(start, ResizeHandle::E, 40.0, 0.0),
        Bounds::new(100.0, 90.0, 240.0, 120.0)
    );
}

#[test]
fn keep_aspect_floor_scales_uniformly() {
    let start = Bounds::new(100.0, 100.0, 100.0, 50.0);
    let out = resize_keep(start, ResizeHandle::Se, -60.0, 0.0);
    assert_eq!(out, Bounds::new(100.0, 100.0, 100.0, 50.0));
    assert_eq!(out.width / out.height, 2.0);
}

#[test]
fn every_resize_respects_floor_and_canvas() {
    let starts = [
        Bounds::new(0.0, 0.0, 200.0, 150.0),
        Bounds::new(600.0, 300.0, 50.0, 50.0),
        Bounds::new(1144.0, 606.0, 200.0, 150.0),
        Bounds::new(320.0, 40.0, 900.0, 120.0),
    ];
    let deltas = [-2000.0, -317.5, -60.0, -1.0, 0.0, 3.0, 49.0, 420.25, 2500.0];
    for keep_aspect in [false, true] {
        let opts = ResizeOpts {
            keep_aspect,
            ..ResizeOpts::default()
        };
        for start in starts {
            for handle in ResizeHandle::ALL {
                for dx in deltas {
                    for dy in deltas {
                        let out = apply_resize(start, handle, Vec2::new(dx, dy), canvas(), &opts);
                        let ctx = format!("{start:?} {handle} ({dx}, {dy}) keep={keep_aspect}");
                        assert!(out.width >= MIN_ELEMENT_SIZE, "width floor: {ctx}");
                        assert!(out.height >= MIN_ELEMENT_SIZE, "height floor: {ctx}");
                        assert!(out.is_within(canvas()), "containment: {out:?} {ctx}");
                    }
                }
            }
        }
    }
}

#[test]
fn far_edge_stays_pinned_inside_canvas() {
    let start = Bounds::new(400.0, 200.0, 200.0, 150.0);
    for dx in [-300.0, -120.0, 0.0, 80.0, 149.0, 151.0, 600.0] {
        let out = resize(start, ResizeHandle::W, dx, 0.0);
        assert_eq!(out.right(), start.right(), "dx = {dx}");
    }
    for dy in [-150.0, -10.0, 99.0, 101.0, 500.0] {
        let out = resize(start, ResizeHandle::N, 0.0, dy);
        assert_eq!(out.bottom(), start.bottom(), "dy = {dy}");
    }
}
