use super::*;

fn canvas() -> Canvas {
    Canvas::new(1600.0, 900.0)
}

fn sib(x: f64, y: f64, w: f64, h: f64) -> Sibling {
    Sibling {
        bounds: Bounds::new(x, y, w, h),
        visible: true,
    }
}

#[test]
fn disabled_returns_input_untouched() {
    let opts = SnapOpts {
        enabled: false,
        ..SnapOpts::default()
    };
    let r = Bounds::new(-40.0, 3.0, 200.0, 150.0);
    let out = snap_rect(r, canvas(), &[], &opts);
    assert_eq!(out.bounds, r);
    assert!(out.guides.is_empty());
}

#[test]
fn centers_on_canvas_midpoint() {
    let r = Bounds::new(698.0, 373.0, 200.0, 150.0);
    let out = snap_rect(r, canvas(), &[], &SnapOpts::default());
    assert_eq!(out.bounds, Bounds::new(700.0, 375.0, 200.0, 150.0));
    assert_eq!(out.guides.vertical.as_slice(), &[800.0]);
    assert_eq!(out.guides.horizontal.as_slice(), &[450.0]);
}

#[test]
fn snaps_to_near_and_far_canvas_edges() {
    let r = Bounds::new(3.0, 900.0 - 150.0 - 2.0, 210.0, 150.0);
    let out = snap_rect(r, canvas(), &[], &SnapOpts::default());
    assert_eq!(out.bounds.x, 0.0);
    assert_eq!(out.bounds.y, 750.0);
    assert!(out.guides.vertical.contains(&0.0));
    assert!(out.guides.horizontal.contains(&900.0));
}

#[test]
fn grid_snap_emits_no_guide() {
    let r = Bounds::new(243.0, 118.0, 130.0, 70.0);
    let out = snap_rect(r, canvas(), &[], &SnapOpts::default());
    assert_eq!((out.bounds.x, out.bounds.y), (240.0, 120.0));
    assert!(out.guides.is_empty());
}

#[test]
fn aligns_to_sibling_edges_and_centers() {
    let opts = SnapOpts {
        grid: 0.0,
        ..SnapOpts::default()
    };
    let siblings = [sib(313.0, 207.0, 100.0, 100.0)];

    let left = snap_rect(Bounds::new(316.0, 500.0, 90.0, 90.0), canvas(), &siblings, &opts);
    assert_eq!(left.bounds.x, 313.0);
    assert_eq!(left.guides.vertical.as_slice(), &[313.0]);

    // Right edges: 333 + 77 = 410 vs 413.
    let right = snap_rect(Bounds::new(333.0, 500.0, 77.0, 90.0), canvas(), &siblings, &opts);
    assert_eq!(right.bounds.x, 336.0);
    assert!(right.guides.vertical.contains(&413.0));

    // Centers on y: 220 + 35 = 255 vs 257.
    let mid = snap_rect(Bounds::new(600.0, 220.0, 90.0, 70.0), canvas(), &siblings, &opts);
    assert_eq!(mid.bounds.y, 222.0);
    assert_eq!(mid.guides.horizontal.as_slice(), &[257.0]);
}

#[test]
fn hidden_siblings_are_ignored() {
    let opts = SnapOpts {
        grid: 0.0,
        ..SnapOpts::default()
    };
    let hidden = Sibling {
        bounds: Bounds::new(313.0, 207.0, 100.0, 100.0),
        visible: false,
    };
    let out = snap_rect(Bounds::new(316.0, 500.0, 90.0, 90.0), canvas(), &[hidden], &opts);
    assert_eq!(out.bounds.x, 316.0);
    assert!(out.guides.is_empty());
}

#[test]
fn canvas_targets_outrank_siblings() {
    let opts = SnapOpts {
        grid: 0.0,
        ..SnapOpts::default()
    };
    // Sibling left edge at 2 would win if siblings came first.
    let siblings = [sib(2.0, 400.0, 50.0, 50.0)];
    let out = snap_rect(Bounds::new(4.0, 100.0, 60.0, 60.0), canvas(), &siblings, &opts);
    assert_eq!(out.bounds.x, 0.0);
}

#[test]
fn clamps_before_and_after_snapping() {
    let out = snap_rect(
        Bounds::new(-80.0, 1000.0, 200.0, 150.0),
        canvas(),
        &[],
        &SnapOpts::default(),
    );
    assert_eq!(out.bounds, Bounds::new(0.0, 750.0, 200.0, 150.0));

    // A sibling hanging off the right edge must not pull the rectangle off-canvas.
    let opts = SnapOpts {
        grid: 0.0,
        ..SnapOpts::default()
    };
    let siblings = [sib(1500.0, 10.0, 300.0, 40.0)];
    let out = snap_rect(Bounds::new(1300.0, 300.0, 200.0, 100.0), canvas(), &siblings, &opts);
    assert!(out.bounds.is_within(canvas()));
}

#[test]
fn snapping_is_idempotent_and_contained() {
    let siblings = [
        sib(120.0, 80.0, 200.0, 150.0),
        sib(733.0, 411.0, 180.0, 90.0),
        sib(1402.0, 702.0, 150.0, 150.0),
    ];
    let opts = SnapOpts::default();
    for xi in 0..40 {
        for yi in 0..25 {
            let x = -50.0 + f64::from(xi) * 41.3;
            let y = -50.0 + f64::from(yi) * 38.7;
            for (w, h) in [(200.0, 150.0), (206.0, 77.0), (50.0, 50.0)] {
                let once = snap_rect(Bounds::new(x, y, w, h), canvas(), &siblings, &opts);
                let twice = snap_rect(once.bounds, canvas(), &siblings, &opts);
                assert_eq!(once, twice, "not idempotent at ({x}, {y}, {w}, {h})");
                assert!(once.bounds.is_within(canvas()));
                assert_eq!((once.bounds.width, once.bounds.height), (w, h));
            }
        }
    }
}
