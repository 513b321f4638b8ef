use super::*;
use crate::foundation::core::Viewport;

fn window() -> Window {
    Window::new(Viewport {
        scroll_y: 0.0,
        width: 1000.0,
        height: 800.0,
    })
}

#[test]
fn turbulence_frequency_stays_above_floor() {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        POINTER_CENTER,
    ];
    let mut frames = 0.0;
    while frames < 20_000.0 {
        for p in corners {
            let t = turbulence_params(frames, p);
            assert!(t.base_frequency_x >= MIN_BASE_FREQUENCY);
            assert!(t.base_frequency_y >= MIN_BASE_FREQUENCY);
        }
        frames += 7.25;
    }

    // Far outside the supported pointer domain the floor still holds.
    let t = turbulence_params(0.0, Point::new(-100.0, -100.0));
    assert_eq!(t.base_frequency_x, MIN_BASE_FREQUENCY);
    assert_eq!(t.base_frequency_y, MIN_BASE_FREQUENCY);
    let t = turbulence_params(f64::NAN, Point::new(f64::NAN, 0.5));
    assert!(t.base_frequency_x >= MIN_BASE_FREQUENCY);
}

#[test]
fn centered_pointer_gives_breathing_only_baseline() {
    let t = turbulence_params(0.0, POINTER_CENTER);
    assert!((t.base_frequency_x - 0.01).abs() < 1e-12);
    assert!((t.base_frequency_y - 0.012).abs() < 1e-12);
}

#[test]
fn normalized_pointer_is_clamped_inside_unit_square() {
    let c = Rect::new(100.0, 200.0, 500.0, 400.0);
    let mut y = 150.0;
    while y <= 450.0 {
        let mut x = 50.0;
        while x <= 550.0 {
            let p = normalize_pointer(Point::new(x, y), c);
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
            x += 25.0;
        }
        y += 25.0;
    }
    assert_eq!(
        normalize_pointer(Point::new(300.0, 300.0), c),
        Point::new(0.5, 0.5)
    );
    assert_eq!(
        normalize_pointer(Point::new(1.0, 1.0), Rect::new(0.0, 0.0, 0.0, 10.0)),
        POINTER_CENTER
    );
}

#[test]
fn leave_resets_pointer_to_exact_center() {
    let mut r = RippleEffect::new("/images/about.png");
    let c = Rect::new(0.0, 0.0, 200.0, 100.0);
    r.on_pointer_move(Point::new(180.0, 10.0), c, TimeMs(0));
    assert_eq!(r.raw_pointer(), Point::new(0.9, 0.1));
    r.on_pointer_leave(TimeMs(10));
    assert_eq!(r.raw_pointer(), Point::new(0.5, 0.5));
}

#[test]
fn frame_loop_runs_only_while_visible() {
    let mut w = window();
    let mut r = RippleEffect::new("/images/about.png");
    let far = Rect::new(0.0, 5000.0, 500.0, 5500.0);
    let near = Rect::new(0.0, 820.0, 500.0, 1320.0);

    assert!(!r.update_visibility(&mut w, Some(far)));
    r.on_frame(&w, 16.0);
    assert_eq!(r.frames(), 0.0);
    assert_eq!(w.active_frame_callbacks(), 0);

    // 20px below the fold, inside the 50px margin.
    assert!(r.update_visibility(&mut w, Some(near)));
    assert_eq!(w.active_frame_callbacks(), 1);
    r.on_frame(&w, 16.0);
    r.on_frame(&w, 16.0);
    assert_eq!(r.frames(), 1.0);

    assert!(!r.update_visibility(&mut w, Some(far)));
    assert_eq!(w.active_frame_callbacks(), 0);
    r.on_frame(&w, 16.0);
    assert_eq!(r.frames(), 1.0);
}

#[test]
fn unmount_cancels_frame_loop() {
    let mut w = window();
    let mut r = RippleEffect::new("/images/about.png");
    r.update_visibility(&mut w, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    assert!(r.is_animating());
    r.unmount(&mut w);
    r.unmount(&mut w);
    assert_eq!(w.active_frame_callbacks(), 0);
    assert!(!r.is_animating());
}

#[test]
fn distortion_relaxes_after_pointer_leaves() {
    let mut w = window();
    let mut r = RippleEffect::new("/images/about.png");
    let c = Rect::new(0.0, 0.0, 400.0, 400.0);
    r.update_visibility(&mut w, Some(c));
    r.on_pointer_move(Point::new(400.0, 400.0), c, TimeMs(0));
    for _ in 0..200 {
        r.on_frame(&w, 16.0);
    }
    let pushed = r.params();
    let baseline = turbulence_params(r.frames(), POINTER_CENTER);
    assert!(pushed.base_frequency_x > baseline.base_frequency_x + 0.004);

    r.on_pointer_leave(TimeMs(3_200));
    for _ in 0..300 {
        r.on_frame(&w, 16.0);
    }
    let relaxed = r.params();
    let baseline = turbulence_params(r.frames(), POINTER_CENTER);
    assert!((relaxed.base_frequency_x - baseline.base_frequency_x).abs() < 1e-4);
    assert!((relaxed.base_frequency_y - baseline.base_frequency_y).abs() < 1e-4);
}

#[test]
fn hover_scale_eases_in_and_out() {
    let mut r = RippleEffect::new("/images/about.png");
    let c = Rect::new(0.0, 0.0, 100.0, 100.0);
    r.on_pointer_move(Point::new(10.0, 10.0), c, TimeMs(0));
    assert!(r.is_hovered());
    assert_eq!(r.sample(TimeMs(1_200)).hover_scale, HOVER_SCALE);
    r.on_pointer_leave(TimeMs(2_000));
    assert_eq!(r.sample(TimeMs(3_200)).hover_scale, 1.0);
}
