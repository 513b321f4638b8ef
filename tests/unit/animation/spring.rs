use super::*;

fn run(spring: &mut Spring, total_ms: u64, dt_ms: u64) {
    let mut t = 0;
    while t < total_ms {
        spring.step(dt_ms as f64);
        t += dt_ms;
    }
}

#[test]
fn springs_settle_on_target_for_all_damping_regimes() {
    for cfg in [
        SpringConfig::new(400.0, 25.0),
        SpringConfig::new(200.0, 20.0),
        SpringConfig::new(50.0, 20.0),
        SpringConfig::new(100.0, 30.0).with_rest_delta(0.001),
        SpringConfig::new(100.0, 20.0),
    ] {
        let mut s = Spring::new(0.0, cfg);
        s.set_target(100.0);
        run(&mut s, 4000, 16);
        assert_eq!(s.value(), 100.0, "{cfg:?}");
        assert!(s.is_at_rest());
    }
}

#[test]
fn overdamped_spring_never_overshoots() {
    let mut s = Spring::new(0.0, SpringConfig::new(50.0, 20.0));
    s.set_target(1.0);
    let mut prev = 0.0;
    for _ in 0..200 {
        let v = s.step(16.0);
        assert!(v <= 1.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn stepping_is_independent_of_frame_split() {
    let cfg = SpringConfig::new(200.0, 20.0);
    let mut a = Spring::new(-100.0, cfg);
    let mut b = Spring::new(-100.0, cfg);
    a.set_target(300.0);
    b.set_target(300.0);

    for _ in 0..10 {
        a.step(16.0);
    }
    b.step(160.0);

    assert!((a.value() - b.value()).abs() < 1e-9);
    assert!((a.velocity() - b.velocity()).abs() < 1e-6);
}

#[test]
fn long_frame_does_not_blow_up() {
    let mut s = Spring::new(0.0, SpringConfig::new(400.0, 25.0));
    s.set_target(50.0);
    let v = s.step(10_000.0);
    assert_eq!(v, 50.0);
}

#[test]
fn leader_spring_outpaces_trailer() {
    let mut dot = SpringVec2::new(Point::new(0.0, 0.0), SpringConfig::new(400.0, 25.0));
    let mut ring = SpringVec2::new(Point::new(0.0, 0.0), SpringConfig::new(200.0, 20.0));
    let target = Point::new(100.0, 100.0);
    dot.set_target(target);
    ring.set_target(target);

    let d = dot.step(50.0);
    let r = ring.step(50.0);
    assert!(d.x > r.x);
    assert!(d.y > r.y);
}

#[test]
fn non_finite_targets_are_ignored_and_zero_dt_is_noop() {
    let mut s = Spring::new(3.0, SpringConfig::new(100.0, 10.0));
    s.set_target(f64::NAN);
    assert_eq!(s.target(), 3.0);
    s.set_target(10.0);
    assert_eq!(s.step(0.0), 3.0);
    assert_eq!(s.step(-5.0), 3.0);
}

#[test]
fn critical_damping_ratio_is_one() {
    assert!((SpringConfig::new(100.0, 20.0).damping_ratio() - 1.0).abs() < 1e-12);
}

#[test]
fn jump_stops_motion() {
    let mut s = Spring::new(0.0, SpringConfig::new(100.0, 10.0));
    s.set_target(10.0);
    s.step(16.0);
    s.jump(4.0);
    assert!(s.is_at_rest());
    assert_eq!(s.step(16.0), 4.0);
}
