use super::*;

#[test]
fn ease_endpoints_are_exact() {
    for e in [
        Ease::Linear,
        Ease::EaseOut,
        Ease::EaseInOut,
        Ease::EXPO_OUT,
    ] {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert_eq!(e.apply(1.0), 1.0, "{e:?}");
    }
}

#[test]
fn ease_clamps_out_of_range_input() {
    assert_eq!(Ease::Linear.apply(-1.0), 0.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
    assert_eq!(Ease::EXPO_OUT.apply(f64::NAN), 0.0);
}

#[test]
fn linear_bezier_is_identity() {
    let e = Ease::CubicBezier {
        x1: 0.25,
        y1: 0.25,
        x2: 0.75,
        y2: 0.75,
    };
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((e.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn expo_out_front_loads_progress() {
    let mid = Ease::EXPO_OUT.apply(0.5);
    assert!(mid > 0.9, "expected expo-out to be mostly settled at t=0.5, got {mid}");

    let mut prev = 0.0;
    for i in 0..=50 {
        let v = Ease::EXPO_OUT.apply(i as f64 / 50.0);
        assert!(v + 1e-9 >= prev);
        prev = v;
    }
}

#[test]
fn ease_out_is_above_linear() {
    for i in 1..10 {
        let t = i as f64 / 10.0;
        assert!(Ease::EaseOut.apply(t) > t);
    }
}

#[test]
fn curves_deserialize_from_snake_case_tags() {
    let e: Ease = serde_json::from_str(r#""ease_in_out""#).unwrap();
    assert_eq!(e, Ease::EaseInOut);
    assert!(serde_json::from_str::<Ease>(r#""in_quad""#).is_err());
}
