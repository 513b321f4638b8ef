use super::*;
use crate::foundation::core::Viewport;
use crate::foundation::error::AtelierError;

#[test]
fn mount_registers_exactly_one_listener_pair() {
    let mut w = Window::new(Viewport::default());
    let cursor = CursorFollower::mount(&mut w).unwrap();
    assert_eq!(w.listener_count(ListenerKind::PointerMove), 1);
    assert_eq!(w.listener_count(ListenerKind::PointerOver), 1);

    let err = CursorFollower::mount(&mut w).unwrap_err();
    assert!(matches!(err, AtelierError::Singleton(_)));
    assert_eq!(w.listener_count(ListenerKind::PointerMove), 1);

    cursor.unmount(&mut w);
    assert_eq!(w.listener_count(ListenerKind::PointerMove), 0);
    assert_eq!(w.listener_count(ListenerKind::PointerOver), 0);
    assert!(!w.holds_singleton(CURSOR_SLOT));

    // The slot is free again after teardown.
    CursorFollower::mount(&mut w).unwrap().unmount(&mut w);
}

#[test]
fn separate_windows_each_get_a_cursor() {
    let mut a = Window::new(Viewport::default());
    let mut b = Window::new(Viewport::default());
    let ca = CursorFollower::mount(&mut a).unwrap();
    let cb = CursorFollower::mount(&mut b).unwrap();
    ca.unmount(&mut a);
    cb.unmount(&mut b);
}

#[test]
fn dot_leads_and_ring_trails() {
    let mut w = Window::new(Viewport::default());
    let mut c = CursorFollower::mount(&mut w).unwrap();
    assert_eq!(c.sample(TimeMs(0)).dot, CURSOR_START);

    c.on_pointer_move(Point::new(400.0, 300.0));
    c.on_frame(16.0);
    c.on_frame(16.0);
    c.on_frame(16.0);
    let f = c.sample(TimeMs(48));
    assert!(f.dot.x > f.ring.x);
    assert!(f.dot.y > f.ring.y);

    for _ in 0..250 {
        c.on_frame(16.0);
    }
    let f = c.sample(TimeMs(4_000));
    assert_eq!(f.dot, Point::new(400.0, 300.0));
    assert_eq!(f.ring, Point::new(400.0, 300.0));
    c.unmount(&mut w);
}

#[test]
fn hover_over_interactive_scales_dot_and_hides_ring() {
    let mut w = Window::new(Viewport::default());
    let mut c = CursorFollower::mount(&mut w).unwrap();

    let idle = c.sample(TimeMs(0));
    assert_eq!(
        (idle.dot_scale, idle.ring_scale, idle.ring_opacity),
        (1.0, 1.0, 0.5)
    );

    c.on_pointer_over(&ElementInfo::new("span").inside("a"), TimeMs(100));
    assert!(c.is_hovering());
    let f = c.sample(TimeMs(300));
    assert_eq!((f.dot_scale, f.ring_scale, f.ring_opacity), (2.5, 1.5, 0.0));

    c.on_pointer_over(&ElementInfo::new("p"), TimeMs(400));
    assert!(!c.is_hovering());
    let f = c.sample(TimeMs(600));
    assert_eq!((f.dot_scale, f.ring_scale, f.ring_opacity), (1.0, 1.0, 0.5));
    c.unmount(&mut w);
}
