use super::*;

fn drain(w: &mut Window, until: u64) -> Vec<Tick> {
    let mut out = Vec::new();
    while let Some(t) = w.poll_until(TimeMs(until)) {
        out.push(t);
    }
    out
}

#[test]
fn timers_fire_in_deadline_order_and_move_the_clock() {
    let mut w = Window::with_frame_interval(Viewport::default(), 1_000);
    let late = w.set_timeout(300);
    let early = w.set_timeout(100);

    let ticks = drain(&mut w, 500);
    assert_eq!(
        ticks,
        vec![
            Tick::Timer {
                id: early,
                at: TimeMs(100)
            },
            Tick::Timer {
                id: late,
                at: TimeMs(300)
            },
        ]
    );
    assert_eq!(w.now(), TimeMs(500));
    assert_eq!(w.pending_timers(), 0);
}

#[test]
fn cleared_timer_never_fires() {
    let mut w = Window::with_frame_interval(Viewport::default(), 1_000);
    let id = w.set_timeout(10);
    assert!(w.clear_timeout(id));
    assert!(!w.clear_timeout(id));
    assert!(drain(&mut w, 100).is_empty());
}

#[test]
fn timers_scheduled_during_dispatch_are_seen() {
    let mut w = Window::with_frame_interval(Viewport::default(), 10_000);
    w.set_timeout(100);
    let mut fired = Vec::new();
    while let Some(t) = w.poll_until(TimeMs(1_000)) {
        if let Tick::Timer { at, .. } = t {
            fired.push(at);
            if at == TimeMs(100) {
                w.set_timeout(250);
            }
        }
    }
    assert_eq!(fired, vec![TimeMs(100), TimeMs(350)]);
}

#[test]
fn frames_tick_at_fixed_interval_and_timers_win_ties() {
    let mut w = Window::new(Viewport::default());
    let id = w.set_timeout(16);
    let ticks = drain(&mut w, 40);
    assert_eq!(
        ticks,
        vec![
            Tick::Timer { id, at: TimeMs(16) },
            Tick::Frame {
                at: TimeMs(16),
                dt_ms: 16.0
            },
            Tick::Frame {
                at: TimeMs(32),
                dt_ms: 16.0
            },
        ]
    );
}

#[test]
fn frame_subscriptions_and_listeners_are_symmetric() {
    let mut w = Window::new(Viewport::default());
    let h = w.request_frames();
    assert!(w.is_frame_active(h));
    assert_eq!(w.active_frame_callbacks(), 1);
    assert!(w.cancel_frames(h));
    assert!(!w.cancel_frames(h));
    assert_eq!(w.active_frame_callbacks(), 0);

    let a = w.add_listener(ListenerKind::PointerMove);
    let b = w.add_listener(ListenerKind::PointerOver);
    assert_eq!(w.listener_count(ListenerKind::PointerMove), 1);
    assert!(w.remove_listener(a));
    assert!(w.remove_listener(b));
    assert_eq!(w.listener_count(ListenerKind::PointerMove), 0);
    assert_eq!(w.listener_count(ListenerKind::PointerOver), 0);
}

#[test]
fn delivery_follows_the_registered_channel() {
    let mut w = Window::new(Viewport::default());
    let id = w.add_listener(ListenerKind::Scroll);
    assert!(w.delivers(id, ListenerKind::Scroll));
    assert!(!w.delivers(id, ListenerKind::Resize));
    w.remove_listener(id);
    assert!(!w.delivers(id, ListenerKind::Scroll));
}

#[test]
fn singleton_slot_rejects_second_claim() {
    let mut w = Window::new(Viewport::default());
    w.claim_singleton("cursor").unwrap();
    let err = w.claim_singleton("cursor").unwrap_err();
    assert!(matches!(err, AtelierError::Singleton(_)));
    assert!(w.release_singleton("cursor"));
    w.claim_singleton("cursor").unwrap();
}

#[test]
fn scroll_and_resize_update_viewport() {
    let mut w = Window::new(Viewport::default());
    w.scroll_to(-20.0);
    assert_eq!(w.viewport().scroll_y, 0.0);
    w.scroll_to(480.0);
    w.resize(800.0, 600.0).unwrap();
    assert_eq!(w.viewport().scroll_y, 480.0);
    assert_eq!(w.viewport().height, 600.0);
    assert!(w.resize(0.0, 600.0).is_err());
}
