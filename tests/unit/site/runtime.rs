use super::*;
use crate::host::events::{ElementInfo, ListenerKind};
use crate::media::section::{Arming, PlaybackStatus};

fn revealed_site() -> SiteRuntime {
    let mut site = SiteRuntime::new(SiteConfig::default()).unwrap();
    site.advance_to(TimeMs(5_500)).unwrap();
    assert!(site.is_revealed());
    site
}

#[test]
fn content_mounts_only_after_intro_reveal() {
    let mut site = SiteRuntime::new(SiteConfig::default()).unwrap();
    site.advance_to(TimeMs(5_400)).unwrap();
    let snap = site.snapshot();
    assert_eq!(snap.content, PageSnapshot::Loading);
    assert_eq!(snap.intro.text, "Rudrasish Mahato");
    assert!(site.player("home").is_none());

    site.advance_to(TimeMs(5_500)).unwrap();
    let snap = site.snapshot();
    assert!(snap.home().is_some());
    assert_eq!(snap.route, "/");
    assert_eq!(site.player("home").unwrap().play_calls(), 1);
}

#[test]
fn scrolling_arms_sections_as_they_approach() {
    let mut site = revealed_site();
    // Portfolio starts one viewport below the services section.
    assert_eq!(site.player("portfolio").unwrap().play_calls(), 0);

    site.dispatch(&InputEvent::Scroll { y: 1_700.0 }).unwrap();
    assert_eq!(site.player("portfolio").unwrap().play_calls(), 1);
    site.dispatch(&InputEvent::Scroll { y: 1_750.0 }).unwrap();
    assert_eq!(site.player("portfolio").unwrap().play_calls(), 1);

    let snap = site.snapshot();
    let portfolio = snap.section("portfolio").unwrap();
    assert_eq!(portfolio.frame.state.arming, Arming::Armed);
    assert_eq!(site.player("contact").unwrap().play_calls(), 0);
}

#[test]
fn rejected_autoplay_is_absorbed() {
    let mut site = revealed_site();
    site.dispatch(&InputEvent::PlaySettled {
        section: "home".into(),
        rejected: Some("NotAllowedError".into()),
    })
    .unwrap();
    site.advance_by(2_000).unwrap();

    let snap = site.snapshot();
    let hero = snap.section("home").unwrap();
    assert!(matches!(hero.frame.playback, PlaybackStatus::Rejected(_)));
    assert_eq!(hero.frame.placeholder_opacity, 1.0);
}

#[test]
fn media_readiness_reaches_the_section() {
    let mut site = revealed_site();
    site.dispatch(&InputEvent::Media {
        section: "home".into(),
        event: crate::media::player::MediaEvent::CanPlay,
    })
    .unwrap();
    site.advance_by(1_000).unwrap();
    let snap = site.snapshot();
    assert_eq!(snap.section("home").unwrap().frame.video_opacity, 1.0);

    let err = site.dispatch(&InputEvent::Media {
        section: "footer".into(),
        event: crate::media::player::MediaEvent::CanPlay,
    });
    assert!(err.is_err());
}

#[test]
fn ripple_follows_pointer_inside_its_container() {
    let mut site = revealed_site();
    site.dispatch(&InputEvent::Scroll { y: 5_000.0 }).unwrap();
    site.dispatch(&InputEvent::PointerMove { x: 394.0, y: 550.0 }).unwrap();
    site.advance_by(100).unwrap();

    let ripple = site.snapshot().home().unwrap().ripple.unwrap();
    assert!(ripple.animating);
    assert!(ripple.params.base_frequency_x >= crate::effects::ripple::MIN_BASE_FREQUENCY);

    site.dispatch(&InputEvent::Scroll { y: 0.0 }).unwrap();
    let ripple = site.snapshot().home().unwrap().ripple.unwrap();
    assert!(!ripple.animating);
}

#[test]
fn cursor_tracks_pointer_and_hover() {
    let mut site = revealed_site();
    site.dispatch(&InputEvent::PointerMove { x: 300.0, y: 200.0 }).unwrap();
    site.dispatch(&InputEvent::PointerOver {
        target: ElementInfo::new("button"),
    })
    .unwrap();
    site.advance_by(4_000).unwrap();
    let cursor = site.snapshot().cursor.unwrap();
    assert_eq!(cursor.dot, Point::new(300.0, 200.0));
    assert!(cursor.hovering);
    assert_eq!(cursor.dot_scale, 2.5);
}

#[test]
fn gallery_lightbox_and_back_navigation() {
    let mut site = revealed_site();
    site.dispatch(&InputEvent::Navigate {
        path: "/gallery/nature".into(),
    })
    .unwrap();
    assert_eq!(site.route(), &Route::Gallery("nature".into()));
    assert!(site.player("home").is_none());

    site.dispatch(&InputEvent::OpenImage { index: 0 }).unwrap();
    let g = site.snapshot().gallery().cloned().unwrap();
    assert_eq!(g.lightbox.unwrap().src, "/images/nature/nature_1.png");

    site.dispatch(&InputEvent::CloseImage).unwrap();
    assert_eq!(site.snapshot().gallery().unwrap().lightbox, None);

    site.dispatch(&InputEvent::Back).unwrap();
    assert_eq!(site.route(), &Route::Home);
    assert_eq!(site.history_depth(), 3);
    assert!(site.snapshot().home().is_some());
}

#[test]
fn navigation_errors_are_reported() {
    let mut site = revealed_site();
    assert!(site
        .dispatch(&InputEvent::Navigate {
            path: "/gallery/forest".into()
        })
        .is_err());
    assert!(site.dispatch(&InputEvent::OpenImage { index: 0 }).is_err());
}

#[test]
fn script_replays_in_time_order() {
    let script = Script::from_json_str(
        r#"[
            {"at_ms": 6000, "type": "navigate", "path": "/gallery/clouds"},
            {"at_ms": 100, "type": "pointer_move", "x": 50.0, "y": 60.0}
        ]"#,
    )
    .unwrap();
    let mut site = SiteRuntime::new(SiteConfig::default()).unwrap();
    site.run_script(&script, TimeMs(7_000)).unwrap();
    assert_eq!(site.now(), TimeMs(7_000));
    assert_eq!(site.route(), &Route::Gallery("clouds".into()));
    assert_eq!(site.snapshot().cursor.unwrap().dot, Point::new(50.0, 60.0));
}

#[test]
fn shutdown_leaves_window_clean() {
    let mut site = revealed_site();
    site.dispatch(&InputEvent::Scroll { y: 5_000.0 }).unwrap();
    assert!(site.window().active_frame_callbacks() > 0);

    let window = site.shutdown();
    assert_eq!(window.active_frame_callbacks(), 0);
    assert_eq!(window.pending_timers(), 0);
    for kind in [
        ListenerKind::PointerMove,
        ListenerKind::PointerOver,
        ListenerKind::Scroll,
        ListenerKind::Resize,
    ] {
        assert_eq!(window.listener_count(kind), 0);
    }
}

#[test]
fn pointer_events_reach_the_cursor_through_its_listeners() {
    let mut site = revealed_site();
    site.dispatch(&InputEvent::PointerMove { x: 120.0, y: 80.0 }).unwrap();
    let cursor = site.cursor.as_ref().unwrap();
    assert_eq!(cursor.raw_position(), Point::new(120.0, 80.0));

    let (move_listener, over_listener) = cursor.listeners();
    assert!(site.window.remove_listener(move_listener));
    site.dispatch(&InputEvent::PointerMove { x: 400.0, y: 300.0 }).unwrap();
    let cursor = site.cursor.as_ref().unwrap();
    assert_eq!(cursor.raw_position(), Point::new(120.0, 80.0));

    // The hover channel is independent of the move channel.
    site.dispatch(&InputEvent::PointerOver {
        target: ElementInfo::new("a"),
    })
    .unwrap();
    assert!(site.cursor.as_ref().unwrap().is_hovering());

    assert!(site.window.remove_listener(over_listener));
    site.dispatch(&InputEvent::PointerOver {
        target: ElementInfo::new("div"),
    })
    .unwrap();
    assert!(site.cursor.as_ref().unwrap().is_hovering());
}

#[test]
fn huge_reveal_stagger_from_config_does_not_overflow() {
    let mut value = serde_json::to_value(SiteConfig::default()).unwrap();
    let id = value["sections"][0]["id"].as_str().unwrap().to_string();
    value["sections"][0]["headings"] = serde_json::json!([
        { "text": "a b c", "reveal": { "stagger_ms": u64::MAX } }
    ]);
    let config = SiteConfig::from_json_str(&value.to_string()).unwrap();

    let mut site = SiteRuntime::new(config).unwrap();
    site.advance_to(TimeMs(6_000)).unwrap();
    let snap = site.snapshot();
    let heading = &snap.section(&id).unwrap().headings[0];
    assert!(heading.revealed);
    assert!(heading.units[0].opacity > 0.0);
    // Later units are pushed out to the end of time instead of wrapping.
    assert_eq!(heading.units[1].opacity, 0.0);
    assert_eq!(heading.units[2].opacity, 0.0);
}

#[test]
fn resize_relayouts_the_page() {
    let mut site = revealed_site();
    site.dispatch(&InputEvent::Resize {
        width: 800.0,
        height: 600.0,
    })
    .unwrap();
    assert_eq!(site.snapshot().viewport.height, 600.0);
    assert!(site
        .dispatch(&InputEvent::Resize {
            width: 0.0,
            height: 600.0
        })
        .is_err());
}
