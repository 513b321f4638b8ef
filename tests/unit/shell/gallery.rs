use super::*;

fn nature() -> GalleryView {
    GalleryView::new(GalleryConfig::new(
        "nature",
        "Nature",
        vec![
            "/images/nature/nature_1.png".to_string(),
            "/images/nature/nature_2.png".to_string(),
        ],
    ))
}

#[test]
fn lightbox_open_then_close_clears_selection() {
    let mut g = nature();
    assert!(!g.is_lightbox_open());

    g.open_image(0, TimeMs(100)).unwrap();
    assert!(g.is_lightbox_open());
    assert_eq!(g.selected_image(), Some("/images/nature/nature_1.png"));
    let f = g.sample(0.0, TimeMs(500));
    assert_eq!(
        f.lightbox,
        Some(LightboxFrame {
            src: "/images/nature/nature_1.png".to_string(),
            opacity: 1.0
        })
    );

    g.close_image();
    assert!(!g.is_lightbox_open());
    assert_eq!(g.selected(), None);
    assert_eq!(g.sample(0.0, TimeMs(600)).lightbox, None);
    assert_eq!(g.sample(0.0, TimeMs(600)).items.len(), 2);
}

#[test]
fn out_of_range_open_is_rejected() {
    let mut g = nature();
    assert!(g.open_image(2, TimeMs(0)).is_err());
    assert!(!g.is_lightbox_open());
}

#[test]
fn scroll_driven_background_and_header() {
    assert_eq!(background_offset_y(0.0), 0.0);
    assert_eq!(background_offset_y(250.0), 75.0);
    assert_eq!(background_offset_y(2_000.0), 150.0);
    assert_eq!(header_opacity(0.0), 1.0);
    assert!((header_opacity(300.0) - 0.3).abs() < 1e-12);
    assert!((header_opacity(900.0) - 0.3).abs() < 1e-12);
}

#[test]
fn items_reveal_with_stagger_once() {
    let mut g = nature();
    let vp = Viewport {
        scroll_y: 0.0,
        width: 1000.0,
        height: 800.0,
    };
    let regions = [
        Rect::new(0.0, 400.0, 500.0, 700.0),
        Rect::new(0.0, 780.0, 500.0, 1_080.0),
    ];
    g.update(&regions, vp, TimeMs(0));
    let f = g.sample(0.0, TimeMs(800));
    assert_eq!(f.items[0].opacity, 1.0);
    // Second item starts 20px inside the fold but the -50px margin holds it back.
    assert_eq!(f.items[1].opacity, 0.0);

    let scrolled = Viewport {
        scroll_y: 400.0,
        ..vp
    };
    g.update(&regions, scrolled, TimeMs(1_000));
    let f = g.sample(400.0, TimeMs(1_050));
    assert_eq!(f.items[1].opacity, 0.0);
    let f = g.sample(400.0, TimeMs(1_900));
    assert_eq!(f.items[1].opacity, 1.0);

    // Scrolling far away never hides revealed items.
    let away = Viewport {
        scroll_y: 10_000.0,
        ..vp
    };
    g.update(&regions, away, TimeMs(2_000));
    assert_eq!(g.sample(10_000.0, TimeMs(2_000)).items[0].opacity, 1.0);
}

#[test]
fn config_validation() {
    assert!(nature().config().validate().is_ok());
    assert_eq!(nature().config().path(), "/gallery/nature");
    assert!(GalleryConfig::new("Nature", "Nature", vec!["a.png".into()])
        .validate()
        .is_err());
    assert!(GalleryConfig::new("nature", "Nature", vec![]).validate().is_err());
}
