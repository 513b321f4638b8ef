#![forbid(unsafe_code)]
//! Headless motion runtime for a photography portfolio site.
//!
//! Everything runs against a [`Window`] with a virtual clock: timers, animation frames and
//! global listeners are explicit handles, so a host (or a test) decides exactly when time moves.
//! [`SiteRuntime`] wires the pieces into the full site and produces serializable
//! [`SiteSnapshot`]s; the individual effects can also be driven on their own.

pub(crate) mod animation;
pub(crate) mod effects;
pub(crate) mod foundation;
pub(crate) mod host;
pub(crate) mod media;
pub(crate) mod render;
pub(crate) mod shell;
pub(crate) mod site;
pub(crate) mod viewport;

pub use animation::{
    ease::Ease,
    spring::{Spring, SpringConfig, SpringVec2},
    tween::Tween,
};
pub use effects::{
    cursor::{
        CURSOR_SLOT, CURSOR_START, CursorFollower, CursorFrame, dot_spring_config,
        ring_spring_config,
    },
    parallax::{
        DEFAULT_STRENGTH_PCT, ParallaxImage, ParallaxTransform, SCALE_RANGE, parallax_offset,
        parallax_scale, progress_spring_config,
    },
    ripple::{
        BASE_FREQUENCY, BREATH_AMPLITUDE, BREATH_RATE, Channel, DisplacementFilter, FRAME_STEP,
        HOVER_SCALE, MIN_BASE_FREQUENCY, NoiseKind, POINTER_CENTER, POINTER_GAIN, RippleEffect,
        RippleFrame, TurbulenceParams, normalize_pointer, pointer_spring_config,
        turbulence_params,
    },
    text_reveal::{
        HIDDEN_OFFSET_PCT, RevealUnit, SplitMode, TextReveal, TextRevealOptions, UnitFrame,
        WORD_GAP_EM, join_units, split_units,
    },
};
pub use foundation::{
    core::{Point, Rect, Size, TimeMs, Vec2, Viewport},
    error::{AtelierError, AtelierResult},
};
pub use host::{
    events::{CLICKABLE_CLASS, ElementInfo, InputEvent, ListenerKind},
    window::{DEFAULT_FRAME_INTERVAL_MS, FrameHandle, ListenerId, Tick, TimerId, Window},
};
pub use media::{
    player::{
        MediaEvent, MediaPlayer, PlayPromise, PlayResolver, PlaybackError, ReadyState,
        SimulatedPlayer,
    },
    section::{
        Arming, BACKGROUND_DRIFT_PCT, CONTENT_RISE_PX, DEFAULT_OVERLAY_OPACITY,
        DEFAULT_PROXIMITY_MARGIN, Loading, MediaSection, PlaybackStatus, Preload, SectionConfig,
        SectionFrame, SectionState,
    },
};
pub use render::ripple_cpu::{
    displace, noise_svg, render_noise, render_ripple, render_ripple_file,
};
pub use shell::{
    gallery::{
        GalleryConfig, GalleryFrame, GalleryItemFrame, GalleryView, LightboxFrame,
        background_offset_y, header_opacity,
    },
    intro::{IntroConfig, IntroCoupling, IntroFrame, IntroSequencer, IntroStage},
    navbar::{LinkFrame, NAV_LINKS, NavLink, Navbar, NavbarFrame, SCROLL_THRESHOLD_PX, link_delay_ms},
    router::{History, Route},
};
pub use site::{
    config::{HeadingConfig, PortfolioItem, RippleConfig, SectionEntry, SiteConfig, ViewportConfig},
    runtime::{Script, ScriptStep, SiteRuntime},
    snapshot::{
        HeadingSnapshot, HomeSnapshot, PageSnapshot, PortfolioSnapshot, SectionSnapshot,
        SiteSnapshot,
    },
};
pub use viewport::observer::{InView, InViewOptions, Margin, intersects, scroll_progress};
