use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::core::{Rect, TimeMs, Viewport},
    foundation::error::{AtelierError, AtelierResult},
    foundation::math::lerp,
    media::player::{MediaEvent, MediaPlayer, PlayPromise},
    viewport::observer::{InView, InViewOptions, Margin, scroll_progress},
};

pub const DEFAULT_PROXIMITY_MARGIN: Margin = Margin::Px(200.0);
pub const DEFAULT_OVERLAY_OPACITY: f64 = 0.5;
/// Background drift in percent of the section height at either end of its transit.
pub const BACKGROUND_DRIFT_PCT: f64 = 10.0;
pub const CONTENT_RISE_PX: f64 = 30.0;

const PLACEHOLDER_FADE_MS: u64 = 500;
const VIDEO_FADE_MS: u64 = 1_000;
const CONTENT_REVEAL_MS: u64 = 1_000;

fn default_overlay_opacity() -> f64 {
    DEFAULT_OVERLAY_OPACITY
}

fn default_proximity_margin() -> Margin {
    DEFAULT_PROXIMITY_MARGIN
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preload {
    Auto,
    None,
}

/// One full-bleed, video-backed section of the landing page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub video_src: String,
    /// Arm playback at creation instead of waiting for viewport proximity.
    #[serde(default)]
    pub priority: bool,
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f64,
    #[serde(default = "default_proximity_margin")]
    pub proximity_margin: Margin,
    #[serde(default = "default_true")]
    pub muted: bool,
    #[serde(default = "default_true")]
    pub looping: bool,
}

impl SectionConfig {
    pub fn new(id: impl Into<String>, video_src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            video_src: video_src.into(),
            priority: false,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            proximity_margin: DEFAULT_PROXIMITY_MARGIN,
            muted: true,
            looping: true,
        }
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn preload(&self) -> Preload {
        if self.priority {
            Preload::Auto
        } else {
            Preload::None
        }
    }

    pub fn validate(&self) -> AtelierResult<()> {
        if self.id.trim().is_empty() {
            return Err(AtelierError::config("section id must be non-empty"));
        }
        if self.video_src.trim().is_empty() {
            return Err(AtelierError::config(format!(
                "section '{}' has an empty video_src",
                self.id
            )));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(AtelierError::config(format!(
                "section '{}' overlay_opacity must be in [0,1]",
                self.id
            )));
        }
        // Autoplay is only reliably permitted for muted media.
        if !self.muted {
            return Err(AtelierError::config(format!(
                "section '{}' background video must be muted",
                self.id
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arming {
    NotArmed,
    Armed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "loading", rename_all = "snake_case")]
pub enum Loading {
    NotLoaded,
    Loaded { at: TimeMs },
}

/// Playback permission and load progress, tracked on independent axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SectionState {
    pub arming: Arming,
    #[serde(flatten)]
    pub loading: Loading,
}

impl SectionState {
    pub fn should_play(&self) -> bool {
        self.arming == Arming::Armed
    }

    pub fn shows_placeholder(&self) -> bool {
        matches!(self.loading, Loading::NotLoaded)
    }
}

/// Outcome of the most recent play request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum PlaybackStatus {
    Idle,
    Pending,
    Playing,
    /// The video stays on its paused first frame.
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionFrame {
    pub id: String,
    pub state: SectionState,
    pub playback: PlaybackStatus,
    pub play_requests: u32,
    pub placeholder_opacity: f64,
    pub video_opacity: f64,
    pub overlay_opacity: f64,
    pub background_offset_pct: f64,
    pub content_opacity: f64,
    pub content_offset_y: f64,
}

/// Orchestrates one section's background video, its parallax drift and its content entrance.
#[derive(Debug)]
pub struct MediaSection {
    config: SectionConfig,
    player: Box<dyn MediaPlayer>,
    state: SectionState,
    proximity: InView,
    content: InView,
    play_requests: u32,
    in_flight: Option<PlayPromise>,
    playback: PlaybackStatus,
    background_offset_pct: f64,
    placeholder: Tween,
    video: Tween,
    content_opacity: Tween,
    content_offset: Tween,
}

impl MediaSection {
    /// Mount the section. Priority sections issue their play request here; a player that is
    /// already buffered counts as loaded immediately.
    pub fn mount(config: SectionConfig, player: Box<dyn MediaPlayer>, now: TimeMs) -> Self {
        let reveal = |from: f64, to: f64| Tween::new(from, to, CONTENT_REVEAL_MS, Ease::EXPO_OUT);
        let mut section = Self {
            proximity: InView::new(InViewOptions::new(config.proximity_margin, false)),
            content: InView::new(InViewOptions::new(Margin::Percent(-10.0), true)),
            config,
            player,
            state: SectionState {
                arming: Arming::NotArmed,
                loading: Loading::NotLoaded,
            },
            play_requests: 0,
            in_flight: None,
            playback: PlaybackStatus::Idle,
            background_offset_pct: -BACKGROUND_DRIFT_PCT,
            placeholder: Tween::new(1.0, 0.0, PLACEHOLDER_FADE_MS, Ease::Linear),
            video: Tween::new(0.0, 1.0, VIDEO_FADE_MS, Ease::EaseOut),
            content_opacity: reveal(0.0, 1.0),
            content_offset: reveal(CONTENT_RISE_PX, 0.0),
        };

        if section.player.ready_state().is_playable() {
            section.mark_loaded(now);
        }
        if section.config.priority {
            section.arm();
        }
        section
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn play_requests(&self) -> u32 {
        self.play_requests
    }

    pub fn playback(&self) -> &PlaybackStatus {
        &self.playback
    }

    fn arm(&mut self) {
        if self.state.arming == Arming::Armed {
            return;
        }
        self.state.arming = Arming::Armed;
        self.play_requests += 1;
        self.in_flight = Some(self.player.play());
        self.playback = PlaybackStatus::Pending;
        tracing::debug!(section = %self.config.id, "playback armed");
        self.poll_playback();
    }

    /// Withdraw playback permission and pause the video.
    pub fn disarm(&mut self) {
        if self.state.arming == Arming::NotArmed {
            return;
        }
        self.state.arming = Arming::NotArmed;
        self.player.pause();
        self.in_flight = None;
        self.playback = PlaybackStatus::Idle;
        tracing::debug!(section = %self.config.id, "playback disarmed");
    }

    /// Re-evaluate viewport-driven state for the section's document-space `region`.
    ///
    /// Arming latches: once armed, leaving the proximity band does not pause the video.
    pub fn update(&mut self, region: Option<Rect>, viewport: Viewport, now: TimeMs) {
        if self.proximity.update(region, viewport) {
            self.arm();
        }
        if self.content.update(region, viewport) {
            self.content_opacity.start(now);
            self.content_offset.start(now);
        }
        if let Some(r) = region {
            self.background_offset_pct = lerp(
                -BACKGROUND_DRIFT_PCT,
                BACKGROUND_DRIFT_PCT,
                scroll_progress(r, viewport),
            );
        }
    }

    pub fn on_media_event(&mut self, event: MediaEvent, now: TimeMs) {
        tracing::trace!(section = %self.config.id, ?event, "media event");
        self.mark_loaded(now);
    }

    fn mark_loaded(&mut self, now: TimeMs) {
        if !self.state.shows_placeholder() {
            return;
        }
        self.state.loading = Loading::Loaded { at: now };
        self.placeholder.start(now);
        self.video.start(now);
        tracing::debug!(section = %self.config.id, at_ms = now.0, "video loaded");
    }

    /// Observe the outstanding play request, if it has settled. Rejections are logged and
    /// absorbed; the section keeps rendering its placeholder or paused first frame.
    pub fn poll_playback(&mut self) -> &PlaybackStatus {
        let settled = self.in_flight.as_ref().and_then(PlayPromise::poll);
        match settled {
            None => {}
            Some(Ok(())) => {
                self.in_flight = None;
                self.playback = PlaybackStatus::Playing;
            }
            Some(Err(err)) => {
                self.in_flight = None;
                tracing::warn!(section = %self.config.id, error = %err, "video autoplay prevented");
                self.playback = PlaybackStatus::Rejected(err.to_string());
            }
        }
        &self.playback
    }

    pub fn sample(&self, now: TimeMs) -> SectionFrame {
        SectionFrame {
            id: self.config.id.clone(),
            state: self.state,
            playback: self.playback.clone(),
            play_requests: self.play_requests,
            placeholder_opacity: self.placeholder.sample(now),
            video_opacity: self.video.sample(now),
            overlay_opacity: self.config.overlay_opacity,
            background_offset_pct: self.background_offset_pct,
            content_opacity: self.content_opacity.sample(now),
            content_offset_y: self.content_offset.sample(now),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/section.rs"]
mod tests;
