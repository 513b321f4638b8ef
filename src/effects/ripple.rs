//! Pointer-reactive water ripple over an image.
//!
//! The image is drawn through a displacement filter whose noise texture has two base
//! frequencies. Every animation frame (only while the container is near the viewport) the
//! frequencies are recomputed from a slow breathing oscillation plus a spring-smoothed pointer
//! offset from the container centre.

use crate::{
    animation::{
        ease::Ease,
        spring::{SpringConfig, SpringVec2},
        tween::Tween,
    },
    foundation::core::{Point, Rect, TimeMs},
    foundation::math::clamp01,
    host::window::{FrameHandle, Window},
    viewport::observer::{InView, InViewOptions, Margin},
};

pub const BASE_FREQUENCY: f64 = 0.01;
pub const MIN_BASE_FREQUENCY: f64 = 0.001;
pub const BREATH_AMPLITUDE: f64 = 0.002;
pub const BREATH_RATE: f64 = 0.005;
pub const POINTER_GAIN: f64 = 0.01;
/// Frame counter increment per animation frame.
pub const FRAME_STEP: f64 = 0.5;
pub const HOVER_SCALE: f64 = 1.05;

pub const POINTER_CENTER: Point = Point::new(0.5, 0.5);

pub fn pointer_spring_config() -> SpringConfig {
    SpringConfig::new(50.0, 20.0)
}

/// The two base frequencies fed to the noise texture.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TurbulenceParams {
    pub base_frequency_x: f64,
    pub base_frequency_y: f64,
}

impl Default for TurbulenceParams {
    fn default() -> Self {
        Self {
            base_frequency_x: BASE_FREQUENCY,
            base_frequency_y: BASE_FREQUENCY,
        }
    }
}

/// Frequencies for frame counter `frames` and smoothed normalized pointer `pointer`.
///
/// Both outputs are floored at [`MIN_BASE_FREQUENCY`]; a zero frequency would freeze the noise
/// into a flat, undistorted texture.
pub fn turbulence_params(frames: f64, pointer: Point) -> TurbulenceParams {
    let phase = frames * BREATH_RATE;
    let base_x = BASE_FREQUENCY + phase.sin() * BREATH_AMPLITUDE;
    let base_y = BASE_FREQUENCY + phase.cos() * BREATH_AMPLITUDE;
    let dx = (pointer.x - 0.5) * POINTER_GAIN;
    let dy = (pointer.y - 0.5) * POINTER_GAIN;
    TurbulenceParams {
        base_frequency_x: (base_x + dx).max(MIN_BASE_FREQUENCY),
        base_frequency_y: (base_y + dy).max(MIN_BASE_FREQUENCY),
    }
}

/// Pointer position as a fraction of the container size, clamped to `[0, 1]` on both axes.
///
/// A container with no area has no meaningful position and reports the centre.
pub fn normalize_pointer(client: Point, container: Rect) -> Point {
    let (w, h) = (container.width(), container.height());
    if !(w > 0.0 && h > 0.0) {
        return POINTER_CENTER;
    }
    Point::new(
        clamp01((client.x - container.x0) / w),
        clamp01((client.y - container.y0) / h),
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    FractalNoise,
    Turbulence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Channel {
    R,
    G,
    B,
    A,
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Self::R => 0,
            Self::G => 1,
            Self::B => 2,
            Self::A => 3,
        }
    }
}

/// Static description of the noise + displacement filter chain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplacementFilter {
    pub noise: NoiseKind,
    pub octaves: u32,
    /// Maximum displacement in pixels.
    pub scale: f64,
    pub x_channel: Channel,
    pub y_channel: Channel,
}

impl Default for DisplacementFilter {
    fn default() -> Self {
        Self {
            noise: NoiseKind::FractalNoise,
            octaves: 2,
            scale: 20.0,
            x_channel: Channel::R,
            y_channel: Channel::G,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RippleFrame {
    pub params: TurbulenceParams,
    pub filter: DisplacementFilter,
    pub pointer: Point,
    pub hover_scale: f64,
    pub animating: bool,
}

#[derive(Debug)]
pub struct RippleEffect {
    image_src: String,
    filter: DisplacementFilter,
    observer: InView,
    raw_pointer: Point,
    pointer: SpringVec2,
    frames: f64,
    params: TurbulenceParams,
    frame_loop: Option<FrameHandle>,
    hovered: bool,
    hover_scale: Tween,
}

impl RippleEffect {
    pub fn new(image_src: impl Into<String>) -> Self {
        Self {
            image_src: image_src.into(),
            filter: DisplacementFilter::default(),
            observer: InView::new(InViewOptions::new(Margin::Px(50.0), false)),
            raw_pointer: POINTER_CENTER,
            pointer: SpringVec2::new(POINTER_CENTER, pointer_spring_config()),
            frames: 0.0,
            params: TurbulenceParams::default(),
            frame_loop: None,
            hovered: false,
            hover_scale: Tween::new(1.0, 1.0, 1_200, Ease::EaseOut),
        }
    }

    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    pub fn filter(&self) -> DisplacementFilter {
        self.filter
    }

    pub fn params(&self) -> TurbulenceParams {
        self.params
    }

    pub fn frames(&self) -> f64 {
        self.frames
    }

    pub fn raw_pointer(&self) -> Point {
        self.raw_pointer
    }

    pub fn is_animating(&self) -> bool {
        self.frame_loop.is_some()
    }

    /// Start the frame loop when the container comes near the viewport, stop it when it leaves.
    pub fn update_visibility(&mut self, window: &mut Window, region: Option<Rect>) -> bool {
        let visible = self.observer.update(region, window.viewport());
        match (visible, self.frame_loop) {
            (true, None) => {
                self.frame_loop = Some(window.request_frames());
                tracing::debug!(src = %self.image_src, "ripple frame loop started");
            }
            (false, Some(h)) => {
                window.cancel_frames(h);
                self.frame_loop = None;
                tracing::debug!(src = %self.image_src, "ripple frame loop paused");
            }
            _ => {}
        }
        visible
    }

    /// Pointer moved inside the container (`container` in the same client coordinates).
    pub fn on_pointer_move(&mut self, client: Point, container: Rect, now: TimeMs) {
        self.raw_pointer = normalize_pointer(client, container);
        self.pointer.set_target(self.raw_pointer);
        if !self.hovered {
            self.hovered = true;
            self.hover_scale.retarget(HOVER_SCALE, now);
        }
    }

    /// Pointer left the container: relax back to the breathing-only baseline.
    pub fn on_pointer_leave(&mut self, now: TimeMs) {
        self.raw_pointer = POINTER_CENTER;
        self.pointer.set_target(POINTER_CENTER);
        if self.hovered {
            self.hovered = false;
            self.hover_scale.retarget(1.0, now);
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Per-frame work. Pointer smoothing always runs; the noise only advances while the frame
    /// loop is registered on `window`.
    pub fn on_frame(&mut self, window: &Window, dt_ms: f64) {
        let pointer = self.pointer.step(dt_ms);
        let Some(h) = self.frame_loop else {
            return;
        };
        if !window.is_frame_active(h) {
            return;
        }
        self.frames += FRAME_STEP;
        self.params = turbulence_params(self.frames, pointer);
    }

    pub fn sample(&self, now: TimeMs) -> RippleFrame {
        RippleFrame {
            params: self.params,
            filter: self.filter,
            pointer: self.pointer.value(),
            hover_scale: self.hover_scale.sample(now),
            animating: self.is_animating(),
        }
    }

    /// Cancel the frame loop. Safe to call more than once.
    pub fn unmount(&mut self, window: &mut Window) {
        if let Some(h) = self.frame_loop.take() {
            window.cancel_frames(h);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/ripple.rs"]
mod tests;
