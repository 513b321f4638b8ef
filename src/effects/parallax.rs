use crate::{
    animation::spring::{Spring, SpringConfig},
    foundation::core::{Rect, Viewport},
    foundation::math::{clamp01, lerp},
    viewport::observer::scroll_progress,
};

pub const DEFAULT_STRENGTH_PCT: f64 = 20.0;
pub const SCALE_RANGE: (f64, f64) = (1.1, 1.25);

/// Spring that smooths raw scroll progress before it drives the image.
pub fn progress_spring_config() -> SpringConfig {
    SpringConfig::new(100.0, 30.0).with_rest_delta(0.001)
}

/// Vertical offset in percent of the image height: `-strength` at progress 0, `+strength` at 1.
pub fn parallax_offset(progress: f64, strength_pct: f64) -> f64 {
    lerp(-strength_pct, strength_pct, clamp01(progress))
}

pub fn parallax_scale(progress: f64) -> f64 {
    lerp(SCALE_RANGE.0, SCALE_RANGE.1, clamp01(progress))
}

/// Transform applied to the image inside its clipping container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParallaxTransform {
    pub offset_y_pct: f64,
    pub scale: f64,
}

/// Image that drifts and slowly zooms as its container crosses the viewport.
#[derive(Clone, Debug)]
pub struct ParallaxImage {
    src: String,
    strength_pct: f64,
    progress: Spring,
}

impl ParallaxImage {
    pub fn new(src: impl Into<String>, strength_pct: f64) -> Self {
        Self {
            src: src.into(),
            strength_pct: strength_pct.abs(),
            progress: Spring::new(0.0, progress_spring_config()),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Retarget from the container's current position. Missing containers hold their progress.
    pub fn observe(&mut self, region: Option<Rect>, viewport: Viewport) {
        if let Some(r) = region {
            self.progress.set_target(scroll_progress(r, viewport));
        }
    }

    /// Start at the current scroll position without animating toward it.
    pub fn settle(&mut self, region: Option<Rect>, viewport: Viewport) {
        if let Some(r) = region {
            self.progress.jump(scroll_progress(r, viewport));
        }
    }

    pub fn step(&mut self, dt_ms: f64) {
        self.progress.step(dt_ms);
    }

    pub fn smoothed_progress(&self) -> f64 {
        self.progress.value()
    }

    pub fn transform(&self) -> ParallaxTransform {
        let p = self.progress.value();
        ParallaxTransform {
            offset_y_pct: parallax_offset(p, self.strength_pct),
            scale: parallax_scale(p),
        }
    }
}
