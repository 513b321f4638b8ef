use crate::{animation::ease::Ease, foundation::core::TimeMs, foundation::math::lerp};

/// A time-based transition from one value to another.
///
/// A tween does nothing until [`Tween::start`] is called; before that it samples `from`.
/// Retargeting mid-flight starts a new transition from the currently sampled value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tween {
    from: f64,
    to: f64,
    duration_ms: u64,
    delay_ms: u64,
    ease: Ease,
    started_at: Option<TimeMs>,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: u64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0,
            ease,
            started_at: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn start(&mut self, at: TimeMs) {
        if self.started_at.is_none() {
            self.started_at = Some(at);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Begin moving toward `to` from wherever the tween currently is.
    pub fn retarget(&mut self, to: f64, now: TimeMs) {
        if to == self.to && self.started_at.is_some() {
            return;
        }
        self.from = self.sample(now);
        self.to = to;
        self.started_at = Some(now);
    }

    pub fn progress(&self, now: TimeMs) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let begin = start.add_ms(self.delay_ms);
        if now < begin {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (now.since(begin) as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn is_finished(&self, now: TimeMs) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn sample(&self, now: TimeMs) -> f64 {
        lerp(self.from, self.to, self.ease.apply(self.progress(now)))
    }
}
