use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::core::TimeMs,
    foundation::error::{AtelierError, AtelierResult},
    host::window::{TimerId, Window},
};

const STAGE_ENTRANCE_MS: u64 = 800;
const EXIT_FADE_MS: u64 = 1_000;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IntroStage {
    pub text: String,
    /// How long this stage stays up before the next one replaces it.
    pub hold_ms: u64,
}

impl IntroStage {
    pub fn new(text: impl Into<String>, hold_ms: u64) -> Self {
        Self {
            text: text.into(),
            hold_ms,
        }
    }
}

/// How the total-reveal timer relates to stage progression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroCoupling {
    /// Reveal exactly at `reveal_after_ms`, wherever the stages are.
    #[default]
    Independent,
    /// Reveal at `reveal_after_ms` or when the last stage is reached, whichever is later.
    AfterLastStage,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntroConfig {
    pub stages: Vec<IntroStage>,
    pub reveal_after_ms: u64,
    #[serde(default)]
    pub coupling: IntroCoupling,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                IntroStage::new("Vision", 1_500),
                IntroStage::new("Silence", 2_500),
                IntroStage::new("Rudrasish Mahato", 1_500),
            ],
            reveal_after_ms: 5_500,
            coupling: IntroCoupling::Independent,
        }
    }
}

impl IntroConfig {
    pub fn validate(&self) -> AtelierResult<()> {
        if self.stages.is_empty() {
            return Err(AtelierError::config("intro needs at least one stage"));
        }
        if let Some(i) = self.stages.iter().position(|s| s.hold_ms == 0) {
            return Err(AtelierError::config(format!(
                "intro stage {i} has a zero hold_ms"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IntroFrame {
    pub stage_index: usize,
    pub text: String,
    /// Entrance of the current stage's text.
    pub text_opacity: f64,
    /// Opacity of the whole loading overlay; fades out after the reveal.
    pub overlay_opacity: f64,
    pub revealed: bool,
}

/// Non-interactive loading sequence: a stage timer walks through the display strings while a
/// separate reveal timer decides when the main content appears.
#[derive(Debug)]
pub struct IntroSequencer {
    config: IntroConfig,
    stage_index: usize,
    stage_timer: Option<TimerId>,
    reveal_timer: Option<TimerId>,
    reveal_due: bool,
    revealed_at: Option<TimeMs>,
    entrance: Tween,
    exit: Tween,
}

impl IntroSequencer {
    pub fn mount(config: IntroConfig, window: &mut Window) -> AtelierResult<Self> {
        config.validate()?;
        let now = window.now();
        let mut entrance = Tween::new(0.0, 1.0, STAGE_ENTRANCE_MS, Ease::EaseOut);
        entrance.start(now);

        let stage_timer = (config.stages.len() > 1).then(|| window.set_timeout(config.stages[0].hold_ms));
        let reveal_timer = Some(window.set_timeout(config.reveal_after_ms));
        tracing::debug!(
            stages = config.stages.len(),
            reveal_after_ms = config.reveal_after_ms,
            coupling = ?config.coupling,
            "intro mounted"
        );
        Ok(Self {
            config,
            stage_index: 0,
            stage_timer,
            reveal_timer,
            reveal_due: false,
            revealed_at: None,
            entrance,
            exit: Tween::new(1.0, 0.0, EXIT_FADE_MS, Ease::EaseInOut),
        })
    }

    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn current_text(&self) -> &str {
        &self.config.stages[self.stage_index].text
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    pub fn revealed_at(&self) -> Option<TimeMs> {
        self.revealed_at
    }

    fn at_last_stage(&self) -> bool {
        self.stage_index + 1 >= self.config.stages.len()
    }

    /// Handle a fired timer. Returns `false` for timers this sequencer does not own.
    pub fn on_timer(&mut self, window: &mut Window, id: TimerId, at: TimeMs) -> bool {
        if self.stage_timer == Some(id) {
            self.stage_timer = None;
            self.advance(window, at);
            true
        } else if self.reveal_timer == Some(id) {
            self.reveal_timer = None;
            match self.config.coupling {
                IntroCoupling::AfterLastStage if !self.at_last_stage() => {
                    tracing::debug!(stage = self.stage_index, "reveal deferred to last stage");
                    self.reveal_due = true;
                }
                _ => self.reveal(at),
            }
            true
        } else {
            false
        }
    }

    fn advance(&mut self, window: &mut Window, at: TimeMs) {
        if self.at_last_stage() {
            return;
        }
        self.stage_index += 1;
        self.entrance = Tween::new(0.0, 1.0, STAGE_ENTRANCE_MS, Ease::EaseOut);
        self.entrance.start(at);
        tracing::debug!(stage = self.stage_index, text = %self.current_text(), "intro stage");

        if self.at_last_stage() {
            if self.reveal_due {
                self.reveal(at);
            }
        } else {
            let hold = self.config.stages[self.stage_index].hold_ms;
            self.stage_timer = Some(window.set_timeout(hold));
        }
    }

    fn reveal(&mut self, at: TimeMs) {
        if self.revealed_at.is_some() {
            return;
        }
        self.revealed_at = Some(at);
        self.reveal_due = false;
        self.exit.start(at);
        tracing::debug!(at_ms = at.0, stage = self.stage_index, "intro revealed content");
    }

    /// Clear outstanding timers. Safe to call more than once.
    pub fn unmount(&mut self, window: &mut Window) {
        if let Some(id) = self.stage_timer.take() {
            window.clear_timeout(id);
        }
        if let Some(id) = self.reveal_timer.take() {
            window.clear_timeout(id);
        }
    }

    pub fn sample(&self, now: TimeMs) -> IntroFrame {
        IntroFrame {
            stage_index: self.stage_index,
            text: self.current_text().to_string(),
            text_opacity: self.entrance.sample(now),
            overlay_opacity: self.exit.sample(now),
            revealed: self.is_revealed(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/intro.rs"]
mod tests;
