//! Staggered word/character entrance for headings.
//!
//! The text is split into units, each clipped by its own box and slid up from below once the
//! heading first scrolls into view. The unsplit string is kept for assistive readers.

use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::core::{Rect, TimeMs, Viewport},
    viewport::observer::{InView, InViewOptions, Margin},
};

/// Resting offset of a unit before it is revealed, as a percentage of its own height.
pub const HIDDEN_OFFSET_PCT: f64 = 110.0;

/// Horizontal gap rendered after each word unit, in `em`.
pub const WORD_GAP_EM: f64 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    #[default]
    Word,
    Char,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RevealUnit {
    /// The unit exactly as it appears in the source text.
    pub text: String,
    /// What gets drawn: spaces become a no-break space so the zero-width wrapper keeps them.
    pub glyph: String,
}

/// Split `text` into reveal units, preserving order.
///
/// Word mode splits on every single space (so runs of spaces yield empty units), char mode on
/// Unicode scalar values. Empty input yields no units.
pub fn split_units(text: &str, mode: SplitMode) -> Vec<RevealUnit> {
    if text.is_empty() {
        return Vec::new();
    }

    let unit = |s: &str| RevealUnit {
        text: s.to_string(),
        glyph: if s == " " {
            "\u{00A0}".to_string()
        } else {
            s.to_string()
        },
    };

    match mode {
        SplitMode::Word => text.split(' ').map(unit).collect(),
        SplitMode::Char => text
            .chars()
            .map(|c| unit(c.encode_utf8(&mut [0u8; 4])))
            .collect(),
    }
}

/// Inverse of [`split_units`].
pub fn join_units(units: &[RevealUnit], mode: SplitMode) -> String {
    let sep = match mode {
        SplitMode::Word => " ",
        SplitMode::Char => "",
    };
    units
        .iter()
        .map(|u| u.text.as_str())
        .collect::<Vec<_>>()
        .join(sep)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextRevealOptions {
    pub mode: SplitMode,
    pub delay_ms: u64,
    pub stagger_ms: u64,
    pub duration_ms: u64,
    pub margin: Margin,
}

impl Default for TextRevealOptions {
    fn default() -> Self {
        Self {
            mode: SplitMode::Word,
            delay_ms: 0,
            stagger_ms: 30,
            duration_ms: 800,
            margin: Margin::Percent(-10.0),
        }
    }
}

/// Per-unit visual state at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct UnitFrame {
    pub glyph: String,
    /// Vertical offset as a percentage of the unit's height (positive is down).
    pub offset_y_pct: f64,
    pub opacity: f64,
    pub trailing_gap_em: f64,
}

#[derive(Clone, Debug)]
pub struct TextReveal {
    text: String,
    options: TextRevealOptions,
    units: Vec<RevealUnit>,
    tweens: Vec<Tween>,
    observer: InView,
}

impl TextReveal {
    pub fn new(text: impl Into<String>, options: TextRevealOptions) -> Self {
        let text = text.into();
        let units = split_units(&text, options.mode);
        let tweens = (0..units.len() as u64)
            .map(|i| {
                let delay = options.delay_ms.saturating_add(i.saturating_mul(options.stagger_ms));
                Tween::new(0.0, 1.0, options.duration_ms, Ease::EXPO_OUT).with_delay(delay)
            })
            .collect();
        Self {
            text,
            options,
            units,
            tweens,
            observer: InView::new(InViewOptions::new(options.margin, true)),
        }
    }

    /// The untouched source text, for screen readers.
    pub fn accessible_text(&self) -> &str {
        &self.text
    }

    pub fn units(&self) -> &[RevealUnit] {
        &self.units
    }

    pub fn is_revealed(&self) -> bool {
        self.observer.is_in_view()
    }

    /// Feed the heading's current region. The first time it is visible, every unit starts.
    pub fn update(&mut self, region: Option<Rect>, viewport: Viewport, now: TimeMs) -> bool {
        let was = self.observer.is_in_view();
        let visible = self.observer.update(region, viewport);
        if visible && !was {
            tracing::debug!(units = self.units.len(), "text reveal started");
            for t in &mut self.tweens {
                t.start(now);
            }
        }
        visible
    }

    pub fn sample(&self, now: TimeMs) -> Vec<UnitFrame> {
        let gap = match self.options.mode {
            SplitMode::Word => WORD_GAP_EM,
            SplitMode::Char => 0.0,
        };
        self.units
            .iter()
            .zip(&self.tweens)
            .map(|(u, t)| {
                let p = t.sample(now);
                UnitFrame {
                    glyph: u.glyph.clone(),
                    offset_y_pct: HIDDEN_OFFSET_PCT * (1.0 - p),
                    opacity: p,
                    trailing_gap_em: gap,
                }
            })
            .collect()
    }

    /// True once every unit has reached its resting state.
    pub fn is_settled(&self, now: TimeMs) -> bool {
        self.tweens.iter().all(|t| t.is_finished(now))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/text_reveal.rs"]
mod tests;
