use std::{fmt, str::FromStr};

use crate::{
    foundation::core::{Rect, Viewport},
    foundation::error::{AtelierError, AtelierResult},
    foundation::math::clamp01,
};

/// Extra room added to every side of the viewport before testing intersection.
///
/// Negative values shrink the viewport, so a region must be well inside before it counts.
/// Percentages are relative to the viewport height (top/bottom) and width (left/right).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Margin {
    Px(f64),
    Percent(f64),
}

impl Margin {
    pub const ZERO: Self = Self::Px(0.0);

    fn horizontal(self, vp: Viewport) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => vp.width * p / 100.0,
        }
    }

    fn vertical(self, vp: Viewport) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => vp.height * p / 100.0,
        }
    }

    /// The viewport rect grown (or shrunk) by this margin, in document coordinates.
    pub fn expand(self, vp: Viewport) -> Rect {
        let r = vp.rect();
        let mx = self.horizontal(vp);
        let my = self.vertical(vp);
        Rect::new(r.x0 - mx, r.y0 - my, r.x1 + mx, r.y1 + my)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for Margin {
    type Err = AtelierError;

    fn from_str(s: &str) -> AtelierResult<Self> {
        let s = s.trim();
        let (num, ctor): (&str, fn(f64) -> Margin) = if let Some(n) = s.strip_suffix("px") {
            (n, Margin::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, Margin::Percent)
        } else {
            (s, Margin::Px)
        };
        let v: f64 = num
            .trim()
            .parse()
            .map_err(|_| AtelierError::validation(format!("invalid margin '{s}'")))?;
        if !v.is_finite() {
            return Err(AtelierError::validation(format!("invalid margin '{s}'")));
        }
        Ok(ctor(v))
    }
}

impl TryFrom<String> for Margin {
    type Error = AtelierError;

    fn try_from(s: String) -> AtelierResult<Self> {
        s.parse()
    }
}

impl From<Margin> for String {
    fn from(m: Margin) -> Self {
        m.to_string()
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// True while `region` touches the margin-expanded viewport.
pub fn intersects(region: Rect, viewport: Viewport, margin: Margin) -> bool {
    let root = margin.expand(viewport);
    if root.width() < 0.0 || root.height() < 0.0 {
        return false;
    }
    region.x0 <= root.x1 && region.x1 >= root.x0 && region.y0 <= root.y1 && region.y1 >= root.y0
}

/// How far `region` has travelled through the viewport.
///
/// `0.0` when its top edge sits on the viewport's bottom edge, `1.0` when its bottom edge sits on
/// the viewport's top edge, clamped outside that window.
pub fn scroll_progress(region: Rect, viewport: Viewport) -> f64 {
    let start = region.y0 - viewport.height;
    let end = region.y1;
    let span = end - start;
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    clamp01((viewport.scroll_y - start) / span)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InViewOptions {
    #[serde(default)]
    pub margin: Margin,
    /// Latch on the first positive reading and stop re-evaluating.
    #[serde(default)]
    pub once: bool,
}

impl InViewOptions {
    pub fn new(margin: Margin, once: bool) -> Self {
        Self { margin, once }
    }
}

/// Viewport membership for one region.
#[derive(Clone, Debug, PartialEq)]
pub struct InView {
    options: InViewOptions,
    in_view: bool,
}

impl InView {
    pub fn new(options: InViewOptions) -> Self {
        Self {
            options,
            in_view: false,
        }
    }

    pub fn options(&self) -> InViewOptions {
        self.options
    }

    pub fn is_in_view(&self) -> bool {
        self.in_view
    }

    /// Recompute membership. A missing region is never in view.
    ///
    /// With `once`, the first `true` is permanent and later calls skip the geometry entirely.
    pub fn update(&mut self, region: Option<Rect>, viewport: Viewport) -> bool {
        if self.options.once && self.in_view {
            return true;
        }
        self.in_view = region.is_some_and(|r| intersects(r, viewport, self.options.margin));
        self.in_view
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/observer.rs"]
mod tests;
