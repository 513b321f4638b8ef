use crate::foundation::error::{AtelierError, AtelierResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// A point on the window's virtual clock, in whole milliseconds since mount.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct TimeMs(pub u64);

impl TimeMs {
    pub const ZERO: Self = Self(0);

    pub fn add_ms(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

/// The visible window onto the document: scroll offset plus the window size.
///
/// Regions are expressed in document coordinates (y grows downward from the document top).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> AtelierResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(AtelierError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self {
            scroll_y: 0.0,
            width,
            height,
        })
    }

    /// Visible area in document coordinates.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.scroll_y + self.height)
    }

    /// Convert a document-space rect into client (window) coordinates.
    pub fn to_client(self, doc: Rect) -> Rect {
        doc - Vec2::new(0.0, self.scroll_y)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            width: 1440.0,
            height: 900.0,
        }
    }
}
