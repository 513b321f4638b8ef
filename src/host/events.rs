use crate::media::player::MediaEvent;

/// Global event channels a component can subscribe to on the [`Window`](crate::Window).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    PointerMove,
    PointerOver,
    Scroll,
    Resize,
}

/// The element under the pointer, as much of it as hover classification needs.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ElementInfo {
    /// Lowercase tag name (`"a"`, `"button"`, `"div"`, ...).
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Ancestor tag names, nearest first.
    #[serde(default)]
    pub ancestors: Vec<String>,
}

/// Class that marks an arbitrary element as clickable for the custom cursor.
pub const CLICKABLE_CLASS: &str = "cursor-pointer";

impl ElementInfo {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn inside(mut self, ancestor_tag: impl Into<String>) -> Self {
        self.ancestors.push(ancestor_tag.into().to_ascii_lowercase());
        self
    }

    /// Links, buttons, anything nested in one, and elements carrying [`CLICKABLE_CLASS`].
    pub fn is_interactive(&self) -> bool {
        fn clickable_tag(tag: &str) -> bool {
            tag.eq_ignore_ascii_case("a") || tag.eq_ignore_ascii_case("button")
        }

        clickable_tag(&self.tag)
            || self.ancestors.iter().any(|t| clickable_tag(t))
            || self.classes.iter().any(|c| c == CLICKABLE_CLASS)
    }
}

/// Discrete inputs fed to a site runtime, in client (window) coordinates where relevant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerOver {
        target: ElementInfo,
    },
    Scroll {
        y: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
    /// Readiness signal from a section's background video.
    Media {
        section: String,
        event: MediaEvent,
    },
    /// Settle a section's outstanding play request. `rejected: None` resolves it.
    PlaySettled {
        section: String,
        #[serde(default)]
        rejected: Option<String>,
    },
    Navigate {
        path: String,
    },
    Back,
    ToggleMenu,
    OpenImage {
        index: usize,
    },
    CloseImage,
}

impl InputEvent {
    /// The global listener channel this event is delivered on, if any.
    pub fn listener_kind(&self) -> Option<ListenerKind> {
        match self {
            Self::PointerMove { .. } => Some(ListenerKind::PointerMove),
            Self::PointerOver { .. } => Some(ListenerKind::PointerOver),
            Self::Scroll { .. } => Some(ListenerKind::Scroll),
            Self::Resize { .. } => Some(ListenerKind::Resize),
            _ => None,
        }
    }
}
