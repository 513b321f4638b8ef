use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::core::{Rect, TimeMs, Viewport},
    foundation::error::{AtelierError, AtelierResult},
    foundation::math::map_range,
    viewport::observer::{InView, InViewOptions, Margin},
};

const ITEM_RISE_PX: f64 = 50.0;
const ITEM_REVEAL_MS: u64 = 800;
const ITEM_STAGGER_MS: u64 = 100;
const LIGHTBOX_MS: u64 = 400;

/// Fixed background drifts down `0..150px` over the first `500px` of scroll.
pub fn background_offset_y(scroll_y: f64) -> f64 {
    map_range(scroll_y, 0.0, 500.0, 0.0, 150.0)
}

/// Header dims to 30% over the first `300px` of scroll.
pub fn header_opacity(scroll_y: f64) -> f64 {
    map_range(scroll_y, 0.0, 300.0, 1.0, 0.3)
}

/// One image category with its own page.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GalleryConfig {
    /// Path segment under `/gallery/`.
    pub slug: String,
    pub title: String,
    pub images: Vec<String>,
}

impl GalleryConfig {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            images,
        }
    }

    pub fn path(&self) -> String {
        format!("/gallery/{}", self.slug)
    }

    /// The first image doubles as the page background.
    pub fn background_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn validate(&self) -> AtelierResult<()> {
        let slug_ok = !self.slug.is_empty()
            && self
                .slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !slug_ok {
            return Err(AtelierError::config(format!(
                "gallery slug '{}' must be lowercase ascii, digits or '-'",
                self.slug
            )));
        }
        if self.images.is_empty() {
            return Err(AtelierError::config(format!(
                "gallery '{}' has no images",
                self.slug
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct GalleryItem {
    observer: InView,
    opacity: Tween,
    offset: Tween,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GalleryItemFrame {
    pub src: String,
    pub opacity: f64,
    pub offset_y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LightboxFrame {
    pub src: String,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GalleryFrame {
    pub slug: String,
    pub title: String,
    pub background: Option<String>,
    pub background_offset_y: f64,
    pub header_opacity: f64,
    pub items: Vec<GalleryItemFrame>,
    pub lightbox: Option<LightboxFrame>,
}

/// A category page: staggered grid plus a single-image lightbox.
#[derive(Debug)]
pub struct GalleryView {
    config: GalleryConfig,
    items: Vec<GalleryItem>,
    selected: Option<usize>,
    lightbox: Tween,
}

impl GalleryView {
    pub fn new(config: GalleryConfig) -> Self {
        let items = (0..config.images.len())
            .map(|idx| {
                let delay = idx as u64 * ITEM_STAGGER_MS;
                GalleryItem {
                    observer: InView::new(InViewOptions::new(Margin::Px(-50.0), true)),
                    opacity: Tween::new(0.0, 1.0, ITEM_REVEAL_MS, Ease::EaseInOut)
                        .with_delay(delay),
                    offset: Tween::new(ITEM_RISE_PX, 0.0, ITEM_REVEAL_MS, Ease::EaseInOut)
                        .with_delay(delay),
                }
            })
            .collect();
        Self {
            config,
            items,
            selected: None,
            lightbox: Tween::new(0.0, 1.0, LIGHTBOX_MS, Ease::Linear),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_image(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.config.images.get(i))
            .map(String::as_str)
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Clicking grid item `index` enlarges it.
    pub fn open_image(&mut self, index: usize, now: TimeMs) -> AtelierResult<()> {
        if index >= self.config.images.len() {
            return Err(AtelierError::validation(format!(
                "gallery '{}' has {} images, cannot open index {index}",
                self.config.slug,
                self.config.images.len()
            )));
        }
        self.selected = Some(index);
        self.lightbox = Tween::new(0.0, 1.0, LIGHTBOX_MS, Ease::Linear);
        self.lightbox.start(now);
        tracing::debug!(gallery = %self.config.slug, index, "lightbox opened");
        Ok(())
    }

    /// The close control (or the backdrop) returns to the grid and clears the selection.
    pub fn close_image(&mut self) {
        if self.selected.take().is_some() {
            tracing::debug!(gallery = %self.config.slug, "lightbox closed");
        }
    }

    /// Reveal items whose document-space regions have entered the viewport.
    pub fn update(&mut self, regions: &[Rect], viewport: Viewport, now: TimeMs) {
        for (item, region) in self.items.iter_mut().zip(regions) {
            if item.observer.update(Some(*region), viewport) {
                item.opacity.start(now);
                item.offset.start(now);
            }
        }
    }

    pub fn sample(&self, scroll_y: f64, now: TimeMs) -> GalleryFrame {
        GalleryFrame {
            slug: self.config.slug.clone(),
            title: self.config.title.clone(),
            background: self.config.background_image().map(str::to_string),
            background_offset_y: background_offset_y(scroll_y),
            header_opacity: header_opacity(scroll_y),
            items: self
                .config
                .images
                .iter()
                .zip(&self.items)
                .map(|(src, item)| GalleryItemFrame {
                    src: src.clone(),
                    opacity: item.opacity.sample(now),
                    offset_y: item.offset.sample(now),
                })
                .collect(),
            lightbox: self.selected_image().map(|src| LightboxFrame {
                src: src.to_string(),
                opacity: self.lightbox.sample(now),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/gallery.rs"]
mod tests;
