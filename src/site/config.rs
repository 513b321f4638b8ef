use std::{collections::BTreeSet, path::Path};

use anyhow::Context;

use crate::{
    effects::text_reveal::{SplitMode, TextRevealOptions},
    foundation::core::Viewport,
    foundation::error::{AtelierError, AtelierResult},
    host::window::DEFAULT_FRAME_INTERVAL_MS,
    media::player::ReadyState,
    media::section::SectionConfig,
    shell::gallery::GalleryConfig,
    shell::intro::IntroConfig,
};

/// A heading inside a section, revealed unit by unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeadingConfig {
    pub text: String,
    #[serde(default)]
    pub reveal: TextRevealOptions,
}

impl HeadingConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reveal: TextRevealOptions::default(),
        }
    }

    fn chars(text: &str, stagger_ms: u64, delay_ms: u64) -> Self {
        Self {
            text: text.to_string(),
            reveal: TextRevealOptions {
                mode: SplitMode::Char,
                stagger_ms,
                delay_ms,
                ..TextRevealOptions::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionEntry {
    #[serde(flatten)]
    pub media: SectionConfig,
    #[serde(default)]
    pub headings: Vec<HeadingConfig>,
    /// Buffering level the simulated video reports at mount.
    #[serde(default)]
    pub initial_ready_state: ReadyState,
}

impl SectionEntry {
    fn new(media: SectionConfig, headings: Vec<HeadingConfig>) -> Self {
        Self {
            media,
            headings,
            initial_ready_state: ReadyState::HaveNothing,
        }
    }
}

/// A portfolio entry on the landing page, linking to a gallery.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PortfolioItem {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub category: String,
    pub year: String,
    /// Slug of the gallery this item opens.
    pub gallery: String,
    #[serde(default = "default_parallax_strength")]
    pub parallax_strength_pct: f64,
}

fn default_parallax_strength() -> f64 {
    crate::effects::parallax::DEFAULT_STRENGTH_PCT
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RippleConfig {
    pub image: String,
    /// Section the rippling image sits in.
    pub section: String,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let vp = Viewport::default();
        Self {
            width: vp.width,
            height: vp.height,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_portfolio_section() -> String {
    "portfolio".to_string()
}

fn default_frame_interval() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}

/// Everything a [`SiteRuntime`](crate::SiteRuntime) needs to lay out and animate the site.
///
/// Missing fields fall back to the stock portfolio site, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub viewport: ViewportConfig,
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    pub intro: IntroConfig,
    pub sections: Vec<SectionEntry>,
    pub portfolio: Vec<PortfolioItem>,
    /// Section the portfolio rows are laid out in.
    #[serde(default = "default_portfolio_section")]
    pub portfolio_section: String,
    pub galleries: Vec<GalleryConfig>,
    pub ripple: Option<RippleConfig>,
    #[serde(default = "default_true")]
    pub cursor: bool,
}

fn gallery(slug: &str, title: &str) -> GalleryConfig {
    GalleryConfig::new(
        slug,
        title,
        (1..=2)
            .map(|i| format!("/images/{slug}/{slug}_{i}.png"))
            .collect(),
    )
}

fn portfolio_item(id: u32, title: &str, slug: &str, category: &str, year: &str) -> PortfolioItem {
    PortfolioItem {
        id,
        title: title.to_string(),
        image: format!("/images/{slug}/{slug}_1.png"),
        category: category.to_string(),
        year: year.to_string(),
        gallery: slug.to_string(),
        parallax_strength_pct: default_parallax_strength(),
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let section = |id: &str, video: &str, overlay: f64| {
            let mut c = SectionConfig::new(id, format!("/videos/{video}.mp4"));
            c.overlay_opacity = overlay;
            c
        };
        Self {
            viewport: ViewportConfig::default(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            intro: IntroConfig::default(),
            sections: vec![
                SectionEntry::new(
                    section("home", "hero_vedio", 0.2).with_priority(true),
                    vec![
                        HeadingConfig::chars("RUDRASISH", 20, 0),
                        HeadingConfig::chars("MAHATO", 20, 200),
                    ],
                ),
                SectionEntry::new(
                    section("services", "service_section", 0.4),
                    vec![HeadingConfig::new("The Craft")],
                ),
                SectionEntry::new(
                    section("portfolio", "portfolio_section", 0.3),
                    vec![HeadingConfig::new("Visual Anthology")],
                ),
                SectionEntry::new(
                    section("about", "about_section", 0.4),
                    vec![HeadingConfig::new("About Me")],
                ),
                SectionEntry::new(
                    section("contact", "contact_section", 0.65),
                    vec![HeadingConfig::new("Inquiries")],
                ),
            ],
            portfolio: vec![
                portfolio_item(1, "Nature's Soul", "nature", "Nature", "2024"),
                portfolio_item(2, "Cloud Symphonies", "clouds", "Atmosphere", "2024"),
                portfolio_item(3, "Golden Sunsets", "sunset", "Light", "2023"),
                portfolio_item(4, "Morning Awakening", "sunrise", "Dawn", "2024"),
            ],
            portfolio_section: default_portfolio_section(),
            galleries: vec![
                gallery("nature", "Nature"),
                gallery("clouds", "Clouds"),
                gallery("sunset", "Sunset"),
                gallery("sunrise", "Sunrise"),
            ],
            ripple: Some(RippleConfig {
                image: "/images/rudrasish_portrait.png".to_string(),
                section: "about".to_string(),
            }),
            cursor: true,
        }
    }
}

impl SiteConfig {
    pub fn from_json_str(s: &str) -> AtelierResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> AtelierResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read site config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn initial_viewport(&self) -> AtelierResult<Viewport> {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    pub fn section(&self, id: &str) -> Option<&SectionEntry> {
        self.sections.iter().find(|s| s.media.id == id)
    }

    pub fn gallery(&self, slug: &str) -> Option<&GalleryConfig> {
        self.galleries.iter().find(|g| g.slug == slug)
    }

    pub fn validate(&self) -> AtelierResult<()> {
        self.initial_viewport()
            .map_err(|e| AtelierError::config(format!("viewport: {e}")))?;
        if self.frame_interval_ms == 0 {
            return Err(AtelierError::config("frame_interval_ms must be > 0"));
        }
        self.intro.validate()?;

        if self.sections.is_empty() {
            return Err(AtelierError::config("site needs at least one section"));
        }
        let mut ids = BTreeSet::new();
        for s in &self.sections {
            s.media.validate()?;
            if !ids.insert(s.media.id.as_str()) {
                return Err(AtelierError::config(format!(
                    "duplicate section id '{}'",
                    s.media.id
                )));
            }
        }

        let mut slugs = BTreeSet::new();
        for g in &self.galleries {
            g.validate()?;
            if !slugs.insert(g.slug.as_str()) {
                return Err(AtelierError::config(format!(
                    "duplicate gallery slug '{}'",
                    g.slug
                )));
            }
        }

        if !self.portfolio.is_empty() && !ids.contains(self.portfolio_section.as_str()) {
            return Err(AtelierError::config(format!(
                "portfolio_section '{}' is not a section id",
                self.portfolio_section
            )));
        }
        for item in &self.portfolio {
            if !slugs.contains(item.gallery.as_str()) {
                return Err(AtelierError::config(format!(
                    "portfolio item '{}' links to missing gallery '{}'",
                    item.title, item.gallery
                )));
            }
            if !item.parallax_strength_pct.is_finite() {
                return Err(AtelierError::config(format!(
                    "portfolio item '{}' has a non-finite parallax strength",
                    item.title
                )));
            }
        }

        if let Some(r) = &self.ripple
            && !ids.contains(r.section.as_str())
        {
            return Err(AtelierError::config(format!(
                "ripple references missing section '{}'",
                r.section
            )));
        }
        Ok(())
    }
}
