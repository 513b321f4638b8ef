use crate::{
    effects::{
        cursor::CursorFrame, parallax::ParallaxTransform, ripple::RippleFrame,
        text_reveal::UnitFrame,
    },
    foundation::core::Viewport,
    foundation::error::AtelierResult,
    media::section::SectionFrame,
    shell::{gallery::GalleryFrame, intro::IntroFrame, navbar::NavbarFrame},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeadingSnapshot {
    pub text: String,
    pub revealed: bool,
    pub units: Vec<UnitFrame>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionSnapshot {
    #[serde(flatten)]
    pub frame: SectionFrame,
    pub headings: Vec<HeadingSnapshot>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PortfolioSnapshot {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub transform: ParallaxTransform,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HomeSnapshot {
    pub navbar: NavbarFrame,
    pub sections: Vec<SectionSnapshot>,
    pub portfolio: Vec<PortfolioSnapshot>,
    pub ripple: Option<RippleFrame>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageSnapshot {
    /// Intro still covering the page.
    Loading,
    Home(Box<HomeSnapshot>),
    Gallery(Box<GalleryFrame>),
}

/// All visual state of the site at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SiteSnapshot {
    pub at_ms: u64,
    pub viewport: Viewport,
    pub route: String,
    pub intro: IntroFrame,
    pub cursor: Option<CursorFrame>,
    pub content: PageSnapshot,
}

impl SiteSnapshot {
    pub fn to_json_pretty(&self) -> AtelierResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn home(&self) -> Option<&HomeSnapshot> {
        match &self.content {
            PageSnapshot::Home(h) => Some(h),
            _ => None,
        }
    }

    pub fn gallery(&self) -> Option<&GalleryFrame> {
        match &self.content {
            PageSnapshot::Gallery(g) => Some(g),
            _ => None,
        }
    }

    pub fn section(&self, id: &str) -> Option<&SectionSnapshot> {
        self.home()?.sections.iter().find(|s| s.frame.id == id)
    }
}
