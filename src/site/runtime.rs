use std::collections::BTreeMap;

use crate::{
    effects::{cursor::CursorFollower, parallax::ParallaxImage, ripple::RippleEffect, text_reveal::TextReveal},
    foundation::core::{Point, Rect, TimeMs, Viewport},
    foundation::error::{AtelierError, AtelierResult},
    host::events::{InputEvent, ListenerKind},
    host::window::{Tick, TimerId, Window},
    media::player::{PlaybackError, SimulatedPlayer},
    media::section::MediaSection,
    shell::{
        gallery::GalleryView,
        intro::IntroSequencer,
        navbar::Navbar,
        router::{History, Route},
    },
    site::config::{PortfolioItem, SiteConfig},
    site::snapshot::{
        HeadingSnapshot, HomeSnapshot, PageSnapshot, PortfolioSnapshot, SectionSnapshot,
        SiteSnapshot,
    },
};

const FOOTER_HEIGHT: f64 = 400.0;
const HEADING_TOP_FRACTION: f64 = 0.3;
const HEADING_HEIGHT: f64 = 120.0;
const PORTFOLIO_ROW: f64 = 600.0;
const PORTFOLIO_IMAGE_HEIGHT: f64 = 450.0;
const RIPPLE_SIZE: (f64, f64) = (500.0, 650.0);
const GALLERY_HEADER: f64 = 500.0;
const GALLERY_ITEM: f64 = 600.0;
const GALLERY_GAP: f64 = 32.0;

/// One timed input in a replay script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: InputEvent,
}

/// A list of timed inputs, serialized as a bare JSON array.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json_str(s: &str) -> AtelierResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Document-space geometry of the landing page.
#[derive(Clone, Debug)]
struct HomeLayout {
    sections: Vec<Rect>,
    portfolio: Vec<Rect>,
    ripple: Option<Rect>,
    height: f64,
}

impl HomeLayout {
    fn compute(config: &SiteConfig, vp: Viewport) -> Self {
        let mut y = 0.0;
        let mut sections = Vec::with_capacity(config.sections.len());
        let mut portfolio = Vec::new();
        for s in &config.sections {
            let mut h = vp.height;
            if s.media.id == config.portfolio_section {
                h += config.portfolio.len() as f64 * PORTFOLIO_ROW;
                portfolio = (0..config.portfolio.len())
                    .map(|j| {
                        let top = y + vp.height * 0.5 + j as f64 * PORTFOLIO_ROW;
                        Rect::new(0.0, top, vp.width * 0.6, top + PORTFOLIO_IMAGE_HEIGHT)
                    })
                    .collect();
            }
            sections.push(Rect::new(0.0, y, vp.width, y + h));
            y += h;
        }

        let ripple = config.ripple.as_ref().and_then(|r| {
            let idx = config.sections.iter().position(|s| s.media.id == r.section)?;
            let sec = sections[idx];
            let (w, h) = RIPPLE_SIZE;
            let x0 = vp.width * 0.1;
            let y0 = sec.y0 + (sec.height() - h) * 0.5;
            Some(Rect::new(x0, y0, (x0 + w).min(vp.width), y0 + h))
        });

        Self {
            sections,
            portfolio,
            ripple,
            height: y + FOOTER_HEIGHT,
        }
    }

    fn heading(&self, section: usize, k: usize) -> Rect {
        let sec = self.sections[section];
        let top = sec.y0 + sec.height() * HEADING_TOP_FRACTION + k as f64 * HEADING_HEIGHT;
        Rect::new(sec.x0, top, sec.x1, top + HEADING_HEIGHT)
    }
}

fn gallery_layout(images: usize, vp: Viewport) -> (Vec<Rect>, f64) {
    let regions = (0..images)
        .map(|j| {
            let top = GALLERY_HEADER + j as f64 * (GALLERY_ITEM + GALLERY_GAP);
            Rect::new(0.0, top, vp.width, top + GALLERY_ITEM)
        })
        .collect();
    let height = GALLERY_HEADER + images as f64 * (GALLERY_ITEM + GALLERY_GAP) + FOOTER_HEIGHT;
    (regions, height)
}

#[derive(Debug)]
struct HomeSection {
    media: MediaSection,
    headings: Vec<TextReveal>,
}

#[derive(Debug)]
struct HomePage {
    layout: HomeLayout,
    navbar: Navbar,
    sections: Vec<HomeSection>,
    portfolio: Vec<(PortfolioItem, ParallaxImage)>,
    ripple: Option<RippleEffect>,
}

#[derive(Debug)]
struct GalleryPage {
    view: GalleryView,
    regions: Vec<Rect>,
    height: f64,
}

#[derive(Debug)]
enum Page {
    Loading,
    Home(Box<HomePage>),
    Gallery(Box<GalleryPage>),
}

/// The whole site driven headlessly: intro, routed pages and the global cursor on one window.
///
/// Hosts feed [`InputEvent`]s through [`SiteRuntime::dispatch`], move time forward with
/// [`SiteRuntime::advance_to`], and read [`SiteRuntime::snapshot`]. Background videos are
/// [`SimulatedPlayer`]s whose play requests are settled by `play_settled` events.
#[derive(Debug)]
pub struct SiteRuntime {
    config: SiteConfig,
    window: Window,
    cursor: Option<CursorFollower>,
    intro: IntroSequencer,
    history: History,
    players: BTreeMap<String, SimulatedPlayer>,
    page: Page,
}

impl SiteRuntime {
    pub fn new(config: SiteConfig) -> AtelierResult<Self> {
        config.validate()?;
        let mut window =
            Window::with_frame_interval(config.initial_viewport()?, config.frame_interval_ms);
        let cursor = if config.cursor {
            Some(CursorFollower::mount(&mut window)?)
        } else {
            None
        };
        let intro = IntroSequencer::mount(config.intro.clone(), &mut window)?;
        Ok(Self {
            config,
            window,
            cursor,
            intro,
            history: History::new(Route::Home),
            players: BTreeMap::new(),
            page: Page::Loading,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn now(&self) -> TimeMs {
        self.window.now()
    }

    pub fn route(&self) -> &Route {
        self.history.current()
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn is_revealed(&self) -> bool {
        self.intro.is_revealed()
    }

    /// Handle on the simulated video behind section `id` on the mounted landing page.
    pub fn player(&self, id: &str) -> Option<&SimulatedPlayer> {
        self.players.get(id)
    }

    /// Run every timer and animation frame due up to and including `target`.
    pub fn advance_to(&mut self, target: TimeMs) -> AtelierResult<()> {
        while let Some(tick) = self.window.poll_until(target) {
            match tick {
                Tick::Timer { id, at } => self.on_timer(id, at)?,
                Tick::Frame { dt_ms, .. } => self.on_frame(dt_ms),
            }
        }
        Ok(())
    }

    pub fn advance_by(&mut self, ms: u64) -> AtelierResult<()> {
        self.advance_to(self.now().add_ms(ms))
    }

    /// Replay `script` in time order, then advance to `until`.
    ///
    /// Steps scheduled before the current time are dispatched immediately.
    pub fn run_script(&mut self, script: &Script, until: TimeMs) -> AtelierResult<()> {
        let mut steps: Vec<&ScriptStep> = script.steps.iter().collect();
        steps.sort_by_key(|s| s.at_ms);
        for step in steps {
            self.advance_to(TimeMs(step.at_ms))?;
            self.dispatch(&step.event)?;
        }
        self.advance_to(until)
    }

    fn on_timer(&mut self, id: TimerId, at: TimeMs) -> AtelierResult<()> {
        if !self.intro.on_timer(&mut self.window, id, at) {
            tracing::trace!(?id, "unowned timer");
            return Ok(());
        }
        if self.intro.is_revealed() && matches!(self.page, Page::Loading) {
            self.mount_route()?;
        }
        Ok(())
    }

    fn on_frame(&mut self, dt_ms: f64) {
        if let Some(c) = self.cursor.as_mut() {
            c.on_frame(dt_ms);
        }
        if let Page::Home(home) = &mut self.page {
            for (_, img) in &mut home.portfolio {
                img.step(dt_ms);
            }
            if let Some(r) = home.ripple.as_mut() {
                r.on_frame(&self.window, dt_ms);
            }
            for s in &mut home.sections {
                s.media.poll_playback();
            }
        }
    }

    pub fn dispatch(&mut self, event: &InputEvent) -> AtelierResult<()> {
        let now = self.now();
        tracing::trace!(?event, at_ms = now.0, "dispatch");
        match event {
            InputEvent::PointerMove { x, y } => {
                if let Some(c) = self.listening_cursor(event) {
                    c.on_pointer_move(Point::new(*x, *y));
                }
                self.pointer_move(Point::new(*x, *y), now);
            }
            InputEvent::PointerOver { target } => {
                if let Some(c) = self.listening_cursor(event) {
                    c.on_pointer_over(target, now);
                }
            }
            InputEvent::Scroll { y } => {
                let max = (self.document_height() - self.window.viewport().height).max(0.0);
                self.window.scroll_to(y.clamp(0.0, max));
                self.refresh();
            }
            InputEvent::Resize { width, height } => {
                self.window.resize(*width, *height)?;
                let vp = self.window.viewport();
                match &mut self.page {
                    Page::Home(home) => home.layout = HomeLayout::compute(&self.config, vp),
                    Page::Gallery(g) => {
                        (g.regions, g.height) = gallery_layout(g.view.config().images.len(), vp);
                    }
                    Page::Loading => {}
                }
                self.refresh();
            }
            InputEvent::Media { section, event } => {
                self.home_section_mut(section)?.on_media_event(*event, now);
            }
            InputEvent::PlaySettled { section, rejected } => {
                let player = self.players.get(section).ok_or_else(|| {
                    AtelierError::validation(format!("no video mounted for section '{section}'"))
                })?;
                let result = match rejected {
                    None => Ok(()),
                    Some(reason) => Err(PlaybackError::NotAllowed(reason.clone())),
                };
                if !player.settle_next(result) {
                    tracing::debug!(%section, "no outstanding play request to settle");
                }
                self.home_section_mut(section)?.poll_playback();
            }
            InputEvent::Navigate { path } => {
                let route = Route::parse(path)?;
                if let Some(slug) = route.gallery_slug()
                    && self.config.gallery(slug).is_none()
                {
                    return Err(AtelierError::validation(format!("no gallery named '{slug}'")));
                }
                self.history.push(route);
                self.route_changed()?;
            }
            InputEvent::Back => {
                self.history.back();
                self.route_changed()?;
            }
            InputEvent::ToggleMenu => match &mut self.page {
                Page::Home(home) => home.navbar.toggle_menu(now),
                _ => tracing::debug!("menu toggle ignored off the landing page"),
            },
            InputEvent::OpenImage { index } => match &mut self.page {
                Page::Gallery(g) => g.view.open_image(*index, now)?,
                _ => return Err(AtelierError::validation("no gallery page is open")),
            },
            InputEvent::CloseImage => match &mut self.page {
                Page::Gallery(g) => g.view.close_image(),
                _ => return Err(AtelierError::validation("no gallery page is open")),
            },
        }
        Ok(())
    }

    fn home_section_mut(&mut self, id: &str) -> AtelierResult<&mut MediaSection> {
        let Page::Home(home) = &mut self.page else {
            return Err(AtelierError::validation(format!(
                "section '{id}' is not mounted"
            )));
        };
        home.sections
            .iter_mut()
            .map(|s| &mut s.media)
            .find(|m| m.id() == id)
            .ok_or_else(|| AtelierError::validation(format!("unknown section '{id}'")))
    }

    /// The cursor, if it still holds a listener on the channel `event` arrives on.
    fn listening_cursor(&mut self, event: &InputEvent) -> Option<&mut CursorFollower> {
        let kind = event.listener_kind()?;
        let window = &self.window;
        self.cursor.as_mut().filter(|c| c.listens(window, kind))
    }

    fn pointer_move(&mut self, client: Point, now: TimeMs) {
        let vp = self.window.viewport();
        if let Page::Home(home) = &mut self.page
            && let (Some(ripple), Some(region)) = (home.ripple.as_mut(), home.layout.ripple)
        {
            let container = vp.to_client(region);
            if container.contains(client) {
                ripple.on_pointer_move(client, container, now);
            } else if ripple.is_hovered() {
                ripple.on_pointer_leave(now);
            }
        }
    }

    fn document_height(&self) -> f64 {
        match &self.page {
            Page::Loading => self.window.viewport().height,
            Page::Home(home) => home.layout.height,
            Page::Gallery(g) => g.height,
        }
    }

    fn route_changed(&mut self) -> AtelierResult<()> {
        if !self.intro.is_revealed() {
            // Content mounts once the intro reveals it.
            return Ok(());
        }
        self.mount_route()
    }

    fn unmount_page(&mut self) {
        match std::mem::replace(&mut self.page, Page::Loading) {
            Page::Home(home) => {
                let HomePage { navbar, ripple, .. } = *home;
                navbar.unmount(&mut self.window);
                if let Some(mut r) = ripple {
                    r.unmount(&mut self.window);
                }
                self.players.clear();
            }
            Page::Gallery(_) | Page::Loading => {}
        }
    }

    #[tracing::instrument(skip(self), fields(route = %self.history.current()))]
    fn mount_route(&mut self) -> AtelierResult<()> {
        self.unmount_page();
        self.window.scroll_to(0.0);
        let now = self.now();
        let vp = self.window.viewport();

        self.page = match self.history.current().clone() {
            Route::Home => {
                let layout = HomeLayout::compute(&self.config, vp);
                let mut sections = Vec::with_capacity(self.config.sections.len());
                for entry in &self.config.sections {
                    let player = SimulatedPlayer::new(entry.initial_ready_state);
                    self.players.insert(entry.media.id.clone(), player.clone());
                    sections.push(HomeSection {
                        media: MediaSection::mount(entry.media.clone(), Box::new(player), now),
                        headings: entry
                            .headings
                            .iter()
                            .map(|h| TextReveal::new(h.text.clone(), h.reveal))
                            .collect(),
                    });
                }
                let portfolio = self
                    .config
                    .portfolio
                    .iter()
                    .zip(&layout.portfolio)
                    .map(|(item, region)| {
                        let mut img = ParallaxImage::new(item.image.clone(), item.parallax_strength_pct);
                        img.settle(Some(*region), vp);
                        (item.clone(), img)
                    })
                    .collect();
                let ripple = self.config.ripple.as_ref().map(|r| RippleEffect::new(r.image.clone()));
                Page::Home(Box::new(HomePage {
                    layout,
                    navbar: Navbar::mount(&mut self.window),
                    sections,
                    portfolio,
                    ripple,
                }))
            }
            Route::Gallery(slug) => {
                let config = self
                    .config
                    .gallery(&slug)
                    .cloned()
                    .ok_or_else(|| AtelierError::validation(format!("no gallery named '{slug}'")))?;
                let (regions, height) = gallery_layout(config.images.len(), vp);
                Page::Gallery(Box::new(GalleryPage {
                    view: GalleryView::new(config),
                    regions,
                    height,
                }))
            }
        };
        tracing::debug!("page mounted");
        self.refresh();
        Ok(())
    }

    /// Re-run viewport-driven state after scroll, resize or mount.
    fn refresh(&mut self) {
        let now = self.now();
        let vp = self.window.viewport();
        match &mut self.page {
            Page::Loading => {}
            Page::Home(home) => {
                if home.navbar.listens(&self.window, ListenerKind::Scroll) {
                    home.navbar.on_scroll(vp.scroll_y, now);
                }
                for (i, s) in home.sections.iter_mut().enumerate() {
                    let region = home.layout.sections.get(i).copied();
                    s.media.update(region, vp, now);
                    for (k, h) in s.headings.iter_mut().enumerate() {
                        h.update(Some(home.layout.heading(i, k)), vp, now);
                    }
                }
                for ((_, img), region) in home.portfolio.iter_mut().zip(&home.layout.portfolio) {
                    img.observe(Some(*region), vp);
                }
                if let Some(r) = home.ripple.as_mut() {
                    r.update_visibility(&mut self.window, home.layout.ripple);
                }
            }
            Page::Gallery(g) => g.view.update(&g.regions, vp, now),
        }
    }

    /// Serializable visual state of everything mounted, at the current time.
    #[tracing::instrument(skip(self), fields(at_ms = self.now().0))]
    pub fn snapshot(&self) -> SiteSnapshot {
        let now = self.now();
        let vp = self.window.viewport();
        let content = match &self.page {
            Page::Loading => PageSnapshot::Loading,
            Page::Home(home) => PageSnapshot::Home(Box::new(HomeSnapshot {
                navbar: home.navbar.sample(now),
                sections: home
                    .sections
                    .iter()
                    .map(|s| SectionSnapshot {
                        frame: s.media.sample(now),
                        headings: s
                            .headings
                            .iter()
                            .map(|h| HeadingSnapshot {
                                text: h.accessible_text().to_string(),
                                revealed: h.is_revealed(),
                                units: h.sample(now),
                            })
                            .collect(),
                    })
                    .collect(),
                portfolio: home
                    .portfolio
                    .iter()
                    .map(|(item, img)| PortfolioSnapshot {
                        id: item.id,
                        title: item.title.clone(),
                        image: img.src().to_string(),
                        transform: img.transform(),
                    })
                    .collect(),
                ripple: home.ripple.as_ref().map(|r| r.sample(now)),
            })),
            Page::Gallery(g) => PageSnapshot::Gallery(Box::new(g.view.sample(vp.scroll_y, now))),
        };
        SiteSnapshot {
            at_ms: now.0,
            viewport: vp,
            route: self.history.current().to_string(),
            intro: self.intro.sample(now),
            cursor: self.cursor.as_ref().map(|c| c.sample(now)),
            content,
        }
    }

    /// Tear everything down, leaving the window with no listeners, timers or frame callbacks.
    pub fn shutdown(mut self) -> Window {
        self.unmount_page();
        self.intro.unmount(&mut self.window);
        if let Some(c) = self.cursor.take() {
            c.unmount(&mut self.window);
        }
        self.window
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/runtime.rs"]
mod tests;
