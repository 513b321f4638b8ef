use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::core::TimeMs,
    host::events::ListenerKind,
    host::window::{ListenerId, Window},
};

/// Scroll offset past which the hero navigation gives way to the floating menu button.
pub const SCROLL_THRESHOLD_PX: f64 = 100.0;

const HERO_FADE_MS: u64 = 500;
const HERO_LIFT_PX: f64 = -20.0;
const BUTTON_MS: u64 = 400;
const LINK_RISE_PX: f64 = 50.0;
const LINK_MS: u64 = 800;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
    pub subtitle: &'static str,
}

pub const NAV_LINKS: [NavLink; 5] = [
    NavLink {
        name: "Home",
        href: "#home",
        subtitle: "Start Here",
    },
    NavLink {
        name: "The Craft",
        href: "#services",
        subtitle: "Our Approach",
    },
    NavLink {
        name: "Works",
        href: "#portfolio",
        subtitle: "Visual Anthology",
    },
    NavLink {
        name: "The Artist",
        href: "#about",
        subtitle: "Behind the Lens",
    },
    NavLink {
        name: "Contact",
        href: "#contact",
        subtitle: "Initiate Dialogue",
    },
];

/// Entrance delay of menu link `index` after the menu opens.
pub fn link_delay_ms(index: usize) -> u64 {
    100 + index as u64 * 100
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LinkFrame {
    pub name: &'static str,
    pub href: &'static str,
    pub opacity: f64,
    pub offset_y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NavbarFrame {
    pub scrolled: bool,
    pub menu_open: bool,
    pub hero_opacity: f64,
    pub hero_offset_y: f64,
    pub menu_button_scale: f64,
    pub brand_opacity: f64,
    /// Empty while the menu is closed.
    pub links: Vec<LinkFrame>,
}

#[derive(Debug)]
pub struct Navbar {
    scroll_listener: ListenerId,
    scrolled: bool,
    menu_open: bool,
    hero_opacity: Tween,
    hero_offset: Tween,
    button_scale: Tween,
    brand_opacity: Tween,
    links: Vec<(Tween, Tween)>,
}

impl Navbar {
    pub fn mount(window: &mut Window) -> Self {
        let now = window.now();
        let scroll_listener = window.add_listener(ListenerKind::Scroll);
        let mut hero_opacity = Tween::new(0.0, 1.0, HERO_FADE_MS, Ease::Linear);
        let mut hero_offset = Tween::new(HERO_LIFT_PX, 0.0, HERO_FADE_MS, Ease::Linear);
        hero_opacity.start(now);
        hero_offset.start(now);

        let mut nav = Self {
            scroll_listener,
            scrolled: false,
            menu_open: false,
            hero_opacity,
            hero_offset,
            button_scale: Tween::new(0.0, 0.0, BUTTON_MS, Ease::Linear),
            brand_opacity: Tween::new(0.0, 0.0, HERO_FADE_MS, Ease::Linear),
            links: Vec::new(),
        };
        nav.on_scroll(window.viewport().scroll_y, now);
        nav
    }

    pub fn unmount(self, window: &mut Window) {
        window.remove_listener(self.scroll_listener);
    }

    pub fn listens(&self, window: &Window, kind: ListenerKind) -> bool {
        window.delivers(self.scroll_listener, kind)
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn on_scroll(&mut self, scroll_y: f64, now: TimeMs) {
        let scrolled = scroll_y > SCROLL_THRESHOLD_PX;
        if scrolled == self.scrolled && self.hero_opacity.is_started() {
            return;
        }
        self.scrolled = scrolled;
        let (opacity, offset) = if scrolled { (0.0, HERO_LIFT_PX) } else { (1.0, 0.0) };
        self.hero_opacity.retarget(opacity, now);
        self.hero_offset.retarget(offset, now);
        self.sync_chrome(now);
    }

    pub fn toggle_menu(&mut self, now: TimeMs) {
        self.set_menu(!self.menu_open, now);
    }

    /// Following a menu link closes the overlay.
    pub fn follow_link(&mut self, now: TimeMs) {
        self.set_menu(false, now);
    }

    fn set_menu(&mut self, open: bool, now: TimeMs) {
        if open == self.menu_open {
            return;
        }
        self.menu_open = open;
        self.links.clear();
        if open {
            for i in 0..NAV_LINKS.len() {
                let link = |from: f64, to: f64| {
                    let mut t = Tween::new(from, to, LINK_MS, Ease::EXPO_OUT).with_delay(link_delay_ms(i));
                    t.start(now);
                    t
                };
                self.links.push((link(0.0, 1.0), link(LINK_RISE_PX, 0.0)));
            }
        }
        tracing::debug!(open, "navbar menu toggled");
        self.sync_chrome(now);
    }

    fn sync_chrome(&mut self, now: TimeMs) {
        let button = if self.scrolled || self.menu_open { 1.0 } else { 0.0 };
        let brand = if self.scrolled && !self.menu_open { 1.0 } else { 0.0 };
        self.button_scale.retarget(button, now);
        self.brand_opacity.retarget(brand, now);
    }

    pub fn sample(&self, now: TimeMs) -> NavbarFrame {
        NavbarFrame {
            scrolled: self.scrolled,
            menu_open: self.menu_open,
            hero_opacity: self.hero_opacity.sample(now),
            hero_offset_y: self.hero_offset.sample(now),
            menu_button_scale: self.button_scale.sample(now),
            brand_opacity: self.brand_opacity.sample(now),
            links: NAV_LINKS
                .iter()
                .zip(&self.links)
                .map(|(l, (opacity, offset))| LinkFrame {
                    name: l.name,
                    href: l.href,
                    opacity: opacity.sample(now),
                    offset_y: offset.sample(now),
                })
                .collect(),
        }
    }
}
