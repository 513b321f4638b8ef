use crate::{
    animation::{
        ease::Ease,
        spring::{SpringConfig, SpringVec2},
        tween::Tween,
    },
    foundation::core::{Point, TimeMs},
    foundation::error::AtelierResult,
    host::events::{ElementInfo, ListenerKind},
    host::window::{ListenerId, Window},
};

/// Window slot name held while a cursor follower is mounted.
pub const CURSOR_SLOT: &str = "cursor-follower";

/// Off-screen starting point so nothing is drawn before the first pointer move.
pub const CURSOR_START: Point = Point::new(-100.0, -100.0);

const HOVER_TRANSITION_MS: u64 = 200;

pub fn dot_spring_config() -> SpringConfig {
    SpringConfig::new(400.0, 25.0)
}

pub fn ring_spring_config() -> SpringConfig {
    SpringConfig::new(200.0, 20.0)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CursorFrame {
    pub dot: Point,
    pub dot_scale: f64,
    pub ring: Point,
    pub ring_scale: f64,
    pub ring_opacity: f64,
    pub hovering: bool,
}

/// Custom pointer: a tight dot and a looser trailing ring.
///
/// At most one may be mounted per [`Window`]; a second [`CursorFollower::mount`] on the same
/// window is a caller error and fails. [`CursorFollower::unmount`] removes both global listeners
/// and frees the slot.
#[derive(Debug)]
pub struct CursorFollower {
    move_listener: ListenerId,
    over_listener: ListenerId,
    raw: Point,
    dot: SpringVec2,
    ring: SpringVec2,
    hovering: bool,
    dot_scale: Tween,
    ring_scale: Tween,
    ring_opacity: Tween,
}

impl CursorFollower {
    pub fn mount(window: &mut Window) -> AtelierResult<Self> {
        window.claim_singleton(CURSOR_SLOT)?;
        let move_listener = window.add_listener(ListenerKind::PointerMove);
        let over_listener = window.add_listener(ListenerKind::PointerOver);
        tracing::debug!("cursor follower mounted");

        let fade = |v: f64| Tween::new(v, v, HOVER_TRANSITION_MS, Ease::EaseInOut);
        Ok(Self {
            move_listener,
            over_listener,
            raw: CURSOR_START,
            dot: SpringVec2::new(CURSOR_START, dot_spring_config()),
            ring: SpringVec2::new(CURSOR_START, ring_spring_config()),
            hovering: false,
            dot_scale: fade(1.0),
            ring_scale: fade(1.0),
            ring_opacity: fade(0.5),
        })
    }

    pub fn unmount(self, window: &mut Window) {
        window.remove_listener(self.move_listener);
        window.remove_listener(self.over_listener);
        window.release_singleton(CURSOR_SLOT);
        tracing::debug!("cursor follower unmounted");
    }

    pub fn listeners(&self) -> (ListenerId, ListenerId) {
        (self.move_listener, self.over_listener)
    }

    /// Whether one of this follower's listeners is still registered for `kind`.
    pub fn listens(&self, window: &Window, kind: ListenerKind) -> bool {
        window.delivers(self.move_listener, kind) || window.delivers(self.over_listener, kind)
    }

    pub fn on_pointer_move(&mut self, client: Point) {
        if !(client.x.is_finite() && client.y.is_finite()) {
            return;
        }
        self.raw = client;
        self.dot.set_target(client);
        self.ring.set_target(client);
    }

    pub fn on_pointer_over(&mut self, target: &ElementInfo, now: TimeMs) {
        let hovering = target.is_interactive();
        if hovering == self.hovering {
            return;
        }
        self.hovering = hovering;
        let (dot, ring, opacity) = if hovering {
            (2.5, 1.5, 0.0)
        } else {
            (1.0, 1.0, 0.5)
        };
        self.dot_scale.retarget(dot, now);
        self.ring_scale.retarget(ring, now);
        self.ring_opacity.retarget(opacity, now);
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn raw_position(&self) -> Point {
        self.raw
    }

    pub fn on_frame(&mut self, dt_ms: f64) {
        self.dot.step(dt_ms);
        self.ring.step(dt_ms);
    }

    pub fn sample(&self, now: TimeMs) -> CursorFrame {
        CursorFrame {
            dot: self.dot.value(),
            dot_scale: self.dot_scale.sample(now),
            ring: self.ring.value(),
            ring_scale: self.ring_scale.sample(now),
            ring_opacity: self.ring_opacity.sample(now),
            hovering: self.hovering,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/cursor.rs"]
mod tests;
