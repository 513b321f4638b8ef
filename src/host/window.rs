use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::core::{TimeMs, Viewport},
    foundation::error::{AtelierError, AtelierResult},
    host::events::ListenerKind,
};

/// Default animation-frame interval (roughly 60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// One unit of work the host must dispatch, produced by [`Window::poll_until`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// A one-shot timer reached its deadline.
    Timer { id: TimerId, at: TimeMs },
    /// An animation frame. `dt_ms` is the time since the previous frame.
    Frame { at: TimeMs, dt_ms: f64 },
}

/// Single-threaded host runtime: virtual clock, timers, frame callbacks, global listeners and the
/// viewport.
///
/// Components never hold a reference to the window. They register work here, keep the returned
/// handle, and are handed the matching [`Tick`] back by whoever drives the window. Every
/// registration has a matching removal so teardown can leave the window exactly as it found it.
#[derive(Debug)]
pub struct Window {
    now: TimeMs,
    viewport: Viewport,
    frame_interval_ms: u64,
    last_frame_at: TimeMs,
    next_frame_at: TimeMs,
    next_id: u64,
    timers: BTreeMap<(TimeMs, u64), TimerId>,
    deadlines: BTreeMap<TimerId, TimeMs>,
    frame_callbacks: BTreeSet<FrameHandle>,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    singletons: BTreeSet<&'static str>,
}

impl Window {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_frame_interval(viewport, DEFAULT_FRAME_INTERVAL_MS)
    }

    pub fn with_frame_interval(viewport: Viewport, frame_interval_ms: u64) -> Self {
        let frame_interval_ms = frame_interval_ms.max(1);
        Self {
            now: TimeMs::ZERO,
            viewport,
            frame_interval_ms,
            last_frame_at: TimeMs::ZERO,
            next_frame_at: TimeMs(frame_interval_ms),
            next_id: 1,
            timers: BTreeMap::new(),
            deadlines: BTreeMap::new(),
            frame_callbacks: BTreeSet::new(),
            listeners: BTreeMap::new(),
            singletons: BTreeSet::new(),
        }
    }

    pub fn now(&self) -> TimeMs {
        self.now
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    pub fn scroll_to(&mut self, y: f64) {
        if y.is_finite() {
            self.viewport.scroll_y = y.max(0.0);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) -> AtelierResult<()> {
        let mut next = Viewport::new(width, height)?;
        next.scroll_y = self.viewport.scroll_y;
        self.viewport = next;
        Ok(())
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        let raw = self.alloc_id();
        let id = TimerId(raw);
        let deadline = self.now.add_ms(delay_ms);
        self.timers.insert((deadline, raw), id);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Returns `false` if the timer already fired or was cleared.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.timers.remove(&(deadline, id.0)).is_some(),
            None => false,
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Subscribe to every animation frame until [`Window::cancel_frames`] is called.
    pub fn request_frames(&mut self) -> FrameHandle {
        let h = FrameHandle(self.alloc_id());
        self.frame_callbacks.insert(h);
        h
    }

    pub fn cancel_frames(&mut self, handle: FrameHandle) -> bool {
        self.frame_callbacks.remove(&handle)
    }

    pub fn is_frame_active(&self, handle: FrameHandle) -> bool {
        self.frame_callbacks.contains(&handle)
    }

    pub fn active_frame_callbacks(&self) -> usize {
        self.frame_callbacks.len()
    }

    pub fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.alloc_id());
        self.listeners.insert(id, kind);
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// True while `id` is registered on the `kind` channel.
    pub fn delivers(&self, id: ListenerId, kind: ListenerKind) -> bool {
        self.listeners.get(&id) == Some(&kind)
    }

    /// Reserve the window-wide slot `name`. Fails if it is already held.
    pub fn claim_singleton(&mut self, name: &'static str) -> AtelierResult<()> {
        if !self.singletons.insert(name) {
            return Err(AtelierError::singleton(format!(
                "'{name}' is already mounted on this window"
            )));
        }
        Ok(())
    }

    pub fn release_singleton(&mut self, name: &'static str) -> bool {
        self.singletons.remove(name)
    }

    pub fn holds_singleton(&self, name: &'static str) -> bool {
        self.singletons.contains(name)
    }

    /// Pop the next due unit of work at or before `target`, moving the clock to it.
    ///
    /// Timers win ties against frames and fire in deadline then creation order. Work scheduled
    /// while handling a tick is seen by the next call, so hosts should loop until `None`. When
    /// nothing is due the clock moves to `target`.
    pub fn poll_until(&mut self, target: TimeMs) -> Option<Tick> {
        let next_timer = self.timers.first_key_value().map(|(k, id)| (k.0, *id));

        if let Some((deadline, id)) = next_timer
            && deadline <= target
            && deadline <= self.next_frame_at
        {
            self.timers.pop_first();
            self.deadlines.remove(&id);
            self.now = self.now.max(deadline);
            return Some(Tick::Timer { id, at: deadline });
        }

        if self.next_frame_at <= target {
            let at = self.next_frame_at;
            let dt_ms = at.since(self.last_frame_at) as f64;
            self.last_frame_at = at;
            self.next_frame_at = at.add_ms(self.frame_interval_ms);
            self.now = self.now.max(at);
            return Some(Tick::Frame { at, dt_ms });
        }

        self.now = self.now.max(target);
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/window.rs"]
mod tests;
