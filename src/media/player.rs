//! Background video playback seam.
//!
//! Sections drive a [`MediaPlayer`] and never decode anything themselves. `play()` is
//! asynchronous in every real runtime, so it hands back a [`PlayPromise`] that some later event
//! settles through the matching [`PlayResolver`].

use std::{cell::RefCell, rc::Rc};

/// Readiness signals a video element reports while buffering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaEvent {
    /// Enough data to start playing.
    CanPlay,
    /// The first frame is decoded.
    LoadedData,
}

/// Buffering level, ordered from nothing to fully buffered.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ReadyState {
    #[default]
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    HaveEnoughData,
}

impl ReadyState {
    /// Buffered far enough that a section may treat the video as loaded on mount.
    pub fn is_playable(self) -> bool {
        self >= Self::HaveFutureData
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackError {
    /// Runtime autoplay policy refused to start playback.
    #[error("autoplay not allowed: {0}")]
    NotAllowed(String),

    /// A pause or source change interrupted the request.
    #[error("play request aborted: {0}")]
    Aborted(String),
}

type Slot = Rc<RefCell<Option<Result<(), PlaybackError>>>>;

/// Deferred result of a `play()` request. Single-threaded; polled, never awaited.
#[derive(Clone, Debug, Default)]
pub struct PlayPromise {
    slot: Slot,
}

/// Write side of a [`PlayPromise`]. Only the first settle wins.
#[derive(Clone, Debug)]
pub struct PlayResolver {
    slot: Slot,
}

impl PlayPromise {
    pub fn pending() -> (Self, PlayResolver) {
        let slot = Slot::default();
        (
            Self { slot: slot.clone() },
            PlayResolver { slot },
        )
    }

    pub fn resolved() -> Self {
        let (p, r) = Self::pending();
        r.resolve();
        p
    }

    pub fn rejected(err: PlaybackError) -> Self {
        let (p, r) = Self::pending();
        r.reject(err);
        p
    }

    pub fn is_settled(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// `None` while pending.
    pub fn poll(&self) -> Option<Result<(), PlaybackError>> {
        self.slot.borrow().clone()
    }
}

impl PlayResolver {
    pub fn resolve(&self) -> bool {
        self.settle(Ok(()))
    }

    pub fn reject(&self, err: PlaybackError) -> bool {
        self.settle(Err(err))
    }

    fn settle(&self, result: Result<(), PlaybackError>) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(result);
        true
    }
}

/// The video element behind a media section.
pub trait MediaPlayer: std::fmt::Debug {
    fn play(&mut self) -> PlayPromise;
    fn pause(&mut self);
    fn ready_state(&self) -> ReadyState;
}

#[derive(Debug, Default)]
struct SimulatedState {
    ready_state: ReadyState,
    play_calls: u32,
    pause_calls: u32,
    playing: bool,
    pending: Vec<PlayResolver>,
}

/// In-memory player for headless runs. Clones share state, so a host can keep one handle to
/// settle play requests while the section owns another.
#[derive(Clone, Debug, Default)]
pub struct SimulatedPlayer {
    state: Rc<RefCell<SimulatedState>>,
}

impl SimulatedPlayer {
    pub fn new(ready_state: ReadyState) -> Self {
        let player = Self::default();
        player.state.borrow_mut().ready_state = ready_state;
        player
    }

    pub fn set_ready_state(&self, ready_state: ReadyState) {
        self.state.borrow_mut().ready_state = ready_state;
    }

    pub fn play_calls(&self) -> u32 {
        self.state.borrow().play_calls
    }

    pub fn pause_calls(&self) -> u32 {
        self.state.borrow().pause_calls
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    pub fn pending_requests(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Settle the oldest outstanding play request. Returns `false` if none was pending.
    pub fn settle_next(&self, result: Result<(), PlaybackError>) -> bool {
        let mut st = self.state.borrow_mut();
        if st.pending.is_empty() {
            return false;
        }
        let resolver = st.pending.remove(0);
        st.playing = result.is_ok();
        match result {
            Ok(()) => resolver.resolve(),
            Err(err) => resolver.reject(err),
        }
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn play(&mut self) -> PlayPromise {
        let (promise, resolver) = PlayPromise::pending();
        let mut st = self.state.borrow_mut();
        st.play_calls += 1;
        st.pending.push(resolver);
        promise
    }

    fn pause(&mut self) {
        let mut st = self.state.borrow_mut();
        st.pause_calls += 1;
        st.playing = false;
        for r in st.pending.drain(..) {
            r.reject(PlaybackError::Aborted("paused".to_string()));
        }
    }

    fn ready_state(&self) -> ReadyState {
        self.state.borrow().ready_state
    }
}
