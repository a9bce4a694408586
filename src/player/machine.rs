//! Playback state machine.
//!
//! `StoryPlayer` owns the current index, the progress timer, the input gate
//! and the observed `PlaybackState`. Every input arrives as a discrete call
//! (tick, media callback, gesture) and returns the `PlayerEvent`s it caused.
//! Nothing runs in the background: the host drives time through `tick`.
//!
//! Ticks and media callbacks carry the `Epoch` that was current when they
//! were dispatched. Each `Loading` transition starts a new epoch, so a late
//! callback for a superseded item is dropped without touching the state of
//! the item now on screen.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::{CallerPausePolicy, PlayerConfig};
use crate::player::error::PlayerError;
use crate::player::gate::{InputGate, PauseSource};
use crate::player::navigation::{classify_tap, resolve, Decision, NavEvent};
use crate::player::state::{indicator_values, Boundary, Epoch, Phase, PlaybackState, PlayerEvent};
use crate::player::timer::{ProgressTimer, Tick};
use crate::story::{Item, Sequence};

/// Story playback state machine.
#[derive(Debug)]
pub struct StoryPlayer {
    config: PlayerConfig,
    sequence: Option<Arc<Sequence>>,
    state: PlaybackState,
    timer: ProgressTimer,
    gate: InputGate,
    /// Caller flag as supplied, before the pause policy is applied
    caller_pause: bool,
    /// Last height accepted from the layout pass
    layout_height: Option<u32>,
}

impl StoryPlayer {
    /// Create an idle player.
    pub fn new(config: PlayerConfig) -> Result<Self, PlayerError> {
        config.validate()?;
        let default_duration = config.default_duration();
        Ok(Self {
            config,
            sequence: None,
            state: PlaybackState::idle(default_duration),
            timer: ProgressTimer::new(default_duration),
            gate: InputGate::new(),
            caller_pause: false,
            layout_height: None,
        })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn epoch(&self) -> Epoch {
        self.state.epoch
    }

    pub fn gate(&self) -> &InputGate {
        &self.gate
    }

    pub fn sequence(&self) -> Option<&Arc<Sequence>> {
        self.sequence.as_ref()
    }

    /// Item on screen, if any.
    pub fn current_item(&self) -> Option<&Item> {
        if !self.state.phase.is_active() {
            return None;
        }
        self.sequence.as_ref()?.get(self.state.current_index)
    }

    /// Progress of each indicator in the progress row. Empty when the row
    /// is disabled or nothing is shown.
    pub fn indicators(&self) -> Vec<f64> {
        if !self.config.enable_progress || self.state.phase == Phase::Idle {
            return Vec::new();
        }
        let len = self.sequence.as_ref().map_or(0, |s| s.len());
        indicator_values(len, self.state.current_index, self.state.progress)
    }

    // === Visibility / sequence lifecycle ===

    /// Show a sequence from its first item.
    ///
    /// Showing the sequence that is already playing is a no-op; after a
    /// boundary the same sequence plays again from the start. A different
    /// sequence supersedes the current one unconditionally. A rejected
    /// sequence never interrupts current playback.
    pub fn show(&mut self, sequence: Arc<Sequence>) -> Result<Vec<PlayerEvent>, PlayerError> {
        if let Some(current) = &self.sequence {
            if Arc::ptr_eq(current, &sequence) && self.state.phase.is_active() {
                trace!(id = %sequence.id, "sequence already shown");
                return Ok(Vec::new());
            }
        }

        if let Err(err) = validate_sequence(&sequence) {
            warn!(id = %sequence.id, error = %err, "rejected sequence");
            return Err(err);
        }

        debug!(id = %sequence.id, items = sequence.len(), "showing sequence");
        self.sequence = Some(sequence);
        Ok(vec![self.enter_loading(0)])
    }

    /// Hide the player. Stops the timer and invalidates in-flight callbacks.
    pub fn hide(&mut self) {
        if self.state.phase == Phase::Idle {
            return;
        }
        self.timer.reset();
        self.sequence = None;
        self.state = PlaybackState {
            paused: self.gate.is_paused(),
            epoch: self.state.epoch.next(),
            ..PlaybackState::idle(self.config.default_duration())
        };
        debug!(epoch = %self.state.epoch, "player hidden");
    }

    /// Play the current sequence again from its first item.
    pub fn restart(&mut self) -> Vec<PlayerEvent> {
        if self.sequence.is_none() {
            return Vec::new();
        }
        vec![self.enter_loading(0)]
    }

    /// Reset per-item state for `index` under a fresh epoch.
    ///
    /// Loaded flag, progress, opacity and duration all change here, before
    /// any tick for the new item can be accepted.
    fn enter_loading(&mut self, index: usize) -> PlayerEvent {
        let duration_ms = self
            .sequence
            .as_ref()
            .and_then(|s| s.get(index))
            .and_then(|item| item.duration)
            .unwrap_or(0);

        self.timer.reset();
        self.timer.start(duration_ms);
        self.sync_timer_pause();

        let epoch = self.state.epoch.next();
        self.state = PlaybackState {
            phase: Phase::Loading,
            current_index: index,
            paused: self.gate.is_paused(),
            loaded: false,
            duration: self.timer.duration(),
            opacity: 0.0,
            progress: 0.0,
            epoch,
        };

        debug!(index, epoch = %epoch, duration_ms = self.state.duration.as_millis() as u64, "item loading");
        PlayerEvent::ItemStarted { index, epoch }
    }

    // === Media layer callbacks ===

    /// Media for the item dispatched under `epoch` is ready.
    pub fn on_media_ready(&mut self, epoch: Epoch) -> Vec<PlayerEvent> {
        if !self.accepts(epoch) || self.state.phase != Phase::Loading {
            trace!(epoch = %epoch, current = %self.state.epoch, "stale load callback ignored");
            return Vec::new();
        }

        self.timer.set_loaded(true);
        self.state.loaded = true;
        self.state.opacity = 1.0;
        self.state.phase = if self.gate.is_paused() {
            Phase::Paused
        } else {
            Phase::Playing
        };

        debug!(index = self.state.current_index, phase = ?self.state.phase, "item ready");
        vec![PlayerEvent::ItemReady {
            index: self.state.current_index,
        }]
    }

    pub fn on_image_loaded(&mut self, epoch: Epoch) -> Vec<PlayerEvent> {
        self.on_media_ready(epoch)
    }

    pub fn on_video_loaded(&mut self, epoch: Epoch) -> Vec<PlayerEvent> {
        self.on_media_ready(epoch)
    }

    /// The media layer failed to load the item dispatched under `epoch`.
    pub fn on_load_failed(&mut self, epoch: Epoch) -> Vec<PlayerEvent> {
        if !self.accepts(epoch) || self.state.phase != Phase::Loading {
            trace!(epoch = %epoch, "stale failure callback ignored");
            return Vec::new();
        }
        warn!(index = self.state.current_index, epoch = %epoch, "media failed to load");
        vec![PlayerEvent::MediaLoadFailed {
            index: self.state.current_index,
            epoch,
        }]
    }

    // === Time ===

    /// Advance the active item's clock by `dt`.
    pub fn tick(&mut self, epoch: Epoch, dt: Duration) -> Vec<PlayerEvent> {
        if !self.accepts(epoch) {
            trace!(epoch = %epoch, current = %self.state.epoch, "stale tick ignored");
            return Vec::new();
        }

        match self.timer.tick(dt) {
            Tick::Progress(progress) => {
                self.state.progress = progress;
                Vec::new()
            }
            Tick::Complete => {
                self.state.progress = 1.0;
                debug!(index = self.state.current_index, "item complete");
                self.navigate(NavEvent::Timeout)
            }
            Tick::Halted => Vec::new(),
        }
    }

    fn accepts(&self, epoch: Epoch) -> bool {
        epoch == self.state.epoch && self.state.phase.is_active()
    }

    // === Navigation ===

    /// Resolve and apply a navigation event.
    pub fn navigate(&mut self, event: NavEvent) -> Vec<PlayerEvent> {
        if !self.state.phase.is_active() {
            return Vec::new();
        }
        let len = self.sequence.as_ref().map_or(0, |s| s.len());
        let decision = resolve(event, self.state.current_index, len);
        trace!(?event, ?decision, index = self.state.current_index, "navigation resolved");
        self.apply(decision)
    }

    pub fn next(&mut self) -> Vec<PlayerEvent> {
        self.navigate(NavEvent::ArrowNext)
    }

    pub fn previous(&mut self) -> Vec<PlayerEvent> {
        self.navigate(NavEvent::ArrowPrev)
    }

    /// Handle a tap at `x` within a view of `width`.
    pub fn tap(&mut self, x: f64, width: f64) -> Vec<PlayerEvent> {
        self.navigate(classify_tap(x, width, self.config.tap_split_ratio))
    }

    fn apply(&mut self, decision: Decision) -> Vec<PlayerEvent> {
        match decision {
            Decision::Advance => vec![self.enter_loading(self.state.current_index + 1)],
            Decision::Retreat => vec![self.enter_loading(self.state.current_index - 1)],
            Decision::EndOfSequence => vec![self.complete(Boundary::End)],
            Decision::StartOfSequence => vec![self.complete(Boundary::Start)],
            Decision::NoOp => Vec::new(),
        }
    }

    fn complete(&mut self, boundary: Boundary) -> PlayerEvent {
        self.timer.reset();
        self.state.phase = Phase::Completed;
        self.state.epoch = self.state.epoch.next();
        debug!(?boundary, index = self.state.current_index, "sequence boundary reached");
        PlayerEvent::Boundary(boundary)
    }

    // === Pause sources ===

    pub fn on_long_press_start(&mut self) -> Vec<PlayerEvent> {
        self.set_pause_source(PauseSource::UserHold, true)
    }

    pub fn on_long_press_end(&mut self) -> Vec<PlayerEvent> {
        self.set_pause_source(PauseSource::UserHold, false)
    }

    pub fn on_keyboard_visibility_change(&mut self, visible: bool) -> Vec<PlayerEvent> {
        self.set_pause_source(PauseSource::KeyboardOverlay, visible)
    }

    /// Caller-level pause flag, filtered through the configured policy.
    pub fn set_caller_pause(&mut self, paused: bool) -> Vec<PlayerEvent> {
        self.caller_pause = paused;
        let effective = match self.config.caller_pause {
            CallerPausePolicy::Always => paused,
            CallerPausePolicy::WithoutProgress => paused && !self.config.enable_progress,
        };
        self.set_pause_source(PauseSource::Caller, effective)
    }

    pub fn caller_pause(&self) -> bool {
        self.caller_pause
    }

    fn set_pause_source(&mut self, source: PauseSource, active: bool) -> Vec<PlayerEvent> {
        if !self.gate.set_source(source, active) {
            trace!(%source, active, paused = self.gate.is_paused(), "pause source updated");
            return Vec::new();
        }

        let paused = self.gate.is_paused();
        debug!(%source, active, paused, "effective pause changed");
        self.state.paused = paused;
        self.sync_timer_pause();

        match (self.state.phase, paused) {
            (Phase::Playing, true) => self.state.phase = Phase::Paused,
            (Phase::Paused, false) => self.state.phase = Phase::Playing,
            _ => {}
        }

        if self.state.phase.is_active() {
            vec![PlayerEvent::PauseChanged { paused }]
        } else {
            Vec::new()
        }
    }

    fn sync_timer_pause(&mut self) {
        if self.gate.is_paused() {
            self.timer.pause();
        } else {
            self.timer.resume();
        }
    }

    // === Layout ===

    /// Accept a layout height unless the keyboard overlay is up.
    ///
    /// Returns the height the host should pin the story view to, or `None`
    /// while the overlay is visible and the previous height stays in force.
    pub fn on_layout(&mut self, height: u32) -> Option<u32> {
        if self.gate.is_active(PauseSource::KeyboardOverlay) {
            return None;
        }
        self.layout_height = Some(height);
        Some(height)
    }

    pub fn layout_height(&self) -> Option<u32> {
        self.layout_height
    }
}

/// Reject sequences that cannot be played.
pub fn validate_sequence(sequence: &Sequence) -> Result<(), PlayerError> {
    if sequence.is_empty() {
        return Err(PlayerError::EmptySequence);
    }
    for (index, item) in sequence.items.iter().enumerate() {
        if let Some(duration_ms) = item.duration {
            if duration_ms < 0 {
                return Err(PlayerError::NegativeDuration { index, duration_ms });
            }
        }
    }
    Ok(())
}
