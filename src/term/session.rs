//! Story session: the player wired to its collaborators.
//!
//! Routes player events to the media layer and the deck, and feeds media
//! signals, long presses and elapsed time back into the player. No terminal
//! I/O happens here; the run loop supplies `now` and input.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::{Config, MediaFailurePolicy};
use crate::deck::{Deck, DeckStep};
use crate::player::{PlayerError, PlayerEvent, StoryPlayer};
use crate::story::MediaKind;
use crate::term::host::{HostState, InputResult};
use crate::term::media::{MediaSignal, SimulatedMedia};

/// Whether the session keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Every user in the deck was played
    Finished,
    /// Playback stopped early (media failure under the `stop` policy)
    Aborted(String),
}

/// Player, deck, media layer and host state for one run.
#[derive(Debug)]
pub struct Session {
    pub player: StoryPlayer,
    pub deck: Deck,
    pub media: SimulatedMedia,
    pub host: HostState,
    failure_policy: MediaFailurePolicy,
    queue: VecDeque<PlayerEvent>,
    last_tick: Option<Instant>,
    /// Sends performed while the keyboard overlay was up
    replies: Vec<(String, String)>,
}

impl Session {
    pub fn new(deck: Deck, config: &Config, cols: u16, rows: u16) -> Result<Self, PlayerError> {
        let player = StoryPlayer::new(config.player.clone())?;
        Ok(Self {
            player,
            deck,
            media: SimulatedMedia::new(config.terminal.load_delay()),
            host: HostState::new(cols, rows),
            failure_policy: config.terminal.on_load_failure,
            queue: VecDeque::new(),
            last_tick: None,
            replies: Vec::new(),
        })
    }

    /// Show the deck's current user.
    pub fn start(&mut self, now: Instant) -> Result<Flow, PlayerError> {
        let events = self.player.show(self.deck.current())?;
        self.push(events);
        self.last_tick = Some(now);
        self.pump(now)
    }

    pub fn push(&mut self, events: Vec<PlayerEvent>) {
        if !events.is_empty() {
            self.host.needs_render = true;
        }
        self.queue.extend(events);
    }

    /// Dispatch queued player events until the queue is empty.
    pub fn pump(&mut self, now: Instant) -> Result<Flow, PlayerError> {
        while let Some(event) = self.queue.pop_front() {
            match event {
                PlayerEvent::ItemStarted { index, epoch } => {
                    if let Some(item) = self.player.sequence().and_then(|s| s.get(index)) {
                        self.media.request(item, epoch, now);
                    }
                }
                PlayerEvent::ItemReady { .. } | PlayerEvent::PauseChanged { .. } => {}
                PlayerEvent::MediaLoadFailed { index, .. } => match self.failure_policy {
                    MediaFailurePolicy::Skip => {
                        debug!(index, "skipping item that failed to load");
                        let events = self.player.next();
                        self.queue.extend(events);
                    }
                    MediaFailurePolicy::Stop => {
                        self.player.hide();
                        return Ok(Flow::Aborted(format!(
                            "Story {} of {} failed to load",
                            index + 1,
                            self.deck.current().display_name()
                        )));
                    }
                },
                PlayerEvent::Boundary(boundary) => {
                    let step = self.deck.on_boundary(boundary);
                    if let Flow::Finished = self.apply_step(step)? {
                        return Ok(Flow::Finished);
                    }
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn apply_step(&mut self, step: DeckStep) -> Result<Flow, PlayerError> {
        match step {
            DeckStep::Show(sequence) => {
                info!(user = %sequence.id, "switching user");
                let events = self.player.show(sequence)?;
                self.queue.extend(events);
            }
            DeckStep::Restart => {
                let events = self.player.restart();
                self.queue.extend(events);
            }
            DeckStep::Close => {
                self.player.hide();
                return Ok(Flow::Finished);
            }
        }
        self.host.needs_render = true;
        Ok(Flow::Continue)
    }

    /// Deliver media signals, long presses and elapsed time up to `now`.
    pub fn advance(&mut self, now: Instant) -> Result<Flow, PlayerError> {
        for signal in self.media.poll(now) {
            let events = match signal {
                MediaSignal::Loaded { epoch, kind } => match kind {
                    MediaKind::Image => self.player.on_image_loaded(epoch),
                    MediaKind::Video => self.player.on_video_loaded(epoch),
                },
                MediaSignal::Failed { epoch } => self.player.on_load_failed(epoch),
            };
            self.push(events);
        }

        if self.host.press.poll(now, self.player.config().long_press()) {
            self.sync_hold();
        }

        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);
        let events = self.player.tick(self.player.epoch(), dt);
        self.push(events);

        self.pump(now)
    }

    /// Act on a control-flow result from the input handlers.
    pub fn handle_input(&mut self, result: InputResult, now: Instant) -> Result<Flow, PlayerError> {
        let flow = match result {
            InputResult::Continue | InputResult::Quit => Flow::Continue,
            InputResult::NextUser => {
                let step = self.deck.next_user();
                self.apply_step(step)?
            }
            InputResult::PreviousUser => {
                let step = self.deck.previous_user();
                self.apply_step(step)?
            }
            InputResult::Restart => {
                let events = self.player.restart();
                self.push(events);
                Flow::Continue
            }
        };
        if flow != Flow::Continue {
            return Ok(flow);
        }
        self.pump(now)
    }

    /// Space toggle and mouse long press share the player's hold: it is
    /// released only once neither is active.
    pub fn sync_hold(&mut self) {
        let events = if self.host.holding || self.host.press.is_long_press() {
            self.player.on_long_press_start()
        } else {
            self.player.on_long_press_end()
        };
        self.push(events);
    }

    /// Record a reply sent from the keyboard overlay against the current
    /// user.
    pub fn record_reply(&mut self, text: String) {
        let user = self.deck.current().id.clone();
        info!(%user, "reply sent");
        self.replies.push((user, text));
    }

    pub fn replies(&self) -> &[(String, String)] {
        &self.replies
    }
}
