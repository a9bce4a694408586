//! Simulated media layer.
//!
//! The terminal cannot decode images or video, so loads are simulated: each
//! request reports ready after a fixed delay, and items without a media
//! reference fail. Requests are never cancelled; a load finishing after the
//! player moved on carries its old epoch and is dropped by the player.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::player::Epoch;
use crate::story::{Item, MediaKind};

/// Callback the media layer delivers to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSignal {
    Loaded { epoch: Epoch, kind: MediaKind },
    Failed { epoch: Epoch },
}

#[derive(Debug, Clone)]
struct PendingLoad {
    epoch: Epoch,
    kind: MediaKind,
    fails: bool,
    ready_at: Instant,
}

/// Delayed-completion media loader.
#[derive(Debug)]
pub struct SimulatedMedia {
    delay: Duration,
    pending: VecDeque<PendingLoad>,
}

impl SimulatedMedia {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: VecDeque::new(),
        }
    }

    /// Start loading `item` on behalf of `epoch`.
    pub fn request(&mut self, item: &Item, epoch: Epoch, now: Instant) {
        self.pending.push_back(PendingLoad {
            epoch,
            kind: item.kind,
            fails: item.url.trim().is_empty(),
            ready_at: now + self.delay,
        });
    }

    /// Collect every load that finished by `now`, oldest first.
    pub fn poll(&mut self, now: Instant) -> Vec<MediaSignal> {
        let mut signals = Vec::new();
        while let Some(load) = self.pending.front() {
            if load.ready_at > now {
                break;
            }
            let load = match self.pending.pop_front() {
                Some(load) => load,
                None => break,
            };
            signals.push(if load.fails {
                MediaSignal::Failed { epoch: load.epoch }
            } else {
                MediaSignal::Loaded {
                    epoch: load.epoch,
                    kind: load.kind,
                }
            });
        }
        signals
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}
