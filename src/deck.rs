//! Cross-sequence navigation.
//!
//! The player stops at sequence boundaries and leaves the next move to its
//! caller. `Deck` is that caller policy for a list of users: the end of one
//! user's stories moves on to the next user, going back past the start
//! returns to the previous user, and the ends of the deck restart or close.

use std::sync::Arc;

use crate::player::Boundary;
use crate::story::Sequence;

/// What the host should do after a sequence boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckStep {
    /// Show this sequence
    Show(Arc<Sequence>),
    /// Replay the current sequence from its first item
    Restart,
    /// Nothing left to play
    Close,
}

/// Ordered list of users' sequences with a cursor.
#[derive(Debug, Clone)]
pub struct Deck {
    users: Vec<Arc<Sequence>>,
    current: usize,
}

impl Deck {
    /// Build a deck, dropping users without items. Returns `None` when no
    /// playable user remains.
    pub fn new(users: Vec<Arc<Sequence>>) -> Option<Self> {
        let users: Vec<_> = users.into_iter().filter(|s| !s.is_empty()).collect();
        if users.is_empty() {
            return None;
        }
        Some(Self { users, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Arc<Sequence> {
        Arc::clone(&self.users[self.current])
    }

    /// Jump to a user by index, clamped to the deck.
    pub fn select(&mut self, index: usize) -> Arc<Sequence> {
        self.current = index.min(self.users.len() - 1);
        self.current()
    }

    /// Jump to a user by id.
    pub fn select_id(&mut self, id: &str) -> Option<Arc<Sequence>> {
        let index = self.users.iter().position(|s| s.id == id)?;
        Some(self.select(index))
    }

    /// Move to the next user, or `Close` after the last one.
    pub fn next_user(&mut self) -> DeckStep {
        if self.current + 1 < self.users.len() {
            self.current += 1;
            DeckStep::Show(self.current())
        } else {
            DeckStep::Close
        }
    }

    /// Move to the previous user, or restart the first one.
    pub fn previous_user(&mut self) -> DeckStep {
        if self.current > 0 {
            self.current -= 1;
            DeckStep::Show(self.current())
        } else {
            DeckStep::Restart
        }
    }

    /// React to the player reaching a sequence boundary.
    pub fn on_boundary(&mut self, boundary: Boundary) -> DeckStep {
        match boundary {
            Boundary::End => self.next_user(),
            Boundary::Start => self.previous_user(),
        }
    }
}
