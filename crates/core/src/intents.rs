//! Held-intent accumulator
//!
//! Device callbacks press and release intents here as they arrive; the game
//! session samples the set once per tick. A release is remembered until the
//! next sample because it also clears the movement repeat cooldown.

use crate::types::Intent;

/// Set of currently held intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntentSet {
    held: [bool; 5],
    released: bool,
}

impl IntentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an intent as held (idempotent)
    pub fn press(&mut self, intent: Intent) {
        self.held[intent.index()] = true;
    }

    /// Mark an intent as no longer held (idempotent)
    pub fn release(&mut self, intent: Intent) {
        self.held[intent.index()] = false;
        self.released = true;
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        self.held[intent.index()]
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|&h| h)
    }

    /// Return and clear the "something was released" flag
    pub fn take_released(&mut self) -> bool {
        std::mem::take(&mut self.released)
    }

    /// Drop every held intent without recording a release
    pub fn clear(&mut self) {
        self.held = [false; 5];
        self.released = false;
    }

    /// Held intents in [`Intent::ALL`] order
    pub fn held(&self) -> impl Iterator<Item = Intent> + '_ {
        Intent::ALL.into_iter().filter(|i| self.is_held(*i))
    }
}
