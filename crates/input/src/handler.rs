//! Held-key tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! an intent whose key has not been pressed (or auto-repeated) for longer
//! than the timeout is released. Once a real release event has been seen the
//! terminal is trusted and the timeout is no longer applied.

use std::time::Instant;

use blocktris_core::IntentSet;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key, KeyInput};
use crate::types::Intent;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that keeps repeating.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks which intents are held and feeds them into an [`IntentSet`].
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_press: [Option<Instant>; 5],
    key_release_timeout_ms: u32,
    release_events_seen: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_press: [None; 5],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Whether the terminal has reported at least one key release
    pub fn reports_releases(&self) -> bool {
        self.release_events_seen
    }

    /// Route one key event. Returns the non-intent inputs the loop handles itself.
    pub fn handle_key_event(
        &mut self,
        key: KeyEvent,
        now: Instant,
        intents: &mut IntentSet,
    ) -> Option<KeyInput> {
        let input = map_key(key)?;
        match (input, key.kind) {
            (KeyInput::Intent(intent), KeyEventKind::Release) => {
                self.handle_key_release(intent, intents);
                None
            }
            (KeyInput::Intent(intent), _) => {
                self.handle_key_press(intent, now, intents);
                None
            }
            // One-shot inputs fire once per physical press, never on auto-repeat.
            (other, KeyEventKind::Press) => Some(other),
            _ => None,
        }
    }

    pub fn handle_key_press(&mut self, intent: Intent, now: Instant, intents: &mut IntentSet) {
        self.last_press[intent.index()] = Some(now);
        intents.press(intent);
    }

    pub fn handle_key_release(&mut self, intent: Intent, intents: &mut IntentSet) {
        self.release_events_seen = true;
        self.last_press[intent.index()] = None;
        intents.release(intent);
    }

    /// Auto-release stale intents; call once per frame before the game tick.
    pub fn update(&mut self, now: Instant, intents: &mut IntentSet) {
        if self.release_events_seen {
            return;
        }
        for intent in Intent::ALL {
            let Some(pressed_at) = self.last_press[intent.index()] else {
                continue;
            };
            let held_ms = now.saturating_duration_since(pressed_at).as_millis();
            if held_ms > u128::from(self.key_release_timeout_ms) {
                self.last_press[intent.index()] = None;
                intents.release(intent);
            }
        }
    }

    /// Forget every held key, e.g. when the terminal loses focus.
    pub fn reset(&mut self, intents: &mut IntentSet) {
        self.last_press = [None; 5];
        intents.clear();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
