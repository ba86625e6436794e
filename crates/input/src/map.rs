//! Key mapping from terminal events to intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A holdable game intent
    Intent(Intent),
    /// Flip the mute flag (acts on press only)
    ToggleMute,
    Quit,
}

/// Map a key code to a game intent.
pub fn intent_for(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(Intent::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(Intent::MoveRight)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(Intent::RotateCw)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(Intent::SoftDrop)
        }
        KeyCode::Char(' ') | KeyCode::Enter => Some(Intent::Confirm),
        _ => None,
    }
}

/// Map keyboard input to what the loop should do with it.
pub fn map_key(key: KeyEvent) -> Option<KeyInput> {
    if should_quit(key) {
        return Some(KeyInput::Quit);
    }
    match key.code {
        KeyCode::Char('m') | KeyCode::Char('M') => Some(KeyInput::ToggleMute),
        code => intent_for(code).map(KeyInput::Intent),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
