//! Touch-style gestures from pointer drags.
//!
//! All coordinates are canvas units. Dragging accumulates travel; every time
//! the horizontal travel passes the move threshold the piece is nudged one
//! column and the accumulator restarts, likewise downward travel nudges one
//! row. A short press that barely moved becomes a tap at the release point.

use arrayvec::ArrayVec;

use crate::types::Intent;

/// Travel (canvas units) needed for one nudge
pub const MOVE_THRESHOLD: f32 = 15.0;
/// Maximum press-to-release distance for a tap
pub const TAP_THRESHOLD: f32 = 20.0;
/// Maximum press duration for a tap
pub const TAP_TIME_MS: u64 = 300;

/// A recognised gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// One immediate step of a swipe
    Nudge(Intent),
    Tap { x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy)]
struct Press {
    x: f32,
    y: f32,
    at_ms: u64,
}

/// Turns press / drag / release sequences into [`Gesture`]s
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    press: Option<Press>,
    last: (f32, f32),
    acc_x: f32,
    acc_y: f32,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn press(&mut self, x: f32, y: f32, now_ms: u64) {
        self.press = Some(Press { x, y, at_ms: now_ms });
        self.last = (x, y);
    }

    /// Pointer moved while pressed
    pub fn drag(&mut self, x: f32, y: f32) -> ArrayVec<Gesture, 2> {
        let mut out = ArrayVec::new();
        if self.press.is_none() {
            return out;
        }

        self.acc_x += x - self.last.0;
        self.acc_y += y - self.last.1;
        self.last = (x, y);

        if self.acc_x > MOVE_THRESHOLD {
            out.push(Gesture::Nudge(Intent::MoveRight));
            self.acc_x = 0.0;
        } else if self.acc_x < -MOVE_THRESHOLD {
            out.push(Gesture::Nudge(Intent::MoveLeft));
            self.acc_x = 0.0;
        }

        // Upward travel never triggers anything.
        if self.acc_y > MOVE_THRESHOLD {
            out.push(Gesture::Nudge(Intent::SoftDrop));
            self.acc_y = 0.0;
        }
        out
    }

    /// Pointer released; yields a tap for short, still presses
    pub fn release(&mut self, x: f32, y: f32, now_ms: u64) -> Option<Gesture> {
        let press = self.press.take()?;
        self.acc_x = 0.0;
        self.acc_y = 0.0;

        let (dx, dy) = (x - press.x, y - press.y);
        let distance = (dx * dx + dy * dy).sqrt();
        let duration = now_ms.saturating_sub(press.at_ms);
        (duration < TAP_TIME_MS && distance < TAP_THRESHOLD).then_some(Gesture::Tap { x, y })
    }
}
