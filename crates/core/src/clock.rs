//! Frame clock - per-frame elapsed time in whole milliseconds
//!
//! The game update consumes the raw elapsed time, while drawing-related timing
//! uses a copy clamped to [`MAX_FRAME_MS`]. A long stall (e.g. a suspended
//! terminal) therefore still reaches the simulation in full.

use std::time::Duration;

use crate::types::MAX_FRAME_MS;

/// Elapsed time of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameDelta {
    /// Time since the previous frame, unclamped
    pub raw_ms: u32,
    /// `raw_ms` clamped to [`MAX_FRAME_MS`]
    pub capped_ms: u32,
}

impl FrameDelta {
    pub fn from_raw(raw_ms: u32) -> Self {
        Self {
            raw_ms,
            capped_ms: raw_ms.min(MAX_FRAME_MS),
        }
    }
}

/// Converts monotonic timestamps into frame deltas without drift
///
/// Sub-millisecond remainders are carried into the next frame instead of
/// being truncated away.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    reported_ms: u128,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `since_start` (time elapsed since the loop began)
    pub fn advance(&mut self, since_start: Duration) -> FrameDelta {
        let total_ms = since_start.as_millis();
        let raw = total_ms.saturating_sub(self.reported_ms);
        self.reported_ms = self.reported_ms.max(total_ms);
        FrameDelta::from_raw(u32::try_from(raw).unwrap_or(u32::MAX))
    }
}
