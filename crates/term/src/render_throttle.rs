//! Redraw throttling keyed on snapshot fingerprints.
//!
//! The throttle keeps its own clock, advanced by the frame's capped delta, so
//! a long stall never looks like a burst of elapsed redraw intervals.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_interval_ms: u64,
    now_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            now_ms: 0,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Advance the throttle clock by one frame's capped delta.
    pub fn advance(&mut self, capped_ms: u32) {
        self.now_ms = self.now_ms.saturating_add(u64::from(capped_ms));
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Force the next call to render (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    /// Decide whether to render a new frame.
    ///
    /// Renders immediately on fingerprint change, otherwise at most once per
    /// `min_interval_ms`.
    pub fn should_render(&mut self, fingerprint: u64) -> bool {
        if !self.has_rendered || fingerprint != self.last_fingerprint {
            self.has_rendered = true;
            self.last_render_ms = self.now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if self.now_ms.saturating_sub(self.last_render_ms) >= self.min_interval_ms {
            self.last_render_ms = self.now_ms;
            return true;
        }

        false
    }
}
