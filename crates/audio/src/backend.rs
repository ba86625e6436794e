//! Output backends for the cue player.

use std::io::Write;

use crate::types::SoundCue;

/// Something that can make (or pretend to make) sound.
pub trait AudioBackend {
    /// Begin playing `cue` from its start.
    fn start(&mut self, cue: SoundCue, looping: bool);
    /// Cut `cue` off early.
    fn stop(&mut self, cue: SoundCue);
    /// Global volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
}

/// Plays nothing; cue activity only shows up in the trace log.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn start(&mut self, cue: SoundCue, looping: bool) {
        tracing::debug!(cue = cue.as_str(), looping, "cue start");
    }

    fn stop(&mut self, cue: SoundCue) {
        tracing::debug!(cue = cue.as_str(), "cue stop");
    }

    fn set_volume(&mut self, volume: f32) {
        tracing::debug!(volume, "volume");
    }
}

/// Rings the terminal bell for line clears, level ups and game over.
///
/// Rotation and the looping theme stay silent.
#[derive(Debug)]
pub struct BellBackend<W: Write> {
    out: W,
    volume: f32,
}

impl<W: Write> BellBackend<W> {
    pub fn new(out: W) -> Self {
        Self { out, volume: 1.0 }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn rings_for(cue: SoundCue) -> bool {
        matches!(
            cue,
            SoundCue::FullLine | SoundCue::NewLevel | SoundCue::GameOver
        )
    }
}

impl<W: Write> AudioBackend for BellBackend<W> {
    fn start(&mut self, cue: SoundCue, looping: bool) {
        tracing::debug!(cue = cue.as_str(), looping, "cue start");
        if self.volume <= 0.0 || !Self::rings_for(cue) {
            return;
        }
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            tracing::warn!(%err, "failed to ring terminal bell");
        }
    }

    fn stop(&mut self, cue: SoundCue) {
        tracing::debug!(cue = cue.as_str(), "cue stop");
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}
