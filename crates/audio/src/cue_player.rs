//! At-most-one-instance-per-cue playback tracking.

use crate::backend::AudioBackend;
use crate::types::{AudioCommand, SoundCue};

/// Playback length of a cue in milliseconds.
pub fn cue_length_ms(cue: SoundCue) -> u32 {
    match cue {
        SoundCue::FullLine => 2400,
        SoundCue::GameOver => 6636,
        SoundCue::MainTheme => 167_524,
        SoundCue::NewLevel => 904,
        SoundCue::Rotate => 58,
    }
}

/// Drives an [`AudioBackend`] from game audio commands.
///
/// Muting only changes the backend volume; cues keep being tracked, so a
/// cue started while muted still blocks a second instance.
#[derive(Debug)]
pub struct CuePlayer<B: AudioBackend> {
    backend: B,
    /// Time left per cue, `None` when idle.
    remaining_ms: [Option<u32>; 5],
    muted: bool,
}

impl<B: AudioBackend> CuePlayer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            remaining_ms: [None; 5],
            muted: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self, cue: SoundCue) -> bool {
        self.remaining_ms[cue.index()].is_some()
    }

    pub fn handle(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::Play(cue) => {
                self.play_if_idle(cue);
            }
            AudioCommand::StopAll => self.stop_all(),
            AudioCommand::SetMuted(muted) => self.set_muted(muted),
        }
    }

    /// Start `cue` unless an instance of it is still playing.
    pub fn play_if_idle(&mut self, cue: SoundCue) -> bool {
        let slot = &mut self.remaining_ms[cue.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(cue_length_ms(cue));
        self.backend.start(cue, cue.looping());
        true
    }

    /// Let `elapsed_ms` of playback pass; finished one-shot cues become idle.
    pub fn advance(&mut self, elapsed_ms: u32) {
        for cue in SoundCue::ALL {
            if cue.looping() {
                continue;
            }
            let slot = &mut self.remaining_ms[cue.index()];
            if let Some(left) = *slot {
                *slot = left.checked_sub(elapsed_ms).filter(|&l| l > 0);
            }
        }
    }

    pub fn stop_all(&mut self) {
        for cue in SoundCue::ALL {
            if self.remaining_ms[cue.index()].take().is_some() {
                self.backend.stop(cue);
            }
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.backend.set_volume(if muted { 0.0 } else { 1.0 });
    }
}
