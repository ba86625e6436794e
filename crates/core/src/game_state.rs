//! Game state module - the session state machine
//!
//! A [`GameSession`] owns the board, the current and next pieces, the session
//! counters and every timer. It moves through Title → Playing → GameOver →
//! Title, driven by [`GameSession::tick`] once per frame plus the discrete
//! pointer operations (`tap`, `click`, `nudge`, `toggle_mute`).
//!
//! Sound is requested, never played: commands queue up as [`AudioCommand`]s
//! and the outer loop drains them into the audio adapter.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::intents::IntentSet;
use crate::piece::Tetromino;
use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// Maximum queued audio commands between two drains
const AUDIO_QUEUE_LEN: usize = 32;

/// What happened when the current piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Rows removed by this lock
    pub lines_cleared: u32,
    /// Levels gained by this lock
    pub levels_gained: u32,
    /// The promoted piece could not spawn
    pub topped_out: bool,
}

/// A complete single-player game session
#[derive(Debug, Clone)]
pub struct GameSession {
    phase: GamePhase,
    board: Board,
    current: Tetromino,
    next: Tetromino,
    rng: SimpleRng,
    score: u32,
    level: u32,
    lines: u32,
    drop_delay_ms: u32,
    /// Time since the last automatic drop; also debounces confirm on the title screen
    drop_timer_ms: u32,
    /// Held intents repeat once this goes negative
    repeat_timer_ms: i32,
    flicker_timer_ms: u32,
    game_over_visible: bool,
    muted: bool,
    pending_click: Option<(f32, f32)>,
    last_lock: Option<LockEvent>,
    audio: ArrayVec<AudioCommand, AUDIO_QUEUE_LEN>,
}

impl GameSession {
    /// Create a session on the title screen with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Tetromino::new(rng.next_kind());
        let next = Tetromino::new(rng.next_kind());

        let mut session = Self {
            phase: GamePhase::Title,
            board: Board::new(),
            current,
            next,
            rng,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            drop_delay_ms: INITIAL_DROP_DELAY_MS,
            drop_timer_ms: 0,
            repeat_timer_ms: 0,
            flicker_timer_ms: 0,
            game_over_visible: false,
            muted: false,
            pending_click: None,
            last_lock: None,
            audio: ArrayVec::new(),
        };
        session.new_game();
        session.phase = GamePhase::Title;
        session
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    /// Replace the falling piece
    pub fn set_current(&mut self, piece: Tetromino) {
        self.current = piece;
    }

    /// Replace the previewed piece
    pub fn set_next(&mut self, piece: Tetromino) {
        self.next = piece;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_delay_ms(&self) -> u32 {
        self.drop_delay_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn repeat_timer_ms(&self) -> i32 {
        self.repeat_timer_ms
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn game_over_visible(&self) -> bool {
        self.game_over_visible
    }

    /// Take and clear the last lock event
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Drain queued audio requests, oldest first
    pub fn drain_audio(&mut self) -> impl Iterator<Item = AudioCommand> + '_ {
        self.audio.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.phase = self.phase;
        out.current = PieceSnapshot::from(self.current);
        out.next = PieceSnapshot::from(self.next);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_delay_ms = self.drop_delay_ms;
        out.muted = self.muted;
        out.game_over_visible = self.game_over_visible;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the session by one frame
    ///
    /// `elapsed_ms` is the raw (unclamped) time since the previous frame.
    /// Held intents are sampled exactly once here.
    pub fn tick(&mut self, elapsed_ms: u32, intents: &mut IntentSet) {
        if intents.take_released() {
            self.repeat_timer_ms = 0;
        }

        let elapsed_i32 = i32::try_from(elapsed_ms).unwrap_or(i32::MAX);
        self.repeat_timer_ms = self.repeat_timer_ms.saturating_sub(elapsed_i32);
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        self.flicker_timer_ms = self.flicker_timer_ms.saturating_add(elapsed_ms);

        if let Some((x, y)) = self.pending_click.take() {
            if MUTE_BUTTON.contains(x, y) {
                self.toggle_mute();
            }
        }

        match self.phase {
            GamePhase::Title => {
                if intents.is_held(Intent::Confirm)
                    && self.drop_timer_ms > TITLE_CONFIRM_DEBOUNCE_MS
                {
                    self.request(AudioCommand::Play(SoundCue::MainTheme));
                    self.new_game();
                }
            }
            GamePhase::Playing => self.update_playing(intents),
            GamePhase::GameOver => {
                if self.flicker_timer_ms > GAME_OVER_FLICKER_MS {
                    self.game_over_visible = !self.game_over_visible;
                    self.flicker_timer_ms = 0;
                }
                if intents.is_held(Intent::Confirm) {
                    self.return_to_title();
                }
            }
        }
    }

    fn update_playing(&mut self, intents: &IntentSet) {
        if self.repeat_timer_ms < 0 {
            if intents.is_held(Intent::MoveLeft) {
                self.move_left();
            }
            if intents.is_held(Intent::MoveRight) {
                self.move_right();
            }
            if intents.is_held(Intent::RotateCw) {
                self.rotate();
            }
            if intents.is_held(Intent::SoftDrop) {
                self.soft_drop();
            }
        }

        if self.drop_timer_ms > self.drop_delay_ms {
            if self.try_shift(1, 0) {
                self.drop_timer_ms = 0;
            } else {
                self.lock_current();
            }
        }
    }

    /// Touch tap at canvas coordinates, applied immediately
    pub fn tap(&mut self, x: f32, y: f32) {
        if MUTE_BUTTON.contains(x, y) {
            self.toggle_mute();
            return;
        }

        match self.phase {
            GamePhase::Title => {
                self.new_game();
                self.request(AudioCommand::Play(SoundCue::MainTheme));
            }
            GamePhase::Playing => {
                if !self.rotate() {
                    self.request(AudioCommand::Play(SoundCue::Rotate));
                }
            }
            GamePhase::GameOver => {
                if self.drop_timer_ms > GAME_OVER_TAP_DELAY_MS {
                    self.return_to_title();
                }
            }
        }
    }

    /// Mouse click at canvas coordinates; hit-tested on the next tick
    pub fn click(&mut self, x: f32, y: f32) {
        self.pending_click = Some((x, y));
    }

    /// One swipe step, applied immediately and regardless of the repeat cooldown
    pub fn nudge(&mut self, intent: Intent) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        match intent {
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::SoftDrop => self.soft_drop(),
            Intent::RotateCw => self.rotate(),
            Intent::Confirm => false,
        }
    }

    /// Flip the global mute flag
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        tracing::info!(muted = self.muted, "mute toggled");
        self.request(AudioCommand::SetMuted(self.muted));
    }

    /// Move the current piece by (rows, cols) if the target is free
    fn try_shift(&mut self, d_row: i8, d_col: i8) -> bool {
        let p = self.current;
        let (Some(row), Some(col)) = (p.row().checked_add(d_row), p.col().checked_add(d_col)) else {
            return false;
        };
        if self.board.can_place(p.kind(), p.rotation(), row, col) {
            self.current.set_position(row, col);
            true
        } else {
            false
        }
    }

    fn move_left(&mut self) -> bool {
        let moved = self.try_shift(0, -1);
        if moved {
            self.repeat_timer_ms = KEYBOARD_DELAY_MS;
        }
        moved
    }

    fn move_right(&mut self) -> bool {
        let moved = self.try_shift(0, 1);
        if moved {
            self.repeat_timer_ms = KEYBOARD_DELAY_MS;
        }
        moved
    }

    fn soft_drop(&mut self) -> bool {
        let moved = self.try_shift(1, 0);
        if moved {
            self.repeat_timer_ms = 0;
        }
        moved
    }

    /// Rotate in place to the next frame; no kicks, no alternate offsets
    pub(crate) fn rotate(&mut self) -> bool {
        let p = self.current;
        let rotation = p.rotation().rotate_cw();
        if !self.board.can_place(p.kind(), rotation, p.row(), p.col()) {
            return false;
        }
        self.current.set_rotation(rotation);
        self.request(AudioCommand::Play(SoundCue::Rotate));
        self.repeat_timer_ms = KEYBOARD_DELAY_MS;
        true
    }

    /// Stamp the current piece, clear rows, promote the next piece
    fn lock_current(&mut self) {
        self.board.place(&self.current);

        let level_before = self.level;
        let lines_cleared = self.clear_full_rows();

        self.current.copy_from(&self.next);
        self.next = Tetromino::new(self.rng.next_kind());

        let p = self.current;
        let topped_out = !self.board.can_place(p.kind(), p.rotation(), p.row(), p.col());
        if topped_out {
            self.phase = GamePhase::GameOver;
            self.drop_timer_ms = 0;
            self.flicker_timer_ms = 0;
            self.request(AudioCommand::StopAll);
            self.request(AudioCommand::Play(SoundCue::GameOver));
            tracing::info!(lines = self.lines, level = self.level, "game over");
        }
        self.drop_timer_ms = self.drop_delay_ms;

        tracing::debug!(lines_cleared, topped_out, spawned = p.kind().as_str(), "piece locked");
        self.last_lock = Some(LockEvent {
            lines_cleared,
            levels_gained: self.level - level_before,
            topped_out,
        });
    }

    /// Scan rows top to bottom, compacting each full row as soon as it is found
    ///
    /// Compacting row `r` only moves rows above `r`, which have already been
    /// scanned, so continuing at `r + 1` still visits every remaining row.
    fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        for row in 0..BOARD_HEIGHT as usize {
            if !self.board.is_row_full(row) {
                continue;
            }
            cleared += 1;
            self.lines += 1;
            self.request(AudioCommand::Play(SoundCue::FullLine));
            if self.lines % LINES_PER_LEVEL == 0 {
                self.level_up();
            }
            self.board.compact(row);
        }
        cleared
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.request(AudioCommand::Play(SoundCue::NewLevel));
        if self.drop_delay_ms > DROP_DELAY_FLOOR_MS {
            self.drop_delay_ms = self
                .drop_delay_ms
                .saturating_sub(DROP_DELAY_STEP_MS)
                .max(DROP_DELAY_FLOOR_MS);
        }
        tracing::info!(level = self.level, drop_delay_ms = self.drop_delay_ms, "level up");
    }

    /// Reset counters and enter Playing; the board and pieces carry over
    fn new_game(&mut self) {
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.drop_delay_ms = INITIAL_DROP_DELAY_MS;
        self.phase = GamePhase::Playing;
        self.drop_timer_ms = 0;
        tracing::info!("new game");
    }

    fn return_to_title(&mut self) {
        self.board.reset();
        self.drop_timer_ms = 0;
        self.phase = GamePhase::Title;
        tracing::info!("back to title");
    }

    fn request(&mut self, command: AudioCommand) {
        if self.audio.try_push(command).is_err() {
            tracing::warn!(?command, "audio queue full, dropping request");
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Rgb = Rgb::new(128, 128, 128);

    fn playing(seed: u32) -> GameSession {
        let mut s = GameSession::new(seed);
        s.new_game();
        s.drain_audio().for_each(drop);
        s
    }

    fn held(intents: &[Intent]) -> IntentSet {
        let mut set = IntentSet::new();
        for &i in intents {
            set.press(i);
        }
        set
    }

    #[test]
    fn test_new_session_is_on_title() {
        let s = GameSession::new(12345);
        assert_eq!(s.phase(), GamePhase::Title);
        assert_eq!(s.level(), 1);
        assert_eq!(s.lines(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.drop_delay_ms(), 600);
        assert_eq!(s.drop_timer_ms(), 0);
        assert_eq!((s.current().row(), s.current().col()), (0, 3));
        assert_eq!(s.board().filled_count(), 0);
    }

    #[test]
    fn test_title_confirm_is_debounced() {
        let mut s = GameSession::new(1);
        let mut confirm = held(&[Intent::Confirm]);

        s.tick(500, &mut confirm);
        assert_eq!(s.phase(), GamePhase::Title, "needs strictly more than 500ms");

        s.tick(1, &mut confirm);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.drop_timer_ms(), 0);
        let audio: Vec<_> = s.drain_audio().collect();
        assert_eq!(audio, vec![AudioCommand::Play(SoundCue::MainTheme)]);
    }

    #[test]
    fn test_held_move_respects_cooldown() {
        let mut s = playing(1);
        s.set_current(Tetromino::new(PieceKind::T));
        let mut left = held(&[Intent::MoveLeft]);

        s.tick(16, &mut left);
        assert_eq!(s.current().col(), 2);
        assert_eq!(s.repeat_timer_ms(), KEYBOARD_DELAY_MS);

        // Still cooling down.
        s.tick(16, &mut left);
        assert_eq!(s.current().col(), 2);

        s.tick(300, &mut left);
        assert_eq!(s.current().col(), 1);
    }

    #[test]
    fn test_release_resets_cooldown() {
        let mut s = playing(1);
        s.set_current(Tetromino::new(PieceKind::T));
        let mut intents = held(&[Intent::MoveRight]);

        s.tick(16, &mut intents);
        assert_eq!(s.current().col(), 4);

        intents.release(Intent::MoveRight);
        s.tick(16, &mut intents);
        assert!(s.repeat_timer_ms() < 0);

        intents.press(Intent::MoveRight);
        s.tick(16, &mut intents);
        assert_eq!(s.current().col(), 5);
    }

    #[test]
    fn test_soft_drop_has_no_repeat_delay() {
        let mut s = playing(1);
        s.set_current(Tetromino::new(PieceKind::O));
        let mut down = held(&[Intent::SoftDrop]);

        for expected_row in 1..=4 {
            s.tick(1, &mut down);
            assert_eq!(s.current().row(), expected_row);
            assert_eq!(s.repeat_timer_ms(), 0);
        }
    }

    #[test]
    fn test_gravity_waits_for_drop_delay() {
        let mut s = playing(1);
        s.set_current(Tetromino::new(PieceKind::O));
        let mut none = IntentSet::new();

        s.tick(600, &mut none);
        assert_eq!(s.current().row(), 0, "needs strictly more than the delay");
        s.tick(1, &mut none);
        assert_eq!(s.current().row(), 1);
        assert_eq!(s.drop_timer_ms(), 0);
    }

    #[test]
    fn test_rotation_rejected_against_wall() {
        let mut s = playing(1);
        let mut piece = Tetromino::new(PieceKind::I);
        piece.set_orientation(1);
        // Tall I against the right wall: frame column 1 sits in board column 9.
        piece.set_position(5, 8);
        s.set_current(piece);

        assert!(!s.rotate());
        assert_eq!(s.current().rotation(), Rotation::East);
        assert_eq!((s.current().row(), s.current().col()), (5, 8));
    }

    #[test]
    fn test_rotation_plays_cue_and_sets_cooldown() {
        let mut s = playing(1);
        s.set_current(Tetromino::new(PieceKind::T));
        assert!(s.rotate());
        assert_eq!(s.current().rotation(), Rotation::East);
        assert_eq!(s.repeat_timer_ms(), KEYBOARD_DELAY_MS);
        let audio: Vec<_> = s.drain_audio().collect();
        assert_eq!(audio, vec![AudioCommand::Play(SoundCue::Rotate)]);
    }

    #[test]
    fn test_lock_promotes_next_piece() {
        let mut s = playing(3);
        let mut piece = Tetromino::new(PieceKind::O);
        piece.set_position(17, 0);
        s.set_current(piece);
        s.set_next(Tetromino::new(PieceKind::L));

        s.lock_current();
        assert_eq!(s.current().kind(), PieceKind::L);
        assert_eq!((s.current().row(), s.current().col()), (0, 3));
        assert_eq!(s.board().filled_count(), 4);
        assert_eq!(s.drop_timer_ms(), s.drop_delay_ms());
        assert_eq!(
            s.take_last_lock(),
            Some(LockEvent {
                lines_cleared: 0,
                levels_gained: 0,
                topped_out: false
            })
        );
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut s = playing(3);
        // O spawns over rows 1..=2, cols 4..=5.
        s.board_mut().set(1, 4, Some(GREY));
        let mut piece = Tetromino::new(PieceKind::I);
        piece.set_position(18, 0);
        s.set_current(piece);
        s.set_next(Tetromino::new(PieceKind::O));

        s.lock_current();
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.drop_timer_ms(), s.drop_delay_ms());
        let audio: Vec<_> = s.drain_audio().collect();
        assert_eq!(
            audio,
            vec![
                AudioCommand::StopAll,
                AudioCommand::Play(SoundCue::GameOver)
            ]
        );
    }

    #[test]
    fn test_game_over_flicker_and_confirm() {
        let mut s = playing(3);
        s.phase = GamePhase::GameOver;
        s.board_mut().set(10, 0, Some(GREY));
        let mut none = IntentSet::new();

        assert!(!s.game_over_visible());
        s.tick(501, &mut none);
        assert!(s.game_over_visible());
        s.tick(501, &mut none);
        assert!(!s.game_over_visible());

        let mut confirm = held(&[Intent::Confirm]);
        s.tick(16, &mut confirm);
        assert_eq!(s.phase(), GamePhase::Title);
        assert_eq!(s.board().filled_count(), 0);
        assert_eq!(s.drop_timer_ms(), 0);

        // The same held confirm must not restart immediately.
        s.tick(16, &mut confirm);
        assert_eq!(s.phase(), GamePhase::Title);
    }

    #[test]
    fn test_tap_paths() {
        let mut s = GameSession::new(5);
        s.tap(100.0, 400.0);
        assert_eq!(s.phase(), GamePhase::Playing);

        s.set_current(Tetromino::new(PieceKind::T));
        s.tap(100.0, 400.0);
        assert_eq!(s.current().rotation(), Rotation::East);

        s.phase = GamePhase::GameOver;
        s.drop_timer_ms = 3000;
        s.tap(100.0, 400.0);
        assert_eq!(s.phase(), GamePhase::GameOver, "tap ignored until 3s");
        s.drop_timer_ms = 3001;
        s.tap(100.0, 400.0);
        assert_eq!(s.phase(), GamePhase::Title);
    }

    #[test]
    fn test_tap_on_mute_button_only_mutes() {
        let mut s = GameSession::new(5);
        let (x, y) = MUTE_BUTTON.center();
        s.tap(x, y);
        assert!(s.muted());
        assert_eq!(s.phase(), GamePhase::Title);
        let audio: Vec<_> = s.drain_audio().collect();
        assert_eq!(audio, vec![AudioCommand::SetMuted(true)]);
    }

    #[test]
    fn test_click_is_applied_on_next_tick() {
        let mut s = GameSession::new(5);
        let (x, y) = MUTE_BUTTON.center();
        s.click(x, y);
        assert!(!s.muted());
        s.tick(16, &mut IntentSet::new());
        assert!(s.muted());

        // Clicks elsewhere do nothing, even on the title screen.
        s.click(10.0, 700.0);
        s.tick(16, &mut IntentSet::new());
        assert!(s.muted());
        assert_eq!(s.phase(), GamePhase::Title);
    }

    #[test]
    fn test_nudge_only_while_playing() {
        let mut s = GameSession::new(5);
        s.set_current(Tetromino::new(PieceKind::T));
        assert!(!s.nudge(Intent::MoveLeft));
        assert_eq!(s.current().col(), 3);

        s.new_game();
        assert!(s.nudge(Intent::MoveLeft));
        // Swipes ignore the cooldown the first nudge just set.
        assert!(s.nudge(Intent::MoveLeft));
        assert_eq!(s.current().col(), 1);
        assert!(!s.nudge(Intent::Confirm));
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut s = playing(9);
        s.board_mut().set(19, 0, Some(GREY));
        let snap = s.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.board[19][0], Some(GREY));
        assert_eq!(snap.current.kind, s.current().kind());
        assert_eq!(snap.next.kind, s.next().kind());
        assert_eq!(snap.level, 1);
        assert!(snap.shows_current());
    }
}
