//! Integration tests for the session state machine

use blocktris::core::{GameSession, IntentSet, LockEvent, Tetromino};
use blocktris::types::{
    AudioCommand, GamePhase, Intent, PieceKind, Rgb, Rotation, SoundCue, BOARD_WIDTH,
    DROP_DELAY_FLOOR_MS,
};

const GREY: Rgb = Rgb::new(128, 128, 128);

/// One gravity step at the initial delay (and every faster one).
const STEP_MS: u32 = 601;

fn start_playing(seed: u32) -> (GameSession, IntentSet) {
    let mut session = GameSession::new(seed);
    let mut intents = IntentSet::new();

    intents.press(Intent::Confirm);
    session.tick(501, &mut intents);
    assert_eq!(session.phase(), GamePhase::Playing);
    intents.release(Intent::Confirm);

    session.drain_audio().for_each(drop);
    (session, intents)
}

fn piece_at(kind: PieceKind, orientation: u8, row: i8, col: i8) -> Tetromino {
    let mut piece = Tetromino::new(kind);
    piece.set_orientation(orientation);
    piece.set_position(row, col);
    piece
}

fn run_until_lock(session: &mut GameSession, intents: &mut IntentSet) -> LockEvent {
    for _ in 0..64 {
        session.tick(STEP_MS, intents);
        if let Some(event) = session.take_last_lock() {
            return event;
        }
    }
    panic!("piece never locked");
}

/// Fill row 19 except column 4, then drop a tall I into the gap.
fn clear_bottom_row(session: &mut GameSession, intents: &mut IntentSet) -> LockEvent {
    session.board_mut().reset();
    session.board_mut().fill_row_except(19, &[4], GREY);
    session.set_current(piece_at(PieceKind::I, 1, 0, 3));
    session.set_next(Tetromino::new(PieceKind::O));
    run_until_lock(session, intents)
}

#[test]
fn test_game_lifecycle() {
    let (mut session, mut intents) = start_playing(12345);
    assert_eq!(session.level(), 1);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.drop_delay_ms(), 600);

    // Block the spawn area and lock a piece: straight to game over.
    session.board_mut().set(2, 5, Some(GREY));
    session.set_current(piece_at(PieceKind::I, 0, 18, 0));
    session.set_next(Tetromino::new(PieceKind::O));
    run_until_lock(&mut session, &mut intents);
    assert_eq!(session.phase(), GamePhase::GameOver);

    intents.press(Intent::Confirm);
    session.tick(16, &mut intents);
    assert_eq!(session.phase(), GamePhase::Title);
    assert_eq!(session.board().filled_count(), 0);

    // Still holding confirm: the title debounce has to elapse first.
    session.tick(500, &mut intents);
    assert_eq!(session.phase(), GamePhase::Title);
    session.tick(1, &mut intents);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.level(), 1);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_o_piece_stacks_on_previous_one() {
    let (mut session, mut intents) = start_playing(7);
    session.set_current(piece_at(PieceKind::O, 0, 0, 4));
    session.set_next(piece_at(PieceKind::O, 0, 0, 3));

    run_until_lock(&mut session, &mut intents);
    for row in [18, 19] {
        for col in [5, 6] {
            assert!(session.board().get(row, col).is_some_and(|c| c.is_some()));
        }
    }

    // The promoted O spawns at column 3; move it to column 4 and drop it.
    session.set_current(piece_at(PieceKind::O, 0, 0, 4));
    run_until_lock(&mut session, &mut intents);

    assert_eq!(session.board().filled_count(), 8);
    for row in [16, 17] {
        for col in [5, 6] {
            assert!(
                session.board().get(row, col).is_some_and(|c| c.is_some()),
                "({row}, {col}) should hold the second O"
            );
        }
    }
    assert_eq!(session.board().get(15, 5), Some(None));
}

#[test]
fn test_single_line_clear_shifts_rows_down() {
    let (mut session, mut intents) = start_playing(3);
    session.board_mut().fill_row_except(19, &[4], GREY);
    session.board_mut().set(10, 0, Some(GREY));
    session.set_current(piece_at(PieceKind::I, 1, 0, 3));
    session.set_next(Tetromino::new(PieceKind::O));

    let event = run_until_lock(&mut session, &mut intents);
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(session.lines(), 1);

    let board = session.board();
    let i_color = Tetromino::new(PieceKind::I).color();
    // Rows 16..=18 of the I moved down to 17..=19.
    for row in 17..20 {
        assert_eq!(board.get(row, 4), Some(Some(i_color)));
    }
    assert_eq!(board.get(16, 4), Some(None));
    assert_eq!(board.get(11, 0), Some(Some(GREY)));
    assert_eq!(board.get(10, 0), Some(None));
    assert!(board.rows().next().is_some_and(|r| r.iter().all(Option::is_none)));
    assert_eq!(board.filled_count(), 4);

    let audio: Vec<_> = session.drain_audio().collect();
    assert!(audio.contains(&AudioCommand::Play(SoundCue::FullLine)));
}

#[test]
fn test_tenth_line_levels_up_once() {
    let (mut session, mut intents) = start_playing(11);

    for n in 1..10 {
        let event = clear_bottom_row(&mut session, &mut intents);
        assert_eq!(event.levels_gained, 0, "clear #{n}");
    }
    assert_eq!(session.level(), 1);
    assert_eq!(session.drop_delay_ms(), 600);
    session.drain_audio().for_each(drop);

    let event = clear_bottom_row(&mut session, &mut intents);
    assert_eq!(event.levels_gained, 1);
    assert_eq!(session.lines(), 10);
    assert_eq!(session.level(), 2);
    assert_eq!(session.drop_delay_ms(), 500);

    let audio: Vec<_> = session.drain_audio().collect();
    assert!(audio.contains(&AudioCommand::Play(SoundCue::NewLevel)));
}

#[test]
fn test_drop_delay_stops_at_floor() {
    let (mut session, mut intents) = start_playing(5);
    let mut delays = Vec::new();

    for _ in 0..60 {
        clear_bottom_row(&mut session, &mut intents);
        session.drain_audio().for_each(drop);
        if session.lines() % 10 == 0 {
            delays.push(session.drop_delay_ms());
        }
    }

    assert_eq!(delays, vec![500, 400, 300, 200, 200, 200]);
    assert_eq!(session.level(), 7);
    assert_eq!(session.drop_delay_ms(), DROP_DELAY_FLOOR_MS);
}

#[test]
fn test_two_clears_with_gap_row_between() {
    let (mut session, mut intents) = start_playing(21);
    {
        let board = session.board_mut();
        board.fill_row_except(17, &[4], GREY);
        board.fill_row_except(18, &[4, 9], GREY);
        board.fill_row_except(19, &[4], GREY);
    }
    session.set_current(piece_at(PieceKind::I, 1, 0, 3));
    session.set_next(Tetromino::new(PieceKind::O));

    let event = run_until_lock(&mut session, &mut intents);
    assert_eq!(event.lines_cleared, 2);
    assert_eq!(session.lines(), 2);

    let board = session.board();
    // Former row 18 (with the I cell in column 4) is now the bottom row.
    for col in 0..BOARD_WIDTH as i8 {
        let expected_filled = col != 9;
        assert_eq!(board.get(19, col).is_some_and(|c| c.is_some()), expected_filled, "col {col}");
    }
    // The I cell that sat in row 16 ends up in row 18.
    assert!(board.get(18, 4).is_some_and(|c| c.is_some()));
    assert_eq!(board.filled_count(), 10);
}

#[test]
fn test_three_clears_with_gap_row_between() {
    let (mut session, mut intents) = start_playing(22);
    {
        let board = session.board_mut();
        board.fill_row_except(16, &[4], GREY);
        board.fill_row_except(17, &[0, 4], GREY);
        board.fill_row_except(18, &[4], GREY);
        board.fill_row_except(19, &[4], GREY);
    }
    session.set_current(piece_at(PieceKind::I, 1, 0, 3));
    session.set_next(Tetromino::new(PieceKind::O));

    let event = run_until_lock(&mut session, &mut intents);
    assert_eq!(event.lines_cleared, 3);
    assert_eq!(session.lines(), 3);

    let board = session.board();
    assert_eq!(board.get(19, 0), Some(None));
    for col in 1..BOARD_WIDTH as i8 {
        assert!(board.get(19, col).is_some_and(|c| c.is_some()), "col {col}");
    }
    assert_eq!(board.filled_count(), 9);

    let audio: Vec<_> = session.drain_audio().collect();
    let full_lines = audio
        .iter()
        .filter(|c| **c == AudioCommand::Play(SoundCue::FullLine))
        .count();
    assert_eq!(full_lines, 3);
}

#[test]
fn test_four_simultaneous_clears() {
    let (mut session, mut intents) = start_playing(23);
    {
        let board = session.board_mut();
        for row in 16..20 {
            board.fill_row_except(row, &[4], GREY);
        }
        board.set(15, 0, Some(GREY));
    }
    session.set_current(piece_at(PieceKind::I, 1, 0, 3));
    session.set_next(Tetromino::new(PieceKind::O));

    let event = run_until_lock(&mut session, &mut intents);
    assert_eq!(event.lines_cleared, 4);
    assert_eq!(session.lines(), 4);

    // Only the cell above the stack survives, four rows lower.
    let board = session.board();
    assert_eq!(board.filled_count(), 1);
    assert_eq!(board.get(19, 0), Some(Some(GREY)));
    for row in 0..19 {
        assert!(!board.is_row_full(row as usize));
    }

    let full_lines = session
        .drain_audio()
        .filter(|c| *c == AudioCommand::Play(SoundCue::FullLine))
        .count();
    assert_eq!(full_lines, 4);
}

#[test]
fn test_piece_at_extreme_origin_does_not_panic() {
    let (mut session, mut intents) = start_playing(24);
    session.set_current(piece_at(PieceKind::O, 0, i8::MAX, i8::MAX));
    session.set_next(Tetromino::new(PieceKind::T));

    intents.press(Intent::MoveRight);
    intents.press(Intent::SoftDrop);
    session.tick(STEP_MS, &mut intents);

    // Nothing of the stray piece lands on the board; play continues.
    assert_eq!(session.board().filled_count(), 0);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.current().kind(), PieceKind::T);
}

#[test]
fn test_blocked_spawn_ends_game_on_same_tick() {
    let (mut session, mut intents) = start_playing(8);
    session.board_mut().set(1, 4, Some(GREY));
    session.set_current(piece_at(PieceKind::I, 0, 18, 0));
    session.set_next(Tetromino::new(PieceKind::O));

    session.tick(STEP_MS, &mut intents);
    let event = session.take_last_lock().expect("locked this tick");
    assert!(event.topped_out);
    assert_eq!(session.phase(), GamePhase::GameOver);

    let audio: Vec<_> = session.drain_audio().collect();
    assert_eq!(
        audio,
        vec![
            AudioCommand::StopAll,
            AudioCommand::Play(SoundCue::GameOver)
        ]
    );
}

#[test]
fn test_rotation_against_obstruction_is_rejected() {
    let (mut session, mut intents) = start_playing(9);
    session.set_current(piece_at(PieceKind::T, 0, 10, 3));
    // The East frame needs (10, 4).
    session.board_mut().set(10, 4, Some(GREY));

    intents.press(Intent::RotateCw);
    session.tick(1, &mut intents);

    let piece = session.current();
    assert_eq!(piece.rotation(), Rotation::North);
    assert_eq!((piece.row(), piece.col()), (10, 3));
    assert!(!session
        .drain_audio()
        .any(|c| c == AudioCommand::Play(SoundCue::Rotate)));
}

#[test]
fn test_same_seed_same_piece_sequence() {
    let kinds = |seed| {
        let (mut session, mut intents) = start_playing(seed);
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(session.current().kind());
            run_until_lock(&mut session, &mut intents);
        }
        seen
    };
    assert_eq!(kinds(4242), kinds(4242));
}
