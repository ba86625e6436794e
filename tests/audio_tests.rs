//! Session audio commands played through the cue player

use blocktris::audio::{BellBackend, CuePlayer};
use blocktris::core::{GameSession, IntentSet, Tetromino};
use blocktris::types::{GamePhase, Intent, PieceKind, Rgb, SoundCue};

const GREY: Rgb = Rgb::new(128, 128, 128);

type Player = CuePlayer<BellBackend<Vec<u8>>>;

fn pump(session: &mut GameSession, intents: &mut IntentSet, player: &mut Player, ms: u32) {
    session.tick(ms, intents);
    player.advance(ms);
    for command in session.drain_audio() {
        player.handle(command);
    }
}

fn bells(player: &Player) -> usize {
    player.backend().get_ref().iter().filter(|&&b| b == 0x07).count()
}

fn start(seed: u32) -> (GameSession, IntentSet, Player) {
    let mut session = GameSession::new(seed);
    let mut intents = IntentSet::new();
    let mut player = CuePlayer::new(BellBackend::new(Vec::new()));

    intents.press(Intent::Confirm);
    pump(&mut session, &mut intents, &mut player, 501);
    intents.clear();
    assert_eq!(session.phase(), GamePhase::Playing);
    (session, intents, player)
}

fn drop_into_bottom_gap(session: &mut GameSession, intents: &mut IntentSet, player: &mut Player) {
    session.board_mut().reset();
    session.board_mut().fill_row_except(19, &[4], GREY);
    let mut tall_i = Tetromino::new(PieceKind::I);
    tall_i.set_orientation(1);
    session.set_current(tall_i);
    session.set_next(Tetromino::new(PieceKind::O));
    for _ in 0..64 {
        pump(session, intents, player, 601);
        if session.take_last_lock().is_some() {
            return;
        }
    }
    panic!("piece never locked");
}

#[test]
fn starting_a_game_plays_the_looping_theme_silently() {
    let (_, _, player) = start(1);
    assert!(player.is_playing(SoundCue::MainTheme));
    assert_eq!(bells(&player), 0);
}

#[test]
fn line_clear_rings_the_bell_once() {
    let (mut session, mut intents, mut player) = start(2);
    drop_into_bottom_gap(&mut session, &mut intents, &mut player);

    assert_eq!(session.lines(), 1);
    assert!(player.is_playing(SoundCue::FullLine));
    assert_eq!(bells(&player), 1);
}

#[test]
fn full_line_cue_does_not_overlap_itself() {
    let (mut session, mut intents, mut player) = start(3);

    // Queue two clears inside one cue length (2400 ms).
    session.board_mut().fill_row_except(18, &[4], GREY);
    session.board_mut().fill_row_except(19, &[4], GREY);
    let mut tall_i = Tetromino::new(PieceKind::I);
    tall_i.set_orientation(1);
    session.set_current(tall_i);
    session.set_next(Tetromino::new(PieceKind::O));
    while session.take_last_lock().is_none() {
        pump(&mut session, &mut intents, &mut player, 601);
    }

    assert_eq!(session.lines(), 2);
    assert_eq!(bells(&player), 1);

    // Once the cue runs out, the next clear rings again.
    player.advance(2_400);
    assert!(!player.is_playing(SoundCue::FullLine));
    drop_into_bottom_gap(&mut session, &mut intents, &mut player);
    assert_eq!(bells(&player), 2);
}

#[test]
fn muting_silences_but_keeps_tracking_cues() {
    let (mut session, mut intents, mut player) = start(4);
    session.toggle_mute();
    pump(&mut session, &mut intents, &mut player, 16);
    assert!(player.muted());
    assert_eq!(player.backend().volume(), 0.0);

    drop_into_bottom_gap(&mut session, &mut intents, &mut player);
    assert!(player.is_playing(SoundCue::FullLine));
    assert_eq!(bells(&player), 0);

    session.toggle_mute();
    pump(&mut session, &mut intents, &mut player, 16);
    assert!(!player.muted());
    assert_eq!(player.backend().volume(), 1.0);
}

#[test]
fn game_over_stops_the_theme_and_rings() {
    let (mut session, mut intents, mut player) = start(5);
    session.board_mut().set(1, 4, Some(GREY));
    let mut flat_i = Tetromino::new(PieceKind::I);
    flat_i.set_position(18, 0);
    session.set_current(flat_i);
    session.set_next(Tetromino::new(PieceKind::O));

    pump(&mut session, &mut intents, &mut player, 601);

    assert_eq!(session.phase(), GamePhase::GameOver);
    assert!(!player.is_playing(SoundCue::MainTheme));
    assert!(player.is_playing(SoundCue::GameOver));
    assert_eq!(bells(&player), 1);
}
