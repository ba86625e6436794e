//! Terminal runner (default binary).
//!
//! One frame per loop iteration: drain terminal events into the intent set,
//! advance the frame clock, tick the session with the raw delta, feed audio
//! commands to the cue player and redraw when the snapshot changed.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, MouseButton, MouseEvent, MouseEventKind};

use blocktris::audio::{AudioBackend, BellBackend, CuePlayer, SilentBackend};
use blocktris::config::{Args, Settings};
use blocktris::core::{FrameClock, GameSession, GameSnapshot, IntentSet};
use blocktris::input::{Gesture, GestureTracker, InputHandler, KeyInput};
use blocktris::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use blocktris::types::MUTE_BUTTON;

/// Target frame length.
const FRAME_MS: u64 = 16;
/// Redraw an unchanged frame at most this often.
const IDLE_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let settings = Settings::from_args(Args::parse())?;
    init_logging(&settings)?;
    tracing::info!(seed = settings.seed, mouse = settings.mouse, "starting");

    let mut term = TerminalRenderer::new().with_mouse_capture(settings.mouse);
    term.enter()?;

    let result = if settings.bell {
        run(&mut term, &settings, BellBackend::new(io::stdout()))
    } else {
        run(&mut term, &settings, SilentBackend)
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "exited with error");
    }
    result
}

/// Log to a file, never to the terminal the game is drawing on.
fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(settings.log_level)
        .init();
    Ok(())
}

struct Pointer {
    gestures: GestureTracker,
    started: Instant,
}

impl Pointer {
    fn handle(
        &mut self,
        mouse: MouseEvent,
        view: &GameView,
        viewport: Viewport,
        session: &mut GameSession,
    ) {
        let (x, y) = view.to_canvas(viewport, mouse.column, mouse.row);
        let now_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match mouse.kind {
            // The mute button reacts to clicks only, so it never sees a tap as well.
            MouseEventKind::Down(MouseButton::Left) if MUTE_BUTTON.contains(x, y) => {
                session.click(x, y);
            }
            MouseEventKind::Down(MouseButton::Left) => self.gestures.press(x, y, now_ms),
            MouseEventKind::Drag(MouseButton::Left) => {
                for gesture in self.gestures.drag(x, y) {
                    apply_gesture(gesture, session);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(gesture) = self.gestures.release(x, y, now_ms) {
                    apply_gesture(gesture, session);
                }
            }
            _ => {}
        }
    }
}

fn apply_gesture(gesture: Gesture, session: &mut GameSession) {
    match gesture {
        Gesture::Nudge(intent) => {
            session.nudge(intent);
        }
        Gesture::Tap { x, y } => session.tap(x, y),
    }
}

fn run<B: AudioBackend>(term: &mut TerminalRenderer, settings: &Settings, backend: B) -> Result<()> {
    let mut session = GameSession::new(settings.seed);
    if let Some(first) = settings.first {
        session.set_current(first);
    }
    if settings.muted {
        session.toggle_mute();
    }

    let mut audio = CuePlayer::new(backend);
    let view = GameView::default();
    let mut input = InputHandler::new().with_key_release_timeout_ms(settings.key_release_timeout_ms);
    let mut intents = IntentSet::new();
    let mut pointer = Pointer {
        gestures: GestureTracker::new(),
        started: Instant::now(),
    };

    let mut clock = FrameClock::new();
    let mut throttle = RenderThrottle::new(IDLE_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let started = Instant::now();
    let frame = Duration::from_millis(FRAME_MS);

    loop {
        let frame_start = Instant::now();
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        // Input until the frame budget runs out.
        while event::poll(frame.saturating_sub(frame_start.elapsed()))? {
            match event::read()? {
                Event::Key(key) => match input.handle_key_event(key, Instant::now(), &mut intents) {
                    Some(KeyInput::Quit) => {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                    Some(KeyInput::ToggleMute) => session.toggle_mute(),
                    Some(KeyInput::Intent(_)) | None => {}
                },
                Event::Mouse(mouse) => pointer.handle(mouse, &view, viewport, &mut session),
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                Event::FocusLost => input.reset(&mut intents),
                _ => {}
            }
        }

        input.update(Instant::now(), &mut intents);

        let delta = clock.advance(started.elapsed());
        session.tick(delta.raw_ms, &mut intents);

        audio.advance(delta.raw_ms);
        for command in session.drain_audio() {
            audio.handle(command);
        }

        throttle.advance(delta.capped_ms);
        session.snapshot_into(&mut snap);
        if throttle.should_render(snap.fingerprint()) {
            view.render_into(&snap, viewport, &mut fb);
            term.present(&mut fb)?;
        }
    }
}
