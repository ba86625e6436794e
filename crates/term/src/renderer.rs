//! TerminalRenderer: presents framebuffers on the real terminal.
//!
//! A frame is encoded into one byte buffer and written with a single flush.
//! After the first frame only changed runs are repainted, so the flickering
//! banner or the mute glyph costs a handful of cells, not a screen.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

const WINDOW_TITLE: &str = "blocktris";

/// A horizontal span of cells that differ between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Iterator over the changed runs of `next` relative to `prev`, row by row.
///
/// Cells outside `prev` count as changed.
pub struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    pub fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self { prev, next, x: 0, y: 0 }
    }

    fn differs(&self, x: u16, y: u16) -> bool {
        self.prev.get(x, y) != self.next.get(x, y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let (w, h) = (self.next.width(), self.next.height());
        while self.y < h {
            while self.x < w {
                if self.differs(self.x, self.y) {
                    let start = self.x;
                    while self.x < w && self.differs(self.x, self.y) {
                        self.x += 1;
                    }
                    return Some(Run {
                        x: start,
                        y: self.y,
                        len: self.x - start,
                    });
                }
                self.x += 1;
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

/// Turns framebuffer cells into terminal escape sequences.
///
/// Tracks the pen (current style) within one frame and only emits the parts
/// of a style that changed.
#[derive(Debug, Default)]
pub struct FrameEncoder {
    pen: Option<CellStyle>,
    cells_written: usize,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells printed by the last `full` or `diff` call.
    pub fn cells_written(&self) -> usize {
        self.cells_written
    }

    /// Clear the screen and repaint every row of `fb`.
    pub fn full(&mut self, fb: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
        self.begin();
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        for y in 0..fb.height() {
            self.span(fb, Run { x: 0, y, len: fb.width() }, out)?;
        }
        self.finish(out)
    }

    /// Repaint the cells of `next` that differ from `prev`; writes nothing
    /// when the frames are identical.
    pub fn diff(&mut self, prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
        self.begin();
        for run in ChangedRuns::new(prev, next) {
            self.span(next, run, out)?;
        }
        self.finish(out)
    }

    fn begin(&mut self) {
        self.pen = None;
        self.cells_written = 0;
    }

    fn span(&mut self, fb: &FrameBuffer, run: Run, out: &mut Vec<u8>) -> io::Result<()> {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let cell = fb.get(x, run.y).unwrap_or_default();
            self.pen_to(cell.style, out)?;
            out.queue(Print(cell.ch))?;
            self.cells_written += 1;
        }
        Ok(())
    }

    fn pen_to(&mut self, style: CellStyle, out: &mut Vec<u8>) -> io::Result<()> {
        let prev = self.pen.replace(style);
        if prev == Some(style) {
            return Ok(());
        }

        // SGR reset also drops both colors.
        let reset = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if reset {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if reset || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(color(style.fg)))?;
        }
        if reset || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(color(style.bg)))?;
        }
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        if self.pen.take().is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Owns the terminal while the game runs.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame on screen; `None` forces a full repaint.
    shown: Option<FrameBuffer>,
    encoder: FrameEncoder,
    buf: Vec<u8>,
    mouse_capture: bool,
    keyboard_enhanced: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            encoder: FrameEncoder::new(),
            buf: Vec::with_capacity(64 * 1024),
            mouse_capture: true,
            keyboard_enhanced: false,
        }
    }

    /// Capture mouse clicks and drags (on by default).
    pub fn with_mouse_capture(mut self, enabled: bool) -> Self {
        self.mouse_capture = enabled;
        self
    }

    /// Whether the terminal agreed to report key releases.
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        tracing::debug!(
            mouse = self.mouse_capture,
            key_releases = self.keyboard_enhanced,
            "entering terminal"
        );

        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(terminal::SetTitle(WINDOW_TITLE))?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        if self.mouse_capture {
            self.buf.queue(EnableMouseCapture)?;
        }
        if self.keyboard_enhanced {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.keyboard_enhanced {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        if self.mouse_capture {
            self.buf.queue(DisableMouseCapture)?;
        }
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next `present` (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Put `fb` on screen.
    ///
    /// The presented frame is kept for diffing and `fb` receives the previous
    /// one, so the caller reuses it as the next draw target.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.shown.as_mut() {
            Some(shown) if shown.width() == fb.width() && shown.height() == fb.height() => {
                self.encoder.diff(shown, fb, &mut self.buf)?;
            }
            _ => {
                tracing::debug!(width = fb.width(), height = fb.height(), "full repaint");
                self.encoder.full(fb, &mut self.buf)?;
            }
        }
        self.flush_buf()?;

        match self.shown.as_mut() {
            Some(shown) => std::mem::swap(shown, fb),
            None => self.shown = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
