//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is drawn inside a one-cell border. Terminal cells map onto the
//! game's logical canvas linearly around the board (see [`GameView::to_canvas`]),
//! so the mute indicator on the top border lands inside the mute hit region.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    GamePhase, BOARD_HEIGHT, BOARD_WIDTH, CANVAS_BOARD_X, CANVAS_BOARD_Y, CANVAS_CELL, MUTE_BUTTON,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame sits in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the border.
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl BoardLayout {
    /// Top-left terminal cell of board row 0, column 0.
    pub fn inner(&self) -> (u16, u16) {
        (self.frame_x + 1, self.frame_y + 1)
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_FG: Rgb = Rgb::from_hex(0xFFFF00);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);

const RULE_TEXT: [&str; 4] = ["every 10 lines:", " level += 1", " delay -= 100ms", " (min 200ms)"];
const HELP_TEXT: [&str; 3] = ["\u{2190}\u{2192} move  \u{2191} rotate", "\u{2193} drop  space start", "m mute  q quit"];

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
        }
    }

    /// Map the center of terminal cell (`x`, `y`) to canvas coordinates.
    pub fn to_canvas(&self, viewport: Viewport, x: u16, y: u16) -> (f32, f32) {
        let (inner_x, inner_y) = self.layout(viewport).inner();
        let col = f32::from(x) - f32::from(inner_x) + 0.5;
        let row = f32::from(y) - f32::from(inner_y) + 0.5;
        (
            CANVAS_BOARD_X + col * CANVAS_CELL / f32::from(self.cell_w),
            CANVAS_BOARD_Y + row * CANVAS_CELL / f32::from(self.cell_h),
        )
    }

    /// Terminal cells on the top border that fall inside the mute hit region.
    pub fn mute_cells(&self, viewport: Viewport) -> impl Iterator<Item = (u16, u16)> + '_ {
        let layout = self.layout(viewport);
        let y = layout.frame_y;
        (layout.frame_x..layout.frame_x + layout.frame_w)
            .filter(move |&x| {
                let (cx, cy) = self.to_canvas(viewport, x, y);
                MUTE_BUTTON.contains(cx, cy)
            })
            .map(move |x| (x, y))
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(viewport);
        self.draw_board(fb, snap, layout);

        if snap.shows_current() {
            self.draw_piece(fb, layout, &snap.current);
        }

        match snap.phase {
            GamePhase::Title => self.draw_title(fb, layout),
            GamePhase::Playing => {
                self.draw_side_panel(fb, snap, viewport, layout, true);
            }
            GamePhase::GameOver => {
                self.draw_side_panel(fb, snap, viewport, layout, false);
                if snap.game_over_visible {
                    self.draw_overlay_text(fb, layout, "GAME OVER");
                }
            }
        }

        self.draw_mute_indicator(fb, viewport, snap.muted);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: BoardLayout) {
        let (inner_x, inner_y) = layout.inner();
        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(
            inner_x,
            inner_y,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            bg,
        );

        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        self.draw_border(fb, layout, border);

        for (row, cells) in snap.board.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, layout, col as u16, row as u16, *color),
                    None => self.draw_empty_cell(fb, layout, col as u16, row as u16),
                }
            }
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, layout: BoardLayout, piece: &PieceSnapshot) {
        for (row, col) in piece.to_piece().cells() {
            if (0..BOARD_WIDTH as i8).contains(&col) && (0..BOARD_HEIGHT as i8).contains(&row) {
                self.draw_block(fb, layout, col as u16, row as u16, piece.color);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: BoardLayout, style: CellStyle) {
        let BoardLayout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: BoardLayout, col: u16, row: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, layout, col, row, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: BoardLayout, col: u16, row: u16, color: Rgb) {
        let style = CellStyle::new(color, BOARD_BG).bold();
        self.fill_cell_rect(fb, layout, col, row, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (inner_x, inner_y) = layout.inner();
        let px = inner_x + col * self.cell_w;
        let py = inner_y + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_title(&self, fb: &mut FrameBuffer, layout: BoardLayout) {
        let (inner_x, inner_y) = layout.inner();
        let inner_w = layout.frame_w - 2;
        let row_y = |row: u16| inner_y + row * self.cell_h;

        let banner = CellStyle::new(PANEL_FG, BOARD_BG).bold();
        let text = CellStyle::new(WHITE, BOARD_BG).bold();
        let credits = CellStyle::new(PANEL_FG, BOARD_BG);

        fb.put_str_centered(inner_x, inner_w, row_y(2), "B L O C K T R I S", banner);

        for (i, line) in RULE_TEXT.iter().enumerate() {
            fb.put_str(inner_x + 1, row_y(5 + i as u16), line, text);
        }
        for (i, line) in HELP_TEXT.iter().enumerate() {
            fb.put_str_centered(inner_x, inner_w, row_y(11 + i as u16), line, text);
        }
        fb.put_str_centered(inner_x, inner_w, row_y(16), "press space", banner);
        fb.put_str_centered(inner_x, inner_w, row_y(19), "a terminal game", credits);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: BoardLayout,
        show_next: bool,
    ) {
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(PANEL_FG, BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x + 7, y, snap.lines, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x + 7, y, snap.level, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x + 7, y, snap.drop_delay_ms, value);
        fb.put_str(panel_x + 10, y, "ms", value);
        y = y.saturating_add(2);

        if !show_next {
            return;
        }
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);

        let piece = snap.next.to_piece();
        let style = CellStyle::new(snap.next.color, BLACK).bold();
        for row in 0..4u16 {
            for col in 0..4u16 {
                if piece.cell_at(row as usize, col as usize) {
                    fb.fill_rect(
                        panel_x + col * self.cell_w,
                        y + row * self.cell_h,
                        self.cell_w,
                        self.cell_h,
                        '█',
                        style,
                    );
                }
            }
        }
    }

    fn draw_mute_indicator(&self, fb: &mut FrameBuffer, viewport: Viewport, muted: bool) {
        let style = if muted {
            CellStyle::new(Rgb::new(220, 80, 80), BLACK).bold()
        } else {
            CellStyle::new(PANEL_FG, BLACK).bold()
        };
        let ch = if muted { '×' } else { '♪' };
        for (x, y) in self.mute_cells(viewport) {
            fb.put_char(x, y, ch, style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: BoardLayout, text: &str) {
        let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2);
        let style = CellStyle::new(WHITE, BLACK).bold();
        fb.put_str_centered(layout.frame_x, layout.frame_w, mid_y, text, style);
    }
}
