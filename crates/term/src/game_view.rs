//! GameView: maps the engine controller into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Board, GameSession};
use crate::engine::{Controller, HighScoresView, ScorePrompt};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Color;

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

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Screen rectangle of the board frame (border included)
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal renderer for one game.
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

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, controller: &Controller, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let session = controller.session();
        let frame = self.frame_for(session.board(), viewport);

        self.draw_playfield(fb, frame, session);
        self.draw_side_panel(fb, frame, viewport, controller);

        if controller.scores().is_visible() {
            self.draw_high_scores(fb, frame, controller.scores());
        } else if session.is_over() {
            self.draw_game_over(fb, frame, controller.prompt());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, controller: &Controller, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(controller, viewport, &mut fb);
        fb
    }

    fn frame_for(&self, board: &Board, viewport: Viewport) -> Frame {
        let w = board.columns().saturating_mul(self.cell_w).saturating_add(2);
        let h = board.rows().saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_playfield(&self, fb: &mut FrameBuffer, frame: Frame, session: &GameSession) {
        let board = session.board();
        let border = CellStyle::fg_bg(Rgb::new(200, 200, 200), PANEL_BG);
        let grid = CellStyle::fg_bg(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();

        self.draw_border(fb, frame, border);

        for y in 0..board.rows() {
            for x in 0..board.columns() {
                match board.cell(x as i32, y as i32).flatten() {
                    Some(color) => self.draw_block(fb, frame, x, y, color),
                    None => self.fill_cell_rect(fb, frame, x, y, '·', grid),
                }
            }
        }

        // Sub-cells above the top edge are not drawn.
        if let Some(active) = session.active() {
            for (x, y) in active.cells() {
                if x >= 0 && y >= 0 && x < board.columns() as i32 && y < board.rows() as i32 {
                    self.draw_block(fb, frame, x as u16, y as u16, active.color);
                }
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

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

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: Color) {
        let style = CellStyle::fg_bg(Rgb::from(color), PLAYFIELD_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        viewport: Viewport,
        controller: &Controller,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::fg_bg(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::fg_bg(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();
        let session = controller.session();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, session.score(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, session.lines(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        match controller.scores().entries().first() {
            Some(best) => {
                let x = fb.put_str(panel_x, y, &best.initials, value);
                fb.put_u32(x.saturating_add(1), y, best.score, value);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
        y = y.saturating_add(2);

        if !controller.leaderboard_enabled() {
            fb.put_str(panel_x, y, "LEADERBOARD OFF", hint);
        } else if controller.scores().is_loading() {
            fb.put_str(panel_x, y, "loading...", hint);
        } else if controller.scores().last_error().is_some() {
            fb.put_str(panel_x, y, "offline", hint);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TAB scores", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "Q quit", hint);
    }

    fn draw_high_scores(&self, fb: &mut FrameBuffer, frame: Frame, scores: &HighScoresView) {
        let style = CellStyle::fg_bg(Rgb::new(255, 255, 255), PANEL_BG);
        let top = frame.y.saturating_add(2);
        let left = frame.x.saturating_add(2);
        let width = frame.w.saturating_sub(4);
        let rows = frame.h.saturating_sub(4);
        fb.fill_rect(left, top, width, rows, ' ', style);

        fb.put_str(left + 1, top, "HIGH SCORES", style.bold());
        if scores.entries().is_empty() {
            let text = if scores.is_loading() { "loading..." } else { "no scores yet" };
            fb.put_str(left + 1, top + 2, text, style.dim());
            return;
        }

        for (i, entry) in scores.entries().iter().enumerate() {
            let y = top + 2 + i as u16;
            if y >= top + rows {
                break;
            }
            let x = fb.put_u32(left + 1, y, i as u32 + 1, style.dim());
            let x = fb.put_str(x, y, ". ", style.dim());
            let x = fb.put_str(x, y, &entry.initials, style.bold());
            fb.put_u32(x + 1, y, entry.score, style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, frame: Frame, prompt: Option<&ScorePrompt>) {
        let style = CellStyle::fg_bg(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);
        self.put_centered(fb, frame, mid_y.saturating_sub(2), "GAME OVER", style);

        match prompt {
            Some(prompt) => {
                let mut line = String::from("INITIALS: ");
                line.push_str(prompt.buffer());
                if !prompt.is_submitting() {
                    line.push('_');
                }
                self.put_centered(fb, frame, mid_y, &line, style);
                if let Some(notice) = prompt.notice() {
                    self.put_centered(fb, frame, mid_y + 1, notice, style.dim());
                }
                self.put_centered(fb, frame, mid_y + 3, "ENTER send  ESC skip", style.dim());
            }
            None => {
                self.put_centered(fb, frame, mid_y, "N: new game", style.dim());
            }
        }
    }

    fn put_centered(&self, fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameConfig;

    fn controller() -> Controller {
        Controller::new(GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        })
        .with_leaderboard(false)
    }

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_frame_tracks_board_size() {
        let view = GameView::default();
        let board = Board::new(12, 6);
        let frame = view.frame_for(&board, Viewport::new(14, 14));
        assert_eq!((frame.x, frame.y, frame.w, frame.h), (0, 0, 14, 14));
    }

    #[test]
    fn test_active_piece_is_drawn_in_its_color() {
        let mut c = controller();
        c.start();
        let active = c.session().active().unwrap().clone();
        let (x, y) = active.cells().next().unwrap();

        let fb = GameView::default().render(&c, Viewport::new(22, 22));
        let cell = fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::from(active.color));
    }

    #[test]
    fn test_panel_shows_leaderboard_off() {
        let c = controller();
        let fb = GameView::default().render(&c, Viewport::new(60, 22));
        let text = screen(&fb);
        assert!(text.contains("SCORE"));
        assert!(text.contains("LINES"));
        assert!(text.contains("LEADERBOARD OFF"));
    }
}
