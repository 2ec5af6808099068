//! GameView: maps a game snapshot into a terminal framebuffer.
//!
//! Pure (no I/O), so every screen can be unit-tested.

use gridfall_core::GameSnapshot;
use gridfall_store::ScoreRecord;
use gridfall_types::{Phase, Rgb};

use crate::fb::{Cell, CellStyle, FrameBuffer};

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

/// Renders the field, side panel, and the start/pause/game-over screens.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// The allocation-free hot path; callers reuse the framebuffer across
    /// frames and it resizes only when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        scores: &ScoreRecord,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        if snap.phase == Phase::Start {
            self.draw_start_screen(fb, scores, viewport);
            return;
        }

        let field_w = (snap.width as u16) * self.cell_w;
        let field_h = (snap.height as u16) * self.cell_h;
        let frame_w = field_w + 2;
        let frame_h = field_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: FIELD_BG,
            bold: false,
            dim: true,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };

        fb.fill_rect(start_x + 1, start_y + 1, field_w, field_h, '·', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                if let Some(color) = snap.cells[(y * snap.width + x) as usize] {
                    self.fill_grid_cell(fb, start_x, start_y, x as u16, y as u16, color);
                }
            }
        }

        // Active piece. Cells above the top row are simply not drawn.
        for &(x, y) in &snap.active.cells {
            if x >= 0 && x < snap.width && y >= 0 && y < snap.height {
                self.fill_grid_cell(fb, start_x, start_y, x as u16, y as u16, snap.active.color);
            }
        }

        self.draw_side_panel(fb, snap, scores, viewport, start_x, start_y, frame_w);

        match snap.phase {
            Phase::Paused => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]);
            }
            Phase::GameOver => {
                let score_line = format!("score {}", snap.score);
                self.draw_overlay(
                    fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    &["GAME OVER", &score_line, "", "press R to restart"],
                );
            }
            _ => {}
        }
    }

    fn draw_start_screen(&self, fb: &mut FrameBuffer, scores: &ScoreRecord, viewport: Viewport) {
        let title = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let text = CellStyle::default();
        let dim = CellStyle {
            dim: true,
            ..CellStyle::default()
        };

        let lines: [(&str, CellStyle); 9] = [
            ("G R I D F A L L", title),
            ("", text),
            ("← →   move", text),
            ("↑     rotate", text),
            ("↓     soft drop", text),
            ("SPACE pause", text),
            ("Q     quit", text),
            ("", text),
            ("Press ENTER to start", title),
        ];

        let mut y = viewport.height.saturating_sub(lines.len() as u16 + 2) / 2;
        for (line, style) in lines {
            let w = line.chars().count() as u16;
            let x = viewport.width.saturating_sub(w) / 2;
            fb.put_str(x, y, line, style);
            y = y.saturating_add(1);
        }

        if scores.best_score > 0 {
            y = y.saturating_add(1);
            let x = viewport.width.saturating_sub(10) / 2;
            fb.put_str(x, y, "BEST ", dim);
            fb.put_u32(x + 5, y, scores.best_score, dim);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn fill_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        color: Rgb,
    ) {
        let style = CellStyle {
            fg: color,
            bg: FIELD_BG,
            bold: true,
            dim: false,
        };
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        scores: &ScoreRecord,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        let dim = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for preview in &snap.preview {
            if y.saturating_add(preview.shape.height() as u16) >= viewport.height {
                break;
            }
            let style = CellStyle {
                fg: preview.color,
                ..CellStyle::default()
            };
            for (sx, sy) in preview.shape.filled() {
                let px = panel_x + (sx as u16) * 2;
                fb.put_str(px, y + sy as u16, "██", style);
            }
            y = y.saturating_add(preview.shape.height() as u16 + 1);
        }

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, scores.best_score.max(snap.score), value);
        y = y.saturating_add(2);

        if !scores.last_scores.is_empty() {
            fb.put_str(panel_x, y, "LAST", label);
            y = y.saturating_add(1);
            for entry in scores.last_scores.iter().rev() {
                if y >= viewport.height {
                    break;
                }
                fb.put_u32(panel_x, y, entry.score, value);
                if panel_w >= 24 {
                    fb.put_str(panel_x + 7, y, &entry.date, dim);
                }
                y = y.saturating_add(1);
            }
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..CellStyle::default()
        };
        let mut y = start_y
            .saturating_add(frame_h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for line in lines {
            let text_w = line.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, y, line, style);
            y = y.saturating_add(1);
        }
    }
}
