/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// The simulated viewport is rasterized into "subpixels" of 8×8 level
/// units each, and every terminal cell shows two of them stacked via the
/// upper-half-block glyph (foreground = upper sample, background = lower).
///
/// Frame output works like this:
///   1. Run the draw pass into the sample grid, downscaling rectangles
///   2. Build the next frame into the `front` cell buffer
///   3. Compare each cell with `back` (the previous frame)
///   4. Only emit terminal commands for cells that changed
///   5. All commands are batched with `queue!`, flushed once, buffers swap
///
/// This eliminates flicker caused by full-screen redraws.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::color::Color;
use crate::domain::geom::Rect;
use crate::sim::draw::{self, Surface};
use crate::sim::world::World;

/// Level-space units covered by one sample, both axes.
const PX_PER_SAMPLE: f32 = 8.0;

/// Half-block glyph: paints the upper sample with fg, lower with bg.
const HALF_BLOCK: char = '▀';

// Vertical layout
const HUD_ROW: usize = 0;
const VIEW_ROW: usize = 1;

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: TermColor,
    bg: TermColor,
}

impl Cell {
    /// Explicit dark background for every cell outside the playfield, and
    /// for `Clear`, so inter-row gap pixels match the cell color exactly.
    const BASE_BG: TermColor = TermColor::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: TermColor::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel used to invalidate the back buffer: different from any
    /// real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: TermColor::Magenta,
        bg: TermColor::Magenta,
    };

    fn from_char(ch: char, fg: TermColor, bg: TermColor) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y); each char occupies one column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: TermColor, bg: TermColor) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::from_char(ch, fg, bg));
            cx += 1;
        }
    }
}

// ── PixelSurface: rasterization target for the draw pass ──

/// A coarse grid of color samples covering the viewport, one sample per
/// half-block subpixel. Rectangle edges are rounded to the nearest sample
/// boundary; rects are clipped to the grid, so off-screen geometry
/// (anything the camera scrolled past) simply vanishes.
struct PixelSurface {
    w: usize,
    h: usize,
    samples: Vec<Color>,
}

impl PixelSurface {
    fn new(view_w: f32, view_h: f32) -> Self {
        let w = (view_w / PX_PER_SAMPLE).round() as usize;
        let h = (view_h / PX_PER_SAMPLE).round() as usize;
        PixelSurface {
            w,
            h,
            samples: vec![Color::SKY_BLUE; w * h],
        }
    }

    fn get(&self, x: usize, y: usize) -> Color {
        self.samples[y * self.w + x]
    }
}

impl Surface for PixelSurface {
    fn clear(&mut self, color: Color) {
        self.samples.fill(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = (rect.x / PX_PER_SAMPLE).round() as i32;
        let x1 = (rect.right() / PX_PER_SAMPLE).round() as i32;
        let y0 = (rect.y / PX_PER_SAMPLE).round() as i32;
        let y1 = (rect.bottom() / PX_PER_SAMPLE).round() as i32;

        for y in y0.max(0)..y1.min(self.h as i32) {
            for x in x0.max(0)..x1.min(self.w as i32) {
                self.samples[y as usize * self.w + x as usize] = color;
            }
        }
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    surface: PixelSurface,
}

impl Renderer {
    pub fn new(view_w: f32, view_h: f32) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            surface: PixelSurface::new(view_w, view_h),
        }
    }

    /// Terminal rows the playfield needs (two samples per row).
    fn view_rows(&self) -> usize {
        (self.surface.h + 1) / 2
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &World) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            // Force full repaint after resize.
            self.back.cells.fill(Cell::INVALID);
            queue!(
                self.writer,
                SetBackgroundColor(Cell::BASE_BG),
                Clear(ClearType::All)
            )?;
        }

        self.front.clear();

        let rows_needed = VIEW_ROW + self.view_rows() + 1;
        if self.term_w < self.surface.w || self.term_h < rows_needed {
            self.compose_too_small(rows_needed);
        } else {
            self.compose_game(world);
        }

        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, world: &World) {
        let bar_bg = TermColor::Rgb { r: 20, g: 20, b: 60 };

        for x in 0..self.front.width {
            self.front
                .set(x, HUD_ROW, Cell::from_char(' ', TermColor::White, bar_bg));
        }
        let hud = format!(
            " Sparky   x:{:>4.0}   t:{} ",
            world.player.rect.x, world.tick
        );
        self.front.put_str(0, HUD_ROW, &hud, TermColor::White, bar_bg);

        // Playfield: downscale the world, then pair samples into cells.
        draw::draw(world, &mut self.surface);

        for row in 0..self.view_rows() {
            let upper_y = row * 2;
            let lower_y = upper_y + 1;
            for x in 0..self.surface.w {
                let upper = self.surface.get(x, upper_y);
                let lower = if lower_y < self.surface.h {
                    self.surface.get(x, lower_y)
                } else {
                    world.background
                };
                self.front.set(
                    x,
                    VIEW_ROW + row,
                    Cell::from_char(HALF_BLOCK, term_color(upper), term_color(lower)),
                );
            }
        }

        let help_row = VIEW_ROW + self.view_rows();
        self.front.put_str(
            0,
            help_row,
            " A/D or ←/→ move   Space jump   Q quit",
            TermColor::DarkGrey,
            Cell::BASE_BG,
        );
    }

    fn compose_too_small(&mut self, rows_needed: usize) {
        let msg = format!(
            "Terminal too small: need {}×{}, have {}×{}",
            self.surface.w, rows_needed, self.term_w, self.term_h
        );
        let x = (self.term_w.saturating_sub(msg.chars().count())) / 2;
        let y = self.term_h / 2;
        self.front
            .put_str(x, y, &msg, TermColor::White, Cell::BASE_BG);
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = TermColor::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Set explicit base colors at the start of the frame. Not
        // ResetColor: that restores the terminal's native default, which
        // may differ from BASE_BG and cause line artifacts.
        queue!(
            self.writer,
            SetForegroundColor(TermColor::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_covers_the_viewport_at_sample_scale() {
        let s = PixelSurface::new(800.0, 450.0);
        assert_eq!((s.w, s.h), (100, 56));
    }

    #[test]
    fn fill_rect_rounds_to_sample_edges() {
        let mut s = PixelSurface::new(800.0, 450.0);
        s.clear(Color::SKY_BLUE);
        s.fill_rect(Rect::new(0.0, 370.0, 800.0, 80.0), Color::BROWN);

        assert_eq!(s.get(0, 45), Color::SKY_BLUE);
        assert_eq!(s.get(0, 46), Color::BROWN);
        assert_eq!(s.get(99, 55), Color::BROWN);
    }

    #[test]
    fn fill_rect_clips_offscreen_geometry() {
        let mut s = PixelSurface::new(800.0, 450.0);
        s.clear(Color::SKY_BLUE);
        // straddles the top-left corner
        s.fill_rect(Rect::new(-16.0, -16.0, 32.0, 32.0), Color::RED);

        assert_eq!(s.get(0, 0), Color::RED);
        assert_eq!(s.get(1, 1), Color::RED);
        assert_eq!(s.get(2, 2), Color::SKY_BLUE);

        // entirely past the right edge: nothing painted
        s.fill_rect(Rect::new(900.0, 0.0, 40.0, 40.0), Color::GREEN);
        assert_eq!(s.get(99, 0), Color::SKY_BLUE);
    }
}
