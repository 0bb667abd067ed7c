//! Screen: double-buffered presentation of frames as minimal ANSI output.
//!
//! 1. Compare the frame on the terminal with the next frame
//! 2. Emit cursor moves and text only for cells that changed
//! 3. Skip cursor moves when the pen is already in place
//! 4. Track the active style to avoid redundant SGR sequences
//!
//! The first frame, and the first frame after a resize, is drawn in full.

use super::OutputBuffer;
use crate::buffer::{Buffer, Cell, Style};

/// What the terminal's pen looks like after the last emitted byte.
#[derive(Debug, Clone, Copy)]
struct Pen {
    x: u16,
    y: u16,
    /// `None` when the active attributes are unknown.
    style: Option<Style>,
}

impl Pen {
    const UNKNOWN: Self = Self {
        x: u16::MAX,
        y: u16::MAX,
        style: None,
    };

    fn move_to(&mut self, x: u16, y: u16, out: &mut OutputBuffer, stats: &mut PresentStats) {
        if self.x != x || self.y != y {
            out.cursor_move(x, y);
            self.x = x;
            self.y = y;
            stats.cursor_moves += 1;
        }
    }

    fn paint(&mut self, cell: &Cell, out: &mut OutputBuffer, stats: &mut PresentStats) {
        if self.style != Some(cell.style()) {
            out.set_style(cell.style());
            self.style = Some(cell.style());
            stats.style_changes += 1;
        }
        if cell.symbol().is_empty() {
            out.write_str(" ");
        } else {
            out.write_str(cell.symbol());
        }
        #[allow(clippy::cast_possible_truncation)]
        let advance = cell.display_width().clamp(1, 2) as u16;
        self.x = self.x.saturating_add(advance);
    }
}

/// Statistics about one presented frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentStats {
    /// Whether the frame was drawn in full.
    pub full_redraw: bool,
    /// Number of cells written.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of SGR sequences emitted.
    pub style_changes: usize,
}

/// Owns the frame currently shown on the terminal.
#[derive(Debug)]
pub struct Screen {
    current: Buffer,
    pen: Pen,
    needs_full: bool,
}

impl Screen {
    /// Create a screen of the given size. The first frame is drawn in full.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            current: Buffer::new(width, height),
            pen: Pen::UNKNOWN,
            needs_full: true,
        }
    }

    /// Width of the presented frame.
    pub const fn width(&self) -> u16 {
        self.current.width()
    }

    /// Height of the presented frame.
    pub const fn height(&self) -> u16 {
        self.current.height()
    }

    /// Adopt a new terminal size; the next frame is drawn in full.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.current.resize(width, height);
        self.invalidate();
    }

    /// Forget what the terminal shows; the next frame is drawn in full.
    pub fn invalidate(&mut self) {
        self.pen = Pen::UNKNOWN;
        self.needs_full = true;
    }

    /// Write the ANSI needed to turn the terminal into `next` to `out`.
    ///
    /// With `cursor`, the terminal cursor is shown at that position;
    /// otherwise it stays hidden. A frame of a different size than the
    /// current one is drawn in full.
    pub fn present(
        &mut self,
        next: &Buffer,
        cursor: Option<(u16, u16)>,
        out: &mut OutputBuffer,
    ) -> PresentStats {
        if next.width() != self.current.width() || next.height() != self.current.height() {
            self.resize(next.width(), next.height());
        }

        out.cursor_hide();
        let stats = if self.needs_full {
            render_full(next, out, &mut self.pen)
        } else {
            render_diff(&self.current, next, out, &mut self.pen)
        };

        if self.pen.style != Some(Style::PLAIN) {
            out.reset_attrs();
            self.pen.style = Some(Style::PLAIN);
        }
        if let Some((x, y)) = cursor {
            if x < next.width() && y < next.height() {
                out.cursor_move(x, y);
                self.pen.x = x;
                self.pen.y = y;
                out.cursor_show();
            }
        }

        self.current.clone_from(next);
        self.needs_full = false;
        stats
    }
}

/// Clear the screen and draw every cell of `buffer`.
fn render_full(buffer: &Buffer, out: &mut OutputBuffer, pen: &mut Pen) -> PresentStats {
    let mut stats = PresentStats {
        full_redraw: true,
        ..PresentStats::default()
    };

    out.reset_attrs();
    out.clear_screen();
    pen.style = Some(Style::PLAIN);

    for (y, row) in (0..buffer.height()).zip(buffer.rows()) {
        out.cursor_move(0, y);
        pen.x = 0;
        pen.y = y;
        stats.cursor_moves += 1;

        for cell in row {
            if cell.is_wide_continuation() {
                continue;
            }
            pen.paint(cell, out, &mut stats);
            stats.cells_changed += 1;
        }
    }

    stats
}

/// Emit only the cells of `next` that differ from `current`.
fn render_diff(
    current: &Buffer,
    next: &Buffer,
    out: &mut OutputBuffer,
    pen: &mut Pen,
) -> PresentStats {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut stats = PresentStats::default();
    let width = next.width();

    for (y, (old_row, new_row)) in (0..next.height()).zip(current.rows().zip(next.rows())) {
        for (x, (old, new)) in (0..width).zip(old_row.iter().zip(new_row)) {
            // Continuations are drawn by the wide cell to their left.
            if old == new || new.is_wide_continuation() {
                continue;
            }
            pen.move_to(x, y, out, &mut stats);
            pen.paint(new, out, &mut stats);
            stats.cells_changed += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    fn emulate(bytes: &[u8], width: u16, height: u16) -> vt100::Parser {
        let mut parser = vt100::Parser::new(height, width, 0);
        parser.process(bytes);
        parser
    }

    fn row(parser: &vt100::Parser, row: u16) -> String {
        let (_, cols) = parser.screen().size();
        let text: String = (0..cols)
            .map(|col| {
                let contents = parser
                    .screen()
                    .cell(row, col)
                    .map(vt100::Cell::contents)
                    .unwrap_or_default();
                if contents.is_empty() {
                    " ".to_string()
                } else {
                    contents
                }
            })
            .collect();
        text.trim_end().to_string()
    }

    #[test]
    fn test_first_frame_is_full() {
        let mut screen = Screen::new(10, 3);
        let mut next = Buffer::new(10, 3);
        next.set_string(0, 0, "hello", Style::PLAIN, 10);
        next.set_string(2, 2, "there", Style::PLAIN.fg(Rgb::GREEN), 8);

        let mut out = OutputBuffer::new();
        let stats = screen.present(&next, None, &mut out);
        assert!(stats.full_redraw);
        assert_eq!(stats.cells_changed, 30);

        let parser = emulate(out.as_bytes(), 10, 3);
        assert_eq!(row(&parser, 0), "hello");
        assert_eq!(row(&parser, 1), "");
        assert_eq!(row(&parser, 2), "  there");
        let vt = parser.screen();
        let cell = vt.cell(2, 2).unwrap();
        assert_eq!(cell.contents(), "t");
        assert_eq!(cell.fgcolor(), vt100::Color::Rgb(0, 255, 0));
        assert!(vt.hide_cursor());
    }

    #[test]
    fn test_identical_frame_emits_no_cells() {
        let mut screen = Screen::new(8, 2);
        let frame = Buffer::new(8, 2);
        let mut out = OutputBuffer::new();
        screen.present(&frame, None, &mut out);

        out.clear();
        let stats = screen.present(&frame, None, &mut out);
        assert!(!stats.full_redraw);
        assert_eq!(stats.cells_changed, 0);
        assert_eq!(stats.cursor_moves, 0);
        assert_eq!(out.as_bytes(), b"\x1b[?25l");
    }

    #[test]
    fn test_diff_updates_only_changes() {
        let mut screen = Screen::new(12, 2);
        let mut first = Buffer::new(12, 2);
        first.set_string(0, 0, "abcdef", Style::PLAIN, 12);

        let mut all = Vec::new();
        let mut out = OutputBuffer::new();
        screen.present(&first, None, &mut out);
        all.extend_from_slice(out.as_bytes());

        let mut second = first.clone();
        second.set_string(2, 0, "XY", Style::PLAIN.fg(Rgb::RED), 2);
        out.clear();
        let stats = screen.present(&second, None, &mut out);
        all.extend_from_slice(out.as_bytes());

        assert_eq!(stats.cells_changed, 2);
        assert_eq!(stats.cursor_moves, 1);
        assert_eq!(stats.style_changes, 1);

        let parser = emulate(&all, 12, 2);
        assert_eq!(row(&parser, 0), "abXYef");
        assert_eq!(
            parser.screen().cell(0, 3).unwrap().fgcolor(),
            vt100::Color::Rgb(255, 0, 0)
        );
        assert_eq!(
            parser.screen().cell(0, 4).unwrap().fgcolor(),
            vt100::Color::Default
        );
    }

    #[test]
    fn test_cursor_is_placed_and_shown() {
        let mut screen = Screen::new(10, 4);
        let frame = Buffer::new(10, 4);
        let mut out = OutputBuffer::new();
        screen.present(&frame, Some((3, 2)), &mut out);

        let parser = emulate(out.as_bytes(), 10, 4);
        assert_eq!(parser.screen().cursor_position(), (2, 3));
        assert!(!parser.screen().hide_cursor());
    }

    #[test]
    fn test_wide_characters() {
        let mut screen = Screen::new(6, 1);
        let mut frame = Buffer::new(6, 1);
        frame.set_string(0, 0, "日本x", Style::PLAIN, 6);

        let mut out = OutputBuffer::new();
        screen.present(&frame, None, &mut out);
        let parser = emulate(out.as_bytes(), 6, 1);
        let cell = |col| parser.screen().cell(0, col).map(vt100::Cell::contents);
        assert_eq!(cell(0).as_deref(), Some("日"));
        assert_eq!(cell(2).as_deref(), Some("本"));
        assert_eq!(cell(4).as_deref(), Some("x"));
    }

    #[test]
    fn test_size_change_forces_full_redraw() {
        let mut screen = Screen::new(4, 1);
        let mut out = OutputBuffer::new();
        screen.present(&Buffer::new(4, 1), None, &mut out);

        let stats = screen.present(&Buffer::new(6, 2), None, &mut out);
        assert!(stats.full_redraw);
        assert_eq!((screen.width(), screen.height()), (6, 2));
    }
}
