//! Buffer: A grid of cells representing one frame of the terminal screen.
//!
//! Cells are stored in row-major order in a contiguous `Vec`.

use super::cell::{Cell, Style};
use crate::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`. A zero-sized
/// buffer is valid; the workbench starts at 0×0 until the first resize.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions, filled with blanks.
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::blank(); size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full area covered by the buffer.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Write `text` starting at (x, y), clipped to `max_width` columns.
    ///
    /// Text is placed grapheme by grapheme; a wide grapheme that would
    /// straddle the clip edge is dropped. Control characters are skipped.
    ///
    /// Returns the number of columns used.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_width: u16) -> u16 {
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;
        for grapheme in text.graphemes(true) {
            if grapheme.chars().any(char::is_control) {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let width = grapheme.width().min(2) as u16;
            if width == 0 {
                continue;
            }
            if col + width > limit {
                break;
            }
            self.set(col, y, Cell::from_grapheme(grapheme).with_style(style));
            if width == 2 {
                self.set(col + 1, y, Cell::wide_continuation(style));
            }
            col += width;
        }
        col - x
    }

    /// Fill a rectangular region with a cell.
    pub fn fill_rect(&mut self, rect: Rect, cell: &Cell) {
        let clipped = rect.intersection(self.area());
        for row in clipped.y..clipped.bottom() {
            for col in clipped.x..clipped.right() {
                self.set(col, row, cell.clone());
            }
        }
    }

    /// Overlay `style` onto every cell of a region, keeping the symbols.
    pub fn patch_style(&mut self, rect: Rect, style: Style) {
        let clipped = rect.intersection(self.area());
        for row in clipped.y..clipped.bottom() {
            for col in clipped.x..clipped.right() {
                if let Some(idx) = self.index_of(col, row) {
                    let cell = &mut self.cells[idx];
                    *cell = cell.clone().with_style(cell.style().patch(style));
                }
            }
        }
    }

    /// Clear the entire buffer (fill with blank cells).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    /// Resize the buffer. Content is discarded; every frame is redrawn.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// The symbols of row `y` concatenated, for assertions and debugging.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = (y as usize) * (self.width as usize);
        self.cells[start..start + self.width as usize]
            .iter()
            .map(Cell::symbol)
            .collect()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.cells().len(), 80 * 24);
    }

    #[test]
    fn test_buffer_zero_sized() {
        let buffer = Buffer::new(0, 0);
        assert!(buffer.cells().is_empty());
        assert!(buffer.get(0, 0).is_none());
        assert_eq!(buffer.row_text(0), "");
    }

    #[test]
    fn test_buffer_bounds() {
        let buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(79, 24).is_none());
    }

    #[test]
    fn test_set_string_clips() {
        let mut buffer = Buffer::new(10, 1);
        let used = buffer.set_string(2, 0, "Hello, world", Style::PLAIN, 5);
        assert_eq!(used, 5);
        assert_eq!(buffer.row_text(0), "  Hello   ");
    }

    #[test]
    fn test_set_string_wide_chars() {
        let mut buffer = Buffer::new(6, 1);
        let used = buffer.set_string(0, 0, "日本語", Style::PLAIN, 5);
        // The third glyph would straddle the clip edge.
        assert_eq!(used, 4);
        assert_eq!(buffer.get(0, 0).unwrap().symbol(), "日");
        assert!(buffer.get(1, 0).unwrap().is_wide_continuation());
        assert_eq!(buffer.get(4, 0).unwrap().symbol(), " ");
    }

    #[test]
    fn test_set_string_skips_control() {
        let mut buffer = Buffer::new(5, 1);
        buffer.set_string(0, 0, "a\tb\n", Style::PLAIN, 5);
        assert_eq!(buffer.row_text(0), "ab   ");
    }

    #[test]
    fn test_fill_and_patch() {
        let mut buffer = Buffer::new(4, 3);
        buffer.fill_rect(Rect::new(1, 1, 10, 10), &Cell::new('#'));
        assert_eq!(buffer.row_text(0), "    ");
        assert_eq!(buffer.row_text(2), " ###");

        buffer.patch_style(Rect::new(0, 2, 2, 1), Style::PLAIN.bg(Rgb::RED));
        assert_eq!(buffer.get(1, 2).unwrap().symbol(), "#");
        assert_eq!(buffer.get(1, 2).unwrap().style().bg, Some(Rgb::RED));
        assert_eq!(buffer.get(2, 2).unwrap().style().bg, None);
    }

    #[test]
    fn test_buffer_resize_clears() {
        let mut buffer = Buffer::new(8, 2);
        buffer.set(0, 0, Cell::new('X'));
        buffer.resize(8, 2);
        assert_eq!(buffer.get(0, 0).unwrap().symbol(), "X");
        buffer.resize(10, 3);
        assert_eq!(buffer.width(), 10);
        assert_eq!(buffer.get(0, 0).unwrap().symbol(), " ");
    }
}
