//! Diff View Widget: paints pre-wrapped styled lines.

use super::traits::Widget;
use crate::actor::InputEvent;
use crate::buffer::{Buffer, Cell};
use crate::diff::StyledString;
use crate::layout::Rect;

/// Read-only display of styled lines, clipped to its bounds.
#[derive(Debug, Default)]
pub struct DiffView {
    lines: Vec<StyledString>,
    bounds: Rect,
    dirty: bool,
}

impl DiffView {
    /// Create an empty view.
    pub const fn new(bounds: Rect) -> Self {
        Self {
            lines: Vec::new(),
            bounds,
            dirty: true,
        }
    }

    /// Replace the displayed lines.
    pub fn set_lines(&mut self, lines: Vec<StyledString>) {
        self.lines = lines;
        self.dirty = true;
    }

    /// The displayed lines.
    pub fn lines(&self) -> &[StyledString] {
        &self.lines
    }
}

impl Widget for DiffView {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        buffer.fill_rect(self.bounds, &Cell::blank());
        let right = self.bounds.right();

        for (y, line) in (self.bounds.y..self.bounds.bottom()).zip(&self.lines) {
            let mut x = self.bounds.x;
            for segment in line.segments() {
                if x >= right {
                    break;
                }
                x += buffer.set_string(x, y, &segment.text, segment.style, right - x);
            }
        }
    }

    fn handle_input(&mut self, _event: &InputEvent) -> bool {
        false
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Rgb, Style};
    use crate::diff::StyleTag;

    #[test]
    fn test_paints_segments_with_styles() {
        let mut line = StyledString::from("keep ");
        line.push("new", StyleTag::Insertion, Style::PLAIN.fg(Rgb::GREEN));

        let mut view = DiffView::new(Rect::new(1, 1, 10, 2));
        view.set_lines(vec![line, StyledString::from("second")]);

        let mut buffer = Buffer::new(12, 4);
        view.render(&mut buffer);

        assert_eq!(buffer.row_text(1), " keep new   ");
        assert_eq!(buffer.row_text(2), " second     ");
        assert_eq!(buffer.get(6, 1).unwrap().style().fg, Some(Rgb::GREEN));
        assert_eq!(buffer.get(1, 1).unwrap().style(), Style::PLAIN);
    }

    #[test]
    fn test_clips_to_bounds() {
        let mut view = DiffView::new(Rect::new(0, 0, 4, 1));
        view.set_lines(vec![
            StyledString::from("overflowing"),
            StyledString::from("hidden"),
        ]);

        let mut buffer = Buffer::new(6, 2);
        view.render(&mut buffer);
        assert_eq!(buffer.row_text(0), "over  ");
        assert_eq!(buffer.row_text(1), "      ");
    }
}
