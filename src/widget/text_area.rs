//! Text Area Widget: multi-line editor used for every workbench pane.
//!
//! Content is kept as a list of lines without their terminators; the cursor
//! is a `(row, byte offset)` pair that always sits on a grapheme boundary.
//! The view scrolls vertically and horizontally to keep the cursor visible.
//!
//! ```text
//! ╭──────────────────╮   rounded border when focused,
//! │  1 first line    │   blank border when blurred
//! │  2 second▌       │   line-number gutter, cursor line highlight
//! ╰──────────────────╯
//! ```

use super::traits::Widget;
use crate::actor::{InputEvent, KeyCode};
use crate::buffer::{Buffer, Cell, Rgb, Style};
use crate::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Spaces a pasted tab expands to.
const TAB_WIDTH: usize = 4;

/// Colors of the text area in its focused and blurred states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAreaStyle {
    /// Regular text.
    pub text: Style,
    /// Placeholder while blurred.
    pub placeholder: Style,
    /// Placeholder while focused.
    pub focused_placeholder: Style,
    /// Overlay on the cursor's line while focused.
    pub cursor_line: Style,
    /// Line-number gutter.
    pub line_number: Style,
    /// Border drawn while focused.
    pub border: Style,
}

impl Default for TextAreaStyle {
    fn default() -> Self {
        Self {
            text: Style::PLAIN,
            placeholder: Style::PLAIN.fg(Rgb::from_u32(0x44_44_44)),
            focused_placeholder: Style::PLAIN.fg(Rgb::from_u32(0x87_5f_ff)),
            cursor_line: Style::PLAIN
                .fg(Rgb::from_u32(0xff_ff_d7))
                .bg(Rgb::from_u32(0x5f_00_ff)),
            line_number: Style::PLAIN.fg(Rgb::from_u32(0x58_58_58)),
            border: Style::PLAIN.fg(Rgb::from_u32(0x44_44_44)),
        }
    }
}

/// Behaviour switches for a text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaConfig {
    /// Shown dimmed while the area is empty.
    pub placeholder: String,
    /// Whether to draw the line-number gutter.
    pub line_numbers: bool,
    /// Whether edits are ignored (navigation still works).
    pub read_only: bool,
    /// Colors.
    pub style: TextAreaStyle,
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self {
            placeholder: String::from("Type something"),
            line_numbers: true,
            read_only: false,
            style: TextAreaStyle::default(),
        }
    }
}

/// A bordered multi-line text editor.
#[derive(Debug)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    /// Byte offset into `lines[row]`.
    col: usize,
    /// Display column Up/Down try to return to.
    goal: Option<usize>,
    scroll_row: usize,
    scroll_col: usize,
    bounds: Rect,
    focused: bool,
    config: TextAreaConfig,
    dirty: bool,
}

impl TextArea {
    /// Create an empty, blurred text area with the default configuration.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, TextAreaConfig::default())
    }

    /// Create an empty, blurred text area.
    pub fn with_config(bounds: Rect, config: TextAreaConfig) -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            goal: None,
            scroll_row: 0,
            scroll_col: 0,
            bounds,
            focused: false,
            config,
            dirty: true,
        }
    }

    /// The full text, lines joined with `"\n"`.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the text and move the cursor to its end.
    pub fn set_content(&mut self, content: &str) {
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
        self.scroll_row = 0;
        self.scroll_col = 0;
        self.insert_text(content);
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.set_content("");
    }

    /// Whether there is no text.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Number of lines (at least one).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Cursor as `(row, column)`, the column counted in characters.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.lines[self.row][..self.col].chars().count())
    }

    /// Give the area focus.
    pub fn focus(&mut self) {
        self.focused = true;
        self.dirty = true;
    }

    /// Take focus away.
    pub fn blur(&mut self) {
        self.focused = false;
        self.dirty = true;
    }

    /// Check if focused.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether edits are ignored.
    pub const fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    /// Screen position of the cursor, when focused and inside the view.
    pub fn screen_cursor(&self) -> Option<(u16, u16)> {
        if !self.focused {
            return None;
        }
        let view = self.text_rect();
        if view.is_empty() {
            return None;
        }
        let dy = self.row.checked_sub(self.scroll_row)?;
        let dx = self.cursor_column().checked_sub(self.scroll_col)?;
        let x = view.x.checked_add(u16::try_from(dx).ok()?)?;
        let y = view.y.checked_add(u16::try_from(dy).ok()?)?;
        view.contains(x, y).then_some((x, y))
    }

    // Geometry

    fn inner(&self) -> Rect {
        self.bounds.shrink(1)
    }

    /// Gutter columns: a space, the line number and a space. Zero when
    /// line numbers are off or the full gutter does not fit.
    fn gutter_width(&self) -> u16 {
        if !self.config.line_numbers {
            return 0;
        }
        let digits = self.lines.len().to_string().len().max(2);
        let full = u16::try_from(digits + 2).unwrap_or(u16::MAX);
        if full <= self.inner().width {
            full
        } else {
            0
        }
    }

    fn text_rect(&self) -> Rect {
        let inner = self.inner();
        let gutter = self.gutter_width();
        Rect::new(inner.x + gutter, inner.y, inner.width - gutter, inner.height)
    }

    fn cursor_column(&self) -> usize {
        self.lines[self.row][..self.col].width()
    }

    /// Adjust scroll offsets so the cursor is inside the view.
    fn scroll_to_cursor(&mut self) {
        let view = self.text_rect();
        let height = usize::from(view.height).max(1);
        let width = usize::from(view.width).max(1);

        if self.row < self.scroll_row {
            self.scroll_row = self.row;
        } else if self.row >= self.scroll_row + height {
            self.scroll_row = self.row + 1 - height;
        }

        let column = self.cursor_column();
        if column < self.scroll_col {
            self.scroll_col = column;
        } else if column >= self.scroll_col + width {
            self.scroll_col = column + 1 - width;
        }
    }

    fn touched(&mut self) {
        self.scroll_to_cursor();
        self.dirty = true;
    }

    // Editing

    fn insert_char(&mut self, c: char) {
        self.lines[self.row].insert(self.col, c);
        self.col += c.len_utf8();
        self.goal = None;
        self.touched();
    }

    /// Insert text at the cursor. Line endings are normalized to `\n`,
    /// tabs expand to spaces and other control characters are dropped.
    fn insert_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut pieces = normalized.split('\n');
        let tail = self.lines[self.row].split_off(self.col);

        if let Some(first) = pieces.next() {
            let first = sanitize(first);
            self.lines[self.row].push_str(&first);
            self.col += first.len();
        }
        for piece in pieces {
            self.row += 1;
            let piece = sanitize(piece);
            self.col = piece.len();
            self.lines.insert(self.row, piece);
        }
        self.lines[self.row].push_str(&tail);
        self.goal = None;
        self.touched();
    }

    fn newline(&mut self) {
        let tail = self.lines[self.row].split_off(self.col);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, tail);
        self.goal = None;
        self.touched();
    }

    fn backspace(&mut self) {
        if let Some(prev) = prev_boundary(&self.lines[self.row], self.col) {
            self.lines[self.row].replace_range(prev..self.col, "");
            self.col = prev;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].len();
            self.lines[self.row].push_str(&line);
        } else {
            return;
        }
        self.goal = None;
        self.touched();
    }

    fn delete(&mut self) {
        if let Some(next) = next_boundary(&self.lines[self.row], self.col) {
            self.lines[self.row].replace_range(self.col..next, "");
        } else if self.row + 1 < self.lines.len() {
            let line = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&line);
        } else {
            return;
        }
        self.goal = None;
        self.touched();
    }

    // Navigation

    fn cursor_left(&mut self) {
        if let Some(prev) = prev_boundary(&self.lines[self.row], self.col) {
            self.col = prev;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.lines[self.row].len();
        }
        self.goal = None;
        self.touched();
    }

    fn cursor_right(&mut self) {
        if let Some(next) = next_boundary(&self.lines[self.row], self.col) {
            self.col = next;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
        self.goal = None;
        self.touched();
    }

    /// Move `delta` rows, keeping the display column where possible.
    fn move_rows(&mut self, delta: isize) {
        let goal = match self.goal {
            Some(goal) => goal,
            None => self.cursor_column(),
        };
        self.goal = Some(goal);
        let last = self.lines.len() - 1;
        self.row = self.row.saturating_add_signed(delta).min(last);
        self.col = byte_at_column(&self.lines[self.row], goal);
        self.touched();
    }

    fn page(&self) -> isize {
        isize::try_from(self.inner().height.max(1)).unwrap_or(1)
    }

    fn cursor_home(&mut self) {
        self.col = 0;
        self.goal = None;
        self.touched();
    }

    fn cursor_end(&mut self) {
        self.col = self.lines[self.row].len();
        self.goal = None;
        self.touched();
    }

    // Drawing

    fn render_border(&self, buffer: &mut Buffer) {
        let b = self.bounds;
        if b.width < 2 || b.height < 2 {
            return;
        }
        let style = self.config.style.border;
        let (right, bottom) = (b.right() - 1, b.bottom() - 1);

        for x in b.x + 1..right {
            buffer.set(x, b.y, Cell::new('─').with_style(style));
            buffer.set(x, bottom, Cell::new('─').with_style(style));
        }
        for y in b.y + 1..bottom {
            buffer.set(b.x, y, Cell::new('│').with_style(style));
            buffer.set(right, y, Cell::new('│').with_style(style));
        }
        buffer.set(b.x, b.y, Cell::new('╭').with_style(style));
        buffer.set(right, b.y, Cell::new('╮').with_style(style));
        buffer.set(b.x, bottom, Cell::new('╰').with_style(style));
        buffer.set(right, bottom, Cell::new('╯').with_style(style));
    }

    fn render_line(&self, buffer: &mut Buffer, line: &str, view: Rect, y: u16, style: Style) {
        // Skip graphemes left of the horizontal scroll offset; a wide one
        // cut by the edge leaves a blank column.
        let mut column = 0;
        let mut start = line.len();
        for (i, g) in line.grapheme_indices(true) {
            if column >= self.scroll_col {
                start = i;
                break;
            }
            column += g.width();
        }
        let pad = u16::try_from(column.saturating_sub(self.scroll_col)).unwrap_or(u16::MAX);
        if pad < view.width {
            buffer.set_string(view.x + pad, y, &line[start..], style, view.width - pad);
        }
    }
}

impl Widget for TextArea {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.touched();
    }

    fn render(&self, buffer: &mut Buffer) {
        buffer.fill_rect(self.bounds, &Cell::blank());
        if self.focused {
            self.render_border(buffer);
        }

        let inner = self.inner();
        let view = self.text_rect();
        if inner.is_empty() {
            return;
        }
        let style = &self.config.style;
        let gutter = self.gutter_width();

        for (offset, y) in (inner.y..inner.bottom()).enumerate() {
            let index = self.scroll_row + offset;
            let Some(line) = self.lines.get(index) else {
                break;
            };

            if gutter > 0 {
                let digits = usize::from(gutter - 2);
                let number = format!(" {:>digits$} ", index + 1);
                buffer.set_string(inner.x, y, &number, style.line_number, gutter);
            }
            self.render_line(buffer, line, view, y, style.text);

            if self.focused && index == self.row {
                buffer.patch_style(Rect::new(view.x, y, view.width, 1), style.cursor_line);
            }
        }

        if self.is_empty() && !self.config.placeholder.is_empty() {
            let placeholder_style = if self.focused {
                style.focused_placeholder
            } else {
                style.placeholder
            };
            buffer.set_string(view.x, view.y, &self.config.placeholder, placeholder_style, view.width);
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        if !self.focused {
            return false;
        }
        let editable = !self.config.read_only;

        match event {
            InputEvent::Paste(text) if editable => self.insert_text(text),
            InputEvent::Key { code, modifiers } => match code {
                KeyCode::Char(c) if editable && !modifiers.is_shortcut() => self.insert_char(*c),
                KeyCode::Enter if editable => self.newline(),
                KeyCode::Backspace if editable => self.backspace(),
                KeyCode::Delete if editable => self.delete(),
                KeyCode::Left => self.cursor_left(),
                KeyCode::Right => self.cursor_right(),
                KeyCode::Up => self.move_rows(-1),
                KeyCode::Down => self.move_rows(1),
                KeyCode::PageUp => self.move_rows(-self.page()),
                KeyCode::PageDown => self.move_rows(self.page()),
                KeyCode::Home => self.cursor_home(),
                KeyCode::End => self.cursor_end(),
                _ => return false,
            },
            _ => return false,
        }
        true
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

fn prev_boundary(line: &str, col: usize) -> Option<usize> {
    line[..col].grapheme_indices(true).next_back().map(|(i, _)| i)
}

fn next_boundary(line: &str, col: usize) -> Option<usize> {
    line[col..].graphemes(true).next().map(|g| col + g.len())
}

/// Byte offset of the last grapheme boundary at or before display `column`.
fn byte_at_column(line: &str, column: usize) -> usize {
    let mut width = 0;
    for (i, g) in line.grapheme_indices(true) {
        let w = g.width();
        if width + w > column {
            return i;
        }
        width += w;
    }
    line.len()
}
