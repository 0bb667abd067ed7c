//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crate::buffer::{Modifiers, Rgb, Style};
use std::io::Write;

/// SGR parameter for each modifier, in emission order.
const MODIFIER_CODES: [(Modifiers, &str); 6] = [
    (Modifiers::BOLD, "1"),
    (Modifiers::DIM, "2"),
    (Modifiers::ITALIC, "3"),
    (Modifiers::UNDERLINE, "4"),
    (Modifiers::REVERSED, "7"),
    (Modifiers::STRIKETHROUGH, "9"),
];

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to (x, y), 0-indexed, using the shortest CSI form.
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let row = u32::from(y) + 1;
        let col = u32::from(x) + 1;
        if row == 1 && col == 1 {
            self.data.extend_from_slice(b"\x1b[H");
        } else if col == 1 {
            let _ = write!(self.data, "\x1b[{row}H");
        } else {
            let _ = write!(self.data, "\x1b[{row};{col}H");
        }
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Replace all attributes with `style` in one SGR sequence.
    ///
    /// The sequence starts with a reset, so attributes of the previous style
    /// never bleed into this one.
    pub fn set_style(&mut self, style: Style) {
        self.data.extend_from_slice(b"\x1b[0");
        for (modifier, code) in MODIFIER_CODES {
            if style.modifiers.contains(modifier) {
                self.data.push(b';');
                self.data.extend_from_slice(code.as_bytes());
            }
        }
        if let Some(fg) = style.fg {
            self.color_params(38, fg);
        }
        if let Some(bg) = style.bg {
            self.color_params(48, bg);
        }
        self.data.push(b'm');
    }

    fn color_params(&mut self, selector: u8, color: Rgb) {
        let _ = write!(self.data, ";{selector};2;{};{};{}", color.r, color.g, color.b);
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Consume the buffer as text.
    pub fn into_string(self) -> String {
        String::from_utf8(self.data)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(out: &OutputBuffer) -> String {
        String::from_utf8_lossy(out.as_bytes()).into_owned()
    }

    #[test]
    fn test_cursor_move_forms() {
        let mut out = OutputBuffer::new();
        out.cursor_move(0, 0);
        assert_eq!(text(&out), "\x1b[H");

        out.clear();
        out.cursor_move(0, 5);
        assert_eq!(text(&out), "\x1b[6H");

        out.clear();
        out.cursor_move(10, 5);
        assert_eq!(text(&out), "\x1b[6;11H");
    }

    #[test]
    fn test_cursor_move_at_max_does_not_overflow() {
        let mut out = OutputBuffer::new();
        out.cursor_move(u16::MAX, u16::MAX);
        assert_eq!(text(&out), "\x1b[65536;65536H");
    }

    #[test]
    fn test_set_style_plain_is_reset() {
        let mut out = OutputBuffer::new();
        out.set_style(Style::PLAIN);
        assert_eq!(text(&out), "\x1b[0m");
    }

    #[test]
    fn test_set_style_full() {
        let mut out = OutputBuffer::new();
        out.set_style(
            Style::PLAIN
                .fg(Rgb::new(1, 2, 3))
                .bg(Rgb::new(4, 5, 6))
                .modifiers(Modifiers::BOLD | Modifiers::UNDERLINE),
        );
        assert_eq!(text(&out), "\x1b[0;1;4;38;2;1;2;3;48;2;4;5;6m");
    }

    #[test]
    fn test_flush_to_writer() {
        let mut out = OutputBuffer::with_capacity(16);
        out.write_str("hi");
        out.cursor_hide();

        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"hi\x1b[?25l");
        assert_eq!(out.len(), sink.len());
        assert_eq!(out.into_string(), "hi\x1b[?25l");
    }
}
