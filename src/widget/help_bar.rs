//! Help Bar Widget: one-line list of key bindings.
//!
//! Renders entries as `key desc • key desc`, truncating at the right edge.

use super::traits::Widget;
use crate::actor::InputEvent;
use crate::buffer::{Buffer, Cell, Rgb, Style};
use crate::layout::Rect;

/// Separator drawn between entries.
pub const SEPARATOR: &str = " • ";

/// Configuration for the help bar widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpBarConfig {
    /// Style of the key names.
    pub key: Style,
    /// Style of the descriptions.
    pub desc: Style,
    /// Style of the separators.
    pub separator: Style,
}

impl Default for HelpBarConfig {
    fn default() -> Self {
        Self {
            key: Style::PLAIN.fg(Rgb::from_u32(0x90_90_90)),
            desc: Style::PLAIN.fg(Rgb::from_u32(0xb2_b2_b2)),
            separator: Style::PLAIN.fg(Rgb::from_u32(0xda_da_da)),
        }
    }
}

/// One `key desc` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// Key name, e.g. `ctrl+r`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

impl HelpEntry {
    /// Create an entry.
    pub fn new(key: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            desc: desc.into(),
        }
    }
}

/// A single line of key help.
#[derive(Debug)]
pub struct HelpBar {
    entries: Vec<HelpEntry>,
    bounds: Rect,
    config: HelpBarConfig,
    dirty: bool,
}

impl HelpBar {
    /// Create a help bar showing `entries`.
    pub fn new(bounds: Rect, entries: Vec<HelpEntry>) -> Self {
        Self::with_config(bounds, entries, HelpBarConfig::default())
    }

    /// Create a help bar with custom colors.
    pub const fn with_config(bounds: Rect, entries: Vec<HelpEntry>, config: HelpBarConfig) -> Self {
        Self {
            entries,
            bounds,
            config,
            dirty: true,
        }
    }

    /// The entries shown.
    pub fn entries(&self) -> &[HelpEntry] {
        &self.entries
    }

    /// The help line as plain text.
    pub fn text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}", e.key, e.desc))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }
}

impl Widget for HelpBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        if self.bounds.is_empty() {
            return;
        }
        buffer.fill_rect(self.bounds, &Cell::blank());

        let y = self.bounds.y;
        let mut x = self.bounds.x;
        let mut put = |text: &str, style: Style| {
            let remaining = self.bounds.right().saturating_sub(x);
            x += buffer.set_string(x, y, text, style, remaining);
        };

        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                put(SEPARATOR, self.config.separator);
            }
            put(&entry.key, self.config.key);
            put(" ", self.config.desc);
            put(&entry.desc, self.config.desc);
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
