//! Diff Colorizer: turns an edit script into styled text.

use super::{DiffOp, DiffSequence};
use crate::buffer::{Rgb, Style};
use crate::terminal::OutputBuffer;

/// Semantic role of a styled span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Text added by the new side.
    Insertion,
    /// Text removed from the old side.
    Deletion,
    /// Text shared by both sides, and separators.
    Unchanged,
}

/// The styles applied to each tag.
///
/// Passed explicitly to [`colorize`]; there is no global style state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Style of inserted text.
    pub insertion: Style,
    /// Style of deleted text.
    pub deletion: Style,
    /// Style of unchanged text.
    pub unchanged: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            insertion: Style::PLAIN.fg(Rgb::GREEN),
            deletion: Style::PLAIN.fg(Rgb::RED),
            unchanged: Style::PLAIN,
        }
    }
}

impl Theme {
    /// Resolve a tag to its style.
    pub const fn style(&self, tag: StyleTag) -> Style {
        match tag {
            StyleTag::Insertion => self.insertion,
            StyleTag::Deletion => self.deletion,
            StyleTag::Unchanged => self.unchanged,
        }
    }
}

/// A run of text sharing one tag and style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    /// The text.
    pub text: String,
    /// What the text represents.
    pub tag: StyleTag,
    /// How the text is drawn.
    pub style: Style,
}

/// Text made of styled segments.
///
/// Adjacent segments with the same tag and style are merged on push, and
/// empty segments are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledString {
    segments: Vec<StyledSegment>,
}

impl StyledString {
    /// An empty string.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Append text with the given tag and style.
    pub fn push(&mut self, text: &str, tag: StyleTag, style: Style) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if last.tag == tag && last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.segments.push(StyledSegment {
            text: text.to_string(),
            tag,
            style,
        });
    }

    /// Append every segment of `other`.
    pub fn append(&mut self, other: &Self) {
        for segment in &other.segments {
            self.push(&segment.text, segment.tag, segment.style);
        }
    }

    /// The segments in order.
    pub fn segments(&self) -> &[StyledSegment] {
        &self.segments
    }

    /// Whether there is no text.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The text with styling removed.
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Iterate over `(char, tag, style)` triples.
    pub fn chars(&self) -> impl Iterator<Item = (char, StyleTag, Style)> + '_ {
        self.segments
            .iter()
            .flat_map(|s| s.text.chars().map(move |c| (c, s.tag, s.style)))
    }

    /// Render as a string with SGR escape sequences.
    ///
    /// Every styled segment is followed by a reset, so the output can be
    /// printed without leaking attributes into the rest of the terminal.
    pub fn to_ansi(&self) -> String {
        let mut out = OutputBuffer::new();
        for segment in &self.segments {
            if segment.style == Style::PLAIN {
                out.write_str(&segment.text);
            } else {
                out.set_style(segment.style);
                out.write_str(&segment.text);
                out.reset_attrs();
            }
        }
        out.into_string()
    }
}

impl From<&str> for StyledString {
    fn from(text: &str) -> Self {
        let mut styled = Self::new();
        styled.push(text, StyleTag::Unchanged, Style::PLAIN);
        styled
    }
}

/// Colorize an edit script.
///
/// Each op's text is tagged by kind and styled per `theme`, then followed by
/// one unstyled `"\n"`. The separator is per op, not per line inside the
/// op, so multi-line ops read as one paragraph once wrapped.
pub fn colorize(ops: &DiffSequence, theme: &Theme) -> StyledString {
    let mut styled = StyledString::new();
    for op in ops {
        let tag = match op {
            DiffOp::Insert(_) => StyleTag::Insertion,
            DiffOp::Delete(_) => StyleTag::Deletion,
            DiffOp::Equal(_) => StyleTag::Unchanged,
        };
        styled.push(op.text(), tag, theme.style(tag));
        styled.push("\n", StyleTag::Unchanged, Style::PLAIN);
    }
    styled
}
