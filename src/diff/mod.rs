//! Text diff pipeline: compute, colorize, wrap.
//!
//! ```text
//!  old, new ──▶ compute_diff ──▶ DiffSequence ──▶ colorize ──▶ StyledString
//!                                                                  │
//!                                     viewport width ──▶ wrap ◀────┘
//! ```
//!
//! All three stages are pure functions. A [`DiffSequence`] is produced fresh
//! on every compare and never mutated afterwards.

mod colorize;
mod myers;
mod wrap;

pub use colorize::{colorize, StyleTag, StyledSegment, StyledString, Theme};
pub use myers::{compute_diff, compute_diff_with};
pub use wrap::{wrap, wrap_styled};

use serde::{Deserialize, Serialize};

/// Which side(s) of the comparison a diff op belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    /// Present in both texts.
    Equal,
    /// Present only in the new text.
    Insert,
    /// Present only in the old text.
    Delete,
}

/// One unit of an edit script: a contiguous span of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiffOp {
    /// Text shared by both sides.
    Equal(String),
    /// Text added by the new side.
    Insert(String),
    /// Text removed from the old side.
    Delete(String),
}

impl DiffOp {
    /// Build an op of the given kind.
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        match kind {
            DiffKind::Equal => Self::Equal(text.into()),
            DiffKind::Insert => Self::Insert(text.into()),
            DiffKind::Delete => Self::Delete(text.into()),
        }
    }

    /// The op's kind.
    pub const fn kind(&self) -> DiffKind {
        match self {
            Self::Equal(_) => DiffKind::Equal,
            Self::Insert(_) => DiffKind::Insert,
            Self::Delete(_) => DiffKind::Delete,
        }
    }

    /// The span of text carried by the op.
    pub fn text(&self) -> &str {
        match self {
            Self::Equal(text) | Self::Insert(text) | Self::Delete(text) => text,
        }
    }

    /// Whether the op contributes to the old text.
    pub const fn is_old_side(&self) -> bool {
        matches!(self, Self::Equal(_) | Self::Delete(_))
    }

    /// Whether the op contributes to the new text.
    pub const fn is_new_side(&self) -> bool {
        matches!(self, Self::Equal(_) | Self::Insert(_))
    }
}

/// An ordered edit script turning one text into another.
///
/// Adjacent ops never share a kind, and no op carries empty text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffSequence {
    ops: Vec<DiffOp>,
}

impl DiffSequence {
    /// An empty script (both texts empty).
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// The ops in order.
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    /// Iterate over the ops.
    pub fn iter(&self) -> std::slice::Iter<'_, DiffOp> {
        self.ops.iter()
    }

    /// Number of ops.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the script has no ops.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Reconstruct the old text from the Equal and Delete spans.
    pub fn old_text(&self) -> String {
        self.ops
            .iter()
            .filter(|op| op.is_old_side())
            .map(DiffOp::text)
            .collect()
    }

    /// Reconstruct the new text from the Equal and Insert spans.
    pub fn new_text(&self) -> String {
        self.ops
            .iter()
            .filter(|op| op.is_new_side())
            .map(DiffOp::text)
            .collect()
    }

    /// Number of inserted plus deleted characters.
    pub fn edit_distance(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.kind() != DiffKind::Equal)
            .map(|op| op.text().chars().count())
            .sum()
    }

    /// Append a span, merging it into the last op when the kinds match.
    /// Empty spans are dropped.
    pub(crate) fn push(&mut self, kind: DiffKind, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.ops.last_mut() {
            Some(DiffOp::Equal(last)) if kind == DiffKind::Equal => last.push_str(text),
            Some(DiffOp::Insert(last)) if kind == DiffKind::Insert => last.push_str(text),
            Some(DiffOp::Delete(last)) if kind == DiffKind::Delete => last.push_str(text),
            _ => self.ops.push(DiffOp::new(kind, text)),
        }
    }
}

impl<'a> IntoIterator for &'a DiffSequence {
    type Item = &'a DiffOp;
    type IntoIter = std::slice::Iter<'a, DiffOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl FromIterator<DiffOp> for DiffSequence {
    fn from_iter<I: IntoIterator<Item = DiffOp>>(iter: I) -> Self {
        let mut sequence = Self::new();
        for op in iter {
            sequence.push(op.kind(), op.text());
        }
        sequence
    }
}

/// The unit the diff engine compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Unicode scalar values; multi-line text is one flat sequence.
    #[default]
    Char,
    /// Unicode word-boundary segments (words, runs of spaces, punctuation).
    Word,
    /// Lines, each including its trailing newline.
    Line,
}
