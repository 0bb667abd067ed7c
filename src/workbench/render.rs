//! Render plan: everything the host needs to paint one frame.

use crate::diff::StyledString;
use crate::layout::{Rect, PANE_COUNT};

/// One pane as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanePlan {
    /// Where the pane goes, border included.
    pub area: Rect,
    /// The pane's text.
    pub content: String,
    /// Whether the pane holds focus.
    pub focused: bool,
    /// Whether the pane ignores edits.
    pub read_only: bool,
    /// Cursor as `(row, column)` within the text.
    pub cursor: (usize, usize),
}

/// A complete description of the workbench screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// The three panes, indexed by pane number.
    pub panes: [PanePlan; PANE_COUNT],
    /// The help line.
    pub help: String,
    /// Where the help line goes.
    pub help_area: Rect,
    /// The stored diff wrapped to the viewport width, styles kept.
    pub message: Vec<StyledString>,
    /// The stored diff's plain text wrapped to the viewport width.
    pub message_text: String,
    /// Where the wrapped diff goes.
    pub message_area: Rect,
}
