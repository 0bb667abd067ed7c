//! Layout module: Pre-computed static regions for efficient rendering.
//!
//! Layouts are computed once at startup and on every terminal resize.
//! There is no tree traversal at render time, just a fixed set of rects.

mod panes;
mod rect;

pub use panes::{LayoutConfig, PaneLayout, PANE_COUNT, RESULT_PANE};
pub use rect::Rect;
