//! The `Widget` trait shared by the panes, the help line and the diff view.

use crate::actor::InputEvent;
use crate::buffer::Buffer;
use crate::layout::Rect;

/// Something the workbench positions, paints and may route input to.
///
/// The workbench owns every widget and assigns bounds from the
/// [`PaneLayout`](crate::layout::PaneLayout) on each resize.
pub trait Widget {
    /// Where the widget is drawn.
    fn bounds(&self) -> Rect;

    /// Move or resize the widget. Marks it dirty.
    fn set_bounds(&mut self, bounds: Rect);

    /// Paint into `buffer`, touching only cells inside [`bounds`](Self::bounds).
    fn render(&self, buffer: &mut Buffer);

    /// Offer an event to the widget; `true` if it changed anything.
    ///
    /// Display-only widgets always return `false`.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Whether the widget changed since it was last painted.
    fn needs_redraw(&self) -> bool;

    /// Mark the widget as painted.
    fn clear_redraw(&mut self);
}
