//! Pane geometry for the workbench screen.
//!
//! ```text
//! ┌──────────────┬──────────────┐  row 0
//! │   input A    │   input B    │  input_height rows each
//! ├──────────────┴──────────────┤
//! │           result            │  result_height rows
//! ├─────────────────────────────┤
//! │ help                        │  1 row
//! │                             │  1 blank row
//! │ wrapped diff message area   │  to the bottom
//! └─────────────────────────────┘
//! ```
//!
//! The inputs share `(height - help_height - result_height) / 2` rows, so a
//! configured `help_height` reserves room below the result area for the help
//! line and the message area.

use super::rect::Rect;
use serde::{Deserialize, Serialize};

/// Number of panes on the workbench: two editable inputs plus the result.
pub const PANE_COUNT: usize = 3;

/// Index of the read-only result pane.
pub const RESULT_PANE: usize = PANE_COUNT - 1;

/// Fixed heights that drive the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Rows given to the result pane.
    pub result_height: u16,
    /// Rows reserved for the help area when sizing the input panes.
    pub help_height: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            result_height: 5,
            help_height: 5,
        }
    }
}

/// Computed rectangles for every part of the workbench screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneLayout {
    /// Pane rectangles, indexed by pane number.
    pub panes: [Rect; PANE_COUNT],
    /// The single help line.
    pub help: Rect,
    /// Where the wrapped diff is shown.
    pub message: Rect,
}

impl PaneLayout {
    /// Compute the layout for a `width` × `height` viewport.
    ///
    /// Every rectangle is clipped to the viewport, so tiny terminals yield
    /// empty rectangles instead of overflowing.
    pub fn compute(width: u16, height: u16, config: &LayoutConfig) -> Self {
        let viewport = Rect::from_size(width, height);
        #[allow(clippy::cast_possible_truncation)]
        let editable = (PANE_COUNT - 1) as u16;

        let input_width = width / editable;
        let input_height = height
            .saturating_sub(config.help_height)
            .saturating_sub(config.result_height)
            / 2;

        let mut panes = [Rect::ZERO; PANE_COUNT];
        for (i, pane) in panes.iter_mut().take(RESULT_PANE).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let x = input_width * i as u16;
            *pane = Rect::new(x, 0, input_width, input_height).intersection(viewport);
        }

        let result = Rect::new(0, input_height, width, config.result_height).intersection(viewport);
        panes[RESULT_PANE] = result;

        let help_y = input_height.saturating_add(config.result_height);
        let help = Rect::new(0, help_y, width, 1).intersection(viewport);

        let message_y = help_y.saturating_add(2);
        let message = Rect::new(0, message_y, width, height.saturating_sub(message_y))
            .intersection(viewport);

        Self {
            panes,
            help,
            message,
        }
    }

    /// Rectangle of pane `index`.
    pub fn pane(&self, index: usize) -> Rect {
        self.panes.get(index).copied().unwrap_or(Rect::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_80x40() {
        let layout = PaneLayout::compute(80, 40, &LayoutConfig::default());

        // (40 - 5 - 5) / 2 = 15 rows per input, 80 / 2 = 40 columns.
        assert_eq!(layout.pane(0), Rect::new(0, 0, 40, 15));
        assert_eq!(layout.pane(1), Rect::new(40, 0, 40, 15));
        assert_eq!(layout.pane(2), Rect::new(0, 15, 80, 5));
        assert_eq!(layout.help, Rect::new(0, 20, 80, 1));
        assert_eq!(layout.message, Rect::new(0, 22, 80, 18));
    }

    #[test]
    fn test_layout_odd_width() {
        let layout = PaneLayout::compute(81, 41, &LayoutConfig::default());
        assert_eq!(layout.pane(0).width, 40);
        assert_eq!(layout.pane(1).x, 40);
        assert_eq!(layout.pane(0).height, 15);
        assert_eq!(layout.pane(2).width, 81);
    }

    #[test]
    fn test_layout_zero_viewport() {
        let layout = PaneLayout::compute(0, 0, &LayoutConfig::default());
        for pane in layout.panes {
            assert!(pane.is_empty());
        }
        assert!(layout.message.is_empty());
    }

    #[test]
    fn test_layout_tiny_terminal_is_clipped() {
        let layout = PaneLayout::compute(20, 6, &LayoutConfig::default());
        assert_eq!(layout.pane(0).height, 0);
        assert_eq!(layout.pane(2), Rect::new(0, 0, 20, 5));
        assert_eq!(layout.help, Rect::new(0, 5, 20, 1));
        assert!(layout.message.is_empty());
    }

    #[test]
    fn test_layout_custom_heights() {
        let config = LayoutConfig {
            result_height: 3,
            help_height: 1,
        };
        let layout = PaneLayout::compute(100, 30, &config);
        assert_eq!(layout.pane(0).height, 13);
        assert_eq!(layout.pane(2), Rect::new(0, 13, 100, 3));
    }

    #[test]
    fn test_pane_out_of_range() {
        let layout = PaneLayout::compute(80, 40, &LayoutConfig::default());
        assert_eq!(layout.pane(PANE_COUNT), Rect::ZERO);
    }
}
