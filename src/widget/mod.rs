//! Widgets: the components painted onto the workbench screen.
//!
//! - [`TextArea`]: bordered multi-line editor used for all three panes
//! - [`HelpBar`]: the key-binding help line
//! - [`DiffView`]: wrapped, colorized diff lines

mod diff_view;
mod help_bar;
mod text_area;
mod traits;

pub use diff_view::DiffView;
pub use help_bar::{HelpBar, HelpBarConfig, HelpEntry, SEPARATOR};
pub use text_area::{TextArea, TextAreaConfig, TextAreaStyle};
pub use traits::Widget;
