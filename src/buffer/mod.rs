//! Buffer module: the frame buffer widgets paint into.
//!
//! This module contains:
//! - [`Cell`]: One grapheme plus its style
//! - [`Buffer`]: A grid of cells representing the terminal screen
//! - [`Rgb`], [`Modifiers`], [`Style`]: Color and text attributes

mod cell;
#[allow(clippy::module_inception)]
mod buffer;

pub use cell::{Cell, CellFlags, Modifiers, Rgb, Style};
pub use buffer::Buffer;
