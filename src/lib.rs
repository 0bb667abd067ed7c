//! # diffbench
//!
//! A terminal workbench for comparing two texts.
//!
//! Two editable panes hold the old and new text, a third shows the result,
//! and a colorized, word-wrapped diff sits under a help line. The same
//! pipeline is usable without a terminal:
//!
//! ```
//! use diffbench::diff::{colorize, compute_diff, wrap, Theme};
//!
//! let ops = compute_diff("Hello", "Hello Go bro ");
//! let styled = colorize(&ops, &Theme::default());
//! assert_eq!(wrap(&styled.plain(), 80), "Hello Go bro");
//! ```
//!
//! ## Core Concepts
//!
//! - **Diff engine**: linear-space Myers over chars, words or lines
//! - **Workbench**: a pure focus/edit/compare state machine, testable without a terminal
//! - **Double-buffered rendering**: frames are diffed cell by cell before any ANSI is written
//! - **Input actor**: a dedicated thread turns terminal events into messages

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod layout;
pub mod logging;
pub mod terminal;
pub mod widget;
pub mod workbench;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, CellFlags, Modifiers, Rgb, Style};
pub use config::Config;
pub use diff::{DiffKind, DiffOp, DiffSequence, Granularity};
pub use error::{Error, Result};
pub use layout::Rect;
pub use workbench::{Command, KeyMap, Transition, Workbench, WorkbenchOptions};
