//! Actor Model: Message-passing between the input thread and the app loop.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐     ANSI     ┌────────┐
//! │ Input Thread │ ─────────────────▶  │   App Loop   │ ───────────▶ │ stdout │
//! └──────────────┘   bounded channel   │ (Workbench)  │              └────────┘
//!                                      └──────────────┘
//! ```
//!
//! The app loop is the single writer: it owns the workbench, processes one
//! event to completion before the next and renders on its own thread.

mod input;
mod messages;

pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers};
