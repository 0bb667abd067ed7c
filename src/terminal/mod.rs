//! Terminal host: raw-mode session, ANSI accumulation and frame presentation.

mod output;
mod screen;

pub use output::OutputBuffer;
pub use screen::{PresentStats, Screen};

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// How the session prepares the terminal.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Whether to switch to the alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether pasted text arrives as one event.
    pub bracketed_paste: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            bracketed_paste: true,
        }
    }
}

/// Raw-mode terminal session.
///
/// Restores the terminal when dropped, including when the app loop exits
/// through an error.
#[derive(Debug)]
pub struct TerminalSession {
    config: SessionConfig,
}

impl TerminalSession {
    /// Enter raw mode and set up the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn start(config: SessionConfig) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, Drop undoes whatever was set up.
        let session = Self { config };

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if config.bracketed_paste {
            execute!(stdout, EnableBracketedPaste)?;
        }
        execute!(stdout, cursor::Hide)?;

        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.config.bracketed_paste {
            let _ = execute!(stdout, DisableBracketedPaste);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

/// Current terminal size as `(columns, rows)`.
///
/// # Errors
///
/// Returns an error if the size cannot be queried.
pub fn size() -> io::Result<(u16, u16)> {
    terminal::size()
}
