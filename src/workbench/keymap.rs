//! Key map: host key events to workbench commands.

use super::Command;
use crate::actor::{InputEvent, KeyCode, KeyModifiers};
use crate::widget::{HelpEntry, SEPARATOR};

/// A key plus the Control/Alt state it needs.
///
/// Shift is not compared: terminals encode it in the key itself
/// (`'R'`, `BackTab`), and some report it as a modifier as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key.
    pub code: KeyCode,
    /// Whether Control must be held.
    pub control: bool,
    /// Whether Alt must be held.
    pub alt: bool,
}

impl KeyChord {
    /// A key pressed without Control or Alt.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            control: false,
            alt: false,
        }
    }

    /// Control plus a character key.
    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            control: true,
            alt: false,
        }
    }

    /// Whether a key press matches this chord.
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let code_matches = match (self.code, code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        code_matches && self.control == modifiers.control && self.alt == modifiers.alt
    }
}

/// Chords that trigger one command, plus how the help line names them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    /// Any of these triggers the command.
    pub chords: Vec<KeyChord>,
    /// The command triggered.
    pub command: Command,
    /// Help line entry.
    pub help: HelpEntry,
}

/// The set of bindings the workbench reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(vec![
            KeyBinding {
                chords: vec![KeyChord::plain(KeyCode::Tab)],
                command: Command::NextFocus,
                help: HelpEntry::new("tab", "next"),
            },
            KeyBinding {
                chords: vec![KeyChord::plain(KeyCode::BackTab)],
                command: Command::PrevFocus,
                help: HelpEntry::new("shift+tab", "prev"),
            },
            KeyBinding {
                chords: vec![KeyChord::plain(KeyCode::Esc), KeyChord::ctrl('c')],
                command: Command::Quit,
                help: HelpEntry::new("esc", "quit"),
            },
            KeyBinding {
                chords: vec![KeyChord::ctrl('r')],
                command: Command::Compare,
                help: HelpEntry::new("ctrl+r", "compare"),
            },
        ])
    }
}

impl KeyMap {
    /// Build a key map from bindings; earlier bindings win on conflicts.
    pub const fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// The bindings in order.
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// The command an event triggers, if any.
    ///
    /// Terminal resizes always map to [`Command::Resize`]; other events
    /// without a binding are edits for the focused pane.
    pub fn resolve(&self, event: &InputEvent) -> Option<Command> {
        match event {
            InputEvent::Key { code, modifiers } => self
                .bindings
                .iter()
                .find(|b| b.chords.iter().any(|c| c.matches(*code, *modifiers)))
                .map(|b| b.command),
            InputEvent::Resize { width, height } => Some(Command::Resize {
                width: *width,
                height: *height,
            }),
            InputEvent::Paste(_) | InputEvent::Error(_) | InputEvent::Shutdown => None,
        }
    }

    /// Help entries in binding order.
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.bindings.iter().map(|b| b.help.clone()).collect()
    }

    /// The help line, e.g. `tab next • shift+tab prev • esc quit • ctrl+r compare`.
    pub fn help_line(&self) -> String {
        self.bindings
            .iter()
            .map(|b| format!("{} {}", b.help.key, b.help.desc))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keymap = KeyMap::default();
        let resolve = |event| keymap.resolve(&event);

        assert_eq!(resolve(InputEvent::key(KeyCode::Tab)), Some(Command::NextFocus));
        assert_eq!(
            resolve(InputEvent::key_with(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Command::PrevFocus)
        );
        assert_eq!(resolve(InputEvent::key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(resolve(InputEvent::ctrl('c')), Some(Command::Quit));
        assert_eq!(resolve(InputEvent::ctrl('r')), Some(Command::Compare));
        assert_eq!(
            resolve(InputEvent::Resize {
                width: 80,
                height: 24
            }),
            Some(Command::Resize {
                width: 80,
                height: 24
            })
        );
    }

    #[test]
    fn test_text_keys_are_not_commands() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.resolve(&InputEvent::key(KeyCode::Char('r'))), None);
        assert_eq!(keymap.resolve(&InputEvent::key(KeyCode::Char('c'))), None);
        assert_eq!(keymap.resolve(&InputEvent::key(KeyCode::Enter)), None);
        assert_eq!(keymap.resolve(&InputEvent::Paste("\t".into())), None);
    }

    #[test]
    fn test_ctrl_shift_still_matches() {
        let keymap = KeyMap::default();
        let event = InputEvent::key_with(
            KeyCode::Char('R'),
            KeyModifiers {
                shift: true,
                control: true,
                alt: false,
            },
        );
        assert_eq!(keymap.resolve(&event), Some(Command::Compare));
    }

    #[test]
    fn test_help_line() {
        assert_eq!(
            KeyMap::default().help_line(),
            "tab next • shift+tab prev • esc quit • ctrl+r compare"
        );
    }
}
