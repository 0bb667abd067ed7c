//! Workbench: the editor/focus state machine that drives the diff pipeline.
//!
//! Three panes (two inputs and the read-only result), a focus index, the
//! last colorized diff and the viewport. Keys either resolve to a
//! [`Command`] through the [`KeyMap`] or are edits for the focused pane.
//!
//! ```text
//! NextFocus:  0 ─▶ 1 ─▶ 2 ─▶ 0
//! PrevFocus:  0 ─▶ 2 ─▶ 1 ─▶ 0
//! Compare:    pane 0, pane 1 ─▶ diff ─▶ colorize ─▶ stored diff + pane 2
//! ```

mod keymap;
mod render;

pub use keymap::{KeyBinding, KeyChord, KeyMap};
pub use render::{PanePlan, RenderPlan};

use crate::actor::InputEvent;
use crate::buffer::Buffer;
use crate::diff::{colorize, compute_diff_with, wrap, wrap_styled, Granularity, StyledString, Theme};
use crate::layout::{LayoutConfig, PaneLayout, Rect, PANE_COUNT, RESULT_PANE};
use crate::widget::{DiffView, HelpBar, TextArea, TextAreaConfig, Widget};
use log::{debug, trace};

/// What the workbench can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move focus to the next pane, wrapping around.
    NextFocus,
    /// Move focus to the previous pane, wrapping around.
    PrevFocus,
    /// Diff pane 0 against pane 1.
    Compare,
    /// The terminal changed size.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// Leave the workbench.
    Quit,
}

/// Whether the app loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep processing events.
    Continue,
    /// Stop the app loop.
    Quit,
}

/// Settings the workbench is built with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkbenchOptions {
    /// Pane heights.
    pub layout: LayoutConfig,
    /// Unit the diff engine compares.
    pub granularity: Granularity,
    /// Diff colors.
    pub theme: Theme,
    /// Editor settings shared by all panes; the result pane is always read-only.
    pub editor: TextAreaConfig,
}

/// The workbench state.
#[derive(Debug)]
pub struct Workbench {
    panes: [TextArea; PANE_COUNT],
    focus: usize,
    diff: StyledString,
    width: u16,
    height: u16,
    layout: PaneLayout,
    options: WorkbenchOptions,
    help: HelpBar,
    message: DiffView,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(WorkbenchOptions::default())
    }
}

impl Workbench {
    /// Create a workbench with empty panes, pane 0 focused and a 0×0
    /// viewport. Call [`Command::Resize`] before drawing.
    pub fn new(options: WorkbenchOptions) -> Self {
        let editable = options.editor.clone();
        let result = TextAreaConfig {
            read_only: true,
            ..options.editor.clone()
        };
        let mut panes = [
            TextArea::with_config(Rect::ZERO, editable.clone()),
            TextArea::with_config(Rect::ZERO, editable),
            TextArea::with_config(Rect::ZERO, result),
        ];
        panes[0].focus();

        Self {
            panes,
            focus: 0,
            diff: StyledString::new(),
            width: 0,
            height: 0,
            layout: PaneLayout::default(),
            options,
            help: HelpBar::new(Rect::ZERO, KeyMap::default().help_entries()),
            message: DiffView::new(Rect::ZERO),
        }
    }

    /// Replace the help line entries, e.g. with those of a custom key map.
    pub fn set_help(&mut self, keymap: &KeyMap) {
        let bounds = self.help.bounds();
        self.help = HelpBar::new(bounds, keymap.help_entries());
    }

    /// Index of the focused pane.
    pub const fn focus(&self) -> usize {
        self.focus
    }

    /// Pane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= PANE_COUNT`.
    pub fn pane(&self, index: usize) -> &TextArea {
        &self.panes[index]
    }

    /// Mutable access to pane `index`, for loading text programmatically.
    ///
    /// # Panics
    ///
    /// Panics if `index >= PANE_COUNT`.
    pub fn pane_mut(&mut self, index: usize) -> &mut TextArea {
        &mut self.panes[index]
    }

    /// The last colorized diff (empty before the first compare).
    pub const fn diff(&self) -> &StyledString {
        &self.diff
    }

    /// Viewport as `(width, height)`.
    pub const fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// The current pane geometry.
    pub const fn layout(&self) -> &PaneLayout {
        &self.layout
    }

    /// Execute a command.
    pub fn apply(&mut self, command: Command) -> Transition {
        match command {
            Command::NextFocus => self.move_focus((self.focus + 1) % PANE_COUNT),
            Command::PrevFocus => self.move_focus((self.focus + PANE_COUNT - 1) % PANE_COUNT),
            Command::Compare => self.compare(),
            Command::Resize { width, height } => self.resize(width, height),
            Command::Quit => {
                for pane in &mut self.panes {
                    pane.blur();
                }
                debug!("quit requested");
                return Transition::Quit;
            }
        }
        Transition::Continue
    }

    /// Route one input event: bound keys and resizes become commands, and
    /// other key and paste events are edits for the focused pane only.
    pub fn handle_event(&mut self, event: &InputEvent, keymap: &KeyMap) -> Transition {
        if let Some(command) = keymap.resolve(event) {
            return self.apply(command);
        }
        match event {
            InputEvent::Key { .. } | InputEvent::Paste(_) => {
                let consumed = self.panes[self.focus].handle_input(event);
                trace!("pane {} edit {event:?} consumed={consumed}", self.focus);
            }
            InputEvent::Resize { .. } | InputEvent::Error(_) | InputEvent::Shutdown => {}
        }
        Transition::Continue
    }

    fn move_focus(&mut self, next: usize) {
        self.panes[self.focus].blur();
        self.focus = next;
        self.panes[self.focus].focus();
        trace!("focus -> pane {next}");
    }

    fn compare(&mut self) {
        let old = self.panes[0].content();
        let new = self.panes[1].content();

        let ops = compute_diff_with(&old, &new, self.options.granularity);
        let styled = colorize(&ops, &self.options.theme);
        debug!(
            "compared {} and {} chars: {} ops, edit distance {}",
            old.chars().count(),
            new.chars().count(),
            ops.len(),
            ops.edit_distance()
        );

        self.panes[RESULT_PANE].set_content(&styled.plain());
        self.diff = styled;
        self.rewrap();
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.layout = PaneLayout::compute(width, height, &self.options.layout);

        for (pane, area) in self.panes.iter_mut().zip(self.layout.panes) {
            pane.set_bounds(area);
        }
        self.help.set_bounds(self.layout.help);
        self.message.set_bounds(self.layout.message);
        self.rewrap();
        trace!("resize -> {width}x{height}");
    }

    fn rewrap(&mut self) {
        self.message
            .set_lines(wrap_styled(&self.diff, usize::from(self.width)));
    }

    /// Describe the current frame.
    pub fn render(&self) -> RenderPlan {
        let pane_plan = |i: usize| {
            let pane = &self.panes[i];
            PanePlan {
                area: self.layout.pane(i),
                content: pane.content(),
                focused: pane.is_focused(),
                read_only: pane.is_read_only(),
                cursor: pane.cursor(),
            }
        };

        RenderPlan {
            panes: [pane_plan(0), pane_plan(1), pane_plan(2)],
            help: self.help.text(),
            help_area: self.layout.help,
            message: self.message.lines().to_vec(),
            message_text: wrap(&self.diff.plain(), usize::from(self.width)),
            message_area: self.layout.message,
        }
    }

    /// Paint the frame into `buffer`, resizing it to the viewport first.
    pub fn draw(&mut self, buffer: &mut Buffer) {
        buffer.resize(self.width, self.height);
        buffer.clear();

        for pane in &mut self.panes {
            pane.render(buffer);
            pane.clear_redraw();
        }
        self.help.render(buffer);
        self.help.clear_redraw();
        self.message.render(buffer);
        self.message.clear_redraw();
    }

    /// Whether anything changed since the last [`draw`](Self::draw).
    pub fn needs_redraw(&self) -> bool {
        self.panes.iter().any(Widget::needs_redraw)
            || self.help.needs_redraw()
            || self.message.needs_redraw()
    }

    /// Screen position of the focused pane's cursor.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.panes[self.focus].screen_cursor()
    }
}
