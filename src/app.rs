//! The interactive app loop and the one-shot print mode.
//!
//! The input actor feeds events over a bounded channel. The loop blocks for
//! one event, drains whatever else is queued, then draws at most one frame
//! for the whole batch.

use crate::actor::{InputActor, InputEvent};
use crate::buffer::Buffer;
use crate::diff::{colorize, compute_diff_with, wrap_styled, Granularity, StyledString, Theme};
use crate::error::{Error, Result};
use crate::terminal::{self, OutputBuffer, Screen, SessionConfig, TerminalSession};
use crate::workbench::{Command, KeyMap, Transition, Workbench, WorkbenchOptions};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use log::{debug, info, trace, warn};
use std::io::{self, Write};
use std::time::Duration;

/// Capacity of the input channel.
const INPUT_QUEUE: usize = 64;

/// How long the input thread waits for an event before checking shutdown.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Run the workbench in the terminal until the user quits.
///
/// The terminal is restored on every exit path.
pub fn run(options: WorkbenchOptions, keymap: &KeyMap, session: SessionConfig) -> Result<()> {
    let _session = TerminalSession::start(session)?;
    let (width, height) = terminal::size()?;

    let (tx, rx) = bounded::<InputEvent>(INPUT_QUEUE);
    let input = InputActor::spawn(tx, POLL_TIMEOUT)?;
    info!("workbench started at {width}x{height}");

    let mut bench = Workbench::new(options);
    bench.set_help(keymap);
    bench.apply(Command::Resize { width, height });

    let mut stdout = io::stdout().lock();
    let result = event_loop(&mut bench, keymap, &rx, &mut stdout);

    // Unblocks an input thread stuck on a full channel.
    drop(rx);
    input.join();
    info!("workbench stopped");
    result
}

/// Draw the current frame, then process events from `rx` until the
/// workbench quits, presenting each changed frame to `out`.
///
/// # Errors
///
/// Returns [`Error::InputDisconnected`] if the channel closes first, or an
/// I/O error if writing to `out` fails.
pub fn event_loop<W: Write>(
    bench: &mut Workbench,
    keymap: &KeyMap,
    rx: &Receiver<InputEvent>,
    out: &mut W,
) -> Result<()> {
    let (width, height) = bench.viewport();
    let mut screen = Screen::new(width, height);
    let mut frame = Buffer::new(width, height);
    let mut ansi = OutputBuffer::with_capacity(usize::from(width) * usize::from(height) * 4);

    present(bench, &mut screen, &mut frame, &mut ansi, out)?;

    loop {
        let first = rx.recv().map_err(|_| Error::InputDisconnected)?;
        let mut next = Some(first);
        while let Some(event) = next {
            if dispatch(bench, keymap, &event) == Transition::Quit {
                return Ok(());
            }
            next = match rx.try_recv() {
                Ok(event) => Some(event),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => return Err(Error::InputDisconnected),
            };
        }

        if bench.needs_redraw() {
            present(bench, &mut screen, &mut frame, &mut ansi, out)?;
        }
    }
}

fn dispatch(bench: &mut Workbench, keymap: &KeyMap, event: &InputEvent) -> Transition {
    match event {
        InputEvent::Error(message) => {
            warn!("input error: {message}");
            Transition::Continue
        }
        InputEvent::Shutdown => {
            debug!("input shutdown");
            Transition::Quit
        }
        _ => bench.handle_event(event, keymap),
    }
}

fn present<W: Write>(
    bench: &mut Workbench,
    screen: &mut Screen,
    frame: &mut Buffer,
    ansi: &mut OutputBuffer,
    out: &mut W,
) -> Result<()> {
    bench.draw(frame);
    ansi.clear();
    let stats = screen.present(frame, bench.cursor(), ansi);
    ansi.flush_to(out)?;
    trace!(
        "frame: full={} cells={} moves={} styles={}",
        stats.full_redraw,
        stats.cells_changed,
        stats.cursor_moves,
        stats.style_changes
    );
    Ok(())
}

/// Diff `old` against `new` and render the result with ANSI colors.
///
/// With `width`, the diff is wrapped to that many columns the way the
/// workbench message area wraps it; otherwise the colorized text is
/// returned as is, one op per line.
pub fn print_diff(
    old: &str,
    new: &str,
    granularity: Granularity,
    theme: &Theme,
    width: Option<usize>,
) -> String {
    let ops = compute_diff_with(old, new, granularity);
    let styled = colorize(&ops, theme);
    width.map_or_else(
        || styled.to_ansi(),
        |width| {
            wrap_styled(&styled, width)
                .iter()
                .map(StyledString::to_ansi)
                .collect::<Vec<_>>()
                .join("\n")
        },
    )
}
