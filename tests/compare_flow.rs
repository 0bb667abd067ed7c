//! End-to-end: key events drive the workbench, frames go through the
//! screen differ, and a VT100 emulator checks what the user would see.

use diffbench::actor::{InputEvent, KeyCode};
use diffbench::app::event_loop;
use diffbench::terminal::{OutputBuffer, Screen};
use diffbench::{Buffer, Command, KeyMap, Transition, Workbench};
use pretty_assertions::assert_eq;

const WIDTH: u16 = 60;
const HEIGHT: u16 = 24;
/// `(24 - 5 - 5) / 2` input rows, then 5 result rows, the help line and a gap.
const HELP_ROW: u16 = 12;
const MESSAGE_ROW: u16 = 14;

fn send(bench: &mut Workbench, keymap: &KeyMap, events: impl IntoIterator<Item = InputEvent>) {
    for event in events {
        assert_eq!(bench.handle_event(&event, keymap), Transition::Continue);
    }
}

fn hello_bench() -> (Workbench, KeyMap) {
    let keymap = KeyMap::default();
    let mut bench = Workbench::default();
    bench.apply(Command::Resize {
        width: WIDTH,
        height: HEIGHT,
    });
    send(&mut bench, &keymap, InputEvent::typed("Hello"));
    send(&mut bench, &keymap, [InputEvent::key(KeyCode::Tab)]);
    send(&mut bench, &keymap, InputEvent::typed("Hello Go bro "));
    send(&mut bench, &keymap, [InputEvent::ctrl('r')]);
    (bench, keymap)
}

fn emulate(bench: &mut Workbench) -> vt100::Parser {
    let mut frame = Buffer::new(WIDTH, HEIGHT);
    let mut screen = Screen::new(WIDTH, HEIGHT);
    let mut out = OutputBuffer::new();
    bench.draw(&mut frame);
    screen.present(&frame, bench.cursor(), &mut out);

    let mut parser = vt100::Parser::new(HEIGHT, WIDTH, 0);
    parser.process(out.as_bytes());
    parser
}

fn row_text(parser: &vt100::Parser, row: u16) -> String {
    (0..WIDTH)
        .map(|col| {
            parser
                .screen()
                .cell(row, col)
                .map_or_else(String::new, |c| c.contents())
        })
        .map(|s| if s.is_empty() { " ".to_string() } else { s })
        .collect()
}

#[test]
fn test_hello_compare_on_screen() {
    let (mut bench, _) = hello_bench();
    let parser = emulate(&mut bench);

    assert!(row_text(&parser, HELP_ROW)
        .starts_with("tab next • shift+tab prev • esc quit • ctrl+r compare"));
    assert!(row_text(&parser, MESSAGE_ROW).starts_with("Hello Go bro "));

    let screen = parser.screen();
    let unchanged = screen.cell(MESSAGE_ROW, 0).unwrap();
    assert_eq!(unchanged.fgcolor(), vt100::Color::Default);
    let inserted = screen.cell(MESSAGE_ROW, 6).unwrap();
    assert_eq!(inserted.contents(), "G");
    assert_eq!(inserted.fgcolor(), vt100::Color::Rgb(0, 255, 0));
    // The separating space is plain.
    assert_eq!(screen.cell(MESSAGE_ROW, 8).unwrap().fgcolor(), vt100::Color::Default);
}

#[test]
fn test_result_pane_shows_plain_diff() {
    let (mut bench, _) = hello_bench();
    assert_eq!(bench.pane(2).content(), "Hello\n Go bro \n");

    let parser = emulate(&mut bench);
    let result_rows: Vec<String> = (7..12).map(|row| row_text(&parser, row)).collect();
    assert!(result_rows.iter().any(|r| r.contains("Hello")));
    assert!(result_rows.iter().any(|r| r.contains(" Go bro")));
}

#[test]
fn test_deletions_are_red() {
    let keymap = KeyMap::default();
    let mut bench = Workbench::default();
    bench.apply(Command::Resize {
        width: WIDTH,
        height: HEIGHT,
    });
    bench.pane_mut(0).set_content("abc");
    bench.pane_mut(1).set_content("ac");
    send(&mut bench, &keymap, [InputEvent::ctrl('r')]);

    let parser = emulate(&mut bench);
    // "a b c": unchanged, deleted, unchanged.
    assert!(row_text(&parser, MESSAGE_ROW).starts_with("a b c "));
    let deleted = parser.screen().cell(MESSAGE_ROW, 2).unwrap();
    assert_eq!(deleted.contents(), "b");
    assert_eq!(deleted.fgcolor(), vt100::Color::Rgb(255, 0, 0));
}

#[test]
fn test_narrow_terminal_rewraps_message() {
    let (mut bench, keymap) = hello_bench();
    send(
        &mut bench,
        &keymap,
        [InputEvent::Resize {
            width: 8,
            height: HEIGHT,
        }],
    );

    assert_eq!(bench.render().message_text, "Hello Go\nbro");
    assert_eq!(bench.render().message.len(), 2);
}

#[test]
fn test_event_loop_end_to_end() {
    let keymap = KeyMap::default();
    let mut bench = Workbench::default();
    bench.apply(Command::Resize {
        width: WIDTH,
        height: HEIGHT,
    });

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut script = InputEvent::typed("kitten");
    script.push(InputEvent::key(KeyCode::Tab));
    script.extend(InputEvent::typed("sitting"));
    script.push(InputEvent::ctrl('r'));
    script.push(InputEvent::key(KeyCode::Esc));
    for event in script {
        tx.send(event).unwrap();
    }

    let mut out = Vec::new();
    event_loop(&mut bench, &keymap, &rx, &mut out).unwrap();

    let ops = diffbench::diff::compute_diff("kitten", "sitting");
    assert_eq!(ops.edit_distance(), 5);
    assert_eq!(bench.diff().plain(), diffbench::diff::colorize(&ops, &Default::default()).plain());
    assert_eq!(bench.pane(0).content(), "kitten");
    assert_eq!(bench.pane(1).content(), "sitting");
    assert!(!out.is_empty());
}
