//! End-to-end scenarios across the decoder, document and controller

use hueconsole_ansi::{DecoderSettings, EscapeDecoder, Hue, Intensity};
use hueconsole_console::{
    handler_fn, parse_line, Console, ConsoleOptions, Facade, Key, Transcript, WriteOptions,
};
use hueconsole_core::{Color, Run, RunColor};
use std::cell::RefCell;
use std::rc::Rc;

fn console(prompt: &str) -> Console<Transcript> {
    let options = ConsoleOptions {
        prompt: prompt.to_string(),
        ..ConsoleOptions::default()
    };
    Console::new(options, Transcript::new())
}

/// Escape sequence split over two messages
#[test]
fn test_ansi_across_chunk_boundary() {
    let mut decoder = EscapeDecoder::default();

    let first = decoder.feed("hi\u{1b}[3");
    assert_eq!(first, vec![Run::new(RunColor::Default, "hi")]);
    assert_eq!(decoder.pending(), "\u{1b}[3");

    let second = decoder.feed("1mred");
    assert_eq!(
        second,
        vec![Run::new(Hue::Red.color(Intensity::Dim), "red")]
    );
    assert_eq!(decoder.pending(), "");
}

#[test]
fn test_hex_directive() {
    let mut decoder = EscapeDecoder::default();
    let runs = decoder.feed("a0xff0000b");
    assert_eq!(
        runs,
        vec![
            Run::new(RunColor::Default, "a"),
            Run::new(Color::rgb(255, 0, 0), "b"),
        ]
    );
}

#[test]
fn test_history_navigation() {
    let mut console = console("> ");
    console.type_text("one");
    console.press(Key::Enter);
    console.type_text("two");
    console.press(Key::Enter);
    console.type_text("thr");

    console.press(Key::Up);
    assert_eq!(console.user_input(), "two");
    console.press(Key::Up);
    assert_eq!(console.user_input(), "one");

    let bells = console.target().bells();
    console.press(Key::Up);
    assert_eq!(console.user_input(), "one");
    assert_eq!(console.target().bells(), bells + 1);

    console.press(Key::Down);
    assert_eq!(console.user_input(), "two");
    console.press(Key::Down);
    assert_eq!(console.user_input(), "thr");

    console.press(Key::Down);
    assert_eq!(console.user_input(), "thr");
    assert_eq!(console.target().bells(), bells + 2);
}

#[test]
fn test_tokenization() {
    assert_eq!(parse_line(r#"a "b c" d"#), vec!["a", "b c", "d"]);
    assert_eq!(parse_line(r#""a b""#), vec!["a b", ""]);
}

#[test]
fn test_caret_guard() {
    let mut console = console("");
    console.write("x", WriteOptions::default());
    console.type_text("y");
    assert_eq!(console.document().text(), "xy");

    console.press(Key::Backspace);
    assert_eq!(console.document().text(), "x");
    console.press(Key::Backspace);
    assert_eq!(console.document().text(), "x");
    assert_eq!(console.document().committed_text(), "x");
    assert_eq!(console.document().caret(), 1);
}

#[test]
fn test_clear_screen_mid_session() {
    let mut console = console("> ");
    console.write("\u{1b}[1;33mbanner", WriteOptions::line());
    console.type_text("ls");
    console.press(Key::Enter);
    console.type_text("half typed");

    console.clear_screen();
    console.type_text("q");
    console.press(Key::Enter);

    assert_eq!(console.document().committed_text(), "> q\n> ");
    assert_eq!(console.user_input(), "");
    assert_eq!(console.target().text(), "> q\n> ");
    assert_eq!(&*console.history(), ["ls".to_string(), "q".to_string()]);
}

#[test]
fn test_transcript_colors_follow_decoder() {
    let mut console = console("> ");
    console.write("plain \u{1b}[1;31malert", WriteOptions::line());

    let runs = console.target().runs();
    assert_eq!(
        runs,
        vec![
            (Color::GREEN, "> plain ".to_string()),
            (Hue::Red.color(Intensity::Bright), "alert\n".to_string()),
        ]
    );
}

#[test]
fn test_dispatch_and_facade_round_trip() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut options = ConsoleOptions {
        prompt: "$ ".to_string(),
        ..ConsoleOptions::default()
    };

    let log = Rc::clone(&seen);
    options.commands.insert(
        "echo",
        handler_fn(move |console, _line, args| {
            log.borrow_mut().push(args.to_vec());
            console.println(&args[1..].join(" "));
        }),
    );
    options.commands.set_unrecognized(handler_fn(|console, line, _args| {
        console.write(
            &format!("unknown: {}", line),
            WriteOptions {
                newline: true,
                ..WriteOptions::colored(Color::rgb(255, 0, 0))
            },
        );
    }));

    let mut console = Console::new(options, Transcript::new());
    console.type_text(r#"ECHO "hello there" friend"#);
    console.press(Key::Enter);
    console.type_text("nope");
    console.press(Key::Enter);

    assert_eq!(
        seen.borrow().as_slice(),
        [vec![
            "ECHO".to_string(),
            "hello there".to_string(),
            "friend".to_string()
        ]]
    );
    assert_eq!(
        console.document().text(),
        "$ ECHO \"hello there\" friend\nhello there friend\n$ nope\nunknown: nope\n$ "
    );
    assert_eq!(Facade::prompt(&console), "$ ");
}

#[test]
fn test_disabled_decoding_writes_literal_text() {
    let mut console = console("");
    console.set_decoder_settings(DecoderSettings {
        enable_ansi: false,
        enable_hex: false,
        reset_color_after_each_msg: true,
    });
    console.write("\u{1b}[31m0xff0000", WriteOptions::default());
    assert_eq!(console.document().text(), "\u{1b}[31m0xff0000");
}

#[tokio::test]
async fn test_line_reader_sees_submissions() {
    let mut console = console("> ");
    let mut reader = console.subscribe();

    console.type_text("42");
    console.press(Key::Enter);
    console.type_text("  spaced out  ");
    console.press(Key::Enter);

    assert_eq!(reader.next_int().await.unwrap(), 42);
    assert_eq!(reader.next_line().await.unwrap(), "spaced out");
}
