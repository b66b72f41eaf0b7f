// Integration tests for the interactive loop (src/shell.rs).
//
//   - `0` exits without a run
//   - `4` (not selectable) and `abc` re-prompt without a run
//   - valid counts run in the order typed, then the prompt returns
//   - a closed input stream ends the loop like `0`

use cpfr::shell::{run_shell, Choice, parse_choice};
use std::io::Cursor;

fn drive(input: &str) -> (Vec<usize>, usize, String) {
    let mut calls = Vec::new();
    let mut out = Vec::new();
    let runs = run_shell(Cursor::new(input), &mut out, |t| calls.push(t)).unwrap();
    (calls, runs, String::from_utf8(out).unwrap())
}

#[test]
fn exit_immediately() {
    let (calls, runs, out) = drive("0\n");
    assert!(calls.is_empty());
    assert_eq!(runs, 0);
    assert_eq!(out.matches("Your choice: ").count(), 1);
}

#[test]
fn unlisted_number_reprompts() {
    let (calls, _, out) = drive("4\n0\n");
    assert!(calls.is_empty());
    assert_eq!(out.matches("Invalid option. Try again.").count(), 1);
    assert_eq!(out.matches("Your choice: ").count(), 2);
}

#[test]
fn text_reprompts() {
    let (calls, _, out) = drive("abc\n0\n");
    assert!(calls.is_empty());
    assert_eq!(out.matches("Invalid input. Try again.").count(), 1);
}

#[test]
fn every_option_runs() {
    let (calls, runs, _) = drive("1\n2\n3\n5\n6\n10\n15\n30\n0\n");
    assert_eq!(calls, [1, 2, 3, 5, 6, 10, 15, 30]);
    assert_eq!(runs, 8);
}

#[test]
fn whitespace_around_choice_is_accepted() {
    let (calls, _, _) = drive("  6  \r\n0\n");
    assert_eq!(calls, [6]);
}

#[test]
fn closed_input_ends_loop() {
    let (calls, runs, out) = drive("");
    assert!(calls.is_empty());
    assert_eq!(runs, 0);
    assert!(out.ends_with("Exiting.\n"));
}

#[test]
fn lines_after_exit_are_ignored() {
    let (calls, _, _) = drive("5\n0\n10\n");
    assert_eq!(calls, [5]);
}

#[test]
fn choice_classification() {
    assert_eq!(parse_choice("15"), Choice::Run(15));
    assert_eq!(parse_choice("31"), Choice::InvalidOption(31));
    assert_eq!(parse_choice("1.5"), Choice::NotANumber);
}
