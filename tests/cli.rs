//! End-to-end tests of the `othello-solver` binary.
//!
//! The board is piped to standard input exactly as the HTTP facade does it,
//! and the exit status and both output streams are checked.

use std::io::Write;
use std::process::{Command, Output, Stdio};

const OPENING: &str =
    "........\n........\n........\n...ox...\n...xo...\n........\n........\n........\n";

fn solver(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_othello-solver"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start othello-solver");
    // The process may exit before reading everything (e.g. on a usage error).
    let _ = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes());
    child.wait_with_output().expect("failed to wait for othello-solver")
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

fn stderr(out: &Output) -> String {
    String::from_utf8(out.stderr.clone()).unwrap()
}

#[test]
fn test_move_prints_resulting_board() {
    let out = solver(&["move", "x", "2", "3"], OPENING);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "........\n........\n...x....\n...xx...\n...xo...\n........\n........\n........\n"
    );
}

#[test]
fn test_facade_joins_output_with_semicolons() {
    let out = solver(&["move", "o", "2", "4"], OPENING);
    assert!(out.status.success());
    let joined = stdout(&out).trim().split('\n').collect::<Vec<_>>().join(";");
    assert_eq!(
        joined,
        "........;........;....o...;...oo...;...xo...;........;........;........"
    );
}

#[test]
fn test_solve_prints_eight_lines() {
    let out = solver(&["solve", "x", "--num-try", "20", "--threads", "2"], OPENING);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 8);
    assert!(text.ends_with('\n') && !text.ends_with("\n\n"));
    assert!(text.lines().all(|l| l.len() == 8));
}

#[test]
fn test_solve_is_reproducible_with_seed() {
    let args = ["solve", "o", "--num-try", "50", "--seed", "1234"];
    let first = solver(&args, OPENING);
    let second = solver(&args, OPENING);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_verbose_goes_to_stderr() {
    let out = solver(&["solve", "x", "--num-try", "8", "-v"], OPENING);
    assert!(out.status.success());
    assert!(stderr(&out).contains("x plays"));
    assert_eq!(stdout(&out).lines().count(), 8);
}

#[test]
fn test_seven_lines_fails_without_output() {
    let seven: String = OPENING.lines().take(7).map(|l| format!("{l}\n")).collect();
    let out = solver(&["solve", "x"], &seven);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(stderr(&out).contains("expected 8 rows, found 7"));
}

#[test]
fn test_illegal_move_fails_without_output() {
    let out = solver(&["move", "x", "0", "0"], OPENING);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(stderr(&out).contains("illegal move (0, 0)"));
}

#[test]
fn test_invalid_player_fails() {
    let out = solver(&["move", "z", "2", "3"], OPENING);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!stderr(&out).is_empty());
}

#[test]
fn test_unknown_command_fails() {
    let out = solver(&["jump", "x"], OPENING);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    assert!(stderr(&out).contains("unknown command \"jump\""));
}

#[test]
fn test_finished_game_echoes_board() {
    let full = format!("{}\n", vec!["xxxxoooo"; 8].join("\n"));
    let out = solver(&["solve", "o"], &full);
    assert!(out.status.success());
    assert_eq!(stdout(&out), full);
    assert!(stderr(&out).contains("game over: draw 32-32"));
}
