// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for drumz
//!
//! These tests drive the library from tablature text to printed output, and
//! the `drumz` binary from the command line to its exit status.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use drumz::kit::TextKit;
use drumz::sequencer::{read_tab, CancelToken, Player, TabErrorKind};
use drumz::timing::StepClock;
use drumz::{find_kit, Settings, KITS};
use tempfile::tempdir;

const ROCK_BEAT: &str = "\
HH|o.o.o.o.o.o.o.o.
SD|....o.......o...
BD|o.......o.o.....
";

fn printed(kit: &TextKit<Vec<u8>>) -> String {
    let out = kit.output();
    let bytes = out.borrow().clone();
    String::from_utf8(bytes).unwrap()
}

/// Run the binary with `args`, feeding `stdin`
fn drumz(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_drumz"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start drumz");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_text_kit_plays_rock_beat() {
    let kit = TextKit::new(Vec::new());
    let mut tab = read_tab(ROCK_BEAT.as_bytes(), &kit).unwrap();
    assert_eq!(tab.len(), 16);
    assert_eq!(tab.drums(), &["HH", "SD", "BD"]);

    let report = Player::new(StepClock::new(3000).unwrap(), false).play(&mut tab);
    assert_eq!(report.passes, 1);

    assert_eq!(
        printed(&kit),
        "HH+BD__HH__HH+SD__HH__HH+BD__HH+BD__HH+SD__HH__\n"
    );
}

#[test]
fn test_cancel_from_another_thread() {
    let kit = TextKit::new(Vec::new());
    let mut tab = read_tab("BD|o...\n".as_bytes(), &kit).unwrap();

    let token = CancelToken::new();
    let canceller = token.clone();
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(100));
        canceller.cancel();
    });

    // 10ms steps, repeating forever until cancelled
    let started = Instant::now();
    let report = Player::new(StepClock::new(1500).unwrap(), true)
        .with_cancel_token(token)
        .play(&mut tab);
    handle.join().unwrap();

    assert!(report.cancelled);
    assert!(report.passes >= 1);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(printed(&kit).starts_with("BD______\n"));
}

#[test]
fn test_errors_are_classified() {
    let kit = TextKit::new(Vec::new());
    let cases = [
        ("BD|\n", TabErrorKind::InvalidFormat),
        ("ZZ|o\n", TabErrorKind::UnknownDrum),
        ("BD|o\nBD|.\n", TabErrorKind::InvalidFormat),
        ("", TabErrorKind::InvalidFormat),
    ];
    for (text, kind) in cases {
        let err = read_tab(text.as_bytes(), &kit).unwrap_err();
        assert_eq!(err.kind(), kind, "for {:?}", text);
    }
}

#[test]
fn test_kit_table_builds_text_kit() {
    let entry = find_kit(KITS, "text").unwrap();
    let kit = (entry.build)(&Settings::default()).unwrap();
    let tab = read_tab(ROCK_BEAT.as_bytes(), kit.as_ref()).unwrap();
    assert_eq!(tab.len(), 16);
}

#[test]
fn test_cli_plays_stdin_once() {
    let output = drumz(&["--once", "--bpm", "3000"], "BD|o.\nSD|.o\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "BDSD\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("(standard input)"));
    assert!(stderr.contains("3000 bpm"));
}

#[test]
fn test_cli_plays_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("beat.tab");
    fs::write(&path, "HH|oo\n").unwrap();

    let output = drumz(&["--once", "-b", "3000", path.to_str().unwrap()], "");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "HHHH\n");
}

#[test]
fn test_cli_tempo_from_settings_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("drumz.toml");
    fs::write(&path, "bpm = 2400\n").unwrap();

    let output = drumz(&["--once", "-c", path.to_str().unwrap()], "SD|o\n");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("2400 bpm"));
}

#[test]
fn test_cli_rejects_zero_bpm() {
    let output = drumz(&["--once", "--bpm", "0"], "BD|o\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_rejects_unknown_kit() {
    let output = drumz(&["--once", "--kit", "electric"], "BD|o\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid kit: electric"));
    assert!(stderr.contains("text, acoustic"));
}

#[test]
fn test_cli_rejects_bad_tablature() {
    let output = drumz(&["--once"], "BD|o\nXX|o\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown drum"));
}

#[test]
fn test_cli_missing_file() {
    let output = drumz(&["--once", "/nonexistent/drumz/beat.tab"], "");
    assert!(!output.status.success());
}

#[test]
fn test_cli_lists_kits() {
    let output = drumz(&["--list-kits"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("text"));
    assert!(stdout.contains("acoustic"));
}
