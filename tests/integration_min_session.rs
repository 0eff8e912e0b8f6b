// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_types_replays_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve path to compiled binary (debug build during tests)
    let bin = assert_cmd::cargo::cargo_bin("typetest");
    let log = std::env::temp_dir().join("typetest-pty.log");
    let cmd = format!("{} -s 15 --log-file {}", bin.display(), log.display());

    // Spawn the TUI inside a pseudo terminal
    let mut p = spawn(cmd)?;

    // Give the app a moment to initialize the terminal/alternate screen; the
    // keyboard enhancement probe goes unanswered in a bare PTY and times out
    std::thread::sleep(Duration::from_millis(2500));

    // A few keystrokes start the countdown
    p.send("the")?;
    std::thread::sleep(Duration::from_millis(1200));

    // Tab replays the test
    p.send("\t")?;
    std::thread::sleep(Duration::from_millis(200));

    // Send ESC to exit from the app
    p.send("\x1b")?; // ESC

    // Wait for the program to terminate cleanly
    p.expect(Eof)?;
    Ok(())
}
