//! Integration tests for sessions and the REPL
//!
//! The REPL is driven through a scripted editor.

use std::collections::VecDeque;
use std::fs;

use grantable_foundation::Result;
use grantable_runtime::{Action, LineEditor, ReadResult, Repl, Reply, Session};

/// Replays a fixed list of lines, then reports EOF.
struct ScriptedEditor {
    lines: VecDeque<String>,
    history: Vec<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(ToString::to_string).collect(),
            history: Vec::new(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self
            .lines
            .pop_front()
            .map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

fn repl() -> Repl<ScriptedEditor> {
    Repl::with_editor(ScriptedEditor::new(&[])).without_banner()
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        Reply::Quit => panic!("unexpected quit"),
    }
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn session_executes_groups() {
    let session = Session::new();
    let results = session.execute(Action::Grant, "($5, #vip), @speed").unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|(_, ok)| *ok));
    assert_eq!(session.backend().permission_nodes(session.recipient()), ["vip"]);
    assert!(session.execute(Action::Has, "(#vip, $5)").unwrap()[0].1);
}

#[test]
fn session_loads_reward_files() {
    let path = std::env::temp_dir().join(format!("grantable-rewards-{}.txt", std::process::id()));
    fs::write(&path, "$10\n\n#kit.starter\n(diamond:2, @speed)\n$oops\n").unwrap();

    let mut session = Session::new();
    let report = session.load_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(report.grantables.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(session.pending_rewards().len(), 3);
}

#[test]
fn missing_file_is_an_error() {
    let mut session = Session::new();
    let err = session
        .load_file(std::path::Path::new("/nonexistent/grantable/rewards.txt"))
        .unwrap_err();
    assert!(err.to_string().contains("cannot read"));
}

// =============================================================================
// REPL
// =============================================================================

#[test]
fn eval_prints_canonical_forms() {
    let mut repl = repl();
    let out = text(repl.eval("eco:5, perm:a.b, @SPEED III, wool:red:1").unwrap());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, [
        "currency   $5",
        "permission #a.b",
        "effect     @speed 3",
        "item       wool:1:1",
    ]);
}

#[test]
fn claim_grants_loaded_rewards() {
    let mut repl = repl();
    repl.session_mut().load_descriptor("test", "$3, #kit").unwrap();
    assert_eq!(text(repl.eval(":claim").unwrap()), "granted 2, failed 0");
    assert_eq!(text(repl.eval(":claim").unwrap()), "already rewarded");
    repl.eval(":reset").unwrap();
    assert_eq!(text(repl.eval(":claim").unwrap()), "nothing to claim");
}

#[test]
fn inventory_shows_items() {
    let mut repl = repl();
    repl.eval(":grant diamond:2, $4").unwrap();
    let out = text(repl.eval(":inv").unwrap());
    assert!(out.contains("balance:     4"));
    assert!(out.contains("items:       diamond:2"));
}

#[test]
fn run_joins_open_groups_and_stops_on_quit() {
    let editor = ScriptedEditor::new(&[":grant ($1,", "#vip)", ":quit", ":grant $100"]);
    let mut repl = Repl::with_editor(editor).without_banner();
    repl.run().unwrap();
    let session = repl.session();
    assert!((session.backend().balance(session.recipient()) - 1.0).abs() < f64::EPSILON);
}
