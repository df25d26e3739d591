//! Integration tests for step-by-step guidance.
//!
//! Tests drive the guide with scripted input over a persisted session and
//! check progress, resume, and what the viewer receives.

use std::io::{BufRead, BufReader, Cursor};
use std::net::TcpListener;

use cubeguide::error::CubeError;
use cubeguide::guide::{GuideOutcome, LineInput, ScriptedInput, StepCommand, run_guide};
use cubeguide::output::{RobotFormat, RobotOutput};
use cubeguide::state::{Phase, ProgressTracker, SessionStore};
use cubeguide::viewer::ViewerLink;
use tempfile::TempDir;

fn tracker_with(dir: &TempDir, solution: &str) -> ProgressTracker {
    let mut tracker = ProgressTracker::restore(SessionStore::new(dir.path().join("cube_state.json")));
    tracker.assign(solution).unwrap();
    tracker
}

fn reopen(dir: &TempDir) -> ProgressTracker {
    ProgressTracker::restore(SessionStore::new(dir.path().join("cube_state.json")))
}

fn output() -> RobotOutput {
    RobotOutput::new(RobotFormat::JsonCompact)
}

#[test]
fn test_guide_completes_all_moves() {
    let dir = TempDir::new().unwrap();
    let mut tracker = tracker_with(&dir, "R U2 F'");
    let mut input = ScriptedInput::confirm_all(3);

    let outcome = run_guide(&mut tracker, &mut input, &output(), &mut ViewerLink::local_only()).unwrap();
    assert_eq!(outcome, GuideOutcome::Completed { total: 3 });
    assert_eq!(input.remaining(), 0);
    assert_eq!(reopen(&dir).state().phase(), Phase::Done);
}

#[test]
fn test_abort_keeps_progress_and_resumes() {
    let dir = TempDir::new().unwrap();
    let mut tracker = tracker_with(&dir, "R U R' U'");
    let mut input = ScriptedInput::new([StepCommand::Confirm, StepCommand::Abort]);

    let outcome = run_guide(&mut tracker, &mut input, &output(), &mut ViewerLink::local_only()).unwrap();
    assert_eq!(outcome, GuideOutcome::Aborted { completed: 1, total: 4 });

    // A fresh process picks up at step 2
    let mut resumed = reopen(&dir);
    assert_eq!(resumed.state().move_index, 1);
    assert_eq!(resumed.state().current_move(), Some("U"));

    let outcome = run_guide(
        &mut resumed,
        &mut ScriptedInput::confirm_all(3),
        &output(),
        &mut ViewerLink::local_only(),
    )
    .unwrap();
    assert_eq!(outcome, GuideOutcome::Completed { total: 4 });
}

#[test]
fn test_guide_needs_session() {
    let dir = TempDir::new().unwrap();
    let mut tracker = reopen(&dir);
    let result = run_guide(
        &mut tracker,
        &mut ScriptedInput::confirm_all(1),
        &output(),
        &mut ViewerLink::local_only(),
    );
    assert!(matches!(result, Err(CubeError::NoSession)));
}

#[test]
fn test_finished_session_completes_immediately() {
    let dir = TempDir::new().unwrap();
    let mut tracker = tracker_with(&dir, "R");
    tracker.advance().unwrap();

    let mut input = ScriptedInput::confirm_all(2);
    let outcome = run_guide(&mut tracker, &mut input, &output(), &mut ViewerLink::local_only()).unwrap();
    assert_eq!(outcome, GuideOutcome::Completed { total: 1 });
    // No prompt was shown
    assert_eq!(input.remaining(), 2);
}

#[test]
fn test_line_input_drives_guide() {
    let dir = TempDir::new().unwrap();
    let mut tracker = tracker_with(&dir, "F2 B D");
    let mut input = LineInput::new(Cursor::new("\nhuh?\nyes\nquit\n"));

    let outcome = run_guide(&mut tracker, &mut input, &output(), &mut ViewerLink::local_only()).unwrap();
    assert_eq!(outcome, GuideOutcome::Aborted { completed: 2, total: 3 });
}

#[test]
fn test_viewer_receives_session_events() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let dir = TempDir::new().unwrap();
    let mut tracker = tracker_with(&dir, "R U2");
    let mut viewer = ViewerLink::connect(&address, true);
    assert!(viewer.is_connected());
    let (socket, _) = listener.accept().unwrap();

    run_guide(&mut tracker, &mut ScriptedInput::confirm_all(2), &output(), &mut viewer).unwrap();
    drop(viewer);

    let events: Vec<serde_json::Value> = BufReader::new(socket)
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["event"], "session");
    assert_eq!(events[0]["solution"], "R U2");
    assert_eq!(events[1]["move"], "R");
    assert_eq!(events[2]["step"], 2);
    assert_eq!(events[2]["move"], "U2");
    assert_eq!(events[3]["event"], "done");
}

#[test]
fn test_unreachable_viewer_is_ignored() {
    // Bind then drop to get a port nobody listens on
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };

    let dir = TempDir::new().unwrap();
    let mut tracker = tracker_with(&dir, "L");
    let mut viewer = ViewerLink::connect(&address, true);
    assert!(!viewer.is_connected());

    let outcome = run_guide(&mut tracker, &mut ScriptedInput::confirm_all(1), &output(), &mut viewer).unwrap();
    assert_eq!(outcome, GuideOutcome::Completed { total: 1 });
}
