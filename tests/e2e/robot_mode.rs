//! Robot-mode end-to-end tests.

use serde_json::json;

use crate::common::cli::CliRunner;
use crate::common::fixtures::Workspace;
use crate::common::{SOLVED, init_test_logging};

fn runner(ws: &Workspace) -> CliRunner {
    CliRunner::new()
        .with_env("RUST_LOG", "off")
        .with_working_dir(ws.path())
}

#[test]
fn robot_version_outputs_json() {
    init_test_logging();
    let result = CliRunner::new().run_robot(&["version"]);
    result.assert_success().assert_json_field_exists("/version");
}

#[test]
fn robot_classify_default_ranges() {
    init_test_logging();
    let ws = Workspace::new();
    let result = runner(&ws).run_robot(&["classify", "30", "200", "200"]);
    result
        .assert_success()
        .assert_json_field("/color", &json!("Y"))
        .assert_json_field("/name", &json!("yellow"))
        .assert_json_field("/calibrated", &json!(false));
}

#[test]
fn robot_classify_white_and_fallback() {
    init_test_logging();
    let ws = Workspace::new();
    runner(&ws)
        .run_robot(&["classify", "100", "10", "200"])
        .assert_success()
        .assert_json_field("/color", &json!("W"));
    runner(&ws)
        .run_robot(&["classify", "170", "200", "150"])
        .assert_success()
        .assert_json_field("/color", &json!("R"));
}

#[test]
fn robot_classify_uses_calibration_file() {
    init_test_logging();
    let ws = Workspace::new();
    ws.write_calibration(r#"{"R": {"h": [25, 35], "s": [100, 255], "v": [100, 255]}}"#);

    runner(&ws)
        .run_robot(&["classify", "30", "200", "200"])
        .assert_success()
        .assert_json_field("/color", &json!("R"))
        .assert_json_field("/calibrated", &json!(true));
}

#[test]
fn robot_malformed_calibration_is_an_error() {
    init_test_logging();
    let ws = Workspace::new();
    ws.write_calibration("{ not json");

    let result = runner(&ws).run_robot(&["classify", "30", "200", "200"]);
    result.assert_failure().assert_exit_code(1);
    let err = result.stderr_json();
    assert_eq!(err["error"], json!(true));
    assert!(err["message"].as_str().unwrap().contains("Calibration"));
    assert!(err["suggestion"].is_string());
}

#[test]
fn robot_calibration_lists_default_table() {
    init_test_logging();
    let ws = Workspace::new();
    runner(&ws)
        .run_robot(&["calibration"])
        .assert_success()
        .assert_json_field("/calibrated", &json!(false))
        .assert_json_array_len("/ranges", 5)
        .assert_json_field("/ranges/2/color", &json!("R"))
        .assert_json_field("/ranges/2/h", &json!([0, 7]));
}

#[test]
fn robot_status_idle_without_state() {
    init_test_logging();
    let ws = Workspace::new();
    runner(&ws)
        .run_robot(&["status"])
        .assert_success()
        .assert_json_field("/session/phase", &json!("idle"))
        .assert_json_field("/session/total_moves", &json!(0));
}

#[test]
fn robot_status_recovers_from_corrupt_state() {
    init_test_logging();
    let ws = Workspace::new();
    ws.write_state("{ this is not json");

    runner(&ws)
        .run_robot(&["status"])
        .assert_success()
        .assert_json_field("/session/phase", &json!("idle"));
}

#[test]
fn robot_status_reports_progress() {
    init_test_logging();
    let ws = Workspace::new();
    ws.write_state(r#"{"solution": "R2 U F'", "move_index": 1, "total_moves": 3, "expanded_moves": ["R2", "U", "F'"]}"#);

    runner(&ws)
        .run_robot(&["status"])
        .assert_success()
        .assert_json_field("/session/phase", &json!("solving"))
        .assert_json_field("/session/step", &json!(1))
        .assert_json_field("/session/turn_count", &json!(4))
        .assert_json_field("/session/next_move", &json!("U"));
}

#[test]
fn robot_reset_removes_state() {
    init_test_logging();
    let ws = Workspace::new();
    ws.write_state(r#"{"solution": "R", "move_index": 0, "total_moves": 1, "expanded_moves": ["R"]}"#);

    runner(&ws)
        .run_robot(&["reset"])
        .assert_success()
        .assert_json_field("/reset", &json!(true));
    assert!(!ws.state_file().exists());

    // Resetting again is fine
    runner(&ws).run_robot(&["reset"]).assert_success();
}

#[test]
fn robot_solve_already_solved_cube() {
    init_test_logging();
    let ws = Workspace::new();
    runner(&ws)
        .run_robot(&["solve", "--cube", SOLVED])
        .assert_success()
        .assert_json_field("/already_solved", &json!(true))
        .assert_json_field("/total_moves", &json!(0));
}

#[test]
fn robot_solve_rejects_bad_length() {
    init_test_logging();
    let ws = Workspace::new();
    let result = runner(&ws).run_robot(&["solve", "--cube", "UUUUU"]);
    result.assert_failure().assert_exit_code(1);
    let err = result.stderr_json();
    assert_eq!(
        err["message"],
        json!("Invalid cube description length: 5 (expected 54)")
    );
}

#[test]
fn robot_solve_without_scan_suggests_scanning() {
    init_test_logging();
    let ws = Workspace::new();
    let result = runner(&ws).run_robot(&["solve"]);
    result.assert_failure();
    let err = result.stderr_json();
    assert_eq!(err["recoverable"], json!(true));
    assert_eq!(err["suggestion"], json!("Run: cubeguide scan <DIR>"));
}

#[test]
fn robot_guide_without_session_fails() {
    init_test_logging();
    let ws = Workspace::new();
    let result = runner(&ws).run_robot(&["guide"]);
    result.assert_failure();
    let err = result.stderr_json();
    assert_eq!(err["message"], json!("No active solve session"));
}

#[test]
fn robot_scan_missing_directory() {
    init_test_logging();
    let ws = Workspace::new();
    let result = runner(&ws).run_robot(&["scan", "no-such-frames"]);
    result.assert_failure();
    let err = result.stderr_json();
    assert!(
        err["message"]
            .as_str()
            .unwrap()
            .starts_with("Frame source unavailable")
    );
}

#[test]
fn robot_compact_format_is_single_line() {
    init_test_logging();
    let ws = Workspace::new();
    let result = runner(&ws).run(&["--format", "json-compact", "calibration"]);
    result.assert_success();
    assert_eq!(result.stdout.trim_end().lines().count(), 1);
}
