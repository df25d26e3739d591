//! Robot mode JSON output implementation.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, error, instrument, trace};

use crate::error::CubeError;
use crate::guide::{GuideOutcome, GuideStep};
use crate::solver::SolveReport;
use crate::state::SessionSummary;

use super::{CalibrationReport, ClassificationReport, Output, RobotFormat, ScanReport};

/// JSON output implementation for AI agents and scripting.
///
/// Results go to stdout; errors go to stderr. Guidance prompts are single
/// JSON lines so a driver can read them as a stream.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    /// Output any serializable data as JSON to stdout.
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        match json {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                println!("{json}");
            }
            Err(e) => error!(error = %e, "Failed to serialize output"),
        }
    }

    /// Output single-line JSON (for streaming events).
    fn output_json_line<T: Serialize>(&self, data: &T) {
        match serde_json::to_string(data) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(error = %e, "Failed to serialize event"),
        }
    }
}

impl Output for RobotOutput {
    fn success(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "success": true,
            "message": message
        }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &CubeError) {
        debug!(error = %error, "Robot: error");
        let body = serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        match serde_json::to_string_pretty(&body) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => eprintln!("{{\"error\":true,\"message\":\"{e}\"}}"),
        }
    }

    fn warning(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "warning": true,
            "message": message
        }));
    }

    fn info(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "info": true,
            "message": message
        }));
    }

    fn classification(&self, report: &ClassificationReport) {
        self.output_json(report);
    }

    fn calibration(&self, report: &CalibrationReport) {
        self.output_json(report);
    }

    #[instrument(skip_all, fields(faces = report.faces.len()))]
    fn scan(&self, report: &ScanReport) {
        debug!("Robot: scan");
        self.output_json(report);
    }

    #[instrument(skip_all)]
    fn solve(&self, report: &SolveReport) {
        debug!(total = report.total_moves, "Robot: solve");
        self.output_json(report);
    }

    fn guide_start(&self, solution: &str, step: usize, total: usize) {
        self.output_json_line(&serde_json::json!({
            "event": "session",
            "solution": solution,
            "completed": step,
            "total": total,
        }));
    }

    fn guide_step(&self, step: &GuideStep) {
        trace!(step = step.step, "Robot: guide_step");
        self.output_json_line(&serde_json::json!({
            "event": "step",
            "step": step,
        }));
    }

    fn guide_finished(&self, outcome: &GuideOutcome) {
        self.output_json_line(&serde_json::json!({
            "event": "finished",
            "result": outcome,
        }));
    }

    fn session_status(&self, summary: &SessionSummary, state_file: &Path) {
        self.output_json(&serde_json::json!({
            "state_file": state_file.display().to_string(),
            "session": summary,
        }));
    }

    fn session_reset(&self, state_file: &Path) {
        self.output_json(&serde_json::json!({
            "reset": true,
            "state_file": state_file.display().to_string(),
        }));
    }

    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        self.output_json(&serde_json::json!({
            "version": version,
            "git_sha": git_sha,
            "build_time": build_time
        }));
    }
}
