//! Output mode abstraction for robot and human output.

use std::path::Path;

use serde::Serialize;

use crate::cli::Cli;
use crate::color::{Color, HsvRange, HsvSample};
use crate::cube::{Face, Sticker};
use crate::error::CubeError;
use crate::guide::{GuideOutcome, GuideStep};
use crate::solver::SolveReport;
use crate::state::SessionSummary;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

// === Report Types ===

/// Result of classifying one sample.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub sample: HsvSample,
    pub color: Color,
    pub name: &'static str,
    /// Whether a calibration table was in effect.
    pub calibrated: bool,
}

impl ClassificationReport {
    #[must_use]
    pub const fn new(sample: HsvSample, color: Color, calibrated: bool) -> Self {
        Self {
            sample,
            color,
            name: color.name(),
            calibrated,
        }
    }
}

/// One row of the active range table.
#[derive(Debug, Clone, Serialize)]
pub struct RangeEntry {
    pub color: Color,
    #[serde(flatten)]
    pub range: HsvRange,
}

/// The range table in effect and where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationReport {
    pub calibrated: bool,
    /// Calibration file, when one was loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub ranges: Vec<RangeEntry>,
}

impl CalibrationReport {
    #[must_use]
    pub fn new(source: Option<&Path>, ranges: Vec<(Color, HsvRange)>) -> Self {
        Self {
            calibrated: source.is_some(),
            source: source.map(|p| p.display().to_string()),
            ranges: ranges
                .into_iter()
                .map(|(color, range)| RangeEntry { color, range })
                .collect(),
        }
    }
}

/// Stickers read from one face.
#[derive(Debug, Clone, Serialize)]
pub struct FaceReport {
    pub face: Face,
    pub colors: String,
    pub stickers: Vec<Sticker>,
}

/// Result of a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub source: String,
    pub faces: Vec<FaceReport>,
    pub missing: Vec<Face>,
    /// Present when all six faces were scanned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub count_warnings: Vec<String>,
    /// Where the scan record was written.
    pub record: String,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for AI agents and scripting.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human,
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub const fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human
        }
    }

    /// Returns true if output should be JSON.
    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human => Box::new(HumanOutput::new()),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &CubeError);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    // Colors
    fn classification(&self, report: &ClassificationReport);
    fn calibration(&self, report: &CalibrationReport);

    // Scanning and solving
    fn scan(&self, report: &ScanReport);
    fn solve(&self, report: &SolveReport);

    // Guidance
    fn guide_start(&self, solution: &str, step: usize, total: usize);
    fn guide_step(&self, step: &GuideStep);
    fn guide_finished(&self, outcome: &GuideOutcome);

    // Session
    fn session_status(&self, summary: &SessionSummary, state_file: &Path);
    fn session_reset(&self, state_file: &Path);

    // Metadata
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>);
}
