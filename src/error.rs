//! Error types for cube scanning, solving and guidance.

use thiserror::Error;

use crate::cube::Face;

/// Primary error type for cubeguide operations.
#[derive(Error, Debug)]
pub enum CubeError {
    // Frame acquisition errors
    #[error("Frame source unavailable: {0}")]
    FrameSourceUnavailable(String),

    #[error("Failed to decode frame '{path}': {reason}")]
    FrameDecode { path: String, reason: String },

    // Scan errors
    #[error("Only scanned {scanned} faces, missing: {}", format_faces(.missing))]
    IncompleteScan { scanned: usize, missing: Vec<Face> },

    #[error("Invalid cube description length: {actual} (expected 54)")]
    InvalidDescriptionLength { actual: usize },

    #[error("No scan record found at {path}")]
    ScanRecordNotFound { path: String },

    // Solver errors
    #[error("Solver failed: {0}")]
    SolverFailed(String),

    #[error("Solver command '{command}' could not be started: {reason}")]
    SolverUnavailable { command: String, reason: String },

    // Session errors
    #[error("No active solve session")]
    NoSession,

    #[error("Failed to write session state to {path}: {reason}")]
    StatePersist { path: String, reason: String },

    // Calibration errors
    #[error("Calibration file parse error in {path}: {reason}")]
    CalibrationParse { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

fn format_faces(faces: &[Face]) -> String {
    faces
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CubeError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FrameSourceUnavailable(_)
                | Self::IncompleteScan { .. }
                | Self::InvalidDescriptionLength { .. }
                | Self::ScanRecordNotFound { .. }
                | Self::NoSession
                | Self::CalibrationParse { .. }
                | Self::ConfigNotFound { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::FrameSourceUnavailable(_) => {
                Some("Check the frame directory exists and contains one image per face")
            }
            Self::IncompleteScan { .. } => {
                Some("Capture an image of every face (U R F D L B) and scan again")
            }
            Self::ScanRecordNotFound { .. } => Some("Run: cubeguide scan <DIR>"),
            Self::SolverFailed(_) => {
                Some("The scan is probably wrong; improve lighting or calibration and re-scan")
            }
            Self::SolverUnavailable { .. } => {
                Some("Install a solver command or set [solver] command in cubeguide.toml")
            }
            Self::NoSession => Some("Run: cubeguide solve"),
            Self::CalibrationParse { .. } => {
                Some("Fix or delete the calibration file to use the default thresholds")
            }
            _ => None,
        }
    }
}

/// Convenience type alias for Results using CubeError.
pub type Result<T> = std::result::Result<T, CubeError>;
