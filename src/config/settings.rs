//! Application settings loaded from TOML or YAML.
//!
//! Every key is optional; missing keys take their defaults. Relative paths
//! in a settings file are resolved against the file's directory.
//!
//! # Example TOML
//!
//! ```toml
//! state_file = "~/.local/share/cubeguide/state.json"
//! calibration_file = "hsv_calibration.json"
//! max_expected_moves = 25
//!
//! [viewer]
//! enabled = true
//! address = "127.0.0.1:9999"
//!
//! [solver]
//! command = "kociemba"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use super::path::PathResolver;
use crate::error::{CubeError, Result};
use crate::frame::DEFAULT_FACE_PATTERN;
use crate::solver::{DEFAULT_MAX_EXPECTED_MOVES, DEFAULT_SOLVER_COMMAND};
use crate::viewer::DEFAULT_VIEWER_ADDRESS;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "cubeguide.toml";

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting config format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Companion viewer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub enabled: bool,
    pub address: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            address: DEFAULT_VIEWER_ADDRESS.to_string(),
        }
    }
}

/// External solver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub command: String,
    /// Arguments placed before the cube description.
    pub args: Vec<String>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_SOLVER_COMMAND.to_string(),
            args: Vec::new(),
        }
    }
}

/// All runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub state_file: PathBuf,
    pub calibration_file: PathBuf,
    pub scan_file: PathBuf,
    pub face_pattern: String,
    pub max_expected_moves: usize,
    pub viewer: ViewerSettings,
    pub solver: SolverSettings,
    /// File the settings came from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("cube_state.json"),
            calibration_file: PathBuf::from("hsv_calibration.json"),
            scan_file: PathBuf::from("cube_scan.json"),
            face_pattern: DEFAULT_FACE_PATTERN.to_string(),
            max_expected_moves: DEFAULT_MAX_EXPECTED_MOVES,
            viewer: ViewerSettings::default(),
            solver: SolverSettings::default(),
            source: None,
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from [`DEFAULT_CONFIG_FILE`] in the
    /// working directory if it exists, or fall back to defaults.
    ///
    /// # Errors
    ///
    /// An explicit file that does not exist is an error; a missing default
    /// file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            return Self::load(default);
        }
        debug!("No settings file, using defaults");
        Ok(Self::default())
    }

    /// Load settings from a file. The format follows the extension.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_extension(path).ok_or_else(|| {
            CubeError::ConfigParse(format!(
                "Unknown config format for '{}': expected .yaml, .yml, or .toml",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CubeError::ConfigNotFound {
                    path: path.display().to_string(),
                }
            } else {
                CubeError::Io(e)
            }
        })?;
        debug!(bytes = content.len(), ?format, "Read settings file");

        let mut settings = Self::from_str_with_format(&content, format)?;
        settings.resolve_paths(&PathResolver::new(path)?)?;
        settings.source = Some(path.to_path_buf());
        info!("Settings loaded");
        Ok(settings)
    }

    /// Parse and validate settings content. Paths are left as written.
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self> {
        let settings: Self = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| CubeError::ConfigParse(format!("YAML: {e}")))?,
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| CubeError::ConfigParse(format!("TOML: {e}")))?
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    fn resolve_paths(&mut self, resolver: &PathResolver) -> Result<()> {
        self.state_file = resolver.resolve(&self.state_file)?;
        self.calibration_file = resolver.resolve(&self.calibration_file)?;
        self.scan_file = resolver.resolve(&self.scan_file)?;
        Ok(())
    }

    /// Check value constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.face_pattern.contains("{face}") {
            return Err(CubeError::ConfigInvalid(format!(
                "face_pattern '{}' must contain {{face}}",
                self.face_pattern
            )));
        }
        if self.solver.command.trim().is_empty() {
            return Err(CubeError::ConfigInvalid("solver.command is empty".to_string()));
        }
        if self.max_expected_moves == 0 {
            return Err(CubeError::ConfigInvalid(
                "max_expected_moves must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(
        mut self,
        state_file: Option<PathBuf>,
        calibration_file: Option<PathBuf>,
        no_viewer: bool,
    ) -> Self {
        if let Some(path) = state_file {
            self.state_file = path;
        }
        if let Some(path) = calibration_file {
            self.calibration_file = path;
        }
        if no_viewer {
            self.viewer.enabled = false;
        }
        self
    }
}
