//! Test fixture helpers for creating temporary test data.
//!
//! A [`Workspace`] is a temporary directory the CLI runs in. Its default
//! settings file disables the viewer so tests never touch the network.

use std::fs;
use std::path::{Path, PathBuf};

use cubeguide::color::Color;
use cubeguide::cube::Face;
use cubeguide::frame::mock::{SOLVED_SCHEME, render_face};
use tempfile::TempDir;

/// Face colors of a solved cube.
#[must_use]
pub fn solved_faces() -> Vec<(Face, [Color; 9])> {
    SOLVED_SCHEME
        .iter()
        .map(|&(face, color)| (face, [color; 9]))
        .collect()
}

/// Face colors of a solved cube after one clockwise U turn.
#[must_use]
pub fn one_turn_faces() -> Vec<(Face, [Color; 9])> {
    use Color::{Blue, Green, Orange, Red, White, Yellow};
    let top_row = |top: Color, rest: Color| [top, top, top, rest, rest, rest, rest, rest, rest];
    vec![
        (Face::U, [White; 9]),
        (Face::R, top_row(Blue, Red)),
        (Face::F, top_row(Red, Green)),
        (Face::D, [Yellow; 9]),
        (Face::L, top_row(Green, Orange)),
        (Face::B, top_row(Orange, Blue)),
    ]
}

/// Temporary working directory for CLI runs, cleaned up on drop.
pub struct Workspace {
    pub dir: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create a workspace with a settings file that disables the viewer.
    ///
    /// # Panics
    ///
    /// Panics if the directory or settings file cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let ws = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        ws.write_config("[viewer]\nenabled = false\n");
        ws
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.path().join("cube_state.json")
    }

    #[must_use]
    pub fn scan_file(&self) -> PathBuf {
        self.path().join("cube_scan.json")
    }

    #[must_use]
    pub fn calibration_file(&self) -> PathBuf {
        self.path().join("hsv_calibration.json")
    }

    /// Replace the workspace settings file.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.path().join("cubeguide.toml");
        fs::write(&path, content).expect("Failed to write settings");
        path
    }

    pub fn write_state(&self, content: &str) {
        fs::write(self.state_file(), content).expect("Failed to write state");
    }

    #[must_use]
    pub fn read_state(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.state_file()).expect("Failed to read state");
        serde_json::from_str(&content).expect("State file is not JSON")
    }

    pub fn write_calibration(&self, content: &str) {
        fs::write(self.calibration_file(), content).expect("Failed to write calibration");
    }

    /// Write one frame image per face into `frames/`.
    pub fn write_frames(&self, faces: &[(Face, [Color; 9])]) -> PathBuf {
        let dir = self.path().join("frames");
        fs::create_dir_all(&dir).expect("Failed to create frames dir");
        for (face, colors) in faces {
            let path = dir.join(format!("{face}.png"));
            render_face(*colors)
                .save(&path)
                .unwrap_or_else(|_| panic!("Failed to save frame at {path:?}"));
        }
        dir
    }

    /// Write an executable stub solver that prints `stdout` and exits 0,
    /// and point the settings file at it.
    #[cfg(unix)]
    pub fn install_solver(&self, stdout: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join("solver.sh");
        fs::write(&path, format!("#!/bin/sh\necho \"{stdout}\"\n")).expect("Failed to write solver");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make solver executable");
        self.write_config(&format!(
            "[viewer]\nenabled = false\n\n[solver]\ncommand = \"{}\"\n",
            path.display()
        ));
        path
    }
}
