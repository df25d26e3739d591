//! External solver boundary.
//!
//! The solving algorithm itself lives outside this crate. [`CommandSolver`]
//! runs an external program with the 54-character description as its last
//! argument and reads the move string from stdout.

use std::process::Command;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::cube::{CountWarning, CubeDescription};
use crate::error::{CubeError, Result};
use crate::state::ProgressTracker;

/// Default solver executable.
pub const DEFAULT_SOLVER_COMMAND: &str = "kociemba";

/// Solutions longer than this usually mean a bad scan.
pub const DEFAULT_MAX_EXPECTED_MOVES: usize = 25;

/// Turns a cube description into a space-separated move sequence.
pub trait Solver {
    /// Solve `description`.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::SolverFailed`] if the description is rejected
    /// and [`CubeError::SolverUnavailable`] if the solver cannot be reached.
    fn solve(&self, description: &CubeDescription) -> Result<String>;
}

/// Solver backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandSolver {
    command: String,
    args: Vec<String>,
}

impl CommandSolver {
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Default for CommandSolver {
    fn default() -> Self {
        Self::new(DEFAULT_SOLVER_COMMAND, Vec::new())
    }
}

impl Solver for CommandSolver {
    #[instrument(skip_all, fields(command = %self.command))]
    fn solve(&self, description: &CubeDescription) -> Result<String> {
        debug!(args = ?self.args, "Running solver");
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(description.as_str())
            .output()
            .map_err(|e| CubeError::SolverUnavailable {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            let detail = if stderr.is_empty() { stdout } else { stderr };
            return Err(CubeError::SolverFailed(format!("{} ({detail})", output.status)));
        }
        if stdout.is_empty() {
            return Err(CubeError::SolverFailed("solver produced no output".to_string()));
        }
        // Some solvers report bad input on stdout with a zero exit status
        if stdout.starts_with("Error") {
            return Err(CubeError::SolverFailed(stdout));
        }

        debug!(solution = %stdout, "Solver finished");
        Ok(stdout)
    }
}

/// Result of solving a description and starting a session.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub description: String,
    pub already_solved: bool,
    pub solution: String,
    /// Move tokens, one guidance step each.
    pub total_moves: usize,
    /// Physical turns (`X2` counts twice).
    pub move_count: usize,
    pub count_warnings: Vec<String>,
    /// Set when `move_count` exceeds the expected maximum.
    pub suspicious_length: bool,
}

/// Solve `description` and start a new session on `tracker`.
///
/// A solved cube invokes neither the solver nor the tracker, so any
/// session in progress is left as it was.
/// Color count imbalances are reported but do not stop the solve; the
/// solver is the final judge of validity.
#[instrument(skip_all, fields(description = %description))]
pub fn solve_description(
    solver: &dyn Solver,
    description: &CubeDescription,
    tracker: &mut ProgressTracker,
    max_expected_moves: usize,
) -> Result<SolveReport> {
    let count_warnings: Vec<CountWarning> = description.count_warnings();
    for w in &count_warnings {
        warn!(face = %w.face, count = w.count, "Unbalanced facelet count");
    }
    let count_warnings = count_warnings.iter().map(ToString::to_string).collect();

    if description.is_solved() {
        info!("Cube already solved");
        return Ok(SolveReport {
            description: description.to_string(),
            already_solved: true,
            solution: String::new(),
            total_moves: 0,
            move_count: 0,
            count_warnings,
            suspicious_length: false,
        });
    }

    let solution = solver.solve(description)?;
    tracker.assign(&solution)?;

    let state = tracker.state();
    let move_count = state.move_count();
    let suspicious_length = move_count > max_expected_moves;
    if suspicious_length {
        warn!(move_count, max_expected_moves, "Solution longer than expected");
    }
    info!(total = state.total_moves, move_count, "Session started");

    Ok(SolveReport {
        description: description.to_string(),
        already_solved: false,
        solution,
        total_moves: state.total_moves,
        move_count,
        count_warnings,
        suspicious_length,
    })
}
