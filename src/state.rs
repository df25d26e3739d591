//! Solve session tracking.
//!
//! Tracks the solution being worked through and how far the user has got,
//! and persists it after every change so an interrupted session resumes
//! where it stopped.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, trace, warn};

use crate::cube::moves::{tokenize, turn_count};
use crate::cube;
use crate::error::{CubeError, Result};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No solution assigned.
    Idle,
    /// Solution assigned, moves remaining.
    Solving,
    /// Every move confirmed.
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Solving => "solving",
            Self::Done => "done",
        })
    }
}

/// Persisted solve session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// Solution as returned by the solver.
    pub solution: String,
    /// Index of the next move to perform.
    pub move_index: usize,
    /// Number of move tokens.
    pub total_moves: usize,
    /// One entry per move token; doubled moves stay a single `X2` entry.
    pub expanded_moves: Vec<String>,
}

impl SessionState {
    /// Create a new empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `solution`, replacing any previous one.
    pub fn assign(&mut self, solution: &str) {
        self.solution = solution.to_string();
        self.expanded_moves = expand_moves(solution);
        self.total_moves = self.expanded_moves.len();
        self.move_index = 0;
        debug!(solution, total = self.total_moves, "Solution assigned");
    }

    /// Move to the next step. No-op once every move is done.
    pub fn advance(&mut self) {
        if self.move_index < self.total_moves {
            self.move_index += 1;
            trace!(index = self.move_index, total = self.total_moves, "Advanced");
        }
    }

    /// Physical turn count of the solution (`X2` counts as two).
    #[must_use]
    pub fn move_count(&self) -> usize {
        turn_count(&tokenize(&self.solution))
    }

    /// True if `description` is a solved cube. Does not touch the session.
    #[must_use]
    pub fn is_complete(description: &str) -> bool {
        cube::is_solved(description)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.total_moves == 0 && self.solution.trim().is_empty() {
            Phase::Idle
        } else if self.move_index >= self.total_moves {
            Phase::Done
        } else {
            Phase::Solving
        }
    }

    /// The move token to perform next, if any.
    #[must_use]
    pub fn current_move(&self) -> Option<&str> {
        if self.move_index >= self.total_moves {
            return None;
        }
        self.expanded_moves.get(self.move_index).map(String::as_str)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total_moves.saturating_sub(self.move_index)
    }

    /// Clear all tracked state.
    pub fn reset(&mut self) {
        info!("Session state reset");
        *self = Self::default();
    }

    /// Get a summary of the tracked state.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            phase: self.phase(),
            solution: self.solution.clone(),
            step: self.move_index,
            total_moves: self.total_moves,
            turn_count: self.move_count(),
            remaining: self.remaining(),
            next_move: self.current_move().map(str::to_string),
        }
    }
}

/// Builds the per-step move list. Doubled moves are kept as one `X2` step;
/// the guide tells the user to do them twice.
fn expand_moves(solution: &str) -> Vec<String> {
    tokenize(solution)
}

/// Summary of session state for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub phase: Phase,
    pub solution: String,
    /// Moves confirmed so far.
    pub step: usize,
    pub total_moves: usize,
    pub turn_count: usize,
    pub remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_move: Option<String>,
}

/// Reasons a persisted session could not be read back.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no session file at {0}")]
    Missing(PathBuf),

    #[error("failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("corrupt session file {0}: {1}")]
    Corrupt(PathBuf, #[source] serde_json::Error),
}

/// JSON file holding the session record.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> std::result::Result<SessionState, LoadError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::Missing(self.path.clone())
            } else {
                LoadError::Read(self.path.clone(), e)
            }
        })?;
        serde_json::from_str(&content).map_err(|e| LoadError::Corrupt(self.path.clone(), e))
    }

    /// Best-effort resume: any failure to read the stored session starts an
    /// empty one. A damaged state file must never block startup.
    #[must_use]
    pub fn load_or_default(&self) -> SessionState {
        match self.load() {
            Ok(state) => {
                info!(
                    index = state.move_index,
                    total = state.total_moves,
                    "Restored session"
                );
                state
            }
            Err(LoadError::Missing(_)) => {
                debug!("No stored session, starting fresh");
                SessionState::default()
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session");
                SessionState::default()
            }
        }
    }

    /// Overwrite the stored session with `state`.
    #[instrument(skip(self, state), fields(path = %self.path.display(), index = state.move_index))]
    pub fn save(&self, state: &SessionState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json).map_err(|e| CubeError::StatePersist {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        trace!("Session persisted");
        Ok(())
    }

    /// Delete the stored session. A missing file is fine.
    pub fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CubeError::Io(e)),
        }
    }
}

/// A session bound to its store: every state change is persisted.
#[derive(Debug)]
pub struct ProgressTracker {
    state: SessionState,
    store: SessionStore,
}

impl ProgressTracker {
    /// Restore the session from `store`, or start empty.
    #[must_use]
    pub fn restore(store: SessionStore) -> Self {
        let state = store.load_or_default();
        Self { state, store }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Assign a new solution and persist.
    pub fn assign(&mut self, solution: &str) -> Result<()> {
        self.state.assign(solution);
        self.persist()
    }

    /// Advance one step and persist.
    pub fn advance(&mut self) -> Result<()> {
        self.state.advance();
        self.persist()
    }

    pub fn persist(&self) -> Result<()> {
        self.store.save(&self.state)
    }

    /// Clear the session and delete the stored record.
    pub fn reset(&mut self) -> Result<()> {
        self.state.reset();
        self.store.remove()
    }
}
