//! Step-by-step guidance through a solution.
//!
//! Shows one move at a time and waits for the user to confirm it before
//! advancing the session. Progress is persisted after every confirmed move,
//! so aborting and running the guide again resumes at the same step.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal};

use console::{Key, Term};
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use crate::cube::Move;
use crate::error::{CubeError, Result};
use crate::output::Output;
use crate::state::{Phase, ProgressTracker};
use crate::viewer::{ViewerEvent, ViewerLink};

/// What the user asked for at a step prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCommand {
    /// The move was performed.
    Confirm,
    /// Stop guiding; progress so far is kept.
    Abort,
}

/// Source of step commands.
pub trait StepInput {
    /// Block until the user confirms or aborts.
    fn next_command(&mut self) -> Result<StepCommand>;
}

/// Reads commands from any line source.
///
/// An empty line, `y` or `yes` confirms; `q`, `quit` or end of input
/// aborts. Anything else is ignored.
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> StepInput for LineInput<R> {
    fn next_command(&mut self) -> Result<StepCommand> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                debug!("End of input");
                return Ok(StepCommand::Abort);
            }
            match line.trim().to_ascii_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(StepCommand::Confirm),
                "q" | "quit" => return Ok(StepCommand::Abort),
                other => trace!(input = other, "Ignoring input"),
            }
        }
    }
}

/// Terminal input: single keys on a TTY, lines otherwise.
///
/// Space or Enter confirms; Esc or `q` aborts.
#[derive(Debug)]
pub enum ConsoleInput {
    Keys(Term),
    Lines(LineInput<io::StdinLock<'static>>),
}

impl ConsoleInput {
    #[must_use]
    pub fn new() -> Self {
        let term = Term::stdout();
        if io::stdin().is_terminal() && term.is_term() {
            debug!("Using single-key input");
            Self::Keys(term)
        } else {
            debug!("Using line input");
            Self::Lines(LineInput::new(io::stdin().lock()))
        }
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl StepInput for ConsoleInput {
    fn next_command(&mut self) -> Result<StepCommand> {
        match self {
            Self::Keys(term) => loop {
                match term.read_key()? {
                    Key::Char(' ') | Key::Enter => return Ok(StepCommand::Confirm),
                    Key::Escape | Key::Char('q' | 'Q') => return Ok(StepCommand::Abort),
                    key => trace!(?key, "Ignoring key"),
                }
            },
            Self::Lines(lines) => lines.next_command(),
        }
    }
}

/// Replays a fixed list of commands, then aborts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    commands: VecDeque<StepCommand>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(commands: impl IntoIterator<Item = StepCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    /// Confirm `n` times.
    #[must_use]
    pub fn confirm_all(n: usize) -> Self {
        Self::new(std::iter::repeat_n(StepCommand::Confirm, n))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl StepInput for ScriptedInput {
    fn next_command(&mut self) -> Result<StepCommand> {
        Ok(self.commands.pop_front().unwrap_or(StepCommand::Abort))
    }
}

/// One guidance prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideStep {
    /// 1-based step number.
    pub step: usize,
    pub total: usize,
    /// Move token as the solver wrote it.
    #[serde(rename = "move")]
    pub token: String,
    pub instruction: String,
    /// Half turn: the user performs the quarter turn twice.
    pub twice: bool,
}

impl GuideStep {
    #[must_use]
    pub fn new(step: usize, total: usize, token: &str) -> Self {
        let parsed: Option<Move> = token.parse().ok();
        let instruction = parsed.map_or_else(|| format!("Perform {token}"), Move::instruction);
        Self {
            step,
            total,
            token: token.to_string(),
            instruction,
            twice: parsed.map_or_else(|| token.ends_with('2'), Move::is_double),
        }
    }
}

/// How a guidance run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuideOutcome {
    /// Every move confirmed.
    Completed { total: usize },
    /// Stopped by the user after `completed` of `total` moves.
    Aborted { completed: usize, total: usize },
}

/// Walk the user through the remaining moves of the tracked session.
///
/// # Errors
///
/// Returns [`CubeError::NoSession`] when no solution is assigned, and
/// propagates input and persistence failures.
#[instrument(skip_all)]
pub fn run_guide(
    tracker: &mut ProgressTracker,
    input: &mut dyn StepInput,
    output: &dyn Output,
    viewer: &mut ViewerLink,
) -> Result<GuideOutcome> {
    let state = tracker.state();
    if state.phase() == Phase::Idle {
        return Err(CubeError::NoSession);
    }
    let total = state.total_moves;
    if state.move_index > 0 && state.move_index < total {
        info!(step = state.move_index + 1, total, "Resuming session");
    }

    output.guide_start(&state.solution, state.move_index, total);
    viewer.notify(&ViewerEvent::Session {
        solution: &state.solution,
        total,
    });

    while let Some(token) = tracker.state().current_move().map(str::to_string) {
        let step = GuideStep::new(tracker.state().move_index + 1, total, &token);
        output.guide_step(&step);
        viewer.notify(&ViewerEvent::Move {
            step: step.step,
            total,
            mv: &token,
        });

        match input.next_command()? {
            StepCommand::Confirm => {
                tracker.advance()?;
                debug!(step = step.step, total, "Move confirmed");
            }
            StepCommand::Abort => {
                let completed = tracker.state().move_index;
                info!(completed, total, "Guidance aborted");
                let outcome = GuideOutcome::Aborted { completed, total };
                output.guide_finished(&outcome);
                return Ok(outcome);
            }
        }
    }

    viewer.notify(&ViewerEvent::Done);
    info!(total, "All moves completed");
    let outcome = GuideOutcome::Completed { total };
    output.guide_finished(&outcome);
    Ok(outcome)
}
