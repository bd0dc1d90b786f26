//! Runaway: a robot starts at `(0, 0)` and follows its instruction string
//! forever, wrapping around at the end. It wins by walking off the right or
//! bottom edge and loses by stepping onto a blocked cell.
//!
//! A run that does neither revisits some `(position, ip mod len)` state,
//! and from then on repeats exactly, so the engine records every state and
//! stops at the first repeat.

use std::collections::HashSet;

use crate::attempt::Path;
use crate::board::Board;
use crate::error::{IllegalMove, NotSolved, ShapeMismatch, VerifyError};
use crate::level::{RunawayLevel, Terrain};

/// Result status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Left the board through the right or bottom edge
    Escaped,
    /// Hit a blocked cell at the given position
    Crashed { x: usize, y: usize },
    /// Returned to an already visited state
    Cycle,
    /// Exceeded the caller's step cap
    StepLimit,
}

/// Result of running a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub status: RunStatus,
    /// Instructions executed, counting the one that escaped
    pub steps: usize,
    /// Last position the robot committed to
    pub position: (usize, usize),
}

/// Outcome of a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    Escaped,
    Crashed { x: usize, y: usize },
    Cycle,
}

pub struct RunawayEngine<'a> {
    board: Board<Terrain>,
    path: &'a Path,
    position: (usize, usize),
    ip: usize,
    seen: HashSet<(usize, usize, usize)>,
}

impl<'a> RunawayEngine<'a> {
    pub fn new(level: &RunawayLevel, path: &'a Path) -> Self {
        Self {
            board: level.board.clone(),
            path,
            position: (0, 0),
            ip: 0,
            seen: HashSet::new(),
        }
    }

    /// Number of instructions committed so far.
    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Upper bound on distinct states, and so on steps before a repeat.
    pub fn state_bound(&self) -> usize {
        self.board
            .width()
            .saturating_mul(self.board.height())
            .saturating_mul(self.path.len())
    }

    fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.board.get(x, y) == Some(Terrain::Blocked)
    }

    /// Execute the next instruction.
    pub fn step(&mut self) -> Step {
        let (x, y) = self.position;
        // An empty path never moves the robot.
        let Some(instruction) = self.path.at(self.ip) else {
            return Step::Cycle;
        };
        if !self.seen.insert((x, y, self.ip % self.path.len())) {
            return Step::Cycle;
        }

        let (nx, ny) = instruction.step(x, y);
        if nx >= self.board.width() || ny >= self.board.height() {
            return Step::Escaped;
        }
        if self.is_blocked(nx, ny) {
            return Step::Crashed { x: nx, y: ny };
        }

        log::trace!("runaway step {}: ({x}, {y}) -> ({nx}, {ny})", self.ip);
        self.position = (nx, ny);
        self.ip += 1;
        Step::Moved
    }
}

/// Run `path` on `level` until the robot escapes, crashes or loops.
///
/// `max_steps` caps the number of instructions; without it the state bound
/// `width * height * path.len()` guarantees termination on its own.
pub fn execute(level: &RunawayLevel, path: &Path, max_steps: Option<usize>) -> RunResult {
    let mut engine = RunawayEngine::new(level, path);

    let result = |engine: &RunawayEngine<'_>, status, steps| RunResult {
        status,
        steps,
        position: engine.position(),
    };

    if engine.is_blocked(0, 0) {
        return result(&engine, RunStatus::Crashed { x: 0, y: 0 }, 0);
    }

    loop {
        if max_steps.is_some_and(|cap| engine.ip() >= cap) {
            return result(&engine, RunStatus::StepLimit, engine.ip());
        }
        match engine.step() {
            Step::Moved => {}
            Step::Escaped => return result(&engine, RunStatus::Escaped, engine.ip() + 1),
            Step::Crashed { x, y } => {
                return result(&engine, RunStatus::Crashed { x, y }, engine.ip())
            }
            Step::Cycle => return result(&engine, RunStatus::Cycle, engine.ip()),
        }
    }
}

/// Check the path length against the level, then run it. Returns the number
/// of steps it took to escape.
pub fn replay(
    level: &RunawayLevel,
    path: &Path,
    max_steps: Option<usize>,
) -> Result<usize, VerifyError> {
    if !(level.minpath..=level.maxpath).contains(&path.len()) {
        return Err(ShapeMismatch::PathLength {
            len: path.len(),
            min: level.minpath,
            max: level.maxpath,
        }
        .into());
    }

    let run = execute(level, path, max_steps);
    log::debug!("runaway run finished: {:?} after {} steps", run.status, run.steps);
    match run.status {
        RunStatus::Escaped => Ok(run.steps),
        RunStatus::Crashed { x, y } => {
            Err(VerifyError::at_move(run.steps, IllegalMove::Crash { x, y }))
        }
        RunStatus::Cycle => Err(NotSolved::InfiniteLoop { steps: run.steps }.into()),
        RunStatus::StepLimit => Err(NotSolved::StepLimit { steps: run.steps }.into()),
    }
}
