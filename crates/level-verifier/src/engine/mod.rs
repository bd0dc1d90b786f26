//! Replay engines, one per puzzle family.
//!
//! Each engine owns a fresh copy of the level's board, applies moves in
//! order and stops at the first illegal one. [`replay`] picks the engine
//! from the level's family tag.

pub mod bricolage;
pub mod modulo;
pub mod runaway;

use crate::attempt::Attempt;
use crate::error::{ParseError, VerifyError};
use crate::level::Level;

/// What a successful replay did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replay {
    /// Moves applied, or instructions executed for Runaway.
    pub steps: usize,
}

/// Replay `attempt` against `level` until it is solved or rejected.
///
/// `max_steps` only applies to Runaway; the other families are bounded by
/// the attempt length.
pub fn replay(
    level: &Level,
    attempt: &Attempt,
    max_steps: Option<usize>,
) -> Result<Replay, VerifyError> {
    let steps = match (level, attempt) {
        (Level::Modulo(level), Attempt::Offsets(moves)) => {
            modulo::replay(level, moves)?;
            moves.len()
        }
        (Level::Runaway(level), Attempt::Path(path)) => runaway::replay(level, path, max_steps)?,
        (Level::Bricolage(level), Attempt::Offsets(moves)) => {
            bricolage::replay(level, moves)?;
            moves.len()
        }
        (level, _) => return Err(ParseError::AttemptKind(level.family().name()).into()),
    };
    Ok(Replay { steps })
}
