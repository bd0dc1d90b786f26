//! Error taxonomy for level parsing, attempt decoding and replay.
//!
//! Every failure the verifier can hit is one of these values. The facade in
//! [`crate::verify`] folds them into a [`crate::verdict::Verdict`], so nothing
//! here ever escapes to a caller as a panic.

use thiserror::Error;

/// Malformed level or attempt text. Always raised before any simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("level must include {0}")]
    MissingField(&'static str),

    #[error("invalid {field} in level string: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0} must be positive")]
    Zero(&'static str),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("board length {actual} does not match x*y ({expected})")]
    BoardLength { expected: usize, actual: usize },

    #[error("invalid board character {ch:?} at cell {index}")]
    BoardCell { ch: char, index: usize },

    #[error("invalid piece character {ch:?} in piece {piece}")]
    PieceChar { ch: char, piece: usize },

    #[error("piece {piece} has rows of unequal length")]
    RaggedPiece { piece: usize },

    #[error("piece {piece} has no squares")]
    EmptyPiece { piece: usize },

    #[error("level contains no pieces")]
    NoPieces,

    #[error("minpath {minpath} and maxpath {maxpath} do not form a valid range")]
    PathRange { minpath: usize, maxpath: usize },

    #[error("unknown game {0:?}; expected modulo, runaway or bricolage")]
    UnknownGame(String),

    #[error("attempt length {0} is not a multiple of 4 hex chars")]
    AttemptLength(usize),

    #[error("invalid hex in attempt at offset {offset}: {chunk:?}")]
    AttemptHex { offset: usize, chunk: String },

    #[error("invalid instruction {0:?}; expected only R or D")]
    Instruction(char),

    #[error("attempt does not match a {0} level")]
    AttemptKind(&'static str),
}

/// Why a single move was rejected by a family's legality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// A Modulo piece's bounding box leaves the board.
    #[error("Illegal pos {x} {y}")]
    PieceOutOfBounds { x: usize, y: usize },

    /// A Bricolage move pointed outside the current, possibly narrowed, board.
    #[error("Illegal pos {x} {y}")]
    OutOfBounds { x: usize, y: usize },

    /// The Runaway robot stepped onto a blocked cell.
    #[error("crash at {x} {y}")]
    Crash { x: usize, y: usize },

    /// A Bricolage move selected an empty cell.
    #[error("bad start {x} {y}")]
    EmptyCell { x: usize, y: usize },

    /// A Bricolage move selected a group smaller than three blocks.
    #[error("group size {size} at {x} {y}")]
    GroupTooSmall { x: usize, y: usize, size: usize },
}

/// The attempt does not have the shape the level requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    #[error("attempt has {actual} moves but the level has {expected} pieces")]
    MoveCount { expected: usize, actual: usize },

    #[error("path length {len} not in range {min} {max}")]
    PathLength { len: usize, min: usize, max: usize },
}

/// Every legal move was played but the level is not solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotSolved {
    #[error("Not solved at {x} {y}")]
    Remaining { x: usize, y: usize },

    #[error("infinite loop after {steps} steps")]
    InfiniteLoop { steps: usize },

    #[error("step limit of {steps} reached")]
    StepLimit { steps: usize },
}

/// Top-level failure of one verification call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),

    #[error("Illegal pos {x} {y} at move {index}")]
    OutOfBounds { index: usize, x: usize, y: usize },

    #[error("{reason} at move {index}")]
    Illegal { index: usize, reason: IllegalMove },

    #[error(transparent)]
    NotSolved(#[from] NotSolved),
}

impl VerifyError {
    /// Attach the index of the move that `reason` rejected.
    pub fn at_move(index: usize, reason: IllegalMove) -> Self {
        match reason {
            IllegalMove::OutOfBounds { x, y } => VerifyError::OutOfBounds { index, x, y },
            reason => VerifyError::Illegal { index, reason },
        }
    }

    /// Zero-based index of the offending move, when one move is to blame.
    pub fn move_index(&self) -> Option<usize> {
        match self {
            VerifyError::OutOfBounds { index, .. } | VerifyError::Illegal { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_reference_wording() {
        let err = VerifyError::Illegal {
            index: 1,
            reason: IllegalMove::PieceOutOfBounds { x: 3, y: 0 },
        };
        assert_eq!(err.to_string(), "Illegal pos 3 0 at move 1");

        let err = VerifyError::from(ShapeMismatch::PathLength { len: 5, min: 2, max: 3 });
        assert_eq!(err.to_string(), "path length 5 not in range 2 3");

        let err = VerifyError::from(NotSolved::Remaining { x: 0, y: 2 });
        assert_eq!(err.to_string(), "Not solved at 0 2");
    }

    #[test]
    fn test_move_index() {
        let err = VerifyError::at_move(4, IllegalMove::OutOfBounds { x: 9, y: 9 });
        assert_eq!(err, VerifyError::OutOfBounds { index: 4, x: 9, y: 9 });
        assert_eq!(err.move_index(), Some(4));

        let err = VerifyError::at_move(2, IllegalMove::Crash { x: 1, y: 0 });
        assert_eq!(err.to_string(), "crash at 1 0 at move 2");
        assert_eq!(err.move_index(), Some(2));
        assert_eq!(VerifyError::from(ParseError::NoPieces).move_index(), None);
    }
}
