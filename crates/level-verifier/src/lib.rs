//! Reference verifier for Modulo, Runaway and Bricolage levels.
//!
//! Given a level string and a candidate attempt, the verifier replays the
//! attempt under the puzzle's exact rules and reports whether it solves the
//! level. It is the ground truth external solvers are scored against, so
//! every call is deterministic and bounded.

pub mod attempt;
pub mod board;
pub mod engine;
pub mod error;
pub mod level;
pub mod query;
pub mod verdict;
pub mod verify;

// Re-export main types
pub use attempt::{encode_offsets, parse_offsets, Attempt, Instruction, Move, Path};
pub use board::Board;
pub use engine::{replay, Replay};
pub use error::{IllegalMove, NotSolved, ParseError, ShapeMismatch, VerifyError};
pub use level::{
    Block, BricolageLevel, Color, Family, Level, ModuloLevel, Piece, RunawayLevel, Terrain,
};
pub use verdict::{Outcome, Verdict};
pub use verify::{verify, verify_level, VerifyOptions};
