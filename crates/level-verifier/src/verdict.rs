//! The structured answer returned for every verification call.

use serde::{Deserialize, Serialize};

use crate::engine::Replay;
use crate::error::VerifyError;
use crate::level::Family;

/// Outcome tag of a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Solved,
    NotSolved,
    Illegal,
    ParseError,
}

impl Outcome {
    /// Process exit code for the CLI: 0 solved, 1 rejected, 2 malformed.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Solved => 0,
            Outcome::NotSolved | Outcome::Illegal => 1,
            Outcome::ParseError => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub outcome: Outcome,
    /// Family the level was verified as, if the level parsed that far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<Family>,
    /// Zero-based index of the first offending move
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_index: Option<usize>,
    pub reason: String,
    /// Moves applied, or Runaway instructions executed, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

impl Verdict {
    pub fn solved(family: Family, replay: Replay) -> Self {
        Self {
            outcome: Outcome::Solved,
            family: Some(family),
            move_index: None,
            reason: "Solved".to_string(),
            steps: Some(replay.steps),
        }
    }

    pub fn from_error(family: Option<Family>, err: &VerifyError) -> Self {
        let outcome = match err {
            VerifyError::Parse(_) => Outcome::ParseError,
            VerifyError::ShapeMismatch(_)
            | VerifyError::OutOfBounds { .. }
            | VerifyError::Illegal { .. } => Outcome::Illegal,
            VerifyError::NotSolved(_) => Outcome::NotSolved,
        };
        Self {
            outcome,
            family,
            move_index: err.move_index(),
            reason: err.to_string(),
            steps: None,
        }
    }

    pub fn from_result(family: Family, result: Result<Replay, VerifyError>) -> Self {
        match result {
            Ok(replay) => Verdict::solved(family, replay),
            Err(err) => Verdict::from_error(Some(family), &err),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IllegalMove, NotSolved, ParseError, ShapeMismatch};

    #[test]
    fn test_outcome_mapping() {
        let cases = [
            (VerifyError::from(ParseError::NoPieces), Outcome::ParseError, None),
            (
                VerifyError::from(ShapeMismatch::MoveCount { expected: 2, actual: 1 }),
                Outcome::Illegal,
                None,
            ),
            (
                VerifyError::at_move(3, IllegalMove::OutOfBounds { x: 5, y: 0 }),
                Outcome::Illegal,
                Some(3),
            ),
            (
                VerifyError::at_move(0, IllegalMove::GroupTooSmall { x: 0, y: 0, size: 1 }),
                Outcome::Illegal,
                Some(0),
            ),
            (
                VerifyError::from(NotSolved::InfiniteLoop { steps: 9 }),
                Outcome::NotSolved,
                None,
            ),
        ];
        for (err, outcome, index) in cases {
            let verdict = Verdict::from_error(Some(Family::Bricolage), &err);
            assert_eq!(verdict.outcome, outcome, "{err}");
            assert_eq!(verdict.move_index, index, "{err}");
            assert_eq!(verdict.reason, err.to_string());
        }
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(Outcome::Solved.exit_code(), 0);
        assert_ne!(Outcome::NotSolved.exit_code(), Outcome::ParseError.exit_code());
        assert_ne!(Outcome::Illegal.exit_code(), 0);
    }

    #[test]
    fn test_json_shape() {
        let verdict = Verdict::from_error(
            Some(Family::Bricolage),
            &VerifyError::at_move(0, IllegalMove::EmptyCell { x: 1, y: 2 }),
        );
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["outcome"], "illegal");
        assert_eq!(json["family"], "bricolage");
        assert_eq!(json["moveIndex"], 0);
        assert_eq!(json["reason"], "bad start 1 2 at move 0");
        assert!(json.get("steps").is_none());

        let solved = Verdict::solved(Family::Modulo, Replay { steps: 2 });
        let json = serde_json::to_value(&solved).unwrap();
        assert_eq!(json["outcome"], "solved");
        assert_eq!(json["steps"], 2);
        assert!(json.get("moveIndex").is_none());
    }
}
