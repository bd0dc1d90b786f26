//! Verification facade: level and attempt text in, a [`Verdict`] out.
//!
//! Calls are pure. Each one parses its own inputs and replays on its own
//! board, so any number may run concurrently.

use crate::attempt::Attempt;
use crate::engine;
use crate::error::VerifyError;
use crate::level::{Family, Level};
use crate::verdict::Verdict;

/// Options for a verification call
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Verify as this family instead of inferring it from the level fields
    pub family: Option<Family>,
    /// Cap on Runaway instructions. `None` relies on the state bound alone.
    pub max_steps: Option<usize>,
}

/// Parse both inputs and replay the attempt. Never fails: malformed input
/// comes back as a [`crate::verdict::Outcome::ParseError`] verdict.
pub fn verify(level_raw: &str, attempt_raw: &str, options: &VerifyOptions) -> Verdict {
    match Level::parse(level_raw, options.family) {
        Ok(level) => verify_level(&level, attempt_raw, options),
        Err(err) => {
            log::debug!("level rejected: {err}");
            Verdict::from_error(options.family, &VerifyError::from(err))
        }
    }
}

/// Replay an attempt against an already parsed level.
pub fn verify_level(level: &Level, attempt_raw: &str, options: &VerifyOptions) -> Verdict {
    let family = level.family();
    let result = Attempt::parse(family, attempt_raw)
        .map_err(VerifyError::from)
        .and_then(|attempt| engine::replay(level, &attempt, options.max_steps));
    let verdict = Verdict::from_result(family, result);
    log::debug!(
        "{family} level {}: {:?} ({})",
        level.id().map_or_else(|| "-".to_string(), |id| id.to_string()),
        verdict.outcome,
        verdict.reason
    );
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Outcome;

    fn run(level: &str, attempt: &str) -> Verdict {
        verify(level, attempt, &VerifyOptions::default())
    }

    #[test]
    fn test_parse_errors_short_circuit() {
        let verdict = run("x=2&y=1&board=a", "0000");
        assert_eq!(verdict.outcome, Outcome::ParseError);
        assert_eq!(verdict.family, None);

        let verdict = run("x=3&y=1&board=aaa", "00");
        assert_eq!(verdict.outcome, Outcome::ParseError);
        assert_eq!(verdict.family, Some(Family::Bricolage));
        assert_eq!(verdict.move_index, None);
    }

    #[test]
    fn test_forced_family() {
        let options = VerifyOptions {
            family: Some(Family::Runaway),
            ..Default::default()
        };
        // Width 3 gives the default range [2, 2].
        let verdict = verify("x=3&y=1&board=...", "RR", &options);
        assert_eq!(verdict.outcome, Outcome::Solved);
        assert_eq!(verdict.steps, Some(3));

        // Same text without the override is a Bricolage level of empties.
        let verdict = run("x=3&y=1&board=...", "RR");
        assert_eq!(verdict.outcome, Outcome::ParseError);
    }

    #[test]
    fn test_runaway_step_cap() {
        let options = VerifyOptions {
            max_steps: Some(1),
            ..Default::default()
        };
        let verdict = verify("x=3&y=1&board=...&minpath=1&maxpath=1", "R", &options);
        assert_eq!(verdict.outcome, Outcome::NotSolved);
        assert_eq!(verdict.reason, "step limit of 1 reached");
    }
}
