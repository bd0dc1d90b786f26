//! End-to-end verification of the reference scenarios through the public
//! facade, one section per puzzle family.

use level_verifier::{verify, Family, Outcome, Verdict, VerifyOptions};

fn run(level: &str, attempt: &str) -> Verdict {
    verify(level, attempt, &VerifyOptions::default())
}

// ===========================================================================
// Modulo
// ===========================================================================

#[test]
fn modulo_two_singles_solve() {
    let verdict = run("x=2&y=1&depth=2&board=11&pieces=X|X", "00000100");
    assert_eq!(verdict.outcome, Outcome::Solved);
    assert_eq!(verdict.family, Some(Family::Modulo));
    assert_eq!(verdict.reason, "Solved");
}

#[test]
fn modulo_box_touching_far_corner_is_legal() {
    // 2x2 square on a 3x3 board placed at (1, 1) ends exactly at (3, 3).
    let level = "x=3&y=3&depth=2&board=000,011,011&pieces=XX,XX";
    assert_eq!(run(level, "0101").outcome, Outcome::Solved);

    let right = run(level, "0201");
    assert_eq!(right.outcome, Outcome::Illegal);
    assert_eq!(right.move_index, Some(0));
    assert_eq!(right.reason, "Illegal pos 2 1 at move 0");

    let down = run(level, "0102");
    assert_eq!(down.outcome, Outcome::Illegal);
    assert_eq!(down.move_index, Some(0));
}

#[test]
fn modulo_wrong_move_count_is_illegal() {
    let verdict = run("x=2&y=1&depth=2&board=11&pieces=X|X", "0000");
    assert_eq!(verdict.outcome, Outcome::Illegal);
    assert_eq!(verdict.move_index, None);
    assert_eq!(
        verdict.reason,
        "attempt has 1 moves but the level has 2 pieces"
    );
}

#[test]
fn modulo_overlapping_boxes_are_allowed() {
    // The domino and the first single both cover (0, 0).
    let level = "x=2&y=1&depth=3&board=11&pieces=XX|X|X";
    assert_eq!(run(level, "000000000100").outcome, Outcome::Solved);

    let verdict = run(level, "000000000000");
    assert_eq!(verdict.outcome, Outcome::NotSolved);
    assert_eq!(verdict.reason, "Not solved at 0 0");
}

// ===========================================================================
// Runaway
// ===========================================================================

#[test]
fn runaway_single_instruction_escapes() {
    let verdict = run("x=2&y=2&board=....&minpath=1&maxpath=1", "R");
    assert_eq!(verdict.outcome, Outcome::Solved);
    assert_eq!(verdict.family, Some(Family::Runaway));
    assert_eq!(verdict.steps, Some(2));
}

#[test]
fn runaway_crash_reports_step() {
    let verdict = run("x=3&y=3&board=.X.,...,...&minpath=1&maxpath=2", "rd");
    assert_eq!(verdict.outcome, Outcome::Illegal);
    assert_eq!(verdict.move_index, Some(0));
    assert_eq!(verdict.reason, "crash at 1 0 at move 0");
}

#[test]
fn runaway_path_length_out_of_range() {
    let verdict = run("x=2&y=2&board=....&minpath=1&maxpath=2", "RDR");
    assert_eq!(verdict.outcome, Outcome::Illegal);
    assert_eq!(verdict.reason, "path length 3 not in range 1 2");
}

#[test]
fn runaway_empty_attempt_is_out_of_range() {
    let verdict = run("x=2&y=2&board=....&minpath=1&maxpath=2", "");
    assert_eq!(verdict.outcome, Outcome::Illegal);
    assert_eq!(verdict.outcome.exit_code(), 1);
    assert_eq!(verdict.reason, "path length 0 not in range 1 2");
}

#[test]
fn runaway_bad_instruction_is_parse_error() {
    let verdict = run("x=2&y=2&board=....&minpath=1&maxpath=2", "RL");
    assert_eq!(verdict.outcome, Outcome::ParseError);
    assert_eq!(verdict.outcome.exit_code(), 2);
}

// ===========================================================================
// Bricolage
// ===========================================================================

#[test]
fn bricolage_full_row_clears() {
    let verdict = run("x=3&y=1&board=aaa", "0000");
    assert_eq!(verdict.outcome, Outcome::Solved);
    assert_eq!(verdict.family, Some(Family::Bricolage));
}

#[test]
fn bricolage_small_group_is_illegal() {
    let verdict = run("x=2&y=1&board=ab", "0000");
    assert_eq!(verdict.outcome, Outcome::Illegal);
    assert_eq!(verdict.move_index, Some(0));
    assert_eq!(verdict.reason, "group size 1 at 0 0 at move 0");
}

#[test]
fn bricolage_later_moves_are_not_evaluated() {
    // Move 1 is illegal; move 2 would be out of range but is never reached.
    let verdict = run("x=3&y=2&board=aaa,bcb", "00000000ffff");
    assert_eq!(verdict.outcome, Outcome::Illegal);
    assert_eq!(verdict.move_index, Some(1));
}

#[test]
fn bricolage_move_against_shrunken_width() {
    // After removing the a-column the board is two columns wide, so x=2 is
    // out of range even though the level was declared three wide.
    let verdict = run("x=3&y=3&board=bab,bab,bab", "01000200");
    assert_eq!(verdict.outcome, Outcome::Illegal);
    assert_eq!(verdict.move_index, Some(1));
    assert_eq!(verdict.reason, "Illegal pos 2 0 at move 1");

    let verdict = run("x=3&y=3&board=bab,bab,bab", "01000000");
    assert_eq!(verdict.outcome, Outcome::Solved);
}

#[test]
fn bricolage_digit_zero_conflicts_with_empty() {
    let verdict = run("x=3&y=1&board=a0a", "0000");
    assert_eq!(verdict.outcome, Outcome::ParseError);
}

// ===========================================================================
// Facade
// ===========================================================================

#[test]
fn oversized_dimensions_are_parse_errors() {
    for level in [
        "x=4294967296&y=4294967296&board=aa",
        "x=9223372036854775809&y=2&board=aa",
        "x=300&y=1&board=aa",
    ] {
        let verdict = run(level, "0000");
        assert_eq!(verdict.outcome, Outcome::ParseError, "{level}");
        assert_eq!(verdict.outcome.exit_code(), 2);
    }
}

#[test]
fn repeated_calls_are_identical() {
    let cases = [
        ("x=2&y=1&depth=2&board=11&pieces=X|X", "00000100"),
        ("x=2&y=2&board=....&minpath=1&maxpath=1", "R"),
        ("x=3&y=2&board=aab,abb", "0000"),
        ("x=2", "zz"),
    ];
    for (level, attempt) in cases {
        assert_eq!(run(level, attempt), run(level, attempt));
    }
}

#[test]
fn concurrent_calls_do_not_interfere() {
    let level = "x=4&y=2&board=abba,aabb";
    let expected = run(level, "00000000");
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| run(level, "00000000")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
