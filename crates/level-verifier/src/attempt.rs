//! Candidate attempts: hex offset pairs for Modulo and Bricolage, an
//! instruction string for Runaway.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::level::Family;

/// One `(x, y)` placement or selection, each coordinate a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x: u8,
    pub y: u8,
}

impl Move {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Runaway robot instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    Right,
    Down,
}

impl Instruction {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'R' => Some(Instruction::Right),
            'D' => Some(Instruction::Down),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Instruction::Right => 'R',
            Instruction::Down => 'D',
        }
    }

    /// Position after following this instruction from `(x, y)`.
    pub fn step(self, x: usize, y: usize) -> (usize, usize) {
        match self {
            Instruction::Right => (x + 1, y),
            Instruction::Down => (x, y + 1),
        }
    }
}

/// A Runaway instruction string, repeated forever during replay. Its length
/// is checked against the level's path range, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<Instruction>);

impl Path {
    /// Whitespace is ignored and letters are case-folded.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let instructions = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Instruction::from_char(c).ok_or(ParseError::Instruction(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(instructions))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Instruction for step `ip`, wrapping around the end of the string.
    /// `None` only for an empty path.
    pub fn at(&self, ip: usize) -> Option<Instruction> {
        ip.checked_rem(self.0.len()).map(|i| self.0[i])
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|i| write!(f, "{}", i.to_char()))
    }
}

/// Decode concatenated 4-hex-character groups into moves. Whitespace is
/// ignored.
pub fn parse_offsets(raw: &str) -> Result<Vec<Move>, ParseError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() % 4 != 0 {
        return Err(ParseError::AttemptLength(cleaned.len()));
    }

    let mut moves = Vec::with_capacity(cleaned.len() / 4);
    for (i, chunk) in cleaned.as_bytes().chunks(4).enumerate() {
        let mut pair = [0u8; 2];
        hex::decode_to_slice(chunk, &mut pair).map_err(|_| ParseError::AttemptHex {
            offset: i * 4,
            chunk: String::from_utf8_lossy(chunk).into_owned(),
        })?;
        moves.push(Move::new(pair[0], pair[1]));
    }
    Ok(moves)
}

/// Inverse of [`parse_offsets`], lowercase.
pub fn encode_offsets(moves: &[Move]) -> String {
    moves.iter().map(|m| hex::encode([m.x, m.y])).collect()
}

/// A decoded attempt, shaped for its puzzle family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Offsets(Vec<Move>),
    Path(Path),
}

impl Attempt {
    pub fn parse(family: Family, raw: &str) -> Result<Self, ParseError> {
        match family {
            Family::Modulo | Family::Bricolage => parse_offsets(raw).map(Attempt::Offsets),
            Family::Runaway => Path::parse(raw).map(Attempt::Path),
        }
    }

    /// Number of moves, or instructions for a path.
    pub fn len(&self) -> usize {
        match self {
            Attempt::Offsets(moves) => moves.len(),
            Attempt::Path(path) => path.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Offsets(moves) => f.write_str(&encode_offsets(moves)),
            Attempt::Path(path) => write!(f, "{path}"),
        }
    }
}
