//! Modulo: every piece is stamped onto the board once, in order, adding one
//! (mod `depth`) to each cell it covers. Solved when every cell is zero.

use crate::attempt::Move;
use crate::board::Board;
use crate::error::{IllegalMove, NotSolved, ShapeMismatch, VerifyError};
use crate::level::{ModuloLevel, Piece};

pub struct ModuloEngine {
    board: Board<u8>,
    depth: u8,
}

impl ModuloEngine {
    pub fn new(level: &ModuloLevel) -> Self {
        Self {
            board: level.board.clone(),
            depth: level.depth,
        }
    }

    /// Stamp `piece` with its bounding box's top-left corner at `at`.
    ///
    /// Bounds are checked against this placement alone; overlapping earlier
    /// pieces is fine.
    pub fn place(&mut self, piece: &Piece, at: Move) -> Result<(), IllegalMove> {
        let (x, y) = (at.x as usize, at.y as usize);
        if x + piece.width() > self.board.width() || y + piece.height() > self.board.height() {
            return Err(IllegalMove::PieceOutOfBounds { x, y });
        }
        let depth = u16::from(self.depth);
        for &(dx, dy) in piece.cells() {
            self.board
                .update(x + dx, y + dy, |v| ((u16::from(v) + 1) % depth) as u8);
        }
        Ok(())
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_cleared()
    }

    pub fn board(&self) -> &Board<u8> {
        &self.board
    }
}

/// Replay one placement per piece. The move count is checked before any
/// piece is placed.
pub fn replay(level: &ModuloLevel, moves: &[Move]) -> Result<(), VerifyError> {
    if moves.len() != level.pieces.len() {
        return Err(ShapeMismatch::MoveCount {
            expected: level.pieces.len(),
            actual: moves.len(),
        }
        .into());
    }

    let mut engine = ModuloEngine::new(level);
    for (index, (piece, &at)) in level.pieces.iter().zip(moves).enumerate() {
        engine.place(piece, at).map_err(|reason| {
            log::debug!("modulo piece {index} rejected: {reason}");
            VerifyError::at_move(index, reason)
        })?;
    }

    match engine.board().first_filled() {
        None => Ok(()),
        Some((x, y)) => Err(NotSolved::Remaining { x, y }.into()),
    }
}
