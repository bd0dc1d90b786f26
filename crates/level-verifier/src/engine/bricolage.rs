//! Bricolage: pick a group of three or more same-colored, 4-connected
//! blocks to remove it. Blocks above fall toward row 0, then any empty
//! column with blocks on both sides is cut out and everything right of it
//! slides left. Solved when the board is empty.

use smallvec::SmallVec;

use crate::attempt::Move;
use crate::board::Board;
use crate::error::{IllegalMove, NotSolved, VerifyError};
use crate::level::{Block, BricolageLevel, Color};

/// Smallest removable group.
pub const MIN_GROUP: usize = 3;

pub struct BricolageEngine {
    board: Board<Block>,
}

impl BricolageEngine {
    pub fn new(level: &BricolageLevel) -> Self {
        Self {
            board: level.board.clone(),
        }
    }

    pub fn from_board(board: Board<Block>) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board<Block> {
        &self.board
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_cleared()
    }

    /// Remove the group containing `at`, then settle the board. `at` is read
    /// against the current board, after every earlier excision. Returns the
    /// number of blocks removed.
    pub fn select(&mut self, at: Move) -> Result<usize, IllegalMove> {
        let (x, y) = (at.x as usize, at.y as usize);
        if !self.board.in_bounds(x, y) {
            return Err(IllegalMove::OutOfBounds { x, y });
        }
        let Some(color) = self.board.get(x, y).flatten() else {
            return Err(IllegalMove::EmptyCell { x, y });
        };

        let group = self.group_at(x, y, color);
        if group.len() < MIN_GROUP {
            return Err(IllegalMove::GroupTooSmall {
                x,
                y,
                size: group.len(),
            });
        }

        for &(gx, gy) in &group {
            self.board.set(gx, gy, None);
        }
        self.settle();
        Ok(group.len())
    }

    /// Gravity followed by column excision.
    pub fn settle(&mut self) {
        self.board.apply_gravity();
        let removed = self.excise_columns();
        if removed > 0 {
            log::debug!(
                "excised {removed} empty columns, width now {}",
                self.board.width()
            );
        }
    }

    /// The 4-connected component of `color` containing `(x, y)`.
    fn group_at(&self, x: usize, y: usize, color: Color) -> Vec<(usize, usize)> {
        let (width, height) = (self.board.width(), self.board.height());
        let mut visited = vec![false; width * height];
        let mut stack: SmallVec<[(usize, usize); 32]> = SmallVec::new();
        let mut group = Vec::new();

        visited[x * height + y] = true;
        stack.push((x, y));
        while let Some((cx, cy)) = stack.pop() {
            group.push((cx, cy));
            let neighbors = [
                (cx.wrapping_sub(1), cy),
                (cx + 1, cy),
                (cx, cy.wrapping_sub(1)),
                (cx, cy + 1),
            ];
            for (nx, ny) in neighbors {
                if !self.board.in_bounds(nx, ny) || visited[nx * height + ny] {
                    continue;
                }
                if self.board.get(nx, ny) == Some(Some(color)) {
                    visited[nx * height + ny] = true;
                    stack.push((nx, ny));
                }
            }
        }
        group
    }

    /// Cut out every empty column that has a filled column somewhere to its
    /// left and somewhere to its right.
    fn excise_columns(&mut self) -> usize {
        let mut removed = 0;
        let mut x = 1;
        while x < self.board.width() {
            if !self.board.is_column_empty(x) {
                x += 1;
                continue;
            }
            if (0..x).all(|c| self.board.is_column_empty(c)) {
                x += 1;
                continue;
            }
            if (x + 1..self.board.width()).all(|c| self.board.is_column_empty(c)) {
                break;
            }
            self.board.remove_column(x);
            removed += 1;
            // The column that slid into `x` is checked on the next pass.
        }
        removed
    }
}

/// Replay every selection in order. Stops at the first illegal move.
pub fn replay(level: &BricolageLevel, moves: &[Move]) -> Result<(), VerifyError> {
    let mut engine = BricolageEngine::new(level);
    for (index, &at) in moves.iter().enumerate() {
        let removed = engine.select(at).map_err(|reason| {
            log::debug!("bricolage move {index} rejected: {reason}");
            VerifyError::at_move(index, reason)
        })?;
        log::trace!("bricolage move {index} removed {removed} blocks");
    }

    match engine.board().first_filled() {
        None => Ok(()),
        Some((x, y)) => Err(NotSolved::Remaining { x, y }.into()),
    }
}
