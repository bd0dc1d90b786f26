//! Mutable rectangular grid shared by all three engines.
//!
//! Cells are stored column by column. Bricolage removes whole columns while a
//! replay is running, and keeping columns as the outer sequence means an
//! excision is a single `Vec::remove` after which every lookup is made
//! against the new, narrower grid.
//!
//! Row 0 is the floor: gravity moves filled cells toward lower `y`.

/// A `width × height` grid addressed as `(x, y)` with `(0, 0)` at row 0 of
/// the level encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<T> {
    columns: Vec<Vec<T>>,
    height: usize,
}

impl<T: Copy> Board<T> {
    /// Build a board from cells listed row by row, left to right.
    ///
    /// `cells.len()` must equal `width * height`; callers validate this while
    /// parsing.
    pub fn from_rows(width: usize, height: usize, cells: &[T]) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        let columns = (0..width)
            .map(|x| (0..height).map(|y| cells[y * width + x]).collect())
            .collect();
        Self { columns, height }
    }

    /// Current width. Shrinks when columns are excised.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.columns.get(x).and_then(|col| col.get(y)).copied()
    }

    /// Overwrite one cell. Returns `false` if `(x, y)` is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        match self.columns.get_mut(x).and_then(|col| col.get_mut(y)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Apply `f` to one cell in place. Returns `false` if out of bounds.
    pub fn update(&mut self, x: usize, y: usize, f: impl FnOnce(T) -> T) -> bool {
        match self.columns.get_mut(x).and_then(|col| col.get_mut(y)) {
            Some(cell) => {
                *cell = f(*cell);
                true
            }
            None => false,
        }
    }

    pub fn column(&self, x: usize) -> Option<&[T]> {
        self.columns.get(x).map(Vec::as_slice)
    }

    /// Every cell as `(x, y, value)`, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .flat_map(|(x, col)| col.iter().enumerate().map(move |(y, &v)| (x, y, v)))
    }

    /// Cells in encoding order: one `Vec` per row, row 0 first.
    pub fn rows(&self) -> Vec<Vec<T>> {
        (0..self.height)
            .map(|y| self.columns.iter().map(|col| col[y]).collect())
            .collect()
    }
}

/// Grid operations that need a notion of "empty", which is `T::default()`.
impl<T: Copy + Default + PartialEq> Board<T> {
    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y).map_or(true, |v| v == T::default())
    }

    pub fn is_column_empty(&self, x: usize) -> bool {
        self.column(x)
            .map_or(true, |col| col.iter().all(|&v| v == T::default()))
    }

    /// True when no cell holds a value. A zero-width board is cleared.
    pub fn is_cleared(&self) -> bool {
        (0..self.width()).all(|x| self.is_column_empty(x))
    }

    pub fn count_filled(&self) -> usize {
        self.cells().filter(|&(_, _, v)| v != T::default()).count()
    }

    /// First filled cell in column-major order.
    pub fn first_filled(&self) -> Option<(usize, usize)> {
        self.cells()
            .find(|&(_, _, v)| v != T::default())
            .map(|(x, y, _)| (x, y))
    }

    /// Gravity for one column: filled cells slide toward row 0 keeping their
    /// order, and the rows they vacate become empty.
    pub fn compact_column(&mut self, x: usize) {
        let Some(col) = self.columns.get_mut(x) else {
            return;
        };
        let mut write = 0;
        for read in 0..col.len() {
            if col[read] != T::default() {
                col[write] = col[read];
                write += 1;
            }
        }
        for cell in &mut col[write..] {
            *cell = T::default();
        }
    }

    pub fn apply_gravity(&mut self) {
        for x in 0..self.width() {
            self.compact_column(x);
        }
    }

    /// Remove column `x`; every column to its right moves one place left.
    pub fn remove_column(&mut self, x: usize) -> Option<Vec<T>> {
        (x < self.columns.len()).then(|| self.columns.remove(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board<u8> {
        // row 0: 1 0 2
        // row 1: 0 3 0
        Board::from_rows(3, 2, &[1, 0, 2, 0, 3, 0])
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let board = sample();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert_eq!(board.get(0, 0), Some(1));
        assert_eq!(board.get(2, 0), Some(2));
        assert_eq!(board.get(1, 1), Some(3));
        assert_eq!(board.get(3, 0), None);
        assert_eq!(board.rows(), vec![vec![1, 0, 2], vec![0, 3, 0]]);
    }

    #[test]
    fn test_set_and_update() {
        let mut board = sample();
        assert!(board.set(1, 0, 7));
        assert!(board.update(1, 0, |v| v + 1));
        assert_eq!(board.get(1, 0), Some(8));
        assert!(!board.set(0, 2, 1));
        assert!(!board.update(5, 0, |v| v));
    }

    #[test]
    fn test_gravity_pulls_toward_row_zero() {
        let mut board = sample();
        board.apply_gravity();
        assert_eq!(board.column(1), Some(&[3, 0][..]));
        assert_eq!(board.column(0), Some(&[1, 0][..]));

        let mut tall = Board::from_rows(1, 4, &[0, 5, 0, 6]);
        tall.compact_column(0);
        assert_eq!(tall.column(0), Some(&[5, 6, 0, 0][..]));
    }

    #[test]
    fn test_remove_column_reindexes() {
        let mut board = sample();
        assert_eq!(board.remove_column(1), Some(vec![0, 3]));
        assert_eq!(board.width(), 2);
        assert_eq!(board.get(1, 0), Some(2));
        assert!(!board.in_bounds(2, 0));
        assert_eq!(board.remove_column(9), None);
    }

    #[test]
    fn test_emptiness() {
        let mut board = sample();
        assert!(!board.is_cleared());
        assert_eq!(board.count_filled(), 3);
        assert_eq!(board.first_filled(), Some((0, 0)));
        board.set(0, 0, 0);
        board.set(2, 0, 0);
        assert!(board.is_column_empty(0));
        assert_eq!(board.first_filled(), Some((1, 1)));
        board.set(1, 1, 0);
        assert!(board.is_cleared());

        let empty: Board<u8> = Board::from_rows(0, 3, &[]);
        assert!(empty.is_cleared());
    }
}
