//! The [`n` queens puzzle](https://en.wikipedia.org/wiki/Eight_queens_puzzle)
//!  is the problem of placing `n` chess queens on an `n`×`n` chessboard so that
//! no two queens threaten each other.
//!
//! Each square is a row of the matrix. Every rank and every file must hold
//! exactly one queen (primary columns) while every diagonal may hold at most
//! one (secondary columns). Diagonals consisting of a single corner square can
//! never be contested, so they get no column.

use crate::{
    error::Result,
    matrix::{ColumnSpec, IncidenceMatrix},
    sink::Solution,
    solver::Solver,
};

/// An instance of the `n` queens problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NQueens {
    side_length: usize,
    matrix: IncidenceMatrix,
    columns: Vec<ColumnSpec>,
}

/// A position on the chess board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    /// The rank index, ranging from 0 to `n - 1`.
    pub rank: usize,
    /// The file index, ranging from 0 to `n - 1`.
    pub file: usize,
}

impl NQueens {
    /// Encode the `n` queens problem for the given side length.
    pub fn new(side_length: usize) -> Self {
        let n = side_length;
        let diagonals = Self::diagonals_per_direction(n);

        let mut columns = Vec::with_capacity(2 * n + 2 * diagonals);
        columns.extend((1..=n).map(|rank| ColumnSpec::primary(format!("Rank {}", rank))));
        columns.extend((1..=n).map(|file| ColumnSpec::primary(format!("File {}", file))));
        columns.extend(
            (1..=diagonals).map(|index| ColumnSpec::secondary(format!("Diagonal {}", index))),
        );
        columns.extend(
            (1..=diagonals).map(|index| ColumnSpec::secondary(format!("Back Diagonal {}", index))),
        );

        let mut matrix = IncidenceMatrix::new(columns.len());
        for rank in 0..n {
            for file in 0..n {
                let square = Square { rank, file };
                let mut row = vec![rank, n + file];
                if let Some(index) = square.diagonal(n) {
                    row.push(2 * n + index);
                }
                if let Some(index) = square.back_diagonal(n) {
                    row.push(2 * n + diagonals + index);
                }

                matrix
                    .push_sparse_row(row)
                    .expect("queens encoding only uses columns it declared");
            }
        }

        log::debug!(
            "Encoded [{}] queens as [{}] rows and [{}] columns.",
            n,
            matrix.num_rows(),
            matrix.num_columns()
        );

        NQueens {
            side_length,
            matrix,
            columns,
        }
    }

    /// Return the number of diagonals with at least two squares in one
    /// direction.
    fn diagonals_per_direction(side_length: usize) -> usize {
        (2 * side_length).saturating_sub(3)
    }

    /// Return the length of the board side.
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Return the incidence matrix, one row per square in rank-major order.
    pub fn matrix(&self) -> &IncidenceMatrix {
        &self.matrix
    }

    /// Return the column descriptors.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Return a short description of the instance for reports.
    pub fn description(&self) -> String {
        format!(
            "The {n} queens problem on a {n}x{n} board. Columns are the rank, file and \
             diagonal constraints, rows are the possible queen placements in rank-major order.",
            n = self.side_length
        )
    }

    /// Create a solver for this instance.
    pub fn solver(&self) -> Result<Solver> {
        Solver::from_matrix(&self.matrix, &self.columns)
    }

    /// Return the square a matrix row stands for.
    ///
    /// # Panics
    ///
    /// Panics if the board is empty, as no row stands for a square then.
    pub fn square(&self, row: usize) -> Square {
        Square {
            rank: row / self.side_length,
            file: row % self.side_length,
        }
    }

    /// Decode a solution into the sorted queen positions.
    pub fn placements(&self, solution: &Solution) -> Vec<Square> {
        let mut squares: Vec<_> = solution.row_indices().map(|row| self.square(row)).collect();
        squares.sort();
        squares
    }
}

impl Square {
    /// Return the index of the diagonal running along `rank + file`, if that
    /// diagonal has more than one square.
    ///
    /// The value ranges from 0 to `2n - 4`.
    pub fn diagonal(self, side_length: usize) -> Option<usize> {
        let sum = self.rank + self.file;
        (sum >= 1 && sum + 3 <= 2 * side_length).then(|| sum - 1)
    }

    /// Return the index of the diagonal running along `file - rank`, if that
    /// diagonal has more than one square.
    ///
    /// The value ranges from 0 to `2n - 4`.
    pub fn back_diagonal(self, side_length: usize) -> Option<usize> {
        // Shifted so that `file - rank == -(n - 2)` maps to zero.
        let shifted = (self.file + side_length).checked_sub(self.rank + 2)?;
        (shifted + 4 <= 2 * side_length).then_some(shifted)
    }
}
