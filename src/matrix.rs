//! Input model for exact cover problems: a 0/1 incidence matrix relating rows
//! to constraints, plus a descriptor for each constraint column.
//!
//! Only the positions of the `1` entries are stored, so building the toroidal
//! structure afterwards is linear in the number of `1`s.

use crate::error::{Error, Result};

/// Metadata for a single constraint column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnSpec {
    /// Name used when reporting solutions.
    pub name: String,
    /// Primary columns must be covered exactly once. Secondary columns may be
    /// covered at most once and are never chosen for branching.
    pub primary: bool,
}

impl ColumnSpec {
    /// Create a primary column descriptor.
    pub fn primary(name: impl Into<String>) -> Self {
        ColumnSpec {
            name: name.into(),
            primary: true,
        }
    }

    /// Create a secondary column descriptor.
    pub fn secondary(name: impl Into<String>) -> Self {
        ColumnSpec {
            name: name.into(),
            primary: false,
        }
    }

    /// Return `count` primary descriptors named `Constraint 0` through
    /// `Constraint {count - 1}`.
    pub fn numbered(count: usize) -> Vec<Self> {
        (0..count)
            .map(|index| ColumnSpec::primary(format!("Constraint {}", index)))
            .collect()
    }
}

/// Separator between entries of a textual matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Entries are separated by commas, surrounding whitespace is ignored.
    Comma,
    /// Entries are separated by any amount of whitespace.
    Whitespace,
}

/// A 0/1 matrix stored as the sorted column indices of each row's `1`s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidenceMatrix {
    num_columns: usize,
    rows: Vec<Vec<usize>>,
}

impl IncidenceMatrix {
    /// Create an empty matrix with the given number of columns.
    pub fn new(num_columns: usize) -> Self {
        IncidenceMatrix {
            num_columns,
            rows: Vec::new(),
        }
    }

    /// Create a matrix from the coordinates of its `1` entries.
    ///
    /// The number of rows is one more than the largest row index given, rows
    /// that are never mentioned are empty.
    pub fn from_coordinates(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self> {
        let mut rows: Vec<Vec<usize>> = Vec::new();

        for (row, column) in filled_coordinates {
            if column >= num_columns {
                return Err(Error::ColumnOutOfRange {
                    row,
                    column,
                    columns: num_columns,
                });
            }

            if row >= rows.len() {
                rows.resize_with(row + 1, Vec::new);
            }
            rows[row].push(column);
        }

        for row in &mut rows {
            row.sort_unstable();
            row.dedup();
        }

        Ok(IncidenceMatrix { num_columns, rows })
    }

    /// Append a dense row. Its width must equal the number of columns.
    pub fn push_row(&mut self, entries: impl IntoIterator<Item = bool>) -> Result<()> {
        let mut found = 0;
        let mut columns = Vec::new();
        for (column, filled) in entries.into_iter().enumerate() {
            found += 1;
            if filled {
                columns.push(column);
            }
        }

        if found != self.num_columns {
            return Err(Error::RaggedRow {
                row: self.rows.len(),
                expected: self.num_columns,
                found,
            });
        }

        self.rows.push(columns);
        Ok(())
    }

    /// Append a row given by the column indices of its `1` entries.
    pub fn push_sparse_row(&mut self, columns: impl IntoIterator<Item = usize>) -> Result<()> {
        let mut columns: Vec<usize> = columns.into_iter().collect();
        if let Some(&column) = columns.iter().find(|&&column| column >= self.num_columns) {
            return Err(Error::ColumnOutOfRange {
                row: self.rows.len(),
                column,
                columns: self.num_columns,
            });
        }

        columns.sort_unstable();
        columns.dedup();
        self.rows.push(columns);
        Ok(())
    }

    /// Parse a matrix from text, one row per non-blank line.
    ///
    /// Every entry must be `0` or `1` and every row must have the same width
    /// as the first one.
    pub fn parse(input: &str, delimiter: Delimiter) -> Result<Self> {
        let mut matrix: Option<IncidenceMatrix> = None;

        for (line_index, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let tokens: Vec<&str> = match delimiter {
                Delimiter::Comma => line.split(',').map(str::trim).collect(),
                Delimiter::Whitespace => line.split_whitespace().collect(),
            };

            let entries = tokens
                .iter()
                .map(|token| match *token {
                    "0" => Ok(false),
                    "1" => Ok(true),
                    _ => Err(Error::InvalidEntry {
                        line: line_index + 1,
                        token: token.to_string(),
                    }),
                })
                .collect::<Result<Vec<bool>>>()?;

            matrix
                .get_or_insert_with(|| IncidenceMatrix::new(entries.len()))
                .push_row(entries)?;
        }

        let matrix = matrix.unwrap_or_default();
        log::debug!(
            "Parsed matrix with [{}] rows and [{}] columns.",
            matrix.num_rows(),
            matrix.num_columns()
        );

        Ok(matrix)
    }

    /// Return the number of columns.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Return the number of rows, including rows without any `1`s.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Return the sorted column indices of the `1`s in the given row.
    pub fn row(&self, row: usize) -> &[usize] {
        &self.rows[row]
    }

    /// Return an iterator over every row's sorted column indices.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Return true if the entry at `(row, column)` is a `1`.
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|columns| columns.binary_search(&column).is_ok())
    }

    /// Return the total number of `1` entries.
    pub fn count_ones(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}
