//! Errors reported to callers while preparing a problem or writing its output.

use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that can occur outside of the search itself.
///
/// The search never fails: an instance without solutions simply yields
/// nothing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The number of column descriptors does not match the matrix width.
    #[error("matrix has {columns} columns but {descriptors} column descriptors were given")]
    ShapeMismatch {
        /// Number of column descriptors supplied.
        descriptors: usize,
        /// Number of columns in the matrix.
        columns: usize,
    },

    /// A dense row did not have the same width as the matrix.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the matrix.
        expected: usize,
        /// Width of the supplied row.
        found: usize,
    },

    /// A sparse row referenced a column that does not exist.
    #[error("row {row} references column {column}, but the matrix only has {columns} columns")]
    ColumnOutOfRange {
        /// Index of the offending row.
        row: usize,
        /// The out of range column index.
        column: usize,
        /// Width of the matrix.
        columns: usize,
    },

    /// A textual matrix contained something other than `0` or `1`.
    #[error("invalid matrix entry [{token}] on line {line}")]
    InvalidEntry {
        /// One based line number of the entry.
        line: usize,
        /// The rejected token.
        token: String,
    },

    /// Writing solution output failed.
    #[error("failed to write solutions: {0}")]
    Io(#[from] io::Error),
}
