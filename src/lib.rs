#![deny(missing_docs)]

//! Implementation of [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links)
//! and [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X) for solving
//! [exact cover](https://en.wikipedia.org/wiki/Exact_cover) problems.
//!
//! A problem is given as an [`IncidenceMatrix`] of rows against constraint
//! columns, with a [`ColumnSpec`] naming each column and marking it primary
//! (covered exactly once) or secondary (covered at most once). The matrix is
//! turned into a [`Torus`], and a [`Solver`] enumerates every exact cover:
//!
//! ```
//! use dlx_torus::{ColumnSpec, IncidenceMatrix, Solver};
//!
//! let mut matrix = IncidenceMatrix::new(3);
//! matrix.push_row([true, false, true])?;
//! matrix.push_row([false, true, false])?;
//! matrix.push_row([true, true, false])?;
//! let columns = ColumnSpec::numbered(3);
//!
//! let solutions = Solver::from_matrix(&matrix, &columns)?.all_solutions();
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].sorted_row_indices(), vec![0, 1]);
//! # Ok::<(), dlx_torus::Error>(())
//! ```

pub mod error;
pub mod matrix;
pub mod observer;
pub mod queens;
pub mod sink;
pub(crate) mod solver;
pub mod torus;

pub use error::{Error, Result};
pub use matrix::{ColumnSpec, Delimiter, IncidenceMatrix};
pub use observer::{BranchRow, Event, LogObserver, NoopObserver, Observer};
pub use sink::{ReportWriter, Solution, SolutionRow, SolutionSink};
pub use solver::{SearchStats, Solver};
pub use torus::{ColumnId, Inconsistency, Torus};
