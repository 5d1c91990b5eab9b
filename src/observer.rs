//! Hooks for watching a search as it runs.
//!
//! Observers only receive information. Nothing they do can change which
//! branches the solver explores or which solutions it reports.

use crate::torus::{node::NodeId, Torus};
use std::fmt;

/// A notable step taken by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// A primary column was chosen for branching at `depth`.
    Select {
        /// Search depth, starting at zero.
        depth: usize,
        /// Name of the chosen column.
        column: &'a str,
        /// Number of rows that will be tried.
        size: usize,
    },
    /// A row was tentatively added to the partial solution at `depth`.
    Branch {
        /// Search depth, starting at zero.
        depth: usize,
        /// The row being tried.
        row: BranchRow<'a>,
    },
    /// A primary column could no longer be covered, so the solver backtracks.
    Backtrack {
        /// Search depth, starting at zero.
        depth: usize,
        /// Name of the dead column.
        column: &'a str,
    },
    /// Every primary column is covered; a solution of `depth` rows was found.
    Solution {
        /// Number of rows in the solution.
        depth: usize,
    },
}

/// Read-only view of the row tried by an [`Event::Branch`].
#[derive(Clone, Copy)]
pub struct BranchRow<'a> {
    torus: &'a Torus,
    node: NodeId,
}

impl<'a> BranchRow<'a> {
    pub(crate) fn new(torus: &'a Torus, node: NodeId) -> Self {
        BranchRow { torus, node }
    }

    /// Return the index of the row in the original matrix.
    pub fn index(&self) -> usize {
        self.torus.row_of(self.node)
    }

    /// Return the names of the columns this row covers, in original column
    /// order.
    pub fn column_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        let torus = self.torus;
        torus
            .row_columns(self.node)
            .into_iter()
            .map(move |column| torus.column_name(column))
    }
}

impl PartialEq for BranchRow<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.torus, other.torus) && self.node == other.node
    }
}

impl Eq for BranchRow<'_> {}

impl fmt::Debug for BranchRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BranchRow")
            .field("index", &self.index())
            .field("columns", &self.column_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Receives [`Event`]s from a running search.
pub trait Observer {
    /// Called for every event, in the order they happen.
    fn observe(&mut self, event: Event<'_>);
}

/// An observer which ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    #[inline]
    fn observe(&mut self, _event: Event<'_>) {}
}

/// An observer which forwards events to the [`log`] facade.
///
/// Column selections, backtracks and solutions are logged at `debug`, each
/// row tried at `trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn observe(&mut self, event: Event<'_>) {
        match event {
            Event::Select {
                depth,
                column,
                size,
            } => log::debug!("k={} selected column [{}] with [{}] rows.", depth, column, size),
            Event::Branch { depth, row } => log::trace!(
                "k={} trying row [{}] covering [{}].",
                depth,
                row.index(),
                row.column_names().collect::<Vec<_>>().join(", ")
            ),
            Event::Backtrack { depth, column } => {
                log::debug!("k={} backtrack necessary, [{}] is a dead constraint.", depth, column)
            }
            Event::Solution { depth } => log::debug!("Found solution with [{}] rows.", depth),
        }
    }
}

impl<F> Observer for F
where
    F: FnMut(Event<'_>),
{
    fn observe(&mut self, event: Event<'_>) {
        self(event)
    }
}
