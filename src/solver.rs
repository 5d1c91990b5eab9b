use crate::{
    error::Result,
    matrix::{ColumnSpec, IncidenceMatrix},
    observer::{BranchRow, Event, NoopObserver, Observer},
    sink::{Solution, SolutionRow, SolutionSink},
    torus::{node::NodeId, ColumnId, Torus},
};

/// Counters describing the work done by a [`Solver`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of search states entered, including the root.
    pub visits: u64,
    /// Number of solutions reported.
    pub solutions: u64,
    /// Number of states abandoned because a primary column had no rows left.
    pub dead_ends: u64,
}

/// Solver that iteratively returns solutions to exact cover problems.
///
/// The search is Algorithm X over a [`Torus`]: choose the primary column with
/// the fewest live rows (the first one in ring order on ties), cover it, and
/// try each of its rows top to bottom, covering the row's other columns left
/// to right before descending and uncovering them right to left afterwards.
/// The recursion is kept on an explicit stack so the search can pause after
/// each solution.
#[derive(Debug)]
pub struct Solver<O = NoopObserver> {
    torus: Torus,
    observer: O,

    // Values used to track the state of solving
    path: Vec<NodeId>,
    stack: Vec<Frame>,
    state: State,
    stats: SearchStats,
    visit_limit: Option<u64>,
    stopped_early: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    // Evaluate the state reached after the latest row was added
    Enter,
    // Undo the latest row of the top frame and move on to its next row
    Resume,
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    column: ColumnId,
    // The row node being tried, or the column header before the first row
    node: NodeId,
}

impl Solver {
    /// Create a new `Solver` that takes exclusive ownership of `torus`.
    ///
    /// # Panics
    ///
    /// Panics if any column of `torus` is still covered.
    pub fn new(torus: Torus) -> Self {
        assert_eq!(
            torus.pending_covers(),
            0,
            "solver requires a structure with no covered columns"
        );

        Solver {
            torus,
            observer: NoopObserver,

            path: Vec::new(),
            stack: Vec::new(),
            state: State::Enter,
            stats: SearchStats::default(),
            visit_limit: None,
            stopped_early: false,
        }
    }

    /// Build the structure for `matrix` and create a solver for it.
    pub fn from_matrix(matrix: &IncidenceMatrix, columns: &[ColumnSpec]) -> Result<Self> {
        Torus::new(matrix, columns).map(Solver::new)
    }
}

impl Torus {
    /// Create a [`Solver`] which searches this structure.
    ///
    /// # Panics
    ///
    /// Panics if any column is still covered, see [`Solver::new`].
    pub fn into_solver(self) -> Solver {
        Solver::new(self)
    }
}

impl<O> Solver<O>
where
    O: Observer,
{
    /// Replace the observer which receives search events.
    pub fn with_observer<P: Observer>(self, observer: P) -> Solver<P> {
        Solver {
            torus: self.torus,
            observer,

            path: self.path,
            stack: self.stack,
            state: self.state,
            stats: self.stats,
            visit_limit: self.visit_limit,
            stopped_early: self.stopped_early,
        }
    }

    /// Stop the search once `limit` search states have been entered.
    ///
    /// When the limit is hit every pending cover is undone before the solver
    /// reports that it is finished, see [`Solver::stopped_early`].
    pub fn with_visit_limit(mut self, limit: u64) -> Self {
        self.visit_limit = Some(limit);
        self
    }

    /// Return the structure being searched.
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// Return the counters accumulated so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Return true if the search ended because the visit limit was reached.
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    /// Undo any search in progress and start again from the first solution.
    pub fn reset(&mut self) {
        self.unwind();
        self.stats = SearchStats::default();
        self.stopped_early = false;
        self.state = State::Enter;
    }

    /// Undo any search in progress and return the restored structure.
    pub fn into_torus(mut self) -> Torus {
        self.unwind();
        self.torus
    }

    /// Return all remaining solutions.
    pub fn all_solutions(&mut self) -> Vec<Solution> {
        self.collect()
    }

    /// Deliver every remaining solution to `sink`, returning how many were
    /// delivered.
    pub fn run<S>(&mut self, sink: &mut S) -> usize
    where
        S: SolutionSink + ?Sized,
    {
        let mut delivered = 0;
        while let Some(solution) = self.next_solution() {
            sink.accept(solution);
            delivered += 1;
        }

        delivered
    }

    /// Compute up to the next solution, returning `None` if there are no more.
    pub fn next_solution(&mut self) -> Option<Solution> {
        loop {
            match self.state {
                State::Done => return None,
                State::Enter => {
                    self.state = State::Resume;

                    if self
                        .visit_limit
                        .is_some_and(|limit| self.stats.visits >= limit)
                    {
                        self.stop_early();
                        return None;
                    }
                    self.stats.visits += 1;

                    if let Some(solution) = self.enter() {
                        return Some(solution);
                    }
                }
                State::Resume => self.resume(),
            }
        }
    }

    /// Examine the state reached at the current depth: report a solution,
    /// abandon a dead end, or open a frame for the best column.
    fn enter(&mut self) -> Option<Solution> {
        let depth = self.path.len();

        let Some(column) = self.choose_column() else {
            // The empty selection is not a solution
            if depth > 0 {
                self.stats.solutions += 1;
                self.observer.observe(Event::Solution { depth });
                return Some(self.materialize());
            }

            return None;
        };

        let size = self.torus.size(column);
        if size == 0 {
            self.stats.dead_ends += 1;
            self.observer.observe(Event::Backtrack {
                depth,
                column: self.torus.column_name(column),
            });

            return None;
        }

        self.observer.observe(Event::Select {
            depth,
            column: self.torus.column_name(column),
            size,
        });
        self.torus.cover(column);
        self.stack.push(Frame {
            column,
            node: self.torus.header_node(column),
        });

        None
    }

    /// Undo the row last tried by the top frame and try its next one,
    /// closing the frame when its column has no rows left.
    fn resume(&mut self) {
        let Some(frame) = self.stack.last().copied() else {
            self.finish();
            return;
        };

        let header = self.torus.header_node(frame.column);
        if frame.node != header {
            self.uncover_row(frame.node);
            self.path.pop();
        }

        let next = self.torus.down(frame.node);
        if next == header {
            self.torus.uncover(frame.column);
            self.stack.pop();
            return;
        }

        if let Some(top) = self.stack.last_mut() {
            top.node = next;
        }
        self.observer.observe(Event::Branch {
            depth: self.path.len(),
            row: BranchRow::new(&self.torus, next),
        });
        self.path.push(next);
        self.cover_row(next);
        self.state = State::Enter;
    }

    /// Select a column to branch on.
    ///
    /// This implementation chooses the primary column that has the least
    /// number of live rows, preferring the earliest in ring order. Returns
    /// `None` when no primary column is left.
    fn choose_column(&self) -> Option<ColumnId> {
        self.torus
            .live_columns()
            .filter(|&column| self.torus.is_primary(column))
            .min_by_key(|&column| self.torus.size(column))
    }

    /// Cover the columns of every other node in `node`'s row, left to right.
    fn cover_row(&mut self, node: NodeId) {
        let mut mate = self.torus.right(node);
        while mate != node {
            self.torus.cover(self.torus.column_of(mate));
            mate = self.torus.right(mate);
        }
    }

    /// Uncover the columns of every other node in `node`'s row, right to left.
    fn uncover_row(&mut self, node: NodeId) {
        let mut mate = self.torus.left(node);
        while mate != node {
            self.torus.uncover(self.torus.column_of(mate));
            mate = self.torus.left(mate);
        }
    }

    fn materialize(&self) -> Solution {
        let rows = self
            .path
            .iter()
            .map(|&node| SolutionRow {
                index: self.torus.row_of(node),
                columns: self
                    .torus
                    .row_columns(node)
                    .into_iter()
                    .map(|column| self.torus.column_name(column).to_string())
                    .collect(),
            })
            .collect();

        Solution { rows }
    }

    /// Pop every frame, undoing its covers in reverse order.
    fn unwind(&mut self) {
        while let Some(frame) = self.stack.pop() {
            if frame.node != self.torus.header_node(frame.column) {
                self.uncover_row(frame.node);
                self.path.pop();
            }
            self.torus.uncover(frame.column);
        }

        debug_assert!(self.path.is_empty());
        debug_assert_eq!(self.torus.pending_covers(), 0);
        if cfg!(debug_assertions) {
            if let Err(err) = self.torus.check_consistency() {
                panic!("structure corrupted after unwinding: {}", err);
            }
        }
    }

    fn stop_early(&mut self) {
        self.unwind();
        self.stopped_early = true;
        self.state = State::Done;

        log::debug!(
            "Stopped search at visit limit [{}] with stats [{:?}].",
            self.stats.visits,
            self.stats
        );
    }

    fn finish(&mut self) {
        self.unwind();
        self.state = State::Done;

        log::debug!("Search exhausted with stats [{:?}].", self.stats);
    }
}

impl<O> Iterator for Solver<O>
where
    O: Observer,
{
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}
