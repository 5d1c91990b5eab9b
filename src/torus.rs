//! Toroidal, quadruply linked representation of an exact cover matrix.
//!
//! Column headers form a circular ring anchored by a master header. Each
//! header owns a vertical ring of item nodes, one for every `1` in its
//! column, and each item node is also linked horizontally to the other nodes
//! of its row. All nodes live in one arena and are addressed by index.
//!
//! [`Torus::cover`] and [`Torus::uncover`] are the only mutations once the
//! structure is built. They must be applied in strict stack order: the column
//! passed to `uncover` must be the most recently covered one.

mod builder;
pub(crate) mod node;

use node::{Direction, Links, NodeId, RingIter};

/// The arena position of the master header.
const MASTER: NodeId = NodeId(0);

/// Identifies a column by its position in the original matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

impl ColumnId {
    /// Return the column's position in the original matrix.
    pub fn index(self) -> usize {
        self.0
    }

    #[inline]
    fn node(self) -> NodeId {
        NodeId(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    name: String,
    primary: bool,
    size: usize,
    covered: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Cell {
    column: ColumnId,
    row: usize,
}

/// A broken invariant found by [`Torus::check_consistency`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Inconsistency {
    /// Following a link and then its opposite did not return to the start.
    #[error("node {node} is not closed under {direction} links")]
    BrokenRing {
        /// Arena index of the node.
        node: usize,
        /// Name of the direction that failed.
        direction: &'static str,
    },
    /// Walking a ring did not return to its start.
    #[error("ring starting at node {node} never closes")]
    Unterminated {
        /// Arena index of the ring's start.
        node: usize,
    },
    /// A header's recorded size differs from its live node count.
    #[error("column [{column}] records size {recorded} but holds {counted} nodes")]
    SizeMismatch {
        /// Name of the column.
        column: String,
        /// The size stored in the header.
        recorded: usize,
        /// The number of nodes found by walking the column.
        counted: usize,
    },
    /// A live node points at a different column than the one holding it.
    #[error("node {node} is linked into column [{column}] but belongs elsewhere")]
    WrongColumn {
        /// Arena index of the node.
        node: usize,
        /// Name of the column holding the node.
        column: String,
    },
    /// The header ring disagrees with the record of covered columns.
    #[error("column [{column}] covered state does not match the header ring")]
    CoverState {
        /// Name of the column.
        column: String,
    },
}

/// The dancing links structure for a single exact cover problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Torus {
    links: Links,
    headers: Vec<Header>,
    cells: Vec<Cell>,
    num_rows: usize,
    covers: Vec<ColumnId>,
}

impl Torus {
    /// Return the number of columns, covered or not.
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Return the number of rows in the matrix this structure was built from.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Return the number of item nodes, equal to the number of `1` entries.
    pub fn num_nodes(&self) -> usize {
        self.cells.len()
    }

    /// Return an iterator over every column in original matrix order.
    pub fn columns(&self) -> impl Iterator<Item = ColumnId> {
        (0..self.headers.len()).map(ColumnId)
    }

    /// Return the column at the given original position, if it exists.
    pub fn column(&self, index: usize) -> Option<ColumnId> {
        (index < self.headers.len()).then_some(ColumnId(index))
    }

    /// Return the name of a column.
    pub fn column_name(&self, column: ColumnId) -> &str {
        &self.headers[column.0].name
    }

    /// Return true if the column must be covered exactly once.
    pub fn is_primary(&self, column: ColumnId) -> bool {
        self.headers[column.0].primary
    }

    /// Return the number of live nodes in the column.
    pub fn size(&self, column: ColumnId) -> usize {
        self.headers[column.0].size
    }

    /// Return true if the column is currently covered.
    pub fn is_covered(&self, column: ColumnId) -> bool {
        self.headers[column.0].covered
    }

    /// Return the number of covers not yet undone.
    pub fn pending_covers(&self) -> usize {
        self.covers.len()
    }

    /// Return the columns still linked into the header ring, in ring order.
    pub fn live_columns(&self) -> impl Iterator<Item = ColumnId> + '_ {
        RingIter::new(&self.links, MASTER, Direction::Right).map(|id| ColumnId(id.index() - 1))
    }

    /// Return the matrix rows of the live nodes in a column, top to bottom.
    pub fn column_rows(&self, column: ColumnId) -> impl Iterator<Item = usize> + '_ {
        self.nodes_in(column).map(|id| self.cell(id).row)
    }

    /// Return true if no primary column remains in the header ring.
    pub fn primaries_exhausted(&self) -> bool {
        !self.live_columns().any(|column| self.is_primary(column))
    }

    /// Cover entire column, and any rows that that appear in this column.
    ///
    /// The column header leaves the header ring and every other node of each
    /// row in the column leaves its own column. The column's own nodes keep
    /// their links so that [`Torus::uncover`] can retrace them.
    ///
    /// # Panics
    ///
    /// Panics if the column is already covered.
    pub fn cover(&mut self, column: ColumnId) {
        assert!(
            !self.is_covered(column),
            "column [{}] is already covered",
            self.column_name(column)
        );

        let header = column.node();
        self.links.cover_horizontal(header);

        let mut row_node = self.links.get(header).down;
        while row_node != header {
            let mut neighbor = self.links.get(row_node).right;
            while neighbor != row_node {
                self.links.cover_vertical(neighbor);
                let owner = self.cell(neighbor).column;
                self.headers[owner.0].size -= 1;

                neighbor = self.links.get(neighbor).right;
            }

            row_node = self.links.get(row_node).down;
        }

        self.headers[column.0].covered = true;
        self.covers.push(column);
    }

    /// Uncover entire column, and any rows that appear in this column.
    ///
    /// Walks the column bottom to top and each row right to left, the exact
    /// reverse of [`Torus::cover`].
    ///
    /// # Panics
    ///
    /// Panics if `column` is not the most recently covered column.
    pub fn uncover(&mut self, column: ColumnId) {
        let top = self
            .covers
            .pop()
            .expect("mismatched number of cover & uncover");
        assert_eq!(
            top,
            column,
            "Expected column argument [{}] to match top cover [{}]",
            self.column_name(column),
            self.column_name(top)
        );

        let header = column.node();
        let mut row_node = self.links.get(header).up;
        while row_node != header {
            let mut neighbor = self.links.get(row_node).left;
            while neighbor != row_node {
                let owner = self.cell(neighbor).column;
                self.headers[owner.0].size += 1;
                self.links.uncover_vertical(neighbor);

                neighbor = self.links.get(neighbor).left;
            }

            row_node = self.links.get(row_node).up;
        }

        self.links.uncover_horizontal(header);
        self.headers[column.0].covered = false;
    }

    /// Verify ring closure, header sizes and cover bookkeeping.
    ///
    /// The structure is expected to be consistent whenever no cover or
    /// uncover is in progress.
    pub fn check_consistency(&self) -> Result<(), Inconsistency> {
        let mut live = vec![false; self.headers.len()];

        self.check_closed(MASTER, Direction::Right)?;
        self.check_reversible(MASTER, Direction::Right, Direction::Left)?;
        for header in self.ring(MASTER, Direction::Right)? {
            self.check_closed(header, Direction::Right)?;
            let column = ColumnId(header.index() - 1);
            live[column.0] = true;
            self.check_reversible(header, Direction::Down, Direction::Up)?;

            let mut counted = 0;
            for node in self.ring(header, Direction::Down)? {
                self.check_closed(node, Direction::Down)?;
                if self.cell(node).column != column {
                    return Err(Inconsistency::WrongColumn {
                        node: node.index(),
                        column: self.column_name(column).to_string(),
                    });
                }

                for mate in self.ring(node, Direction::Right)? {
                    self.check_closed(mate, Direction::Right)?;
                }
                counted += 1;
            }

            if counted != self.size(column) {
                return Err(Inconsistency::SizeMismatch {
                    column: self.column_name(column).to_string(),
                    recorded: self.size(column),
                    counted,
                });
            }
        }

        let mut stacked = vec![false; self.headers.len()];
        for column in &self.covers {
            stacked[column.0] = true;
        }
        for column in self.columns() {
            let covered = self.is_covered(column);
            if live[column.0] == covered || stacked[column.0] != covered {
                return Err(Inconsistency::CoverState {
                    column: self.column_name(column).to_string(),
                });
            }
        }

        Ok(())
    }

    /// Collect a ring, failing if it does not close within the arena size.
    fn ring(&self, start: NodeId, direction: Direction) -> Result<Vec<NodeId>, Inconsistency> {
        let mut nodes = Vec::new();
        for id in RingIter::new(&self.links, start, direction) {
            if nodes.len() >= self.links.len() {
                return Err(Inconsistency::Unterminated {
                    node: start.index(),
                });
            }
            nodes.push(id);
        }

        Ok(nodes)
    }

    /// Check that walking a ring backwards visits the forward walk in reverse.
    fn check_reversible(
        &self,
        start: NodeId,
        forward: Direction,
        backward: Direction,
    ) -> Result<(), Inconsistency> {
        let mut walked = self.ring(start, forward)?;
        walked.reverse();

        if walked == self.ring(start, backward)? {
            Ok(())
        } else {
            Err(Inconsistency::BrokenRing {
                node: start.index(),
                direction: "reverse",
            })
        }
    }

    fn check_closed(&self, id: NodeId, direction: Direction) -> Result<(), Inconsistency> {
        let link = self.links.get(id);
        let (closed, name) = match direction {
            Direction::Left | Direction::Right => (
                self.links.get(link.right).left == id && self.links.get(link.left).right == id,
                "left/right",
            ),
            Direction::Up | Direction::Down => (
                self.links.get(link.down).up == id && self.links.get(link.up).down == id,
                "up/down",
            ),
        };

        if closed {
            Ok(())
        } else {
            Err(Inconsistency::BrokenRing {
                node: id.index(),
                direction: name,
            })
        }
    }

    #[inline]
    fn first_item(&self) -> usize {
        self.headers.len() + 1
    }

    #[inline]
    fn cell(&self, id: NodeId) -> &Cell {
        &self.cells[id.index() - self.first_item()]
    }

    // Crate internal navigation used by the solver.

    pub(crate) fn nodes_in(&self, column: ColumnId) -> RingIter<'_> {
        RingIter::new(&self.links, column.node(), Direction::Down)
    }

    pub(crate) fn header_node(&self, column: ColumnId) -> NodeId {
        column.node()
    }

    pub(crate) fn down(&self, id: NodeId) -> NodeId {
        self.links.get(id).down
    }

    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.links.get(id).right
    }

    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.links.get(id).left
    }

    pub(crate) fn column_of(&self, id: NodeId) -> ColumnId {
        self.cell(id).column
    }

    pub(crate) fn row_of(&self, id: NodeId) -> usize {
        self.cell(id).row
    }

    /// Return the columns of the row containing `id`, sorted by original
    /// position.
    pub(crate) fn row_columns(&self, id: NodeId) -> Vec<ColumnId> {
        let mut columns: Vec<_> = std::iter::once(id)
            .chain(RingIter::new(&self.links, id, Direction::Right))
            .map(|node| self.column_of(node))
            .collect();
        columns.sort_unstable();
        columns
    }
}
