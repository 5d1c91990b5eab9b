//! Construction of a [`Torus`] from an incidence matrix.

use super::{node::Links, Cell, ColumnId, Header, Torus, MASTER};
use crate::{
    error::{Error, Result},
    matrix::{ColumnSpec, IncidenceMatrix},
};

impl Torus {
    /// Build the linked structure for `matrix`, with one descriptor per
    /// column.
    ///
    /// Headers join the master ring in matrix column order. Every `1` becomes
    /// an item node appended to the bottom of its column and to the end of
    /// its row, so rows and columns both keep matrix order. Rows without any
    /// `1` produce no nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the number of descriptors differs
    /// from the number of matrix columns. Nothing is linked in that case.
    pub fn new(matrix: &IncidenceMatrix, columns: &[ColumnSpec]) -> Result<Self> {
        if columns.len() != matrix.num_columns() {
            return Err(Error::ShapeMismatch {
                descriptors: columns.len(),
                columns: matrix.num_columns(),
            });
        }

        let mut links = Links::with_capacity(1 + columns.len() + matrix.count_ones());
        let master = links.push();
        debug_assert_eq!(master, MASTER);

        let mut headers = Vec::with_capacity(columns.len());
        for spec in columns {
            let id = links.push();
            links.insert_left(MASTER, id);
            headers.push(Header {
                name: spec.name.clone(),
                primary: spec.primary,
                size: 0,
                covered: false,
            });
        }

        let mut cells = Vec::with_capacity(matrix.count_ones());
        for (row, row_columns) in matrix.rows().enumerate() {
            let mut first = None;
            for &index in row_columns {
                let column = ColumnId(index);
                let id = links.push();

                links.insert_above(column.node(), id);
                headers[index].size += 1;
                cells.push(Cell { column, row });

                match first {
                    None => first = Some(id),
                    Some(first) => links.insert_left(first, id),
                }
            }
        }

        log::debug!(
            "Built torus with [{}] columns, [{}] rows and [{}] nodes.",
            headers.len(),
            matrix.num_rows(),
            cells.len()
        );

        Ok(Torus {
            links,
            headers,
            cells,
            num_rows: matrix.num_rows(),
            covers: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_column_counts() {
        let mut matrix = IncidenceMatrix::new(3);
        matrix.push_row([true, true, false]).unwrap();
        matrix.push_row([false, false, false]).unwrap();
        matrix.push_row([true, false, true]).unwrap();
        let columns = ColumnSpec::numbered(3);

        let torus = Torus::new(&matrix, &columns).unwrap();
        torus.check_consistency().unwrap();

        assert_eq!(torus.num_rows(), 3);
        assert_eq!(torus.num_nodes(), 4);
        assert_eq!(
            torus.columns().map(|c| torus.size(c)).collect::<Vec<_>>(),
            vec![2, 1, 1]
        );
        assert_eq!(
            torus.live_columns().map(ColumnId::index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(
            torus.column_rows(ColumnId(0)).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(torus.column_name(ColumnId(2)), "Constraint 2");
    }

    #[test]
    fn rows_are_linked_in_column_order() {
        let mut matrix = IncidenceMatrix::new(4);
        matrix.push_sparse_row([3, 0, 2]).unwrap();
        let torus = Torus::new(&matrix, &ColumnSpec::numbered(4)).unwrap();

        let first = torus.nodes_in(ColumnId(0)).next().unwrap();
        let mut walk = vec![torus.column_of(first)];
        let mut node = torus.right(first);
        while node != first {
            walk.push(torus.column_of(node));
            node = torus.right(node);
        }

        assert_eq!(walk, vec![ColumnId(0), ColumnId(2), ColumnId(3)]);
        assert_eq!(torus.column_of(torus.left(first)), ColumnId(3));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let matrix = IncidenceMatrix::new(3);
        let err = Torus::new(&matrix, &ColumnSpec::numbered(2)).unwrap_err();

        assert!(matches!(
            err,
            Error::ShapeMismatch {
                descriptors: 2,
                columns: 3
            }
        ));
    }

    #[test]
    fn empty_matrix_builds_master_only() {
        let torus = Torus::new(&IncidenceMatrix::new(0), &[]).unwrap();

        assert_eq!(torus.num_columns(), 0);
        assert_eq!(torus.live_columns().count(), 0);
        torus.check_consistency().unwrap();
    }
}
