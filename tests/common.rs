use dlx_torus::{ColumnSpec, Delimiter, IncidenceMatrix, Solution};
use std::collections::HashMap;

/// Install a test logger, ignoring the error when one is already installed.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a matrix from whitespace separated `0`/`1` rows.
///
/// # Panics
///  - If any row is not made of `0` and `1` entries of the same width.
#[allow(dead_code)]
pub fn matrix(rows: &[&str]) -> IncidenceMatrix {
    IncidenceMatrix::parse(&rows.join("\n"), Delimiter::Whitespace).unwrap()
}

/// Example from Knuth's "Dancing Links" paper, with columns `A` through `G`.
#[allow(dead_code)]
pub fn knuth_example() -> (IncidenceMatrix, Vec<ColumnSpec>) {
    let matrix = matrix(&[
        "0 0 1 0 1 1 0",
        "1 0 0 1 0 0 1",
        "0 1 1 0 0 1 0",
        "1 0 0 1 0 0 0",
        "0 1 0 0 0 0 1",
        "0 0 0 1 1 0 1",
    ]);
    let columns = ["A", "B", "C", "D", "E", "F", "G"]
        .into_iter()
        .map(ColumnSpec::primary)
        .collect();

    (matrix, columns)
}

/// Assert that `solution` selects rows covering every primary column exactly
/// once and every secondary column at most once, and that each row lists its
/// column names in matrix order.
#[allow(dead_code)]
pub fn assert_exact_cover(matrix: &IncidenceMatrix, columns: &[ColumnSpec], solution: &Solution) {
    let mut coverage: HashMap<usize, usize> = HashMap::new();

    for row in &solution.rows {
        let expected: Vec<_> = matrix
            .row(row.index)
            .iter()
            .map(|&column| columns[column].name.clone())
            .collect();
        assert_eq!(row.columns, expected, "row [{}] columns", row.index);

        for &column in matrix.row(row.index) {
            *coverage.entry(column).or_default() += 1;
        }
    }

    for (index, spec) in columns.iter().enumerate() {
        let count = coverage.get(&index).copied().unwrap_or(0);
        if spec.primary {
            assert_eq!(count, 1, "primary column [{}] coverage", spec.name);
        } else {
            assert!(count <= 1, "secondary column [{}] covered {} times", spec.name, count);
        }
    }
}

/// Count exact covers by trying every subset of the rows that touch at least
/// one primary column. The empty selection is not counted.
///
/// # Panics
///  - If there are more than 20 candidate rows.
#[allow(dead_code)]
pub fn brute_force_count(matrix: &IncidenceMatrix, columns: &[ColumnSpec]) -> usize {
    let candidates: Vec<&[usize]> = matrix
        .rows()
        .filter(|row| row.iter().any(|&column| columns[column].primary))
        .collect();
    assert!(candidates.len() <= 20, "too many rows to brute force");

    (1u32..(1 << candidates.len()))
        .filter(|subset| {
            let mut coverage = vec![0usize; columns.len()];
            for (index, row) in candidates.iter().enumerate() {
                if subset & (1 << index) != 0 {
                    for &column in row.iter() {
                        coverage[column] += 1;
                    }
                }
            }

            columns
                .iter()
                .zip(&coverage)
                .all(|(spec, &count)| if spec.primary { count == 1 } else { count <= 1 })
        })
        .count()
}

/// Small deterministic generator for random test matrices.
#[allow(dead_code)]
pub struct XorShift(pub u64);

#[allow(dead_code)]
impl XorShift {
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Return true with probability `numerator / 8`.
    pub fn chance(&mut self, numerator: u64) -> bool {
        self.next_u64() % 8 < numerator
    }

    /// Generate a random problem with up to `max_rows` rows and
    /// `max_columns` columns, roughly a third of them secondary.
    pub fn problem(
        &mut self,
        max_rows: usize,
        max_columns: usize,
    ) -> (IncidenceMatrix, Vec<ColumnSpec>) {
        let num_columns = 1 + (self.next_u64() as usize) % max_columns;
        let num_rows = (self.next_u64() as usize) % (max_rows + 1);

        let columns: Vec<_> = (0..num_columns)
            .map(|index| {
                if self.chance(3) {
                    ColumnSpec::secondary(format!("s{}", index))
                } else {
                    ColumnSpec::primary(format!("p{}", index))
                }
            })
            .collect();

        let mut matrix = IncidenceMatrix::new(num_columns);
        for _ in 0..num_rows {
            let entries: Vec<bool> = (0..num_columns).map(|_| self.chance(2)).collect();
            matrix.push_row(entries).unwrap();
        }

        (matrix, columns)
    }
}
