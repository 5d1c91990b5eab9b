#![no_main]

use dlx_torus::{ColumnSpec, IncidenceMatrix, Torus};
use libfuzzer_sys::fuzz_target;

const MAX_COLUMNS: usize = 8;
const MAX_ROWS: usize = 16;

#[derive(Debug)]
struct SmallProblem {
    matrix: IncidenceMatrix,
    columns: Vec<ColumnSpec>,
}

impl<'a> arbitrary::Arbitrary<'a> for SmallProblem {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let num_columns = u.int_in_range(1..=MAX_COLUMNS)?;
        let columns = (0..num_columns)
            .map(|index| {
                Ok(if u.arbitrary::<bool>()? {
                    ColumnSpec::primary(format!("p{}", index))
                } else {
                    ColumnSpec::secondary(format!("s{}", index))
                })
            })
            .collect::<arbitrary::Result<Vec<_>>>()?;

        let num_rows = u.int_in_range(0..=MAX_ROWS)?;
        let mut matrix = IncidenceMatrix::new(num_columns);
        for _ in 0..num_rows {
            let bits = u.arbitrary::<u8>()?;
            matrix
                .push_row((0..num_columns).map(|column| bits & (1 << column) != 0))
                .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        }

        Ok(SmallProblem { matrix, columns })
    }
}

fuzz_target!(|data: SmallProblem| {
    let pristine = Torus::new(&data.matrix, &data.columns).unwrap();
    let mut solver = pristine.clone().into_solver();

    for solution in solver.by_ref() {
        let mut coverage = vec![0; data.columns.len()];
        for row in &solution.rows {
            for &column in data.matrix.row(row.index) {
                coverage[column] += 1;
            }
        }

        for (spec, count) in data.columns.iter().zip(coverage) {
            assert!(count <= 1);
            assert!(!spec.primary || count == 1);
        }
    }

    pristine.check_consistency().unwrap();
    assert_eq!(solver.into_torus(), pristine);
});
