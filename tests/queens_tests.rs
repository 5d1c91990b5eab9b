mod common;

use common::assert_exact_cover;
use dlx_torus::{queens::NQueens, ReportWriter};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

// Counts from https://oeis.org/A000170
const KNOWN_COUNTS: [usize; 8] = [1, 0, 0, 2, 10, 4, 40, 92];

#[test]
fn enumerate_small_boards() {
    // Every board gets its own structure, so the solves can run side by side.
    let counts: Vec<_> = (1..=KNOWN_COUNTS.len())
        .into_par_iter()
        .map(|side_length| NQueens::new(side_length).solver().unwrap().count())
        .collect();

    assert_eq!(counts, KNOWN_COUNTS);
}

#[test]
fn eight_queens_solutions_are_exact_covers() {
    let queens = NQueens::new(8);
    let solutions = queens.solver().unwrap().all_solutions();

    assert_eq!(solutions.len(), 92);
    for solution in &solutions {
        assert_eq!(solution.rows.len(), 8);
        assert_exact_cover(queens.matrix(), queens.columns(), solution);

        let placements = queens.placements(solution);
        for (index, a) in placements.iter().enumerate() {
            for b in &placements[index + 1..] {
                assert_ne!(a.rank, b.rank);
                assert_ne!(a.file, b.file);
                assert_ne!(a.rank + b.file, b.rank + a.file);
                assert_ne!(a.rank + a.file, b.rank + b.file);
            }
        }
    }
}

#[test]
fn repeated_solves_agree() {
    let queens = NQueens::new(6);
    let first = queens.solver().unwrap().all_solutions();
    let second = queens.solver().unwrap().all_solutions();

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[test]
fn four_queens_report() {
    let queens = NQueens::new(4);
    let mut report = ReportWriter::new(Vec::new());

    assert_eq!(queens.solver().unwrap().run(&mut report), 2);

    let output = String::from_utf8(report.finish().unwrap()).unwrap();
    assert!(output.starts_with("Solutions:\n\nSolution 1\n"));
    assert!(output.contains("\nSolution 2\n"));
    assert!(!output.contains("Solution 3"));
    assert_eq!(output.matches("Rank ").count(), 8);
}

#[test]
#[ignore = "takes several seconds when not running in release mode"]
fn enumerate_larger_boards() {
    let counts: Vec<_> = [9, 10]
        .into_par_iter()
        .map(|side_length| NQueens::new(side_length).solver().unwrap().count())
        .collect();

    assert_eq!(counts, vec![352, 724]);
}
