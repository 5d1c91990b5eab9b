//! Solutions and the consumers that receive them.
//!
//! A [`Solution`] is detached from the toroidal structure as soon as it is
//! found, so sinks may keep it around while the search moves on.

use crate::{
    error::{Error, Result},
    matrix::IncidenceMatrix,
};
use std::{fmt, io};

/// One selected row of a solution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolutionRow {
    /// Index of the row in the original matrix.
    pub index: usize,
    /// Names of the columns this row covers, in original column order.
    pub columns: Vec<String>,
}

impl fmt::Display for SolutionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns.join(", "))
    }
}

/// A set of rows covering every primary column exactly once.
///
/// Rows are listed in the order the search selected them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    /// The selected rows.
    pub rows: Vec<SolutionRow>,
}

impl Solution {
    /// Return the matrix indices of the selected rows, in selection order.
    pub fn row_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|row| row.index)
    }

    /// Return the matrix indices of the selected rows in ascending order.
    pub fn sorted_row_indices(&self) -> Vec<usize> {
        let mut indices: Vec<_> = self.row_indices().collect();
        indices.sort_unstable();
        indices
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}

/// Receives each solution as soon as the search finds it.
pub trait SolutionSink {
    /// Accept one solution.
    fn accept(&mut self, solution: Solution);
}

impl SolutionSink for Vec<Solution> {
    fn accept(&mut self, solution: Solution) {
        self.push(solution);
    }
}

impl<F> SolutionSink for F
where
    F: FnMut(Solution),
{
    fn accept(&mut self, solution: Solution) {
        self(solution)
    }
}

/// Sink that writes numbered solutions as text.
///
/// A report may open with [`ReportWriter::write_problem`], which describes the
/// problem before any solution is written.
///
/// The first write error is kept and later solutions are dropped; it is
/// returned by [`ReportWriter::finish`] so a failing writer never interrupts
/// the search feeding this sink.
#[derive(Debug)]
pub struct ReportWriter<W> {
    writer: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: io::Write> ReportWriter<W> {
    /// Create a report writer on top of `writer`.
    pub fn new(writer: W) -> Self {
        ReportWriter {
            writer,
            written: 0,
            error: None,
        }
    }

    /// Return the number of solutions accepted so far.
    pub fn solutions(&self) -> usize {
        self.written
    }

    /// Write the report preamble, an optional description of the problem and
    /// the matrix being solved, one line of space separated `0`s and `1`s per
    /// row.
    ///
    /// Errors are kept until [`ReportWriter::finish`] like solution errors.
    pub fn write_problem(&mut self, matrix: &IncidenceMatrix, description: Option<&str>) {
        if self.error.is_some() {
            return;
        }

        if let Err(err) = self.write_problem_inner(matrix, description) {
            log::debug!("Dropping report output after write error [{}].", err);
            self.error = Some(err);
        }
    }

    fn write_problem_inner(
        &mut self,
        matrix: &IncidenceMatrix,
        description: Option<&str>,
    ) -> io::Result<()> {
        writeln!(self.writer, "Exact cover by Algorithm X with dancing links.")?;
        writeln!(
            self.writer,
            "Every solution of the problem below is listed by the names of the columns each selected row covers.\n"
        )?;
        if let Some(description) = description {
            writeln!(self.writer, "{}\n", description)?;
        }

        writeln!(
            self.writer,
            "Matrix with [{}] rows and [{}] columns:",
            matrix.num_rows(),
            matrix.num_columns()
        )?;
        for row in 0..matrix.num_rows() {
            let line: Vec<&str> = (0..matrix.num_columns())
                .map(|column| if matrix.get(row, column) { "1" } else { "0" })
                .collect();
            writeln!(self.writer, "{}", line.join(" "))?;
        }
        writeln!(self.writer)
    }

    fn write_solution(&mut self, solution: &Solution) -> io::Result<()> {
        if self.written == 1 {
            write!(self.writer, "Solutions:\n\n")?;
        }
        writeln!(self.writer, "Solution {}", self.written)?;
        writeln!(self.writer, "{}", solution)
    }

    /// Flush the writer and return it, or the first error encountered.
    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(Error::Io(err));
        }

        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: io::Write> SolutionSink for ReportWriter<W> {
    fn accept(&mut self, solution: Solution) {
        self.written += 1;
        if self.error.is_some() {
            return;
        }

        if let Err(err) = self.write_solution(&solution) {
            log::debug!("Dropping report output after write error [{}].", err);
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(rows: &[(usize, &[&str])]) -> Solution {
        Solution {
            rows: rows
                .iter()
                .map(|(index, columns)| SolutionRow {
                    index: *index,
                    columns: columns.iter().map(|name| name.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn report_format() {
        let mut report = ReportWriter::new(Vec::new());
        report.accept(solution(&[(3, &["A", "D"]), (0, &["C", "E", "F"])]));
        report.accept(solution(&[(1, &["B"])]));
        assert_eq!(report.solutions(), 2);

        let output = String::from_utf8(report.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "Solutions:\n\nSolution 1\nA, D\nC, E, F\n\nSolution 2\nB\n\n"
        );
    }

    struct FailingWriter {
        attempts: usize,
    }

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_error_is_kept_until_finish() {
        let mut report = ReportWriter::new(FailingWriter { attempts: 0 });
        report.accept(solution(&[(0, &["A"])]));
        report.accept(solution(&[(1, &["A"])]));

        assert_eq!(report.solutions(), 2);
        assert_eq!(report.writer.attempts, 1);
        assert!(matches!(report.finish(), Err(Error::Io(_))));
    }

    #[test]
    fn problem_preamble_echoes_matrix() {
        let mut matrix = IncidenceMatrix::new(3);
        matrix.push_row([true, false, true]).unwrap();
        matrix.push_row([false, true, false]).unwrap();

        let mut report = ReportWriter::new(Vec::new());
        report.write_problem(&matrix, Some("Two rows."));
        report.accept(solution(&[(0, &["A", "C"]), (1, &["B"])]));

        let output = String::from_utf8(report.finish().unwrap()).unwrap();
        assert!(output.starts_with("Exact cover by Algorithm X"));
        assert!(output.contains("\n\nTwo rows.\n\n"));
        assert!(output.contains(
            "Matrix with [2] rows and [3] columns:\n1 0 1\n0 1 0\n\nSolutions:\n\nSolution 1\nA, C\nB\n\n"
        ));
    }

    #[test]
    fn problem_write_error_is_kept() {
        let mut report = ReportWriter::new(FailingWriter { attempts: 0 });
        report.write_problem(&IncidenceMatrix::new(1), None);
        report.accept(solution(&[(0, &["A"])]));

        assert_eq!(report.solutions(), 1);
        assert_eq!(report.writer.attempts, 1);
        assert!(matches!(report.finish(), Err(Error::Io(_))));
    }

    #[test]
    fn sorted_indices() {
        let found = solution(&[(4, &["B", "G"]), (0, &["C"]), (3, &["A"])]);

        assert_eq!(found.row_indices().collect::<Vec<_>>(), vec![4, 0, 3]);
        assert_eq!(found.sorted_row_indices(), vec![0, 3, 4]);
        assert_eq!(found.to_string(), "B, G\nC\nA\n");
    }

    #[test]
    fn closures_and_vectors_are_sinks() {
        let mut count = 0;
        let mut counter = |_solution: Solution| count += 1;
        counter.accept(solution(&[(0, &["A"])]));
        assert_eq!(count, 1);

        let mut all: Vec<Solution> = Vec::new();
        all.accept(solution(&[(0, &["A"])]));
        assert_eq!(all.len(), 1);
    }
}
