//! Run the exact cover solver on the `n` queens puzzle or on a 0/1 matrix
//! read from a file.
//!
//! Usage:
//!
//! ```bash
//! cargo run --release --example dlx queens 8
//! cargo run --release --example dlx matrix input.csv --comma
//! RUST_LOG=debug cargo run --example dlx matrix input.txt
//! ```

use dlx_torus::{
    queens::NQueens, ColumnSpec, Delimiter, IncidenceMatrix, LogObserver, ReportWriter, Solver,
};
use std::{error::Error, fs, io, process, time::Instant};

fn usage() -> ! {
    eprintln!("usage: dlx queens <n> | dlx matrix <file> [--comma]");
    process::exit(1);
}

type Problem = (IncidenceMatrix, Vec<ColumnSpec>, Option<String>);

fn load_problem(args: &[String]) -> Result<Problem, Box<dyn Error>> {
    match args {
        [kind, side_length] if kind == "queens" => {
            let queens = NQueens::new(side_length.parse()?);
            Ok((
                queens.matrix().clone(),
                queens.columns().to_vec(),
                Some(queens.description()),
            ))
        }
        [kind, path, rest @ ..] if kind == "matrix" => {
            let delimiter = match rest {
                [] => Delimiter::Whitespace,
                [flag] if flag == "--comma" => Delimiter::Comma,
                _ => usage(),
            };
            let matrix = IncidenceMatrix::parse(&fs::read_to_string(path)?, delimiter)?;
            let columns = ColumnSpec::numbered(matrix.num_columns());
            Ok((matrix, columns, None))
        }
        _ => usage(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (matrix, columns, description) = load_problem(&args)?;

    let start = Instant::now();
    let mut solver = Solver::from_matrix(&matrix, &columns)?;
    let mut report = ReportWriter::new(io::stdout().lock());
    report.write_problem(&matrix, description.as_deref());

    let found = if log::log_enabled!(log::Level::Debug) {
        solver.with_observer(LogObserver).run(&mut report)
    } else {
        solver.run(&mut report)
    };
    report.finish()?;

    if found == 0 {
        eprintln!("No solutions were found, the problem may not be well defined.");
    } else {
        eprintln!("Found {} solutions.", found);
    }
    eprintln!("--- {:.3} seconds ---", start.elapsed().as_secs_f64());

    Ok(())
}
