//! File-based front end for the solving engine.
//!
//! Reads a puzzle from a text file, solves it, and writes the rendered
//! board to `<name>-solved.txt`, or to `<name>-unsolved.txt` with the
//! partial progress when the search fails.

mod puzzle;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use serde::Serialize;
use sudoku_engine::Solver;

/// Solve a 9x9 Sudoku puzzle from a text file.
///
/// Each line of the file is one row: a digit is a cell value (0 for
/// empty), a space is an empty cell, anything else is decoration.
#[derive(Debug, Parser)]
#[command(name = "sudoku-solve", version)]
struct Args {
    /// Path to the puzzle file.
    puzzle: PathBuf,

    /// Write the result to this path instead of next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a JSON report to stdout instead of writing a file.
    #[arg(long)]
    json: bool,
}

/// Machine-readable solve report for `--json`.
#[derive(Debug, Serialize)]
struct Report {
    solved: bool,
    elapsed_ms: f64,
    grid: [[u8; 9]; 9],
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.puzzle)
        .with_context(|| format!("reading {}", args.puzzle.display()))?;
    let rows = puzzle::parse(&text)?;
    debug!("parsed {} rows from {}", rows.len(), args.puzzle.display());

    let mut solver = Solver::new(&rows)?;

    let start = Instant::now();
    let solved = solver.solve();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;

    if args.json {
        let report = Report {
            solved,
            elapsed_ms,
            grid: solver.puzzle(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Solving took {:.3} milliseconds.", elapsed_ms);

    let path = args
        .output
        .unwrap_or_else(|| puzzle::output_path(&args.puzzle, solved));
    fs::write(&path, solver.grid().to_string())
        .with_context(|| format!("writing {}", path.display()))?;

    if solved {
        println!("Sudoku solved. Saved as {}", path.display());
    } else {
        println!(
            "Unable to solve sudoku. Saving current progress as {}",
            path.display()
        );
    }

    Ok(())
}
