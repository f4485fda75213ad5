//! Core engine for solving standard 9x9 Sudoku puzzles.
//!
//! The engine interleaves two phases: constraint propagation sweeps that
//! deduce digits from row, column, and box constraints, and a backtracking
//! search that guesses on a cloned board whenever propagation stalls.
//!
//! ```
//! use sudoku_engine::{Grid, Solver};
//!
//! let puzzle =
//!     "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
//! let mut solver = Solver::from_grid(Grid::from_string(puzzle).unwrap());
//!
//! assert!(solver.solve());
//! assert!(solver.grid().is_complete());
//! ```

mod error;
mod grid;
mod solver;

pub use error::PuzzleError;
pub use grid::{Cell, Grid};
pub use solver::Solver;
