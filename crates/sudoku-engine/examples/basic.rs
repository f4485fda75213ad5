//! Basic example of using the solving engine.

use sudoku_engine::{Grid, Solver};

fn main() {
    let puzzle =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let grid = Grid::from_string(puzzle).expect("valid 81-character puzzle");

    println!("Puzzle ({} empty cells):", grid.empty_count());
    println!("{}", grid);

    let mut solver = Solver::from_grid(grid);
    if solver.solve() {
        println!("\nSolution:");
    } else {
        println!("\nNo solution found; best progress:");
    }
    println!("{}", solver.grid());
}
