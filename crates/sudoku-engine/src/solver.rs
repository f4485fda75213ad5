//! Constraint propagation with a backtracking fallback.
//!
//! The board is swept in scan order, deducing digits cell by cell, until a
//! full sweep stops making progress. The search then guesses on the first
//! open cell: each remaining candidate is applied to a deep clone of the
//! board and the whole algorithm recurses into the clone, so a failed
//! branch never leaks state into its parent.

use log::debug;

use crate::error::PuzzleError;
use crate::grid::Grid;

/// Outcome of testing one candidate digit against a cell's row, column,
/// and box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// The digit already occurs in the cell's row, column, or box.
    Impossible,
    /// The digit fits and completes a row, column, or box that has eight
    /// cells filled.
    Forced,
    /// The digit fits but nothing commits it yet.
    Possible,
}

/// Solving engine for a single 9x9 puzzle.
///
/// Owns the board for its whole lifecycle: construct it from the initial
/// values, run [`solve`](Solver::solve), then read the result back with
/// [`puzzle`](Solver::puzzle). After a failed solve the board keeps
/// whatever progress propagation made; it is not rolled back.
pub struct Solver {
    grid: Grid,
}

impl Solver {
    /// Build a solver from 9 rows of 9 values, 0 meaning empty.
    pub fn new(rows: &[Vec<u8>]) -> Result<Self, PuzzleError> {
        Ok(Self {
            grid: Grid::from_rows(rows)?,
        })
    }

    /// Build a solver from an existing board.
    pub fn from_grid(grid: Grid) -> Self {
        Self { grid }
    }

    /// Attempt to fill the board completely, reporting whether it worked.
    ///
    /// A board whose givens already conflict is reported unsolvable up
    /// front, before any propagation runs.
    pub fn solve(&mut self) -> bool {
        if !self.grid.is_consistent() {
            debug!("givens conflict, puzzle is unsolvable");
            return false;
        }
        solve_grid(&mut self.grid)
    }

    /// Current values, row-major, 0 for cells still open.
    pub fn puzzle(&self) -> [[u8; 9]; 9] {
        self.grid.snapshot()
    }

    /// The board in its current state.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

/// Runs propagation sweeps over the whole board until a sweep stops making
/// progress, then branches on the first open cell. Recurses into itself
/// for every guess, on a clone of the board.
fn solve_grid(grid: &mut Grid) -> bool {
    // Open cells left after the previous sweep; -1 until one has run.
    let mut prev_unsolved: i32 = -1;

    loop {
        let mut unsolved: i32 = 0;

        for index in 0..81 {
            let (x, y) = (index % 9, index / 9);
            if grid.cell(x, y).is_empty() && !deduce(grid, x, y) {
                unsolved += 1;
            }
        }

        if unsolved == prev_unsolved {
            debug!("propagation stalled with {} open cells", unsolved);
            for index in 0..81 {
                let (x, y) = (index % 9, index / 9);
                if grid.cell(x, y).is_empty() {
                    return branch(grid, x, y);
                }
            }
        }

        prev_unsolved = unsolved;
        if unsolved == 0 {
            return true;
        }
    }
}

/// Tries each remaining candidate of `(x, y)`, smallest first, on a deep
/// clone of the board. The first clone that solves completely replaces the
/// caller's board. Tried candidates are consumed from the original cell,
/// so an outer search level never retries a failed digit.
fn branch(grid: &mut Grid, x: usize, y: usize) -> bool {
    while let Some(guess) = grid.cell_mut(x, y).pop_front_candidate() {
        debug!("guessing {} at ({}, {})", guess, x, y);

        let mut child = grid.clone();
        child.assign(x, y, guess);

        if solve_grid(&mut child) {
            *grid = child;
            return true;
        }
    }

    false
}

/// One propagation step for the cell at `(x, y)`. Reports whether the cell
/// holds a digit afterwards.
fn deduce(grid: &mut Grid, x: usize, y: usize) -> bool {
    if !grid.cell(x, y).is_empty() {
        return true;
    }

    let mut candidates = grid.cell_mut(x, y).take_candidates();

    if !candidates.is_empty() {
        // Re-test the cached list; walk it back to front so removals keep
        // the remaining indices stable.
        for i in (0..candidates.len()).rev() {
            match classify(grid, x, y, candidates[i]) {
                Verdict::Impossible => {
                    candidates.remove(i);
                }
                Verdict::Forced => {
                    grid.assign(x, y, candidates[i]);
                    return true;
                }
                Verdict::Possible => {}
            }
        }
    } else {
        // First visit, or a fully pruned cache: test every digit.
        for value in 1..=9u8 {
            match classify(grid, x, y, value) {
                Verdict::Impossible => {}
                Verdict::Forced => {
                    grid.assign(x, y, value);
                    return true;
                }
                Verdict::Possible => candidates.push(value),
            }
        }
    }

    if candidates.len() == 1 {
        grid.assign(x, y, candidates[0]);
        return true;
    }

    grid.cell_mut(x, y).store_candidates(candidates);
    false
}

/// Tests `value` for the cell at `(x, y)` against its row, column, and
/// box, counting how full each of those units already is.
fn classify(grid: &Grid, x: usize, y: usize, value: u8) -> Verdict {
    let mut row_filled = 0;
    let mut col_filled = 0;

    for i in 0..9 {
        if grid.value(i, y) == Some(value) || grid.value(x, i) == Some(value) {
            return Verdict::Impossible;
        }

        if grid.value(i, y).is_some() {
            row_filled += 1;
        }
        if grid.value(x, i).is_some() {
            col_filled += 1;
        }
    }

    let (bx, by) = (x / 3 * 3, y / 3 * 3);
    let mut box_filled = 0;

    for i in 0..9 {
        let (cx, cy) = (bx + i % 3, by + i / 3);
        if grid.value(cx, cy) == Some(value) {
            return Verdict::Impossible;
        }
        if grid.value(cx, cy).is_some() {
            box_filled += 1;
        }
    }

    // Eight filled cells in a unit and no conflict: this digit is the one
    // that completes it.
    if row_filled == 8 || col_filled == 8 || box_filled == 8 {
        Verdict::Forced
    } else {
        Verdict::Possible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const EASY_SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    // Arto Inkala's "AI Escargot" (2006) and his 2012 puzzle, both with
    // known unique solutions.
    const AI_ESCARGOT: &str =
        "100007090030020008009600500005300900010080002600004000300000010040000007007000300";
    const AI_ESCARGOT_SOLVED: &str =
        "162857493534129678789643521475312986913586742628794135356478219241935867897261354";
    const INKALA_2012: &str =
        "800000000003600000070090200050007000000045700000100030001000068008500010090000400";
    const INKALA_2012_SOLVED: &str =
        "812753649943682175675491283154237896369845721287169534521974368438526917796318452";

    fn solver_for(puzzle: &str) -> Solver {
        Solver::from_grid(Grid::from_string(puzzle).unwrap())
    }

    fn snapshot_string(solver: &Solver) -> String {
        solver
            .puzzle()
            .iter()
            .flatten()
            .map(|&value| char::from(b'0' + value))
            .collect()
    }

    fn assert_solved(solver: &Solver) {
        assert!(solver.grid().is_complete());
        assert!(solver.grid().is_consistent());
    }

    fn assert_givens_kept(puzzle: &str, solver: &Solver) {
        let result = solver.puzzle();
        for (index, c) in puzzle.chars().enumerate() {
            let given = c.to_digit(10).unwrap() as u8;
            if given != 0 {
                assert_eq!(result[index / 9][index % 9], given);
            }
        }
    }

    #[test]
    fn test_solve_easy() {
        let mut solver = solver_for(EASY);
        assert!(solver.solve());
        assert_solved(&solver);
        assert_givens_kept(EASY, &solver);
        assert_eq!(snapshot_string(&solver), EASY_SOLVED);
    }

    #[test]
    fn test_solved_input_is_untouched() {
        let mut solver = solver_for(EASY_SOLVED);
        assert!(solver.solve());
        assert_eq!(snapshot_string(&solver), EASY_SOLVED);
    }

    #[test]
    fn test_single_open_cell() {
        let mut puzzle = String::from(EASY_SOLVED);
        puzzle.replace_range(40..41, "0");

        let mut solver = solver_for(&puzzle);
        assert_eq!(solver.grid().empty_count(), 1);
        assert!(solver.solve());
        assert_eq!(snapshot_string(&solver), EASY_SOLVED);
    }

    #[test]
    fn test_determinism() {
        // An all-open board has many completions; both runs must pick the
        // same one.
        let empty = "0".repeat(81);
        let mut first = solver_for(&empty);
        let mut second = solver_for(&empty);

        assert!(first.solve());
        assert!(second.solve());
        assert_eq!(first.puzzle(), second.puzzle());
    }

    #[test]
    fn test_empty_grid() {
        let mut solver = solver_for(&"0".repeat(81));
        assert!(solver.solve());
        assert_solved(&solver);
    }

    #[test]
    fn test_hardest_ai_escargot() {
        let mut solver = solver_for(AI_ESCARGOT);
        assert!(solver.solve());
        assert_solved(&solver);
        assert_givens_kept(AI_ESCARGOT, &solver);
        assert_eq!(snapshot_string(&solver), AI_ESCARGOT_SOLVED);
    }

    #[test]
    fn test_hardest_inkala_2012() {
        let mut solver = solver_for(INKALA_2012);
        assert!(solver.solve());
        assert_solved(&solver);
        assert_givens_kept(INKALA_2012, &solver);
        assert_eq!(snapshot_string(&solver), INKALA_2012_SOLVED);
    }

    #[test]
    fn test_rejects_wrong_row_count() {
        assert_eq!(
            Solver::new(&vec![vec![0u8; 9]; 8]).err(),
            Some(PuzzleError::RowCount(8))
        );
    }

    #[test]
    fn test_rejects_wrong_row_length() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[5] = vec![0u8; 8];
        assert_eq!(
            Solver::new(&rows).err(),
            Some(PuzzleError::RowLength { index: 5, found: 8 })
        );
    }

    #[test]
    fn test_conflicting_givens_fail() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][0] = 5;
        rows[0][4] = 5;

        let mut solver = Solver::new(&rows).unwrap();
        assert!(!solver.solve());

        // Rejected before propagation: the board is exactly the input.
        let result = solver.puzzle();
        assert_eq!(result[0][0], 5);
        assert_eq!(result[0][4], 5);
        assert_eq!(solver.grid().empty_count(), 79);
    }

    #[test]
    fn test_search_exhaustion_keeps_progress() {
        // The first row forces its open cell to 9, but column 8 already
        // holds a 9, so the givens are pairwise consistent yet the puzzle
        // has no solution.
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0] = vec![1, 2, 3, 4, 5, 6, 7, 8, 0];
        rows[4][8] = 9;

        let mut solver = Solver::new(&rows).unwrap();
        assert!(!solver.solve());
        assert!(!solver.grid().is_complete());

        // Every candidate for the dead cell was pruned before the search
        // gave up, and the givens are still in place.
        assert!(solver.grid().cell(8, 0).candidates().is_empty());
        let result = solver.puzzle();
        assert_eq!(result[0][..8], [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(result[4][8], 9);
    }
}
