//! Puzzle file parsing and output naming.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Parse a puzzle file into rows of cell values, 0 meaning empty.
///
/// Within a line, a digit is a cell value and a space is an empty cell;
/// any other character is skipped as decoration. A line with more than
/// nine cells is rejected; shorter lines are padded with empty cells. The
/// board shape itself is validated by the engine.
pub fn parse(text: &str) -> Result<Vec<Vec<u8>>> {
    let mut rows = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let mut row = Vec::new();

        for c in line.chars() {
            if row.len() == 9 {
                bail!("line {} has more than 9 cells", number + 1);
            }

            if c == ' ' {
                row.push(0);
            } else if let Some(digit) = c.to_digit(10) {
                row.push(digit as u8);
            }
        }

        row.resize(9, 0);
        rows.push(row);
    }

    Ok(rows)
}

/// Where to save the result: the input name with its extension replaced
/// by a `-solved.txt` or `-unsolved.txt` suffix.
pub fn output_path(input: &Path, solved: bool) -> PathBuf {
    let suffix = if solved { "-solved.txt" } else { "-unsolved.txt" };
    let mut name = input
        .file_stem()
        .unwrap_or_else(|| input.as_os_str())
        .to_os_string();
    name.push(suffix);
    input.with_file_name(name)
}
