//! Shared Sudoku rule constraints
//!
//! The rules over 81 puzzle signals and 81 solution signals (row-major):
//! - puzzle cells range over 0..=9 (0 means blank);
//! - solution cells range over 1..=9;
//! - a non-blank puzzle cell must equal its solution cell;
//! - the 9 cells of every row, column and box hold pairwise-distinct values.
//!
//! Ranges use chained-product constraints; distinctness uses nonzero proofs
//! on cell differences with witness-supplied inverse hints.

use p3_field::AbstractField;

use crate::error::CircuitError;
use crate::system::{Builder, Lc, Signal};
use crate::{BOX_SIZE, F, GRID_SIZE, NUM_CELLS};

/// Rows, columns and boxes: 27 units of 9 cells each
pub const NUM_UNITS: usize = 3 * GRID_SIZE;

/// Cell indices of one unit
///
/// Units 0..9 are rows, 9..18 columns, 18..27 boxes (row-major box order).
pub fn unit_cells(unit: usize) -> [usize; GRID_SIZE] {
    let mut cells = [0usize; GRID_SIZE];
    if unit < GRID_SIZE {
        let row = unit;
        for (c, cell) in cells.iter_mut().enumerate() {
            *cell = row * GRID_SIZE + c;
        }
    } else if unit < 2 * GRID_SIZE {
        let col = unit - GRID_SIZE;
        for (r, cell) in cells.iter_mut().enumerate() {
            *cell = r * GRID_SIZE + col;
        }
    } else {
        let b = unit - 2 * GRID_SIZE;
        let base_row = (b / BOX_SIZE) * BOX_SIZE;
        let base_col = (b % BOX_SIZE) * BOX_SIZE;
        for (i, cell) in cells.iter_mut().enumerate() {
            let r = base_row + i / BOX_SIZE;
            let c = base_col + i % BOX_SIZE;
            *cell = r * GRID_SIZE + c;
        }
    }
    cells
}

/// Constrain a cell to `lo..=hi` via `(cell - lo)(cell - lo - 1)...(cell - hi) = 0`
///
/// The product is chained through aux signals; the final factor closes the
/// chain to zero in a single rank-1 row.
fn enforce_cell_range(
    b: &mut Builder,
    cell: Signal,
    lo: u32,
    hi: u32,
    base: &str,
) -> Result<(), CircuitError> {
    let mut acc = Lc::from(cell) - Lc::constant(F::from_canonical_u32(lo));
    for k in (lo + 1)..hi {
        let factor = Lc::from(cell) - Lc::constant(F::from_canonical_u32(k));
        let partial = b.mul(format!("{base}.acc[{k}]"), &acc, &factor)?;
        acc = Lc::from(partial);
    }
    let last = Lc::from(cell) - Lc::constant(F::from_canonical_u32(hi));
    b.enforce(format!("{base}.close"), acc, last, Lc::zero());
    Ok(())
}

/// Enforce the full rule set over row-major puzzle and solution signals
pub fn enforce_sudoku_rules(
    b: &mut Builder,
    puzzle: &[Signal; NUM_CELLS],
    solution: &[Signal; NUM_CELLS],
) -> Result<(), CircuitError> {
    for i in 0..NUM_CELLS {
        enforce_cell_range(b, puzzle[i], 0, 9, &format!("puzzleRange[{i}]"))?;
        enforce_cell_range(b, solution[i], 1, 9, &format!("solutionRange[{i}]"))?;
        // Blank puzzle cells are free; given cells must match the solution
        b.enforce(
            format!("given[{i}]"),
            Lc::from(puzzle[i]),
            Lc::from(solution[i]) - Lc::from(puzzle[i]),
            Lc::zero(),
        );
    }
    for unit in 0..NUM_UNITS {
        let cells = unit_cells(unit);
        for i in 0..GRID_SIZE {
            for j in (i + 1)..GRID_SIZE {
                let diff = Lc::from(solution[cells[i]]) - Lc::from(solution[cells[j]]);
                b.inverse(format!("distinct[{unit}][{i}][{j}]"), &diff)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CircuitError;

    #[test]
    fn unit_cells_cover_rows_columns_and_boxes() {
        assert_eq!(unit_cells(0)[..3], [0, 1, 2]);
        assert_eq!(unit_cells(8)[..2], [72, 73]);
        // Column 0: cells 0, 9, 18, ...
        assert_eq!(unit_cells(9)[..3], [0, 9, 18]);
        // Top-left box: rows 0..3, columns 0..3
        assert_eq!(unit_cells(18), [0, 1, 2, 9, 10, 11, 18, 19, 20]);
        // Bottom-right box starts at cell (6, 6)
        assert_eq!(unit_cells(26)[0], 6 * GRID_SIZE + 6);
    }

    #[test]
    fn every_cell_appears_in_three_units() {
        let mut counts = [0usize; NUM_CELLS];
        for unit in 0..NUM_UNITS {
            for cell in unit_cells(unit) {
                counts[cell] += 1;
            }
        }
        assert!(counts.iter().all(|&c| c == 3));
    }

    #[test]
    fn cell_range_accepts_in_range_values() {
        for v in 0..=9u32 {
            let mut b = Builder::witness_mode();
            let cell = b.private_input("cell", Some(F::from_canonical_u32(v))).unwrap();
            enforce_cell_range(&mut b, cell, 0, 9, "range").unwrap();
            let (cs, values) = b.finish();
            cs.check(&values).unwrap();
        }
    }

    #[test]
    fn cell_range_rejects_out_of_range_values() {
        let mut b = Builder::witness_mode();
        let cell = b.private_input("cell", Some(F::from_canonical_u32(10))).unwrap();
        enforce_cell_range(&mut b, cell, 0, 9, "range").unwrap();
        let (cs, values) = b.finish();
        assert!(matches!(
            cs.check(&values),
            Err(CircuitError::Unsatisfied { .. })
        ));
    }

    #[test]
    fn solution_range_rejects_blanks() {
        let mut b = Builder::witness_mode();
        let cell = b.private_input("cell", Some(F::zero())).unwrap();
        enforce_cell_range(&mut b, cell, 1, 9, "range").unwrap();
        let (cs, values) = b.finish();
        assert!(matches!(
            cs.check(&values),
            Err(CircuitError::Unsatisfied { .. })
        ));
    }
}
