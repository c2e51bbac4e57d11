//! Sudoku validity circuit over the flattened input layout
//!
//! Same rules as `sudoku`, but the puzzle and solution arrive as 81-element
//! row-major sequences and the solver address is replaced by an optional
//! numeric puzzle identifier. The identifier signal is always allocated so
//! the witness shape does not depend on its presence; an absent identifier
//! encodes as 0.

use p3_field::AbstractField;

use super::rules;
use crate::board::FlatSudokuInput;
use crate::circuit::Circuit;
use crate::error::CircuitError;
use crate::system::{Builder, Lc, Signal};
use crate::{F, NUM_CELLS};

#[derive(Clone, Copy, Debug, Default)]
pub struct FlatSudokuCircuit;

impl Circuit for FlatSudokuCircuit {
    type Input = FlatSudokuInput;

    const NAME: &'static str = "sudoku_flat";

    fn synthesize(
        &self,
        b: &mut Builder,
        input: Option<&FlatSudokuInput>,
    ) -> Result<(), CircuitError> {
        if let Some(input) = input {
            input.validate()?;
        }

        let mut puzzle = [Signal::ONE; NUM_CELLS];
        let mut solution = [Signal::ONE; NUM_CELLS];
        for i in 0..NUM_CELLS {
            let value = input.map(|inp| F::from_canonical_u32(inp.puzzle[i] as u32));
            puzzle[i] = b.public_input(format!("puzzle[{i}]"), value)?;
        }
        for i in 0..NUM_CELLS {
            let value = input.map(|inp| F::from_canonical_u32(inp.solution[i] as u32));
            solution[i] = b.private_input(format!("solution[{i}]"), value)?;
        }

        let id_value = input.map(|inp| F::from_canonical_u32(inp.puzzle_id.unwrap_or(0)));
        let puzzle_id = b.public_input("puzzleId", id_value)?;
        b.mul("puzzleIdSq", &Lc::from(puzzle_id), &Lc::from(puzzle_id))?;

        rules::enforce_sudoku_rules(b, &puzzle, &solution)
    }
}
