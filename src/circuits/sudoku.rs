//! Full 9x9 Sudoku validity circuit over grid-shaped inputs
//!
//! Public inputs: the puzzle grid (0 means blank) and the solver address.
//! Private inputs: the solution grid. The address bytes carry no Sudoku
//! semantics; each byte is kept live in the witness by a squaring constraint
//! so the binding survives constraint-system optimization.

use p3_field::AbstractField;

use super::rules;
use crate::board::{SudokuInput, ADDRESS_BYTES};
use crate::circuit::Circuit;
use crate::error::CircuitError;
use crate::system::{Builder, Lc, Signal};
use crate::{F, GRID_SIZE, NUM_CELLS};

#[derive(Clone, Copy, Debug, Default)]
pub struct SudokuCircuit;

impl Circuit for SudokuCircuit {
    type Input = SudokuInput;

    const NAME: &'static str = "sudoku";

    fn synthesize(
        &self,
        b: &mut Builder,
        input: Option<&SudokuInput>,
    ) -> Result<(), CircuitError> {
        if let Some(input) = input {
            input.validate()?;
        }

        let mut puzzle = [Signal::ONE; NUM_CELLS];
        let mut solution = [Signal::ONE; NUM_CELLS];
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                let value = input.map(|i| F::from_canonical_u32(i.puzzle[r][c] as u32));
                puzzle[r * GRID_SIZE + c] = b.public_input(format!("puzzle[{r}][{c}]"), value)?;
            }
        }
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                let value = input.map(|i| F::from_canonical_u32(i.solution[r][c] as u32));
                solution[r * GRID_SIZE + c] =
                    b.private_input(format!("solution[{r}][{c}]"), value)?;
            }
        }

        for i in 0..ADDRESS_BYTES {
            let value = input.map(|inp| F::from_canonical_u32(inp.solver_address.0[i] as u32));
            let byte = b.public_input(format!("solverAddress[{i}]"), value)?;
            b.mul(format!("solverAddressSq[{i}]"), &Lc::from(byte), &Lc::from(byte))?;
        }

        rules::enforce_sudoku_rules(b, &puzzle, &solution)
    }
}
