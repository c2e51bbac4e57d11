//! Toy circuit: `x -> x^2 -> x^3 -> out = x^3 + x + 5`
//!
//! Unrelated to Sudoku; exercises the intermediate-wire and public-output
//! paths with the smallest possible constraint system.

use p3_field::AbstractField;

use crate::board::CubicInput;
use crate::circuit::Circuit;
use crate::error::CircuitError;
use crate::system::{Builder, Lc};
use crate::F;

#[derive(Clone, Copy, Debug, Default)]
pub struct CubicCircuit;

impl Circuit for CubicCircuit {
    type Input = CubicInput;

    const NAME: &'static str = "cubic";

    fn synthesize(&self, b: &mut Builder, input: Option<&CubicInput>) -> Result<(), CircuitError> {
        if let Some(input) = input {
            input.validate()?;
        }

        let x = b.private_input("x", input.map(|i| F::from_canonical_u32(i.x)))?;
        let x2 = b.mul("x2", &Lc::from(x), &Lc::from(x))?;
        let x3 = b.mul("x3", &Lc::from(x2), &Lc::from(x))?;

        let out_lc = Lc::from(x3) + Lc::from(x) + Lc::constant(F::from_canonical_u32(5));
        let out_value = b.value(&out_lc);
        let out = b.public_input("out", out_value)?;
        b.enforce_zero("out", out_lc - Lc::from(out));
        Ok(())
    }
}
