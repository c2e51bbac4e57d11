//! Setup orchestration
//!
//! Turns build-configuration declarations into compiled circuit handles,
//! checking that the declared trusted-setup ceremony covers the compiled
//! constraint count.

use tracing::info;

use crate::circuit::{Circuit, CompiledCircuit};
use crate::config::BuildConfig;
use crate::error::CircuitError;

pub struct CircuitMachine {
    config: BuildConfig,
}

impl CircuitMachine {
    pub fn new(config: BuildConfig) -> Result<Self, CircuitError> {
        config.validate()?;
        Ok(CircuitMachine { config })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Compile a declared circuit
    pub fn setup<C: Circuit + Default>(&self) -> Result<CompiledCircuit<C>, CircuitError> {
        let decl = self
            .config
            .circuit(C::NAME)
            .ok_or_else(|| CircuitError::UnknownCircuit(C::NAME.to_string()))?;
        let compiled = CompiledCircuit::compile(C::default(), decl.protocol)?;
        let capacity = self.config.ptau_capacity()?;
        if compiled.num_constraints() > capacity {
            return Err(CircuitError::PtauTooSmall {
                circuit: C::NAME.to_string(),
                capacity,
                constraints: compiled.num_constraints(),
            });
        }
        info!(
            circuit = C::NAME,
            protocol = %decl.protocol,
            constraints = compiled.num_constraints(),
            signals = compiled.num_signals(),
            "circuit ready"
        );
        Ok(compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::{CubicCircuit, SudokuCircuit};
    use crate::config::Protocol;

    #[test]
    fn setup_compiles_declared_circuits() {
        let machine = CircuitMachine::new(BuildConfig::default()).unwrap();
        let circuit = machine.setup::<SudokuCircuit>().unwrap();
        assert_eq!(circuit.name(), "sudoku");
        assert_eq!(circuit.protocol(), Protocol::Groth16);
        assert!(circuit.num_constraints() > 0);
    }

    #[test]
    fn setup_rejects_undeclared_circuits() {
        let machine = CircuitMachine::new(BuildConfig::default()).unwrap();
        assert!(matches!(
            machine.setup::<CubicCircuit>(),
            Err(CircuitError::UnknownCircuit(name)) if name == "cubic"
        ));
    }

    #[test]
    fn setup_rejects_an_undersized_ceremony() {
        let mut config = BuildConfig::default();
        config.ptau = "https://example.com/powersOfTau28_hez_final_8.ptau".to_string();
        let machine = CircuitMachine::new(config).unwrap();
        // The sudoku system has well over 2^8 constraints
        assert!(matches!(
            machine.setup::<SudokuCircuit>(),
            Err(CircuitError::PtauTooSmall { .. })
        ));
    }
}
