//! Circuit trait and compiled-circuit handles

use tracing::debug;

use crate::config::Protocol;
use crate::error::CircuitError;
use crate::system::{Builder, ConstraintSystem};
use crate::witness::{LabeledWitness, Witness};

/// A circuit shape that can be synthesized into rank-1 constraints
///
/// `synthesize` runs twice per circuit: once without an input to compile the
/// constraint system, and once per witness calculation with the concrete
/// input record. Both passes must allocate the same signals and constraints.
pub trait Circuit {
    /// Structured input record feeding the witness pass
    type Input;

    /// Name used by build-configuration declarations
    const NAME: &'static str;

    fn synthesize(
        &self,
        builder: &mut Builder,
        input: Option<&Self::Input>,
    ) -> Result<(), CircuitError>;
}

/// A compiled circuit: the constraint system plus the declared protocol
pub struct CompiledCircuit<C: Circuit> {
    circuit: C,
    cs: ConstraintSystem,
    protocol: Protocol,
}

impl<C: Circuit> CompiledCircuit<C> {
    /// Compile the circuit by running a valueless synthesis pass
    pub fn compile(circuit: C, protocol: Protocol) -> Result<Self, CircuitError> {
        let mut builder = Builder::compile_mode();
        circuit.synthesize(&mut builder, None)?;
        let (cs, _) = builder.finish();
        debug!(
            circuit = C::NAME,
            signals = cs.num_signals(),
            constraints = cs.num_constraints(),
            "compiled constraint system"
        );
        Ok(CompiledCircuit {
            circuit,
            cs,
            protocol,
        })
    }

    pub fn name(&self) -> &'static str {
        C::NAME
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn num_signals(&self) -> usize {
        self.cs.num_signals()
    }

    pub fn num_constraints(&self) -> usize {
        self.cs.num_constraints()
    }

    pub fn constraint_system(&self) -> &ConstraintSystem {
        &self.cs
    }

    /// Run the witness pass over a concrete input record
    ///
    /// With `sanity_check` set, the witness is checked against every
    /// constraint before it is returned.
    pub fn calculate_witness(
        &self,
        input: &C::Input,
        sanity_check: bool,
    ) -> Result<Witness, CircuitError> {
        let mut builder = Builder::witness_mode();
        self.circuit.synthesize(&mut builder, Some(input))?;
        let (cs, values) = builder.finish();
        if cs.num_signals() != self.cs.num_signals()
            || cs.num_constraints() != self.cs.num_constraints()
        {
            return Err(CircuitError::WitnessShape {
                expected: self.cs.num_signals(),
                got: cs.num_signals(),
            });
        }
        let witness = Witness::new(values);
        if sanity_check {
            self.check_constraints(&witness)?;
        }
        Ok(witness)
    }

    /// Witness calculation with signal labels attached
    pub fn calculate_labeled_witness(
        &self,
        input: &C::Input,
        sanity_check: bool,
    ) -> Result<LabeledWitness, CircuitError> {
        let witness = self.calculate_witness(input, sanity_check)?;
        Ok(LabeledWitness::new(&self.cs, &witness))
    }

    /// Check a witness against every rank-1 row of the compiled system
    pub fn check_constraints(&self, witness: &Witness) -> Result<(), CircuitError> {
        self.cs.check(witness.values())
    }
}
