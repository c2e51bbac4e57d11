//! Rank-1 constraint system over Baby Bear
//!
//! Circuits are flattened into rank-1 rows `a * b = c` where each side is a
//! linear combination of labeled signals. Witness index 0 is the constant-one
//! signal; every other signal is allocated during synthesis, in a fixed order
//! shared by the compile pass and the witness pass.

use std::collections::BTreeMap;
use std::ops::{Add, Sub};

use p3_field::{Field, AbstractField, PrimeField32};
use tracing::debug;

use crate::error::CircuitError;
use crate::F;

/// Handle to an allocated signal (an index into the witness vector)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signal(pub(crate) usize);

impl Signal {
    /// The constant-one signal
    pub const ONE: Signal = Signal(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Signal visibility
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    Constant,
    PublicInput,
    PrivateInput,
    Aux,
}

/// Label and visibility of an allocated signal
#[derive(Clone, Debug)]
pub struct SignalInfo {
    pub label: String,
    pub kind: SignalKind,
}

/// Linear combination of signals plus a constant term
#[derive(Clone, Debug)]
pub struct Lc {
    terms: Vec<(Signal, F)>,
    constant: F,
}

impl Lc {
    pub fn zero() -> Self {
        Lc {
            terms: Vec::new(),
            constant: F::zero(),
        }
    }

    pub fn constant(value: F) -> Self {
        Lc {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn term(signal: Signal, coeff: F) -> Self {
        Lc {
            terms: vec![(signal, coeff)],
            constant: F::zero(),
        }
    }

    /// Evaluate against a witness vector
    pub fn eval(&self, values: &[F]) -> F {
        self.terms
            .iter()
            .fold(self.constant, |acc, (s, coeff)| acc + values[s.0] * *coeff)
    }
}

impl Default for Lc {
    fn default() -> Self {
        Lc::zero()
    }
}

impl From<Signal> for Lc {
    fn from(signal: Signal) -> Self {
        Lc::term(signal, F::one())
    }
}

impl Add for Lc {
    type Output = Lc;

    fn add(mut self, rhs: Lc) -> Lc {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Sub for Lc {
    type Output = Lc;

    fn sub(mut self, rhs: Lc) -> Lc {
        self.terms
            .extend(rhs.terms.into_iter().map(|(s, coeff)| (s, -coeff)));
        self.constant -= rhs.constant;
        self
    }
}

impl Add<Signal> for Lc {
    type Output = Lc;

    fn add(self, rhs: Signal) -> Lc {
        self + Lc::from(rhs)
    }
}

impl Sub<Signal> for Lc {
    type Output = Lc;

    fn sub(self, rhs: Signal) -> Lc {
        self - Lc::from(rhs)
    }
}

/// A rank-1 row: `a * b = c`
#[derive(Clone, Debug)]
pub struct Constraint {
    pub a: Lc,
    pub b: Lc,
    pub c: Lc,
    pub label: String,
}

/// Compiled signal table and constraint list
#[derive(Clone, Debug)]
pub struct ConstraintSystem {
    signals: Vec<SignalInfo>,
    constraints: Vec<Constraint>,
    index: BTreeMap<String, usize>,
}

impl ConstraintSystem {
    fn new() -> Self {
        let mut cs = ConstraintSystem {
            signals: Vec::new(),
            constraints: Vec::new(),
            index: BTreeMap::new(),
        };
        // Index 0 is the constant-one signal
        cs.signals.push(SignalInfo {
            label: "one".to_string(),
            kind: SignalKind::Constant,
        });
        cs.index.insert("one".to_string(), 0);
        cs
    }

    pub fn num_signals(&self) -> usize {
        self.signals.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_public_inputs(&self) -> usize {
        self.signals
            .iter()
            .filter(|s| s.kind == SignalKind::PublicInput)
            .count()
    }

    pub fn signals(&self) -> &[SignalInfo] {
        &self.signals
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Witness index of a labeled signal
    pub fn signal_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    fn push_signal(&mut self, label: String, kind: SignalKind) -> Result<Signal, CircuitError> {
        if self.index.contains_key(&label) {
            return Err(CircuitError::DuplicateSignal(label));
        }
        let signal = Signal(self.signals.len());
        self.index.insert(label.clone(), signal.0);
        self.signals.push(SignalInfo { label, kind });
        Ok(signal)
    }

    /// Check every rank-1 row against a witness vector
    pub fn check(&self, values: &[F]) -> Result<(), CircuitError> {
        if values.len() != self.signals.len() {
            return Err(CircuitError::WitnessShape {
                expected: self.signals.len(),
                got: values.len(),
            });
        }
        if values[0] != F::one() {
            return Err(CircuitError::BadOneSignal(values[0].as_canonical_u32()));
        }
        for (i, constraint) in self.constraints.iter().enumerate() {
            let a = constraint.a.eval(values);
            let b = constraint.b.eval(values);
            let c = constraint.c.eval(values);
            if a * b != c {
                debug!(constraint = i, label = %constraint.label, "constraint unsatisfied");
                return Err(CircuitError::Unsatisfied {
                    index: i,
                    label: constraint.label.clone(),
                    a: a.as_canonical_u32(),
                    b: b.as_canonical_u32(),
                    c: c.as_canonical_u32(),
                });
            }
        }
        Ok(())
    }
}

/// Synthesis context shared by the compile pass and the witness pass
///
/// In compile mode values are ignored; in witness mode every allocation must
/// carry a value. Both passes must allocate identical signal and constraint
/// sequences, which the compiled-circuit handle verifies at witness time.
pub struct Builder {
    cs: ConstraintSystem,
    values: Vec<F>,
    witness_mode: bool,
}

impl Builder {
    pub(crate) fn compile_mode() -> Self {
        Builder {
            cs: ConstraintSystem::new(),
            values: Vec::new(),
            witness_mode: false,
        }
    }

    pub(crate) fn witness_mode() -> Self {
        Builder {
            cs: ConstraintSystem::new(),
            values: vec![F::one()],
            witness_mode: true,
        }
    }

    fn alloc(
        &mut self,
        label: String,
        kind: SignalKind,
        value: Option<F>,
    ) -> Result<Signal, CircuitError> {
        let label = format!("main.{label}");
        if self.witness_mode {
            let value = value.ok_or_else(|| CircuitError::MissingInput(label.clone()))?;
            self.values.push(value);
        }
        self.cs.push_signal(label, kind)
    }

    pub fn public_input(
        &mut self,
        label: impl Into<String>,
        value: Option<F>,
    ) -> Result<Signal, CircuitError> {
        self.alloc(label.into(), SignalKind::PublicInput, value)
    }

    pub fn private_input(
        &mut self,
        label: impl Into<String>,
        value: Option<F>,
    ) -> Result<Signal, CircuitError> {
        self.alloc(label.into(), SignalKind::PrivateInput, value)
    }

    pub fn aux(
        &mut self,
        label: impl Into<String>,
        value: Option<F>,
    ) -> Result<Signal, CircuitError> {
        self.alloc(label.into(), SignalKind::Aux, value)
    }

    /// Evaluate a linear combination over the values assigned so far
    ///
    /// Returns `None` in compile mode.
    pub fn value(&self, lc: &Lc) -> Option<F> {
        self.witness_mode.then(|| lc.eval(&self.values))
    }

    pub fn enforce(&mut self, label: impl Into<String>, a: Lc, b: Lc, c: Lc) {
        self.cs.constraints.push(Constraint {
            a,
            b,
            c,
            label: label.into(),
        });
    }

    pub fn enforce_zero(&mut self, label: impl Into<String>, lc: Lc) {
        self.enforce(label, lc, Lc::from(Signal::ONE), Lc::zero());
    }

    /// Allocate `a * b` as a new aux signal and enforce the product
    pub fn mul(
        &mut self,
        label: impl Into<String>,
        a: &Lc,
        b: &Lc,
    ) -> Result<Signal, CircuitError> {
        let label = label.into();
        let value = match (self.value(a), self.value(b)) {
            (Some(x), Some(y)) => Some(x * y),
            _ => None,
        };
        let signal = self.aux(label.clone(), value)?;
        self.enforce(label, a.clone(), b.clone(), Lc::from(signal));
        Ok(signal)
    }

    /// Allocate the multiplicative inverse of `x` and enforce `x * inv = 1`
    ///
    /// The hint is 0 when `x` evaluates to 0, which leaves the constraint
    /// unsatisfied; this is the nonzero-proof gadget.
    pub fn inverse(&mut self, label: impl Into<String>, x: &Lc) -> Result<Signal, CircuitError> {
        let label = label.into();
        let value = self
            .value(x)
            .map(|v| v.try_inverse().unwrap_or(F::zero()));
        let signal = self.aux(label.clone(), value)?;
        self.enforce(label, x.clone(), Lc::from(signal), Lc::constant(F::one()));
        Ok(signal)
    }

    pub(crate) fn finish(self) -> (ConstraintSystem, Vec<F>) {
        (self.cs, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lc_eval_combines_terms_and_constant() {
        let values = [F::one(), F::from_canonical_u32(3), F::from_canonical_u32(5)];
        let lc = Lc::term(Signal(1), F::from_canonical_u32(2))
            + Lc::from(Signal(2))
            + Lc::constant(F::from_canonical_u32(7));
        assert_eq!(lc.eval(&values), F::from_canonical_u32(18));
    }

    #[test]
    fn mul_records_a_satisfiable_product() {
        let mut b = Builder::witness_mode();
        let x = b
            .private_input("x", Some(F::from_canonical_u32(6)))
            .unwrap();
        let y = b
            .private_input("y", Some(F::from_canonical_u32(7)))
            .unwrap();
        b.mul("xy", &Lc::from(x), &Lc::from(y)).unwrap();
        let (cs, mut values) = b.finish();
        assert_eq!(cs.num_constraints(), 1);
        cs.check(&values).unwrap();

        // Tampering with the product breaks the row
        values[3] = F::from_canonical_u32(41);
        assert!(matches!(
            cs.check(&values),
            Err(CircuitError::Unsatisfied { index: 0, .. })
        ));
    }

    #[test]
    fn inverse_of_zero_is_unsatisfiable() {
        let mut b = Builder::witness_mode();
        let x = b.private_input("x", Some(F::zero())).unwrap();
        b.inverse("xInv", &Lc::from(x)).unwrap();
        let (cs, values) = b.finish();
        assert!(matches!(
            cs.check(&values),
            Err(CircuitError::Unsatisfied { .. })
        ));
    }

    #[test]
    fn inverse_of_nonzero_satisfies() {
        let mut b = Builder::witness_mode();
        let x = b
            .private_input("x", Some(F::from_canonical_u32(1234)))
            .unwrap();
        b.inverse("xInv", &Lc::from(x)).unwrap();
        let (cs, values) = b.finish();
        cs.check(&values).unwrap();
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let mut b = Builder::compile_mode();
        b.public_input("x", None).unwrap();
        assert!(matches!(
            b.public_input("x", None),
            Err(CircuitError::DuplicateSignal(_))
        ));
    }

    #[test]
    fn witness_mode_requires_values() {
        let mut b = Builder::witness_mode();
        assert!(matches!(
            b.public_input("x", None),
            Err(CircuitError::MissingInput(_))
        ));
    }

    #[test]
    fn check_rejects_a_corrupted_one_signal() {
        let mut b = Builder::witness_mode();
        b.private_input("x", Some(F::one())).unwrap();
        let (cs, mut values) = b.finish();
        values[0] = F::from_canonical_u32(2);
        assert!(matches!(
            cs.check(&values),
            Err(CircuitError::BadOneSignal(2))
        ));
    }
}
