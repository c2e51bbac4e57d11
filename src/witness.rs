//! Witness containers
//!
//! A witness is the full signal-value vector of a circuit in allocation
//! order: the constant one, inputs, and every intermediate wire. The labeled
//! view attaches the hierarchical signal labels for fixture assertions.

use std::collections::BTreeMap;
use std::path::Path;

use p3_field::{AbstractField, PrimeField32};
use serde::{Deserialize, Serialize};

use crate::error::CircuitError;
use crate::system::ConstraintSystem;
use crate::{BABY_BEAR_PRIME, F};

/// Full signal-value vector for one circuit evaluation
#[derive(Clone, Debug)]
pub struct Witness {
    values: Vec<F>,
}

/// On-disk witness format: canonical Baby Bear values
#[derive(Serialize, Deserialize)]
struct WitnessFile {
    values: Vec<u32>,
}

impl Witness {
    pub(crate) fn new(values: Vec<F>) -> Self {
        Witness { values }
    }

    pub fn values(&self) -> &[F] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Save to a file as canonical field values
    pub fn save(&self, path: &Path) -> Result<(), CircuitError> {
        let file = WitnessFile {
            values: self.values.iter().map(|v| v.as_canonical_u32()).collect(),
        };
        let data = bincode::serialize(&file)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load a previously saved witness
    pub fn load(path: &Path) -> Result<Self, CircuitError> {
        let data = std::fs::read(path)?;
        let file: WitnessFile = bincode::deserialize(&data)?;
        let values = file
            .values
            .into_iter()
            .map(|v| {
                if v < BABY_BEAR_PRIME {
                    Ok(F::from_canonical_u32(v))
                } else {
                    Err(CircuitError::ValueOutOfField(v))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Witness { values })
    }
}

/// Label-indexed view of a witness
#[derive(Clone, Debug)]
pub struct LabeledWitness {
    entries: BTreeMap<String, F>,
}

impl LabeledWitness {
    pub(crate) fn new(cs: &ConstraintSystem, witness: &Witness) -> Self {
        let entries = cs
            .signals()
            .iter()
            .zip(witness.values())
            .map(|(info, value)| (info.label.clone(), *value))
            .collect();
        LabeledWitness { entries }
    }

    /// Value of a labeled signal, e.g. `main.puzzle[0][0]`
    pub fn value(&self, label: &str) -> Option<F> {
        self.entries.get(label).copied()
    }

    /// Decimal-string view of a labeled signal, matching fixture assertions
    pub fn decimal(&self, label: &str) -> Option<String> {
        self.value(label).map(|v| v.as_canonical_u32().to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &F)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value))
    }
}
