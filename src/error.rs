//! Error types for circuit compilation, witness calculation and checking

use thiserror::Error;

/// Errors surfaced by the circuit toolkit
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("circuit `{0}` is not declared in the build configuration")]
    UnknownCircuit(String),

    #[error("duplicate signal label `{0}`")]
    DuplicateSignal(String),

    #[error("missing witness value for signal `{0}`")]
    MissingInput(String),

    #[error("invalid input record: {0}")]
    InvalidInput(String),

    #[error("witness has {got} signals, constraint system expects {expected}")]
    WitnessShape { expected: usize, got: usize },

    #[error("constant-one signal holds {0}, expected 1")]
    BadOneSignal(u32),

    #[error("constraint #{index} `{label}` unsatisfied: {a} * {b} != {c}")]
    Unsatisfied {
        index: usize,
        label: String,
        a: u32,
        b: u32,
        c: u32,
    },

    #[error("trusted setup supports {capacity} constraints, circuit `{circuit}` has {constraints}")]
    PtauTooSmall {
        circuit: String,
        capacity: usize,
        constraints: usize,
    },

    #[error("invalid build configuration: {0}")]
    Config(String),

    #[error("witness file holds value {0} outside the Baby Bear field")]
    ValueOutOfField(u32),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed witness file: {0}")]
    Witness(#[from] bincode::Error),
}
