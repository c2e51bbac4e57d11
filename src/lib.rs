//! Sudoku circuit toolkit
//!
//! Compiles the declared arithmetic circuits into rank-1 constraint systems
//! over the Baby Bear field, computes witnesses from structured input records,
//! and checks constraint satisfaction.
//!
//! # Architecture
//!
//! - Constraint core: labeled signals, linear combinations, rank-1 rows
//! - Circuits: `sudoku` (grid layout), `sudoku_flat` (flattened layout),
//!   `cubic` (toy `x -> x^2 -> x^3 -> out`)
//! - Machine: build-config declarations to compiled circuit handles, with
//!   trusted-setup capacity checks

pub mod board;
pub mod circuit;
pub mod circuits;
pub mod config;
pub mod error;
pub mod machine;
pub mod system;
pub mod witness;

pub use board::{CubicInput, FlatSudokuInput, SolverAddress, SudokuInput};
pub use circuit::{Circuit, CompiledCircuit};
pub use circuits::{CubicCircuit, FlatSudokuCircuit, SudokuCircuit};
pub use config::{BuildConfig, CircuitDecl, Protocol};
pub use error::CircuitError;
pub use machine::CircuitMachine;
pub use system::{Builder, Constraint, ConstraintSystem, Lc, Signal};
pub use witness::{LabeledWitness, Witness};

use p3_baby_bear::BabyBear;

/// The field type used throughout the crate (Baby Bear: p = 2^31 - 2^27 + 1)
pub type F = BabyBear;

/// Baby Bear prime: 2^31 - 2^27 + 1 = 2013265921
pub const BABY_BEAR_PRIME: u32 = 2013265921;

/// Side length of the Sudoku grid
pub const GRID_SIZE: usize = 9;

/// Side length of a sub-grid box
pub const BOX_SIZE: usize = 3;

/// Total number of grid cells
pub const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;
