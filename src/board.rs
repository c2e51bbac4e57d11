//! Input records for the declared circuits
//!
//! These are the structured fixtures fed into witness calculation: a
//! puzzle/solution pair (grid-shaped or flattened), and the single-integer
//! record for the cubic toy circuit. Blank puzzle cells are 0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CircuitError;
use crate::{BABY_BEAR_PRIME, GRID_SIZE, NUM_CELLS};

/// Number of bytes in a solver address
pub const ADDRESS_BYTES: usize = 20;

/// 20-byte Ethereum-style address identifying the solver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverAddress(pub [u8; ADDRESS_BYTES]);

impl SolverAddress {
    pub fn bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }
}

impl FromStr for SolverAddress {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(hex_part)
            .map_err(|e| CircuitError::InvalidInput(format!("solver address: {e}")))?;
        let bytes: [u8; ADDRESS_BYTES] = bytes.try_into().map_err(|_| {
            CircuitError::InvalidInput(format!("solver address must be {ADDRESS_BYTES} bytes"))
        })?;
        Ok(SolverAddress(bytes))
    }
}

impl fmt::Display for SolverAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl TryFrom<String> for SolverAddress {
    type Error = CircuitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SolverAddress> for String {
    fn from(addr: SolverAddress) -> String {
        addr.to_string()
    }
}

impl Serialize for SolverAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SolverAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn check_puzzle_cell(label: &str, value: u8) -> Result<(), CircuitError> {
    if value > 9 {
        return Err(CircuitError::InvalidInput(format!(
            "{label} holds {value}, expected 0..=9"
        )));
    }
    Ok(())
}

fn check_solution_cell(label: &str, value: u8) -> Result<(), CircuitError> {
    if value == 0 || value > 9 {
        return Err(CircuitError::InvalidInput(format!(
            "{label} holds {value}, expected 1..=9"
        )));
    }
    Ok(())
}

/// Grid-shaped puzzle/solution pair for the `sudoku` circuit
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SudokuInput {
    pub puzzle: [[u8; GRID_SIZE]; GRID_SIZE],
    pub solution: [[u8; GRID_SIZE]; GRID_SIZE],
    #[serde(rename = "solverAddress")]
    pub solver_address: SolverAddress,
}

impl SudokuInput {
    pub fn validate(&self) -> Result<(), CircuitError> {
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                check_puzzle_cell(&format!("puzzle[{r}][{c}]"), self.puzzle[r][c])?;
                check_solution_cell(&format!("solution[{r}][{c}]"), self.solution[r][c])?;
            }
        }
        Ok(())
    }
}

/// Flattened puzzle/solution pair for the `sudoku_flat` circuit
///
/// The optional `puzzleId` identifier is bound into the witness; an absent
/// identifier encodes as 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlatSudokuInput {
    pub puzzle: Vec<u8>,
    pub solution: Vec<u8>,
    #[serde(rename = "puzzleId", default, skip_serializing_if = "Option::is_none")]
    pub puzzle_id: Option<u32>,
}

impl FlatSudokuInput {
    /// Flatten a grid-shaped input, dropping the solver address
    pub fn from_grids(
        puzzle: &[[u8; GRID_SIZE]; GRID_SIZE],
        solution: &[[u8; GRID_SIZE]; GRID_SIZE],
        puzzle_id: Option<u32>,
    ) -> Self {
        FlatSudokuInput {
            puzzle: puzzle.iter().flatten().copied().collect(),
            solution: solution.iter().flatten().copied().collect(),
            puzzle_id,
        }
    }

    pub fn validate(&self) -> Result<(), CircuitError> {
        if self.puzzle.len() != NUM_CELLS {
            return Err(CircuitError::InvalidInput(format!(
                "puzzle has {} cells, expected {NUM_CELLS}",
                self.puzzle.len()
            )));
        }
        if self.solution.len() != NUM_CELLS {
            return Err(CircuitError::InvalidInput(format!(
                "solution has {} cells, expected {NUM_CELLS}",
                self.solution.len()
            )));
        }
        for (i, &cell) in self.puzzle.iter().enumerate() {
            check_puzzle_cell(&format!("puzzle[{i}]"), cell)?;
        }
        for (i, &cell) in self.solution.iter().enumerate() {
            check_solution_cell(&format!("solution[{i}]"), cell)?;
        }
        if let Some(id) = self.puzzle_id {
            if id >= BABY_BEAR_PRIME {
                return Err(CircuitError::InvalidInput(format!(
                    "puzzleId {id} does not fit in the Baby Bear field"
                )));
            }
        }
        Ok(())
    }
}

/// Single-integer record for the `cubic` circuit
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CubicInput {
    pub x: u32,
}

impl CubicInput {
    pub fn validate(&self) -> Result<(), CircuitError> {
        if self.x >= BABY_BEAR_PRIME {
            return Err(CircuitError::InvalidInput(format!(
                "x = {} does not fit in the Baby Bear field",
                self.x
            )));
        }
        Ok(())
    }
}
