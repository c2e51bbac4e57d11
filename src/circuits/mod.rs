//! The declared circuit shapes
//!
//! - `sudoku`: full 9x9 validity checker over grid-shaped inputs
//! - `sudoku_flat`: same rules over the flattened input layout
//! - `cubic`: the toy circuit `x -> x^2 -> x^3 -> out`

pub mod cubic;
pub mod rules;
pub mod sudoku;
pub mod sudoku_flat;

pub use cubic::CubicCircuit;
pub use sudoku::SudokuCircuit;
pub use sudoku_flat::FlatSudokuCircuit;
