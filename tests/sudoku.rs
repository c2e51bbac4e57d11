//! Fixture tests for the declared circuits
//!
//! Covers the three circuit shapes end to end through the machine: the
//! grid-shaped sudoku checker, the flattened layout, and the cubic toy
//! circuit.

use sudoku_circuits::{
    BuildConfig, CircuitError, CircuitMachine, CubicCircuit, CubicInput, FlatSudokuCircuit,
    FlatSudokuInput, Protocol, SudokuCircuit, SudokuInput,
};

fn sample_input() -> SudokuInput {
    SudokuInput {
        puzzle: [
            [0, 0, 0, 2, 6, 0, 7, 0, 1],
            [6, 8, 0, 0, 7, 0, 0, 9, 0],
            [1, 9, 0, 0, 0, 4, 5, 0, 0],
            [8, 2, 0, 1, 0, 0, 0, 4, 0],
            [0, 0, 4, 6, 0, 2, 9, 0, 0],
            [0, 5, 0, 0, 0, 3, 0, 2, 8],
            [0, 0, 9, 3, 0, 0, 0, 7, 4],
            [0, 4, 0, 0, 5, 0, 0, 3, 6],
            [7, 0, 3, 0, 1, 8, 0, 0, 0],
        ],
        solution: [
            [4, 3, 5, 2, 6, 9, 7, 8, 1],
            [6, 8, 2, 5, 7, 1, 4, 9, 3],
            [1, 9, 7, 8, 3, 4, 5, 6, 2],
            [8, 2, 6, 1, 9, 5, 3, 4, 7],
            [3, 7, 4, 6, 8, 2, 9, 1, 5],
            [9, 5, 1, 7, 4, 3, 6, 2, 8],
            [5, 1, 9, 3, 2, 6, 8, 7, 4],
            [2, 4, 8, 9, 5, 7, 1, 3, 6],
            [7, 6, 3, 4, 1, 8, 2, 5, 9],
        ],
        solver_address: "0x2Db8c2615db39a5eD8750B87aC8F217485BE11EC"
            .parse()
            .unwrap(),
    }
}

fn machine() -> CircuitMachine {
    let config = BuildConfig::default()
        .declare("sudoku_flat", Protocol::Groth16)
        .declare("cubic", Protocol::Groth16);
    CircuitMachine::new(config).unwrap()
}

#[test]
fn produces_a_witness_with_valid_constraints() {
    let circuit = machine().setup::<SudokuCircuit>().unwrap();
    let witness = circuit.calculate_witness(&sample_input(), true).unwrap();
    circuit.check_constraints(&witness).unwrap();
}

#[test]
fn has_expected_witness_values() {
    let circuit = machine().setup::<SudokuCircuit>().unwrap();
    let input = sample_input();
    let witness = circuit.calculate_labeled_witness(&input, true).unwrap();
    assert_eq!(
        witness.decimal("main.puzzle[0][0]").as_deref(),
        Some(input.puzzle[0][0].to_string().as_str())
    );
    assert_eq!(
        witness.decimal("main.puzzle[1][0]").as_deref(),
        Some(input.puzzle[1][0].to_string().as_str())
    );
    assert_eq!(
        witness.decimal("main.solution[0][0]").as_deref(),
        Some(input.solution[0][0].to_string().as_str())
    );
    assert_eq!(
        witness.decimal("main.solution[1][0]").as_deref(),
        Some(input.solution[1][0].to_string().as_str())
    );
    for (i, byte) in input.solver_address.bytes().iter().enumerate() {
        assert_eq!(
            witness.decimal(&format!("main.solverAddress[{i}]")).as_deref(),
            Some(byte.to_string().as_str())
        );
    }
}

#[test]
fn rejects_a_tampered_solution() {
    let circuit = machine().setup::<SudokuCircuit>().unwrap();
    let mut input = sample_input();
    // Row 0 now holds two 5s
    input.solution[0][0] = 5;
    assert!(matches!(
        circuit.calculate_witness(&input, true),
        Err(CircuitError::Unsatisfied { .. })
    ));
}

#[test]
fn rejects_a_solution_that_contradicts_the_givens() {
    let circuit = machine().setup::<SudokuCircuit>().unwrap();
    let mut input = sample_input();
    // Cell (0, 3) was given as 2; claim it was 3
    input.puzzle[0][3] = 3;
    assert!(matches!(
        circuit.calculate_witness(&input, true),
        Err(CircuitError::Unsatisfied { .. })
    ));
}

#[test]
fn flat_layout_accepts_the_same_fixture() {
    let circuit = machine().setup::<FlatSudokuCircuit>().unwrap();
    let grid = sample_input();
    let input = FlatSudokuInput::from_grids(&grid.puzzle, &grid.solution, Some(1));
    let witness = circuit.calculate_labeled_witness(&input, true).unwrap();
    assert_eq!(witness.decimal("main.puzzle[3]").as_deref(), Some("2"));
    assert_eq!(witness.decimal("main.solution[0]").as_deref(), Some("4"));
    assert_eq!(witness.decimal("main.puzzleId").as_deref(), Some("1"));
}

#[test]
fn flat_layout_without_identifier_encodes_zero() {
    let circuit = machine().setup::<FlatSudokuCircuit>().unwrap();
    let grid = sample_input();
    let input = FlatSudokuInput::from_grids(&grid.puzzle, &grid.solution, None);
    let witness = circuit.calculate_labeled_witness(&input, true).unwrap();
    assert_eq!(witness.decimal("main.puzzleId").as_deref(), Some("0"));
}

#[test]
fn cubic_has_expected_witness_values() {
    let circuit = machine().setup::<CubicCircuit>().unwrap();
    let witness = circuit
        .calculate_labeled_witness(&CubicInput { x: 2 }, true)
        .unwrap();
    assert_eq!(witness.decimal("main.x2").as_deref(), Some("4"));
    assert_eq!(witness.decimal("main.x3").as_deref(), Some("8"));
    assert_eq!(witness.decimal("main.out").as_deref(), Some("15"));
}

#[test]
fn setup_honours_the_declaration_list() {
    // The default configuration declares only the sudoku circuit
    let machine = CircuitMachine::new(BuildConfig::default()).unwrap();
    machine.setup::<SudokuCircuit>().unwrap();
    assert!(matches!(
        machine.setup::<CubicCircuit>(),
        Err(CircuitError::UnknownCircuit(_))
    ));
}

#[test]
fn saved_witness_can_be_rechecked() {
    let circuit = machine().setup::<SudokuCircuit>().unwrap();
    let witness = circuit.calculate_witness(&sample_input(), false).unwrap();
    let path = std::env::temp_dir().join("sudoku-circuits-integration-witness.bin");
    witness.save(&path).unwrap();
    let loaded = sudoku_circuits::Witness::load(&path).unwrap();
    circuit.check_constraints(&loaded).unwrap();
    std::fs::remove_file(&path).ok();
}
