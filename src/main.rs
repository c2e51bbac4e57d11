//! Command-line front end for the sudoku circuit toolkit

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use sudoku_circuits::{
    BuildConfig, Circuit, CircuitMachine, CubicCircuit, FlatSudokuCircuit, Protocol,
    SudokuCircuit, Witness,
};

#[derive(Parser)]
#[command(
    name = "sudoku-circuits",
    version,
    about = "Compile circuits, calculate witnesses and check constraints"
)]
struct Cli {
    /// Build configuration file (JSON); defaults to the built-in declarations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the circuits declared in the build configuration
    Circuits,
    /// Calculate a witness from a JSON input record
    Witness {
        #[arg(long)]
        circuit: String,
        #[arg(long)]
        input: PathBuf,
        /// Write the witness to this file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Skip the constraint check after witness calculation
        #[arg(long)]
        no_sanity_check: bool,
    },
    /// Check a witness against the compiled constraint system
    Check {
        #[arg(long)]
        circuit: String,
        /// JSON input record to recompute the witness from
        #[arg(long)]
        input: Option<PathBuf>,
        /// Previously saved witness file
        #[arg(long)]
        witness: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => BuildConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => builtin_config(),
    };
    let machine = CircuitMachine::new(config)?;

    match cli.command {
        Command::Circuits => {
            for decl in &machine.config().circuits {
                println!("{} ({})", decl.name, decl.protocol);
            }
            Ok(())
        }
        Command::Witness {
            circuit,
            input,
            out,
            no_sanity_check,
        } => match circuit.as_str() {
            "sudoku" => witness_for::<SudokuCircuit>(&machine, &input, out.as_deref(), !no_sanity_check),
            "sudoku_flat" => {
                witness_for::<FlatSudokuCircuit>(&machine, &input, out.as_deref(), !no_sanity_check)
            }
            "cubic" => witness_for::<CubicCircuit>(&machine, &input, out.as_deref(), !no_sanity_check),
            other => bail!("unknown circuit `{other}`"),
        },
        Command::Check {
            circuit,
            input,
            witness,
        } => match circuit.as_str() {
            "sudoku" => check_for::<SudokuCircuit>(&machine, input.as_deref(), witness.as_deref()),
            "sudoku_flat" => {
                check_for::<FlatSudokuCircuit>(&machine, input.as_deref(), witness.as_deref())
            }
            "cubic" => check_for::<CubicCircuit>(&machine, input.as_deref(), witness.as_deref()),
            other => bail!("unknown circuit `{other}`"),
        },
    }
}

/// The built-in declaration list: the original build file's `sudoku` entry
/// plus the two auxiliary circuit shapes.
fn builtin_config() -> BuildConfig {
    BuildConfig::default()
        .declare("sudoku_flat", Protocol::Groth16)
        .declare("cubic", Protocol::Groth16)
}

fn load_input<I: DeserializeOwned>(path: &Path) -> Result<I> {
    let data =
        std::fs::read(path).with_context(|| format!("reading input {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing input {}", path.display()))
}

fn witness_for<C>(
    machine: &CircuitMachine,
    input: &Path,
    out: Option<&Path>,
    sanity_check: bool,
) -> Result<()>
where
    C: Circuit + Default,
    C::Input: DeserializeOwned,
{
    let compiled = machine.setup::<C>()?;
    let record: C::Input = load_input(input)?;
    let witness = compiled.calculate_witness(&record, sanity_check)?;
    println!(
        "{}: witness with {} signals ({} constraints)",
        C::NAME,
        witness.len(),
        compiled.num_constraints()
    );
    if let Some(out) = out {
        witness.save(out)?;
        println!("witness written to {}", out.display());
    }
    Ok(())
}

fn check_for<C>(
    machine: &CircuitMachine,
    input: Option<&Path>,
    witness_path: Option<&Path>,
) -> Result<()>
where
    C: Circuit + Default,
    C::Input: DeserializeOwned,
{
    let compiled = machine.setup::<C>()?;
    let witness = match (input, witness_path) {
        (_, Some(path)) => Witness::load(path)?,
        (Some(path), None) => {
            let record: C::Input = load_input(path)?;
            compiled.calculate_witness(&record, false)?
        }
        (None, None) => bail!("provide --input or --witness"),
    };
    compiled.check_constraints(&witness)?;
    println!(
        "{}: all {} constraints satisfied",
        C::NAME,
        compiled.num_constraints()
    );
    Ok(())
}
