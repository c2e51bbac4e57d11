//! Build configuration for the circuit set
//!
//! A declarative list of circuits to compile, the proving protocol each one
//! targets, and the trusted-setup (powers-of-tau) parameter source. Proving
//! itself is out of scope; the ceremony size is still validated against the
//! compiled constraint count at setup time.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CircuitError;

/// Default powers-of-tau source: the Hermez ceremony, 2^15 constraints
pub const DEFAULT_PTAU_URL: &str =
    "https://hermezptau.blob.core.windows.net/ptau/powersOfTau28_hez_final_15.ptau";

/// Proving protocol a circuit is declared for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Groth16,
    Plonk,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Groth16 => write!(f, "groth16"),
            Protocol::Plonk => write!(f, "plonk"),
        }
    }
}

/// One circuit declaration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitDecl {
    pub name: String,
    pub protocol: Protocol,
}

/// The full build configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(rename = "inputBasePath")]
    pub input_base_path: PathBuf,
    /// URL of the powers-of-tau parameter file
    pub ptau: String,
    pub circuits: Vec<CircuitDecl>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            input_base_path: PathBuf::from("./circuits"),
            ptau: DEFAULT_PTAU_URL.to_string(),
            circuits: vec![CircuitDecl {
                name: "sudoku".to_string(),
                protocol: Protocol::Groth16,
            }],
        }
    }
}

impl BuildConfig {
    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, CircuitError> {
        let data = std::fs::read(path)?;
        let config: BuildConfig = serde_json::from_slice(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Add a circuit declaration (builder style)
    pub fn declare(mut self, name: &str, protocol: Protocol) -> Self {
        self.circuits.push(CircuitDecl {
            name: name.to_string(),
            protocol,
        });
        self
    }

    /// Declaration for a named circuit, if present
    pub fn circuit(&self, name: &str) -> Option<&CircuitDecl> {
        self.circuits.iter().find(|c| c.name == name)
    }

    /// Constraint capacity of the declared powers-of-tau ceremony
    ///
    /// The degree is parsed from the file name, e.g.
    /// `powersOfTau28_hez_final_15.ptau` supports `2^15` constraints.
    pub fn ptau_capacity(&self) -> Result<usize, CircuitError> {
        let file = self.ptau.rsplit('/').next().unwrap_or(&self.ptau);
        let stem = file.strip_suffix(".ptau").ok_or_else(|| {
            CircuitError::Config(format!("ptau source `{file}` is not a .ptau file"))
        })?;
        let degree: u32 = stem
            .rsplit('_')
            .next()
            .and_then(|d| d.parse().ok())
            .ok_or_else(|| {
                CircuitError::Config(format!("cannot parse ceremony degree from `{file}`"))
            })?;
        if degree == 0 || degree > 28 {
            return Err(CircuitError::Config(format!(
                "ceremony degree {degree} out of range (1..=28)"
            )));
        }
        Ok(1usize << degree)
    }

    pub fn validate(&self) -> Result<(), CircuitError> {
        if self.circuits.is_empty() {
            return Err(CircuitError::Config("no circuits declared".to_string()));
        }
        for (i, decl) in self.circuits.iter().enumerate() {
            if decl.name.is_empty() {
                return Err(CircuitError::Config("empty circuit name".to_string()));
            }
            if self.circuits[..i].iter().any(|d| d.name == decl.name) {
                return Err(CircuitError::Config(format!(
                    "circuit `{}` declared twice",
                    decl.name
                )));
            }
        }
        if !self.ptau.starts_with("https://") && !self.ptau.starts_with("http://") {
            return Err(CircuitError::Config(format!(
                "ptau source `{}` is not an http(s) URL",
                self.ptau
            )));
        }
        self.ptau_capacity()?;
        Ok(())
    }
}
