//! Unified error types for cueprep
//!
//! Error strategy:
//! - Structure analysis and raw-input errors: fatal to the run, no result.
//! - Key detection, stem energy, database errors: degradable; the pipeline
//!   continues with documented defaults and records the degradation.
//! - Output errors (result JSON): fatal to the CLI invocation only.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for cueprep operations
#[derive(Debug, Error)]
pub enum CueprepError {
    // =========================================================================
    // Fatal errors - no result can be produced
    // =========================================================================
    #[error("Structure analysis failed for '{path}': {reason}")]
    StructureAnalysis { path: PathBuf, reason: String },

    #[error("Cannot read raw analysis from '{path}': {reason}\n  Tip: Expected the JSON document produced by the analyzer service")]
    RawInput { path: PathBuf, reason: String },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    Output { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    // =========================================================================
    // Degradable errors - pipeline continues with documented defaults
    // =========================================================================
    #[error("Key detection failed for '{path}': {reason}")]
    KeyDetection { path: PathBuf, reason: String },

    #[error("Stem energy measurement failed for '{path}': {reason}")]
    StemEnergy { path: PathBuf, reason: String },

    #[error("VDJ database write failed for '{path}': {reason}")]
    Database { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cueprep operations
pub type Result<T> = std::result::Result<T, CueprepError>;

impl CueprepError {
    /// Returns true if the pipeline can continue with a default in place of
    /// this stage's output
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            CueprepError::KeyDetection { .. }
                | CueprepError::StemEnergy { .. }
                | CueprepError::Database { .. }
        )
    }

    pub fn structure_analysis(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CueprepError::StructureAnalysis {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn raw_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CueprepError::RawInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn key_detection(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CueprepError::KeyDetection {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn stem_energy(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CueprepError::StemEnergy {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn database(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CueprepError::Database {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn output(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CueprepError::Output {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
