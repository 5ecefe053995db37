//! cueprep - DJ cue point preparation from ML audio analysis
//!
//! The deterministic post-processing and persistence layer downstream of
//! machine-learning audio analysis: turns raw structural/acoustic output
//! (segment boundaries, beat/downbeat grids, per-stem energies, raw key
//! estimate) into DJ-usable artifacts and persists prioritized cue points
//! into a VirtualDJ database.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `analysis`: collaborator trait seams plus the pure transformations
//!   (key notation, beat-grid snapping/counting, EDM reclassification)
//! - `pipeline`: stage orchestration with per-stage degradation
//! - `export`: VDJ database.xml merge and result JSON output
//!
//! # Example
//!
//! ```no_run
//! use cueprep::analysis::PrecomputedAnalysis;
//! use cueprep::config::Settings;
//! use cueprep::pipeline::{self, Backends};
//! use std::path::Path;
//!
//! let raw = PrecomputedAnalysis::load(Path::new("track.analysis.json"))
//!     .expect("raw analysis");
//! let backends = Backends {
//!     structure: &raw,
//!     key: &raw,
//!     stems: &raw,
//! };
//! let settings = Settings::default();
//! let result = pipeline::analyze(Path::new("track.m4a"), None, &settings, &backends)
//!     .expect("analysis failed");
//! println!("BPM {:.1}, {} segments", result.bpm, result.segments.len());
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod types;

// Re-export key types at crate root
pub use error::{CueprepError, Result};
pub use types::{AnalysisResult, RawSegment, SegmentInfo, StageOutcome, StructureAnalysis};
