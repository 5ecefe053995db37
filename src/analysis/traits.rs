//! Collaborator trait abstractions
//!
//! The ML analysis itself lives in external services; these traits define the
//! seams the pipeline consumes them through, so backends are swappable
//! without changing orchestration code.

use crate::error::Result;
use crate::types::{RawKey, SegmentSpan, StemEnergies, StructureAnalysis};
use std::path::Path;

/// Structure analysis backend: BPM, beat/downbeat grids, raw segments
///
/// This is the pipeline's hard prerequisite; a failure here is fatal to the
/// run.
pub trait StructureAnalyzer: Send + Sync {
    fn analyze(&self, audio_path: &Path) -> Result<StructureAnalysis>;

    /// Get the name of this backend (for logging)
    fn name(&self) -> &'static str;
}

/// Musical key detection backend
///
/// Failures degrade to an empty key; they never abort the run.
pub trait KeyDetector: Send + Sync {
    fn detect(&self, audio_path: &Path) -> Result<RawKey>;

    /// Get the name of this backend (for logging)
    fn name(&self) -> &'static str;
}

/// Per-segment stem energy source
///
/// Returns drum/bass RMS magnitudes for each requested span it has evidence
/// for; spans without evidence are simply absent from the result. Failures
/// degrade to "no evidence". Implementations own any transient decoded-stem
/// storage and must release it on every return path, success or failure.
pub trait StemEnergyAnalyzer: Send + Sync {
    fn measure(&self, audio_path: &Path, spans: &[SegmentSpan]) -> Result<StemEnergies>;

    /// Get the name of this backend (for logging)
    fn name(&self) -> &'static str;
}
