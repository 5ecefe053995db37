//! Core data types for cueprep
//!
//! These types represent the domain model and flow through the pipeline.
//! Everything here is per-invocation data: raw collaborator output comes in,
//! a single [`AnalysisResult`] goes out, nothing is cached between runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Musical primitives
// =============================================================================

/// Major or Minor scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Parse the scale name reported by an external key model
    /// (e.g. essentia reports `"major"` / `"minor"`)
    pub fn from_scale_name(scale: &str) -> Option<Self> {
        match scale.to_ascii_lowercase().as_str() {
            "major" => Some(Mode::Major),
            "minor" => Some(Mode::Minor),
            _ => None,
        }
    }
}

/// Raw key estimate from the external key-detection model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawKey {
    /// Pitch class as the model names it (e.g. "C", "F#", "Bb")
    pub pitch_class: String,
    /// Major or Minor
    pub mode: Mode,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f64,
}

// =============================================================================
// Structure analysis output
// =============================================================================

/// A structural segment as returned by the external structure model
///
/// Labels are an open vocabulary ("chorus", "break", "verse", ...); unknown
/// values are mapped with a documented fallback rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    pub label: String,
    /// Segment start in seconds
    pub start: f64,
    /// Segment end in seconds
    pub end: f64,
}

/// Everything the structure model produces for one track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureAnalysis {
    pub bpm: f64,
    /// Beat timestamps in seconds, ascending
    pub beats: Vec<f64>,
    /// Downbeat timestamps in seconds, ascending
    pub downbeats: Vec<f64>,
    pub segments: Vec<RawSegment>,
}

// =============================================================================
// Stem energy evidence
// =============================================================================

/// Hashable key for the exact `(start, end)` pair of a [`RawSegment`]
///
/// Stem energies are keyed by the segment's exact time span; the lookup must
/// match bit-for-bit, so the span stores the raw f64 bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentSpan {
    start_bits: u64,
    end_bits: u64,
}

impl SegmentSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start_bits: start.to_bits(),
            end_bits: end.to_bits(),
        }
    }

    pub fn start(&self) -> f64 {
        f64::from_bits(self.start_bits)
    }

    pub fn end(&self) -> f64 {
        f64::from_bits(self.end_bits)
    }
}

impl From<&RawSegment> for SegmentSpan {
    fn from(seg: &RawSegment) -> Self {
        Self::new(seg.start, seg.end)
    }
}

/// Per-stem RMS magnitudes for one segment span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StemEnergy {
    pub drums: f64,
    pub bass: f64,
}

/// Stem energies keyed by exact segment span
///
/// Absence of a key means "no energy evidence" for that segment, never zero
/// energy.
pub type StemEnergies = HashMap<SegmentSpan, StemEnergy>;

// =============================================================================
// Classified segments
// =============================================================================

/// A segment with its EDM label, before beat alignment
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSegment {
    /// EDM label, possibly suffixed with a 1-based ordinal (e.g. "Drop 1")
    pub label: String,
    /// The source model's label, preserved for traceability
    pub original_label: String,
    pub start: f64,
    pub end: f64,
}

/// Final beat-aligned segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub label: String,
    pub original_label: String,
    /// Start in seconds, snapped to the nearest downbeat
    pub start: f64,
    /// End in seconds, snapped to the nearest downbeat
    pub end: f64,
    /// Bar count over the snapped range; at least 1 whenever `end > start`
    pub bars: usize,
}

// =============================================================================
// Pipeline result
// =============================================================================

/// Complete post-processed analysis for a single track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub bpm: f64,
    /// Standard key notation (e.g. "Am"); empty when key detection degraded
    pub key: String,
    /// Camelot wheel notation (e.g. "8A"); empty when key detection degraded
    pub key_camelot: String,
    pub beats: Vec<f64>,
    pub downbeats: Vec<f64>,
    pub segments: Vec<SegmentInfo>,
    /// Whether cue points were persisted to the VDJ database
    #[serde(default)]
    pub vdj_written: bool,
}

/// Outcome of a best-effort pipeline stage
///
/// Degradation is modelled explicitly instead of swallowing errors ad hoc, so
/// the policy for each stage stays auditable and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    /// The stage produced a usable value
    Succeeded(T),
    /// The stage failed; the pipeline continues with a documented default
    Degraded { reason: String },
    /// The stage was not attempted (e.g. no database path supplied)
    Skipped,
}

impl<T> StageOutcome<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, StageOutcome::Succeeded(_))
    }

    pub fn into_succeeded(self) -> Option<T> {
        match self {
            StageOutcome::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_scale_name() {
        assert_eq!(Mode::from_scale_name("minor"), Some(Mode::Minor));
        assert_eq!(Mode::from_scale_name("Major"), Some(Mode::Major));
        assert_eq!(Mode::from_scale_name("dorian"), None);
    }

    #[test]
    fn test_segment_span_exact_match() {
        let seg = RawSegment {
            label: "chorus".to_string(),
            start: 60.0,
            end: 90.0,
        };
        let mut energies = StemEnergies::new();
        energies.insert(
            SegmentSpan::from(&seg),
            StemEnergy {
                drums: 0.8,
                bass: 0.7,
            },
        );

        assert!(energies.contains_key(&SegmentSpan::new(60.0, 90.0)));
        // Lookup is exact: a nearby but different span finds nothing
        assert!(!energies.contains_key(&SegmentSpan::new(60.0, 90.000001)));
    }

    #[test]
    fn test_segment_span_roundtrip() {
        let span = SegmentSpan::new(0.234, 1.172);
        assert_eq!(span.start(), 0.234);
        assert_eq!(span.end(), 1.172);
    }

    #[test]
    fn test_stage_outcome_accessors() {
        let ok: StageOutcome<u32> = StageOutcome::Succeeded(7);
        assert!(ok.is_succeeded());
        assert_eq!(ok.into_succeeded(), Some(7));

        let degraded: StageOutcome<u32> = StageOutcome::Degraded {
            reason: "backend down".to_string(),
        };
        assert!(!degraded.is_succeeded());
        assert_eq!(degraded.into_succeeded(), None);

        let skipped: StageOutcome<u32> = StageOutcome::Skipped;
        assert!(!skipped.is_succeeded());
    }
}
