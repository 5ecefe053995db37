//! Fixture-backed collaborator implementations
//!
//! The analyzer service can dump its raw output (structure, key estimate,
//! stem energies) as one JSON document. `PrecomputedAnalysis` serves that
//! document back through the collaborator traits, which lets the CLI re-run
//! the deterministic post-processing (and the VDJ write) without touching the
//! ML services, and gives tests a real backend to drive the pipeline with.

use crate::analysis::traits::{KeyDetector, StemEnergyAnalyzer, StructureAnalyzer};
use crate::error::{CueprepError, Result};
use crate::types::{
    Mode, RawKey, RawSegment, SegmentSpan, StemEnergies, StemEnergy, StructureAnalysis,
};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw analysis document as captured from the analyzer service
///
/// `key` and `stem_energies` are optional: a missing section means that
/// collaborator produced nothing for this track, and the corresponding trait
/// method reports failure so the pipeline degrades normally.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnalysisDoc {
    pub bpm: f64,
    pub beats: Vec<f64>,
    pub downbeats: Vec<f64>,
    pub segments: Vec<RawSegment>,
    #[serde(default)]
    pub key: Option<RawKeyDoc>,
    #[serde(default)]
    pub stem_energies: Option<Vec<SpanEnergyDoc>>,
}

/// Key estimate as serialized by the key model
#[derive(Debug, Clone, Deserialize)]
pub struct RawKeyDoc {
    pub pitch_class: String,
    /// Scale name as the model reports it ("major" / "minor")
    pub scale: String,
    #[serde(default)]
    pub confidence: f64,
}

/// One segment span's stem energies
///
/// JSON objects cannot key on a float pair, so the document carries a flat
/// list and the span table is rebuilt on lookup.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpanEnergyDoc {
    pub start: f64,
    pub end: f64,
    pub drums: f64,
    pub bass: f64,
}

/// All three collaborator backends served from one captured document
pub struct PrecomputedAnalysis {
    source: PathBuf,
    doc: RawAnalysisDoc,
}

impl PrecomputedAnalysis {
    /// Load a raw analysis JSON document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| CueprepError::raw_input(path, e.to_string()))?;
        let reader = BufReader::new(file);
        let doc: RawAnalysisDoc = serde_json::from_reader(reader)
            .map_err(|e| CueprepError::raw_input(path, e.to_string()))?;

        debug!(
            "Loaded raw analysis from {}: BPM={:.1}, {} segments, key={}, energies={}",
            path.display(),
            doc.bpm,
            doc.segments.len(),
            doc.key.is_some(),
            doc.stem_energies.is_some(),
        );

        Ok(Self {
            source: path.to_path_buf(),
            doc,
        })
    }

    /// Build directly from a document (used by tests)
    pub fn from_doc(doc: RawAnalysisDoc) -> Self {
        Self {
            source: PathBuf::from("<in-memory>"),
            doc,
        }
    }
}

impl StructureAnalyzer for PrecomputedAnalysis {
    fn analyze(&self, _audio_path: &Path) -> Result<StructureAnalysis> {
        Ok(StructureAnalysis {
            bpm: self.doc.bpm,
            beats: self.doc.beats.clone(),
            downbeats: self.doc.downbeats.clone(),
            segments: self.doc.segments.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "precomputed"
    }
}

impl KeyDetector for PrecomputedAnalysis {
    fn detect(&self, _audio_path: &Path) -> Result<RawKey> {
        let key = self.doc.key.as_ref().ok_or_else(|| {
            CueprepError::key_detection(&self.source, "no key estimate in raw analysis")
        })?;
        let mode = Mode::from_scale_name(&key.scale).ok_or_else(|| {
            CueprepError::key_detection(&self.source, format!("unknown scale '{}'", key.scale))
        })?;
        Ok(RawKey {
            pitch_class: key.pitch_class.clone(),
            mode,
            confidence: key.confidence,
        })
    }

    fn name(&self) -> &'static str {
        "precomputed"
    }
}

impl StemEnergyAnalyzer for PrecomputedAnalysis {
    fn measure(&self, _audio_path: &Path, spans: &[SegmentSpan]) -> Result<StemEnergies> {
        let entries = self.doc.stem_energies.as_ref().ok_or_else(|| {
            CueprepError::stem_energy(&self.source, "no stem energies in raw analysis")
        })?;

        let table: StemEnergies = entries
            .iter()
            .map(|e| {
                (
                    SegmentSpan::new(e.start, e.end),
                    StemEnergy {
                        drums: e.drums,
                        bass: e.bass,
                    },
                )
            })
            .collect();

        // Only the requested spans; anything else in the document is noise
        Ok(spans
            .iter()
            .filter_map(|span| table.get(span).map(|energy| (*span, *energy)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "precomputed"
    }
}
