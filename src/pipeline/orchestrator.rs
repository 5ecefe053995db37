//! Pipeline orchestration
//!
//! Sequences the post-processing stages over the external collaborators'
//! output, with an independent failure domain per stage:
//!
//! 1. Structure analysis - fatal on failure, nothing downstream is possible
//! 2. Key detection - degrades to empty key/Camelot strings
//! 3. Stem energy measurement - degrades to "no evidence"
//! 4. EDM reclassification
//! 5. Beat-snapping and bar counting
//! 6. Result assembly and optional VDJ database write
//!
//! Stages 2 and 3 are mutually independent and run concurrently; each is
//! wrapped so its failure cannot cancel or corrupt the other.

use crate::analysis::beatgrid::{count_bars, snap_to_downbeat};
use crate::analysis::key;
use crate::analysis::reclassify::reclassify_labels;
use crate::analysis::traits::{KeyDetector, StemEnergyAnalyzer, StructureAnalyzer};
use crate::config::Settings;
use crate::error::Result;
use crate::export::vdj;
use crate::types::{AnalysisResult, SegmentInfo, SegmentSpan, StageOutcome};
use std::path::Path;
use tracing::{debug, info, warn};

/// The external collaborators one analysis run consumes
pub struct Backends<'a> {
    pub structure: &'a dyn StructureAnalyzer,
    pub key: &'a dyn KeyDetector,
    pub stems: &'a dyn StemEnergyAnalyzer,
}

/// Run the full post-processing pipeline for one track
///
/// Returns `Err` only when structure analysis itself fails; every other
/// stage degrades with documented defaults, so a returned result is always
/// complete (possibly with empty key fields and/or `vdj_written = false`).
pub fn analyze(
    audio_path: &Path,
    vdj_db_path: Option<&Path>,
    settings: &Settings,
    backends: &Backends<'_>,
) -> Result<AnalysisResult> {
    debug!("Analyzing: {}", audio_path.display());

    // --- Stage 1: structure analysis (fatal) ---
    let structure = backends.structure.analyze(audio_path)?;
    debug!(
        "Structure ({}): BPM={:.1}, {} beats, {} downbeats, {} raw segments",
        backends.structure.name(),
        structure.bpm,
        structure.beats.len(),
        structure.downbeats.len(),
        structure.segments.len()
    );

    let spans: Vec<SegmentSpan> = structure.segments.iter().map(SegmentSpan::from).collect();

    // --- Stages 2 + 3: independent degradable stages, run concurrently ---
    let (key_outcome, stems_outcome) = rayon::join(
        || wrap_stage("Key detection", backends.key.name(), backends.key.detect(audio_path)),
        || {
            wrap_stage(
                "Stem energy measurement",
                backends.stems.name(),
                backends.stems.measure(audio_path, &spans),
            )
        },
    );

    let (key_name, key_camelot) = match key_outcome {
        StageOutcome::Succeeded(raw_key) => {
            let standard = key::to_standard_notation(&raw_key.pitch_class, raw_key.mode);
            let camelot = key::to_camelot(&raw_key.pitch_class, raw_key.mode).to_string();
            info!(
                "Key detected: {} (Camelot: {}, confidence: {:.3})",
                standard, camelot, raw_key.confidence
            );
            (standard, camelot)
        }
        // Documented default: empty notation, never a guess
        _ => (String::new(), String::new()),
    };

    let stem_energies = stems_outcome.into_succeeded();

    // --- Stage 4: EDM reclassification ---
    let classified = reclassify_labels(
        &structure.segments,
        stem_energies.as_ref(),
        &settings.reclassify,
    );

    // --- Stage 5: beat-snapping + bar counting ---
    let segments: Vec<SegmentInfo> = classified
        .into_iter()
        .map(|seg| {
            let start = snap_to_downbeat(seg.start, &structure.downbeats);
            let end = snap_to_downbeat(seg.end, &structure.downbeats);
            let bars = count_bars(start, end, &structure.downbeats);
            SegmentInfo {
                label: seg.label,
                original_label: seg.original_label,
                start,
                end,
                bars,
            }
        })
        .collect();

    // --- Stage 6: assembly + optional VDJ write ---
    let mut result = AnalysisResult {
        bpm: structure.bpm,
        key: key_name,
        key_camelot,
        beats: structure.beats,
        downbeats: structure.downbeats,
        segments,
        vdj_written: false,
    };

    let write_outcome = match vdj_db_path {
        Some(db_path) => vdj::write_song_entry(
            db_path,
            &audio_path.to_string_lossy(),
            &result,
            settings.max_cues,
        ),
        None => StageOutcome::Skipped,
    };
    result.vdj_written = write_outcome.is_succeeded();

    info!(
        "Analysis complete for {}: BPM={:.1}, Key={}, {} segments",
        audio_path.display(),
        result.bpm,
        result.key,
        result.segments.len()
    );

    Ok(result)
}

/// Wrap a degradable stage so its failure becomes an explicit outcome
fn wrap_stage<T>(stage: &str, backend: &str, result: Result<T>) -> StageOutcome<T> {
    match result {
        Ok(value) => StageOutcome::Succeeded(value),
        Err(e) => {
            warn!("{} ({}) failed, continuing degraded: {}", stage, backend, e);
            StageOutcome::Degraded {
                reason: e.to_string(),
            }
        }
    }
}
