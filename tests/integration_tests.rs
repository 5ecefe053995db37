//! Integration tests for the cueprep pipeline
//!
//! These drive the orchestrator end-to-end through the collaborator traits,
//! covering the happy path, every degradation domain, and the VDJ database
//! side effects.

use cueprep::analysis::precomputed::{PrecomputedAnalysis, RawAnalysisDoc};
use cueprep::analysis::traits::{KeyDetector, StemEnergyAnalyzer, StructureAnalyzer};
use cueprep::config::Settings;
use cueprep::error::CueprepError;
use cueprep::pipeline::{self, Backends};
use cueprep::types::{RawKey, SegmentSpan, StemEnergies, StructureAnalysis};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A raw analysis covering one EDM track: intro, two buildup/drop pairs, a
/// closing breakdown, outro.
///
/// Downbeats land every 1.875s (128 BPM, 4/4); segment boundaries are
/// slightly off-grid so snapping is observable.
fn full_doc_json() -> String {
    let downbeats: Vec<f64> = (0..120).map(|i| i as f64 * 1.875).collect();
    let beats: Vec<f64> = (0..480).map(|i| i as f64 * 0.46875).collect();
    format!(
        r#"{{
            "bpm": 128.0,
            "beats": {},
            "downbeats": {},
            "segments": [
                {{"label": "start", "start": 0.0, "end": 0.1}},
                {{"label": "intro", "start": 0.1, "end": 30.1}},
                {{"label": "break", "start": 30.1, "end": 59.9}},
                {{"label": "chorus", "start": 59.9, "end": 90.1}},
                {{"label": "break", "start": 90.1, "end": 105.1}},
                {{"label": "chorus", "start": 105.1, "end": 135.1}},
                {{"label": "break", "start": 135.1, "end": 150.0}},
                {{"label": "outro", "start": 150.0, "end": 165.0}},
                {{"label": "end", "start": 165.0, "end": 165.1}}
            ],
            "key": {{"pitch_class": "A", "scale": "minor", "confidence": 0.87}},
            "stem_energies": [
                {{"start": 59.9, "end": 90.1, "drums": 0.8, "bass": 0.7}},
                {{"start": 90.1, "end": 105.1, "drums": 0.2, "bass": 0.2}},
                {{"start": 105.1, "end": 135.1, "drums": 0.8, "bass": 0.7}},
                {{"start": 135.1, "end": 150.0, "drums": 0.1, "bass": 0.1}}
            ]
        }}"#,
        serde_json::to_string(&beats).unwrap(),
        serde_json::to_string(&downbeats).unwrap(),
    )
}

fn full_backend() -> PrecomputedAnalysis {
    let doc: RawAnalysisDoc = serde_json::from_str(&full_doc_json()).expect("valid doc");
    PrecomputedAnalysis::from_doc(doc)
}

fn make_vdj_db(dir: &TempDir) -> PathBuf {
    let db_path = dir.path().join("database.xml");
    std::fs::write(
        &db_path,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <VirtualDJ_Database Version=\"8.2\">\n\
         </VirtualDJ_Database>\n",
    )
    .expect("Failed to seed database");
    db_path
}

// =============================================================================
// Failing collaborator stubs
// =============================================================================

struct FailingStructure;

impl StructureAnalyzer for FailingStructure {
    fn analyze(&self, audio_path: &Path) -> cueprep::Result<StructureAnalysis> {
        Err(CueprepError::structure_analysis(
            audio_path,
            "model unavailable",
        ))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

struct FailingKey;

impl KeyDetector for FailingKey {
    fn detect(&self, audio_path: &Path) -> cueprep::Result<RawKey> {
        Err(CueprepError::key_detection(audio_path, "model unavailable"))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

struct FailingStems;

impl StemEnergyAnalyzer for FailingStems {
    fn measure(&self, audio_path: &Path, _spans: &[SegmentSpan]) -> cueprep::Result<StemEnergies> {
        Err(CueprepError::stem_energy(audio_path, "separation failed"))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn test_full_pipeline_produces_complete_result() {
    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &backend,
        stems: &backend,
    };

    let result = pipeline::analyze(
        Path::new("/music/track.m4a"),
        None,
        &Settings::default(),
        &backends,
    )
    .expect("pipeline should succeed");

    assert_eq!(result.bpm, 128.0);
    assert_eq!(result.key, "Am");
    assert_eq!(result.key_camelot, "8A");
    assert!(!result.vdj_written, "no database path supplied");

    // start/end sentinels dropped, everything else classified: both breaks
    // leading into high-energy choruses become Buildups, the trailing one a
    // Breakdown
    let labels: Vec<&str> = result.segments.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        ["Intro", "Buildup 1", "Drop 1", "Buildup 2", "Drop 2", "Breakdown", "Outro"]
    );
}

#[test]
fn test_segments_are_beat_aligned_with_bar_counts() {
    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &backend,
        stems: &backend,
    };

    let result = pipeline::analyze(
        Path::new("/music/track.m4a"),
        None,
        &Settings::default(),
        &backends,
    )
    .expect("pipeline should succeed");

    for segment in &result.segments {
        assert!(
            result.downbeats.contains(&segment.start),
            "{} start {} not on the downbeat grid",
            segment.label,
            segment.start
        );
        assert!(
            result.downbeats.contains(&segment.end),
            "{} end {} not on the downbeat grid",
            segment.label,
            segment.end
        );
        assert!(segment.bars >= 1);
    }

    // intro 0.1..30.1 snaps to 0.0..30.0, which spans 16 bars at 1.875s each
    let intro = &result.segments[0];
    assert_eq!(intro.start, 0.0);
    assert_eq!(intro.end, 30.0);
    assert_eq!(intro.bars, 16);
    assert_eq!(intro.original_label, "intro");
}

#[test]
fn test_pipeline_is_deterministic() {
    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &backend,
        stems: &backend,
    };
    let settings = Settings::default();

    let first = pipeline::analyze(Path::new("/music/track.m4a"), None, &settings, &backends)
        .expect("first run");
    let second = pipeline::analyze(Path::new("/music/track.m4a"), None, &settings, &backends)
        .expect("second run");

    assert_eq!(first.segments, second.segments);
    assert_eq!(first.key, second.key);
}

// =============================================================================
// Degradation domains
// =============================================================================

#[test]
fn test_structure_failure_is_fatal() {
    let backend = full_backend();
    let backends = Backends {
        structure: &FailingStructure,
        key: &backend,
        stems: &backend,
    };

    let result = pipeline::analyze(
        Path::new("/music/track.m4a"),
        None,
        &Settings::default(),
        &backends,
    );
    assert!(result.is_err(), "no partial result without structure");
}

#[test]
fn test_key_failure_degrades_to_empty_notation() {
    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &FailingKey,
        stems: &backend,
    };

    let result = pipeline::analyze(
        Path::new("/music/track.m4a"),
        None,
        &Settings::default(),
        &backends,
    )
    .expect("key failure must not abort the run");

    assert_eq!(result.key, "");
    assert_eq!(result.key_camelot, "");
    // The independent stem stage still ran: drops were classified
    assert!(result.segments.iter().any(|s| s.label.starts_with("Drop")));
}

#[test]
fn test_stem_failure_forces_conservative_classification() {
    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &backend,
        stems: &FailingStems,
    };

    let result = pipeline::analyze(
        Path::new("/music/track.m4a"),
        None,
        &Settings::default(),
        &backends,
    )
    .expect("stem failure must not abort the run");

    // No energy evidence: never a Drop, every break is a Breakdown
    let labels: Vec<&str> = result.segments.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "Intro",
            "Breakdown 1",
            "Chorus 1",
            "Breakdown 2",
            "Chorus 2",
            "Breakdown 3",
            "Outro"
        ]
    );
    // The independent key stage still ran
    assert_eq!(result.key, "Am");
}

// =============================================================================
// VDJ database side effects
// =============================================================================

#[test]
fn test_pipeline_writes_vdj_database() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = make_vdj_db(&dir);

    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &backend,
        stems: &backend,
    };

    let result = pipeline::analyze(
        Path::new("/music/track.m4a"),
        Some(&db_path),
        &Settings::default(),
        &backends,
    )
    .expect("pipeline should succeed");

    assert!(result.vdj_written);

    let content = std::fs::read_to_string(&db_path).expect("read db");
    assert!(content.contains("<Song FilePath=\"/music/track.m4a\">"));
    assert!(content.contains("Bpm=\"0.46875\""));
    assert!(content.contains("Key=\"Am\""));
    assert!(content.contains("Type=\"beatgrid\""));
    assert!(content.contains("Name=\"Drop 1 (16 bars)\""));
}

#[test]
fn test_reanalysis_leaves_single_entry() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = make_vdj_db(&dir);

    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &backend,
        stems: &backend,
    };
    let settings = Settings::default();

    pipeline::analyze(
        Path::new("/music/track.m4a"),
        Some(&db_path),
        &settings,
        &backends,
    )
    .expect("first run");
    pipeline::analyze(
        Path::new("/music/track.m4a"),
        Some(&db_path),
        &settings,
        &backends,
    )
    .expect("second run");

    let content = std::fs::read_to_string(&db_path).expect("read db");
    assert_eq!(content.matches("<Song").count(), 1);
}

#[test]
fn test_max_cues_bounds_database_records() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = make_vdj_db(&dir);

    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &backend,
        stems: &backend,
    };
    let settings = Settings {
        max_cues: 3,
        ..Settings::default()
    };

    pipeline::analyze(
        Path::new("/music/track.m4a"),
        Some(&db_path),
        &settings,
        &backends,
    )
    .expect("pipeline should succeed");

    let content = std::fs::read_to_string(&db_path).expect("read db");
    assert_eq!(content.matches("Num=").count(), 3);
    // Highest-priority sections won the slots
    assert!(content.contains("Drop 1"));
    assert!(content.contains("Drop 2"));
    assert!(content.contains("Buildup"));
}

#[test]
fn test_missing_database_degrades_but_returns_result() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("no_such_dir").join("database.xml");

    let backend = full_backend();
    let backends = Backends {
        structure: &backend,
        key: &backend,
        stems: &backend,
    };

    let result = pipeline::analyze(
        Path::new("/music/track.m4a"),
        Some(&db_path),
        &Settings::default(),
        &backends,
    )
    .expect("write failure must not abort the run");

    assert!(!result.vdj_written);
    assert_eq!(result.segments.len(), 7, "result is still complete");
}
