//! JSON export of post-processed results
//!
//! Versioned envelope around [`AnalysisResult`] for interoperability with
//! other tools.

use crate::error::{CueprepError, Result};
use crate::types::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// JSON output schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level JSON output structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultJson {
    /// Schema version for forward compatibility
    pub version: String,
    /// Export metadata
    pub metadata: ExportMetadata,
    /// The post-processed analysis
    pub analysis: AnalysisResult,
}

/// Export metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// cueprep version that generated this file
    pub generator_version: String,
    /// Timestamp of export
    pub exported_at: String,
}

/// Write a post-processed analysis result to a JSON file
///
/// Uses the atomic write pattern: writes to a temp file first, then renames.
pub fn write_result_json(result: &AnalysisResult, output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| {
        CueprepError::output(output_path, format!("failed to create temp file: {}", e))
    })?;
    let writer = BufWriter::new(file);

    let output = ResultJson {
        version: SCHEMA_VERSION.to_string(),
        metadata: ExportMetadata {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
        },
        analysis: result.clone(),
    };

    serde_json::to_writer_pretty(writer, &output).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        CueprepError::output(output_path, e.to_string())
    })?;

    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        CueprepError::output(output_path, format!("failed to finalize file: {}", e))
    })?;

    info!("Wrote analysis result to {}", output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            bpm: 174.0,
            key: "F#m".to_string(),
            key_camelot: "11A".to_string(),
            beats: vec![0.1, 0.44],
            downbeats: vec![0.1],
            segments: vec![],
            vdj_written: true,
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().expect("temp dir");
        let out = dir.path().join("result.json");

        write_result_json(&sample_result(), &out).expect("write");

        let content = std::fs::read_to_string(&out).expect("read");
        let parsed: ResultJson = serde_json::from_str(&content).expect("parse");
        assert_eq!(parsed.version, SCHEMA_VERSION);
        assert_eq!(parsed.analysis.bpm, 174.0);
        assert_eq!(parsed.analysis.key_camelot, "11A");
        assert!(parsed.analysis.vdj_written);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().expect("temp dir");
        let out = dir.path().join("result.json");

        write_result_json(&sample_result(), &out).expect("write");

        assert!(out.exists());
        assert!(!dir.path().join("result.json.tmp").exists());
    }
}
