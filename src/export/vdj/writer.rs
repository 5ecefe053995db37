//! VirtualDJ database.xml writer
//!
//! Merges one track's analysis into an existing database.xml without
//! disturbing entries for other tracks. VirtualDJ itself may hold the file
//! open, so this is a best-effort side channel: every parse or I/O failure is
//! caught, logged, and reported as "cues not written" rather than propagated.
//!
//! The merge streams events from the existing document to a temp file,
//! skipping any stale `Song` entry for the track and appending the rebuilt
//! entry before the root closes, then renames the temp file over the
//! original. The rename keeps a crash from leaving a truncated database.

use crate::error::{CueprepError, Result};
use crate::types::{AnalysisResult, StageOutcome};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use super::cues::{build_cue_name, prioritize_cues};
use super::schema::{self, attrs};

/// Convert BPM to VDJ's seconds-per-beat tempo format
pub fn bpm_to_seconds_per_beat(bpm: f64) -> f64 {
    60.0 / bpm
}

/// Merge one track's analysis into the VDJ database
///
/// Never fails the caller: returns `Succeeded(cue_count)` when the entry was
/// persisted, `Degraded` (with the logged reason) when it was not.
pub fn write_song_entry(
    db_path: &Path,
    track_path: &str,
    result: &AnalysisResult,
    max_cues: usize,
) -> StageOutcome<usize> {
    match try_write_entry(db_path, track_path, result, max_cues) {
        Ok(cue_count) => {
            info!(
                "Wrote {} cue points to VDJ database for {}",
                cue_count, track_path
            );
            StageOutcome::Succeeded(cue_count)
        }
        Err(e) => {
            warn!("VDJ database write skipped: {}", e);
            StageOutcome::Degraded {
                reason: e.to_string(),
            }
        }
    }
}

fn try_write_entry(
    db_path: &Path,
    track_path: &str,
    result: &AnalysisResult,
    max_cues: usize,
) -> Result<usize> {
    if !db_path.exists() {
        return Err(CueprepError::database(db_path, "database file not found"));
    }

    let content = std::fs::read_to_string(db_path)
        .map_err(|e| CueprepError::database(db_path, e.to_string()))?;

    // Write to a temp file in the same directory (same filesystem, so the
    // final rename is atomic)
    let temp_path = db_path.with_extension("xml.tmp");

    let cleanup_and_error = |reason: String| -> CueprepError {
        let _ = std::fs::remove_file(&temp_path);
        CueprepError::database(db_path, reason)
    };

    let file = File::create(&temp_path).map_err(|e| {
        CueprepError::database(db_path, format!("failed to create temp file: {}", e))
    })?;
    let mut xml = Writer::new(BufWriter::new(file));

    let mut reader = Reader::from_str(&content);
    let mut depth: usize = 0;
    let mut wrote_entry = false;
    let mut cue_count = 0;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| cleanup_and_error(format!("XML parse error: {}", e)))?;

        match event {
            Event::Eof => break,
            Event::Start(e) => {
                if depth > 0 && is_song_for_track(&e, track_path) {
                    // Stale entry for this track: drop its whole subtree.
                    // The rebuilt entry is appended before the root closes,
                    // so a second write never duplicates the Song.
                    let end = e.to_end().into_owned();
                    reader
                        .read_to_end(end.name())
                        .map_err(|e| cleanup_and_error(format!("XML parse error: {}", e)))?;
                    continue;
                }
                depth += 1;
                xml.write_event(Event::Start(e))
                    .map_err(|e| cleanup_and_error(format!("XML write error: {}", e)))?;
            }
            Event::Empty(e) => {
                if depth > 0 && is_song_for_track(&e, track_path) {
                    continue;
                }
                xml.write_event(Event::Empty(e))
                    .map_err(|e| cleanup_and_error(format!("XML write error: {}", e)))?;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    // Root is closing: append the rebuilt entry first
                    cue_count = write_song(&mut xml, track_path, result, max_cues)
                        .map_err(|e| cleanup_and_error(format!("XML write error: {}", e)))?;
                    wrote_entry = true;
                }
                xml.write_event(Event::End(e))
                    .map_err(|e| cleanup_and_error(format!("XML write error: {}", e)))?;
            }
            other => {
                xml.write_event(other)
                    .map_err(|e| cleanup_and_error(format!("XML write error: {}", e)))?;
            }
        }
    }

    if !wrote_entry {
        return Err(cleanup_and_error("no root element found".to_string()));
    }

    let mut buffered = xml.into_inner();
    buffered
        .flush()
        .map_err(|e| cleanup_and_error(format!("XML write error: {}", e)))?;
    drop(buffered);

    // Atomic rename: either succeeds completely or fails without modifying
    // the target
    std::fs::rename(&temp_path, db_path)
        .map_err(|e| cleanup_and_error(format!("failed to finalize file: {}", e)))?;

    Ok(cue_count)
}

/// Check whether an element is the Song entry keyed by this track's path
fn is_song_for_track(elem: &BytesStart, track_path: &str) -> bool {
    if elem.name().as_ref() != schema::SONG.as_bytes() {
        return false;
    }
    match elem.try_get_attribute(attrs::FILE_PATH) {
        Ok(Some(attr)) => attr
            .unescape_value()
            .map(|value| value == track_path)
            .unwrap_or(false),
        _ => false,
    }
}

/// Write the full Song subtree for one track
///
/// Pure with respect to the sink: callers hand in any `Writer`, which keeps
/// entry construction testable apart from the read-modify-write plumbing.
/// Returns the number of cue records written.
fn write_song<W: Write>(
    xml: &mut Writer<W>,
    track_path: &str,
    result: &AnalysisResult,
    max_cues: usize,
) -> quick_xml::Result<usize> {
    let mut song = BytesStart::new(schema::SONG);
    song.push_attribute((attrs::FILE_PATH, track_path));
    xml.write_event(Event::Start(song))?;

    // Scan record: tempo in VDJ's seconds-per-beat convention, not BPM
    let mut scan = BytesStart::new(schema::SCAN);
    scan.push_attribute((attrs::VERSION, schema::SCAN_VERSION));
    scan.push_attribute((
        attrs::BPM,
        bpm_to_seconds_per_beat(result.bpm).to_string().as_str(),
    ));
    scan.push_attribute((attrs::KEY, result.key.as_str()));
    xml.write_event(Event::Empty(scan))?;

    // Beatgrid anchor at the first downbeat
    if let Some(first_downbeat) = result.downbeats.first() {
        let mut poi = BytesStart::new(schema::POI);
        poi.push_attribute((attrs::POS, first_downbeat.to_string().as_str()));
        poi.push_attribute((attrs::TYPE, schema::POI_TYPE_BEATGRID));
        xml.write_event(Event::Empty(poi))?;
    }

    // Named cues, numbered 1-based in chronological order
    let cues = prioritize_cues(&result.segments, max_cues);
    for (i, segment) in cues.iter().enumerate() {
        let mut poi = BytesStart::new(schema::POI);
        poi.push_attribute((attrs::NAME, build_cue_name(segment).as_str()));
        poi.push_attribute((attrs::POS, segment.start.to_string().as_str()));
        poi.push_attribute((attrs::NUM, (i + 1).to_string().as_str()));
        xml.write_event(Event::Empty(poi))?;
    }

    xml.write_event(Event::End(BytesEnd::new(schema::SONG)))?;

    Ok(cues.len())
}
