//! Cue point prioritization and naming
//!
//! A VDJ entry holds a bounded number of cue slots. When a track has more
//! sections than slots, the most mix-relevant sections win; the selected
//! cues are then presented chronologically because DJs read them
//! left-to-right on the timeline regardless of why they were chosen.

use crate::types::SegmentInfo;
use std::cmp::Ordering;

/// Priority order for filling cue slots (highest priority first)
///
/// Labels not in this list rank below everything in it.
pub const CUE_PRIORITY: [&str; 10] = [
    "Drop",
    "Buildup",
    "Breakdown",
    "Intro",
    "Outro",
    "Verse",
    "Bridge",
    "Instrumental",
    "Solo",
    "Chorus",
];

/// Build a cue point name like "Drop 1 (16 bars)"
pub fn build_cue_name(segment: &SegmentInfo) -> String {
    let bar_word = if segment.bars == 1 { "bar" } else { "bars" };
    format!("{} ({} {})", segment.label, segment.bars, bar_word)
}

/// Strip a trailing disambiguating ordinal: "Drop 2" -> "Drop"
fn base_label(label: &str) -> &str {
    match label.rsplit_once(' ') {
        Some((base, suffix))
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => label,
    }
}

fn priority_rank(label: &str) -> usize {
    let base = base_label(label);
    CUE_PRIORITY
        .iter()
        .position(|&p| p == base)
        .unwrap_or(CUE_PRIORITY.len())
}

/// Select up to `max_cues` segments, prioritized by DJ importance
///
/// Two-phase sort: rank by (priority, start) to choose which segments get a
/// slot, then re-sort the winners by start time for natural cue numbering.
pub fn prioritize_cues(segments: &[SegmentInfo], max_cues: usize) -> Vec<SegmentInfo> {
    let mut ranked: Vec<&SegmentInfo> = segments.iter().collect();
    ranked.sort_by(|a, b| {
        priority_rank(&a.label)
            .cmp(&priority_rank(&b.label))
            .then(a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal))
    });

    let mut selected: Vec<SegmentInfo> =
        ranked.into_iter().take(max_cues).cloned().collect();
    selected.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));
    selected
}
