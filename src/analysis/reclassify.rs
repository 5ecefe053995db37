//! EDM reclassification of structure-model segment labels
//!
//! The structure model emits coarse labels ("chorus", "break", ...). DJs
//! working EDM sets care about a different vocabulary: is that chorus a Drop?
//! Is that break a Buildup into one, or a Breakdown? Stem-energy evidence
//! (drum and bass RMS per segment) plus one segment of look-ahead answers
//! both questions.

use crate::types::{ClassifiedSegment, RawSegment, SegmentSpan, StemEnergies};
use std::collections::HashMap;

/// Default drum-stem RMS bar for calling a chorus a Drop
pub const DEFAULT_HIGH_DRUMS_THRESHOLD: f64 = 0.5;

/// Default bass-stem RMS bar for calling a chorus a Drop
pub const DEFAULT_HIGH_BASS_THRESHOLD: f64 = 0.4;

/// Tunable energy thresholds for high-energy classification
///
/// The drums bar sits moderately higher than the bass bar; both are well
/// above the ambient noise floor of a separated stem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReclassifyConfig {
    pub high_drums_threshold: f64,
    pub high_bass_threshold: f64,
}

impl Default for ReclassifyConfig {
    fn default() -> Self {
        Self {
            high_drums_threshold: DEFAULT_HIGH_DRUMS_THRESHOLD,
            high_bass_threshold: DEFAULT_HIGH_BASS_THRESHOLD,
        }
    }
}

/// Check if a segment has high drum + bass energy (indicating a drop)
///
/// Requires evidence for this exact segment span; missing evidence is never
/// treated as high energy.
fn is_high_energy(
    seg: &RawSegment,
    stem_energies: Option<&StemEnergies>,
    config: &ReclassifyConfig,
) -> bool {
    let Some(energies) = stem_energies else {
        return false;
    };
    let Some(energy) = energies.get(&SegmentSpan::from(seg)) else {
        return false;
    };
    energy.drums >= config.high_drums_threshold && energy.bass >= config.high_bass_threshold
}

/// Map a single coarse label to an EDM label. Returns None to filter out.
fn classify_segment(
    seg: &RawSegment,
    next_seg: Option<&RawSegment>,
    stem_energies: Option<&StemEnergies>,
    config: &ReclassifyConfig,
) -> Option<String> {
    let label = seg.label.as_str();

    // Sentinel markers from the source model, not real sections
    if label == "start" || label == "end" {
        return None;
    }

    let direct = match label {
        "intro" => Some("Intro"),
        "outro" => Some("Outro"),
        "verse" => Some("Verse"),
        "bridge" => Some("Bridge"),
        "inst" => Some("Instrumental"),
        "solo" => Some("Solo"),
        _ => None,
    };
    if let Some(mapped) = direct {
        return Some(mapped.to_string());
    }

    if label == "chorus" {
        if is_high_energy(seg, stem_energies, config) {
            return Some("Drop".to_string());
        }
        return Some("Chorus".to_string());
    }

    if label == "break" {
        // A break leading directly into a high-energy chorus is the buildup
        // before the drop. A trailing break with no successor stays Breakdown.
        let leads_into_drop = next_seg
            .map(|next| next.label == "chorus" && is_high_energy(next, stem_energies, config))
            .unwrap_or(false);
        if leads_into_drop {
            return Some("Buildup".to_string());
        }
        return Some("Breakdown".to_string());
    }

    // Unknown label from an evolving model vocabulary: capitalize and pass
    // through rather than dropping it
    Some(capitalize(label))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Add 1-based numbering to labels that repeat (e.g. Drop -> Drop 1, Drop 2)
fn number_duplicates(segments: &mut [ClassifiedSegment]) {
    let mut label_counts: HashMap<String, usize> = HashMap::new();
    for seg in segments.iter() {
        *label_counts.entry(seg.label.clone()).or_insert(0) += 1;
    }

    let mut counters: HashMap<String, usize> = HashMap::new();
    for seg in segments.iter_mut() {
        if label_counts[&seg.label] > 1 {
            let counter = counters.entry(seg.label.clone()).or_insert(0);
            *counter += 1;
            seg.label = format!("{} {}", seg.label, counter);
        }
    }
}

/// Reclassify structure-model segments into EDM-appropriate labels
///
/// Uses stem energy evidence (if available) to distinguish drops from
/// choruses and buildups from breakdowns. Without evidence the classification
/// is conservative: never a Drop, so every chorus stays Chorus and every
/// break becomes Breakdown. Deterministic, numbering included.
pub fn reclassify_labels(
    segments: &[RawSegment],
    stem_energies: Option<&StemEnergies>,
    config: &ReclassifyConfig,
) -> Vec<ClassifiedSegment> {
    let mut classified: Vec<ClassifiedSegment> = Vec::with_capacity(segments.len());

    for (i, seg) in segments.iter().enumerate() {
        let next_seg = segments.get(i + 1);
        let Some(edm_label) = classify_segment(seg, next_seg, stem_energies, config) else {
            continue;
        };
        classified.push(ClassifiedSegment {
            label: edm_label,
            original_label: seg.label.clone(),
            start: seg.start,
            end: seg.end,
        });
    }

    number_duplicates(&mut classified);
    classified
}
