//! Camelot Wheel notation mapping
//!
//! The Camelot Wheel is a visual representation of musical keys that
//! makes harmonic mixing intuitive for DJs.
//!
//! - Numbers 1-12 represent positions on the wheel
//! - 'A' suffix = minor key, 'B' suffix = major key
//! - Adjacent numbers are harmonically compatible (perfect fifth)
//! - Same number, different letter = relative major/minor

use crate::types::Mode;

/// Mapping from (pitch class, mode) to Camelot notation
///
/// Pitch classes use the spellings external key models report (flats for
/// Db/Eb/Ab/Bb, sharp for F#). Any combination outside the 24-entry wheel
/// returns an empty string rather than an error - the caller treats an empty
/// code as "no Camelot notation available".
pub fn to_camelot(pitch_class: &str, mode: Mode) -> &'static str {
    match (pitch_class, mode) {
        // Minor keys (A)
        ("Ab", Mode::Minor) => "1A",
        ("Eb", Mode::Minor) => "2A",
        ("Bb", Mode::Minor) => "3A",
        ("F", Mode::Minor) => "4A",
        ("C", Mode::Minor) => "5A",
        ("G", Mode::Minor) => "6A",
        ("D", Mode::Minor) => "7A",
        ("A", Mode::Minor) => "8A",
        ("E", Mode::Minor) => "9A",
        ("B", Mode::Minor) => "10A",
        ("F#", Mode::Minor) => "11A",
        ("Db", Mode::Minor) => "12A",

        // Major keys (B)
        ("B", Mode::Major) => "1B",
        ("F#", Mode::Major) => "2B",
        ("Db", Mode::Major) => "3B",
        ("Ab", Mode::Major) => "4B",
        ("Eb", Mode::Major) => "5B",
        ("Bb", Mode::Major) => "6B",
        ("F", Mode::Major) => "7B",
        ("C", Mode::Major) => "8B",
        ("G", Mode::Major) => "9B",
        ("D", Mode::Major) => "10B",
        ("A", Mode::Major) => "11B",
        ("E", Mode::Major) => "12B",

        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PITCH_CLASSES: [&str; 12] = [
        "C", "Db", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
    ];

    #[test]
    fn test_camelot_mapping_covers_all_keys() {
        // Ensure all 24 key combinations map to unique Camelot codes
        let mut codes = std::collections::HashSet::new();

        for pitch in PITCH_CLASSES {
            for mode in [Mode::Major, Mode::Minor] {
                let code = to_camelot(pitch, mode);
                assert!(!code.is_empty(), "Empty code for {} {:?}", pitch, mode);
                assert!(codes.insert(code), "Duplicate code: {}", code);
            }
        }

        assert_eq!(codes.len(), 24);
    }

    #[test]
    fn test_camelot_examples() {
        // Common DJ reference points
        assert_eq!(to_camelot("A", Mode::Minor), "8A");
        assert_eq!(to_camelot("C", Mode::Major), "8B");
        assert_eq!(to_camelot("G", Mode::Minor), "6A");
        assert_eq!(to_camelot("B", Mode::Major), "1B");
    }

    #[test]
    fn test_unknown_pitch_class_returns_empty() {
        // The wheel uses flat spellings; sharp aliases are not in the table
        assert_eq!(to_camelot("C#", Mode::Major), "");
        assert_eq!(to_camelot("H", Mode::Minor), "");
        assert_eq!(to_camelot("", Mode::Major), "");
    }
}
