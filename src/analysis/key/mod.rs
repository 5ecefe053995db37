//! Key notation conversion
//!
//! Pure lookup from the raw (pitch class, mode) estimate to the notations DJ
//! software understands: standard (e.g. "Am") and Camelot wheel (e.g. "8A").

pub mod camelot;

pub use camelot::to_camelot;

use crate::types::Mode;

/// Standard DJ key notation: minor keys get an "m" suffix, major keys are the
/// pitch class unchanged (e.g. ("A", Minor) -> "Am", ("C", Major) -> "C")
pub fn to_standard_notation(pitch_class: &str, mode: Mode) -> String {
    match mode {
        Mode::Minor => format!("{}m", pitch_class),
        Mode::Major => pitch_class.to_string(),
    }
}
