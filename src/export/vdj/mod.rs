//! VirtualDJ database export
//!
//! Cue selection/naming is pure (`cues`); the read-modify-write against the
//! foreign database.xml lives in a narrow adapter (`writer`) so the two stay
//! independently testable.

pub mod cues;
pub mod schema;
pub mod writer;

pub use cues::{build_cue_name, prioritize_cues, CUE_PRIORITY};
pub use writer::{bpm_to_seconds_per_beat, write_song_entry};
