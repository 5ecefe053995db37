//! Export modules for the VDJ database and result JSON

pub mod json;
pub mod vdj;

pub use json::write_result_json;
pub use vdj::write_song_entry;
