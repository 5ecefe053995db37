//! VirtualDJ database.xml schema constants
//!
//! The schema is fixed externally by VirtualDJ; this layer only ever touches
//! the elements and attributes named here.

/// Per-track entry element, keyed by its FilePath attribute
pub const SONG: &str = "Song";

/// Scan record element (tempo + key)
pub const SCAN: &str = "Scan";

/// Point-of-interest element (beatgrid anchor, named cues)
pub const POI: &str = "Poi";

/// Scan record version VirtualDJ expects
pub const SCAN_VERSION: &str = "801";

/// Poi Type value marking the beatgrid anchor
pub const POI_TYPE_BEATGRID: &str = "beatgrid";

/// VDJ attribute names
pub mod attrs {
    pub const FILE_PATH: &str = "FilePath";
    pub const VERSION: &str = "Version";
    pub const BPM: &str = "Bpm";
    pub const KEY: &str = "Key";
    pub const POS: &str = "Pos";
    pub const TYPE: &str = "Type";
    pub const NAME: &str = "Name";
    pub const NUM: &str = "Num";
}
