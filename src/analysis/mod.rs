//! Deterministic analysis post-processing
//!
//! This module holds the trait seams for the external ML collaborators and
//! the pure transformations applied to their output: key notation
//! conversion, beat-grid utilities, and EDM reclassification.

pub mod beatgrid;
pub mod key;
pub mod precomputed;
pub mod reclassify;
pub mod traits;

pub use precomputed::PrecomputedAnalysis;
pub use reclassify::{reclassify_labels, ReclassifyConfig};
pub use traits::{KeyDetector, StemEnergyAnalyzer, StructureAnalyzer};
