//! Runtime configuration settings

use crate::analysis::reclassify::ReclassifyConfig;

/// Default cue slot capacity for the VDJ database
pub const DEFAULT_MAX_CUES: usize = 8;

/// Runtime settings for the post-processing pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Cue slot capacity for the VDJ database write
    pub max_cues: usize,
    /// Stem-energy thresholds for high-energy classification
    pub reclassify: ReclassifyConfig,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        let mut reclassify = ReclassifyConfig::default();
        if let Some(threshold) = cli.drums_threshold {
            reclassify.high_drums_threshold = threshold;
        }
        if let Some(threshold) = cli.bass_threshold {
            reclassify.high_bass_threshold = threshold;
        }

        Self {
            max_cues: cli.max_cues,
            reclassify,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_cues: DEFAULT_MAX_CUES,
            reclassify: ReclassifyConfig::default(),
        }
    }
}
