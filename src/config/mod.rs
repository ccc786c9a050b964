mod core;
mod loader;
mod scoring;
mod thresholds;

// Re-export scoring types
pub use scoring::{
    default_comprehension_score_weight, default_fixation_duration_weight,
    default_phoneme_errors_weight, default_reading_speed_weight, default_saccade_length_weight,
    default_spelling_errors_weight, InputDefaults, ScoringProfile, ScoringWeights,
};

// Re-export threshold types
pub use thresholds::{FieldThreshold, RiskDirection, ThresholdTable};

// Re-export core types
pub use core::{DyscreenConfig, OutputConfig};

pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
