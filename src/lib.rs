// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod input;
pub mod io;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{InputRecord, Metric, Prediction, RiskDetails, RiskLevel, RiskResult};

pub use crate::config::{
    DyscreenConfig, FieldThreshold, InputDefaults, RiskDirection, ScoringProfile, ScoringWeights,
    ThresholdTable,
};

pub use crate::errors::{Error, Result};

pub use crate::input::{parse_upload, read_upload_file, validate_entry, ManualEntry};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::risk::{
    classify, confidence,
    insights::{generate_report, MetricContribution, Recommendation, RiskReport},
    RiskScorer,
};
