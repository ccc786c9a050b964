//! CLI command implementations for dyscreen operations.
//!
//! Available commands:
//! - **analyze**: Validate one record (flags or upload file), score it and render a report
//! - **init**: Write a default `.dyscreen.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
