//! Input validation: turns raw entry or uploaded text into an [`InputRecord`].

pub mod manual;
pub mod upload;

pub use manual::{validate_entry, ManualEntry};
pub use upload::{parse_row, parse_upload, HeaderLayout};

use crate::config::InputDefaults;
use crate::core::InputRecord;
use crate::errors::{Error, Result};
use std::fs;
use std::path::Path;

/// Read an upload file and parse its first record.
pub fn read_upload_file(path: &Path, defaults: &InputDefaults) -> Result<InputRecord> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_upload(&text, defaults)
}
