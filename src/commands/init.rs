use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# dyscreen configuration
#
# Every section is optional; omitted values use the built-in tables.

# Risk thresholds per metric. "low_is_risk": values below `low` score 2,
# below `high` score 1. "high_is_risk": above `high` scores 2, above `low` 1.
[thresholds.reading_speed]
low = 50.0
high = 80.0
direction = "low_is_risk"

[thresholds.fixation_duration]
low = 300.0
high = 400.0
direction = "high_is_risk"

[thresholds.saccade_length]
low = 20.0
high = 35.0
direction = "low_is_risk"

[thresholds.phoneme_errors]
low = 8.0
high = 12.0
direction = "high_is_risk"

[thresholds.spelling_errors]
low = 5.0
high = 10.0
direction = "high_is_risk"

[thresholds.comprehension_score]
low = 60.0
high = 80.0
direction = "low_is_risk"

# Weights must each be in [0, 1] and sum to 1.0
[weights]
reading_speed = 0.25
fixation_duration = 0.15
saccade_length = 0.15
phoneme_errors = 0.20
spelling_errors = 0.15
comprehension_score = 0.10

# Substituted for missing or unparseable upload values
[defaults]
reading_speed = 60.0
fixation_duration = 350.0
saccade_length = 30.0
phoneme_errors = 10.0
spelling_errors = 7.0
comprehension_score = 70.0

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn write_default_config(config_path: &Path, force: bool) -> Result<()> {
    if io::file_exists(config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    io::write_file(config_path, DEFAULT_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, ScoringProfile};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_builtin_profile() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.profile(), ScoringProfile::default());
        assert_eq!(config.default_format(), Some("terminal"));
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "# mine").unwrap();

        assert!(write_default_config(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        write_default_config(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
