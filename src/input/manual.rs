use crate::config::InputDefaults;
use crate::core::{InputRecord, Metric};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Values typed in directly; an absent field starts at its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub reading_speed: Option<f64>,
    pub fixation_duration: Option<f64>,
    pub saccade_length: Option<f64>,
    pub phoneme_errors: Option<f64>,
    pub spelling_errors: Option<f64>,
    pub comprehension_score: Option<f64>,
}

impl ManualEntry {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::ReadingSpeed => self.reading_speed,
            Metric::FixationDuration => self.fixation_duration,
            Metric::SaccadeLength => self.saccade_length,
            Metric::PhonemeErrors => self.phoneme_errors,
            Metric::SpellingErrors => self.spelling_errors,
            Metric::ComprehensionScore => self.comprehension_score,
        }
    }

    pub fn is_empty(&self) -> bool {
        Metric::ALL.into_iter().all(|m| self.get(m).is_none())
    }
}

fn check_value(metric: Metric, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::validation(format!(
            "{} must be a finite number",
            metric.label()
        )));
    }
    if value < 0.0 {
        return Err(Error::validation(format!(
            "{} must not be negative (got {})",
            metric.label(),
            value
        )));
    }

    let (min, max) = metric.entry_range();
    if value < min || value > max {
        log::warn!(
            "{} = {} is outside the usual range {}-{} {}",
            metric.label(),
            value,
            min,
            max,
            metric.unit()
        );
    }
    Ok(value)
}

/// Validate a manual entry into a complete record.
pub fn validate_entry(entry: &ManualEntry, defaults: &InputDefaults) -> Result<InputRecord> {
    let mut values = [0.0; 6];
    for metric in Metric::ALL {
        values[metric as usize] = match entry.get(metric) {
            Some(value) => check_value(metric, value)?,
            None => defaults.get(metric),
        };
    }

    let record = InputRecord::new(values);
    if let Some(metric) = record.first_non_finite() {
        return Err(Error::parse(
            metric.label(),
            "value is not a number after default substitution",
        ));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entry_yields_defaults() {
        let record = validate_entry(&ManualEntry::default(), &InputDefaults::default()).unwrap();
        assert_eq!(record, InputRecord::default());
    }

    #[test]
    fn test_partial_entry_mixes_values_and_defaults() {
        let entry = ManualEntry {
            reading_speed: Some(35.0),
            phoneme_errors: Some(15.0),
            ..ManualEntry::default()
        };
        let record = validate_entry(&entry, &InputDefaults::default()).unwrap();
        assert_eq!(record.values(), [35.0, 350.0, 30.0, 15.0, 7.0, 70.0]);
    }

    #[test]
    fn test_negative_value_is_rejected() {
        let entry = ManualEntry {
            spelling_errors: Some(-1.0),
            ..ManualEntry::default()
        };
        let err = validate_entry(&entry, &InputDefaults::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("spelling errors")));
    }

    #[test]
    fn test_nan_value_is_rejected() {
        let entry = ManualEntry {
            reading_speed: Some(f64::NAN),
            ..ManualEntry::default()
        };
        assert!(validate_entry(&entry, &InputDefaults::default()).is_err());
    }

    #[test]
    fn test_out_of_range_value_is_accepted() {
        let entry = ManualEntry {
            fixation_duration: Some(900.0),
            ..ManualEntry::default()
        };
        let record = validate_entry(&entry, &InputDefaults::default()).unwrap();
        assert_eq!(record.fixation_duration, 900.0);
    }

    #[test]
    fn test_is_empty() {
        assert!(ManualEntry::default().is_empty());
        let entry = ManualEntry {
            comprehension_score: Some(50.0),
            ..ManualEntry::default()
        };
        assert!(!entry.is_empty());
    }
}
