use serde::{Deserialize, Serialize};
use std::fmt;

/// The six screening measurements, in declaration order.
///
/// Declaration order matters: weights are summed in this order and every
/// per-metric table iterates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ReadingSpeed,
    FixationDuration,
    SaccadeLength,
    PhonemeErrors,
    SpellingErrors,
    ComprehensionScore,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::ReadingSpeed,
        Metric::FixationDuration,
        Metric::SaccadeLength,
        Metric::PhonemeErrors,
        Metric::SpellingErrors,
        Metric::ComprehensionScore,
    ];

    /// Column label recognised in an upload header (compared case-insensitively).
    pub fn label(self) -> &'static str {
        match self {
            Metric::ReadingSpeed => "reading speed",
            Metric::FixationDuration => "fixation duration",
            Metric::SaccadeLength => "saccade length",
            Metric::PhonemeErrors => "phoneme errors",
            Metric::SpellingErrors => "spelling errors",
            Metric::ComprehensionScore => "comprehension score",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Metric::ReadingSpeed => "reading_speed",
            Metric::FixationDuration => "fixation_duration",
            Metric::SaccadeLength => "saccade_length",
            Metric::PhonemeErrors => "phoneme_errors",
            Metric::SpellingErrors => "spelling_errors",
            Metric::ComprehensionScore => "comprehension_score",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Metric::ReadingSpeed => "Reading Speed",
            Metric::FixationDuration => "Fixation Duration",
            Metric::SaccadeLength => "Saccade Length",
            Metric::PhonemeErrors => "Phoneme Errors",
            Metric::SpellingErrors => "Spelling Errors",
            Metric::ComprehensionScore => "Comprehension Score",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::ReadingSpeed => "words/min",
            Metric::FixationDuration => "ms",
            Metric::SaccadeLength => "px",
            Metric::PhonemeErrors | Metric::SpellingErrors => "count",
            Metric::ComprehensionScore => "/100",
        }
    }

    /// Value used when a field is absent or unparseable.
    pub fn default_value(self) -> f64 {
        match self {
            Metric::ReadingSpeed => 60.0,
            Metric::FixationDuration => 350.0,
            Metric::SaccadeLength => 30.0,
            Metric::PhonemeErrors => 10.0,
            Metric::SpellingErrors => 7.0,
            Metric::ComprehensionScore => 70.0,
        }
    }

    /// Range the entry form offers for this metric. Values outside it are
    /// still accepted; the record itself has no upper bound.
    pub fn entry_range(self) -> (f64, f64) {
        match self {
            Metric::ReadingSpeed => (20.0, 100.0),
            Metric::FixationDuration => (200.0, 500.0),
            Metric::SaccadeLength => (10.0, 50.0),
            Metric::PhonemeErrors => (0.0, 20.0),
            Metric::SpellingErrors => (0.0, 15.0),
            Metric::ComprehensionScore => (40.0, 100.0),
        }
    }

    /// Case-insensitive lookup by upload header label.
    pub fn from_label(label: &str) -> Option<Metric> {
        let label = label.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
