//! Delimited-text upload parsing.
//!
//! An upload is a header record of comma-separated labels followed by one
//! data record. Missing header labels are a hard failure; bad *values* are
//! replaced by the profile's defaults. Only the first two records are read.

use crate::config::InputDefaults;
use crate::core::{InputRecord, Metric};
use crate::errors::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

const UTF8_BOM: char = '\u{feff}';

/// Column index of every metric within a header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    columns: [usize; 6],
}

impl HeaderLayout {
    /// Locate every recognised label. Fails listing all labels that are absent.
    pub fn parse(header: &StringRecord) -> Result<Self> {
        let position = |metric: Metric| {
            header
                .iter()
                .position(|l| l.trim().eq_ignore_ascii_case(metric.label()))
        };

        let missing: Vec<&str> = Metric::ALL
            .into_iter()
            .filter(|m| position(*m).is_none())
            .map(Metric::label)
            .collect();
        if !missing.is_empty() {
            return Err(Error::format(format!(
                "header is missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let mut columns = [0; 6];
        for metric in Metric::ALL {
            if let Some(index) = position(metric) {
                columns[metric as usize] = index;
            }
        }
        Ok(Self { columns })
    }

    pub fn column(&self, metric: Metric) -> usize {
        self.columns[metric as usize]
    }
}

/// Parse one cell. `None` means "substitute the default".
fn parse_cell(cell: Option<&str>) -> Option<f64> {
    let value = cell?.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Build a record from a data record using a known header layout.
pub fn parse_row(
    layout: &HeaderLayout,
    row: &StringRecord,
    defaults: &InputDefaults,
) -> Result<InputRecord> {
    let record = InputRecord::from_fn(|metric| {
        let cell = row.get(layout.column(metric));
        parse_cell(cell).unwrap_or_else(|| {
            let default = defaults.get(metric);
            log::warn!(
                "Value {:?} for '{}' is not a usable number; using default {}",
                cell.map(str::trim).unwrap_or(""),
                metric.label(),
                default
            );
            default
        })
    });

    match record.first_non_finite() {
        Some(metric) => Err(Error::parse(
            metric.label(),
            "value is not a number after default substitution",
        )),
        None => Ok(record),
    }
}

/// Parse an uploaded text into a record.
pub fn parse_upload(text: &str, defaults: &InputDefaults) -> Result<InputRecord> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    if !text.contains('\n') {
        return Err(Error::format("expected a header line and a data line"));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(header) => header.map_err(csv_error)?,
        None => return Err(Error::format("expected a header line and a data line")),
    };
    let layout = HeaderLayout::parse(&header)?;

    // A blank data line yields no record; every field then takes its default
    let row = records
        .next()
        .transpose()
        .map_err(csv_error)?
        .unwrap_or_default();

    let record = parse_row(&layout, &row, defaults)?;
    log::debug!("Parsed upload record: {:?}", record);
    Ok(record)
}

fn csv_error(err: csv::Error) -> Error {
    Error::format(format!("malformed delimited text: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str =
        "reading speed,fixation duration,saccade length,phoneme errors,spelling errors,comprehension score";

    #[test]
    fn test_parse_upload_reads_first_row() {
        let text = format!("{HEADER}\n45,420,18,14,11,55\n");
        let record = parse_upload(&text, &InputDefaults::default()).unwrap();
        assert_eq!(record.values(), [45.0, 420.0, 18.0, 14.0, 11.0, 55.0]);
    }

    #[test]
    fn test_header_order_and_case_do_not_matter() {
        let text = "Comprehension Score, SPELLING ERRORS,phoneme errors,saccade length,fixation duration,reading speed\n\
                    90,1,2,40,250,95";
        let record = parse_upload(text, &InputDefaults::default()).unwrap();
        assert_eq!(record.reading_speed, 95.0);
        assert_eq!(record.comprehension_score, 90.0);
        assert_eq!(record.spelling_errors, 1.0);
    }

    #[test]
    fn test_missing_header_label_is_format_error() {
        let text = "reading speed,fixation duration,phoneme errors,spelling errors,comprehension score\n\
                    60,350,10,7,70";
        let err = parse_upload(text, &InputDefaults::default()).unwrap_err();
        match err {
            Error::Format(msg) => assert!(msg.contains("saccade length"), "{msg}"),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_single_line_is_format_error() {
        let err = parse_upload(HEADER, &InputDefaults::default()).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_unparseable_value_falls_back_to_default() {
        let text = format!("{HEADER}\n45,abc,18,14,11,55");
        let record = parse_upload(&text, &InputDefaults::default()).unwrap();
        assert_eq!(record.fixation_duration, 350.0);
        assert_eq!(record.reading_speed, 45.0);
    }

    #[test]
    fn test_short_row_defaults_missing_cells() {
        let text = format!("{HEADER}\n45,420");
        let record = parse_upload(&text, &InputDefaults::default()).unwrap();
        assert_eq!(record.values(), [45.0, 420.0, 30.0, 10.0, 7.0, 70.0]);
    }

    #[test]
    fn test_negative_and_non_finite_values_default() {
        let text = format!("{HEADER}\n-5,inf,NaN,14,11,55");
        let record = parse_upload(&text, &InputDefaults::default()).unwrap();
        assert_eq!(record.reading_speed, 60.0);
        assert_eq!(record.fixation_duration, 350.0);
        assert_eq!(record.saccade_length, 30.0);
    }

    #[test]
    fn test_crlf_and_extra_rows() {
        let text = format!("{HEADER}\r\n45,420,18,14,11,55\r\n1,1,1,1,1,1\r\n");
        let record = parse_upload(&text, &InputDefaults::default()).unwrap();
        assert_eq!(record.reading_speed, 45.0);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let text = "student,reading speed,fixation duration,saccade length,phoneme errors,spelling errors,comprehension score\n\
                    alice,45,420,18,14,11,55";
        let record = parse_upload(text, &InputDefaults::default()).unwrap();
        assert_eq!(record.values(), [45.0, 420.0, 18.0, 14.0, 11.0, 55.0]);
    }

    #[test]
    fn test_quoted_header_and_values() {
        let text = "\"reading speed\",\"fixation duration\",\"saccade length\",\"phoneme errors\",\"spelling errors\",\"comprehension score\"\n\
                    \"45\",\"420\",\"18\",\"14\",\"11\",\"55\"\n";
        let record = parse_upload(text, &InputDefaults::default()).unwrap();
        assert_eq!(record.values(), [45.0, 420.0, 18.0, 14.0, 11.0, 55.0]);
    }

    #[test]
    fn test_quoted_values_under_plain_header() {
        let text = format!("{HEADER}\n\"45\",\"420\",\"18\",\"14\",\"11\",\"55\"");
        let record = parse_upload(&text, &InputDefaults::default()).unwrap();
        assert_eq!(record.values(), [45.0, 420.0, 18.0, 14.0, 11.0, 55.0]);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let text = format!("\u{feff}{HEADER}\n45,420,18,14,11,55");
        let record = parse_upload(&text, &InputDefaults::default()).unwrap();
        assert_eq!(record.reading_speed, 45.0);
    }

    #[test]
    fn test_blank_data_line_defaults_every_field() {
        let text = format!("{HEADER}\n");
        let record = parse_upload(&text, &InputDefaults::default()).unwrap();
        assert_eq!(record, InputRecord::default());
    }

    #[test]
    fn test_corrupt_default_is_parse_error() {
        let defaults = InputDefaults {
            saccade_length: f64::NAN,
            ..InputDefaults::default()
        };
        let text = format!("{HEADER}\n45,420,,14,11,55");
        let err = parse_upload(&text, &defaults).unwrap_err();
        match err {
            Error::Parse { field, .. } => assert_eq!(field, "saccade length"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
