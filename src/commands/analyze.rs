use crate::config::{load_config, DyscreenConfig};
use crate::core::InputRecord;
use crate::input::{self, ManualEntry};
use crate::io::{self, OutputFormat};
use crate::risk::insights::{generate_report, RiskReport};
use crate::risk::RiskScorer;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    /// Upload file; mutually exclusive with manual values
    pub file: Option<PathBuf>,
    pub entry: ManualEntry,
    /// Explicit format; falls back to the config file, then terminal
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Disable colored output
    pub plain: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let settings = load_config(config.config.as_deref())?;
    let report = build_report(&config, &settings)?;
    let format = resolve_format(config.format, &settings);

    let no_color_env = std::env::var_os("NO_COLOR").is_some();
    if let Some(enabled) = color_override(
        config.plain || no_color_env,
        config.output.is_some(),
        &settings,
    ) {
        colored::control::set_override(enabled);
    }

    // Render fully before touching the destination so a failure leaves nothing behind
    let mut buffer = Vec::new();
    io::create_writer(format, Box::new(&mut buffer)).write_report(&report)?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, &buffer)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&buffer)?;
            handle.flush()?;
        }
    }

    Ok(())
}

/// Validate the input, score it and assemble the report.
pub fn build_report(config: &AnalyzeConfig, settings: &DyscreenConfig) -> Result<RiskReport> {
    let _span = tracing::info_span!("analyze").entered();

    let scorer = RiskScorer::new(settings.profile());
    let record = read_record(config, &scorer)?;
    Ok(generate_report(&scorer, &record))
}

fn read_record(config: &AnalyzeConfig, scorer: &RiskScorer) -> Result<InputRecord> {
    let defaults = &scorer.profile().defaults;
    match &config.file {
        Some(_) if !config.entry.is_empty() => {
            anyhow::bail!("Use either --file or individual metric values, not both")
        }
        Some(path) => input::read_upload_file(path, defaults)
            .with_context(|| format!("Invalid upload {}", path.display())),
        None => input::validate_entry(&config.entry, defaults).context("Invalid metric values"),
    }
}

fn resolve_format(requested: Option<OutputFormat>, settings: &DyscreenConfig) -> OutputFormat {
    requested
        .or_else(|| {
            let name = settings.default_format()?;
            let format = OutputFormat::from_name(name);
            if format.is_none() {
                log::warn!("Unknown default_format '{}' in config; using terminal", name);
            }
            format
        })
        .unwrap_or(OutputFormat::Terminal)
}

/// Forced color setting, or `None` to let `colored` detect the terminal.
/// Files never receive escape codes; an explicit opt-out beats the config file.
fn color_override(opt_out: bool, to_file: bool, settings: &DyscreenConfig) -> Option<bool> {
    if opt_out || to_file {
        return Some(false);
    }
    settings.use_color()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use crate::core::Prediction;
    use std::fs;
    use tempfile::TempDir;

    fn analyze_config() -> AnalyzeConfig {
        AnalyzeConfig {
            file: None,
            entry: ManualEntry::default(),
            format: None,
            output: None,
            config: None,
            plain: false,
        }
    }

    #[test]
    fn test_build_report_from_manual_entry() {
        let config = AnalyzeConfig {
            entry: ManualEntry {
                reading_speed: Some(95.0),
                fixation_duration: Some(250.0),
                saccade_length: Some(40.0),
                phoneme_errors: Some(2.0),
                spelling_errors: Some(1.0),
                comprehension_score: Some(90.0),
            },
            ..analyze_config()
        };
        let report = build_report(&config, &DyscreenConfig::default()).unwrap();
        assert_eq!(report.result.prediction, Prediction::LowRisk);
    }

    #[test]
    fn test_build_report_rejects_file_and_entry() {
        let config = AnalyzeConfig {
            file: Some(PathBuf::from("upload.csv")),
            entry: ManualEntry {
                reading_speed: Some(50.0),
                ..ManualEntry::default()
            },
            ..analyze_config()
        };
        assert!(build_report(&config, &DyscreenConfig::default()).is_err());
    }

    #[test]
    fn test_handle_analyze_writes_output_file() {
        let temp = TempDir::new().unwrap();
        let upload = temp.path().join("upload.csv");
        fs::write(
            &upload,
            "reading speed,fixation duration,saccade length,phoneme errors,spelling errors,comprehension score\n60,350,30,10,7,70\n",
        )
        .unwrap();
        let out = temp.path().join("report.json");

        handle_analyze(AnalyzeConfig {
            file: Some(upload),
            format: Some(OutputFormat::Json),
            output: Some(out.clone()),
            config: Some(write_empty_config(&temp)),
            ..analyze_config()
        })
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["result"]["risk_score"], 5.0);
        assert_eq!(value["result"]["confidence"], 100.0);
    }

    #[test]
    fn test_handle_analyze_leaves_no_output_on_format_error() {
        let temp = TempDir::new().unwrap();
        let upload = temp.path().join("upload.csv");
        fs::write(&upload, "reading speed,fixation duration\n60,350\n").unwrap();
        let out = temp.path().join("report.json");

        let result = handle_analyze(AnalyzeConfig {
            file: Some(upload),
            output: Some(out.clone()),
            config: Some(write_empty_config(&temp)),
            ..analyze_config()
        });

        assert!(result.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_resolve_format_prefers_cli_then_config() {
        let settings = DyscreenConfig {
            output: Some(OutputConfig {
                default_format: Some("markdown".into()),
                use_color: None,
            }),
            ..DyscreenConfig::default()
        };
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), &settings),
            OutputFormat::Json
        );
        assert_eq!(resolve_format(None, &settings), OutputFormat::Markdown);
        assert_eq!(
            resolve_format(None, &DyscreenConfig::default()),
            OutputFormat::Terminal
        );
    }

    #[test]
    fn test_color_override_precedence() {
        let forced_on = DyscreenConfig {
            output: Some(OutputConfig {
                default_format: None,
                use_color: Some(true),
            }),
            ..DyscreenConfig::default()
        };
        let forced_off = DyscreenConfig {
            output: Some(OutputConfig {
                default_format: None,
                use_color: Some(false),
            }),
            ..DyscreenConfig::default()
        };

        assert_eq!(color_override(false, false, &DyscreenConfig::default()), None);
        assert_eq!(color_override(false, false, &forced_on), Some(true));
        assert_eq!(color_override(false, false, &forced_off), Some(false));
        assert_eq!(color_override(true, false, &forced_on), Some(false));
        assert_eq!(color_override(false, true, &forced_on), Some(false));
    }

    fn write_empty_config(temp: &TempDir) -> PathBuf {
        let path = temp.path().join("empty.toml");
        fs::write(&path, "").unwrap();
        path
    }
}
