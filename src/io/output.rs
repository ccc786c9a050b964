use crate::core::{Prediction, RiskLevel};
use crate::risk::insights::RiskReport;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl OutputFormat {
    /// Lookup by name as written in `.dyscreen.toml`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "terminal" | "text" => Some(Self::Terminal),
            _ => None,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_breakdown(report)?;
        self.write_contributions(report)?;
        self.write_recommendations(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let result = &report.result;
        writeln!(self.writer, "# Reading Risk Screening Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Result | Risk Score | Confidence |")?;
        writeln!(self.writer, "|--------|------------|------------|")?;
        writeln!(
            self.writer,
            "| {} | {:.1} / 10 | {:.1}% |",
            result.prediction, result.risk_score, result.confidence
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_breakdown(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Metric Breakdown")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value | Risk Level |")?;
        writeln!(self.writer, "|--------|-------|------------|")?;
        for (metric, value) in report.record.iter() {
            writeln!(
                self.writer,
                "| {} | {} {} | {} |",
                metric,
                format_value(value),
                metric.unit(),
                report.result.details.get(metric)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_contributions(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Score Contributions")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Weight | Contribution | Share |")?;
        writeln!(self.writer, "|--------|--------|--------------|-------|")?;
        for c in report.ranked_contributions() {
            writeln!(
                self.writer,
                "| {} | {:.2} | {:.2} | {:.1}% |",
                c.metric, c.weight, c.contribution, c.share
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        for rec in &report.recommendations {
            writeln!(self.writer, "- {}", rec.text)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        self.write_summary(report)?;
        self.write_breakdown(report)?;
        self.write_recommendations(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_summary(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let result = &report.result;
        let headline = match result.prediction {
            Prediction::RiskDetected => "RISK DETECTED".red().bold(),
            Prediction::LowRisk => "LOW RISK".green().bold(),
        };

        writeln!(self.writer, "{}", "READING RISK SCREENING".bold())?;
        writeln!(self.writer, "──────────────────────")?;
        writeln!(self.writer, "Result:     {headline}")?;
        writeln!(self.writer, "Risk score: {:.1} / 10", result.risk_score)?;
        writeln!(self.writer, "Confidence: {:.1}%", result.confidence)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_breakdown(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Metric", "Value", "Risk Level", "Weight", "Share"]);

        for c in report.ranked_contributions() {
            table.add_row(vec![
                Cell::new(c.metric.display_name()),
                Cell::new(format!("{} {}", format_value(c.value), c.metric.unit()))
                    .set_alignment(CellAlignment::Right),
                Cell::new(c.level.to_string()),
                Cell::new(format!("{:.2}", c.weight)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}%", c.share)).set_alignment(CellAlignment::Right),
            ]);
        }

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "RECOMMENDATIONS".bold())?;
        for rec in &report.recommendations {
            let marker = match rec.level {
                Some(RiskLevel::High) => "!".red().bold(),
                Some(RiskLevel::Medium) => "~".yellow(),
                _ => "•".normal(),
            };
            writeln!(self.writer, "  {marker} {}", rec.text)?;
        }
        Ok(())
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

pub fn create_writer<'a>(
    format: OutputFormat,
    sink: Box<dyn Write + 'a>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    }
}
