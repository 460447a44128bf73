//! Report formatting
//!
//! Renders validation reports as JSON, YAML, or a colored table for
//! terminals.

use std::io::Write;

use clap::ValueEnum;
use colored::Colorize;
use gauge_config_core::{ValidationFinding, ValidationReport, ValidationSeverity};
use serde::Serialize;

/// Output format options for validation reports
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum ReportFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Report structure for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    /// Document the report is about
    pub source: String,
    pub valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub findings: Vec<ValidationFinding>,
    pub summary: String,
}

impl ReportOutput {
    pub fn from_report(report: &ValidationReport, source: &str) -> Self {
        let error_count = report.errors().len();
        let warning_count = report.warnings().len();
        let info_count = report.infos().len();

        let summary = if report.valid && warning_count == 0 {
            "Gauge configuration is valid".to_string()
        } else if report.valid {
            format!("Gauge configuration is valid with {} warning(s)", warning_count)
        } else {
            format!(
                "Gauge configuration has {} error(s) and {} warning(s)",
                error_count, warning_count
            )
        };

        Self {
            source: source.to_string(),
            valid: report.valid,
            error_count,
            warning_count,
            info_count,
            findings: report.findings.clone(),
            summary,
        }
    }

    /// Render output in the specified format
    pub fn render(&self, format: ReportFormat, out: &mut impl Write) -> anyhow::Result<()> {
        match format {
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
            ReportFormat::Yaml => {
                serde_yaml::to_writer(&mut *out, self)?;
            }
            ReportFormat::Table => self.render_table(out)?,
        }
        Ok(())
    }

    fn render_table(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", format!("Gauge Validation: {}", self.source).cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        let status = if self.valid { "+".green() } else { "x".red() };
        writeln!(out, "{} {}", status, self.summary)?;

        if self.findings.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", "Findings:".cyan().bold())?;
        writeln!(out, "{}", "-".repeat(60))?;
        for finding in &self.findings {
            let marker = match finding.severity() {
                ValidationSeverity::Error => "x".red(),
                ValidationSeverity::Warning => "!".yellow(),
                ValidationSeverity::Info => "i".blue(),
            };
            writeln!(
                out,
                "  {} [{}] {}",
                marker,
                finding.code.dimmed(),
                finding.path.bold()
            )?;
            writeln!(out, "      {}", finding.message)?;
            if let Some(suggestion) = &finding.suggestion {
                writeln!(out, "      {} {}", "->".blue(), suggestion)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_config_core::{presets, ConfigError, GapPolicy, ValidationOptions, Validator};

    fn gap_report() -> ValidationReport {
        let mut config = presets::voltage();
        config.static_zones[1].min = 225.0;
        Validator::new(ValidationOptions::new().with_gap_policy(GapPolicy::Warn)).check(&config)
    }

    #[test]
    fn test_summary_counts() {
        let output = ReportOutput::from_report(&gap_report(), "voltage.yaml");
        assert!(output.valid);
        assert_eq!(output.warning_count, 1);
        assert_eq!(output.summary, "Gauge configuration is valid with 1 warning(s)");

        let mut report = ValidationReport::new();
        report.add_finding(ValidationFinding::error(ConfigError::missing("angle")));
        let output = ReportOutput::from_report(&report, "empty.json");
        assert!(!output.valid);
        assert_eq!(output.error_count, 1);
    }

    #[test]
    fn test_render_table() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        ReportOutput::from_report(&gap_report(), "voltage.yaml")
            .render(ReportFormat::Table, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Gauge Validation: voltage.yaml"));
        assert!(text.contains("staticZones[1]"));
        assert!(text.contains("E_ZONE"));
    }

    #[test]
    fn test_render_yaml() {
        let mut out = Vec::new();
        ReportOutput::from_report(&gap_report(), "voltage.yaml")
            .render(ReportFormat::Yaml, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("warning_count: 1"));
        assert!(text.contains("severity: warning"));
    }
}
