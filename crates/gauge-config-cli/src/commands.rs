//! CLI command definitions
//!
//! Clap-based commands for validating gauge documents, printing the
//! built-in gauges and showing a document with its defaults filled in.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use gauge_config_core::{
    export, load_file, presets, with_defaults, ExportFormat, GapPolicy, ValidationFinding,
    ValidationOptions, ValidationReport, Validator,
};

use crate::output::{ReportFormat, ReportOutput};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// All validations passed
    Success = 0,
    /// Validation failed with errors
    ValidationError = 1,
    /// Validation passed with warnings
    ValidationWarning = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from a validation report
    pub fn from_report(report: &ValidationReport) -> Self {
        if !report.valid {
            ExitCode::ValidationError
        } else if !report.warnings().is_empty() {
            ExitCode::ValidationWarning
        } else {
            ExitCode::Success
        }
    }
}

/// Gauge configuration tool
///
/// Validate gauge documents and print them in the formats a browser gauge
/// page consumes.
#[derive(Parser, Debug)]
#[command(name = "gauge-config")]
#[command(about = "Validate and export radial gauge configurations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a gauge document
    ///
    /// Fills defaults, then checks bounds, colors and zone layout.
    Validate {
        /// Path to the document (.json, .yaml, .yml or .toml)
        #[arg(short, long)]
        config: PathBuf,

        /// How gaps between zones are treated
        #[arg(long, value_enum, default_value = "warn", env = "GAUGE_CONFIG_GAP_POLICY")]
        gap_policy: GapPolicyArg,

        /// Expected value domain as MIN,MAX
        #[arg(long, value_parser = parse_domain)]
        domain: Option<(f64, f64)>,

        /// Reject labels that are not in ascending order
        #[arg(long)]
        sorted_labels: bool,

        /// Output format for the report
        #[arg(long, value_enum, default_value = "table", env = "GAUGE_CONFIG_FORMAT")]
        format: ReportFormat,
    },

    /// Print a built-in gauge
    Show {
        /// Preset name (pf, voltage)
        #[arg(short, long)]
        preset: String,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: DocumentFormat,

        /// Variable name for the js format (defaults to the page's name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Print a document with every default filled in
    Defaults {
        /// Path to the document (.json, .yaml, .yml or .toml)
        #[arg(short, long)]
        config: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: DocumentFormat,

        /// Variable name for the js format
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum GapPolicyArg {
    Ignore,
    Warn,
    Deny,
}

impl From<GapPolicyArg> for GapPolicy {
    fn from(arg: GapPolicyArg) -> Self {
        match arg {
            GapPolicyArg::Ignore => GapPolicy::Ignore,
            GapPolicyArg::Warn => GapPolicy::Warn,
            GapPolicyArg::Deny => GapPolicy::Deny,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
    Js,
}

impl From<DocumentFormat> for ExportFormat {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Json => ExportFormat::Json,
            DocumentFormat::Yaml => ExportFormat::Yaml,
            DocumentFormat::Toml => ExportFormat::Toml,
            DocumentFormat::Js => ExportFormat::Script,
        }
    }
}

fn parse_domain(s: &str) -> Result<(f64, f64), String> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| format!("expected MIN,MAX but got '{}'", s))?;
    let min: f64 = min
        .trim()
        .parse()
        .map_err(|_| format!("invalid domain minimum '{}'", min.trim()))?;
    let max: f64 = max
        .trim()
        .parse()
        .map_err(|_| format!("invalid domain maximum '{}'", max.trim()))?;
    if !(min < max) {
        return Err(format!("domain minimum {} must be below maximum {}", min, max));
    }
    Ok((min, max))
}

/// Run the parsed command line
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Validate {
            config,
            gap_policy,
            domain,
            sorted_labels,
            format,
        } => {
            let mut options = ValidationOptions::new()
                .with_gap_policy(gap_policy.into())
                .with_sorted_labels(sorted_labels);
            if let Some((min, max)) = domain {
                options = options.with_domain(min, max);
            }
            execute_validate(&config, options, format, cli.quiet, &mut stdout)
        }
        Commands::Show {
            preset,
            format,
            name,
        } => execute_show(&preset, format, name.as_deref(), &mut stdout),
        Commands::Defaults {
            config,
            format,
            name,
        } => execute_defaults(&config, format, name.as_deref(), &mut stdout),
    }
}

/// Validate a document and write the report
pub fn execute_validate(
    config: &Path,
    options: ValidationOptions,
    format: ReportFormat,
    quiet: bool,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let partial = load_file(config)?;
    let validator = Validator::new(options);

    // Schema errors raised while filling defaults are reported like any other finding.
    let report = match with_defaults(partial) {
        Ok(gauge) => validator.check(&gauge),
        Err(e) if e.is_schema_error() => {
            let mut report = ValidationReport::new();
            report.add_finding(ValidationFinding::error(e));
            report
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        path = %config.display(),
        valid = report.valid,
        findings = report.findings.len(),
        "Validation finished"
    );

    if !(quiet && report.valid) {
        ReportOutput::from_report(&report, &config.display().to_string()).render(format, out)?;
    }
    Ok(ExitCode::from_report(&report))
}

/// Print a preset
pub fn execute_show(
    preset: &str,
    format: DocumentFormat,
    name: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let gauge = presets::by_name(preset).ok_or_else(|| {
        anyhow!(
            "Unknown preset '{}'. Available presets: {}",
            preset,
            presets::PRESET_NAMES.join(", ")
        )
    })?;
    let name = name.or_else(|| presets::script_name(preset));

    let text = export(&gauge, format.into(), name)?;
    write_document(out, &text)?;
    Ok(ExitCode::Success)
}

/// Print a document with defaults filled in
pub fn execute_defaults(
    config: &Path,
    format: DocumentFormat,
    name: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let partial = load_file(config)?;
    let gauge = with_defaults(partial)
        .with_context(|| format!("Cannot fill defaults for '{}'", config.display()))?;

    let text = export(&gauge, format.into(), name)?;
    write_document(out, &text)?;
    Ok(ExitCode::Success)
}

fn write_document(out: &mut impl Write, text: &str) -> anyhow::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_config_core::ConfigError;
    use std::io::Write as _;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const VOLTAGE_GAP: &str = r##"
angle: 0
lineWidth: 0.2
staticZones:
  - { strokeStyle: "#FFDD00", min: 200, max: 220 }
  - { strokeStyle: "#30B32D", min: 225, max: 230 }
  - { strokeStyle: "#F03E3E", min: 230, max: 240 }
"##;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "gauge-config",
            "-vv",
            "validate",
            "--config",
            "g.yaml",
            "--gap-policy",
            "deny",
            "--domain",
            "200,240",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Validate {
                gap_policy, domain, ..
            } => {
                assert_eq!(gap_policy, GapPolicyArg::Deny);
                assert_eq!(domain, Some((200.0, 240.0)));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_domain() {
        assert_eq!(parse_domain("0, 1").unwrap(), (0.0, 1.0));
        assert!(parse_domain("1").is_err());
        assert!(parse_domain("2,1").is_err());
        assert!(parse_domain("a,1").is_err());
    }

    #[test]
    fn test_validate_gap_warns_then_denies() {
        let file = write_temp(".yaml", VOLTAGE_GAP);

        let mut out = Vec::new();
        let code = execute_validate(
            file.path(),
            ValidationOptions::new(),
            ReportFormat::Json,
            false,
            &mut out,
        )
        .unwrap();
        assert_eq!(code, ExitCode::ValidationWarning);
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["warning_count"], 1);

        let mut out = Vec::new();
        let code = execute_validate(
            file.path(),
            ValidationOptions::new().with_gap_policy(GapPolicy::Deny),
            ReportFormat::Json,
            false,
            &mut out,
        )
        .unwrap();
        assert_eq!(code, ExitCode::ValidationError);
    }

    #[test]
    fn test_validate_missing_field_is_reported() {
        let file = write_temp(".json", r#"{"angle": 0}"#);
        let mut out = Vec::new();
        let code = execute_validate(
            file.path(),
            ValidationOptions::new(),
            ReportFormat::Json,
            false,
            &mut out,
        )
        .unwrap();
        assert_eq!(code, ExitCode::ValidationError);
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["findings"][0]["code"], "E_MISSING_FIELD");
        assert_eq!(json["findings"][0]["path"], "lineWidth");
    }

    #[test]
    fn test_validate_quiet_prints_nothing_when_clean() {
        let file = write_temp(
            ".json",
            &export(&presets::power_factor(), ExportFormat::Json, None).unwrap(),
        );
        let mut out = Vec::new();
        let code = execute_validate(
            file.path(),
            ValidationOptions::new(),
            ReportFormat::Table,
            true,
            &mut out,
        )
        .unwrap();
        assert_eq!(code, ExitCode::Success);
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_unsupported_extension() {
        let file = write_temp(".ini", "angle=0");
        let mut out = Vec::new();
        let err = execute_validate(
            file.path(),
            ValidationOptions::new(),
            ReportFormat::Table,
            false,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_show_preset_as_script() {
        let mut out = Vec::new();
        execute_show("pf", DocumentFormat::Js, None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("var pfOpts = {"));

        let mut out = Vec::new();
        assert!(execute_show("ampere", DocumentFormat::Json, None, &mut out).is_err());
    }

    #[test]
    fn test_defaults_fills_document() {
        let file = write_temp(
            ".json",
            r##"{"angle": 0, "lineWidth": 0.3, "staticZones": [{"strokeStyle": "#00FF00", "min": 0, "max": 1}]}"##,
        );
        let mut out = Vec::new();
        execute_defaults(file.path(), DocumentFormat::Json, None, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["radiusScale"], 1.0);
        assert_eq!(json["generateGradient"], true);
        assert_eq!(json["pointer"]["color"], "#000000");
    }

    #[test]
    fn test_exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::ValidationError), 1);
        assert_eq!(i32::from(ExitCode::ValidationWarning), 2);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }
}
