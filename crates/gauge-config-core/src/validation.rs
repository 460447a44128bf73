//! Validation of gauge configurations
//!
//! [`Validator::check`] runs every built-in rule and collects findings;
//! [`Validator::validate`] turns the first blocking finding into a
//! [`ConfigError`] and otherwise hands the config back unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, ZoneIssue};
use crate::schema::GaugeConfig;

/// Largest `fractionDigits` a browser's number formatting accepts
pub const MAX_FRACTION_DIGITS: u32 = 20;

/// Severity levels for validation findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    /// Informational finding
    Info,
    /// Advisory; the config is still accepted
    Warning,
    /// The config is rejected
    Error,
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationSeverity::Error => write!(f, "error"),
            ValidationSeverity::Warning => write!(f, "warning"),
            ValidationSeverity::Info => write!(f, "info"),
        }
    }
}

/// How uncovered stretches between zones are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Gaps are not reported
    Ignore,
    /// Gaps are reported as warnings
    #[default]
    Warn,
    /// Gaps reject the config
    Deny,
}

impl std::str::FromStr for GapPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" | "off" => Ok(GapPolicy::Ignore),
            "warn" | "warning" => Ok(GapPolicy::Warn),
            "deny" | "error" | "strict" => Ok(GapPolicy::Deny),
            _ => Err(format!("Unknown gap policy: {}", s)),
        }
    }
}

/// Options controlling which soft invariants are enforced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOptions {
    pub gap_policy: GapPolicy,
    /// Expected value domain; zones must stay inside it
    pub domain: Option<(f64, f64)>,
    /// Reject (rather than warn about) labels that are not ascending
    pub require_sorted_labels: bool,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }

    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min, max));
        self
    }

    pub fn with_sorted_labels(mut self, required: bool) -> Self {
        self.require_sorted_labels = required;
        self
    }
}

/// A single validation finding
///
/// Error-severity findings can only be built from a [`ConfigError`], so every
/// blocking finding carries the error [`Validator::validate`] returns.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationFinding {
    severity: ValidationSeverity,
    /// Unique code for this finding type
    pub code: String,
    pub message: String,
    /// Field path, e.g. `staticZones[1].min`
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip)]
    cause: Option<ConfigError>,
}

impl ValidationFinding {
    /// Finding backed by a typed error
    pub fn from_error(severity: ValidationSeverity, error: ConfigError) -> Self {
        Self {
            severity,
            code: error.code().to_string(),
            message: error.to_string(),
            path: error.field().unwrap_or("$").to_string(),
            suggestion: None,
            cause: Some(error),
        }
    }

    pub fn error(error: ConfigError) -> Self {
        Self::from_error(ValidationSeverity::Error, error)
    }

    pub fn warning(error: ConfigError) -> Self {
        Self::from_error(ValidationSeverity::Warning, error)
    }

    pub fn info(code: impl Into<String>, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Info,
            code: code.into(),
            message: message.into(),
            path: path.into(),
            suggestion: None,
            cause: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn severity(&self) -> ValidationSeverity {
        self.severity
    }

    /// The typed error behind this finding, if any
    pub fn cause(&self) -> Option<&ConfigError> {
        self.cause.as_ref()
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == ValidationSeverity::Error
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at '{}': {}", self.severity, self.code, self.path, self.message)
    }
}

/// Result of checking one config
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// No error-severity findings
    pub valid: bool,
    pub findings: Vec<ValidationFinding>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            valid: true,
            findings: Vec::new(),
        }
    }

    pub fn add_finding(&mut self, finding: ValidationFinding) {
        if finding.is_blocking() {
            self.valid = false;
        }
        self.findings.push(finding);
    }

    pub fn errors(&self) -> Vec<&ValidationFinding> {
        self.with_severity(ValidationSeverity::Error)
    }

    pub fn warnings(&self) -> Vec<&ValidationFinding> {
        self.with_severity(ValidationSeverity::Warning)
    }

    pub fn infos(&self) -> Vec<&ValidationFinding> {
        self.with_severity(ValidationSeverity::Info)
    }

    fn with_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationFinding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    /// First blocking error, if any
    pub fn first_error(&self) -> Option<ConfigError> {
        self.findings
            .iter()
            .find(|f| f.is_blocking())
            .and_then(|f| f.cause().cloned())
    }
}

/// Trait for validation rules
pub trait ValidationRule: Send + Sync {
    /// Apply this rule to a configuration
    fn check(&self, config: &GaugeConfig, options: &ValidationOptions, report: &mut ValidationReport);

    /// Get the rule name
    fn name(&self) -> &'static str;
}

/// Main validator for gauge configurations
pub struct Validator {
    options: ValidationOptions,
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationOptions::default())
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("options", &self.options)
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        let mut validator = Self {
            options,
            rules: Vec::new(),
        };
        validator.add_builtin_rules();
        validator
    }

    fn add_builtin_rules(&mut self) {
        self.rules.push(Box::new(GeometryRule));
        self.rules.push(Box::new(PointerRule));
        self.rules.push(Box::new(TickRule));
        self.rules.push(Box::new(LabelRule));
        self.rules.push(Box::new(ZoneRule));
    }

    /// Register an additional rule, run after the built-in ones
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule and collect all findings
    pub fn check(&self, config: &GaugeConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        if let Some((min, max)) = self.options.domain {
            if !(min.is_finite() && max.is_finite() && min < max) {
                report.add_finding(ValidationFinding::error(ConfigError::range(
                    "domain",
                    format!("[{}, {}]", min, max),
                    "finite bounds with min < max",
                )));
                return report;
            }
        }

        for rule in &self.rules {
            rule.check(config, &self.options, &mut report);
        }

        for finding in report.warnings() {
            tracing::warn!(code = %finding.code, path = %finding.path, "{}", finding.message);
        }
        tracing::debug!(
            findings = report.findings.len(),
            valid = report.valid,
            "Gauge configuration checked"
        );

        report
    }

    /// Validate and return the config unchanged, or the first blocking error
    pub fn validate(&self, config: GaugeConfig) -> Result<GaugeConfig> {
        match self.check(&config).first_error() {
            Some(err) => Err(err),
            None => Ok(config),
        }
    }
}

/// Validate with default options (gaps only warn)
pub fn validate(config: GaugeConfig) -> Result<GaugeConfig> {
    Validator::default().validate(config)
}

fn require_finite(field: &str, value: f64, report: &mut ValidationReport) -> bool {
    if value.is_finite() {
        true
    } else {
        report.add_finding(ValidationFinding::error(ConfigError::range(
            field,
            value,
            "a finite number",
        )));
        false
    }
}

fn require_positive(field: &str, value: f64, report: &mut ValidationReport) {
    if !(value.is_finite() && value > 0.0) {
        report.add_finding(
            ValidationFinding::error(ConfigError::range(field, value, "> 0"))
                .with_suggestion(format!("Set '{}' to a positive fraction", field)),
        );
    }
}

/// Arc geometry
struct GeometryRule;

impl ValidationRule for GeometryRule {
    fn check(&self, config: &GaugeConfig, _options: &ValidationOptions, report: &mut ValidationReport) {
        require_finite("angle", config.angle, report);

        let lw = config.line_width;
        if !(lw > 0.0 && lw <= 1.0) {
            report.add_finding(
                ValidationFinding::error(ConfigError::range("lineWidth", lw, "(0, 1]"))
                    .with_suggestion("lineWidth is a fraction of the radius"),
            );
        }

        require_positive("radiusScale", config.radius_scale, report);
    }

    fn name(&self) -> &'static str {
        "geometry"
    }
}

/// Needle styling
struct PointerRule;

impl ValidationRule for PointerRule {
    fn check(&self, config: &GaugeConfig, _options: &ValidationOptions, report: &mut ValidationReport) {
        require_positive("pointer.length", config.pointer.length, report);
        require_positive("pointer.strokeWidth", config.pointer.stroke_width, report);
    }

    fn name(&self) -> &'static str {
        "pointer"
    }
}

/// Tick marks
struct TickRule;

impl ValidationRule for TickRule {
    fn check(&self, config: &GaugeConfig, _options: &ValidationOptions, report: &mut ValidationReport) {
        let Some(ticks) = &config.render_ticks else {
            return;
        };

        if ticks.divisions < 1 {
            report.add_finding(ValidationFinding::error(ConfigError::range(
                "renderTicks.divisions",
                ticks.divisions,
                ">= 1",
            )));
        }
        require_positive("renderTicks.divWidth", ticks.div_width, report);
        require_positive("renderTicks.divLength", ticks.div_length, report);
        require_positive("renderTicks.subLength", ticks.sub_length, report);
        require_positive("renderTicks.subWidth", ticks.sub_width, report);
    }

    fn name(&self) -> &'static str {
        "ticks"
    }
}

/// Static labels
struct LabelRule;

impl ValidationRule for LabelRule {
    fn check(&self, config: &GaugeConfig, options: &ValidationOptions, report: &mut ValidationReport) {
        let Some(labels) = &config.static_labels else {
            return;
        };

        if labels.font.trim().is_empty() {
            report.add_finding(ValidationFinding::error(ConfigError::range(
                "staticLabels.font",
                "\"\"",
                "a CSS font such as '10px sans-serif'",
            )));
        }

        if labels.fraction_digits > MAX_FRACTION_DIGITS {
            report.add_finding(ValidationFinding::error(ConfigError::range(
                "staticLabels.fractionDigits",
                labels.fraction_digits,
                format!("<= {}", MAX_FRACTION_DIGITS),
            )));
        }

        let mut all_finite = true;
        for (i, value) in labels.labels.iter().enumerate() {
            all_finite &= require_finite(&format!("staticLabels.labels[{}]", i), *value, report);
        }
        if !all_finite {
            return;
        }

        if labels.labels.windows(2).any(|w| w[1] < w[0]) {
            let err = ConfigError::range("staticLabels.labels", format!("{:?}", labels.labels), "ascending values");
            let finding = if options.require_sorted_labels {
                ValidationFinding::error(err)
            } else {
                ValidationFinding::warning(err)
            };
            report.add_finding(finding);
        }

        let domain = options.domain.or_else(|| config.value_domain());
        if let Some((min, max)) = domain {
            for (i, value) in labels.labels.iter().enumerate() {
                if *value < min || *value > max {
                    report.add_finding(
                        ValidationFinding::warning(ConfigError::range(
                            format!("staticLabels.labels[{}]", i),
                            value,
                            format!("within [{}, {}]", min, max),
                        ))
                        .with_suggestion("Labels outside the value domain are drawn off the arc"),
                    );
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "labels"
    }
}

/// Zone intervals, ordering, overlap and coverage
struct ZoneRule;

impl ZoneRule {
    fn gap(options: &ValidationOptions, field: String, message: String, report: &mut ValidationReport) {
        let err = ConfigError::overlap(field, ZoneIssue::Gap, message);
        match options.gap_policy {
            GapPolicy::Ignore => {}
            GapPolicy::Warn => report.add_finding(
                ValidationFinding::warning(err)
                    .with_suggestion("Extend a neighbouring zone or add one to cover the gap"),
            ),
            GapPolicy::Deny => report.add_finding(ValidationFinding::error(err)),
        }
    }
}

impl ValidationRule for ZoneRule {
    fn check(&self, config: &GaugeConfig, options: &ValidationOptions, report: &mut ValidationReport) {
        let zones = &config.static_zones;
        if zones.is_empty() {
            report.add_finding(ValidationFinding::info(
                "I_NO_ZONES",
                "No static zones; the arc is drawn with strokeColor only",
                "staticZones",
            ));
            return;
        }

        let mut intervals_ok = true;
        for (i, zone) in zones.iter().enumerate() {
            let field = format!("staticZones[{}]", i);
            let finite = require_finite(&format!("{}.min", field), zone.min, report)
                & require_finite(&format!("{}.max", field), zone.max, report);
            if !finite {
                intervals_ok = false;
            } else if zone.min >= zone.max {
                intervals_ok = false;
                report.add_finding(ValidationFinding::error(ConfigError::range(
                    field,
                    format!("[{}, {}]", zone.min, zone.max),
                    "min < max",
                )));
            }
        }
        // Ordering and coverage are meaningless once an interval is broken.
        if !intervals_ok {
            return;
        }

        for (i, pair) in zones.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let field = format!("staticZones[{}]", i + 1);
            if next.min < prev.min {
                report.add_finding(
                    ValidationFinding::error(ConfigError::overlap(
                        field,
                        ZoneIssue::Unordered,
                        format!("min {} is below the previous zone's min {}", next.min, prev.min),
                    ))
                    .with_suggestion("List zones in ascending order of min"),
                );
            } else if next.min < prev.max {
                report.add_finding(ValidationFinding::error(ConfigError::overlap(
                    field,
                    ZoneIssue::Overlap,
                    format!("[{}, {}] overlaps [{}, {}]", next.min, next.max, prev.min, prev.max),
                )));
            } else if next.min > prev.max {
                Self::gap(
                    options,
                    field,
                    format!("values {} to {} are not covered", prev.max, next.min),
                    report,
                );
            }
        }

        let Some((lo, hi)) = options.domain else {
            return;
        };
        for (i, zone) in zones.iter().enumerate() {
            if zone.min < lo || zone.max > hi {
                report.add_finding(ValidationFinding::error(ConfigError::overlap(
                    format!("staticZones[{}]", i),
                    ZoneIssue::OutsideDomain,
                    format!("[{}, {}] leaves the domain [{}, {}]", zone.min, zone.max, lo, hi),
                )));
            }
        }
        if let (Some(first), Some(last)) = (zones.first(), zones.last()) {
            if first.min > lo {
                Self::gap(
                    options,
                    "staticZones[0]".to_string(),
                    format!("values {} to {} are not covered", lo, first.min),
                    report,
                );
            }
            if last.max < hi {
                Self::gap(
                    options,
                    format!("staticZones[{}]", zones.len() - 1),
                    format!("values {} to {} are not covered", last.max, hi),
                    report,
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "zones"
    }
}
