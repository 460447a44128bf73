//! Reading and writing gauge documents
//!
//! Documents are decoded into a [`PartialGaugeConfig`] first so that missing
//! keys surface as [`ConfigError::MissingField`] rather than as decoder
//! errors. Field names are case-sensitive camelCase in every format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::defaults::with_defaults;
use crate::error::{ConfigError, Result};
use crate::partial::PartialGaugeConfig;
use crate::schema::GaugeConfig;
use crate::validation::Validator;

/// Variable name used for script exports when none is given
pub const DEFAULT_SCRIPT_NAME: &str = "gaugeOpts";

/// Input document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        extension.parse()
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(format!(
                "'{}'. Supported formats: json, yaml, yml, toml",
                other
            ))),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "json"),
            ConfigFormat::Yaml => write!(f, "yaml"),
            ConfigFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Output formats for [`export`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Toml,
    /// `var <name> = {...};` for a browser page
    Script,
}

/// Decode a document held in memory
pub fn parse_str(content: &str, format: ConfigFormat) -> Result<PartialGaugeConfig> {
    let partial = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    Ok(partial)
}

/// Read and decode a document, choosing the format from its extension
pub fn load_file(path: impl AsRef<Path>) -> Result<PartialGaugeConfig> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::Io(format!("Failed to read config file '{}': {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), %format, "Loading gauge configuration");
    parse_str(&content, format)
}

/// Read a document, fill defaults and validate it
pub fn load_validated(path: impl AsRef<Path>, validator: &Validator) -> Result<GaugeConfig> {
    let partial = load_file(path)?;
    validator.validate(with_defaults(partial)?)
}

/// Encode a config; `name` is the variable name for [`ExportFormat::Script`]
pub fn export(config: &GaugeConfig, format: ExportFormat, name: Option<&str>) -> Result<String> {
    let serialization = |e: &dyn fmt::Display| ConfigError::Serialization(e.to_string());

    match format {
        ExportFormat::Json => serde_json::to_string_pretty(config).map_err(|e| serialization(&e)),
        ExportFormat::Yaml => serde_yaml::to_string(config).map_err(|e| serialization(&e)),
        ExportFormat::Toml => toml::to_string(config).map_err(|e| serialization(&e)),
        ExportFormat::Script => {
            let name = name.unwrap_or(DEFAULT_SCRIPT_NAME);
            if !is_identifier(name) {
                return Err(ConfigError::Serialization(format!(
                    "'{}' is not a valid script variable name",
                    name
                )));
            }
            let body = serde_json::to_string_pretty(config).map_err(|e| serialization(&e))?;
            Ok(format!("var {} = {};\n", name, body))
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("g.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("g.YML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("g.toml")).unwrap(), ConfigFormat::Toml);
        assert!(matches!(
            ConfigFormat::from_path(&PathBuf::from("g.js")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_yaml() {
        let content = "angle: 0\nlineWidth: 0.2\nstaticZones:\n  - {strokeStyle: '#FFDD00', min: 200, max: 220}\n";
        let partial = parse_str(content, ConfigFormat::Yaml).unwrap();
        assert_eq!(partial.angle, Some(0.0));
        assert_eq!(partial.static_zones.unwrap()[0].max, Some(220.0));
    }

    #[test]
    fn test_parse_toml() {
        let content = r##"
angle = 0
lineWidth = 0.2

[[staticZones]]
strokeStyle = "#8B0000"
min = 0.0
max = 0.5
"##;
        let partial = parse_str(content, ConfigFormat::Toml).unwrap();
        assert_eq!(partial.line_width, Some(0.2));
        assert_eq!(partial.static_zones.map(|z| z.len()), Some(1));
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let partial = parse_str(r#"{"angle": 0, "linewidth": 0.2, "staticZones": []}"#, ConfigFormat::Json).unwrap();
        assert_eq!(partial.line_width, None);
        assert_eq!(with_defaults(partial).unwrap_err(), ConfigError::missing("lineWidth"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_str("{not json", ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validated_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json = export(&presets::voltage(), ExportFormat::Json, None).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = load_validated(file.path(), &Validator::default()).unwrap();
        assert_eq!(config, presets::voltage());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_export_yaml_and_toml_reparse() {
        let config = presets::power_factor();
        for (format, input) in [
            (ExportFormat::Yaml, ConfigFormat::Yaml),
            (ExportFormat::Toml, ConfigFormat::Toml),
        ] {
            let text = export(&config, format, None).unwrap();
            let reparsed = with_defaults(parse_str(&text, input).unwrap()).unwrap();
            assert_eq!(reparsed, config);
        }
    }

    #[test]
    fn test_export_script() {
        let text = export(&presets::power_factor(), ExportFormat::Script, Some("pfOpts")).unwrap();
        assert!(text.starts_with("var pfOpts = {"));
        assert!(text.trim_end().ends_with("};"));
        assert!(text.contains("\"staticZones\""));

        let default_name = export(&presets::voltage(), ExportFormat::Script, None).unwrap();
        assert!(default_name.starts_with("var gaugeOpts = "));

        assert!(export(&presets::voltage(), ExportFormat::Script, Some("1bad")).is_err());
    }
}
