//! Gauge configuration schema
//!
//! Typed, validated configuration for radial gauges of the kind a browser
//! gauge library draws: arc geometry, pointer styling, tick marks, static
//! labels and colored threshold zones.
//!
//! ## Lifecycle
//!
//! 1. A document is written as a literal ([`presets`]) or loaded from JSON,
//!    YAML or TOML ([`loader`]) into a [`PartialGaugeConfig`].
//! 2. [`with_defaults`] fills optional fields and parses colors.
//! 3. [`validate`] (or a configured [`Validator`]) checks every bound and the
//!    zone layout and returns the config unchanged.
//! 4. The result is handed to a [`GaugeRenderer`]. Configs are never changed
//!    in place; [`GaugeConfig::merge`] builds a new one.
//!
//! ## Example
//!
//! ```rust
//! use gauge_config_core::{presets, validate, Validator, ValidationOptions, GapPolicy};
//!
//! let config = validate(presets::voltage()).unwrap();
//! assert_eq!(config.value_domain(), Some((200.0, 240.0)));
//!
//! let strict = Validator::new(ValidationOptions::new().with_gap_policy(GapPolicy::Deny));
//! assert!(strict.validate(presets::power_factor()).is_ok());
//! ```

pub mod color;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod partial;
pub mod presets;
pub mod render;
pub mod schema;
pub mod validation;

pub use color::{Color, ColorError, Rgba};
pub use defaults::with_defaults;
pub use error::{ConfigError, Result, ZoneIssue};
pub use loader::{export, load_file, load_validated, parse_str, ConfigFormat, ExportFormat};
pub use partial::{
    PartialGaugeConfig, PartialLabelConfig, PartialPointerConfig, PartialTickConfig,
    PartialZoneConfig,
};
pub use render::{DisplayState, GaugeRenderer, RecordingRenderer};
pub use schema::{GaugeConfig, LabelConfig, PointerConfig, TickConfig, ZoneConfig};
pub use validation::{
    validate, GapPolicy, ValidationFinding, ValidationOptions, ValidationReport,
    ValidationRule, ValidationSeverity, Validator,
};
