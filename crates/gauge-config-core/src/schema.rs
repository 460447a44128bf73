//! Typed gauge configuration
//!
//! These structs are the validated shape handed to a renderer. Field names
//! serialize in camelCase to match the documents browser gauge libraries read
//! (`lineWidth`, `renderTicks`, `staticZones`, ...).

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::Result;
use crate::partial::PartialGaugeConfig;

/// Root configuration for one gauge instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeConfig {
    /// Span of the gauge arc; 0 draws a full circle minus the default gap
    pub angle: f64,
    /// Arc stroke thickness as a fraction of the radius
    pub line_width: f64,
    /// Multiplier applied to the computed radius
    pub radius_scale: f64,
    pub pointer: PointerConfig,
    /// Tick marks; absent means no ticks are drawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_ticks: Option<TickConfig>,
    /// Text labels along the scale; absent means no labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_labels: Option<LabelConfig>,
    /// Colored bands, ordered by `min`
    pub static_zones: Vec<ZoneConfig>,
    /// Clamp the displayed maximum instead of growing it with the value
    pub limit_max: bool,
    /// Clamp the displayed minimum
    pub limit_min: bool,
    pub color_start: Color,
    pub color_stop: Color,
    pub stroke_color: Color,
    /// Interpolate `colorStart`..`colorStop` into a gradient fill
    pub generate_gradient: bool,
    pub high_dpi_support: bool,
}

/// Needle styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerConfig {
    /// Length relative to the gauge radius
    pub length: f64,
    /// Thickness relative to the gauge radius
    pub stroke_width: f64,
    pub color: Color,
}

/// Major and minor tick rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickConfig {
    /// Number of major ticks, at least one
    pub divisions: u32,
    pub div_width: f64,
    pub div_length: f64,
    pub div_color: Color,
    /// Minor ticks per major interval; zero disables them
    pub sub_divisions: u32,
    pub sub_length: f64,
    pub sub_width: f64,
    pub sub_color: Color,
}

/// Static text labels drawn at fixed values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelConfig {
    /// CSS font shorthand, e.g. `8px sans-serif`
    pub font: String,
    pub labels: Vec<f64>,
    pub color: Color,
    pub fraction_digits: u32,
}

/// A colored sub-range of the value domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    pub stroke_style: Color,
    pub min: f64,
    pub max: f64,
}

impl ZoneConfig {
    pub fn new(stroke_style: Color, min: f64, max: f64) -> Self {
        Self {
            stroke_style,
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

impl GaugeConfig {
    /// Extent covered by the zones: first `min` to last `max`
    pub fn value_domain(&self) -> Option<(f64, f64)> {
        let first = self.static_zones.first()?;
        let last = self.static_zones.last()?;
        Some((first.min, last.max))
    }

    /// Zone a value falls into
    ///
    /// Intervals are half-open `[min, max)` except that the last zone also
    /// includes its `max`, so the top of the scale still has a color.
    pub fn zone_for(&self, value: f64) -> Option<&ZoneConfig> {
        if let Some(zone) = self.static_zones.iter().find(|z| z.contains(value)) {
            return Some(zone);
        }
        self.static_zones.last().filter(|z| value == z.max)
    }

    /// Label text for a value, rounded the way the renderer prints it
    ///
    /// Ties round away from zero (`2.5` prints as `3`), matching a browser's
    /// `Number.prototype.toFixed`.
    pub fn label_text(&self, value: f64) -> String {
        let digits = self
            .static_labels
            .as_ref()
            .map(|l| l.fraction_digits)
            .unwrap_or(0);
        let scale = 10f64.powi(digits as i32);
        let rounded = (value * scale).round() / scale;
        let shown = if rounded.is_finite() { rounded } else { value };
        format!("{:.*}", digits as usize, shown)
    }

    /// Overlay `partial` on top of this config and validate the result
    ///
    /// Values present in the overlay win; nested sections merge field by
    /// field and lists are replaced whole. `self` is left untouched.
    pub fn merge(&self, overlay: &PartialGaugeConfig) -> Result<GaugeConfig> {
        let merged = PartialGaugeConfig::from(self).overlay(overlay);
        crate::validation::validate(crate::defaults::with_defaults(merged)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_value_domain() {
        assert_eq!(presets::power_factor().value_domain(), Some((0.0, 1.0)));
        assert_eq!(presets::voltage().value_domain(), Some((200.0, 240.0)));

        let mut empty = presets::voltage();
        empty.static_zones.clear();
        assert_eq!(empty.value_domain(), None);
    }

    #[test]
    fn test_zone_for() {
        let config = presets::voltage();
        assert_eq!(config.zone_for(210.0).unwrap().stroke_style.as_str(), "#FFDD00");
        assert_eq!(config.zone_for(220.0).unwrap().stroke_style.as_str(), "#30B32D");
        assert_eq!(config.zone_for(240.0).unwrap().stroke_style.as_str(), "#F03E3E");
        assert!(config.zone_for(199.9).is_none());
        assert!(config.zone_for(240.1).is_none());
    }

    #[test]
    fn test_label_text() {
        let mut config = presets::power_factor();
        assert_eq!(config.label_text(0.85), "1");
        if let Some(labels) = config.static_labels.as_mut() {
            labels.fraction_digits = 2;
        }
        assert_eq!(config.label_text(0.85), "0.85");
    }

    #[test]
    fn test_label_text_rounds_ties_away_from_zero() {
        let mut config = presets::voltage();
        assert_eq!(config.label_text(2.5), "3");
        assert_eq!(config.label_text(0.5), "1");
        assert_eq!(config.label_text(1.5), "2");
        assert_eq!(config.label_text(-2.5), "-3");
        assert_eq!(config.label_text(2.4), "2");

        if let Some(labels) = config.static_labels.as_mut() {
            labels.fraction_digits = 1;
        }
        assert_eq!(config.label_text(0.25), "0.3");
        assert_eq!(config.label_text(230.0), "230.0");

        config.static_labels = None;
        assert_eq!(config.label_text(219.5), "220");
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(presets::voltage()).unwrap();
        assert_eq!(json["lineWidth"], 0.2);
        assert_eq!(json["renderTicks"]["subDivisions"], 5);
        assert_eq!(json["staticLabels"]["fractionDigits"], 0);
        assert_eq!(json["staticZones"][0]["strokeStyle"], "#FFDD00");
        assert_eq!(json["highDpiSupport"], true);
    }

    #[test]
    fn test_merge_overlays_without_mutating() {
        let base = presets::voltage();
        let overlay = PartialGaugeConfig {
            line_width: Some(0.3),
            ..Default::default()
        };
        let merged = base.merge(&overlay).unwrap();
        assert_eq!(merged.line_width, 0.3);
        assert_eq!(base.line_width, 0.2);
        assert_eq!(merged.static_zones, base.static_zones);
    }

    #[test]
    fn test_merge_revalidates() {
        let overlay = PartialGaugeConfig {
            line_width: Some(1.5),
            ..Default::default()
        };
        assert!(presets::voltage().merge(&overlay).is_err());
    }
}
