//! Partially specified gauge documents
//!
//! A [`PartialGaugeConfig`] is what loaders produce and what callers use as
//! an overlay: every field is optional, colors are still raw text and tick
//! counts are signed so a negative count becomes a range error instead of a
//! decoding failure.

use serde::{Deserialize, Serialize};

use crate::schema::{GaugeConfig, LabelConfig, PointerConfig, TickConfig, ZoneConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialGaugeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<PartialPointerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_ticks: Option<PartialTickConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_labels: Option<PartialLabelConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_zones: Option<Vec<PartialZoneConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_max: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_min: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_stop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_gradient: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_dpi_support: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialPointerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialTickConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub div_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub div_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub div_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_divisions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialLabelConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction_digits: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialZoneConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl PartialGaugeConfig {
    /// Layer `top` over `self`; values present in `top` win
    pub fn overlay(self, top: &PartialGaugeConfig) -> PartialGaugeConfig {
        PartialGaugeConfig {
            angle: top.angle.or(self.angle),
            line_width: top.line_width.or(self.line_width),
            radius_scale: top.radius_scale.or(self.radius_scale),
            pointer: merge_section(self.pointer, &top.pointer, PartialPointerConfig::overlay),
            render_ticks: merge_section(self.render_ticks, &top.render_ticks, PartialTickConfig::overlay),
            static_labels: merge_section(
                self.static_labels,
                &top.static_labels,
                PartialLabelConfig::overlay,
            ),
            static_zones: top.static_zones.clone().or(self.static_zones),
            limit_max: top.limit_max.or(self.limit_max),
            limit_min: top.limit_min.or(self.limit_min),
            color_start: top.color_start.clone().or(self.color_start),
            color_stop: top.color_stop.clone().or(self.color_stop),
            stroke_color: top.stroke_color.clone().or(self.stroke_color),
            generate_gradient: top.generate_gradient.or(self.generate_gradient),
            high_dpi_support: top.high_dpi_support.or(self.high_dpi_support),
        }
    }
}

impl PartialPointerConfig {
    pub fn overlay(self, top: &PartialPointerConfig) -> PartialPointerConfig {
        PartialPointerConfig {
            length: top.length.or(self.length),
            stroke_width: top.stroke_width.or(self.stroke_width),
            color: top.color.clone().or(self.color),
        }
    }
}

impl PartialTickConfig {
    pub fn overlay(self, top: &PartialTickConfig) -> PartialTickConfig {
        PartialTickConfig {
            divisions: top.divisions.or(self.divisions),
            div_width: top.div_width.or(self.div_width),
            div_length: top.div_length.or(self.div_length),
            div_color: top.div_color.clone().or(self.div_color),
            sub_divisions: top.sub_divisions.or(self.sub_divisions),
            sub_length: top.sub_length.or(self.sub_length),
            sub_width: top.sub_width.or(self.sub_width),
            sub_color: top.sub_color.clone().or(self.sub_color),
        }
    }
}

impl PartialLabelConfig {
    pub fn overlay(self, top: &PartialLabelConfig) -> PartialLabelConfig {
        PartialLabelConfig {
            font: top.font.clone().or(self.font),
            labels: top.labels.clone().or(self.labels),
            color: top.color.clone().or(self.color),
            fraction_digits: top.fraction_digits.or(self.fraction_digits),
        }
    }
}

fn merge_section<T: Clone>(
    base: Option<T>,
    top: &Option<T>,
    merge: impl FnOnce(T, &T) -> T,
) -> Option<T> {
    match (base, top) {
        (Some(base), Some(top)) => Some(merge(base, top)),
        (None, Some(top)) => Some(top.clone()),
        (base, None) => base,
    }
}

impl From<&GaugeConfig> for PartialGaugeConfig {
    fn from(config: &GaugeConfig) -> Self {
        PartialGaugeConfig {
            angle: Some(config.angle),
            line_width: Some(config.line_width),
            radius_scale: Some(config.radius_scale),
            pointer: Some(PartialPointerConfig::from(&config.pointer)),
            render_ticks: config.render_ticks.as_ref().map(PartialTickConfig::from),
            static_labels: config.static_labels.as_ref().map(PartialLabelConfig::from),
            static_zones: Some(config.static_zones.iter().map(PartialZoneConfig::from).collect()),
            limit_max: Some(config.limit_max),
            limit_min: Some(config.limit_min),
            color_start: Some(config.color_start.to_string()),
            color_stop: Some(config.color_stop.to_string()),
            stroke_color: Some(config.stroke_color.to_string()),
            generate_gradient: Some(config.generate_gradient),
            high_dpi_support: Some(config.high_dpi_support),
        }
    }
}

impl From<&PointerConfig> for PartialPointerConfig {
    fn from(pointer: &PointerConfig) -> Self {
        PartialPointerConfig {
            length: Some(pointer.length),
            stroke_width: Some(pointer.stroke_width),
            color: Some(pointer.color.to_string()),
        }
    }
}

impl From<&TickConfig> for PartialTickConfig {
    fn from(ticks: &TickConfig) -> Self {
        PartialTickConfig {
            divisions: Some(ticks.divisions as i64),
            div_width: Some(ticks.div_width),
            div_length: Some(ticks.div_length),
            div_color: Some(ticks.div_color.to_string()),
            sub_divisions: Some(ticks.sub_divisions as i64),
            sub_length: Some(ticks.sub_length),
            sub_width: Some(ticks.sub_width),
            sub_color: Some(ticks.sub_color.to_string()),
        }
    }
}

impl From<&LabelConfig> for PartialLabelConfig {
    fn from(labels: &LabelConfig) -> Self {
        PartialLabelConfig {
            font: Some(labels.font.clone()),
            labels: Some(labels.labels.clone()),
            color: Some(labels.color.to_string()),
            fraction_digits: Some(labels.fraction_digits as i64),
        }
    }
}

impl From<&ZoneConfig> for PartialZoneConfig {
    fn from(zone: &ZoneConfig) -> Self {
        PartialZoneConfig {
            stroke_style: Some(zone.stroke_style.to_string()),
            min: Some(zone.min),
            max: Some(zone.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_deserialize_sparse_document() {
        let partial: PartialGaugeConfig = serde_json::from_str(
            r##"{"angle": 0.1, "pointer": {"color": "#ff0000"}, "staticZones": []}"##,
        )
        .unwrap();
        assert_eq!(partial.angle, Some(0.1));
        assert_eq!(partial.line_width, None);
        assert_eq!(partial.pointer.unwrap().color.as_deref(), Some("#ff0000"));
        assert_eq!(partial.static_zones, Some(vec![]));
    }

    #[test]
    fn test_overlay_prefers_top_values() {
        let base = PartialGaugeConfig {
            angle: Some(0.0),
            line_width: Some(0.2),
            pointer: Some(PartialPointerConfig {
                length: Some(0.4),
                stroke_width: Some(0.042),
                color: Some("#0f0f0f".to_string()),
            }),
            ..Default::default()
        };
        let top = PartialGaugeConfig {
            line_width: Some(0.5),
            pointer: Some(PartialPointerConfig {
                color: Some("red".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.overlay(&top);
        assert_eq!(merged.angle, Some(0.0));
        assert_eq!(merged.line_width, Some(0.5));
        let pointer = merged.pointer.unwrap();
        assert_eq!(pointer.length, Some(0.4));
        assert_eq!(pointer.color.as_deref(), Some("red"));
    }

    #[test]
    fn test_overlay_replaces_zone_list() {
        let base = PartialGaugeConfig::from(&presets::power_factor());
        let top = PartialGaugeConfig {
            static_zones: Some(vec![PartialZoneConfig {
                stroke_style: Some("#00FF00".to_string()),
                min: Some(0.0),
                max: Some(1.0),
            }]),
            ..Default::default()
        };
        assert_eq!(base.overlay(&top).static_zones.unwrap().len(), 1);
    }

    #[test]
    fn test_lift_from_config_is_complete() {
        let partial = PartialGaugeConfig::from(&presets::voltage());
        assert_eq!(partial.static_zones.as_ref().map(Vec::len), Some(3));
        assert_eq!(partial.render_ticks.as_ref().and_then(|t| t.divisions), Some(4));
        assert_eq!(partial.color_start.as_deref(), Some("#6FADCF"));
    }
}
