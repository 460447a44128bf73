//! Built-in gauge definitions
//!
//! Both gauges share geometry, pointer, tick and color styling and differ
//! only in their labels and zone thresholds.

use crate::color::Color;
use crate::schema::{GaugeConfig, LabelConfig, PointerConfig, TickConfig, ZoneConfig};

/// Preset names accepted by [`by_name`]
pub const PRESET_NAMES: &[&str] = &["pf", "voltage"];

// Literals here are constants; a bad one is a bug caught by
// `test_preset_colors_parse`.
fn hex(literal: &str) -> Color {
    Color::parse(literal).expect("preset color literal is well-formed")
}

fn zone(literal: &str, min: f64, max: f64) -> ZoneConfig {
    ZoneConfig::new(hex(literal), min, max)
}

fn base(labels: Vec<f64>, static_zones: Vec<ZoneConfig>) -> GaugeConfig {
    GaugeConfig {
        angle: 0.0,
        line_width: 0.2,
        radius_scale: 1.0,
        pointer: PointerConfig {
            length: 0.4,
            stroke_width: 0.042,
            color: hex("#0f0f0f"),
        },
        render_ticks: Some(TickConfig {
            divisions: 4,
            div_width: 1.1,
            div_length: 0.7,
            div_color: hex("#808080"),
            sub_divisions: 5,
            sub_length: 0.5,
            sub_width: 0.6,
            sub_color: hex("#aaaaaa"),
        }),
        static_labels: Some(LabelConfig {
            font: "8px sans-serif".to_string(),
            labels,
            color: hex("#aaaaee"),
            fraction_digits: 0,
        }),
        static_zones,
        limit_max: true,
        limit_min: true,
        color_start: hex("#6FADCF"),
        color_stop: hex("#8FC0DA"),
        stroke_color: hex("#E0E0E0"),
        generate_gradient: true,
        high_dpi_support: true,
    }
}

/// Power-factor gauge: five contiguous bands from 0.0 to 1.0
pub fn power_factor() -> GaugeConfig {
    base(
        vec![0.0, 1.0],
        vec![
            zone("#8B0000", 0.0, 0.5),
            zone("#DC143C", 0.5, 0.65),
            zone("#FFA500", 0.65, 0.8),
            zone("#ADFF2F", 0.8, 0.85),
            zone("#00FF00", 0.85, 1.0),
        ],
    )
}

/// Mains voltage gauge: low (yellow), nominal (green) and high (red) bands
pub fn voltage() -> GaugeConfig {
    base(
        vec![200.0, 210.0, 220.0, 230.0, 240.0],
        vec![
            zone("#FFDD00", 200.0, 220.0),
            zone("#30B32D", 220.0, 230.0),
            zone("#F03E3E", 230.0, 240.0),
        ],
    )
}

/// Look up a preset by name (`pf`, `power-factor`, `voltage`)
pub fn by_name(name: &str) -> Option<GaugeConfig> {
    match name.to_lowercase().as_str() {
        "pf" | "power-factor" | "power_factor" => Some(power_factor()),
        "voltage" | "volt" => Some(voltage()),
        _ => None,
    }
}

/// Variable name the browser page expects for a preset
pub fn script_name(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "pf" | "power-factor" | "power_factor" => Some("pfOpts"),
        "voltage" | "volt" => Some("voltageOpts"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_presets_keep_literals() {
        let pf = power_factor();
        assert_eq!(pf.static_zones.len(), 5);
        assert_eq!(pf.static_zones[1].stroke_style.as_str(), "#DC143C");
        assert_eq!(pf.pointer.color.as_str(), "#0f0f0f");
        assert_eq!(pf.color_start.rgba(), Rgba::opaque(0x6f, 0xad, 0xcf));
    }

    #[test]
    fn test_preset_colors_parse() {
        for config in [power_factor(), voltage()] {
            let json = serde_json::to_string(&config).unwrap();
            let reparsed: GaugeConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(reparsed, config);
            assert!(config.stroke_color.is_opaque());
            for zone in &config.static_zones {
                assert!(zone.stroke_style.as_str().starts_with('#'));
                assert!(zone.stroke_style.is_opaque());
            }
        }
    }

    #[test]
    fn test_presets_differ_only_in_labels_and_zones() {
        let mut pf = power_factor();
        let v = voltage();
        pf.static_labels = v.static_labels.clone();
        pf.static_zones = v.static_zones.clone();
        assert_eq!(pf, v);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("PF"), Some(power_factor()));
        assert_eq!(by_name("voltage"), Some(voltage()));
        assert!(by_name("current").is_none());
        assert_eq!(script_name("pf"), Some("pfOpts"));
        assert_eq!(script_name("voltage"), Some("voltageOpts"));
        for name in PRESET_NAMES {
            assert!(by_name(name).is_some());
        }
    }
}
