//! Documented defaults and default-filling
//!
//! `angle`, `lineWidth` and `staticZones` have no default and are checked in
//! that order. Inside a present `renderTicks` section `divisions` is
//! required; inside a present `staticLabels` section `labels` is required.
//! Everything else falls back to the constants below.

use crate::color::Color;
use crate::error::{ConfigError, Result};
use crate::partial::{
    PartialGaugeConfig, PartialLabelConfig, PartialPointerConfig, PartialTickConfig,
    PartialZoneConfig,
};
use crate::schema::{GaugeConfig, LabelConfig, PointerConfig, TickConfig, ZoneConfig};

pub const RADIUS_SCALE: f64 = 1.0;

pub const POINTER_LENGTH: f64 = 0.8;
pub const POINTER_STROKE_WIDTH: f64 = 0.035;
pub const POINTER_COLOR: &str = "#000000";

pub const LIMIT_MAX: bool = false;
pub const LIMIT_MIN: bool = false;
pub const COLOR_START: &str = "#6FADCF";
pub const COLOR_STOP: &str = "#8FC0DA";
pub const STROKE_COLOR: &str = "#E0E0E0";
pub const GENERATE_GRADIENT: bool = true;
pub const HIGH_DPI_SUPPORT: bool = true;

pub const TICK_DIV_WIDTH: f64 = 1.0;
pub const TICK_DIV_LENGTH: f64 = 0.5;
pub const TICK_DIV_COLOR: &str = "#333333";
pub const TICK_SUB_DIVISIONS: u32 = 0;
pub const TICK_SUB_LENGTH: f64 = 0.3;
pub const TICK_SUB_WIDTH: f64 = 0.6;
pub const TICK_SUB_COLOR: &str = "#666666";

pub const LABEL_FONT: &str = "10px sans-serif";
pub const LABEL_COLOR: &str = "#000000";
pub const LABEL_FRACTION_DIGITS: u32 = 0;

/// Fill omitted optional fields and turn a partial document into a typed config
///
/// Fails with [`ConfigError::MissingField`] naming the first absent required
/// key, [`ConfigError::MalformedColor`] for unparseable colors, and
/// [`ConfigError::Range`] for negative counts. Bounds are not checked here;
/// run the result through [`crate::validate`].
pub fn with_defaults(partial: PartialGaugeConfig) -> Result<GaugeConfig> {
    let angle = partial.angle.ok_or_else(|| ConfigError::missing("angle"))?;
    let line_width = partial
        .line_width
        .ok_or_else(|| ConfigError::missing("lineWidth"))?;
    let zones = partial
        .static_zones
        .ok_or_else(|| ConfigError::missing("staticZones"))?;

    let static_zones = zones
        .into_iter()
        .enumerate()
        .map(|(i, zone)| zone_with_defaults(i, zone))
        .collect::<Result<Vec<_>>>()?;

    Ok(GaugeConfig {
        angle,
        line_width,
        radius_scale: partial.radius_scale.unwrap_or(RADIUS_SCALE),
        pointer: pointer_with_defaults(partial.pointer.unwrap_or_default())?,
        render_ticks: partial.render_ticks.map(ticks_with_defaults).transpose()?,
        static_labels: partial.static_labels.map(labels_with_defaults).transpose()?,
        static_zones,
        limit_max: partial.limit_max.unwrap_or(LIMIT_MAX),
        limit_min: partial.limit_min.unwrap_or(LIMIT_MIN),
        color_start: color("colorStart", partial.color_start, COLOR_START)?,
        color_stop: color("colorStop", partial.color_stop, COLOR_STOP)?,
        stroke_color: color("strokeColor", partial.stroke_color, STROKE_COLOR)?,
        generate_gradient: partial.generate_gradient.unwrap_or(GENERATE_GRADIENT),
        high_dpi_support: partial.high_dpi_support.unwrap_or(HIGH_DPI_SUPPORT),
    })
}

fn pointer_with_defaults(pointer: PartialPointerConfig) -> Result<PointerConfig> {
    Ok(PointerConfig {
        length: pointer.length.unwrap_or(POINTER_LENGTH),
        stroke_width: pointer.stroke_width.unwrap_or(POINTER_STROKE_WIDTH),
        color: color("pointer.color", pointer.color, POINTER_COLOR)?,
    })
}

fn ticks_with_defaults(ticks: PartialTickConfig) -> Result<TickConfig> {
    let divisions = ticks
        .divisions
        .ok_or_else(|| ConfigError::missing("renderTicks.divisions"))?;

    Ok(TickConfig {
        divisions: count("renderTicks.divisions", divisions)?,
        div_width: ticks.div_width.unwrap_or(TICK_DIV_WIDTH),
        div_length: ticks.div_length.unwrap_or(TICK_DIV_LENGTH),
        div_color: color("renderTicks.divColor", ticks.div_color, TICK_DIV_COLOR)?,
        sub_divisions: ticks
            .sub_divisions
            .map(|n| count("renderTicks.subDivisions", n))
            .transpose()?
            .unwrap_or(TICK_SUB_DIVISIONS),
        sub_length: ticks.sub_length.unwrap_or(TICK_SUB_LENGTH),
        sub_width: ticks.sub_width.unwrap_or(TICK_SUB_WIDTH),
        sub_color: color("renderTicks.subColor", ticks.sub_color, TICK_SUB_COLOR)?,
    })
}

fn labels_with_defaults(labels: PartialLabelConfig) -> Result<LabelConfig> {
    let values = labels
        .labels
        .ok_or_else(|| ConfigError::missing("staticLabels.labels"))?;

    Ok(LabelConfig {
        font: labels.font.unwrap_or_else(|| LABEL_FONT.to_string()),
        labels: values,
        color: color("staticLabels.color", labels.color, LABEL_COLOR)?,
        fraction_digits: labels
            .fraction_digits
            .map(|n| count("staticLabels.fractionDigits", n))
            .transpose()?
            .unwrap_or(LABEL_FRACTION_DIGITS),
    })
}

fn zone_with_defaults(index: usize, zone: PartialZoneConfig) -> Result<ZoneConfig> {
    let field = |name: &str| format!("staticZones[{}].{}", index, name);

    let stroke_style = zone
        .stroke_style
        .ok_or_else(|| ConfigError::missing(field("strokeStyle")))?;
    let min = zone.min.ok_or_else(|| ConfigError::missing(field("min")))?;
    let max = zone.max.ok_or_else(|| ConfigError::missing(field("max")))?;

    Ok(ZoneConfig {
        stroke_style: parse_color(&field("strokeStyle"), &stroke_style)?,
        min,
        max,
    })
}

fn count(field: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ConfigError::range(field, value, "a non-negative integer"))
}

fn color(field: &str, value: Option<String>, default: &str) -> Result<Color> {
    parse_color(field, value.as_deref().unwrap_or(default))
}

pub(crate) fn parse_color(field: &str, literal: &str) -> Result<Color> {
    Color::parse(literal).map_err(|e| ConfigError::MalformedColor {
        field: field.to_string(),
        value: literal.to_string(),
        reason: e.to_string(),
    })
}
