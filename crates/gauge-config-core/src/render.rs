//! Renderer collaborator contract
//!
//! Drawing lives outside this crate. A renderer receives a validated config
//! once through [`GaugeRenderer::render`] and afterwards only new values
//! through [`GaugeRenderer::update`].

use crate::error::{ConfigError, Result};
use crate::schema::GaugeConfig;

/// Something that can draw a gauge
pub trait GaugeRenderer {
    /// Draw the gauge with an initial value
    fn render(&mut self, config: &GaugeConfig, value: f64) -> Result<()>;

    /// Move the pointer to a new value
    fn update(&mut self, value: f64) -> Result<()>;
}

/// Displayed range after applying `limitMin`/`limitMax` to a value
///
/// A clamped bound holds the value at the domain edge. With `limitMax`
/// off the maximum grows to the value instead; with `limitMin` off the
/// minimum shrinks the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayState {
    pub min: f64,
    pub max: f64,
    /// Value the pointer is drawn at
    pub shown: f64,
}

impl DisplayState {
    pub fn resolve(config: &GaugeConfig, domain: (f64, f64), value: f64) -> Self {
        let (mut min, mut max) = domain;
        let mut shown = value;

        if value > max {
            if config.limit_max {
                shown = max;
            } else {
                max = value;
            }
        }
        if value < min {
            if config.limit_min {
                shown = min;
            } else {
                min = value;
            }
        }

        Self { min, max, shown }
    }
}

/// Renderer that draws nothing and records what it was asked to show
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    config: Option<GaugeConfig>,
    domain: (f64, f64),
    history: Vec<DisplayState>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[DisplayState] {
        &self.history
    }

    pub fn last(&self) -> Option<&DisplayState> {
        self.history.last()
    }

    fn push(&mut self, value: f64) -> Result<()> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| ConfigError::missing("config"))?;
        if !value.is_finite() {
            return Err(ConfigError::range("value", value, "a finite number"));
        }

        let state = DisplayState::resolve(config, self.domain, value);
        // A grown bound stays grown for later updates.
        self.domain = (state.min, state.max);
        self.history.push(state);
        Ok(())
    }
}

impl GaugeRenderer for RecordingRenderer {
    fn render(&mut self, config: &GaugeConfig, value: f64) -> Result<()> {
        self.domain = config.value_domain().unwrap_or((0.0, 1.0));
        self.config = Some(config.clone());
        self.history.clear();
        self.push(value)
    }

    fn update(&mut self, value: f64) -> Result<()> {
        self.push(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_update_before_render_fails() {
        let mut renderer = RecordingRenderer::new();
        assert_eq!(renderer.update(230.0).unwrap_err(), ConfigError::missing("config"));
    }

    #[test]
    fn test_limits_clamp_pointer() {
        let mut renderer = RecordingRenderer::new();
        renderer.render(&presets::voltage(), 231.0).unwrap();
        renderer.update(251.0).unwrap();
        renderer.update(180.0).unwrap();

        let history = renderer.history();
        assert_eq!(history[0].shown, 231.0);
        assert_eq!(history[1], DisplayState { min: 200.0, max: 240.0, shown: 240.0 });
        assert_eq!(history[2], DisplayState { min: 200.0, max: 240.0, shown: 200.0 });
    }

    #[test]
    fn test_unlimited_max_grows() {
        let mut config = presets::power_factor();
        config.limit_max = false;

        let mut renderer = RecordingRenderer::new();
        renderer.render(&config, 0.9).unwrap();
        renderer.update(1.2).unwrap();
        renderer.update(0.95).unwrap();

        assert_eq!(renderer.history()[1], DisplayState { min: 0.0, max: 1.2, shown: 1.2 });
        assert_eq!(renderer.last().map(|s| s.max), Some(1.2));
    }

    #[test]
    fn test_rejects_non_finite_value() {
        let mut renderer = RecordingRenderer::new();
        renderer.render(&presets::voltage(), 220.0).unwrap();
        assert!(renderer.update(f64::NAN).is_err());
        assert_eq!(renderer.history().len(), 1);
    }
}
