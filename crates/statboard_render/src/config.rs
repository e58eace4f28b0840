use serde::{Deserialize, Serialize};
use statboard_core::{Result, StatsError};

/// Chart layout and output resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Output resolution; pixel size = inches * dpi
    pub dpi: u32,
    /// Bar fill colour (RGB)
    pub bar_color: [u8; 3],
    /// Title size in points
    pub title_font_pt: f64,
    /// Axis label size in points
    pub label_font_pt: f64,
    /// Widest bar of the terminal chart, in characters
    pub text_width: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width_in: 9.0,
            height_in: 5.0,
            dpi: 150,
            bar_color: [135, 206, 235], // skyblue
            title_font_pt: 14.0,
            label_font_pt: 12.0,
            text_width: 40,
        }
    }
}

impl PlotConfig {
    /// Parse a (possibly partial) JSON config; missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(StatsError::InvalidConfig(format!(
                "figure size must be positive, got {}x{} in",
                self.width_in, self.height_in
            )));
        }
        if self.dpi == 0 {
            return Err(StatsError::InvalidConfig("dpi must be positive".to_string()));
        }
        if !(self.title_font_pt > 0.0 && self.label_font_pt > 0.0) {
            return Err(StatsError::InvalidConfig(
                "font sizes must be positive".to_string(),
            ));
        }
        if self.text_width == 0 {
            return Err(StatsError::InvalidConfig(
                "text_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Output size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Convert a point size to pixels at the configured resolution
    pub fn font_px(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pixel_size() {
        let config = PlotConfig::default();
        assert_eq!(config.pixel_size(), (1350, 750));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PlotConfig::from_json(r#"{ "dpi": 100, "bar_color": [255, 0, 0] }"#).unwrap();
        assert_eq!(config.dpi, 100);
        assert_eq!(config.bar_color, [255, 0, 0]);
        assert_eq!(config.width_in, 9.0);
        assert_eq!(config.pixel_size(), (900, 500));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = PlotConfig::from_json(r#"{ "dpi": 0 }"#).unwrap_err();
        assert!(matches!(err, StatsError::InvalidConfig(_)));

        let err = PlotConfig::from_json(r#"{ "width_in": -1.0 }"#).unwrap_err();
        assert!(matches!(err, StatsError::InvalidConfig(_)));

        let err = PlotConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, StatsError::Json(_)));
    }

    #[test]
    fn test_font_px() {
        let config = PlotConfig::default();
        assert_eq!(config.font_px(72.0), 150.0);
    }
}
