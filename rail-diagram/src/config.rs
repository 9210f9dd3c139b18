//! Layout configuration for diagram rendering.

use serde::Deserialize;

/// Scale factors for station layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Seconds of ruler time per vertical pixel, used when laying out by
    /// an ordinate ruler.
    pub seconds_per_pix_y: f64,

    /// Vertical pixels per kilometre, used when laying out by mileage.
    pub pixels_per_km: f64,
}

impl DiagramConfig {
    /// Create a config with explicit scale factors.
    pub fn new(seconds_per_pix_y: f64, pixels_per_km: f64) -> Self {
        Self {
            seconds_per_pix_y,
            pixels_per_km,
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            seconds_per_pix_y: 8.0,
            pixels_per_km: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DiagramConfig::default();

        assert_eq!(config.seconds_per_pix_y, 8.0);
        assert_eq!(config.pixels_per_km, 4.0);
    }

    #[test]
    fn custom_config() {
        let config = DiagramConfig::new(15.0, 2.0);

        assert_eq!(config.seconds_per_pix_y, 15.0);
        assert_eq!(config.pixels_per_km, 2.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DiagramConfig = serde_json::from_str(r#"{"pixels_per_km": 3.5}"#).unwrap();

        assert_eq!(config.seconds_per_pix_y, 8.0);
        assert_eq!(config.pixels_per_km, 3.5);
    }
}
