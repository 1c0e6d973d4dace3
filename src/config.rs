use serde::Deserialize;
use thiserror::Error;

use crate::spots::maidenhead_to_lat_lon;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Operator configuration. Every field has a default so a missing file
/// simply means a stock UK setup.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub station: StationConfig,
    #[serde(default)]
    pub spots: SpotFilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    /// Maidenhead locator of the operator's station.
    #[serde(default = "default_grid")]
    pub grid: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            name: None,
            grid: default_grid(),
        }
    }
}

fn default_grid() -> String {
    "IO91".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SpotFilterConfig {
    /// Keep only spots heard by receivers whose locator starts with
    /// this prefix; `None` keeps everything.
    pub rx_grid_prefix: Option<String>,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Operator coordinates from the configured locator; an unusable
    /// locator logs a warning and falls back to the default.
    pub fn station_lat_lon(&self) -> (f64, f64) {
        match maidenhead_to_lat_lon(&self.station.grid) {
            Some(pos) => pos,
            None => {
                log::warn!(
                    "station grid {:?} does not decode, using {}",
                    self.station.grid,
                    default_grid()
                );
                maidenhead_to_lat_lon(&default_grid()).unwrap_or((51.0, -2.0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_locates_the_station_in_england() {
        let config = Config::default();
        let (lat, lon) = config.station_lat_lon();
        assert_eq!((lat, lon), (51.0, -2.0));
    }

    #[test]
    fn yaml_fields_override_defaults() {
        let config: Config = serde_yaml::from_str(
            "station:\n  name: test\n  grid: FN31\nspots:\n  rx_grid_prefix: FN\n",
        )
        .unwrap();
        assert_eq!(config.station.grid, "FN31");
        assert_eq!(config.spots.rx_grid_prefix.as_deref(), Some("FN"));
        let (lat, lon) = config.station_lat_lon();
        assert_eq!((lat, lon), (41.0, -74.0));
    }

    #[test]
    fn bad_grid_falls_back_to_default() {
        let config: Config = serde_yaml::from_str("station:\n  grid: nowhere\n").unwrap();
        assert_eq!(config.station_lat_lon(), (51.0, -2.0));
    }
}
