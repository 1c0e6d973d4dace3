mod aggregate;
mod grid;
mod loader;
mod region;

pub use aggregate::{aggregate, BandActivity, SpotStats};
pub use grid::{haversine_km, maidenhead_to_lat_lon};
pub use loader::{load_spot_file, load_with_fallback, SpotError};
pub use region::{classify_region, Region, NAMED_REGIONS};

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Digital mode a reception report was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SpotMode {
    #[serde(rename = "WSPR")]
    #[strum(serialize = "WSPR")]
    Wspr,
    #[serde(rename = "FT8")]
    #[strum(serialize = "FT8")]
    Ft8,
}

/// One raw reception report as delivered by a spotting network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotReport {
    pub timestamp: i64,
    pub frequency_hz: f64,
    pub snr_db: f64,
    #[serde(default)]
    pub distance_km: Option<f64>,
    pub tx_grid: String,
    pub rx_grid: String,
    pub mode: SpotMode,
}
