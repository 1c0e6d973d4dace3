use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Continental regions used for path bucketing. `Unknown` covers
/// coordinates outside every box (mostly open ocean and polar areas).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
pub enum Region {
    Europe,
    NorthAmerica,
    SouthAmerica,
    Africa,
    Asia,
    Oceania,
    Unknown,
}

/// The six named regions, in evaluation order.
pub const NAMED_REGIONS: [Region; 6] = [
    Region::Europe,
    Region::NorthAmerica,
    Region::SouthAmerica,
    Region::Africa,
    Region::Asia,
    Region::Oceania,
];

struct RegionBox {
    region: Region,
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

// Ordered: the first containing box wins, which keeps classification
// deterministic where the rectangles overlap.
const REGION_BOXES: [RegionBox; 6] = [
    RegionBox {
        region: Region::Europe,
        lat_min: 35.0,
        lat_max: 70.0,
        lon_min: -30.0,
        lon_max: 40.0,
    },
    RegionBox {
        region: Region::NorthAmerica,
        lat_min: 10.0,
        lat_max: 70.0,
        lon_min: -170.0,
        lon_max: -30.0,
    },
    RegionBox {
        region: Region::SouthAmerica,
        lat_min: -60.0,
        lat_max: 10.0,
        lon_min: -90.0,
        lon_max: -30.0,
    },
    RegionBox {
        region: Region::Africa,
        lat_min: -40.0,
        lat_max: 35.0,
        lon_min: -20.0,
        lon_max: 50.0,
    },
    RegionBox {
        region: Region::Asia,
        lat_min: 0.0,
        lat_max: 70.0,
        lon_min: 40.0,
        lon_max: 150.0,
    },
    RegionBox {
        region: Region::Oceania,
        lat_min: -60.0,
        lat_max: 0.0,
        lon_min: 120.0,
        lon_max: 180.0,
    },
];

/// Classify a coordinate into exactly one region, first match wins.
pub fn classify_region(lat: f64, lon: f64) -> Region {
    for b in &REGION_BOXES {
        if lat > b.lat_min && lat < b.lat_max && lon > b.lon_min && lon < b.lon_max {
            return b.region;
        }
    }
    Region::Unknown
}

impl Region {
    /// Approximate geographic centroid, used for path-distance estimates.
    pub fn centroid(self) -> Option<(f64, f64)> {
        match self {
            Region::Europe => Some((50.0, 10.0)),
            Region::NorthAmerica => Some((40.0, -100.0)),
            Region::SouthAmerica => Some((-15.0, -60.0)),
            Region::Africa => Some((0.0, 20.0)),
            Region::Asia => Some((35.0, 90.0)),
            Region::Oceania => Some((-25.0, 140.0)),
            Region::Unknown => None,
        }
    }
}
