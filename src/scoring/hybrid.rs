use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bands::Band;
use crate::scoring::BandMetrics;
use crate::spots::BandActivity;

const DETERMINISTIC_WEIGHT: f64 = 0.5;
const WSPR_WEIGHT: f64 = 0.25;
const FT8_WEIGHT: f64 = 0.25;

/// Blend of the deterministic model with WSPR and FT8 evidence for one
/// band. The hybrid value is a fixed convex combination, so it always
/// lies between the smallest and largest layer score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridBandScore {
    pub band: Band,
    pub deterministic_pct: f64,
    pub wspr_pct: f64,
    pub ft8_pct: f64,
    pub hybrid_pct: f64,
}

/// Score the WSPR evidence layer for one band. No data scores 0, which
/// pulls the hybrid toward the deterministic component.
pub fn wspr_layer_score(stat: Option<&BandActivity>) -> f64 {
    let Some(stat) = stat else { return 0.0 };
    if stat.count == 0 {
        return 0.0;
    }
    let activity = (stat.count as f64 * 6.0).min(100.0);
    let distance = (stat.max_distance_km / 50.0).min(100.0);
    let snr = ((stat.median_snr_db + 30.0) * 3.0).min(100.0);
    (activity * 0.4 + distance * 0.4 + snr * 0.2).clamp(0.0, 100.0).round()
}

/// FT8 reports arrive in far greater volume than WSPR, so the layer
/// saturates more slowly per spot and per kilometer.
pub fn ft8_layer_score(stat: Option<&BandActivity>) -> f64 {
    let Some(stat) = stat else { return 0.0 };
    if stat.count == 0 {
        return 0.0;
    }
    let activity = (stat.count as f64 * 4.0).min(100.0);
    let distance = (stat.max_distance_km / 60.0).min(100.0);
    let snr = ((stat.median_snr_db + 20.0) * 2.0).min(100.0);
    (activity * 0.4 + distance * 0.4 + snr * 0.2).clamp(0.0, 100.0).round()
}

/// Combine deterministic metrics with per-band spot statistics into one
/// hybrid DX probability per primary band.
pub fn hybrid_scores(
    metrics: &BTreeMap<Band, BandMetrics>,
    wspr: &BTreeMap<Band, BandActivity>,
    ft8: &BTreeMap<Band, BandActivity>,
) -> BTreeMap<Band, HybridBandScore> {
    metrics
        .iter()
        .map(|(&band, m)| {
            let deterministic = m.dx_probability_pct;
            let wspr_score = wspr_layer_score(wspr.get(&band));
            let ft8_score = ft8_layer_score(ft8.get(&band));
            let hybrid = (deterministic * DETERMINISTIC_WEIGHT
                + wspr_score * WSPR_WEIGHT
                + ft8_score * FT8_WEIGHT)
                .clamp(0.0, 100.0)
                .round();
            (
                band,
                HybridBandScore {
                    band,
                    deterministic_pct: deterministic,
                    wspr_pct: wspr_score,
                    ft8_pct: ft8_score,
                    hybrid_pct: hybrid,
                },
            )
        })
        .collect()
}
